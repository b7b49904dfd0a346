//! Player-facing dig/place rules and per-chunk edit revisions.
#![forbid(unsafe_code)]

use std::collections::HashMap;

use wrapworld_tiles::{TileClass, TileId, TileRegistry};
use wrapworld_world::{CHUNK_HEIGHT, CHUNK_WIDTH, ChunkCoord, WorldStore};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RefuseReason {
    OutOfBounds,
    Unbreakable,
    Occupied,
    NotSolid,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EditOutcome {
    Applied { stamp: u64 },
    Unchanged,
    Refused(RefuseReason),
}

impl EditOutcome {
    #[inline]
    pub fn is_applied(self) -> bool {
        matches!(self, EditOutcome::Applied { .. })
    }
}

#[derive(Default, Debug, Clone, Copy)]
pub struct EditStats {
    pub applied: usize,
    pub refused: usize,
    pub rev_entries: usize,
    pub built_entries: usize,
}

/// Applies edits to a [`WorldStore`] and tracks which chunks need rebuilding.
///
/// The store marks only the owning chunk dirty. Revisions here also cover
/// neighbors when an edit touches a chunk border, since neighbors sample
/// across the seam.
#[derive(Default)]
pub struct EditController {
    rev: HashMap<ChunkCoord, u64>,
    built: HashMap<ChunkCoord, u64>,
    counter: u64,
    applied: usize,
    refused: usize,
}

impl EditController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stats(&self) -> EditStats {
        EditStats {
            applied: self.applied,
            refused: self.refused,
            rev_entries: self.rev.len(),
            built_entries: self.built.len(),
        }
    }

    fn refuse(&mut self, reason: RefuseReason, x: i32, y: i32) -> EditOutcome {
        self.refused += 1;
        log::debug!(target: "edit", "refused x={} y={} reason={:?}", x, y, reason);
        EditOutcome::Refused(reason)
    }

    fn commit(&mut self, store: &mut WorldStore, x: i32, y: i32, id: TileId) -> EditOutcome {
        if !store.set_terrain(x, y, id) {
            return EditOutcome::Unchanged;
        }
        self.applied += 1;
        let stamp = self.bump_region_around(store, x, y);
        EditOutcome::Applied { stamp }
    }

    /// Clears a tile unless it belongs to the unbreakable class.
    pub fn dig(
        &mut self,
        store: &mut WorldStore,
        reg: &TileRegistry,
        x: i32,
        y: i32,
    ) -> EditOutcome {
        if !store.in_bounds_y(y) {
            return self.refuse(RefuseReason::OutOfBounds, x, y);
        }
        let current = store.get_terrain(x, y);
        if current.is_air() {
            return EditOutcome::Unchanged;
        }
        if reg.class_of(current) == TileClass::Unbreakable {
            return self.refuse(RefuseReason::Unbreakable, x, y);
        }
        self.commit(store, x, y, TileId::AIR)
    }

    /// Fills an empty tile with a solid one.
    pub fn place(
        &mut self,
        store: &mut WorldStore,
        reg: &TileRegistry,
        x: i32,
        y: i32,
        id: TileId,
    ) -> EditOutcome {
        if !store.in_bounds_y(y) {
            return self.refuse(RefuseReason::OutOfBounds, x, y);
        }
        if !reg.class_of(id).is_solid() {
            return self.refuse(RefuseReason::NotSolid, x, y);
        }
        if !store.get_terrain(x, y).is_air() {
            return self.refuse(RefuseReason::Occupied, x, y);
        }
        self.commit(store, x, y, id)
    }

    /// Stamps the chunk holding `(x, y)` and any neighbor across an adjacent border.
    /// Neighbor X wraps in chunk space; neighbors past the top or bottom are skipped.
    pub fn bump_region_around(&mut self, store: &WorldStore, x: i32, y: i32) -> u64 {
        self.counter = self.counter.wrapping_add(1).max(1);
        let stamp = self.counter;
        for key in affected_chunks(store, x, y) {
            self.rev.insert(key, stamp);
        }
        stamp
    }

    pub fn get_rev(&self, coord: ChunkCoord) -> u64 {
        self.rev.get(&coord).copied().unwrap_or(0)
    }

    pub fn mark_built(&mut self, coord: ChunkCoord, rev: u64) {
        let e = self.built.entry(coord).or_insert(0);
        if rev > *e {
            *e = rev;
        }
    }

    pub fn get_built_rev(&self, coord: ChunkCoord) -> u64 {
        self.built.get(&coord).copied().unwrap_or(0)
    }

    pub fn needs_rebuild(&self, coord: ChunkCoord) -> bool {
        self.get_rev(coord) > self.get_built_rev(coord)
    }
}

/// Owning chunk first, then border neighbors. Empty when `y` is out of range.
pub fn affected_chunks(store: &WorldStore, x: i32, y: i32) -> Vec<ChunkCoord> {
    let Some(owner) = store.chunk_coord_of(x, y) else {
        return Vec::new();
    };
    let (bx, by) = owner.base_tile();
    let lx = store.wrap_x(x) - bx;
    let ly = y - by;
    let chunks_x = store.chunks_x() as i32;
    let chunks_y = store.chunks_y() as i32;

    let mut offsets_x = vec![0];
    let mut offsets_y = vec![0];
    if lx == 0 {
        offsets_x.push(-1);
    }
    // The last chunk column may be partial; its right neighbor is chunk 0.
    let right_edge = (CHUNK_WIDTH as i32 - 1).min(store.width() - 1 - bx);
    if lx == right_edge {
        offsets_x.push(1);
    }
    if ly == 0 {
        offsets_y.push(-1);
    }
    if ly == CHUNK_HEIGHT as i32 - 1 {
        offsets_y.push(1);
    }

    let mut affected = vec![owner];
    for dx in &offsets_x {
        for dy in &offsets_y {
            if *dx == 0 && *dy == 0 {
                continue;
            }
            let cy = owner.cy + dy;
            if cy < 0 || cy >= chunks_y {
                continue;
            }
            let key = ChunkCoord::new((owner.cx + dx).rem_euclid(chunks_x), cy);
            if !affected.contains(&key) {
                affected.push(key);
            }
        }
    }
    affected
}
