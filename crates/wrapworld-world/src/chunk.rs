use wrapworld_tiles::TileId;

use super::chunk_coord::ChunkCoord;

pub const CHUNK_WIDTH: usize = 32;
pub const CHUNK_HEIGHT: usize = 32;
pub const CHUNK_AREA: usize = CHUNK_WIDTH * CHUNK_HEIGHT;

/// Which downstream consumers must recompute this chunk.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DirtyFlags {
    pub render: bool,
    pub collision: bool,
    pub light: bool,
    pub liquid: bool,
}

impl DirtyFlags {
    pub const ALL: DirtyFlags = DirtyFlags {
        render: true,
        collision: true,
        light: true,
        liquid: true,
    };
    pub const CLEAN: DirtyFlags = DirtyFlags {
        render: false,
        collision: false,
        light: false,
        liquid: false,
    };

    /// Terrain edits invalidate everything but liquid.
    #[inline]
    pub fn mark_terrain(&mut self) {
        self.render = true;
        self.collision = true;
        self.light = true;
    }

    #[inline]
    pub fn any(self) -> bool {
        self.render || self.collision || self.light || self.liquid
    }

    #[inline]
    pub fn clear_render(&mut self) {
        self.render = false;
    }

    #[inline]
    pub fn clear_collision(&mut self) {
        self.collision = false;
    }

    #[inline]
    pub fn clear_light(&mut self) {
        self.light = false;
    }

    #[inline]
    pub fn clear_liquid(&mut self) {
        self.liquid = false;
    }
}

impl Default for DirtyFlags {
    fn default() -> Self {
        DirtyFlags::ALL
    }
}

/// Fixed-size block of cells stored as parallel per-layer arrays.
#[derive(Clone, Debug)]
pub struct Chunk {
    pub coord: ChunkCoord,
    terrain: Vec<TileId>,
    sunlight: Vec<u8>,
    liquid_amount: Vec<u8>,
    liquid_type: Vec<u8>,
    flags: Vec<u16>,
    pub dirty: DirtyFlags,
}

impl Chunk {
    pub fn new(coord: ChunkCoord) -> Self {
        Self {
            coord,
            terrain: vec![TileId::AIR; CHUNK_AREA],
            sunlight: vec![0; CHUNK_AREA],
            liquid_amount: vec![0; CHUNK_AREA],
            liquid_type: vec![0; CHUNK_AREA],
            flags: vec![0; CHUNK_AREA],
            dirty: DirtyFlags::ALL,
        }
    }

    pub fn from_terrain_local(coord: ChunkCoord, terrain: Vec<TileId>) -> Self {
        let mut t = terrain;
        if t.len() != CHUNK_AREA {
            t.resize(CHUNK_AREA, TileId::AIR);
        }
        Self {
            terrain: t,
            ..Self::new(coord)
        }
    }

    #[inline]
    pub fn idx(lx: usize, ly: usize) -> usize {
        lx + ly * CHUNK_WIDTH
    }

    #[inline]
    pub fn terrain(&self, lx: usize, ly: usize) -> TileId {
        self.terrain[Self::idx(lx, ly)]
    }

    /// Returns `true` when the cell actually changed.
    pub fn set_terrain(&mut self, lx: usize, ly: usize, id: TileId) -> bool {
        let i = Self::idx(lx, ly);
        if self.terrain[i] == id {
            return false;
        }
        self.terrain[i] = id;
        self.dirty.mark_terrain();
        true
    }

    #[inline]
    pub fn sunlight(&self, lx: usize, ly: usize) -> u8 {
        self.sunlight[Self::idx(lx, ly)]
    }

    pub fn set_sunlight(&mut self, lx: usize, ly: usize, level: u8) {
        let i = Self::idx(lx, ly);
        if self.sunlight[i] != level {
            self.sunlight[i] = level;
            self.dirty.light = true;
        }
    }

    /// `(amount, kind)` of liquid in the cell.
    #[inline]
    pub fn liquid(&self, lx: usize, ly: usize) -> (u8, u8) {
        let i = Self::idx(lx, ly);
        (self.liquid_amount[i], self.liquid_type[i])
    }

    pub fn set_liquid(&mut self, lx: usize, ly: usize, amount: u8, kind: u8) {
        let i = Self::idx(lx, ly);
        if self.liquid_amount[i] != amount || self.liquid_type[i] != kind {
            self.liquid_amount[i] = amount;
            self.liquid_type[i] = kind;
            self.dirty.liquid = true;
        }
    }

    #[inline]
    pub fn flags(&self, lx: usize, ly: usize) -> u16 {
        self.flags[Self::idx(lx, ly)]
    }

    pub fn set_flags(&mut self, lx: usize, ly: usize, flags: u16) {
        let i = Self::idx(lx, ly);
        if self.flags[i] != flags {
            self.flags[i] = flags;
            self.dirty.render = true;
        }
    }

    #[inline]
    pub fn terrain_slice(&self) -> &[TileId] {
        &self.terrain
    }

    /// Read-and-clear for consumers that redraw or rebuild the whole chunk.
    pub fn take_dirty(&mut self) -> DirtyFlags {
        std::mem::replace(&mut self.dirty, DirtyFlags::CLEAN)
    }

    #[inline]
    pub fn has_non_air(&self) -> bool {
        self.terrain.iter().any(|t| !t.is_air())
    }

    #[inline]
    pub fn is_all_air(&self) -> bool {
        !self.has_non_air()
    }
}
