use thiserror::Error;
use wrapworld_tiles::TileId;

use super::chunk::{CHUNK_HEIGHT, CHUNK_WIDTH, Chunk};
use super::chunk_coord::ChunkCoord;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum WorldError {
    #[error("world dimensions must be positive, got {width}x{height}")]
    InvalidDimensions { width: i32, height: i32 },
}

#[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoreStats {
    pub chunk_slots: usize,
    pub loaded_chunks: usize,
    pub dirty_chunks: usize,
}

/// Owns every chunk of one world.
///
/// X wraps modulo the world width, so tile `-1` is the last column. Y is never
/// wrapped: reads outside `[0, height)` yield air and writes are dropped.
/// Chunks are instantiated on first write.
pub struct WorldStore {
    width: i32,
    height: i32,
    chunks_x: usize,
    chunks_y: usize,
    chunks: Vec<Option<Chunk>>,
}

impl WorldStore {
    pub fn new(width: i32, height: i32) -> Result<Self, WorldError> {
        if width <= 0 || height <= 0 {
            return Err(WorldError::InvalidDimensions { width, height });
        }
        let chunks_x = (width as usize).div_ceil(CHUNK_WIDTH);
        let chunks_y = (height as usize).div_ceil(CHUNK_HEIGHT);
        log::debug!(
            target: "world",
            "store created width={} height={} chunks={}x{}",
            width,
            height,
            chunks_x,
            chunks_y
        );
        let mut chunks = Vec::with_capacity(chunks_x * chunks_y);
        chunks.resize_with(chunks_x * chunks_y, || None);
        Ok(Self {
            width,
            height,
            chunks_x,
            chunks_y,
            chunks,
        })
    }

    #[inline]
    pub fn width(&self) -> i32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> i32 {
        self.height
    }

    #[inline]
    pub fn chunks_x(&self) -> usize {
        self.chunks_x
    }

    #[inline]
    pub fn chunks_y(&self) -> usize {
        self.chunks_y
    }

    /// Always in `[0, width)`.
    #[inline]
    pub fn wrap_x(&self, x: i32) -> i32 {
        x.rem_euclid(self.width)
    }

    #[inline]
    pub fn in_bounds_y(&self, y: i32) -> bool {
        y >= 0 && y < self.height
    }

    fn slot(&self, cx: i32, cy: i32) -> Option<usize> {
        if cy < 0 || cy as usize >= self.chunks_y {
            return None;
        }
        let cx = cx.rem_euclid(self.chunks_x as i32) as usize;
        Some(cy as usize * self.chunks_x + cx)
    }

    /// Resolves a tile to (slot, local x, local y), wrapping X.
    fn locate(&self, x: i32, y: i32) -> Option<(usize, usize, usize)> {
        if !self.in_bounds_y(y) {
            return None;
        }
        let wx = self.wrap_x(x);
        let coord = ChunkCoord::containing(wx, y);
        let slot = self.slot(coord.cx, coord.cy)?;
        let (bx, by) = coord.base_tile();
        Some((slot, (wx - bx) as usize, (y - by) as usize))
    }

    /// Chunk lookup; `cx` wraps in chunk space, `cy` is bounds-checked.
    pub fn get_chunk(&self, cx: i32, cy: i32) -> Option<&Chunk> {
        self.slot(cx, cy).and_then(|s| self.chunks[s].as_ref())
    }

    pub fn get_chunk_mut(&mut self, cx: i32, cy: i32) -> Option<&mut Chunk> {
        let s = self.slot(cx, cy)?;
        self.chunks[s].as_mut()
    }

    /// Like [`get_chunk_mut`](Self::get_chunk_mut) but instantiates the chunk if absent.
    pub fn chunk_mut_at(&mut self, cx: i32, cy: i32) -> Option<&mut Chunk> {
        let s = self.slot(cx, cy)?;
        let coord = ChunkCoord::new((s % self.chunks_x) as i32, (s / self.chunks_x) as i32);
        Some(self.chunks[s].get_or_insert_with(|| {
            log::trace!(target: "world", "chunk created cx={} cy={}", coord.cx, coord.cy);
            Chunk::new(coord)
        }))
    }

    /// Chunk owning a tile, after X wrap.
    pub fn chunk_coord_of(&self, x: i32, y: i32) -> Option<ChunkCoord> {
        if !self.in_bounds_y(y) {
            return None;
        }
        Some(ChunkCoord::containing(self.wrap_x(x), y))
    }

    pub fn get_terrain(&self, x: i32, y: i32) -> TileId {
        match self.locate(x, y) {
            Some((s, lx, ly)) => self.chunks[s]
                .as_ref()
                .map(|c| c.terrain(lx, ly))
                .unwrap_or(TileId::AIR),
            None => TileId::AIR,
        }
    }

    /// Returns `true` when a cell changed; that chunk's terrain flags are then dirty.
    pub fn set_terrain(&mut self, x: i32, y: i32, id: TileId) -> bool {
        let Some((s, lx, ly)) = self.locate(x, y) else {
            return false;
        };
        if self.chunks[s].is_none() && id.is_air() {
            return false;
        }
        let coord = ChunkCoord::new((s % self.chunks_x) as i32, (s / self.chunks_x) as i32);
        self.chunks[s]
            .get_or_insert_with(|| Chunk::new(coord))
            .set_terrain(lx, ly, id)
    }

    pub fn dig(&mut self, x: i32, y: i32) -> bool {
        self.set_terrain(x, y, TileId::AIR)
    }

    /// Air is not a placeable tile; use [`dig`](Self::dig).
    pub fn place(&mut self, x: i32, y: i32, id: TileId) -> bool {
        if id.is_air() {
            return false;
        }
        self.set_terrain(x, y, id)
    }

    pub fn sunlight(&self, x: i32, y: i32) -> u8 {
        self.locate(x, y)
            .and_then(|(s, lx, ly)| self.chunks[s].as_ref().map(|c| c.sunlight(lx, ly)))
            .unwrap_or(0)
    }

    pub fn set_sunlight(&mut self, x: i32, y: i32, level: u8) {
        if let Some((s, lx, ly)) = self.locate(x, y) {
            let (cx, cy) = ((s % self.chunks_x) as i32, (s / self.chunks_x) as i32);
            if let Some(c) = self.chunk_mut_at(cx, cy) {
                c.set_sunlight(lx, ly, level);
            }
        }
    }

    pub fn liquid(&self, x: i32, y: i32) -> (u8, u8) {
        self.locate(x, y)
            .and_then(|(s, lx, ly)| self.chunks[s].as_ref().map(|c| c.liquid(lx, ly)))
            .unwrap_or((0, 0))
    }

    pub fn set_liquid(&mut self, x: i32, y: i32, amount: u8, kind: u8) {
        if let Some((s, lx, ly)) = self.locate(x, y) {
            let (cx, cy) = ((s % self.chunks_x) as i32, (s / self.chunks_x) as i32);
            if let Some(c) = self.chunk_mut_at(cx, cy) {
                c.set_liquid(lx, ly, amount, kind);
            }
        }
    }

    pub fn flags(&self, x: i32, y: i32) -> u16 {
        self.locate(x, y)
            .and_then(|(s, lx, ly)| self.chunks[s].as_ref().map(|c| c.flags(lx, ly)))
            .unwrap_or(0)
    }

    pub fn set_flags(&mut self, x: i32, y: i32, flags: u16) {
        if let Some((s, lx, ly)) = self.locate(x, y) {
            let (cx, cy) = ((s % self.chunks_x) as i32, (s / self.chunks_x) as i32);
            if let Some(c) = self.chunk_mut_at(cx, cy) {
                c.set_flags(lx, ly, flags);
            }
        }
    }

    pub fn loaded_chunks(&self) -> impl Iterator<Item = &Chunk> {
        self.chunks.iter().filter_map(|c| c.as_ref())
    }

    /// Coordinates of chunks with any dirty flag set, row-major.
    pub fn dirty_chunks(&self) -> Vec<ChunkCoord> {
        self.loaded_chunks()
            .filter(|c| c.dirty.any())
            .map(|c| c.coord)
            .collect()
    }

    pub fn stats(&self) -> StoreStats {
        StoreStats {
            chunk_slots: self.chunks.len(),
            loaded_chunks: self.loaded_chunks().count(),
            dirty_chunks: self.loaded_chunks().filter(|c| c.dirty.any()).count(),
        }
    }
}
