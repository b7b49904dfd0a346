use serde::{Deserialize, Serialize};

use super::chunk::{CHUNK_HEIGHT, CHUNK_WIDTH};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ChunkCoord {
    pub cx: i32,
    pub cy: i32,
}

impl ChunkCoord {
    #[inline]
    pub const fn new(cx: i32, cy: i32) -> Self {
        Self { cx, cy }
    }

    /// Chunk containing an (already wrapped) tile coordinate.
    #[inline]
    pub fn containing(x: i32, y: i32) -> Self {
        Self {
            cx: x.div_euclid(CHUNK_WIDTH as i32),
            cy: y.div_euclid(CHUNK_HEIGHT as i32),
        }
    }

    /// Tile coordinate of the chunk's top-left cell.
    #[inline]
    pub fn base_tile(self) -> (i32, i32) {
        (self.cx * CHUNK_WIDTH as i32, self.cy * CHUNK_HEIGHT as i32)
    }
}

impl From<(i32, i32)> for ChunkCoord {
    fn from(value: (i32, i32)) -> Self {
        Self::new(value.0, value.1)
    }
}

impl From<ChunkCoord> for (i32, i32) {
    fn from(value: ChunkCoord) -> Self {
        (value.cx, value.cy)
    }
}
