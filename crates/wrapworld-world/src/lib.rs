//! Chunked tile storage with toroidal X addressing and per-chunk dirty tracking.
#![forbid(unsafe_code)]

mod chunk;
mod chunk_coord;
mod store;

pub use chunk::{CHUNK_AREA, CHUNK_HEIGHT, CHUNK_WIDTH, Chunk, DirtyFlags};
pub use chunk_coord::ChunkCoord;
pub use store::{StoreStats, WorldError, WorldStore};
