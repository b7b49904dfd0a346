//! Tile ids, tile classes, and the named tile registry.
#![forbid(unsafe_code)]

pub mod config;
pub mod registry;
pub mod types;

pub use registry::{TileRegistry, TileRegistryError};
pub use types::{TileClass, TileDef, TileId};
