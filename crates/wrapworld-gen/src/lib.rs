//! Seeded world generation: phase RNG, config scaling, highway planning,
//! heightmap and terrain fill.
#![forbid(unsafe_code)]

pub mod config;
mod error;
pub mod heightmap;
pub mod highway;
pub mod pipeline;
pub mod rng;
pub mod scale;
pub mod terrain;

pub use config::{
    ConfigError, HIGHWAY_CLASS, HeightmapConfig, TerrainMaterials, TunnelClassConfig,
    WorldGenConfig, load_config_from_path,
};
pub use error::GenError;
pub use heightmap::generate_heightmap;
pub use highway::{HighwayIntent, Side, plan};
pub use pipeline::{
    GenerationRequest, GenerationResult, TerrainResult, WorldGenerator, fill_world,
    fill_world_into, generate,
};
pub use rng::{Phase, PhaseRng, derive_stream};
pub use scale::{HeightmapParams, ScaledConfig, ScaledTunnelClass, scale};
pub use terrain::{FillStats, TerrainPalette, fill_terrain};
