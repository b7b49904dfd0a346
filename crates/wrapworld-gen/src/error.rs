use thiserror::Error;
use wrapworld_world::WorldError;

/// Invalid-argument failures. They abort the generation call; nothing partial is returned.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GenError {
    #[error("invalid range: max {max} must be greater than min {min}")]
    InvalidRange { min: i32, max: i32 },
    #[error("map dimensions must be positive, got {width}x{height}")]
    InvalidDimensions { width: i32, height: i32 },
    #[error("no tunnel class named `{0}` in the configuration")]
    MissingTunnelClass(String),
    #[error("heightmap has {actual} columns but the world is {expected} wide")]
    HeightmapWidthMismatch { expected: usize, actual: usize },
    #[error("floor material `{0}` is not an unbreakable tile")]
    BreakableFloor(String),
    #[error(transparent)]
    World(#[from] WorldError),
}
