use serde::Deserialize;

use super::types::TileClass;

/// On-disk tile catalogue.
///
/// ```toml
/// [[tiles]]
/// name = "air"
/// class = "empty"
///
/// [[tiles]]
/// name = "basalt"
/// id = 12
/// ```
#[derive(Clone, Debug, Deserialize, Default)]
pub struct TilesConfig {
    #[serde(default)]
    pub tiles: Vec<TileDefConfig>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct TileDefConfig {
    pub name: String,
    #[serde(default)]
    pub id: Option<u16>,
    #[serde(default)]
    pub class: Option<TileClass>,
}
