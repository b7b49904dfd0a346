use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const HIGHWAY_CLASS: &str = "highway";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read worldgen config: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse worldgen config: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Authored generation settings, sized relative to the map.
///
/// ```toml
/// [tunnels.highway]
/// count_per_width_tiles = 140.0
/// min_count = 4
/// max_count = 8
///
/// [heightmap]
/// smoothing_passes = 3
/// ```
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct WorldGenConfig {
    #[serde(default = "default_tunnels")]
    pub tunnels: BTreeMap<String, TunnelClassConfig>,
    #[serde(default)]
    pub heightmap: HeightmapConfig,
}

impl Default for WorldGenConfig {
    fn default() -> Self {
        Self {
            tunnels: default_tunnels(),
            heightmap: HeightmapConfig::default(),
        }
    }
}

fn default_tunnels() -> BTreeMap<String, TunnelClassConfig> {
    BTreeMap::from([(HIGHWAY_CLASS.to_string(), TunnelClassConfig::default())])
}

impl WorldGenConfig {
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(s)?)
    }

    pub fn tunnel(&self, name: &str) -> Option<&TunnelClassConfig> {
        self.tunnels.get(name)
    }
}

pub fn load_config_from_path(path: &Path) -> Result<WorldGenConfig, ConfigError> {
    let s = fs::read_to_string(path)?;
    WorldGenConfig::from_toml_str(&s)
}

/// Fractions are of map height; Y grows downward.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct TunnelClassConfig {
    #[serde(default = "default_start_y_min_frac")]
    pub start_y_min_frac: f32,
    #[serde(default = "default_start_y_max_frac")]
    pub start_y_max_frac: f32,
    #[serde(default = "default_end_y_min_frac")]
    pub end_y_min_frac: f32,
    #[serde(default = "default_end_y_max_frac")]
    pub end_y_max_frac: f32,
    #[serde(default = "default_count_per_width_tiles")]
    pub count_per_width_tiles: f32,
    #[serde(default = "default_min_count")]
    pub min_count: i32,
    #[serde(default = "default_max_count")]
    pub max_count: i32,
    #[serde(default = "default_count_variance")]
    pub count_variance: i32,
    #[serde(default = "default_min_diagonal")]
    pub min_diagonal_dy_over_dx: f32,
    #[serde(default = "default_min_angle")]
    pub min_angle_deg: f32,
    #[serde(default = "default_max_angle")]
    pub max_angle_deg: f32,
    #[serde(default = "default_min_down_min")]
    pub min_downward_delta_y_frac_min: f32,
    #[serde(default = "default_min_down_max")]
    pub min_downward_delta_y_frac_max: f32,
    #[serde(default = "default_edge_bias")]
    pub edge_bias_frac: f32,
}
fn default_start_y_min_frac() -> f32 {
    0.18
}
fn default_start_y_max_frac() -> f32 {
    0.35
}
fn default_end_y_min_frac() -> f32 {
    0.55
}
fn default_end_y_max_frac() -> f32 {
    0.85
}
fn default_count_per_width_tiles() -> f32 {
    140.0
}
fn default_min_count() -> i32 {
    4
}
fn default_max_count() -> i32 {
    8
}
fn default_count_variance() -> i32 {
    1
}
fn default_min_diagonal() -> f32 {
    0.35
}
fn default_min_angle() -> f32 {
    20.0
}
fn default_max_angle() -> f32 {
    55.0
}
fn default_min_down_min() -> f32 {
    0.15
}
fn default_min_down_max() -> f32 {
    0.30
}
fn default_edge_bias() -> f32 {
    0.25
}
impl Default for TunnelClassConfig {
    fn default() -> Self {
        Self {
            start_y_min_frac: default_start_y_min_frac(),
            start_y_max_frac: default_start_y_max_frac(),
            end_y_min_frac: default_end_y_min_frac(),
            end_y_max_frac: default_end_y_max_frac(),
            count_per_width_tiles: default_count_per_width_tiles(),
            min_count: default_min_count(),
            max_count: default_max_count(),
            count_variance: default_count_variance(),
            min_diagonal_dy_over_dx: default_min_diagonal(),
            min_angle_deg: default_min_angle(),
            max_angle_deg: default_max_angle(),
            min_downward_delta_y_frac_min: default_min_down_min(),
            min_downward_delta_y_frac_max: default_min_down_max(),
            edge_bias_frac: default_edge_bias(),
        }
    }
}

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct HeightmapConfig {
    #[serde(default = "default_min_surface_ratio")]
    pub min_surface_ratio: f32,
    #[serde(default = "default_max_surface_ratio")]
    pub max_surface_ratio: f32,
    #[serde(default = "default_step_up_chance")]
    pub step_up_chance: f32,
    #[serde(default = "default_step_down_chance")]
    pub step_down_chance: f32,
    #[serde(default = "default_max_step")]
    pub max_step: i32,
    #[serde(default = "default_max_cliff")]
    pub max_cliff: i32,
    #[serde(default = "default_smoothing_passes")]
    pub smoothing_passes: u32,
    #[serde(default = "default_soil_depth")]
    pub soil_depth: i32,
    #[serde(default = "default_floor_thickness")]
    pub floor_thickness: i32,
    #[serde(default)]
    pub materials: TerrainMaterials,
}
fn default_min_surface_ratio() -> f32 {
    0.20
}
fn default_max_surface_ratio() -> f32 {
    0.40
}
fn default_step_up_chance() -> f32 {
    0.25
}
fn default_step_down_chance() -> f32 {
    0.25
}
fn default_max_step() -> i32 {
    3
}
fn default_max_cliff() -> i32 {
    2
}
fn default_smoothing_passes() -> u32 {
    2
}
fn default_soil_depth() -> i32 {
    6
}
fn default_floor_thickness() -> i32 {
    2
}
impl Default for HeightmapConfig {
    fn default() -> Self {
        Self {
            min_surface_ratio: default_min_surface_ratio(),
            max_surface_ratio: default_max_surface_ratio(),
            step_up_chance: default_step_up_chance(),
            step_down_chance: default_step_down_chance(),
            max_step: default_max_step(),
            max_cliff: default_max_cliff(),
            smoothing_passes: default_smoothing_passes(),
            soil_depth: default_soil_depth(),
            floor_thickness: default_floor_thickness(),
            materials: TerrainMaterials::default(),
        }
    }
}

/// Tile names resolved against the tile registry at fill time.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
pub struct TerrainMaterials {
    #[serde(default = "default_soil_name")]
    pub soil: String,
    #[serde(default = "default_rock_name")]
    pub rock: String,
    #[serde(default = "default_floor_name")]
    pub floor: String,
}
fn default_soil_name() -> String {
    "soil".into()
}
fn default_rock_name() -> String {
    "rock".into()
}
fn default_floor_name() -> String {
    "bedrock".into()
}
impl Default for TerrainMaterials {
    fn default() -> Self {
        Self {
            soil: default_soil_name(),
            rock: default_rock_name(),
            floor: default_floor_name(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_yields_defaults() {
        let cfg = WorldGenConfig::from_toml_str("").unwrap();
        assert_eq!(cfg, WorldGenConfig::default());
        assert!(cfg.tunnel(HIGHWAY_CLASS).is_some());
    }

    #[test]
    fn partial_class_fills_missing_fields() {
        let cfg = WorldGenConfig::from_toml_str(
            r#"
            [tunnels.highway]
            count_per_width_tiles = 64.0
            max_count = 12

            [heightmap]
            smoothing_passes = 5

            [heightmap.materials]
            rock = "granite"
        "#,
        )
        .unwrap();
        let hw = cfg.tunnel(HIGHWAY_CLASS).unwrap();
        assert_eq!(hw.count_per_width_tiles, 64.0);
        assert_eq!(hw.max_count, 12);
        assert_eq!(hw.min_count, default_min_count());
        assert_eq!(hw.edge_bias_frac, default_edge_bias());
        assert_eq!(cfg.heightmap.smoothing_passes, 5);
        assert_eq!(cfg.heightmap.materials.rock, "granite");
        assert_eq!(cfg.heightmap.materials.soil, "soil");
    }

    #[test]
    fn explicit_tunnel_table_replaces_defaults() {
        let cfg = WorldGenConfig::from_toml_str(
            r#"
            [tunnels.crawlway]
            min_count = 1
        "#,
        )
        .unwrap();
        assert!(cfg.tunnel(HIGHWAY_CLASS).is_none());
        assert_eq!(cfg.tunnel("crawlway").unwrap().min_count, 1);
    }

    #[test]
    fn bad_types_are_parse_errors() {
        let err = WorldGenConfig::from_toml_str("[heightmap]\nmax_step = \"tall\"").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }
}
