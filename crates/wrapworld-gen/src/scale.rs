//! Resolves fractional configuration into tile units for one map size.
//!
//! Inverted bands are swapped rather than rejected: authored files are often
//! edited out of order and a swapped band is always what was meant.

use std::collections::BTreeMap;

use wrapworld_geom::math::{clamp01, clamp_i32};

use crate::config::{HIGHWAY_CLASS, HeightmapConfig, TerrainMaterials, TunnelClassConfig, WorldGenConfig};
use crate::error::GenError;

#[derive(Clone, Debug, PartialEq)]
pub struct ScaledTunnelClass {
    pub start_y_min: i32,
    pub start_y_max: i32,
    pub end_y_min: i32,
    pub end_y_max: i32,
    pub min_downward_delta_min: i32,
    pub min_downward_delta_max: i32,
    pub count_per_width_tiles: f32,
    pub min_count: i32,
    pub max_count: i32,
    pub count_variance: i32,
    pub min_diagonal_dy_over_dx: f32,
    pub min_angle_deg: f32,
    pub max_angle_deg: f32,
    pub edge_bias_frac: f32,
}

#[derive(Clone, Debug, PartialEq)]
pub struct HeightmapParams {
    pub min_surface_y: i32,
    pub max_surface_y: i32,
    pub step_up_chance: f32,
    pub step_down_chance: f32,
    pub max_step: i32,
    pub max_cliff: i32,
    pub smoothing_passes: u32,
    pub soil_depth: i32,
    pub floor_thickness: i32,
    pub materials: TerrainMaterials,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ScaledConfig {
    pub width: i32,
    pub height: i32,
    pub tunnels: BTreeMap<String, ScaledTunnelClass>,
    pub heightmap: HeightmapParams,
}

impl ScaledConfig {
    pub fn tunnel(&self, name: &str) -> Result<&ScaledTunnelClass, GenError> {
        self.tunnels
            .get(name)
            .ok_or_else(|| GenError::MissingTunnelClass(name.to_string()))
    }

    #[inline]
    pub fn highway(&self) -> Result<&ScaledTunnelClass, GenError> {
        self.tunnel(HIGHWAY_CLASS)
    }
}

#[inline]
fn frac_to_y(frac: f32, map_height: i32) -> i32 {
    (f64::from(frac) * f64::from(map_height - 1)).round() as i32
}

#[inline]
fn frac_to_delta(frac: f32, map_height: i32) -> i32 {
    (f64::from(frac) * f64::from(map_height)).round() as i32
}

/// Swap if inverted, clamp both ends into `[lo_bound, hi_bound]`, then keep max >= min.
pub fn sanitize_band(min: i32, max: i32, lo_bound: i32, hi_bound: i32) -> (i32, i32) {
    let (min, max) = if max < min { (max, min) } else { (min, max) };
    let min = clamp_i32(min, lo_bound, hi_bound);
    let mut max = clamp_i32(max, lo_bound, hi_bound);
    if max < min {
        max = min;
    }
    (min, max)
}

pub fn scale_tunnel_class(cfg: &TunnelClassConfig, map_height: i32) -> ScaledTunnelClass {
    let last_row = map_height - 1;
    let (start_y_min, start_y_max) = sanitize_band(
        frac_to_y(cfg.start_y_min_frac, map_height),
        frac_to_y(cfg.start_y_max_frac, map_height),
        0,
        last_row,
    );
    let (end_y_min, end_y_max) = sanitize_band(
        frac_to_y(cfg.end_y_min_frac, map_height),
        frac_to_y(cfg.end_y_max_frac, map_height),
        0,
        last_row,
    );
    let (min_downward_delta_min, min_downward_delta_max) = sanitize_band(
        frac_to_delta(cfg.min_downward_delta_y_frac_min, map_height),
        frac_to_delta(cfg.min_downward_delta_y_frac_max, map_height),
        0,
        map_height,
    );
    ScaledTunnelClass {
        start_y_min,
        start_y_max,
        end_y_min,
        end_y_max,
        min_downward_delta_min,
        min_downward_delta_max,
        count_per_width_tiles: cfg.count_per_width_tiles,
        min_count: cfg.min_count,
        max_count: cfg.max_count,
        count_variance: cfg.count_variance,
        min_diagonal_dy_over_dx: cfg.min_diagonal_dy_over_dx,
        min_angle_deg: cfg.min_angle_deg,
        max_angle_deg: cfg.max_angle_deg,
        edge_bias_frac: cfg.edge_bias_frac,
    }
}

pub fn scale_heightmap(cfg: &HeightmapConfig, map_height: i32) -> HeightmapParams {
    let (min_surface_y, max_surface_y) = sanitize_band(
        frac_to_y(cfg.min_surface_ratio, map_height),
        frac_to_y(cfg.max_surface_ratio, map_height),
        0,
        map_height - 1,
    );
    HeightmapParams {
        min_surface_y,
        max_surface_y,
        step_up_chance: clamp01(cfg.step_up_chance),
        step_down_chance: clamp01(cfg.step_down_chance),
        max_step: cfg.max_step.max(1),
        max_cliff: cfg.max_cliff.max(0),
        smoothing_passes: cfg.smoothing_passes,
        soil_depth: cfg.soil_depth.max(0),
        floor_thickness: clamp_i32(cfg.floor_thickness, 0, map_height),
        materials: cfg.materials.clone(),
    }
}

pub fn scale(
    config: &WorldGenConfig,
    map_width: i32,
    map_height: i32,
) -> Result<ScaledConfig, GenError> {
    if map_width <= 0 || map_height <= 0 {
        return Err(GenError::InvalidDimensions {
            width: map_width,
            height: map_height,
        });
    }
    let tunnels = config
        .tunnels
        .iter()
        .map(|(name, cfg)| (name.clone(), scale_tunnel_class(cfg, map_height)))
        .collect();
    log::debug!(
        target: "gen",
        "scaled config for {}x{} ({} tunnel classes)",
        map_width,
        map_height,
        config.tunnels.len()
    );
    Ok(ScaledConfig {
        width: map_width,
        height: map_height,
        tunnels,
        heightmap: scale_heightmap(&config.heightmap, map_height),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fractions_resolve_against_last_row() {
        let cfg = TunnelClassConfig {
            start_y_min_frac: 0.0,
            start_y_max_frac: 0.5,
            end_y_min_frac: 1.0,
            end_y_max_frac: 1.0,
            min_downward_delta_y_frac_min: 0.25,
            min_downward_delta_y_frac_max: 1.0,
            ..TunnelClassConfig::default()
        };
        let s = scale_tunnel_class(&cfg, 101);
        assert_eq!((s.start_y_min, s.start_y_max), (0, 50));
        assert_eq!((s.end_y_min, s.end_y_max), (100, 100));
        // Deltas scale by the full height, not the last row.
        assert_eq!(s.min_downward_delta_min, 25);
        assert_eq!(s.min_downward_delta_max, 101);
    }

    #[test]
    fn inverted_bands_are_swapped() {
        let cfg = TunnelClassConfig {
            start_y_min_frac: 0.6,
            start_y_max_frac: 0.2,
            min_downward_delta_y_frac_min: 0.3,
            min_downward_delta_y_frac_max: 0.1,
            ..TunnelClassConfig::default()
        };
        let s = scale_tunnel_class(&cfg, 256);
        assert!(s.start_y_min <= s.start_y_max);
        assert_eq!(s.start_y_min, (0.2f64 * 255.0).round() as i32);
        assert_eq!(s.start_y_max, (0.6f64 * 255.0).round() as i32);
        assert_eq!(s.min_downward_delta_min, (0.1f64 * 256.0).round() as i32);
    }

    #[test]
    fn out_of_range_fractions_are_clamped() {
        let cfg = TunnelClassConfig {
            start_y_min_frac: -0.5,
            start_y_max_frac: 1.7,
            min_downward_delta_y_frac_min: -1.0,
            min_downward_delta_y_frac_max: 3.0,
            ..TunnelClassConfig::default()
        };
        let s = scale_tunnel_class(&cfg, 64);
        assert_eq!((s.start_y_min, s.start_y_max), (0, 63));
        assert_eq!((s.min_downward_delta_min, s.min_downward_delta_max), (0, 64));
    }

    #[test]
    fn counts_and_angles_pass_through() {
        let cfg = TunnelClassConfig::default();
        let s = scale_tunnel_class(&cfg, 300);
        assert_eq!(s.count_per_width_tiles, cfg.count_per_width_tiles);
        assert_eq!(s.min_count, cfg.min_count);
        assert_eq!(s.max_count, cfg.max_count);
        assert_eq!(s.count_variance, cfg.count_variance);
        assert_eq!(s.min_angle_deg, cfg.min_angle_deg);
        assert_eq!(s.max_angle_deg, cfg.max_angle_deg);
        assert_eq!(s.min_diagonal_dy_over_dx, cfg.min_diagonal_dy_over_dx);
        assert_eq!(s.edge_bias_frac, cfg.edge_bias_frac);
    }

    #[test]
    fn non_positive_dimensions_fail() {
        let cfg = WorldGenConfig::default();
        assert_eq!(
            scale(&cfg, 0, 10),
            Err(GenError::InvalidDimensions { width: 0, height: 10 })
        );
        assert!(scale(&cfg, 10, -4).is_err());
    }

    #[test]
    fn missing_class_is_reported() {
        let cfg = WorldGenConfig {
            tunnels: BTreeMap::new(),
            ..WorldGenConfig::default()
        };
        let scaled = scale(&cfg, 64, 64).unwrap();
        assert_eq!(
            scaled.highway(),
            Err(GenError::MissingTunnelClass(HIGHWAY_CLASS.to_string()))
        );
    }

    #[test]
    fn single_row_map_collapses_bands() {
        let scaled = scale(&WorldGenConfig::default(), 10, 1).unwrap();
        let hw = scaled.highway().unwrap();
        assert_eq!((hw.start_y_min, hw.start_y_max), (0, 0));
        assert_eq!((hw.end_y_min, hw.end_y_max), (0, 0));
        assert_eq!(scaled.heightmap.min_surface_y, 0);
        assert_eq!(scaled.heightmap.max_surface_y, 0);
    }
}
