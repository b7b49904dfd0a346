//! Highway planning: a handful of long downward diagonals spread across the map.

use serde::{Deserialize, Serialize};
use wrapworld_geom::Vec2;
use wrapworld_geom::math::{clamp, edge_bias, lerp};

use crate::error::GenError;
use crate::rng::PhaseRng;
use crate::scale::ScaledTunnelClass;

const JITTER_FRAC: f32 = 0.40;
const CENTER_WEIGHT: f32 = 0.65;
const CROSS_CHANCE_CENTER: f32 = 0.55;
const CROSS_CHANCE_EDGE: f32 = 0.80;
const TRAVEL_MIN_FRAC: f32 = 0.25;
const TRAVEL_MAX_FRAC: f32 = 0.55;
const MIN_ANGLE_DEG: f32 = 0.01;
const MAX_ANGLE_DEG: f32 = 89.0;
const MIN_RUN: f32 = 1.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    #[inline]
    pub fn sign(self) -> f32 {
        match self {
            Side::Left => -1.0,
            Side::Right => 1.0,
        }
    }

    #[inline]
    fn from_sign(sign: i32) -> Self {
        if sign >= 0 { Side::Right } else { Side::Left }
    }

    pub fn label(self) -> &'static str {
        match self {
            Side::Left => "left",
            Side::Right => "right",
        }
    }
}

/// A planned start/end segment in tile space. `end.x` is not wrapped.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct HighwayIntent {
    pub id: u32,
    pub start: Vec2,
    pub end: Vec2,
    pub side: Side,
}

impl HighwayIntent {
    #[inline]
    pub fn dx(&self) -> f32 {
        self.end.x - self.start.x
    }

    #[inline]
    pub fn dy(&self) -> f32 {
        self.end.y - self.start.y
    }

    /// Slope below horizontal in degrees; 90 for a vertical segment.
    pub fn angle_deg(&self) -> f32 {
        let run = self.dx().abs();
        if run <= f32::EPSILON {
            return 90.0;
        }
        (self.dy() / run).atan().to_degrees()
    }
}

/// Max of two draws around `width / count_per_width_tiles`, clamped to the class bounds.
pub fn draw_count(
    map_width: i32,
    class: &ScaledTunnelClass,
    rng: &mut PhaseRng,
) -> Result<usize, GenError> {
    let per = class.count_per_width_tiles.max(1.0);
    let base = (map_width as f32 / per).round() as i32;
    let variance = class.count_variance.max(0);
    let lo = base.saturating_sub(variance);
    let hi = base.saturating_add(variance).saturating_add(1);
    let a = rng.next_int(lo, hi)?;
    let b = rng.next_int(lo, hi)?;
    let (min_count, max_count) = if class.max_count < class.min_count {
        (class.max_count, class.min_count)
    } else {
        (class.min_count, class.max_count)
    };
    let count = a.max(b).clamp(min_count.max(0), max_count.max(0));
    Ok(count as usize)
}

pub fn plan(
    map_width: i32,
    map_height: i32,
    class: &ScaledTunnelClass,
    rng: &mut PhaseRng,
) -> Result<Vec<HighwayIntent>, GenError> {
    if map_width <= 0 || map_height <= 0 {
        return Err(GenError::InvalidDimensions {
            width: map_width,
            height: map_height,
        });
    }
    let count = draw_count(map_width, class, rng)?;
    let width = map_width as f32;
    let last_col = (map_width - 1) as f32;
    let last_row = map_height - 1;
    let column_width = if count > 0 { width / count as f32 } else { width };

    let mut intents = Vec::with_capacity(count);
    for i in 0..count {
        let center = i as f32 * column_width + column_width * 0.5;
        let base_t = if count == 1 {
            0.5
        } else {
            i as f32 / (count - 1) as f32
        };
        let edge_x = edge_bias(base_t, class.edge_bias_frac) * last_col;
        let jitter = rng.range_f32(-JITTER_FRAC, JITTER_FRAC) * column_width;
        let start_x = clamp(
            lerp(edge_x, center + jitter, CENTER_WEIGHT),
            0.0,
            last_col,
        );

        let start_y = rng.range_inclusive(class.start_y_min, class.start_y_max);
        let mut end_y = rng.range_inclusive(class.end_y_min, class.end_y_max);
        let min_down =
            rng.range_inclusive(class.min_downward_delta_min, class.min_downward_delta_max);
        let floor_y = start_y.saturating_add(min_down);
        if end_y < floor_y {
            end_y = last_row.min(floor_y);
        }

        let t = if last_col > 0.0 { start_x / last_col } else { 0.5 };
        let edge_strength = (2.0 * t - 1.0).abs();
        let side = if rng.chance(lerp(CROSS_CHANCE_CENTER, CROSS_CHANCE_EDGE, edge_strength)) {
            if t < 0.5 { Side::Right } else { Side::Left }
        } else {
            Side::from_sign(rng.next_sign())
        };
        let sign = side.sign();

        let travel = rng.range_f32(TRAVEL_MIN_FRAC * width, TRAVEL_MAX_FRAC * width);
        let mut end_x = start_x + sign * travel;

        let dy = (end_y - start_y) as f32;
        let abs_dx = (end_x - start_x).abs();
        let min_diag = class.min_diagonal_dy_over_dx;
        if abs_dx > 1e-3 && min_diag > 1e-6 && dy < min_diag * abs_dx {
            end_x = start_x + sign * (dy / min_diag).max(0.0);
        }

        if dy > 0.0 {
            let a = class.min_angle_deg.clamp(MIN_ANGLE_DEG, MAX_ANGLE_DEG);
            let b = class.max_angle_deg.clamp(MIN_ANGLE_DEG, MAX_ANGLE_DEG);
            let (lo, hi) = if b < a { (b, a) } else { (a, b) };
            let angle = rng.range_f32(lo, hi);
            end_x = start_x + sign * dy / angle.to_radians().tan();
        }

        if (end_x - start_x).abs() < MIN_RUN {
            end_x += sign * MIN_RUN;
        }

        let intent = HighwayIntent {
            id: i as u32,
            start: Vec2::new(start_x, start_y as f32),
            end: Vec2::new(end_x, end_y as f32),
            side,
        };
        log::trace!(
            target: "gen",
            "highway {} start=({:.1},{}) end=({:.1},{}) side={}",
            intent.id,
            start_x,
            start_y,
            end_x,
            end_y,
            side.label()
        );
        intents.push(intent);
    }
    log::debug!(target: "gen", "planned {} highways for {}x{}", intents.len(), map_width, map_height);
    Ok(intents)
}
