//! Surface heights: a clamped random walk closed into a loop around the wrapped X axis.

use crate::error::GenError;
use crate::rng::PhaseRng;
use crate::scale::HeightmapParams;

/// One surface Y per column. `heights[0] == heights[width - 1]` on return.
pub fn generate_heightmap(
    width: i32,
    params: &HeightmapParams,
    rng: &mut PhaseRng,
) -> Result<Vec<i32>, GenError> {
    if width <= 0 {
        return Err(GenError::InvalidDimensions { width, height: 0 });
    }
    let lo = params.min_surface_y;
    let hi = params.max_surface_y.max(lo);
    let up = params.step_up_chance;
    let down = params.step_down_chance;
    let max_step = params.max_step.max(1);
    let max_cliff = params.max_cliff.max(0);

    let mut heights = Vec::with_capacity(width as usize);
    let mut current = rng.range_inclusive(lo, hi);
    heights.push(current);
    for _ in 1..width {
        let r = rng.next_float01();
        // Y grows downward: stepping up means a smaller Y.
        let dir = if r < up {
            -1
        } else if r < up + down {
            1
        } else {
            0
        };
        if dir != 0 {
            let step = rng.range_inclusive(1, max_step);
            let delta = (dir * step).clamp(-max_cliff, max_cliff);
            current = (current + delta).clamp(lo, hi);
        }
        heights.push(current);
    }

    close_seam(&mut heights, lo, hi);
    for _ in 0..params.smoothing_passes {
        smooth_circular(&mut heights);
        close_seam(&mut heights, lo, hi);
    }
    log::debug!(
        target: "gen",
        "heightmap width={} band=[{},{}] passes={}",
        width,
        lo,
        hi,
        params.smoothing_passes
    );
    Ok(heights)
}

/// Spreads the first/last mismatch linearly across the row, then pins the last column.
pub fn close_seam(heights: &mut [i32], lo: i32, hi: i32) {
    let n = heights.len();
    if n < 2 {
        return;
    }
    let last = n - 1;
    let delta = heights[last] - heights[0];
    if delta != 0 {
        for (x, h) in heights.iter_mut().enumerate() {
            let t = x as f32 / last as f32;
            let corrected = (*h as f32 - delta as f32 * t).round() as i32;
            *h = corrected.clamp(lo, hi.max(lo));
        }
    }
    heights[last] = heights[0];
}

/// Rounded three-tap average; column 0 and the last column are neighbors.
pub fn smooth_circular(heights: &mut [i32]) {
    let n = heights.len();
    if n < 3 {
        return;
    }
    let src = heights.to_vec();
    for (x, h) in heights.iter_mut().enumerate() {
        let left = src[(x + n - 1) % n];
        let right = src[(x + 1) % n];
        *h = ((left + src[x] + right) as f32 / 3.0).round() as i32;
    }
}
