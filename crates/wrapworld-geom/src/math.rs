//! Scalar easing and interpolation helpers.

/// Like `f32::clamp`, but tolerates `lo > hi` by returning `lo`.
#[inline]
pub fn clamp(v: f32, lo: f32, hi: f32) -> f32 {
    if v < lo {
        lo
    } else if v > hi {
        hi.max(lo)
    } else {
        v
    }
}

#[inline]
pub fn clamp01(v: f32) -> f32 {
    clamp(v, 0.0, 1.0)
}

#[inline]
pub fn clamp_i32(v: i32, lo: i32, hi: i32) -> i32 {
    if v < lo { lo } else if v > hi { hi.max(lo) } else { v }
}

#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Position of `v` between `a` and `b`; 0 when the span is degenerate.
#[inline]
pub fn inverse_lerp(a: f32, b: f32, v: f32) -> f32 {
    let span = b - a;
    if span.abs() <= f32::EPSILON {
        0.0
    } else {
        (v - a) / span
    }
}

#[inline]
pub fn smoothstep(edge0: f32, edge1: f32, x: f32) -> f32 {
    let t = clamp01(inverse_lerp(edge0, edge1, x));
    t * t * (3.0 - 2.0 * t)
}

/// Pushes `t` in `[0,1]` towards whichever edge is closer.
///
/// `bias_frac` is authored in `[0, 0.5]`; 0 leaves `t` untouched and 0.5
/// applies the full smoothstep pull.
#[inline]
pub fn edge_bias(t: f32, bias_frac: f32) -> f32 {
    let t = clamp01(t);
    let strength = clamp01(bias_frac * 2.0);
    lerp(t, smoothstep(0.0, 1.0, t), strength)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamp_handles_inverted_bounds() {
        assert_eq!(clamp(5.0, 2.0, 1.0), 2.0);
        assert_eq!(clamp(-1.0, 0.0, 1.0), 0.0);
        assert_eq!(clamp_i32(9, 0, 4), 4);
        assert_eq!(clamp_i32(9, 4, 0), 4);
    }

    #[test]
    fn inverse_lerp_undoes_lerp() {
        let v = lerp(10.0, 30.0, 0.25);
        assert_eq!(v, 15.0);
        assert!((inverse_lerp(10.0, 30.0, v) - 0.25).abs() < 1e-6);
        assert_eq!(inverse_lerp(3.0, 3.0, 7.0), 0.0);
    }

    #[test]
    fn smoothstep_endpoints_and_midpoint() {
        assert_eq!(smoothstep(0.0, 1.0, -2.0), 0.0);
        assert_eq!(smoothstep(0.0, 1.0, 2.0), 1.0);
        assert!((smoothstep(0.0, 1.0, 0.5) - 0.5).abs() < 1e-6);
    }

    #[test]
    fn edge_bias_pulls_towards_edges() {
        assert_eq!(edge_bias(0.3, 0.0), 0.3);
        let biased = edge_bias(0.3, 0.5);
        assert!(biased < 0.3);
        let biased_hi = edge_bias(0.7, 0.25);
        assert!(biased_hi > 0.7);
        assert_eq!(edge_bias(0.0, 0.5), 0.0);
        assert_eq!(edge_bias(1.0, 0.5), 1.0);
        assert!((edge_bias(0.5, 0.5) - 0.5).abs() < 1e-6);
    }
}
