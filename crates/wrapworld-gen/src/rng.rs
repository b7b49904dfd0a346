//! Per-phase deterministic random streams.
//!
//! Every generation phase draws from its own stream derived from
//! `(root_seed, phase_id, salt)` with a fixed integer mix, so retuning one
//! phase never reshuffles another and results match across platforms.

use wrapworld_geom::math::lerp;

use crate::error::GenError;

/// xorshift cannot leave the all-zero state.
const ZERO_STATE_REMAP: u32 = 0x9E37_79B9;
const MIX_INIT: u32 = 17;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum Phase {
    Highways = 1,
    Heightmap = 2,
    Terrain = 3,
    Tunnels = 4,
}

impl Phase {
    #[inline]
    pub const fn id(self) -> u32 {
        self as u32
    }
}

#[inline]
fn avalanche(mut x: u32) -> u32 {
    x ^= x >> 16;
    x = x.wrapping_mul(0x7FEB_352D);
    x ^= x >> 15;
    x = x.wrapping_mul(0x846C_A68B);
    x ^= x >> 16;
    x
}

pub fn derive_stream(root_seed: i32, phase_id: u32, salt: u32) -> PhaseRng {
    let mut acc = MIX_INIT;
    for v in [root_seed as u32, phase_id, salt] {
        acc = acc.wrapping_mul(31) ^ v;
    }
    PhaseRng::from_state(avalanche(acc))
}

/// 32-bit xorshift (13/17/5).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PhaseRng {
    state: u32,
}

impl PhaseRng {
    pub fn from_state(state: u32) -> Self {
        Self {
            state: if state == 0 { ZERO_STATE_REMAP } else { state },
        }
    }

    #[inline]
    pub fn for_phase(root_seed: i32, phase: Phase) -> Self {
        derive_stream(root_seed, phase.id(), 0)
    }

    #[inline]
    pub fn for_phase_salted(root_seed: i32, phase: Phase, salt: u32) -> Self {
        derive_stream(root_seed, phase.id(), salt)
    }

    #[inline]
    pub fn state(&self) -> u32 {
        self.state
    }

    #[inline]
    pub fn next_u32(&mut self) -> u32 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 17;
        x ^= x << 5;
        self.state = x;
        x
    }

    /// Uniform in `[min, max_exclusive)` by modulo reduction; the small bias is accepted.
    pub fn next_int(&mut self, min: i32, max_exclusive: i32) -> Result<i32, GenError> {
        if max_exclusive <= min {
            return Err(GenError::InvalidRange {
                min,
                max: max_exclusive,
            });
        }
        let span = (i64::from(max_exclusive) - i64::from(min)) as u64;
        let r = u64::from(self.next_u32()) % span;
        Ok((i64::from(min) + r as i64) as i32)
    }

    /// Uniform in the inclusive band spanned by `a` and `b`, in either order.
    pub fn range_inclusive(&mut self, a: i32, b: i32) -> i32 {
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        let span = (i64::from(hi) - i64::from(lo) + 1) as u64;
        let r = u64::from(self.next_u32()) % span;
        (i64::from(lo) + r as i64) as i32
    }

    /// Top 24 bits scaled into `[0, 1)`.
    #[inline]
    pub fn next_float01(&mut self) -> f32 {
        (self.next_u32() >> 8) as f32 / (1u32 << 24) as f32
    }

    #[inline]
    pub fn range_f32(&mut self, a: f32, b: f32) -> f32 {
        lerp(a, b, self.next_float01())
    }

    /// Probabilities at or beyond the unit interval edges do not consume a draw.
    pub fn chance(&mut self, p: f32) -> bool {
        if p <= 0.0 {
            return false;
        }
        if p >= 1.0 {
            return true;
        }
        self.next_float01() < p
    }

    #[inline]
    pub fn next_sign(&mut self) -> i32 {
        if self.chance(0.5) { 1 } else { -1 }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_state_is_remapped() {
        let mut rng = PhaseRng::from_state(0);
        assert_eq!(rng.state(), ZERO_STATE_REMAP);
        assert_ne!(rng.next_u32(), 0);
    }

    #[test]
    fn xorshift_step_matches_reference() {
        let mut rng = PhaseRng::from_state(1);
        // 1 ^ (1 << 13) = 0x2001; ^ (>> 17) leaves it; ^ (<< 5) = 0x2001 ^ 0x40020.
        assert_eq!(rng.next_u32(), 0x0004_2021);
    }

    #[test]
    fn next_int_rejects_empty_ranges() {
        let mut rng = PhaseRng::for_phase(7, Phase::Highways);
        assert_eq!(
            rng.next_int(5, 5),
            Err(GenError::InvalidRange { min: 5, max: 5 })
        );
        assert!(rng.next_int(5, 4).is_err());
        assert_eq!(rng.next_int(3, 4), Ok(3));
    }

    #[test]
    fn next_int_handles_full_i32_span() {
        let mut rng = PhaseRng::for_phase(1, Phase::Terrain);
        for _ in 0..100 {
            let v = rng.next_int(i32::MIN, i32::MAX).unwrap();
            assert!(v < i32::MAX);
        }
        // Reversed full-width band: the span is 2^32 and must not overflow.
        let v = rng.range_inclusive(i32::MAX, i32::MIN);
        assert!((i32::MIN..=i32::MAX).contains(&v));
    }

    #[test]
    fn chance_edges_do_not_draw() {
        let mut rng = PhaseRng::for_phase(42, Phase::Heightmap);
        let before = rng.state();
        assert!(!rng.chance(0.0));
        assert!(!rng.chance(-3.0));
        assert!(rng.chance(1.0));
        assert!(rng.chance(7.0));
        assert_eq!(rng.state(), before);
    }

    #[test]
    fn floats_stay_in_unit_interval() {
        let mut rng = PhaseRng::for_phase(-99, Phase::Tunnels);
        for _ in 0..10_000 {
            let f = rng.next_float01();
            assert!((0.0..1.0).contains(&f));
            let s = rng.next_sign();
            assert!(s == 1 || s == -1);
        }
    }

    #[test]
    fn derivation_is_stable() {
        let a = derive_stream(12345, Phase::Highways.id(), 0);
        let b = derive_stream(12345, Phase::Highways.id(), 0);
        assert_eq!(a, b);
        assert_ne!(a, derive_stream(12345, Phase::Heightmap.id(), 0));
        assert_ne!(a, derive_stream(12345, Phase::Highways.id(), 1));
        assert_ne!(a, derive_stream(12346, Phase::Highways.id(), 0));
    }
}
