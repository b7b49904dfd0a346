use proptest::prelude::*;
use wrapworld_gen::{
    GenerationRequest, Phase, PhaseRng, TunnelClassConfig, WorldGenConfig, generate, plan, scale,
};

fn dims() -> impl Strategy<Value = (i32, i32)> {
    (16i32..2048, 16i32..1024)
}

fn class_cfg() -> impl Strategy<Value = TunnelClassConfig> {
    (
        (0.0f32..1.0, 0.0f32..1.0, 0.0f32..1.0, 0.0f32..1.0),
        (1.0f32..400.0, 1i32..6, 0i32..6, 0i32..4),
        (0.0f32..2.0, 1.0f32..89.0, 1.0f32..89.0),
        (0.0f32..0.5, 0.0f32..0.5, 0.0f32..0.5),
    )
        .prop_map(|(ys, counts, slopes, rest)| TunnelClassConfig {
            start_y_min_frac: ys.0,
            start_y_max_frac: ys.1,
            end_y_min_frac: ys.2,
            end_y_max_frac: ys.3,
            count_per_width_tiles: counts.0,
            min_count: counts.1,
            max_count: counts.1 + counts.2,
            count_variance: counts.3,
            min_diagonal_dy_over_dx: slopes.0,
            min_angle_deg: slopes.1,
            max_angle_deg: slopes.2,
            min_downward_delta_y_frac_min: rest.0,
            min_downward_delta_y_frac_max: rest.1,
            edge_bias_frac: rest.2,
        })
}

fn config_with(class: TunnelClassConfig) -> WorldGenConfig {
    let mut cfg = WorldGenConfig::default();
    cfg.tunnels.insert("highway".into(), class);
    cfg
}

proptest! {
    #[test]
    fn plan_is_deterministic((w, h) in dims(), seed in any::<i32>(), class in class_cfg()) {
        let req = GenerationRequest::new(w, h, seed).with_config(config_with(class));
        prop_assert_eq!(generate(&req).unwrap(), generate(&req).unwrap());
    }

    #[test]
    fn count_stays_within_bounds((w, h) in dims(), seed in any::<i32>(), class in class_cfg()) {
        let (lo, hi) = (class.min_count as usize, class.max_count as usize);
        let req = GenerationRequest::new(w, h, seed).with_config(config_with(class));
        let n = generate(&req).unwrap().highways.len();
        prop_assert!(n >= lo && n <= hi, "{} not in [{}, {}]", n, lo, hi);
    }

    #[test]
    fn intents_trend_downward_and_start_inside((w, h) in dims(), seed in any::<i32>(), class in class_cfg()) {
        let req = GenerationRequest::new(w, h, seed).with_config(config_with(class));
        for it in generate(&req).unwrap().highways {
            prop_assert!(it.end.y >= it.start.y);
            prop_assert!(it.end.y <= (h - 1) as f32);
            prop_assert!(it.start.x >= 0.0 && it.start.x <= (w - 1) as f32);
            prop_assert!(it.dx().abs() >= 1.0 - 1e-3);
            prop_assert_eq!(it.dx() > 0.0, it.side.sign() > 0.0);
        }
    }

    // A fixed downward delta places the end row exactly, capped at the last row,
    // whenever the drawn end band sits above start + delta.
    #[test]
    fn fixed_downward_delta_pins_end_row(
        (w, h) in dims(),
        seed in any::<i32>(),
        start in 0.0f32..0.6,
        delta in 0.05f32..0.8,
    ) {
        let class = TunnelClassConfig {
            start_y_min_frac: start,
            start_y_max_frac: start,
            end_y_min_frac: 0.0,
            end_y_max_frac: start,
            min_downward_delta_y_frac_min: delta,
            min_downward_delta_y_frac_max: delta,
            ..TunnelClassConfig::default()
        };
        let req = GenerationRequest::new(w, h, seed).with_config(config_with(class));
        let result = generate(&req).unwrap();
        let d = result.scaled.highway().unwrap().min_downward_delta_min;
        prop_assume!(d > 0);
        for it in result.highways {
            let expected = (h - 1).min(it.start.y as i32 + d);
            prop_assert_eq!(it.end.y as i32, expected);
        }
    }

    // Slopes land in the angle band unless a run shorter than one tile was nudged.
    #[test]
    fn angle_band_holds((w, h) in dims(), seed in any::<i32>(), class in class_cfg()) {
        let lo = class.min_angle_deg.min(class.max_angle_deg);
        let hi = class.min_angle_deg.max(class.max_angle_deg);
        let req = GenerationRequest::new(w, h, seed).with_config(config_with(class));
        for it in generate(&req).unwrap().highways {
            if it.dy() <= 0.0 || it.dx().abs() <= 2.0 + 1e-3 {
                continue;
            }
            let angle = it.angle_deg();
            prop_assert!(angle >= lo - 0.1 && angle <= hi + 0.1, "{} not in [{}, {}]", angle, lo, hi);
        }
    }

    // Other phases' streams, salted or not, never feed the highway plan.
    #[test]
    fn highway_stream_is_independent_of_other_phases(seed in any::<i32>(), salt in any::<u32>()) {
        let scaled = scale(&WorldGenConfig::default(), 512, 256).unwrap();
        let class = scaled.highway().unwrap();
        let mut other = PhaseRng::for_phase_salted(seed, Phase::Heightmap, salt);
        for _ in 0..16 {
            other.next_u32();
        }
        let mut rng = PhaseRng::for_phase(seed, Phase::Highways);
        let direct = plan(512, 256, class, &mut rng).unwrap();
        let via_request = generate(&GenerationRequest::new(512, 256, seed)).unwrap().highways;
        prop_assert_eq!(direct, via_request);
        prop_assert_ne!(
            PhaseRng::for_phase_salted(seed, Phase::Highways, 0),
            PhaseRng::for_phase_salted(seed, Phase::Heightmap, salt)
        );
    }
}

#[test]
fn max_count_variance_does_not_overflow() {
    let class = TunnelClassConfig {
        count_variance: i32::MAX,
        ..TunnelClassConfig::default()
    };
    for seed in [1, 12345, -7] {
        let req = GenerationRequest::new(512, 256, seed).with_config(config_with(class.clone()));
        let n = generate(&req).unwrap().highways.len();
        assert!((4..=8).contains(&n), "{}", n);
    }
}
