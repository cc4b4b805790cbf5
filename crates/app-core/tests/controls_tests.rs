// Host-side tests for panel bindings, startup config and keyboard mapping.

use app_core::{
    action_for_key, behavior_for_digit, BehaviorMode, Control, ControlChange, ControlEffect,
    KeyAction, ParticleCount, ParticleError, SimulationParameters, StartupConfig, SLIDERS,
};

#[test]
fn slider_ranges_match_panel() {
    let range = |c: Control| {
        let s = c.spec();
        (s.min, s.max)
    };
    assert_eq!(range(Control::Speed), (0.1, 5.0));
    assert_eq!(range(Control::CenterX), (-2.0, 2.0));
    assert_eq!(range(Control::CenterY), (-2.0, 2.0));
    assert_eq!(range(Control::CenterZ), (-2.0, 2.0));
    assert_eq!(range(Control::RadiusMult), (1.0, 20.0));
    assert_eq!(range(Control::Red), (0.1, 1.0));
    assert_eq!(range(Control::Green), (0.1, 1.0));
    assert_eq!(range(Control::Blue), (0.1, 1.0));
    assert_eq!(range(Control::Height), (0.1, 1.0));
    assert_eq!(range(Control::Radius), (0.1, 1.0));
    assert_eq!(range(Control::ParticleCount), (100.0, 50_000.0));
    assert_eq!(Control::ParticleCount.spec().step, 100.0);
}

#[test]
fn only_shape_and_count_regenerate() {
    let regenerating: Vec<Control> = SLIDERS
        .iter()
        .map(|s| s.control)
        .filter(|c| c.regenerates())
        .collect();
    assert_eq!(
        regenerating,
        vec![Control::Height, Control::Radius, Control::ParticleCount]
    );
}

#[test]
fn element_ids_are_unique() {
    let mut ids: Vec<&str> = SLIDERS.iter().map(|s| s.control.element_id()).collect();
    ids.sort_unstable();
    ids.dedup();
    assert_eq!(ids.len(), SLIDERS.len());
}

#[test]
fn apply_clamps_into_range() {
    let mut p = SimulationParameters::default();
    p.apply(ControlChange::Slider(Control::Speed, 99.0)).unwrap();
    assert_eq!(p.speed, 5.0);
    p.apply(ControlChange::Slider(Control::CenterX, -7.0)).unwrap();
    assert_eq!(p.center_of_mass.x, -2.0);
    let effect = p
        .apply(ControlChange::Slider(Control::ParticleCount, 0.0))
        .unwrap();
    assert_eq!(effect, ControlEffect::RegenerateRequired);
    assert_eq!(p.particle_count.get(), 100);
}

#[test]
fn value_reads_back_applied_slider() {
    let mut p = SimulationParameters::default();
    p.apply(ControlChange::Slider(Control::Green, 0.42)).unwrap();
    assert!((p.value(Control::Green) - 0.42).abs() < 1e-6);
    p.apply(ControlChange::Slider(Control::ParticleCount, 2_550.0))
        .unwrap();
    assert_eq!(p.value(Control::ParticleCount), 2_600.0);
}

#[test]
fn particle_count_rejects_non_positive() {
    for bad in [0_i64, -1, -50_000] {
        assert!(matches!(
            ParticleCount::try_from(bad),
            Err(ParticleError::InvalidArgument(_))
        ));
    }
    assert!(ParticleCount::try_from(f64::NAN).is_err());
    assert!(ParticleCount::try_from(-0.4_f64).is_err());
    assert_eq!(ParticleCount::try_from(2.6_f64).unwrap().get(), 3);
    assert!(ParticleCount::new(0).is_err());
}

#[test]
fn behavior_parses_labels_and_codes() {
    assert_eq!("fire".parse::<BehaviorMode>().unwrap(), BehaviorMode::Fire);
    assert_eq!("SPORES".parse::<BehaviorMode>().unwrap(), BehaviorMode::Spores);
    assert_eq!("2".parse::<BehaviorMode>().unwrap(), BehaviorMode::Asteroids);
    assert!("comets".parse::<BehaviorMode>().is_err());
    assert!("7".parse::<BehaviorMode>().is_err());
}

#[test]
fn behavior_cycle_visits_every_mode() {
    let mut mode = BehaviorMode::default();
    assert_eq!(mode, BehaviorMode::Fire);
    let mut seen = vec![mode];
    for _ in 0..2 {
        mode = mode.next();
        seen.push(mode);
    }
    assert_eq!(seen, BehaviorMode::ALL.to_vec());
    assert_eq!(mode.next(), BehaviorMode::Fire);
}

#[test]
fn config_parses_query_string() {
    let cfg =
        StartupConfig::from_query("?seed=42&count=20000&effect=asteroids&speed=2&panel=0")
            .unwrap();
    assert_eq!(cfg.seed, Some(42));
    assert_eq!(cfg.particle_count, 20_000.0);
    assert_eq!(cfg.behavior, BehaviorMode::Asteroids);
    assert_eq!(cfg.speed, 2.0);
    assert!(!cfg.show_panel);

    let params = cfg.parameters().unwrap();
    assert_eq!(params.particle_count.get(), 20_000);
    assert_eq!(params.behavior, BehaviorMode::Asteroids);
}

#[test]
fn config_ignores_unknown_keys_and_rejects_bad_values() {
    let cfg = StartupConfig::from_pairs(["bogus=1", "height=0.3"]).unwrap();
    assert_eq!(cfg.height, 0.3);

    for bad in ["seed=-1", "count=lots", "effect=rain", "speed=inf", "panel=maybe"] {
        let err = StartupConfig::from_query(bad).unwrap_err();
        assert!(matches!(err, ParticleError::Config { .. }), "{bad}");
    }
}

#[test]
fn digits_select_behavior() {
    assert_eq!(behavior_for_digit("1"), Some(BehaviorMode::Fire));
    assert_eq!(behavior_for_digit("2"), Some(BehaviorMode::Spores));
    assert_eq!(behavior_for_digit("3"), Some(BehaviorMode::Asteroids));
    assert_eq!(behavior_for_digit("4"), None);
}

#[test]
fn keys_map_to_changes() {
    let p = SimulationParameters::default();
    assert_eq!(
        action_for_key("3", &p),
        Some(KeyAction::Change(ControlChange::Behavior(
            BehaviorMode::Asteroids
        )))
    );
    assert_eq!(
        action_for_key("e", &p),
        Some(KeyAction::Change(ControlChange::Behavior(BehaviorMode::Spores)))
    );
    assert_eq!(
        action_for_key("r", &p),
        Some(KeyAction::Change(ControlChange::Reseed))
    );
    assert_eq!(action_for_key("h", &p), Some(KeyAction::TogglePanel));
    assert_eq!(action_for_key("x", &p), None);

    match action_for_key("]", &p) {
        Some(KeyAction::Change(ControlChange::Slider(Control::ParticleCount, v))) => {
            assert_eq!(v, p.particle_count.get() as f64 + 1_000.0)
        }
        other => panic!("unexpected {other:?}"),
    }
    match action_for_key("ArrowDown", &p) {
        Some(KeyAction::Change(ControlChange::Slider(Control::Speed, v))) => {
            assert!((v - (p.speed as f64 - 0.1)).abs() < 1e-6)
        }
        other => panic!("unexpected {other:?}"),
    }
}
