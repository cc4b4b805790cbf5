// Host-side tests for the simulation context: control routing, uniform
// sampling and regeneration triggers.

use app_core::{
    BehaviorMode, Control, ControlChange, ControlEffect, FallbackScene, HeadlessScene,
    ParticleError, ParticleSystemState, SimulationContext, StartupConfig,
};
use glam::{Vec2, Vec3};

fn context(count: f64) -> SimulationContext<HeadlessScene> {
    let config = StartupConfig {
        seed: Some(5),
        particle_count: count,
        ..StartupConfig::default()
    };
    SimulationContext::new(&config, HeadlessScene::new(), 0.0).unwrap()
}

#[test]
fn construction_installs_first_generation() {
    let ctx = context(1_000.0);
    assert!(ctx.current_geometry_handle().is_some());
    assert_eq!(ctx.generation(), 1);
    ctx.with_system(|s| assert_eq!(s.current_buffer().unwrap().len(), 1_000));
}

#[test]
fn scenario_asteroids_center_of_mass() {
    let ctx = context(100.0);
    ctx.set_behavior(BehaviorMode::Asteroids);
    ctx.set_center_of_mass(Vec3::new(1.0, 2.0, 3.0));
    let snap = ctx.sample(1.0);
    assert_eq!(snap.center_of_mass, Vec3::new(1.0, 2.0, 3.0));
    assert_eq!(snap.behavior, BehaviorMode::Asteroids);
    assert_eq!(snap.behavior.wire_code(), 2);
}

#[test]
fn behavior_switch_does_not_regenerate() {
    let ctx = context(500.0);
    let handle = ctx.current_geometry_handle();
    let before = ctx.with_system(|s| s.current_buffer().cloned());
    for mode in [
        BehaviorMode::Spores,
        BehaviorMode::Asteroids,
        BehaviorMode::Fire,
        BehaviorMode::Asteroids,
    ] {
        let effect = ctx.apply(ControlChange::Behavior(mode)).unwrap();
        assert_eq!(effect, ControlEffect::UniformsOnly);
        assert_eq!(ctx.sample(2.0).behavior, mode);
    }
    assert_eq!(ctx.current_geometry_handle(), handle);
    assert_eq!(ctx.with_system(|s| s.current_buffer().cloned()), before);
    assert_eq!(ctx.generation(), 1);
}

#[test]
fn uniform_controls_do_not_regenerate() {
    let ctx = context(500.0);
    let handle = ctx.current_geometry_handle();
    for (control, value) in [
        (Control::Speed, 2.5),
        (Control::CenterX, -1.0),
        (Control::CenterY, 0.5),
        (Control::CenterZ, 1.5),
        (Control::RadiusMult, 12.0),
        (Control::Red, 0.2),
        (Control::Green, 0.3),
        (Control::Blue, 0.9),
    ] {
        let effect = ctx.apply(ControlChange::Slider(control, value)).unwrap();
        assert_eq!(effect, ControlEffect::UniformsOnly, "{control:?}");
    }
    assert_eq!(ctx.current_geometry_handle(), handle);

    let snap = ctx.sample(4.0);
    assert!((snap.speed - 2.5).abs() < 1e-6);
    assert!((snap.radius_mult - 12.0).abs() < 1e-5);
    assert!((snap.center_of_mass - Vec3::new(-1.0, 0.5, 1.5)).length() < 1e-5);
    assert!((snap.color - Vec3::new(0.2, 0.3, 0.9)).length() < 1e-5);
    // time = 4 * 2.5 * 0.5
    assert!((snap.time - 5.0).abs() < 1e-4);
}

#[test]
fn shape_and_count_controls_regenerate() {
    let ctx = context(500.0);
    for (control, value, expected_len) in [
        (Control::ParticleCount, 1_200.0, 1_200),
        (Control::Height, 0.8, 1_200),
        (Control::Radius, 0.2, 1_200),
        (Control::ParticleCount, 100.0, 100),
    ] {
        let before = ctx.current_geometry_handle();
        let effect = ctx.apply(ControlChange::Slider(control, value)).unwrap();
        assert_eq!(effect, ControlEffect::RegenerateRequired);
        assert_ne!(ctx.current_geometry_handle(), before);
        ctx.with_system(|s| {
            assert_eq!(s.current_buffer().unwrap().len(), expected_len);
            assert_eq!(s.scene().live_count(), 1);
        });
    }
    ctx.with_system(|s| {
        let shape = s.current_shape().unwrap();
        assert!((shape.radius_mult() - 0.2).abs() < 1e-6);
        assert!((shape.height_mult() - 0.8).abs() < 1e-6);
    });
}

#[test]
fn rejected_change_leaves_params_untouched() {
    let ctx = context(500.0);
    let before = ctx.params().clone();
    let err = ctx
        .apply(ControlChange::Slider(Control::ParticleCount, f64::NAN))
        .unwrap_err();
    assert!(matches!(err, ParticleError::InvalidArgument(_)));
    assert_eq!(*ctx.params(), before);
    assert_eq!(ctx.generation(), 1);
    assert!(ctx
        .apply_logged(ControlChange::Slider(Control::Speed, f64::INFINITY))
        .is_none());
}

#[test]
fn reseed_regenerates_with_same_parameters() {
    let ctx = context(300.0);
    let before = ctx.with_system(|s| s.current_buffer().cloned());
    let effect = ctx.apply(ControlChange::Reseed).unwrap();
    assert_eq!(effect, ControlEffect::RegenerateRequired);
    let after = ctx.with_system(|s| s.current_buffer().cloned());
    assert_eq!(after.as_ref().map(|b| b.len()), Some(300));
    assert_ne!(before, after);

    let h = ctx.reseed(Some(1)).unwrap();
    assert_eq!(ctx.current_geometry_handle(), Some(h));
}

#[test]
fn reseed_control_draws_from_a_new_stream() {
    let ctx = context(300.0);
    let (radius, height) = {
        let p = ctx.params();
        (p.shape.radius_mult(), p.shape.height_mult())
    };
    // Same seed, second draw from the continuing stream.
    let mut twin = ParticleSystemState::new(HeadlessScene::new(), Some(5));
    twin.regenerate(300, radius, height).unwrap();
    twin.regenerate(300, radius, height).unwrap();
    let continued = twin.current_buffer().cloned();

    ctx.apply(ControlChange::Reseed).unwrap();
    let reseeded = ctx.with_system(|s| s.current_buffer().cloned());
    assert_eq!(ctx.generation(), 2);
    assert_ne!(reseeded, continued);
}

#[test]
fn headless_fallback_keeps_simulation_running() {
    let config = StartupConfig {
        seed: Some(3),
        particle_count: 200.0,
        ..StartupConfig::default()
    };
    let scene: FallbackScene<HeadlessScene> = FallbackScene::headless();
    assert!(scene.is_headless());
    let ctx = SimulationContext::new(&config, scene, 0.0).unwrap();

    ctx.apply(ControlChange::Slider(Control::ParticleCount, 400.0))
        .unwrap();
    assert_eq!(ctx.generation(), 2);
    let (time, live) = ctx.tick(2.0, |scene, snap| {
        assert!(scene.gpu_mut().is_none());
        let FallbackScene::Headless(h) = scene else {
            unreachable!("headless scene switched variant");
        };
        (snap.time, h.live_count())
    });
    assert!((time - 1.0).abs() < 1e-6);
    assert_eq!(live, 1);
}

#[test]
fn resize_updates_resolution_only() {
    let ctx = context(100.0);
    let handle = ctx.current_geometry_handle();
    ctx.resize(1920, 1080);
    assert_eq!(ctx.sample(0.0).resolution, Vec2::new(1920.0, 1080.0));
    assert_eq!(ctx.current_geometry_handle(), handle);
}

#[test]
fn tick_renders_once_with_current_snapshot() {
    let ctx = context(100.0);
    ctx.apply(ControlChange::Behavior(BehaviorMode::Spores))
        .unwrap();
    let mut calls = 0;
    let visible = ctx.tick(3.0, |scene, snap| {
        calls += 1;
        assert_eq!(snap.behavior, BehaviorMode::Spores);
        assert!((snap.time - 1.5).abs() < 1e-6);
        scene.visible().to_vec()
    });
    assert_eq!(calls, 1);
    assert_eq!(visible.len(), 1);
    assert_eq!(Some(visible[0]), ctx.current_geometry_handle());
}

#[test]
fn bad_startup_config_is_rejected() {
    let config = StartupConfig {
        particle_count: f64::NAN,
        ..StartupConfig::default()
    };
    assert!(SimulationContext::new(&config, HeadlessScene::new(), 0.0).is_err());
}
