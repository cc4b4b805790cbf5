use crate::clock::FrameClock;
use crate::config::StartupConfig;
use crate::control::{ControlChange, ControlEffect};
use crate::error::Result;
use crate::params::SimulationParameters;
use crate::system::{GeometryHandle, ParticleSystemState, SceneBackend};
use crate::uniforms::{BehaviorUniformSet, UniformSnapshot};
use crate::BehaviorMode;
use glam::Vec3;
use std::cell::{Cell, Ref, RefCell};

/// Single owner of all per-session simulation state.
///
/// Control callbacks and the frame loop share it through `Rc` on one thread;
/// a change applied between two ticks is fully visible to the next tick.
/// Borrows never outlive a method call.
pub struct SimulationContext<S: SceneBackend> {
    params: RefCell<SimulationParameters>,
    clock: Cell<FrameClock>,
    uniforms: Cell<BehaviorUniformSet>,
    system: RefCell<ParticleSystemState<S>>,
}

impl<S: SceneBackend> SimulationContext<S> {
    /// Build the context and install the first generation.
    pub fn new(config: &StartupConfig, scene: S, start_epoch: f64) -> Result<Self> {
        let params = config.parameters()?;
        let mut system = ParticleSystemState::new(scene, config.seed);
        system.regenerate(
            params.particle_count.get(),
            params.shape.radius_mult(),
            params.shape.height_mult(),
        )?;
        log::info!(
            "[sim] {} particles, effect {}, seed {:?}",
            params.particle_count.get(),
            params.behavior,
            config.seed
        );
        Ok(Self {
            clock: Cell::new(FrameClock::new(start_epoch, params.speed)),
            uniforms: Cell::new(BehaviorUniformSet::default()),
            params: RefCell::new(params),
            system: RefCell::new(system),
        })
    }

    pub fn params(&self) -> Ref<'_, SimulationParameters> {
        self.params.borrow()
    }

    /// Apply a control change. Regenerating changes rebuild the buffer before
    /// returning; if that fails the parameters are left unchanged.
    /// [`ControlChange::Reseed`] reseeds from entropy first.
    pub fn apply(&self, change: ControlChange) -> Result<ControlEffect> {
        let mut candidate = self.params.borrow().clone();
        let effect = candidate.apply(change)?;
        if effect == ControlEffect::RegenerateRequired {
            let mut system = self.system.borrow_mut();
            if change == ControlChange::Reseed {
                system.reseed(None);
            }
            system.regenerate(
                candidate.particle_count.get(),
                candidate.shape.radius_mult(),
                candidate.shape.height_mult(),
            )?;
        }
        *self.params.borrow_mut() = candidate;
        Ok(effect)
    }

    /// Like [`apply`](Self::apply) but logs rejected changes instead of
    /// returning them, for UI callbacks with nowhere to report errors.
    pub fn apply_logged(&self, change: ControlChange) -> Option<ControlEffect> {
        match self.apply(change) {
            Ok(effect) => Some(effect),
            Err(e) => {
                log::warn!("[sim] rejected {:?}: {}", change, e);
                None
            }
        }
    }

    pub fn set_behavior(&self, mode: BehaviorMode) {
        self.params.borrow_mut().behavior = mode;
    }

    /// Set the attractor center directly, bypassing slider range limits.
    pub fn set_center_of_mass(&self, center: Vec3) {
        self.params.borrow_mut().center_of_mass = center;
    }

    /// Reseed the random source and rebuild with unchanged parameters.
    pub fn reseed(&self, seed: Option<u64>) -> Result<GeometryHandle> {
        let params = self.params.borrow().clone();
        let mut system = self.system.borrow_mut();
        system.reseed(seed);
        system.regenerate(
            params.particle_count.get(),
            params.shape.radius_mult(),
            params.shape.height_mult(),
        )
    }

    /// Viewport resize: the only writer of `u_resolution`.
    pub fn resize(&self, width: u32, height: u32) {
        let mut set = self.uniforms.get();
        set.set_resolution(width as f32, height as f32);
        self.uniforms.set(set);
    }

    pub fn current_geometry_handle(&self) -> Option<GeometryHandle> {
        self.system.borrow().current_geometry_handle()
    }

    pub fn generation(&self) -> u64 {
        self.system.borrow().generation()
    }

    /// Read-only access to the particle system, e.g. for inspecting the buffer.
    pub fn with_system<R>(&self, f: impl FnOnce(&ParticleSystemState<S>) -> R) -> R {
        f(&self.system.borrow())
    }

    /// Sample the uniforms for the current parameters without rendering.
    pub fn sample(&self, now: f64) -> UniformSnapshot {
        let params = self.params.borrow();
        let mut clock = self.clock.get();
        clock.set_speed(params.speed);
        self.clock.set(clock);
        self.uniforms.get().sample(&clock, now, &params)
    }

    /// One frame: sample uniforms, then hand them with the scene to `render`.
    pub fn tick<R>(&self, now: f64, render: impl FnOnce(&mut S, &UniformSnapshot) -> R) -> R {
        let snapshot = self.sample(now);
        let mut system = self.system.borrow_mut();
        render(system.scene_mut(), &snapshot)
    }
}
