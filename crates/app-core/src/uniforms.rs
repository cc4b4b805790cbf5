//! Per-frame uniform assembly.
//!
//! The shader stage reads a fixed set of uniforms:
//! `u_time`, `u_resolution`, `u_speed`, `u_behavior`, `u_centerOfMass`,
//! `u_radius_mult` and `u_color`. [`UniformBlock`] is their byte layout.

use crate::behavior::BehaviorMode;
use crate::clock::FrameClock;
use crate::constants::DEFAULT_RESOLUTION;
use crate::params::SimulationParameters;
use glam::{Vec2, Vec3};

/// Uniform values for one frame. Rebuilt every frame, never kept.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct UniformSnapshot {
    pub time: f32,
    pub resolution: Vec2,
    pub speed: f32,
    pub behavior: BehaviorMode,
    pub center_of_mass: Vec3,
    pub radius_mult: f32,
    pub color: Vec3,
}

/// Assembles [`UniformSnapshot`]s. Only the resolution is stored here since it
/// changes on viewport resize rather than per frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BehaviorUniformSet {
    resolution: Vec2,
}

impl Default for BehaviorUniformSet {
    fn default() -> Self {
        Self {
            resolution: Vec2::from(DEFAULT_RESOLUTION),
        }
    }
}

impl BehaviorUniformSet {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            resolution: Vec2::new(width, height),
        }
    }

    pub fn resolution(&self) -> Vec2 {
        self.resolution
    }

    pub fn set_resolution(&mut self, width: f32, height: f32) {
        self.resolution = Vec2::new(width, height);
    }

    pub fn sample(
        &self,
        clock: &FrameClock,
        now: f64,
        params: &SimulationParameters,
    ) -> UniformSnapshot {
        UniformSnapshot {
            time: clock.tick(now) as f32,
            resolution: self.resolution,
            speed: params.speed,
            behavior: params.behavior,
            // read by the shader only in Asteroids mode
            center_of_mass: params.center_of_mass,
            radius_mult: params.radius_mult,
            color: params.color,
        }
    }
}

/// std140-compatible mirror of `ParticleUniforms` in `particles.wgsl`.
#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct UniformBlock {
    pub time: f32,
    pub speed: f32,
    pub resolution: [f32; 2],
    pub center_of_mass: [f32; 3],
    pub radius_mult: f32,
    pub color: [f32; 3],
    pub behavior: i32,
}

impl From<&UniformSnapshot> for UniformBlock {
    fn from(s: &UniformSnapshot) -> Self {
        Self {
            time: s.time,
            speed: s.speed,
            resolution: s.resolution.to_array(),
            center_of_mass: s.center_of_mass.to_array(),
            radius_mult: s.radius_mult,
            color: s.color.to_array(),
            behavior: s.behavior.wire_code(),
        }
    }
}
