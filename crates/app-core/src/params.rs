use crate::behavior::BehaviorMode;
use crate::constants::*;
use crate::error::{ParticleError, Result};
use crate::generator::check_multiplier;
use glam::Vec3;

/// Number of particles in a generation. Always positive.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ParticleCount(usize);

impl ParticleCount {
    pub fn new(count: usize) -> Result<Self> {
        if count == 0 {
            return Err(ParticleError::InvalidArgument(
                "particle count must be positive".into(),
            ));
        }
        Ok(Self(count))
    }

    pub fn get(self) -> usize {
        self.0
    }
}

impl TryFrom<i64> for ParticleCount {
    type Error = ParticleError;

    fn try_from(count: i64) -> Result<Self> {
        if count <= 0 {
            return Err(ParticleError::InvalidArgument(format!(
                "particle count must be positive, got {count}"
            )));
        }
        let count = usize::try_from(count).map_err(|_| {
            ParticleError::InvalidArgument(format!("particle count {count} does not fit in memory"))
        })?;
        Self::new(count)
    }
}

impl TryFrom<f64> for ParticleCount {
    type Error = ParticleError;

    /// Slider values arrive as floats; they are rounded to the nearest integer.
    fn try_from(value: f64) -> Result<Self> {
        if !value.is_finite() {
            return Err(ParticleError::InvalidArgument(format!(
                "particle count must be finite, got {value}"
            )));
        }
        Self::try_from(value.round() as i64)
    }
}

/// Generation-time shape of the field. Changing either value requires a new buffer.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ShapeParameters {
    radius_mult: f32,
    height_mult: f32,
}

impl ShapeParameters {
    pub fn new(radius_mult: f32, height_mult: f32) -> Result<Self> {
        check_multiplier("radius multiplier", radius_mult)?;
        check_multiplier("height multiplier", height_mult)?;
        Ok(Self {
            radius_mult,
            height_mult,
        })
    }

    pub fn radius_mult(&self) -> f32 {
        self.radius_mult
    }

    pub fn height_mult(&self) -> f32 {
        self.height_mult
    }
}

impl Default for ShapeParameters {
    fn default() -> Self {
        Self {
            radius_mult: DEFAULT_RADIUS,
            height_mult: DEFAULT_HEIGHT,
        }
    }
}

/// Everything the debug panel can change.
///
/// Shared between the control bindings (writers) and the per-frame uniform
/// sampler (reader). `particle_count` and `shape` feed regeneration; the rest
/// only reach the shader as uniforms.
#[derive(Clone, Debug, PartialEq)]
pub struct SimulationParameters {
    pub speed: f32,
    pub center_of_mass: Vec3,
    pub radius_mult: f32,
    pub behavior: BehaviorMode,
    pub color: Vec3,
    pub particle_count: ParticleCount,
    pub shape: ShapeParameters,
}

impl Default for SimulationParameters {
    fn default() -> Self {
        Self {
            speed: DEFAULT_SPEED,
            center_of_mass: Vec3::from(DEFAULT_CENTER_OF_MASS),
            radius_mult: DEFAULT_RADIUS_MULT,
            behavior: BehaviorMode::default(),
            color: Vec3::from(DEFAULT_COLOR),
            particle_count: ParticleCount(DEFAULT_PARTICLE_COUNT),
            shape: ShapeParameters::default(),
        }
    }
}
