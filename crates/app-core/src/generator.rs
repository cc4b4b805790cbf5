//! Procedural initial state for the particle field.
//!
//! Particles are not materialized as structs: a generation is two parallel
//! arrays laid out exactly as the GPU consumes them (`position: vec3` and
//! `lifetime: f32` per instance).

use crate::error::{ParticleError, Result};
use rand::prelude::*;
use std::f32::consts::TAU;

/// One generation of per-particle attributes.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ParticleBuffer {
    /// Interleaved `x, y, z` triples, `3 * len()` floats.
    pub positions: Vec<f32>,
    /// One value in `[0, 1]` per particle.
    pub lifetimes: Vec<f32>,
}

impl ParticleBuffer {
    pub fn len(&self) -> usize {
        self.lifetimes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lifetimes.is_empty()
    }

    pub fn position(&self, index: usize) -> Option<[f32; 3]> {
        let p = self.positions.get(index * 3..index * 3 + 3)?;
        Some([p[0], p[1], p[2]])
    }
}

pub(crate) fn check_multiplier(name: &str, value: f32) -> Result<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ParticleError::InvalidArgument(format!(
            "{name} must be a positive finite number, got {value}"
        )))
    }
}

/// Build `count` particles spread around the Y axis.
///
/// Radius and height are each the difference of two `U(0,1)` draws, which
/// concentrates particles near the axis and the mid plane while allowing
/// negative offsets. All arguments are validated before anything is allocated.
pub fn generate<R: Rng>(
    count: usize,
    radius_mult: f32,
    height_mult: f32,
    rng: &mut R,
) -> Result<ParticleBuffer> {
    if count == 0 {
        return Err(ParticleError::InvalidArgument(
            "particle count must be positive".into(),
        ));
    }
    check_multiplier("radius multiplier", radius_mult)?;
    check_multiplier("height multiplier", height_mult)?;

    let mut positions = Vec::new();
    let mut lifetimes = Vec::new();
    let float_count = count
        .checked_mul(3)
        .ok_or(ParticleError::Allocation { count })?;
    positions
        .try_reserve_exact(float_count)
        .map_err(|_| ParticleError::Allocation { count })?;
    lifetimes
        .try_reserve_exact(count)
        .map_err(|_| ParticleError::Allocation { count })?;

    for _ in 0..count {
        let angle = rng.gen_range(0.0..TAU);
        let radius = (rng.gen::<f32>() - rng.gen::<f32>()) * radius_mult;
        let height = (rng.gen::<f32>() - rng.gen::<f32>()) * height_mult;
        positions.extend_from_slice(&[angle.cos() * radius, height, angle.sin() * radius]);
        lifetimes.push(rng.gen::<f32>());
    }

    Ok(ParticleBuffer {
        positions,
        lifetimes,
    })
}

/// Deterministic variant of [`generate`] for tests and reproducible sessions.
pub fn generate_seeded(
    count: usize,
    radius_mult: f32,
    height_mult: f32,
    seed: u64,
) -> Result<ParticleBuffer> {
    let mut rng = StdRng::seed_from_u64(seed);
    generate(count, radius_mult, height_mult, &mut rng)
}
