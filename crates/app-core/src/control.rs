//! Debug-panel bindings: which knobs exist, their ranges, and what each one
//! invalidates.

use crate::behavior::BehaviorMode;
use crate::constants::*;
use crate::error::{ParticleError, Result};
use crate::params::{ParticleCount, ShapeParameters, SimulationParameters};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Control {
    Speed,
    CenterX,
    CenterY,
    CenterZ,
    RadiusMult,
    Red,
    Green,
    Blue,
    Height,
    Radius,
    ParticleCount,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SliderSpec {
    pub control: Control,
    pub label: &'static str,
    pub min: f64,
    pub max: f64,
    pub step: f64,
}

const fn slider(control: Control, label: &'static str, range: (f64, f64, f64)) -> SliderSpec {
    SliderSpec {
        control,
        label,
        min: range.0,
        max: range.1,
        step: range.2,
    }
}

/// Panel order. The effect-type dropdown sits between `RadiusMult` and `Red`.
pub const SLIDERS: [SliderSpec; 11] = [
    slider(Control::Speed, "Speed", SPEED_RANGE),
    slider(Control::CenterX, "Center X", CENTER_RANGE),
    slider(Control::CenterY, "Center Y", CENTER_RANGE),
    slider(Control::CenterZ, "Center Z", CENTER_RANGE),
    slider(Control::RadiusMult, "Radius Mult", RADIUS_MULT_RANGE),
    slider(Control::Red, "Red", COLOR_RANGE),
    slider(Control::Green, "Green", COLOR_RANGE),
    slider(Control::Blue, "Blue", COLOR_RANGE),
    slider(Control::Height, "Height", SHAPE_RANGE),
    slider(Control::Radius, "Radius", SHAPE_RANGE),
    slider(Control::ParticleCount, "Particle Count", PARTICLE_COUNT_RANGE),
];

impl Control {
    pub fn spec(self) -> &'static SliderSpec {
        SLIDERS
            .iter()
            .find(|s| s.control == self)
            .unwrap_or(&SLIDERS[0])
    }

    /// Whether a change to this control discards the particle buffer.
    pub fn regenerates(self) -> bool {
        matches!(self, Control::Height | Control::Radius | Control::ParticleCount)
    }

    /// Stable DOM id for the slider element.
    pub fn element_id(self) -> &'static str {
        match self {
            Control::Speed => "ctl-speed",
            Control::CenterX => "ctl-center-x",
            Control::CenterY => "ctl-center-y",
            Control::CenterZ => "ctl-center-z",
            Control::RadiusMult => "ctl-radius-mult",
            Control::Red => "ctl-red",
            Control::Green => "ctl-green",
            Control::Blue => "ctl-blue",
            Control::Height => "ctl-height",
            Control::Radius => "ctl-radius",
            Control::ParticleCount => "ctl-particle-count",
        }
    }
}

impl SliderSpec {
    /// Snap to the slider step and clamp into range, like a native range input.
    pub fn normalize(&self, value: f64) -> Result<f64> {
        if !value.is_finite() {
            return Err(ParticleError::InvalidArgument(format!(
                "{} must be finite, got {value}",
                self.label
            )));
        }
        let steps = ((value - self.min) / self.step).round();
        Ok((self.min + steps * self.step).clamp(self.min, self.max))
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ControlChange {
    Slider(Control, f64),
    Behavior(BehaviorMode),
    /// Reseed from entropy and rebuild with unchanged parameters.
    Reseed,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ControlEffect {
    UniformsOnly,
    RegenerateRequired,
}

impl SimulationParameters {
    /// Current value behind a slider, in slider units.
    pub fn value(&self, control: Control) -> f64 {
        let v = match control {
            Control::Speed => self.speed,
            Control::CenterX => self.center_of_mass.x,
            Control::CenterY => self.center_of_mass.y,
            Control::CenterZ => self.center_of_mass.z,
            Control::RadiusMult => self.radius_mult,
            Control::Red => self.color.x,
            Control::Green => self.color.y,
            Control::Blue => self.color.z,
            Control::Height => self.shape.height_mult(),
            Control::Radius => self.shape.radius_mult(),
            Control::ParticleCount => return self.particle_count.get() as f64,
        };
        v as f64
    }

    /// Apply one panel change. On error `self` is left as it was.
    pub fn apply(&mut self, change: ControlChange) -> Result<ControlEffect> {
        let (control, raw) = match change {
            ControlChange::Behavior(mode) => {
                self.behavior = mode;
                return Ok(ControlEffect::UniformsOnly);
            }
            ControlChange::Reseed => return Ok(ControlEffect::RegenerateRequired),
            ControlChange::Slider(control, raw) => (control, raw),
        };
        let value = control.spec().normalize(raw)?;
        let v = value as f32;
        match control {
            Control::Speed => self.speed = v,
            Control::CenterX => self.center_of_mass.x = v,
            Control::CenterY => self.center_of_mass.y = v,
            Control::CenterZ => self.center_of_mass.z = v,
            Control::RadiusMult => self.radius_mult = v,
            Control::Red => self.color.x = v,
            Control::Green => self.color.y = v,
            Control::Blue => self.color.z = v,
            Control::Height => {
                self.shape = ShapeParameters::new(self.shape.radius_mult(), v)?;
            }
            Control::Radius => {
                self.shape = ShapeParameters::new(v, self.shape.height_mult())?;
            }
            Control::ParticleCount => self.particle_count = ParticleCount::try_from(value)?,
        }
        Ok(if control.regenerates() {
            ControlEffect::RegenerateRequired
        } else {
            ControlEffect::UniformsOnly
        })
    }
}
