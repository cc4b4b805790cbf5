//! Startup configuration.
//!
//! Read once at launch from `key=value` pairs: the page query string on the
//! web (`?count=20000&effect=spores`) and command-line arguments natively
//! (`app-native count=20000 effect=spores`).

use crate::behavior::BehaviorMode;
use crate::constants::*;
use crate::control::{Control, ControlChange};
use crate::error::{ParticleError, Result};
use crate::params::SimulationParameters;

#[derive(Clone, Debug, PartialEq)]
pub struct StartupConfig {
    /// Fixed random seed; `None` draws from system entropy.
    pub seed: Option<u64>,
    pub particle_count: f64,
    pub behavior: BehaviorMode,
    pub speed: f64,
    pub radius: f64,
    pub height: f64,
    pub show_panel: bool,
}

impl Default for StartupConfig {
    fn default() -> Self {
        Self {
            seed: None,
            particle_count: DEFAULT_PARTICLE_COUNT as f64,
            behavior: BehaviorMode::default(),
            speed: DEFAULT_SPEED as f64,
            radius: DEFAULT_RADIUS as f64,
            height: DEFAULT_HEIGHT as f64,
            show_panel: true,
        }
    }
}

fn bad(key: &str, value: &str) -> ParticleError {
    ParticleError::Config {
        key: key.to_string(),
        value: value.to_string(),
    }
}

fn parse_f64(key: &str, value: &str) -> Result<f64> {
    value
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| bad(key, value))
}

impl StartupConfig {
    /// Parse `a=1&b=2` (a leading `?` is ignored).
    pub fn from_query(query: &str) -> Result<Self> {
        let query = query.strip_prefix('?').unwrap_or(query);
        Self::from_pairs(query.split('&'))
    }

    /// Parse an iterator of `key=value` items. Empty items are skipped and
    /// unknown keys are logged and ignored.
    pub fn from_pairs<'a>(pairs: impl IntoIterator<Item = &'a str>) -> Result<Self> {
        let mut cfg = Self::default();
        for pair in pairs {
            if pair.is_empty() {
                continue;
            }
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
            match key {
                "seed" => cfg.seed = Some(value.parse().map_err(|_| bad(key, value))?),
                "count" => cfg.particle_count = parse_f64(key, value)?,
                "effect" => cfg.behavior = value.parse().map_err(|_| bad(key, value))?,
                "speed" => cfg.speed = parse_f64(key, value)?,
                "radius" => cfg.radius = parse_f64(key, value)?,
                "height" => cfg.height = parse_f64(key, value)?,
                "panel" => {
                    cfg.show_panel = match value {
                        "" | "1" | "true" | "on" => true,
                        "0" | "false" | "off" => false,
                        _ => return Err(bad(key, value)),
                    }
                }
                _ => log::warn!("[config] ignoring unknown key {key:?}"),
            }
        }
        Ok(cfg)
    }

    /// Initial parameters, with every value passed through the same slider
    /// normalization the panel uses.
    pub fn parameters(&self) -> Result<SimulationParameters> {
        let mut params = SimulationParameters::default();
        for (control, value) in [
            (Control::Speed, self.speed),
            (Control::Radius, self.radius),
            (Control::Height, self.height),
            (Control::ParticleCount, self.particle_count),
        ] {
            params.apply(ControlChange::Slider(control, value))?;
        }
        params.behavior = self.behavior;
        Ok(params)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_query_is_default() {
        assert_eq!(StartupConfig::from_query("").unwrap(), StartupConfig::default());
        assert_eq!(StartupConfig::from_query("?").unwrap(), StartupConfig::default());
    }

    #[test]
    fn bare_panel_flag_enables_panel() {
        let cfg = StartupConfig::from_query("panel").unwrap();
        assert!(cfg.show_panel);
    }
}
