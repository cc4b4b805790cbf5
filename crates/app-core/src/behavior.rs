use crate::error::ParticleError;
use std::fmt;
use std::str::FromStr;

/// Selects which shader-side code path interprets the particle attributes.
///
/// Switching modes never touches the particle buffer; it only changes the
/// `u_behavior` uniform.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum BehaviorMode {
    #[default]
    Fire,
    Spores,
    Asteroids,
}

/// Integer codes read by `particles.wgsl` through `u_behavior`.
///
/// Renumbering an entry requires the matching change in the shader.
pub const BEHAVIOR_WIRE_CODES: [(BehaviorMode, i32); 3] = [
    (BehaviorMode::Fire, 0),
    (BehaviorMode::Spores, 1),
    (BehaviorMode::Asteroids, 2),
];

impl BehaviorMode {
    pub const ALL: [BehaviorMode; 3] = [
        BehaviorMode::Fire,
        BehaviorMode::Spores,
        BehaviorMode::Asteroids,
    ];

    pub fn wire_code(self) -> i32 {
        BEHAVIOR_WIRE_CODES
            .iter()
            .find(|(mode, _)| *mode == self)
            .map(|(_, code)| *code)
            .unwrap_or_default()
    }

    pub fn from_wire_code(code: i32) -> Option<Self> {
        BEHAVIOR_WIRE_CODES
            .iter()
            .find(|(_, c)| *c == code)
            .map(|(mode, _)| *mode)
    }

    pub fn label(self) -> &'static str {
        match self {
            BehaviorMode::Fire => "Fire",
            BehaviorMode::Spores => "Spores",
            BehaviorMode::Asteroids => "Asteroids",
        }
    }

    /// Next mode in panel order, wrapping around.
    pub fn next(self) -> Self {
        match self {
            BehaviorMode::Fire => BehaviorMode::Spores,
            BehaviorMode::Spores => BehaviorMode::Asteroids,
            BehaviorMode::Asteroids => BehaviorMode::Fire,
        }
    }
}

impl fmt::Display for BehaviorMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for BehaviorMode {
    type Err = ParticleError;

    /// Accepts labels in any case or the wire code as a decimal string.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if let Ok(code) = trimmed.parse::<i32>() {
            return Self::from_wire_code(code).ok_or_else(|| {
                ParticleError::InvalidArgument(format!("unknown behavior code {code}"))
            });
        }
        Self::ALL
            .into_iter()
            .find(|mode| mode.label().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| ParticleError::InvalidArgument(format!("unknown behavior {trimmed:?}")))
    }
}
