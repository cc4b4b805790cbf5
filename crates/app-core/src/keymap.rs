use crate::behavior::BehaviorMode;
use crate::constants::{PARTICLE_COUNT_KEY_STEP, SPEED_KEY_STEP};
use crate::control::{Control, ControlChange};
use crate::params::SimulationParameters;

/// What a key press asks for.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum KeyAction {
    Change(ControlChange),
    TogglePanel,
}

#[inline]
pub fn behavior_for_digit(key: &str) -> Option<BehaviorMode> {
    match key {
        "1" => Some(BehaviorMode::Fire),
        "2" => Some(BehaviorMode::Spores),
        "3" => Some(BehaviorMode::Asteroids),
        _ => None,
    }
}

/// Map a key name (DOM `KeyboardEvent.key` spelling) to an action.
///
/// Relative nudges are resolved against the current parameters; the result
/// still goes through slider normalization when applied.
pub fn action_for_key(key: &str, params: &SimulationParameters) -> Option<KeyAction> {
    if let Some(mode) = behavior_for_digit(key) {
        return Some(KeyAction::Change(ControlChange::Behavior(mode)));
    }
    let nudge = |control: Control, delta: f64| {
        Some(KeyAction::Change(ControlChange::Slider(
            control,
            params.value(control) + delta,
        )))
    };
    match key {
        "e" | "E" => Some(KeyAction::Change(ControlChange::Behavior(
            params.behavior.next(),
        ))),
        "r" | "R" => Some(KeyAction::Change(ControlChange::Reseed)),
        "h" | "H" => Some(KeyAction::TogglePanel),
        "+" | "=" | "ArrowUp" => nudge(Control::Speed, SPEED_KEY_STEP),
        "-" | "_" | "ArrowDown" => nudge(Control::Speed, -SPEED_KEY_STEP),
        "]" => nudge(Control::ParticleCount, PARTICLE_COUNT_KEY_STEP),
        "[" => nudge(Control::ParticleCount, -PARTICLE_COUNT_KEY_STEP),
        _ => None,
    }
}
