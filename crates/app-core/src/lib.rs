pub mod behavior;
pub mod camera;
pub mod clock;
pub mod config;
pub mod constants;
pub mod context;
pub mod control;
pub mod error;
pub mod generator;
pub mod keymap;
pub mod params;
pub mod system;
pub mod uniforms;

#[cfg(feature = "gpu")]
pub mod render;

pub use behavior::*;
pub use camera::Camera;
pub use clock::FrameClock;
pub use config::StartupConfig;
pub use constants::*;
pub use context::SimulationContext;
pub use control::*;
pub use error::{ParticleError, Result};
pub use generator::*;
pub use keymap::*;
pub use params::*;
pub use system::*;
pub use uniforms::*;

// Shaders bundled as string constants
pub static PARTICLES_WGSL: &str = include_str!("../shaders/particles.wgsl");
