// Shared simulation/visual tuning constants used by both web and native frontends.

// Simulation time = elapsed * speed * TIME_SCALE
pub const TIME_SCALE: f64 = 0.5;

// Slider ranges exposed by the debug panel (min, max, step)
pub const SPEED_RANGE: (f64, f64, f64) = (0.1, 5.0, 0.01);
pub const CENTER_RANGE: (f64, f64, f64) = (-2.0, 2.0, 0.01);
pub const RADIUS_MULT_RANGE: (f64, f64, f64) = (1.0, 20.0, 0.1);
pub const COLOR_RANGE: (f64, f64, f64) = (0.1, 1.0, 0.01);
pub const SHAPE_RANGE: (f64, f64, f64) = (0.1, 1.0, 0.01);
pub const PARTICLE_COUNT_RANGE: (f64, f64, f64) = (100.0, 50_000.0, 100.0);

// Startup defaults
pub const DEFAULT_SPEED: f32 = 1.0;
pub const DEFAULT_PARTICLE_COUNT: usize = 5_000;
pub const DEFAULT_RADIUS: f32 = 0.5; // generation-time radius multiplier
pub const DEFAULT_HEIGHT: f32 = 0.5; // generation-time height multiplier
pub const DEFAULT_RADIUS_MULT: f32 = 5.0; // u_radius_mult
pub const DEFAULT_CENTER_OF_MASS: [f32; 3] = [0.0, 0.0, 0.0];
pub const DEFAULT_COLOR: [f32; 3] = [1.0, 0.5, 0.2]; // ember orange
pub const DEFAULT_RESOLUTION: [f32; 2] = [1280.0, 720.0];

// Camera
pub const CAMERA_FOV_DEGREES: f32 = 75.0;
pub const CAMERA_NEAR: f32 = 0.1;
pub const CAMERA_FAR: f32 = 1000.0;
pub const CAMERA_Z: f32 = 1.5;

// Keyboard nudges
pub const SPEED_KEY_STEP: f64 = 0.1;
pub const PARTICLE_COUNT_KEY_STEP: f64 = 1_000.0;

// Rendering
pub const SPRITE_SIZE_PX: f32 = 3.0;
pub const CLEAR_COLOR: [f64; 3] = [0.01, 0.01, 0.02];
