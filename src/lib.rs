//! Marble Maze - A tilt-controlled marble arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (marble integrator, board geometry, levels, session)
//! - `renderer`: Draw-side glue (palette, painter trait, triangle batching)
//! - `settings`: Persisted game settings
//! - `tuning`: Data-driven physics tuning

pub mod renderer;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use settings::{Settings, SettingsError};
pub use tuning::Tuning;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Velocity gained per unit of gravity per second
    pub const ACCEL_SCALE: f32 = 10.0;
    /// Pixels travelled per unit of velocity per second
    pub const SPEED_SCALE: f32 = 100.0;
    /// Fraction of speed kept (and reversed) on impact
    pub const RESTITUTION: f32 = 0.3;
    /// Slack subtracted from the marble radius in wall band tests
    pub const SEGMENT_TOLERANCE: f32 = 0.1;

    /// Marble defaults
    pub const MARBLE_RADIUS: f32 = 40.0;

    /// Board layout defaults
    pub const WALL_WIDTH: f32 = 20.0;
    /// Number of wall-spacing cells across the playable width
    pub const LAYOUT_COLUMNS: f32 = 5.0;
    /// Number of levels shipped with the game
    pub const LEVEL_COUNT: u32 = 6;
    /// Edge length of the square block in the obstacle level
    pub const BLOCK_SIZE: f32 = 200.0;

    /// Earth gravity, used as the resting tilt when no sensor data has arrived
    pub const DEFAULT_GRAVITY_Y: f32 = 9.8;
}

/// Map raw accelerometer axes to board gravity.
///
/// Screen x grows to the right while the sensor's x grows to the left, so the
/// x axis is flipped.
#[inline]
pub fn gravity_from_accelerometer(ax: f32, ay: f32) -> Vec2 {
    Vec2::new(-ax, ay)
}

/// True if every component of the vector is finite
#[inline]
pub fn is_finite_vec(v: Vec2) -> bool {
    v.x.is_finite() && v.y.is_finite()
}
