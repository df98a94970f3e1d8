//! Block Shooter - falling blocks, two buckets, one turret and four mirrors
//!
//! Core modules:
//! - `sim`: Deterministic simulation (spawning, kinematics, collisions, scoring)
//! - `input`: Key/mouse bindings mapped onto simulation mutators
//! - `autopilot`: Demo player that drives the same input actions
//! - `view`: Camera zoom/pan bookkeeping for the renderer
//! - `settings`: Run configuration loaded from JSON
//! - `tuning`: Data-driven game balance

pub mod autopilot;
pub mod error;
pub mod input;
pub mod settings;
pub mod sim;
pub mod tuning;
pub mod view;

pub use error::SettingsError;
pub use settings::Settings;
pub use tuning::Tuning;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Half extent of the visible world at zoom 1
    pub const WORLD_HALF_EXTENT: f32 = 4.0;

    /// Spawner defaults
    pub const SPAWN_INTERVAL_TICKS: u64 = 50;
    pub const SPAWN_ALTITUDE: f32 = 4.5;
    pub const SPAWN_X_MIN: f32 = -2.8;
    pub const SPAWN_X_MAX: f32 = 4.0;

    /// Targets fall this far per tick until the player changes it
    pub const INITIAL_FALL_SPEED: f32 = 0.03;
    /// Half extent of a target square
    pub const TARGET_HALF_SIZE: f32 = 0.1;

    /// Projectile travel per tick along its heading
    pub const PROJECTILE_STEP: f32 = 0.1;
    /// Projectiles leave the barrel at this x; y is the turret elevation
    pub const MUZZLE_X: f32 = -3.45;
    pub const PROJECTILE_HALF_WIDTH: f32 = 0.05;
    /// Max |dx| and |dy| between a projectile and a target centre for a hit
    pub const SHOT_REACH: f32 = 0.2;

    /// Bucket geometry (body is 0.8 wide, wings add 0.2 on each side)
    pub const BUCKET_Y: f32 = -3.6;
    pub const BUCKET_HALF_SPAN: f32 = 0.6;
    /// A target is at catch altitude once its bottom edge reaches the rim
    pub const BUCKET_RIM_Y: f32 = -3.2;
    pub const CATCH_ALTITUDE: f32 = BUCKET_RIM_Y + TARGET_HALF_SIZE;
    pub const LEFT_BUCKET_BASE_X: f32 = -2.0;
    pub const RIGHT_BUCKET_BASE_X: f32 = 2.0;

    /// Turret column on the left edge of the world
    pub const TURRET_COLUMN_MIN_X: f32 = -4.0;
    pub const TURRET_COLUMN_MAX_X: f32 = -3.7;

    /// Score deltas
    pub const SCORE_SHOT_BLACK: f32 = 2.0;
    pub const SCORE_SHOT_RED: f32 = -1.0;
    pub const SCORE_SHOT_GREEN: f32 = -1.0;
    pub const SCORE_CATCH_REWARD: f32 = 4.0;
    pub const SCORE_CATCH_PENALTY: f32 = -1.0;
}

/// Normalize an angle in degrees to [0, 360)
#[inline]
pub fn normalize_degrees(angle: f32) -> f32 {
    let wrapped = angle.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360.0 for tiny negative inputs
    if wrapped >= 360.0 { 0.0 } else { wrapped }
}

/// Unit direction for a heading given in degrees
#[inline]
pub fn heading_to_direction(angle_deg: f32) -> Vec2 {
    let rad = angle_deg.to_radians();
    Vec2::new(rad.cos(), rad.sin())
}

/// Heading in degrees of the vector from `from` to `to`
#[inline]
pub fn heading_between(from: Vec2, to: Vec2) -> f32 {
    let d = to - from;
    d.y.atan2(d.x).to_degrees()
}
