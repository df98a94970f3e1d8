//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only (one [`advance`] call per frame)
//! - Seeded RNG only
//! - Stable iteration order (black, red, green; then spawn order)
//! - No rendering, camera or platform dependencies

pub mod collision;
pub mod geometry;
pub mod kinematics;
pub mod snapshot;
pub mod spawn;
pub mod state;
pub mod tick;

pub use collision::{CatchOutcome, catch_outcome, shot_delta};
pub use geometry::{MIRROR_COUNT, MIRRORS, Mirror, projectile_hits_target, reflect_angle, test_hit};
pub use snapshot::{BucketView, ProjectileView, Snapshot, TargetView};
pub use state::{
    Bucket, BucketSide, GameEvent, GamePhase, GameState, Projectile, Target, TargetColor,
    TargetRegistry, Turret,
};
pub use tick::advance;
