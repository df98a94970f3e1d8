//! Per-tick motion
//!
//! Plain Euler steps, no sub-stepping. Fast rounds can skip over a thin
//! mirror zone between two ticks; collisions are only tested at tick ends.

use glam::Vec2;

use super::state::GameState;
use crate::heading_to_direction;

/// Drop every live target by the current fall speed
pub fn integrate_targets(state: &mut GameState) {
    let fall = state.fall_speed;
    for target in state.targets.iter_mut().filter(|t| !t.consumed) {
        target.pos.y -= fall;
    }
}

/// Advance every live projectile one step along its current heading
pub fn integrate_projectiles(state: &mut GameState) {
    let step = state.tuning.projectile_step;
    for projectile in state.projectiles.iter_mut().filter(|p| !p.consumed) {
        let delta: Vec2 = heading_to_direction(projectile.heading_deg) * step;
        projectile.travelled += delta;
    }
}
