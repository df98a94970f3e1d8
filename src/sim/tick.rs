//! Fixed-step simulation tick
//!
//! One call to [`advance`] is one frame of the game: move, spawn, then
//! resolve bounces, catches and hits in that order. Each tick starts with an
//! empty event buffer.

use super::collision::{resolve_bucket_catches, resolve_mirrors, resolve_projectile_hits};
use super::kinematics::{integrate_projectiles, integrate_targets};
use super::spawn::spawn_tick;
use super::state::GameState;

/// Advance the game state by one tick. A terminated run never changes again.
pub fn advance(state: &mut GameState) {
    if state.is_terminated() {
        return;
    }

    state.tick += 1;
    state.clear_events();

    integrate_targets(state);
    integrate_projectiles(state);

    spawn_tick(state);

    resolve_mirrors(state);
    if resolve_bucket_catches(state) {
        return;
    }
    resolve_projectile_hits(state);
}
