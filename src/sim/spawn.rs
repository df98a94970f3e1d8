//! Periodic target spawner

use rand::Rng;

use super::state::{GameState, TargetColor};

/// Spawn one target of a random colour if this tick is on the spawn cadence.
///
/// Returns the new target's id when one was created.
pub fn spawn_tick(state: &mut GameState) -> Option<u32> {
    let interval = state.tuning.spawn_interval_ticks.max(1);
    if !state.tick.is_multiple_of(interval) {
        return None;
    }

    let (x_min, x_max) = (state.tuning.spawn_x_min, state.tuning.spawn_x_max);
    let rng = state.rng_mut();
    let color = TargetColor::from_roll(rng.random_range(0..3u32));
    let x = if x_min < x_max {
        rng.random_range(x_min..x_max)
    } else {
        x_min
    };

    let id = state.spawn_target(color, x);
    log::debug!(
        "tick {}: spawned {} target #{} at x={:.2}",
        state.tick,
        color.as_str(),
        id,
        x
    );
    Some(id)
}
