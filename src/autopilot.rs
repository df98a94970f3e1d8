//! Demo player for idle and headless runs
//!
//! Reads the game state once per tick and answers with the same
//! [`InputAction`]s a human would produce, so everything it does goes
//! through [`crate::input::apply`] and stays deterministic.

use glam::Vec2;

use crate::consts::{BUCKET_RIM_Y, MUZZLE_X, TARGET_HALF_SIZE};
use crate::input::InputAction;
use crate::sim::{Bucket, BucketSide, GameState, Target, TargetColor};
use crate::{heading_between, normalize_degrees};

/// Ticks between shots
const FIRE_COOLDOWN_TICKS: u32 = 20;
/// A black target this many ticks from the rim is treated as a hazard
const HAZARD_HORIZON_TICKS: f32 = 20.0;

#[derive(Debug, Clone, Default)]
pub struct Autopilot {
    cooldown: u32,
}

impl Autopilot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Actions to apply before the next `advance()`
    pub fn plan(&mut self, state: &GameState) -> Vec<InputAction> {
        let mut actions = Vec::new();
        if state.is_terminated() {
            return actions;
        }

        for side in BucketSide::ALL {
            if let Some(action) = steer_bucket(state, side) {
                actions.push(action);
            }
        }

        self.cooldown = self.cooldown.saturating_sub(1);
        if let Some(aim) = lead_heading(state) {
            let step = state.tuning.turret_rotate_step_deg;
            let diff = normalize_degrees(aim - state.turret.aim_deg + 180.0) - 180.0;
            if diff.abs() >= step * 0.5 {
                actions.push(InputAction::RotateTurret(step.copysign(diff)));
            } else if self.cooldown == 0 {
                actions.push(InputAction::Fire);
                self.cooldown = FIRE_COOLDOWN_TICKS;
            }
        }

        actions
    }
}

/// Heading that meets the lowest falling black target
fn lead_heading(state: &GameState) -> Option<f32> {
    let target = state
        .targets
        .of(TargetColor::Black)
        .iter()
        .filter(|t| !t.consumed && t.pos.y - TARGET_HALF_SIZE > BUCKET_RIM_Y)
        .min_by(|a, b| a.pos.y.total_cmp(&b.pos.y))?;

    let muzzle = Vec2::new(MUZZLE_X, state.turret.elevation);
    let mut aim_point = target.pos;
    // Two refinements are enough at these speeds
    for _ in 0..2 {
        let flight_ticks = muzzle.distance(aim_point) / state.tuning.projectile_step;
        aim_point = target.pos - Vec2::new(0.0, state.fall_speed * flight_ticks);
    }
    Some(heading_between(muzzle, aim_point))
}

fn steer_bucket(state: &GameState, side: BucketSide) -> Option<InputAction> {
    let bucket = state.bucket(side);
    let step = state.tuning.bucket_key_step;
    let hazard_line = BUCKET_RIM_Y + state.fall_speed * HAZARD_HORIZON_TICKS;
    let blacks: Vec<&Target> = state
        .targets
        .of(TargetColor::Black)
        .iter()
        .filter(|t| !t.consumed)
        .collect();

    let spans_any = |delta: f32, line: f32| {
        let probe = Bucket {
            offset: bucket.offset + delta,
            ..bucket.clone()
        };
        blacks
            .iter()
            .any(|t| t.pos.y - TARGET_HALF_SIZE <= line && probe.spans(t.pos.x))
    };

    // Get out from under a black target first
    if let Some(threat) = blacks
        .iter()
        .filter(|t| t.pos.y - TARGET_HALF_SIZE <= hazard_line && bucket.spans(t.pos.x))
        .min_by(|a, b| a.pos.y.total_cmp(&b.pos.y))
    {
        let away = if threat.pos.x >= bucket.x() { -step } else { step };
        let landing_line = BUCKET_RIM_Y + state.fall_speed;
        return [away, -away]
            .into_iter()
            .find(|delta| !spans_any(*delta, landing_line))
            .map(|delta| InputAction::MoveBucket(side, delta));
    }

    let wanted = match side {
        BucketSide::Left => TargetColor::Red,
        BucketSide::Right => TargetColor::Green,
    };
    let goal = state
        .targets
        .of(wanted)
        .iter()
        .filter(|t| !t.consumed)
        .min_by(|a, b| a.pos.y.total_cmp(&b.pos.y))?;

    let dx = goal.pos.x - bucket.x();
    if dx.abs() < step * 0.5 {
        return None;
    }
    let delta = step.copysign(dx);
    if spans_any(delta, hazard_line) {
        return None;
    }
    Some(InputAction::MoveBucket(side, delta))
}
