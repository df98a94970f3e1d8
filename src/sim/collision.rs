//! Collision resolution and scoring
//!
//! Three passes run after kinematics every tick: mirror bounces, bucket
//! catches, then projectile hits. Each scan stops at the first eligible match
//! (first unflagged mirror per projectile, first caught target per colour,
//! first struck target per projectile); anything left over is picked up on a
//! later tick. Consumed entities are skipped by every pass.

use super::geometry::{MIRRORS, projectile_hits_target};
use super::state::{BucketSide, GameEvent, GamePhase, GameState, TargetColor};
use crate::consts::*;

/// What a bucket catch does to the run
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CatchOutcome {
    Score(f32),
    GameOver,
}

/// Left bucket rewards red, right bucket rewards green, black ends the run
pub fn catch_outcome(color: TargetColor, side: BucketSide) -> CatchOutcome {
    match (color, side) {
        (TargetColor::Black, _) => CatchOutcome::GameOver,
        (TargetColor::Red, BucketSide::Left) => CatchOutcome::Score(SCORE_CATCH_REWARD),
        (TargetColor::Red, BucketSide::Right) => CatchOutcome::Score(SCORE_CATCH_PENALTY),
        (TargetColor::Green, BucketSide::Left) => CatchOutcome::Score(SCORE_CATCH_PENALTY),
        (TargetColor::Green, BucketSide::Right) => CatchOutcome::Score(SCORE_CATCH_REWARD),
    }
}

/// Score change for shooting a target
pub fn shot_delta(color: TargetColor) -> f32 {
    match color {
        TargetColor::Black => SCORE_SHOT_BLACK,
        TargetColor::Red => SCORE_SHOT_RED,
        TargetColor::Green => SCORE_SHOT_GREEN,
    }
}

/// Bounce live projectiles off the first mirror they newly touch
pub fn resolve_mirrors(state: &mut GameState) {
    let mut events = Vec::new();

    for projectile in state.projectiles.iter_mut().filter(|p| !p.consumed) {
        let pos = projectile.position();
        for (k, mirror) in MIRRORS.iter().enumerate() {
            if projectile.bounced[k] || !mirror.zone_contains(pos) {
                continue;
            }
            projectile.bounced[k] = true;
            projectile.heading_deg = mirror.reflect(projectile.heading_deg);
            log::debug!(
                "projectile #{} bounced off mirror {} -> {:.1} deg",
                projectile.id,
                k + 1,
                projectile.heading_deg
            );
            events.push(GameEvent::Reflected {
                projectile_id: projectile.id,
                mirror: k,
                heading_deg: projectile.heading_deg,
            });
            break;
        }
    }

    for event in events {
        state.push_event(event);
    }
}

/// Catch targets that reached the buckets.
///
/// Returns `true` if a black target was caught and the run terminated.
pub fn resolve_bucket_catches(state: &mut GameState) -> bool {
    for color in TargetColor::RESOLUTION_ORDER {
        let caught = state
            .targets
            .of(color)
            .iter()
            .enumerate()
            .filter(|(_, t)| !t.consumed)
            .find_map(|(i, t)| {
                BucketSide::ALL
                    .into_iter()
                    .find(|side| state.bucket(*side).catches(t))
                    .map(|side| (i, side))
            });

        let Some((index, side)) = caught else {
            continue;
        };

        let target = &mut state.targets.of_mut(color)[index];
        target.consumed = true;
        let target_id = target.id;

        match catch_outcome(color, side) {
            CatchOutcome::Score(delta) => {
                state.score += delta;
                log::debug!(
                    "{} target #{} caught by {:?} bucket ({:+})",
                    color.as_str(),
                    target_id,
                    side,
                    delta
                );
                state.push_event(GameEvent::TargetCaught {
                    target_id,
                    color,
                    bucket: side,
                    score_delta: delta,
                });
            }
            CatchOutcome::GameOver => {
                state.phase = GamePhase::Terminated;
                log::info!(
                    "Black target #{} landed in the {:?} bucket - game over, score {}",
                    target_id,
                    side,
                    state.score
                );
                state.push_event(GameEvent::TargetCaught {
                    target_id,
                    color,
                    bucket: side,
                    score_delta: 0.0,
                });
                state.push_event(GameEvent::GameOver {
                    final_score: state.score,
                });
                return true;
            }
        }
    }

    false
}

/// Destroy targets struck by live projectiles
pub fn resolve_projectile_hits(state: &mut GameState) {
    let mut events = Vec::new();

    for projectile in state.projectiles.iter_mut().filter(|p| !p.consumed) {
        let pos = projectile.position();

        'colors: for color in TargetColor::RESOLUTION_ORDER {
            for target in state.targets.of_mut(color).iter_mut() {
                if target.consumed || !projectile_hits_target(pos, target.pos) {
                    continue;
                }
                target.consumed = true;
                projectile.consumed = true;

                let delta = shot_delta(color);
                state.score += delta;
                log::debug!(
                    "projectile #{} hit {} target #{} ({:+})",
                    projectile.id,
                    color.as_str(),
                    target.id,
                    delta
                );
                events.push(GameEvent::TargetShot {
                    projectile_id: projectile.id,
                    target_id: target.id,
                    color,
                    score_delta: delta,
                });
                break 'colors;
            }
        }
    }

    for event in events {
        state.push_event(event);
    }
}
