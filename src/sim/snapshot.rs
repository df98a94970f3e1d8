//! Read-only view of the simulation for the renderer and HUD

use glam::Vec2;
use serde::Serialize;

use super::geometry::{MIRRORS, Mirror};
use super::state::{BucketSide, GamePhase, GameState, TargetColor, Turret};
use crate::normalize_degrees;

#[derive(Debug, Clone, Serialize)]
pub struct TargetView {
    pub id: u32,
    pub color: TargetColor,
    pub pos: Vec2,
}

#[derive(Debug, Clone, Serialize)]
pub struct ProjectileView {
    pub id: u32,
    pub pos: Vec2,
    /// Heading normalized to [0, 360)
    pub heading_deg: f32,
}

#[derive(Debug, Clone, Serialize)]
pub struct BucketView {
    pub side: BucketSide,
    pub center: Vec2,
    pub offset: f32,
}

/// Everything a frame needs to draw, taken after `advance()`
#[derive(Debug, Clone, Serialize)]
pub struct Snapshot {
    pub tick: u64,
    pub phase: GamePhase,
    pub score: f32,
    pub fall_speed: f32,
    pub turret: Turret,
    pub buckets: Vec<BucketView>,
    pub mirrors: Vec<Mirror>,
    /// Live targets only
    pub targets: Vec<TargetView>,
    /// Live projectiles only
    pub projectiles: Vec<ProjectileView>,
    pub spawned_red: usize,
    pub spawned_green: usize,
    pub spawned_black: usize,
    pub projectiles_fired: usize,
}

impl Snapshot {
    pub fn capture(state: &GameState) -> Self {
        Self {
            tick: state.tick,
            phase: state.phase,
            score: state.score,
            fall_speed: state.fall_speed,
            turret: state.turret.clone(),
            buckets: state
                .buckets
                .iter()
                .map(|b| BucketView {
                    side: b.side,
                    center: b.center(),
                    offset: b.offset,
                })
                .collect(),
            mirrors: MIRRORS.to_vec(),
            targets: state
                .targets
                .live()
                .map(|t| TargetView {
                    id: t.id,
                    color: t.color,
                    pos: t.pos,
                })
                .collect(),
            projectiles: state
                .live_projectiles()
                .map(|p| ProjectileView {
                    id: p.id,
                    pos: p.position(),
                    heading_deg: normalize_degrees(p.heading_deg),
                })
                .collect(),
            spawned_red: state.targets.spawned(TargetColor::Red),
            spawned_green: state.targets.spawned(TargetColor::Green),
            spawned_black: state.targets.spawned(TargetColor::Black),
            projectiles_fired: state.projectiles_fired(),
        }
    }
}
