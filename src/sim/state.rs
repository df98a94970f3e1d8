//! Game state and core simulation types
//!
//! Everything the tick reads or writes lives in [`GameState`]. Entities are
//! never removed: a hit or a catch only sets `consumed`, so indices stay
//! stable and insertion order doubles as resolution order.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::geometry::MIRROR_COUNT;
use crate::Tuning;
use crate::consts::*;

/// Current phase of the run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Targets falling, player in control
    Running,
    /// A black target landed in a bucket; irreversible
    Terminated,
}

/// Target colours
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TargetColor {
    Red,
    Green,
    Black,
}

impl TargetColor {
    /// Order in which colours are resolved against buckets and projectiles
    pub const RESOLUTION_ORDER: [TargetColor; 3] =
        [TargetColor::Black, TargetColor::Red, TargetColor::Green];

    /// Map a uniform draw in `0..3` onto a colour
    pub fn from_roll(roll: u32) -> Self {
        match roll % 3 {
            0 => TargetColor::Red,
            1 => TargetColor::Green,
            _ => TargetColor::Black,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TargetColor::Red => "red",
            TargetColor::Green => "green",
            TargetColor::Black => "black",
        }
    }
}

/// A falling block
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Target {
    pub id: u32,
    pub color: TargetColor,
    /// Centre position; x is fixed at spawn
    pub pos: Vec2,
    pub consumed: bool,
}

/// A fired round
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Projectile {
    pub id: u32,
    /// Turret elevation when fired
    pub launch_elevation: f32,
    /// Current heading in degrees; rewritten by each mirror bounce
    pub heading_deg: f32,
    /// Distance covered since launch
    pub travelled: Vec2,
    pub consumed: bool,
    /// One flag per mirror, set on the first (and only) bounce off it
    pub bounced: [bool; MIRROR_COUNT],
}

impl Projectile {
    pub fn new(id: u32, turret: &Turret) -> Self {
        Self {
            id,
            launch_elevation: turret.elevation,
            heading_deg: turret.aim_deg,
            travelled: Vec2::ZERO,
            consumed: false,
            bounced: [false; MIRROR_COUNT],
        }
    }

    /// World position of the round
    #[inline]
    pub fn position(&self) -> Vec2 {
        Vec2::new(
            MUZZLE_X + self.travelled.x,
            self.launch_elevation + self.travelled.y,
        )
    }

    pub fn bounce_count(&self) -> usize {
        self.bounced.iter().filter(|b| **b).count()
    }
}

/// Which of the two catch buckets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BucketSide {
    Left,
    Right,
}

impl BucketSide {
    pub const ALL: [BucketSide; 2] = [BucketSide::Left, BucketSide::Right];

    #[inline]
    pub fn index(self) -> usize {
        match self {
            BucketSide::Left => 0,
            BucketSide::Right => 1,
        }
    }
}

/// A player-steered catch bucket at the bottom of the world
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bucket {
    pub side: BucketSide,
    pub base_x: f32,
    /// Horizontal displacement from `base_x` set by the player
    pub offset: f32,
}

impl Bucket {
    pub fn new(side: BucketSide) -> Self {
        let base_x = match side {
            BucketSide::Left => LEFT_BUCKET_BASE_X,
            BucketSide::Right => RIGHT_BUCKET_BASE_X,
        };
        Self {
            side,
            base_x,
            offset: 0.0,
        }
    }

    /// Current centre x
    #[inline]
    pub fn x(&self) -> f32 {
        self.base_x + self.offset
    }

    /// Centre of the drawn bucket
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x(), BUCKET_Y)
    }

    /// Whether a target's left or right edge lies within the catch span
    pub fn spans(&self, target_x: f32) -> bool {
        let lo = self.x() - BUCKET_HALF_SPAN;
        let hi = self.x() + BUCKET_HALF_SPAN;
        let left_edge = target_x - TARGET_HALF_SIZE;
        let right_edge = target_x + TARGET_HALF_SIZE;
        (lo <= left_edge && left_edge <= hi) || (lo <= right_edge && right_edge <= hi)
    }

    /// A target is caught once it reaches the rim while inside the span
    pub fn catches(&self, target: &Target) -> bool {
        target.pos.y - TARGET_HALF_SIZE <= BUCKET_RIM_Y && self.spans(target.pos.x)
    }

    /// Whether a cursor at `point` can grab this bucket for dragging
    pub fn grab_zone_contains(&self, point: Vec2) -> bool {
        (point.x - self.x()).abs() <= BUCKET_HALF_SPAN && point.y <= BUCKET_Y
    }
}

/// The firing turret on the left edge
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Turret {
    /// Vertical offset of the firing point
    pub elevation: f32,
    /// Barrel rotation in degrees (0 = pointing right, counter-clockwise)
    pub aim_deg: f32,
}

/// Something that happened during the last tick (or input callback)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum GameEvent {
    TargetSpawned {
        id: u32,
        color: TargetColor,
        x: f32,
    },
    ProjectileFired {
        id: u32,
    },
    Reflected {
        projectile_id: u32,
        mirror: usize,
        heading_deg: f32,
    },
    TargetShot {
        projectile_id: u32,
        target_id: u32,
        color: TargetColor,
        score_delta: f32,
    },
    TargetCaught {
        target_id: u32,
        color: TargetColor,
        bucket: BucketSide,
        score_delta: f32,
    },
    GameOver {
        final_score: f32,
    },
}

/// Append-only target storage, one sequence per colour
#[derive(Debug, Clone, Default)]
pub struct TargetRegistry {
    red: Vec<Target>,
    green: Vec<Target>,
    black: Vec<Target>,
}

impl TargetRegistry {
    pub fn of(&self, color: TargetColor) -> &[Target] {
        match color {
            TargetColor::Red => &self.red,
            TargetColor::Green => &self.green,
            TargetColor::Black => &self.black,
        }
    }

    pub fn of_mut(&mut self, color: TargetColor) -> &mut [Target] {
        match color {
            TargetColor::Red => &mut self.red,
            TargetColor::Green => &mut self.green,
            TargetColor::Black => &mut self.black,
        }
    }

    fn push(&mut self, target: Target) {
        match target.color {
            TargetColor::Red => self.red.push(target),
            TargetColor::Green => self.green.push(target),
            TargetColor::Black => self.black.push(target),
        }
    }

    /// All targets, in resolution order (black, red, green)
    pub fn iter(&self) -> impl Iterator<Item = &Target> {
        TargetColor::RESOLUTION_ORDER
            .into_iter()
            .flat_map(move |c| self.of(c).iter())
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Target> {
        self.black
            .iter_mut()
            .chain(self.red.iter_mut())
            .chain(self.green.iter_mut())
    }

    /// Targets still in play
    pub fn live(&self) -> impl Iterator<Item = &Target> {
        self.iter().filter(|t| !t.consumed)
    }

    /// Total ever spawned of one colour
    pub fn spawned(&self, color: TargetColor) -> usize {
        self.of(color).len()
    }

    pub fn total_spawned(&self) -> usize {
        self.red.len() + self.green.len() + self.black.len()
    }
}

/// Complete game state (deterministic for a given seed and input sequence)
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    rng: Pcg32,
    /// Balance knobs this run was started with
    pub tuning: Tuning,
    pub phase: GamePhase,
    pub score: f32,
    /// Simulation tick counter
    pub tick: u64,
    /// Distance every live target falls per tick
    pub fall_speed: f32,
    pub turret: Turret,
    pub buckets: [Bucket; 2],
    pub targets: TargetRegistry,
    /// Every projectile ever fired, in firing order
    pub projectiles: Vec<Projectile>,
    /// Events since the start of the current tick
    events: Vec<GameEvent>,
    next_id: u32,
}

impl GameState {
    /// Create a new game state with default tuning
    pub fn new(seed: u64) -> Self {
        Self::with_tuning(seed, Tuning::default())
    }

    pub fn with_tuning(seed: u64, tuning: Tuning) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            fall_speed: tuning.initial_fall_speed,
            tuning,
            phase: GamePhase::Running,
            score: 0.0,
            tick: 0,
            turret: Turret::default(),
            buckets: [Bucket::new(BucketSide::Left), Bucket::new(BucketSide::Right)],
            targets: TargetRegistry::default(),
            projectiles: Vec::new(),
            events: Vec::new(),
            next_id: 1,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub fn rng_mut(&mut self) -> &mut Pcg32 {
        &mut self.rng
    }

    #[inline]
    pub fn is_terminated(&self) -> bool {
        self.phase == GamePhase::Terminated
    }

    pub fn bucket(&self, side: BucketSide) -> &Bucket {
        &self.buckets[side.index()]
    }

    /// Events from the last tick, plus any recorded by input since then
    pub fn events(&self) -> &[GameEvent] {
        &self.events
    }

    pub(crate) fn clear_events(&mut self) {
        self.events.clear();
    }

    /// Hand pending events to the audio/render side
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub(crate) fn push_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Append a target at spawn altitude
    pub fn spawn_target(&mut self, color: TargetColor, x: f32) -> u32 {
        let y = self.tuning.spawn_altitude;
        self.spawn_target_at(color, Vec2::new(x, y))
    }

    /// Append a target at an arbitrary position (scripted scenarios)
    pub fn spawn_target_at(&mut self, color: TargetColor, pos: Vec2) -> u32 {
        let id = self.next_entity_id();
        self.targets.push(Target {
            id,
            color,
            pos,
            consumed: false,
        });
        self.push_event(GameEvent::TargetSpawned { id, color, x: pos.x });
        id
    }

    /// Fire a projectile from the current turret pose.
    ///
    /// Returns the new projectile's id, or `None` once the run is over.
    pub fn fire(&mut self) -> Option<u32> {
        if self.is_terminated() {
            return None;
        }
        let id = self.next_entity_id();
        self.projectiles.push(Projectile::new(id, &self.turret));
        self.push_event(GameEvent::ProjectileFired { id });
        Some(id)
    }

    pub fn rotate_turret(&mut self, delta_deg: f32) {
        self.turret.aim_deg += delta_deg;
    }

    pub fn elevate_turret(&mut self, delta_y: f32) {
        self.turret.elevation += delta_y;
    }

    pub fn adjust_bucket_offset(&mut self, side: BucketSide, delta: f32) {
        self.buckets[side.index()].offset += delta;
    }

    /// Multiply the global fall speed (the `n` and `m` keys double or halve it)
    pub fn scale_fall_speed(&mut self, factor: f32) {
        self.fall_speed *= factor;
    }

    /// Number of projectiles fired so far
    pub fn projectiles_fired(&self) -> usize {
        self.projectiles.len()
    }

    pub fn live_projectiles(&self) -> impl Iterator<Item = &Projectile> {
        self.projectiles.iter().filter(|p| !p.consumed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state_is_running() {
        let state = GameState::new(7);
        assert_eq!(state.phase, GamePhase::Running);
        assert_eq!(state.score, 0.0);
        assert_eq!(state.tick, 0);
        assert_eq!(state.fall_speed, INITIAL_FALL_SPEED);
        assert_eq!(state.targets.total_spawned(), 0);
        assert_eq!(state.projectiles_fired(), 0);
    }

    #[test]
    fn test_fire_uses_current_turret_pose() {
        let mut state = GameState::new(7);
        state.rotate_turret(15.0);
        state.elevate_turret(0.4);
        let id = state.fire().unwrap();

        let p = &state.projectiles[0];
        assert_eq!(p.id, id);
        assert_eq!(p.heading_deg, 15.0);
        assert_eq!(p.launch_elevation, 0.4);
        assert_eq!(p.position(), Vec2::new(MUZZLE_X, 0.4));

        // Later turret moves don't touch projectiles already in flight
        state.rotate_turret(30.0);
        assert_eq!(state.projectiles[0].heading_deg, 15.0);
    }

    #[test]
    fn test_fire_after_game_over_is_ignored() {
        let mut state = GameState::new(7);
        state.phase = GamePhase::Terminated;
        assert!(state.fire().is_none());
        assert_eq!(state.projectiles_fired(), 0);
    }

    #[test]
    fn test_bucket_span_uses_target_edges() {
        let bucket = Bucket::new(BucketSide::Left);
        assert!(bucket.spans(-2.0));
        // Right edge just inside the left boundary
        assert!(bucket.spans(-2.69));
        assert!(!bucket.spans(-2.75));
        // Left edge just inside the right boundary
        assert!(bucket.spans(-1.31));
        assert!(!bucket.spans(-1.25));
    }

    #[test]
    fn test_bucket_offset_moves_span() {
        let mut state = GameState::new(1);
        state.adjust_bucket_offset(BucketSide::Right, -0.3);
        assert!((state.bucket(BucketSide::Right).x() - 1.7).abs() < 1e-6);
        assert_eq!(state.bucket(BucketSide::Left).x(), LEFT_BUCKET_BASE_X);
    }

    #[test]
    fn test_catch_requires_rim_altitude() {
        let bucket = Bucket::new(BucketSide::Right);
        let mut target = Target {
            id: 1,
            color: TargetColor::Red,
            pos: Vec2::new(2.0, -3.0),
            consumed: false,
        };
        assert!(!bucket.catches(&target));
        target.pos.y = -3.15;
        assert!(bucket.catches(&target));
    }

    #[test]
    fn test_registry_keeps_colours_apart() {
        let mut state = GameState::new(3);
        state.spawn_target(TargetColor::Red, 0.0);
        state.spawn_target(TargetColor::Black, 1.0);
        state.spawn_target(TargetColor::Red, 2.0);

        assert_eq!(state.targets.spawned(TargetColor::Red), 2);
        assert_eq!(state.targets.spawned(TargetColor::Black), 1);
        assert_eq!(state.targets.spawned(TargetColor::Green), 0);

        // Resolution order puts black first
        let colors: Vec<_> = state.targets.iter().map(|t| t.color).collect();
        assert_eq!(
            colors,
            vec![TargetColor::Black, TargetColor::Red, TargetColor::Red]
        );
    }

    #[test]
    fn test_scale_fall_speed() {
        let mut state = GameState::new(3);
        state.scale_fall_speed(2.0);
        assert!((state.fall_speed - 0.06).abs() < 1e-6);
        state.scale_fall_speed(0.5);
        state.scale_fall_speed(0.5);
        assert!((state.fall_speed - 0.015).abs() < 1e-6);
    }
}
