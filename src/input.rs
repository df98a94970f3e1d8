//! Player input
//!
//! The window layer turns raw key and mouse events into [`InputAction`]s
//! through [`InputState`], then hands each action to [`apply`], which mutates
//! the game immediately. Callbacks and ticks run on the same thread, so an
//! action never lands in the middle of a tick.

use glam::Vec2;

use crate::Tuning;
use crate::consts::{TURRET_COLUMN_MAX_X, TURRET_COLUMN_MIN_X};
use crate::sim::{BucketSide, GameState};
use crate::view::ViewState;

/// A single player command
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputAction {
    Fire,
    RotateTurret(f32),
    ElevateTurret(f32),
    MoveBucket(BucketSide, f32),
    ScaleFallSpeed(f32),
    Pan(f32),
    Zoom(f32),
    Quit,
}

/// Whether the game loop should keep going after an action
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Apply one action to the simulation (or the camera)
pub fn apply(action: InputAction, state: &mut GameState, view: &mut ViewState) -> Flow {
    match action {
        InputAction::Fire => {
            if let Some(id) = state.fire() {
                log::debug!(
                    "fired projectile #{} at {:.1} deg, elevation {:.2}",
                    id,
                    state.turret.aim_deg,
                    state.turret.elevation
                );
            }
        }
        InputAction::RotateTurret(delta) => state.rotate_turret(delta),
        InputAction::ElevateTurret(delta) => state.elevate_turret(delta),
        InputAction::MoveBucket(side, delta) => state.adjust_bucket_offset(side, delta),
        InputAction::ScaleFallSpeed(factor) => {
            state.scale_fall_speed(factor);
            log::debug!("fall speed now {}", state.fall_speed);
        }
        InputAction::Pan(dx) => view.pan_by(dx),
        InputAction::Zoom(dz) => view.zoom_by(dz, state.tuning.min_zoom),
        InputAction::Quit => return Flow::Quit,
    }
    Flow::Continue
}

/// Keys the game responds to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Char(char),
    Escape,
    Up,
    Down,
    Left,
    Right,
    /// Selects the left bucket for the arrow keys while held
    Ctrl,
    /// Selects the right bucket for the arrow keys while held
    Alt,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseButton {
    Left,
    Right,
    WheelUp,
    WheelDown,
}

/// Modifier and drag state carried between raw input events
#[derive(Debug, Clone, Default)]
pub struct InputState {
    /// Bucket the arrow keys currently steer (None = arrows pan the view)
    bucket_select: Option<BucketSide>,
    left_down: bool,
    right_down: bool,
    /// Last cursor x used for bucket dragging
    bucket_anchor_x: f32,
    /// Last cursor y used for turret dragging
    turret_anchor_y: f32,
    /// Last cursor x used for panning
    pan_anchor_x: f32,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn bucket_select(&self) -> Option<BucketSide> {
        self.bucket_select
    }

    pub fn key_down(&mut self, key: Key, tuning: &Tuning) -> Option<InputAction> {
        match key {
            Key::Ctrl => {
                self.bucket_select = Some(BucketSide::Left);
                None
            }
            Key::Alt => {
                self.bucket_select = Some(BucketSide::Right);
                None
            }
            Key::Left => Some(self.arrow(-1.0, tuning)),
            Key::Right => Some(self.arrow(1.0, tuning)),
            Key::Up => Some(InputAction::Zoom(tuning.zoom_step)),
            Key::Down => Some(InputAction::Zoom(-tuning.zoom_step)),
            Key::Escape => {
                self.bucket_select = None;
                Some(InputAction::Quit)
            }
            Key::Char(c) => {
                self.bucket_select = None;
                match c {
                    'q' | 'Q' => Some(InputAction::Quit),
                    ' ' => Some(InputAction::Fire),
                    'n' => Some(InputAction::ScaleFallSpeed(2.0)),
                    'm' => Some(InputAction::ScaleFallSpeed(0.5)),
                    's' => Some(InputAction::ElevateTurret(tuning.turret_elevate_step)),
                    'f' => Some(InputAction::ElevateTurret(-tuning.turret_elevate_step)),
                    'a' => Some(InputAction::RotateTurret(tuning.turret_rotate_step_deg)),
                    'd' => Some(InputAction::RotateTurret(-tuning.turret_rotate_step_deg)),
                    _ => None,
                }
            }
        }
    }

    pub fn key_up(&mut self, key: Key) {
        match (key, self.bucket_select) {
            (Key::Ctrl, Some(BucketSide::Left)) | (Key::Alt, Some(BucketSide::Right)) => {
                self.bucket_select = None;
            }
            _ => {}
        }
    }

    /// Arrow keys move the selected bucket, or pan when none is selected
    fn arrow(&self, direction: f32, tuning: &Tuning) -> InputAction {
        match self.bucket_select {
            Some(side) => InputAction::MoveBucket(side, direction * tuning.bucket_key_step),
            None => InputAction::Pan(direction * tuning.pan_key_step),
        }
    }

    /// `world` is the cursor position in world space
    pub fn mouse_down(
        &mut self,
        button: MouseButton,
        world: Vec2,
        tuning: &Tuning,
    ) -> Option<InputAction> {
        match button {
            MouseButton::Left => {
                self.left_down = true;
                self.right_down = false;
                self.bucket_anchor_x = world.x;
                self.turret_anchor_y = world.y;
                Some(InputAction::Fire)
            }
            MouseButton::Right => {
                self.right_down = true;
                self.left_down = false;
                self.pan_anchor_x = world.x;
                None
            }
            MouseButton::WheelUp => Some(InputAction::Zoom(-tuning.zoom_step)),
            MouseButton::WheelDown => Some(InputAction::Zoom(tuning.zoom_step)),
        }
    }

    pub fn mouse_up(&mut self, button: MouseButton) {
        match button {
            MouseButton::Left => self.left_down = false,
            MouseButton::Right => self.right_down = false,
            MouseButton::WheelUp | MouseButton::WheelDown => {}
        }
    }

    /// Cursor moved while a button may be held
    pub fn mouse_motion(
        &mut self,
        world: Vec2,
        state: &GameState,
        tuning: &Tuning,
    ) -> Option<InputAction> {
        if self.right_down {
            let dx = world.x - self.pan_anchor_x;
            self.pan_anchor_x = world.x;
            return match dx.partial_cmp(&0.0) {
                Some(std::cmp::Ordering::Greater) => Some(InputAction::Pan(tuning.pan_drag_step)),
                Some(std::cmp::Ordering::Less) => Some(InputAction::Pan(-tuning.pan_drag_step)),
                _ => None,
            };
        }

        if !self.left_down {
            return None;
        }

        // Dragging a bucket pulls it toward the cursor
        if let Some(side) = BucketSide::ALL
            .into_iter()
            .find(|side| state.bucket(*side).grab_zone_contains(world))
        {
            let delta = if world.x >= self.bucket_anchor_x {
                tuning.bucket_drag_step
            } else {
                -tuning.bucket_drag_step
            };
            self.bucket_anchor_x = world.x;
            return Some(InputAction::MoveBucket(side, delta));
        }

        // Dragging along the turret column raises or lowers it
        if (TURRET_COLUMN_MIN_X..=TURRET_COLUMN_MAX_X).contains(&world.x) {
            let delta = if world.y <= self.turret_anchor_y {
                -tuning.turret_drag_step
            } else {
                tuning.turret_drag_step
            };
            self.turret_anchor_y = world.y;
            return Some(InputAction::ElevateTurret(delta));
        }

        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(input: &mut InputState, key: Key) -> Option<InputAction> {
        input.key_down(key, &Tuning::default())
    }

    #[test]
    fn test_keyboard_bindings() {
        let mut input = InputState::new();
        assert_eq!(press(&mut input, Key::Char(' ')), Some(InputAction::Fire));
        assert_eq!(
            press(&mut input, Key::Char('a')),
            Some(InputAction::RotateTurret(5.0))
        );
        assert_eq!(
            press(&mut input, Key::Char('d')),
            Some(InputAction::RotateTurret(-5.0))
        );
        assert_eq!(
            press(&mut input, Key::Char('s')),
            Some(InputAction::ElevateTurret(0.2))
        );
        assert_eq!(
            press(&mut input, Key::Char('n')),
            Some(InputAction::ScaleFallSpeed(2.0))
        );
        assert_eq!(
            press(&mut input, Key::Char('m')),
            Some(InputAction::ScaleFallSpeed(0.5))
        );
        assert_eq!(press(&mut input, Key::Char('Q')), Some(InputAction::Quit));
        assert_eq!(press(&mut input, Key::Escape), Some(InputAction::Quit));
        assert_eq!(press(&mut input, Key::Char('z')), None);
    }

    #[test]
    fn test_arrows_pan_without_modifier() {
        let mut input = InputState::new();
        assert_eq!(press(&mut input, Key::Left), Some(InputAction::Pan(-0.2)));
        assert_eq!(press(&mut input, Key::Right), Some(InputAction::Pan(0.2)));
    }

    #[test]
    fn test_modifiers_select_buckets() {
        let mut input = InputState::new();
        press(&mut input, Key::Ctrl);
        assert_eq!(
            press(&mut input, Key::Left),
            Some(InputAction::MoveBucket(BucketSide::Left, -0.3))
        );
        input.key_up(Key::Ctrl);
        assert_eq!(input.bucket_select(), None);

        // Zoom keys keep the selection
        press(&mut input, Key::Ctrl);
        assert_eq!(press(&mut input, Key::Up), Some(InputAction::Zoom(0.2)));
        assert_eq!(press(&mut input, Key::Down), Some(InputAction::Zoom(-0.2)));
        assert_eq!(input.bucket_select(), Some(BucketSide::Left));
        input.key_up(Key::Ctrl);

        press(&mut input, Key::Alt);
        assert_eq!(
            press(&mut input, Key::Right),
            Some(InputAction::MoveBucket(BucketSide::Right, 0.3))
        );
        // A regular key drops the selection
        press(&mut input, Key::Char(' '));
        assert_eq!(press(&mut input, Key::Right), Some(InputAction::Pan(0.2)));
    }

    #[test]
    fn test_apply_mutates_state_and_view() {
        let mut state = GameState::new(1);
        let mut view = ViewState::default();

        assert_eq!(apply(InputAction::Fire, &mut state, &mut view), Flow::Continue);
        assert_eq!(state.projectiles_fired(), 1);

        apply(
            InputAction::MoveBucket(BucketSide::Left, 0.3),
            &mut state,
            &mut view,
        );
        assert!((state.bucket(BucketSide::Left).offset - 0.3).abs() < 1e-6);

        apply(InputAction::Zoom(0.2), &mut state, &mut view);
        apply(InputAction::Pan(-0.2), &mut state, &mut view);
        assert!((view.zoom - 1.2).abs() < 1e-6);
        assert!((view.pan_x + 0.2).abs() < 1e-6);

        assert_eq!(apply(InputAction::Quit, &mut state, &mut view), Flow::Quit);
    }

    #[test]
    fn test_left_click_fires_and_drags_bucket() {
        let tuning = Tuning::default();
        let state = GameState::new(1);
        let mut input = InputState::new();

        let grab = Vec2::new(2.0, -3.8);
        assert_eq!(
            input.mouse_down(MouseButton::Left, grab, &tuning),
            Some(InputAction::Fire)
        );
        assert_eq!(
            input.mouse_motion(Vec2::new(2.1, -3.8), &state, &tuning),
            Some(InputAction::MoveBucket(BucketSide::Right, 0.05))
        );
        assert_eq!(
            input.mouse_motion(Vec2::new(1.9, -3.8), &state, &tuning),
            Some(InputAction::MoveBucket(BucketSide::Right, -0.05))
        );

        input.mouse_up(MouseButton::Left);
        assert_eq!(input.mouse_motion(Vec2::new(1.8, -3.8), &state, &tuning), None);
    }

    #[test]
    fn test_left_drag_on_turret_column_elevates() {
        let tuning = Tuning::default();
        let state = GameState::new(1);
        let mut input = InputState::new();

        input.mouse_down(MouseButton::Left, Vec2::new(-3.8, 0.0), &tuning);
        assert_eq!(
            input.mouse_motion(Vec2::new(-3.8, 0.5), &state, &tuning),
            Some(InputAction::ElevateTurret(0.03))
        );
        assert_eq!(
            input.mouse_motion(Vec2::new(-3.8, 0.2), &state, &tuning),
            Some(InputAction::ElevateTurret(-0.03))
        );
        // Open field does nothing
        assert_eq!(input.mouse_motion(Vec2::new(0.0, 0.0), &state, &tuning), None);
    }

    #[test]
    fn test_right_drag_pans() {
        let tuning = Tuning::default();
        let state = GameState::new(1);
        let mut input = InputState::new();

        assert_eq!(input.mouse_down(MouseButton::Right, Vec2::ZERO, &tuning), None);
        assert_eq!(
            input.mouse_motion(Vec2::new(0.5, 0.0), &state, &tuning),
            Some(InputAction::Pan(0.02))
        );
        assert_eq!(
            input.mouse_motion(Vec2::new(0.1, 0.0), &state, &tuning),
            Some(InputAction::Pan(-0.02))
        );
        assert_eq!(
            input.mouse_down(MouseButton::WheelDown, Vec2::ZERO, &tuning),
            Some(InputAction::Zoom(0.2))
        );
    }
}
