//! Camera bookkeeping for the renderer
//!
//! Zoom and pan only change what is drawn; the simulation never reads them.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::WORLD_HALF_EXTENT;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewState {
    pub zoom: f32,
    pub pan_x: f32,
    pub pan_y: f32,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            zoom: 1.0,
            pan_x: 0.0,
            pan_y: 0.0,
        }
    }
}

impl ViewState {
    /// Change zoom by `delta`, refusing to go below `min_zoom`
    pub fn zoom_by(&mut self, delta: f32, min_zoom: f32) {
        if self.zoom + delta >= min_zoom {
            self.zoom += delta;
        }
    }

    pub fn pan_by(&mut self, dx: f32) {
        self.pan_x += dx;
    }

    /// Orthographic bounds as (left, right, bottom, top)
    pub fn ortho_bounds(&self) -> (f32, f32, f32, f32) {
        let half = WORLD_HALF_EXTENT / self.zoom;
        (
            -half + self.pan_x,
            half + self.pan_x,
            -half + self.pan_y,
            half + self.pan_y,
        )
    }
}

/// Map a window pixel onto world space under the default (unzoomed) projection
pub fn screen_to_world(px: f32, py: f32, width: f32, height: f32) -> Vec2 {
    let extent = 2.0 * WORLD_HALF_EXTENT;
    Vec2::new(
        px / width * extent - WORLD_HALF_EXTENT,
        WORLD_HALF_EXTENT - py / height * extent,
    )
}
