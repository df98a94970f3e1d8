//! Hit tests and mirror reflection
//!
//! Everything here is a box-overlap test, not a true segment intersection.
//! Mirrors reflect by mirroring the heading about their own orientation line
//! (`new = 2 * theta - old`), which is what the turret-angle model needs and
//! keeps outcomes bit-for-bit stable.

use glam::Vec2;
use serde::Serialize;

use crate::consts::{PROJECTILE_HALF_WIDTH, SHOT_REACH};

/// Number of fixed mirrors in the arena
pub const MIRROR_COUNT: usize = 4;

/// A fixed reflecting barrier
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Mirror {
    pub pos: Vec2,
    /// Orientation of the mirror line in degrees
    pub orientation_deg: f32,
    /// Horizontal half-width of the reflection zone (added to the projectile's)
    pub half_width: f32,
    /// Vertical tolerance of the reflection zone
    pub tolerance_y: f32,
}

impl Mirror {
    const fn new(x: f32, y: f32, orientation_deg: f32, half_width: f32, tolerance_y: f32) -> Self {
        Self {
            pos: Vec2::new(x, y),
            orientation_deg,
            half_width,
            tolerance_y,
        }
    }

    /// Whether a projectile at `point` is inside the reflection zone
    #[inline]
    pub fn zone_contains(&self, point: Vec2) -> bool {
        test_hit(
            point,
            PROJECTILE_HALF_WIDTH,
            self.pos,
            self.half_width,
            self.tolerance_y,
        )
    }

    /// Heading after bouncing off this mirror
    #[inline]
    pub fn reflect(&self, heading_deg: f32) -> f32 {
        reflect_angle(heading_deg, self.orientation_deg)
    }
}

/// The four mirrors, in the order they are tested
pub const MIRRORS: [Mirror; MIRROR_COUNT] = [
    Mirror::new(3.0, 0.0, 90.0, 0.025, 0.45),
    Mirror::new(2.0, 3.0, 120.0, 0.04, 0.45),
    Mirror::new(1.0, -2.0, 60.0, 0.04, 0.45),
    Mirror::new(-2.5, 2.5, 15.0, 0.35, 0.4),
];

/// Axis-aligned overlap test between a point-like body and a barrier.
///
/// X overlaps when the centres are within the sum of half-widths; Y uses a
/// separate fixed tolerance.
#[inline]
pub fn test_hit(
    point: Vec2,
    point_half_width: f32,
    barrier: Vec2,
    barrier_half_width: f32,
    tolerance_y: f32,
) -> bool {
    (barrier.x - point.x).abs() <= point_half_width + barrier_half_width
        && (barrier.y - point.y).abs() <= tolerance_y
}

/// Whether a projectile at `point` hits a target centred at `target`
#[inline]
pub fn projectile_hits_target(point: Vec2, target: Vec2) -> bool {
    test_hit(point, 0.0, target, SHOT_REACH, SHOT_REACH)
}

/// Reflect a heading about a line at `orientation_deg`
#[inline]
pub fn reflect_angle(heading_deg: f32, orientation_deg: f32) -> f32 {
    2.0 * orientation_deg - heading_deg
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalize_degrees;
    use proptest::prelude::*;

    #[test]
    fn test_hit_x_uses_both_half_widths() {
        let barrier = Vec2::new(3.0, 0.0);
        assert!(test_hit(Vec2::new(2.93, 0.0), 0.05, barrier, 0.025, 0.45));
        assert!(!test_hit(Vec2::new(2.9, 0.0), 0.05, barrier, 0.025, 0.45));
    }

    #[test]
    fn test_hit_y_uses_tolerance_only() {
        let barrier = Vec2::new(3.0, 0.0);
        assert!(test_hit(Vec2::new(3.0, 0.44), 0.05, barrier, 0.025, 0.45));
        assert!(!test_hit(Vec2::new(3.0, 0.46), 0.05, barrier, 0.025, 0.45));
    }

    #[test]
    fn test_mirror_reflection_table() {
        // (mirror index, incoming, expected)
        let cases = [
            (0, 0.0, 180.0),
            (0, 30.0, 150.0),
            (1, 0.0, 240.0),
            (1, 90.0, 150.0),
            (2, 0.0, 120.0),
            (2, 180.0, -60.0),
            (3, 0.0, 30.0),
            (3, 45.0, -15.0),
        ];
        for (k, incoming, expected) in cases {
            let out = MIRRORS[k].reflect(incoming);
            assert!(
                (out - expected).abs() < 1e-4,
                "mirror {} reflected {} to {}, expected {}",
                k + 1,
                incoming,
                out,
                expected
            );
        }
    }

    #[test]
    fn test_mirror_four_zone_is_square() {
        let m = MIRRORS[3];
        assert!(m.zone_contains(Vec2::new(-2.2, 2.2)));
        assert!(!m.zone_contains(Vec2::new(-2.05, 2.5)));
        assert!(!m.zone_contains(Vec2::new(-2.5, 2.05)));
    }

    #[test]
    fn test_projectile_hits_target_box() {
        let target = Vec2::new(1.0, 1.0);
        assert!(projectile_hits_target(Vec2::new(1.19, 0.81), target));
        assert!(!projectile_hits_target(Vec2::new(1.25, 1.0), target));
        assert!(!projectile_hits_target(Vec2::new(1.0, 0.75), target));
    }

    proptest! {
        #[test]
        fn prop_reflection_law_holds_for_every_mirror(incoming in -720.0f32..720.0, k in 0usize..MIRROR_COUNT) {
            let theta = MIRRORS[k].orientation_deg;
            let out = MIRRORS[k].reflect(incoming);
            let expected = normalize_degrees(2.0 * theta - incoming);
            let diff = (normalize_degrees(out) - expected).abs();
            prop_assert!(diff < 1e-3 || (360.0 - diff) < 1e-3);
        }

        #[test]
        fn prop_double_reflection_is_identity(incoming in -360.0f32..360.0, k in 0usize..MIRROR_COUNT) {
            let back = MIRRORS[k].reflect(MIRRORS[k].reflect(incoming));
            prop_assert!((back - incoming).abs() < 1e-3);
        }
    }
}
