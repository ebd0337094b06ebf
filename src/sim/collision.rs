//! Collision primitives
//!
//! Everything here compares squared distances, so no square roots are taken.
//! All thresholds are inclusive: touching counts as a hit.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle (y grows downward, so `min.y` is the top edge)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub min: Vec2,
    pub max: Vec2,
}

impl Rect {
    /// Rectangle from its top-left corner and size
    pub fn from_xywh(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            min: Vec2::new(x, y),
            max: Vec2::new(x + w, y + h),
        }
    }

    /// Rectangle centered on `center`
    pub fn from_center_size(center: Vec2, size: Vec2) -> Self {
        let half = size * 0.5;
        Self {
            min: center - half,
            max: center + half,
        }
    }

    /// Rectangle standing on `base` (its bottom edge is centered there)
    pub fn from_bottom_center(base: Vec2, size: Vec2) -> Self {
        Self::from_xywh(base.x - size.x / 2.0, base.y - size.y, size.x, size.y)
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.min.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.max.x
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.min.y
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.max.y
    }

    #[inline]
    pub fn width(&self) -> f32 {
        self.max.x - self.min.x
    }

    #[inline]
    pub fn height(&self) -> f32 {
        self.max.y - self.min.y
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        (self.min + self.max) * 0.5
    }

    /// Point containment, edges included
    #[inline]
    pub fn contains(&self, p: Vec2) -> bool {
        p.x >= self.min.x && p.x <= self.max.x && p.y >= self.min.y && p.y <= self.max.y
    }

    /// Closest point on or inside the rectangle to `p`
    #[inline]
    pub fn closest_point(&self, p: Vec2) -> Vec2 {
        p.clamp(self.min, self.max)
    }
}

/// Point inside (or on) a circle
#[inline]
pub fn point_in_circle(p: Vec2, center: Vec2, radius: f32) -> bool {
    p.distance_squared(center) <= radius * radius
}

/// Circle vs rectangle overlap using the closest-point test
///
/// A center inside the rectangle has distance 0, so it always hits, even with
/// radius 0.
#[inline]
pub fn circle_intersects_rect(center: Vec2, radius: f32, rect: &Rect) -> bool {
    point_in_circle(rect.closest_point(center), center, radius)
}

/// True once `current` has moved past `target` along `direction`
#[inline]
pub fn passed_target(current: Vec2, target: Vec2, direction: Vec2) -> bool {
    (target - current).dot(direction) < 0.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn unit_box() -> Rect {
        Rect::from_xywh(0.0, 0.0, 10.0, 10.0)
    }

    #[test]
    fn test_bottom_center_anchor() {
        let r = Rect::from_bottom_center(Vec2::new(100.0, 800.0), Vec2::new(60.0, 20.0));
        assert_eq!(r.left(), 70.0);
        assert_eq!(r.right(), 130.0);
        assert_eq!(r.top(), 780.0);
        assert_eq!(r.bottom(), 800.0);
        assert_eq!(r.center(), Vec2::new(100.0, 790.0));
    }

    #[test]
    fn test_contains_is_inclusive() {
        let r = unit_box();
        assert!(r.contains(Vec2::new(0.0, 0.0)));
        assert!(r.contains(Vec2::new(10.0, 10.0)));
        assert!(r.contains(Vec2::new(10.0, 5.0)));
        assert!(!r.contains(Vec2::new(10.01, 5.0)));
    }

    #[test]
    fn test_circle_touching_edge_hits() {
        // Center 5 px right of the right edge, radius exactly 5
        assert!(circle_intersects_rect(Vec2::new(15.0, 5.0), 5.0, &unit_box()));
        assert!(!circle_intersects_rect(Vec2::new(15.0, 5.0), 4.99, &unit_box()));
    }

    #[test]
    fn test_circle_touching_corner() {
        // 3-4-5 triangle off the bottom-right corner
        assert!(circle_intersects_rect(Vec2::new(13.0, 14.0), 5.0, &unit_box()));
        assert!(!circle_intersects_rect(Vec2::new(13.0, 14.0), 4.9, &unit_box()));
    }

    #[test]
    fn test_center_inside_hits_with_zero_radius() {
        assert!(circle_intersects_rect(Vec2::new(3.0, 7.0), 0.0, &unit_box()));
    }

    #[test]
    fn test_point_in_circle_boundary() {
        assert!(point_in_circle(Vec2::new(3.0, 4.0), Vec2::ZERO, 5.0));
        assert!(!point_in_circle(Vec2::new(3.0, 4.1), Vec2::ZERO, 5.0));
    }

    #[test]
    fn test_passed_target() {
        let dir = Vec2::new(0.0, 1.0);
        let target = Vec2::new(0.0, 100.0);
        assert!(!passed_target(Vec2::new(0.0, 99.0), target, dir));
        // Exactly on target is not yet past it
        assert!(!passed_target(target, target, dir));
        assert!(passed_target(Vec2::new(0.0, 100.5), target, dir));
        // Lateral offset does not matter, only progress along the direction
        assert!(passed_target(Vec2::new(50.0, 101.0), target, dir));
    }

    proptest! {
        #[test]
        fn prop_center_inside_always_hits(
            x in 0.0f32..10.0,
            y in 0.0f32..10.0,
            r in 0.0f32..50.0,
        ) {
            prop_assert!(circle_intersects_rect(Vec2::new(x, y), r, &unit_box()));
        }

        #[test]
        fn prop_closest_point_stays_in_rect(x in -100.0f32..100.0, y in -100.0f32..100.0) {
            let r = unit_box();
            prop_assert!(r.contains(r.closest_point(Vec2::new(x, y))));
        }

        #[test]
        fn prop_growing_radius_never_loses_a_hit(
            x in -50.0f32..50.0,
            y in -50.0f32..50.0,
            r in 0.0f32..40.0,
            extra in 0.0f32..40.0,
        ) {
            let c = Vec2::new(x, y);
            if circle_intersects_rect(c, r, &unit_box()) {
                prop_assert!(circle_intersects_rect(c, r + extra, &unit_box()));
            }
        }
    }
}
