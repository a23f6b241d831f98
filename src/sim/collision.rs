//! Axis-aligned rectangle geometry and overlap tests
//!
//! Every entity in the simulation is an AABB, and one strict-inequality
//! overlap predicate serves all pair types. Rectangles that merely touch at
//! an edge do not collide; that convention is relied on by boundary-exact
//! level layouts.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// An axis-aligned rectangle in play-field space (y grows downward).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Center point of the rectangle
    #[inline]
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Move the rectangle so its center sits at `center`
    #[inline]
    pub fn set_center(&mut self, center: Vec2) {
        self.x = center.x - self.width / 2.0;
        self.y = center.y - self.height / 2.0;
    }

    /// Clamp the rectangle's origin so it stays fully inside a
    /// `bounds_w` x `bounds_h` field
    pub fn clamp_to_field(&mut self, bounds_w: f32, bounds_h: f32) {
        self.x = self.x.clamp(0.0, bounds_w - self.width);
        self.y = self.y.clamp(0.0, bounds_h - self.height);
    }
}

/// Strict AABB overlap: touching edges do NOT count as colliding.
#[inline]
pub fn collides(a: &Rect, b: &Rect) -> bool {
    a.x < b.x + b.width && a.x + a.width > b.x && a.y < b.y + b.height && a.y + a.height > b.y
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn overlapping_rects_collide() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(5.0, 5.0, 10.0, 10.0);
        assert!(collides(&a, &b));
    }

    #[test]
    fn disjoint_rects_do_not_collide() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(20.0, 0.0, 10.0, 10.0);
        assert!(!collides(&a, &b));
    }

    #[test]
    fn edge_touching_is_not_a_collision() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        // Shares the x=10 edge exactly
        let b = Rect::new(10.0, 0.0, 10.0, 10.0);
        assert!(!collides(&a, &b));
        // Shares the y=10 edge exactly
        let c = Rect::new(0.0, 10.0, 10.0, 10.0);
        assert!(!collides(&a, &c));
        // Corner contact only
        let d = Rect::new(10.0, 10.0, 10.0, 10.0);
        assert!(!collides(&a, &d));
    }

    #[test]
    fn containment_is_a_collision() {
        let outer = Rect::new(0.0, 0.0, 100.0, 100.0);
        let inner = Rect::new(40.0, 40.0, 10.0, 10.0);
        assert!(collides(&outer, &inner));
        assert!(collides(&inner, &outer));
    }

    #[test]
    fn clamp_keeps_rect_in_field() {
        let mut r = Rect::new(-5.0, 610.0, 20.0, 20.0);
        r.clamp_to_field(800.0, 600.0);
        assert_eq!(r.x, 0.0);
        assert_eq!(r.y, 580.0);
    }

    fn arb_rect() -> impl Strategy<Value = Rect> {
        (
            -500.0f32..500.0,
            -500.0f32..500.0,
            1.0f32..100.0,
            1.0f32..100.0,
        )
            .prop_map(|(x, y, w, h)| Rect::new(x, y, w, h))
    }

    proptest! {
        #[test]
        fn collision_is_symmetric(a in arb_rect(), b in arb_rect()) {
            prop_assert_eq!(collides(&a, &b), collides(&b, &a));
        }

        #[test]
        fn rect_never_misses_itself(a in arb_rect()) {
            prop_assert!(collides(&a, &a));
        }

        #[test]
        fn separated_on_x_never_collides(a in arb_rect(), b in arb_rect()) {
            let mut b = b;
            b.x = a.x + a.width; // touching or beyond
            prop_assert!(!collides(&a, &b));
        }
    }
}
