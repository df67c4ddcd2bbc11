//! Axis-aligned rectangle geometry for bricks, the paddle and ball bounds
//!
//! Screen coordinates: x grows right, y grows down, so `top < bottom`.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// An axis-aligned rectangle given by its top-left corner and size
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(left: f32, top: f32, width: f32, height: f32) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    /// Square of side `2 * half` centered on `center`
    pub fn centered_square(center: Vec2, half: f32) -> Self {
        Self::new(center.x - half, center.y - half, 2.0 * half, 2.0 * half)
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.left + self.width
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.top + self.height
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.left + self.width / 2.0, self.top + self.height / 2.0)
    }

    /// Strict overlap test; rectangles that only share an edge do not intersect
    pub fn intersects(&self, other: &Rect) -> bool {
        self.left < other.right()
            && other.left < self.right()
            && self.top < other.bottom()
            && other.top < self.bottom()
    }

    /// Overlap along the x axis only
    pub fn overlaps_x(&self, other: &Rect) -> bool {
        self.left < other.right() && other.left < self.right()
    }

    /// Overlap along the y axis only
    pub fn overlaps_y(&self, other: &Rect) -> bool {
        self.top < other.bottom() && other.top < self.bottom()
    }

    pub fn contains_point(&self, point: Vec2) -> bool {
        point.x >= self.left && point.x < self.right() && point.y >= self.top && point.y < self.bottom()
    }

    /// True if this rectangle lies entirely inside `[0, size.x] x [0, size.y]`
    pub fn within(&self, size: Vec2) -> bool {
        self.left >= 0.0 && self.top >= 0.0 && self.right() <= size.x && self.bottom() <= size.y
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edges_and_center() {
        let r = Rect::new(90.0, 40.0, 20.0, 20.0);
        assert_eq!(r.right(), 110.0);
        assert_eq!(r.bottom(), 60.0);
        assert_eq!(r.center(), Vec2::new(100.0, 50.0));
    }

    #[test]
    fn test_touching_edges_do_not_intersect() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(10.0, 0.0, 10.0, 10.0);
        assert!(!a.intersects(&b));
        assert!(a.overlaps_y(&b));
        assert!(!a.overlaps_x(&b));

        let c = Rect::new(9.5, 9.5, 10.0, 10.0);
        assert!(a.intersects(&c));
    }

    #[test]
    fn test_centered_square() {
        let r = Rect::centered_square(Vec2::new(100.0, 50.0), 8.0);
        assert_eq!(r, Rect::new(92.0, 42.0, 16.0, 16.0));
        assert_eq!(r.center(), Vec2::new(100.0, 50.0));
    }

    #[test]
    fn test_contains_point_half_open() {
        let r = Rect::new(0.0, 0.0, 10.0, 10.0);
        assert!(r.contains_point(Vec2::new(0.0, 0.0)));
        assert!(!r.contains_point(Vec2::new(10.0, 5.0)));
    }

    #[test]
    fn test_within() {
        let size = Vec2::new(400.0, 750.0);
        assert!(Rect::new(0.0, 0.0, 400.0, 750.0).within(size));
        assert!(!Rect::new(-1.0, 0.0, 10.0, 10.0).within(size));
        assert!(!Rect::new(395.0, 0.0, 10.0, 10.0).within(size));
    }
}
