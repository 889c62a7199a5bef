//! Axis-aligned bounds for hit testing

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// A rectangle described by its center and half extents
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub center: Vec2,
    pub half_extents: Vec2,
}

impl Bounds {
    pub fn new(center: Vec2, half_extents: Vec2) -> Self {
        Self {
            center,
            half_extents: half_extents.abs(),
        }
    }

    /// Bounds of a sprite with the given unscaled size drawn at `scale`
    pub fn from_sprite(center: Vec2, size: Vec2, scale: f32) -> Self {
        Self::new(center, size * scale / 2.0)
    }

    pub fn min(&self) -> Vec2 {
        self.center - self.half_extents
    }

    pub fn max(&self) -> Vec2 {
        self.center + self.half_extents
    }

    /// Edges are inclusive
    pub fn contains_point(&self, point: Vec2) -> bool {
        let d = (point - self.center).abs();
        d.x <= self.half_extents.x && d.y <= self.half_extents.y
    }

    /// True if the two rectangles share any interior area
    pub fn overlaps(&self, other: &Bounds) -> bool {
        let d = (self.center - other.center).abs();
        let reach = self.half_extents + other.half_extents;
        d.x < reach.x && d.y < reach.y
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contains_point() {
        let b = Bounds::new(Vec2::new(750.0, 50.0), Vec2::new(36.0, 36.0));
        assert!(b.contains_point(Vec2::new(750.0, 50.0)));
        assert!(b.contains_point(Vec2::new(786.0, 14.0)));
        assert!(!b.contains_point(Vec2::new(700.0, 50.0)));
        assert!(!b.contains_point(Vec2::new(750.0, 90.0)));
    }

    #[test]
    fn test_from_sprite_scales() {
        let b = Bounds::from_sprite(Vec2::ZERO, Vec2::new(100.0, 50.0), 0.5);
        assert_eq!(b.half_extents, Vec2::new(25.0, 12.5));
        assert_eq!(b.min(), Vec2::new(-25.0, -12.5));
        assert_eq!(b.max(), Vec2::new(25.0, 12.5));
    }

    #[test]
    fn test_overlaps_excludes_touching_edges() {
        let a = Bounds::new(Vec2::ZERO, Vec2::splat(10.0));
        let b = Bounds::new(Vec2::new(15.0, 0.0), Vec2::splat(10.0));
        let c = Bounds::new(Vec2::new(20.0, 0.0), Vec2::splat(10.0));
        assert!(a.overlaps(&b));
        assert!(!a.overlaps(&c));
    }
}
