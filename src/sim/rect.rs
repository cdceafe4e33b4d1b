//! Axis-aligned rectangles for entity bounds
//!
//! A rectangle is stored as its top-left corner plus size, matching how
//! visuals are positioned on screen (y grows downward).

use glam::Vec2;

/// An axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    /// Top-left corner
    pub min: Vec2,
    /// Width and height (non-negative)
    pub size: Vec2,
}

impl Rect {
    pub fn new(min: Vec2, size: Vec2) -> Self {
        Self {
            min,
            size: size.max(Vec2::ZERO),
        }
    }

    /// Rectangle of `size` centred on `center`
    pub fn centered(center: Vec2, size: Vec2) -> Self {
        let size = size.max(Vec2::ZERO);
        Self::new(center - size / 2.0, size)
    }

    /// Square with top-left corner `min` and edge length `edge`
    pub fn square(min: Vec2, edge: f32) -> Self {
        Self::new(min, Vec2::splat(edge))
    }

    /// Bottom-right corner
    #[inline]
    pub fn max(&self) -> Vec2 {
        self.min + self.size
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.min + self.size / 2.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_centered() {
        let r = Rect::centered(Vec2::new(100.0, 50.0), Vec2::new(40.0, 20.0));
        assert_eq!(r.min, Vec2::new(80.0, 40.0));
        assert_eq!(r.max(), Vec2::new(120.0, 60.0));
        assert_eq!(r.center(), Vec2::new(100.0, 50.0));
    }

    #[test]
    fn test_negative_size_collapses() {
        let r = Rect::new(Vec2::ZERO, Vec2::new(-5.0, 10.0));
        assert_eq!(r.size, Vec2::new(0.0, 10.0));
    }
}
