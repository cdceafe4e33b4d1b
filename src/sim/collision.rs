//! Collision detection between cat and rats
//!
//! Overlap is strict on both axes: rectangles that only share an edge or a
//! corner do not collide.

use glam::Vec2;

use super::rect::Rect;

/// Strict axis-aligned overlap test (symmetric)
#[inline]
pub fn rects_overlap(a: &Rect, b: &Rect) -> bool {
    let (a_max, b_max) = (a.max(), b.max());
    a.min.x < b_max.x && a_max.x > b.min.x && a.min.y < b_max.y && a_max.y > b.min.y
}

/// Outcome of testing one rat against the cat and the playfield
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Contact {
    /// Overlaps the cat
    Caught,
    /// Wandered too far outside the viewport
    Escaped,
    None,
}

/// Classify a rat. Catching wins over escaping when both apply.
pub fn classify(cat: &Rect, rat: &Rect, viewport: Vec2, remove_margin: f32) -> Contact {
    if rects_overlap(cat, rat) {
        Contact::Caught
    } else if is_beyond(rat.min, viewport, remove_margin) {
        Contact::Escaped
    } else {
        Contact::None
    }
}

/// True when `pos` lies more than `margin` outside `[0, viewport]` on any side
#[inline]
pub fn is_beyond(pos: Vec2, viewport: Vec2, margin: f32) -> bool {
    pos.x < -margin || pos.x > viewport.x + margin || pos.y < -margin || pos.y > viewport.y + margin
}
