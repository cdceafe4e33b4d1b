//! Pointer input
//!
//! Mouse moves, touch starts and touch moves all arrive here as a single
//! viewport-space point.

use glam::Vec2;

use super::state::{RoundPhase, RoundState};
use crate::clamp_to_viewport;

/// Point the cat at `(x, y)`.
///
/// Outside a running round the cat is also placed there immediately, so it
/// starts under the pointer instead of sliding in.
pub fn pointer_moved(state: &mut RoundState, x: f32, y: f32) -> Vec2 {
    let raw = Vec2::new(x, y);
    let point = if raw.is_finite() {
        clamp_to_viewport(raw, state.viewport)
    } else {
        state.pursuer.target
    };

    state.pursuer.target = point;
    if state.phase != RoundPhase::Running {
        state.pursuer.pos = point;
    }
    point
}
