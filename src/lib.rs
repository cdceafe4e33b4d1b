//! Cat Chase - a 60 second cat-and-rats arcade game
//!
//! Core modules:
//! - `sim`: Simulation (spawning, motion, collisions, round state)
//! - `round`: Round controller state machine driving the simulation
//! - `platform`: Tick sources (frame clock, fixed intervals)
//! - `renderer`: Presentation collaborator trait and implementations
//! - `tuning`: Data-driven game balance

pub mod platform;
pub mod renderer;
pub mod round;
pub mod sim;
pub mod tuning;

pub use renderer::{EntityId, Presenter};
pub use round::Round;
pub use tuning::Tuning;

use glam::Vec2;
use rand::Rng;
use rand::seq::IndexedRandom;

/// Game configuration constants
pub mod consts {
    /// Round length in seconds
    pub const ROUND_SECONDS: u32 = 60;

    /// Spawn cadence (ms between spawn ticks)
    pub const SPAWN_INTERVAL_MS: f64 = 650.0;
    /// Countdown cadence (ms between countdown ticks)
    pub const COUNTDOWN_INTERVAL_MS: f64 = 1000.0;

    /// Rats spawn this far outside the viewport edge
    pub const SPAWN_MARGIN: f32 = 60.0;
    /// Aim point band as fraction of viewport (each axis)
    pub const AIM_BAND_MIN: f32 = 0.2;
    pub const AIM_BAND_MAX: f32 = 0.8;
    /// Rat speed range (pixels/s)
    pub const RAT_SPEED_MIN: f32 = 140.0;
    pub const RAT_SPEED_MAX: f32 = 260.0;
    /// Rat bounding box edge length
    pub const RAT_SIZE: f32 = 32.0;

    /// Every Nth spawn tick may add a bonus rat
    pub const BONUS_EVERY: u32 = 7;
    pub const BONUS_CHANCE: f32 = 0.35;

    /// Rats further than this outside the viewport are removed
    pub const REMOVE_MARGIN: f32 = 220.0;

    /// Cat defaults
    pub const CAT_SPEED: f32 = 1800.0;
    pub const CAT_SIZE: f32 = 48.0;
    /// Cat is considered arrived within this distance of its target
    pub const ARRIVE_EPSILON: f32 = 0.1;

    /// Largest frame delta fed to the simulation (seconds)
    pub const MAX_FRAME_DT: f32 = 0.05;

    /// How long a caught rat stays on screen (ms)
    pub const CATCH_FEEDBACK_MS: i32 = 260;

    /// Owed interval ticks delivered per poll before the rest are dropped
    pub const SPAWN_MAX_BACKLOG: u32 = 2;
    pub const COUNTDOWN_MAX_BACKLOG: u32 = 120;
}

/// Clamp a point into the rectangle `[0, size.x] x [0, size.y]`
#[inline]
pub fn clamp_to_viewport(p: Vec2, size: Vec2) -> Vec2 {
    p.clamp(Vec2::ZERO, size.max(Vec2::ZERO))
}

/// Unit direction from `from` to `to`.
///
/// A zero-length direction is divided by 1 instead of 0, so the result is
/// `Vec2::ZERO` rather than NaN.
#[inline]
pub fn direction_or_zero(from: Vec2, to: Vec2) -> Vec2 {
    let delta = to - from;
    let magnitude = delta.length();
    let magnitude = if magnitude > 0.0 { magnitude } else { 1.0 };
    delta / magnitude
}

/// Uniform float in `[min, max)`; returns `min` when the range is empty
#[inline]
pub fn random_between<R: Rng>(rng: &mut R, min: f32, max: f32) -> f32 {
    if max <= min {
        return min;
    }
    min + rng.random::<f32>() * (max - min)
}

/// Uniform pick from a slice
#[inline]
pub fn random_choice<'a, T, R: Rng>(rng: &mut R, items: &'a [T]) -> Option<&'a T> {
    items.choose(rng)
}

/// Bernoulli trial with `p` clamped to `[0, 1]`
#[inline]
pub fn chance<R: Rng>(rng: &mut R, p: f32) -> bool {
    let p = if p.is_finite() { p.clamp(0.0, 1.0) } else { 0.0 };
    rng.random::<f32>() < p
}
