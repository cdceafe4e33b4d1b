//! Rat spawning
//!
//! Rats enter from a random viewport edge, just off-screen, and head for a
//! random point in the middle of the playfield so they cross the visible area.

use glam::Vec2;
use rand::Rng;

use super::state::{GameEvent, RoundState, Target};
use crate::tuning::Tuning;
use crate::{chance, direction_or_zero, random_between, random_choice};

/// Viewport edge a rat enters from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edge {
    Left,
    Right,
    Top,
    Bottom,
}

impl Edge {
    pub const ALL: [Edge; 4] = [Edge::Left, Edge::Right, Edge::Top, Edge::Bottom];

    /// Start point on this edge, `margin` outside the viewport
    pub fn start_point<R: Rng>(self, rng: &mut R, viewport: Vec2, margin: f32) -> Vec2 {
        let (w, h) = (viewport.x, viewport.y);
        match self {
            Edge::Left => Vec2::new(-margin, random_between(rng, 0.0, h)),
            Edge::Right => Vec2::new(w + margin, random_between(rng, 0.0, h)),
            Edge::Top => Vec2::new(random_between(rng, 0.0, w), -margin),
            Edge::Bottom => Vec2::new(random_between(rng, 0.0, w), h + margin),
        }
    }
}

/// Velocity from `start` toward `aim` at `speed`
pub fn aimed_velocity(start: Vec2, aim: Vec2, speed: f32) -> Vec2 {
    direction_or_zero(start, aim) * speed
}

/// Build one rat with a fresh random edge, aim point and speed
pub fn spawn_target<R: Rng>(
    rng: &mut R,
    id: super::state::TargetId,
    viewport: Vec2,
    tuning: &Tuning,
) -> Target {
    let edge = random_choice(rng, &Edge::ALL).copied().unwrap_or(Edge::Left);
    let start = edge.start_point(rng, viewport, tuning.spawn_margin);

    let aim = Vec2::new(
        random_between(rng, viewport.x * tuning.aim_band_min, viewport.x * tuning.aim_band_max),
        random_between(rng, viewport.y * tuning.aim_band_min, viewport.y * tuning.aim_band_max),
    );
    let speed = random_between(rng, tuning.rat_speed_min, tuning.rat_speed_max);

    Target {
        id,
        pos: start,
        vel: aimed_velocity(start, aim, speed),
        size: Vec2::splat(tuning.rat_size),
        alive: true,
    }
}

/// Number of rats to spawn on the next spawn tick.
///
/// One base rat, a second with probability `difficulty`, a third with
/// probability `difficulty / 2`, and on every `bonus_every`th tick one more
/// with probability `bonus_chance`.
pub fn spawn_count<R: Rng>(rng: &mut R, difficulty: f32, tick: u32, tuning: &Tuning) -> u32 {
    let mut count = 1;
    if chance(rng, difficulty) {
        count += 1;
    }
    if chance(rng, difficulty * 0.5) {
        count += 1;
    }
    if tuning.bonus_every > 0 && tick % tuning.bonus_every == 0 && chance(rng, tuning.bonus_chance) {
        count += 1;
    }
    count
}

/// Run one spawn tick against the round state. Returns how many rats spawned.
pub fn spawn_tick(state: &mut RoundState, tuning: &Tuning) -> u32 {
    let difficulty = state.difficulty(tuning.round_seconds);
    let count = spawn_count(&mut state.rng, difficulty, state.spawn_ticks, tuning);

    for _ in 0..count {
        let id = state.next_target_id();
        let target = spawn_target(&mut state.rng, id, state.viewport, tuning);
        state.events.push(GameEvent::Spawned { id, pos: target.pos });
        state.targets.push(target);
    }
    state.spawn_ticks += 1;

    log::debug!(
        "Spawn tick {}: {} rat(s), difficulty {:.2}, {} alive",
        state.spawn_ticks,
        count,
        difficulty,
        state.targets.len()
    );
    count
}
