//! Round state and entity records
//!
//! Everything the simulation mutates lives in [`RoundState`]; the round
//! controller owns exactly one of these.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::rect::Rect;
use crate::clamp_to_viewport;
use crate::tuning::Tuning;

/// Current phase of a round
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundPhase {
    /// Start prompt showing; cat follows the pointer, nothing spawns
    NotStarted,
    /// Clock running, rats spawning
    Running,
    /// Timer expired, waiting for restart
    Ended,
}

/// Stable identifier of a rat within a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TargetId(pub u32);

/// The player's cat
#[derive(Debug, Clone)]
pub struct Pursuer {
    /// Centre of the cat
    pub pos: Vec2,
    /// Where the pointer wants the cat to be
    pub target: Vec2,
    /// Pixels per second
    pub speed: f32,
    /// Collision box, centred on `pos`
    pub size: Vec2,
}

impl Pursuer {
    pub fn new(pos: Vec2, speed: f32, size: Vec2) -> Self {
        Self {
            pos,
            target: pos,
            speed,
            size,
        }
    }

    pub fn bounds(&self) -> Rect {
        Rect::centered(self.pos, self.size)
    }

    /// Move toward the target by at most `speed * dt`, never overshooting
    pub fn move_toward_target(&mut self, dt: f32, epsilon: f32) {
        let delta = self.target - self.pos;
        let dist = delta.length();
        if dist <= epsilon {
            return;
        }
        let step = dist.min(self.speed * dt);
        self.pos += delta / dist * step;
    }
}

/// A rat
#[derive(Debug, Clone)]
pub struct Target {
    pub id: TargetId,
    /// Top-left corner of the bounding box
    pub pos: Vec2,
    pub vel: Vec2,
    /// Bounding box width/height
    pub size: Vec2,
    pub alive: bool,
}

impl Target {
    pub fn bounds(&self) -> Rect {
        Rect::new(self.pos, self.size)
    }
}

/// Something the presentation layer should react to
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GameEvent {
    Spawned { id: TargetId, pos: Vec2 },
    Caught { id: TargetId, pos: Vec2 },
    Escaped { id: TargetId },
}

/// Complete round state
#[derive(Debug, Clone)]
pub struct RoundState {
    /// Seed the RNG was created from
    pub seed: u64,
    pub rng: Pcg32,
    pub phase: RoundPhase,
    pub score: u32,
    pub time_remaining: u32,
    /// Spawn ticks elapsed this round
    pub spawn_ticks: u32,
    /// Viewport width/height
    pub viewport: Vec2,
    pub pursuer: Pursuer,
    /// Living rats in spawn order
    pub targets: Vec<Target>,
    /// Events produced since the last drain
    pub events: Vec<GameEvent>,
    next_id: u32,
}

impl RoundState {
    pub fn new(seed: u64, viewport: Vec2, tuning: &Tuning) -> Self {
        let viewport = viewport.max(Vec2::ZERO);
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            phase: RoundPhase::NotStarted,
            score: 0,
            time_remaining: tuning.round_seconds,
            spawn_ticks: 0,
            viewport,
            pursuer: Pursuer::new(viewport / 2.0, tuning.cat_speed, Vec2::splat(tuning.cat_size)),
            targets: Vec::new(),
            events: Vec::new(),
            next_id: 1,
        }
    }

    /// Allocate a new target ID
    pub fn next_target_id(&mut self) -> TargetId {
        let id = self.next_id;
        self.next_id = self.next_id.wrapping_add(1);
        TargetId(id)
    }

    /// Reset score, clock and rats for a fresh round. The cat stays where it is.
    pub fn reset_for_round(&mut self, tuning: &Tuning) {
        self.score = 0;
        self.time_remaining = tuning.round_seconds;
        self.spawn_ticks = 0;
        self.targets.clear();
        self.events.clear();
    }

    /// 0 at round start, rising linearly to 1 when the clock runs out
    pub fn difficulty(&self, round_seconds: u32) -> f32 {
        difficulty_factor(self.time_remaining, round_seconds)
    }

    /// Adopt a new viewport size, pulling the cat back inside it
    pub fn resize(&mut self, viewport: Vec2) {
        self.viewport = viewport.max(Vec2::ZERO);
        self.pursuer.pos = clamp_to_viewport(self.pursuer.pos, self.viewport);
        self.pursuer.target = clamp_to_viewport(self.pursuer.target, self.viewport);
    }

    /// Take all pending events
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}

/// Difficulty factor in `[0, 1]`
pub fn difficulty_factor(time_remaining: u32, round_seconds: u32) -> f32 {
    if round_seconds == 0 {
        return 1.0;
    }
    let elapsed = round_seconds.saturating_sub(time_remaining) as f32;
    (elapsed / round_seconds as f32).clamp(0.0, 1.0)
}
