//! Simulation module
//!
//! All gameplay logic lives here. This module must stay free of I/O:
//! - Seeded RNG only
//! - Stable iteration order (spawn order)
//! - No rendering or platform dependencies; effects are reported as events

pub mod collision;
pub mod input;
pub mod rect;
pub mod spawn;
pub mod state;
pub mod tick;

pub use collision::{Contact, classify, is_beyond, rects_overlap};
pub use input::pointer_moved;
pub use rect::Rect;
pub use spawn::{Edge, aimed_velocity, spawn_count, spawn_target, spawn_tick};
pub use state::{
    GameEvent, Pursuer, RoundPhase, RoundState, Target, TargetId, difficulty_factor,
};
pub use tick::{advance, clamp_frame_dt};
