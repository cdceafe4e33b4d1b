//! Per-frame simulation step
//!
//! Advances the cat and every rat, resolves catches and escapes, and compacts
//! the rat list. Produces events instead of touching the screen.

use super::collision::{Contact, classify};
use super::state::{GameEvent, RoundState};
use crate::clamp_to_viewport;
use crate::tuning::Tuning;

/// Clamp a raw frame delta into `[0, max_dt]`
pub fn clamp_frame_dt(dt: f32, max_dt: f32) -> f32 {
    if dt.is_finite() { dt.clamp(0.0, max_dt) } else { 0.0 }
}

/// Advance the round by `dt` seconds. Returns the number of catches.
pub fn advance(state: &mut RoundState, tuning: &Tuning, dt: f32) -> u32 {
    let dt = clamp_frame_dt(dt, tuning.max_frame_dt);

    // Cat chases the pointer
    state.pursuer.move_toward_target(dt, tuning.arrive_epsilon);
    state.pursuer.pos = clamp_to_viewport(state.pursuer.pos, state.viewport);

    let cat_bounds = state.pursuer.bounds();
    let viewport = state.viewport;
    let mut caught = 0;

    for rat in state.targets.iter_mut().filter(|r| r.alive) {
        rat.pos += rat.vel * dt;

        match classify(&cat_bounds, &rat.bounds(), viewport, tuning.remove_margin) {
            Contact::Caught => {
                rat.alive = false;
                caught += 1;
                state.events.push(GameEvent::Caught {
                    id: rat.id,
                    pos: rat.pos,
                });
            }
            Contact::Escaped => {
                rat.alive = false;
                state.events.push(GameEvent::Escaped { id: rat.id });
            }
            Contact::None => {}
        }
    }

    state.score = state.score.saturating_add(caught);
    state.targets.retain(|r| r.alive);

    if caught > 0 {
        log::debug!("Caught {} rat(s), score {}", caught, state.score);
    }
    caught
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::Target;
    use glam::Vec2;

    const VIEWPORT: Vec2 = Vec2::new(1280.0, 720.0);

    fn state() -> RoundState {
        RoundState::new(12345, VIEWPORT, &Tuning::default())
    }

    fn push_rat(state: &mut RoundState, pos: Vec2, vel: Vec2) -> crate::sim::state::TargetId {
        let id = state.next_target_id();
        state.targets.push(Target {
            id,
            pos,
            vel,
            size: Vec2::splat(32.0),
            alive: true,
        });
        id
    }

    #[test]
    fn test_cat_scenario_no_overshoot() {
        let mut state = state();
        state.pursuer.pos = Vec2::ZERO;
        state.pursuer.target = Vec2::new(1000.0, 0.0);
        advance(&mut state, &Tuning::default(), 0.05);
        advance(&mut state, &Tuning::default(), 0.05);
        assert!((state.pursuer.pos.x - 180.0).abs() < 1e-3);
        assert_eq!(state.pursuer.pos.y, 0.0);
    }

    #[test]
    fn test_large_dt_is_clamped() {
        let mut state = state();
        state.pursuer.pos = Vec2::ZERO;
        state.pursuer.target = Vec2::new(1000.0, 0.0);
        advance(&mut state, &Tuning::default(), 3.0);
        assert!((state.pursuer.pos.x - 90.0).abs() < 1e-3);
    }

    #[test]
    fn test_negative_and_nan_dt() {
        assert_eq!(clamp_frame_dt(-1.0, 0.05), 0.0);
        assert_eq!(clamp_frame_dt(f32::NAN, 0.05), 0.0);
        assert_eq!(clamp_frame_dt(0.016, 0.05), 0.016);
    }

    #[test]
    fn test_rat_integration_scenario() {
        let mut state = state();
        state.pursuer.pos = Vec2::new(1200.0, 50.0);
        state.pursuer.target = state.pursuer.pos;
        let vel = crate::sim::spawn::aimed_velocity(Vec2::new(-60.0, 300.0), Vec2::new(400.0, 300.0), 200.0);
        push_rat(&mut state, Vec2::new(-60.0, 300.0), vel);

        for _ in 0..20 {
            advance(&mut state, &Tuning::default(), 0.05);
        }

        assert_eq!(state.targets.len(), 1);
        let pos = state.targets[0].pos;
        assert!((pos.x - 140.0).abs() < 1e-2, "x = {}", pos.x);
        assert!((pos.y - 300.0).abs() < 1e-2);
    }

    #[test]
    fn test_catch_scores_once_and_removes() {
        let mut state = state();
        state.pursuer.pos = Vec2::new(400.0, 300.0);
        state.pursuer.target = state.pursuer.pos;
        let id = push_rat(&mut state, Vec2::new(390.0, 290.0), Vec2::new(10.0, 0.0));

        let caught = advance(&mut state, &Tuning::default(), 0.016);
        assert_eq!(caught, 1);
        assert_eq!(state.score, 1);
        assert!(state.targets.is_empty());
        let events = state.drain_events();
        assert!(matches!(events.as_slice(), [GameEvent::Caught { id: got, .. }] if *got == id));

        advance(&mut state, &Tuning::default(), 0.016);
        assert_eq!(state.score, 1);
    }

    #[test]
    fn test_touching_rat_is_not_caught() {
        let mut state = state();
        state.pursuer.pos = Vec2::new(400.0, 300.0);
        state.pursuer.target = state.pursuer.pos;
        // Cat spans x in [376, 424]; rat starts exactly at the right edge
        push_rat(&mut state, Vec2::new(424.0, 290.0), Vec2::ZERO);

        advance(&mut state, &Tuning::default(), 0.016);
        assert_eq!(state.score, 0);
        assert_eq!(state.targets.len(), 1);
    }

    #[test]
    fn test_exit_margin_scenario() {
        let mut state = state();
        state.pursuer.pos = Vec2::new(100.0, 100.0);
        state.pursuer.target = state.pursuer.pos;
        push_rat(&mut state, Vec2::new(VIEWPORT.x + 221.0, 300.0), Vec2::ZERO);
        let kept = push_rat(&mut state, Vec2::new(VIEWPORT.x + 219.0, 300.0), Vec2::ZERO);

        advance(&mut state, &Tuning::default(), 0.016);

        assert_eq!(state.score, 0);
        assert_eq!(state.targets.len(), 1);
        assert_eq!(state.targets[0].id, kept);
        assert!(state.drain_events().iter().any(|e| matches!(e, GameEvent::Escaped { .. })));
    }

    #[test]
    fn test_catch_beats_escape() {
        let mut state = state();
        // Zero removal margin: a rat just past the right edge is both
        // overlapping the cat and out of bounds
        let tuning = Tuning {
            remove_margin: 0.0,
            ..Default::default()
        };
        state.pursuer.pos = Vec2::new(VIEWPORT.x, 300.0);
        state.pursuer.target = state.pursuer.pos;
        push_rat(&mut state, Vec2::new(VIEWPORT.x + 1.0, 290.0), Vec2::ZERO);

        advance(&mut state, &tuning, 0.016);
        assert_eq!(state.score, 1);
        assert!(state.targets.is_empty());
    }

    #[test]
    fn test_cat_clamped_into_viewport() {
        let mut state = state();
        state.pursuer.pos = Vec2::new(-50.0, 900.0);
        state.pursuer.target = state.pursuer.pos;
        advance(&mut state, &Tuning::default(), 0.016);
        assert_eq!(state.pursuer.pos, Vec2::new(0.0, 720.0));
    }

    #[test]
    fn test_dead_rats_skipped() {
        let mut state = state();
        state.pursuer.pos = Vec2::new(400.0, 300.0);
        state.pursuer.target = state.pursuer.pos;
        push_rat(&mut state, Vec2::new(390.0, 290.0), Vec2::ZERO);
        state.targets[0].alive = false;

        advance(&mut state, &Tuning::default(), 0.016);
        assert_eq!(state.score, 0);
        assert!(state.targets.is_empty());
        assert!(state.drain_events().is_empty());
    }
}
