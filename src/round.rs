//! Round controller
//!
//! Owns the round state, the three tick sources (frame, spawn, countdown) and
//! the presenter. State transitions:
//!
//! `NotStarted -> Running -> Ended -> Running -> ...`
//!
//! Only `Running -> Ended` happens on its own (timer expiry). Every entry into
//! `Running` stops all tick sources before resetting state.

use glam::Vec2;

use crate::platform::{FrameClock, IntervalClock, TickSource};
use crate::renderer::{EntityId, Presenter};
use crate::sim::{self, GameEvent, RoundPhase, RoundState};
use crate::tuning::Tuning;

/// One interactive session of the game
pub struct Round<P: Presenter> {
    state: RoundState,
    tuning: Tuning,
    presenter: P,
    frame_clock: FrameClock,
    spawn_clock: IntervalClock,
    countdown_clock: IntervalClock,
}

impl<P: Presenter> Round<P> {
    /// Create a round waiting for `start`, with the cat centred in `viewport`
    pub fn new(tuning: Tuning, viewport: Vec2, seed: u64, presenter: P) -> Self {
        let tuning = tuning.validated();
        let mut round = Self {
            state: RoundState::new(seed, viewport, &tuning),
            frame_clock: FrameClock::new(tuning.max_frame_dt),
            spawn_clock: IntervalClock::new(tuning.spawn_interval_ms, tuning.spawn_max_backlog),
            countdown_clock: IntervalClock::new(
                tuning.countdown_interval_ms,
                tuning.countdown_max_backlog,
            ),
            tuning,
            presenter,
        };

        round.render_pursuer();
        round.presenter.update_score_display(round.state.score);
        round.presenter.update_timer_display(round.state.time_remaining);
        round
    }

    pub fn state(&self) -> &RoundState {
        &self.state
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    pub fn presenter(&self) -> &P {
        &self.presenter
    }

    pub fn presenter_mut(&mut self) -> &mut P {
        &mut self.presenter
    }

    pub fn phase(&self) -> RoundPhase {
        self.state.phase
    }

    pub fn score(&self) -> u32 {
        self.state.score
    }

    pub fn time_remaining(&self) -> u32 {
        self.state.time_remaining
    }

    /// True while any periodic activity is scheduled
    pub fn has_active_clocks(&self) -> bool {
        self.frame_clock.is_running()
            || self.spawn_clock.is_running()
            || self.countdown_clock.is_running()
    }

    /// Begin a fresh round. While a round is already running this is a clean
    /// reset, never a second schedule.
    pub fn start(&mut self, now_ms: f64) {
        self.stop_clocks();
        self.purge_targets();
        self.state.reset_for_round(&self.tuning);
        self.state.phase = RoundPhase::Running;

        self.presenter.update_score_display(self.state.score);
        self.presenter.update_timer_display(self.state.time_remaining);
        self.presenter.hide_overlay();
        self.render_pursuer();

        self.frame_clock.start(now_ms);
        self.spawn_clock.start(now_ms);
        self.countdown_clock.start(now_ms);

        log::info!(
            "Round started ({}s, seed {})",
            self.state.time_remaining,
            self.state.seed
        );
    }

    /// Same as [`Round::start`]
    pub fn restart(&mut self, now_ms: f64) {
        self.start(now_ms);
    }

    /// Finish the running round. No-op unless running.
    pub fn end(&mut self) {
        if self.state.phase != RoundPhase::Running {
            return;
        }
        self.state.phase = RoundPhase::Ended;
        self.stop_clocks();
        self.purge_targets();
        self.presenter.show_round_end_overlay(self.state.score);

        log::info!("Round ended with score {}", self.state.score);
    }

    /// Host frame callback
    pub fn frame(&mut self, now_ms: f64) {
        if let Some(dt) = self.frame_clock.poll(now_ms) {
            self.advance(dt);
        }
    }

    /// Host timer callback: run every spawn and countdown tick due by
    /// `now_ms`, earliest first (spawn first on ties)
    pub fn pump_timers(&mut self, now_ms: f64) {
        loop {
            let spawn_due = self.spawn_clock.next_due_ms().filter(|due| *due <= now_ms);
            let countdown_due = self.countdown_clock.next_due_ms().filter(|due| *due <= now_ms);

            let spawn_first = match (spawn_due, countdown_due) {
                (None, None) => break,
                (Some(_), None) => true,
                (None, Some(_)) => false,
                (Some(s), Some(c)) => s <= c,
            };

            if spawn_first {
                if self.spawn_clock.poll(now_ms).is_some() {
                    self.spawn_tick();
                }
            } else if self.countdown_clock.poll(now_ms).is_some() {
                self.countdown_tick();
            }
        }
    }

    /// One simulation step of `dt` seconds, with presentation updates
    pub fn advance(&mut self, dt: f32) {
        if self.state.phase != RoundPhase::Running {
            return;
        }
        self.refresh_sizes();
        let caught = sim::advance(&mut self.state, &self.tuning, dt);

        self.render_pursuer();
        self.present_events();
        for rat in &self.state.targets {
            self.presenter
                .render_entity_at(EntityId::Target(rat.id), rat.pos.x, rat.pos.y);
        }
        if caught > 0 {
            self.presenter.update_score_display(self.state.score);
        }
    }

    /// One spawn tick
    pub fn spawn_tick(&mut self) {
        if self.state.phase != RoundPhase::Running {
            return;
        }
        sim::spawn_tick(&mut self.state, &self.tuning);
        self.present_events();
    }

    /// One countdown tick; ends the round when the clock reaches zero
    pub fn countdown_tick(&mut self) {
        if self.state.phase != RoundPhase::Running {
            return;
        }
        self.state.time_remaining = self.state.time_remaining.saturating_sub(1);
        self.presenter.update_timer_display(self.state.time_remaining);
        if self.state.time_remaining == 0 {
            self.end();
        }
    }

    /// Pointer (mouse or touch) moved to `(x, y)` in viewport space
    pub fn pointer_moved(&mut self, x: f32, y: f32) {
        sim::pointer_moved(&mut self.state, x, y);
        if self.state.phase != RoundPhase::Running {
            self.render_pursuer();
        }
    }

    /// Viewport changed size. The cat is pulled inside; rats stay put.
    pub fn viewport_resized(&mut self, width: f32, height: f32) {
        self.state.resize(Vec2::new(width, height));
        self.render_pursuer();
        log::debug!("Viewport resized to {}x{}", width, height);
    }

    fn stop_clocks(&mut self) {
        self.frame_clock.stop();
        self.spawn_clock.stop();
        self.countdown_clock.stop();
    }

    fn purge_targets(&mut self) {
        for rat in self.state.targets.drain(..) {
            self.presenter.remove_entity_visual(EntityId::Target(rat.id));
        }
        self.state.events.clear();
    }

    fn render_pursuer(&mut self) {
        let top_left = self.state.pursuer.bounds().min;
        self.presenter
            .render_entity_at(EntityId::Pursuer, top_left.x, top_left.y);
    }

    /// Pick up measured sizes from the presenter for collision bounds
    fn refresh_sizes(&mut self) {
        self.state.pursuer.size = self
            .presenter
            .entity_size(EntityId::Pursuer)
            .unwrap_or(Vec2::splat(self.tuning.cat_size));
        for rat in &mut self.state.targets {
            if let Some(size) = self.presenter.entity_size(EntityId::Target(rat.id)) {
                rat.size = size;
            }
        }
    }

    fn present_events(&mut self) {
        for event in self.state.drain_events() {
            match event {
                GameEvent::Spawned { id, pos } => {
                    self.presenter
                        .render_entity_at(EntityId::Target(id), pos.x, pos.y);
                }
                GameEvent::Caught { id, pos } => {
                    self.presenter
                        .show_catch_feedback(EntityId::Target(id), pos.x, pos.y);
                }
                GameEvent::Escaped { id } => {
                    self.presenter.remove_entity_visual(EntityId::Target(id));
                }
            }
        }
    }
}
