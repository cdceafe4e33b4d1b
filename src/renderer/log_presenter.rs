//! Headless presenter that writes presentation calls to the log
//!
//! Used by the native binary, where there is no screen.

use super::{EntityId, Presenter, final_message, score_text};

#[derive(Debug, Default)]
pub struct LogPresenter {
    /// Catches shown so far
    pub catches_shown: u32,
    /// Last timer value displayed
    pub last_timer: Option<u32>,
}

impl LogPresenter {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Presenter for LogPresenter {
    fn render_entity_at(&mut self, entity: EntityId, x: f32, y: f32) {
        log::trace!("render {:?} at ({:.0}, {:.0})", entity, x, y);
    }

    fn show_catch_feedback(&mut self, entity: EntityId, x: f32, y: f32) {
        self.catches_shown += 1;
        log::debug!("caught {:?} at ({:.0}, {:.0})", entity, x, y);
    }

    fn remove_entity_visual(&mut self, entity: EntityId) {
        log::trace!("remove {:?}", entity);
    }

    fn update_score_display(&mut self, score: u32) {
        log::debug!("{}", score_text(score));
    }

    fn update_timer_display(&mut self, seconds_remaining: u32) {
        self.last_timer = Some(seconds_remaining);
        if seconds_remaining % 10 == 0 {
            log::info!("{}s remaining", seconds_remaining);
        }
    }

    fn show_round_end_overlay(&mut self, final_score: u32) {
        log::info!("Time's up! {}", final_message(final_score));
    }

    fn hide_overlay(&mut self) {
        log::debug!("overlay hidden");
    }
}
