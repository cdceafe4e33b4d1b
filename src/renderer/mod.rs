//! Presentation layer
//!
//! The round controller talks to the screen only through [`Presenter`].
//! Visuals are looked up by [`EntityId`]; a presenter creates a visual the
//! first time it is asked to render an id it has not seen.

#[cfg(target_arch = "wasm32")]
pub mod dom;
pub mod log_presenter;
#[cfg(test)]
pub(crate) mod recording;

#[cfg(target_arch = "wasm32")]
pub use dom::DomPresenter;
pub use log_presenter::LogPresenter;

use glam::Vec2;

use crate::sim::TargetId;

/// Something with a visual on screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityId {
    /// The cat
    Pursuer,
    /// A rat
    Target(TargetId),
}

/// Presentation collaborator invoked by the round controller
pub trait Presenter {
    /// Place an entity's visual with its top-left corner at `(x, y)`
    fn render_entity_at(&mut self, entity: EntityId, x: f32, y: f32);

    /// Brief acknowledgment of a catch at `(x, y)`; the presenter removes the
    /// visual itself once the feedback is over
    fn show_catch_feedback(&mut self, entity: EntityId, x: f32, y: f32);

    /// Detach an entity's visual immediately
    fn remove_entity_visual(&mut self, entity: EntityId);

    fn update_score_display(&mut self, score: u32);

    fn update_timer_display(&mut self, seconds_remaining: u32);

    fn show_round_end_overlay(&mut self, final_score: u32);

    fn hide_overlay(&mut self);

    /// Rendered size of an entity, when it differs from its logical size.
    ///
    /// Collision bounds use this size if present.
    fn entity_size(&self, _entity: EntityId) -> Option<Vec2> {
        None
    }
}

/// HUD score text
pub fn score_text(score: u32) -> String {
    format!("Score: {}", score)
}

/// End-of-round message
pub fn final_message(score: u32) -> String {
    let plural = if score == 1 { "" } else { "s" };
    format!("You caught {} rat{}.", score, plural)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_final_message_plural() {
        assert_eq!(final_message(0), "You caught 0 rats.");
        assert_eq!(final_message(1), "You caught 1 rat.");
        assert_eq!(final_message(12), "You caught 12 rats.");
    }

    #[test]
    fn test_score_text() {
        assert_eq!(score_text(7), "Score: 7");
    }
}
