//! Presenter that records every call, for controller tests

use glam::Vec2;
use std::collections::HashMap;

use super::{EntityId, Presenter};

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Render(EntityId, f32, f32),
    CatchFeedback(EntityId, f32, f32),
    Remove(EntityId),
    Score(u32),
    Timer(u32),
    EndOverlay(u32),
    HideOverlay,
}

#[derive(Debug, Default)]
pub struct RecordingPresenter {
    pub calls: Vec<Call>,
    /// Sizes reported through `entity_size`
    pub sizes: HashMap<EntityId, Vec2>,
}

impl RecordingPresenter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn count(&self, pred: impl Fn(&Call) -> bool) -> usize {
        self.calls.iter().filter(|c| pred(*c)).count()
    }

    pub fn last_score(&self) -> Option<u32> {
        self.calls.iter().rev().find_map(|c| match c {
            Call::Score(s) => Some(*s),
            _ => None,
        })
    }

    pub fn last_timer(&self) -> Option<u32> {
        self.calls.iter().rev().find_map(|c| match c {
            Call::Timer(t) => Some(*t),
            _ => None,
        })
    }
}

impl Presenter for RecordingPresenter {
    fn render_entity_at(&mut self, entity: EntityId, x: f32, y: f32) {
        self.calls.push(Call::Render(entity, x, y));
    }

    fn show_catch_feedback(&mut self, entity: EntityId, x: f32, y: f32) {
        self.calls.push(Call::CatchFeedback(entity, x, y));
    }

    fn remove_entity_visual(&mut self, entity: EntityId) {
        self.calls.push(Call::Remove(entity));
    }

    fn update_score_display(&mut self, score: u32) {
        self.calls.push(Call::Score(score));
    }

    fn update_timer_display(&mut self, seconds_remaining: u32) {
        self.calls.push(Call::Timer(seconds_remaining));
    }

    fn show_round_end_overlay(&mut self, final_score: u32) {
        self.calls.push(Call::EndOverlay(final_score));
    }

    fn hide_overlay(&mut self) {
        self.calls.push(Call::HideOverlay);
    }

    fn entity_size(&self, entity: EntityId) -> Option<Vec2> {
        self.sizes.get(&entity).copied()
    }
}
