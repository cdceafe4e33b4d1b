//! DOM presenter
//!
//! Cat and rats are positioned elements inside the `#game` area; the HUD and
//! overlay are plain text elements. Expected page structure:
//! `#game`, `#cat`, `#score`, `#timer`, `#restart`, `#overlay` (with `h1`
//! and `p`), `#startBtn`.

use std::collections::HashMap;

use glam::Vec2;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, HtmlElement};

use super::{EntityId, Presenter, final_message, score_text};
use crate::sim::TargetId;

const RAT_EMOJI: &str = "🐭";

pub struct DomPresenter {
    document: Document,
    game_area: HtmlElement,
    cat: HtmlElement,
    score: Option<Element>,
    timer: Option<Element>,
    restart_button: Option<HtmlElement>,
    overlay: Option<HtmlElement>,
    start_button: Option<Element>,
    rats: HashMap<TargetId, HtmlElement>,
    feedback_ms: i32,
}

impl DomPresenter {
    /// Look up the page elements. `#game` and `#cat` are required.
    pub fn new(document: Document, feedback_ms: i32) -> Result<Self, JsValue> {
        let game_area = html_by_id(&document, "game")
            .ok_or_else(|| JsValue::from_str("missing #game element"))?;
        let cat = html_by_id(&document, "cat")
            .ok_or_else(|| JsValue::from_str("missing #cat element"))?;

        let optional = |id: &str| {
            let el = document.get_element_by_id(id);
            if el.is_none() {
                log::warn!("Missing #{} element, skipping its updates", id);
            }
            el
        };
        let score = optional("score");
        let timer = optional("timer");
        let start_button = optional("startBtn");
        let restart_button = optional("restart").and_then(|e| e.dyn_into().ok());
        let overlay = optional("overlay").and_then(|e| e.dyn_into().ok());

        Ok(Self {
            document,
            game_area,
            cat,
            score,
            timer,
            restart_button,
            overlay,
            start_button,
            rats: HashMap::new(),
            feedback_ms,
        })
    }

    /// Existing rat element, or a new one appended to the game area
    fn rat_element(&mut self, id: TargetId) -> Option<HtmlElement> {
        if let Some(el) = self.rats.get(&id) {
            return Some(el.clone());
        }
        let el: HtmlElement = self.document.create_element("div").ok()?.dyn_into().ok()?;
        el.set_class_name("rat");
        el.set_text_content(Some(RAT_EMOJI));
        let _ = el.set_attribute("aria-label", "Rat");
        let _ = el.set_attribute("role", "img");
        let _ = self.game_area.append_child(&el);
        self.rats.insert(id, el.clone());
        Some(el)
    }

    fn element_for(&self, entity: EntityId) -> Option<&HtmlElement> {
        match entity {
            EntityId::Pursuer => Some(&self.cat),
            EntityId::Target(id) => self.rats.get(&id),
        }
    }
}

impl Presenter for DomPresenter {
    fn render_entity_at(&mut self, entity: EntityId, x: f32, y: f32) {
        let el = match entity {
            EntityId::Pursuer => Some(self.cat.clone()),
            EntityId::Target(id) => self.rat_element(id),
        };
        if let Some(el) = el {
            set_translate(&el, x, y);
        }
    }

    fn show_catch_feedback(&mut self, entity: EntityId, x: f32, y: f32) {
        let EntityId::Target(id) = entity else {
            return;
        };
        let Some(el) = self.rats.remove(&id) else {
            return;
        };

        let _ = el.class_list().add_1("caught");
        let style = el.style();
        let _ = style.set_property("--x", &format!("{}px", x.round()));
        let _ = style.set_property("--y", &format!("{}px", y.round()));

        let removal = Closure::once_into_js(move || el.remove());
        let scheduled = web_sys::window().and_then(|w| {
            w.set_timeout_with_callback_and_timeout_and_arguments_0(
                removal.unchecked_ref(),
                self.feedback_ms,
            )
            .ok()
        });
        if scheduled.is_none() {
            log::warn!("Could not schedule catch feedback removal");
        }
    }

    fn remove_entity_visual(&mut self, entity: EntityId) {
        if let EntityId::Target(id) = entity {
            if let Some(el) = self.rats.remove(&id) {
                el.remove();
            }
        }
    }

    fn update_score_display(&mut self, score: u32) {
        if let Some(el) = &self.score {
            el.set_text_content(Some(&score_text(score)));
        }
    }

    fn update_timer_display(&mut self, seconds_remaining: u32) {
        if let Some(el) = &self.timer {
            el.set_text_content(Some(&seconds_remaining.to_string()));
        }
    }

    fn show_round_end_overlay(&mut self, final_score: u32) {
        if let Some(btn) = &self.restart_button {
            btn.set_hidden(false);
        }
        if let Some(overlay) = &self.overlay {
            let _ = overlay.style().set_property("display", "grid");
            if let Some(h1) = overlay.query_selector("h1").ok().flatten() {
                h1.set_text_content(Some("Time's up!"));
            }
            if let Some(p) = overlay.query_selector("p").ok().flatten() {
                p.set_text_content(Some(&final_message(final_score)));
            }
        }
        if let Some(btn) = &self.start_button {
            btn.set_text_content(Some("Play again"));
        }
    }

    fn hide_overlay(&mut self) {
        if let Some(overlay) = &self.overlay {
            let _ = overlay.style().set_property("display", "none");
        }
        if let Some(btn) = &self.restart_button {
            btn.set_hidden(true);
        }
    }

    /// Measured box of the rendered emoji
    fn entity_size(&self, entity: EntityId) -> Option<Vec2> {
        let rect = self.element_for(entity)?.get_bounding_client_rect();
        let size = Vec2::new(rect.width() as f32, rect.height() as f32);
        (size.x > 0.0 && size.y > 0.0).then_some(size)
    }
}

fn html_by_id(document: &Document, id: &str) -> Option<HtmlElement> {
    document.get_element_by_id(id)?.dyn_into().ok()
}

fn set_translate(el: &HtmlElement, x: f32, y: f32) {
    let _ = el.style().set_property(
        "transform",
        &format!("translate({}px, {}px)", x.round(), y.round()),
    );
}
