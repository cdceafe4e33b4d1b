//! Cat Chase entry point
//!
//! On the web this wires DOM events and browser clocks to a [`Round`]; natively
//! it plays one headless round with a simple autopilot.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;

    use glam::Vec2;
    use wasm_bindgen::prelude::*;
    use web_sys::{AddEventListenerOptions, Document, MouseEvent, TouchEvent, Window};

    use cat_chase::renderer::DomPresenter;
    use cat_chase::{Round, Tuning};

    /// Host timer period for the spawn/countdown pump (ms)
    const PUMP_INTERVAL_MS: i32 = 100;

    type Game = Rc<RefCell<Round<DomPresenter>>>;

    pub fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info)
            .map_err(|e| JsValue::from_str(&format!("logger init failed: {e}")))?;

        log::info!("Cat Chase starting...");

        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
        let document = window
            .document()
            .ok_or_else(|| JsValue::from_str("no document"))?;

        let tuning = load_tuning(&document);
        let presenter = DomPresenter::new(document.clone(), tuning.catch_feedback_ms)?;
        let seed = js_sys::Date::now() as u64;
        let game: Game = Rc::new(RefCell::new(Round::new(
            tuning,
            viewport_size(&window),
            seed,
            presenter,
        )));

        log::info!("Game initialized with seed: {}", seed);

        setup_pointer_handlers(&window, game.clone())?;
        setup_buttons(&document, game.clone())?;
        setup_resize(&window, game.clone())?;
        setup_timer_pump(&window, game.clone())?;
        request_animation_frame(game);

        log::info!("Cat Chase running!");
        Ok(())
    }

    /// Optional `<script id="tuning" type="application/json">` overrides
    fn load_tuning(document: &Document) -> Tuning {
        let Some(json) = document
            .get_element_by_id("tuning")
            .and_then(|el| el.text_content())
        else {
            return Tuning::default();
        };
        match Tuning::from_json(&json) {
            Ok(tuning) => {
                log::info!("Loaded tuning overrides");
                tuning
            }
            Err(e) => {
                log::warn!("Ignoring malformed tuning JSON: {}", e);
                Tuning::default()
            }
        }
    }

    fn viewport_size(window: &Window) -> Vec2 {
        let w = window.inner_width().ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
        let h = window.inner_height().ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
        Vec2::new(w as f32, h as f32)
    }

    fn now_ms() -> f64 {
        web_sys::window()
            .and_then(|w| w.performance())
            .map(|p| p.now())
            .unwrap_or_else(js_sys::Date::now)
    }

    fn setup_pointer_handlers(window: &Window, game: Game) -> Result<(), JsValue> {
        // Mouse move
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                game.borrow_mut()
                    .pointer_moved(event.client_x() as f32, event.client_y() as f32);
            });
            window.add_event_listener_with_callback("mousemove", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        // Touch start and move feed the same pointer path
        let options = AddEventListenerOptions::new();
        options.set_passive(true);
        for event_name in ["touchstart", "touchmove"] {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                if let Some(touch) = event.touches().get(0) {
                    game.borrow_mut()
                        .pointer_moved(touch.client_x() as f32, touch.client_y() as f32);
                }
            });
            window.add_event_listener_with_callback_and_add_event_listener_options(
                event_name,
                closure.as_ref().unchecked_ref(),
                &options,
            )?;
            closure.forget();
        }
        Ok(())
    }

    fn setup_buttons(document: &Document, game: Game) -> Result<(), JsValue> {
        for id in ["startBtn", "restart"] {
            let Some(btn) = document.get_element_by_id(id) else {
                log::warn!("Missing #{} button", id);
                continue;
            };
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                game.borrow_mut().restart(now_ms());
            });
            btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }
        Ok(())
    }

    fn setup_resize(window: &Window, game: Game) -> Result<(), JsValue> {
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            if let Some(window) = web_sys::window() {
                let size = viewport_size(&window);
                game.borrow_mut().viewport_resized(size.x, size.y);
            }
        });
        window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref())?;
        closure.forget();
        Ok(())
    }

    /// Keeps spawn and countdown ticking while animation frames are throttled
    fn setup_timer_pump(window: &Window, game: Game) -> Result<(), JsValue> {
        let closure = Closure::<dyn FnMut()>::new(move || {
            game.borrow_mut().pump_timers(now_ms());
        });
        window.set_interval_with_callback_and_timeout_and_arguments_0(
            closure.as_ref().unchecked_ref(),
            PUMP_INTERVAL_MS,
        )?;
        closure.forget();
        Ok(())
    }

    fn request_animation_frame(game: Game) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |time: f64| {
            game_loop(game, time);
        });
        if window
            .request_animation_frame(closure.as_ref().unchecked_ref())
            .is_err()
        {
            log::error!("requestAnimationFrame failed, game loop stopped");
        }
        closure.forget();
    }

    fn game_loop(game: Game, time: f64) {
        {
            let mut round = game.borrow_mut();
            round.pump_timers(time);
            round.frame(time);
        }

        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    if let Err(e) = wasm_game::run() {
        log::error!("Startup failed: {:?}", e);
        web_sys::console::error_1(&e);
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use cat_chase::renderer::LogPresenter;
    use cat_chase::sim::RoundPhase;
    use cat_chase::{Round, Tuning};
    use glam::Vec2;

    env_logger::init();
    log::info!("Cat Chase (native) starting...");
    log::info!("Native mode plays a headless autopilot round - build for wasm32 to play");

    let mut args = std::env::args().skip(1);
    let seed = args.next().and_then(|s| s.parse().ok()).unwrap_or(12345);
    let tuning = args.next().map(|path| load_tuning(&path)).unwrap_or_default();

    let mut round = Round::new(tuning, Vec2::new(1280.0, 720.0), seed, LogPresenter::new());
    round.start(0.0);

    let frame_ms = 1000.0 / 60.0;
    let mut now = 0.0;
    while round.phase() == RoundPhase::Running {
        if let Some(aim) = nearest_rat(round.state()) {
            round.pointer_moved(aim.x, aim.y);
        }
        round.pump_timers(now);
        round.frame(now);
        now += frame_ms;
    }

    println!(
        "Seed {}: caught {} rat(s) in {:.1}s",
        seed,
        round.score(),
        now / 1000.0
    );
}

/// Centre of the rat closest to the cat
#[cfg(not(target_arch = "wasm32"))]
fn nearest_rat(state: &cat_chase::sim::RoundState) -> Option<glam::Vec2> {
    let cat = state.pursuer.pos;
    state
        .targets
        .iter()
        .map(|rat| rat.bounds().center())
        .min_by(|a, b| {
            a.distance_squared(cat)
                .partial_cmp(&b.distance_squared(cat))
                .unwrap_or(std::cmp::Ordering::Equal)
        })
}

#[cfg(not(target_arch = "wasm32"))]
fn load_tuning(path: &str) -> cat_chase::Tuning {
    let parsed = std::fs::read_to_string(path)
        .map_err(|e| e.to_string())
        .and_then(|json| cat_chase::Tuning::from_json(&json).map_err(|e| e.to_string()));
    match parsed {
        Ok(tuning) => {
            log::info!("Loaded tuning from {}", path);
            tuning
        }
        Err(e) => {
            log::warn!("Using default tuning ({}): {}", path, e);
            cat_chase::Tuning::default()
        }
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
