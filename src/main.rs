//! Neon Racer entry point
//!
//! Browser host: registers the per-frame callback, captures the keyboard and
//! touch intent snapshot, feeds the frame clock, and publishes HUD state.
//! Rendering and audio hang off the same state and event stream but live
//! outside the core.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{KeyboardEvent, TouchEvent};

    use neon_racer::consts::FIXED_STEP_MS;
    use neon_racer::sim::{FrameClock, GameEvent, TickInput, World};
    use neon_racer::{GameData, Settings};

    /// Game instance holding all state
    struct Game {
        world: World,
        clock: FrameClock,
        input: TickInput,
        game_data: GameData,
        #[allow(dead_code)]
        settings: Settings,
    }

    impl Game {
        fn new(seed: u64) -> Self {
            Self {
                world: World::new(seed),
                clock: FrameClock::new(),
                input: TickInput::default(),
                game_data: GameData::load(),
                settings: Settings::load(),
            }
        }

        /// Run one frame: variable-step gameplay plus the fixed-step drain
        fn frame(&mut self, now_ms: f64) {
            let Some(timing) = self.clock.frame(now_ms) else {
                return;
            };

            let events = self.world.advance(self.input, timing.delta_ms);
            for _ in 0..timing.fixed_steps {
                self.world.fixed_update(FIXED_STEP_MS);
            }

            for event in &events {
                self.handle_event(event);
            }
        }

        fn handle_event(&mut self, event: &GameEvent) {
            match event {
                GameEvent::RunEnded { .. } => {
                    if let Some(summary) = self.world.finish_run() {
                        let new_best = self.game_data.record_run(&summary);
                        self.game_data.save();
                        if new_best {
                            log::info!("New high score: {}", summary.score);
                        }
                        show_game_over(&summary, new_best);
                    }
                }
                GameEvent::RunStarted => {
                    log::info!("Run started");
                }
                GameEvent::LevelUp { level } => {
                    log::info!("Reached level {level}");
                }
                // Audio/particle collaborators subscribe here
                _ => {}
            }
        }

        fn toggle_pause(&mut self) {
            if self.clock.is_paused() {
                self.clock.resume();
                log::info!("Resumed");
            } else {
                self.clock.pause();
                log::info!("Paused");
            }
        }

        fn restart(&mut self, seed: u64) {
            let started = self.world.reset(seed);
            self.handle_event(&started);
            self.input = TickInput::default();
            hide_game_over();
        }

        /// Publish HUD values into the DOM
        fn update_hud(&self) {
            let Some(document) = web_sys::window().and_then(|w| w.document()) else {
                return;
            };

            let set = |id: &str, value: String| {
                if let Some(el) = document.get_element_by_id(id) {
                    el.set_text_content(Some(&value));
                }
            };

            set("hud-score", self.world.progression.score().to_string());
            set("hud-coins", self.world.progression.coins_collected().to_string());
            set("hud-level", self.world.progression.level().to_string());
            set("hud-best", self.game_data.high_score.to_string());
        }
    }

    fn show_game_over(summary: &neon_racer::sim::RunSummary, new_best: bool) {
        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            return;
        };
        if let Some(el) = document.get_element_by_id("game-over") {
            let _ = el.set_attribute("class", "");
        }
        if let Some(el) = document.get_element_by_id("final-score") {
            el.set_text_content(Some(&summary.score.to_string()));
        }
        if let Some(el) = document.get_element_by_id("final-coins") {
            el.set_text_content(Some(&summary.coins.to_string()));
        }
        if let Some(el) = document.get_element_by_id("new-best") {
            let class = if new_best { "" } else { "hidden" };
            let _ = el.set_attribute("class", class);
        }
    }

    fn hide_game_over() {
        if let Some(el) = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id("game-over"))
        {
            let _ = el.set_attribute("class", "hidden");
        }
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Neon Racer starting...");

        let seed = js_sys::Date::now() as u64;
        let game = Rc::new(RefCell::new(Game::new(seed)));
        log::info!("Run seeded with {seed}");

        setup_keyboard(game.clone());
        setup_touch(game.clone());
        setup_auto_pause(game.clone());

        game.borrow_mut().clock.start();
        request_animation_frame(game);

        log::info!("Neon Racer running");
    }

    fn setup_keyboard(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();

        // Key held = intent held; the sim sees booleans, not key events
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let mut g = game.borrow_mut();
                match event.key().as_str() {
                    "ArrowLeft" | "a" | "A" => g.input.left = true,
                    "ArrowRight" | "d" | "D" => g.input.right = true,
                    "Escape" => g.toggle_pause(),
                    "Enter" | "r" | "R" => {
                        if g.world.is_over() {
                            let seed = js_sys::Date::now() as u64;
                            g.restart(seed);
                        }
                    }
                    _ => {}
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let mut g = game.borrow_mut();
                match event.key().as_str() {
                    "ArrowLeft" | "a" | "A" => g.input.left = false,
                    "ArrowRight" | "d" | "D" => g.input.right = false,
                    _ => {}
                }
            });
            let _ =
                window.add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_touch(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let half_width = window
            .inner_width()
            .ok()
            .and_then(|v| v.as_f64())
            .unwrap_or(800.0)
            / 2.0;

        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                if let Some(touch) = event.touches().get(0) {
                    let mut g = game.borrow_mut();
                    if (touch.client_x() as f64) < half_width {
                        g.input.left = true;
                    } else {
                        g.input.right = true;
                    }
                }
            });
            let _ = window
                .add_event_listener_with_callback("touchstart", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                let mut g = game.borrow_mut();
                g.input.left = false;
                g.input.right = false;
            });
            let _ = window
                .add_event_listener_with_callback("touchend", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_auto_pause(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let document = window.document().unwrap();

        // Tab hidden - no updates may accrue while suspended
        {
            let game = game.clone();
            let document_clone = document.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                if document_clone.visibility_state() == web_sys::VisibilityState::Hidden {
                    let mut g = game.borrow_mut();
                    if !g.clock.is_paused() {
                        g.clock.pause();
                        log::info!("Auto-paused (tab hidden)");
                    }
                }
            });
            let _ = document.add_event_listener_with_callback(
                "visibilitychange",
                closure.as_ref().unchecked_ref(),
            );
            closure.forget();
        }

        // Window blur (click outside)
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
                let mut g = game.borrow_mut();
                if !g.clock.is_paused() {
                    g.clock.pause();
                    log::info!("Auto-paused (window blur)");
                }
            });
            let _ =
                window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let closure = Closure::once(move |time: f64| {
            game_loop(game, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        let keep_running = {
            let mut g = game.borrow_mut();
            g.frame(time);
            g.update_hud();
            g.clock.is_running()
        };

        // Stop leaves no dangling callback registration
        if keep_running {
            request_animation_frame(game);
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_game::run();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Neon Racer (native) starting...");
    log::info!("The game targets the browser - build with `trunk serve` for the web version");

    smoke_test();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Quick native sanity pass over the simulation core
#[cfg(not(target_arch = "wasm32"))]
fn smoke_test() {
    use neon_racer::consts::REFERENCE_TICK_MS;
    use neon_racer::sim::{TickInput, World};

    let mut world = World::new(0xC0FFEE);
    for _ in 0..600 {
        world.advance(TickInput::default(), REFERENCE_TICK_MS);
    }
    println!(
        "10s simulated: {} enemies, {} coins on field, distance {:.1}",
        world.enemies.len(),
        world.coins.len(),
        world.progression.distance()
    );
}
