//! Kit Drop entry point
//!
//! Handles platform-specific initialization and runs the game loop.
//! The browser shell renders the playfield as absolutely positioned DOM
//! elements and feeds sampled keyboard state into the simulation; all
//! gameplay decisions happen inside `kit_drop::sim`.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::collections::HashMap;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, Element, HtmlElement, HtmlImageElement};

    use kit_drop::audio::AudioManager;
    use kit_drop::consts::*;
    use kit_drop::settings::Settings;
    use kit_drop::sim::{GamePhase, GameState, TickInput, tick};

    /// Game instance holding all state
    struct Game {
        state: GameState,
        input: TickInput,
        audio: AudioManager,
        settings: Settings,
        last_time: f64,
        /// DOM node per live item id, diffed against the sim each frame
        item_nodes: HashMap<u32, Element>,
    }

    impl Game {
        fn new(seed: u64, settings: Settings) -> Self {
            let mut audio = AudioManager::new();
            audio.set_master_volume(settings.master_volume);
            audio.set_sfx_volume(settings.sfx_volume);
            Self {
                state: GameState::new(seed),
                input: TickInput::default(),
                audio,
                settings,
                last_time: 0.0,
                item_nodes: HashMap::new(),
            }
        }

        /// Run one simulation tick for this display frame
        fn update(&mut self, time: f64) {
            let dt_ms = if self.last_time > 0.0 {
                (time - self.last_time).clamp(0.0, 250.0)
            } else {
                0.0
            };
            self.last_time = time;

            let events = tick(&mut self.state, &self.input, dt_ms);
            for event in events {
                // Fire-and-forget feedback; failures never touch the sim
                self.audio.play_event(event);
            }

            // Clear one-shot inputs after processing
            self.input.start = false;
            self.input.pause = false;
            self.input.reset = false;
        }

        /// Sync the DOM playfield to the sim state
        fn render(&mut self, document: &Document) {
            // Player position
            if let Some(el) = document.get_element_by_id("player") {
                if let Ok(el) = el.dyn_into::<HtmlElement>() {
                    let _ = el
                        .style()
                        .set_property("left", &format!("{}px", self.state.player.x));
                }
            }

            let Some(field) = document.get_element_by_id("playfield") else {
                return;
            };

            // Create/update a node per live item
            for item in &self.state.items {
                let node = self.item_nodes.entry(item.id).or_insert_with(|| {
                    let el = document
                        .create_element("img")
                        .expect("failed to create item element");
                    let _ = el.set_attribute("class", "item");
                    if let Some(img) = el.dyn_ref::<HtmlImageElement>() {
                        img.set_src(&format!("images/{}.png", item.kind.asset_name()));
                        img.set_alt(item.kind.asset_name());
                    }
                    let _ = field.append_child(&el);
                    el
                });
                if let Some(el) = node.dyn_ref::<HtmlElement>() {
                    let style = el.style();
                    let _ = style.set_property("left", &format!("{}px", item.pos.x));
                    let _ = style.set_property("top", &format!("{}px", item.pos.y));
                }
            }

            // Drop nodes whose items were resolved this tick
            let live: Vec<u32> = self.state.items.iter().map(|i| i.id).collect();
            self.item_nodes.retain(|id, node| {
                if live.contains(id) {
                    true
                } else {
                    node.remove();
                    false
                }
            });
        }

        /// Update HUD elements and overlays in the DOM
        fn update_hud(&self, document: &Document) {
            if let Some(el) = document
                .query_selector("#hud-score .hud-value")
                .ok()
                .flatten()
            {
                el.set_text_content(Some(&self.state.score.to_string()));
            }
            if let Some(el) = document
                .query_selector("#hud-lives .hud-value")
                .ok()
                .flatten()
            {
                el.set_text_content(Some(&self.state.lives.to_string()));
            }

            set_visible(document, "start-screen", self.state.phase == GamePhase::Idle);
            set_visible(document, "pause-overlay", self.state.phase == GamePhase::Paused);

            let over = self.state.phase == GamePhase::GameOver;
            set_visible(document, "game-over", over);
            if over {
                if let Some(el) = document.get_element_by_id("final-score") {
                    el.set_text_content(Some(&self.state.score.to_string()));
                }
                if let Some(el) = document.get_element_by_id("final-lives") {
                    el.set_text_content(Some(&self.state.lives.to_string()));
                }
            }
        }
    }

    fn set_visible(document: &Document, id: &str, visible: bool) {
        if let Some(el) = document.get_element_by_id(id) {
            let _ = el.set_attribute("class", if visible { "" } else { "hidden" });
        }
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Kit Drop starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let settings = Settings::load();
        let seed = js_sys::Date::now() as u64;
        let game = Rc::new(RefCell::new(Game::new(seed, settings)));

        log::info!("Game initialized with seed: {}", seed);

        setup_keyboard(game.clone());
        setup_buttons(&document, game.clone());
        setup_focus_handlers(game.clone());

        request_animation_frame(game);

        log::info!("Kit Drop running!");
    }

    fn setup_keyboard(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();

        // Held-key flags: set on keydown, cleared on keyup, sampled per tick
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::KeyboardEvent| {
                let mut g = game.borrow_mut();
                match event.key().as_str() {
                    "ArrowLeft" => g.input.move_left = true,
                    "ArrowRight" => g.input.move_right = true,
                    "Escape" => g.input.pause = true,
                    " " | "Enter" => {
                        if g.state.phase == GamePhase::Idle {
                            g.input.start = true;
                            g.audio.resume();
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
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::KeyboardEvent| {
                let mut g = game.borrow_mut();
                match event.key().as_str() {
                    "ArrowLeft" => g.input.move_left = false,
                    "ArrowRight" => g.input.move_right = false,
                    _ => {}
                }
            });
            let _ =
                window.add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_buttons(document: &Document, game: Rc<RefCell<Game>>) {
        // Start button on the idle overlay
        if let Some(btn) = document.get_element_by_id("start-btn") {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                let mut g = game.borrow_mut();
                g.input.start = true;
                // Audio needs a user gesture to unlock
                g.audio.resume();
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Play-again button on the game-over overlay: full reinit + restart
        if let Some(btn) = document.get_element_by_id("replay-btn") {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                let mut g = game.borrow_mut();
                g.input.reset = true;
                g.input.start = true;
                log::info!("Replay requested");
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Resume button on the pause overlay
        if let Some(btn) = document.get_element_by_id("resume-btn") {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                game.borrow_mut().input.pause = true;
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_focus_handlers(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let document = window.document().unwrap();

        // Auto-pause when the tab is hidden
        {
            let game = game.clone();
            let document_clone = document.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                if document_clone.visibility_state() == web_sys::VisibilityState::Hidden {
                    let mut g = game.borrow_mut();
                    if g.settings.pause_on_hidden && g.state.phase == GamePhase::Running {
                        g.input.pause = true;
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

        // Mute while the window is unfocused
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
                let mut g = game.borrow_mut();
                if g.settings.mute_on_blur {
                    g.audio.set_muted(true);
                }
            });
            let _ =
                window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref());
            closure.forget();
        }
        {
            let window = web_sys::window().unwrap();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
                game.borrow_mut().audio.set_muted(false);
            });
            let _ =
                window.add_event_listener_with_callback("focus", closure.as_ref().unchecked_ref());
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
        {
            let window = web_sys::window().unwrap();
            let document = window.document().unwrap();
            let mut g = game.borrow_mut();
            g.update(time);
            g.render(&document);
            g.update_hud(&document);
        }

        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_game::run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use kit_drop::sim::{GamePhase, GameState, TickInput, tick};

    env_logger::init();
    log::info!("Kit Drop (native) starting...");
    log::info!("Native mode runs a headless smoke session - use the web build to play");

    // Headless smoke run: ~30 seconds of unattended play at 60 Hz
    let mut state = GameState::new(0xC0FFEE);
    let start = TickInput {
        start: true,
        ..Default::default()
    };
    tick(&mut state, &start, 0.0);

    let input = TickInput::default();
    let mut ticks = 0u32;
    while state.phase == GamePhase::Running && ticks < 30 * 60 {
        tick(&mut state, &input, 1000.0 / 60.0);
        ticks += 1;
    }

    log::info!(
        "Smoke session done after {} ticks: phase {:?}, score {}, lives {}, {} items live",
        ticks,
        state.phase,
        state.score,
        state.lives,
        state.items.len()
    );
}
