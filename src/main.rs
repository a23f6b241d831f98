//! Gesture Dash entry point
//!
//! Handles platform-specific initialization and runs the game loop. The
//! camera, the hand-landmark detector, and all drawing live in the host
//! page; this driver consumes their callbacks, runs the fixed-step
//! simulation, and pushes HUD state back into the DOM.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;

    use gesture_dash::consts::*;
    use gesture_dash::gesture::{Gesture, GestureEvent, GestureRecognizer, HandFrame};
    use gesture_dash::settings::ControlMode;
    use gesture_dash::sim::{tick, GamePhase, GameState, SimEvent, TickInput};
    use gesture_dash::{Progress, Settings};

    /// Currently-held logical keys, maintained from keydown/keyup
    #[derive(Debug, Clone, Copy, Default)]
    struct HeldKeys {
        up: bool,
        down: bool,
        left: bool,
        right: bool,
        boost: bool,
    }

    impl HeldKeys {
        /// Map a DOM key name onto a direction/boost flag
        fn set(&mut self, key: &str, held: bool) -> bool {
            match key {
                "w" | "arrowup" => self.up = held,
                "s" | "arrowdown" => self.down = held,
                "a" | "arrowleft" => self.left = held,
                "d" | "arrowright" => self.right = held,
                " " => self.boost = held,
                _ => return false,
            }
            true
        }
    }

    /// Game instance holding all state
    struct Game {
        state: GameState,
        recognizer: GestureRecognizer,
        settings: Settings,
        progress: Progress,
        keys: HeldKeys,
        /// One-shot pause request for the next tick
        pending_pause: bool,
        /// Detector pipeline came up; false means keyboard-only
        gestures_available: bool,
        accumulator: f32,
        last_time: f64,
        // FPS tracking
        frame_times: [f64; 60],
        frame_index: usize,
        fps: u32,
    }

    impl Game {
        fn new(seed: u64) -> Self {
            let settings = Settings::load();
            let recognizer = GestureRecognizer::new(settings.effective_stability_frames());
            Self {
                state: GameState::new(seed),
                recognizer,
                settings,
                progress: Progress::load(),
                keys: HeldKeys::default(),
                pending_pause: false,
                gestures_available: false,
                accumulator: 0.0,
                last_time: 0.0,
                frame_times: [0.0; 60],
                frame_index: 0,
                fps: 0,
            }
        }

        /// Assemble the tick input from keyboard flags, the confirmed
        /// gesture, and (in analog mode) the raw pointing vector
        fn build_input(&mut self) -> TickInput {
            let mut input = TickInput {
                up: self.keys.up,
                down: self.keys.down,
                left: self.keys.left,
                right: self.keys.right,
                boost: self.keys.boost,
                analog: None,
                pause: self.pending_pause,
            };
            self.pending_pause = false;

            match self.recognizer.current() {
                Some(Gesture::Up) => input.up = true,
                Some(Gesture::Down) => input.down = true,
                Some(Gesture::Left) => input.left = true,
                Some(Gesture::Right) => input.right = true,
                _ => {}
            }

            if self.settings.control_mode == ControlMode::Analog {
                if let Some(v) = self.recognizer.pointing() {
                    input.analog = Some(v.dir);
                }
            }

            input
        }

        /// Run simulation ticks for one animation frame
        fn update(&mut self, dt: f32, time: f64) {
            let dt = dt.min(0.1);
            self.accumulator += dt;

            let mut substeps = 0;
            while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
                let input = self.build_input();
                let events = tick(&mut self.state, &input);
                self.accumulator -= SIM_DT;
                substeps += 1;

                for event in events {
                    self.handle_event(event);
                }
            }

            // Track frame times for FPS
            self.frame_times[self.frame_index] = time;
            self.frame_index = (self.frame_index + 1) % 60;
            let oldest_time = self.frame_times[self.frame_index];
            if oldest_time > 0.0 {
                let elapsed = time - oldest_time;
                if elapsed > 0.0 {
                    self.fps = (60000.0 / elapsed).round() as u32;
                }
            }
        }

        /// React to a simulation event: persistence and host-page signals
        fn handle_event(&mut self, event: SimEvent) {
            match event {
                SimEvent::PlayerDied => {
                    dispatch_event("player-died", &self.state.deaths.to_string());
                }
                SimEvent::ItemCollected { points } => {
                    dispatch_event("item-collected", &points.to_string());
                }
                SimEvent::PowerUpCollected { kind } => {
                    dispatch_event("power-up-collected", kind.as_str());
                }
                SimEvent::LevelCompleted {
                    elapsed_secs,
                    deaths,
                } => {
                    let new_record =
                        self.progress.record(self.state.level, elapsed_secs, deaths);
                    self.progress.save();
                    self.save_game();
                    show_level_complete(elapsed_secs, deaths, new_record);
                    dispatch_event("level-completed", &format!("{elapsed_secs:.2}"));
                }
            }
        }

        /// A confirmed open hand acts as the menu gesture: restart a cleared
        /// level, otherwise toggle pause
        fn on_open_hand(&mut self) {
            if self.state.phase == GamePhase::LevelComplete {
                self.advance();
            } else {
                self.pending_pause = true;
            }
        }

        /// Move on after a cleared level
        fn advance(&mut self) {
            hide_level_complete();
            self.state.advance_level();
            self.save_game();
        }

        /// Update HUD elements in DOM
        fn update_hud(&self) {
            let window = web_sys::window().unwrap();
            let document = window.document().unwrap();

            let set = |id: &str, value: &str| {
                if let Some(el) = document.get_element_by_id(id) {
                    el.set_text_content(Some(value));
                }
            };

            set("level", &self.state.level.to_string());
            set("deaths", &self.state.deaths.to_string());
            set("time", &format!("{:.1}", self.state.level_elapsed_secs()));
            set("score", &self.state.score.to_string());
            set("combo", &self.state.combo.to_string());
            if self.settings.show_fps {
                set("fps", &self.fps.to_string());
            }

            let gesture = self
                .recognizer
                .current()
                .map(|g| g.as_str())
                .unwrap_or("none");
            set("gesture", gesture);

            // Pause overlay tracks the phase
            if let Some(el) = document.get_element_by_id("pause-overlay") {
                let class = if self.state.phase == GamePhase::Paused {
                    ""
                } else {
                    "hidden"
                };
                let _ = el.set_attribute("class", class);
            }
        }

        /// Save game state to LocalStorage
        fn save_game(&self) {
            if let Ok(json) = serde_json::to_string(&self.state) {
                if let Some(storage) = web_sys::window()
                    .and_then(|w| w.local_storage().ok())
                    .flatten()
                {
                    let _ = storage.set_item("gesture_dash_save", &json);
                    log::info!("Game saved (level {})", self.state.level);
                }
            }
        }

        /// Reset the current level for a fresh attempt
        fn restart(&mut self) {
            hide_level_complete();
            self.state.restart();
            self.recognizer.reset();
            self.keys = HeldKeys::default();
            clear_saved_game();
        }
    }

    thread_local! {
        static GAME: RefCell<Option<Rc<RefCell<Game>>>> = const { RefCell::new(None) };
    }

    fn with_game(f: impl FnOnce(&mut Game)) {
        GAME.with(|cell| {
            if let Some(game) = cell.borrow().as_ref() {
                f(&mut game.borrow_mut());
            }
        });
    }

    /// Landmark detector callback: one hand as a flat `[x0, y0, ...]`
    /// buffer of 42 coords. An empty buffer means no hand this frame.
    #[wasm_bindgen]
    pub fn on_hand_frame(coords: &[f32]) {
        with_game(|game| {
            if !game.gestures_available {
                return;
            }
            let frame = if coords.is_empty() {
                None
            } else {
                HandFrame::from_flat(coords)
            };
            let event = game.recognizer.observe(frame.as_ref());
            if let GestureEvent::Transition(Some(Gesture::OpenHand)) = event {
                game.on_open_hand();
            }
        });
    }

    /// Detector pipeline status, decided once at startup by the host page.
    /// False leaves the game fully playable on keyboard.
    #[wasm_bindgen]
    pub fn set_gestures_available(available: bool) {
        with_game(|game| {
            game.gestures_available = available;
            if !available {
                game.recognizer.reset();
                log::warn!("Gestures unavailable, falling back to keyboard-only input");
            } else {
                log::info!("Gesture pipeline active");
            }
        });
    }

    /// Camera/detector stopped: synchronously drop any held gesture state so
    /// stale input cannot leak into later ticks
    #[wasm_bindgen]
    pub fn on_detector_stopped() {
        with_game(|game| {
            game.gestures_available = false;
            game.recognizer.reset();
        });
    }

    /// Fire a DOM CustomEvent for the host page (audio/effects layer)
    fn dispatch_event(name: &str, detail: &str) {
        if let Some(document) = web_sys::window().and_then(|w| w.document()) {
            let init = web_sys::CustomEventInit::new();
            init.set_detail(&JsValue::from_str(detail));
            if let Ok(event) =
                web_sys::CustomEvent::new_with_event_init_dict(name, &init)
            {
                let _ = document.dispatch_event(&event);
            }
        }
    }

    fn show_level_complete(elapsed_secs: f32, deaths: u32, new_record: bool) {
        let document = web_sys::window().unwrap().document().unwrap();
        if let Some(el) = document.get_element_by_id("level-complete") {
            let _ = el.set_attribute("class", "");
        }
        if let Some(el) = document.get_element_by_id("completion-time") {
            el.set_text_content(Some(&format!("{elapsed_secs:.2}")));
        }
        if let Some(el) = document.get_element_by_id("total-deaths") {
            el.set_text_content(Some(&deaths.to_string()));
        }
        if let Some(el) = document.get_element_by_id("new-record") {
            let _ = el.set_attribute("class", if new_record { "" } else { "hidden" });
        }
    }

    fn hide_level_complete() {
        if let Some(document) = web_sys::window().and_then(|w| w.document()) {
            if let Some(el) = document.get_element_by_id("level-complete") {
                let _ = el.set_attribute("class", "hidden");
            }
        }
    }

    /// Clear saved game from LocalStorage
    fn clear_saved_game() {
        if let Some(storage) = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten()
        {
            let _ = storage.remove_item("gesture_dash_save");
        }
    }

    /// Load saved game from LocalStorage
    fn load_saved_game() -> Option<GameState> {
        let storage = web_sys::window()?.local_storage().ok()??;
        let json = storage.get_item("gesture_dash_save").ok()??;
        serde_json::from_str(&json).ok()
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Gesture Dash starting...");

        let seed = js_sys::Date::now() as u64;
        let mut game = Game::new(seed);

        if let Some(saved) = load_saved_game() {
            log::info!("Resuming saved game at level {}", saved.level);
            game.state = saved;
        } else {
            log::info!("New game with seed {}", seed);
        }

        let game = Rc::new(RefCell::new(game));
        GAME.with(|cell| *cell.borrow_mut() = Some(game.clone()));

        setup_input_handlers(game.clone());
        setup_buttons(game.clone());
        setup_auto_pause(game.clone());

        request_animation_frame(game);

        log::info!("Gesture Dash running!");
    }

    fn setup_input_handlers(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();

        // Keydown
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::KeyboardEvent| {
                let mut g = game.borrow_mut();
                let key = event.key().to_lowercase();
                if g.keys.set(&key, true) {
                    event.prevent_default();
                    return;
                }
                match key.as_str() {
                    "escape" => g.pending_pause = true,
                    "enter" => {
                        if g.state.phase == GamePhase::LevelComplete {
                            g.advance();
                        }
                    }
                    "r" => g.restart(),
                    _ => {}
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Keyup
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::KeyboardEvent| {
                let key = event.key().to_lowercase();
                game.borrow_mut().keys.set(&key, false);
            });
            let _ = window
                .add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_buttons(game: Rc<RefCell<Game>>) {
        let document = web_sys::window().unwrap().document().unwrap();

        if let Some(btn) = document.get_element_by_id("restart-btn") {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                game.borrow_mut().restart();
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        if let Some(btn) = document.get_element_by_id("next-level-btn") {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                let mut g = game.borrow_mut();
                if g.state.phase == GamePhase::LevelComplete {
                    g.advance();
                }
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_auto_pause(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let document = window.document().unwrap();

        // Visibility change (tab switch, minimize)
        {
            let game = game.clone();
            let document_clone = document.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                if document_clone.visibility_state() == web_sys::VisibilityState::Hidden {
                    let mut g = game.borrow_mut();
                    if g.state.phase == GamePhase::Playing {
                        g.pending_pause = true;
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
                if g.state.phase == GamePhase::Playing {
                    g.pending_pause = true;
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
        {
            let mut g = game.borrow_mut();

            let dt = if g.last_time > 0.0 {
                ((time - g.last_time) / 1000.0) as f32
            } else {
                SIM_DT
            };
            g.last_time = time;

            g.update(dt, time);
            g.update_hud();
        }

        request_animation_frame(game);
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
    log::info!("Gesture Dash (native) starting...");
    log::info!("Native mode is a headless smoke run - use `trunk serve` for the web version");

    headless_demo();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Drive the level-1 simulation for a few seconds of scripted input and
/// report what happened.
#[cfg(not(target_arch = "wasm32"))]
fn headless_demo() {
    use gesture_dash::sim::{tick, GameState, SimEvent, TickInput};

    let mut state = GameState::new(0xDA5);
    let input = TickInput {
        right: true,
        ..TickInput::default()
    };

    let mut deaths = 0u32;
    let mut collected = 0u32;
    for _ in 0..600 {
        for event in tick(&mut state, &input) {
            match event {
                SimEvent::PlayerDied => deaths += 1,
                SimEvent::ItemCollected { .. } => collected += 1,
                _ => {}
            }
        }
    }

    println!(
        "600 ticks: player at ({:.1}, {:.1}), {} deaths, {} pickups, score {}",
        state.player.rect.x, state.player.rect.y, deaths, collected, state.score
    );
}
