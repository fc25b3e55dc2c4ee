//! Rodeo Dance entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;

    use rodeo_dance::sim::{GameEvent, InputState, Session, tick_at_host_time};
    use rodeo_dance::{HudSnapshot, Tuning};

    /// Game instance holding all state
    struct Game {
        session: Session,
        input: InputState,
        last_hud: Option<HudSnapshot>,
    }

    impl Game {
        fn new(seed: u64) -> Self {
            let tuning = Tuning {
                seed,
                ..Tuning::default()
            };
            Self {
                session: Session::new(tuning),
                input: InputState::default(),
                last_hud: None,
            }
        }

        fn update(&mut self, time: f64) {
            tick_at_host_time(&mut self.session, &self.input, time);

            for event in self.session.drain_events() {
                match event {
                    GameEvent::HitFlash { dancer, duration, .. } => {
                        log::debug!("Flash dancer {} for {}s", dancer, duration);
                    }
                    GameEvent::GameOver { score, .. } => {
                        log::info!("Game over, final score {}", score.floor());
                    }
                    _ => {}
                }
            }
        }

        /// Update HUD elements in DOM (only when something changed)
        fn update_hud(&mut self) {
            let hud = self.session.snapshot();
            if self.last_hud.as_ref() == Some(&hud) {
                return;
            }

            let Some(document) = web_sys::window().and_then(|w| w.document()) else {
                return;
            };

            if let Some(el) = document.get_element_by_id("lives") {
                el.set_text_content(Some(&hud.lives.to_string()));
            }
            if let Some(el) = document.get_element_by_id("rhythm") {
                el.set_text_content(Some(&format!("{}%", hud.rhythm)));
            }
            if let Some(el) = document.get_element_by_id("score") {
                el.set_text_content(Some(&hud.score.to_string()));
            }
            if let Some(el) = document.query_selector("[data-status]").ok().flatten() {
                el.set_text_content(Some(&hud.status));
            }

            self.last_hud = Some(hud);
        }

        /// Reset game state for restart
        fn restart(&mut self) {
            self.session.restart();
            self.input = InputState::default();
            self.last_hud = None;
        }
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        if console_log::init_with_level(log::Level::Info).is_err() {
            web_sys::console::warn_1(&"Logger already initialized".into());
        }

        log::info!("Rodeo Dance starting...");

        let seed = js_sys::Date::now() as u64;
        let game = Rc::new(RefCell::new(Game::new(seed)));
        log::info!("Game initialized with seed: {}", seed);

        setup_input_handlers(game.clone());
        request_animation_frame(game);

        log::info!("Rodeo Dance running!");
    }

    fn setup_input_handlers(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };

        // Key down
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::KeyboardEvent| {
                let mut g = game.borrow_mut();
                let key = event.key();
                if g.session.game.is_game_over() && key == "Enter" {
                    g.restart();
                    log::info!("Restarted");
                    return;
                }
                g.input.set_key(&key, true);
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Key up
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::KeyboardEvent| {
                game.borrow_mut().input.set_key(&event.key(), false);
            });
            let _ = window
                .add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Window blur: key-ups are lost while unfocused
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
                game.borrow_mut().input.clear();
            });
            let _ = window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |time: f64| {
            game_loop(game, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        {
            let mut g = game.borrow_mut();
            g.update(time);
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
    log::info!("Rodeo Dance (native) starting...");
    log::info!("Native mode runs a headless demo - serve the wasm build to play");

    let tuning = load_tuning(std::env::args().nth(1));
    run_demo(tuning);
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Tuning from a JSON file, or defaults if none given or unreadable
#[cfg(not(target_arch = "wasm32"))]
fn load_tuning(path: Option<String>) -> rodeo_dance::Tuning {
    use rodeo_dance::Tuning;

    let Some(path) = path else {
        return Tuning::default();
    };
    match std::fs::read_to_string(&path) {
        Ok(json) => match Tuning::from_json(&json) {
            Ok(tuning) => {
                log::info!("Loaded tuning from {}", path);
                tuning
            }
            Err(e) => {
                log::warn!("Bad tuning file {}: {} - using defaults", path, e);
                Tuning::default()
            }
        },
        Err(e) => {
            log::warn!("Can't read tuning file {}: {} - using defaults", path, e);
            Tuning::default()
        }
    }
}

/// Dance a scripted routine for up to 30 seconds at 60 Hz
#[cfg(not(target_arch = "wasm32"))]
fn run_demo(tuning: rodeo_dance::Tuning) {
    use rodeo_dance::sim::{Direction, InputState, Session, tick};

    const FRAMES: u32 = 30 * 60;
    const ROUTINE: [Direction; 4] = [
        Direction::Forward,
        Direction::Right,
        Direction::Backward,
        Direction::Left,
    ];

    let mut session = Session::new(tuning);
    let dt = 1.0 / rodeo_dance::consts::BASELINE_FPS;

    for frame in 0..FRAMES {
        // Change direction every 45 frames, rest every fifth leg
        let leg = (frame / 45) as usize;
        let mut input = InputState::default();
        if leg % 5 != 4 {
            input.set(ROUTINE[leg % ROUTINE.len()], true);
        }

        tick(&mut session, &input, dt);
        session.drain_events();

        if frame % 60 == 59 {
            log::info!("t={:>5.1}s  {}", session.now(), session.snapshot());
        }
        if session.game.is_game_over() {
            break;
        }
    }

    match session.snapshot().to_json() {
        Ok(json) => println!("{}", json),
        Err(e) => log::error!("Couldn't serialize final snapshot: {}", e),
    }
}
