//! Gap Runner entry point
//!
//! Handles platform-specific initialization and runs the game loop. The
//! browser build wires DOM input and HUD around the simulation; the native
//! build runs a headless demo.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, HtmlInputElement, KeyboardEvent, MouseEvent, TouchEvent};

    use gap_runner::audio::{AudioManager, SoundCue};
    use gap_runner::highscores::HighScores;
    use gap_runner::settings::Settings;
    use gap_runner::sim::{GameEvent, Phase, StepInput, World, WorldConfig, step};

    /// Game instance holding all state
    struct Game {
        world: World,
        /// Pending input flags, consumed at the next step
        input: StepInput,
        audio: AudioManager,
        highscores: HighScores,
        last_time: f64,
        /// Pending requestAnimationFrame handle; invalidated before any
        /// rescheduling so no stale callback ever steps a fresh world
        frame_handle: Option<i32>,
    }

    impl Game {
        fn new(seed: u64) -> Self {
            let settings = Settings::load();
            let mut audio = AudioManager::new();
            settings.apply_to(&mut audio);
            Self {
                world: World::new(WorldConfig::ground_runner(), seed),
                input: StepInput::default(),
                audio,
                highscores: HighScores::load(),
                last_time: 0.0,
                frame_handle: None,
            }
        }

        /// Run one simulation step from a frame timestamp (ms)
        fn update(&mut self, time: f64) -> Vec<GameEvent> {
            let dt = if self.last_time > 0.0 {
                ((time - self.last_time) / 1000.0) as f32
            } else {
                0.0
            };
            self.last_time = time;

            // Consume one-shot inputs atomically at the start of the step
            let input = self.input;
            self.input = StepInput::default();
            step(&mut self.world, &input, dt)
        }
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Gap Runner starting...");

        let seed = js_sys::Date::now() as u64;
        let game = Rc::new(RefCell::new(Game::new(seed)));
        log::info!("Game initialized with seed: {}", seed);

        setup_input_handlers(game.clone());
        setup_restart_button(game.clone());
        setup_name_entry(game.clone());

        // Display-only until the first input; no loop is scheduled yet
        let document = document();
        update_hud(&document, &game.borrow());
        render_highscores(&document, &game.borrow().highscores);
        show(&document, "start-message");

        log::info!("Gap Runner ready - press Space to start");
    }

    fn document() -> Document {
        web_sys::window()
            .expect("no window")
            .document()
            .expect("no document")
    }

    // === Frame loop ===

    fn request_frame(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().expect("no window");
        let g = game.clone();
        let closure = Closure::once(move |time: f64| frame(g, time));
        let handle = window
            .request_animation_frame(closure.as_ref().unchecked_ref())
            .expect("failed to schedule frame");
        game.borrow_mut().frame_handle = Some(handle);
        closure.forget();
    }

    /// Invalidate any pending callback, then schedule a fresh one
    fn restart_loop(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().expect("no window");
        {
            let mut g = game.borrow_mut();
            if let Some(handle) = g.frame_handle.take() {
                let _ = window.cancel_animation_frame(handle);
            }
            g.last_time = 0.0;
        }
        request_frame(game);
    }

    fn frame(game: Rc<RefCell<Game>>, time: f64) {
        let events = {
            let mut g = game.borrow_mut();
            g.frame_handle = None;
            g.update(time)
        };

        handle_events(&game, &events);
        {
            let document = document();
            update_hud(&document, &game.borrow());
        }

        // The loop stops on termination; restart schedules it again
        let running = game.borrow().world.phase == Phase::Running;
        if running {
            request_frame(game);
        }
    }

    // === Event fan-out to HUD/audio/persistence ===

    fn handle_events(game: &Rc<RefCell<Game>>, events: &[GameEvent]) {
        let document = document();
        for event in events {
            match event {
                GameEvent::Started => {
                    hide(&document, "start-message");
                    hide(&document, "game-over");
                    hide(&document, "name-entry");
                }
                GameEvent::Flapped => game.borrow().audio.play(SoundCue::Flap),
                GameEvent::Scored { .. } => game.borrow().audio.play(SoundCue::Score),
                GameEvent::PickupCollected { .. } => {
                    game.borrow().audio.play(SoundCue::Collect)
                }
                GameEvent::GameOver { score } => {
                    let g = game.borrow();
                    g.audio.play(SoundCue::GameOver);
                    show(&document, "game-over");
                    set_text(&document, "final-score", &score.to_string());
                    if g.highscores.qualifies(*score) {
                        show(&document, "name-entry");
                    }
                }
            }
        }
    }

    fn update_hud(document: &Document, game: &Game) {
        set_text(
            document,
            "score",
            &format!("Score: {}", game.world.score),
        );
    }

    fn render_highscores(document: &Document, highscores: &HighScores) {
        if let Some(el) = document.get_element_by_id("highscore-list") {
            let mut html = String::new();
            for entry in &highscores.entries {
                html.push_str(&format!("<li>{} {}</li>", entry.name, entry.score));
            }
            el.set_inner_html(&html);
        }
    }

    fn set_text(document: &Document, id: &str, text: &str) {
        if let Some(el) = document.get_element_by_id(id) {
            el.set_text_content(Some(text));
        }
    }

    fn show(document: &Document, id: &str) {
        if let Some(el) = document.get_element_by_id(id) {
            let _ = el.set_attribute("class", "");
        }
    }

    fn hide(document: &Document, id: &str) {
        if let Some(el) = document.get_element_by_id(id) {
            let _ = el.set_attribute("class", "hidden");
        }
    }

    // === Input wiring ===

    /// Latest-pending impulse; starts the loop on the very first input
    fn trigger_impulse(game: &Rc<RefCell<Game>>) {
        let needs_loop = {
            let mut g = game.borrow_mut();
            if g.world.phase == Phase::GameOver {
                // Ignored while terminated; restart is a separate command
                return;
            }
            g.input.impulse = true;
            g.frame_handle.is_none()
        };
        if needs_loop {
            restart_loop(game.clone());
        }
    }

    fn setup_input_handlers(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().expect("no window");

        // Keyboard (Space)
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if event.key() == " " {
                    event.prevent_default();
                    trigger_impulse(&game);
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Mouse
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                trigger_impulse(&game);
            });
            let _ = document()
                .add_event_listener_with_callback("mousedown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Touch
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                trigger_impulse(&game);
            });
            let _ = document()
                .add_event_listener_with_callback("touchstart", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_restart_button(game: Rc<RefCell<Game>>) {
        if let Some(btn) = document().get_element_by_id("restart-button") {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                game.borrow_mut().input.restart = true;
                restart_loop(game.clone());
                log::info!("Restart requested");
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_name_entry(game: Rc<RefCell<Game>>) {
        if let Some(btn) = document().get_element_by_id("submit-score") {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                submit_name(&game);
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn submit_name(game: &Rc<RefCell<Game>>) {
        let document = document();
        let Some(input) = document
            .get_element_by_id("name-input")
            .and_then(|el| el.dyn_into::<HtmlInputElement>().ok())
        else {
            return;
        };

        let mut g = game.borrow_mut();
        let score = g.world.score;
        if let Some(rank) = g.highscores.add_score(&input.value(), score) {
            g.highscores.save();
            g.audio.play(SoundCue::HighScore);
            log::info!("New high score at rank {}", rank);
        }
        render_highscores(&document, &g.highscores);
        drop(g);

        input.set_value("");
        hide(&document, "name-entry");
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
    use gap_runner::sim::{Phase, StepInput, World, WorldConfig, step};

    env_logger::init();
    log::info!("Gap Runner (native) starting...");
    log::info!("Native mode runs a headless demo - use the web build to play");

    // Scripted deterministic run: hop every 45 frames for up to two minutes
    let mut world = World::new(WorldConfig::ground_runner(), 42);
    let dt = 1.0 / 60.0;
    let mut frames = 0u32;

    step(&mut world, &StepInput { impulse: true, restart: false }, dt);
    while world.phase == Phase::Running && frames < 7200 {
        let input = StepInput {
            impulse: frames % 45 == 0,
            restart: false,
        };
        step(&mut world, &input, dt);
        frames += 1;
    }

    println!(
        "Demo run finished after {:.1}s: score {}, {} hazards on screen",
        world.elapsed,
        world.score,
        world.hazards.len()
    );
}
