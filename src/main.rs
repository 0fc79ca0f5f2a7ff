//! Knightfall entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;

    use wasm_bindgen::prelude::*;
    use web_sys::{CanvasRenderingContext2d, Document, HtmlCanvasElement, KeyboardEvent};

    use knightfall::audio::AudioManager;
    use knightfall::consts::*;
    use knightfall::render;
    use knightfall::sim::{ActId, FixedStep, GameEvent, GamePhase, GameState, TickInput, tick};
    use knightfall::{SessionProgress, Settings};

    /// Game instance holding all state
    struct Game {
        state: GameState,
        scheduler: FixedStep,
        /// Held-key snapshot fed to every simulation step
        input: TickInput,
        audio: AudioManager,
        settings: Settings,
        ctx: CanvasRenderingContext2d,
        last_time: f64,
    }

    impl Game {
        fn new(ctx: CanvasRenderingContext2d, seed: u64, start_act: Option<ActId>) -> Self {
            let settings = Settings::load();
            let mut audio = AudioManager::new();
            audio.set_volume(settings.effective_volume());

            // Per-act page mode launches straight into an act with the
            // persisted session; otherwise we sit on the title screen
            let state = match start_act {
                Some(act) => GameState::new_at_act(act, SessionProgress::load(), seed),
                None => GameState::new(seed),
            };

            Self {
                state,
                scheduler: FixedStep::new(),
                input: TickInput::default(),
                audio,
                settings,
                ctx,
                last_time: 0.0,
            }
        }

        /// One display frame: run the due simulation steps, apply side
        /// effects, draw once
        fn frame(&mut self, time: f64) {
            let delta = if self.last_time > 0.0 {
                time - self.last_time
            } else {
                STEP_MS
            };
            self.last_time = time;

            let steps = self.scheduler.advance(delta);
            for _ in 0..steps {
                tick(&mut self.state, &self.input);
            }

            self.drain_events();
            render::draw(&self.ctx, &self.state, &self.settings);
            self.update_hud();
        }

        fn drain_events(&mut self) {
            for event in self.state.drain_events() {
                match event {
                    GameEvent::Sound(cue) => self.audio.play(cue),
                    // Write-through: every mutation lands in storage the
                    // same frame it happened
                    GameEvent::ProgressChanged => self.state.progress.save(),
                    GameEvent::ActEntered(act) => {
                        log::info!("act {} started", act.number());
                    }
                    GameEvent::BossDefeated => log::info!("Dracula has fallen"),
                    GameEvent::GameOver => log::info!("game over"),
                    GameEvent::Victory => log::info!("princess rescued"),
                }
            }
        }

        /// Mirror hearts/xp/act title into the DOM HUD and toggle the
        /// title/game-over/victory overlay
        fn update_hud(&self) {
            let Some(document) = web_sys::window().and_then(|w| w.document()) else {
                return;
            };

            let mut hearts = String::new();
            for _ in 0..self.state.progress.lives {
                hearts.push_str("❤️");
            }
            for _ in self.state.progress.lives..3 {
                hearts.push_str("🖤");
            }
            set_text(&document, "hearts", &hearts);

            match self.state.phase {
                GamePhase::Act(act) => {
                    let config = act.config();
                    set_text(&document, "actTitle", config.hud_title);
                    let xp = self.state.progress.xp;
                    let xp_line = match config.exit_xp {
                        Some(t) if xp < t => format!("XP: {xp} ({} to next act)", t - xp),
                        Some(_) => format!("XP: {xp} → GO RIGHT!"),
                        None => format!("XP: {xp}"),
                    };
                    set_text(&document, "xpCounter", &xp_line);
                    show_overlay(&document, None);
                }
                GamePhase::Title => {
                    set_text(&document, "actTitle", "");
                    set_text(&document, "xpCounter", "");
                    show_overlay(
                        &document,
                        Some((
                            "KNIGHTFALL",
                            "Rescue the princess from Dracula's clutches.\nThree acts of peril await.",
                            "Press Space to Begin",
                        )),
                    );
                }
                GamePhase::GameOver => {
                    show_overlay(
                        &document,
                        Some((
                            "GAME OVER",
                            "The kingdom falls into darkness...",
                            "Press R to Restart",
                        )),
                    );
                }
                GamePhase::Victory => {
                    show_overlay(
                        &document,
                        Some((
                            "VICTORY!",
                            "You have rescued the Princess and slain Dracula!\nThe kingdom honors you, brave knight.",
                            "Press R to Play Again",
                        )),
                    );
                }
            }
        }
    }

    fn set_text(document: &Document, id: &str, text: &str) {
        if let Some(el) = document.get_element_by_id(id) {
            el.set_text_content(Some(text));
        }
    }

    fn show_overlay(document: &Document, content: Option<(&str, &str, &str)>) {
        let Some(overlay) = document.get_element_by_id("overlay") else {
            return;
        };
        match content {
            Some((title, sub, prompt)) => {
                set_text(document, "overlayTitle", title);
                set_text(document, "overlaySubtitle", sub);
                set_text(document, "overlayPrompt", prompt);
                let _ = overlay.set_attribute("class", "visible");
            }
            None => {
                let _ = overlay.set_attribute("class", "");
            }
        }
    }

    /// Map physical keys onto the input snapshot; two keys per action
    fn apply_key(input: &mut TickInput, code: &str, held: bool) {
        match code {
            "ArrowLeft" | "KeyA" => input.left = held,
            "ArrowRight" | "KeyD" => input.right = held,
            "ArrowUp" | "KeyW" => input.jump = held,
            "Space" => input.attack = held,
            "KeyR" => input.restart = held,
            _ => {}
        }
    }

    fn setup_input_handlers(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().expect("no window");

        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let mut g = game.borrow_mut();
                apply_key(&mut g.input, &event.code(), true);
                // Browsers gate audio behind a user gesture
                g.audio.resume();
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let mut g = game.borrow_mut();
                apply_key(&mut g.input, &event.code(), false);
            });
            let _ = window.add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().expect("no window");
        let closure = Closure::once(move |time: f64| {
            game_loop(game, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        game.borrow_mut().frame(time);
        request_animation_frame(game);
    }

    /// Direct-act launch via `?act=N`, title screen otherwise
    fn start_act_from_query() -> Option<ActId> {
        let search = web_sys::window()?.location().search().ok()?;
        let n: u32 = search.strip_prefix("?act=")?.parse().ok()?;
        ActId::from_number(n)
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("failed to init logger");

        log::info!("Knightfall starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("gameCanvas")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");
        canvas.set_width(WORLD_W as u32);
        canvas.set_height(WORLD_H as u32);

        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")
            .expect("2d context")
            .expect("2d context")
            .dyn_into()
            .expect("not a 2d context");

        let seed = js_sys::Date::now() as u64;
        let start_act = start_act_from_query();
        let game = Rc::new(RefCell::new(Game::new(ctx, seed, start_act)));
        log::info!("game initialized with seed {seed}");

        setup_input_handlers(game.clone());
        request_animation_frame(game);

        log::info!("Knightfall running!");
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_game::run();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use knightfall::sim::{ActId, GameState, TickInput, tick};
    use knightfall::SessionProgress;

    env_logger::init();
    log::info!("Knightfall (native) starting...");
    log::info!("native mode runs a headless demo - build for wasm32 for the playable game");

    // Drive a short scripted session: run right and swing for ten
    // seconds of simulated time
    let mut state = GameState::new_at_act(ActId::One, SessionProgress::new(), 0xC0FFEE);
    let input = TickInput {
        right: true,
        attack: true,
        ..Default::default()
    };
    for _ in 0..600 {
        tick(&mut state, &input);
    }

    println!(
        "after 600 ticks: phase {:?}, {} xp, {} lives, {} enemies left",
        state.phase,
        state.progress.xp,
        state.progress.lives,
        state.enemies.len(),
    );
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
