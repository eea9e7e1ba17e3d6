//! Dino Runner entry point
//!
//! On the web: binds the game to the page's DOM and runs it off
//! `requestAnimationFrame`. Natively: plays a headless autopilot session.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::collections::HashMap;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, Element, HtmlElement, KeyboardEvent};

    use dino_runner::consts::*;
    use dino_runner::game::{FrameOutcome, GameLoop, KeyOutcome};
    use dino_runner::sim::Pose;
    use dino_runner::{GameError, Surface};

    type Game = GameLoop<DomSurface>;

    /// The page elements the game draws with
    struct DomSurface {
        document: Document,
        world: HtmlElement,
        score: Element,
        heading: Element,
        runner: HtmlElement,
        grounds: [HtmlElement; 2],
        obstacles: HashMap<u32, HtmlElement>,
    }

    fn find<T: JsCast>(document: &Document, selector: &str) -> Result<T, GameError> {
        document
            .query_selector(selector)
            .ok()
            .flatten()
            .and_then(|el| el.dyn_into::<T>().ok())
            .ok_or_else(|| GameError::MissingElement(selector.to_string()))
    }

    fn set_custom_property(element: &HtmlElement, property: &str, value: f64) {
        let _ = element.style().set_property(property, &value.to_string());
    }

    fn pose_image(pose: Pose) -> String {
        match pose {
            Pose::Run(frame) => format!("images/dino-run-{}.png", frame),
            Pose::Jump => "images/dino-stationary.png".to_string(),
            Pose::Lose => "images/dino-lose.png".to_string(),
        }
    }

    impl DomSurface {
        fn from_document(document: Document) -> Result<Self, GameError> {
            let grounds = document
                .query_selector_all(".ground")
                .map_err(|_| GameError::MissingElement(".ground".to_string()))?;
            let ground = |index: u32| {
                grounds
                    .get(index)
                    .and_then(|node| node.dyn_into::<HtmlElement>().ok())
                    .ok_or_else(|| GameError::MissingElement(".ground".to_string()))
            };

            Ok(Self {
                world: find(&document, ".world")?,
                score: find(&document, ".score")?,
                heading: find(&document, ".heading")?,
                runner: find(&document, "[data-dinosaur]")?,
                grounds: [ground(0)?, ground(1)?],
                obstacles: HashMap::new(),
                document,
            })
        }
    }

    impl Surface for DomSurface {
        fn set_ground_offset(&mut self, index: usize, left: f64) {
            if let Some(ground) = self.grounds.get(index) {
                set_custom_property(ground, "--left", left);
            }
        }

        fn set_runner_bottom(&mut self, bottom: f64) {
            set_custom_property(&self.runner, "--bottom", bottom);
        }

        fn set_runner_pose(&mut self, pose: Pose) {
            let src = pose_image(pose);
            if self.runner.get_attribute("src").as_deref() != Some(src.as_str()) {
                let _ = self.runner.set_attribute("src", &src);
            }
        }

        fn create_obstacle(&mut self, id: u32, left: f64) {
            let element = match self
                .document
                .create_element("img")
                .map(|el| el.dyn_into::<HtmlElement>())
            {
                Ok(Ok(element)) => element,
                _ => {
                    log::error!("Could not create element for obstacle {}", id);
                    return;
                }
            };
            let _ = element.set_attribute("src", "images/cactus.png");
            let _ = element.class_list().add_1("cactus");
            set_custom_property(&element, "--left", left);
            let _ = self.world.append_child(&element);
            self.obstacles.insert(id, element);
        }

        fn move_obstacle(&mut self, id: u32, left: f64) {
            if let Some(element) = self.obstacles.get(&id) {
                set_custom_property(element, "--left", left);
            }
        }

        fn remove_obstacle(&mut self, id: u32) {
            if let Some(element) = self.obstacles.remove(&id) {
                element.remove();
            }
        }

        fn clear_obstacles(&mut self) {
            self.obstacles.clear();
            // Also catches obstacles this surface didn't create
            if let Ok(list) = self.document.query_selector_all(".cactus") {
                for i in 0..list.length() {
                    if let Some(element) = list.get(i).and_then(|n| n.dyn_into::<Element>().ok()) {
                        element.remove();
                    }
                }
            }
        }

        fn set_score(&mut self, score: u64) {
            self.score.set_text_content(Some(&score.to_string()));
        }

        fn set_instructions_visible(&mut self, visible: bool) {
            let classes = self.heading.class_list();
            let _ = if visible {
                classes.remove_1("hide")
            } else {
                classes.add_1("hide")
            };
        }

        fn set_world_size(&mut self, width_px: u32, height_px: u32) {
            let style = self.world.style();
            let _ = style.set_property("width", &format!("{}px", width_px));
            let _ = style.set_property("height", &format!("{}px", height_px));
        }
    }

    pub fn run() -> Result<(), GameError> {
        log::info!("Dino Runner starting...");

        let document = web_sys::window()
            .and_then(|w| w.document())
            .ok_or_else(|| GameError::MissingElement("document".to_string()))?;

        let surface = DomSurface::from_document(document)?;

        let seed = js_sys::Date::now() as u64;
        let game = Rc::new(RefCell::new(GameLoop::new(surface, seed)));
        log::info!("Game initialized with seed: {}", seed);

        setup_input_handlers(game.clone());
        setup_resize_handler(game);

        log::info!("Dino Runner waiting for a key press");
        Ok(())
    }

    fn setup_input_handlers(game: Rc<RefCell<Game>>) {
        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            return;
        };
        let handler = game.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
            let outcome = handler.borrow_mut().on_key(&event.key());
            if outcome == KeyOutcome::Started {
                request_animation_frame(handler.clone());
            }
        });
        let _ = document.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_resize_handler(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::<dyn FnMut()>::new(move || {
            game.borrow_mut().fit_world();
        });
        let _ = window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            log::error!("No window, frame loop stopped");
            return;
        };
        let closure = Closure::once(move |time: f64| {
            game_loop(game, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        let outcome = game.borrow_mut().on_frame(time);
        match outcome {
            Ok(FrameOutcome::Continue) => request_animation_frame(game),
            Ok(FrameOutcome::GameOver) => schedule_rearm(game),
            Ok(FrameOutcome::Stopped) => {}
            Err(e) if !e.is_fatal() => {
                log::warn!("Skipping frame: {}", e);
                request_animation_frame(game);
            }
            Err(e) => log::error!("Frame loop stopped: {}", e),
        }
    }

    /// Re-accept the start key after a short delay, so the key press that
    /// lost the game doesn't immediately start the next one
    fn schedule_rearm(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move || {
            game.borrow_mut().rearm();
        });
        let _ = window.set_timeout_with_callback_and_timeout_and_arguments_0(
            closure.as_ref().unchecked_ref(),
            LOSE_REARM_DELAY_MS,
        );
        closure.forget();
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);

    if let Err(e) = wasm_game::run() {
        log::error!("Dino Runner failed to start: {}", e);
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Dino Runner (native) starting...");
    log::info!("Native mode plays headless - run with `trunk serve` for the web version");

    let seed = std::env::args()
        .nth(1)
        .and_then(|arg| arg.parse().ok())
        .unwrap_or(42);
    let summary = dino_runner::autopilot::run(seed, 10_000);

    match serde_json::to_string_pretty(&summary) {
        Ok(json) => println!("{}", json),
        Err(e) => log::error!("Could not encode run summary: {}", e),
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
