//! Neon Thrust entry point
//!
//! In the browser this wires the DOM, WebGPU and Web Audio to the game and
//! runs the frame loop. Natively it is a headless runner that lets the
//! autopilot fly and records best scores to a file.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::convert::FromWasmAbi;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, EventTarget, HtmlCanvasElement, KeyboardEvent, TouchEvent};

    use neon_thrust::app::{FrameScheduler, Game};
    use neon_thrust::audio::AudioManager;
    use neon_thrust::platform::{InputEvent, LocalStorage, MemoryStorage, Storage, ThrustSource, input};
    use neon_thrust::renderer::{RenderState, SceneBuilder, SceneOptions};
    use neon_thrust::settings::Settings;
    use neon_thrust::sim::Viewport;
    use neon_thrust::tuning::Tuning;
    use neon_thrust::ui::{HudView, ids};

    type Shared = Rc<RefCell<App>>;

    /// Everything the page keeps alive between frames
    struct App {
        game: Game<Box<dyn Storage>, AudioManager>,
        settings: Settings,
        render_state: Option<RenderState>,
        scene: SceneBuilder,
        scheduler: FrameScheduler<i32>,
        frame_callback: Option<Closure<dyn FnMut(f64)>>,
        canvas: HtmlCanvasElement,
        document: Document,
        /// Last HUD pushed to the DOM
        hud: Option<HudView>,
    }

    impl App {
        fn apply_input(&mut self, event: InputEvent) {
            if event == InputEvent::StartOrReplay {
                // Audio may only start from a user gesture
                self.game.audio().resume();
            }
            if let Some(phase) = self.game.handle_input(event) {
                log::info!("Phase is now {}", phase.as_str());
                self.present();
            }
            self.sync_frames();
        }

        /// Keep exactly one animation frame pending while a run is live
        fn sync_frames(&mut self) {
            let Some(window) = web_sys::window() else {
                return;
            };
            let wants = self.game.wants_frame();
            let callback = self.frame_callback.as_ref();
            self.scheduler.sync(
                wants,
                || {
                    let cb = callback?;
                    window.request_animation_frame(cb.as_ref().unchecked_ref()).ok()
                },
                |handle| {
                    let _ = window.cancel_animation_frame(handle);
                },
            );
        }

        fn on_frame(&mut self) {
            self.scheduler.fired();
            self.game.frame();
            self.present();
            self.sync_frames();
        }

        fn present(&mut self) {
            self.render();
            self.update_hud();
        }

        fn render(&mut self) {
            let Some(render_state) = self.render_state.as_mut() else {
                return;
            };
            let options = SceneOptions::from_settings(&self.settings);
            let scene = self.scene.build(self.game.state(), &options);
            match render_state.render(&scene, self.game.state().viewport) {
                Ok(()) => {}
                Err(wgpu::SurfaceError::Lost) => {
                    render_state.resize(render_state.size.0, render_state.size.1);
                }
                Err(wgpu::SurfaceError::OutOfMemory) => {
                    log::error!("Out of memory!");
                }
                Err(e) => log::warn!("Render error: {:?}", e),
            }
        }

        /// Push panel visibility and values, touching only what changed
        fn update_hud(&mut self) {
            let view = HudView::from_state(self.game.state());
            if self.hud.as_ref() == Some(&view) {
                return;
            }
            for (id, shown) in view.panels() {
                if let Some(el) = self.document.get_element_by_id(id) {
                    let _ = el.class_list().toggle_with_force("hidden", !shown);
                }
            }
            for (id, text) in view.texts() {
                if let Some(el) = self.document.get_element_by_id(id) {
                    el.set_text_content(Some(&text));
                }
            }
            self.hud = Some(view);
        }

        /// Match the canvas backing store to its CSS size
        fn resize(&mut self) {
            let Some(window) = web_sys::window() else {
                return;
            };
            let dpr = window.device_pixel_ratio();
            let client_w = self.canvas.client_width().max(1);
            let client_h = self.canvas.client_height().max(1);
            let width = (client_w as f64 * dpr) as u32;
            let height = (client_h as f64 * dpr) as u32;
            self.canvas.set_width(width);
            self.canvas.set_height(height);
            if let Some(render_state) = self.render_state.as_mut() {
                render_state.resize(width, height);
            }
            self.game
                .resize(Viewport::new(client_w as f32, client_h as f32));
            log::info!("Resized to {}x{}", client_w, client_h);
            self.present();
        }

        fn auto_pause(&mut self, reason: &str) {
            if self.settings.auto_pause && self.game.auto_pause() {
                log::info!("Auto-paused ({})", reason);
                self.present();
                self.sync_frames();
            }
        }

        fn toggle_mute(&mut self) {
            self.settings.muted = !self.settings.muted;
            self.game.audio_mut().set_muted(self.settings.muted);
            self.settings.save(self.game.storage_mut());
            log::info!("Audio {}", if self.settings.muted { "muted" } else { "unmuted" });
        }
    }

    fn open_storage() -> Box<dyn Storage> {
        match LocalStorage::open() {
            Some(storage) => Box::new(storage),
            None => {
                log::warn!("LocalStorage unavailable, best score will not persist");
                Box::new(MemoryStorage::new())
            }
        }
    }

    pub async fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Neon Thrust starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        if let Some(loading) = document.get_element_by_id("loading") {
            let _ = loading.class_list().add_1("hidden");
        }

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");

        let dpr = window.device_pixel_ratio();
        let client_w = canvas.client_width().max(1);
        let client_h = canvas.client_height().max(1);
        let width = (client_w as f64 * dpr) as u32;
        let height = (client_h as f64 * dpr) as u32;
        canvas.set_width(width);
        canvas.set_height(height);

        let storage = open_storage();
        let settings = Settings::load(storage.as_ref());

        let mut audio = AudioManager::new();
        audio.set_master_volume(settings.master_volume);
        audio.set_sfx_volume(settings.sfx_volume);
        audio.set_muted(settings.muted);

        let seed = js_sys::Date::now() as u64;
        let viewport = Viewport::new(client_w as f32, client_h as f32);
        let mut game = Game::new(seed, Tuning::default(), viewport, storage, audio);
        game.apply_settings(&settings);
        log::info!("Game initialized with seed: {}", seed);

        // Initialize WebGPU
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU | wgpu::Backends::GL,
            ..Default::default()
        });

        let surface = instance
            .create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))
            .expect("Failed to create surface");

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .expect("Failed to get adapter");

        log::info!("Using adapter: {:?}", adapter.get_info().name);

        let render_state = match RenderState::new(surface, &adapter, width, height).await {
            Ok(state) => Some(state),
            Err(err) => {
                log::error!("Failed to create device: {}", err);
                None
            }
        };

        let app: Shared = Rc::new(RefCell::new(App {
            game,
            settings,
            render_state,
            scene: SceneBuilder::new(seed),
            scheduler: FrameScheduler::new(),
            frame_callback: None,
            canvas: canvas.clone(),
            document: document.clone(),
            hud: None,
        }));

        {
            let frame_app = app.clone();
            let callback = Closure::<dyn FnMut(f64)>::new(move |_time: f64| {
                frame_app.borrow_mut().on_frame();
            });
            app.borrow_mut().frame_callback = Some(callback);
        }

        setup_input_handlers(&canvas, &app);
        setup_buttons(&document, &app);
        setup_resize(&app);
        setup_auto_pause(&document, &app);

        app.borrow_mut().present();

        log::info!("Neon Thrust running!");
    }

    /// Register `handler` for `event` on `target` for the page's lifetime
    fn listen<E: FromWasmAbi + 'static>(
        target: &EventTarget,
        event: &str,
        handler: impl FnMut(E) + 'static,
    ) {
        let closure = Closure::<dyn FnMut(E)>::new(handler);
        let _ = target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_input_handlers(canvas: &HtmlCanvasElement, app: &Shared) {
        let Some(window) = web_sys::window() else {
            return;
        };

        // Keyboard
        {
            let app = app.clone();
            listen(&window, "keydown", move |event: KeyboardEvent| {
                let key = event.key();
                if key == "m" || key == "M" {
                    app.borrow_mut().toggle_mute();
                    return;
                }
                if let Some(input) = input::key_down(&key) {
                    // Keep Space and ArrowUp from scrolling the page
                    event.prevent_default();
                    if !event.repeat() {
                        app.borrow_mut().apply_input(input);
                    }
                }
            });
        }
        {
            let app = app.clone();
            listen(&window, "keyup", move |event: KeyboardEvent| {
                if let Some(input) = input::key_up(&event.key()) {
                    event.prevent_default();
                    app.borrow_mut().apply_input(input);
                }
            });
        }

        // Touch holds thrust
        for (name, input) in [
            ("touchstart", InputEvent::ThrustStart(ThrustSource::Touch)),
            ("touchend", InputEvent::ThrustEnd(ThrustSource::Touch)),
            ("touchcancel", InputEvent::ThrustEnd(ThrustSource::Touch)),
        ] {
            let app = app.clone();
            listen(canvas, name, move |event: TouchEvent| {
                event.prevent_default();
                app.borrow_mut().apply_input(input);
            });
        }

        // Mouse button on the canvas holds thrust too
        {
            let app = app.clone();
            listen(canvas, "mousedown", move |_event: web_sys::MouseEvent| {
                app.borrow_mut()
                    .apply_input(InputEvent::ThrustStart(ThrustSource::Pointer));
            });
        }
        {
            let app = app.clone();
            listen(&window, "mouseup", move |_event: web_sys::MouseEvent| {
                app.borrow_mut()
                    .apply_input(InputEvent::ThrustEnd(ThrustSource::Pointer));
            });
        }
    }

    fn setup_buttons(document: &Document, app: &Shared) {
        for (id, input) in [
            (ids::START_BUTTON, InputEvent::StartOrReplay),
            (ids::REPLAY_BUTTON, InputEvent::StartOrReplay),
            (ids::PAUSE_BUTTON, InputEvent::PauseToggle),
            (ids::RESUME_BUTTON, InputEvent::PauseToggle),
        ] {
            let Some(btn) = document.get_element_by_id(id) else {
                log::warn!("Missing button #{}", id);
                continue;
            };
            let app = app.clone();
            listen(&btn, "click", move |_event: web_sys::MouseEvent| {
                app.borrow_mut().apply_input(input);
            });
        }
    }

    fn setup_resize(app: &Shared) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let app = app.clone();
        listen(&window, "resize", move |_event: web_sys::Event| {
            app.borrow_mut().resize();
        });
    }

    fn setup_auto_pause(document: &Document, app: &Shared) {
        let Some(window) = web_sys::window() else {
            return;
        };

        // Visibility change (tab switch, minimize)
        {
            let app = app.clone();
            let document_clone = document.clone();
            listen(document, "visibilitychange", move |_event: web_sys::Event| {
                if document_clone.visibility_state() == web_sys::VisibilityState::Hidden {
                    app.borrow_mut().auto_pause("tab hidden");
                }
            });
        }

        // Window blur (click outside)
        {
            let app = app.clone();
            listen(&window, "blur", move |_event: web_sys::FocusEvent| {
                app.borrow_mut().auto_pause("window blur");
            });
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    wasm_game::run().await;
}

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use std::fs;
    use std::path::PathBuf;

    use anyhow::{Context, Result, anyhow};
    use clap::Parser;

    use neon_thrust::app::Game;
    use neon_thrust::audio::NullAudio;
    use neon_thrust::autopilot::{Autopilot, run_session};
    use neon_thrust::platform::FileStorage;
    use neon_thrust::sim::Viewport;
    use neon_thrust::tuning::Tuning;

    #[derive(Parser, Debug)]
    #[command(name = "neon-thrust")]
    #[command(about = "Headless Neon Thrust runner: lets the autopilot fly and keeps the best score")]
    struct Cli {
        /// Seed for the obstacle stream
        #[arg(long, default_value_t = 1)]
        seed: u64,
        /// Tick cap per run (60 ticks per second of play)
        #[arg(long, default_value_t = 18_000)]
        max_frames: u64,
        /// JSON file holding the best score
        #[arg(long, default_value = "neon-thrust-store.json")]
        store: PathBuf,
        /// Optional tuning overrides (JSON, missing keys use defaults)
        #[arg(long)]
        tuning: Option<PathBuf>,
        /// Consecutive runs in one session
        #[arg(long, default_value_t = 1)]
        runs: u32,
        /// Autopilot lookahead in ticks
        #[arg(long, default_value_t = 10.0)]
        lookahead: f32,
        /// Print one JSON object per run instead of text
        #[arg(long)]
        json: bool,
    }

    fn load_tuning(path: Option<&PathBuf>) -> Result<Tuning> {
        let Some(path) = path else {
            return Ok(Tuning::default());
        };
        let json = fs::read_to_string(path)
            .with_context(|| format!("failed to read tuning file {}", path.display()))?;
        Tuning::from_json(&json)
            .with_context(|| format!("invalid tuning file {}", path.display()))
    }

    pub fn run() -> Result<()> {
        let cli = Cli::parse();
        if cli.max_frames == 0 {
            return Err(anyhow!("max_frames must be > 0"));
        }
        if cli.runs == 0 {
            return Err(anyhow!("runs must be > 0"));
        }

        let tuning = load_tuning(cli.tuning.as_ref())?;
        let storage = FileStorage::open(&cli.store);
        let mut game = Game::new(cli.seed, tuning, Viewport::default(), storage, NullAudio);
        let pilot = Autopilot::new(cli.lookahead);

        log::info!(
            "Flying {} run(s) from seed {} (best so far {})",
            cli.runs,
            cli.seed,
            game.best_score()
        );

        for run in 1..=cli.runs {
            let metrics = run_session(&mut game, &pilot, cli.max_frames);
            if cli.json {
                println!("{}", serde_json::to_string(&metrics)?);
            } else {
                println!(
                    "run {:>3}: score {:>4}  best {:>4}  frames {:>6}  {}{}",
                    run,
                    metrics.score,
                    metrics.best_score,
                    metrics.frame_count,
                    if metrics.crashed { "crashed" } else { "frame cap" },
                    if metrics.new_best { "  NEW BEST" } else { "" },
                );
            }
        }

        log::info!(
            "Best score {} stored in {}",
            game.best_score(),
            game.storage().path().display()
        );
        Ok(())
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    headless::run()
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
