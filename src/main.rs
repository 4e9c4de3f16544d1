//! Neon Glide entry point
//!
//! On wasm this is the browser host: canvas, keyboard/pointer input, DOM HUD,
//! LocalStorage and Web Audio around a [`neon_glide::Game`]. Natively it runs a
//! headless autopilot demo and logs the result.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{
        Document, HtmlCanvasElement, HtmlInputElement, HtmlSelectElement, KeyboardEvent,
        PointerEvent,
    };

    use neon_glide::audio::{AudioManager, SoundEffect};
    use neon_glide::input::{Controls, KeyCommand, PadButton, blocks_scroll};
    use neon_glide::prng::seed_from_string;
    use neon_glide::renderer::{self, RenderState, Visuals};
    use neon_glide::sim::Mode;
    use neon_glide::{FrameOutcome, Game, HighScores, HostEvent, Settings};

    /// Browser host holding everything the frame loop touches
    struct App {
        game: Game,
        render_state: Option<RenderState>,
        visuals: Visuals,
        audio: AudioManager,
        settings: Settings,
        high_scores: HighScores,
        controls: Controls,
        canvas: HtmlCanvasElement,
        /// CSS size last pushed to the game
        css_size: (f32, f32),
        last_time: f64,
        raf_id: Option<i32>,
        stopped: bool,
    }

    impl App {
        /// One animation frame: resize, step, sounds, lifecycle, draw, HUD
        fn frame(&mut self, time: f64) {
            let dt = if self.last_time > 0.0 {
                ((time - self.last_time) / 1000.0) as f32
            } else {
                0.0
            };
            self.last_time = time;

            self.sync_canvas_size();

            let outcome = self.game.advance(dt, &self.controls.intent());
            if outcome != FrameOutcome::Paused {
                self.visuals.advance(dt);
            }

            let events = self.game.drain_game_events();
            self.audio.play_events(&events);

            for event in self.game.drain_events() {
                self.on_host_event(event);
            }

            self.render();
            self.update_hud();
        }

        /// Follow the canvas' CSS box (window resizes, orientation changes)
        fn sync_canvas_size(&mut self) {
            let Some(window) = web_sys::window() else {
                return;
            };
            let dpr = window.device_pixel_ratio() as f32;
            let css = (
                self.canvas.client_width() as f32,
                self.canvas.client_height() as f32,
            );
            if css == self.css_size {
                return;
            }
            self.css_size = css;

            let width = (css.0 * dpr).floor() as u32;
            let height = (css.1 * dpr).floor() as u32;
            self.canvas.set_width(width);
            self.canvas.set_height(height);
            self.game.resize(css.0, css.1, dpr);
            if let Some(render_state) = &mut self.render_state {
                render_state.resize(width, height, dpr);
            }
        }

        fn start_run(&mut self) {
            self.audio.unlock();
            self.game.start();
        }

        fn on_host_event(&mut self, event: HostEvent) {
            let Some(document) = document() else {
                return;
            };
            match event {
                HostEvent::Started => {
                    self.audio.play(SoundEffect::Click);
                    set_hidden(&document, "game-over", true);
                    set_body_scroll(&document, false);
                    if let Err(e) = self.canvas.focus() {
                        log::debug!("Canvas focus failed: {:?}", e);
                    }
                }
                HostEvent::RunningChanged(running) => {
                    if let Some(btn) = document.get_element_by_id("start-btn") {
                        btn.set_text_content(Some(if running { "Pause" } else { "Start" }));
                    }
                    if !running {
                        set_body_scroll(&document, true);
                        self.controls.clear();
                    }
                }
                HostEvent::GameOver { score } => {
                    let mode = self.game.mode();
                    let is_best = self.high_scores.record(mode, score);
                    if is_best {
                        self.high_scores.save(mode);
                    }
                    set_text(&document, "#final-score", &score.to_string());
                    set_hidden(&document, "new-best", !is_best);
                    set_hidden(&document, "game-over", false);
                }
            }
        }

        fn render(&mut self) {
            let paused = self.game.is_paused();
            let vertices = renderer::build(self.game.state(), paused, &mut self.visuals);

            if let Some(render_state) = &mut self.render_state {
                match render_state.render(&vertices) {
                    Ok(_) => {}
                    Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                        render_state.reconfigure();
                    }
                    Err(wgpu::SurfaceError::OutOfMemory) => {
                        log::error!("Out of memory!");
                    }
                    Err(e) => log::warn!("Render error: {:?}", e),
                }
            }
        }

        /// Update HUD elements in DOM
        fn update_hud(&self) {
            let Some(document) = document() else {
                return;
            };
            let hud = self.game.hud();
            let mode = self.game.mode();

            set_text(&document, "#hud-score .hud-value", &hud.score.to_string());
            set_text(&document, "#hud-speed .hud-value", &hud.speed.to_string());

            let hearts: String = (0..hud.max_hp)
                .map(|i| if i < hud.hp { '♥' } else { '♡' })
                .collect();
            set_text(&document, "#hud-hp .hud-value", &hearts);

            let stealthed = hud.stealth > 0.0;
            set_hidden(&document, "hud-stealth", !stealthed);
            if stealthed {
                set_text(
                    &document,
                    "#hud-stealth .hud-value",
                    &format!("{:.1}s", hud.stealth),
                );
            }

            set_hidden(&document, "hud-wave", mode != Mode::Waves);
            set_text(
                &document,
                "#hud-wave .hud-value",
                &(hud.wave_level + 1).to_string(),
            );

            set_text(&document, "#best-mode", mode.label());
            set_text(&document, "#best-score", &self.high_scores.best(mode).to_string());

            let running = self.game.is_running();
            set_hidden(
                &document,
                "start-hint",
                running || self.game.is_input_locked(),
            );
            set_hidden(&document, "pause-menu", !self.game.is_paused());
        }
    }

    fn document() -> Option<Document> {
        web_sys::window()?.document()
    }

    fn set_text(document: &Document, selector: &str, text: &str) {
        if let Some(el) = document.query_selector(selector).ok().flatten() {
            if el.text_content().as_deref() != Some(text) {
                el.set_text_content(Some(text));
            }
        }
    }

    fn set_hidden(document: &Document, id: &str, hidden: bool) {
        if let Some(el) = document.get_element_by_id(id) {
            let _ = el.class_list().toggle_with_force("hidden", hidden);
        }
    }

    /// Page scroll is locked while a run is active
    fn set_body_scroll(document: &Document, enabled: bool) {
        if let Some(body) = document.body() {
            let value = if enabled { "" } else { "hidden" };
            let _ = body.style().set_property("overflow", value);
        }
    }

    /// `?seed=...` makes the whole session's run seeds reproducible
    fn session_seed(window: &web_sys::Window) -> u32 {
        let query = window.location().search().unwrap_or_default();
        let param = query
            .trim_start_matches('?')
            .split('&')
            .find_map(|kv| kv.strip_prefix("seed="));
        match param {
            Some(seed) if !seed.is_empty() => {
                log::info!("Using session seed {:?}", seed);
                seed_from_string(seed)
            }
            _ => js_sys::Date::now() as u64 as u32,
        }
    }

    async fn init_renderer(
        canvas: &HtmlCanvasElement,
        width: u32,
        height: u32,
        dpr: f32,
    ) -> Option<RenderState> {
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU | wgpu::Backends::GL,
            ..Default::default()
        });

        let surface = instance
            .create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))
            .map_err(|e| log::warn!("Failed to create surface: {:?}", e))
            .ok()?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .map_err(|e| log::warn!("Failed to get adapter: {:?}", e))
            .ok()?;

        log::info!("Using adapter: {:?}", adapter.get_info().name);

        RenderState::new(surface, &adapter, width, height, dpr)
            .await
            .map_err(|e| log::warn!("Failed to create device: {:?}", e))
            .ok()
    }

    pub async fn run() {
        console_error_panic_hook::set_once();
        if console_log::init_with_level(log::Level::Info).is_err() {
            web_sys::console::warn_1(&"Logger already initialized".into());
        }

        log::info!("Neon Glide starting...");

        let Some(window) = web_sys::window() else {
            return;
        };
        let Some(document) = window.document() else {
            return;
        };

        // Hide loading indicator
        set_hidden(&document, "loading", true);

        let Some(canvas) = document
            .get_element_by_id("canvas")
            .and_then(|el| el.dyn_into::<HtmlCanvasElement>().ok())
        else {
            log::error!("No #canvas element");
            return;
        };

        let dpr = window.device_pixel_ratio() as f32;
        let css_w = canvas.client_width() as f32;
        let css_h = canvas.client_height() as f32;
        let width = (css_w * dpr).floor() as u32;
        let height = (css_h * dpr).floor() as u32;
        canvas.set_width(width);
        canvas.set_height(height);

        let settings = Settings::load();
        let seed = session_seed(&window);

        let mut game = Game::new(seed, css_w, css_h, dpr);
        game.set_difficulty(settings.difficulty.as_str());
        game.set_mode(settings.mode.as_str());
        // The landing menu owns Space/Enter until dismissed
        let landing_open = document.get_element_by_id("landing").is_some();
        game.set_input_lock(landing_open);

        let mut visuals = Visuals::new(u64::from(seed));
        visuals.shake_enabled = settings.effective_screen_shake();

        let render_state = init_renderer(&canvas, width, height, dpr).await;
        if render_state.is_none() {
            log::warn!("No GPU surface - rendering disabled");
        }

        let app = Rc::new(RefCell::new(App {
            game,
            render_state,
            visuals,
            audio: AudioManager::from_settings(&settings),
            settings,
            high_scores: HighScores::load(),
            controls: Controls::default(),
            canvas: canvas.clone(),
            css_size: (css_w, css_h),
            last_time: 0.0,
            raf_id: None,
            stopped: false,
        }));

        sync_menu(&document, &app.borrow().settings);

        setup_keyboard(app.clone());
        setup_pointer(&canvas, app.clone());
        setup_pad(app.clone());
        setup_menu(app.clone());
        setup_auto_pause(app.clone());
        setup_teardown(app.clone());

        request_animation_frame(app);

        log::info!("Neon Glide running (seed {:#010x})", seed);
    }

    /// Reflect stored settings in the menu controls
    fn sync_menu(document: &Document, settings: &Settings) {
        if let Some(select) = document
            .get_element_by_id("difficulty-select")
            .and_then(|el| el.dyn_into::<HtmlSelectElement>().ok())
        {
            select.set_value(settings.difficulty.as_str());
        }
        if let Some(select) = document
            .get_element_by_id("mode-select")
            .and_then(|el| el.dyn_into::<HtmlSelectElement>().ok())
        {
            select.set_value(settings.mode.as_str());
        }
        if let Some(toggle) = document
            .get_element_by_id("sfx-toggle")
            .and_then(|el| el.dyn_into::<HtmlInputElement>().ok())
        {
            toggle.set_checked(settings.sfx_enabled);
        }
        if let Some(slider) = document
            .get_element_by_id("volume-slider")
            .and_then(|el| el.dyn_into::<HtmlInputElement>().ok())
        {
            slider.set_value(&(settings.master_volume * 100.0).round().to_string());
        }
    }

    fn setup_keyboard(app: Rc<RefCell<App>>) {
        let Some(window) = web_sys::window() else {
            return;
        };

        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let code = event.code();
                if blocks_scroll(&code) {
                    event.prevent_default();
                }

                let mut a = app.borrow_mut();
                let command = {
                    let App { controls, game, .. } = &mut *a;
                    controls.key_down(&code, event.repeat(), game)
                };
                match command {
                    KeyCommand::Start => a.start_run(),
                    KeyCommand::Resume => a.game.resume(),
                    KeyCommand::TogglePause => a.game.toggle_pause(),
                    KeyCommand::None => {}
                }
            });
            let _ = window.add_event_listener_with_callback_and_bool(
                "keydown",
                closure.as_ref().unchecked_ref(),
                true,
            );
            closure.forget();
        }

        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let code = event.code();
                if blocks_scroll(&code) {
                    event.prevent_default();
                }
                app.borrow_mut().controls.key_up(&code);
            });
            let _ = window.add_event_listener_with_callback_and_bool(
                "keyup",
                closure.as_ref().unchecked_ref(),
                true,
            );
            closure.forget();
        }
    }

    fn setup_pointer(canvas: &HtmlCanvasElement, app: Rc<RefCell<App>>) {
        fn canvas_x(canvas: &HtmlCanvasElement, event: &PointerEvent) -> f32 {
            let rect = canvas.get_bounding_client_rect();
            (f64::from(event.client_x()) - rect.left()) as f32
        }

        // Press: steer + fire, and unlock audio (a user gesture)
        {
            let app = app.clone();
            let canvas_clone = canvas.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: PointerEvent| {
                event.prevent_default();
                let mut a = app.borrow_mut();
                a.controls.pointer_down(canvas_x(&canvas_clone, &event));
                a.audio.unlock();
            });
            let _ = canvas
                .add_event_listener_with_callback("pointerdown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Move: steering follows the pointer even without a press
        {
            let app = app.clone();
            let canvas_clone = canvas.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: PointerEvent| {
                app.borrow_mut()
                    .controls
                    .pointer_move(canvas_x(&canvas_clone, &event));
            });
            let _ = canvas
                .add_event_listener_with_callback("pointermove", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Release/leave: stop firing and steering
        for kind in ["pointerup", "pointerleave", "pointercancel"] {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: PointerEvent| {
                app.borrow_mut().controls.pointer_release();
            });
            let _ = canvas.add_event_listener_with_callback(kind, closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    /// Touch gamepad: hold to steer or fire
    fn setup_pad(app: Rc<RefCell<App>>) {
        let Some(document) = document() else {
            return;
        };

        for button in PadButton::ALL {
            let Some(el) = document.get_element_by_id(button.element_id()) else {
                continue;
            };

            {
                let app = app.clone();
                let closure = Closure::<dyn FnMut(_)>::new(move |event: PointerEvent| {
                    event.prevent_default();
                    let mut a = app.borrow_mut();
                    a.audio.unlock();
                    a.controls.pad(button, true);
                });
                let _ = el
                    .add_event_listener_with_callback("pointerdown", closure.as_ref().unchecked_ref());
                closure.forget();
            }

            for kind in ["pointerup", "pointerleave", "pointercancel"] {
                let app = app.clone();
                let closure = Closure::<dyn FnMut(_)>::new(move |_event: PointerEvent| {
                    app.borrow_mut().controls.pad(button, false);
                });
                let _ = el.add_event_listener_with_callback(kind, closure.as_ref().unchecked_ref());
                closure.forget();
            }
        }
    }

    fn setup_menu(app: Rc<RefCell<App>>) {
        let Some(document) = document() else {
            return;
        };

        // Landing "Play" button dismisses the menu and starts
        if let Some(btn) = document.get_element_by_id("play-btn") {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                if let Some(document) = self::document() {
                    set_hidden(&document, "landing", true);
                }
                let mut a = app.borrow_mut();
                a.game.set_input_lock(false);
                a.start_run();
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // "New game" pauses and returns to the landing menu
        if let Some(btn) = document.get_element_by_id("new-game-btn") {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                let mut a = app.borrow_mut();
                a.game.pause();
                a.game.set_input_lock(true);
                a.controls.clear();
                if let Some(document) = self::document() {
                    set_hidden(&document, "landing", false);
                }
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Floating Start/Pause button
        if let Some(btn) = document.get_element_by_id("start-btn") {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                let mut a = app.borrow_mut();
                if a.game.is_running() {
                    a.game.toggle_pause();
                } else {
                    a.start_run();
                }
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Restart button on the game-over panel
        if let Some(btn) = document.get_element_by_id("restart-btn") {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                let mut a = app.borrow_mut();
                a.audio.unlock();
                a.game.restart();
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        if let Some(select) = document
            .get_element_by_id("difficulty-select")
            .and_then(|el| el.dyn_into::<HtmlSelectElement>().ok())
        {
            let app = app.clone();
            let select_clone = select.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                let mut a = app.borrow_mut();
                if a.game.set_difficulty(&select_clone.value()) {
                    a.settings.difficulty = a.game.difficulty();
                    a.settings.save();
                } else {
                    select_clone.set_value(a.game.difficulty().as_str());
                }
            });
            let _ = select
                .add_event_listener_with_callback("change", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        if let Some(select) = document
            .get_element_by_id("mode-select")
            .and_then(|el| el.dyn_into::<HtmlSelectElement>().ok())
        {
            let app = app.clone();
            let select_clone = select.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                let mut a = app.borrow_mut();
                if a.game.set_mode(&select_clone.value()) {
                    a.settings.mode = a.game.mode();
                    a.settings.save();
                } else {
                    select_clone.set_value(a.game.mode().as_str());
                }
            });
            let _ = select
                .add_event_listener_with_callback("change", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Master volume slider, 0..100
        if let Some(slider) = document
            .get_element_by_id("volume-slider")
            .and_then(|el| el.dyn_into::<HtmlInputElement>().ok())
        {
            let app = app.clone();
            let slider_clone = slider.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                let Ok(percent) = slider_clone.value().parse::<f32>() else {
                    return;
                };
                let mut a = app.borrow_mut();
                a.settings.set_master_volume(percent / 100.0);
                let volume = a.settings.master_volume;
                a.audio.set_volume(volume);
                a.settings.save();
            });
            let _ = slider
                .add_event_listener_with_callback("input", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        if let Some(toggle) = document
            .get_element_by_id("sfx-toggle")
            .and_then(|el| el.dyn_into::<HtmlInputElement>().ok())
        {
            let toggle_clone = toggle.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                let mut a = app.borrow_mut();
                let on = toggle_clone.checked();
                a.settings.sfx_enabled = on;
                a.settings.save();
                a.audio.set_enabled(on);
                a.audio.unlock();
            });
            let _ = toggle
                .add_event_listener_with_callback("change", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_auto_pause(app: Rc<RefCell<App>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let Some(document) = window.document() else {
            return;
        };

        // Visibility change (tab switch, minimize)
        {
            let app = app.clone();
            let document_clone = document.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                if document_clone.visibility_state() == web_sys::VisibilityState::Hidden {
                    let mut a = app.borrow_mut();
                    if a.game.phase() == neon_glide::RunPhase::Running {
                        a.game.pause();
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
                let mut a = app.borrow_mut();
                if a.game.phase() == neon_glide::RunPhase::Running {
                    a.game.pause();
                    a.controls.clear();
                    log::info!("Auto-paused (window blur)");
                }
            });
            let _ = window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    /// Cancel the frame loop when the page goes away
    fn setup_teardown(app: Rc<RefCell<App>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            let mut a = app.borrow_mut();
            a.stopped = true;
            if let (Some(id), Some(window)) = (a.raf_id.take(), web_sys::window()) {
                let _ = window.cancel_animation_frame(id);
            }
            set_body_scroll_if_possible();
            log::info!("Frame loop stopped");
        });
        let _ = window.add_event_listener_with_callback("pagehide", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn set_body_scroll_if_possible() {
        if let Some(document) = document() {
            set_body_scroll(&document, true);
        }
    }

    fn request_animation_frame(app: Rc<RefCell<App>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let app_clone = app.clone();
        let closure = Closure::once(move |time: f64| {
            game_loop(app_clone, time);
        });
        if let Ok(id) = window.request_animation_frame(closure.as_ref().unchecked_ref()) {
            app.borrow_mut().raf_id = Some(id);
        }
        closure.forget();
    }

    fn game_loop(app: Rc<RefCell<App>>, time: f64) {
        {
            let mut a = app.borrow_mut();
            if a.stopped {
                return;
            }
            a.frame(time);
        }

        request_animation_frame(app);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    wasm_game::run().await;
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Headless demo: `neon-glide [seed] [mode] [difficulty]`
#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use neon_glide::audio::AudioManager;
    use neon_glide::prng::seed_from_string;
    use neon_glide::renderer::{Visuals, build};
    use neon_glide::{FrameOutcome, Game, HighScores};

    env_logger::init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let seed = seed_from_string(args.first().map(String::as_str).unwrap_or("neon-glide"));

    let mut game = Game::new(seed, 480.0, 800.0, 1.0);
    game.set_mode(args.get(1).map(String::as_str).unwrap_or("endless"));
    game.set_difficulty(args.get(2).map(String::as_str).unwrap_or("normal"));

    log::info!(
        "Neon Glide (native) headless run: {} / {}",
        game.difficulty().as_str(),
        game.mode().as_str()
    );

    let mut audio = AudioManager::new();
    audio.unlock();
    let mut visuals = Visuals::new(u64::from(seed));
    let mut high_scores = HighScores::load();

    game.start();

    const DT: f32 = 1.0 / 60.0;
    const MAX_FRAMES: u32 = 60 * 180;
    let mut cues = 0;
    let mut frames = 0;
    let mut final_score = None;

    while frames < MAX_FRAMES {
        let input = autopilot(game.state());
        let outcome = game.advance(DT, &input);
        cues += audio.play_events(&game.drain_game_events());
        visuals.advance(DT);
        frames += 1;

        if let FrameOutcome::GameOver { score } = outcome {
            final_score = Some(score);
            break;
        }
    }

    let vertices = build(game.state(), game.is_paused(), &mut visuals);
    let score = final_score.unwrap_or_else(|| game.state().display_score());
    let mode = game.mode();
    if high_scores.record(mode, score) {
        high_scores.save(mode);
    }

    log::info!(
        "{} after {:.1}s: score {}, {} sound cues, last frame {} vertices",
        if final_score.is_some() { "Destroyed" } else { "Survived" },
        game.state().time,
        score,
        cues,
        vertices.len()
    );

    match serde_json::to_string(&game.hud()) {
        Ok(json) => println!("{}", json),
        Err(e) => log::error!("Failed to serialize HUD: {}", e),
    }
}

/// Keep firing and drift under the lowest enemy still above the ship
#[cfg(not(target_arch = "wasm32"))]
fn autopilot(state: &neon_glide::sim::SimState) -> neon_glide::sim::InputIntent {
    let player = &state.player;
    let target = state
        .enemies
        .iter()
        .filter(|e| e.pos.y < player.pos.y - 60.0)
        .max_by(|a, b| a.pos.y.total_cmp(&b.pos.y))
        .map(|e| e.pos.x);

    neon_glide::sim::InputIntent {
        fire: true,
        pointer_x: target,
        ..Default::default()
    }
}
