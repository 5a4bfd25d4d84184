//! Impulse Flow entry point
//!
//! Web: attaches the overlay canvas and runs the animation loop.
//! Native: runs a short headless simulation and logs a summary.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_app {
    use std::cell::RefCell;
    use std::rc::Rc;

    use glam::Vec2;
    use wasm_bindgen::prelude::*;
    use web_sys::PointerEvent;

    use impulse_flow::FramePacer;
    use impulse_flow::platform::{self, Overlay, PlatformError};
    use impulse_flow::renderer::render_frames;
    use impulse_flow::sim::{FrameInput, Scene, tick};

    /// Animation instance holding all state
    struct App {
        scene: Scene,
        overlay: Overlay,
        input: FrameInput,
        pacer: FramePacer,
    }

    impl App {
        /// Run the simulation steps owed at `time_ms`; returns how many ran
        fn update(&mut self, time_ms: f64) -> u32 {
            let steps = self.pacer.frame(time_ms);
            for _ in 0..steps {
                tick(&mut self.scene, &self.input);

                // Clear one-shot inputs after processing
                self.input.clear_oneshots();
            }
            steps
        }

        fn render(&mut self, steps: u32) {
            render_frames(&self.scene, steps, &mut self.overlay);
        }
    }

    pub fn run() -> Result<(), PlatformError> {
        console_error_panic_hook::set_once();
        if let Err(e) = console_log::init_with_level(log::Level::Info) {
            web_sys::console::warn_1(&format!("logger already set: {e}").into());
        }

        let window = platform::window()?;
        let document = platform::document()?;

        let tuning = platform::load_tuning(&document);
        let overlay = Overlay::attach(&document)?;
        let size = platform::viewport_size(&window)?;
        overlay.resize(size);

        let seed = js_sys::Date::now() as u64;
        let scene = Scene::new(seed, tuning, size);
        log::info!(
            "Impulse Flow started: seed {}, {} balls, {}x{}",
            seed,
            scene.balls.len(),
            size.x,
            size.y
        );

        let app = Rc::new(RefCell::new(App {
            scene,
            overlay,
            input: FrameInput::default(),
            pacer: FramePacer::new(),
        }));

        setup_input_handlers(&window, app.clone())?;
        request_animation_frame(app);
        Ok(())
    }

    fn setup_input_handlers(
        window: &web_sys::Window,
        app: Rc<RefCell<App>>,
    ) -> Result<(), PlatformError> {
        // Pointer move - continuous cursor position
        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: PointerEvent| {
                let pos = Vec2::new(event.client_x() as f32, event.client_y() as f32);
                app.borrow_mut().input.pointer = Some(pos);
            });
            window
                .add_event_listener_with_callback("pointermove", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        // Pointer down - queue a shockwave
        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: PointerEvent| {
                let pos = Vec2::new(event.client_x() as f32, event.client_y() as f32);
                let mut a = app.borrow_mut();
                a.input.pointer = Some(pos);
                a.input.presses.push(pos);
            });
            window
                .add_event_listener_with_callback("pointerdown", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        // Resize - canvas follows the viewport immediately, scene on next frame
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                let Ok(window) = platform::window() else {
                    return;
                };
                match platform::viewport_size(&window) {
                    Ok(size) => {
                        let mut a = app.borrow_mut();
                        a.overlay.resize(size);
                        a.input.resize = Some(size);
                    }
                    Err(e) => log::warn!("Resize ignored: {e}"),
                }
            });
            window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        Ok(())
    }

    fn request_animation_frame(app: Rc<RefCell<App>>) {
        let Ok(window) = platform::window() else {
            log::error!("No window; animation stopped");
            return;
        };
        let closure = Closure::once(move |time: f64| {
            frame_loop(app, time);
        });
        if let Err(e) = window.request_animation_frame(closure.as_ref().unchecked_ref()) {
            log::error!("requestAnimationFrame failed: {e:?}");
            return;
        }
        closure.forget();
    }

    fn frame_loop(app: Rc<RefCell<App>>, time: f64) {
        {
            let mut a = app.borrow_mut();

            // Frames faster than the step rate draw nothing, so trails keep
            // the same length on high refresh displays
            let steps = a.update(time);
            if steps > 0 {
                a.render(steps);
            }
        }

        request_animation_frame(app);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    if let Err(e) = wasm_app::run() {
        log::error!("Impulse Flow failed to start: {e}");
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use glam::Vec2;
    use impulse_flow::renderer::{DrawList, render_frames};
    use impulse_flow::sim::{FrameInput, Scene, tick};
    use impulse_flow::{FramePacer, Tuning};

    env_logger::init();
    log::info!("Impulse Flow (native) starting...");
    log::info!("Native mode is headless - run with `trunk serve` for the web version");

    let size = Vec2::new(1280.0, 720.0);
    let mut scene = Scene::new(2024, Tuning::default(), size);
    let mut input = FrameInput::default();
    let mut pacer = FramePacer::new();
    let mut list = DrawList::new();
    let mut peak_particles = 0;
    let mut drawn = 0u32;

    // Ten seconds on a 144 Hz display: sweep the cursor across the screen
    // and click every two seconds
    let display_frames = 1440u32;
    let frame_ms = 1000.0 / 144.0;
    for display_frame in 0..display_frames {
        let t = display_frame as f32 / display_frames as f32;
        input.pointer = Some(Vec2::new(size.x * t, size.y * 0.5));
        if display_frame % 288 == 0 {
            input.presses.push(size * 0.5);
        }

        let steps = pacer.frame(display_frame as f64 * frame_ms);
        for _ in 0..steps {
            tick(&mut scene, &input);
            input.clear_oneshots();
        }
        if steps == 0 {
            continue;
        }

        list.clear();
        render_frames(&scene, steps, &mut list);
        drawn += 1;
        peak_particles = peak_particles.max(scene.particles.len());
    }

    log::info!("{display_frames} display frames, {drawn} drawn");
    log::info!(
        "{} frames: {} balls, {} particles live (peak {}), {} shockwaves, {} draw calls last frame",
        scene.frame,
        scene.balls.len(),
        scene.particles.len(),
        peak_particles,
        scene.shockwaves.len(),
        list.cmds.len()
    );
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
