use crate::canvas::CanvasSurface;
use crate::constants::FPS_LOG_INTERVAL_FRAMES;
use instant::Instant;
use neural_core::Scene;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

pub struct FrameContext {
    pub scene: Rc<RefCell<Scene>>,
    pub surface: CanvasSurface,
    pub canvas: web::HtmlCanvasElement,

    last_report: Instant,
    frames_since_report: u32,
}

impl FrameContext {
    pub fn new(scene: Rc<RefCell<Scene>>, surface: CanvasSurface, canvas: web::HtmlCanvasElement) -> Self {
        Self {
            scene,
            surface,
            canvas,
            last_report: Instant::now(),
            frames_since_report: 0,
        }
    }

    /// Run one frame. Returns `false` once the canvas has left the document.
    pub fn frame(&mut self) -> bool {
        if !self.canvas.is_connected() {
            log::info!("[frame] canvas detached; stopping");
            return false;
        }
        self.scene.borrow_mut().run_frame(&mut self.surface);
        self.report_rate();
        true
    }

    fn report_rate(&mut self) {
        self.frames_since_report += 1;
        if self.frames_since_report < FPS_LOG_INTERVAL_FRAMES {
            return;
        }
        let now = Instant::now();
        let secs = (now - self.last_report).as_secs_f32();
        if secs > 0.0 {
            let scene = self.scene.borrow();
            log::debug!(
                "[frame] {:.1} fps, {} particles, zoom {:.2}",
                self.frames_since_report as f32 / secs,
                scene.field().len(),
                scene.camera.zoom
            );
        }
        self.last_report = now;
        self.frames_since_report = 0;
    }
}

/// Drive `frame_ctx` from `requestAnimationFrame` until the canvas goes away.
pub fn start_loop(frame_ctx: Rc<RefCell<FrameContext>>) {
    let tick: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let tick_clone = tick.clone();
    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        if frame_ctx.borrow_mut().frame() {
            request_frame(&tick_clone);
        }
    }) as Box<dyn FnMut()>));
    request_frame(&tick);
}

fn request_frame(tick: &Rc<RefCell<Option<Closure<dyn FnMut()>>>>) {
    let Some(w) = web::window() else {
        return;
    };
    if let Some(cb) = tick.borrow().as_ref() {
        _ = w.request_animation_frame(cb.as_ref().unchecked_ref());
    }
}
