#![cfg(target_arch = "wasm32")]
use neural_core::{Scene, SimConfig, Viewport};
use std::cell::RefCell;
use std::rc::Rc;
use std::sync::atomic::{AtomicBool, Ordering};
use wasm_bindgen::prelude::*;

mod canvas;
mod constants;
mod dom;
mod events;
mod frame;
mod input;

use constants::CANVAS_ID;

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("neural-web starting");

    if let Err(e) = init() {
        log::error!("init error: {:?}", e);
    }
    Ok(())
}

fn random_seed() -> u64 {
    let hi = (js_sys::Math::random() * u32::MAX as f64) as u64;
    let lo = (js_sys::Math::random() * u32::MAX as f64) as u64;
    (hi << 32) | lo
}

fn init() -> anyhow::Result<()> {
    // One field per page
    static STARTED: AtomicBool = AtomicBool::new(false);
    if STARTED.swap(true, Ordering::SeqCst) {
        return Ok(());
    }

    let document = dom::window_document().ok_or_else(|| anyhow::anyhow!("no window document"))?;

    // Pages without the background canvas simply do not run the field
    let Some(canvas) = dom::find_canvas(&document, CANVAS_ID) else {
        log::info!("no #{} canvas; field disabled", CANVAS_ID);
        return Ok(());
    };
    let Some(surface) = canvas::CanvasSurface::from_canvas(&canvas)? else {
        log::info!("#{} has no 2d context; field disabled", CANVAS_ID);
        return Ok(());
    };

    let (width, height) =
        dom::sync_canvas_to_window(&canvas).ok_or_else(|| anyhow::anyhow!("no window size"))?;
    let viewport = Viewport::new(width as f32, height as f32)?;
    let scene = Rc::new(RefCell::new(Scene::new(
        SimConfig::default(),
        viewport,
        random_seed(),
    )));

    events::wire_resize(canvas.clone(), scene.clone());
    events::wire_input_handlers(events::InputWiring {
        canvas: canvas.clone(),
        scene: scene.clone(),
    });

    let frame_ctx = Rc::new(RefCell::new(frame::FrameContext::new(scene, surface, canvas)));
    frame::start_loop(frame_ctx);
    Ok(())
}
