use super::listen;
use crate::dom;
use neural_core::{Scene, Viewport};
use std::cell::RefCell;
use std::rc::Rc;
use web_sys as web;

/// Keep the canvas backing store and the scene viewport in step with the window.
pub fn wire_resize(canvas: web::HtmlCanvasElement, scene: Rc<RefCell<Scene>>) {
    let Some(window) = web::window() else {
        return;
    };
    listen(&window, "resize", false, move |_: web::Event| {
        let Some((width, height)) = dom::sync_canvas_to_window(&canvas) else {
            return;
        };
        match Viewport::new(width as f32, height as f32) {
            Ok(vp) => {
                if scene.borrow_mut().resize(vp) {
                    log::info!("[resize] {}x{} rebuilt field", width, height);
                }
            }
            Err(e) => log::warn!("[resize] ignored: {}", e),
        }
    });
}
