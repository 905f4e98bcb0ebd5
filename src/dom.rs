use crate::constants::MIN_BACKING_PX;
use crate::input;
use wasm_bindgen::JsCast;
use web_sys as web;

#[inline]
pub fn window_document() -> Option<web::Document> {
    web::window().and_then(|w| w.document())
}

/// The canvas with `id`, or `None` if missing or not a canvas.
pub fn find_canvas(document: &web::Document, id: &str) -> Option<web::HtmlCanvasElement> {
    document
        .get_element_by_id(id)?
        .dyn_into::<web::HtmlCanvasElement>()
        .ok()
}

/// Size the canvas backing store to the window and return the new size.
pub fn sync_canvas_to_window(canvas: &web::HtmlCanvasElement) -> Option<(u32, u32)> {
    let w = web::window()?;
    let (width, height) = input::window_backing_size(
        w.inner_width().ok().and_then(|v| v.as_f64()),
        w.inner_height().ok().and_then(|v| v.as_f64()),
        MIN_BACKING_PX,
    )?;
    canvas.set_width(width);
    canvas.set_height(height);
    Some((width, height))
}
