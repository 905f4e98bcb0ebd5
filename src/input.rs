// Pure conversions from raw DOM numbers; no web-sys types so the host tests
// can include this file directly.
use glam::Vec2;

/// Map a client-space point into the canvas backing store.
///
/// `rect_origin`/`rect_size` come from the canvas bounding rect and
/// `backing` is the canvas width/height attribute.
#[inline]
pub fn client_to_canvas_px(client: Vec2, rect_origin: Vec2, rect_size: Vec2, backing: Vec2) -> Vec2 {
    let local = client - rect_origin;
    if rect_size.x > 0.0 && rect_size.y > 0.0 {
        local / rect_size * backing
    } else {
        local
    }
}

/// Window inner size as a backing-store size, or `None` when the browser
/// reports something unusable.
#[inline]
pub fn window_backing_size(inner_width: Option<f64>, inner_height: Option<f64>, min_px: u32) -> Option<(u32, u32)> {
    let w = inner_width?;
    let h = inner_height?;
    if !(w.is_finite() && h.is_finite()) || w < 0.0 || h < 0.0 {
        return None;
    }
    Some(((w as u32).max(min_px), (h as u32).max(min_px)))
}
