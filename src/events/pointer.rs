use super::listen;
use crate::input;
use glam::Vec2;
use neural_core::{InputEvent, Scene};
use std::cell::RefCell;
use std::rc::Rc;
use web_sys as web;

#[derive(Clone)]
pub struct InputWiring {
    pub canvas: web::HtmlCanvasElement,
    pub scene: Rc<RefCell<Scene>>,
}

impl InputWiring {
    fn canvas_px(&self, client_x: i32, client_y: i32) -> Vec2 {
        let rect = self.canvas.get_bounding_client_rect();
        input::client_to_canvas_px(
            Vec2::new(client_x as f32, client_y as f32),
            Vec2::new(rect.left() as f32, rect.top() as f32),
            Vec2::new(rect.width() as f32, rect.height() as f32),
            Vec2::new(self.canvas.width() as f32, self.canvas.height() as f32),
        )
    }

    fn first_touch_px(&self, ev: &web::TouchEvent) -> Option<Vec2> {
        let t = ev.touches().get(0)?;
        Some(self.canvas_px(t.client_x(), t.client_y()))
    }

    fn send(&self, event: InputEvent) {
        self.scene.borrow_mut().apply_input(event);
    }
}

pub fn wire_input_handlers(w: InputWiring) {
    let Some(window) = web::window() else {
        return;
    };
    wire_mouse(&window, &w);
    wire_wheel(&window, &w);
    wire_touch(&window, &w);
}

fn wire_mouse(window: &web::Window, w: &InputWiring) {
    let wm = w.clone();
    listen(window, "mousemove", false, move |ev: web::MouseEvent| {
        let at = wm.canvas_px(ev.client_x(), ev.client_y());
        wm.send(InputEvent::PointerMove(at));
    });

    // mouseleave does not reach the window; the root element sees the pointer exit the page
    if let Some(root) = window.document().and_then(|d| d.document_element()) {
        let wl = w.clone();
        listen(&root, "mouseleave", false, move |_: web::MouseEvent| {
            wl.send(InputEvent::PointerLeave);
        });
    }

    let wc = w.clone();
    listen(window, "click", false, move |_: web::MouseEvent| {
        wc.send(InputEvent::Click);
    });
}

fn wire_wheel(window: &web::Window, w: &InputWiring) {
    let w = w.clone();
    listen(window, "wheel", true, move |ev: web::WheelEvent| {
        w.send(InputEvent::Wheel {
            delta_y: ev.delta_y() as f32,
        });
    });
}

fn wire_touch(window: &web::Window, w: &InputWiring) {
    let wm = w.clone();
    listen(window, "touchmove", true, move |ev: web::TouchEvent| {
        if let Some(at) = wm.first_touch_px(&ev) {
            wm.send(InputEvent::TouchMove(at));
        }
    });

    let ws = w.clone();
    listen(window, "touchstart", true, move |ev: web::TouchEvent| {
        if let Some(at) = ws.first_touch_px(&ev) {
            ws.send(InputEvent::TouchStart(at));
            log::debug!("[touch] burst at ({:.0},{:.0})", at.x, at.y);
        }
    });
}
