//! Pointer, touch and wheel handling.
//!
//! Each handler is a plain state transition on the [`Scene`], so the web
//! layer only has to translate DOM events and tests can drive them directly.

use crate::scene::Scene;
use glam::Vec2;

pub const WHEEL_ZOOM_GAIN: f32 = 0.0008;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum InputEvent {
    PointerMove(Vec2),
    PointerLeave,
    Click,
    Wheel { delta_y: f32 },
    TouchStart(Vec2),
    TouchMove(Vec2),
}

impl Scene {
    pub fn apply_input(&mut self, event: InputEvent) {
        match event {
            InputEvent::PointerMove(at) => self.on_pointer_move(at),
            InputEvent::PointerLeave => self.on_pointer_leave(),
            InputEvent::Click => self.on_click(),
            InputEvent::Wheel { delta_y } => self.on_wheel(delta_y),
            InputEvent::TouchStart(at) => self.on_touch_start(at),
            InputEvent::TouchMove(at) => self.on_touch_move(at),
        }
    }

    pub fn on_pointer_move(&mut self, at: Vec2) {
        self.pointer.screen = at;
        self.pointer.active = true;
        self.pointer.last_active_frame = Some(self.camera.frame);
    }

    pub fn on_pointer_leave(&mut self) {
        self.pointer.active = false;
    }

    pub fn on_click(&mut self) {
        self.repel_at_pointer();
    }

    pub fn on_wheel(&mut self, delta_y: f32) {
        let zoom = self.camera.zoom - delta_y * WHEEL_ZOOM_GAIN;
        self.camera.set_zoom(zoom);
    }

    /// A tap moves the pointer and bursts, but does not start tracking.
    pub fn on_touch_start(&mut self, at: Vec2) {
        self.pointer.screen = at;
        self.repel_at_pointer();
    }

    pub fn on_touch_move(&mut self, at: Vec2) {
        self.on_pointer_move(at);
    }

    fn repel_at_pointer(&mut self) {
        self.refresh_pointer_world();
        let origin = self.pointer.world;
        let (field, config) = self.field_and_config();
        field.apply_repel_burst(origin, config);
        log::debug!(
            "[input] repel burst at ({:.1},{:.1},{:.1})",
            origin.x,
            origin.y,
            origin.z
        );
    }
}
