//! Camera and pointer state shared by the loop, input and renderer.
//!
//! Both types are plain data; the scene owns them and mutates them from
//! input handlers and the per-frame step.

use glam::{Vec2, Vec3};
use std::f64::consts::TAU;

pub const MIN_ZOOM: f32 = 0.4;
pub const MAX_ZOOM: f32 = 2.2;

/// Orbit camera: rotation about two axes plus a zoom factor on the fov.
///
/// The angles accumulate without bound while idle, so they are kept in f64.
#[derive(Clone, Debug, PartialEq)]
pub struct CameraState {
    pub rot_x: f64,
    pub rot_y: f64,
    pub zoom: f32,
    pub frame: u64,
}

impl Default for CameraState {
    fn default() -> Self {
        Self {
            rot_x: 0.18,
            rot_y: 0.0,
            zoom: 1.75,
            frame: 0,
        }
    }
}

impl CameraState {
    pub fn set_zoom(&mut self, zoom: f32) {
        self.zoom = zoom.clamp(MIN_ZOOM, MAX_ZOOM);
    }

    /// `(rot_x, rot_y)` reduced to one turn for f32 trigonometry.
    #[inline]
    pub fn angles(&self) -> (f32, f32) {
        (
            self.rot_x.rem_euclid(TAU) as f32,
            self.rot_y.rem_euclid(TAU) as f32,
        )
    }
}

/// Pointer (mouse or touch) as seen by the simulation.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PointerState {
    pub screen: Vec2,
    /// Approximate world-space position on the z = 0 plane.
    pub world: Vec3,
    pub active: bool,
    /// Frame of the last move; `None` until the pointer is first seen.
    pub last_active_frame: Option<u64>,
}

impl PointerState {
    pub fn centered(center: Vec2) -> Self {
        Self {
            screen: center,
            ..Default::default()
        }
    }

    /// Frames elapsed since the last pointer move, if there was one.
    pub fn frames_since_active(&self, frame: u64) -> Option<u64> {
        self.last_active_frame.map(|f| frame.saturating_sub(f))
    }
}
