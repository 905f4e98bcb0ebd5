use crate::config::Viewport;
use crate::state::CameraState;
use glam::{Vec2, Vec3};

// Perspective divides at or below this are treated as behind the camera
pub const MIN_PERSPECTIVE: f32 = 1.0;
pub const BEHIND_CAMERA_SCALE: f32 = 0.001;

// Light factor shaping
pub const LIGHT_FALLOFF: f32 = 1.25;
pub const LIGHT_FLOOR: f32 = 0.18;

/// Screen-space result of projecting a world point.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Projection {
    pub screen: Vec2,
    pub scale: f32,
    /// Post-rotation z, larger is nearer to the viewer's back plane.
    pub depth: f32,
}

#[inline]
pub fn distance(a: Vec3, b: Vec3) -> f32 {
    (a - b).length()
}

/// Rotate about the vertical axis by `rot_y`, then about the horizontal axis by `rot_x`.
#[inline]
pub fn rotate(point: Vec3, rot_x: f32, rot_y: f32) -> Vec3 {
    let (s_y, c_y) = rot_y.sin_cos();
    let rx = point.x * c_y - point.z * s_y;
    let rz = point.x * s_y + point.z * c_y;

    let (s_x, c_x) = rot_x.sin_cos();
    let ry = point.y * c_x - rz * s_x;
    let fz = point.y * s_x + rz * c_x;
    Vec3::new(rx, ry, fz)
}

pub fn project(point: Vec3, camera: &CameraState, center: Vec2, fov: f32, depth: f32) -> Projection {
    let (rot_x, rot_y) = camera.angles();
    let r = rotate(point, rot_x, rot_y);
    let fov = fov * camera.zoom;
    let persp = fov + r.z + depth;
    let scale = if persp > MIN_PERSPECTIVE {
        fov / persp
    } else {
        BEHIND_CAMERA_SCALE
    };
    Projection {
        screen: center + Vec2::new(r.x, r.y) * scale,
        scale,
        depth: r.z,
    }
}

/// Brightness in [0.18, 1] from the distance between a screen point and the light.
pub fn light_factor(screen: Vec2, viewport: &Viewport, light: Vec2) -> f32 {
    let n = screen / viewport.size() - Vec2::splat(0.5);
    (1.0 - (n - light).length() * LIGHT_FALLOFF).max(LIGHT_FLOOR)
}

/// Map a screen point back onto the world z = 0 plane.
///
/// Undoes the camera rotation in reverse order (X, then Y) with negated
/// angles. This ignores perspective, so it does not exactly invert
/// [`project`]; it is only used to steer pointer forces.
pub fn unproject_pointer(screen: Vec2, center: Vec2, camera: &CameraState) -> Vec3 {
    let s = screen - center;
    let (rot_x, rot_y) = camera.angles();

    let (s_x, c_x) = (-rot_x).sin_cos();
    let uy = s.y * c_x;
    let uz = s.y * s_x;

    let (s_y, c_y) = (-rot_y).sin_cos();
    let ux = s.x * c_y - uz * s_y;
    let uuz = s.x * s_y + uz * c_y;
    Vec3::new(ux, uy, uuz)
}
