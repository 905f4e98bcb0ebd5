use crate::config::{SimConfig, Viewport};
use crate::field::Field;
use crate::math::{project, unproject_pointer, Projection};
use crate::particle::StepContext;
use crate::render::{draw_frame, FrameView, Surface};
use crate::state::{CameraState, PointerState};

// Idle auto-rotation
pub const IDLE_AFTER_FRAMES: u64 = 180;
pub const IDLE_DRIFT_Y: f64 = 0.00028;
pub const IDLE_DRIFT_X: f64 = 0.00011;

// Pointer-tracking rotation
pub const TRACK_EASE: f64 = 0.014;
pub const TRACK_BASE_X: f64 = 0.18;
pub const TRACK_SPAN_X: f64 = 0.65;
pub const TRACK_SPAN_Y: f64 = 1.3;

/// How the camera rotation is driven on a frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RotationMode {
    Idle,
    Tracking,
}

/// The whole simulation context: config, viewport, camera, pointer and the
/// particle field, plus reusable per-frame buffers.
pub struct Scene {
    config: SimConfig,
    viewport: Viewport,
    pub camera: CameraState,
    pub pointer: PointerState,
    field: Field,
    projections: Vec<Projection>,
    order: Vec<usize>,
}

impl Scene {
    pub fn new(config: SimConfig, viewport: Viewport, seed: u64) -> Self {
        let mut field = Field::new(seed);
        field.configure_for_viewport(&viewport, &config);
        log::info!(
            "[scene] {}x{} particles={} seed={}",
            viewport.width(),
            viewport.height(),
            field.len(),
            seed
        );
        Self {
            pointer: PointerState::centered(viewport.center()),
            camera: CameraState::default(),
            config,
            viewport,
            field,
            projections: Vec::new(),
            order: Vec::new(),
        }
    }

    /// Apply a new viewport. Returns `true` if the field was reallocated.
    pub fn resize(&mut self, viewport: Viewport) -> bool {
        self.viewport = viewport;
        self.field.configure_for_viewport(&self.viewport, &self.config)
    }

    pub fn rotation_mode(&self) -> RotationMode {
        match self.pointer.frames_since_active(self.camera.frame) {
            Some(n) if n <= IDLE_AFTER_FRAMES => RotationMode::Tracking,
            _ => RotationMode::Idle,
        }
    }

    /// Simulation half of a frame: rotation, pointer unprojection, particle
    /// update, projection and depth sort.
    pub fn advance(&mut self) {
        self.camera.frame += 1;
        self.update_rotation();
        self.refresh_pointer_world();

        let ctx = StepContext {
            config: &self.config,
            viewport: &self.viewport,
            attractor: self.pointer.active.then_some(self.pointer.world),
        };
        self.field.tick(&ctx);

        let center = self.viewport.center();
        let (camera, cfg) = (&self.camera, &self.config);
        self.projections.clear();
        self.projections.extend(
            self.field
                .particles()
                .iter()
                .map(|p| project(p.position, camera, center, cfg.fov, cfg.depth)),
        );

        let projections = &self.projections;
        self.order.clear();
        self.order.extend(0..projections.len());
        self.order
            .sort_by(|&a, &b| projections[a].depth.total_cmp(&projections[b].depth));
    }

    /// One full frame: [`Scene::advance`] then paint onto `surface`.
    pub fn run_frame<S: Surface + ?Sized>(&mut self, surface: &mut S) {
        self.advance();
        let connect_distance = self.field.connect_distance();
        let (particles, connections) = self.field.render_parts();
        let view = FrameView {
            viewport: &self.viewport,
            pointer: &self.pointer,
            frame: self.camera.frame,
            particles,
            projections: &self.projections,
            order: &self.order,
            connect_distance,
        };
        draw_frame(surface, &view, connections, &self.config);
    }

    fn update_rotation(&mut self) {
        let mode = self.rotation_mode();
        let cam = &mut self.camera;
        match mode {
            RotationMode::Idle => {
                cam.rot_y += IDLE_DRIFT_Y;
                cam.rot_x += IDLE_DRIFT_X;
            }
            RotationMode::Tracking => {
                let p = self.pointer.screen.as_dvec2();
                let (w, h) = (self.viewport.width() as f64, self.viewport.height() as f64);
                let target_x = TRACK_BASE_X + (p.y / h - 0.5) * TRACK_SPAN_X;
                let target_y = (p.x / w - 0.5) * TRACK_SPAN_Y;
                cam.rot_x += (target_x - cam.rot_x) * TRACK_EASE;
                cam.rot_y += (target_y - cam.rot_y) * TRACK_EASE;
            }
        }
    }

    pub(crate) fn refresh_pointer_world(&mut self) {
        self.pointer.world =
            unproject_pointer(self.pointer.screen, self.viewport.center(), &self.camera);
    }

    pub(crate) fn field_and_config(&mut self) -> (&mut Field, &SimConfig) {
        (&mut self.field, &self.config)
    }

    #[inline]
    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    #[inline]
    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    #[inline]
    pub fn field(&self) -> &Field {
        &self.field
    }

    #[inline]
    pub fn field_mut(&mut self) -> &mut Field {
        &mut self.field
    }

    /// Projections from the last [`Scene::advance`], indexed like the particles.
    #[inline]
    pub fn projections(&self) -> &[Projection] {
        &self.projections
    }

    /// Particle indices from the last [`Scene::advance`], back to front.
    #[inline]
    pub fn depth_order(&self) -> &[usize] {
        &self.order
    }
}
