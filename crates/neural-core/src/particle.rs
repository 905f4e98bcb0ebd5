use crate::config::{SimConfig, Viewport};
use glam::Vec3;
use rand::Rng;
use std::f32::consts::TAU;

// Wander spring toward the current target
const WANDER_PULL_XY: f32 = 0.00007;
const WANDER_PULL_Z: f32 = 0.00005;
// Retarget countdown ranges (ticks)
const INITIAL_RETARGET_MAX: u32 = 180;
const RETARGET_MIN: u32 = 130;
const RETARGET_MAX: u32 = 350;

// Pointer attraction gain and z damping
const ATTRACT_GAIN: f32 = 0.013;
const ATTRACT_Z: f32 = 0.45;
const REPEL_Z: f32 = 0.55;

// Impulses are skipped this close to the source to avoid blowing up the normalization
pub const MIN_FORCE_DISTANCE: f32 = 1.0;

/// One point mass. Identity is its index in the field.
#[derive(Clone, Debug, PartialEq)]
pub struct Particle {
    pub position: Vec3,
    pub velocity: Vec3,
    pub target: Vec3,
    pub retarget: u32,
    pub phase: f32,
    pub pulse_speed: f32,
    pub base_size: f32,
}

/// Read-only inputs shared by every particle on a tick.
#[derive(Clone, Copy, Debug)]
pub struct StepContext<'a> {
    pub config: &'a SimConfig,
    pub viewport: &'a Viewport,
    /// World-space pointer position while the pointer is active.
    pub attractor: Option<Vec3>,
}

#[inline]
fn centered<R: Rng + ?Sized>(rng: &mut R) -> f32 {
    rng.gen::<f32>() - 0.5
}

impl Particle {
    pub fn spawn<R: Rng + ?Sized>(rng: &mut R, config: &SimConfig, viewport: &Viewport) -> Self {
        let (w, h) = (viewport.width(), viewport.height());
        let position = Vec3::new(
            centered(rng) * w * 2.4,
            centered(rng) * h * 2.4,
            centered(rng) * config.depth * 3.2,
        );
        let velocity = Vec3::new(
            centered(rng) * config.speed,
            centered(rng) * config.speed,
            centered(rng) * config.speed * 0.6,
        );
        let mut p = Self {
            position,
            velocity,
            target: Vec3::ZERO,
            retarget: 0,
            phase: rng.gen::<f32>() * TAU,
            pulse_speed: 0.015 + rng.gen::<f32>() * 0.028,
            base_size: 1.6 + rng.gen::<f32>() * 2.4,
        };
        p.pick_target(rng, config, viewport);
        p.retarget = rng.gen_range(0..INITIAL_RETARGET_MAX);
        p
    }

    fn pick_target<R: Rng + ?Sized>(&mut self, rng: &mut R, config: &SimConfig, viewport: &Viewport) {
        self.target = Vec3::new(
            centered(rng) * viewport.width() * 2.0,
            centered(rng) * viewport.height() * 2.0,
            centered(rng) * config.depth * 2.8,
        );
        self.retarget = rng.gen_range(RETARGET_MIN..RETARGET_MAX);
    }

    /// Advance one tick: wander, turbulence, pointer pull, drag, speed cap,
    /// integration and wrap.
    pub fn update<R: Rng + ?Sized>(&mut self, ctx: &StepContext<'_>, rng: &mut R) {
        let cfg = ctx.config;

        self.retarget = self.retarget.saturating_sub(1);
        if self.retarget == 0 {
            self.pick_target(rng, cfg, ctx.viewport);
        }
        let pull = self.target - self.position;
        self.velocity += pull * Vec3::new(WANDER_PULL_XY, WANDER_PULL_XY, WANDER_PULL_Z);

        self.velocity += Vec3::new(
            centered(rng) * cfg.turbulence,
            centered(rng) * cfg.turbulence,
            centered(rng) * cfg.turbulence * 0.5,
        );

        if let Some(attractor) = ctx.attractor {
            let offset = attractor - self.position;
            let d = offset.length();
            if d < cfg.mouse_radius && d > MIN_FORCE_DISTANCE {
                let f = (1.0 - d / cfg.mouse_radius) * cfg.mouse_strength * ATTRACT_GAIN;
                self.velocity += offset / d * f * Vec3::new(1.0, 1.0, ATTRACT_Z);
            }
        }

        self.velocity *= cfg.drag;

        let max = cfg.max_speed();
        let speed = self.velocity.length();
        if speed > max {
            self.velocity *= max / speed;
        }

        self.position += self.velocity;
        self.phase = (self.phase + self.pulse_speed).rem_euclid(TAU);

        let b = cfg.wrap_extents(ctx.viewport);
        self.position = Vec3::new(
            wrap(self.position.x, b.x),
            wrap(self.position.y, b.y),
            wrap(self.position.z, b.z),
        );
    }

    /// Push away from `origin` with a linear falloff over `config.repel_radius`.
    pub fn repel_from(&mut self, origin: Vec3, config: &SimConfig) {
        let offset = self.position - origin;
        let d = offset.length();
        if d < config.repel_radius && d > MIN_FORCE_DISTANCE {
            let f = (1.0 - d / config.repel_radius) * config.repel_strength;
            self.velocity += offset / d * f * Vec3::new(1.0, 1.0, REPEL_Z);
        }
    }
}

/// Teleport to the opposite face when outside `[-half, half]`.
#[inline]
fn wrap(v: f32, half: f32) -> f32 {
    if v > half {
        -half
    } else if v < -half {
        half
    } else {
        v
    }
}
