//! Frame painter.
//!
//! Everything is expressed as a handful of 2D primitives on a [`Surface`], so
//! the web canvas and the test recorder paint exactly the same frame.

use crate::config::{SimConfig, Viewport};
use crate::field::{link_target, ConnectionTable};
use crate::math::{distance, light_factor, Projection};
use crate::particle::Particle;
use crate::state::PointerState;
use glam::Vec2;
use smallvec::{smallvec, SmallVec};
use std::f64::consts::PI;
use std::fmt;

// Vignette
const VIGNETTE_INNER: f32 = 0.05;
const VIGNETTE_OUTER: f32 = 0.92;
const VIGNETTE_EDGE_ALPHA: f32 = 0.68;

// Links
pub const MIN_LINK_STRENGTH: f32 = 0.003;
const LINK_ALPHA_GAIN: f32 = 0.92;
const LINK_WIDTH_GAIN: f32 = 2.2;
const LINK_MIN_WIDTH: f32 = 0.2;

// Traveling pulses along strong links
pub const PULSE_MIN_STRENGTH: f32 = 0.18;
const PULSE_SPEED: f64 = 0.008;
const PULSE_OFFSETS: [f64; 2] = [0.0, 0.5];
const PULSE_ALPHA_GAIN: f32 = 0.85;
const PULSE_MIN_ALPHA: f32 = 0.04;
const PULSE_RADIUS_GAIN: f32 = 4.5;

// Orbs
const ORB_PULSE_BASE: f32 = 0.72;
const ORB_PULSE_SPAN: f32 = 0.28;
const ORB_RADIUS_GAIN: f32 = 2.4;
const ORB_ALPHA_GAIN: f32 = 2.1;
const HALO_RADIUS: f32 = 5.5;
const HALO_ALPHA: f32 = 0.4;
const MIN_LAYER_ALPHA: f32 = 0.01;
const SPECULAR_OFFSET: f32 = 0.35;

// Cursor
pub const CURSOR_OUTER_RADIUS: f32 = 10.0;
pub const CURSOR_INNER_RADIUS: f32 = 4.0;
const RING_INNER_RADIUS: f32 = 5.0;
pub const RING_OUTER_RADIUS: f32 = 65.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    #[inline]
    pub fn alpha(self, a: f32) -> Rgba {
        Rgba { rgb: self, a }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rgba {
    pub rgb: Rgb,
    pub a: f32,
}

/// CSS `rgba(...)` form, as accepted by canvas fill and stroke styles.
impl fmt::Display for Rgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "rgba({},{},{},{})",
            self.rgb.r,
            self.rgb.g,
            self.rgb.b,
            self.a.clamp(0.0, 1.0)
        )
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ColorStop {
    pub offset: f32,
    pub color: Rgba,
}

#[inline]
fn stop(offset: f32, color: Rgba) -> ColorStop {
    ColorStop { offset, color }
}

/// Two-circle radial gradient, same model as the canvas API.
#[derive(Clone, Debug, PartialEq)]
pub struct RadialGradient {
    pub start: Vec2,
    pub start_radius: f32,
    pub end: Vec2,
    pub end_radius: f32,
    pub stops: SmallVec<[ColorStop; 4]>,
}

#[derive(Clone, Debug, PartialEq)]
pub enum Fill {
    Solid(Rgba),
    Radial(RadialGradient),
}

/// Minimal 2D painting target.
pub trait Surface {
    fn fill_rect(&mut self, origin: Vec2, size: Vec2, fill: &Fill);
    fn fill_circle(&mut self, center: Vec2, radius: f32, fill: &Fill);
    /// Straight line with round caps.
    fn stroke_line(&mut self, from: Vec2, to: Vec2, width: f32, color: Rgba);
}

/// Everything the painter reads for one frame.
pub struct FrameView<'a> {
    pub viewport: &'a Viewport,
    pub pointer: &'a PointerState,
    pub frame: u64,
    pub particles: &'a [Particle],
    pub projections: &'a [Projection],
    /// Particle indices sorted back to front.
    pub order: &'a [usize],
    pub connect_distance: f32,
}

/// Paint one frame. Also advances the smoothed link strengths, one blend
/// step per unordered pair.
pub fn draw_frame<S: Surface + ?Sized>(
    surface: &mut S,
    view: &FrameView<'_>,
    connections: &mut ConnectionTable,
    config: &SimConfig,
) {
    draw_background(surface, view.viewport, config);
    draw_connections(surface, view, connections, config);
    for &i in view.order {
        draw_orb(surface, &view.particles[i], &view.projections[i], view.viewport, config);
    }
    if view.pointer.active {
        draw_cursor(surface, view.pointer.screen, config);
    }
}

fn draw_background<S: Surface + ?Sized>(surface: &mut S, viewport: &Viewport, config: &SimConfig) {
    let size = viewport.size();
    surface.fill_rect(Vec2::ZERO, size, &Fill::Solid(config.palette.background.alpha(1.0)));

    let c = viewport.center();
    let h = viewport.height();
    let vignette = RadialGradient {
        start: c,
        start_radius: h * VIGNETTE_INNER,
        end: c,
        end_radius: h * VIGNETTE_OUTER,
        stops: smallvec![
            stop(0.0, Rgb::BLACK.alpha(0.0)),
            stop(1.0, Rgb::BLACK.alpha(VIGNETTE_EDGE_ALPHA)),
        ],
    };
    surface.fill_rect(Vec2::ZERO, size, &Fill::Radial(vignette));
}

fn draw_connections<S: Surface + ?Sized>(
    surface: &mut S,
    view: &FrameView<'_>,
    connections: &mut ConnectionTable,
    config: &SimConfig,
) {
    let order = view.order;
    for (ii, &i) in order.iter().enumerate() {
        for &j in &order[ii + 1..] {
            let d = distance(view.particles[i].position, view.particles[j].position);
            let strength = connections.blend(i, j, link_target(d, view.connect_distance));
            if strength > MIN_LINK_STRENGTH {
                draw_link(
                    surface,
                    &view.projections[i],
                    &view.projections[j],
                    strength,
                    view,
                    config,
                );
            }
        }
    }
}

/// Position along a link of each traveling pulse on `frame`, in [0, 1).
pub fn pulse_positions(frame: u64) -> [f32; 2] {
    PULSE_OFFSETS.map(|o| ((frame as f64 * PULSE_SPEED + o) % 1.0) as f32)
}

fn draw_link<S: Surface + ?Sized>(
    surface: &mut S,
    a: &Projection,
    b: &Projection,
    strength: f32,
    view: &FrameView<'_>,
    config: &SimConfig,
) {
    let cyan = config.palette.cyan;
    let lf = (light_factor(a.screen, view.viewport, config.light)
        + light_factor(b.screen, view.viewport, config.light))
        * 0.5;
    let width = (strength * LINK_WIDTH_GAIN * a.scale.min(b.scale)).max(LINK_MIN_WIDTH);
    surface.stroke_line(a.screen, b.screen, width, cyan.alpha(strength * lf * LINK_ALPHA_GAIN));

    if strength <= PULSE_MIN_STRENGTH {
        return;
    }
    for t in pulse_positions(view.frame) {
        let alpha = strength * (t as f64 * PI).sin() as f32 * PULSE_ALPHA_GAIN;
        if alpha <= PULSE_MIN_ALPHA {
            continue;
        }
        let at = a.screen.lerp(b.screen, t);
        let radius = PULSE_RADIUS_GAIN * alpha;
        let glow = RadialGradient {
            start: at,
            start_radius: 0.0,
            end: at,
            end_radius: radius,
            stops: smallvec![
                stop(0.0, config.palette.photon.alpha(alpha)),
                stop(0.5, cyan.alpha(alpha * 0.5)),
                stop(1.0, cyan.alpha(0.0)),
            ],
        };
        surface.fill_circle(at, radius, &Fill::Radial(glow));
    }
}

/// Radius and alpha of a particle's orb for the current frame.
pub fn orb_shape(particle: &Particle, projection: &Projection, light: f32) -> (f32, f32) {
    let pulse = ORB_PULSE_BASE + ORB_PULSE_SPAN * particle.phase.sin();
    let radius = projection.scale * particle.base_size * ORB_RADIUS_GAIN * pulse;
    let alpha = (projection.scale * ORB_ALPHA_GAIN).min(1.0) * light;
    (radius, alpha)
}

fn draw_orb<S: Surface + ?Sized>(
    surface: &mut S,
    particle: &Particle,
    projection: &Projection,
    viewport: &Viewport,
    config: &SimConfig,
) {
    let palette = &config.palette;
    let lf = light_factor(projection.screen, viewport, config.light);
    let (r, alpha) = orb_shape(particle, projection, lf);
    if r <= 0.0 || alpha <= 0.0 {
        return;
    }
    let center = projection.screen;

    let halo_alpha = alpha * HALO_ALPHA;
    if halo_alpha > MIN_LAYER_ALPHA {
        let halo = RadialGradient {
            start: center,
            start_radius: 0.0,
            end: center,
            end_radius: r * HALO_RADIUS,
            stops: smallvec![
                stop(0.0, palette.cyan.alpha(halo_alpha)),
                stop(0.45, palette.teal.alpha(alpha * 0.12)),
                stop(1.0, palette.teal.alpha(0.0)),
            ],
        };
        surface.fill_circle(center, r * HALO_RADIUS, &Fill::Radial(halo));
    }

    if alpha > MIN_LAYER_ALPHA {
        let core = RadialGradient {
            start: center - Vec2::splat(r * SPECULAR_OFFSET),
            start_radius: 0.0,
            end: center,
            end_radius: r,
            stops: smallvec![
                stop(0.0, palette.highlight.alpha(alpha)),
                stop(0.35, palette.cyan.alpha(alpha)),
                stop(0.8, palette.teal.alpha(alpha * 0.85)),
                stop(1.0, palette.background.alpha(alpha * 0.35)),
            ],
        };
        surface.fill_circle(center, r, &Fill::Radial(core));
    }
}

fn draw_cursor<S: Surface + ?Sized>(surface: &mut S, at: Vec2, config: &SimConfig) {
    let cyan = config.palette.cyan;
    surface.fill_circle(at, CURSOR_OUTER_RADIUS, &Fill::Solid(cyan.alpha(0.4)));
    surface.fill_circle(at, CURSOR_INNER_RADIUS, &Fill::Solid(cyan.alpha(0.9)));

    let ring = RadialGradient {
        start: at,
        start_radius: RING_INNER_RADIUS,
        end: at,
        end_radius: RING_OUTER_RADIUS,
        stops: smallvec![
            stop(0.0, cyan.alpha(0.0)),
            stop(0.75, cyan.alpha(0.05)),
            stop(0.92, cyan.alpha(0.10)),
            stop(1.0, cyan.alpha(0.0)),
        ],
    };
    surface.fill_circle(at, RING_OUTER_RADIUS, &Fill::Radial(ring));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rgba_formats_as_css() {
        assert_eq!(Rgb::new(102, 252, 241).alpha(0.5).to_string(), "rgba(102,252,241,0.5)");
        assert_eq!(Rgb::BLACK.alpha(2.0).to_string(), "rgba(0,0,0,1)");
    }

    #[test]
    fn pulses_are_half_a_cycle_apart() {
        assert_eq!(pulse_positions(0), [0.0, 0.5]);
        let [a, b] = pulse_positions(100);
        assert!((a - 0.8).abs() < 1e-6);
        assert!((b - 0.3).abs() < 1e-6);
        for f in [1_u64, 77, 125, 10_000, 3_000_000] {
            for t in pulse_positions(f) {
                assert!((0.0..1.0).contains(&t));
            }
        }
    }

    #[test]
    fn orb_pulses_between_bounds() {
        let mut p = Particle {
            position: glam::Vec3::ZERO,
            velocity: glam::Vec3::ZERO,
            target: glam::Vec3::ZERO,
            retarget: 1,
            phase: std::f32::consts::FRAC_PI_2,
            pulse_speed: 0.0,
            base_size: 2.0,
        };
        let pj = Projection {
            screen: Vec2::ZERO,
            scale: 1.0,
            depth: 0.0,
        };
        let (r_max, alpha) = orb_shape(&p, &pj, 0.5);
        assert!((r_max - 2.0 * 2.4).abs() < 1e-5);
        assert!((alpha - 0.5).abs() < 1e-6);
        p.phase = -std::f32::consts::FRAC_PI_2;
        let (r_min, _) = orb_shape(&p, &pj, 0.5);
        assert!((r_min - 2.0 * 2.4 * 0.44).abs() < 1e-5);
    }
}
