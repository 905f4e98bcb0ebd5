// Render pass checks against a recording surface.

use glam::{Vec2, Vec3};
use neural_core::field::CONNECT_RATE;
use neural_core::math::{light_factor, Projection};
use neural_core::render::{
    draw_frame, pulse_positions, FrameView, RadialGradient, CURSOR_INNER_RADIUS,
    CURSOR_OUTER_RADIUS, RING_OUTER_RADIUS,
};
use std::f64::consts::PI;
use neural_core::{
    ConnectionTable, Fill, Particle, PointerState, Rgba, Scene, SimConfig, Surface, Viewport,
};

#[derive(Debug, Clone)]
enum Op {
    Rect(Fill),
    Circle { center: Vec2, radius: f32, fill: Fill },
    Line { from: Vec2, to: Vec2, width: f32, color: Rgba },
}

#[derive(Default)]
struct Recorder {
    ops: Vec<Op>,
}

impl Surface for Recorder {
    fn fill_rect(&mut self, _origin: Vec2, _size: Vec2, fill: &Fill) {
        self.ops.push(Op::Rect(fill.clone()));
    }
    fn fill_circle(&mut self, center: Vec2, radius: f32, fill: &Fill) {
        self.ops.push(Op::Circle {
            center,
            radius,
            fill: fill.clone(),
        });
    }
    fn stroke_line(&mut self, from: Vec2, to: Vec2, width: f32, color: Rgba) {
        self.ops.push(Op::Line {
            from,
            to,
            width,
            color,
        });
    }
}

impl Recorder {
    fn lines(&self) -> Vec<(Vec2, Vec2, f32, Rgba)> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                Op::Line {
                    from,
                    to,
                    width,
                    color,
                } => Some((*from, *to, *width, *color)),
                _ => None,
            })
            .collect()
    }

    fn circles_at(&self, at: Vec2) -> Vec<f32> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                Op::Circle { center, radius, .. } if *center == at => Some(*radius),
                _ => None,
            })
            .collect()
    }

    /// Radial-filled circles strictly between two x positions on the link row.
    fn gradients_between(&self, x0: f32, x1: f32) -> Vec<(Vec2, f32, RadialGradient)> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                Op::Circle {
                    center,
                    radius,
                    fill: Fill::Radial(g),
                } if center.x > x0 && center.x < x1 => Some((*center, *radius, g.clone())),
                _ => None,
            })
            .collect()
    }

    fn circle_count(&self) -> usize {
        self.ops
            .iter()
            .filter(|op| matches!(op, Op::Circle { .. }))
            .count()
    }
}

fn particle_at(position: Vec3, phase: f32) -> Particle {
    Particle {
        position,
        velocity: Vec3::ZERO,
        target: position,
        retarget: 100,
        phase,
        pulse_speed: 0.02,
        base_size: 2.0,
    }
}

struct Fixture {
    viewport: Viewport,
    pointer: PointerState,
    particles: Vec<Particle>,
    projections: Vec<Projection>,
    order: Vec<usize>,
}

impl Fixture {
    fn pair(gap: f32) -> Self {
        let viewport = Viewport::new(1000.0, 800.0).unwrap();
        let particles = vec![
            particle_at(Vec3::ZERO, 0.0),
            particle_at(Vec3::new(gap, 0.0, 0.0), 0.0),
        ];
        let projections = vec![
            Projection {
                screen: Vec2::new(400.0, 400.0),
                scale: 0.5,
                depth: -10.0,
            },
            Projection {
                screen: Vec2::new(600.0, 400.0),
                scale: 0.4,
                depth: 10.0,
            },
        ];
        Self {
            pointer: PointerState::centered(viewport.center()),
            viewport,
            particles,
            projections,
            order: vec![0, 1],
        }
    }

    fn draw(&self, frame: u64, table: &mut ConnectionTable, distance: f32) -> Recorder {
        let view = FrameView {
            viewport: &self.viewport,
            pointer: &self.pointer,
            frame,
            particles: &self.particles,
            projections: &self.projections,
            order: &self.order,
            connect_distance: distance,
        };
        let mut rec = Recorder::default();
        draw_frame(&mut rec, &view, table, &SimConfig::default());
        rec
    }
}

#[test]
fn frame_starts_with_background_and_vignette() {
    let fx = Fixture::pair(1000.0);
    let mut table = ConnectionTable::new(2);
    let rec = fx.draw(1, &mut table, 350.0);
    match &rec.ops[0] {
        Op::Rect(Fill::Solid(c)) => {
            assert_eq!((c.rgb.r, c.rgb.g, c.rgb.b), (11, 12, 16));
            assert_eq!(c.a, 1.0);
        }
        other => panic!("expected background fill, got {other:?}"),
    }
    match &rec.ops[1] {
        Op::Rect(Fill::Radial(g)) => {
            assert_eq!(g.start, fx.viewport.center());
            assert!((g.start_radius - 800.0 * 0.05).abs() < 1e-3);
            assert!((g.end_radius - 800.0 * 0.92).abs() < 1e-3);
            assert_eq!(g.stops.first().unwrap().color.a, 0.0);
            assert!((g.stops.last().unwrap().color.a - 0.68).abs() < 1e-6);
        }
        other => panic!("expected vignette, got {other:?}"),
    }
}

#[test]
fn far_pair_draws_no_link() {
    let fx = Fixture::pair(1000.0);
    let mut table = ConnectionTable::new(2);
    let rec = fx.draw(1, &mut table, 350.0);
    assert!(rec.lines().is_empty());
    assert_eq!(table.get(0, 1), 0.0);
}

#[test]
fn close_pair_fades_in_and_draws_link() {
    let fx = Fixture::pair(0.0);
    let mut table = ConnectionTable::new(2);
    let rec = fx.draw(1, &mut table, 350.0);
    // target 1.0, first blend step
    assert!((table.get(0, 1) - CONNECT_RATE).abs() < 1e-6);

    let lines = rec.lines();
    assert_eq!(lines.len(), 1);
    let (from, to, width, color) = lines[0];
    assert_eq!(from, Vec2::new(400.0, 400.0));
    assert_eq!(to, Vec2::new(600.0, 400.0));
    // 0.1 * 2.2 * 0.4 = 0.088, floored at 0.2
    assert!((width - 0.2).abs() < 1e-6);
    assert!(color.a > 0.0 && color.a <= CONNECT_RATE * 0.92 + 1e-6);
}

#[test]
fn link_alpha_follows_endpoint_lighting() {
    let fx = Fixture::pair(0.0);
    let cfg = SimConfig::default();
    let mut table = ConnectionTable::new(2);
    table.set(0, 1, 0.9);
    let rec = fx.draw(1, &mut table, 350.0);
    let strength = table.get(0, 1);
    assert!((strength - 0.91).abs() < 1e-6);

    let lf = (light_factor(fx.projections[0].screen, &fx.viewport, cfg.light)
        + light_factor(fx.projections[1].screen, &fx.viewport, cfg.light))
        * 0.5;
    assert!(lf < 1.0);

    let lines = rec.lines();
    assert_eq!(lines.len(), 1);
    let (_, _, width, color) = lines[0];
    assert_eq!(color.rgb, cfg.palette.cyan);
    assert!((color.a - strength * lf * 0.92).abs() < 1e-6, "alpha {}", color.a);
    // min(0.5, 0.4) scale, above the width floor
    assert!((width - strength * 2.2 * 0.4).abs() < 1e-6, "width {width}");
}

#[test]
fn pulse_glow_scales_with_strength_and_position() {
    let fx = Fixture::pair(0.0);
    let cfg = SimConfig::default();
    let mut table = ConnectionTable::new(2);
    table.set(0, 1, 0.9);
    let rec = fx.draw(31, &mut table, 350.0);
    let strength = table.get(0, 1);

    let pulses = rec.gradients_between(400.0, 600.0);
    assert_eq!(pulses.len(), 2);

    let a = fx.projections[0].screen;
    let b = fx.projections[1].screen;
    for ((center, radius, glow), t) in pulses.into_iter().zip(pulse_positions(31)) {
        let alpha = strength * (t as f64 * PI).sin() as f32 * 0.85;
        assert!((center - a.lerp(b, t)).length() < 1e-3);
        assert!((radius - 4.5 * alpha).abs() < 1e-5, "radius {radius}");
        assert_eq!(glow.end_radius, radius);

        let first = glow.stops[0];
        assert_eq!(first.offset, 0.0);
        assert_eq!(first.color.rgb, cfg.palette.photon);
        assert!((first.color.a - alpha).abs() < 1e-6);
        assert!((glow.stops[1].color.a - alpha * 0.5).abs() < 1e-6);
        assert_eq!(glow.stops[2].color.a, 0.0);
    }
}

#[test]
fn faint_link_is_skipped_but_still_decays() {
    let fx = Fixture::pair(1000.0);
    let mut table = ConnectionTable::new(2);
    table.set(0, 1, 0.003);
    let rec = fx.draw(1, &mut table, 350.0);
    assert!(rec.lines().is_empty());
    assert!(table.get(0, 1) < 0.003);
}

#[test]
fn strong_link_carries_two_pulses() {
    let fx = Fixture::pair(0.0);
    let mut table = ConnectionTable::new(2);
    table.set(0, 1, 0.9);
    // frame 31 puts the pulses at t = 0.248 and 0.748
    let rec = fx.draw(31, &mut table, 350.0);
    assert_eq!(rec.lines().len(), 1);
    let orb_layers = 2 * 2;
    assert_eq!(rec.circle_count(), orb_layers + 2);
}

#[test]
fn pulse_at_link_end_is_skipped() {
    let fx = Fixture::pair(0.0);
    let mut table = ConnectionTable::new(2);
    table.set(0, 1, 0.9);
    // frame 0: t = 0.0 (sin = 0, skipped) and t = 0.5 (drawn)
    let rec = fx.draw(0, &mut table, 350.0);
    assert_eq!(rec.circle_count(), 4 + 1);
    assert_eq!(rec.circles_at(Vec2::new(500.0, 400.0)).len(), 1);
}

#[test]
fn weak_link_has_no_pulses() {
    let fx = Fixture::pair(1000.0);
    let mut table = ConnectionTable::new(2);
    table.set(0, 1, 0.15);
    let rec = fx.draw(31, &mut table, 350.0);
    assert_eq!(rec.lines().len(), 1);
    assert_eq!(rec.circle_count(), 4);
}

#[test]
fn orbs_paint_back_to_front() {
    let fx = Fixture::pair(1000.0);
    let mut table = ConnectionTable::new(2);
    let rec = fx.draw(1, &mut table, 350.0);
    let centers: Vec<Vec2> = rec
        .ops
        .iter()
        .filter_map(|op| match op {
            Op::Circle { center, .. } => Some(*center),
            _ => None,
        })
        .collect();
    assert_eq!(
        centers,
        vec![
            Vec2::new(400.0, 400.0),
            Vec2::new(400.0, 400.0),
            Vec2::new(600.0, 400.0),
            Vec2::new(600.0, 400.0),
        ]
    );
}

#[test]
fn cursor_only_when_pointer_active() {
    let mut fx = Fixture::pair(1000.0);
    let at = Vec2::new(123.0, 456.0);
    fx.pointer.screen = at;
    let mut table = ConnectionTable::new(2);

    let idle = fx.draw(1, &mut table, 350.0);
    assert!(idle.circles_at(at).is_empty());

    fx.pointer.active = true;
    let active = fx.draw(2, &mut table, 350.0);
    assert_eq!(
        active.circles_at(at),
        vec![CURSOR_OUTER_RADIUS, CURSOR_INNER_RADIUS, RING_OUTER_RADIUS]
    );
}

#[test]
fn scene_frame_paints_every_orb() {
    let mut scene = Scene::new(
        SimConfig::default(),
        Viewport::new(500.0, 900.0).unwrap(),
        8,
    );
    let mut rec = Recorder::default();
    scene.run_frame(&mut rec);
    assert_eq!(scene.camera.frame, 1);
    assert!(matches!(rec.ops[0], Op::Rect(Fill::Solid(_))));
    // every particle has a visible core at default zoom
    assert!(rec.circle_count() >= scene.field().len());
}
