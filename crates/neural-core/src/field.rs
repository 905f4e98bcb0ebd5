use crate::config::{SimConfig, Tier, TierSizing, Viewport};
use crate::particle::{Particle, StepContext};
use glam::Vec3;
use rand::rngs::StdRng;
use rand::SeedableRng;

// Per-tick blend rates: links appear fast and fade slowly
pub const CONNECT_RATE: f32 = 0.10;
pub const DISCONNECT_RATE: f32 = 0.038;
pub const LINK_FALLOFF_EXPONENT: f32 = 1.8;

/// Target link strength for two particles `distance` apart.
#[inline]
pub fn link_target(distance: f32, connect_distance: f32) -> f32 {
    if distance < connect_distance {
        (1.0 - distance / connect_distance).powf(LINK_FALLOFF_EXPONENT)
    } else {
        0.0
    }
}

/// One smoothing step from `current` toward `target`.
#[inline]
pub fn blend_strength(current: f32, target: f32) -> f32 {
    let rate = if target > current {
        CONNECT_RATE
    } else {
        DISCONNECT_RATE
    };
    current + (target - current) * rate
}

/// Smoothed per-pair link strengths, count x count entries.
///
/// A pair is always stored at `min * count + max` so its fade state does not
/// depend on which particle comes first in the depth order.
#[derive(Clone, Debug, Default)]
pub struct ConnectionTable {
    count: usize,
    strengths: Vec<f32>,
}

impl ConnectionTable {
    pub fn new(count: usize) -> Self {
        Self {
            count,
            strengths: vec![0.0; count * count],
        }
    }

    #[inline]
    pub fn count(&self) -> usize {
        self.count
    }

    /// Number of allocated slots (`count²`).
    #[inline]
    pub fn len(&self) -> usize {
        self.strengths.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.strengths.is_empty()
    }

    #[inline]
    fn slot(&self, a: usize, b: usize) -> usize {
        let (i, j) = if a < b { (a, b) } else { (b, a) };
        i * self.count + j
    }

    pub fn get(&self, a: usize, b: usize) -> f32 {
        self.strengths[self.slot(a, b)]
    }

    pub fn set(&mut self, a: usize, b: usize, strength: f32) {
        let slot = self.slot(a, b);
        self.strengths[slot] = strength.clamp(0.0, 1.0);
    }

    /// Blend the pair toward `target` and return the new strength.
    pub fn blend(&mut self, a: usize, b: usize, target: f32) -> f32 {
        let slot = self.slot(a, b);
        let next = blend_strength(self.strengths[slot], target);
        self.strengths[slot] = next;
        next
    }
}

/// The particle collection and everything sized by it.
pub struct Field {
    particles: Vec<Particle>,
    connections: ConnectionTable,
    sizing: Option<TierSizing>,
    rng: StdRng,
}

impl Field {
    /// An empty field; call [`Field::configure_for_viewport`] to populate it.
    pub fn new(seed: u64) -> Self {
        Self {
            particles: Vec::new(),
            connections: ConnectionTable::default(),
            sizing: None,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Pick the tier for `viewport` and reallocate when the particle count
    /// changes. Returns `true` if the collection was rebuilt.
    pub fn configure_for_viewport(&mut self, viewport: &Viewport, config: &SimConfig) -> bool {
        let sizing = config.sizing_for_width(viewport.width());
        let rebuild = self.sizing.is_none() || self.particles.len() != sizing.count;
        if self.sizing.map(|s| s.tier) != Some(sizing.tier) {
            log::info!(
                "[field] tier={} count={} connect_distance={}",
                sizing.tier.name(),
                sizing.count,
                sizing.connect_distance
            );
        }
        self.sizing = Some(sizing);
        if !rebuild {
            return false;
        }

        let rng = &mut self.rng;
        self.particles = (0..sizing.count)
            .map(|_| Particle::spawn(&mut *rng, config, viewport))
            .collect();
        self.connections = ConnectionTable::new(sizing.count);
        log::debug!(
            "[field] reallocated {} particles, {} connection slots",
            self.particles.len(),
            self.connections.len()
        );
        true
    }

    pub fn tick(&mut self, ctx: &StepContext<'_>) {
        for p in &mut self.particles {
            p.update(ctx, &mut self.rng);
        }
    }

    pub fn apply_repel_burst(&mut self, origin: Vec3, config: &SimConfig) {
        for p in &mut self.particles {
            p.repel_from(origin, config);
        }
    }

    #[inline]
    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    #[inline]
    pub fn particles_mut(&mut self) -> &mut [Particle] {
        &mut self.particles
    }

    #[inline]
    pub fn connections(&self) -> &ConnectionTable {
        &self.connections
    }

    /// Particles and the connection table borrowed together for a render pass.
    #[inline]
    pub fn render_parts(&mut self) -> (&[Particle], &mut ConnectionTable) {
        (&self.particles, &mut self.connections)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.particles.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn tier(&self) -> Option<Tier> {
        self.sizing.map(|s| s.tier)
    }

    pub fn connect_distance(&self) -> f32 {
        self.sizing.map(|s| s.connect_distance).unwrap_or(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blend_moves_toward_target_without_overshoot() {
        for &(v, t) in &[(0.0, 1.0), (1.0, 0.0), (0.3, 0.7), (0.9, 0.2), (0.5, 0.5)] {
            let next = blend_strength(v, t);
            if v == t {
                assert_eq!(next, t);
            } else {
                let (lo, hi) = if v < t { (v, t) } else { (t, v) };
                assert!(next > lo && next < hi, "v={v} t={t} next={next}");
            }
        }
    }

    #[test]
    fn rising_is_faster_than_falling() {
        let rise = blend_strength(0.2, 0.6) - 0.2;
        let fall = 0.6 - blend_strength(0.6, 0.2);
        assert!(rise > fall);
        assert!((rise - 0.04).abs() < 1e-6);
        assert!((fall - 0.0152).abs() < 1e-6);
    }

    #[test]
    fn link_target_shape() {
        assert_eq!(link_target(0.0, 350.0), 1.0);
        assert_eq!(link_target(350.0, 350.0), 0.0);
        assert_eq!(link_target(500.0, 350.0), 0.0);
        let half = link_target(175.0, 350.0);
        assert!((half - 0.5f32.powf(1.8)).abs() < 1e-6);
    }

    #[test]
    fn table_is_symmetric_and_sized_square() {
        let mut table = ConnectionTable::new(5);
        assert_eq!(table.count(), 5);
        assert_eq!(table.len(), 25);
        table.set(3, 1, 0.4);
        assert_eq!(table.get(1, 3), 0.4);
        let v = table.blend(1, 3, 1.0);
        assert_eq!(table.get(3, 1), v);
    }

    #[test]
    fn configure_reallocates_only_on_count_change() {
        let cfg = SimConfig::default();
        let mut field = Field::new(7);
        assert!(field.is_empty());

        let desktop = Viewport::new(1600.0, 900.0).unwrap();
        assert!(field.configure_for_viewport(&desktop, &cfg));
        assert_eq!(field.len(), 150);
        assert_eq!(field.connections().len(), 150 * 150);

        let snapshot = field.particles().to_vec();
        let ptr = field.particles().as_ptr();
        let wider = Viewport::new(1920.0, 1080.0).unwrap();
        assert!(!field.configure_for_viewport(&wider, &cfg));
        assert_eq!(field.particles().as_ptr(), ptr);
        assert_eq!(field.particles(), &snapshot[..]);

        let mobile = Viewport::new(500.0, 800.0).unwrap();
        assert!(field.configure_for_viewport(&mobile, &cfg));
        assert_eq!(field.len(), 60);
        assert_eq!(field.connections().len(), 60 * 60);
        assert_eq!(field.connections().count(), field.len());
        assert_eq!(field.tier(), Some(Tier::Mobile));
        assert_eq!(field.connect_distance(), 210.0);
    }

    #[test]
    fn repel_burst_only_touches_nearby_particles() {
        let cfg = SimConfig::default();
        let vp = Viewport::new(1600.0, 900.0).unwrap();
        let mut field = Field::new(11);
        field.configure_for_viewport(&vp, &cfg);
        for (i, p) in field.particles_mut().iter_mut().enumerate() {
            p.velocity = Vec3::ZERO;
            p.position = if i == 0 {
                Vec3::new(50.0, 0.0, 0.0)
            } else {
                Vec3::new(1000.0, 0.0, 0.0)
            };
        }
        field.apply_repel_burst(Vec3::ZERO, &cfg);
        assert!(field.particles()[0].velocity.x > 0.0);
        assert!(field.particles()[1..]
            .iter()
            .all(|p| p.velocity == Vec3::ZERO));
    }
}
