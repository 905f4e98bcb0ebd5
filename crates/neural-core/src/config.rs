use crate::render::Rgb;
use glam::{Vec2, Vec3};
use thiserror::Error;

// Tier breakpoints on viewport width (CSS pixels)
pub const MOBILE_MAX_WIDTH: f32 = 768.0;
pub const TABLET_MAX_WIDTH: f32 = 1200.0;

// Speed cap relative to the base speed
pub const MAX_SPEED_FACTOR: f32 = 3.5;

// Half extents of the wrap box relative to the viewport and depth
pub const WRAP_EXTENT_XY: f32 = 1.3;
pub const WRAP_EXTENT_Z: f32 = 1.7;

#[derive(Debug, Error, Clone, Copy, PartialEq)]
pub enum ConfigError {
    #[error("viewport must be finite and positive, got {width}x{height}")]
    InvalidViewport { width: f32, height: f32 },
}

/// Size of the drawing surface the field lives in.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    width: f32,
    height: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Result<Self, ConfigError> {
        if !(width.is_finite() && height.is_finite()) || width <= 0.0 || height <= 0.0 {
            return Err(ConfigError::InvalidViewport { width, height });
        }
        Ok(Self { width, height })
    }

    #[inline]
    pub fn width(&self) -> f32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> f32 {
        self.height
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width * 0.5, self.height * 0.5)
    }

    #[inline]
    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }
}

/// Device class picked from the viewport width.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tier {
    Mobile,
    Tablet,
    Desktop,
}

impl Tier {
    pub fn for_width(width: f32) -> Self {
        if width < MOBILE_MAX_WIDTH {
            Tier::Mobile
        } else if width < TABLET_MAX_WIDTH {
            Tier::Tablet
        } else {
            Tier::Desktop
        }
    }

    /// Percentage of the base particle count kept on this tier.
    pub fn count_percent(self) -> usize {
        match self {
            Tier::Mobile => 40,
            Tier::Tablet => 70,
            Tier::Desktop => 100,
        }
    }

    /// Percentage of the base connection distance kept on this tier.
    pub fn distance_percent(self) -> u32 {
        match self {
            Tier::Mobile => 60,
            Tier::Tablet => 80,
            Tier::Desktop => 100,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Tier::Mobile => "mobile",
            Tier::Tablet => "tablet",
            Tier::Desktop => "desktop",
        }
    }
}

/// Tier-dependent part of the configuration.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TierSizing {
    pub tier: Tier,
    pub count: usize,
    pub connect_distance: f32,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Palette {
    pub cyan: Rgb,
    pub teal: Rgb,
    pub background: Rgb,
    pub highlight: Rgb,
    pub photon: Rgb,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            cyan: Rgb::new(102, 252, 241),
            teal: Rgb::new(69, 162, 158),
            background: Rgb::new(11, 12, 16),
            highlight: Rgb::new(235, 255, 255),
            photon: Rgb::new(245, 255, 255),
        }
    }
}

/// Tuning constants for the simulation and its render pass.
#[derive(Clone, Debug)]
pub struct SimConfig {
    pub base_count: usize,
    pub base_connect_distance: u32,
    pub fov: f32,
    pub speed: f32,
    pub drag: f32,
    pub depth: f32,

    // pointer attraction (3D radius)
    pub mouse_radius: f32,
    pub mouse_strength: f32,
    // click/tap burst
    pub repel_radius: f32,
    pub repel_strength: f32,

    pub turbulence: f32,
    /// Light position in normalized screen space, origin at the viewport centre.
    pub light: Vec2,
    pub palette: Palette,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            base_count: 150,
            base_connect_distance: 350,
            fov: 520.0,
            speed: 0.5,
            drag: 0.965,
            depth: 700.0,
            mouse_radius: 230.0,
            mouse_strength: 2.2,
            repel_radius: 340.0,
            repel_strength: 16.0,
            turbulence: 0.016,
            light: Vec2::new(0.62, -0.38),
            palette: Palette::default(),
        }
    }
}

impl SimConfig {
    pub fn sizing_for_width(&self, width: f32) -> TierSizing {
        let tier = Tier::for_width(width);
        TierSizing {
            tier,
            count: self.base_count * tier.count_percent() / 100,
            connect_distance: (self.base_connect_distance * tier.distance_percent() / 100) as f32,
        }
    }

    #[inline]
    pub fn max_speed(&self) -> f32 {
        self.speed * MAX_SPEED_FACTOR
    }

    /// Half extents of the box particles wrap around in.
    pub fn wrap_extents(&self, viewport: &Viewport) -> Vec3 {
        Vec3::new(
            viewport.width() * WRAP_EXTENT_XY,
            viewport.height() * WRAP_EXTENT_XY,
            self.depth * WRAP_EXTENT_Z,
        )
    }
}
