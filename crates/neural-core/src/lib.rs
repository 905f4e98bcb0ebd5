pub mod config;
pub mod field;
pub mod input;
pub mod math;
pub mod particle;
pub mod render;
pub mod scene;
pub mod state;

pub use config::*;
pub use field::{ConnectionTable, Field};
pub use input::InputEvent;
pub use math::Projection;
pub use particle::Particle;
pub use render::{Fill, Rgb, Rgba, Surface};
pub use scene::{RotationMode, Scene};
pub use state::*;
