// Front-end wiring constants. Simulation tuning lives in
// `neural_core::SimConfig`; these only describe how the page hosts it.

// Element the field paints into; absent on pages without the background
pub const CANVAS_ID: &str = "neural-network-canvas";

// Frame-rate report cadence (frames)
pub const FPS_LOG_INTERVAL_FRAMES: u32 = 600;

// Backing store never shrinks below one pixel per side
pub const MIN_BACKING_PX: u32 = 1;
