use glam::Vec2;
use neural_core::render::RadialGradient;
use neural_core::{Fill, Rgba, Surface};
use std::f64::consts::TAU;
use wasm_bindgen::JsCast;
use web_sys as web;

/// [`Surface`] backed by a canvas 2D context.
pub struct CanvasSurface {
    ctx: web::CanvasRenderingContext2d,
}

impl CanvasSurface {
    /// Acquire the 2D context; `Ok(None)` when the browser has none to give.
    pub fn from_canvas(canvas: &web::HtmlCanvasElement) -> anyhow::Result<Option<Self>> {
        let ctx = canvas
            .get_context("2d")
            .map_err(|e| anyhow::anyhow!("get_context failed: {:?}", e))?;
        let Some(ctx) = ctx else {
            return Ok(None);
        };
        let ctx = ctx
            .dyn_into::<web::CanvasRenderingContext2d>()
            .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))?;
        ctx.set_line_cap("round");
        Ok(Some(Self { ctx }))
    }

    fn gradient(&self, g: &RadialGradient) -> Option<web::CanvasGradient> {
        let grad = self
            .ctx
            .create_radial_gradient(
                g.start.x as f64,
                g.start.y as f64,
                g.start_radius as f64,
                g.end.x as f64,
                g.end.y as f64,
                g.end_radius as f64,
            )
            .ok()?;
        for s in &g.stops {
            _ = grad.add_color_stop(s.offset, &s.color.to_string());
        }
        Some(grad)
    }

    /// Set the fill style; `false` if the gradient could not be built.
    fn apply_fill(&self, fill: &Fill) -> bool {
        match fill {
            Fill::Solid(c) => {
                self.ctx.set_fill_style_str(&c.to_string());
                true
            }
            Fill::Radial(g) => match self.gradient(g) {
                Some(grad) => {
                    self.ctx.set_fill_style_canvas_gradient(&grad);
                    true
                }
                None => false,
            },
        }
    }
}

impl Surface for CanvasSurface {
    fn fill_rect(&mut self, origin: Vec2, size: Vec2, fill: &Fill) {
        if self.apply_fill(fill) {
            self.ctx
                .fill_rect(origin.x as f64, origin.y as f64, size.x as f64, size.y as f64);
        }
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, fill: &Fill) {
        if !self.apply_fill(fill) {
            return;
        }
        self.ctx.begin_path();
        _ = self
            .ctx
            .arc(center.x as f64, center.y as f64, radius as f64, 0.0, TAU);
        self.ctx.fill();
    }

    fn stroke_line(&mut self, from: Vec2, to: Vec2, width: f32, color: Rgba) {
        self.ctx.begin_path();
        self.ctx.move_to(from.x as f64, from.y as f64);
        self.ctx.line_to(to.x as f64, to.y as f64);
        self.ctx.set_stroke_style_str(&color.to_string());
        self.ctx.set_line_width(width as f64);
        self.ctx.stroke();
    }
}
