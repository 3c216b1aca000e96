//! `DrawSurface` backed by a canvas 2D context.

use std::f64::consts::TAU;

use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use crate::core::Viewport;
use crate::math::{Color, Vector2};
use crate::render::{DrawSurface, Gradient};

/// A `<canvas>` element and its 2D context.
pub struct Canvas2dSurface {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
}

impl Canvas2dSurface {
    /// Wrap a canvas. `None` if it cannot provide a 2D context.
    pub fn from_canvas(canvas: HtmlCanvasElement) -> Option<Self> {
        let ctx = canvas
            .get_context("2d")
            .ok()
            .flatten()?
            .dyn_into::<CanvasRenderingContext2d>()
            .ok()?;
        Some(Self { canvas, ctx })
    }

    /// The underlying canvas element.
    pub fn canvas(&self) -> &HtmlCanvasElement {
        &self.canvas
    }

    fn circle_path(&self, center: Vector2, radius: f32) -> bool {
        self.ctx.begin_path();
        match self
            .ctx
            .arc(center.x as f64, center.y as f64, radius.max(0.0) as f64, 0.0, TAU)
        {
            Ok(()) => true,
            Err(e) => {
                log::trace!("arc failed: {:?}", e);
                false
            }
        }
    }
}

impl DrawSurface for Canvas2dSurface {
    fn size(&self) -> Viewport {
        Viewport::new(self.canvas.width(), self.canvas.height())
    }

    fn resize(&mut self, viewport: Viewport) {
        self.canvas.set_width(viewport.width);
        self.canvas.set_height(viewport.height);
    }

    fn clear(&mut self) {
        let size = self.size();
        self.ctx
            .clear_rect(0.0, 0.0, size.width as f64, size.height as f64);
    }

    fn stroke_line(&mut self, from: Vector2, to: Vector2, color: Color, width: f32) {
        self.ctx.set_stroke_style_str(&color.to_css());
        self.ctx.set_line_width(width as f64);
        self.ctx.begin_path();
        self.ctx.move_to(from.x as f64, from.y as f64);
        self.ctx.line_to(to.x as f64, to.y as f64);
        self.ctx.stroke();
    }

    fn fill_circle(&mut self, center: Vector2, radius: f32, color: Color) {
        self.ctx.set_fill_style_str(&color.to_css());
        if self.circle_path(center, radius) {
            self.ctx.fill();
        }
    }

    fn fill_radial_gradient(&mut self, center: Vector2, radius: f32, gradient: &Gradient) {
        let (x, y) = (center.x as f64, center.y as f64);
        let fill = match self.ctx.create_radial_gradient(x, y, 0.0, x, y, radius as f64) {
            Ok(fill) => fill,
            Err(e) => {
                log::trace!("create_radial_gradient failed: {:?}", e);
                return;
            }
        };
        for stop in gradient.stops() {
            if let Err(e) = fill.add_color_stop(stop.offset, &stop.color.to_css()) {
                log::trace!("add_color_stop failed: {:?}", e);
            }
        }

        self.ctx.set_fill_style_canvas_gradient(&fill);
        if self.circle_path(center, radius) {
            self.ctx.fill();
        }
    }
}
