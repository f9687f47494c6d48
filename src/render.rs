use crate::core::{Color, Surface};
use glam::Vec2;
use wasm_bindgen::JsCast;
use web_sys as web;

/// Canvas2D implementation of the drawing surface.
pub struct CanvasSurface {
    canvas: web::HtmlCanvasElement,
    ctx: web::CanvasRenderingContext2d,
    body: Option<web::HtmlElement>,
    // Canvas2D re-parses style strings on every set; skip redundant sets
    fill_style: String,
}

impl CanvasSurface {
    pub fn new(canvas: &web::HtmlCanvasElement) -> anyhow::Result<Self> {
        let ctx = canvas
            .get_context("2d")
            .map_err(|e| anyhow::anyhow!("get_context error: {:?}", e))?
            .ok_or_else(|| anyhow::anyhow!("2d context unavailable"))?
            .dyn_into::<web::CanvasRenderingContext2d>()
            .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))?;
        let body = web::window()
            .and_then(|w| w.document())
            .and_then(|d| d.body());
        Ok(Self {
            canvas: canvas.clone(),
            ctx,
            body,
            fill_style: String::new(),
        })
    }

    fn set_fill(&mut self, color: Color) {
        let css = color.to_css();
        if css != self.fill_style {
            self.ctx.set_fill_style_str(&css);
            self.fill_style = css;
        }
    }
}

impl Surface for CanvasSurface {
    fn resize(&mut self, width: u32, height: u32) {
        self.canvas.set_width(width.max(1));
        self.canvas.set_height(height.max(1));
        // resizing resets the context state
        self.fill_style.clear();
    }

    fn clear(&mut self) {
        self.ctx.save();
        _ = self.ctx.set_transform(1.0, 0.0, 0.0, 1.0, 0.0, 0.0);
        self.ctx.clear_rect(
            0.0,
            0.0,
            self.canvas.width() as f64,
            self.canvas.height() as f64,
        );
        self.ctx.restore();
    }

    fn fade_trails(&mut self, alpha: f32) {
        self.set_fill(Color::Rgba(0, 0, 0, alpha));
        self.ctx.fill_rect(
            0.0,
            0.0,
            self.canvas.width() as f64,
            self.canvas.height() as f64,
        );
    }

    fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32, color: Color) {
        self.set_fill(color);
        self.ctx.fill_rect(x as f64, y as f64, w as f64, h as f64);
    }

    fn draw_line(&mut self, from: Vec2, to: Vec2, color: Color, width: f32) {
        self.ctx.begin_path();
        self.ctx.set_line_width(width as f64);
        self.ctx.set_stroke_style_str(&color.to_css());
        self.ctx.move_to(from.x as f64, from.y as f64);
        self.ctx.line_to(to.x as f64, to.y as f64);
        self.ctx.stroke();
    }

    fn set_background_color(&mut self, color: Option<Color>) {
        if let Some(body) = &self.body {
            let style = body.style();
            match color {
                Some(c) => {
                    _ = style.set_property("background-color", &c.to_css());
                }
                None => {
                    _ = style.remove_property("background-color");
                }
            }
        }
    }
}
