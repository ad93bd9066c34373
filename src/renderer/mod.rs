//! Canvas 2D rendering module
//!
//! Stateless apart from the context: every frame redraws the live view from
//! the shell. Free draw is the exception, its surface keeps what was painted
//! and only the queued brush operations are applied.

mod scenes;
pub mod shapes;

use glam::Vec2;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use crate::games::BrushOp;
use crate::shell::{Shell, View};

pub struct Renderer {
    ctx: CanvasRenderingContext2d,
    size: Vec2,
}

impl Renderer {
    pub fn new(canvas: &HtmlCanvasElement) -> Result<Self, JsValue> {
        let ctx = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("2d context unavailable"))?
            .dyn_into::<CanvasRenderingContext2d>()?;
        Ok(Self {
            ctx,
            size: Vec2::new(canvas.width() as f32, canvas.height() as f32),
        })
    }

    pub fn render(&self, shell: &Shell, brush_ops: &[BrushOp], now: f64) {
        let settings = shell.settings();
        let ctx = &self.ctx;
        match shell.view() {
            View::Menu => ctx.clear_rect(0.0, 0.0, self.size.x as f64, self.size.y as f64),
            View::Trace(game) => scenes::trace(ctx, self.size, game, &settings),
            View::Match(game) => scenes::pairs(ctx, self.size, game, &settings),
            View::Path(game) => scenes::path(ctx, self.size, game, &settings),
            View::FreeDraw(_) => scenes::free_draw(ctx, self.size, brush_ops),
            View::Habitat(habitat) => scenes::habitat(ctx, self.size, habitat),
        }

        if shell.celebration().is_active() {
            let pieces = shell.celebration().live_pieces(now);
            scenes::celebration(ctx, self.size, &pieces);
        }
    }
}
