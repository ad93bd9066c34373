//! Canvas 2D drawing primitives

use glam::Vec2;
use std::f64::consts::TAU;
use wasm_bindgen::JsValue;
use web_sys::CanvasRenderingContext2d;

pub fn clear(ctx: &CanvasRenderingContext2d, size: Vec2, color: &str) {
    ctx.set_fill_style_str(color);
    ctx.fill_rect(0.0, 0.0, size.x as f64, size.y as f64);
}

pub fn circle(ctx: &CanvasRenderingContext2d, center: Vec2, radius: f32, color: &str) {
    ctx.begin_path();
    let _ = ctx.arc(center.x as f64, center.y as f64, radius.max(0.0) as f64, 0.0, TAU);
    ctx.set_fill_style_str(color);
    ctx.fill();
}

pub fn ring(ctx: &CanvasRenderingContext2d, center: Vec2, radius: f32, width: f32, color: &str) {
    ctx.begin_path();
    let _ = ctx.arc(center.x as f64, center.y as f64, radius.max(0.0) as f64, 0.0, TAU);
    ctx.set_line_width(width as f64);
    ctx.set_stroke_style_str(color);
    ctx.stroke();
}

/// Round-capped line
pub fn segment(ctx: &CanvasRenderingContext2d, from: Vec2, to: Vec2, width: f32, color: &str) {
    ctx.set_line_cap("round");
    ctx.set_line_join("round");
    ctx.set_line_width(width as f64);
    ctx.set_stroke_style_str(color);
    ctx.begin_path();
    ctx.move_to(from.x as f64, from.y as f64);
    ctx.line_to(to.x as f64, to.y as f64);
    ctx.stroke();
}

/// Open polyline, optionally dashed (`dash` = on/off lengths)
pub fn polyline(
    ctx: &CanvasRenderingContext2d,
    points: &[Vec2],
    width: f32,
    color: &str,
    dash: Option<(f32, f32)>,
) {
    let Some((first, rest)) = points.split_first() else {
        return;
    };
    set_dash(ctx, dash);
    ctx.set_line_cap("round");
    ctx.set_line_join("round");
    ctx.set_line_width(width as f64);
    ctx.set_stroke_style_str(color);
    ctx.begin_path();
    ctx.move_to(first.x as f64, first.y as f64);
    for p in rest {
        ctx.line_to(p.x as f64, p.y as f64);
    }
    ctx.stroke();
    set_dash(ctx, None);
}

/// Stroke drawn segment by segment, cycling through `colors`
pub fn rainbow_stroke(ctx: &CanvasRenderingContext2d, points: &[Vec2], width: f32, colors: &[&str]) {
    for (i, pair) in points.windows(2).enumerate() {
        segment(ctx, pair[0], pair[1], width, colors[(i + 1) % colors.len()]);
    }
}

fn set_dash(ctx: &CanvasRenderingContext2d, dash: Option<(f32, f32)>) {
    let segments = js_sys::Array::new();
    if let Some((on, off)) = dash {
        segments.push(&JsValue::from_f64(on as f64));
        segments.push(&JsValue::from_f64(off as f64));
    }
    let _ = ctx.set_line_dash(&segments);
}

/// Centered glyph/text at `size` px
pub fn glyph(ctx: &CanvasRenderingContext2d, text: &str, at: Vec2, size: f32) {
    ctx.set_font(&format!("{}px serif", size.round()));
    ctx.set_text_align("center");
    ctx.set_text_baseline("middle");
    let _ = ctx.fill_text(text, at.x as f64, at.y as f64);
}

/// Centered label in the UI font
pub fn label(ctx: &CanvasRenderingContext2d, text: &str, at: Vec2, size: f32, color: &str) {
    ctx.set_font(&format!("bold {}px 'Comic Sans MS', 'Chalkboard SE', sans-serif", size.round()));
    ctx.set_text_align("center");
    ctx.set_text_baseline("middle");
    ctx.set_fill_style_str(color);
    let _ = ctx.fill_text(text, at.x as f64, at.y as f64);
}

/// Filled rounded rectangle with an optional outline
pub fn rounded_rect(
    ctx: &CanvasRenderingContext2d,
    origin: Vec2,
    size: Vec2,
    radius: f32,
    fill: &str,
    outline: Option<(&str, f32)>,
) {
    let (x, y, w, h) = (origin.x as f64, origin.y as f64, size.x as f64, size.y as f64);
    let r = (radius as f64).min(w / 2.0).min(h / 2.0);
    ctx.begin_path();
    ctx.move_to(x + r, y);
    let _ = ctx.arc_to(x + w, y, x + w, y + h, r);
    let _ = ctx.arc_to(x + w, y + h, x, y + h, r);
    let _ = ctx.arc_to(x, y + h, x, y, r);
    let _ = ctx.arc_to(x, y, x + w, y, r);
    ctx.close_path();
    ctx.set_fill_style_str(fill);
    ctx.fill();
    if let Some((color, width)) = outline {
        ctx.set_line_width(width as f64);
        ctx.set_stroke_style_str(color);
        ctx.stroke();
    }
}

/// Puffy cloud made of four overlapping circles
pub fn cloud(ctx: &CanvasRenderingContext2d, at: Vec2, size: f32) {
    ctx.set_fill_style_str("rgba(255, 255, 255, 0.8)");
    for (dx, dy, r) in [(0.0, 0.0, 1.0), (0.8, -0.2, 0.7), (1.4, 0.0, 0.6), (0.4, 0.3, 0.5)] {
        ctx.begin_path();
        let c = at + Vec2::new(dx, dy) * size;
        let _ = ctx.arc(c.x as f64, c.y as f64, (size * r) as f64, 0.0, TAU);
        ctx.fill();
    }
}
