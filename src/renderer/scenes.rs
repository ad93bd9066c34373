//! Per-view drawing

use glam::Vec2;
use web_sys::CanvasRenderingContext2d;

use super::shapes;
use crate::celebration::{LivePiece, PieceKind};
use crate::colors::{CONFIRMED, GUIDE, HIGHLIGHT, RAINBOW};
use crate::difficulty::DifficultySettings;
use crate::games::{BrushOp, Habitat, MatchGame, PathGame, TraceGame};

const BOARD: &str = "rgba(255, 255, 255, 0.7)";
const INK: &str = "#495057";

pub fn trace(ctx: &CanvasRenderingContext2d, size: Vec2, game: &TraceGame, s: &DifficultySettings) {
    shapes::clear(ctx, size, BOARD);

    let targets = game.target_points();
    shapes::polyline(ctx, &targets, s.trace_line_width, GUIDE, Some((10.0, 10.0)));

    let confirmed = game.points_confirmed();
    for (i, p) in targets.iter().enumerate() {
        let color = if i < confirmed {
            CONFIRMED
        } else {
            RAINBOW[i % RAINBOW.len()]
        };
        shapes::circle(ctx, *p, s.trace_point_size, color);
    }

    if let Some(next) = game.next_target() {
        shapes::ring(ctx, next, s.trace_point_size + 8.0, 4.0, HIGHLIGHT);
        if confirmed == 0 {
            // Hand hint before the first dot
            shapes::glyph(ctx, "👆", next + Vec2::new(0.0, s.trace_point_size + 30.0), 36.0);
        }
    }

    shapes::rainbow_stroke(ctx, game.stroke(), s.trace_line_width, &RAINBOW);

    let shape = game.current_shape();
    if game.is_shape_complete() {
        shapes::glyph(ctx, shape.glyph, size * 0.5, size.min_element() * 0.3);
    } else {
        shapes::glyph(ctx, shape.glyph, Vec2::new(40.0, 40.0), 40.0);
    }
}

pub fn pairs(ctx: &CanvasRenderingContext2d, size: Vec2, game: &MatchGame, s: &DifficultySettings) {
    shapes::clear(ctx, size, BOARD);
    shapes::label(ctx, "👆 Tap two matching animals!", Vec2::new(size.x * 0.5, 22.0), 20.0, INK);

    let layout = game.layout(s);
    let shown = game.mismatch();
    for (i, card) in game.cards().iter().enumerate() {
        let origin = layout.card_origin(i);
        let card_size = Vec2::splat(layout.card_size);
        let picked = game.selected() == Some(i)
            || shown.is_some_and(|(a, b)| a == i || b == i);

        let (fill, outline) = if card.matched {
            ("#D3F9D8", Some((CONFIRMED, 4.0)))
        } else if shown.is_some() && picked {
            ("#FFE3E3", Some(("#FF6B6B", 4.0)))
        } else if picked {
            ("#FFF9DB", Some((HIGHLIGHT, 6.0)))
        } else {
            ("#FFFFFF", Some(("#DEE2E6", 2.0)))
        };
        shapes::rounded_rect(ctx, origin, card_size, layout.card_size * 0.18, fill, outline);

        ctx.set_global_alpha(if card.matched { 0.6 } else { 1.0 });
        shapes::glyph(ctx, card.glyph, layout.card_center(i), layout.card_size * 0.45);
        ctx.set_global_alpha(1.0);
    }
}

pub fn path(ctx: &CanvasRenderingContext2d, size: Vec2, game: &PathGame, s: &DifficultySettings) {
    shapes::clear(ctx, size, BOARD);

    let waypoints = game.waypoints_px();
    shapes::polyline(ctx, &waypoints, s.path_width, GUIDE, Some((15.0, 15.0)));
    for (i, p) in waypoints.iter().enumerate() {
        shapes::circle(ctx, *p, s.path_width / 2.5, RAINBOW[i % RAINBOW.len()]);
    }

    shapes::rainbow_stroke(ctx, game.stroke(), s.path_width / 2.0, &RAINBOW);

    let level = game.level();
    if let Some(goal) = waypoints.last() {
        shapes::glyph(ctx, level.goal, *goal, 50.0);
    }
    shapes::glyph(ctx, level.animal, game.position_on_path(game.progress()), 60.0);
}

/// Apply queued paint to the persistent surface
pub fn free_draw(ctx: &CanvasRenderingContext2d, size: Vec2, ops: &[BrushOp]) {
    for op in ops {
        match op {
            BrushOp::Fill { color } => shapes::clear(ctx, size, color),
            BrushOp::Dot { at, radius, color } => shapes::circle(ctx, *at, *radius, color),
            BrushOp::Segment {
                from,
                to,
                width,
                color,
            } => shapes::segment(ctx, *from, *to, *width, color),
        }
    }
}

pub fn habitat(ctx: &CanvasRenderingContext2d, size: Vec2, habitat: &Habitat) {
    meadow(ctx, size);

    if habitat.is_empty() {
        shapes::glyph(ctx, "🥚", Vec2::new(size.x * 0.5, size.y * 0.4), 80.0);
        shapes::label(
            ctx,
            "No animals yet! Play games to collect them.",
            Vec2::new(size.x * 0.5, size.y * 0.6),
            22.0,
            INK,
        );
        return;
    }

    for e in habitat.entities() {
        let at = e.pos * size + Vec2::new(0.0, e.bob_offset());
        shapes::glyph(ctx, &e.glyph, at, e.size);
    }
    shapes::label(ctx, "👆 Tap animals to hear them!", Vec2::new(size.x * 0.5, size.y * 0.93), 18.0, "#FFFFFF");
}

fn meadow(ctx: &CanvasRenderingContext2d, size: Vec2) {
    let (w, h) = (size.x as f64, size.y as f64);
    let horizon = h * 0.85;

    let sky = ctx.create_linear_gradient(0.0, 0.0, 0.0, horizon);
    let _ = sky.add_color_stop(0.0, "#87CEEB");
    let _ = sky.add_color_stop(0.7, "#B0E0E6");
    let _ = sky.add_color_stop(1.0, "#98D8AA");
    ctx.set_fill_style_canvas_gradient(&sky);
    ctx.fill_rect(0.0, 0.0, w, h);

    shapes::circle(ctx, Vec2::new(size.x * 0.85, size.y * 0.12), 35.0, "#FFE066");
    shapes::cloud(ctx, Vec2::new(size.x * 0.2, size.y * 0.1), 40.0);
    shapes::cloud(ctx, Vec2::new(size.x * 0.5, size.y * 0.18), 30.0);
    shapes::cloud(ctx, Vec2::new(size.x * 0.7, size.y * 0.08), 35.0);

    let grass = ctx.create_linear_gradient(0.0, horizon, 0.0, h);
    let _ = grass.add_color_stop(0.0, "#69DB7C");
    let _ = grass.add_color_stop(1.0, "#40C057");
    ctx.set_fill_style_canvas_gradient(&grass);
    ctx.fill_rect(0.0, horizon, w, h - horizon);

    // Blades jitter from a fixed hash so they hold still between frames
    ctx.set_stroke_style_str("#2F9E44");
    ctx.set_line_width(2.0);
    let mut x = 0.0;
    while x < w {
        let jitter = move |k: f64| ((x * 12.9898 + k * 78.233).sin() * 43_758.545).fract().abs();
        let base = x + jitter(1.0) * 10.0;
        let height = 8.0 + jitter(2.0) * 12.0;
        ctx.begin_path();
        ctx.move_to(base, horizon);
        ctx.quadratic_curve_to(
            base + (jitter(3.0) - 0.5) * 10.0,
            horizon - height / 2.0,
            base + (jitter(4.0) - 0.5) * 5.0,
            horizon - height,
        );
        ctx.stroke();
        x += 20.0;
    }
}

/// Confetti, stars and sparkles on top of everything
pub fn celebration(ctx: &CanvasRenderingContext2d, size: Vec2, pieces: &[LivePiece]) {
    use std::f32::consts::PI;

    for live in pieces {
        let t = live.t;
        let piece = &live.piece;
        match piece.kind {
            PieceKind::Confetti { color, round } => {
                let x = piece.origin.x * size.x + (t * PI * 4.0).sin() * 20.0;
                let y = -10.0 + t * (size.y + 20.0);
                ctx.set_global_alpha((1.0 - t) as f64);
                if round {
                    shapes::circle(ctx, Vec2::new(x, y), 5.0, color);
                } else {
                    ctx.save();
                    let _ = ctx.translate(x as f64, y as f64);
                    let _ = ctx.rotate((t * PI * 4.0) as f64);
                    ctx.set_fill_style_str(color);
                    ctx.fill_rect(-5.0, -5.0, 10.0, 10.0);
                    ctx.restore();
                }
            }
            PieceKind::Star => {
                let scale = (t * PI).sin();
                ctx.set_global_alpha(scale as f64);
                shapes::glyph(ctx, "⭐", piece.origin * size, 20.0 + 30.0 * scale);
            }
            PieceKind::Sparkle => {
                ctx.set_global_alpha((1.0 - t) as f64);
                shapes::glyph(ctx, "✨", piece.origin - Vec2::new(0.0, t * 40.0), 24.0);
            }
        }
    }
    ctx.set_global_alpha(1.0);
}
