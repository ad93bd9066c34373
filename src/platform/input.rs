//! Pointer input, unified across mouse and touch
//!
//! Positions are in canvas pixels (canvas backing size equals its CSS size).

use glam::Vec2;

/// Stage of a pointer gesture
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerPhase {
    /// mousedown / touchstart
    Down,
    /// mousemove / touchmove
    Move,
    /// mouseup / mouseleave / touchend / touchcancel
    Up,
}

/// One pointer sample
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerInput {
    pub phase: PointerPhase,
    pub pos: Vec2,
}

impl PointerInput {
    pub fn down(x: f32, y: f32) -> Self {
        Self {
            phase: PointerPhase::Down,
            pos: Vec2::new(x, y),
        }
    }

    pub fn moved(x: f32, y: f32) -> Self {
        Self {
            phase: PointerPhase::Move,
            pos: Vec2::new(x, y),
        }
    }

    pub fn up(x: f32, y: f32) -> Self {
        Self {
            phase: PointerPhase::Up,
            pos: Vec2::new(x, y),
        }
    }
}

/// Mouse position relative to the canvas
#[cfg(target_arch = "wasm32")]
pub fn mouse_position(event: &web_sys::MouseEvent, canvas: &web_sys::HtmlCanvasElement) -> Vec2 {
    let rect = canvas.get_bounding_client_rect();
    Vec2::new(
        event.client_x() as f32 - rect.left() as f32,
        event.client_y() as f32 - rect.top() as f32,
    )
}

/// First touch position relative to the canvas (None on touchend, which has no touches)
#[cfg(target_arch = "wasm32")]
pub fn touch_position(
    event: &web_sys::TouchEvent,
    canvas: &web_sys::HtmlCanvasElement,
) -> Option<Vec2> {
    let touch = event.touches().get(0)?;
    let rect = canvas.get_bounding_client_rect();
    Some(Vec2::new(
        touch.client_x() as f32 - rect.left() as f32,
        touch.client_y() as f32 - rect.top() as f32,
    ))
}
