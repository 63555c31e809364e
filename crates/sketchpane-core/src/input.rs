//! Pointer and wheel events as delivered by the host surface.

use crate::handles::HandleKind;
use crate::shapes::ShapeId;
use crate::viewport::PixelRect;
use kurbo::{Point, Vec2};
use serde::{Deserialize, Serialize};

/// What the pointer landed on, as classified by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PointerTarget {
    /// Empty canvas.
    Background,
    /// The body of a shape.
    Shape { id: ShapeId },
    /// A resize handle of the focused shape.
    Handle { id: ShapeId, handle: HandleKind },
}

/// A pointer-down or pointer-move event.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointerEvent {
    /// Pointer position in screen pixels.
    pub screen: Point,
    /// Device movement since the previous event, in screen pixels.
    #[serde(default)]
    pub movement: Vec2,
    /// Element under the pointer.
    pub target: PointerTarget,
}

impl PointerEvent {
    pub fn new(screen: Point, movement: Vec2, target: PointerTarget) -> Self {
        Self {
            screen,
            movement,
            target,
        }
    }

    /// A press with no prior movement.
    pub fn press(screen: Point, target: PointerTarget) -> Self {
        Self::new(screen, Vec2::ZERO, target)
    }
}

/// A wheel event, captured at the surface.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WheelEvent {
    /// Cursor position in screen pixels.
    pub screen: Point,
    /// Vertical wheel delta; positive zooms in.
    pub delta_y: f64,
    /// Surface rectangle at the time of the event.
    pub pixels: PixelRect,
}

impl WheelEvent {
    pub fn new(screen: Point, delta_y: f64, pixels: PixelRect) -> Self {
        Self {
            screen,
            delta_y,
            pixels,
        }
    }
}
