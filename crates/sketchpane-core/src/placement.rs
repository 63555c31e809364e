//! One-shot shape placement driven by canvas clicks.

use crate::scene::Scene;
use crate::shapes::{Shape, ShapeId, ShapeKind, ShapeStyle};
use kurbo::Point;

/// Holds the kind chosen in a toolbar until the next canvas click.
#[derive(Debug, Clone, Default)]
pub struct Placement {
    armed: Option<ShapeKind>,
    style: ShapeStyle,
}

impl Placement {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use `style` for shapes placed from now on.
    pub fn with_style(mut self, style: ShapeStyle) -> Self {
        self.style = style;
        self
    }

    /// Arm a kind for the next click, replacing any armed kind.
    pub fn arm(&mut self, kind: ShapeKind) {
        log::debug!("Armed {} for placement", kind.name());
        self.armed = Some(kind);
    }

    pub fn disarm(&mut self) {
        self.armed = None;
    }

    pub fn armed(&self) -> Option<ShapeKind> {
        self.armed
    }

    /// Place the armed kind centered on `at` and disarm.
    ///
    /// Returns the new id, or `None` when nothing was armed.
    pub fn place(&mut self, scene: &mut Scene, at: Point) -> Option<ShapeId> {
        let kind = self.armed.take()?;
        let Some(id) = scene.next_id() else {
            log::warn!("Failed to place {}: shape ids exhausted", kind.name());
            return None;
        };
        let shape = Shape::placed_at(id, kind, at, self.style.clone());
        match scene.add_shape(shape) {
            Ok(()) => Some(id),
            Err(e) => {
                log::warn!("Failed to place {}: {e}", kind.name());
                None
            }
        }
    }
}
