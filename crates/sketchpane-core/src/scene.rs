//! Scene store: the owning arena of shapes plus the focus pointer.

use crate::error::{SceneError, SceneResult};
use crate::shapes::{Shape, ShapeId};
use kurbo::{Point, Vec2};
use std::collections::HashMap;

/// Ordered collection of shapes.
///
/// Insertion order is paint order and is never re-sorted; focus is an id that
/// is resolved on every lookup, so it cannot outlive the shape it names.
#[derive(Debug, Clone, Default)]
pub struct Scene {
    /// All shapes, keyed by id.
    shapes: HashMap<ShapeId, Shape>,
    /// Paint order (back to front).
    order: Vec<ShapeId>,
    /// Focused shape id, if any.
    focused: Option<ShapeId>,
    /// Largest id ever handed out or added.
    max_id: Option<u64>,
    /// Bumped on every mutation.
    revision: u64,
}

impl Scene {
    /// Create an empty scene.
    pub fn new() -> Self {
        Self::default()
    }

    /// Reserve a fresh id, greater than any id this scene has seen.
    ///
    /// `None` once an id of `u64::MAX` has been used.
    pub fn next_id(&mut self) -> Option<ShapeId> {
        let id = match self.max_id {
            None => 0,
            Some(max) => max.checked_add(1)?,
        };
        self.max_id = Some(id);
        Some(ShapeId(id))
    }

    /// Append a shape on top of everything else.
    pub fn add_shape(&mut self, shape: Shape) -> SceneResult<()> {
        let id = shape.id();
        if self.shapes.contains_key(&id) {
            return Err(SceneError::DuplicateId(id));
        }
        self.max_id = self.max_id.max(Some(id.0));
        self.order.push(id);
        self.shapes.insert(id, shape);
        self.touch();
        log::debug!("Added shape {id}");
        Ok(())
    }

    /// Remove a shape. Focus on it is cleared.
    pub fn remove(&mut self, id: ShapeId) -> Option<Shape> {
        let removed = self.shapes.remove(&id)?;
        self.order.retain(|&shape_id| shape_id != id);
        if self.focused == Some(id) {
            self.focused = None;
        }
        self.touch();
        log::debug!("Removed shape {id}");
        Some(removed)
    }

    /// Remove every shape.
    pub fn clear(&mut self) {
        self.shapes.clear();
        self.order.clear();
        self.focused = None;
        self.touch();
    }

    /// Move a shape. Returns false (and changes nothing) if the id is gone.
    pub fn translate(&mut self, id: ShapeId, delta: Vec2) -> bool {
        let Some(shape) = self.shapes.get_mut(&id) else {
            return false;
        };
        shape.translate(delta);
        self.touch();
        true
    }

    /// Grow a shape's extent. Negative results are kept as-is.
    pub fn resize(&mut self, id: ShapeId, delta: Vec2) -> bool {
        let Some(shape) = self.shapes.get_mut(&id) else {
            return false;
        };
        shape.resize(delta);
        self.touch();
        true
    }

    /// Focus a shape, or clear focus with `None`.
    ///
    /// Focusing an id that is not in the scene clears focus and returns false.
    pub fn set_focus(&mut self, id: Option<ShapeId>) -> bool {
        let resolved = id.filter(|id| self.shapes.contains_key(id));
        if resolved != self.focused {
            self.focused = resolved;
            self.touch();
        }
        resolved == id
    }

    /// The focused shape, looked up fresh.
    pub fn focus(&self) -> Option<&Shape> {
        self.focused.and_then(|id| self.shapes.get(&id))
    }

    /// The focused id, if it still names a live shape.
    pub fn focused_id(&self) -> Option<ShapeId> {
        self.focus().map(Shape::id)
    }

    /// Get a shape by id.
    pub fn get(&self, id: ShapeId) -> Option<&Shape> {
        self.shapes.get(&id)
    }

    /// Whether a shape with this id exists.
    pub fn contains(&self, id: ShapeId) -> bool {
        self.shapes.contains_key(&id)
    }

    /// Shapes in paint order (back to front).
    pub fn shapes_ordered(&self) -> impl DoubleEndedIterator<Item = &Shape> {
        self.order.iter().filter_map(|id| self.shapes.get(id))
    }

    /// Topmost shape under a logical point.
    pub fn shape_at(&self, point: Point, tolerance: f64) -> Option<ShapeId> {
        self.shapes_ordered()
            .rev()
            .find(|shape| shape.hit_test(point, tolerance))
            .map(Shape::id)
    }

    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    /// Mutation counter for consumers that poll.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    fn touch(&mut self) {
        self.revision = self.revision.wrapping_add(1);
    }
}
