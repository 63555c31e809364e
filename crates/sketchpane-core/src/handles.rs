//! Resize handles attached to the focused shape.

use kurbo::Point;
use serde::{Deserialize, Serialize};

/// Which handle is being manipulated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum HandleKind {
    /// Bottom-right corner of a box shape.
    BottomRight,
    /// First endpoint of a line or arrow.
    Start,
    /// Second endpoint of a line or arrow.
    End,
}

/// A manipulation handle, positioned in logical coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Handle {
    /// The kind of handle (determines behavior).
    pub kind: HandleKind,
    /// Position in logical coordinates.
    pub position: Point,
}

impl Handle {
    /// Create a new handle.
    pub fn new(kind: HandleKind, position: Point) -> Self {
        Self { kind, position }
    }

    /// Check if a logical point lies within `radius` of this handle.
    pub fn hit_test(&self, point: Point, radius: f64) -> bool {
        (point - self.position).hypot2() <= radius * radius
    }
}

/// Find the handle under a point. Later handles win, matching paint order.
pub fn hit_test_handles(handles: &[Handle], point: Point, radius: f64) -> Option<HandleKind> {
    handles
        .iter()
        .rev()
        .find(|handle| handle.hit_test(point, radius))
        .map(|handle| handle.kind)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_handle_hit_radius() {
        let handle = Handle::new(HandleKind::BottomRight, Point::new(100.0, 50.0));
        assert!(handle.hit_test(Point::new(103.0, 54.0), 5.0));
        assert!(!handle.hit_test(Point::new(106.0, 50.0), 5.0));
    }

    #[test]
    fn test_overlapping_endpoints_prefer_end() {
        // A zero-length line has both handles on the same spot.
        let handles = [
            Handle::new(HandleKind::Start, Point::ZERO),
            Handle::new(HandleKind::End, Point::ZERO),
        ];
        assert_eq!(
            hit_test_handles(&handles, Point::new(1.0, 1.0), 5.0),
            Some(HandleKind::End)
        );
        assert_eq!(hit_test_handles(&handles, Point::new(20.0, 0.0), 5.0), None);
    }

    #[test]
    fn test_handle_kind_serde_names() {
        let json = serde_json::to_string(&HandleKind::BottomRight).unwrap();
        assert_eq!(json, "\"bottom-right\"");
    }
}
