//! Shape definitions for the diagram surface.
//!
//! Every shape is the same record: a kind tag, an anchor point and a signed
//! extent. Kind only matters to geometry derivation and handle layout, so the
//! interaction code can stay kind-agnostic.

mod geometry;

pub use geometry::{ARROW_HEAD_SIZE, Primitive};

use crate::handles::{Handle, HandleKind};
use kurbo::{Point, Rect, Vec2};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Unique identifier for shapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ShapeId(pub u64);

impl fmt::Display for ShapeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// The closed set of primitives the surface can place.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShapeKind {
    Rectangle,
    Square,
    Circle,
    Triangle,
    Diamond,
    Rhombus,
    Arch,
    Line,
    Arrow,
}

impl ShapeKind {
    /// All kinds, in toolbar order.
    pub const ALL: [ShapeKind; 9] = [
        ShapeKind::Rectangle,
        ShapeKind::Square,
        ShapeKind::Circle,
        ShapeKind::Triangle,
        ShapeKind::Diamond,
        ShapeKind::Rhombus,
        ShapeKind::Arch,
        ShapeKind::Line,
        ShapeKind::Arrow,
    ];

    /// Lines and arrows store two endpoints instead of a box.
    pub fn is_linear(self) -> bool {
        matches!(self, ShapeKind::Line | ShapeKind::Arrow)
    }

    /// Extent a freshly placed shape of this kind gets.
    pub fn default_size(self) -> (f64, f64) {
        match self {
            ShapeKind::Square | ShapeKind::Circle => (50.0, 50.0),
            ShapeKind::Diamond | ShapeKind::Rhombus => (70.0, 70.0),
            ShapeKind::Line | ShapeKind::Arrow => (100.0, 0.0),
            ShapeKind::Rectangle | ShapeKind::Triangle | ShapeKind::Arch => (100.0, 50.0),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            ShapeKind::Rectangle => "rectangle",
            ShapeKind::Square => "square",
            ShapeKind::Circle => "circle",
            ShapeKind::Triangle => "triangle",
            ShapeKind::Diamond => "diamond",
            ShapeKind::Rhombus => "rhombus",
            ShapeKind::Arch => "arch",
            ShapeKind::Line => "line",
            ShapeKind::Arrow => "arrow",
        }
    }
}

/// Paint tokens. They are opaque strings handed through to the draw sink.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShapeStyle {
    /// Fill token (e.g. `"transparent"`, `"#ff0000"`).
    pub fill: String,
    /// Stroke token.
    pub stroke: String,
}

impl Default for ShapeStyle {
    fn default() -> Self {
        Self {
            fill: "transparent".to_string(),
            stroke: "#ffffff".to_string(),
        }
    }
}

/// A shape on the canvas, in logical coordinates.
///
/// For box kinds `(x, y)` is the top-left corner and `width`/`height` the
/// extent. For lines and arrows `(x, y)` and `(x + width, y + height)` are the
/// two endpoints. Extents may be negative while a handle drag flips the box.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shape {
    pub(crate) id: ShapeId,
    pub kind: ShapeKind,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    #[serde(default)]
    pub style: ShapeStyle,
}

impl Shape {
    /// Create a new shape.
    pub fn new(id: ShapeId, kind: ShapeKind, x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            id,
            kind,
            x,
            y,
            width,
            height,
            style: ShapeStyle::default(),
        }
    }

    /// Create a shape of the kind's default size centered on `center`.
    pub fn placed_at(id: ShapeId, kind: ShapeKind, center: Point, style: ShapeStyle) -> Self {
        let (width, height) = kind.default_size();
        Self {
            id,
            kind,
            x: center.x - width / 2.0,
            y: center.y - height / 2.0,
            width,
            height,
            style,
        }
    }

    /// Set the style.
    pub fn with_style(mut self, style: ShapeStyle) -> Self {
        self.style = style;
        self
    }

    pub fn id(&self) -> ShapeId {
        self.id
    }

    /// Anchor point (top-left, or the start endpoint for lines).
    pub fn origin(&self) -> Point {
        Point::new(self.x, self.y)
    }

    /// Opposite corner (bottom-right, or the end endpoint for lines).
    pub fn far_corner(&self) -> Point {
        Point::new(self.x + self.width, self.y + self.height)
    }

    /// Bounding box, normalized so a flipped extent still yields a valid rect.
    pub fn bounds(&self) -> Rect {
        Rect::from_points(self.origin(), self.far_corner())
    }

    /// Move the anchor by a delta.
    pub fn translate(&mut self, delta: Vec2) {
        self.x += delta.x;
        self.y += delta.y;
    }

    /// Grow the extent by a delta. Never clamped.
    pub fn resize(&mut self, delta: Vec2) {
        self.width += delta.x;
        self.height += delta.y;
    }

    /// Manipulation handles shown while this shape has focus.
    pub fn handles(&self) -> Vec<Handle> {
        if self.kind.is_linear() {
            vec![
                Handle::new(HandleKind::Start, self.origin()),
                Handle::new(HandleKind::End, self.far_corner()),
            ]
        } else {
            vec![Handle::new(HandleKind::BottomRight, self.far_corner())]
        }
    }

    /// Whether this shape exposes a handle of the given kind.
    pub fn has_handle(&self, kind: HandleKind) -> bool {
        match kind {
            HandleKind::BottomRight => !self.kind.is_linear(),
            HandleKind::Start | HandleKind::End => self.kind.is_linear(),
        }
    }

    /// Check if a logical point hits this shape.
    pub fn hit_test(&self, point: Point, tolerance: f64) -> bool {
        match self.kind {
            ShapeKind::Line | ShapeKind::Arrow => {
                point_to_segment_dist(point, self.origin(), self.far_corner()) <= tolerance
            }
            ShapeKind::Circle => {
                let radius = (self.width / 2.0).abs();
                let center = Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0);
                (point - center).hypot() <= radius + tolerance
            }
            ShapeKind::Triangle | ShapeKind::Diamond | ShapeKind::Rhombus => {
                let outline = self.outline();
                point_in_polygon(point, &outline)
                    || point_to_polyline_dist(point, &closed(&outline)) <= tolerance
            }
            ShapeKind::Rectangle | ShapeKind::Square | ShapeKind::Arch => {
                self.bounds().inflate(tolerance, tolerance).contains(point)
            }
        }
    }
}

/// Distance from a point to a line segment (a→b).
pub fn point_to_segment_dist(point: Point, a: Point, b: Point) -> f64 {
    let seg = b - a;
    let pv = point - a;
    let len_sq = seg.hypot2();
    if len_sq < f64::EPSILON {
        return pv.hypot();
    }
    let t = (pv.dot(seg) / len_sq).clamp(0.0, 1.0);
    let proj = a + seg * t;
    (point - proj).hypot()
}

/// Minimum distance from a point to a polyline.
pub fn point_to_polyline_dist(point: Point, points: &[Point]) -> f64 {
    points
        .windows(2)
        .map(|w| point_to_segment_dist(point, w[0], w[1]))
        .fold(f64::INFINITY, f64::min)
}

/// Even-odd containment test against a closed polygon.
fn point_in_polygon(point: Point, polygon: &[Point]) -> bool {
    let mut inside = false;
    let mut j = polygon.len().wrapping_sub(1);
    for i in 0..polygon.len() {
        let (a, b) = (polygon[i], polygon[j]);
        if (a.y > point.y) != (b.y > point.y)
            && point.x < (b.x - a.x) * (point.y - a.y) / (b.y - a.y) + a.x
        {
            inside = !inside;
        }
        j = i;
    }
    inside
}

fn closed(points: &[Point]) -> Vec<Point> {
    let mut pts = points.to_vec();
    if let Some(&first) = points.first() {
        pts.push(first);
    }
    pts
}
