//! Geometry derivation: shape box to concrete draw primitives.

use super::{Shape, ShapeKind};
use kurbo::{Circle, Line, Point, Rect, SvgArc, Vec2};
use std::f64::consts::FRAC_PI_6;

/// Length of the arrowhead sides, in logical units.
pub const ARROW_HEAD_SIZE: f64 = 10.0;

/// A concrete drawing instruction in logical coordinates.
#[derive(Debug, Clone)]
pub enum Primitive {
    /// Axis-aligned rectangle.
    Rect(Rect),
    /// Circle.
    Circle(Circle),
    /// Closed polygon, filled with the shape's fill and outlined with its stroke.
    Polygon(Vec<Point>),
    /// Elliptical arc segment (SVG arc semantics).
    Arc(SvgArc),
    /// Straight stroked segment.
    Segment(Line),
    /// Closed polygon painted with the shape's stroke token (arrowheads).
    StrokeFilledPolygon(Vec<Point>),
}

impl Shape {
    /// Derive the primitives that draw this shape.
    pub fn primitives(&self) -> Vec<Primitive> {
        let Shape {
            x, y, width, height, ..
        } = *self;

        match self.kind {
            // A flipped box is drawn normalized.
            ShapeKind::Rectangle | ShapeKind::Square => vec![Primitive::Rect(self.bounds())],
            ShapeKind::Circle => {
                let center = Point::new(x + width / 2.0, y + height / 2.0);
                vec![Primitive::Circle(Circle::new(center, (width / 2.0).abs()))]
            }
            ShapeKind::Triangle | ShapeKind::Diamond | ShapeKind::Rhombus => {
                vec![Primitive::Polygon(self.outline())]
            }
            ShapeKind::Arch => {
                let base = y + height;
                vec![Primitive::Arc(SvgArc {
                    from: Point::new(x, base),
                    to: Point::new(x + width, base),
                    radii: Vec2::new((width / 2.0).abs(), height.abs()),
                    x_rotation: 0.0,
                    large_arc: false,
                    sweep: true,
                })]
            }
            ShapeKind::Line => vec![Primitive::Segment(Line::new(
                self.origin(),
                self.far_corner(),
            ))],
            ShapeKind::Arrow => {
                let end = self.far_corner();
                vec![
                    Primitive::Segment(Line::new(self.origin(), end)),
                    Primitive::StrokeFilledPolygon(arrow_head(end, height.atan2(width))),
                ]
            }
        }
    }

    /// Polygon vertices for the polygonal kinds; empty for everything else.
    pub(crate) fn outline(&self) -> Vec<Point> {
        let Shape {
            x, y, width, height, ..
        } = *self;

        match self.kind {
            ShapeKind::Triangle => vec![
                Point::new(x, y + height),
                Point::new(x + width, y + height),
                Point::new(x + width / 2.0, y),
            ],
            ShapeKind::Diamond | ShapeKind::Rhombus => vec![
                Point::new(x + width / 2.0, y),
                Point::new(x + width, y + height / 2.0),
                Point::new(x + width / 2.0, y + height),
                Point::new(x, y + height / 2.0),
            ],
            _ => Vec::new(),
        }
    }
}

/// Arrowhead triangle with its tip at `end`, pointing along `angle`.
fn arrow_head(end: Point, angle: f64) -> Vec<Point> {
    let wing = |theta: f64| {
        Point::new(
            end.x - ARROW_HEAD_SIZE * theta.cos(),
            end.y - ARROW_HEAD_SIZE * theta.sin(),
        )
    };
    vec![end, wing(angle - FRAC_PI_6), wing(angle + FRAC_PI_6)]
}
