//! Hotspot geometry: the four shape kinds and the pure functions that create,
//! move and hit-test them.
//!
//! All coordinates are pixel offsets in the displayed image's space.

mod circle;
mod point;
mod polygon;
mod rectangle;

pub use circle::Circle;
pub use point::PointMarker;
pub use polygon::{Polygon, MIN_POLYGON_VERTICES};
pub use rectangle::Rectangle;

use crate::error::ShapeError;
use kurbo::{Point, Rect, Vec2};
use serde::{Deserialize, Serialize};

/// Gestures smaller than this (per axis for rectangles, radius for circles)
/// are treated as click jitter and produce no shape.
pub const MIN_SHAPE_SIZE: f64 = 5.0;

/// Drawn radius of a point marker. Not stored in the shape.
pub const POINT_RADIUS: f64 = 8.0;

/// Shape kind, fixed when a hotspot is created.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShapeKind {
    Rectangle,
    Circle,
    Polygon,
    Point,
}

impl ShapeKind {
    /// Human readable name.
    pub fn label(self) -> &'static str {
        match self {
            ShapeKind::Rectangle => "rectangle",
            ShapeKind::Circle => "circle",
            ShapeKind::Polygon => "polygon",
            ShapeKind::Point => "point",
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
    point.distance(a + seg * t)
}

/// Common behaviour of the concrete shape kinds.
pub trait ShapeTrait {
    /// Bounding box in image coordinates.
    fn bounds(&self) -> Rect;

    /// Check if a point (in image coordinates) hits this shape.
    fn hit_test(&self, point: Point, tolerance: f64) -> bool;

    /// Reference point used while dragging.
    fn anchor(&self) -> Point;

    /// Rigid translation in place.
    fn translate(&mut self, delta: Vec2);
}

/// Geometry of a hotspot, one variant per kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Shape {
    Rectangle(Rectangle),
    Circle(Circle),
    Polygon(Polygon),
    Point(PointMarker),
}

impl Shape {
    pub fn kind(&self) -> ShapeKind {
        match self {
            Shape::Rectangle(_) => ShapeKind::Rectangle,
            Shape::Circle(_) => ShapeKind::Circle,
            Shape::Polygon(_) => ShapeKind::Polygon,
            Shape::Point(_) => ShapeKind::Point,
        }
    }

    pub fn bounds(&self) -> Rect {
        match self {
            Shape::Rectangle(s) => s.bounds(),
            Shape::Circle(s) => s.bounds(),
            Shape::Polygon(s) => s.bounds(),
            Shape::Point(s) => s.bounds(),
        }
    }

    pub fn hit_test(&self, point: Point, tolerance: f64) -> bool {
        match self {
            Shape::Rectangle(s) => s.hit_test(point, tolerance),
            Shape::Circle(s) => s.hit_test(point, tolerance),
            Shape::Polygon(s) => s.hit_test(point, tolerance),
            Shape::Point(s) => s.hit_test(point, tolerance),
        }
    }

    /// Top-left for rectangles, center for circles and points, first vertex
    /// for polygons.
    pub fn anchor(&self) -> Point {
        match self {
            Shape::Rectangle(s) => s.anchor(),
            Shape::Circle(s) => s.anchor(),
            Shape::Polygon(s) => s.anchor(),
            Shape::Point(s) => s.anchor(),
        }
    }

    /// Return a copy shifted by `delta`.
    pub fn translated(&self, delta: Vec2) -> Shape {
        let mut shape = self.clone();
        match &mut shape {
            Shape::Rectangle(s) => s.translate(delta),
            Shape::Circle(s) => s.translate(delta),
            Shape::Polygon(s) => s.translate(delta),
            Shape::Point(s) => s.translate(delta),
        }
        shape
    }

    /// Return a copy whose anchor sits at `anchor`.
    pub fn with_anchor(&self, anchor: Point) -> Shape {
        self.translated(anchor - self.anchor())
    }

    /// Coordinate equality within `epsilon`.
    pub fn approx_eq(&self, other: &Shape, epsilon: f64) -> bool {
        let close = |a: Point, b: Point| (a.x - b.x).abs() <= epsilon && (a.y - b.y).abs() <= epsilon;
        match (self, other) {
            (Shape::Rectangle(a), Shape::Rectangle(b)) => {
                close(a.position, b.position)
                    && (a.width - b.width).abs() <= epsilon
                    && (a.height - b.height).abs() <= epsilon
            }
            (Shape::Circle(a), Shape::Circle(b)) => {
                close(a.center, b.center) && (a.radius - b.radius).abs() <= epsilon
            }
            (Shape::Point(a), Shape::Point(b)) => close(a.center, b.center),
            (Shape::Polygon(a), Shape::Polygon(b)) => {
                a.vertices.len() == b.vertices.len()
                    && close(a.anchor, b.anchor)
                    && a.vertices.iter().zip(&b.vertices).all(|(p, q)| close(*p, *q))
            }
            _ => false,
        }
    }

    /// Check the invariants every synthesized shape satisfies. Used on
    /// imported questions.
    pub fn validate(&self) -> Result<(), ShapeError> {
        let finite = |p: &Point| p.x.is_finite() && p.y.is_finite();
        let positive = |v: f64| v.is_finite() && v > 0.0;
        match self {
            Shape::Rectangle(r) => {
                if !finite(&r.position) {
                    return Err(ShapeError::NonFinite);
                }
                if !positive(r.width) || !positive(r.height) {
                    return Err(ShapeError::EmptyRectangle {
                        width: r.width,
                        height: r.height,
                    });
                }
            }
            Shape::Circle(c) => {
                if !finite(&c.center) {
                    return Err(ShapeError::NonFinite);
                }
                if !positive(c.radius) {
                    return Err(ShapeError::EmptyCircle(c.radius));
                }
            }
            Shape::Point(m) => {
                if !finite(&m.center) {
                    return Err(ShapeError::NonFinite);
                }
            }
            Shape::Polygon(p) => {
                if p.vertices.len() < MIN_POLYGON_VERTICES {
                    return Err(ShapeError::TooFewVertices(p.vertices.len()));
                }
                if !p.vertices.iter().all(finite) {
                    return Err(ShapeError::NonFinite);
                }
                if p.vertices.first() != Some(&p.anchor) {
                    return Err(ShapeError::AnchorMismatch);
                }
            }
        }
        Ok(())
    }
}

/// Rectangle from a drag between two corners. `None` if either side is
/// shorter than [`MIN_SHAPE_SIZE`].
pub fn synthesize_rectangle(p1: Point, p2: Point) -> Option<Shape> {
    if (p2.x - p1.x).abs() < MIN_SHAPE_SIZE || (p2.y - p1.y).abs() < MIN_SHAPE_SIZE {
        return None;
    }
    Some(Shape::Rectangle(Rectangle::from_corners(p1, p2)))
}

/// Circle from a center and a point on its edge. `None` if the radius is
/// below [`MIN_SHAPE_SIZE`].
pub fn synthesize_circle(center: Point, edge: Point) -> Option<Shape> {
    let circle = Circle::through(center, edge);
    if circle.radius < MIN_SHAPE_SIZE {
        return None;
    }
    Some(Shape::Circle(circle))
}

/// Point marker at `p`.
pub fn synthesize_point(p: Point) -> Shape {
    Shape::Point(PointMarker::new(p))
}

/// Polygon from captured vertices. `None` below [`MIN_POLYGON_VERTICES`].
pub fn synthesize_polygon(vertices: Vec<Point>) -> Option<Shape> {
    Polygon::from_vertices(vertices).map(Shape::Polygon)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_shapes() -> Vec<Shape> {
        vec![
            synthesize_rectangle(Point::new(10.0, 10.0), Point::new(60.0, 50.0)).unwrap(),
            synthesize_circle(Point::new(100.0, 100.0), Point::new(120.0, 100.0)).unwrap(),
            synthesize_point(Point::new(3.0, 4.0)),
            synthesize_polygon(vec![
                Point::new(0.0, 0.0),
                Point::new(10.0, 0.0),
                Point::new(5.0, 10.0),
            ])
            .unwrap(),
        ]
    }

    #[test]
    fn test_rectangle_normalized() {
        let shape = synthesize_rectangle(Point::new(60.0, 50.0), Point::new(10.0, 10.0)).unwrap();
        let Shape::Rectangle(rect) = shape else {
            panic!("Expected rectangle");
        };
        assert_eq!(rect.position, Point::new(10.0, 10.0));
        assert!((rect.width - 50.0).abs() < f64::EPSILON);
        assert!((rect.height - 40.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_rectangle_rejects_thin_drags() {
        assert!(synthesize_rectangle(Point::new(0.0, 0.0), Point::new(4.9, 100.0)).is_none());
        assert!(synthesize_rectangle(Point::new(0.0, 0.0), Point::new(100.0, 4.0)).is_none());
        assert!(synthesize_rectangle(Point::new(0.0, 0.0), Point::new(-3.0, -100.0)).is_none());
        assert!(synthesize_rectangle(Point::new(0.0, 0.0), Point::new(5.0, 5.0)).is_some());
    }

    #[test]
    fn test_circle_rejects_small_radius() {
        assert!(synthesize_circle(Point::new(100.0, 100.0), Point::new(103.0, 100.0)).is_none());
        assert!(synthesize_circle(Point::new(100.0, 100.0), Point::new(103.0, 104.0)).is_some());
    }

    #[test]
    fn test_point_always_succeeds() {
        let shape = synthesize_point(Point::new(0.0, 0.0));
        assert_eq!(shape.kind(), ShapeKind::Point);
        assert_eq!(shape.anchor(), Point::new(0.0, 0.0));
    }

    #[test]
    fn test_translate_round_trip() {
        let delta = Vec2::new(12.5, -7.25);
        for shape in sample_shapes() {
            let back = shape.translated(delta).translated(-delta);
            assert!(shape.approx_eq(&back, 1e-9), "{:?} != {:?}", shape, back);
        }
    }

    #[test]
    fn test_translate_moves_anchor_by_delta() {
        let delta = Vec2::new(3.0, 9.0);
        for shape in sample_shapes() {
            let moved = shape.translated(delta);
            assert_eq!(moved.kind(), shape.kind());
            assert!(((moved.anchor() - shape.anchor()) - delta).hypot() < 1e-9);
        }
    }

    #[test]
    fn test_with_anchor() {
        let shape = synthesize_polygon(vec![
            Point::new(0.0, 0.0),
            Point::new(10.0, 0.0),
            Point::new(5.0, 10.0),
        ])
        .unwrap();
        let moved = shape.with_anchor(Point::new(20.0, 20.0));
        let Shape::Polygon(poly) = moved else {
            panic!("Expected polygon");
        };
        assert_eq!(
            poly.vertices,
            vec![Point::new(20.0, 20.0), Point::new(30.0, 20.0), Point::new(25.0, 30.0)]
        );
    }

    #[test]
    fn test_point_to_segment_dist() {
        let d = point_to_segment_dist(Point::new(5.0, 5.0), Point::new(0.0, 0.0), Point::new(10.0, 0.0));
        assert!((d - 5.0).abs() < f64::EPSILON);
        let d = point_to_segment_dist(Point::new(3.0, 4.0), Point::new(0.0, 0.0), Point::new(0.0, 0.0));
        assert!((d - 5.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_synthesized_shapes_validate() {
        for shape in sample_shapes() {
            assert_eq!(shape.validate(), Ok(()));
        }
    }

    #[test]
    fn test_validate_rejects_degenerate_shapes() {
        let flat = Shape::Rectangle(Rectangle::new(Point::new(0.0, 0.0), 10.0, 0.0));
        assert!(matches!(flat.validate(), Err(ShapeError::EmptyRectangle { .. })));

        let negative = Shape::Rectangle(Rectangle::new(Point::new(0.0, 0.0), -4.0, 10.0));
        assert!(matches!(negative.validate(), Err(ShapeError::EmptyRectangle { .. })));

        let dot = Shape::Circle(Circle::new(Point::new(1.0, 1.0), 0.0));
        assert_eq!(dot.validate(), Err(ShapeError::EmptyCircle(0.0)));

        let line = Shape::Polygon(Polygon {
            vertices: vec![Point::new(0.0, 0.0), Point::new(10.0, 0.0)],
            anchor: Point::new(0.0, 0.0),
        });
        assert_eq!(line.validate(), Err(ShapeError::TooFewVertices(2)));

        let drifted = Shape::Polygon(Polygon {
            vertices: vec![Point::new(0.0, 0.0), Point::new(10.0, 0.0), Point::new(5.0, 10.0)],
            anchor: Point::new(1.0, 1.0),
        });
        assert_eq!(drifted.validate(), Err(ShapeError::AnchorMismatch));

        let lost = synthesize_point(Point::new(f64::NAN, 0.0));
        assert_eq!(lost.validate(), Err(ShapeError::NonFinite));
    }

    #[test]
    fn test_approx_eq_rejects_different_kinds() {
        let shapes = sample_shapes();
        assert!(!shapes[0].approx_eq(&shapes[1], 1.0));
    }
}
