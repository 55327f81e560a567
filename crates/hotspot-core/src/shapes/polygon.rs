//! Polygon hotspot.

use super::{point_to_segment_dist, ShapeTrait};
use kurbo::{Point, Rect, Vec2};
use serde::{Deserialize, Serialize};

/// Minimum vertex count of a finished polygon.
pub const MIN_POLYGON_VERTICES: usize = 3;

/// A closed polygon. `anchor` caches the first vertex and is the reference
/// point for drag-to-move.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Polygon {
    /// Vertices in capture order.
    pub vertices: Vec<Point>,
    /// Cached first vertex.
    pub anchor: Point,
}

impl Polygon {
    /// Build a polygon, or `None` with fewer than [`MIN_POLYGON_VERTICES`] vertices.
    pub fn from_vertices(vertices: Vec<Point>) -> Option<Self> {
        if vertices.len() < MIN_POLYGON_VERTICES {
            return None;
        }
        let anchor = vertices[0];
        Some(Self { vertices, anchor })
    }

    /// Even-odd containment test (ray casting).
    pub fn contains(&self, point: Point) -> bool {
        let n = self.vertices.len();
        if n < MIN_POLYGON_VERTICES {
            return false;
        }

        let mut inside = false;
        let mut j = n - 1;
        for i in 0..n {
            let vi = self.vertices[i];
            let vj = self.vertices[j];
            if ((vi.y > point.y) != (vj.y > point.y))
                && (point.x < (vj.x - vi.x) * (point.y - vi.y) / (vj.y - vi.y) + vi.x)
            {
                inside = !inside;
            }
            j = i;
        }
        inside
    }

    /// Distance from `point` to the nearest edge, closing edge included.
    fn edge_distance(&self, point: Point) -> f64 {
        let n = self.vertices.len();
        (0..n)
            .map(|i| point_to_segment_dist(point, self.vertices[i], self.vertices[(i + 1) % n]))
            .fold(f64::INFINITY, f64::min)
    }
}

impl ShapeTrait for Polygon {
    fn bounds(&self) -> Rect {
        let mut vertices = self.vertices.iter();
        let Some(first) = vertices.next() else {
            return Rect::from_origin_size(self.anchor, (0.0, 0.0));
        };
        vertices.fold(Rect::from_points(*first, *first), |acc, p| {
            acc.union_pt(*p)
        })
    }

    fn hit_test(&self, point: Point, tolerance: f64) -> bool {
        self.contains(point) || (tolerance > 0.0 && self.edge_distance(point) <= tolerance)
    }

    fn anchor(&self) -> Point {
        self.anchor
    }

    fn translate(&mut self, delta: Vec2) {
        for vertex in &mut self.vertices {
            *vertex += delta;
        }
        self.anchor += delta;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square() -> Polygon {
        Polygon::from_vertices(vec![
            Point::new(0.0, 0.0),
            Point::new(100.0, 0.0),
            Point::new(100.0, 100.0),
            Point::new(0.0, 100.0),
        ])
        .unwrap()
    }

    #[test]
    fn test_requires_three_vertices() {
        assert!(Polygon::from_vertices(vec![Point::new(0.0, 0.0), Point::new(1.0, 1.0)]).is_none());
        let tri = Polygon::from_vertices(vec![
            Point::new(1.0, 2.0),
            Point::new(10.0, 0.0),
            Point::new(5.0, 10.0),
        ])
        .unwrap();
        assert_eq!(tri.anchor, Point::new(1.0, 2.0));
    }

    #[test]
    fn test_polygon_contains() {
        let poly = square();
        assert!(poly.contains(Point::new(50.0, 50.0)));
        assert!(!poly.contains(Point::new(150.0, 50.0)));
    }

    #[test]
    fn test_hit_test_near_edge() {
        let poly = square();
        assert!(!poly.hit_test(Point::new(104.0, 50.0), 0.0));
        assert!(poly.hit_test(Point::new(104.0, 50.0), 5.0));
    }

    #[test]
    fn test_translate_shifts_every_vertex() {
        let mut poly = square();
        let before = poly.vertices.clone();
        poly.translate(Vec2::new(7.0, -3.0));

        assert_eq!(poly.vertices.len(), before.len());
        for (moved, original) in poly.vertices.iter().zip(&before) {
            assert!((moved.x - original.x - 7.0).abs() < f64::EPSILON);
            assert!((moved.y - original.y + 3.0).abs() < f64::EPSILON);
        }
        assert_eq!(poly.anchor, poly.vertices[0]);
    }

    #[test]
    fn test_bounds() {
        let bounds = square().bounds();
        assert!((bounds.x0).abs() < f64::EPSILON);
        assert!((bounds.x1 - 100.0).abs() < f64::EPSILON);
        assert!((bounds.y1 - 100.0).abs() < f64::EPSILON);
    }
}
