//! Circle hotspot.

use super::ShapeTrait;
use kurbo::{Point, Rect, Vec2};
use serde::{Deserialize, Serialize};

/// A circle anchored at its center.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Circle {
    /// Center point.
    pub center: Point,
    /// Radius in image pixels.
    pub radius: f64,
}

impl Circle {
    /// Create a new circle.
    pub fn new(center: Point, radius: f64) -> Self {
        Self { center, radius }
    }

    /// Create a circle whose edge passes through `edge`.
    pub fn through(center: Point, edge: Point) -> Self {
        Self::new(center, center.distance(edge))
    }

    /// Get as a kurbo Circle.
    pub fn as_kurbo(&self) -> kurbo::Circle {
        kurbo::Circle::new(self.center, self.radius)
    }
}

impl ShapeTrait for Circle {
    fn bounds(&self) -> Rect {
        Rect::new(
            self.center.x - self.radius,
            self.center.y - self.radius,
            self.center.x + self.radius,
            self.center.y + self.radius,
        )
    }

    fn hit_test(&self, point: Point, tolerance: f64) -> bool {
        self.center.distance(point) <= self.radius + tolerance
    }

    fn anchor(&self) -> Point {
        self.center
    }

    fn translate(&mut self, delta: Vec2) {
        self.center += delta;
    }
}
