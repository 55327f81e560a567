//! Point marker hotspot.

use super::{ShapeTrait, POINT_RADIUS};
use kurbo::{Point, Rect, Vec2};
use serde::{Deserialize, Serialize};

/// A single-position marker. Only the center is stored; the drawn radius is
/// [`POINT_RADIUS`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointMarker {
    pub center: Point,
}

impl PointMarker {
    pub fn new(center: Point) -> Self {
        Self { center }
    }
}

impl ShapeTrait for PointMarker {
    fn bounds(&self) -> Rect {
        Rect::from_center_size(self.center, (POINT_RADIUS * 2.0, POINT_RADIUS * 2.0))
    }

    fn hit_test(&self, point: Point, tolerance: f64) -> bool {
        self.center.distance(point) <= POINT_RADIUS + tolerance
    }

    fn anchor(&self) -> Point {
        self.center
    }

    fn translate(&mut self, delta: Vec2) {
        self.center += delta;
    }
}
