//! Hotspot record: a shape plus the grading data attached to it.

use crate::shapes::{Shape, ShapeKind};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for hotspots.
pub type HotspotId = Uuid;

/// Default scoring weight of a new hotspot.
pub const DEFAULT_HOTSPOT_POINTS: u32 = 1;

/// One interactive region on the question image.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hotspot {
    pub(crate) id: HotspotId,
    /// Display label.
    pub name: String,
    /// Geometry. The variant (shape kind) never changes after creation.
    pub(crate) shape: Shape,
    /// Whether selecting this hotspot counts as a correct response.
    #[serde(default)]
    pub is_correct: bool,
    /// Whether this hotspot takes part in definition matching.
    #[serde(default)]
    pub is_drop_zone: bool,
    /// Shown when this hotspot decides a response.
    #[serde(default)]
    pub feedback: String,
    /// Scoring weight.
    #[serde(default = "default_points")]
    pub points: u32,
}

fn default_points() -> u32 {
    DEFAULT_HOTSPOT_POINTS
}

impl Hotspot {
    /// Create a hotspot with a fresh id.
    pub fn new(name: impl Into<String>, shape: Shape) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            shape,
            is_correct: false,
            is_drop_zone: false,
            feedback: String::new(),
            points: DEFAULT_HOTSPOT_POINTS,
        }
    }

    pub fn id(&self) -> HotspotId {
        self.id
    }

    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    pub fn kind(&self) -> ShapeKind {
        self.shape.kind()
    }

    /// Replace the geometry. Returns `None` if the new shape is of a
    /// different kind.
    pub fn with_shape(&self, shape: Shape) -> Option<Self> {
        if shape.kind() != self.kind() {
            return None;
        }
        Some(Self {
            shape,
            ..self.clone()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shapes::{synthesize_circle, synthesize_point};
    use kurbo::{Point, Vec2};

    #[test]
    fn test_new_hotspot_defaults() {
        let hotspot = Hotspot::new("Hotspot 1", synthesize_point(Point::new(1.0, 2.0)));
        assert_eq!(hotspot.kind(), ShapeKind::Point);
        assert!(!hotspot.is_correct);
        assert!(!hotspot.is_drop_zone);
        assert!(hotspot.feedback.is_empty());
        assert_eq!(hotspot.points, DEFAULT_HOTSPOT_POINTS);
    }

    #[test]
    fn test_with_shape_keeps_kind_fixed() {
        let hotspot = Hotspot::new("A", synthesize_point(Point::new(1.0, 2.0)));
        let moved = hotspot
            .with_shape(hotspot.shape().translated(Vec2::new(1.0, 1.0)))
            .unwrap();
        assert_eq!(moved.id(), hotspot.id());
        assert_eq!(moved.shape().anchor(), Point::new(2.0, 3.0));

        let circle = synthesize_circle(Point::new(0.0, 0.0), Point::new(10.0, 0.0)).unwrap();
        assert!(hotspot.with_shape(circle).is_none());
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let hotspot = Hotspot::new("A", synthesize_point(Point::new(1.0, 2.0)));
        let mut value = serde_json::to_value(&hotspot).unwrap();
        let object = value.as_object_mut().unwrap();
        object.remove("points");
        object.remove("feedback");
        let parsed: Hotspot = serde_json::from_value(value).unwrap();
        assert_eq!(parsed.points, DEFAULT_HOTSPOT_POINTS);
        assert!(parsed.feedback.is_empty());
    }
}
