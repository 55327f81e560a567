//! Snap-to-place for definitions dropped onto drop zones.

use crate::config::DEFAULT_SNAP_TO_PLACE_DISTANCE;
use crate::hotspot::HotspotId;
use crate::question::HotspotQuestion;
use kurbo::Point;

/// Result of a snap operation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SnapResult {
    /// The snapped point.
    pub point: Point,
    /// Drop zone the point snapped into, if any.
    pub hotspot_id: Option<HotspotId>,
}

impl SnapResult {
    /// Create a result with no snapping.
    pub fn none(point: Point) -> Self {
        Self {
            point,
            hotspot_id: None,
        }
    }

    /// Check if any snapping occurred.
    pub fn is_snapped(&self) -> bool {
        self.hotspot_id.is_some()
    }
}

/// Snap `point` to the center of the nearest drop zone that lies within the
/// question's snap-to-place distance. Points near no drop zone are returned
/// unchanged.
pub fn snap_to_drop_zone(question: &HotspotQuestion, point: Point) -> SnapResult {
    let distance = question
        .settings()
        .labeling
        .as_ref()
        .map_or(DEFAULT_SNAP_TO_PLACE_DISTANCE, |l| l.snap_to_place_distance);

    question
        .drop_zone_candidates()
        .filter(|h| h.shape().hit_test(point, distance))
        .map(|h| (h.id(), h.shape().bounds().center()))
        .min_by(|(_, a), (_, b)| a.distance(point).total_cmp(&b.distance(point)))
        .map_or(SnapResult::none(point), |(id, center)| SnapResult {
            point: center,
            hotspot_id: Some(id),
        })
}
