//! Selection and drag-to-move.

use crate::hotspot::{Hotspot, HotspotId};
use crate::input::ImageBounds;
use kurbo::{Point, Vec2};
use serde::{Deserialize, Serialize};

/// Hit tolerance for picking hotspots, in image pixels.
pub const SELECT_TOLERANCE: f64 = 4.0;

/// An active drag-to-move.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DragState {
    /// The hotspot being moved.
    pub hotspot_id: HotspotId,
    /// Pointer position minus the hotspot's anchor at drag start.
    pub offset: Vec2,
}

impl DragState {
    /// Start dragging `hotspot` with the pointer at `pointer`.
    pub fn begin(hotspot: &Hotspot, pointer: Point) -> Self {
        Self {
            hotspot_id: hotspot.id(),
            offset: pointer - hotspot.shape().anchor(),
        }
    }

    /// Where the anchor belongs for the given pointer position.
    pub fn target_anchor(&self, pointer: Point) -> Point {
        pointer - self.offset
    }
}

/// Move the dragged hotspot so its anchor follows `pointer`, kept inside
/// `image` when one is given. Returns the new collection (order preserved),
/// or `None` if the hotspot no longer exists.
pub fn drag_hotspots(
    hotspots: &[Hotspot],
    drag: &DragState,
    pointer: Point,
    image: Option<ImageBounds>,
) -> Option<Vec<Hotspot>> {
    let index = hotspots.iter().position(|h| h.id() == drag.hotspot_id)?;
    let current = &hotspots[index];
    let delta = drag.target_anchor(pointer) - current.shape().anchor();

    let mut moved = current.shape().translated(delta);
    if let Some(image) = image {
        let correction = image.containment_offset(moved.bounds());
        if correction != Vec2::ZERO {
            moved = moved.translated(correction);
        }
    }

    let mut next = hotspots.to_vec();
    next[index].shape = moved;
    Some(next)
}

/// Topmost hotspot under `point`. Later hotspots are drawn on top.
pub fn hotspot_at(hotspots: &[Hotspot], point: Point, tolerance: f64) -> Option<HotspotId> {
    hotspots
        .iter()
        .rev()
        .find(|h| h.shape().hit_test(point, tolerance))
        .map(Hotspot::id)
}

/// The active hotspot and any drag in progress.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Selection {
    selected: Option<HotspotId>,
    drag: Option<DragState>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selected(&self) -> Option<HotspotId> {
        self.selected
    }

    pub fn drag(&self) -> Option<&DragState> {
        self.drag.as_ref()
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    /// Select a hotspot (or clear with `None`). Ignored while dragging.
    /// Returns whether the selection was applied.
    pub fn select(&mut self, id: Option<HotspotId>) -> bool {
        if self.is_dragging() {
            return false;
        }
        self.selected = id;
        true
    }

    /// Select `hotspot` and start moving it.
    pub fn begin_drag(&mut self, hotspot: &Hotspot, pointer: Point) {
        log::debug!("Begin drag of hotspot {}", hotspot.id());
        self.selected = Some(hotspot.id());
        self.drag = Some(DragState::begin(hotspot, pointer));
    }

    /// Stop moving; the selection stays.
    pub fn end_drag(&mut self) -> Option<DragState> {
        let drag = self.drag.take();
        if let Some(drag) = &drag {
            log::debug!("End drag of hotspot {}", drag.hotspot_id);
        }
        drag
    }

    /// Forget `id` if it was selected or dragged.
    pub fn forget(&mut self, id: HotspotId) {
        if self.selected == Some(id) {
            self.selected = None;
        }
        if self.drag.as_ref().is_some_and(|d| d.hotspot_id == id) {
            self.drag = None;
        }
    }

    pub fn clear(&mut self) {
        self.selected = None;
        self.drag = None;
    }
}
