//! The hotspot editor: routes pointer events through the drawing session and
//! hands every new question value to the owner.

use crate::config::SettingsOverrides;
use crate::definition::{Definition, DefinitionId};
use crate::error::EditorResult;
use crate::history::{Change, QuestionHistory, QuestionObserver};
use crate::hotspot::{Hotspot, HotspotId};
use crate::input::{IdentityTransform, ImageBounds, PointerEvent, PointerTransform};
use crate::question::HotspotQuestion;
use crate::selection::{drag_hotspots, hotspot_at, DragState, SELECT_TOLERANCE};
use crate::session::DrawingSession;
use crate::shapes::Shape;
use crate::tools::{DrawingPhase, ToolKind};
use kurbo::Point;

/// Hotspot editor bound to one question.
///
/// Pointer positions go through the injected [`PointerTransform`] once, on
/// entry; everything below works in image space.
pub struct HotspotEditor<O: QuestionObserver> {
    question: HotspotQuestion,
    session: DrawingSession,
    transform: Box<dyn PointerTransform>,
    observer: O,
}

impl<O: QuestionObserver> HotspotEditor<O> {
    /// Create an editor for `question` that reports changes to `observer`.
    pub fn new(question: HotspotQuestion, observer: O) -> Self {
        Self {
            question,
            session: DrawingSession::new(),
            transform: Box::new(IdentityTransform),
            observer,
        }
    }

    /// Use `transform` to map host pointer positions into image space.
    pub fn with_transform(mut self, transform: impl PointerTransform + 'static) -> Self {
        self.transform = Box::new(transform);
        self
    }

    pub fn question(&self) -> &HotspotQuestion {
        &self.question
    }

    pub fn session(&self) -> &DrawingSession {
        &self.session
    }

    pub fn observer(&self) -> &O {
        &self.observer
    }

    pub fn observer_mut(&mut self) -> &mut O {
        &mut self.observer
    }

    pub fn selected(&self) -> Option<&Hotspot> {
        self.session
            .selection
            .selected()
            .and_then(|id| self.question.hotspot(id))
    }

    pub fn phase(&self) -> DrawingPhase {
        self.session.tools.phase()
    }

    /// Shape to draw for the gesture in progress.
    pub fn preview_shape(&self) -> Option<Shape> {
        self.session.tools.preview_shape()
    }

    /// Replace the question without notifying the observer (e.g. after an
    /// undo). Gestures are dropped and a selection of a vanished hotspot is
    /// cleared.
    pub fn load_question(&mut self, question: HotspotQuestion) {
        let drag = self.session.set_tool(self.session.tools.current_tool());
        self.finish_drag(drag);
        if let Some(id) = self.session.selection.selected() {
            if question.hotspot(id).is_none() {
                self.session.selection.forget(id);
            }
        }
        self.question = question;
    }

    fn finish_drag(&mut self, drag: Option<DragState>) {
        if let Some(drag) = drag {
            self.observer.drag_finished(drag.hotspot_id);
        }
    }

    fn commit(&mut self, question: HotspotQuestion, change: Change) {
        self.question = question;
        self.observer.question_changed(&self.question, change);
    }

    /// Bind the displayed image size, or `None` while no image is loaded.
    /// The drawing session restarts whenever the image changes.
    pub fn bind_image(&mut self, image: Option<ImageBounds>) {
        if self.question.image() == image {
            return;
        }
        log::debug!("Image bound: {:?}", image);
        let drag = self.session.reset_for_image();
        self.finish_drag(drag);
        let next = self.question.with_image(image);
        self.commit(next, Change::ImageChanged);
    }

    /// Set the current tool. A move drag in progress ends where it is.
    pub fn set_tool(&mut self, tool: ToolKind) {
        let drag = self.session.set_tool(tool);
        self.finish_drag(drag);
    }

    /// Cancel any gesture in progress.
    pub fn cancel(&mut self) {
        self.session.tools.cancel();
        let drag = self.session.selection.end_drag();
        self.finish_drag(drag);
    }

    /// Handle one pointer event. Events are dropped while no image is bound
    /// or when the position cannot be mapped into image space.
    pub fn handle_event(&mut self, event: PointerEvent) {
        if self.question.image().is_none() {
            log::trace!("No image bound, ignoring {:?}", event);
            return;
        }

        let event = match event.position() {
            Some(position) => match self.transform.to_image_space(position) {
                Some(mapped) => event.with_position(mapped),
                None => {
                    log::trace!("Pointer position {:?} outside image space", position);
                    return;
                }
            },
            None => event,
        };

        match event {
            PointerEvent::Down {
                position,
                click_count,
            } => self.pointer_down(position, click_count),
            PointerEvent::Move { position } => self.pointer_move(position),
            PointerEvent::Up { position } => self.pointer_up(position),
            PointerEvent::Leave => self.pointer_leave(),
        }
    }

    fn pointer_down(&mut self, position: Point, click_count: u8) {
        if !self.session.tools.current_tool().is_drawing() {
            if self.session.selection.is_dragging() {
                return;
            }
            match hotspot_at(self.question.hotspots(), position, SELECT_TOLERANCE) {
                Some(id) => {
                    self.begin_drag_at(id, position);
                }
                None => {
                    self.session.selection.select(None);
                }
            }
            return;
        }

        if let Some(shape) = self.session.tools.pointer_down(position, click_count) {
            self.add_shape(shape);
        }
    }

    fn pointer_move(&mut self, position: Point) {
        let Some(drag) = self.session.selection.drag().cloned() else {
            self.session.tools.pointer_move(position);
            return;
        };
        match drag_hotspots(self.question.hotspots(), &drag, position, self.question.image()) {
            Some(hotspots) => {
                let next = self.question.with_hotspots(hotspots);
                self.commit(next, Change::HotspotMoved(drag.hotspot_id));
            }
            None => {
                log::debug!("Dragged hotspot {} vanished", drag.hotspot_id);
                self.session.selection.forget(drag.hotspot_id);
            }
        }
    }

    fn pointer_up(&mut self, position: Point) {
        if let Some(drag) = self.session.selection.end_drag() {
            self.finish_drag(Some(drag));
            return;
        }
        if let Some(shape) = self.session.tools.pointer_up(position) {
            self.add_shape(shape);
        }
    }

    fn pointer_leave(&mut self) {
        let drag = self.session.selection.end_drag();
        self.finish_drag(drag);
        self.session.tools.pointer_leave();
    }

    /// Close the polygon being captured. Returns the new hotspot's id.
    pub fn finish_polygon(&mut self) -> Option<HotspotId> {
        let shape = self.session.tools.finish_polygon()?;
        Some(self.add_shape(shape))
    }

    fn add_shape(&mut self, shape: Shape) -> HotspotId {
        let (next, id) = self.question.add_hotspot(shape);
        log::debug!(
            "Added {} hotspot {} ({} total)",
            next.hotspot(id).map_or("unknown", |h| h.kind().label()),
            id,
            next.hotspots().len()
        );
        self.session.selection.select(Some(id));
        self.commit(next, Change::HotspotAdded(id));
        id
    }

    /// Click-select a hotspot, or clear with `None`. Ignored while a drag is
    /// in progress.
    pub fn select(&mut self, id: Option<HotspotId>) -> bool {
        let id = id.filter(|id| self.question.hotspot(*id).is_some());
        self.session.selection.select(id)
    }

    /// Start moving hotspot `id` with the pointer at `position` (host
    /// coordinates). For hosts that deliver presses on hotspot elements
    /// directly. Returns whether a drag started; a drag already in progress
    /// is left alone.
    pub fn begin_drag(&mut self, id: HotspotId, position: Point) -> bool {
        if self.question.image().is_none() || self.session.selection.is_dragging() {
            return false;
        }
        let Some(position) = self.transform.to_image_space(position) else {
            return false;
        };
        self.begin_drag_at(id, position)
    }

    fn begin_drag_at(&mut self, id: HotspotId, position: Point) -> bool {
        match self.question.hotspot(id) {
            Some(hotspot) => {
                self.session.selection.begin_drag(hotspot, position);
                true
            }
            None => false,
        }
    }

    /// Delete a hotspot. Definitions that targeted it keep the dangling id.
    pub fn delete_hotspot(&mut self, id: HotspotId) -> EditorResult<()> {
        let next = self.question.remove_hotspot(id)?;
        self.session.selection.forget(id);
        self.commit(next, Change::HotspotRemoved(id));
        Ok(())
    }

    /// Delete the selected hotspot, if any. Returns its id.
    pub fn delete_selected(&mut self) -> EditorResult<Option<HotspotId>> {
        match self.session.selection.selected() {
            Some(id) => self.delete_hotspot(id).map(|_| Some(id)),
            None => Ok(None),
        }
    }

    /// Edit a hotspot's name, correctness, feedback or points.
    pub fn update_hotspot(&mut self, id: HotspotId, update: impl FnOnce(&mut Hotspot)) -> EditorResult<()> {
        let next = self.question.update_hotspot(id, update)?;
        self.commit(next, Change::HotspotUpdated(id));
        Ok(())
    }

    pub fn toggle_drop_zone(&mut self, id: HotspotId) -> EditorResult<()> {
        let next = self.question.toggle_drop_zone(id)?;
        self.commit(next, Change::HotspotUpdated(id));
        Ok(())
    }

    pub fn add_definition(&mut self) -> DefinitionId {
        let (next, id) = self.question.add_definition();
        self.commit(next, Change::DefinitionsChanged);
        id
    }

    pub fn delete_definition(&mut self, id: DefinitionId) -> EditorResult<()> {
        let next = self.question.delete_definition(id)?;
        self.commit(next, Change::DefinitionsChanged);
        Ok(())
    }

    pub fn update_definition(&mut self, id: DefinitionId, update: impl FnOnce(&mut Definition)) -> EditorResult<()> {
        let next = self.question.update_definition(id, update)?;
        self.commit(next, Change::DefinitionsChanged);
        Ok(())
    }

    pub fn assign_definition_target(&mut self, id: DefinitionId, target: Option<HotspotId>) -> EditorResult<()> {
        let next = self.question.assign_definition_target(id, target)?;
        self.commit(next, Change::DefinitionsChanged);
        Ok(())
    }

    pub fn update_settings(&mut self, overrides: &SettingsOverrides) -> EditorResult<()> {
        let next = self.question.with_settings(overrides)?;
        self.commit(next, Change::SettingsChanged);
        Ok(())
    }
}

impl HotspotEditor<QuestionHistory> {
    /// Editor whose observer is an undo history seeded with `question`.
    pub fn with_history(question: HotspotQuestion) -> Self {
        let history = QuestionHistory::new(question.clone());
        Self::new(question, history)
    }

    /// Undo the last change. Returns false if there was nothing to undo.
    pub fn undo(&mut self) -> bool {
        match self.observer.undo().cloned() {
            Some(question) => {
                self.load_question(question);
                true
            }
            None => false,
        }
    }

    /// Redo the last undone change.
    pub fn redo(&mut self) -> bool {
        match self.observer.redo().cloned() {
            Some(question) => {
                self.load_question(question);
                true
            }
            None => false,
        }
    }
}
