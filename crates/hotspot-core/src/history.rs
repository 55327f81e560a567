//! Change notifications to the question owner, and an undo/redo owner.

use crate::hotspot::HotspotId;
use crate::question::HotspotQuestion;

/// Maximum number of undo states to keep.
const MAX_UNDO_HISTORY: usize = 50;

/// What an edit touched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Change {
    HotspotAdded(HotspotId),
    /// One drag tick.
    HotspotMoved(HotspotId),
    HotspotUpdated(HotspotId),
    HotspotRemoved(HotspotId),
    DefinitionsChanged,
    SettingsChanged,
    ImageChanged,
}

/// Receives every new question value produced by the editor.
pub trait QuestionObserver {
    fn question_changed(&mut self, question: &HotspotQuestion, change: Change);

    /// A drag-to-move ended. Move ticks before this belong to one gesture.
    fn drag_finished(&mut self, _hotspot: HotspotId) {}
}

impl<F> QuestionObserver for F
where
    F: FnMut(&HotspotQuestion, Change),
{
    fn question_changed(&mut self, question: &HotspotQuestion, change: Change) {
        self(question, change)
    }
}

/// Observer that keeps the latest question plus undo/redo snapshots.
/// A whole drag gesture is one undo step.
#[derive(Debug, Clone)]
pub struct QuestionHistory {
    current: HotspotQuestion,
    undo_stack: Vec<HotspotQuestion>,
    redo_stack: Vec<HotspotQuestion>,
    /// Hotspot whose drag is being coalesced.
    dragging: Option<HotspotId>,
}

impl QuestionHistory {
    pub fn new(initial: HotspotQuestion) -> Self {
        Self {
            current: initial,
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
            dragging: None,
        }
    }

    pub fn current(&self) -> &HotspotQuestion {
        &self.current
    }

    fn push_undo(&mut self) {
        self.undo_stack.push(self.current.clone());
        // Clear redo stack when new changes are made
        self.redo_stack.clear();
        if self.undo_stack.len() > MAX_UNDO_HISTORY {
            self.undo_stack.remove(0);
        }
    }

    /// Step back. Returns the restored question, or `None` if there is
    /// nothing to undo.
    pub fn undo(&mut self) -> Option<&HotspotQuestion> {
        let snapshot = self.undo_stack.pop()?;
        let current = std::mem::replace(&mut self.current, snapshot);
        self.redo_stack.push(current);
        self.dragging = None;
        Some(&self.current)
    }

    /// Step forward again.
    pub fn redo(&mut self) -> Option<&HotspotQuestion> {
        let snapshot = self.redo_stack.pop()?;
        let current = std::mem::replace(&mut self.current, snapshot);
        self.undo_stack.push(current);
        self.dragging = None;
        Some(&self.current)
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }
}

impl QuestionObserver for QuestionHistory {
    fn question_changed(&mut self, question: &HotspotQuestion, change: Change) {
        let coalesce = matches!(change, Change::HotspotMoved(id) if self.dragging == Some(id));
        if !coalesce {
            self.push_undo();
        }
        self.dragging = match change {
            Change::HotspotMoved(id) => Some(id),
            _ => None,
        };
        self.current = question.clone();
    }

    fn drag_finished(&mut self, _hotspot: HotspotId) {
        self.dragging = None;
    }
}
