//! Ephemeral drawing session: everything about the editor's interaction
//! state that is not part of the question itself.

use crate::selection::{DragState, Selection};
use crate::tools::{ToolKind, ToolManager};
use serde::{Deserialize, Serialize};

/// Tool, gesture and selection state. Plain serializable value; the editor
/// threads it through every event handler.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DrawingSession {
    pub tools: ToolManager,
    pub selection: Selection,
}

impl DrawingSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Switch tools. Gestures in progress are dropped and a move drag ends;
    /// the selection stays. Returns the drag that was ended, if any.
    pub fn set_tool(&mut self, tool: ToolKind) -> Option<DragState> {
        self.tools.set_tool(tool);
        self.selection.end_drag()
    }

    /// Reset for a newly bound image. Keeps the chosen tool. Returns the
    /// drag that was ended, if any.
    pub fn reset_for_image(&mut self) -> Option<DragState> {
        let drag = self.set_tool(self.tools.current_tool());
        self.selection.clear();
        drag
    }

    /// Whether any gesture or drag is in flight.
    pub fn is_busy(&self) -> bool {
        self.tools.is_active() || self.selection.is_dragging()
    }
}
