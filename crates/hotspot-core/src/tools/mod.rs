//! Drawing tools and the gesture state machine that turns pointer input into
//! finished shapes.

use crate::shapes::{
    synthesize_circle, synthesize_point, synthesize_polygon, synthesize_rectangle, Circle,
    Polygon, Rectangle, Shape,
};
use kurbo::Point;
use serde::{Deserialize, Serialize};

/// Available tools.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum ToolKind {
    /// Click to select, drag to move.
    #[default]
    Select,
    Rectangle,
    Circle,
    Polygon,
    Point,
}

impl ToolKind {
    /// Whether this tool creates shapes.
    pub fn is_drawing(self) -> bool {
        !matches!(self, ToolKind::Select)
    }
}

/// State of the current gesture.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub enum ToolState {
    /// Waiting for input.
    #[default]
    Idle,
    /// Rectangle or circle drag in progress.
    DraggingShape {
        /// Where the pointer went down.
        start: Point,
        /// Latest pointer position, for preview only.
        current: Point,
    },
    /// Polygon vertices collected so far.
    CapturingPolygon { vertices: Vec<Point> },
}

/// Coarse phase of the drawing state machine, for hosts that render status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawingPhase {
    Idle,
    DraggingShape,
    CapturingPolygon,
    /// Point tool armed; the next click places a point.
    PointPending,
}

/// Manages the current tool and its gesture state.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ToolManager {
    current_tool: ToolKind,
    state: ToolState,
}

impl ToolManager {
    /// Create a new tool manager.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current_tool(&self) -> ToolKind {
        self.current_tool
    }

    pub fn state(&self) -> &ToolState {
        &self.state
    }

    /// Set the current tool. Any gesture in progress is dropped.
    pub fn set_tool(&mut self, tool: ToolKind) {
        if !matches!(self.state, ToolState::Idle) {
            log::trace!("Tool switch to {:?} discards {:?}", tool, self.state);
        }
        self.current_tool = tool;
        self.state = ToolState::Idle;
    }

    pub fn phase(&self) -> DrawingPhase {
        match (&self.state, self.current_tool) {
            (ToolState::DraggingShape { .. }, _) => DrawingPhase::DraggingShape,
            (ToolState::CapturingPolygon { .. }, _) => DrawingPhase::CapturingPolygon,
            (ToolState::Idle, ToolKind::Point) => DrawingPhase::PointPending,
            (ToolState::Idle, _) => DrawingPhase::Idle,
        }
    }

    /// Check if a gesture is in progress.
    pub fn is_active(&self) -> bool {
        !matches!(self.state, ToolState::Idle)
    }

    /// Pointer pressed. Returns a shape when the press completes one (point
    /// placement, polygon double click).
    ///
    /// A double click arrives as a single-click press followed by a press
    /// with `click_count == 2` at the same position; both are recorded, so
    /// the finished polygon repeats its last vertex.
    pub fn pointer_down(&mut self, point: Point, click_count: u8) -> Option<Shape> {
        match self.current_tool {
            ToolKind::Select => None,
            ToolKind::Point => {
                log::debug!("Placing point at ({:.1}, {:.1})", point.x, point.y);
                Some(synthesize_point(point))
            }
            ToolKind::Rectangle | ToolKind::Circle => {
                self.state = ToolState::DraggingShape {
                    start: point,
                    current: point,
                };
                None
            }
            ToolKind::Polygon => self.capture_vertex(point, click_count >= 2),
        }
    }

    fn capture_vertex(&mut self, point: Point, double_click: bool) -> Option<Shape> {
        let mut vertices = match std::mem::take(&mut self.state) {
            ToolState::CapturingPolygon { vertices } => vertices,
            _ => Vec::new(),
        };
        let prior = vertices.len();
        vertices.push(point);

        if double_click && prior >= 2 {
            log::debug!("Finishing polygon with {} vertices", vertices.len());
            return synthesize_polygon(vertices);
        }

        self.state = ToolState::CapturingPolygon { vertices };
        None
    }

    /// Pointer moved. Only updates the preview of a shape drag.
    pub fn pointer_move(&mut self, point: Point) {
        if let ToolState::DraggingShape { current, .. } = &mut self.state {
            *current = point;
        }
    }

    /// Pointer released. Returns the finished rectangle or circle; undersized
    /// drags yield `None` and leave nothing behind.
    pub fn pointer_up(&mut self, point: Point) -> Option<Shape> {
        let ToolState::DraggingShape { start, .. } = self.state else {
            return None;
        };
        self.state = ToolState::Idle;

        let shape = match self.current_tool {
            ToolKind::Rectangle => synthesize_rectangle(start, point),
            ToolKind::Circle => synthesize_circle(start, point),
            _ => None,
        };
        if shape.is_none() {
            log::trace!(
                "Discarded undersized {:?} gesture from ({:.1}, {:.1}) to ({:.1}, {:.1})",
                self.current_tool,
                start.x,
                start.y,
                point.x,
                point.y
            );
        }
        shape
    }

    /// Pointer left the image. A shape drag is abandoned; polygon capture
    /// survives so the user can come back and keep clicking.
    pub fn pointer_leave(&mut self) {
        if matches!(self.state, ToolState::DraggingShape { .. }) {
            log::trace!("Pointer left during shape drag, cancelling");
            self.state = ToolState::Idle;
        }
    }

    /// Close the polygon being captured. Fewer than three vertices are
    /// rejected; either way capture ends.
    pub fn finish_polygon(&mut self) -> Option<Shape> {
        match std::mem::take(&mut self.state) {
            ToolState::CapturingPolygon { vertices } => {
                let count = vertices.len();
                let shape = synthesize_polygon(vertices);
                if shape.is_none() {
                    log::trace!("Rejected polygon with {} vertices", count);
                }
                shape
            }
            other => {
                self.state = other;
                None
            }
        }
    }

    /// Cancel the current gesture.
    pub fn cancel(&mut self) {
        self.state = ToolState::Idle;
    }

    /// Vertices of the polygon being captured.
    pub fn polygon_vertices(&self) -> &[Point] {
        match &self.state {
            ToolState::CapturingPolygon { vertices } => vertices,
            _ => &[],
        }
    }

    /// Shape to draw while a gesture is in progress. Size limits are not
    /// applied to the preview.
    pub fn preview_shape(&self) -> Option<Shape> {
        match &self.state {
            ToolState::Idle => None,
            ToolState::DraggingShape { start, current } => match self.current_tool {
                ToolKind::Rectangle => Some(Shape::Rectangle(Rectangle::from_corners(*start, *current))),
                ToolKind::Circle => Some(Shape::Circle(Circle::through(*start, *current))),
                _ => None,
            },
            ToolState::CapturingPolygon { vertices } => {
                Polygon::from_vertices(vertices.clone()).map(Shape::Polygon)
            }
        }
    }
}
