//! Hotspot Core Library
//!
//! Geometry, drawing tools and question state for the hotspot quiz editor.

pub mod config;
pub mod definition;
pub mod editor;
pub mod error;
pub mod history;
pub mod hotspot;
pub mod input;
pub mod question;
pub mod selection;
pub mod session;
pub mod shapes;
pub mod snap;
pub mod tools;

pub use config::{resolve_settings, HotspotSettings, LabelingSettings, SettingKey, SettingValue, SettingsOverrides};
pub use definition::{Definition, DefinitionFeedback, DefinitionId, DefinitionTarget};
pub use editor::HotspotEditor;
pub use error::{ConfigError, EditorError, EditorResult, ShapeError, ValidationIssue};
pub use history::{Change, QuestionHistory, QuestionObserver};
pub use hotspot::{Hotspot, HotspotId};
pub use input::{IdentityTransform, ImageBounds, ImageFrame, PointerEvent, PointerTransform};
pub use question::HotspotQuestion;
pub use selection::{DragState, Selection};
pub use session::DrawingSession;
pub use shapes::{Shape, ShapeKind, ShapeTrait, MIN_SHAPE_SIZE, POINT_RADIUS};
pub use snap::{snap_to_drop_zone, SnapResult};
pub use tools::{DrawingPhase, ToolKind, ToolManager, ToolState};
