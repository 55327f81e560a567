//! Error types.

use crate::definition::DefinitionId;
use crate::hotspot::HotspotId;
use thiserror::Error;

/// Rejected configuration values.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("minimum correct hotspots must be at least 1, got {0}")]
    MinimumCorrectHotspots(u32),
    #[error("drop zone opacity must be within 0..=100, got {0}")]
    DropZoneOpacity(u8),
    #[error("snap-to-place distance must be a non-negative number, got {0}")]
    SnapDistance(f64),
}

/// Geometry that no drawing gesture can produce.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ShapeError {
    #[error("coordinates must be finite")]
    NonFinite,
    #[error("rectangle must have a positive size, got {width}x{height}")]
    EmptyRectangle { width: f64, height: f64 },
    #[error("circle radius must be positive, got {0}")]
    EmptyCircle(f64),
    #[error("polygon needs at least 3 vertices, got {0}")]
    TooFewVertices(usize),
    #[error("polygon anchor must be its first vertex")]
    AnchorMismatch,
}

/// Editor errors.
#[derive(Debug, Error)]
pub enum EditorError {
    #[error("Hotspot not found: {0}")]
    HotspotNotFound(HotspotId),
    #[error("Definition not found: {0}")]
    DefinitionNotFound(DefinitionId),
    #[error("Invalid shape for hotspot {id}: {source}")]
    InvalidShape {
        id: HotspotId,
        #[source]
        source: ShapeError,
    },
    #[error("Duplicate hotspot id: {0}")]
    DuplicateHotspot(HotspotId),
    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type for editor operations.
pub type EditorResult<T> = Result<T, EditorError>;

/// Reasons a question is not ready to be published. Reported, never raised
/// while editing.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationIssue {
    #[error("no image is bound to the question")]
    MissingImage,
    #[error("{required} correct hotspots are required but only {available} are marked correct")]
    NotEnoughCorrectHotspots { required: u32, available: u32 },
    #[error("definition {number} has no drop zone assigned")]
    UnassignedDefinition { number: u32 },
}
