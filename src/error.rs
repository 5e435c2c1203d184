//! Error types for canvas operations.
//!
//! Every fallible operation of the session, the factory and the
//! serialization bridge reports through [`CanvasError`].

use crate::types::ShapeId;
use thiserror::Error;

/// Errors that can occur while manipulating the canvas
#[derive(Error, Debug)]
pub enum CanvasError {
    /// The factory was asked for a variant it cannot build
    #[error("Unsupported shape type: {0}")]
    UnsupportedShapeType(String),

    /// An imported document could not be parsed or validated
    #[error("Malformed document: {0}")]
    MalformedDocument(String),

    /// The render surface failed to release a shape's resources
    #[error("Failed to destroy shape {id}: {reason}")]
    ShapeDestroyFailure { id: ShapeId, reason: String },

    /// The referenced shape is not a member of the scene
    #[error("Unknown shape: {0}")]
    UnknownShape(ShapeId),

    /// A style attribute received a value of the wrong kind
    #[error("Invalid value for style attribute `{attribute}`")]
    InvalidStyleValue { attribute: &'static str },

    /// A text-only operation targeted a non-text shape
    #[error("Shape {0} is not a text shape")]
    NotText(ShapeId),

    /// Font sizes must be finite and positive
    #[error("Invalid font size: {0}")]
    InvalidFontSize(f32),

    /// Image bytes could not be decoded
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    /// IO error from std::io
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Session configuration could not be loaded
    #[error("Invalid configuration: {0}")]
    Config(String),
}

/// Result type alias for canvas operations
pub type CanvasResult<T> = Result<T, CanvasError>;

impl From<serde_json::Error> for CanvasError {
    fn from(e: serde_json::Error) -> Self {
        CanvasError::MalformedDocument(e.to_string())
    }
}
