//! Error types for the label layer.

use meshmark_core::{CodecError, HexError};
use meshmark_mesh::MeshError;
use thiserror::Error;

use crate::label::LabelId;

/// Errors raised by the label model, wire conversion and editor.
#[derive(Error, Debug)]
pub enum LabelError {
    /// Vertex payload failed to encode or decode
    #[error("Vertex codec error: {0}")]
    Codec(#[from] CodecError),

    /// Colour string is not `#RRGGBB` / `#RRGGBBAA`
    #[error("Invalid colour: {0}")]
    Colour(#[from] HexError),

    /// Mesh data could not be indexed
    #[error("Mesh error: {0}")]
    Mesh(#[from] MeshError),

    /// JSON (de)serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Transport collaborator failed
    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),

    /// No label with this id in the current set
    #[error("Label not found: {0}")]
    LabelNotFound(LabelId),

    /// Region operation attempted on a point marker
    #[error("Label {0} is a point marker, not a region")]
    NotARegion(LabelId),

    /// Editing requires an active label
    #[error("No label selected")]
    NoActiveLabel,

    /// Spatial operation attempted before a mesh was loaded
    #[error("No mesh loaded")]
    NoMesh,

    /// Structurally invalid label data
    #[error("Invalid label data: {0}")]
    InvalidData(String),

    /// Quiz question index out of range
    #[error("Question {index} out of range ({count} questions)")]
    QuestionOutOfRange {
        /// Requested question
        index: usize,
        /// Number of questions
        count: usize,
    },
}

/// Errors surfaced by a [`crate::transport::LabelTransport`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransportError {
    /// No label set stored under this uuid
    #[error("Label set not found: {0}")]
    NotFound(String),

    /// Remote side refused the payload
    #[error("Payload rejected: {0}")]
    Rejected(String),

    /// Remote side could not be reached
    #[error("Transport unavailable: {0}")]
    Unavailable(String),
}

/// Result type for label operations.
pub type LabelResult<T> = Result<T, LabelError>;
