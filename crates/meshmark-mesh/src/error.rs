//! Mesh error types.

use thiserror::Error;

/// Errors raised while ingesting mesh data.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MeshError {
    /// Flat position buffer does not hold whole `(x, y, z)` triples
    #[error("Position buffer length {len} is not a multiple of 3")]
    InvalidPositionBuffer {
        /// Number of floats supplied
        len: usize,
    },

    /// Mesh has more vertices than a `u32` vertex id can address
    #[error("Mesh has {count} vertices, more than a u32 vertex id can address")]
    TooManyVertices {
        /// Number of vertices supplied
        count: usize,
    },
}

/// Result type for mesh operations.
pub type MeshResult<T> = Result<T, MeshError>;
