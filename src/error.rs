//! Error types for knitmesh.
//!
//! This module defines all error types used throughout the library.

use thiserror::Error;

/// Result type alias using [`MeshError`].
pub type Result<T> = std::result::Result<T, MeshError>;

/// Errors that can occur during mesh and topology operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MeshError {
    /// The mesh has no faces.
    #[error("mesh has no faces")]
    EmptyMesh,

    /// A face references an invalid vertex index.
    #[error("face {face} references invalid vertex index {vertex}")]
    InvalidVertexIndex {
        /// The face index.
        face: usize,
        /// The invalid vertex index.
        vertex: usize,
    },

    /// A face has duplicate vertex indices (degenerate triangle).
    #[error("face {face} is degenerate (has duplicate vertices)")]
    DegenerateFace {
        /// The face index.
        face: usize,
    },

    /// A disjoint-set operation named a key outside its universe.
    #[error("key {key} is not part of the disjoint-set universe")]
    UnknownKey {
        /// Debug rendering of the offending key.
        key: String,
    },

    /// Invalid parameter value.
    #[error("invalid parameter: {name} = {value} ({reason})")]
    InvalidParameter {
        /// Parameter name.
        name: &'static str,
        /// The invalid value (as string).
        value: String,
        /// Reason the value is invalid.
        reason: &'static str,
    },

    /// Seam stitching failed.
    #[error(transparent)]
    Seam(#[from] SeamError),
}

impl MeshError {
    /// Create an invalid parameter error.
    pub fn invalid_param<T: std::fmt::Display>(
        name: &'static str,
        value: T,
        reason: &'static str,
    ) -> Self {
        MeshError::InvalidParameter {
            name,
            value: value.to_string(),
            reason,
        }
    }
}

/// Recoverable failures of seam matching, meant to be shown to the user.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeamError {
    /// The two shortest paths have a different number of vertices.
    #[error("seams must be the same length ({len1} vs {len2} vertices)")]
    MismatchedLength {
        /// Vertex count of the first path.
        len1: usize,
        /// Vertex count of the second path.
        len2: usize,
    },

    /// One endpoint cannot be reached from the other.
    #[error("no path between selected points {src} and {dst}")]
    NoPath {
        /// Path source vertex.
        src: u32,
        /// Path destination vertex.
        dst: u32,
    },

    /// Fewer than four handles were picked before asking for a seam.
    #[error("need to select 4 handles, got {selected}")]
    IncompleteSelection {
        /// Number of handles currently selected.
        selected: usize,
    },
}
