//! RewindError: unified error type for graph-rewind public APIs
//!
//! This error type is used throughout the graph-rewind library to provide
//! robust, non-panicking error handling for all fallible public APIs.
//! Precondition violations (mutating a tombstoned entity, underflowing a
//! degree counter) are caller bugs and panic instead; see the crate docs.

use thiserror::Error;

/// Unified error type for graph-rewind operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RewindError {
    /// Attempted to construct a VertexId with a zero value (invalid).
    #[error("VertexId must be non-zero (0 is reserved as invalid/sentinel)")]
    InvalidVertexId,
    /// Attempted to construct an EdgeId with a zero value (invalid).
    #[error("EdgeId must be non-zero (0 is reserved as invalid/sentinel)")]
    InvalidEdgeId,
    /// A vertex handle was not found in the versioned container.
    #[error("unknown vertex `{0}`")]
    UnknownVertex(String),
    /// An edge key was not found in the versioned container.
    #[error("unknown edge `{0}`")]
    UnknownEdge(String),
    /// `top`/`pop`/`latest` called on an empty history ledger.
    #[error("empty history: {0}")]
    EmptyHistory(&'static str),
    /// A query requires a directedness category the graph does not have
    /// (e.g. in-degree on a non-bidirectional graph).
    #[error("unsupported for this directedness: {0}")]
    UnsupportedDirectedness(&'static str),
    /// `duplicate()` re-derived a live count that disagrees with the source.
    #[error("copy cross-check failed for {kind}: expected {expected}, found {found}")]
    CopyCountMismatch {
        kind: &'static str,
        expected: usize,
        found: usize,
    },
    /// The base graph rejected an edge while rebuilding a copy.
    #[error("base graph rejected an edge during duplicate()")]
    CopyEdgeRejected,
    /// A full-scan validation found bookkeeping out of sync.
    #[error("invariant violated: {0}")]
    InvariantViolation(String),
}
