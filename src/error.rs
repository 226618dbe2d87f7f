//! Error types for graph construction.
//!
//! The decimation engine itself has no recoverable failures: a rejected
//! merge is ordinary control flow and an inconsistent graph is a caller
//! bug that trips an assertion. Errors here come from building substrates.

use thiserror::Error;

/// Errors that can occur while building a planar graph substrate.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GraphError {
    /// A vertex key does not refer to a live vertex.
    #[error("unknown vertex")]
    UnknownVertex,

    /// An edge was given the same vertex for both endpoints.
    #[error("edge endpoints are the same vertex")]
    SelfLoop,

    /// The edge already exists.
    #[error("edge already present between these vertices")]
    DuplicateEdge,

    /// The named edge does not exist.
    #[error("no edge between these vertices")]
    MissingEdge,

    /// A polyline had fewer than two points.
    #[error("polyline needs at least two points")]
    DegeneratePolyline,

    /// Two consecutive polyline points coincide, so no supporting line
    /// exists between them.
    #[error("consecutive polyline points coincide")]
    CoincidentPoints,
}
