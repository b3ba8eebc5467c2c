//! BMSSP - O(m log^(2/3) n) Single-Source Shortest Path Algorithm
//!
//! This library implements the bounded multi-source shortest-path procedure
//! described in "Breaking the Sorting Barrier for Directed Single-Source
//! Shortest Paths" (Duan et al., 2025): a recursive driver (`algorithm::bmssp`)
//! that partitions work by distance thresholds, dispatching through a
//! Block-Based Linked List priority structure (`data_structures::BlockLinkedList`)
//! instead of a classical binary heap.
//!
//! Only the core engine is in scope: graph construction, CLI front-ends, and
//! persistence are the caller's concern. The crate consumes an opaque
//! [`graph::Graph`] adapter and returns populated `dist`/`pred` tables.

pub mod algorithm;
pub mod data_structures;
pub mod graph;
pub mod key;

pub use algorithm::{dijkstra::Dijkstra, sssp, Bmssp, BmsspParams, ShortestPathAlgorithm, ShortestPathResult};
pub use graph::directed::DirectedGraph;
pub use key::Key;

/// Error types for the library.
///
/// `NotFound`-style anomalies (a BBLL delete whose bound no longer indexes a
/// block) are recoverable and are logged rather than surfaced as an `Error`
/// variant — they cannot corrupt the structure, only indicate redundant work.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// Negative edge weight, out-of-range source, or an empty graph handed to
    /// `run`. Surfaced eagerly before a run begins.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// A BBLL or shortest-path-forest invariant failed a debug check. Fatal:
    /// indicates a bug in the core, not a property of the input graph.
    #[error("invariant violation: {0}")]
    InvariantViolation(String),
}

/// Result type for the library.
pub type Result<T> = std::result::Result<T, Error>;
