//! # graph-rewind
//!
//! graph-rewind is a graph container that adds transactional,
//! revision-tracked history to an otherwise ordinary mutable graph. Every
//! vertex and edge carries a ledger of its past states; the container can be
//! committed (snapshot), reverted to the last snapshot, undone one snapshot
//! backward, or have its history permanently compacted. It is built for
//! speculative and backtracking search: mutate a graph, test a condition,
//! and roll back cheaply on failure without reconstructing anything.
//!
//! ## Core pieces
//! - [`history::Revision`] — logical timestamp; sign marks tombstones.
//! - [`history::EntityHistory`] — per-entity append-mostly ledger; the top
//!   entry is authoritative for "value as of the current revision".
//! - [`history::BundleHistory`] — change-compacted track for one graph-wide
//!   attribute.
//! - [`graph::BaseGraph`] — the minimal contract required of the underlying
//!   mutable storage; [`graph::InMemoryGraph`] is the bundled reference
//!   implementation.
//! - [`versioned::VersionedGraph`] — the orchestrator tying topology,
//!   property history, live counts, and degree counters together.
//!
//! ## Example
//! ```rust
//! use graph_rewind::prelude::*;
//!
//! let mut g = VersionedGraph::<InMemoryGraph<Bidirectional, &str, u32>>::new();
//! let a = g.add_vertex("a");
//! let b = g.add_vertex("b");
//! let e = g.add_edge(a, b, 10).unwrap();
//! g.commit();
//!
//! g.remove_edge(e);
//! g.commit();
//! assert_eq!(g.num_edges(), 0);
//!
//! // The edge is tombstoned, not gone: one undo resurrects it.
//! assert!(g.undo_commit());
//! assert_eq!(g.num_edges(), 1);
//! assert_eq!(*g.edge_value(e).unwrap(), 10);
//! ```
//!
//! ## Concurrency
//! Single-threaded, synchronous, no suspension points. The structure holds
//! no locks; concurrent mutation must be prevented by the caller. This is a
//! deliberate simplicity choice matching the intended use inside
//! single-threaded backtracking search.

pub mod debug_invariants;
pub mod graph;
pub mod history;
pub mod rewind_error;
pub mod versioned;

pub use debug_invariants::DebugInvariants;
pub use rewind_error::RewindError;

/// A convenient prelude to import the most-used traits & types:
pub mod prelude {
    pub use crate::debug_invariants::DebugInvariants;
    pub use crate::graph::{
        BaseGraph, Bidirectional, Directed, Directedness, EdgeId, EdgeKey, InMemoryGraph,
        Undirected, VertexId,
    };
    pub use crate::history::{BundleHistory, EntityHistory, HistoryEntry, Revision};
    pub use crate::rewind_error::RewindError;
    pub use crate::versioned::{EdgeHandle, VersionedGraph};
}
