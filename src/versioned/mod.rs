//! The versioning engine: orchestrator, filtered view, and transactions.

pub mod duplicate;
pub mod graph;
pub mod invariants;
pub mod transactions;
pub mod view;

pub use graph::{EdgeHandle, VersionedGraph};
