//! Revision model and per-entity history ledgers.

pub mod bundle;
pub mod entry;
pub mod revision;

pub use bundle::BundleHistory;
pub use entry::{EntityHistory, HistoryEntry};
pub use revision::Revision;
