//! Base-graph contract, handles, and the in-memory reference storage.

pub mod base;
pub mod degree;
pub mod direction;
pub mod handle;
pub mod in_memory;

pub use base::BaseGraph;
pub use degree::{DegreeCounters, VertexData};
pub use direction::{Bidirectional, Directed, Directedness, Direction, Undirected};
pub use handle::{EdgeId, EdgeKey, VertexId};
pub use in_memory::InMemoryGraph;
