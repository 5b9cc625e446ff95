//! Incremental degree bookkeeping for the visible subgraph.
//!
//! Degrees are maintained at every mutation so they always equal the degree
//! computed over the non-tombstoned edge set, without re-scanning. For
//! undirected graphs both endpoints share the "out" counter; the in-counter
//! is maintained only for bidirectional graphs.

use crate::history::EntityHistory;

/// Per-vertex visible-degree counters.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct DegreeCounters {
    out: usize,
    in_: usize,
}

impl DegreeCounters {
    #[inline]
    pub fn out_degree(&self) -> usize {
        self.out
    }

    #[inline]
    pub fn in_degree(&self) -> usize {
        self.in_
    }

    #[inline]
    pub fn incr_out(&mut self) {
        self.out += 1;
    }

    /// # Panics
    /// Underflow means an edge was double-counted or double-removed, which
    /// is a bookkeeping bug.
    #[inline]
    pub fn decr_out(&mut self) {
        assert!(self.out > 0, "out-degree underflow");
        self.out -= 1;
    }

    #[inline]
    pub fn incr_in(&mut self) {
        self.in_ += 1;
    }

    /// # Panics
    /// See [`DegreeCounters::decr_out`].
    #[inline]
    pub fn decr_in(&mut self) {
        assert!(self.in_ > 0, "in-degree underflow");
        self.in_ -= 1;
    }
}

/// Versioned bookkeeping attached to one vertex: its history ledger plus
/// degree counters. Edge bookkeeping is a bare [`EntityHistory`]; degree is
/// derived state stored on the endpoints, not on the edge.
#[derive(Clone, Debug)]
pub struct VertexData<VP> {
    pub history: EntityHistory<VP>,
    pub degrees: DegreeCounters,
}

impl<VP> VertexData<VP> {
    pub fn new(history: EntityHistory<VP>) -> Self {
        Self {
            history,
            degrees: DegreeCounters::default(),
        }
    }
}
