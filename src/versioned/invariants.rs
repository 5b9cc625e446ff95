//! Full-scan invariant validation for [`VersionedGraph`].
//!
//! The maintained counters are never recomputed by scanning during normal
//! operation; this module is the independent cross-check that they *could*
//! be, used from debug builds and tests.

use crate::debug_invariants::DebugInvariants;
use crate::graph::base::BaseGraph;
use crate::history::{EntityHistory, Revision};
use crate::rewind_error::RewindError;
use crate::versioned::graph::VersionedGraph;

fn check_ledger<T>(
    hist: &EntityHistory<T>,
    what: &dyn std::fmt::Debug,
    current: Revision,
) -> Result<(), RewindError> {
    if hist.is_empty() {
        return Err(RewindError::InvariantViolation(format!(
            "{what:?} physically exists with an empty ledger"
        )));
    }
    let mut prev: Option<i64> = None;
    for entry in hist.iter_newest_first() {
        let mag = entry.rev.magnitude();
        if mag > current.magnitude() {
            return Err(RewindError::InvariantViolation(format!(
                "{what:?} has entry at {:?} past current rev {current:?}",
                entry.rev
            )));
        }
        if let Some(p) = prev {
            if mag >= p {
                return Err(RewindError::InvariantViolation(format!(
                    "{what:?} ledger not strictly decreasing at {:?}",
                    entry.rev
                )));
            }
        }
        prev = Some(mag);
    }
    Ok(())
}

impl<G: BaseGraph> DebugInvariants for VersionedGraph<G> {
    fn debug_assert_invariants(&self) {
        crate::debug_invariants!(self.validate_invariants(), "VersionedGraph");
    }

    fn validate_invariants(&self) -> Result<(), RewindError> {
        // Bookkeeping covers exactly the physically present entities.
        let base_vertices = self.base.vertices().count();
        if base_vertices != self.vertex_data.len() {
            return Err(RewindError::InvariantViolation(format!(
                "{} base vertices vs {} vertex ledgers",
                base_vertices,
                self.vertex_data.len()
            )));
        }
        for v in self.base.vertices() {
            if !self.vertex_data.contains_key(&v) {
                return Err(RewindError::InvariantViolation(format!(
                    "base vertex {v:?} has no ledger"
                )));
            }
        }
        let base_edges = self.base.edges().count();
        if base_edges != self.edge_data.len() {
            return Err(RewindError::InvariantViolation(format!(
                "{} base edges vs {} edge ledgers",
                base_edges,
                self.edge_data.len()
            )));
        }
        for key in self.raw_edges() {
            if !self.edge_data.contains_key(&key) {
                return Err(RewindError::InvariantViolation(format!(
                    "base edge {key:?} has no ledger"
                )));
            }
        }

        // Ledger ordering and revision bounds.
        for (v, data) in &self.vertex_data {
            check_ledger(&data.history, v, self.current_rev)?;
        }
        for (key, hist) in &self.edge_data {
            check_ledger(hist, key, self.current_rev)?;
        }

        // Live counts equal visible recounts.
        let visible_vertices = self
            .vertex_data
            .values()
            .filter(|d| d.history.is_visible())
            .count();
        if visible_vertices != self.vertex_count {
            return Err(RewindError::InvariantViolation(format!(
                "vertex_count {} vs visible recount {visible_vertices}",
                self.vertex_count
            )));
        }
        let visible_edges = self.edge_data.values().filter(|h| h.is_visible()).count();
        if visible_edges != self.edge_count {
            return Err(RewindError::InvariantViolation(format!(
                "edge_count {} vs visible recount {visible_edges}",
                self.edge_count
            )));
        }

        // Degree counters equal visible-incidence recounts.
        for (&v, data) in &self.vertex_data {
            let out = self
                .out_edges(v)
                .map(|iter| iter.count())
                .unwrap_or_default();
            if out != data.degrees.out_degree() {
                return Err(RewindError::InvariantViolation(format!(
                    "out-degree of {v:?}: counter {} vs recount {out}",
                    data.degrees.out_degree()
                )));
            }
            if G::DIRECTEDNESS.tracks_in_degree() {
                let in_ = self
                    .in_edges(v)
                    .map(|iter| iter.count())
                    .unwrap_or_default();
                if in_ != data.degrees.in_degree() {
                    return Err(RewindError::InvariantViolation(format!(
                        "in-degree of {v:?}: counter {} vs recount {in_}",
                        data.degrees.in_degree()
                    )));
                }
            }
        }
        Ok(())
    }
}
