//! Deep copy of a versioned graph under fresh base-graph handles.
//!
//! A base graph is free to reassign handles when its contents are rebuilt,
//! so a copy cannot assume handle identity survives. The copy routine
//! records an old-to-new handle map while re-inserting every physically
//! present entity (tombstoned ones included) and re-keys all bookkeeping
//! through that map.

use itertools::Itertools;
use std::collections::HashMap;

use crate::debug_invariants::DebugInvariants;
use crate::graph::base::BaseGraph;
use crate::graph::handle::EdgeKey;
use crate::rewind_error::RewindError;
use crate::versioned::graph::VersionedGraph;

impl<G> VersionedGraph<G>
where
    G: BaseGraph + Default,
    G::VertexProp: Clone,
    G::EdgeProp: Clone,
{
    /// Produce an independent copy. Live counts are re-derived from the
    /// copied ledgers' top-entry visibility and cross-checked against this
    /// graph's counters.
    pub fn duplicate(&self) -> Result<Self, RewindError> {
        let mut base = G::default();
        let mut vertex_map: HashMap<G::VertexId, G::VertexId> = HashMap::new();

        let mut vertex_data = HashMap::new();
        for old in self.vertex_data.keys().copied().sorted() {
            let prop = self
                .base
                .vertex_prop(old)
                .cloned()
                .ok_or_else(|| RewindError::UnknownVertex(format!("{old:?}")))?;
            let new = base.add_vertex(prop);
            vertex_map.insert(old, new);
            vertex_data.insert(new, self.vertex_data[&old].clone());
        }

        let mut edge_data = HashMap::new();
        for old in self.edge_data.keys().copied().sorted() {
            let prop = self
                .base
                .edge_prop(old.id)
                .cloned()
                .ok_or_else(|| RewindError::UnknownEdge(format!("{old:?}")))?;
            let source = vertex_map[&old.source];
            let target = vertex_map[&old.target];
            let id = base
                .add_edge(source, target, prop)
                .ok_or(RewindError::CopyEdgeRejected)?;
            edge_data.insert(
                EdgeKey { id, source, target },
                self.edge_data[&old].clone(),
            );
        }

        *base.graph_prop_mut() = self.base.graph_prop().clone();

        let vertex_count = vertex_data
            .values()
            .filter(|d| d.history.is_visible())
            .count();
        let edge_count = edge_data.values().filter(|h| h.is_visible()).count();
        if vertex_count != self.vertex_count {
            return Err(RewindError::CopyCountMismatch {
                kind: "vertices",
                expected: self.vertex_count,
                found: vertex_count,
            });
        }
        if edge_count != self.edge_count {
            return Err(RewindError::CopyCountMismatch {
                kind: "edges",
                expected: self.edge_count,
                found: edge_count,
            });
        }

        let copy = Self {
            base,
            vertex_data,
            edge_data,
            bundle: self.bundle.clone(),
            current_rev: self.current_rev,
            vertex_count,
            edge_count,
        };
        copy.debug_assert_invariants();
        Ok(copy)
    }
}
