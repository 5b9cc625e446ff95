//! Filtered traversal over the visible subgraph.
//!
//! Wraps the base graph's enumerators with visibility predicates that hide
//! tombstoned entities. Two predicate shapes exist: entity visibility
//! (vertex/edge/out-edge/in-edge enumeration filters on the enumerated
//! entity itself) and adjacency visibility (`adjacent_vertices` /
//! `inv_adjacent_vertices` filter on the *connecting edge*, not the target
//! vertex). All iterators are lazy, forward-only, restartable, and finite;
//! no mutation goes through a view.
//!
//! The raw, unfiltered enumerators are retained for internal bookkeeping
//! and diagnostics.

use crate::graph::base::BaseGraph;
use crate::graph::handle::EdgeKey;
use crate::rewind_error::RewindError;
use crate::versioned::graph::{EdgeHandle, VersionedGraph};

impl<G: BaseGraph> VersionedGraph<G> {
    /// Visible vertices.
    pub fn vertices(&self) -> Box<dyn Iterator<Item = G::VertexId> + '_> {
        Box::new(self.base.vertices().filter(move |v| self.vertex_visible(*v)))
    }

    /// Visible edges, as full edge handles.
    pub fn edges(&self) -> Box<dyn Iterator<Item = EdgeHandle<G>> + '_> {
        Box::new(self.base.edges().filter_map(move |e| {
            let key = self.key_of(e)?;
            self.edge_visible(&key).then_some(key)
        }))
    }

    /// Visible out-edges of `v` (all visible incident edges for undirected
    /// graphs).
    pub fn out_edges(
        &self,
        v: G::VertexId,
    ) -> Result<Box<dyn Iterator<Item = EdgeHandle<G>> + '_>, RewindError> {
        if !self.vertex_data.contains_key(&v) {
            return Err(RewindError::UnknownVertex(format!("{v:?}")));
        }
        Ok(Box::new(self.base.out_edges(v).filter_map(move |e| {
            let key = self.key_of(e)?;
            self.edge_visible(&key).then_some(key)
        })))
    }

    /// Visible in-edges of `v`. Errors for directedness categories that do
    /// not enumerate in-edges.
    pub fn in_edges(
        &self,
        v: G::VertexId,
    ) -> Result<Box<dyn Iterator<Item = EdgeHandle<G>> + '_>, RewindError> {
        if !G::DIRECTEDNESS.has_in_edges() {
            return Err(RewindError::UnsupportedDirectedness(
                "in_edges requires a bidirectional graph",
            ));
        }
        if !self.vertex_data.contains_key(&v) {
            return Err(RewindError::UnknownVertex(format!("{v:?}")));
        }
        Ok(Box::new(self.base.in_edges(v).filter_map(move |e| {
            let key = self.key_of(e)?;
            self.edge_visible(&key).then_some(key)
        })))
    }

    /// Vertices across one visible out-edge of `v`. The filter looks up the
    /// connecting edge's visibility, not the neighbor's: a visible edge
    /// never points at a tombstoned vertex.
    pub fn adjacent_vertices(
        &self,
        v: G::VertexId,
    ) -> Result<Box<dyn Iterator<Item = G::VertexId> + '_>, RewindError> {
        if !self.vertex_data.contains_key(&v) {
            return Err(RewindError::UnknownVertex(format!("{v:?}")));
        }
        Ok(Box::new(self.base.adjacent(v).filter_map(move |(e, w)| {
            let key = self.key_of(e)?;
            self.edge_visible(&key).then_some(w)
        })))
    }

    /// Vertices with a visible edge into `v`. Errors for directedness
    /// categories that do not enumerate in-edges.
    pub fn inv_adjacent_vertices(
        &self,
        v: G::VertexId,
    ) -> Result<Box<dyn Iterator<Item = G::VertexId> + '_>, RewindError> {
        if !G::DIRECTEDNESS.has_in_edges() {
            return Err(RewindError::UnsupportedDirectedness(
                "inv_adjacent_vertices requires a bidirectional graph",
            ));
        }
        if !self.vertex_data.contains_key(&v) {
            return Err(RewindError::UnknownVertex(format!("{v:?}")));
        }
        Ok(Box::new(self.base.inv_adjacent(v).filter_map(
            move |(e, w)| {
                let key = self.key_of(e)?;
                self.edge_visible(&key).then_some(w)
            },
        )))
    }

    // --- raw (unfiltered) traversal ---------------------------------------

    /// All physically present vertices, tombstoned included.
    pub fn raw_vertices(&self) -> Box<dyn Iterator<Item = G::VertexId> + '_> {
        self.base.vertices()
    }

    /// All physically present edges, tombstoned included.
    pub fn raw_edges(&self) -> Box<dyn Iterator<Item = EdgeHandle<G>> + '_> {
        Box::new(self.base.edges().filter_map(move |e| self.key_of(e)))
    }

    #[inline]
    fn key_of(&self, e: G::EdgeId) -> Option<EdgeHandle<G>> {
        let (source, target) = self.base.endpoints(e)?;
        Some(EdgeKey {
            id: e,
            source,
            target,
        })
    }
}
