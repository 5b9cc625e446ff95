//! Contract required of the underlying mutable graph storage.
//!
//! The versioned layer is agnostic to how a graph physically stores its
//! vertices and edges (dense or sparse, parallel-edge policy, handle
//! recycling). It only requires the operations below, and that a handle
//! stays valid until that exact entity is physically removed. The base graph
//! keeps no history of its own; all revision tracking lives in
//! [`VersionedGraph`](crate::versioned::VersionedGraph).

use crate::graph::direction::Directedness;
use std::fmt::Debug;
use std::hash::Hash;

/// Minimal mutable-graph contract consumed by the versioned layer.
///
/// # Handle stability
/// `VertexId`/`EdgeId` values remain valid until the entity they name is
/// physically removed. They need not survive a copy of the graph; the
/// versioned layer re-keys its bookkeeping when duplicating.
pub trait BaseGraph {
    type VertexId: Copy + Eq + Hash + Ord + Debug;
    type EdgeId: Copy + Eq + Hash + Ord + Debug;
    /// Property attached to each vertex.
    type VertexProp: Clone + PartialEq;
    /// Property attached to each edge.
    type EdgeProp: Clone + PartialEq;
    /// One graph-wide property value.
    type GraphProp: Clone + PartialEq + Default;

    /// Directedness category, fixed at construction.
    const DIRECTEDNESS: Directedness;

    /// Insert a vertex; always succeeds.
    fn add_vertex(&mut self, prop: Self::VertexProp) -> Self::VertexId;

    /// Insert an edge `u -> v` (or `u -- v` when undirected). Returns `None`
    /// when the graph's own insertion policy rejects it (e.g. a duplicate in
    /// a no-parallel-edges graph); the graph is unchanged in that case.
    fn add_edge(
        &mut self,
        u: Self::VertexId,
        v: Self::VertexId,
        prop: Self::EdgeProp,
    ) -> Option<Self::EdgeId>;

    /// Physically remove a vertex. Precondition: no incident edges remain.
    fn remove_vertex(&mut self, v: Self::VertexId);

    /// Physically remove an edge.
    fn remove_edge(&mut self, e: Self::EdgeId);

    /// Source and target of `e`; `None` if `e` is not present. For
    /// undirected graphs the pair is in insertion order.
    fn endpoints(&self, e: Self::EdgeId) -> Option<(Self::VertexId, Self::VertexId)>;

    /// All vertices, unfiltered.
    fn vertices<'a>(&'a self) -> Box<dyn Iterator<Item = Self::VertexId> + 'a>;

    /// All edges, unfiltered.
    fn edges<'a>(&'a self) -> Box<dyn Iterator<Item = Self::EdgeId> + 'a>;

    /// Out-edges of `v`; for undirected graphs, all incident edges.
    fn out_edges<'a>(&'a self, v: Self::VertexId) -> Box<dyn Iterator<Item = Self::EdgeId> + 'a>;

    /// In-edges of `v`. Only called when
    /// `Self::DIRECTEDNESS.has_in_edges()`; other graphs may return an empty
    /// iterator.
    fn in_edges<'a>(&'a self, v: Self::VertexId) -> Box<dyn Iterator<Item = Self::EdgeId> + 'a>;

    /// Vertices reachable over one out-edge of `v`, with the connecting
    /// edge. For undirected graphs, the neighbor across each incident edge.
    fn adjacent<'a>(
        &'a self,
        v: Self::VertexId,
    ) -> Box<dyn Iterator<Item = (Self::EdgeId, Self::VertexId)> + 'a> {
        Box::new(self.out_edges(v).filter_map(move |e| {
            let (s, t) = self.endpoints(e)?;
            Some((e, if s == v { t } else { s }))
        }))
    }

    /// Vertices with an edge into `v`, with the connecting edge. Only
    /// meaningful when in-edges are.
    fn inv_adjacent<'a>(
        &'a self,
        v: Self::VertexId,
    ) -> Box<dyn Iterator<Item = (Self::EdgeId, Self::VertexId)> + 'a> {
        Box::new(self.in_edges(v).filter_map(move |e| {
            let (s, t) = self.endpoints(e)?;
            Some((e, if t == v { s } else { t }))
        }))
    }

    fn vertex_prop(&self, v: Self::VertexId) -> Option<&Self::VertexProp>;
    fn vertex_prop_mut(&mut self, v: Self::VertexId) -> Option<&mut Self::VertexProp>;
    fn edge_prop(&self, e: Self::EdgeId) -> Option<&Self::EdgeProp>;
    fn edge_prop_mut(&mut self, e: Self::EdgeId) -> Option<&mut Self::EdgeProp>;
    fn graph_prop(&self) -> &Self::GraphProp;
    fn graph_prop_mut(&mut self) -> &mut Self::GraphProp;
}
