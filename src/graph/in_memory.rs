//! In-memory implementation of the [`BaseGraph`] contract.
//!
//! [`InMemoryGraph`] stores vertices and edges in hash maps with adjacency
//! mirrors per endpoint, and hands out monotonically increasing (never
//! reused) handles. It is the reference collaborator the versioned layer is
//! tested against; any storage honoring [`BaseGraph`] works in its place.

use crate::graph::base::BaseGraph;
use crate::graph::direction::{Directedness, Direction};
use crate::graph::handle::{EdgeId, VertexId};
use std::collections::HashMap;
use std::marker::PhantomData;

#[derive(Clone, Debug)]
struct EdgeRecord<EP> {
    source: VertexId,
    target: VertexId,
    prop: EP,
}

/// Hash-map-backed mutable graph.
///
/// # Type Parameters
/// - `D`: directedness marker ([`Undirected`](crate::graph::direction::Undirected),
///   [`Directed`](crate::graph::direction::Directed),
///   [`Bidirectional`](crate::graph::direction::Bidirectional)).
/// - `VP`/`EP`/`GP`: vertex, edge, and graph-wide property types.
///
/// Parallel edges are allowed by default; [`InMemoryGraph::deny_parallel_edges`]
/// switches the insertion policy to reject an edge whose endpoints already
/// carry one, which exercises the rejection path of the versioned layer.
#[derive(Clone, Debug)]
pub struct InMemoryGraph<D, VP, EP, GP = ()> {
    vertices: HashMap<VertexId, VP>,
    edges: HashMap<EdgeId, EdgeRecord<EP>>,
    adjacency_out: HashMap<VertexId, Vec<EdgeId>>,
    adjacency_in: HashMap<VertexId, Vec<EdgeId>>,
    next_vertex: u64,
    next_edge: u64,
    graph_prop: GP,
    deny_parallel: bool,
    _direction: PhantomData<D>,
}

impl<D: Direction, VP, EP, GP: Default> Default for InMemoryGraph<D, VP, EP, GP> {
    fn default() -> Self {
        Self {
            vertices: HashMap::new(),
            edges: HashMap::new(),
            adjacency_out: HashMap::new(),
            adjacency_in: HashMap::new(),
            next_vertex: 0,
            next_edge: 0,
            graph_prop: GP::default(),
            deny_parallel: false,
            _direction: PhantomData,
        }
    }
}

impl<D: Direction, VP, EP, GP: Default> InMemoryGraph<D, VP, EP, GP> {
    /// Creates a new, empty graph with the default insertion policy.
    pub fn new() -> Self {
        Self::default()
    }

    /// Reject edges between endpoints that already carry one.
    pub fn deny_parallel_edges(mut self) -> Self {
        self.deny_parallel = true;
        self
    }

    /// Whether some edge already connects `u` and `v` (either orientation
    /// for undirected graphs).
    pub fn has_edge(&self, u: VertexId, v: VertexId) -> bool {
        self.adjacency_out.get(&u).map_or(false, |outs| {
            outs.iter().any(|e| {
                let rec = &self.edges[e];
                rec.target == v || (!D::KIND.is_directed() && rec.source == v)
            })
        })
    }

    fn scrub_adjacency(list: &mut Vec<EdgeId>, e: EdgeId) {
        if let Some(pos) = list.iter().position(|x| *x == e) {
            list.remove(pos);
        }
    }

    #[cfg(debug_assertions)]
    fn debug_assert_consistent(&self) {
        for (e, rec) in &self.edges {
            let out_ok = self
                .adjacency_out
                .get(&rec.source)
                .map_or(false, |v| v.contains(e));
            debug_assert!(out_ok, "missing out mirror for edge {e:?}");
            if D::KIND.is_directed() {
                let in_ok = self
                    .adjacency_in
                    .get(&rec.target)
                    .map_or(false, |v| v.contains(e));
                debug_assert!(in_ok, "missing in mirror for edge {e:?}");
            } else if rec.source != rec.target {
                let other_ok = self
                    .adjacency_out
                    .get(&rec.target)
                    .map_or(false, |v| v.contains(e));
                debug_assert!(other_ok, "missing incident mirror for edge {e:?}");
            }
        }
    }
}

impl<D, VP, EP, GP> BaseGraph for InMemoryGraph<D, VP, EP, GP>
where
    D: Direction,
    VP: Clone + PartialEq,
    EP: Clone + PartialEq,
    GP: Clone + PartialEq + Default,
{
    type VertexId = VertexId;
    type EdgeId = EdgeId;
    type VertexProp = VP;
    type EdgeProp = EP;
    type GraphProp = GP;

    const DIRECTEDNESS: Directedness = D::KIND;

    fn add_vertex(&mut self, prop: VP) -> VertexId {
        self.next_vertex += 1;
        let v = VertexId::new(self.next_vertex);
        self.vertices.insert(v, prop);
        self.adjacency_out.entry(v).or_default();
        self.adjacency_in.entry(v).or_default();
        v
    }

    fn add_edge(&mut self, u: VertexId, v: VertexId, prop: EP) -> Option<EdgeId> {
        assert!(
            self.vertices.contains_key(&u) && self.vertices.contains_key(&v),
            "add_edge on unknown endpoint ({u:?}, {v:?})"
        );
        if self.deny_parallel && self.has_edge(u, v) {
            return None;
        }
        self.next_edge += 1;
        let e = EdgeId::new(self.next_edge);
        self.edges.insert(
            e,
            EdgeRecord {
                source: u,
                target: v,
                prop,
            },
        );
        if D::KIND.is_directed() {
            self.adjacency_out.entry(u).or_default().push(e);
            self.adjacency_in.entry(v).or_default().push(e);
        } else {
            self.adjacency_out.entry(u).or_default().push(e);
            if u != v {
                self.adjacency_out.entry(v).or_default().push(e);
            }
        }
        #[cfg(debug_assertions)]
        self.debug_assert_consistent();
        Some(e)
    }

    fn remove_vertex(&mut self, v: VertexId) {
        debug_assert!(
            self.adjacency_out.get(&v).map_or(true, |l| l.is_empty())
                && self.adjacency_in.get(&v).map_or(true, |l| l.is_empty()),
            "remove_vertex {v:?} with incident edges"
        );
        self.vertices.remove(&v);
        self.adjacency_out.remove(&v);
        self.adjacency_in.remove(&v);
    }

    fn remove_edge(&mut self, e: EdgeId) {
        let Some(rec) = self.edges.remove(&e) else {
            return;
        };
        if let Some(outs) = self.adjacency_out.get_mut(&rec.source) {
            Self::scrub_adjacency(outs, e);
        }
        if D::KIND.is_directed() {
            if let Some(ins) = self.adjacency_in.get_mut(&rec.target) {
                Self::scrub_adjacency(ins, e);
            }
        } else if rec.source != rec.target {
            if let Some(outs) = self.adjacency_out.get_mut(&rec.target) {
                Self::scrub_adjacency(outs, e);
            }
        }
        #[cfg(debug_assertions)]
        self.debug_assert_consistent();
    }

    fn endpoints(&self, e: EdgeId) -> Option<(VertexId, VertexId)> {
        self.edges.get(&e).map(|rec| (rec.source, rec.target))
    }

    fn vertices<'a>(&'a self) -> Box<dyn Iterator<Item = VertexId> + 'a> {
        Box::new(self.vertices.keys().copied())
    }

    fn edges<'a>(&'a self) -> Box<dyn Iterator<Item = EdgeId> + 'a> {
        Box::new(self.edges.keys().copied())
    }

    fn out_edges<'a>(&'a self, v: VertexId) -> Box<dyn Iterator<Item = EdgeId> + 'a> {
        match self.adjacency_out.get(&v) {
            Some(list) => Box::new(list.iter().copied()),
            None => Box::new(std::iter::empty()),
        }
    }

    fn in_edges<'a>(&'a self, v: VertexId) -> Box<dyn Iterator<Item = EdgeId> + 'a> {
        match self.adjacency_in.get(&v) {
            Some(list) => Box::new(list.iter().copied()),
            None => Box::new(std::iter::empty()),
        }
    }

    fn vertex_prop(&self, v: VertexId) -> Option<&VP> {
        self.vertices.get(&v)
    }

    fn vertex_prop_mut(&mut self, v: VertexId) -> Option<&mut VP> {
        self.vertices.get_mut(&v)
    }

    fn edge_prop(&self, e: EdgeId) -> Option<&EP> {
        self.edges.get(&e).map(|rec| &rec.prop)
    }

    fn edge_prop_mut(&mut self, e: EdgeId) -> Option<&mut EP> {
        self.edges.get_mut(&e).map(|rec| &mut rec.prop)
    }

    fn graph_prop(&self) -> &GP {
        &self.graph_prop
    }

    fn graph_prop_mut(&mut self) -> &mut GP {
        &mut self.graph_prop
    }
}
