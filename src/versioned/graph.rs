//! `VersionedGraph`: the revision-tracking orchestrator.
//!
//! Owns a base graph plus one history ledger per live entity, degree
//! counters, a compacted graph-wide bundle track, the current-revision
//! counter, and live element counts. Mutations go straight to the base
//! graph; deletions additionally go through the ledgers so they can be
//! undone. Reads go through the filtered view (`versioned::view`).
//!
//! All count and degree mutation funnels through four private entry points
//! (create / tombstone / resurrect / destroy) so the bookkeeping invariants
//! are enforced in one place.

use crate::debug_invariants::DebugInvariants;
use crate::graph::base::BaseGraph;
use crate::graph::degree::VertexData;
use crate::graph::direction::Directedness;
use crate::graph::handle::EdgeKey;
use crate::history::{BundleHistory, EntityHistory, Revision};
use crate::rewind_error::RewindError;
use std::collections::HashMap;

/// Edge handle the versioned layer hands out: the base graph's raw edge
/// handle combined with both endpoints, so history indexing survives handle
/// reuse and distinguishes parallel edges.
pub type EdgeHandle<G> = EdgeKey<<G as BaseGraph>::VertexId, <G as BaseGraph>::EdgeId>;

/// A mutable graph with transactional, revision-tracked history.
///
/// Designed for speculative and backtracking search: mutate freely, then
/// [`commit`](VersionedGraph::commit) a snapshot,
/// [`revert_uncommitted`](VersionedGraph::revert_uncommitted) edits since the
/// last snapshot, step one snapshot back with
/// [`undo_commit`](VersionedGraph::undo_commit), or compact everything with
/// [`erase_history`](VersionedGraph::erase_history).
///
/// Single-threaded by design; see the crate docs.
///
/// ```rust
/// use graph_rewind::graph::{Directed, InMemoryGraph};
/// use graph_rewind::versioned::VersionedGraph;
///
/// let mut g = VersionedGraph::<InMemoryGraph<Directed, i32, ()>>::new();
/// let a = g.add_vertex(1);
/// let b = g.add_vertex(2);
/// g.commit();
/// let e = g.add_edge(a, b, ()).unwrap();
/// assert_eq!(g.num_edges(), 1);
/// g.revert_uncommitted();
/// assert_eq!(g.num_edges(), 0);
/// assert!(!g.edges().any(|k| k == e));
/// assert_eq!(g.num_vertices(), 2);
/// ```
#[derive(Debug)]
pub struct VersionedGraph<G: BaseGraph> {
    pub(crate) base: G,
    pub(crate) vertex_data: HashMap<G::VertexId, VertexData<G::VertexProp>>,
    pub(crate) edge_data: HashMap<EdgeHandle<G>, EntityHistory<G::EdgeProp>>,
    pub(crate) bundle: BundleHistory<G::GraphProp>,
    pub(crate) current_rev: Revision,
    pub(crate) vertex_count: usize,
    pub(crate) edge_count: usize,
}

impl<G: BaseGraph + Default> VersionedGraph<G> {
    /// Empty container at the start revision. The bundle track is seeded
    /// with the base graph's default graph-wide value so it is never read
    /// before first write.
    pub fn new() -> Self {
        Self::from_base(G::default())
    }
}

impl<G: BaseGraph + Default> Default for VersionedGraph<G> {
    fn default() -> Self {
        Self::new()
    }
}

impl<G: BaseGraph> VersionedGraph<G> {
    /// Wrap a pre-populated base graph. Every entity already present gets a
    /// creation entry at the start revision, as if it had just been added.
    pub fn from_base(base: G) -> Self {
        let rev = Revision::start();
        let mut vertex_data = HashMap::new();
        for v in base.vertices() {
            let prop = base
                .vertex_prop(v)
                .cloned()
                .expect("enumerated vertex missing its property");
            vertex_data.insert(v, VertexData::new(EntityHistory::with_creation(rev, prop)));
        }
        let mut edge_data = HashMap::new();
        for e in base.edges() {
            let (source, target) = base.endpoints(e).expect("enumerated edge missing endpoints");
            let prop = base
                .edge_prop(e)
                .cloned()
                .expect("enumerated edge missing its property");
            edge_data.insert(
                EdgeKey {
                    id: e,
                    source,
                    target,
                },
                EntityHistory::with_creation(rev, prop),
            );
        }
        let bundle = BundleHistory::seeded(rev, base.graph_prop().clone());
        let vertex_count = vertex_data.len();
        let edge_count = edge_data.len();
        let mut graph = Self {
            base,
            vertex_data,
            edge_data,
            bundle,
            current_rev: rev,
            vertex_count,
            edge_count,
        };
        let keys: Vec<_> = graph.edge_data.keys().copied().collect();
        for key in keys {
            graph.incr_degrees(key);
        }
        graph.debug_assert_invariants();
        graph
    }

    /// Read-only access to the underlying storage, for diagnostics.
    pub fn base(&self) -> &G {
        &self.base
    }

    /// The revision the next `commit()` will record at.
    #[inline]
    pub fn current_rev(&self) -> Revision {
        self.current_rev
    }

    /// Number of visible vertices. O(1): incrementally maintained.
    #[inline]
    pub fn num_vertices(&self) -> usize {
        self.vertex_count
    }

    /// Number of visible edges. O(1): incrementally maintained.
    #[inline]
    pub fn num_edges(&self) -> usize {
        self.edge_count
    }

    /// Visible out-degree of `v` (for undirected graphs, its incident
    /// degree). O(1): incrementally maintained.
    pub fn out_degree(&self, v: G::VertexId) -> Result<usize, RewindError> {
        self.vertex_data
            .get(&v)
            .map(|d| d.degrees.out_degree())
            .ok_or_else(|| RewindError::UnknownVertex(format!("{v:?}")))
    }

    /// Visible in-degree of `v`. Only bidirectional graphs maintain it;
    /// other directedness categories must use the base graph's own
    /// traversal, matching the base graph's capability set.
    pub fn in_degree(&self, v: G::VertexId) -> Result<usize, RewindError> {
        if !G::DIRECTEDNESS.tracks_in_degree() {
            return Err(RewindError::UnsupportedDirectedness(
                "in_degree requires a bidirectional graph",
            ));
        }
        self.vertex_data
            .get(&v)
            .map(|d| d.degrees.in_degree())
            .ok_or_else(|| RewindError::UnknownVertex(format!("{v:?}")))
    }

    /// Ledger depth of a vertex, for diagnostics and tests.
    pub fn vertex_history_len(&self, v: G::VertexId) -> Result<usize, RewindError> {
        self.vertex_data
            .get(&v)
            .map(|d| d.history.len())
            .ok_or_else(|| RewindError::UnknownVertex(format!("{v:?}")))
    }

    /// Ledger depth of an edge, for diagnostics and tests.
    pub fn edge_history_len(&self, key: EdgeHandle<G>) -> Result<usize, RewindError> {
        self.edge_data
            .get(&key)
            .map(|h| h.len())
            .ok_or_else(|| RewindError::UnknownEdge(format!("{key:?}")))
    }

    /// Depth of the graph-wide value track, for diagnostics and tests.
    pub fn bundle_history_len(&self) -> usize {
        self.bundle.len()
    }

    // --- visibility -------------------------------------------------------

    #[inline]
    pub(crate) fn vertex_visible(&self, v: G::VertexId) -> bool {
        self.vertex_data
            .get(&v)
            .map_or(false, |d| d.history.is_visible())
    }

    #[inline]
    pub(crate) fn edge_visible(&self, key: &EdgeHandle<G>) -> bool {
        self.edge_data.get(key).map_or(false, |h| h.is_visible())
    }

    // --- mutation entry points --------------------------------------------

    /// Insert a vertex with property `prop`. Always succeeds; the vertex
    /// gets a single creation entry at the current revision.
    pub fn add_vertex(&mut self, prop: G::VertexProp) -> G::VertexId {
        let v = self.base.add_vertex(prop.clone());
        self.vertex_data.insert(
            v,
            VertexData::new(EntityHistory::with_creation(self.current_rev, prop)),
        );
        self.vertex_count += 1;
        log::trace!("add_vertex {v:?} at rev {}", self.current_rev);
        self.debug_assert_invariants();
        v
    }

    /// Insert an edge under the base graph's own insertion policy. `None`
    /// means the base graph rejected it; no history is recorded in that
    /// case.
    ///
    /// # Panics
    /// Panics if `u` or `v` is unknown or not visible.
    pub fn add_edge(
        &mut self,
        u: G::VertexId,
        v: G::VertexId,
        prop: G::EdgeProp,
    ) -> Option<EdgeHandle<G>> {
        assert!(
            self.vertex_visible(u) && self.vertex_visible(v),
            "add_edge endpoints must be visible vertices ({u:?}, {v:?})"
        );
        let e = self.base.add_edge(u, v, prop.clone())?;
        let key = EdgeKey {
            id: e,
            source: u,
            target: v,
        };
        self.edge_data
            .insert(key, EntityHistory::with_creation(self.current_rev, prop));
        self.incr_degrees(key);
        self.edge_count += 1;
        log::trace!("add_edge {key:?} at rev {}", self.current_rev);
        self.debug_assert_invariants();
        Some(key)
    }

    /// Remove an edge: tombstone it if it survived at least one commit,
    /// otherwise erase it outright (a never-committed entity has no past to
    /// return to).
    ///
    /// # Panics
    /// Panics if the edge is unknown or already tombstoned.
    pub fn remove_edge(&mut self, key: EdgeHandle<G>) {
        let cur = self.current_rev;
        let hist = self
            .edge_data
            .get(&key)
            .unwrap_or_else(|| panic!("remove_edge on unknown edge {key:?}"));
        assert!(hist.is_visible(), "remove_edge on tombstoned edge {key:?}");
        let committed = hist.len() > 1
            || hist
                .top()
                .map_or(false, |t| t.rev.magnitude() < cur.magnitude());
        if committed {
            let live = self
                .base
                .edge_prop(key.id)
                .cloned()
                .expect("visible edge missing from base graph");
            self.edge_data
                .get_mut(&key)
                .expect("edge just looked up")
                .push(self.current_rev.tombstone(), live);
            self.decr_degrees(key);
            self.edge_count -= 1;
            log::trace!("tombstone edge {key:?} at rev {}", self.current_rev);
        } else {
            self.decr_degrees(key);
            self.edge_count -= 1;
            self.edge_data.remove(&key);
            self.base.remove_edge(key.id);
            log::trace!("destroy uncommitted edge {key:?}");
        }
        self.debug_assert_invariants();
    }

    /// Remove a vertex: tombstone or erase by the same rule as
    /// [`remove_edge`](VersionedGraph::remove_edge).
    ///
    /// Precondition (caller's responsibility, as with ordinary graph
    /// removal): all incident edges have been removed first, e.g. via
    /// [`clear_vertex`](VersionedGraph::clear_vertex).
    ///
    /// # Panics
    /// Panics if the vertex is unknown, already tombstoned, or still has
    /// visible incident edges.
    pub fn remove_vertex(&mut self, v: G::VertexId) {
        let cur = self.current_rev;
        let data = self
            .vertex_data
            .get(&v)
            .unwrap_or_else(|| panic!("remove_vertex on unknown vertex {v:?}"));
        assert!(
            data.history.is_visible(),
            "remove_vertex on tombstoned vertex {v:?}"
        );
        assert!(
            data.degrees.out_degree() == 0 && data.degrees.in_degree() == 0,
            "remove_vertex {v:?} with visible incident edges"
        );
        let committed = data.history.len() > 1
            || data
                .history
                .top()
                .map_or(false, |t| t.rev.magnitude() < cur.magnitude());
        if committed {
            let live = self
                .base
                .vertex_prop(v)
                .cloned()
                .expect("visible vertex missing from base graph");
            self.vertex_data
                .get_mut(&v)
                .expect("vertex just looked up")
                .history
                .push(self.current_rev.tombstone(), live);
            self.vertex_count -= 1;
            log::trace!("tombstone vertex {v:?} at rev {}", self.current_rev);
        } else {
            self.vertex_data.remove(&v);
            self.base.remove_vertex(v);
            self.vertex_count -= 1;
            log::trace!("destroy uncommitted vertex {v:?}");
        }
        self.debug_assert_invariants();
    }

    /// Remove every visible out-edge of `v` (every incident edge for
    /// undirected graphs).
    pub fn clear_out_edges(&mut self, v: G::VertexId) {
        let keys: Vec<_> = match self.out_edges(v) {
            Ok(iter) => iter.collect(),
            Err(_) => return,
        };
        for key in keys {
            self.remove_edge(key);
        }
    }

    /// Remove every visible in-edge of `v`. Requires a directedness
    /// category that enumerates in-edges.
    pub fn clear_in_edges(&mut self, v: G::VertexId) -> Result<(), RewindError> {
        let keys: Vec<_> = self.in_edges(v)?.collect();
        for key in keys {
            self.remove_edge(key);
        }
        Ok(())
    }

    /// Remove all visible incident edges of `v`. The vertex itself remains;
    /// removing it is the separate
    /// [`remove_vertex`](VersionedGraph::remove_vertex).
    ///
    /// For directed graphs without in-edge enumeration this falls back to a
    /// scan of all visible edges to find the ones pointing at `v`.
    pub fn clear_vertex(&mut self, v: G::VertexId) {
        self.clear_out_edges(v);
        match G::DIRECTEDNESS {
            Directedness::Undirected => {}
            Directedness::Bidirectional => {
                let _ = self.clear_in_edges(v);
            }
            Directedness::Directed => {
                let incoming: Vec<_> = self.edges().filter(|key| key.target == v).collect();
                for key in incoming {
                    self.remove_edge(key);
                }
            }
        }
    }

    // --- property passthroughs --------------------------------------------
    //
    // Live writes are not recorded; commit() snapshots whatever the live
    // value is at that point.

    pub fn vertex_value(&self, v: G::VertexId) -> Result<&G::VertexProp, RewindError> {
        self.base
            .vertex_prop(v)
            .ok_or_else(|| RewindError::UnknownVertex(format!("{v:?}")))
    }

    pub fn vertex_value_mut(&mut self, v: G::VertexId) -> Result<&mut G::VertexProp, RewindError> {
        self.base
            .vertex_prop_mut(v)
            .ok_or_else(|| RewindError::UnknownVertex(format!("{v:?}")))
    }

    pub fn edge_value(&self, key: EdgeHandle<G>) -> Result<&G::EdgeProp, RewindError> {
        if !self.edge_data.contains_key(&key) {
            return Err(RewindError::UnknownEdge(format!("{key:?}")));
        }
        self.base
            .edge_prop(key.id)
            .ok_or_else(|| RewindError::UnknownEdge(format!("{key:?}")))
    }

    pub fn edge_value_mut(&mut self, key: EdgeHandle<G>) -> Result<&mut G::EdgeProp, RewindError> {
        if !self.edge_data.contains_key(&key) {
            return Err(RewindError::UnknownEdge(format!("{key:?}")));
        }
        self.base
            .edge_prop_mut(key.id)
            .ok_or_else(|| RewindError::UnknownEdge(format!("{key:?}")))
    }

    pub fn graph_value(&self) -> &G::GraphProp {
        self.base.graph_prop()
    }

    pub fn graph_value_mut(&mut self) -> &mut G::GraphProp {
        self.base.graph_prop_mut()
    }

    // --- centralized count/degree bookkeeping -----------------------------

    fn degrees_mut(&mut self, v: G::VertexId) -> &mut crate::graph::degree::DegreeCounters {
        &mut self
            .vertex_data
            .get_mut(&v)
            .expect("degree update on unknown vertex")
            .degrees
    }

    pub(crate) fn incr_degrees(&mut self, key: EdgeHandle<G>) {
        match G::DIRECTEDNESS {
            Directedness::Undirected => {
                self.degrees_mut(key.source).incr_out();
                if key.source != key.target {
                    self.degrees_mut(key.target).incr_out();
                }
            }
            Directedness::Directed => self.degrees_mut(key.source).incr_out(),
            Directedness::Bidirectional => {
                self.degrees_mut(key.source).incr_out();
                self.degrees_mut(key.target).incr_in();
            }
        }
    }

    pub(crate) fn decr_degrees(&mut self, key: EdgeHandle<G>) {
        match G::DIRECTEDNESS {
            Directedness::Undirected => {
                self.degrees_mut(key.source).decr_out();
                if key.source != key.target {
                    self.degrees_mut(key.target).decr_out();
                }
            }
            Directedness::Directed => self.degrees_mut(key.source).decr_out(),
            Directedness::Bidirectional => {
                self.degrees_mut(key.source).decr_out();
                self.degrees_mut(key.target).decr_in();
            }
        }
    }

    /// An edge re-entered the visible set (resurrection).
    pub(crate) fn note_edge_alive(&mut self, key: EdgeHandle<G>) {
        self.incr_degrees(key);
        self.edge_count += 1;
    }

    /// A visible edge left the visible set (tombstone or destruction).
    pub(crate) fn note_edge_gone(&mut self, key: EdgeHandle<G>) {
        self.decr_degrees(key);
        self.edge_count -= 1;
    }

    pub(crate) fn note_vertex_alive(&mut self) {
        self.vertex_count += 1;
    }

    pub(crate) fn note_vertex_gone(&mut self) {
        self.vertex_count -= 1;
    }
}
