//! Commit, undo, revert, and history compaction.
//!
//! These are the batch operations that walk all entities and reconcile the
//! ledgers, degree counters, live counts, and the revision counter together.
//! Every walk handles edges before vertices, so vertex-side work always sees
//! edges already reconciled (and physical vertex removal never races its
//! incident edges). Walks visit entities in sorted handle order for
//! deterministic behavior.

use itertools::Itertools;

use crate::debug_invariants::DebugInvariants;
use crate::graph::base::BaseGraph;
use crate::history::{EntityHistory, Revision};
use crate::versioned::graph::VersionedGraph;

/// What a reconciliation pass did to one entity's ledger.
enum Reconciled<T> {
    /// The ledger drained completely: the entity never survived a commit at
    /// the floor and must be physically destroyed.
    Destroy { was_visible: bool },
    /// The surviving top entry is authoritative again. Its value is written
    /// back into the live graph even when nothing was popped — that is what
    /// discards uncommitted property edits, which are never recorded.
    Restored {
        value: T,
        was_visible: bool,
        now_visible: bool,
    },
}

/// Pop every entry recorded at or after `floor` (by magnitude).
fn reconcile_ledger<T: Clone>(hist: &mut EntityHistory<T>, floor: Revision) -> Reconciled<T> {
    let was_visible = hist.is_visible();
    while hist
        .top()
        .map_or(false, |top| top.rev.magnitude() >= floor.magnitude())
    {
        let _ = hist.pop();
    }
    if hist.is_empty() {
        Reconciled::Destroy { was_visible }
    } else {
        let top = hist.top().expect("ledger checked non-empty");
        Reconciled::Restored {
            value: top.value.clone(),
            was_visible,
            now_visible: !top.rev.is_tombstone(),
        }
    }
}

/// Record `live` at `rev` unless it matches the last recorded value. A
/// change within the entity's creation revision folds into the creation
/// entry instead of stacking a second entry at the same magnitude.
fn record_snapshot<T: Clone + PartialEq>(hist: &mut EntityHistory<T>, rev: Revision, live: T) {
    let (unchanged, same_rev) = match hist.top() {
        Ok(top) => (top.value == live, top.rev.magnitude() == rev.magnitude()),
        Err(_) => (false, false),
    };
    if unchanged {
        return;
    }
    if same_rev {
        hist.top_mut().expect("ledger checked non-empty").value = live;
    } else {
        hist.push(rev, live);
    }
}

impl<G: BaseGraph> VersionedGraph<G> {
    /// Snapshot every changed live value into history and advance the
    /// revision counter. Tombstoned entities are skipped — their tombstone
    /// already is their record.
    pub fn commit(&mut self) {
        let rev = self.current_rev;
        let edge_keys: Vec<_> = self.edge_data.keys().copied().sorted().collect();
        for key in edge_keys {
            if !self.edge_visible(&key) {
                continue;
            }
            let live = self
                .base
                .edge_prop(key.id)
                .cloned()
                .expect("visible edge missing from base graph");
            let hist = self
                .edge_data
                .get_mut(&key)
                .expect("edge key just enumerated");
            record_snapshot(hist, rev, live);
        }
        let vertex_ids: Vec<_> = self.vertex_data.keys().copied().sorted().collect();
        for v in vertex_ids {
            if !self.vertex_visible(v) {
                continue;
            }
            let live = self
                .base
                .vertex_prop(v)
                .cloned()
                .expect("visible vertex missing from base graph");
            let hist = &mut self
                .vertex_data
                .get_mut(&v)
                .expect("vertex id just enumerated")
                .history;
            record_snapshot(hist, rev, live);
        }
        let live = self.base.graph_prop().clone();
        self.bundle.record(rev, &live);
        self.current_rev = rev.succ();
        log::debug!("commit: recorded rev {rev}, now at {}", self.current_rev);
        self.debug_assert_invariants();
    }

    /// Discard the most recent commit, restoring the previous committed
    /// state (uncommitted edits are discarded along the way). Returns
    /// whether the revision counter moved.
    ///
    /// The counter never goes below 2: the first commit is a permanent
    /// baseline, so at the floor this degenerates to
    /// [`revert_uncommitted`](VersionedGraph::revert_uncommitted), and
    /// before any commit at all it does nothing.
    pub fn undo_commit(&mut self) -> bool {
        // Before the first commit (and right after erase_history) there is
        // no commit to discard: a complete no-op, uncommitted edits
        // included. Popping here would drain the baseline entries sitting
        // at the start revision.
        if self.current_rev.magnitude() < 2 {
            log::debug!("undo_commit: no commit to discard at rev 1");
            return false;
        }
        let moved = self.current_rev.magnitude() > 2;
        if moved {
            self.current_rev = self.current_rev.pred();
        }
        self.reconcile_to(self.current_rev);
        self.restore_graph_value(self.current_rev);
        log::debug!("undo_commit: at rev {} (moved: {moved})", self.current_rev);
        self.debug_assert_invariants();
        moved
    }

    /// Discard every edit made since the last commit, leaving the revision
    /// counter unchanged.
    pub fn revert_uncommitted(&mut self) {
        self.reconcile_to(self.current_rev);
        self.restore_graph_value(self.current_rev);
        log::debug!("revert_uncommitted: rev {} unchanged", self.current_rev);
        self.debug_assert_invariants();
    }

    /// Irreversibly compact all history: every live entity keeps exactly
    /// one entry at the start revision holding its current live value,
    /// tombstoned entities are physically destroyed (their tombstones are
    /// not representable after compaction), the bundle track is re-seeded
    /// from the live graph-wide value, and the revision counter resets.
    ///
    /// No subsequent [`undo_commit`](VersionedGraph::undo_commit) can
    /// recover state from before this call.
    pub fn erase_history(&mut self) {
        let start = Revision::start();
        let edge_keys: Vec<_> = self.edge_data.keys().copied().sorted().collect();
        for key in edge_keys {
            if self.edge_visible(&key) {
                let live = self
                    .base
                    .edge_prop(key.id)
                    .cloned()
                    .expect("visible edge missing from base graph");
                let hist = self
                    .edge_data
                    .get_mut(&key)
                    .expect("edge key just enumerated");
                hist.clear();
                hist.push(start, live);
            } else {
                self.edge_data.remove(&key);
                self.base.remove_edge(key.id);
                log::trace!("erase_history: destroyed tombstoned edge {key:?}");
            }
        }
        let vertex_ids: Vec<_> = self.vertex_data.keys().copied().sorted().collect();
        for v in vertex_ids {
            if self.vertex_visible(v) {
                let live = self
                    .base
                    .vertex_prop(v)
                    .cloned()
                    .expect("visible vertex missing from base graph");
                let hist = &mut self
                    .vertex_data
                    .get_mut(&v)
                    .expect("vertex id just enumerated")
                    .history;
                hist.clear();
                hist.push(start, live);
            } else {
                self.vertex_data.remove(&v);
                self.base.remove_vertex(v);
                log::trace!("erase_history: destroyed tombstoned vertex {v:?}");
            }
        }
        self.bundle.reset(start, self.base.graph_prop().clone());
        self.current_rev = start;
        log::debug!("erase_history: compacted to baseline");
        self.debug_assert_invariants();
    }

    /// Shared tail of undo and revert: pop ledger entries at or past
    /// `floor`, destroying drained entities and writing surviving top
    /// values back into the live graph. Physical (unfiltered) walk —
    /// tombstoned entities must be reachable.
    fn reconcile_to(&mut self, floor: Revision) {
        let edge_keys: Vec<_> = self.edge_data.keys().copied().sorted().collect();
        for key in edge_keys {
            let hist = self
                .edge_data
                .get_mut(&key)
                .expect("edge key just enumerated");
            match reconcile_ledger(hist, floor) {
                Reconciled::Destroy { was_visible } => {
                    if was_visible {
                        self.note_edge_gone(key);
                    }
                    self.edge_data.remove(&key);
                    self.base.remove_edge(key.id);
                    log::trace!("reconcile: destroyed edge {key:?}");
                }
                Reconciled::Restored {
                    value,
                    was_visible,
                    now_visible,
                } => {
                    if now_visible {
                        *self
                            .base
                            .edge_prop_mut(key.id)
                            .expect("physically present edge missing from base graph") = value;
                    }
                    if now_visible && !was_visible {
                        self.note_edge_alive(key);
                        log::trace!("reconcile: resurrected edge {key:?}");
                    } else if !now_visible && was_visible {
                        self.note_edge_gone(key);
                    }
                }
            }
        }
        let vertex_ids: Vec<_> = self.vertex_data.keys().copied().sorted().collect();
        for v in vertex_ids {
            let hist = &mut self
                .vertex_data
                .get_mut(&v)
                .expect("vertex id just enumerated")
                .history;
            match reconcile_ledger(hist, floor) {
                Reconciled::Destroy { was_visible } => {
                    self.vertex_data.remove(&v);
                    self.base.remove_vertex(v);
                    if was_visible {
                        self.note_vertex_gone();
                    }
                    log::trace!("reconcile: destroyed vertex {v:?}");
                }
                Reconciled::Restored {
                    value,
                    was_visible,
                    now_visible,
                } => {
                    if now_visible {
                        *self
                            .base
                            .vertex_prop_mut(v)
                            .expect("physically present vertex missing from base graph") = value;
                    }
                    if now_visible && !was_visible {
                        self.note_vertex_alive();
                        log::trace!("reconcile: resurrected vertex {v:?}");
                    } else if !now_visible && was_visible {
                        self.note_vertex_gone();
                    }
                }
            }
        }
    }

    /// Write the surviving bundle value back into the live graph-wide slot.
    fn restore_graph_value(&mut self, floor: Revision) {
        let restored = self
            .bundle
            .trim_to(floor)
            .expect("bundle track is never empty")
            .clone();
        *self.base.graph_prop_mut() = restored;
    }
}
