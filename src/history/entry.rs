//! Per-entity history ledger.
//!
//! Every vertex and edge in a versioned graph carries an [`EntityHistory`]:
//! an append-mostly LIFO of [`HistoryEntry`] records. The top entry is the
//! single source of truth for "value as of the current revision"; an entity
//! is *visible* iff the top entry is not a tombstone, and *physically exists*
//! iff the history is non-empty.
//!
//! Only the top matters for live reads and only a bounded prefix is ever
//! popped (one undo step at a time), so no ordering search is needed.

use crate::history::revision::Revision;
use crate::rewind_error::RewindError;

/// One recorded state: the revision it was recorded at and the value then.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HistoryEntry<T = ()> {
    pub rev: Revision,
    pub value: T,
}

/// Append-mostly stack of `(Revision, value)` records for one entity.
///
/// Entries read top to bottom have strictly decreasing revision magnitude.
/// The default payload `()` covers entity types that carry no property; the
/// ledger then stores bare revisions through the same generic path.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EntityHistory<T = ()> {
    entries: Vec<HistoryEntry<T>>,
}

impl<T> EntityHistory<T> {
    /// Empty ledger; an entity with an empty ledger does not physically exist.
    #[inline]
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Ledger with a single creation entry.
    #[inline]
    pub fn with_creation(rev: Revision, value: T) -> Self {
        Self {
            entries: vec![HistoryEntry { rev, value }],
        }
    }

    /// Push a new top entry.
    ///
    /// The caller guarantees strictly increasing magnitude vs. the current
    /// top; the ledger checks it in debug builds.
    #[inline]
    pub fn push(&mut self, rev: Revision, value: T) {
        debug_assert!(
            self.entries
                .last()
                .map_or(true, |top| top.rev.magnitude() < rev.magnitude()),
            "history push out of order: {:?} on top of {:?}",
            rev,
            self.entries.last().map(|e| e.rev),
        );
        self.entries.push(HistoryEntry { rev, value });
    }

    /// Most recent entry.
    #[inline]
    pub fn top(&self) -> Result<&HistoryEntry<T>, RewindError> {
        self.entries
            .last()
            .ok_or(RewindError::EmptyHistory("top of entity history"))
    }

    /// Mutable access to the most recent entry.
    ///
    /// Used by commit to fold a same-revision change into the creation entry
    /// instead of stacking a second entry at the same magnitude.
    #[inline]
    pub fn top_mut(&mut self) -> Result<&mut HistoryEntry<T>, RewindError> {
        self.entries
            .last_mut()
            .ok_or(RewindError::EmptyHistory("top of entity history"))
    }

    /// Remove and return the most recent entry.
    #[inline]
    pub fn pop(&mut self) -> Result<HistoryEntry<T>, RewindError> {
        self.entries
            .pop()
            .ok_or(RewindError::EmptyHistory("pop of entity history"))
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of recorded states, the ledger depth.
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the entity is visible: non-empty and not tombstoned on top.
    #[inline]
    pub fn is_visible(&self) -> bool {
        self.entries
            .last()
            .map_or(false, |top| !top.rev.is_tombstone())
    }

    /// Entries newest-first, for diagnostics and invariant validation.
    #[inline]
    pub fn iter_newest_first(&self) -> impl Iterator<Item = &HistoryEntry<T>> {
        self.entries.iter().rev()
    }

    /// Drop every entry, leaving the ledger empty.
    #[inline]
    pub(crate) fn clear(&mut self) {
        self.entries.clear();
    }
}
