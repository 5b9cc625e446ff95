//! Compacted history for one graph-wide attribute.
//!
//! Unlike the per-entity ledgers, the bundle track records a new entry only
//! when the value actually changed since the previously recorded one, so a
//! run of commits with an unchanged graph-wide value collapses into a single
//! entry.

use crate::history::entry::HistoryEntry;
use crate::history::revision::Revision;
use crate::rewind_error::RewindError;

/// Change-compacted `(Revision, value)` track for a graph-wide attribute.
///
/// The constructor seeds the track, so [`BundleHistory::latest`] only fails
/// if the track was manually drained — which no public operation does.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BundleHistory<T> {
    entries: Vec<HistoryEntry<T>>,
}

impl<T: Clone + PartialEq> BundleHistory<T> {
    /// Track seeded with `value` at `rev`.
    pub fn seeded(rev: Revision, value: T) -> Self {
        Self {
            entries: vec![HistoryEntry { rev, value }],
        }
    }

    /// Record `value` at `rev` unless it equals the last recorded value.
    ///
    /// A change within the same revision overwrites the top entry rather
    /// than stacking a second entry at the same magnitude.
    pub fn record(&mut self, rev: Revision, value: &T) {
        enum Action {
            Skip,
            Overwrite,
            Push,
        }
        let action = match self.entries.last() {
            Some(top) if top.value == *value => Action::Skip,
            Some(top) if top.rev.magnitude() == rev.magnitude() => Action::Overwrite,
            Some(top) => {
                debug_assert!(
                    top.rev.magnitude() < rev.magnitude(),
                    "bundle record out of order at {rev:?}"
                );
                Action::Push
            }
            None => Action::Push,
        };
        match action {
            Action::Skip => {}
            Action::Overwrite => {
                if let Some(top) = self.entries.last_mut() {
                    top.value = value.clone();
                }
            }
            Action::Push => self.entries.push(HistoryEntry {
                rev,
                value: value.clone(),
            }),
        }
    }

    /// The last recorded value.
    pub fn latest(&self) -> Result<&T, RewindError> {
        self.entries
            .last()
            .map(|e| &e.value)
            .ok_or(RewindError::EmptyHistory("latest of bundle history"))
    }

    /// Discard entries recorded at or after `rev` (by magnitude), then
    /// return the surviving latest value.
    pub fn trim_to(&mut self, rev: Revision) -> Result<&T, RewindError> {
        while self
            .entries
            .last()
            .map_or(false, |top| top.rev.magnitude() >= rev.magnitude())
        {
            // Never drain below the seed entry.
            if self.entries.len() == 1 {
                break;
            }
            self.entries.pop();
        }
        self.latest()
    }

    /// Clear the track and re-seed it with `value` at `rev`.
    pub fn reset(&mut self, rev: Revision, value: T) {
        self.entries.clear();
        self.entries.push(HistoryEntry { rev, value });
    }

    /// Number of recorded entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
