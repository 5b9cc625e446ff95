//! `Revision`: a logical timestamp with a tombstone sign
//!
//! A [`Revision`] identifies a point in the commit history of a
//! [`VersionedGraph`](crate::versioned::VersionedGraph). Revisions order and
//! compare by **magnitude**: `Revision(-3)` and `Revision(3)` name the same
//! point in time, but the negative sign marks a *tombstone* — the entity the
//! entry belongs to was deleted as of that revision.
//!
//! The distinguished start value is 1 ("before the first commit"). The first
//! `commit()` advances the container to 2; undo never goes below 2, so the
//! baseline commit is permanent.

use std::cmp::Ordering;
use std::fmt;

/// Logical timestamp in a versioned graph's history.
///
/// # Ordering
/// All comparisons go through [`Revision::magnitude`], so a tombstone
/// compares equal to its live counterpart:
///
/// ```rust
/// use graph_rewind::history::Revision;
/// let r = Revision::start().succ(); // revision 2
/// assert_eq!(r, r.tombstone());
/// assert!(Revision::start() < r.tombstone());
/// ```
#[derive(Copy, Clone, serde::Serialize, serde::Deserialize)]
#[repr(transparent)]
pub struct Revision(i64);

impl Revision {
    /// The distinguished start revision, 1.
    #[inline]
    pub const fn start() -> Self {
        Revision(1)
    }

    /// Raw signed value. Negative means tombstone.
    #[inline]
    pub const fn value(self) -> i64 {
        self.0
    }

    /// Absolute magnitude, the point in time this revision names.
    #[inline]
    pub const fn magnitude(self) -> i64 {
        self.0.abs()
    }

    /// Whether this revision marks a deletion.
    #[inline]
    pub const fn is_tombstone(self) -> bool {
        self.0 < 0
    }

    /// The next revision.
    ///
    /// # Panics
    /// Panics if called on a tombstone; only live revision counters advance.
    #[inline]
    pub fn succ(self) -> Self {
        assert!(self.0 > 0, "succ() on a tombstone revision {self:?}");
        Revision(self.0 + 1)
    }

    /// The previous revision.
    ///
    /// # Panics
    /// Panics on a tombstone or at the floor of 1. The public undo operation
    /// clamps before calling this; hitting the assert is a caller bug.
    #[inline]
    pub fn pred(self) -> Self {
        assert!(self.0 > 1, "pred() below the revision floor at {self:?}");
        Revision(self.0 - 1)
    }

    /// The tombstone counterpart of this revision (sign flipped).
    #[inline]
    pub const fn tombstone(self) -> Self {
        Revision(-self.0)
    }
}

impl Default for Revision {
    fn default() -> Self {
        Revision::start()
    }
}

impl PartialEq for Revision {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.magnitude() == other.magnitude()
    }
}

impl Eq for Revision {}

impl PartialOrd for Revision {
    #[inline]
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Revision {
    #[inline]
    fn cmp(&self, other: &Self) -> Ordering {
        self.magnitude().cmp(&other.magnitude())
    }
}

impl fmt::Debug for Revision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Revision").field(&self.0).finish()
    }
}

/// Prints the signed value; `-r` reads as "deleted at r".
impl fmt::Display for Revision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
