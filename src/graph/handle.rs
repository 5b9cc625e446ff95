//! Strong, zero-cost handles for graph entities.
//!
//! Every vertex and edge held by a base graph is named by an opaque
//! identifier. `VertexId` and `EdgeId` wrap a nonzero `u64` to enforce at
//! compile- and runtime that 0 is reserved as an invalid or sentinel value.
//!
//! For history indexing, an edge's raw handle alone is not enough: some base
//! graphs reuse handles after removal, and parallel edges between the same
//! endpoints must stay distinguishable. [`EdgeKey`] therefore combines the
//! raw handle with both endpoints.

use crate::rewind_error::RewindError;
use std::{fmt, num::NonZeroU64};

/// Opaque identity of a vertex in a base graph.
///
/// # Memory layout
/// `repr(transparent)` over `NonZeroU64`, so `Option<VertexId>` is the same
/// size as `u64`.
#[derive(
    Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize,
)]
#[repr(transparent)]
pub struct VertexId(NonZeroU64);

/// Opaque identity of an edge in a base graph.
#[derive(
    Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize,
)]
#[repr(transparent)]
pub struct EdgeId(NonZeroU64);

impl VertexId {
    /// Creates a new `VertexId` from a raw `u64` value.
    ///
    /// # Panics
    /// Panics if `raw == 0`; 0 is reserved as an invalid or sentinel value.
    #[inline]
    pub fn new(raw: u64) -> Self {
        VertexId(NonZeroU64::new(raw).expect("VertexId must be non-zero"))
    }

    /// Fallible constructor for input that was not validated upstream.
    #[inline]
    pub fn try_new(raw: u64) -> Result<Self, RewindError> {
        NonZeroU64::new(raw)
            .map(VertexId)
            .ok_or(RewindError::InvalidVertexId)
    }

    /// Returns the inner `u64` value.
    #[inline]
    pub const fn get(self) -> u64 {
        self.0.get()
    }
}

impl EdgeId {
    /// Creates a new `EdgeId` from a raw `u64` value.
    ///
    /// # Panics
    /// Panics if `raw == 0`; 0 is reserved as an invalid or sentinel value.
    #[inline]
    pub fn new(raw: u64) -> Self {
        EdgeId(NonZeroU64::new(raw).expect("EdgeId must be non-zero"))
    }

    /// Fallible constructor for input that was not validated upstream.
    #[inline]
    pub fn try_new(raw: u64) -> Result<Self, RewindError> {
        NonZeroU64::new(raw)
            .map(EdgeId)
            .ok_or(RewindError::InvalidEdgeId)
    }

    /// Returns the inner `u64` value.
    #[inline]
    pub const fn get(self) -> u64 {
        self.0.get()
    }
}

impl fmt::Debug for VertexId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("VertexId").field(&self.get()).finish()
    }
}

impl fmt::Display for VertexId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.get())
    }
}

impl fmt::Debug for EdgeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("EdgeId").field(&self.get()).finish()
    }
}

impl fmt::Display for EdgeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.get())
    }
}

/// History-indexing identity of an edge: raw handle plus both endpoints.
///
/// This is the edge handle the versioned layer hands out and accepts back;
/// two parallel edges share endpoints but differ in `id`, and a reused raw
/// handle differs in endpoints.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
pub struct EdgeKey<V, E> {
    pub id: E,
    pub source: V,
    pub target: V,
}

impl<V: fmt::Display, E: fmt::Display> fmt::Display for EdgeKey<V, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({}->{})", self.id, self.source, self.target)
    }
}
