//! Directedness categories for base graphs.
//!
//! A base graph's directedness is fixed at construction and decides which
//! degree counters the versioned layer maintains: out-degree always,
//! in-degree additionally for bidirectional graphs. The category is carried
//! by a marker type so each graph variant is a distinct generic
//! instantiation, selected once per graph instance rather than per call.

/// Runtime view of a graph's directedness category.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum Directedness {
    /// Edges have no orientation; `out_edges` enumerates all incident edges
    /// and both endpoints share the single "out" degree counter.
    Undirected,
    /// Edges are oriented; only out-edges are enumerable and only out-degree
    /// is tracked.
    Directed,
    /// Edges are oriented and in-edges are enumerable; both degree counters
    /// are tracked.
    Bidirectional,
}

impl Directedness {
    /// Whether the versioned layer maintains an in-degree counter.
    #[inline]
    pub const fn tracks_in_degree(self) -> bool {
        matches!(self, Directedness::Bidirectional)
    }

    /// Whether in-edge enumeration is part of the capability set.
    #[inline]
    pub const fn has_in_edges(self) -> bool {
        matches!(self, Directedness::Bidirectional)
    }

    /// Whether edges carry an orientation at all.
    #[inline]
    pub const fn is_directed(self) -> bool {
        !matches!(self, Directedness::Undirected)
    }
}

/// Marker trait fixing a [`Directedness`] per graph type.
pub trait Direction: Copy + Clone + std::fmt::Debug + Default + 'static {
    const KIND: Directedness;
}

/// Marker for undirected graphs.
#[derive(Copy, Clone, Debug, Default)]
pub struct Undirected;

/// Marker for directed graphs without in-edge enumeration.
#[derive(Copy, Clone, Debug, Default)]
pub struct Directed;

/// Marker for directed graphs with in-edge enumeration.
#[derive(Copy, Clone, Debug, Default)]
pub struct Bidirectional;

impl Direction for Undirected {
    const KIND: Directedness = Directedness::Undirected;
}

impl Direction for Directed {
    const KIND: Directedness = Directedness::Directed;
}

impl Direction for Bidirectional {
    const KIND: Directedness = Directedness::Bidirectional;
}
