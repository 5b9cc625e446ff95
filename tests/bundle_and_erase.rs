//! Graph-wide bundle compaction and history erasure.

use graph_rewind::prelude::*;

type Bundled = VersionedGraph<InMemoryGraph<Undirected, &'static str, &'static str, i32>>;

#[test]
fn bundle_records_only_changes() {
    let mut g = Bundled::new();
    *g.graph_value_mut() = 42;
    g.commit();
    assert_eq!(g.bundle_history_len(), 1);

    // Committing the same value again must not stack a second entry.
    *g.graph_value_mut() = 42;
    g.commit();
    assert_eq!(g.bundle_history_len(), 1);

    *g.graph_value_mut() = 7;
    g.commit();
    assert_eq!(g.bundle_history_len(), 2);
    assert_eq!(*g.graph_value(), 7);
}

#[test]
fn graph_value_follows_undo_and_revert() {
    let mut g = Bundled::new();
    *g.graph_value_mut() = 5;
    g.commit();
    *g.graph_value_mut() = 9;
    g.commit();
    assert_eq!(*g.graph_value(), 9);

    assert!(g.undo_commit());
    assert_eq!(*g.graph_value(), 5);
    assert_eq!(g.bundle_history_len(), 1);

    *g.graph_value_mut() = 7;
    g.revert_uncommitted();
    assert_eq!(*g.graph_value(), 5);
}

#[test]
fn erase_collapses_histories_and_destroys_tombstones() {
    let mut g = Bundled::new();
    let a = g.add_vertex("a");
    let b = g.add_vertex("b");
    let c = g.add_vertex("c");
    let ab = g.add_edge(a, b, "ab").unwrap();
    let bc = g.add_edge(b, c, "bc").unwrap();
    g.commit();

    *g.edge_value_mut(ab).unwrap() = "AB";
    g.commit();
    assert_eq!(g.edge_history_len(ab).unwrap(), 2);

    g.remove_edge(bc);
    g.commit();

    g.erase_history();

    assert_eq!(g.current_rev(), Revision::start());
    assert_eq!(g.num_vertices(), 3);
    assert_eq!(g.num_edges(), 1);
    // The tombstoned edge is physically gone, not just hidden.
    assert_eq!(g.raw_edges().count(), 1);
    assert!(matches!(
        g.edge_history_len(bc),
        Err(RewindError::UnknownEdge(_))
    ));

    // Survivors keep their live values under a single baseline entry.
    assert_eq!(g.edge_history_len(ab).unwrap(), 1);
    assert_eq!(*g.edge_value(ab).unwrap(), "AB");
    for v in [a, b, c] {
        assert_eq!(g.vertex_history_len(v).unwrap(), 1);
    }
    assert_eq!(g.bundle_history_len(), 1);
}

#[test]
fn undo_after_erase_changes_nothing() {
    let mut g = Bundled::new();
    let a = g.add_vertex("a");
    let b = g.add_vertex("b");
    let ab = g.add_edge(a, b, "ab").unwrap();
    *g.graph_value_mut() = 3;
    g.commit();
    *g.graph_value_mut() = 4;
    g.commit();

    g.erase_history();
    assert!(!g.undo_commit());
    assert_eq!(g.num_vertices(), 2);
    assert_eq!(g.num_edges(), 1);
    assert_eq!(*g.edge_value(ab).unwrap(), "ab");
    assert_eq!(*g.graph_value(), 4);
    assert_eq!(g.current_rev(), Revision::start());
}

#[test]
fn undo_before_first_commit_keeps_uncommitted_edits() {
    let mut g = Bundled::new();
    let a = g.add_vertex("a");
    *g.vertex_value_mut(a).unwrap() = "edited";
    *g.graph_value_mut() = 9;

    // Nothing committed yet: a complete no-op, live edits included.
    assert!(!g.undo_commit());
    assert_eq!(g.num_vertices(), 1);
    assert_eq!(*g.vertex_value(a).unwrap(), "edited");
    assert_eq!(*g.graph_value(), 9);
    assert_eq!(g.current_rev(), Revision::start());
}

#[test]
fn undo_after_erase_keeps_subsequent_edits() {
    let mut g = Bundled::new();
    let a = g.add_vertex("a");
    g.commit();
    g.erase_history();

    *g.vertex_value_mut(a).unwrap() = "edited";
    let b = g.add_vertex("b");
    assert!(!g.undo_commit());
    assert_eq!(g.num_vertices(), 2);
    assert!(g.vertices().any(|v| v == b));
    assert_eq!(*g.vertex_value(a).unwrap(), "edited");
}

#[test]
fn erase_preserves_degree_counters() {
    let mut g = Bundled::new();
    let a = g.add_vertex("a");
    let b = g.add_vertex("b");
    let c = g.add_vertex("c");
    g.add_edge(a, b, "ab").unwrap();
    let ac = g.add_edge(a, c, "ac").unwrap();
    g.commit();
    g.remove_edge(ac);
    g.commit();

    g.erase_history();
    assert_eq!(g.out_degree(a).unwrap(), 1);
    assert_eq!(g.out_degree(a).unwrap(), g.out_edges(a).unwrap().count());
}

#[test]
fn commit_after_erase_starts_a_fresh_baseline() {
    let mut g = Bundled::new();
    let a = g.add_vertex("a");
    g.commit();
    g.commit();
    g.erase_history();

    g.commit();
    assert_eq!(g.vertex_history_len(a).unwrap(), 1);
    assert!(!g.undo_commit());
    assert_eq!(g.num_vertices(), 1);
}
