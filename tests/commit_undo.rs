//! Commit/undo/revert scenarios over the versioned container.

use graph_rewind::prelude::*;

type UGraph = VersionedGraph<InMemoryGraph<Undirected, &'static str, &'static str>>;

/// A–B, A–D, C–A, D–C, C–E, B–D, D–E: 7 edges over 5 vertices.
fn pentagon() -> (UGraph, [VertexId; 5]) {
    let mut g = UGraph::new();
    let a = g.add_vertex("a");
    let b = g.add_vertex("b");
    let c = g.add_vertex("c");
    let d = g.add_vertex("d");
    let e = g.add_vertex("e");
    for (u, v, w) in [
        (a, b, "ab"),
        (a, d, "ad"),
        (c, a, "ca"),
        (d, c, "dc"),
        (c, e, "ce"),
        (b, d, "bd"),
        (d, e, "de"),
    ] {
        g.add_edge(u, v, w).unwrap();
    }
    (g, [a, b, c, d, e])
}

#[test]
fn uncommitted_additions_vanish_on_undo() {
    let (mut g, [a, ..]) = pentagon();
    g.commit();
    assert_eq!(g.num_vertices(), 5);
    assert_eq!(g.num_edges(), 7);

    let f = g.add_vertex("f");
    let af = g.add_edge(a, f, "af").unwrap();
    assert_eq!(g.num_vertices(), 6);
    assert_eq!(g.num_edges(), 8);

    // At the floor the revision counter cannot move, but the uncommitted
    // additions are still discarded.
    assert!(!g.undo_commit());
    assert_eq!(g.num_vertices(), 5);
    assert_eq!(g.num_edges(), 7);
    // Never committed: gone entirely, not tombstoned.
    assert!(!g.raw_vertices().any(|v| v == f));
    assert!(!g.raw_edges().any(|k| k == af));
    assert_eq!(g.vertex_history_len(f), Err(RewindError::UnknownVertex(format!("{f:?}"))));
}

#[test]
fn tombstoned_edge_resurrects_with_prior_value() {
    let (mut g, [a, b, ..]) = pentagon();
    g.commit();
    let ab = g
        .edges()
        .find(|k| (k.source, k.target) == (a, b))
        .expect("edge a-b exists");

    g.remove_edge(ab);
    assert_eq!(g.num_edges(), 6);
    g.commit();
    // Tombstoned, not destroyed: ledger depth 2, still physically present.
    assert_eq!(g.edge_history_len(ab), Ok(2));
    assert!(g.raw_edges().any(|k| k == ab));
    assert!(!g.edges().any(|k| k == ab));

    assert!(g.undo_commit());
    assert_eq!(g.num_edges(), 7);
    assert_eq!(g.edge_value(ab), Ok(&"ab"));
}

#[test]
fn undo_floor_keeps_baseline_commit() {
    // Undo clamps at revision 2: the first commit is a permanent baseline
    // and the pre-commit state is not independently recoverable.
    let (mut g, _) = pentagon();
    g.commit();
    assert_eq!(g.current_rev(), Revision::start().succ());
    for _ in 0..3 {
        assert!(!g.undo_commit());
        assert_eq!(g.current_rev(), Revision::start().succ());
        assert_eq!(g.num_vertices(), 5);
        assert_eq!(g.num_edges(), 7);
    }
}

#[test]
fn commit_undo_pair_is_identity_when_quiescent() {
    let (mut g, _) = pentagon();
    g.commit();
    g.commit(); // nothing changed in between
    let rev_before = g.current_rev();
    let before: Vec<_> = {
        let mut v: Vec<_> = g.vertices().collect();
        v.sort();
        v
    };

    g.commit();
    assert!(g.undo_commit());
    assert_eq!(g.current_rev(), rev_before);
    let mut after: Vec<_> = g.vertices().collect();
    after.sort();
    assert_eq!(after, before);
    assert_eq!(g.num_edges(), 7);
}

#[test]
fn revert_after_commit_with_no_changes_is_a_noop() {
    let (mut g, _) = pentagon();
    g.commit();
    let rev = g.current_rev();
    g.revert_uncommitted();
    assert_eq!(g.current_rev(), rev);
    assert_eq!(g.num_vertices(), 5);
    assert_eq!(g.num_edges(), 7);
}

#[test]
fn revert_discards_edits_but_keeps_revision() {
    let (mut g, [a, b, ..]) = pentagon();
    g.commit();
    let rev = g.current_rev();

    *g.vertex_value_mut(a).unwrap() = "changed";
    let ab = g
        .edges()
        .find(|k| (k.source, k.target) == (a, b))
        .unwrap();
    g.remove_edge(ab);
    let f = g.add_vertex("f");
    assert_eq!(g.num_edges(), 6);

    g.revert_uncommitted();
    assert_eq!(g.current_rev(), rev);
    assert_eq!(g.vertex_value(a), Ok(&"a"));
    assert_eq!(g.num_edges(), 7);
    assert!(g.edges().any(|k| k == ab));
    assert!(!g.raw_vertices().any(|v| v == f));
}

#[test]
fn undo_restores_committed_property_values() {
    let mut g = VersionedGraph::<InMemoryGraph<Directed, i32, i32>>::new();
    let a = g.add_vertex(1);
    let b = g.add_vertex(2);
    let e = g.add_edge(a, b, 10).unwrap();
    g.commit();

    *g.vertex_value_mut(a).unwrap() = 100;
    *g.edge_value_mut(e).unwrap() = 1000;
    g.commit();
    assert_eq!(g.current_rev(), Revision::start().succ().succ());
    assert_eq!(g.vertex_history_len(a), Ok(2));
    assert_eq!(g.edge_history_len(e), Ok(2));

    assert!(g.undo_commit());
    assert_eq!(g.vertex_value(a), Ok(&1));
    assert_eq!(g.edge_value(e), Ok(&10));
    assert_eq!(g.vertex_value(b), Ok(&2));
}

#[test]
fn commit_records_only_changed_values() {
    let mut g = VersionedGraph::<InMemoryGraph<Directed, i32, i32>>::new();
    let a = g.add_vertex(1);
    g.commit();
    g.commit();
    g.commit();
    // Unchanged across commits: still a single ledger entry.
    assert_eq!(g.vertex_history_len(a), Ok(1));

    *g.vertex_value_mut(a).unwrap() = 2;
    g.commit();
    assert_eq!(g.vertex_history_len(a), Ok(2));
}

#[test]
fn undo_steps_back_through_multiple_commits() {
    let mut g = VersionedGraph::<InMemoryGraph<Directed, i32, ()>>::new();
    let a = g.add_vertex(0);
    g.commit(); // baseline: a == 0
    for i in 1..=3 {
        *g.vertex_value_mut(a).unwrap() = i;
        g.commit();
    }
    assert_eq!(g.vertex_value(a), Ok(&3));
    assert!(g.undo_commit());
    assert_eq!(g.vertex_value(a), Ok(&2));
    assert!(g.undo_commit());
    assert_eq!(g.vertex_value(a), Ok(&1));
    assert!(g.undo_commit());
    assert_eq!(g.vertex_value(a), Ok(&0));
    // The baseline commit itself is not undoable.
    assert!(!g.undo_commit());
    assert_eq!(g.vertex_value(a), Ok(&0));
}
