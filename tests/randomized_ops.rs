//! Randomized operation sequences must keep every structural invariant.

use graph_rewind::prelude::*;
use itertools::Itertools;
use proptest::prelude::*;

type RGraph = VersionedGraph<InMemoryGraph<Undirected, u8, u8>>;

#[derive(Debug, Clone)]
enum Op {
    AddVertex(u8),
    AddEdge(usize, usize, u8),
    RemoveEdge(usize),
    DropVertex(usize),
    Commit,
    Undo,
    Revert,
    Erase,
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        3 => any::<u8>().prop_map(Op::AddVertex),
        4 => (any::<usize>(), any::<usize>(), any::<u8>())
            .prop_map(|(u, v, p)| Op::AddEdge(u, v, p)),
        2 => any::<usize>().prop_map(Op::RemoveEdge),
        1 => any::<usize>().prop_map(Op::DropVertex),
        2 => Just(Op::Commit),
        1 => Just(Op::Undo),
        1 => Just(Op::Revert),
        1 => Just(Op::Erase),
    ]
}

fn apply(g: &mut RGraph, op: Op) {
    match op {
        Op::AddVertex(p) => {
            g.add_vertex(p);
        }
        Op::AddEdge(ui, vi, p) => {
            let vs: Vec<_> = g.vertices().sorted().collect();
            if !vs.is_empty() {
                let u = vs[ui % vs.len()];
                let v = vs[vi % vs.len()];
                g.add_edge(u, v, p);
            }
        }
        Op::RemoveEdge(i) => {
            let es: Vec<_> = g.edges().sorted().collect();
            if !es.is_empty() {
                g.remove_edge(es[i % es.len()]);
            }
        }
        Op::DropVertex(i) => {
            let vs: Vec<_> = g.vertices().sorted().collect();
            if !vs.is_empty() {
                let v = vs[i % vs.len()];
                g.clear_vertex(v);
                g.remove_vertex(v);
            }
        }
        Op::Commit => g.commit(),
        Op::Undo => {
            g.undo_commit();
        }
        Op::Revert => g.revert_uncommitted(),
        Op::Erase => g.erase_history(),
    }
}

proptest! {
    #[test]
    fn random_sequences_hold_invariants(ops in proptest::collection::vec(op_strategy(), 1..60)) {
        let mut g = RGraph::new();
        for op in ops {
            apply(&mut g, op);

            prop_assert!(g.validate_invariants().is_ok());
            prop_assert_eq!(g.num_vertices(), g.vertices().count());
            prop_assert_eq!(g.num_edges(), g.edges().count());
            for v in g.vertices().collect::<Vec<_>>() {
                prop_assert_eq!(
                    g.out_degree(v).unwrap(),
                    g.out_edges(v).unwrap().count()
                );
            }
        }
    }

    #[test]
    fn commit_then_undo_restores_the_precommit_state(
        ops in proptest::collection::vec(op_strategy(), 1..40),
        edits in proptest::collection::vec(op_strategy(), 0..10),
    ) {
        let mut g = RGraph::new();
        for op in ops {
            apply(&mut g, op);
        }
        g.commit();

        let vertices_before: Vec<_> = g.vertices().sorted().collect();
        let edges_before: Vec<_> = g.edges().sorted().collect();
        let rev_before = g.current_rev();

        // Only mutations: a nested commit/undo/erase would move the
        // baseline this test pins down.
        for op in edits {
            match op {
                Op::Commit | Op::Undo | Op::Revert | Op::Erase => {}
                other => apply(&mut g, other),
            }
        }
        g.commit();
        g.undo_commit();

        prop_assert_eq!(g.current_rev(), rev_before);
        prop_assert_eq!(g.vertices().sorted().collect::<Vec<_>>(), vertices_before);
        prop_assert_eq!(g.edges().sorted().collect::<Vec<_>>(), edges_before);
        prop_assert!(g.validate_invariants().is_ok());
    }
}
