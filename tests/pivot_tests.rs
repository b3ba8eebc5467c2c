//! Integration coverage for the pivot finder (spec.md §4.5) through the
//! crate's public surface: `bmssp::algorithm::pivot::find_pivots`.

use bmssp::algorithm::pivot::find_pivots;
use bmssp::graph::MutableGraph;
use bmssp::{DirectedGraph, Key};
use ordered_float::OrderedFloat;

type F = OrderedFloat<f64>;

fn lit(v: f64) -> F {
    OrderedFloat(v)
}

fn chain(n: usize) -> DirectedGraph<F> {
    let mut g = DirectedGraph::new();
    for _ in 0..n {
        g.add_vertex();
    }
    for i in 0..n - 1 {
        g.add_edge(i, i + 1, lit(1.0));
    }
    g
}

#[test]
fn a_long_chain_seed_pulls_in_the_whole_prefix_under_the_bound() {
    let g = chain(10);
    let mut dist = vec![lit(f64::INFINITY); 10];
    let mut pred = vec![None; 10];
    dist[0] = lit(0.0);

    let bound = Key::new(lit(5.0), None, usize::MAX);
    let (_, w) = find_pivots(&g, bound, &[0], &mut dist, &mut pred, 2);

    // Relaxation only admits vertices whose key is strictly below the bound,
    // so only distances 0..5 (vertices 0..=4) should ever enter the work set.
    for v in 0..5 {
        assert!(w.contains(&v), "vertex {} should be within bound", v);
    }
    for v in 5..10 {
        assert!(!w.contains(&v), "vertex {} should stay outside the bound", v);
    }
}

#[test]
fn multiple_seeds_each_with_enough_subtree_are_all_returned_as_pivots() {
    // Two disjoint chains of length >= k rooted at the two seeds.
    let mut g: DirectedGraph<F> = DirectedGraph::new();
    for _ in 0..8 {
        g.add_vertex();
    }
    for (a, b) in [(0, 1), (1, 2), (2, 3), (4, 5), (5, 6), (6, 7)] {
        g.add_edge(a, b, lit(1.0));
    }
    let mut dist = vec![lit(f64::INFINITY); 8];
    let mut pred = vec![None; 8];
    dist[0] = lit(0.0);
    dist[4] = lit(0.0);

    let (pivots, w) = find_pivots(&g, Key::sentinel(), &[0, 4], &mut dist, &mut pred, 3);
    assert!(pivots.contains(&0));
    assert!(pivots.contains(&4));
    assert!(w.len() >= 8);
}

#[test]
fn a_seed_with_no_outgoing_edges_never_becomes_a_pivot() {
    let mut g: DirectedGraph<F> = DirectedGraph::new();
    for _ in 0..3 {
        g.add_vertex();
    }
    let mut dist = vec![lit(f64::INFINITY); 3];
    let mut pred = vec![None; 3];
    dist[1] = lit(0.0);

    let (pivots, w) = find_pivots(&g, Key::sentinel(), &[1], &mut dist, &mut pred, 2);
    assert!(pivots.is_empty());
    assert_eq!(w, [1].into_iter().collect());
}

#[test]
fn dist_and_pred_are_updated_in_place_during_relaxation() {
    let g = chain(4);
    let mut dist = vec![lit(f64::INFINITY); 4];
    let mut pred = vec![None; 4];
    dist[0] = lit(0.0);

    find_pivots(&g, Key::sentinel(), &[0], &mut dist, &mut pred, 2);

    assert_eq!(dist[1], lit(1.0));
    assert_eq!(dist[2], lit(2.0));
    assert_eq!(dist[3], lit(3.0));
    assert_eq!(pred[1], Some(0));
    assert_eq!(pred[2], Some(1));
    assert_eq!(pred[3], Some(2));
}
