//! Pivot Finder (C5): bounded k-round relaxation that either bails out with
//! a growth-limited frontier or narrows `S` down to the subset whose
//! shortest-path-forest subtree is large enough to justify recursion.
//!
//! Grounded on `BMSSP.find_pivots` in the original source
//! (`BMSSP_algorithm/data_structures/BMSSP.py`): the k-round relaxation
//! loop, the growth-limit early return, and the "roots of the forest that
//! land in S with subtree size >= k" pivot rule all follow it directly.
//! The original's forest is rebuilt from a fresh `children` map computed
//! from `dist`/`pred` after relaxation; this keeps that approach rather
//! than re-deriving parent links from `pred` alone, since a vertex can
//! have multiple valid shortest-path children only reachable via the
//! neighbor scan.

use num_traits::{Float, Zero};
use std::collections::{HashMap, HashSet, VecDeque};
use std::fmt::Debug;

use crate::graph::Graph;
use crate::key::Key;

/// Runs the bounded relaxation and pivot selection described in spec.md
/// §4.5. `dist`/`pred` are the run's shared tables; this mutates them in
/// place exactly as a BMSSP relaxation step would.
///
/// Returns `(P, W)`: `P` is the pivot subset of `seeds` whose recursion is
/// worth pursuing, `W` is the vertex set explored/finalised at this level.
pub fn find_pivots<W, G>(
    graph: &G,
    b: Key<W>,
    seeds: &[usize],
    dist: &mut [W],
    pred: &mut [Option<usize>],
    k: usize,
) -> (Vec<usize>, HashSet<usize>)
where
    W: Float + Zero + Debug + Copy,
    G: Graph<W>,
{
    let mut w_set: HashSet<usize> = seeds.iter().copied().collect();
    let mut frontier: Vec<usize> = seeds.to_vec();
    let growth_limit = k.max(1) * seeds.len().max(1);

    for _ in 0..k.max(1) {
        if frontier.is_empty() {
            break;
        }
        let mut next_frontier = Vec::new();

        for &u in &frontier {
            let dist_u = dist[u];
            for (v, weight) in graph.outgoing_edges(u) {
                let alt = dist_u + weight;
                let new_key = Key::new(alt, Some(u), v);
                let old_key = Key::new(dist[v], pred[v], v);

                if new_key < old_key {
                    dist[v] = alt;
                    pred[v] = Some(u);

                    if new_key < b && w_set.insert(v) {
                        next_frontier.push(v);
                    }
                }
            }
        }

        if w_set.len() > growth_limit {
            return (seeds.to_vec(), w_set);
        }

        frontier = next_frontier;
    }

    build_pivots_from_forest(graph, seeds, dist, &w_set, k)
}

/// Builds the shortest-path forest within `w_set` (spec.md §4.5 step 3),
/// computes each root's BFS subtree size, and returns the seeds whose
/// subtree reaches size `>= k`.
fn build_pivots_from_forest<W, G>(
    graph: &G,
    seeds: &[usize],
    dist: &[W],
    w_set: &HashSet<usize>,
    k: usize,
) -> (Vec<usize>, HashSet<usize>)
where
    W: Float + Zero + Debug + Copy,
    G: Graph<W>,
{
    let mut children: HashMap<usize, Vec<usize>> = w_set.iter().map(|&u| (u, Vec::new())).collect();
    let mut has_parent: HashSet<usize> = HashSet::new();

    for &u in w_set {
        let dist_u = dist[u];
        for (v, weight) in graph.outgoing_edges(u) {
            if w_set.contains(&v) && dist[v] == dist_u + weight {
                children.get_mut(&u).unwrap().push(v);
                has_parent.insert(v);
            }
        }
    }

    let roots: Vec<usize> = w_set
        .iter()
        .copied()
        .filter(|v| !has_parent.contains(v))
        .collect();

    let mut subtree_size: HashMap<usize, usize> = HashMap::new();
    for &root in &roots {
        let mut size = 0usize;
        let mut queue = VecDeque::new();
        queue.push_back(root);
        while let Some(x) = queue.pop_front() {
            size += 1;
            for &child in &children[&x] {
                queue.push_back(child);
            }
        }
        subtree_size.insert(root, size);
    }

    let pivots: Vec<usize> = seeds
        .iter()
        .copied()
        .filter(|s| subtree_size.get(s).is_some_and(|&size| size >= k.max(1)))
        .collect();

    (pivots, w_set.clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::DirectedGraph;
    use ordered_float::OrderedFloat;

    type F = OrderedFloat<f64>;

    fn lit(v: f64) -> F {
        OrderedFloat(v)
    }

    fn chain(n: usize) -> DirectedGraph<F> {
        use crate::graph::MutableGraph;
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
    fn single_seed_on_a_chain_finds_itself_as_pivot() {
        let g = chain(6);
        let mut dist = vec![lit(f64::INFINITY); 6];
        let mut pred = vec![None; 6];
        dist[0] = lit(0.0);

        let (pivots, w) = find_pivots(&g, Key::sentinel(), &[0], &mut dist, &mut pred, 2);
        assert!(w.contains(&0));
        assert!(pivots.contains(&0) || w.len() > 2 * 2);
    }

    #[test]
    fn growth_limit_returns_all_seeds_as_pivots() {
        // Star graph: one seed with many neighbors blows past k*|S| quickly.
        use crate::graph::MutableGraph;
        let mut g = DirectedGraph::new();
        for _ in 0..20 {
            g.add_vertex();
        }
        for v in 1..20 {
            g.add_edge(0, v, lit(1.0));
        }
        let mut dist = vec![lit(f64::INFINITY); 20];
        let mut pred = vec![None; 20];
        dist[0] = lit(0.0);

        let (pivots, w) = find_pivots(&g, Key::sentinel(), &[0], &mut dist, &mut pred, 2);
        assert_eq!(pivots, vec![0]);
        assert!(w.len() > 2);
    }

    #[test]
    fn unreachable_seed_yields_empty_work_set_beyond_itself() {
        use crate::graph::MutableGraph;
        let mut g = DirectedGraph::new();
        for _ in 0..3 {
            g.add_vertex();
        }
        let mut dist = vec![lit(f64::INFINITY); 3];
        let mut pred = vec![None; 3];
        dist[0] = lit(0.0);

        let (_, w) = find_pivots(&g, Key::sentinel(), &[0], &mut dist, &mut pred, 2);
        assert_eq!(w, [0].into_iter().collect());
    }
}
