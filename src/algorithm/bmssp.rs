//! BMSSP Recursor (C6): the recursive bounded multi-source shortest-path
//! driver (spec.md §4.6). Owns no state of its own beyond the shared
//! `dist`/`pred` tables passed in by the caller — one fresh [`BlockLinkedList`]
//! per recursive frame, discarded on return, per spec.md §5's resource
//! policy.
//!
//! Grounded directly on `BMSSP.bmssp`/`BMSSP.base_case` in the original
//! source (`BMSSP_algorithm/data_structures/BMSSP.py`): the pivot-insert,
//! pull/recurse/relax/batch_prepend loop, the fixed-point guard, and the
//! base case's bounded-Dijkstra-stops-at-`k+1` shape all follow it line for
//! line, with the float-multiplier tie-break replaced by [`Key`] per
//! spec.md §9's design note.

use num_traits::{Float, Zero};
use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashSet};
use std::fmt::Debug;

use super::params::BmsspParams;
use super::pivot::find_pivots;
use super::traits::{ShortestPathAlgorithm, ShortestPathResult};
use crate::data_structures::BlockLinkedList;
use crate::graph::Graph;
use crate::key::Key;
use crate::{Error, Result};

/// Recursive bounded multi-source shortest-path step: `bmssp(l, B, S) ->
/// (B', U)` (spec.md §4.6). `dist`/`pred` are the run's shared tables,
/// mutated in place; `graph` is borrowed read-only for the whole run.
pub fn bmssp<W, G>(
    graph: &G,
    params: &BmsspParams,
    level: usize,
    b: Key<W>,
    sources: &[usize],
    dist: &mut [W],
    pred: &mut [Option<usize>],
) -> (Key<W>, Vec<usize>)
where
    W: Float + Zero + Debug + Copy,
    G: Graph<W>,
{
    if level == 0 {
        debug_assert_eq!(sources.len(), 1, "base case requires a singleton source set");
        return base_case(graph, params.k, b, sources[0], dist, pred);
    }

    let (pivots, w_set) = find_pivots(graph, b, sources, dist, pred, params.k);

    let block_cap = params.block_cap(level);
    let mut d: BlockLinkedList<W> = BlockLinkedList::new(block_cap, b, dist.len());

    for &x in &pivots {
        d.insert(x, Key::new(dist[x], pred[x], x));
    }

    let mut b_agg = if pivots.is_empty() {
        b
    } else {
        pivots
            .iter()
            .map(|&x| Key::new(dist[x], pred[x], x))
            .min()
            .unwrap()
    };

    let mut u: HashSet<usize> = HashSet::new();
    let threshold = params.u_threshold(level);

    // Fixed-point guard (spec.md Open Question #1): the original breaks the
    // inner loop when `(Si, Bi, Ui, Bi')` repeats across iterations. Kept as
    // a safety net against non-progress; occurrences are logged, not just
    // silently swallowed.
    let mut prev_tuple: Option<(Vec<usize>, Key<W>, Vec<usize>, Key<W>)> = None;

    while u.len() < threshold && !d.is_empty() {
        let (s_i, b_i) = d.pull();
        if s_i.is_empty() {
            break;
        }

        let (b_i_prime, u_i) = bmssp(graph, params, level - 1, b_i, &s_i, dist, pred);

        if b_i_prime < b_agg {
            b_agg = b_i_prime;
        }

        let mut s_i_sorted = s_i.clone();
        s_i_sorted.sort_unstable();
        let mut u_i_sorted = u_i.clone();
        u_i_sorted.sort_unstable();

        if let Some((ps, pb, pu, pbp)) = &prev_tuple {
            if *ps == s_i_sorted && *pb == b_i && *pu == u_i_sorted && *pbp == b_i_prime {
                log::warn!(
                    "bmssp: fixed-point guard fired at level {} (|S|={}, B={:?}); stopping inner loop",
                    level,
                    s_i.len(),
                    b_i
                );
                break;
            }
        }
        prev_tuple = Some((s_i_sorted, b_i, u_i_sorted, b_i_prime));

        u.extend(u_i.iter().copied());

        let mut k_batch: Vec<(usize, Key<W>)> = Vec::new();

        for &uu in &u_i {
            let dist_u = dist[uu];
            let edges: Vec<(usize, W)> = graph.outgoing_edges(uu).collect();
            for (v, weight) in edges {
                let alt = dist_u + weight;
                let new_key = Key::new(alt, Some(uu), v);
                let old_key = Key::new(dist[v], pred[v], v);

                if new_key < old_key {
                    dist[v] = alt;
                    pred[v] = Some(uu);

                    if b_i <= new_key && new_key < b {
                        d.insert(v, new_key);
                    } else if b_i_prime <= new_key && new_key < b_i {
                        k_batch.push((v, new_key));
                    }
                }
            }
        }

        for &x in &s_i {
            let kx = Key::new(dist[x], pred[x], x);
            if b_i_prime <= kx && kx < b_i {
                k_batch.push((x, kx));
            }
        }

        d.batch_prepend(k_batch);
    }

    let b_prime = if b_agg < b { b_agg } else { b };

    let mut u_final: HashSet<usize> = u;
    for &x in &w_set {
        let kx = Key::new(dist[x], pred[x], x);
        if kx < b_prime {
            u_final.insert(x);
        }
    }

    (b_prime, u_final.into_iter().collect())
}

/// Base case (spec.md §4.6, `l = 0`): bounded Dijkstra from the singleton
/// source, ordered by `κ`, stopping once `k + 1` vertices have been
/// finalised (or the queue empties).
fn base_case<W, G>(
    graph: &G,
    k: usize,
    b: Key<W>,
    source: usize,
    dist: &mut [W],
    pred: &mut [Option<usize>],
) -> (Key<W>, Vec<usize>)
where
    W: Float + Zero + Debug + Copy,
    G: Graph<W>,
{
    let mut heap: BinaryHeap<Reverse<Key<W>>> = BinaryHeap::new();
    heap.push(Reverse(Key::new(dist[source], pred[source], source)));

    let mut finalized: Vec<usize> = Vec::new();
    let mut visited: HashSet<usize> = HashSet::new();

    while finalized.len() < k + 1 {
        let Some(Reverse(cur_key)) = heap.pop() else {
            break;
        };
        let u = cur_key.vertex;
        if visited.contains(&u) {
            continue;
        }
        // Stale heap entry: a better key has since been recorded for `u`.
        if Key::new(dist[u], pred[u], u) != cur_key {
            continue;
        }

        visited.insert(u);
        finalized.push(u);

        for (v, weight) in graph.outgoing_edges(u) {
            let alt = dist[u] + weight;
            let new_key = Key::new(alt, Some(u), v);
            let old_key = Key::new(dist[v], pred[v], v);

            if new_key < old_key && new_key < b {
                dist[v] = alt;
                pred[v] = Some(u);
                heap.push(Reverse(new_key));
            }
        }
    }

    if finalized.len() <= k {
        return (b, finalized);
    }

    let b_prime = finalized
        .iter()
        .map(|&v| Key::new(dist[v], pred[v], v))
        .max()
        .expect("finalized is non-empty here");

    let u: Vec<usize> = finalized
        .into_iter()
        .filter(|&v| Key::new(dist[v], pred[v], v) < b_prime)
        .collect();

    (b_prime, u)
}

/// [`ShortestPathAlgorithm`] wrapper around [`bmssp`] / [`super::sssp::run`],
/// giving BMSSP the same idiomatic entry point the teacher gives `Dijkstra`.
#[derive(Debug, Default)]
pub struct Bmssp;

impl Bmssp {
    pub fn new() -> Self {
        Bmssp
    }
}

impl<W, G> ShortestPathAlgorithm<W, G> for Bmssp
where
    W: Float + Zero + Debug + Copy,
    G: Graph<W>,
{
    fn name(&self) -> &'static str {
        "BMSSP"
    }

    fn compute_shortest_paths(&self, graph: &G, source: usize) -> Result<ShortestPathResult<W>> {
        let n = graph.vertex_count();
        if n == 0 {
            return Err(Error::InvalidInput("graph has zero vertices".into()));
        }
        if source >= n {
            return Err(Error::InvalidInput(format!(
                "source {} out of range [0, {})",
                source, n
            )));
        }
        for v in 0..n {
            for (_, weight) in graph.outgoing_edges(v) {
                if weight < W::zero() {
                    return Err(Error::InvalidInput(format!(
                        "negative edge weight out of vertex {}",
                        v
                    )));
                }
            }
        }

        let mut dist = vec![W::infinity(); n];
        let mut pred: Vec<Option<usize>> = vec![None; n];
        dist[source] = W::zero();

        let params = BmsspParams::derive(n);
        bmssp(graph, &params, params.l0, Key::sentinel(), &[source], &mut dist, &mut pred);

        let distances = dist
            .into_iter()
            .map(|d| if d.is_finite() { Some(d) } else { None })
            .collect();

        Ok(ShortestPathResult {
            distances,
            predecessors: pred,
            source,
        })
    }
}
