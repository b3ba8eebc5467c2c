//! Top-level entry point (spec.md §4.6 "Top-level run" / §7 `run()`
//! contract): derive `k`, `t`, `l0` from the graph and invoke
//! `bmssp(l0, +inf, {source})`.
//!
//! This is the literal, `bool`-returning shape spec.md §7 specifies
//! ("`run()` returns `false` on `InvalidInput`, leaves `dist`/`pred` empty
//! or unchanged. On success returns `true`"). [`Bmssp`](super::bmssp::Bmssp)
//! wraps this in the teacher's `ShortestPathAlgorithm`/`Result` idiom for
//! callers that want the richer error type instead.

use num_traits::{Float, Zero};
use std::fmt::Debug;

use super::bmssp::bmssp;
use super::params::BmsspParams;
use crate::graph::Graph;
use crate::key::Key;

/// Runs BMSSP from `source` over `graph`, writing shortest-path distances
/// into `dist` (`+inf` sentinel for unreached vertices) and predecessors
/// into `pred` (`None` for the source and unreached vertices).
///
/// Returns `false` on invalid input (negative edge weight, out-of-range
/// source, or an empty graph) without mutating `dist`/`pred`; returns
/// `true` with both fully populated otherwise.
pub fn run<W, G>(
    graph: &G,
    source: usize,
    dist: &mut Vec<W>,
    pred: &mut Vec<Option<usize>>,
) -> bool
where
    W: Float + Zero + Debug + Copy,
    G: Graph<W>,
{
    let n = graph.vertex_count();
    if n == 0 || source >= n {
        return false;
    }
    for v in 0..n {
        for (_, weight) in graph.outgoing_edges(v) {
            if weight < W::zero() {
                return false;
            }
        }
    }

    *dist = vec![W::infinity(); n];
    *pred = vec![None; n];
    dist[source] = W::zero();

    let params = BmsspParams::derive(n);
    bmssp(
        graph,
        &params,
        params.l0,
        Key::sentinel(),
        &[source],
        dist,
        pred,
    );

    true
}
