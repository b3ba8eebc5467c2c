//! Classic Dijkstra, kept as the correctness oracle for BMSSP (spec.md §1:
//! "Baseline Dijkstra and Bellman-Ford (only relevant as correctness
//! oracles for §8)"). Grounded on the teacher's own `Dijkstra`
//! (`algorithm::dijkstra`), generalised to the crate's current `Error`
//! variants and `BinaryHeapWrapper`.

use num_traits::{Float, Zero};
use std::fmt::Debug;

use crate::algorithm::{ShortestPathAlgorithm, ShortestPathResult};
use crate::data_structures::BinaryHeapWrapper;
use crate::graph::Graph;
use crate::{Error, Result};

/// Textbook Dijkstra over a binary heap, used in tests as the ground truth
/// BMSSP's `dist`/`pred` tables must agree with.
#[derive(Debug, Default)]
pub struct Dijkstra;

impl Dijkstra {
    pub fn new() -> Self {
        Dijkstra
    }
}

impl<W, G> ShortestPathAlgorithm<W, G> for Dijkstra
where
    W: Float + Zero + Debug + Copy + Ord,
    G: Graph<W>,
{
    fn name(&self) -> &'static str {
        "Dijkstra"
    }

    fn compute_shortest_paths(&self, graph: &G, source: usize) -> Result<ShortestPathResult<W>> {
        if !graph.has_vertex(source) {
            return Err(Error::InvalidInput(format!(
                "source {} out of range [0, {})",
                source,
                graph.vertex_count()
            )));
        }
        for v in 0..graph.vertex_count() {
            for (_, weight) in graph.outgoing_edges(v) {
                if weight < W::zero() {
                    return Err(Error::InvalidInput(format!(
                        "negative edge weight out of vertex {}",
                        v
                    )));
                }
            }
        }

        let n = graph.vertex_count();
        let mut distances: Vec<Option<W>> = vec![None; n];
        let mut predecessors: Vec<Option<usize>> = vec![None; n];
        distances[source] = Some(W::zero());

        let mut queue = BinaryHeapWrapper::new();
        queue.push(source, W::zero());

        while let Some((u, dist_u)) = queue.pop() {
            if let Some(current_dist) = distances[u] {
                if current_dist < dist_u {
                    continue;
                }
            }

            for (v, weight) in graph.outgoing_edges(u) {
                let new_dist = dist_u + weight;
                let should_update = match distances[v] {
                    None => true,
                    Some(current_dist) => new_dist < current_dist,
                };
                if should_update {
                    distances[v] = Some(new_dist);
                    predecessors[v] = Some(u);
                    queue.push(v, new_dist);
                }
            }
        }

        Ok(ShortestPathResult {
            distances,
            predecessors,
            source,
        })
    }
}
