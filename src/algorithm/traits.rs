use crate::graph::Graph;
use crate::Result;
use num_traits::{Float, Zero};
use std::fmt::Debug;

/// Result of a shortest path algorithm execution.
#[derive(Debug, Clone)]
pub struct ShortestPathResult<W>
where
    W: Float + Zero + Debug + Copy,
{
    /// Distances from source to each vertex, `None` if unreachable.
    pub distances: Vec<Option<W>>,

    /// Predecessor vertices in the shortest path tree, `None` for the
    /// source and unreachable vertices.
    pub predecessors: Vec<Option<usize>>,

    /// Source vertex ID.
    pub source: usize,
}

/// A shortest-path algorithm over a [`Graph`], per spec.md §6's "caller
/// invokes the core by constructing a Graph adapter, picking a source
/// vertex, and reading `dist`/`pred`" contract.
pub trait ShortestPathAlgorithm<W, G>
where
    W: Float + Zero + Debug + Copy,
    G: Graph<W>,
{
    /// Compute shortest paths from a source vertex to all other vertices.
    fn compute_shortest_paths(&self, graph: &G, source: usize) -> Result<ShortestPathResult<W>>;

    /// Name of the algorithm, for diagnostics.
    fn name(&self) -> &'static str;

    /// Reconstructs the path from `result.source` to `target` by walking
    /// `predecessors` backward. Returns `None` if `target` is unreachable
    /// or the predecessor chain is broken or cyclic.
    fn get_path(&self, result: &ShortestPathResult<W>, target: usize) -> Option<Vec<usize>> {
        if target >= result.predecessors.len() || result.distances[target].is_none() {
            return None;
        }

        let mut path = Vec::new();
        let mut current = target;
        let mut visited = std::collections::HashSet::new();

        while current != result.source {
            if !visited.insert(current) {
                log::warn!("get_path: cycle detected in predecessor chain at vertex {}", current);
                return None;
            }

            path.push(current);
            match result.predecessors[current] {
                Some(pred) if pred != current => current = pred,
                Some(_) => break,
                None => return None,
            }
        }

        path.push(result.source);
        path.reverse();
        Some(path)
    }
}
