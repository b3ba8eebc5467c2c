//! The tie-broken total order used throughout the BBLL and the BMSSP recursor.
//!
//! The original algorithm packs `(dist, pred, vertex)` into a single scalar
//! using a multiplier derived from the graph size. That's fragile: it loses
//! precision once `N` grows large enough that the multiplier and the
//! distance's own magnitude collide. `Key<W>` keeps the triple explicit and
//! orders lexicographically on it directly, which is both exact and cheap.

use num_traits::{Float, Zero};
use std::cmp::Ordering;
use std::fmt::Debug;

/// Total-order key `κ(v) = (dist[v], pred[v], v)`.
///
/// `pred = None` only ever occurs for the source vertex, and it must sort
/// before every `Some(_)` predecessor at the same distance: the source is
/// reached "for free", so nothing should tie-break ahead of it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Key<W> {
    pub dist: W,
    pub pred: Option<usize>,
    pub vertex: usize,
}

impl<W> Key<W>
where
    W: Float + Zero + Debug + Copy,
{
    pub fn new(dist: W, pred: Option<usize>, vertex: usize) -> Self {
        Key { dist, pred, vertex }
    }

    /// The sentinel key used as the outer boundary `B` for a top-level run:
    /// distance `+inf`, no predecessor, no vertex identity that could ever
    /// tie-break below a real entry.
    pub fn sentinel() -> Self {
        Key {
            dist: W::infinity(),
            pred: None,
            vertex: usize::MAX,
        }
    }
}

impl<W: PartialOrd> PartialOrd for Key<W> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<W: PartialOrd> Ord for Key<W> {
    fn cmp(&self, other: &Self) -> Ordering {
        match self.dist.partial_cmp(&other.dist) {
            Some(Ordering::Equal) | None => {}
            Some(ord) => return ord,
        }
        match (self.pred, other.pred) {
            (None, None) => {}
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
            (Some(a), Some(b)) => {
                if a != b {
                    return a.cmp(&b);
                }
            }
        }
        self.vertex.cmp(&other.vertex)
    }
}
