//! BBLL (C4): the two-sequence priority structure the BMSSP recursor pulls
//! work batches from.
//!
//! `D1` holds ordinary `insert`-driven entries, partitioned into blocks
//! bounded above by keys drawn from `D1_bounds`; `D0` holds blocks produced
//! by `batch_prepend`, logically ahead of `D1` in pull order. This mirrors
//! the teacher's `BlockList` (`data_structures::block_list`), which keeps
//! `d0_blocks`/`d1_blocks` plus a `BTreeMap` of upper bounds — generalised
//! here into the explicit two-sequence, two-`OrderedSet` design spec.md §3/§4.4
//! calls for, with entries keyed by the composite [`Key`] rather than a raw
//! priority value.
//!
//! Grounded directly on the original BBLL (`BBLL.py`): `insert`, `delete`,
//! `split`, `batch_prepend`, and `pull` below follow its control flow
//! exactly, including the quickselect-based "M smallest" extraction in
//! `pull` and the prefix-collection-then-overflow-select shape.

use super::block::{Block, EntryArena};
use super::median::quickselect;
use super::ordered_set::OrderedSet;
use crate::key::Key;
use num_traits::{Float, Zero};
use std::collections::HashMap;
use std::fmt::Debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Sequence {
    D0,
    D1,
}

pub struct BlockLinkedList<W> {
    arena: EntryArena<W>,
    d0: HashMap<Key<W>, Block<W>>,
    d1: HashMap<Key<W>, Block<W>>,
    d0_bounds: OrderedSet<Key<W>>,
    d1_bounds: OrderedSet<Key<W>>,
    m: usize,
    b: Key<W>,
}

impl<W> BlockLinkedList<W>
where
    W: Float + Zero + Debug + Copy,
{
    /// `m` is the per-block size cap; `b` is the sentinel outer boundary for
    /// this recursive frame; `vertex_count` sizes the entry arena.
    pub fn new(m: usize, b: Key<W>, vertex_count: usize) -> Self {
        let mut d1 = HashMap::new();
        d1.insert(b, Block::new());
        let mut d1_bounds = OrderedSet::new();
        d1_bounds.insert(b);

        BlockLinkedList {
            arena: EntryArena::new(vertex_count),
            d0: HashMap::new(),
            d1,
            d0_bounds,
            d1_bounds,
            m: m.max(1),
            b,
        }
    }

    pub fn bound(&self) -> Key<W> {
        self.b
    }

    /// The vertex's currently recorded key (the sentinel if never inserted).
    pub fn recorded_key(&self, vertex: usize) -> Key<W> {
        self.arena.key(vertex)
    }

    /// Improvement-only insert/update. A no-op if `new_key` does not beat
    /// the vertex's currently recorded key.
    pub fn insert(&mut self, vertex: usize, new_key: Key<W>) {
        if new_key >= self.arena.key(vertex) {
            return;
        }
        if self.arena.is_linked(vertex) {
            self.delete(vertex, self.arena.key(vertex));
        }

        let bound = self.d1_bounds.strict_upper_bound(&new_key).unwrap_or(self.b);
        let block = self
            .d1
            .get_mut(&bound)
            .expect("D1 bound without a backing block (invariant i)");
        block.insert(&mut self.arena, vertex, new_key);

        if block.size() > self.m {
            self.split(bound);
        }
    }

    /// Removes `vertex`'s entry, locating its home block by `key` (the key
    /// the entry was last recorded under). A missing bound is a recoverable
    /// anomaly: logged, left structurally intact.
    pub fn delete(&mut self, vertex: usize, key: Key<W>) {
        let d0_max = self.d0_bounds.max();
        if let Some(d0_max) = d0_max {
            if key < d0_max {
                let bound = self.d0_bounds.strict_upper_bound(&key).unwrap_or(d0_max);
                match self.d0.get_mut(&bound) {
                    Some(block) => {
                        block.delete(&mut self.arena, vertex);
                        if block.is_empty() {
                            self.d0.remove(&bound);
                            self.d0_bounds.delete(&bound);
                        }
                    }
                    None => {
                        log::warn!(
                            "BBLL delete: D0 bound {:?} has no backing block for key {:?} (recoverable)",
                            bound, key
                        );
                    }
                }
                return;
            }
        }

        let bound = self.d1_bounds.strict_upper_bound(&key).unwrap_or(self.b);
        match self.d1.get_mut(&bound) {
            Some(block) => {
                block.delete(&mut self.arena, vertex);
                if block.is_empty() && bound != self.b {
                    self.d1.remove(&bound);
                    self.d1_bounds.delete(&bound);
                }
            }
            None => {
                log::warn!(
                    "BBLL delete: D1 bound {:?} has no backing block for key {:?} (recoverable)",
                    bound, key
                );
            }
        }
    }

    /// Splits an over-full D1 block in two around its value-median.
    fn split(&mut self, bound: Key<W>) {
        let block = self
            .d1
            .remove(&bound)
            .expect("split invoked on a bound absent from D1");
        let entries: Vec<(usize, Key<W>)> = block
            .iterate(&self.arena)
            .map(|v| (v, self.arena.key(v)))
            .collect();
        let median = block
            .median(&self.arena)
            .expect("split invoked on an empty block");

        let mut left = Block::new();
        let mut right = Block::new();
        for (v, k) in entries {
            if k < median {
                left.insert(&mut self.arena, v, k);
            } else {
                right.insert(&mut self.arena, v, k);
            }
        }

        // `bound` (possibly the sentinel `B`) keeps its place, now mapping
        // to the right half; the median becomes a fresh bound for the left
        // half. `D1_bounds` already contains `bound`, so only `median` is new.
        self.d1.insert(bound, right);
        self.d1.insert(median, left);
        self.d1_bounds.insert(median);
    }

    /// `L` is a set of `(vertex, key)` pairs already known to lie below
    /// every current D0 bound; this partitions them into `<= m`-sized
    /// blocks and prepends them to D0 in ascending order.
    pub fn batch_prepend(&mut self, l: Vec<(usize, Key<W>)>) {
        if l.is_empty() {
            return;
        }

        for &(vertex, key) in &l {
            if self.arena.is_linked(vertex) {
                self.delete(vertex, self.arena.key(vertex));
            }
        }

        let chunks = self.partition_by_median(l);
        let mut next_bound = self.find_global_min();

        for chunk in chunks.into_iter().rev() {
            let chunk_min = chunk
                .iter()
                .map(|&(_, k)| k)
                .min()
                .expect("partition_by_median never yields an empty chunk");
            let mut block = Block::new();
            for (v, k) in chunk {
                block.insert(&mut self.arena, v, k);
            }
            self.d0.insert(next_bound, block);
            self.d0_bounds.insert(next_bound);
            next_bound = chunk_min;
        }
    }

    /// Recursively halves `items` around the value-median until every
    /// partition has size `<= m`. Returns partitions in ascending key order.
    fn partition_by_median(&self, items: Vec<(usize, Key<W>)>) -> Vec<Vec<(usize, Key<W>)>> {
        if items.len() <= self.m {
            return vec![items];
        }
        let keys: Vec<Key<W>> = items.iter().map(|&(_, k)| k).collect();
        let n = keys.len();
        let median = quickselect(keys, n / 2);

        let mut lo = Vec::new();
        let mut hi = Vec::new();
        for pair in items {
            if pair.1 < median {
                lo.push(pair);
            } else {
                hi.push(pair);
            }
        }

        let mut result = self.partition_by_median(lo);
        result.extend(self.partition_by_median(hi));
        result
    }

    /// Extracts the `m` smallest live entries, in key order across D0 then
    /// D1. Returns the extracted vertex ids and the new boundary `B'`: the
    /// sentinel if the structure is now empty, otherwise the current global
    /// minimum.
    pub fn pull(&mut self) -> (Vec<usize>, Key<W>) {
        let mut collected: Vec<(usize, Key<W>)> = Vec::new();

        let d0_order: Vec<Key<W>> = self.d0_bounds.in_order().collect();
        let d1_order: Vec<Key<W>> = self.d1_bounds.in_order().collect();

        // A D0 bound and a D1 bound can coincide (e.g. both fall back to the
        // sentinel `B`), so the originating sequence must be tagged
        // explicitly rather than probed for with `or_else` — otherwise the
        // same D0 block gets collected twice and the real D1 block at that
        // bound is skipped.
        let tagged = d0_order
            .iter()
            .map(|b| (Sequence::D0, b))
            .chain(d1_order.iter().map(|b| (Sequence::D1, b)));

        'collect: for (seq, bound) in tagged {
            if collected.len() >= self.m {
                break 'collect;
            }
            let block = match seq {
                Sequence::D0 => self.d0.get(bound),
                Sequence::D1 => self.d1.get(bound),
            };
            if let Some(block) = block {
                for v in block.iterate(&self.arena) {
                    collected.push((v, self.arena.key(v)));
                }
            }
        }

        if collected.is_empty() {
            return (Vec::new(), self.b);
        }

        if collected.len() <= self.m {
            let vertices: Vec<usize> = collected.iter().map(|&(v, _)| v).collect();
            for &(v, k) in &collected {
                self.delete(v, k);
            }
            return (vertices, self.b);
        }

        let keys: Vec<Key<W>> = collected.iter().map(|&(_, k)| k).collect();
        let threshold = quickselect(keys, self.m - 1);
        let chosen: Vec<(usize, Key<W>)> = collected
            .into_iter()
            .filter(|&(_, k)| k <= threshold)
            .collect();

        let vertices: Vec<usize> = chosen.iter().map(|&(v, _)| v).collect();
        for &(v, k) in &chosen {
            self.delete(v, k);
        }
        (vertices, self.find_global_min())
    }

    pub fn is_empty(&self) -> bool {
        self.d0_bounds.is_empty()
            && self.d1_bounds.len() == 1
            && self
                .d1
                .get(&self.b)
                .map_or(true, |block| block.is_empty())
    }

    /// Minimum key across the smallest D0 block and the smallest D1 block,
    /// or the sentinel if both sequences are empty.
    pub fn find_global_min(&self) -> Key<W> {
        let d0_candidate = self
            .d0_bounds
            .min()
            .and_then(|b| self.d0.get(&b))
            .and_then(|block| block.min());
        let d1_candidate = self
            .d1_bounds
            .min()
            .and_then(|b| self.d1.get(&b))
            .and_then(|block| block.min());

        [d0_candidate, d1_candidate]
            .into_iter()
            .flatten()
            .min()
            .unwrap_or(self.b)
    }

    /// Debug-only consistency check over the invariants spec.md §3/§8
    /// require to hold at every public operation boundary.
    pub fn check_invariants(&self) -> crate::Result<()> {
        let d0_keys: std::collections::HashSet<Key<W>> = self.d0.keys().copied().collect();
        let d0_bound_keys: std::collections::HashSet<Key<W>> = self.d0_bounds.in_order().collect();
        if d0_keys != d0_bound_keys {
            return Err(crate::Error::InvariantViolation(
                "D0 bound set does not match D0 block-map keys".into(),
            ));
        }

        let d1_keys: std::collections::HashSet<Key<W>> = self.d1.keys().copied().collect();
        let d1_bound_keys: std::collections::HashSet<Key<W>> = self.d1_bounds.in_order().collect();
        if d1_keys != d1_bound_keys {
            return Err(crate::Error::InvariantViolation(
                "D1 bound set does not match D1 block-map keys".into(),
            ));
        }

        if !self.d1.contains_key(&self.b) || !self.d1_bounds.contains(&self.b) {
            return Err(crate::Error::InvariantViolation(
                "sentinel bound missing from D1".into(),
            ));
        }

        for (&bound, block) in &self.d1 {
            if block.size() > self.m {
                return Err(crate::Error::InvariantViolation(format!(
                    "D1 block at bound {:?} exceeds cap {}",
                    bound, self.m
                )));
            }
            if let Some(max) = block.max() {
                if max >= bound {
                    return Err(crate::Error::InvariantViolation(format!(
                        "D1 block at bound {:?} holds a key {:?} not below its bound",
                        bound, max
                    )));
                }
            }
        }

        Ok(())
    }
}
