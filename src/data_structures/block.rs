//! Block (C3): an intrusive circular doubly-linked list of vertex entries,
//! ordered by insertion, caching its min/max key for O(1) reads.
//!
//! Design Notes (spec.md §9) ask for an arena of fixed-size cells indexed by
//! vertex id rather than one heap-allocated node per insert, so entries can
//! be re-homed between blocks by index instead of by pointer. `EntryArena`
//! is that arena: one slot per vertex, sized once per BBLL frame (mirroring
//! the original source, which likewise allocates one node array per BBLL
//! instance — see `BMSSP.py`'s `BBLL.__init__`). `Block` itself stores only
//! a head index plus cached size/min/max; all pointer-chasing happens
//! through the arena.

use super::median::quickselect;
use crate::key::Key;
use num_traits::{Float, Zero};
use std::fmt::Debug;

#[derive(Debug, Clone, Copy)]
struct Cell<W> {
    key: Key<W>,
    prev: usize,
    next: usize,
    linked: bool,
}

/// One intrusive entry per vertex, re-homed between blocks without
/// allocation. Indexed by vertex id.
#[derive(Debug, Clone)]
pub struct EntryArena<W> {
    cells: Vec<Cell<W>>,
}

impl<W> EntryArena<W>
where
    W: Float + Zero + Debug + Copy,
{
    pub fn new(vertex_count: usize) -> Self {
        let sentinel = Key::sentinel();
        EntryArena {
            cells: vec![
                Cell {
                    key: sentinel,
                    prev: 0,
                    next: 0,
                    linked: false,
                };
                vertex_count
            ],
        }
    }

    pub fn is_linked(&self, vertex: usize) -> bool {
        self.cells[vertex].linked
    }

    pub fn key(&self, vertex: usize) -> Key<W> {
        self.cells[vertex].key
    }

    fn set_key(&mut self, vertex: usize, key: Key<W>) {
        self.cells[vertex].key = key;
    }
}

/// A bounded-size circular doubly-linked list of vertex entries. All
/// operations except `median` are O(1) (amortised for `delete`'s extremum
/// recompute).
#[derive(Debug, Clone, Copy)]
pub struct Block<W> {
    head: Option<usize>,
    size: usize,
    min_val: Option<Key<W>>,
    max_val: Option<Key<W>>,
}

impl<W> Block<W>
where
    W: Float + Zero + Debug + Copy,
{
    pub fn new() -> Self {
        Block {
            head: None,
            size: 0,
            min_val: None,
            max_val: None,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.head.is_none()
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn min(&self) -> Option<Key<W>> {
        self.min_val
    }

    pub fn max(&self) -> Option<Key<W>> {
        self.max_val
    }

    /// Append `vertex` (carrying `key`) at the end of the circular list.
    pub fn insert(&mut self, arena: &mut EntryArena<W>, vertex: usize, key: Key<W>) {
        arena.set_key(vertex, key);
        self.size += 1;
        self.min_val = Some(self.min_val.map_or(key, |m| if key < m { key } else { m }));
        self.max_val = Some(self.max_val.map_or(key, |m| if key > m { key } else { m }));

        match self.head {
            None => {
                arena.cells[vertex].prev = vertex;
                arena.cells[vertex].next = vertex;
                arena.cells[vertex].linked = true;
                self.head = Some(vertex);
            }
            Some(head) => {
                let tail = arena.cells[head].prev;
                arena.cells[tail].next = vertex;
                arena.cells[vertex].prev = tail;
                arena.cells[vertex].next = head;
                arena.cells[head].prev = vertex;
                arena.cells[vertex].linked = true;
            }
        }
    }

    /// Unlink `vertex` by reference. A no-op if `vertex` is not currently
    /// linked into this block.
    pub fn delete(&mut self, arena: &mut EntryArena<W>, vertex: usize) {
        if !arena.cells[vertex].linked {
            return;
        }
        let removed_key = arena.key(vertex);

        if self.size == 1 {
            self.head = None;
            self.size = 0;
            self.min_val = None;
            self.max_val = None;
        } else {
            let prev = arena.cells[vertex].prev;
            let next = arena.cells[vertex].next;
            arena.cells[prev].next = next;
            arena.cells[next].prev = prev;
            if self.head == Some(vertex) {
                self.head = Some(next);
            }
            self.size -= 1;
        }

        arena.cells[vertex].linked = false;

        if self.size > 0 {
            if self.min_val == Some(removed_key) {
                self.min_val = Some(self.recompute_extremum(arena, true));
            }
            if self.max_val == Some(removed_key) {
                self.max_val = Some(self.recompute_extremum(arena, false));
            }
        }
    }

    fn recompute_extremum(&self, arena: &EntryArena<W>, want_min: bool) -> Key<W> {
        let head = self.head.expect("recompute_extremum on empty block");
        let mut best = arena.key(head);
        let mut cur = arena.cells[head].next;
        while cur != head {
            let k = arena.key(cur);
            if (want_min && k < best) || (!want_min && k > best) {
                best = k;
            }
            cur = arena.cells[cur].next;
        }
        best
    }

    /// Yield every linked vertex id exactly once, in list order.
    pub fn iterate<'a>(&self, arena: &'a EntryArena<W>) -> BlockIter<'a, W> {
        BlockIter {
            arena,
            head: self.head,
            cur: self.head,
            started: false,
        }
    }

    /// O(size) expected: the value-median of the block's keys, used to pick
    /// a split threshold. For an even-sized block this returns the
    /// upper-middle key directly rather than an arithmetic average (`Key`
    /// is a lexicographic composite, not a vector quantity — averaging two
    /// keys has no natural meaning), which still satisfies a valid
    /// bipartition into `< m` / `>= m` halves.
    pub fn median(&self, arena: &EntryArena<W>) -> Option<Key<W>> {
        if self.is_empty() {
            return None;
        }
        let values: Vec<Key<W>> = self.iterate(arena).map(|v| arena.key(v)).collect();
        let n = values.len();
        Some(quickselect(values, n / 2))
    }
}

impl<W> Default for Block<W>
where
    W: Float + Zero + Debug + Copy,
{
    fn default() -> Self {
        Self::new()
    }
}

pub struct BlockIter<'a, W> {
    arena: &'a EntryArena<W>,
    head: Option<usize>,
    cur: Option<usize>,
    started: bool,
}

impl<'a, W> Iterator for BlockIter<'a, W>
where
    W: Float + Zero + Debug + Copy,
{
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        let cur = self.cur?;
        if self.started && Some(cur) == self.head {
            return None;
        }
        self.started = true;
        self.cur = Some(self.arena.cells[cur].next);
        Some(cur)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ordered_float::OrderedFloat;

    fn key(d: f64, v: usize) -> Key<OrderedFloat<f64>> {
        Key::new(OrderedFloat(d), None, v)
    }

    #[test]
    fn insert_updates_cached_extrema() {
        let mut arena = EntryArena::new(8);
        let mut block = Block::new();
        block.insert(&mut arena, 3, key(5.0, 3));
        block.insert(&mut arena, 1, key(2.0, 1));
        block.insert(&mut arena, 2, key(8.0, 2));
        assert_eq!(block.min(), Some(key(2.0, 1)));
        assert_eq!(block.max(), Some(key(8.0, 2)));
        assert_eq!(block.size(), 3);
    }

    #[test]
    fn delete_unlinked_entry_is_noop() {
        let mut arena = EntryArena::new(4);
        let mut block = Block::new();
        block.insert(&mut arena, 0, key(1.0, 0));
        block.delete(&mut arena, 1); // never linked
        assert_eq!(block.size(), 1);
    }

    #[test]
    fn delete_recomputes_extrema() {
        let mut arena = EntryArena::new(8);
        let mut block = Block::new();
        block.insert(&mut arena, 0, key(1.0, 0));
        block.insert(&mut arena, 1, key(2.0, 1));
        block.insert(&mut arena, 2, key(3.0, 2));
        block.delete(&mut arena, 2); // removes cached max
        assert_eq!(block.max(), Some(key(2.0, 1)));
        block.delete(&mut arena, 0); // removes cached min
        assert_eq!(block.min(), Some(key(2.0, 1)));
    }

    #[test]
    fn delete_last_entry_empties_block() {
        let mut arena = EntryArena::new(4);
        let mut block = Block::new();
        block.insert(&mut arena, 0, key(1.0, 0));
        block.delete(&mut arena, 0);
        assert!(block.is_empty());
        assert_eq!(block.min(), None);
        assert_eq!(block.max(), None);
    }

    #[test]
    fn iterate_visits_every_entry_once() {
        let mut arena = EntryArena::new(8);
        let mut block = Block::new();
        for v in [0, 1, 2, 3] {
            block.insert(&mut arena, v, key(v as f64, v));
        }
        let mut seen: Vec<usize> = block.iterate(&arena).collect();
        seen.sort();
        assert_eq!(seen, vec![0, 1, 2, 3]);
    }

    #[test]
    fn median_splits_block_in_half() {
        let mut arena = EntryArena::new(8);
        let mut block = Block::new();
        for v in [0, 1, 2, 3, 4] {
            block.insert(&mut arena, v, key(v as f64, v));
        }
        let m = block.median(&arena).unwrap();
        let lows = block
            .iterate(&arena)
            .filter(|&v| arena.key(v) < m)
            .count();
        let highs = block
            .iterate(&arena)
            .filter(|&v| arena.key(v) >= m)
            .count();
        assert_eq!(lows + highs, 5);
        assert!(lows <= 3 && highs <= 3);
    }
}
