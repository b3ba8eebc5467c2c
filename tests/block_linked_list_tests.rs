//! Integration scenarios for the BBLL (spec.md §3/§4.4/§8) through
//! `bmssp::data_structures::BlockLinkedList`'s public surface.

use bmssp::data_structures::BlockLinkedList;
use bmssp::Key;
use ordered_float::OrderedFloat;

type F = OrderedFloat<f64>;
type K = Key<F>;

fn key(d: f64, v: usize) -> K {
    Key::new(OrderedFloat(d), None, v)
}

fn sentinel() -> K {
    Key::sentinel()
}

#[test]
fn insert_only_takes_effect_when_it_improves_the_recorded_key() {
    let mut d: BlockLinkedList<F> = BlockLinkedList::new(4, sentinel(), 4);
    d.insert(0, key(10.0, 0));
    d.insert(0, key(20.0, 0)); // worse: ignored
    assert_eq!(d.recorded_key(0), key(10.0, 0));

    d.insert(0, key(3.0, 0)); // better: takes effect
    assert_eq!(d.recorded_key(0), key(3.0, 0));
}

#[test]
fn split_fires_once_a_block_exceeds_its_cap() {
    let m = 2;
    let mut d: BlockLinkedList<F> = BlockLinkedList::new(m, sentinel(), 16);
    for v in 0..(m + 1) {
        d.insert(v, key(v as f64, v));
    }
    // The split must leave every live block at or under the cap.
    assert!(d.check_invariants().is_ok());
}

#[test]
fn batch_prepend_of_more_than_m_entries_yields_multiple_d0_blocks_in_range() {
    let m = 2;
    let mut d: BlockLinkedList<F> = BlockLinkedList::new(m, sentinel(), 32);
    // Pre-existing D1 entry far above the batch's range.
    d.insert(30, key(100.0, 30));

    let batch: Vec<(usize, K)> = (0..9).map(|v| (v, key(v as f64, v))).collect();
    d.batch_prepend(batch);
    assert!(d.check_invariants().is_ok());

    // Pulling repeatedly must drain the batch strictly before vertex 30,
    // in ascending key order, m entries at a time.
    let mut seen = Vec::new();
    loop {
        let (vertices, _) = d.pull();
        if vertices.is_empty() {
            break;
        }
        assert!(vertices.len() <= m);
        seen.extend(vertices);
    }
    assert_eq!(seen.len(), 10);
    let batch_position = seen.iter().position(|&v| v == 30).unwrap();
    assert_eq!(batch_position, 9, "vertex 30 must be pulled last");
}

#[test]
fn pull_after_mixed_inserts_returns_exactly_m_smallest_vertices() {
    let m = 3;
    let mut d: BlockLinkedList<F> = BlockLinkedList::new(m, sentinel(), 16);
    for v in 0..8 {
        d.insert(v, key((8 - v) as f64, v)); // descending keys: vertex 7 is smallest
    }

    let (vertices, _) = d.pull();
    assert_eq!(vertices.len(), m);
    // The m smallest keys correspond to the m highest vertex ids here.
    for v in &vertices {
        assert!(*v >= 5, "pull must surface the smallest keys, got {:?}", vertices);
    }
}

#[test]
fn insert_then_delete_returns_the_structure_to_empty() {
    let mut d: BlockLinkedList<F> = BlockLinkedList::new(4, sentinel(), 4);
    assert!(d.is_empty());

    d.insert(0, key(5.0, 0));
    assert!(!d.is_empty());

    d.delete(0, key(5.0, 0));
    assert!(d.is_empty());
    assert!(d.check_invariants().is_ok());
}

#[test]
fn find_global_min_tracks_the_smallest_entry_across_both_sequences() {
    let mut d: BlockLinkedList<F> = BlockLinkedList::new(4, sentinel(), 8);
    d.insert(0, key(5.0, 0));
    assert_eq!(d.find_global_min(), key(5.0, 0));

    d.batch_prepend(vec![(1, key(1.0, 1))]);
    assert_eq!(d.find_global_min(), key(1.0, 1));
}

#[test]
fn empty_structure_reports_the_sentinel_as_its_bound_after_pull() {
    let mut d: BlockLinkedList<F> = BlockLinkedList::new(4, sentinel(), 4);
    let (vertices, bound) = d.pull();
    assert!(vertices.is_empty());
    assert_eq!(bound, sentinel());
    assert!(d.check_invariants().is_ok());
}

#[test]
fn batch_prepend_into_an_empty_list_does_not_double_count_the_sentinel_bound() {
    // Batch-prepending into a list with nothing but D1's sentinel block
    // drives `find_global_min` to fall back to the sentinel `B` — the same
    // bound D1's own permanent block lives at. `pull` must still return
    // each vertex exactly once.
    let mut d: BlockLinkedList<F> = BlockLinkedList::new(4, sentinel(), 8);
    assert!(d.is_empty());

    let batch: Vec<(usize, K)> = (0..3).map(|v| (v, key(v as f64, v))).collect();
    d.batch_prepend(batch);
    assert!(d.check_invariants().is_ok());

    let (vertices, _) = d.pull();
    let mut sorted = vertices.clone();
    sorted.sort_unstable();
    sorted.dedup();
    assert_eq!(
        sorted.len(),
        vertices.len(),
        "pull returned duplicate vertices: {:?}",
        vertices
    );
    assert_eq!(sorted, vec![0, 1, 2]);
}
