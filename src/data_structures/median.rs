//! Median Selector (C2): linear-expected-time order statistics over a value
//! array, used by Block::median (for split) and BBLL::batch_prepend.
//!
//! Randomness is threaded through explicitly via a seedable generator so
//! runs can be made deterministic for testing, matching spec.md §9's
//! requirement that quickselect/median sampling avoid global mutable state.

use rand::rngs::StdRng;
use rand::Rng;

/// Returns the `k`-th smallest element (0-indexed) of `xs` in expected
/// linear time via randomised quickselect. `xs` is consumed; callers that
/// need the original order should clone first.
///
/// # Panics
/// Panics if `xs` is empty or `k >= xs.len()`.
pub fn quickselect<T: PartialOrd + Copy>(mut xs: Vec<T>, k: usize) -> T {
    assert!(!xs.is_empty(), "quickselect on empty input");
    assert!(k < xs.len(), "quickselect index out of range");

    let mut rng = rand::thread_rng();
    quickselect_with_rng(&mut xs, k, &mut rng)
}

/// Same as [`quickselect`] but drawing pivots from a caller-supplied,
/// seedable generator for reproducible selection.
pub fn quickselect_seeded<T: PartialOrd + Copy>(xs: Vec<T>, k: usize, rng: &mut StdRng) -> T {
    let mut xs = xs;
    quickselect_with_rng(&mut xs, k, rng)
}

fn quickselect_with_rng<T: PartialOrd + Copy, R: Rng + ?Sized>(
    xs: &mut [T],
    k: usize,
    rng: &mut R,
) -> T {
    debug_assert!(!xs.is_empty());
    if xs.len() == 1 {
        return xs[0];
    }

    let pivot_idx = rng.gen_range(0..xs.len());
    let pivot = xs[pivot_idx];

    let lows: Vec<T> = xs.iter().copied().filter(|x| *x < pivot).collect();
    let highs: Vec<T> = xs.iter().copied().filter(|x| *x > pivot).collect();
    let pivots_count = xs.len() - lows.len() - highs.len();

    if k < lows.len() {
        let mut lows = lows;
        quickselect_with_rng(&mut lows, k, rng)
    } else if k < lows.len() + pivots_count {
        pivot
    } else {
        let mut highs = highs;
        quickselect_with_rng(&mut highs, k - lows.len() - pivots_count, rng)
    }
}

/// Median of a non-empty sequence of values with a total order: for odd
/// length returns the middle element, for even length the caller-supplied
/// `average` of the two middle elements (callers with non-averageable
/// types, e.g. ordered floats that cannot divide by two without losing
/// their wrapper, pass a combinator).
pub fn median_by<T: PartialOrd + Copy>(xs: &[T], average: impl Fn(T, T) -> T) -> T {
    assert!(!xs.is_empty(), "median of empty input");
    let n = xs.len();
    if n % 2 == 1 {
        quickselect(xs.to_vec(), n / 2)
    } else {
        let lo = quickselect(xs.to_vec(), n / 2 - 1);
        let hi = quickselect(xs.to_vec(), n / 2);
        average(lo, hi)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn quickselect_finds_kth_smallest() {
        let xs = vec![5, 3, 8, 1, 9, 2, 7];
        let mut sorted = xs.clone();
        sorted.sort();
        for k in 0..xs.len() {
            assert_eq!(quickselect(xs.clone(), k), sorted[k]);
        }
    }

    #[test]
    fn quickselect_seeded_is_reproducible() {
        let xs = vec![10, 4, 6, 2, 8, 1, 9, 3, 7, 5];
        let mut rng_a = StdRng::seed_from_u64(42);
        let mut rng_b = StdRng::seed_from_u64(42);
        let a = quickselect_seeded(xs.clone(), 4, &mut rng_a);
        let b = quickselect_seeded(xs.clone(), 4, &mut rng_b);
        assert_eq!(a, b);
    }

    #[test]
    fn median_odd_length() {
        let xs = vec![3.0, 1.0, 2.0];
        assert_eq!(median_by(&xs, |a, b| (a + b) / 2.0), 2.0);
    }

    #[test]
    fn median_even_length_averages_middle_pair() {
        let xs = vec![1.0, 2.0, 3.0, 4.0];
        assert_eq!(median_by(&xs, |a, b| (a + b) / 2.0), 2.5);
    }

    #[test]
    fn single_element() {
        assert_eq!(quickselect(vec![42], 0), 42);
        assert_eq!(median_by(&[42.0], |a, b| (a + b) / 2.0), 42.0);
    }
}
