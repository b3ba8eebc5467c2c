//! Recursion parameters derived from graph size (spec.md §3), mirroring the
//! teacher's `BMSSP::new`/`new_with_params` constructors but matching the
//! exact formulas the original BMSSP implementation uses to pick `k`, `t`,
//! and the top recursion level `l0`.

/// `k`, `t`, and `l0` for one BMSSP run, plus the BBLL block-cap derivation
/// used at each recursive level.
#[derive(Debug, Clone, Copy)]
pub struct BmsspParams {
    /// Pivot-size threshold: `floor((log2 N)^(1/3))`, floored at 1.
    pub k: usize,
    /// Recursion-depth scaling: `floor((log2 N)^(2/3))`, floored at 1.
    pub t: usize,
    /// Top recursion level: `ceil(log2(N) / t)`, floored at 1.
    pub l0: usize,
}

impl BmsspParams {
    /// Derives `k`, `t`, `l0` from the graph's vertex count, exactly as
    /// spec.md §3 defines them (clamped so single-digit graphs still get a
    /// sensible, non-degenerate recursion).
    pub fn derive(n: usize) -> Self {
        let log2_n = (n.max(2) as f64).log2();
        let k = (log2_n.powf(1.0 / 3.0)).floor().max(1.0) as usize;
        let t = (log2_n.powf(2.0 / 3.0)).floor().max(1.0) as usize;
        let l0 = (log2_n / t as f64).ceil().max(1.0) as usize;
        BmsspParams { k, t, l0 }
    }

    /// Explicit override, e.g. for tests that want a fixed small recursion
    /// shape independent of `N` (mirrors `BMSSP::new_with_params`).
    pub fn with_explicit(k: usize, t: usize, l0: usize) -> Self {
        BmsspParams {
            k: k.max(1),
            t: t.max(1),
            l0: l0.max(1),
        }
    }

    /// BBLL block cap for recursion level `l` (spec.md §4.6 step 2):
    /// `M = 2^((l-1)*t)`, clamped so the shift never overflows `usize`.
    pub fn block_cap(&self, l: usize) -> usize {
        if l == 0 {
            return 1;
        }
        let exp = ((l - 1) * self.t).min(usize::BITS as usize - 1);
        1usize << exp
    }

    /// `U`-threshold for recursion level `l` (spec.md §4.6 step 6):
    /// `T = k * 2^(l*t)`.
    pub fn u_threshold(&self, l: usize) -> usize {
        let exp = (l * self.t).min(usize::BITS as usize - 1);
        self.k.saturating_mul(1usize << exp)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn small_graphs_get_floor_one_params() {
        let p = BmsspParams::derive(2);
        assert_eq!(p.k, 1);
        assert_eq!(p.t, 1);
        assert_eq!(p.l0, 1);
    }

    #[test]
    fn block_cap_grows_with_level() {
        let p = BmsspParams::with_explicit(2, 3, 4);
        assert_eq!(p.block_cap(1), 1);
        assert_eq!(p.block_cap(2), 1 << 3);
        assert_eq!(p.block_cap(3), 1 << 6);
    }

    #[test]
    fn u_threshold_scales_with_level() {
        let p = BmsspParams::with_explicit(2, 3, 4);
        assert_eq!(p.u_threshold(0), 2);
        assert_eq!(p.u_threshold(1), 2 * (1 << 3));
    }
}
