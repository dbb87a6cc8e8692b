//! Inversion counting between an observed ordering and a reference order.
//!
//! An inversion is a pair of items whose relative order in the observed
//! sequence disagrees with their relative order in the reference. With six
//! body segments the pairwise O(n^2) count is both the simplest and the
//! fastest option.

/// Maximum possible inversions for `n` items: n(n-1)/2.
pub fn max_inversions(n: usize) -> usize {
    n * (n.saturating_sub(1)) / 2
}

/// Count pairs whose relative order in `actual` disagrees with `ideal`.
///
/// Items present in `actual` but not in `ideal` (or vice versa) are
/// ignored; only pairs ranked by both sequences can invert.
pub fn count_inversions<T: Eq>(ideal: &[T], actual: &[T]) -> usize {
    let rank = |item: &T| ideal.iter().position(|i| i == item);

    let ranks: Vec<usize> = actual.iter().filter_map(rank).collect();

    let mut inversions = 0;
    for i in 0..ranks.len() {
        for j in (i + 1)..ranks.len() {
            if ranks[i] > ranks[j] {
                inversions += 1;
            }
        }
    }
    inversions
}
