//! Index arithmetic of a Fenwick tree over positions `0..size`.
//!
//! Cell `index` aggregates the positions in [`range`]`(index)`, a run of length
//! `lowest_set_bit(index + 1)` that ends at `index`. All functions use zero-based positions.

use std::ops::Range;

/// Lowest set bit of `value`, zero for zero.
#[inline]
#[must_use]
pub fn lowest_set_bit(value: usize) -> usize {
    value & value.wrapping_neg()
}

/// Positions aggregated by cell `index`.
#[must_use]
pub fn range(index: usize) -> Range<usize> {
    let one_based = index + 1;
    (one_based - lowest_set_bit(one_based))..one_based
}

/// Cells whose aggregate contains position `index`, excluding `index` itself, in increasing order.
///
/// These are the cells an update of `index` has to touch.
pub fn ancestors(index: usize, size: usize) -> impl Iterator<Item = usize> {
    let mut one_based = index + 1;
    std::iter::from_fn(move || {
        one_based += lowest_set_bit(one_based);
        (one_based <= size).then(|| one_based - 1)
    })
}

/// Cells whose ranges partition `0..end`, in decreasing order.
pub fn prefix_cover(end: usize) -> impl Iterator<Item = usize> {
    let mut one_based = end;
    std::iter::from_fn(move || {
        (one_based > 0).then(|| {
            let cell = one_based - 1;
            one_based -= lowest_set_bit(one_based);
            cell
        })
    })
}

/// Cells whose nearest ancestor is `index`, in decreasing order.
///
/// Their ranges partition `range(index)` without `index` itself.
pub fn children(index: usize) -> impl Iterator<Item = usize> {
    let one_based = index + 1;
    let span = lowest_set_bit(one_based);
    let mut step = 1;
    std::iter::from_fn(move || {
        (step < span).then(|| {
            let child = one_based - step - 1;
            step <<= 1;
            child
        })
    })
}

/// Nearest ancestor of `index` in a tree of `size` cells, if any.
#[must_use]
pub fn parent(index: usize, size: usize) -> Option<usize> {
    ancestors(index, size).next()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ranges_of_first_cells() {
        assert_eq!(range(0), 0..1);
        assert_eq!(range(1), 0..2);
        assert_eq!(range(2), 2..3);
        assert_eq!(range(3), 0..4);
        assert_eq!(range(5), 4..6);
    }

    #[test]
    fn ancestors_stop_at_size() {
        assert_eq!(ancestors(0, 8).collect::<Vec<_>>(), vec![1, 3, 7]);
        assert_eq!(ancestors(0, 4).collect::<Vec<_>>(), vec![1, 3]);
        assert_eq!(ancestors(2, 4).collect::<Vec<_>>(), vec![3]);
        assert_eq!(ancestors(4, 6).collect::<Vec<_>>(), vec![5]);
        assert_eq!(ancestors(3, 4).count(), 0);
    }

    #[test]
    fn prefix_cover_partitions_prefix() {
        assert_eq!(prefix_cover(0).count(), 0);
        assert_eq!(prefix_cover(3).collect::<Vec<_>>(), vec![2, 1]);
        assert_eq!(prefix_cover(7).collect::<Vec<_>>(), vec![6, 5, 3]);
        for end in 0..64 {
            let mut covered: Vec<usize> = prefix_cover(end).flat_map(range).collect();
            covered.sort_unstable();
            assert_eq!(covered, (0..end).collect::<Vec<_>>());
        }
    }

    #[test]
    fn children_partition_cell_range() {
        assert_eq!(children(3).collect::<Vec<_>>(), vec![2, 1]);
        assert_eq!(children(7).collect::<Vec<_>>(), vec![6, 5, 3]);
        assert_eq!(children(4).count(), 0);
        for index in 0..64 {
            let mut covered: Vec<usize> = children(index).flat_map(range).collect();
            covered.push(index);
            covered.sort_unstable();
            assert_eq!(covered, range(index).collect::<Vec<_>>());
            for child in children(index) {
                assert_eq!(parent(child, 64), Some(index));
            }
        }
    }
}
