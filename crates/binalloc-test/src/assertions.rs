//! Placement shape checks.

use binalloc_core::{Bin, Item, Placement};

/// Asserts that every item occupies exactly `copies` bins.
pub fn assert_each_item_placed(placement: &Placement, items: &[Item], copies: usize) {
    assert_eq!(placement.len(), items.len(), "placed item count");
    for &item in items {
        assert_eq!(
            placement.bins_of(item).len(),
            copies,
            "{} occupies {:?}",
            item,
            placement.bins_of(item)
        );
    }
}

/// Asserts the exact per-bin counts, listing only non-empty bins.
pub fn assert_occupancy(placement: &Placement, expected: &[(Bin, usize)]) {
    let actual: Vec<(Bin, usize)> = placement.occupancy().into_iter().collect();
    assert_eq!(actual, expected, "occupancy");
}

/// Number of prior pairs abandoned by `next`, ignoring items missing from either.
pub fn churn_between(prior: &Placement, next: &Placement) -> usize {
    next.moved_from(prior)
}
