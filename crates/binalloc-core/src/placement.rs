//! The outcome of one allocation round.

use std::collections::btree_map::{self, BTreeMap};
use std::collections::BTreeSet;

use smallvec::SmallVec;

use crate::ids::{Bin, Item};

/// Bins holding one item. Inline for the common single-copy case.
type Bins = SmallVec<[Bin; 1]>;

/// Maps each placed item to the bins it occupies.
///
/// Under a single-copy policy every item maps to exactly one bin. With
/// replication an item maps to `copies` distinct bins, kept in ascending order.
///
/// # Example
///
/// ```
/// use binalloc_core::{Bin, Item, Placement};
///
/// let mut placement = Placement::new();
/// placement.insert(Item(0), Bin(1));
/// placement.insert(Item(1), Bin(1));
///
/// assert_eq!(placement.len(), 2);
/// assert_eq!(placement.bin_of(Item(0)), Some(Bin(1)));
/// assert_eq!(placement.occupancy().get(&Bin(1)), Some(&2));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Placement {
    bins: BTreeMap<Item, Bins>,
}

impl Placement {
    /// Creates an empty placement.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records that `item` occupies `bin`. Duplicate pairs are ignored.
    pub fn insert(&mut self, item: Item, bin: Bin) {
        let bins = self.bins.entry(item).or_default();
        if let Err(pos) = bins.binary_search(&bin) {
            bins.insert(pos, bin);
        }
    }

    /// Number of placed items.
    pub fn len(&self) -> usize {
        self.bins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bins.is_empty()
    }

    /// Returns the first bin holding `item`.
    pub fn bin_of(&self, item: Item) -> Option<Bin> {
        self.bins.get(&item).and_then(|bins| bins.first().copied())
    }

    /// Returns every bin holding `item`, in ascending order.
    pub fn bins_of(&self, item: Item) -> &[Bin] {
        self.bins.get(&item).map(|bins| bins.as_slice()).unwrap_or(&[])
    }

    /// Returns true if `item` is placed in `bin`.
    pub fn contains(&self, item: Item, bin: Bin) -> bool {
        self.bins_of(item).binary_search(&bin).is_ok()
    }

    /// Returns true if `item` is placed anywhere.
    pub fn contains_item(&self, item: Item) -> bool {
        self.bins.contains_key(&item)
    }

    /// Iterates over placed items in ascending order.
    pub fn items(&self) -> impl Iterator<Item = Item> + '_ {
        self.bins.keys().copied()
    }

    /// Iterates over every `(item, bin)` pair.
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            outer: self.bins.iter(),
            current: None,
        }
    }

    /// Counts items per bin. Empty bins are omitted.
    pub fn occupancy(&self) -> BTreeMap<Bin, usize> {
        let mut counts = BTreeMap::new();
        for (_, bin) in self.iter() {
            *counts.entry(bin).or_insert(0) += 1;
        }
        counts
    }

    /// Returns the set of bins holding at least one item.
    pub fn used_bins(&self) -> BTreeSet<Bin> {
        self.iter().map(|(_, bin)| bin).collect()
    }

    /// Counts prior `(item, bin)` pairs that this placement no longer repeats.
    ///
    /// Items missing from either placement are ignored: dropped items cannot
    /// churn and new items have nothing to churn from.
    pub fn moved_from(&self, prior: &Placement) -> usize {
        prior
            .iter()
            .filter(|&(item, bin)| self.contains_item(item) && !self.contains(item, bin))
            .count()
    }

    /// Keeps only the items for which `keep` returns true.
    pub fn retain_items(&mut self, mut keep: impl FnMut(Item) -> bool) {
        self.bins.retain(|&item, _| keep(item));
    }
}

impl FromIterator<(Item, Bin)> for Placement {
    fn from_iter<I: IntoIterator<Item = (Item, Bin)>>(iter: I) -> Self {
        let mut placement = Placement::new();
        for (item, bin) in iter {
            placement.insert(item, bin);
        }
        placement
    }
}

impl<'a> IntoIterator for &'a Placement {
    type Item = (Item, Bin);
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator over the `(item, bin)` pairs of a [`Placement`].
pub struct Iter<'a> {
    outer: btree_map::Iter<'a, Item, Bins>,
    current: Option<(Item, std::slice::Iter<'a, Bin>)>,
}

impl Iterator for Iter<'_> {
    type Item = (Item, Bin);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some((item, bins)) = &mut self.current {
                if let Some(&bin) = bins.next() {
                    return Some((*item, bin));
                }
            }
            let (&item, bins) = self.outer.next()?;
            self.current = Some((item, bins.iter()));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn placement(pairs: &[(u32, u32)]) -> Placement {
        pairs.iter().map(|&(i, b)| (Item(i), Bin(b))).collect()
    }

    #[test]
    fn test_insert_keeps_bins_sorted_and_unique() {
        let mut p = Placement::new();
        p.insert(Item(0), Bin(3));
        p.insert(Item(0), Bin(1));
        p.insert(Item(0), Bin(3));

        assert_eq!(p.len(), 1);
        assert_eq!(p.bins_of(Item(0)), &[Bin(1), Bin(3)]);
        assert_eq!(p.bin_of(Item(0)), Some(Bin(1)));
    }

    #[test]
    fn test_iter_visits_every_pair() {
        let p = placement(&[(0, 1), (0, 2), (1, 0)]);
        let pairs: Vec<_> = p.iter().collect();
        assert_eq!(
            pairs,
            vec![(Item(0), Bin(1)), (Item(0), Bin(2)), (Item(1), Bin(0))]
        );
    }

    #[test]
    fn test_occupancy_omits_empty_bins() {
        let p = placement(&[(0, 0), (1, 0), (2, 2)]);
        let counts = p.occupancy();
        assert_eq!(counts.len(), 2);
        assert_eq!(counts[&Bin(0)], 2);
        assert_eq!(counts[&Bin(2)], 1);
        assert_eq!(p.used_bins().len(), 2);
    }

    #[test]
    fn test_moved_from_counts_changed_bins() {
        let prior = placement(&[(0, 0), (1, 1), (2, 2)]);
        let next = placement(&[(0, 0), (1, 2), (2, 0)]);
        assert_eq!(next.moved_from(&prior), 2);
        assert_eq!(prior.moved_from(&prior), 0);
    }

    #[test]
    fn test_moved_from_ignores_missing_items() {
        let prior = placement(&[(0, 0), (1, 1), (2, 2)]);
        // item 2 dropped, item 3 new
        let next = placement(&[(0, 0), (1, 1), (3, 0)]);
        assert_eq!(next.moved_from(&prior), 0);
    }

    #[test]
    fn test_retain_items() {
        let mut p = placement(&[(0, 0), (1, 1), (2, 2)]);
        p.retain_items(|item| item != Item(1));
        assert_eq!(p.items().collect::<Vec<_>>(), vec![Item(0), Item(2)]);
    }

    #[test]
    fn test_empty() {
        let p = Placement::new();
        assert!(p.is_empty());
        assert_eq!(p.bin_of(Item(0)), None);
        assert!(p.bins_of(Item(0)).is_empty());
        assert_eq!(p.iter().count(), 0);
    }
}
