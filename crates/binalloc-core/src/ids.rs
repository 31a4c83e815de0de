//! Identifier types for the placement domain.
//!
//! Identifiers carry no behavior beyond identity and a display form used for
//! naming solver variables.

use std::fmt;

macro_rules! impl_id {
    ($(#[$meta:meta])* $type:ident => $prefix:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        #[cfg_attr(feature = "serde", serde(transparent))]
        pub struct $type(pub u32);

        impl $type {
            /// Returns the raw identifier as an index.
            pub fn index(self) -> usize {
                self.0 as usize
            }

            /// Returns the identifier that follows this one.
            pub fn next(self) -> Self {
                $type(self.0 + 1)
            }
        }

        impl From<u32> for $type {
            fn from(id: u32) -> Self {
                $type(id)
            }
        }

        impl fmt::Display for $type {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!($prefix, "-{}"), self.0)
            }
        }
    };
}

impl_id!(
    /// A placeable unit of work.
    Item => "item"
);
impl_id!(
    /// A capacity-bounded placement target.
    Bin => "bin"
);
impl_id!(
    /// A cost dimension an item may consume.
    Resource => "resource"
);

/// Pairs one item with one bin.
///
/// # Example
///
/// ```
/// use binalloc_core::{Bin, Item, ItemBin};
///
/// let key = ItemBin::new(Item(3), Bin(1));
/// assert_eq!(key.to_string(), "item-3 in bin-1");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ItemBin {
    pub item: Item,
    pub bin: Bin,
}

impl ItemBin {
    pub fn new(item: Item, bin: Bin) -> Self {
        Self { item, bin }
    }
}

impl fmt::Display for ItemBin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} in {}", self.item, self.bin)
    }
}

/// Builds `count` sequential identifiers starting at zero.
pub fn sequential<T: From<u32>>(count: usize) -> Vec<T> {
    (0..count as u32).map(T::from).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(Item(0).to_string(), "item-0");
        assert_eq!(Bin(12).to_string(), "bin-12");
        assert_eq!(Resource(3).to_string(), "resource-3");
    }

    #[test]
    fn test_next_and_index() {
        assert_eq!(Item(4).next(), Item(5));
        assert_eq!(Bin(7).index(), 7);
    }

    #[test]
    fn test_sequential() {
        let bins: Vec<Bin> = sequential(3);
        assert_eq!(bins, vec![Bin(0), Bin(1), Bin(2)]);
        assert!(sequential::<Item>(0).is_empty());
    }

    #[test]
    fn test_ordering_follows_id() {
        let mut items = vec![Item(2), Item(0), Item(1)];
        items.sort();
        assert_eq!(items, vec![Item(0), Item(1), Item(2)]);
    }
}
