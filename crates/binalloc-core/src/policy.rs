//! Policy functions consumed by the constraint model builder.

use crate::ids::{Bin, Item, Resource};

/// Supplies the per-round business parameters of an allocation.
///
/// Implement this to plug in replication factors, per-resource costs or
/// heterogeneous capacities. [`UniformPolicy`] is the reference.
pub trait Policy {
    /// Number of distinct bins `item` must be placed into.
    fn copies(&self, item: Item) -> u32;

    /// Total copies placed across `items`.
    fn total_copies(&self, items: &[Item]) -> u64 {
        items.iter().map(|&item| u64::from(self.copies(item))).sum()
    }

    /// Units of `resource` consumed by one copy of `item`.
    ///
    /// Reserved: the current model counts placements rather than costs.
    fn required(&self, item: Item, resource: Resource) -> u32;

    /// Maximum number of copies `bin` may hold.
    fn capacity(&self, bin: Bin) -> i64;

    /// Maximum number of prior placements a round may abandon.
    fn max_churn(&self) -> u32;
}

/// Same parameters for every item, bin and resource.
///
/// # Example
///
/// ```
/// use binalloc_core::{Bin, Item, Policy, UniformPolicy};
///
/// let policy = UniformPolicy::default();
/// assert_eq!(policy.copies(Item(0)), 1);
/// assert_eq!(policy.capacity(Bin(4)), 10);
/// assert_eq!(policy.total_copies(&[Item(0), Item(1)]), 2);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UniformPolicy {
    pub copies: u32,
    pub cost: u32,
    pub capacity: i64,
    pub max_churn: u32,
}

impl UniformPolicy {
    pub const DEFAULT_COPIES: u32 = 1;
    pub const DEFAULT_COST: u32 = 1;
    pub const DEFAULT_CAPACITY: i64 = 10;
    pub const DEFAULT_MAX_CHURN: u32 = 10;

    pub fn with_capacity(mut self, capacity: i64) -> Self {
        self.capacity = capacity;
        self
    }

    pub fn with_copies(mut self, copies: u32) -> Self {
        self.copies = copies;
        self
    }

    pub fn with_max_churn(mut self, max_churn: u32) -> Self {
        self.max_churn = max_churn;
        self
    }
}

impl Default for UniformPolicy {
    fn default() -> Self {
        Self {
            copies: Self::DEFAULT_COPIES,
            cost: Self::DEFAULT_COST,
            capacity: Self::DEFAULT_CAPACITY,
            max_churn: Self::DEFAULT_MAX_CHURN,
        }
    }
}

impl Policy for UniformPolicy {
    fn copies(&self, _item: Item) -> u32 {
        self.copies
    }

    fn total_copies(&self, items: &[Item]) -> u64 {
        u64::from(self.copies) * items.len() as u64
    }

    fn required(&self, _item: Item, _resource: Resource) -> u32 {
        self.cost
    }

    fn capacity(&self, _bin: Bin) -> i64 {
        self.capacity
    }

    fn max_churn(&self) -> u32 {
        self.max_churn
    }
}

impl<P: Policy + ?Sized> Policy for &P {
    fn copies(&self, item: Item) -> u32 {
        (**self).copies(item)
    }

    fn total_copies(&self, items: &[Item]) -> u64 {
        (**self).total_copies(items)
    }

    fn required(&self, item: Item, resource: Resource) -> u32 {
        (**self).required(item, resource)
    }

    fn capacity(&self, bin: Bin) -> i64 {
        (**self).capacity(bin)
    }

    fn max_churn(&self) -> u32 {
        (**self).max_churn()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Replicated;

    impl Policy for Replicated {
        fn copies(&self, item: Item) -> u32 {
            if item.0 % 2 == 0 {
                2
            } else {
                1
            }
        }

        fn required(&self, _item: Item, _resource: Resource) -> u32 {
            1
        }

        fn capacity(&self, _bin: Bin) -> i64 {
            4
        }

        fn max_churn(&self) -> u32 {
            0
        }
    }

    #[test]
    fn test_uniform_defaults() {
        let policy = UniformPolicy::default();
        assert_eq!(policy.copies(Item(9)), 1);
        assert_eq!(policy.required(Item(9), Resource(0)), 1);
        assert_eq!(policy.capacity(Bin(0)), 10);
        assert_eq!(policy.max_churn(), 10);
    }

    #[test]
    fn test_uniform_total_copies_scales_with_copies() {
        let policy = UniformPolicy::default().with_copies(3);
        assert_eq!(policy.total_copies(&[Item(0), Item(1)]), 6);
    }

    #[test]
    fn test_default_total_copies_sums_per_item() {
        let items = [Item(0), Item(1), Item(2)];
        assert_eq!(Replicated.total_copies(&items), 5);
        assert_eq!((&Replicated).total_copies(&items), 5);
    }
}
