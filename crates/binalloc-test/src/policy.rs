//! Policies with non-uniform parameters.

use binalloc_core::{Bin, Item, Policy, Resource};

/// Per-bin capacities, uniform replication and churn budget.
#[derive(Debug, Clone)]
pub struct PerBinPolicy {
    pub capacities: Vec<i64>,
    pub copies: u32,
    pub max_churn: u32,
}

impl PerBinPolicy {
    pub fn new(capacities: Vec<i64>) -> Self {
        Self {
            capacities,
            copies: 1,
            max_churn: 10,
        }
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

impl Policy for PerBinPolicy {
    fn copies(&self, _item: Item) -> u32 {
        self.copies
    }

    fn required(&self, _item: Item, _resource: Resource) -> u32 {
        1
    }

    fn capacity(&self, bin: Bin) -> i64 {
        self.capacities.get(bin.index()).copied().unwrap_or(0)
    }

    fn max_churn(&self) -> u32 {
        self.max_churn
    }
}
