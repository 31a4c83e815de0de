//! Toggles for the optional constraint families.

/// Options controlling which optional constraint families are emitted.
///
/// All families are active by default. Replication is always enforced and
/// has no toggle.
///
/// # Example
///
/// ```
/// use binalloc_core::AllocationOptions;
///
/// let options = AllocationOptions {
///     disable_even_distribution: true,
///     ..AllocationOptions::default()
/// };
/// assert!(!options.even_distribution());
/// assert!(options.capacity_checking());
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default, rename_all = "snake_case"))]
pub struct AllocationOptions {
    /// Skips the fairness objective; any feasible placement is optimal.
    pub disable_even_distribution: bool,

    /// Skips the bound on items moved away from their previous bin.
    pub disable_max_churn: bool,

    /// Skips the per-bin capacity constraint.
    pub disable_capacity_checking: bool,
}

impl AllocationOptions {
    /// Returns whether the even-distribution objective is emitted.
    pub fn even_distribution(&self) -> bool {
        !self.disable_even_distribution
    }

    /// Returns whether the churn bound is emitted (given a prior placement).
    pub fn max_churn(&self) -> bool {
        !self.disable_max_churn
    }

    /// Returns whether per-bin capacity is enforced.
    pub fn capacity_checking(&self) -> bool {
        !self.disable_capacity_checking
    }
}
