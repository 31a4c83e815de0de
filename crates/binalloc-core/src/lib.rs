//! binalloc Core - domain types shared by the allocator crates
//!
//! This crate provides:
//! - Identifier types for items, bins and resources
//! - The [`Placement`] produced by one allocation round
//! - The [`Policy`] trait supplying replication, cost, capacity and churn budgets
//! - The [`AllocationOptions`] record toggling optional constraint families
//! - The shared error type

pub mod error;
pub mod ids;
pub mod options;
pub mod placement;
pub mod policy;

pub use error::{AllocateError, Result};
pub use ids::{Bin, Item, ItemBin, Resource};
pub use options::AllocationOptions;
pub use placement::Placement;
pub use policy::{Policy, UniformPolicy};
