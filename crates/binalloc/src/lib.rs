//! binalloc - placement of items into capacity-bounded bins
//!
//! Each round translates replication, capacity, fairness and churn rules into
//! a constraint model, hands it to a [`Solver`], and decodes the answer into a
//! [`Placement`].
//!
//! # Example
//!
//! ```rust
//! use binalloc::prelude::*;
//!
//! let mut allocator = Allocator::new(30, 5, 1);
//! let placement = allocator.allocate().unwrap();
//!
//! assert_eq!(placement.len(), 30);
//! assert!(placement.occupancy().values().all(|&count| count == 6));
//! ```

pub mod allocator;
pub mod builder;
pub mod decoder;

pub use allocator::{allocate_round, Allocator, Problem};
pub use builder::{build_model, BuiltModel, LiteralTable};
pub use decoder::decode;

pub use binalloc_config::{AllocatorConfig, ConfigError, SolverSettings};
pub use binalloc_core::{
    AllocateError, AllocationOptions, Bin, Item, ItemBin, Placement, Policy, Resource,
    UniformPolicy,
};
pub use binalloc_solver::{MilpSolver, Model, SolveResult, SolveStatus, Solver};

#[cfg(feature = "console")]
pub use binalloc_console as console;

pub mod prelude {
    pub use super::{allocate_round, Allocator, Problem};
    pub use super::{AllocateError, AllocationOptions, Bin, Item, Placement, Policy, Resource};
    pub use super::{AllocatorConfig, MilpSolver, Solver, UniformPolicy};
}
