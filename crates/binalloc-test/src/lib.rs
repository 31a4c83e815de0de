//! Shared test fixtures for binalloc crates.
//!
//! - [`solvers`] - stub and counting [`Solver`](binalloc_solver::Solver) backends
//! - [`policy`] - non-uniform policies
//! - [`assertions`] - placement shape checks
//!
//! # Usage
//!
//! ```toml
//! [dev-dependencies]
//! binalloc-test = { workspace = true }
//! ```

pub mod assertions;
pub mod policy;
pub mod solvers;

pub use assertions::{assert_each_item_placed, assert_occupancy, churn_between};
pub use policy::PerBinPolicy;
pub use solvers::{CountingSolver, StubSolver};
