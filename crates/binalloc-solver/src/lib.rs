//! binalloc Solver - the solving capability behind the allocator
//!
//! This crate provides:
//! - A backend-neutral [`Model`]: boolean literals, bounded integer variables,
//!   linear expressions, and the constraint kinds the allocator emits
//! - Structural validation of a model before solving
//! - The [`Solver`] trait, its [`SolveResult`] and [`SolveError`]
//! - [`MilpSolver`], an adapter onto `good_lp` with the pure-Rust `microlp` backend
//!
//! Logging levels:
//! - **DEBUG**: Solve start/end with model size and status
//! - **TRACE**: Backend translation details

pub mod backend;
pub mod error;
pub mod expr;
pub mod model;
pub mod result;
pub mod stats;
pub mod validate;

pub use backend::{MilpSolver, Solver};
pub use error::SolveError;
pub use expr::{Domain, LinearExpr};
pub use model::{Constraint, IntVar, Literal, Model, VarId, Variable, VariableKind};
pub use result::{SolveResult, SolveStatus};
pub use stats::SolveStats;
pub use validate::ValidationReport;
