//! Solving backends.
//!
//! Orchestration code depends on the [`Solver`] trait only; each concrete
//! engine lives behind its own adapter.

mod milp;

pub use milp::MilpSolver;

use crate::model::Model;
use crate::result::SolveResult;

/// Solves a validated [`Model`].
///
/// Implementations may block for as long as the search takes. A backend with
/// a deadline reports [`SolveStatus::Feasible`](crate::SolveStatus::Feasible)
/// or [`SolveStatus::Unknown`](crate::SolveStatus::Unknown) when it runs out.
pub trait Solver {
    /// Short backend name used in logs.
    fn name(&self) -> &str;

    /// Solves `model`, which the caller has already validated.
    fn solve(&self, model: &Model) -> SolveResult;
}

impl<S: Solver + ?Sized> Solver for &S {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn solve(&self, model: &Model) -> SolveResult {
        (**self).solve(model)
    }
}

impl<S: Solver + ?Sized> Solver for Box<S> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn solve(&self, model: &Model) -> SolveResult {
        (**self).solve(model)
    }
}
