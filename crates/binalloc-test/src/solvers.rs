//! Solver backends for exercising allocator failure paths.

use std::cell::Cell;

use binalloc_solver::{Model, SolveResult, SolveStats, SolveStatus, Solver};

/// Returns a fixed status without a solution, or all-false values.
///
/// # Example
///
/// ```
/// use binalloc_solver::{Model, SolveStatus, Solver};
/// use binalloc_test::StubSolver;
///
/// let result = StubSolver::new(SolveStatus::Unknown).solve(&Model::new("m"));
/// assert_eq!(result.status(), SolveStatus::Unknown);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct StubSolver {
    status: SolveStatus,
}

impl StubSolver {
    pub fn new(status: SolveStatus) -> Self {
        Self { status }
    }
}

impl Solver for StubSolver {
    fn name(&self) -> &str {
        "stub"
    }

    fn solve(&self, model: &Model) -> SolveResult {
        if self.status.has_solution() {
            let values = vec![0; model.variables().len()];
            SolveResult::with_values(self.status, values, SolveStats::default())
        } else {
            SolveResult::without_solution(self.status, SolveStats::default())
        }
    }
}

/// Wraps another backend and counts solve calls.
#[derive(Debug, Default)]
pub struct CountingSolver<S> {
    inner: S,
    calls: Cell<usize>,
}

impl<S> CountingSolver<S> {
    pub fn new(inner: S) -> Self {
        Self {
            inner,
            calls: Cell::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.get()
    }
}

impl<S: Solver> Solver for CountingSolver<S> {
    fn name(&self) -> &str {
        self.inner.name()
    }

    fn solve(&self, model: &Model) -> SolveResult {
        self.calls.set(self.calls.get() + 1);
        self.inner.solve(model)
    }
}
