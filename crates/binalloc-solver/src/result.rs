//! Solve outcomes.

use std::fmt;

use crate::error::SolveError;
use crate::model::{IntVar, Literal, VarId};
use crate::stats::SolveStats;

/// Terminal status of a solve.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolveStatus {
    /// A solution was found and proven optimal (or merely feasible when the
    /// model has no objective).
    Optimal,
    /// A solution was found without a proof of optimality.
    Feasible,
    /// No assignment satisfies the constraints.
    Infeasible,
    /// The solver stopped without a usable answer.
    Unknown,
}

impl SolveStatus {
    /// Returns true if variable values are available.
    pub fn has_solution(self) -> bool {
        matches!(self, SolveStatus::Optimal | SolveStatus::Feasible)
    }
}

impl fmt::Display for SolveStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SolveStatus::Optimal => "optimal",
            SolveStatus::Feasible => "feasible",
            SolveStatus::Infeasible => "infeasible",
            SolveStatus::Unknown => "unknown",
        };
        f.write_str(s)
    }
}

/// Status plus the valuation of every model variable.
#[derive(Debug, Clone)]
pub struct SolveResult {
    status: SolveStatus,
    values: Vec<i64>,
    stats: SolveStats,
    error: Option<SolveError>,
}

impl SolveResult {
    /// Creates a result carrying `values`, indexed by variable.
    pub fn with_values(status: SolveStatus, values: Vec<i64>, stats: SolveStats) -> Self {
        Self {
            status,
            values,
            stats,
            error: None,
        }
    }

    /// Creates a result with no valuation.
    pub fn without_solution(status: SolveStatus, stats: SolveStats) -> Self {
        Self::with_values(status, Vec::new(), stats)
    }

    /// Creates an [`Unknown`](SolveStatus::Unknown) result carrying why.
    pub fn failed(error: SolveError, stats: SolveStats) -> Self {
        Self {
            error: Some(error),
            ..Self::without_solution(SolveStatus::Unknown, stats)
        }
    }

    pub fn status(&self) -> SolveStatus {
        self.status
    }

    pub fn is_optimal(&self) -> bool {
        self.status == SolveStatus::Optimal
    }

    pub fn stats(&self) -> &SolveStats {
        &self.stats
    }

    pub fn error(&self) -> Option<&SolveError> {
        self.error.as_ref()
    }

    /// Returns the raw value of a variable, if a solution is available.
    pub fn value(&self, var: VarId) -> Option<i64> {
        if !self.status.has_solution() {
            return None;
        }
        self.values.get(var.index()).copied()
    }

    /// Returns whether `literal` is true. False when no solution is available.
    pub fn boolean_value(&self, literal: Literal) -> bool {
        match self.value(literal.var()) {
            Some(v) => (v != 0) != literal.is_negated(),
            None => false,
        }
    }

    pub fn int_value(&self, var: IntVar) -> Option<i64> {
        self.value(var.id())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Model;

    #[test]
    fn test_boolean_value_respects_negation() {
        let mut model = Model::new("t");
        let a = model.new_literal("a");
        let b = model.new_literal("b");
        let result =
            SolveResult::with_values(SolveStatus::Optimal, vec![1, 0], SolveStats::default());

        assert!(result.boolean_value(a));
        assert!(!result.boolean_value(a.not()));
        assert!(!result.boolean_value(b));
        assert!(result.boolean_value(b.not()));
    }

    #[test]
    fn test_no_values_without_solution() {
        let mut model = Model::new("t");
        let x = model.new_int_var(0, 9, "x");
        let result = SolveResult::with_values(
            SolveStatus::Infeasible,
            vec![4],
            SolveStats::default(),
        );

        assert!(!result.is_optimal());
        assert_eq!(result.int_value(x), None);
        let lit = model.new_literal("l");
        assert!(!result.boolean_value(lit));
        assert!(!result.boolean_value(lit.not()));
    }

    #[test]
    fn test_failed_carries_error() {
        let error = SolveError::Backend {
            backend: "microlp",
            message: "unbounded".into(),
        };
        let result = SolveResult::failed(error.clone(), SolveStats::default());

        assert_eq!(result.status(), SolveStatus::Unknown);
        assert_eq!(result.error(), Some(&error));
        assert_eq!(error.to_string(), "microlp failed: unbounded");
        assert!(SolveResult::without_solution(SolveStatus::Infeasible, SolveStats::default())
            .error()
            .is_none());
    }

    #[test]
    fn test_status_display() {
        assert_eq!(SolveStatus::Optimal.to_string(), "optimal");
        assert_eq!(SolveStatus::Unknown.to_string(), "unknown");
        assert!(SolveStatus::Feasible.has_solution());
        assert!(!SolveStatus::Unknown.has_solution());
    }
}
