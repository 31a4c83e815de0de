//! Structural validation of models.

use std::fmt;

use crate::expr::LinearExpr;
use crate::model::{Constraint, Literal, Model, VarId, VariableKind};

/// Structural defects found in a model.
///
/// An empty report means the model is well formed. Well formed does not mean
/// feasible: an exactly-K over fewer than K literals is left to the solver.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationReport {
    issues: Vec<String>,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.issues.is_empty()
    }

    pub fn issues(&self) -> &[String] {
        &self.issues
    }

    pub fn into_issues(self) -> Vec<String> {
        self.issues
    }

    fn push(&mut self, issue: String) {
        self.issues.push(issue);
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_valid() {
            return write!(f, "valid");
        }
        write!(f, "{}", self.issues.join("; "))
    }
}

pub(crate) fn validate(model: &Model) -> ValidationReport {
    let mut report = ValidationReport::default();

    for variable in model.variables() {
        if variable.domain().is_empty() {
            report.push(format!(
                "variable {} has empty domain {}",
                variable.name(),
                variable.domain()
            ));
        }
    }

    for (index, constraint) in model.constraints().iter().enumerate() {
        match constraint {
            Constraint::ExactlyK { k, literals } | Constraint::AtMostK { k, literals } => {
                if *k < 0 {
                    report.push(format!("constraint {}: negative bound {}", index, k));
                }
                check_literals(model, index, literals, &mut report);
            }
            Constraint::Linear { expr, domain } => {
                if domain.is_empty() {
                    report.push(format!("constraint {}: empty domain {}", index, domain));
                }
                check_expr(model, index, expr, &mut report);
            }
            Constraint::MaxEquality { target, exprs } => {
                if exprs.is_empty() {
                    report.push(format!("constraint {}: maximum of no expressions", index));
                }
                check_var(model, index, target.id(), &mut report);
                for expr in exprs {
                    check_expr(model, index, expr, &mut report);
                }
            }
        }
    }

    if let Some(objective) = model.objective() {
        for &(var, _) in objective.terms() {
            if model.variable(var).is_none() {
                report.push(format!("objective: unknown variable #{}", var.index()));
            }
        }
    }

    report
}

fn check_var(model: &Model, index: usize, var: VarId, report: &mut ValidationReport) {
    if model.variable(var).is_none() {
        report.push(format!(
            "constraint {}: unknown variable #{}",
            index,
            var.index()
        ));
    }
}

fn check_literals(model: &Model, index: usize, literals: &[Literal], report: &mut ValidationReport) {
    for literal in literals {
        match model.variable(literal.var()) {
            None => check_var(model, index, literal.var(), report),
            Some(variable) if variable.kind() != VariableKind::Boolean => {
                report.push(format!(
                    "constraint {}: {} is not a boolean variable",
                    index,
                    variable.name()
                ));
            }
            Some(_) => {}
        }
    }
}

fn check_expr(model: &Model, index: usize, expr: &LinearExpr, report: &mut ValidationReport) {
    for &(var, _) in expr.terms() {
        check_var(model, index, var, report);
    }
}
