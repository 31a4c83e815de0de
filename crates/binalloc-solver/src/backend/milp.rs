//! Mixed-integer adapter backed by `good_lp` and its pure-Rust `microlp` solver.
//!
//! Lowering:
//! - literals become binary variables and integer variables keep their bounds
//! - exactly-K / at-most-K become linear (in)equalities over `x` or `1 - x`
//! - `target = max(e_1..e_n)` becomes `target >= e_i` for every `i` plus one
//!   binary selector per expression with `target <= e_i + M_i * (1 - z_i)` and
//!   `sum(z) = 1`
//! - a max target is bounded by `[max_i lo(e_i), max_i hi(e_i)]` intersected
//!   with its declared domain, and `M_i = hi(target) - lo(e_i)` over those
//!   narrowed bounds
//!
//! microlp runs branch and bound to completion, so every solution it returns
//! is optimal.

use good_lp::solvers::microlp::microlp;
use good_lp::{
    constraint, variable, Constraint as LpConstraint, Expression, IntoAffineExpression,
    ProblemVariables, ResolutionError, Solution, SolverModel, Variable as LpVariable,
};
use tracing::{debug, trace};

use super::Solver;
use crate::error::SolveError;
use crate::expr::{Domain, LinearExpr};
use crate::model::{Constraint, Model, VarId};
use crate::result::{SolveResult, SolveStatus};
use crate::stats::SolveStats;

/// Exact MILP backend.
///
/// # Example
///
/// ```
/// use binalloc_solver::{MilpSolver, Model, Solver};
///
/// let mut model = Model::new("pick-one");
/// let a = model.new_literal("a");
/// let b = model.new_literal("b");
/// model.add_exactly(1, [a, b]);
/// model.minimize(a);
///
/// let result = MilpSolver::new().solve(&model);
/// assert!(result.is_optimal());
/// assert!(!result.boolean_value(a));
/// assert!(result.boolean_value(b));
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct MilpSolver;

impl MilpSolver {
    pub fn new() -> Self {
        Self
    }
}

impl Solver for MilpSolver {
    fn name(&self) -> &str {
        "microlp"
    }

    fn solve(&self, model: &Model) -> SolveResult {
        let report = model.validate();
        if !report.is_valid() {
            debug!(event = "milp_rejected", model = model.name(), issues = %report);
            let error = SolveError::Rejected(report.to_string());
            return SolveResult::failed(error, SolveStats::default());
        }

        let lowered = Lowered::new(model);
        if lowered.trivially_infeasible {
            debug!(event = "milp_presolve_infeasible", model = model.name());
            return SolveResult::without_solution(SolveStatus::Infeasible, SolveStats::default());
        }
        if lowered.vars.is_empty() {
            return SolveResult::with_values(SolveStatus::Optimal, Vec::new(), SolveStats::default());
        }
        let mut stats = SolveStats::new(lowered.variable_count, lowered.constraints.len());
        debug!(
            event = "milp_solve_start",
            model = model.name(),
            variables = stats.variables,
            constraints = stats.constraints,
        );

        let mut problem = lowered.problem.minimise(lowered.objective).using(microlp);
        for c in lowered.constraints {
            problem.add_constraint(c);
        }

        stats.start();
        let outcome = problem.solve();
        stats.finish();

        let result = match outcome {
            Ok(solution) => {
                let values = lowered
                    .vars
                    .iter()
                    .map(|&var| solution.value(var).round() as i64)
                    .collect();
                SolveResult::with_values(SolveStatus::Optimal, values, stats)
            }
            Err(ResolutionError::Infeasible) => {
                SolveResult::without_solution(SolveStatus::Infeasible, stats)
            }
            Err(err) => {
                debug!(event = "milp_error", error = %err);
                let error = SolveError::Backend {
                    backend: "microlp",
                    message: err.to_string(),
                };
                SolveResult::failed(error, stats)
            }
        };

        debug!(
            event = "milp_solve_end",
            status = %result.status(),
            duration_ms = result.stats().wall_time_ms(),
        );
        result
    }
}

/// A model translated into `good_lp` terms.
struct Lowered {
    problem: ProblemVariables,
    vars: Vec<LpVariable>,
    objective: Expression,
    constraints: Vec<LpConstraint>,
    variable_count: usize,
    /// A variable-free constraint evaluated to false.
    trivially_infeasible: bool,
}

impl Lowered {
    fn new(model: &Model) -> Self {
        let bounds = variable_bounds(model);
        let mut trivially_infeasible = bounds.iter().any(Domain::is_empty);

        let mut problem = ProblemVariables::new();
        let vars: Vec<LpVariable> = model
            .variables()
            .iter()
            .zip(&bounds)
            .map(|(v, &narrowed)| {
                // An empty range is already infeasible; keep the declared one for the backend.
                let domain = if narrowed.is_empty() { v.domain() } else { narrowed };
                problem.add(
                    variable()
                        .integer()
                        .min(domain.lo() as f64)
                        .max(domain.hi() as f64)
                        .name(v.name()),
                )
            })
            .collect();
        let mut variable_count = vars.len();

        let mut constraints = Vec::new();
        for c in model.constraints() {
            match c {
                // Variable-free rows are decided here rather than handed to the backend.
                Constraint::ExactlyK { k, literals } if literals.is_empty() => {
                    trivially_infeasible |= *k != 0;
                }
                Constraint::AtMostK { k, literals } if literals.is_empty() => {
                    trivially_infeasible |= *k < 0;
                }
                Constraint::Linear { expr, domain } if expr.terms().is_empty() => {
                    trivially_infeasible |= !domain.contains(expr.constant());
                }
                Constraint::ExactlyK { k, literals } => {
                    let count = lower(&LinearExpr::sum_literals(literals.iter().copied()), &vars);
                    constraints.push(constraint::eq(count, *k as f64));
                }
                Constraint::AtMostK { k, literals } => {
                    let count = lower(&LinearExpr::sum_literals(literals.iter().copied()), &vars);
                    constraints.push(constraint::leq(count, *k as f64));
                }
                Constraint::Linear { expr, domain } => {
                    let value = lower(expr, &vars);
                    if domain.lo() == domain.hi() {
                        constraints.push(constraint::eq(value, domain.lo() as f64));
                    } else {
                        constraints.push(constraint::geq(value.clone(), domain.lo() as f64));
                        constraints.push(constraint::leq(value, domain.hi() as f64));
                    }
                }
                Constraint::MaxEquality { target, exprs } => {
                    let target_expr = vars[target.id().index()].into_expression();
                    let target_hi = bounds[target.id().index()].hi();
                    let target_name = model.variable(target.id()).map_or("max", |v| v.name());
                    let mut selected = 0.0_f64.into_expression();

                    for (i, expr) in exprs.iter().enumerate() {
                        let value = lower(expr, &vars);
                        let lowest = expr.bounds(|id| model.domain_of(id)).lo();
                        let big_m = selector_bound(target_hi, lowest);
                        let z = problem.add(
                            variable()
                                .binary()
                                .name(format!("{}#select{}", target_name, i)),
                        );
                        variable_count += 1;
                        trace!(event = "milp_max_selector", index = i, big_m);

                        constraints.push(constraint::geq(target_expr.clone(), value.clone()));
                        constraints.push(constraint::leq(
                            target_expr.clone() - value + (big_m as f64) * z,
                            big_m as f64,
                        ));
                        selected += z;
                    }
                    constraints.push(constraint::eq(selected, 1.0));
                }
            }
        }

        let objective = model
            .objective()
            .map(|expr| lower(expr, &vars))
            .unwrap_or_else(|| 0.0_f64.into_expression());

        Self {
            problem,
            vars,
            objective,
            constraints,
            variable_count,
            trivially_infeasible,
        }
    }
}

/// Declared variable domains, with every max-equality target narrowed to the
/// range its expressions can reach.
fn variable_bounds(model: &Model) -> Vec<Domain> {
    let declared = |id: VarId| model.domain_of(id);
    let mut bounds: Vec<Domain> = model.variables().iter().map(|v| v.domain()).collect();

    for c in model.constraints() {
        if let Constraint::MaxEquality { target, exprs } = c {
            let (lo, hi) = exprs
                .iter()
                .map(|expr| expr.bounds(declared))
                .fold((i64::MIN, i64::MIN), |(lo, hi), d| {
                    (lo.max(d.lo()), hi.max(d.hi()))
                });
            let slot = &mut bounds[target.id().index()];
            *slot = Domain::new(slot.lo().max(lo), slot.hi().min(hi));
        }
    }
    bounds
}

/// Big-M for one selector row: the widest gap between the target and an
/// expression. Zero when the expression can never fall below the target bound.
fn selector_bound(target_hi: i64, expr_lo: i64) -> i64 {
    target_hi.saturating_sub(expr_lo).max(0)
}

fn lower(expr: &LinearExpr, vars: &[LpVariable]) -> Expression {
    let mut out = (expr.constant() as f64).into_expression();
    for &(var, coefficient) in expr.terms() {
        out += (coefficient as f64) * vars[var.index()];
    }
    out
}
