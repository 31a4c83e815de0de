//! Linear expressions and integer domains.

use std::fmt;

use crate::model::{IntVar, Literal, VarId};

/// A closed integer interval `[lo, hi]`.
///
/// # Example
///
/// ```
/// use binalloc_solver::Domain;
///
/// let capacity = Domain::new(0, 10);
/// assert!(capacity.contains(10));
/// assert!(!capacity.contains(11));
/// assert!(Domain::new(3, 2).is_empty());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Domain {
    lo: i64,
    hi: i64,
}

impl Domain {
    pub const BOOLEAN: Domain = Domain { lo: 0, hi: 1 };

    pub fn new(lo: i64, hi: i64) -> Self {
        Self { lo, hi }
    }

    pub fn lo(&self) -> i64 {
        self.lo
    }

    pub fn hi(&self) -> i64 {
        self.hi
    }

    pub fn is_empty(&self) -> bool {
        self.lo > self.hi
    }

    pub fn contains(&self, value: i64) -> bool {
        self.lo <= value && value <= self.hi
    }
}

impl fmt::Display for Domain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.lo, self.hi)
    }
}

/// `constant + sum(coefficient * variable)`.
///
/// Negated literals are folded in as `1 - x`, so every term refers to a
/// positive variable.
///
/// # Example
///
/// ```
/// use binalloc_solver::{LinearExpr, Model};
///
/// let mut model = Model::new("example");
/// let a = model.new_literal("a");
/// let b = model.new_literal("b");
///
/// // (a) + (1 - b) - 2
/// let expr = LinearExpr::sum_literals([a, b.not()]).plus_constant(-2);
/// assert_eq!(expr.constant(), -1);
/// assert_eq!(expr.terms().len(), 2);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LinearExpr {
    terms: Vec<(VarId, i64)>,
    constant: i64,
}

impl LinearExpr {
    /// Creates the constant expression `0`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a constant expression.
    pub fn constant_expr(constant: i64) -> Self {
        Self {
            terms: Vec::new(),
            constant,
        }
    }

    /// Builds `offset + sum(coefficients[i] * literals[i])`.
    ///
    /// Extra entries in the longer slice are ignored.
    pub fn weighted_literals(literals: &[Literal], coefficients: &[i64], offset: i64) -> Self {
        let mut expr = Self::constant_expr(offset);
        for (&literal, &coefficient) in literals.iter().zip(coefficients) {
            expr.add_literal(literal, coefficient);
        }
        expr
    }

    /// Builds the count of true literals.
    pub fn sum_literals(literals: impl IntoIterator<Item = Literal>) -> Self {
        let mut expr = Self::new();
        for literal in literals {
            expr.add_literal(literal, 1);
        }
        expr
    }

    /// Builds the sum of integer variables.
    pub fn sum_vars(vars: impl IntoIterator<Item = IntVar>) -> Self {
        let mut expr = Self::new();
        for var in vars {
            expr.add_var(var, 1);
        }
        expr
    }

    /// Adds `coefficient * literal`, rewriting a negated literal as `1 - x`.
    pub fn add_literal(&mut self, literal: Literal, coefficient: i64) -> &mut Self {
        if literal.is_negated() {
            self.constant += coefficient;
            self.terms.push((literal.var(), -coefficient));
        } else {
            self.terms.push((literal.var(), coefficient));
        }
        self
    }

    /// Adds `coefficient * var`.
    pub fn add_var(&mut self, var: IntVar, coefficient: i64) -> &mut Self {
        self.terms.push((var.id(), coefficient));
        self
    }

    pub fn plus_constant(mut self, constant: i64) -> Self {
        self.constant += constant;
        self
    }

    pub fn terms(&self) -> &[(VarId, i64)] {
        &self.terms
    }

    pub fn constant(&self) -> i64 {
        self.constant
    }

    /// Evaluates the expression under `value`.
    pub fn evaluate(&self, mut value: impl FnMut(VarId) -> i64) -> i64 {
        self.terms
            .iter()
            .fold(self.constant, |acc, &(var, coefficient)| {
                acc + coefficient * value(var)
            })
    }

    /// Returns the tightest bounds implied by per-variable bounds, saturating at
    /// the `i64` range.
    pub fn bounds(&self, mut domain: impl FnMut(VarId) -> Domain) -> Domain {
        let (mut lo, mut hi) = (self.constant, self.constant);
        for &(var, coefficient) in &self.terms {
            let d = domain(var);
            let (low, high) = if coefficient >= 0 {
                (d.lo(), d.hi())
            } else {
                (d.hi(), d.lo())
            };
            lo = lo.saturating_add(coefficient.saturating_mul(low));
            hi = hi.saturating_add(coefficient.saturating_mul(high));
        }
        Domain::new(lo, hi)
    }
}

impl From<IntVar> for LinearExpr {
    fn from(var: IntVar) -> Self {
        let mut expr = Self::new();
        expr.add_var(var, 1);
        expr
    }
}

impl From<Literal> for LinearExpr {
    fn from(literal: Literal) -> Self {
        let mut expr = Self::new();
        expr.add_literal(literal, 1);
        expr
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Model;

    #[test]
    fn test_negated_literal_folds_constant() {
        let mut model = Model::new("t");
        let a = model.new_literal("a");
        let expr = LinearExpr::from(a.not());

        assert_eq!(expr.constant(), 1);
        assert_eq!(expr.terms(), &[(a.var(), -1)]);
        assert_eq!(expr.evaluate(|_| 1), 0);
        assert_eq!(expr.evaluate(|_| 0), 1);
    }

    #[test]
    fn test_weighted_literals() {
        let mut model = Model::new("t");
        let lits = [model.new_literal("a"), model.new_literal("b")];
        let expr = LinearExpr::weighted_literals(&lits, &[1, 1], -3);

        assert_eq!(expr.evaluate(|_| 1), -1);
        assert_eq!(expr.bounds(|_| Domain::BOOLEAN), Domain::new(-3, -1));
    }

    #[test]
    fn test_bounds_with_negative_coefficient() {
        let mut model = Model::new("t");
        let x = model.new_int_var(2, 5, "x");
        let mut expr = LinearExpr::constant_expr(10);
        expr.add_var(x, -2);

        assert_eq!(expr.bounds(|_| Domain::new(2, 5)), Domain::new(0, 6));
    }

    #[test]
    fn test_bounds_saturate() {
        let mut model = Model::new("t");
        let x = model.new_int_var(-1, i64::MAX, "x");
        let mut expr = LinearExpr::constant_expr(-5);
        expr.add_var(x, 3);

        assert_eq!(
            expr.bounds(|_| Domain::new(-1, i64::MAX)),
            Domain::new(-8, i64::MAX - 5)
        );
    }

    #[test]
    fn test_domain_display() {
        assert_eq!(Domain::new(0, 10).to_string(), "[0, 10]");
    }
}
