//! Backend-neutral constraint models.
//!
//! A [`Model`] owns its variables; [`Literal`] and [`IntVar`] are plain
//! handles into it. Handles are only meaningful for the model that created
//! them, and a fresh model must be built for every solve.

use std::fmt;

use crate::expr::{Domain, LinearExpr};
use crate::validate::{self, ValidationReport};

/// Index of a variable inside its model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct VarId(u32);

impl VarId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// A boolean decision variable, possibly negated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Literal {
    var: VarId,
    negated: bool,
}

impl Literal {
    /// Returns the literal that is true exactly when this one is false.
    #[allow(clippy::should_implement_trait)]
    pub fn not(self) -> Self {
        Self {
            var: self.var,
            negated: !self.negated,
        }
    }

    pub fn var(self) -> VarId {
        self.var
    }

    pub fn is_negated(self) -> bool {
        self.negated
    }
}

/// A bounded integer decision variable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct IntVar(VarId);

impl IntVar {
    pub fn id(self) -> VarId {
        self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VariableKind {
    Boolean,
    Integer,
}

/// A variable definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Variable {
    name: String,
    kind: VariableKind,
    domain: Domain,
}

impl Variable {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> VariableKind {
        self.kind
    }

    pub fn domain(&self) -> Domain {
        self.domain
    }
}

/// The constraint kinds a model can hold.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Constraint {
    /// Exactly `k` of `literals` are true.
    ExactlyK { k: i64, literals: Vec<Literal> },
    /// At most `k` of `literals` are true.
    AtMostK { k: i64, literals: Vec<Literal> },
    /// The value of `expr` lies in `domain`.
    Linear { expr: LinearExpr, domain: Domain },
    /// `target` equals the maximum of `exprs`.
    MaxEquality {
        target: IntVar,
        exprs: Vec<LinearExpr>,
    },
}

/// A constraint optimization model.
///
/// # Example
///
/// ```
/// use binalloc_solver::{Domain, LinearExpr, Model};
///
/// let mut model = Model::new("example");
/// let a = model.new_literal("a");
/// let b = model.new_literal("b");
/// model.add_exactly(1, [a, b]);
/// model.add_linear(LinearExpr::sum_literals([a, b]), Domain::new(0, 1));
///
/// assert!(model.validate().is_valid());
/// assert_eq!(model.constraints().len(), 2);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Model {
    name: String,
    variables: Vec<Variable>,
    constraints: Vec<Constraint>,
    objective: Option<LinearExpr>,
}

impl Model {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    fn push_variable(&mut self, name: String, kind: VariableKind, domain: Domain) -> VarId {
        let id = VarId(self.variables.len() as u32);
        self.variables.push(Variable { name, kind, domain });
        id
    }

    /// Creates a named boolean literal.
    pub fn new_literal(&mut self, name: impl Into<String>) -> Literal {
        let var = self.push_variable(name.into(), VariableKind::Boolean, Domain::BOOLEAN);
        Literal {
            var,
            negated: false,
        }
    }

    /// Creates a named integer variable bounded by `[lo, hi]`.
    pub fn new_int_var(&mut self, lo: i64, hi: i64, name: impl Into<String>) -> IntVar {
        IntVar(self.push_variable(name.into(), VariableKind::Integer, Domain::new(lo, hi)))
    }

    pub fn add_constraint(&mut self, constraint: Constraint) {
        self.constraints.push(constraint);
    }

    pub fn add_exactly(&mut self, k: i64, literals: impl IntoIterator<Item = Literal>) {
        self.add_constraint(Constraint::ExactlyK {
            k,
            literals: literals.into_iter().collect(),
        });
    }

    pub fn add_at_most(&mut self, k: i64, literals: impl IntoIterator<Item = Literal>) {
        self.add_constraint(Constraint::AtMostK {
            k,
            literals: literals.into_iter().collect(),
        });
    }

    pub fn add_linear(&mut self, expr: LinearExpr, domain: Domain) {
        self.add_constraint(Constraint::Linear { expr, domain });
    }

    pub fn add_max_equality(&mut self, target: IntVar, exprs: Vec<LinearExpr>) {
        self.add_constraint(Constraint::MaxEquality { target, exprs });
    }

    /// Sets the expression to minimize, replacing any previous objective.
    pub fn minimize(&mut self, expr: impl Into<LinearExpr>) {
        self.objective = Some(expr.into());
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn variables(&self) -> &[Variable] {
        &self.variables
    }

    pub fn variable(&self, id: VarId) -> Option<&Variable> {
        self.variables.get(id.index())
    }

    pub fn constraints(&self) -> &[Constraint] {
        &self.constraints
    }

    pub fn objective(&self) -> Option<&LinearExpr> {
        self.objective.as_ref()
    }

    /// Returns the declared domain of `id`, or the empty domain for a
    /// handle this model does not own.
    pub fn domain_of(&self, id: VarId) -> Domain {
        self.variable(id)
            .map(Variable::domain)
            .unwrap_or(Domain::new(1, 0))
    }

    /// Checks the model for structural defects.
    pub fn validate(&self) -> ValidationReport {
        validate::validate(self)
    }

    fn var_name(&self, id: VarId) -> &str {
        self.variable(id).map(Variable::name).unwrap_or("<unknown>")
    }

    fn fmt_literal(&self, f: &mut fmt::Formatter<'_>, literal: Literal) -> fmt::Result {
        if literal.is_negated() {
            write!(f, "!")?;
        }
        write!(f, "{}", self.var_name(literal.var()))
    }

    fn fmt_literals(&self, f: &mut fmt::Formatter<'_>, literals: &[Literal]) -> fmt::Result {
        write!(f, "[")?;
        for (i, &literal) in literals.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            self.fmt_literal(f, literal)?;
        }
        write!(f, "]")
    }

    fn fmt_expr(&self, f: &mut fmt::Formatter<'_>, expr: &LinearExpr) -> fmt::Result {
        for (i, &(var, coefficient)) in expr.terms().iter().enumerate() {
            if i > 0 {
                write!(f, " + ")?;
            }
            if coefficient == 1 {
                write!(f, "{}", self.var_name(var))?;
            } else {
                write!(f, "{}*{}", coefficient, self.var_name(var))?;
            }
        }
        match (expr.terms().is_empty(), expr.constant()) {
            (true, c) => write!(f, "{}", c),
            (false, 0) => Ok(()),
            (false, c) => write!(f, " + {}", c),
        }
    }
}

impl fmt::Display for Model {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "model {:?}: {} variables, {} constraints",
            self.name,
            self.variables.len(),
            self.constraints.len()
        )?;
        for variable in &self.variables {
            if variable.kind == VariableKind::Integer {
                writeln!(f, "  int {} in {}", variable.name, variable.domain)?;
            }
        }
        for constraint in &self.constraints {
            write!(f, "  ")?;
            match constraint {
                Constraint::ExactlyK { k, literals } => {
                    write!(f, "exactly {} of ", k)?;
                    self.fmt_literals(f, literals)?;
                }
                Constraint::AtMostK { k, literals } => {
                    write!(f, "at most {} of ", k)?;
                    self.fmt_literals(f, literals)?;
                }
                Constraint::Linear { expr, domain } => {
                    self.fmt_expr(f, expr)?;
                    write!(f, " in {}", domain)?;
                }
                Constraint::MaxEquality { target, exprs } => {
                    write!(f, "{} == max(", self.var_name(target.id()))?;
                    for (i, expr) in exprs.iter().enumerate() {
                        if i > 0 {
                            write!(f, ", ")?;
                        }
                        self.fmt_expr(f, expr)?;
                    }
                    write!(f, ")")?;
                }
            }
            writeln!(f)?;
        }
        if let Some(objective) = &self.objective {
            write!(f, "  minimize ")?;
            self.fmt_expr(f, objective)?;
            writeln!(f)?;
        }
        Ok(())
    }
}
