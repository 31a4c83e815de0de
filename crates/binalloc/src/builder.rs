//! Constraint model construction.
//!
//! One boolean literal per (item, bin) pair, then four constraint families:
//! - replication: exactly `copies(item)` literals per item (always)
//! - capacity: per-bin literal count within `[0, capacity(bin)]`
//! - even distribution: minimize the largest per-bin surplus over the floor
//!   average
//! - churn: at most `max_churn()` prior (item, bin) pairs abandoned

use binalloc_core::{AllocateError, Bin, Item, ItemBin, Placement, Policy};
use binalloc_solver::{Domain, IntVar, LinearExpr, Literal, Model};
use tracing::debug;

use crate::allocator::Problem;

/// Dense `items x bins` arena of literals, row-major by item.
///
/// Rows are contiguous slices; columns are strided scans.
#[derive(Debug, Clone)]
pub struct LiteralTable {
    items: Vec<Item>,
    bins: Vec<Bin>,
    literals: Vec<Literal>,
}

impl LiteralTable {
    /// Creates one literal named `"<item> in <bin>"` for every pair.
    pub fn new(model: &mut Model, items: &[Item], bins: &[Bin]) -> Self {
        let mut literals = Vec::with_capacity(items.len() * bins.len());
        for &item in items {
            for &bin in bins {
                literals.push(model.new_literal(ItemBin::new(item, bin).to_string()));
            }
        }
        Self {
            items: items.to_vec(),
            bins: bins.to_vec(),
            literals,
        }
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn bins(&self) -> &[Bin] {
        &self.bins
    }

    pub fn len(&self) -> usize {
        self.literals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.literals.is_empty()
    }

    /// Literal for the item at `item_index` and the bin at `bin_index`.
    ///
    /// # Panics
    ///
    /// Panics if either index is out of range.
    pub fn get(&self, item_index: usize, bin_index: usize) -> Literal {
        assert!(bin_index < self.bins.len(), "bin index {} out of range", bin_index);
        self.literals[item_index * self.bins.len() + bin_index]
    }

    /// Literals of one item across all bins.
    pub fn row(&self, item_index: usize) -> &[Literal] {
        let width = self.bins.len();
        &self.literals[item_index * width..(item_index + 1) * width]
    }

    /// Literals of one bin across all items.
    pub fn column(&self, bin_index: usize) -> impl Iterator<Item = Literal> + '_ {
        let width = self.bins.len().max(1);
        self.literals.iter().skip(bin_index).step_by(width).copied()
    }

    /// Iterates over every pair with its literal, row by row.
    pub fn iter(&self) -> impl Iterator<Item = (ItemBin, Literal)> + '_ {
        let width = self.bins.len().max(1);
        self.literals.iter().enumerate().map(move |(i, &literal)| {
            let key = ItemBin::new(self.items[i / width], self.bins[i % width]);
            (key, literal)
        })
    }
}

/// A fully constrained model plus what is needed to decode its solution.
#[derive(Debug, Clone)]
pub struct BuiltModel {
    pub model: Model,
    pub literals: LiteralTable,
    /// The auxiliary maximum-surplus variable, when even distribution is on.
    pub max_surplus: Option<IntVar>,
    /// Number of prior (item, bin) pairs the churn bound covers.
    pub churn_candidates: Option<usize>,
}

/// Builds the constraint model for one round.
///
/// `prior` feeds the churn bound only. Prior entries for items or bins that
/// are no longer part of `problem` have no literal and are ignored.
///
/// # Errors
///
/// Returns [`AllocateError::EmptyBins`] if even distribution is enabled with
/// no bins.
pub fn build_model<P: Policy>(
    problem: &Problem<'_, P>,
    prior: Option<&Placement>,
) -> Result<BuiltModel, AllocateError> {
    let mut model = Model::new("allocator");
    let literals = LiteralTable::new(&mut model, problem.items, problem.bins);

    add_replication(&mut model, &literals, problem);

    if problem.options.capacity_checking() {
        add_capacity(&mut model, &literals, problem);
    }

    let max_surplus = if problem.options.even_distribution() {
        Some(add_even_distribution(&mut model, &literals, problem)?)
    } else {
        None
    };

    let churn_candidates = match prior {
        Some(prior) if problem.options.max_churn() && !prior.is_empty() => {
            Some(add_churn(&mut model, &literals, problem, prior))
        }
        _ => None,
    };

    Ok(BuiltModel {
        model,
        literals,
        max_surplus,
        churn_candidates,
    })
}

fn add_replication<P: Policy>(
    model: &mut Model,
    literals: &LiteralTable,
    problem: &Problem<'_, P>,
) {
    for (i, &item) in problem.items.iter().enumerate() {
        let copies = problem.policy.copies(item);
        model.add_exactly(i64::from(copies), literals.row(i).iter().copied());
    }
    debug!(event = "replication", constraints = problem.items.len());
}

fn add_capacity<P: Policy>(
    model: &mut Model,
    literals: &LiteralTable,
    problem: &Problem<'_, P>,
) {
    for (b, &bin) in problem.bins.iter().enumerate() {
        let placed = LinearExpr::sum_literals(literals.column(b));
        model.add_linear(placed, Domain::new(0, problem.policy.capacity(bin)));
    }
    debug!(event = "capacity", constraints = problem.bins.len());
}

fn add_even_distribution<P: Policy>(
    model: &mut Model,
    literals: &LiteralTable,
    problem: &Problem<'_, P>,
) -> Result<IntVar, AllocateError> {
    if problem.bins.is_empty() {
        return Err(AllocateError::EmptyBins);
    }

    // Floor average: with a remainder the best achievable max surplus is 1.
    let total = problem.policy.total_copies(problem.items);
    let avg = (total / problem.bins.len() as u64) as i64;

    let surpluses = (0..problem.bins.len())
        .map(|b| LinearExpr::sum_literals(literals.column(b)).plus_constant(-avg))
        .collect();

    let max_surplus = model.new_int_var(0, problem.max_surplus_bound, "max-surplus");
    model.add_max_equality(max_surplus, surpluses);
    model.minimize(max_surplus);

    debug!(event = "even_distribution", total_copies = total, avg);
    Ok(max_surplus)
}

fn add_churn<P: Policy>(
    model: &mut Model,
    literals: &LiteralTable,
    problem: &Problem<'_, P>,
    prior: &Placement,
) -> usize {
    let mut moved = Vec::new();
    for (i, &item) in problem.items.iter().enumerate() {
        for (b, &bin) in problem.bins.iter().enumerate() {
            if prior.contains(item, bin) {
                // True when this pair is abandoned.
                moved.push(literals.get(i, b).not());
            }
        }
    }

    let candidates = moved.len();
    let max_churn = problem.policy.max_churn();
    model.add_at_most(i64::from(max_churn), moved);

    debug!(event = "churn", candidates, max_churn);
    candidates
}
