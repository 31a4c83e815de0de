//! Allocation rounds and the stateful allocator.
//!
//! Logging levels:
//! - **INFO**: Round start/end with problem scale, churn and duration
//! - **WARN**: Models rejected by validation
//! - **DEBUG**: Constraint families and the full model dump

use std::time::Instant;

use binalloc_config::{AllocatorConfig, SolverSettings};
use binalloc_core::ids::sequential;
use binalloc_core::{
    AllocateError, AllocationOptions, Bin, Item, Placement, Policy, Resource, UniformPolicy,
};
use binalloc_solver::{MilpSolver, Solver};
use tracing::{debug, info, warn};

use crate::builder::build_model;
use crate::decoder::decode;

/// Everything one round needs besides the prior placement.
#[derive(Debug, Clone)]
pub struct Problem<'a, P = UniformPolicy> {
    pub items: &'a [Item],
    pub bins: &'a [Bin],
    pub resources: &'a [Resource],
    pub policy: P,
    pub options: AllocationOptions,
    /// Upper bound of the auxiliary max-surplus variable.
    pub max_surplus_bound: i64,
}

impl<'a> Problem<'a> {
    /// Creates a problem with the reference policy and all families enabled.
    pub fn new(items: &'a [Item], bins: &'a [Bin], resources: &'a [Resource]) -> Self {
        Self {
            items,
            bins,
            resources,
            policy: UniformPolicy::default(),
            options: AllocationOptions::default(),
            max_surplus_bound: SolverSettings::DEFAULT_MAX_SURPLUS_BOUND,
        }
    }
}

impl<'a, P> Problem<'a, P> {
    pub fn with_policy<Q: Policy>(self, policy: Q) -> Problem<'a, Q> {
        Problem {
            items: self.items,
            bins: self.bins,
            resources: self.resources,
            policy,
            options: self.options,
            max_surplus_bound: self.max_surplus_bound,
        }
    }

    pub fn with_options(mut self, options: AllocationOptions) -> Self {
        self.options = options;
        self
    }

    pub fn with_max_surplus_bound(mut self, bound: i64) -> Self {
        self.max_surplus_bound = bound;
        self
    }
}

/// Runs one allocation round.
///
/// `prior` is the placement of the previous round, if any; it only feeds the
/// churn bound. The returned placement is meant to become the next round's
/// prior.
///
/// # Errors
///
/// Fails without a placement when the model is invalid, infeasible, or not
/// solved to optimality.
///
/// # Example
///
/// ```
/// use binalloc::prelude::*;
///
/// let items: Vec<Item> = (0..4).map(Item).collect();
/// let bins: Vec<Bin> = (0..2).map(Bin).collect();
/// let problem = Problem::new(&items, &bins, &[]);
///
/// let first = allocate_round(&problem, &MilpSolver::new(), None).unwrap();
/// let second = allocate_round(&problem, &MilpSolver::new(), Some(&first)).unwrap();
/// assert_eq!(second.occupancy(), first.occupancy());
/// ```
pub fn allocate_round<P: Policy, S: Solver>(
    problem: &Problem<'_, P>,
    solver: &S,
    prior: Option<&Placement>,
) -> Result<Placement, AllocateError> {
    let start = Instant::now();
    info!(
        event = "allocate_start",
        items = problem.items.len(),
        bins = problem.bins.len(),
        resources = problem.resources.len(),
        prior = prior.map_or(0, Placement::len),
        solver = solver.name(),
    );

    let built = build_model(problem, prior)?;
    debug!("{}", built.model);

    let report = built.model.validate();
    if !report.is_valid() {
        warn!(event = "invalid_model", issues = %report);
        return Err(AllocateError::InvalidModel(report.into_issues()));
    }

    let result = solver.solve(&built.model);
    let placement = match decode(&result, &built.literals) {
        Ok(placement) => placement,
        Err(err) => {
            info!(
                event = "allocate_failed",
                status = %result.status(),
                error = ?result.error(),
                duration_ms = start.elapsed().as_millis() as u64,
            );
            return Err(err);
        }
    };

    info!(
        event = "allocate_end",
        placed = placement.len(),
        churn = prior.map_or(0, |p| placement.moved_from(p)),
        max_surplus = built.max_surplus.and_then(|m| result.int_value(m)),
        duration_ms = start.elapsed().as_millis() as u64,
    );
    Ok(placement)
}

/// Owns the item set, bin set, options and last placement across rounds.
///
/// Not safe to share between threads without external serialization: every
/// mutator and [`allocate`](Self::allocate) takes `&mut self`.
///
/// # Example
///
/// ```
/// use binalloc::prelude::*;
///
/// let mut allocator = Allocator::new(5, 3, 1);
/// allocator.allocate().unwrap();
///
/// allocator.add_item();
/// let placement = allocator.allocate().unwrap();
/// assert_eq!(placement.len(), 6);
/// ```
#[derive(Debug, Clone)]
pub struct Allocator<P = UniformPolicy, S = MilpSolver> {
    items: Vec<Item>,
    bins: Vec<Bin>,
    resources: Vec<Resource>,
    policy: P,
    solver: S,
    options: AllocationOptions,
    max_surplus_bound: i64,
    last_placement: Placement,
}

impl Allocator {
    /// Creates `items`, `bins` and `resources` sequential identifiers starting
    /// at zero. No solving happens here.
    pub fn new(items: usize, bins: usize, resources: usize) -> Self {
        Self {
            items: sequential(items),
            bins: sequential(bins),
            resources: sequential(resources),
            policy: UniformPolicy::default(),
            solver: MilpSolver::new(),
            options: AllocationOptions::default(),
            max_surplus_bound: SolverSettings::DEFAULT_MAX_SURPLUS_BOUND,
            last_placement: Placement::new(),
        }
    }

    /// Creates an allocator whose options, policy and settings come from `config`.
    pub fn from_config(
        items: usize,
        bins: usize,
        resources: usize,
        config: &AllocatorConfig,
    ) -> Self {
        Self::new(items, bins, resources)
            .with_policy(config.policy())
            .with_options(config.options)
            .with_max_surplus_bound(config.solver.max_surplus_bound)
    }
}

impl<P, S> Allocator<P, S> {
    /// Replaces the policy.
    pub fn with_policy<Q: Policy>(self, policy: Q) -> Allocator<Q, S> {
        Allocator {
            items: self.items,
            bins: self.bins,
            resources: self.resources,
            policy,
            solver: self.solver,
            options: self.options,
            max_surplus_bound: self.max_surplus_bound,
            last_placement: self.last_placement,
        }
    }

    /// Replaces the solving backend.
    pub fn with_solver<T>(self, solver: T) -> Allocator<P, T> {
        Allocator {
            items: self.items,
            bins: self.bins,
            resources: self.resources,
            policy: self.policy,
            solver,
            options: self.options,
            max_surplus_bound: self.max_surplus_bound,
            last_placement: self.last_placement,
        }
    }

    pub fn with_options(mut self, options: AllocationOptions) -> Self {
        self.options = options;
        self
    }

    pub fn with_max_surplus_bound(mut self, bound: i64) -> Self {
        self.max_surplus_bound = bound;
        self
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn bins(&self) -> &[Bin] {
        &self.bins
    }

    pub fn resources(&self) -> &[Resource] {
        &self.resources
    }

    pub fn policy(&self) -> &P {
        &self.policy
    }

    pub fn solver(&self) -> &S {
        &self.solver
    }

    pub fn options(&self) -> &AllocationOptions {
        &self.options
    }

    /// Options are meant to be set before the first round.
    pub fn options_mut(&mut self) -> &mut AllocationOptions {
        &mut self.options
    }

    /// The placement of the last successful round; empty before the first.
    pub fn last_placement(&self) -> &Placement {
        &self.last_placement
    }

    /// Appends an item with the next identifier and returns it.
    ///
    /// Takes effect on the next [`allocate`](Self::allocate).
    pub fn add_item(&mut self) -> Item {
        let item = self.items.last().map_or(Item(0), |last| last.next());
        self.items.push(item);
        item
    }

    /// Removes the item with the highest identifier and returns it.
    ///
    /// Its entry in the last placement stays but no longer counts as churn.
    pub fn drop_item(&mut self) -> Option<Item> {
        self.items.pop()
    }
}

impl<P: Policy, S> Allocator<P, S> {
    /// The problem the next round will solve.
    pub fn problem(&self) -> Problem<'_, &P> {
        Problem {
            items: &self.items,
            bins: &self.bins,
            resources: &self.resources,
            policy: &self.policy,
            options: self.options,
            max_surplus_bound: self.max_surplus_bound,
        }
    }
}

impl<P: Policy, S: Solver> Allocator<P, S> {
    /// Runs one round against the last placement.
    ///
    /// On success the new placement replaces the last placement wholesale.
    /// On failure the last placement is left untouched.
    pub fn allocate(&mut self) -> Result<&Placement, AllocateError> {
        let prior = Some(&self.last_placement).filter(|p| !p.is_empty());
        let placement = allocate_round(&self.problem(), &self.solver, prior)?;
        self.last_placement = placement;
        Ok(&self.last_placement)
    }
}
