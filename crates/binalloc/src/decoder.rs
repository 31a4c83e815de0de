//! Reads a solved model back into a placement.

use binalloc_core::{AllocateError, Placement};
use binalloc_solver::{SolveResult, SolveStatus};
use tracing::trace;

use crate::builder::LiteralTable;

/// Decodes the true literals of an optimal result.
///
/// Only [`SolveStatus::Optimal`] yields a placement. A solution found without
/// proof of optimality is reported as [`AllocateError::NotOptimal`] and
/// discarded.
pub fn decode(result: &SolveResult, literals: &LiteralTable) -> Result<Placement, AllocateError> {
    match result.status() {
        SolveStatus::Optimal => {}
        SolveStatus::Infeasible => return Err(AllocateError::Infeasible),
        SolveStatus::Feasible | SolveStatus::Unknown => return Err(AllocateError::NotOptimal),
    }

    let mut placement = Placement::new();
    for (key, literal) in literals.iter() {
        if result.boolean_value(literal) {
            trace!(event = "decode", pair = %key);
            placement.insert(key.item, key.bin);
        }
    }
    Ok(placement)
}
