//! Per-solve statistics.

use std::time::{Duration, Instant};

/// Statistics for a single solve.
///
/// # Example
///
/// ```
/// use binalloc_solver::SolveStats;
///
/// let mut stats = SolveStats::new(150, 41);
/// stats.start();
/// stats.finish();
///
/// assert_eq!(stats.variables, 150);
/// assert_eq!(stats.constraints, 41);
/// ```
#[derive(Debug, Clone, Default)]
pub struct SolveStats {
    start_time: Option<Instant>,
    /// Wall time spent inside the backend.
    pub wall_time: Duration,
    /// Variables handed to the backend, including auxiliaries it introduced.
    pub variables: usize,
    /// Constraints handed to the backend, after lowering.
    pub constraints: usize,
}

impl SolveStats {
    pub fn new(variables: usize, constraints: usize) -> Self {
        Self {
            variables,
            constraints,
            ..Self::default()
        }
    }

    /// Marks the start of solving.
    pub fn start(&mut self) {
        self.start_time = Some(Instant::now());
    }

    /// Records the wall time since [`start`](Self::start).
    pub fn finish(&mut self) {
        self.wall_time = self.start_time.map(|t| t.elapsed()).unwrap_or_default();
    }

    /// Returns the wall time in milliseconds.
    pub fn wall_time_ms(&self) -> u64 {
        self.wall_time.as_millis() as u64
    }
}
