//! Closed enum dispatch over the three bucket solvers.

mod bucket;
mod constrained;
mod montecarlo;
mod unconstrained;

pub use bucket::{BucketSolution, BucketSystem};
pub(crate) use montecarlo::default_max_steps;

use crate::error::Error;

/// Default `step_size` for the Monte-Carlo fallback the graph driver
/// reaches for when the constrained closed form under-allocates.
pub const DEFAULT_STEP_SIZE: f64 = 0.01;

/// Which algorithm a graph-solver pass should use for one parent's
/// sub-problem.
#[derive(Debug, Clone, PartialEq)]
pub enum BucketSolver {
    /// Closed form, withdrawals allowed.
    Unconstrained,
    /// Closed form with `δᵢ ≥ 0`, iterative overflow elimination.
    Constrained,
    /// Discrete greedy deposit, `δᵢ ≥ 0` by construction.
    MonteCarlo { step_size: f64, max_steps: usize },
}

impl BucketSolver {
    pub fn solve(&self, system: &BucketSystem) -> Result<BucketSolution, Error> {
        match self {
            BucketSolver::Unconstrained => Ok(unconstrained::solve(system)),
            BucketSolver::Constrained => constrained::solve(system),
            BucketSolver::MonteCarlo { step_size, max_steps } => {
                Ok(montecarlo::solve(system, *step_size, *max_steps))
            }
        }
    }
}

/// Knobs for [`crate::graph_solver::solve`].
#[derive(Debug, Clone, PartialEq)]
pub struct SolveOptions {
    /// Outer fixed-point iteration cap; exceeding it is
    /// [`Error::SolverNotConverged`].
    pub max_attempts: usize,
    /// Tolerance for the constrained-solver under-allocation check that
    /// triggers the Monte-Carlo fallback.
    pub under_allocation_tolerance: f64,
}

impl Default for SolveOptions {
    fn default() -> Self {
        Self {
            max_attempts: 1024,
            under_allocation_tolerance: 1e-6,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn system() -> BucketSystem {
        BucketSystem::new(
            1000.0,
            vec![2000.0, 1000.0, 1000.0],
            vec![0.5, 0.25, 0.25],
            vec!["a".into(), "b".into(), "c".into()],
        )
        .unwrap()
    }

    #[test]
    fn dispatches_to_unconstrained() {
        let solution = BucketSolver::Unconstrained.solve(&system()).unwrap();
        approx::assert_relative_eq!(solution.delta_sum(), 1000.0, epsilon = 1e-8);
    }

    #[test]
    fn dispatches_to_constrained() {
        let solution = BucketSolver::Constrained.solve(&system()).unwrap();
        for &d in solution.delta() {
            assert!(d >= -1e-8);
        }
    }

    #[test]
    fn dispatches_to_montecarlo() {
        let solver = BucketSolver::MonteCarlo { step_size: 10.0, max_steps: 200 };
        let solution = solver.solve(&system()).unwrap();
        approx::assert_relative_eq!(solution.delta_sum(), 1000.0, epsilon = 1e-6);
    }
}
