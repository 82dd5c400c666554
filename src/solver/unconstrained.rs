//! Unconstrained closed-form solver: every child reaches its target share
//! exactly, withdrawals allowed.

use super::bucket::{BucketSolution, BucketSystem};

/// `δᵢ = rᵢ·S − vᵢ` where `S = Σvᵢ + A`. O(n), may return negative deltas.
pub fn solve(system: &BucketSystem) -> BucketSolution {
    let total = system.current_total() + system.amount_to_add();
    let delta = system
        .current_values()
        .iter()
        .zip(system.optimal_ratios())
        .map(|(&v, &r)| r * total - v)
        .collect();
    BucketSolution::from_deltas(system, delta)
}
