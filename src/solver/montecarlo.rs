//! Monte-Carlo constrained solver. Despite the name there is no
//! randomness: `A` is deposited in discrete steps, and at each step the
//! child whose ratio (measured against the running total of all
//! children's values, the same way [`crate::tree::normalize`] measures
//! any other ratio) would land closest to its target after receiving the
//! step is picked greedily, ties broken by lowest index. The running
//! total grows with every step and reaches `Σv + A` exactly once the
//! whole amount is deposited, so a child sitting far above its target
//! only makes its own error worse by receiving more; the greedy rule
//! naturally favors whichever child is furthest behind. No withdrawals
//! are ever issued, so this solver is always feasible.

use super::bucket::{BucketSolution, BucketSystem};

/// Deposit `system.amount_to_add()` in steps of `step_size`, for at most
/// `max_steps` full steps, then settle whatever remains (which may be
/// more than one step if `max_steps` capped the loop early, or less than
/// one if `step_size` doesn't evenly divide the amount) onto whichever
/// child the same greedy rule picks for that remainder.
pub fn solve(system: &BucketSystem, step_size: f64, max_steps: usize) -> BucketSolution {
    let mut values: Vec<f64> = system.current_values().to_vec();
    let mut running_total: f64 = values.iter().sum();

    let full_steps = ((system.amount_to_add() / step_size).floor() as usize).min(max_steps);
    for _ in 0..full_steps {
        let i = best_recipient(&values, system.optimal_ratios(), running_total, step_size);
        values[i] += step_size;
        running_total += step_size;
    }

    let deposited = full_steps as f64 * step_size;
    let remainder = system.amount_to_add() - deposited;
    if remainder > 0.0 {
        let i = best_recipient(&values, system.optimal_ratios(), running_total, remainder);
        values[i] += remainder;
    }

    let delta = values
        .iter()
        .zip(system.current_values())
        .map(|(v, v0)| v - v0)
        .collect();
    BucketSolution::from_deltas(system, delta)
}

fn best_recipient(values: &[f64], ratios: &[f64], running_total: f64, step: f64) -> usize {
    let mut best_index = 0;
    let mut best_error = f64::INFINITY;
    let total_after = running_total + step;
    for (i, (&v, &r)) in values.iter().zip(ratios).enumerate() {
        let resulting_ratio = (v + step) / total_after;
        let error = (resulting_ratio - r).powi(2);
        if error < best_error {
            best_error = error;
            best_index = i;
        }
    }
    best_index
}

/// `⌈A / step_size⌉`, the default iteration cap.
pub fn default_max_steps(amount_to_add: f64, step_size: f64) -> usize {
    if amount_to_add <= 0.0 {
        0
    } else {
        (amount_to_add / step_size).ceil() as usize
    }
}
