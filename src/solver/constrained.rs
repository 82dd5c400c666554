//! Constrained closed-form solver: same objective as the unconstrained
//! solver, plus `δᵢ ≥ 0` for every child, via iterative "overflow"
//! elimination.
//!
//! Each pass treats the current free set `U` as an independent
//! sub-problem. Children already moved into the fixed set `F` keep their
//! current value untouched, so the pool actually available to `U` is
//! `Σ_{i∈U} vᵢ + A`, not the whole system's `S`. Redistributing
//! proportionally to `U`'s renormalized ratios against that reduced pool
//! is what keeps `Σδ = A` exact at every pass, including the first
//! (where `U` is everyone and this reduces to the plain closed form).
//! Ratio ties (`Σ_{i∈U} rⱼ = 0`) fall back to a uniform split over `U`.

use super::bucket::{BucketSolution, BucketSystem};
use crate::error::Error;

pub fn solve(system: &BucketSystem) -> Result<BucketSolution, Error> {
    let n = system.len();
    let mut fixed = vec![false; n];
    let mut delta = vec![0.0; n];

    for _pass in 0..n.max(1) {
        let free: Vec<usize> = (0..n).filter(|&i| !fixed[i]).collect();
        if free.is_empty() {
            if system.amount_to_add() > 0.0 {
                return Err(Error::Infeasible(
                    "no free child left to absorb a positive amount_to_add".into(),
                ));
            }
            break;
        }

        let free_value: f64 = free.iter().map(|&i| system.current_values()[i]).sum();
        let free_ratio_sum: f64 = free.iter().map(|&i| system.optimal_ratios()[i]).sum();
        let reduced_total = free_value + system.amount_to_add();

        let mut newly_negative = Vec::new();
        for &i in &free {
            let weight = if free_ratio_sum > 0.0 {
                system.optimal_ratios()[i] / free_ratio_sum
            } else {
                1.0 / free.len() as f64
            };
            let candidate = weight * reduced_total - system.current_values()[i];
            delta[i] = candidate;
            if candidate < 0.0 {
                newly_negative.push(i);
            }
        }

        if newly_negative.is_empty() {
            break;
        }
        for i in newly_negative {
            fixed[i] = true;
            delta[i] = 0.0;
        }
    }

    for (i, is_fixed) in fixed.iter().enumerate() {
        if *is_fixed {
            delta[i] = 0.0;
        }
    }

    Ok(BucketSolution::from_deltas(system, delta))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flat_three_child_deposit_matches_unconstrained() {
        let system = BucketSystem::new(
            1000.0,
            vec![2000.0, 1000.0, 1000.0],
            vec![0.5, 0.25, 0.25],
            vec!["a".into(), "b".into(), "c".into()],
        )
        .unwrap();
        let solution = solve(&system).unwrap();
        approx::assert_relative_eq!(solution.delta()[0], 500.0, epsilon = 1e-8);
        approx::assert_relative_eq!(solution.delta()[1], 250.0, epsilon = 1e-8);
        approx::assert_relative_eq!(solution.delta()[2], 250.0, epsilon = 1e-8);
    }

    #[test]
    fn withdrawal_case_keeps_everyone_in_place() {
        let system = BucketSystem::new(
            0.0,
            vec![3000.0, 0.0, 0.0],
            vec![0.5, 0.35, 0.15],
            vec!["a".into(), "b".into(), "c".into()],
        )
        .unwrap();
        let solution = solve(&system).unwrap();
        for &d in solution.delta() {
            assert!(d.abs() < 1e-8, "expected no movement, got {:?}", solution.delta());
        }
    }

    #[test]
    fn never_produces_a_negative_delta() {
        let system = BucketSystem::new(
            500.0,
            vec![0.0, 10_000.0, 0.0],
            vec![0.2, 0.2, 0.6],
            vec!["a".into(), "b".into(), "c".into()],
        )
        .unwrap();
        let solution = solve(&system).unwrap();
        for &d in solution.delta() {
            assert!(d >= -1e-8);
        }
        approx::assert_relative_eq!(solution.delta_sum(), 500.0, epsilon = 1e-6);
    }

    #[test]
    fn zero_ratio_and_zero_value_child_gets_nothing() {
        let system = BucketSystem::new(
            100.0,
            vec![0.0, 100.0],
            vec![0.0, 1.0],
            vec!["a".into(), "b".into()],
        )
        .unwrap();
        let solution = solve(&system).unwrap();
        approx::assert_relative_eq!(solution.delta()[0], 0.0, epsilon = 1e-8);
    }

    #[test]
    fn all_zero_current_values_distribute_by_ratio() {
        let system = BucketSystem::new(
            10.0,
            vec![0.0, 0.0],
            vec![0.5, 0.5],
            vec!["a".into(), "b".into()],
        )
        .unwrap();
        let solution = solve(&system).unwrap();
        approx::assert_relative_eq!(solution.delta()[0], 5.0, epsilon = 1e-8);
        approx::assert_relative_eq!(solution.delta()[1], 5.0, epsilon = 1e-8);
    }
}
