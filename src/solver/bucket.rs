//! Immutable input/output bundles for a single-parent sub-problem.

use crate::error::Error;

const SUM_TOL: f64 = 1e-8;

/// `(A, V, R, L)`: the amount to add, current values, target ratios, and
/// labels for one parent's direct children.
#[derive(Debug, Clone, PartialEq)]
pub struct BucketSystem {
    amount_to_add: f64,
    current_values: Vec<f64>,
    optimal_ratios: Vec<f64>,
    labels: Vec<String>,
}

impl BucketSystem {
    /// Validates `n = |V| = |R| = |L|`, `rᵢ ≥ 0`, and `|Σrᵢ − 1| ≤ 1e-8`.
    pub fn new(
        amount_to_add: f64,
        current_values: Vec<f64>,
        optimal_ratios: Vec<f64>,
        labels: Vec<String>,
    ) -> Result<Self, Error> {
        let n = current_values.len();
        if optimal_ratios.len() != n || labels.len() != n {
            return Err(Error::BadBucketSystem(format!(
                "length mismatch: values={}, ratios={}, labels={}",
                n,
                optimal_ratios.len(),
                labels.len()
            )));
        }
        if amount_to_add < 0.0 {
            return Err(Error::BadBucketSystem(format!(
                "amount_to_add must be non-negative, got {}",
                amount_to_add
            )));
        }
        if current_values.iter().any(|&v| v < 0.0) {
            return Err(Error::BadBucketSystem("current_values must be non-negative".into()));
        }
        if optimal_ratios.iter().any(|&r| r < 0.0) {
            return Err(Error::BadBucketSystem("optimal_ratios must be non-negative".into()));
        }
        let total: f64 = optimal_ratios.iter().sum();
        if (total - 1.0).abs() > SUM_TOL {
            return Err(Error::BadBucketSystem(format!(
                "optimal_ratios must sum to 1, got {}",
                total
            )));
        }
        Ok(Self {
            amount_to_add,
            current_values,
            optimal_ratios,
            labels,
        })
    }

    pub fn len(&self) -> usize {
        self.current_values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.current_values.is_empty()
    }

    pub fn amount_to_add(&self) -> f64 {
        self.amount_to_add
    }

    pub fn current_values(&self) -> &[f64] {
        &self.current_values
    }

    pub fn optimal_ratios(&self) -> &[f64] {
        &self.optimal_ratios
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// Sum of current values across all children.
    pub fn current_total(&self) -> f64 {
        self.current_values.iter().sum()
    }
}

/// Per-child deltas and resulting totals for a solved [`BucketSystem`].
#[derive(Debug, Clone, PartialEq)]
pub struct BucketSolution {
    delta: Vec<f64>,
    total: Vec<f64>,
}

impl BucketSolution {
    pub(crate) fn from_deltas(system: &BucketSystem, delta: Vec<f64>) -> Self {
        let total = system
            .current_values()
            .iter()
            .zip(&delta)
            .map(|(v, d)| v + d)
            .collect();
        Self { delta, total }
    }

    pub fn delta(&self) -> &[f64] {
        &self.delta
    }

    pub fn total(&self) -> &[f64] {
        &self.total
    }

    pub fn delta_sum(&self) -> f64 {
        self.delta.iter().sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_length_mismatch() {
        let err = BucketSystem::new(10.0, vec![1.0], vec![0.5, 0.5], vec!["a".into(), "b".into()]);
        assert!(matches!(err, Err(Error::BadBucketSystem(_))));
    }

    #[test]
    fn rejects_ratios_not_summing_to_one() {
        let err = BucketSystem::new(10.0, vec![1.0, 1.0], vec![0.5, 0.4], vec!["a".into(), "b".into()]);
        assert!(matches!(err, Err(Error::BadBucketSystem(_))));
    }

    #[test]
    fn accepts_valid_system() {
        let ok = BucketSystem::new(10.0, vec![1.0, 1.0], vec![0.5, 0.5], vec!["a".into(), "b".into()]);
        assert!(ok.is_ok());
    }
}
