//! The fixed attribute set carried by every node.

/// A single node's attributes. Input fields (`optimal_ratio`,
/// `current_value`, `amount_to_add`) are frozen after construction for
/// everyone but the root's `amount_to_add`, which the graph solver
/// overwrites in place as deposits propagate; derived fields (`level`,
/// `current_ratio`, `results_value`, `results_ratio`) are written by the
/// normalizer and the graph solver.
#[derive(Debug, Clone, PartialEq)]
pub struct NodeData {
    pub label: String,
    pub level: usize,
    pub optimal_ratio: f64,
    pub current_value: f64,
    pub current_ratio: f64,
    pub amount_to_add: f64,
    pub results_value: f64,
    pub results_ratio: f64,
}

impl NodeData {
    pub(crate) fn new(label: String, current_value: f64, optimal_ratio: f64, amount_to_add: f64) -> Self {
        Self {
            label,
            level: 0,
            optimal_ratio,
            current_value,
            current_ratio: 0.0,
            amount_to_add,
            results_value: 0.0,
            results_ratio: 0.0,
        }
    }

    pub(crate) fn get(&self, column: crate::schema::Column) -> f64 {
        use crate::schema::Column::*;
        match column {
            Level => self.level as f64,
            OptimalRatio => self.optimal_ratio,
            CurrentValue => self.current_value,
            CurrentRatio => self.current_ratio,
            AmountToAdd => self.amount_to_add,
            ResultsValue => self.results_value,
            ResultsRatio => self.results_ratio,
        }
    }

    pub(crate) fn set(&mut self, column: crate::schema::Column, value: f64) {
        use crate::schema::Column::*;
        match column {
            Level => self.level = value as usize,
            OptimalRatio => self.optimal_ratio = value,
            CurrentValue => self.current_value = value,
            CurrentRatio => self.current_ratio = value,
            AmountToAdd => self.amount_to_add = value,
            ResultsValue => self.results_value = value,
            ResultsRatio => self.results_ratio = value,
        }
    }
}
