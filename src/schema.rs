//! Declarative description of per-node attributes, shared by tree
//! construction, the normalizer, and anything that needs to enumerate or
//! display a node's fields without hard-coding them twice.

/// One of the fixed set of numeric fields carried by every node.
///
/// `Label` is the one string-typed exception and is not addressable
/// through [`Column`]; it is looked up directly on [`crate::tree::NodeData`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Column {
    Level,
    OptimalRatio,
    CurrentValue,
    CurrentRatio,
    AmountToAdd,
    ResultsValue,
    ResultsRatio,
}

/// Metadata for one attribute: its column, whether ingestion supplies it
/// (`input`) or it is derived during solving, and a human label for
/// logging/display.
#[derive(Debug, Clone, Copy)]
pub struct Attribute {
    pub column: Column,
    pub name: &'static str,
    pub input: bool,
}

impl Attribute {
    const fn new(column: Column, name: &'static str, input: bool) -> Self {
        Self {
            column,
            name,
            input,
        }
    }
}

/// The full attribute table, in the order a display layer would want to
/// print them. `label` is included for completeness even though it lives
/// outside the `Column` enum.
pub const LABEL_NAME: &str = "label";

pub const SCHEMA: &[Attribute] = &[
    Attribute::new(Column::Level, "level", false),
    Attribute::new(Column::OptimalRatio, "optimal_ratio", true),
    Attribute::new(Column::CurrentValue, "current_value", true),
    Attribute::new(Column::CurrentRatio, "current_ratio", false),
    Attribute::new(Column::AmountToAdd, "amount_to_add", true),
    Attribute::new(Column::ResultsValue, "results_value", false),
    Attribute::new(Column::ResultsRatio, "results_ratio", false),
];

impl Column {
    /// The subset of columns an ingestion record is expected to supply.
    pub fn inputs() -> impl Iterator<Item = Column> {
        SCHEMA.iter().filter(|a| a.input).map(|a| a.column)
    }

    pub fn name(&self) -> &'static str {
        SCHEMA
            .iter()
            .find(|a| a.column == *self)
            .map(|a| a.name)
            .expect("every Column variant has a SCHEMA entry")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_column_has_a_name() {
        for attr in SCHEMA {
            assert_eq!(attr.column.name(), attr.name);
        }
    }

    #[test]
    fn only_expected_columns_are_inputs() {
        let inputs: Vec<Column> = Column::inputs().collect();
        assert_eq!(
            inputs,
            vec![Column::OptimalRatio, Column::CurrentValue, Column::AmountToAdd]
        );
    }
}
