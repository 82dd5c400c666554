//! Crate-wide error taxonomy. Every fallible public entry point returns
//! `Result<_, Error>`; logging at the detection site is advisory only,
//! callers should match on the variant.

use thiserror::Error;

/// One violated predicate from the [`crate::tree::validate`] pass, carrying
/// enough detail to act on without re-deriving it from the tree.
#[derive(Debug, Clone, PartialEq)]
pub enum Reason {
    Cycle { edges: Vec<(String, String)> },
    Disconnected { components: Vec<Vec<String>> },
    MultipleParents { label: String, parents: usize },
    LevelSum {
        column: &'static str,
        level: usize,
        total: f64,
        expected: f64,
    },
}

impl std::fmt::Display for Reason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Reason::Cycle { edges } => {
                write!(f, "cycle found along edges {:?}", edges)
            }
            Reason::Disconnected { components } => {
                write!(f, "tree is not connected: components {:?}", components)
            }
            Reason::MultipleParents { label, parents } => {
                write!(f, "node '{}' has {} parents, expected at most 1", label, parents)
            }
            Reason::LevelSum {
                column,
                level,
                total,
                expected,
            } => write!(
                f,
                "column '{}' sums to {} at level {}, expected {}",
                column, total, level, expected
            ),
        }
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum Error {
    #[error("unknown input extension '{0}'")]
    UnknownExtension(String),

    #[error("unknown column '{0}'")]
    UnknownColumn(String),

    #[error("duplicate label '{0}'")]
    DuplicateLabel(String),

    #[error("dangling edge {parent} -> {child}")]
    DanglingEdge { parent: String, child: String },

    #[error("invalid tree: {}", reasons.iter().map(ToString::to_string).collect::<Vec<_>>().join("; "))]
    InvalidTree { reasons: Vec<Reason> },

    #[error("bad bucket system: {0}")]
    BadBucketSystem(String),

    #[error("infeasible bucket system: {0}")]
    Infeasible(String),

    #[error("solver did not converge within {max_attempts} attempts")]
    SolverNotConverged { max_attempts: usize },
}
