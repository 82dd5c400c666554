//! Hierarchical bucket rebalancer: given a tree of labeled buckets with
//! current values and target ratios, and a deposit (or withdrawal) pending
//! at the root, compute how much each bucket should receive so that every
//! level of the tree ends up as close as possible to its target ratios.
//!
//! The two entry points are [`build_tree`], which turns a flat record list
//! into a validated [`Tree`], and [`solve`], which pushes a pending deposit
//! down through that tree. Parsing YAML/CSV input, rendering a solved tree,
//! and a dashboard all live outside this crate.

pub mod error;
pub mod graph_solver;
pub mod schema;
pub mod solver;
pub mod tree;

pub use error::Error;
pub use graph_solver::{solve, solve_in_place};
pub use solver::{BucketSolution, BucketSolver, BucketSystem, SolveOptions};
pub use tree::{build_tree, Record, Tree};
