//! Independent invariant predicates, each returning a [`Reason`] on
//! failure. `validate` runs all of them and collects every violation
//! rather than failing fast on the first one, so `Error::InvalidTree`
//! always reports everything wrong at once.

use super::Tree;
use crate::error::{Error, Reason};
use crate::schema::Column;
use petgraph::Direction;
use std::collections::HashMap;

const RTOL: f64 = 1e-5;
const ATOL: f64 = 1e-8;

fn close(a: f64, b: f64) -> bool {
    approx::relative_eq!(a, b, epsilon = ATOL, max_relative = RTOL)
}

fn no_cycles(tree: &Tree) -> Result<(), Reason> {
    // The tree is built by construction without back-edges in the
    // directed sense; a "cycle, ignoring orientation" per the original
    // network_has_no_cycles is exactly a node with more than one parent
    // reachable from itself, which single_parent below also flags. We
    // additionally guard against a node being its own ancestor, which
    // single_parent cannot see (in-degree stays 1 either way).
    let mut stack = vec![tree.root()];
    let mut visited = std::collections::HashSet::new();
    while let Some(node) = stack.pop() {
        if !visited.insert(node) {
            return Err(Reason::Cycle {
                edges: vec![(tree.node(node).label.clone(), tree.node(node).label.clone())],
            });
        }
        stack.extend(tree.children(node));
    }
    Ok(())
}

fn connected(tree: &Tree) -> Result<(), Reason> {
    let mut visited = std::collections::HashSet::new();
    let mut stack = vec![tree.root()];
    visited.insert(tree.root());
    while let Some(node) = stack.pop() {
        for child in tree.children(node) {
            if visited.insert(child) {
                stack.push(child);
            }
        }
    }
    if visited.len() == tree.len() {
        Ok(())
    } else {
        let unreachable: Vec<String> = tree
            .nodes()
            .filter(|n| !visited.contains(n))
            .map(|n| tree.node(n).label.clone())
            .collect();
        Err(Reason::Disconnected {
            components: vec![unreachable],
        })
    }
}

fn single_parent(tree: &Tree) -> Result<(), Reason> {
    for node in tree.nodes() {
        let parents = tree.parent_count(node);
        if parents > 1 {
            return Err(Reason::MultipleParents {
                label: tree.node(node).label.clone(),
                parents,
            });
        }
    }
    Ok(())
}

fn level_sum(tree: &Tree, column: Column, expected: f64) -> Result<(), Reason> {
    let mut totals: HashMap<usize, f64> = HashMap::new();
    for node in tree.nodes() {
        let data = tree.node(node);
        *totals.entry(data.level).or_insert(0.0) += data.get(column);
    }
    for (&level, &total) in &totals {
        if !close(total, expected) {
            return Err(Reason::LevelSum {
                column: column.name(),
                level,
                total,
                expected,
            });
        }
    }
    Ok(())
}

fn collect(checks: Vec<Result<(), Reason>>) -> Result<(), Error> {
    let reasons: Vec<Reason> = checks
        .into_iter()
        .filter_map(|check| check.err())
        .inspect(|reason| log::error!("tree validation failed: {}", reason))
        .collect();

    if reasons.is_empty() {
        Ok(())
    } else {
        Err(Error::InvalidTree { reasons })
    }
}

/// Acyclicity, connectivity, and single-parent-hood only. Run right after
/// construction, before ratios have been normalized. The level-sum checks
/// below would spuriously fail on raw input (`current_ratio` isn't
/// populated until the normalizer runs).
pub(crate) fn validate_structure(tree: &Tree) -> Result<(), Error> {
    collect(vec![no_cycles(tree), connected(tree), single_parent(tree)])
}

/// Every predicate, including the two level-sum checks. Run after
/// `optimal_ratio` and `current_ratio` have both been normalized.
pub(crate) fn validate(tree: &Tree) -> Result<(), Error> {
    collect(vec![
        no_cycles(tree),
        connected(tree),
        single_parent(tree),
        level_sum(tree, Column::OptimalRatio, 1.0),
        level_sum(tree, Column::CurrentRatio, 1.0),
    ])
}
