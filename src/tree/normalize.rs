//! Per-level (equivalently, per-parent) renormalization of a numeric
//! attribute so that values at each depth sum to 1.

use super::Tree;
use crate::schema::Column;
use std::collections::{HashMap, HashSet};

/// Which depths a [`normalize`] call should touch.
#[derive(Debug, Clone, PartialEq)]
pub enum LevelSpec {
    All,
    One(usize),
    Many(HashSet<usize>),
}

impl LevelSpec {
    fn contains(&self, level: usize) -> bool {
        match self {
            LevelSpec::All => true,
            LevelSpec::One(l) => *l == level,
            LevelSpec::Many(set) => set.contains(&level),
        }
    }
}

/// Rewrite (or write into a new column) `out` so that, within every
/// parent's child set, the values sum to 1. Every node's siblings share
/// its depth, so grouping directly by `level` gets the same result as
/// walking each parent's children separately, and is cheaper.
///
/// Takes ownership of `tree` and hands it back. The "in place" case is
/// simply not cloning before the call, and the "copy" case is the
/// caller's explicit `tree.clone()`; there is no separate bool flag to
/// thread through.
pub fn normalize(mut tree: Tree, key: Column, out: Column, levels: LevelSpec) -> Tree {
    let mut totals: HashMap<usize, f64> = HashMap::new();
    for idx in tree.nodes() {
        let level = tree.node(idx).level;
        if levels.contains(level) {
            *totals.entry(level).or_insert(0.0) += tree.node(idx).get(key);
        }
    }

    let indices: Vec<_> = tree.nodes().collect();
    for idx in indices {
        let level = tree.node(idx).level;
        if !levels.contains(level) {
            continue;
        }
        let total = totals.get(&level).copied().unwrap_or(0.0);
        let value = tree.node(idx).get(key);
        let normed = if total > 0.0 { value / total } else { 0.0 };
        tree.node_mut(idx).set(out, normed);
    }

    tree
}
