//! Three-pass tree construction: node pass, edge pass, then depth
//! assignment and validation.

use super::node::NodeData;
use super::normalize::{normalize, LevelSpec};
use super::validate::{validate, validate_structure};
use super::Tree;
use crate::error::{Error, Reason};
use crate::schema::Column;
use petgraph::graph::{DiGraph, NodeIndex};
use std::collections::{HashMap, VecDeque};

/// One input row: a node's own attributes plus the labels of its direct
/// children. `children` is already a resolved label list. Tokenizing a
/// `;`-separated string or expanding a `regex::` prefix is the external
/// loader's job, not this crate's.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Record {
    pub label: String,
    pub current_value: f64,
    pub optimal_ratio: f64,
    pub amount_to_add: f64,
    pub children: Vec<String>,
}

/// Build and validate a [`Tree`] from a flat record sequence.
///
/// Node pass: every label must be unique ([`Error::DuplicateLabel`]).
/// Edge pass: every child reference must resolve to a known label
/// ([`Error::DanglingEdge`]). Depth & validation pass: BFS from the unique
/// root assigns `level`, then the validator checks acyclicity,
/// connectivity, single-parent-hood, and (after normalizing
/// `optimal_ratio` and deriving `current_ratio`) that both ratios sum to 1
/// at every level.
pub fn build_tree(records: Vec<Record>) -> Result<Tree, Error> {
    let mut graph: DiGraph<NodeData, ()> = DiGraph::new();
    let mut index: HashMap<String, NodeIndex> = HashMap::new();

    // Node pass.
    for record in &records {
        if index.contains_key(&record.label) {
            log::error!("duplicate label during tree construction: {}", record.label);
            return Err(Error::DuplicateLabel(record.label.clone()));
        }
        let data = NodeData::new(
            record.label.clone(),
            record.current_value,
            record.optimal_ratio,
            record.amount_to_add,
        );
        let idx = graph.add_node(data);
        index.insert(record.label.clone(), idx);
    }

    // Edge pass.
    for record in &records {
        let parent = index[&record.label];
        for child_label in &record.children {
            let child = index.get(child_label).copied().ok_or_else(|| {
                log::error!(
                    "dangling edge during tree construction: {} -> {}",
                    record.label,
                    child_label
                );
                Error::DanglingEdge {
                    parent: record.label.clone(),
                    child: child_label.clone(),
                }
            })?;
            graph.add_edge(parent, child, ());
        }
    }

    // Depth & validation pass.
    let root = find_root(&graph, &index)?;
    assign_levels(&mut graph, root);

    let tree = Tree { graph, index, root };
    validate_structure(&tree)?;

    let tree = normalize(tree, Column::OptimalRatio, Column::OptimalRatio, LevelSpec::All);
    let tree = normalize(tree, Column::CurrentValue, Column::CurrentRatio, LevelSpec::All);
    validate(&tree)?;

    Ok(tree)
}

fn find_root(
    graph: &DiGraph<NodeData, ()>,
    index: &HashMap<String, NodeIndex>,
) -> Result<NodeIndex, Error> {
    let roots: Vec<NodeIndex> = graph
        .node_indices()
        .filter(|&n| {
            graph
                .neighbors_directed(n, petgraph::Direction::Incoming)
                .next()
                .is_none()
        })
        .collect();

    match roots.as_slice() {
        [] => Err(Error::InvalidTree {
            reasons: vec![Reason::Cycle {
                edges: cycle_edges(graph, index),
            }],
        }),
        [single] => Ok(*single),
        many => {
            let labels: Vec<String> = many.iter().map(|&n| graph[n].label.clone()).collect();
            log::error!("multiple roots found: {:?}", labels);
            Err(Error::InvalidTree {
                reasons: vec![Reason::MultipleParents {
                    label: labels.join(", "),
                    parents: 0,
                }],
            })
        }
    }
}

fn cycle_edges(graph: &DiGraph<NodeData, ()>, index: &HashMap<String, NodeIndex>) -> Vec<(String, String)> {
    let label_of = |n: NodeIndex| -> String {
        index
            .iter()
            .find(|(_, &idx)| idx == n)
            .map(|(label, _)| label.clone())
            .unwrap_or_default()
    };
    graph
        .edge_indices()
        .filter_map(|e| graph.edge_endpoints(e))
        .map(|(a, b)| (label_of(a), label_of(b)))
        .collect()
}

fn assign_levels(graph: &mut DiGraph<NodeData, ()>, root: NodeIndex) {
    let mut queue = VecDeque::new();
    queue.push_back((root, 0usize));
    let mut visited = std::collections::HashSet::new();
    visited.insert(root);
    while let Some((node, level)) = queue.pop_front() {
        graph[node].level = level;
        let children: Vec<NodeIndex> = graph
            .neighbors_directed(node, petgraph::Direction::Outgoing)
            .collect();
        for child in children {
            if visited.insert(child) {
                queue.push_back((child, level + 1));
            }
        }
    }
}
