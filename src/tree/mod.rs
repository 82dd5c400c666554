//! Rooted tree storage plus the three passes that turn a flat record list
//! into a validated tree.

mod build;
mod node;
mod normalize;
mod validate;

pub use build::{build_tree, Record};
pub use node::NodeData;
pub use normalize::{normalize, LevelSpec};

use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::Direction;
use std::collections::HashMap;

/// A rooted directed tree: one [`NodeData`] per node, unweighted edges,
/// and an index from label to graph position for O(1) lookups.
///
/// Constructed only through [`build::build_tree`]. That three-pass
/// algorithm is the sole way to reach a tree satisfying the node and edge
/// invariants, so there is no public bare constructor.
#[derive(Debug, Clone)]
pub struct Tree {
    graph: DiGraph<NodeData, ()>,
    index: HashMap<String, NodeIndex>,
    root: NodeIndex,
}

impl Tree {
    pub fn root(&self) -> NodeIndex {
        self.root
    }

    pub fn by_label(&self, label: &str) -> Option<NodeIndex> {
        self.index.get(label).copied()
    }

    pub fn node(&self, idx: NodeIndex) -> &NodeData {
        &self.graph[idx]
    }

    pub fn node_mut(&mut self, idx: NodeIndex) -> &mut NodeData {
        &mut self.graph[idx]
    }

    pub fn len(&self) -> usize {
        self.graph.node_count()
    }

    pub fn is_empty(&self) -> bool {
        self.graph.node_count() == 0
    }

    pub fn nodes(&self) -> impl Iterator<Item = NodeIndex> + '_ {
        self.graph.node_indices()
    }

    pub fn parent(&self, idx: NodeIndex) -> Option<NodeIndex> {
        self.graph
            .neighbors_directed(idx, Direction::Incoming)
            .next()
    }

    pub(crate) fn parent_count(&self, idx: NodeIndex) -> usize {
        self.graph.neighbors_directed(idx, Direction::Incoming).count()
    }

    pub fn children(&self, idx: NodeIndex) -> Vec<NodeIndex> {
        self.graph
            .neighbors_directed(idx, Direction::Outgoing)
            .collect()
    }

    pub fn is_leaf(&self, idx: NodeIndex) -> bool {
        self.children(idx).is_empty()
    }

    /// Depth-first-agnostic breadth-first order from the root, returned as
    /// `(parent, children)` groups in the order visited. Used by both the
    /// graph solver (reversed) and the normalizer.
    pub(crate) fn bfs_groups(&self) -> Vec<(NodeIndex, Vec<NodeIndex>)> {
        let mut groups = Vec::new();
        let mut queue = std::collections::VecDeque::new();
        queue.push_back(self.root);
        while let Some(parent) = queue.pop_front() {
            let children = self.children(parent);
            for &c in &children {
                queue.push_back(c);
            }
            if !children.is_empty() {
                groups.push((parent, children));
            }
        }
        groups
    }
}
