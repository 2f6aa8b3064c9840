//! Graph Data Structure
//!
//! Labeled nodes and parent-to-child edges produced by one traversal.

use crate::domain::ids::NodeId;

/// A node in the graph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    /// Unique identifier
    pub id: NodeId,
    /// Display label (key, index, root sentinel or scalar text)
    pub label: String,
}

/// An edge from the containing node to the contained one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Edge {
    pub from: NodeId,
    pub to: NodeId,
}

/// Receives nodes and edges as the builder emits them.
pub trait GraphSink {
    fn add_node(&mut self, id: NodeId, label: &str);
    fn add_edge(&mut self, parent: NodeId, child: NodeId);
}

/// Nodes and edges in the order they were registered.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Graph {
    nodes: Vec<Node>,
    edges: Vec<Edge>,
}

impl Graph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        // Builder output is dense, so the position usually is the id.
        match self.nodes.get(id.0) {
            Some(node) if node.id == id => Some(node),
            _ => self.nodes.iter().find(|n| n.id == id),
        }
    }

    /// Direct children of `id`, in emission order.
    pub fn children(&self, id: NodeId) -> impl Iterator<Item = &Node> + '_ {
        self.edges
            .iter()
            .filter(move |e| e.from == id)
            .filter_map(move |e| self.node(e.to))
    }

    /// Labels of the direct children of `id`.
    pub fn child_labels(&self, id: NodeId) -> Vec<&str> {
        self.children(id).map(|n| n.label.as_str()).collect()
    }
}

impl GraphSink for Graph {
    fn add_node(&mut self, id: NodeId, label: &str) {
        self.nodes.push(Node {
            id,
            label: label.to_string(),
        });
    }

    fn add_edge(&mut self, parent: NodeId, child: NodeId) {
        self.edges.push(Edge {
            from: parent,
            to: child,
        });
    }
}
