//! Structural Graph Builder
//!
//! Walks a [`Value`] in pre-order and emits one node per root, mapping entry,
//! sequence element and nested scalar, plus an edge from each node's container.
//!
//! The walk runs on an explicit work stack, so nesting depth is bounded by
//! memory rather than by the call stack.

use crate::domain::graph::{Graph, GraphSink};
use crate::domain::ids::{IdAllocator, NodeId};
use crate::domain::value::{Scalar, Value};
use std::borrow::Cow;

/// Label given to the document root unless configured otherwise.
pub const DEFAULT_ROOT_LABEL: &str = "Module";

/// How a value was reached, which decides its node's label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slot<'v> {
    /// The document itself.
    Root,
    /// Entry of a mapping, labeled by its key.
    Key(&'v str),
    /// Element of a sequence, labeled by its 0-based position.
    Index(usize),
}

struct Pending<'v> {
    value: &'v Value,
    slot: Slot<'v>,
    parent: Option<NodeId>,
}

/// Turns documents into graphs.
#[derive(Debug, Clone)]
pub struct GraphBuilder {
    root_label: String,
}

impl Default for GraphBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl GraphBuilder {
    pub fn new() -> Self {
        Self::with_root_label(DEFAULT_ROOT_LABEL)
    }

    pub fn with_root_label(label: impl Into<String>) -> Self {
        Self {
            root_label: label.into(),
        }
    }

    /// Build a complete graph for `document` with a fresh allocator.
    pub fn build_graph(&self, document: &Value) -> Graph {
        let mut graph = Graph::new();
        let mut ids = IdAllocator::new();
        self.build(document, Slot::Root, None, &mut graph, &mut ids);
        tracing::debug!(
            nodes = graph.node_count(),
            edges = graph.edge_count(),
            "built graph"
        );
        graph
    }

    /// Emit `value` and everything beneath it into `sink`.
    ///
    /// `slot` decides the label of the node created for `value`; when `parent`
    /// is given, an edge from it to that node is registered as well. Returns
    /// the identifier of the node created for `value`.
    pub fn build<S: GraphSink>(
        &self,
        value: &Value,
        slot: Slot<'_>,
        parent: Option<NodeId>,
        sink: &mut S,
        ids: &mut IdAllocator,
    ) -> NodeId {
        let mut stack = Vec::new();
        let id = self.emit(Pending { value, slot, parent }, sink, ids, &mut stack);
        while let Some(pending) = stack.pop() {
            self.emit(pending, sink, ids, &mut stack);
        }
        id
    }

    fn emit<'v, S: GraphSink>(
        &'v self,
        pending: Pending<'v>,
        sink: &mut S,
        ids: &mut IdAllocator,
        stack: &mut Vec<Pending<'v>>,
    ) -> NodeId {
        let Pending { value, slot, parent } = pending;
        let id = ids.next_id();

        let label: Cow<'_, str> = match (slot, value) {
            // A bare scalar document is its own root.
            (Slot::Root, Value::Scalar(scalar)) => Cow::Owned(scalar.canonical_text()),
            (Slot::Root, _) => Cow::Borrowed(self.root_label.as_str()),
            (Slot::Key(key), _) => Cow::Borrowed(key),
            (Slot::Index(index), _) => Cow::Owned(index.to_string()),
        };
        sink.add_node(id, &label);
        if let Some(parent) = parent {
            sink.add_edge(parent, id);
        }

        match value {
            // Children are pushed in reverse so they pop in document order.
            Value::Mapping(entries) => stack.extend(entries.iter().rev().map(|(key, child)| {
                Pending {
                    value: child,
                    slot: Slot::Key(key),
                    parent: Some(id),
                }
            })),
            Value::Sequence(items) => {
                stack.extend(items.iter().enumerate().rev().map(|(index, child)| Pending {
                    value: child,
                    slot: Slot::Index(index),
                    parent: Some(id),
                }))
            }
            Value::Scalar(scalar) if slot != Slot::Root => {
                // The leaf directly follows its key/index node in pre-order.
                Self::emit_leaf(scalar, id, sink, ids);
            }
            Value::Scalar(_) => {}
        }
        id
    }

    fn emit_leaf<S: GraphSink>(
        scalar: &Scalar,
        parent: NodeId,
        sink: &mut S,
        ids: &mut IdAllocator,
    ) {
        let leaf = ids.next_id();
        sink.add_node(leaf, &scalar.canonical_text());
        sink.add_edge(parent, leaf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::graph::Edge;
    use serde_json::json;

    fn build(json: serde_json::Value) -> Graph {
        GraphBuilder::new().build_graph(&Value::from(json))
    }

    fn labels(graph: &Graph) -> Vec<&str> {
        graph.nodes().iter().map(|n| n.label.as_str()).collect()
    }

    fn edges(graph: &Graph) -> Vec<(usize, usize)> {
        graph.edges().iter().map(|e| (e.from.0, e.to.0)).collect()
    }

    #[test]
    fn test_mapping_with_nested_sequence() {
        let graph = build(json!({"a": 1, "b": [2, 3]}));

        assert_eq!(labels(&graph), vec!["Module", "a", "1", "b", "0", "2", "1", "3"]);
        assert_eq!(
            edges(&graph),
            vec![(0, 1), (1, 2), (0, 3), (3, 4), (4, 5), (3, 6), (6, 7)]
        );
        assert_eq!(graph.child_labels(NodeId(0)), vec!["a", "b"]);
        assert_eq!(graph.child_labels(NodeId(1)), vec!["1"]);
        assert_eq!(graph.child_labels(NodeId(3)), vec!["0", "1"]);
    }

    #[test]
    fn test_empty_sequence_is_a_lone_root() {
        let graph = build(json!([]));
        assert_eq!(labels(&graph), vec!["Module"]);
        assert_eq!(graph.edge_count(), 0);
    }

    #[test]
    fn test_bare_scalar_document() {
        let graph = build(json!(42));
        assert_eq!(labels(&graph), vec!["42"]);
        assert_eq!(graph.edge_count(), 0);
    }

    #[test]
    fn test_empty_containers_are_leaves() {
        let graph = build(json!({"params": [], "attrs": {}}));
        assert_eq!(labels(&graph), vec!["Module", "params", "attrs"]);
        assert!(graph.child_labels(NodeId(1)).is_empty());
        assert!(graph.child_labels(NodeId(2)).is_empty());
    }

    #[test]
    fn test_custom_root_label() {
        let graph = GraphBuilder::with_root_label("CompUnit")
            .build_graph(&Value::from(json!({"x": null})));
        assert_eq!(labels(&graph), vec!["CompUnit", "x", "null"]);
    }

    #[test]
    fn test_attach_under_existing_parent() {
        let builder = GraphBuilder::new();
        let mut graph = Graph::new();
        let mut ids = IdAllocator::new();

        let empty = Value::Sequence(vec![]);
        let root = builder.build(&empty, Slot::Root, None, &mut graph, &mut ids);
        let child = builder.build(
            &Value::from(json!(["x"])),
            Slot::Key("extra"),
            Some(root),
            &mut graph,
            &mut ids,
        );

        assert_eq!(child, NodeId(1));
        assert_eq!(labels(&graph), vec!["Module", "extra", "0", "x"]);
        assert_eq!(graph.edges()[0], Edge { from: root, to: child });
    }

    #[test]
    fn test_ids_follow_pre_order() {
        let graph = build(json!({"f": {"args": ["x", "y"], "ret": "int"}, "g": true}));

        for (position, node) in graph.nodes().iter().enumerate() {
            assert_eq!(node.id, NodeId(position));
        }
        for edge in graph.edges() {
            assert!(edge.from < edge.to, "edge {:?} points backwards", edge);
        }
        assert_eq!(
            labels(&graph),
            vec!["Module", "f", "args", "0", "x", "1", "y", "ret", "int", "g", "true"]
        );
    }

    #[test]
    fn test_deep_nesting_does_not_recurse() {
        let depth = 100_000;
        let mut value = Value::Scalar(Scalar::Null);
        for _ in 0..depth {
            value = Value::Sequence(vec![value]);
        }

        let graph = GraphBuilder::new().build_graph(&value);
        // root, one index node per nested level, then the scalar's leaf
        assert_eq!(graph.node_count(), depth + 2);
        assert_eq!(graph.edge_count(), depth + 1);
        assert_eq!(graph.nodes().last().map(|n| n.label.as_str()), Some("null"));
    }

    #[test]
    fn test_rebuild_is_identical() {
        let doc = Value::from(json!({"k": [1, {"m": "n"}]}));
        let builder = GraphBuilder::new();
        assert_eq!(builder.build_graph(&doc), builder.build_graph(&doc));
    }
}
