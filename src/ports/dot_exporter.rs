//! DOT Exporter
//!
//! Serializes a [`Graph`] as Graphviz DOT text.

use crate::domain::graph::Graph;
use crate::error::Result;
use crate::ports::GraphExporter;

#[derive(Debug, Clone, Default)]
pub struct DotExporter {
    graph_name: Option<String>,
}

impl DotExporter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Name the graph (`digraph "name" { ... }`).
    pub fn with_graph_name(name: impl Into<String>) -> Self {
        Self {
            graph_name: Some(name.into()),
        }
    }

    /// Convert a Graph to a DOT string. Node statements precede edges.
    pub fn to_dot(&self, graph: &Graph) -> String {
        let mut lines = Vec::with_capacity(graph.node_count() + graph.edge_count() + 2);

        match &self.graph_name {
            Some(name) => lines.push(format!("digraph \"{}\" {{", Self::escape_label(name))),
            None => lines.push("digraph {".to_string()),
        }

        for node in graph.nodes() {
            lines.push(format!(
                "    {} [label=\"{}\"]",
                node.id,
                Self::escape_label(&node.label)
            ));
        }

        for edge in graph.edges() {
            lines.push(format!("    {} -> {}", edge.from, edge.to));
        }

        lines.push("}".to_string());

        let mut dot = lines.join("\n");
        dot.push('\n');
        dot
    }

    /// Escape text for use inside a double-quoted DOT string.
    pub fn escape_label(label: &str) -> String {
        let mut escaped = String::with_capacity(label.len());
        for c in label.chars() {
            match c {
                '\\' => escaped.push_str("\\\\"),
                '"' => escaped.push_str("\\\""),
                '\n' => escaped.push_str("\\n"),
                '\r' => escaped.push_str("\\r"),
                _ => escaped.push(c),
            }
        }
        escaped
    }
}

impl GraphExporter for DotExporter {
    fn render(&self, graph: &Graph) -> Result<String> {
        Ok(self.to_dot(graph))
    }
}
