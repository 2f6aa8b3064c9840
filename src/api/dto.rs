use crate::domain::graph::Graph;
use crate::domain::ids::NodeId;
use serde::{Deserialize, Serialize};

/// Graph as emitted by `--format json`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphDto {
    pub nodes: Vec<NodeDto>,
    pub edges: Vec<EdgeDto>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeDto {
    pub id: NodeId,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EdgeDto {
    pub from: NodeId,
    pub to: NodeId,
}

impl From<&Graph> for GraphDto {
    fn from(graph: &Graph) -> Self {
        let nodes = graph
            .nodes()
            .iter()
            .map(|n| NodeDto {
                id: n.id,
                label: n.label.clone(),
            })
            .collect();

        let edges = graph
            .edges()
            .iter()
            .map(|e| EdgeDto {
                from: e.from,
                to: e.to,
            })
            .collect();

        GraphDto { nodes, edges }
    }
}
