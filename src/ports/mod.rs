use crate::domain::graph::Graph;
use crate::domain::value::Value;
use crate::error::Result;
use std::path::Path;

pub mod dot_exporter;

pub trait DocumentLoader {
    fn load(&self, path: &Path) -> Result<Value>;
}

pub trait GraphExporter {
    /// Render the whole graph to text. Nothing is written on failure.
    fn render(&self, graph: &Graph) -> Result<String>;
}
