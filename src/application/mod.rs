use crate::domain::builder::{GraphBuilder, DEFAULT_ROOT_LABEL};
use crate::error::Result;
use crate::infrastructure::JsonExporter;
use crate::ports::dot_exporter::DotExporter;
use crate::ports::{DocumentLoader, GraphExporter};
use std::path::Path;

/// Output syntax for the rendered graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Graphviz DOT
    #[default]
    Dot,
    /// Node and edge lists as JSON
    Json,
}

#[derive(Debug, Clone)]
pub struct RenderOptions {
    pub root_label: String,
    pub graph_name: Option<String>,
    pub format: OutputFormat,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            root_label: DEFAULT_ROOT_LABEL.to_string(),
            graph_name: None,
            format: OutputFormat::Dot,
        }
    }
}

impl RenderOptions {
    pub fn builder(&self) -> GraphBuilder {
        GraphBuilder::with_root_label(self.root_label.clone())
    }

    pub fn exporter(&self) -> Box<dyn GraphExporter> {
        match (self.format, &self.graph_name) {
            (OutputFormat::Dot, Some(name)) => Box::new(DotExporter::with_graph_name(name.clone())),
            (OutputFormat::Dot, None) => Box::new(DotExporter::new()),
            (OutputFormat::Json, _) => Box::new(JsonExporter),
        }
    }
}

pub struct RenderUsecase<'a> {
    pub loader: &'a dyn DocumentLoader,
    pub builder: &'a GraphBuilder,
    pub exporter: &'a dyn GraphExporter,
}

impl<'a> RenderUsecase<'a> {
    /// Load `input`, build its graph and return the rendered text.
    pub fn run(&self, input: &Path) -> Result<String> {
        let document = self.loader.load(input)?;
        let graph = self.builder.build_graph(&document);
        self.exporter.render(&graph)
    }
}
