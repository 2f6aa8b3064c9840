// Infrastructure implementations for json2dot.

use crate::api::dto::GraphDto;
use crate::domain::graph::Graph;
use crate::domain::value::Value;
use crate::error::{Json2DotError, Result};
use crate::ports::{DocumentLoader, GraphExporter};
use serde::Deserialize;
use std::fs;
use std::path::Path;

pub mod logging;

/// Reads a whole JSON file and classifies it into [`Value`]s.
pub struct JsonFileLoader;

impl JsonFileLoader {
    /// Parse an in-memory document. `path` is only used for diagnostics.
    ///
    /// Nesting depth is unbounded: the stack grows on demand while parsing.
    pub fn parse(bytes: &[u8], path: &Path) -> Result<Value> {
        let parse_error = |source: serde_json::Error| Json2DotError::Parse {
            path: path.to_path_buf(),
            line: source.line(),
            column: source.column(),
            source,
        };

        let mut de = serde_json::Deserializer::from_slice(bytes);
        de.disable_recursion_limit();
        let value = Value::deserialize(serde_stacker::Deserializer::new(&mut de))
            .map_err(parse_error)?;
        de.end().map_err(parse_error)?;
        Ok(value)
    }
}

impl DocumentLoader for JsonFileLoader {
    fn load(&self, path: &Path) -> Result<Value> {
        let bytes = fs::read(path).map_err(|source| Json2DotError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::debug!(path = %path.display(), bytes = bytes.len(), "read input document");
        Self::parse(&bytes, path)
    }
}

/// Emits the graph as a pretty-printed [`GraphDto`] document.
pub struct JsonExporter;

impl GraphExporter for JsonExporter {
    fn render(&self, graph: &Graph) -> Result<String> {
        let mut text =
            serde_json::to_string_pretty(&GraphDto::from(graph)).map_err(Json2DotError::Encode)?;
        text.push('\n');
        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value::Scalar;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_load_reads_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, r#"{{"name": "main", "params": []}}"#).unwrap();

        let value = JsonFileLoader.load(file.path()).unwrap();
        assert!(matches!(value, Value::Mapping(ref entries) if entries.len() == 2));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.json");

        match JsonFileLoader.load(&path) {
            Err(Json2DotError::Io { path: reported, .. }) => assert_eq!(reported, path),
            other => panic!("expected Io error, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_error_reports_position() {
        let text = b"{\n  \"a\": 1,\n  \"b\": ]\n}";
        match JsonFileLoader::parse(text, Path::new("bad.json")) {
            Err(Json2DotError::Parse { line, column, .. }) => {
                assert_eq!(line, 3);
                assert!(column > 0);
            }
            other => panic!("expected Parse error, got {:?}", other),
        }
    }

    #[test]
    fn test_trailing_garbage_is_rejected() {
        let result = JsonFileLoader::parse(b"[1, 2] extra", Path::new("x.json"));
        assert!(matches!(result, Err(Json2DotError::Parse { .. })));
    }

    #[test]
    fn test_nesting_beyond_two_hundred_levels() {
        let text = format!("{}1{}", "[".repeat(200), "]".repeat(200));
        let value = JsonFileLoader::parse(text.as_bytes(), Path::new("deep.json")).unwrap();

        let graph = crate::domain::builder::GraphBuilder::new().build_graph(&value);
        // root, 199 nested index nodes, the innermost index node and its leaf
        assert_eq!(graph.node_count(), 202);
        assert_eq!(graph.nodes().last().map(|n| n.label.as_str()), Some("1"));
    }

    #[test]
    fn test_long_left_associative_expression() {
        let mut expr = r#""x""#.to_string();
        for _ in 0..2_000 {
            expr = format!(r#"{{"op":"+","lhs":{},"rhs":"x"}}"#, expr);
        }
        let value = JsonFileLoader::parse(expr.as_bytes(), Path::new("ast.json")).unwrap();

        let graph = crate::domain::builder::GraphBuilder::new().build_graph(&value);
        // each level: op, "+", lhs, rhs, "x"; innermost lhs carries one more leaf
        assert_eq!(graph.node_count(), 1 + 2_000 * 5 + 1);
        assert_eq!(graph.edge_count(), graph.node_count() - 1);
    }

    #[test]
    fn test_unterminated_deep_document_is_parse_error() {
        let text = "[".repeat(50_000);
        let result = JsonFileLoader::parse(text.as_bytes(), Path::new("cut.json"));
        assert!(matches!(result, Err(Json2DotError::Parse { line: 1, .. })));
    }

    #[test]
    fn test_bare_scalar_document() {
        let value = JsonFileLoader::parse(b"\"hello\"", Path::new("s.json")).unwrap();
        assert_eq!(value, Value::Scalar(Scalar::String("hello".into())));
    }

    #[test]
    fn test_json_exporter_round_trips_counts() {
        let doc = JsonFileLoader::parse(br#"{"a": [true, null]}"#, Path::new("d.json")).unwrap();
        let graph = crate::domain::builder::GraphBuilder::new().build_graph(&doc);

        let text = JsonExporter.render(&graph).unwrap();
        let dto: GraphDto = serde_json::from_str(&text).unwrap();
        assert_eq!(dto.nodes.len(), graph.node_count());
        assert_eq!(dto.edges.len(), graph.edge_count());
    }
}
