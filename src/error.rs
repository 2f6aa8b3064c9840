//! Error types for json2dot.
//!
//! Every failure is terminal for a run: either a complete graph description is
//! produced, or nothing is written and one of these is reported.

use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum Json2DotError {
    /// Wrong number of arguments or an unknown flag.
    #[error("{0}")]
    Usage(String),

    /// Input file missing or unreadable.
    #[error("cannot read {}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Input is not well-formed JSON.
    #[error("{}:{line}:{column}: invalid JSON", .path.display())]
    Parse {
        path: PathBuf,
        line: usize,
        column: usize,
        #[source]
        source: serde_json::Error,
    },

    /// Writing the rendered graph failed.
    #[error("failed to write output")]
    Output {
        #[source]
        source: std::io::Error,
    },

    /// Encoding the graph as JSON failed.
    #[error("failed to encode graph")]
    Encode(#[source] serde_json::Error),
}

impl Json2DotError {
    /// Process exit code for this failure.
    pub fn exit_code(&self) -> u8 {
        match self {
            Json2DotError::Usage(_) => 2,
            _ => 1,
        }
    }
}

pub type Result<T> = std::result::Result<T, Json2DotError>;
