//! Errors reported by `unit-dump`.

use std::path::PathBuf;

use unit_analysis::ContextError;
use unit_lexer::DialectError;

#[derive(Debug, thiserror::Error)]
pub enum DumpError {
    /// Bad command line; `main` prints the usage text after it.
    #[error("{0}")]
    Usage(String),

    #[error("cannot read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error(transparent)]
    Dialect(#[from] DialectError),

    #[error(transparent)]
    Context(#[from] ContextError),

    #[error("cannot serialize output: {0}")]
    Json(#[from] serde_json::Error),
}

impl DumpError {
    pub fn usage(message: impl Into<String>) -> Self {
        DumpError::Usage(message.into())
    }
}
