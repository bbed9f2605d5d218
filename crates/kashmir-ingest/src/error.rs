use std::io;
use std::path::PathBuf;

use kashmir_model::SourceError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum IngestError {
    #[error("failed to open corpus {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to read corpus at line {line}: {source}")]
    Read {
        line: usize,
        #[source]
        source: io::Error,
    },
    #[error("malformed corpus line {line}: {reason}")]
    MalformedLine { line: usize, reason: String },
}

/// Only per-line problems leave the rest of the corpus readable.
impl SourceError for IngestError {
    fn is_recoverable(&self) -> bool {
        matches!(self, Self::MalformedLine { .. })
    }
}
