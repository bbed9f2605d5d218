use std::convert::Infallible;
use std::fmt;

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelError {
    #[error("malformed schema '{schema}': blank attribute name at position {position}")]
    MalformedSchema { position: usize, schema: String },
    #[error("matcher has not been prepared with a training corpus")]
    UninitializedModel,
    #[error("matcher has already been prepared")]
    AlreadyTrained,
    #[error("schema mismatch: expected [{expected}], found [{found}]")]
    SchemaMismatch { expected: String, found: String },
    #[error("unknown attribute: {0}")]
    UnknownAttribute(String),
    #[error("training corpus failed at item {item}: {message}")]
    CorpusRead { item: usize, message: String },
}

pub type Result<T> = std::result::Result<T, ModelError>;

/// Error yielded by a training corpus source.
pub trait SourceError: fmt::Display {
    /// True when the failed item can be skipped and the source read further.
    fn is_recoverable(&self) -> bool;
}

impl SourceError for Infallible {
    fn is_recoverable(&self) -> bool {
        match *self {}
    }
}
