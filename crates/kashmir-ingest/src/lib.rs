#![deny(unsafe_code)]

pub mod corpus;
pub mod error;

pub use corpus::{CorpusReader, lines_from_str, read_corpus};
pub use error::IngestError;
