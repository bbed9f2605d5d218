pub mod error;
pub mod histogram;
pub mod ids;
pub mod mapping;
pub mod options;
pub mod schema;

pub use error::{ModelError, Result, SourceError};
pub use histogram::FrequencyHistogram;
pub use ids::AttributeName;
pub use mapping::{AttributeMatch, MatchResult};
pub use options::{ConfidenceLevel, ConfidenceThresholds, MatchOptions};
pub use schema::{FIELD_DELIMITER, Schema, extract_schema};
