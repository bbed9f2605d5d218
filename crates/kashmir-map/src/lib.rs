//! Character-frequency schema matching.
//!
//! Each source attribute is summarised as the sum of the character histograms
//! of every training value seen under it. A target field is matched to the
//! source attribute whose aggregated histogram has the greatest cosine
//! similarity with the field's own histogram.

#![deny(unsafe_code)]

pub mod knowledge_base;
pub mod matcher;
pub mod profile;
pub mod score;

pub use knowledge_base::KnowledgeBase;
pub use matcher::{Matcher, TrainingSummary};
pub use profile::{InstanceProfile, frequency_histogram, profile_instance, split_instance};
pub use score::{AttributeScore, best, cosine_similarity, rank};
