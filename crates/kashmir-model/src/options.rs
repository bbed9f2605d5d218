//! Configuration options for matching.

use serde::{Deserialize, Serialize};

/// Confidence level categories for match quality assessment.
///
/// Levels are informational only: every target attribute is assigned a
/// source attribute regardless of its level.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum ConfidenceLevel {
    /// Similarity is exactly zero: no shared characters, or an empty field.
    /// The assignment was decided by source-schema order alone.
    NoEvidence,
    /// Non-zero similarity below the medium threshold.
    Low,
    /// Similarity at or above the medium threshold.
    Medium,
    /// Similarity at or above the high threshold.
    High,
}

impl ConfidenceLevel {
    /// Returns a human-readable description of the confidence level.
    #[must_use]
    pub fn description(&self) -> &'static str {
        match self {
            Self::High => "high confidence - likely correct",
            Self::Medium => "medium confidence - should review",
            Self::Low => "low confidence - needs verification",
            Self::NoEvidence => "no evidence - chosen by schema order",
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
            Self::NoEvidence => "none",
        }
    }
}

/// Thresholds separating confidence levels.
///
/// - exactly `0.0`: [`ConfidenceLevel::NoEvidence`]
/// - below `medium`: [`ConfidenceLevel::Low`]
/// - `medium` to `high`: [`ConfidenceLevel::Medium`]
/// - at or above `high`: [`ConfidenceLevel::High`]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConfidenceThresholds {
    /// Minimum similarity for high-confidence matches (default: 0.80).
    pub high: f64,
    /// Minimum similarity for medium-confidence matches (default: 0.50).
    pub medium: f64,
}

impl Default for ConfidenceThresholds {
    fn default() -> Self {
        Self {
            high: 0.80,
            medium: 0.50,
        }
    }
}

impl ConfidenceThresholds {
    #[must_use]
    pub fn strict() -> Self {
        Self {
            high: 0.90,
            medium: 0.70,
        }
    }

    #[must_use]
    pub fn relaxed() -> Self {
        Self {
            high: 0.70,
            medium: 0.40,
        }
    }

    /// Categorizes a similarity score into a confidence level.
    #[must_use]
    pub fn categorize(&self, score: f64) -> ConfidenceLevel {
        if score <= 0.0 {
            ConfidenceLevel::NoEvidence
        } else if score >= self.high {
            ConfidenceLevel::High
        } else if score >= self.medium {
            ConfidenceLevel::Medium
        } else {
            ConfidenceLevel::Low
        }
    }
}

/// Options controlling training and matching.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchOptions {
    /// Thresholds used to label each match with a confidence level.
    pub thresholds: ConfidenceThresholds,
    /// Number of shards the training corpus is split into.
    ///
    /// Values of 0 or 1 train sequentially.
    pub training_shards: usize,
}

impl Default for MatchOptions {
    fn default() -> Self {
        Self {
            thresholds: ConfidenceThresholds::default(),
            training_shards: 1,
        }
    }
}

impl MatchOptions {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_thresholds(mut self, thresholds: ConfidenceThresholds) -> Self {
        self.thresholds = thresholds;
        self
    }

    #[must_use]
    pub fn with_training_shards(mut self, shards: usize) -> Self {
        self.training_shards = shards;
        self
    }
}
