//! Match results: target attribute to source attribute assignments.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::ids::AttributeName;
use crate::options::ConfidenceLevel;

/// The source attribute chosen for one target attribute.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttributeMatch {
    /// Target schema attribute.
    pub target: AttributeName,
    /// Most similar source schema attribute.
    pub source: AttributeName,
    /// Cosine similarity between the two histograms (0.0 to 1.0).
    pub score: f64,
    /// Confidence category of `score`.
    pub confidence: ConfidenceLevel,
}

impl AttributeMatch {
    /// False when the assignment was decided by the tie-break alone.
    pub fn has_evidence(&self) -> bool {
        self.confidence != ConfidenceLevel::NoEvidence
    }
}

/// One match per target attribute, in target-schema order.
///
/// Several target attributes may share the same source attribute.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct MatchResult {
    pub matches: Vec<AttributeMatch>,
}

impl MatchResult {
    pub fn new(matches: Vec<AttributeMatch>) -> Self {
        Self { matches }
    }

    pub fn get(&self, target: &str) -> Option<&AttributeMatch> {
        self.matches.iter().find(|m| m.target == target)
    }

    pub fn source_for(&self, target: &str) -> Option<&AttributeName> {
        self.get(target).map(|m| &m.source)
    }

    /// Plain `target -> source` mapping.
    pub fn as_map(&self) -> BTreeMap<String, String> {
        self.matches
            .iter()
            .map(|m| (m.target.to_string(), m.source.to_string()))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.matches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, AttributeMatch> {
        self.matches.iter()
    }

    /// Returns the count of matches at each confidence level.
    pub fn count_by_level(&self) -> BTreeMap<ConfidenceLevel, usize> {
        let mut counts = BTreeMap::new();
        for m in &self.matches {
            *counts.entry(m.confidence).or_insert(0) += 1;
        }
        counts
    }
}

impl<'a> IntoIterator for &'a MatchResult {
    type Item = &'a AttributeMatch;
    type IntoIter = std::slice::Iter<'a, AttributeMatch>;

    fn into_iter(self) -> Self::IntoIter {
        self.matches.iter()
    }
}
