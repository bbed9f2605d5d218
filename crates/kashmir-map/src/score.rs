//! Cosine similarity scoring between frequency histograms.
//!
//! Similarity is the dot product of two histograms over the union of their
//! characters divided by the product of their Euclidean norms. An empty
//! histogram on either side scores exactly 0, which ranking treats as "no
//! evidence".

use std::cmp::Ordering;

use kashmir_model::{AttributeName, FrequencyHistogram};
use serde::{Deserialize, Serialize};

use crate::knowledge_base::KnowledgeBase;

/// Cosine similarity of two histograms, in `[0, 1]`.
///
/// The smaller histogram is iterated against the larger one. Sums are exact
/// integers and the single division is order-independent, so the result is
/// identical for either argument order.
pub fn cosine_similarity(h1: &FrequencyHistogram, h2: &FrequencyHistogram) -> f64 {
    if h1.is_empty() || h2.is_empty() {
        return 0.0;
    }

    let (small, large) = if h1.len() <= h2.len() { (h1, h2) } else { (h2, h1) };
    let dot: u128 = small
        .iter()
        .map(|(c, n)| u128::from(n) * u128::from(large.count(c)))
        .sum();
    if dot == 0 {
        return 0.0;
    }

    let norms = (h1.squared_norm() as f64) * (h2.squared_norm() as f64);
    dot as f64 / norms.sqrt()
}

/// Similarity of one target histogram to one source attribute.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttributeScore {
    pub source: AttributeName,
    pub score: f64,
}

/// Score `histogram` against every source attribute of `knowledge_base`.
///
/// Returns every attribute sorted by descending score. The sort is stable, so
/// tied attributes keep their source-schema order.
pub fn rank(histogram: &FrequencyHistogram, knowledge_base: &KnowledgeBase) -> Vec<AttributeScore> {
    let mut scores: Vec<AttributeScore> = knowledge_base
        .iter()
        .map(|(source, aggregate)| AttributeScore {
            source: source.clone(),
            score: cosine_similarity(histogram, aggregate),
        })
        .collect();
    scores.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));
    scores
}

/// The best-scoring source attribute; the earliest in schema order on ties.
pub fn best(histogram: &FrequencyHistogram, knowledge_base: &KnowledgeBase) -> Option<AttributeScore> {
    let mut best: Option<AttributeScore> = None;
    for (source, aggregate) in knowledge_base.iter() {
        let score = cosine_similarity(histogram, aggregate);
        tracing::trace!(source = %source, score, "similarity");
        if best.as_ref().is_none_or(|current| score > current.score) {
            best = Some(AttributeScore {
                source: source.clone(),
                score,
            });
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use kashmir_model::Schema;

    fn histogram(pairs: &[(char, u64)]) -> FrequencyHistogram {
        pairs.iter().copied().collect()
    }

    #[test]
    fn empty_histogram_scores_zero() {
        let h2 = histogram(&[('a', 5), ('c', 4), ('e', 10)]);
        assert_eq!(cosine_similarity(&FrequencyHistogram::new(), &h2), 0.0);
        assert_eq!(cosine_similarity(&h2, &FrequencyHistogram::new()), 0.0);
        assert_eq!(
            cosine_similarity(&FrequencyHistogram::new(), &FrequencyHistogram::new()),
            0.0
        );
    }

    #[test]
    fn known_value() {
        let h1 = histogram(&[('a', 2), ('b', 1), ('c', 3)]);
        let h2 = histogram(&[('a', 5), ('c', 4), ('e', 10)]);
        let score = cosine_similarity(&h1, &h2);
        assert!((score - 0.495164050266978).abs() < 1e-12, "got {score}");
    }

    #[test]
    fn symmetric_for_unequal_sizes() {
        let h1 = histogram(&[('a', 2)]);
        let h2 = histogram(&[('a', 1), ('b', 7), ('c', 3), ('d', 1)]);
        assert_eq!(cosine_similarity(&h1, &h2), cosine_similarity(&h2, &h1));
    }

    #[test]
    fn self_similarity_is_one() {
        let h = FrequencyHistogram::from_text("San Francisco");
        assert!((cosine_similarity(&h, &h) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn disjoint_histograms_score_zero() {
        let h1 = FrequencyHistogram::from_text("abc");
        let h2 = FrequencyHistogram::from_text("xyz");
        assert_eq!(cosine_similarity(&h1, &h2), 0.0);
    }

    #[test]
    fn rank_keeps_schema_order_on_ties() {
        let schema = Schema::extract("first, second, third");
        let knowledge_base = KnowledgeBase::train(schema, ["ab, ab, zz"]);
        let ranking = rank(&FrequencyHistogram::from_text("a"), &knowledge_base);
        let order: Vec<&str> = ranking.iter().map(|s| s.source.as_str()).collect();
        assert_eq!(order, vec!["first", "second", "third"]);
        assert_eq!(ranking[2].score, 0.0);
    }

    #[test]
    fn best_prefers_first_on_ties() {
        let schema = Schema::extract("first, second");
        let knowledge_base = KnowledgeBase::train(schema, ["ab, ab"]);
        let chosen = best(&FrequencyHistogram::new(), &knowledge_base).expect("non-empty schema");
        assert_eq!(chosen.source.as_str(), "first");
        assert_eq!(chosen.score, 0.0);
    }

    #[test]
    fn best_matches_head_of_ranking() {
        let schema = Schema::extract("full_name, language, reg_age, origin_city");
        let knowledge_base = KnowledgeBase::train(
            schema,
            [
                "Pedro, english, 23, Rio de Janeiro",
                "Brian, french, 30, New York",
                "Mark, english, , San Francisco",
            ],
        );
        let query = FrequencyHistogram::from_text("London");
        let ranking = rank(&query, &knowledge_base);
        assert_eq!(best(&query, &knowledge_base).as_ref(), ranking.first());
        assert_eq!(ranking[0].source.as_str(), "origin_city");
    }

    #[test]
    fn best_of_empty_schema_is_none() {
        let knowledge_base = KnowledgeBase::new(Schema::default());
        assert!(best(&FrequencyHistogram::from_text("a"), &knowledge_base).is_none());
    }
}
