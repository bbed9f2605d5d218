//! Schema matcher: training and inference.
//!
//! A [`Matcher`] starts untrained. [`Matcher::prepare`] builds the knowledge
//! base from a training corpus whose fields follow the source schema, after
//! which [`Matcher::match_instance`] assigns each field of a target-ordered
//! instance to the most similar source attribute.

use kashmir_model::{
    AttributeMatch, MatchOptions, MatchResult, ModelError, Result, Schema, SourceError,
};
use serde::{Deserialize, Serialize};

use crate::knowledge_base::KnowledgeBase;
use crate::profile::profile_instance;
use crate::score::{AttributeScore, best, rank};

/// Counts reported after training.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TrainingSummary {
    /// Instances accumulated into the knowledge base.
    pub instances: usize,
    /// Corpus items that could not be read and were skipped.
    pub skipped: usize,
}

#[derive(Debug, Clone)]
enum MatcherState {
    Untrained,
    Trained(KnowledgeBase),
}

/// Matches target-schema fields to source-schema attributes.
#[derive(Debug, Clone)]
pub struct Matcher {
    source: Schema,
    target: Schema,
    options: MatchOptions,
    state: MatcherState,
}

impl Matcher {
    /// Create an untrained matcher from two schema strings.
    pub fn new(source: &str, target: &str, options: MatchOptions) -> Self {
        Self::from_schemas(Schema::extract(source), Schema::extract(target), options)
    }

    pub fn from_schemas(source: Schema, target: Schema, options: MatchOptions) -> Self {
        Self {
            source,
            target,
            options,
            state: MatcherState::Untrained,
        }
    }

    pub fn source_schema(&self) -> &Schema {
        &self.source
    }

    pub fn target_schema(&self) -> &Schema {
        &self.target
    }

    pub fn options(&self) -> &MatchOptions {
        &self.options
    }

    pub fn is_trained(&self) -> bool {
        matches!(self.state, MatcherState::Trained(_))
    }

    /// The trained knowledge base, if any.
    pub fn knowledge_base(&self) -> Option<&KnowledgeBase> {
        match &self.state {
            MatcherState::Trained(knowledge_base) => Some(knowledge_base),
            MatcherState::Untrained => None,
        }
    }

    /// Train on a corpus of source-ordered instances, one per item.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::AlreadyTrained`] if the matcher was prepared before.
    pub fn prepare<I>(&mut self, corpus: I) -> Result<TrainingSummary>
    where
        I: IntoIterator,
        I::Item: AsRef<str> + Sync,
    {
        self.prepare_from_source(corpus.into_iter().map(Ok::<_, std::convert::Infallible>))
    }

    /// Train on a fallible corpus source.
    ///
    /// Recoverable item errors are skipped with a warning and counted in
    /// [`TrainingSummary::skipped`]. Any other error aborts training and the
    /// matcher stays untrained.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::AlreadyTrained`] if the matcher was prepared
    /// before and [`ModelError::CorpusRead`] when the source fails.
    pub fn prepare_from_source<I, S, E>(&mut self, source: I) -> Result<TrainingSummary>
    where
        I: IntoIterator<Item = std::result::Result<S, E>>,
        S: AsRef<str> + Sync,
        E: SourceError,
    {
        if self.is_trained() {
            return Err(ModelError::AlreadyTrained);
        }

        let mut skipped = 0;
        let mut lines = Vec::new();
        for (index, item) in source.into_iter().enumerate() {
            match item {
                Ok(line) => lines.push(line),
                Err(error) if error.is_recoverable() => {
                    skipped += 1;
                    tracing::warn!(item = index + 1, %error, "skipping unreadable training instance");
                }
                Err(error) => {
                    tracing::error!(item = index + 1, %error, "training corpus failed");
                    return Err(ModelError::CorpusRead {
                        item: index + 1,
                        message: error.to_string(),
                    });
                }
            }
        }

        let knowledge_base = if self.options.training_shards > 1 {
            KnowledgeBase::train_sharded(self.source.clone(), &lines, self.options.training_shards)
        } else {
            KnowledgeBase::train(self.source.clone(), &lines)
        };

        let summary = TrainingSummary {
            instances: knowledge_base.instances(),
            skipped,
        };
        tracing::info!(
            instances = summary.instances,
            skipped = summary.skipped,
            attributes = self.source.len(),
            "knowledge base trained"
        );
        self.state = MatcherState::Trained(knowledge_base);
        Ok(summary)
    }

    fn trained(&self) -> Result<&KnowledgeBase> {
        self.knowledge_base().ok_or(ModelError::UninitializedModel)
    }

    /// Match one target-ordered instance.
    ///
    /// Every target attribute gets the source attribute with the greatest
    /// cosine similarity; ties go to the earliest source attribute. A blank
    /// field scores 0 everywhere and therefore maps to the first source
    /// attribute with [`kashmir_model::ConfidenceLevel::NoEvidence`].
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::UninitializedModel`] before [`Matcher::prepare`].
    pub fn match_instance(&self, raw: &str) -> Result<MatchResult> {
        let knowledge_base = self.trained()?;
        let profile = profile_instance(raw, &self.target);

        let mut matches = Vec::with_capacity(profile.len());
        for (target, histogram) in profile.iter() {
            let Some(chosen) = best(histogram, knowledge_base) else {
                continue;
            };
            let confidence = self.options.thresholds.categorize(chosen.score);
            tracing::debug!(
                target = %target,
                source = %chosen.source,
                score = chosen.score,
                confidence = confidence.as_str(),
                "matched attribute"
            );
            matches.push(AttributeMatch {
                target: target.clone(),
                source: chosen.source,
                score: chosen.score,
                confidence,
            });
        }
        Ok(MatchResult::new(matches))
    }

    /// Match each instance of a query sequence independently.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::UninitializedModel`] before [`Matcher::prepare`].
    pub fn match_instances<I>(&self, instances: I) -> Result<Vec<MatchResult>>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        instances
            .into_iter()
            .map(|raw| self.match_instance(raw.as_ref()))
            .collect()
    }

    /// Full ranking of source attributes for one target field of `raw`.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::UninitializedModel`] before [`Matcher::prepare`]
    /// and [`ModelError::UnknownAttribute`] when `target` is not in the
    /// target schema.
    pub fn rank_field(&self, raw: &str, target: &str) -> Result<Vec<AttributeScore>> {
        let knowledge_base = self.trained()?;
        let profile = profile_instance(raw, &self.target);
        let histogram = profile
            .get(target)
            .ok_or_else(|| ModelError::UnknownAttribute(target.to_string()))?;
        Ok(rank(histogram, knowledge_base))
    }
}

#[cfg(test)]
mod tests {
    use std::fmt;

    use super::*;
    use kashmir_model::{AttributeName, ConfidenceLevel};

    const SOURCE: &str = "full_name, language, reg_age, origin_city";
    const TARGET: &str = "name, city, age";
    const CORPUS: [&str; 3] = [
        "Pedro, english, 23, Rio de Janeiro",
        "Brian, french, 30, New York",
        "Mark, english, , San Francisco",
    ];

    fn trained() -> Matcher {
        let mut matcher = Matcher::new(SOURCE, TARGET, MatchOptions::default());
        matcher.prepare(CORPUS).expect("prepare matcher");
        matcher
    }

    #[test]
    fn match_before_prepare_fails() {
        let matcher = Matcher::new(SOURCE, TARGET, MatchOptions::default());
        assert!(!matcher.is_trained());
        assert_eq!(
            matcher.match_instance("Peter, London, 26"),
            Err(ModelError::UninitializedModel)
        );
        assert_eq!(
            matcher.rank_field("Peter, London, 26", "name"),
            Err(ModelError::UninitializedModel)
        );
    }

    #[test]
    fn prepare_is_one_shot() {
        let mut matcher = trained();
        assert!(matcher.is_trained());
        assert_eq!(matcher.prepare(CORPUS), Err(ModelError::AlreadyTrained));
    }

    #[test]
    fn matches_each_target_field() {
        let result = trained().match_instance("Peter, London, 26").expect("match");
        let pairs: Vec<(&str, &str)> = result
            .iter()
            .map(|m| (m.target.as_str(), m.source.as_str()))
            .collect();
        assert_eq!(
            pairs,
            vec![
                ("name", "full_name"),
                ("city", "origin_city"),
                ("age", "reg_age"),
            ]
        );
    }

    #[test]
    fn blank_query_field_falls_back_to_first_source() {
        let result = trained().match_instance("Peter, , 26").expect("match");
        let city = result.get("city").expect("city entry");
        assert_eq!(city.source.as_str(), "full_name");
        assert_eq!(city.score, 0.0);
        assert_eq!(city.confidence, ConfidenceLevel::NoEvidence);
    }

    #[test]
    fn short_query_still_reports_every_target() {
        let result = trained().match_instance("Peter").expect("match");
        assert_eq!(result.len(), 3);
        assert!(!result.get("age").expect("age entry").has_evidence());
    }

    #[test]
    fn rank_field_lists_every_source() {
        let ranking = trained()
            .rank_field("Peter, London, 26", "age")
            .expect("rank age");
        assert_eq!(ranking.len(), 4);
        assert_eq!(ranking[0].source.as_str(), "reg_age");
        assert!(ranking[1..].iter().all(|s| s.score == 0.0));
    }

    #[test]
    fn rank_field_rejects_unknown_target() {
        assert_eq!(
            trained().rank_field("Peter, London, 26", "zip"),
            Err(ModelError::UnknownAttribute("zip".to_string()))
        );
    }

    #[derive(Debug)]
    enum LineError {
        Garbled,
        Lost,
    }

    impl fmt::Display for LineError {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            match self {
                Self::Garbled => write!(f, "invalid utf-8"),
                Self::Lost => write!(f, "stream closed"),
            }
        }
    }

    impl SourceError for LineError {
        fn is_recoverable(&self) -> bool {
            matches!(self, Self::Garbled)
        }
    }

    #[test]
    fn skipped_items_are_counted() {
        let mut matcher = Matcher::new(SOURCE, TARGET, MatchOptions::default());
        let corpus = vec![Ok(CORPUS[0]), Err(LineError::Garbled), Ok(CORPUS[1])];
        let summary = matcher.prepare_from_source(corpus).expect("prepare");
        assert_eq!(
            summary,
            TrainingSummary {
                instances: 2,
                skipped: 1
            }
        );
    }

    #[test]
    fn fatal_source_error_leaves_matcher_untrained() {
        let mut matcher = Matcher::new(SOURCE, TARGET, MatchOptions::default());
        let corpus = vec![Ok(CORPUS[0]), Err(LineError::Lost), Ok(CORPUS[1])];
        assert_eq!(
            matcher.prepare_from_source(corpus),
            Err(ModelError::CorpusRead {
                item: 2,
                message: "stream closed".to_string(),
            })
        );
        assert!(!matcher.is_trained());
        assert_eq!(
            matcher.match_instance("Peter, London, 26"),
            Err(ModelError::UninitializedModel)
        );

        matcher.prepare(CORPUS).expect("retry after failure");
        assert!(matcher.is_trained());
    }

    #[test]
    fn sharded_training_gives_same_matches() {
        let mut sharded = Matcher::new(
            SOURCE,
            TARGET,
            MatchOptions::default().with_training_shards(3),
        );
        sharded.prepare(CORPUS).expect("prepare sharded");
        assert_eq!(sharded.knowledge_base(), trained().knowledge_base());
    }

    #[test]
    fn match_instances_handles_sequences() {
        let results = trained()
            .match_instances(["Peter, London, 26"])
            .expect("match sequence");
        assert_eq!(results.len(), 1);
        assert_eq!(
            results[0].source_for("city").map(AttributeName::as_str),
            Some("origin_city")
        );
    }
}
