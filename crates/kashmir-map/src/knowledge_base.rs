//! Aggregated per-attribute histograms learned from a training corpus.
//!
//! Accumulation is an elementwise sum, so it is commutative and associative:
//! the knowledge base does not depend on the order instances are consumed in,
//! and partial bases built from disjoint shards can be merged into the same
//! result a sequential pass produces.

use std::thread;

use kashmir_model::{AttributeName, FrequencyHistogram, ModelError, Result, Schema};

use crate::profile::{InstanceProfile, profile_instance};

/// One aggregated histogram per source attribute.
#[derive(Debug, Clone, PartialEq)]
pub struct KnowledgeBase {
    schema: Schema,
    histograms: Vec<FrequencyHistogram>,
    instances: usize,
}

impl KnowledgeBase {
    /// An empty knowledge base with one empty histogram per attribute.
    pub fn new(schema: Schema) -> Self {
        let histograms = vec![FrequencyHistogram::new(); schema.len()];
        Self {
            schema,
            histograms,
            instances: 0,
        }
    }

    /// Train on one instance per line. Blank lines are skipped.
    pub fn train<I>(schema: Schema, lines: I) -> Self
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let mut knowledge_base = Self::new(schema);
        for line in lines {
            knowledge_base.accumulate_line(line.as_ref());
        }
        knowledge_base
    }

    /// Train on `shards` disjoint chunks of `lines` in parallel.
    ///
    /// Each shard builds a private partial knowledge base; partials are then
    /// merged one at a time by the calling thread.
    pub fn train_sharded<S>(schema: Schema, lines: &[S], shards: usize) -> Self
    where
        S: AsRef<str> + Sync,
    {
        if shards <= 1 || lines.len() < 2 {
            return Self::train(schema, lines);
        }

        let chunk_size = lines.len().div_ceil(shards);
        let partials: Vec<Self> = thread::scope(|scope| {
            let handles: Vec<_> = lines
                .chunks(chunk_size)
                .map(|chunk| {
                    let schema = schema.clone();
                    scope.spawn(move || Self::train(schema, chunk))
                })
                .collect();
            handles
                .into_iter()
                .map(|handle| match handle.join() {
                    Ok(partial) => partial,
                    Err(panic) => std::panic::resume_unwind(panic),
                })
                .collect()
        });

        tracing::debug!(shards = partials.len(), chunk_size, "merging training shards");
        let mut knowledge_base = Self::new(schema);
        for partial in &partials {
            knowledge_base.absorb(partial);
        }
        knowledge_base
    }

    /// Profile `line` against the source schema and accumulate it.
    ///
    /// Returns false when the line is blank and was skipped.
    pub fn accumulate_line(&mut self, line: &str) -> bool {
        if line.trim().is_empty() {
            tracing::trace!("skipping blank training line");
            return false;
        }
        let profile = profile_instance(line, &self.schema);
        self.add_profile(&profile);
        true
    }

    /// Add one instance profile to the aggregate.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::SchemaMismatch`] when the profile was built
    /// against a different schema; nothing is accumulated in that case.
    pub fn accumulate(&mut self, profile: &InstanceProfile) -> Result<()> {
        let aligned = profile.len() == self.schema.len()
            && profile
                .iter()
                .zip(self.schema.iter())
                .all(|((name, _), expected)| name == expected);
        if !aligned {
            let found: Vec<String> = profile.iter().map(|(name, _)| name.to_string()).collect();
            return Err(ModelError::SchemaMismatch {
                expected: self.schema.to_string(),
                found: found.join(", "),
            });
        }
        self.add_profile(profile);
        Ok(())
    }

    fn add_profile(&mut self, profile: &InstanceProfile) {
        for (aggregate, histogram) in self.histograms.iter_mut().zip(profile.histograms()) {
            aggregate.merge(histogram);
        }
        self.instances += 1;
    }

    /// Merge another knowledge base built over the same schema.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::SchemaMismatch`] when the schemas differ.
    pub fn merge(&mut self, other: &KnowledgeBase) -> Result<()> {
        if self.schema != other.schema {
            return Err(ModelError::SchemaMismatch {
                expected: self.schema.to_string(),
                found: other.schema.to_string(),
            });
        }
        self.absorb(other);
        Ok(())
    }

    fn absorb(&mut self, other: &KnowledgeBase) {
        for (aggregate, histogram) in self.histograms.iter_mut().zip(&other.histograms) {
            aggregate.merge(histogram);
        }
        self.instances += other.instances;
    }

    /// Aggregated histogram of the first attribute named `attribute`.
    pub fn histogram(&self, attribute: &str) -> Option<&FrequencyHistogram> {
        self.schema
            .position(attribute)
            .and_then(|index| self.histograms.get(index))
    }

    /// Attributes and their histograms in source-schema order.
    pub fn iter(&self) -> impl Iterator<Item = (&AttributeName, &FrequencyHistogram)> {
        self.schema.iter().zip(&self.histograms)
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// Number of training instances accumulated.
    pub fn instances(&self) -> usize {
        self.instances
    }
}
