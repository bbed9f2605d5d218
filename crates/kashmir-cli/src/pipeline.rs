//! Train-and-match pipeline shared by the CLI commands.

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use kashmir_ingest::CorpusReader;
use kashmir_map::{KnowledgeBase, Matcher, TrainingSummary};
use kashmir_model::{AttributeMatch, ConfidenceLevel, FrequencyHistogram, MatchOptions, Schema};
use serde::Serialize;

use crate::logging::redact_value;

/// Inputs for one matching run.
#[derive(Debug, Clone)]
pub struct MatchRequest {
    pub source: String,
    pub target: String,
    pub corpus: PathBuf,
    pub queries: Vec<String>,
    pub options: MatchOptions,
}

/// Matches of one query instance.
#[derive(Debug, Clone, Serialize)]
pub struct QueryReport {
    pub query: String,
    pub matches: Vec<AttributeMatch>,
}

/// Result of a matching run.
#[derive(Debug, Clone, Serialize)]
pub struct MatchReport {
    pub source: Schema,
    pub target: Schema,
    pub training: TrainingSummary,
    pub queries: Vec<QueryReport>,
}

impl MatchReport {
    /// Confidence levels that occur in any query, strongest first.
    pub fn confidence_levels(&self) -> Vec<ConfidenceLevel> {
        let mut levels: Vec<ConfidenceLevel> = self
            .queries
            .iter()
            .flat_map(|query| query.matches.iter().map(|m| m.confidence))
            .collect();
        levels.sort_unstable_by(|a, b| b.cmp(a));
        levels.dedup();
        levels
    }
}

/// Aggregated histogram of one source attribute.
#[derive(Debug, Clone, Serialize)]
pub struct AttributeProfileRow {
    pub attribute: String,
    pub distinct: usize,
    pub total: u64,
    pub histogram: FrequencyHistogram,
}

/// Knowledge base learned from a corpus.
#[derive(Debug, Clone, Serialize)]
pub struct ProfileReport {
    pub source: Schema,
    pub training: TrainingSummary,
    pub attributes: Vec<AttributeProfileRow>,
}

fn parse_schema(text: &str, role: &str) -> Result<Schema> {
    Schema::extract_strict(text).with_context(|| format!("invalid {role} schema"))
}

fn open_corpus(path: &Path) -> Result<CorpusReader<BufReader<File>>> {
    CorpusReader::open(path).with_context(|| format!("cannot read corpus {}", path.display()))
}

/// Train on the request corpus and match every query.
///
/// # Errors
///
/// Fails on malformed schemas, an unreadable corpus file, or when no query
/// is given.
pub fn run_match(request: &MatchRequest) -> Result<MatchReport> {
    let source = parse_schema(&request.source, "source")?;
    let target = parse_schema(&request.target, "target")?;
    if request.queries.is_empty() {
        anyhow::bail!("no query instance given");
    }

    let mut matcher = Matcher::from_schemas(source.clone(), target.clone(), request.options.clone());
    let training = matcher.prepare_from_source(open_corpus(&request.corpus)?)?;
    if training.instances == 0 {
        tracing::warn!(corpus = %request.corpus.display(), "corpus contains no instances");
    }

    let mut queries = Vec::with_capacity(request.queries.len());
    for query in &request.queries {
        tracing::trace!(query = redact_value(query), "matching query");
        let result = matcher.match_instance(query)?;
        queries.push(QueryReport {
            query: query.clone(),
            matches: result.matches,
        });
    }

    Ok(MatchReport {
        source,
        target,
        training,
        queries,
    })
}

/// Train on a corpus and describe the resulting knowledge base.
///
/// # Errors
///
/// Fails on a malformed schema or an unreadable corpus file.
pub fn run_profile(source: &str, corpus: &Path, options: &MatchOptions) -> Result<ProfileReport> {
    let schema = parse_schema(source, "source")?;
    let mut matcher = Matcher::from_schemas(schema.clone(), Schema::default(), options.clone());
    let training = matcher.prepare_from_source(open_corpus(corpus)?)?;
    let knowledge_base = matcher
        .knowledge_base()
        .context("knowledge base missing after training")?;

    Ok(ProfileReport {
        source: schema,
        training,
        attributes: profile_rows(knowledge_base),
    })
}

/// One row per source attribute, in schema order.
pub fn profile_rows(knowledge_base: &KnowledgeBase) -> Vec<AttributeProfileRow> {
    knowledge_base
        .iter()
        .map(|(attribute, histogram)| AttributeProfileRow {
            attribute: attribute.to_string(),
            distinct: histogram.len(),
            total: histogram.total(),
            histogram: histogram.clone(),
        })
        .collect()
}
