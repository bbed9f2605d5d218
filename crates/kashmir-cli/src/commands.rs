use anyhow::Result;
use kashmir_cli::pipeline::{MatchReport, MatchRequest, ProfileReport, run_match, run_profile};
use kashmir_map::frequency_histogram;
use kashmir_model::{ConfidenceThresholds, FrequencyHistogram, MatchOptions};

use crate::cli::{HistogramArgs, MatchArgs, ProfileArgs, ThresholdsArg};

pub fn run_match_command(args: &MatchArgs) -> Result<MatchReport> {
    let thresholds = match args.thresholds {
        ThresholdsArg::Default => ConfidenceThresholds::default(),
        ThresholdsArg::Strict => ConfidenceThresholds::strict(),
        ThresholdsArg::Relaxed => ConfidenceThresholds::relaxed(),
    };
    let request = MatchRequest {
        source: args.source.clone(),
        target: args.target.clone(),
        corpus: args.corpus.clone(),
        queries: args.queries.clone(),
        options: MatchOptions::new()
            .with_thresholds(thresholds)
            .with_training_shards(args.shards),
    };
    run_match(&request)
}

pub fn run_profile_command(args: &ProfileArgs) -> Result<ProfileReport> {
    let options = MatchOptions::new().with_training_shards(args.shards);
    run_profile(&args.source, &args.corpus, &options)
}

pub fn run_histogram_command(args: &HistogramArgs) -> FrequencyHistogram {
    frequency_histogram(&args.text)
}
