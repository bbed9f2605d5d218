//! CLI argument definitions for the kashmir schema matcher.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "kashmir",
    version,
    about = "Match attribute schemas by character-frequency profiles",
    long_about = "Learn a character-frequency profile of every source attribute from a\n\
                  training corpus, then assign each field of a target-ordered instance\n\
                  to the source attribute with the most similar profile."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,

    /// Allow instance values to appear in trace logs.
    #[arg(long = "log-data", global = true)]
    pub log_data: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Train on a corpus and match query instances against it.
    Match(MatchArgs),

    /// Train on a corpus and print the learned knowledge base.
    Profile(ProfileArgs),

    /// Print the frequency histogram of a text.
    Histogram(HistogramArgs),
}

#[derive(Parser)]
pub struct MatchArgs {
    /// Source schema: comma-separated attribute names of the corpus fields.
    #[arg(long = "source", value_name = "SCHEMA")]
    pub source: String,

    /// Target schema: comma-separated attribute names of the query fields.
    #[arg(long = "target", value_name = "SCHEMA")]
    pub target: String,

    /// Training corpus, one instance per line.
    #[arg(long = "corpus", value_name = "FILE")]
    pub corpus: PathBuf,

    /// Query instances ordered by the target schema.
    #[arg(value_name = "QUERY", required = true)]
    pub queries: Vec<String>,

    /// Confidence threshold preset.
    #[arg(long = "thresholds", value_enum, default_value = "default")]
    pub thresholds: ThresholdsArg,

    /// Split training into this many parallel shards.
    #[arg(long = "shards", default_value_t = 1)]
    pub shards: usize,

    /// Output format.
    #[arg(long = "format", value_enum, default_value = "table")]
    pub format: OutputFormatArg,
}

#[derive(Parser)]
pub struct ProfileArgs {
    /// Source schema: comma-separated attribute names of the corpus fields.
    #[arg(long = "source", value_name = "SCHEMA")]
    pub source: String,

    /// Training corpus, one instance per line.
    #[arg(long = "corpus", value_name = "FILE")]
    pub corpus: PathBuf,

    /// Split training into this many parallel shards.
    #[arg(long = "shards", default_value_t = 1)]
    pub shards: usize,

    /// Output format.
    #[arg(long = "format", value_enum, default_value = "table")]
    pub format: OutputFormatArg,
}

#[derive(Parser)]
pub struct HistogramArgs {
    /// Text to profile.
    #[arg(value_name = "TEXT")]
    pub text: String,

    /// Output format.
    #[arg(long = "format", value_enum, default_value = "table")]
    pub format: OutputFormatArg,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum OutputFormatArg {
    Table,
    Json,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum ThresholdsArg {
    Default,
    Strict,
    Relaxed,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
