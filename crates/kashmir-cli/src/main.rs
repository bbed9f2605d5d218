//! kashmir schema matcher CLI.

use clap::{ColorChoice, Parser};
use kashmir_cli::logging::{LogConfig, LogFormat, init_logging};
use serde::Serialize;
use std::io::{self, IsTerminal};
use tracing::level_filters::LevelFilter;

mod cli;
mod commands;
mod summary;

use crate::cli::{Cli, Command, LogFormatArg, LogLevelArg, OutputFormatArg};
use crate::commands::{run_histogram_command, run_match_command, run_profile_command};
use crate::summary::{print_histogram, print_match_report, print_profile_report};

fn main() {
    let cli = Cli::parse();
    cli.color.write_global();
    let log_config = log_config_from_cli(&cli);
    if let Err(error) = init_logging(&log_config) {
        eprintln!("error: failed to initialize logging: {error}");
        std::process::exit(1);
    }
    let exit_code = match cli.command {
        Command::Match(args) => match run_match_command(&args) {
            Ok(report) => emit(args.format, &report, print_match_report),
            Err(error) => report_error(&error),
        },
        Command::Profile(args) => match run_profile_command(&args) {
            Ok(report) => emit(args.format, &report, print_profile_report),
            Err(error) => report_error(&error),
        },
        Command::Histogram(args) => {
            let histogram = run_histogram_command(&args);
            emit(args.format, &histogram, print_histogram)
        }
    };
    std::process::exit(exit_code);
}

fn emit<T: Serialize>(format: OutputFormatArg, value: &T, print_table: fn(&T)) -> i32 {
    match format {
        OutputFormatArg::Table => {
            print_table(value);
            0
        }
        OutputFormatArg::Json => match serde_json::to_string_pretty(value) {
            Ok(json) => {
                println!("{json}");
                0
            }
            Err(error) => {
                eprintln!("error: failed to serialize output: {error}");
                1
            }
        },
    }
}

fn report_error(error: &anyhow::Error) -> i32 {
    eprintln!("error: {error:#}");
    1
}

/// Build logging configuration from CLI flags with consistent precedence.
fn log_config_from_cli(cli: &Cli) -> LogConfig {
    let level_filter = match cli.log_level {
        Some(LogLevelArg::Error) => LevelFilter::ERROR,
        Some(LogLevelArg::Warn) => LevelFilter::WARN,
        Some(LogLevelArg::Info) => LevelFilter::INFO,
        Some(LogLevelArg::Debug) => LevelFilter::DEBUG,
        Some(LogLevelArg::Trace) => LevelFilter::TRACE,
        None => cli.verbosity.tracing_level_filter(),
    };
    let format = match cli.log_format {
        LogFormatArg::Pretty => LogFormat::Pretty,
        LogFormatArg::Compact => LogFormat::Compact,
        LogFormatArg::Json => LogFormat::Json,
    };
    let ansi = match cli.color.color {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => cli.log_file.is_none() && io::stderr().is_terminal(),
    };

    LogConfig::default()
        .with_level(level_filter)
        .with_env_filter(!(cli.verbosity.is_present() || cli.log_level.is_some()))
        .with_format(format)
        .with_log_file(cli.log_file.clone())
        .with_log_data(cli.log_data)
        .with_ansi(ansi)
}
