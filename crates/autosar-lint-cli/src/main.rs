//! autosar-lint CLI tool.
//!
//! Usage:
//! ```bash
//! autosar-lint check [OPTIONS] [PATH]
//! autosar-lint list-rules [--category <NAME>] [--severity <LEVEL>]
//! autosar-lint explain <CODE>
//! autosar-lint init
//! ```

use anyhow::Result;
use autosar_lint_core::Severity;
use autosar_lint_rules::Preset;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod commands;
mod config_resolver;

/// Pattern-based AUTOSAR C++14 checker for C and C++ sources
#[derive(Parser)]
#[command(name = "autosar-lint")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to configuration file
    #[arg(short, long, global = true, env = "AUTOSAR_LINT_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run rule checks over a source tree
    Check {
        /// Path to analyze (default: `[analyzer] root`, else current directory)
        path: Option<PathBuf>,

        /// Output format
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,

        /// Exclude patterns (can be specified multiple times)
        #[arg(short, long)]
        exclude: Vec<String>,

        /// Rule preset, overriding the configuration file
        #[arg(long, value_parser = parse_preset)]
        preset: Option<Preset>,

        /// Lowest severity that fails the run (default: error)
        #[arg(long, value_parser = parse_severity)]
        fail_on: Option<Severity>,
    },

    /// List the effective rules
    ListRules {
        /// Only rules of this category (e.g. "5. Expressions")
        #[arg(long)]
        category: Option<String>,

        /// Only rules of this severity
        #[arg(long, value_parser = parse_severity)]
        severity: Option<Severity>,
    },

    /// Show everything known about one rule
    Explain {
        /// Rule code (e.g. A5-1-1)
        code: String,
    },

    /// Initialize configuration file
    Init {
        /// Overwrite existing config
        #[arg(long)]
        force: bool,
    },
}

/// Output format for lint results.
#[derive(Clone, Copy, Debug, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text grouped by risk.
    #[default]
    Text,
    /// JSON output.
    Json,
    /// One-line-per-violation compact format.
    Compact,
    /// Rich reports with source excerpts.
    Pretty,
}

fn parse_preset(s: &str) -> Result<Preset, String> {
    s.parse().map_err(|e: autosar_lint_rules::UnknownPresetError| e.to_string())
}

fn parse_severity(s: &str) -> Result<Severity, String> {
    s.parse().map_err(|e: autosar_lint_core::ParseSeverityError| e.to_string())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Check {
            path,
            format,
            exclude,
            preset,
            fail_on,
        } => commands::check::run(&commands::check::CheckArgs {
            path,
            format,
            exclude,
            preset,
            fail_on,
            config: cli.config,
        }),
        Commands::ListRules { category, severity } => {
            commands::list_rules::run(cli.config.as_deref(), category.as_deref(), severity)
        }
        Commands::Explain { code } => commands::explain::run(cli.config.as_deref(), &code),
        Commands::Init { force } => commands::init::run(force),
    }
}
