//! Command-line interface wiring for trial-bias.

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};

use crate::{config::Settings, logging::LogFormat};

pub mod analyze;
pub mod report;
pub mod search;
pub mod serve;

/// Top-level CLI definition.
#[derive(Debug, Parser)]
#[command(author, version, about = "Clinical trial bias metrics and registry analysis", long_about = None)]
pub struct Cli {
    /// Log line format on stderr.
    #[arg(long, global = true, value_enum, default_value_t = LogFormat::Text)]
    pub log_format: LogFormat,
    /// Filter directives, e.g. `debug` or `trial_bias=trace`. Overrides `RUST_LOG`.
    #[arg(long, global = true)]
    pub log_level: Option<String>,
    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    /// Parse CLI arguments from the environment.
    pub fn parse() -> Self {
        <Self as Parser>::parse()
    }

    /// Dispatch the selected sub-command.
    pub async fn dispatch(self, settings: Settings) -> Result<()> {
        match self.command {
            Commands::Serve(args) => serve::run(args, settings).await,
            Commands::Search(args) => search::run(args, settings).await,
            Commands::Analyze(args) => analyze::run(args, settings).await,
            Commands::Report(args) => report::run(args).await,
        }
    }
}

/// Supported sub-commands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Serve the pilot-request endpoint and demo reports.
    Serve(serve::Args),
    /// Search the trial registry through the analysis service.
    Search(search::Args),
    /// Fetch the bias analysis for one trial.
    Analyze(analyze::Args),
    /// Print a bias report for one of the bundled sample datasets.
    Report(report::Args),
}

/// Bundled sample datasets.
#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum SampleDataset {
    /// Sex representation in a cardiovascular trial.
    Demographic,
    /// Income-linked dropout in a depression trial.
    Attrition,
    /// Registry metadata flags for an oncology trial.
    Metadata,
}
