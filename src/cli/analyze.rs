//! CLI entry-point for a single trial's registry bias analysis.

use std::fmt::Write as _;

use anyhow::{Context, Result};
use clap::Args as ClapArgs;
use tracing::{info, instrument};

use crate::{
    config::Settings,
    registry::{
        types::{or_not_specified, BiasDimension, MetadataAnalysisResult, NOT_SPECIFIED},
        RegistryClient,
    },
};

/// Args for the `analyze` command.
#[derive(Debug, Clone, ClapArgs)]
pub struct Args {
    /// Registry identifier, e.g. NCT01234567.
    #[arg(long)]
    pub nct_id: String,
    /// Print the raw analysis as JSON.
    #[arg(long)]
    pub json: bool,
}

#[instrument(skip(settings))]
pub async fn run(args: Args, settings: Settings) -> Result<()> {
    let client = RegistryClient::from_settings(&settings)?;
    let analysis = client
        .get_trial_bias(&args.nct_id)
        .await
        .with_context(|| format!("analysis of {} failed", args.nct_id))?;
    let summary = analysis.summary();
    info!(concerns = summary.concerns, notes = summary.notes, "analysis received");

    if args.json {
        println!("{}", serde_json::to_string_pretty(&analysis)?);
    } else {
        print!("{}", render_analysis(&analysis));
    }
    Ok(())
}

pub fn render_analysis(analysis: &MetadataAnalysisResult) -> String {
    let trial = &analysis.trial;
    let mut out = String::new();
    let _ = writeln!(out, "{} {}", trial.identification.nct_id, trial.identification.title);
    let _ = writeln!(
        out,
        "  status: {}  phase: {}  enrollment: {}",
        or_not_specified(trial.status.overall_status.as_deref()),
        or_not_specified(trial.design.phase.as_deref()),
        trial
            .eligibility
            .enrollment
            .map(|n| n.to_string())
            .as_deref()
            .unwrap_or(NOT_SPECIFIED),
    );
    let _ = writeln!(
        out,
        "  allocation: {}  masking: {}  sites: {}",
        or_not_specified(trial.design.allocation.as_deref()),
        or_not_specified(trial.design.masking.as_deref()),
        trial.locations.count
    );
    let _ = writeln!(
        out,
        "  sponsor: {}",
        or_not_specified(trial.sponsor.lead.as_deref())
    );

    for dimension in BiasDimension::ALL {
        let _ = writeln!(out, "\n{}", dimension.title());
        for flag in analysis.dimension(dimension) {
            let _ = writeln!(out, "  [{:<7}] {}: {}", flag.status.label(), flag.name, flag.explanation);
            if let Some(details) = &flag.details {
                let _ = writeln!(out, "            {details}");
            }
        }
    }

    let summary = analysis.summary();
    let _ = writeln!(
        out,
        "\n{} concern(s), {} note(s) across {} checks",
        summary.concerns,
        summary.notes,
        summary.total()
    );
    if !analysis.recommendations.is_empty() {
        let _ = writeln!(out, "\nRecommendations");
        for (idx, rec) in analysis.recommendations.iter().enumerate() {
            let _ = writeln!(out, "  {}. {rec}", idx + 1);
        }
    }
    out
}
