//! CLI entry-point for printing reports over the bundled sample datasets.

use std::{
    fmt::Write as _,
    fs, io,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use clap::Args as ClapArgs;
use tracing::{info, instrument};

use crate::{
    api::types::{AttritionReport, DemographicReport, MetadataReport},
    cli::{analyze::render_analysis, SampleDataset},
    datasets::depression::STUDY_WEEKS,
    metrics::TrialPatient,
};

/// Args for the `report` command.
#[derive(Debug, Clone, ClapArgs)]
pub struct Args {
    #[arg(long, value_enum, required_unless_present = "patients")]
    pub dataset: Option<SampleDataset>,
    /// JSON array of patient records to analyse for attrition; `-` reads stdin.
    #[arg(long, conflicts_with = "dataset")]
    pub patients: Option<PathBuf>,
    /// Length of the dropout timeline for `--patients`.
    #[arg(long, default_value_t = STUDY_WEEKS)]
    pub weeks: u32,
    /// Print the report as JSON.
    #[arg(long)]
    pub json: bool,
}

#[instrument]
pub async fn run(args: Args) -> Result<()> {
    let Some(dataset) = args.dataset else {
        let path = args.patients.as_deref().context("either --dataset or --patients is required")?;
        let patients = load_patients(path)?;
        info!(count = patients.len(), "loaded patient records");
        let report = AttritionReport::from_patients(&patients, args.weeks);
        let text = if args.json {
            serde_json::to_string_pretty(&report)?
        } else {
            render_attrition(&report)
        };
        println!("{text}");
        return Ok(());
    };

    let text = match (dataset, args.json) {
        (SampleDataset::Demographic, true) => serde_json::to_string_pretty(&DemographicReport::sample())?,
        (SampleDataset::Attrition, true) => serde_json::to_string_pretty(&AttritionReport::sample())?,
        (SampleDataset::Metadata, true) => serde_json::to_string_pretty(&MetadataReport::sample())?,
        (SampleDataset::Demographic, false) => render_demographic(&DemographicReport::sample()),
        (SampleDataset::Attrition, false) => render_attrition(&AttritionReport::sample()),
        (SampleDataset::Metadata, false) => render_analysis(&MetadataReport::sample().analysis),
    };
    println!("{text}");
    Ok(())
}

fn load_patients(path: &Path) -> Result<Vec<TrialPatient>> {
    let raw = if path == Path::new("-") {
        io::read_to_string(io::stdin()).context("reading patient records from stdin")?
    } else {
        fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?
    };
    serde_json::from_str(&raw).context("parsing patient records")
}

pub fn render_demographic(report: &DemographicReport) -> String {
    let mut out = String::new();
    if let Some(profile) = &report.profile {
        let _ = writeln!(out, "{}", profile.insight.headline);
    }
    for row in &report.rows {
        let result = &row.result;
        let _ = writeln!(
            out,
            "{:<8} n={:<5} trial {:>5.1}%  baseline {:>5.1}%  ratio {:.2}  {}",
            result.category,
            result.trial_count,
            result.trial_percentage,
            result.population_percentage,
            result.representation_ratio,
            row.severity.label()
        );
        for comparison in &result.benchmarks {
            let _ = writeln!(
                out,
                "         vs {:<28} {:>5.1}%  ratio {:.2}  {}",
                comparison.benchmark_label,
                comparison.baseline_percentage,
                comparison.representation_ratio,
                comparison.severity.label()
            );
        }
        let _ = writeln!(out, "         {}", row.description);
    }
    for outcome in &report.outcomes {
        let _ = writeln!(
            out,
            "{:<8} outcome rate {:>5.1}% ({} of {})",
            outcome.group, outcome.rate, outcome.with_outcome, outcome.total
        );
    }
    let _ = write!(
        out,
        "Representativeness score: {:.0}/100",
        report.representativeness_score
    );
    out
}

pub fn render_attrition(report: &AttritionReport) -> String {
    let mut out = String::new();
    if let Some(profile) = &report.profile {
        let _ = writeln!(out, "{}", profile.insight.headline);
    }
    for row in &report.groups {
        let group = &row.result;
        let _ = writeln!(
            out,
            "{:<14} n={:<4} dropped {:<3} ({:>4.1}%)  completers {:>4.1}%  ITT {:>4.1}%",
            group.group,
            group.total_patients,
            group.dropped_patients,
            group.dropout_rate,
            group.remission_rate_completers,
            group.remission_rate_itt
        );
    }
    let _ = writeln!(out, "{}", report.description);
    for stratum in &report.strata {
        let _ = writeln!(out, "By {}:", stratum.dimension);
        for row in &stratum.groups {
            let _ = writeln!(
                out,
                "  {:<12} n={:<4} dropped {:<3} ({:>4.1}%)",
                row.group, row.total_patients, row.dropped_patients, row.dropout_rate
            );
        }
        let _ = writeln!(out, "  {}", stratum.description);
    }
    let hidden = &report.hidden_population;
    let _ = writeln!(
        out,
        "Hidden outcomes: {} of {} patients ({:.1}%), most affected: {}",
        hidden.total_dropped,
        hidden.total_patients,
        hidden.percentage_hidden,
        hidden.most_affected_group.as_deref().unwrap_or("Unknown")
    );
    let inflation = &report.overall_inflation;
    let _ = writeln!(
        out,
        "Completers-only analysis overstates remission by {:.1} points ({:.2}x)",
        inflation.absolute_difference, inflation.inflation_factor
    );
    let bounds = &report.sensitivity;
    let _ = write!(
        out,
        "True remission lies between {:.1}% and {:.1}% (proportional estimate {:.1}%)",
        bounds.worst_case, bounds.best_case, bounds.mid_case
    );
    out
}
