//! CLI entry-point for registry search.

use anyhow::{Context, Result};
use clap::Args as ClapArgs;
use tracing::{info, instrument};

use crate::{
    config::Settings,
    registry::{
        client::DEFAULT_PAGE_SIZE,
        types::{or_not_specified, SearchResponse},
        RegistryClient,
    },
};

/// Args for the `search` command.
#[derive(Debug, Clone, ClapArgs)]
pub struct Args {
    /// Disease, drug name or NCT ID.
    #[arg(long)]
    pub query: String,
    /// 1-indexed results page.
    #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
    pub page: u32,
    #[arg(long, default_value_t = DEFAULT_PAGE_SIZE)]
    pub page_size: u32,
    /// Print the raw response as JSON.
    #[arg(long)]
    pub json: bool,
}

#[instrument(skip(settings))]
pub async fn run(args: Args, settings: Settings) -> Result<()> {
    let query = args.query.trim();
    if query.is_empty() {
        info!("empty query; nothing to search");
        return Ok(());
    }

    let client = RegistryClient::from_settings(&settings)?;
    let response = client
        .search_trials(query, args.page, args.page_size)
        .await
        .with_context(|| format!("searching registry for {query:?}"))?;
    info!(total = response.total_count, page = response.page, "search complete");

    if args.json {
        println!("{}", serde_json::to_string_pretty(&response)?);
    } else {
        print!("{}", render_results(&response));
    }
    Ok(())
}

pub fn render_results(response: &SearchResponse) -> String {
    if response.trials.is_empty() {
        return "No trials found.\n".to_string();
    }
    let mut out = String::new();
    for trial in &response.trials {
        out.push_str(&format!(
            "{:<12} {:<22} {:<14} {}\n",
            trial.nct_id,
            or_not_specified(trial.status.as_deref()),
            or_not_specified(trial.phase.as_deref()),
            trial.title
        ));
    }
    out.push_str(&format!(
        "Page {} of {} ({} trials)\n",
        response.page,
        response.total_pages(),
        response.total_count
    ));
    out
}
