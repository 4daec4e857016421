//! CLI entry-point for the pilot-request endpoint and demo reports.

use anyhow::Result;
use clap::Args as ClapArgs;
use tracing::{info, instrument};

use crate::{api, config::Settings};

#[derive(Debug, Clone, ClapArgs)]
pub struct Args {
    #[arg(long, default_value_t = 8080)]
    pub port: u16,
    #[arg(long, default_value = "127.0.0.1")]
    pub host: String,
    /// Override `PILOT_REQUEST_WEBHOOK_URL`.
    #[arg(long)]
    pub webhook_url: Option<String>,
}

#[instrument(skip(settings))]
pub async fn run(args: Args, mut settings: Settings) -> Result<()> {
    if let Some(url) = args.webhook_url {
        settings.pilot_webhook_url = Some(url);
    }
    if settings.pilot_webhook_url.is_none() {
        info!("no webhook configured; pilot requests are only logged");
    }
    api::serve(settings, args.host, args.port).await
}
