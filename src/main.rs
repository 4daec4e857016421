//! Binary entry point: arguments first so logging flags apply, then
//! settings, then dispatch.

use anyhow::Result;
use tracing::info;
use trial_bias::{cli::Cli, config::Settings, logging};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init_tracing(cli.log_format, cli.log_level.as_deref())?;
    let settings = Settings::load()?;

    info!(api = %settings.api_base_url, ?cli, "starting command");
    cli.dispatch(settings).await
}
