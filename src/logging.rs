//! Diagnostics go to stderr so that `--json` reports on stdout stay
//! machine-readable.

use anyhow::Result;
use clap::ValueEnum;
use tracing_subscriber::{fmt, prelude::*, EnvFilter, Layer};

/// Directives used when neither `RUST_LOG` nor `--log-level` is given.
pub const DEFAULT_FILTER: &str = "info,tower_http=debug";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    /// Human-readable lines.
    #[default]
    Text,
    /// One JSON object per event, for log shippers.
    Json,
}

/// Pick the filter: an explicit CLI level wins, then `RUST_LOG`, then
/// [`DEFAULT_FILTER`].
pub fn resolve_filter(cli_level: Option<&str>) -> Result<EnvFilter> {
    let filter = match cli_level {
        Some(directives) => EnvFilter::try_new(directives)?,
        None => EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(DEFAULT_FILTER))?,
    };
    Ok(filter)
}

/// Install the global subscriber once; repeated calls return `Ok(())`.
pub fn init_tracing(format: LogFormat, cli_level: Option<&str>) -> Result<()> {
    if tracing::dispatcher::has_been_set() {
        return Ok(());
    }

    let filter = resolve_filter(cli_level)?;
    let events = match format {
        LogFormat::Text => fmt::layer()
            .with_timer(fmt::time::UtcTime::rfc_3339())
            .with_line_number(true)
            .with_writer(std::io::stderr)
            .boxed(),
        LogFormat::Json => fmt::layer()
            .json()
            .with_timer(fmt::time::UtcTime::rfc_3339())
            .with_current_span(true)
            .with_writer(std::io::stderr)
            .boxed(),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(events)
        .try_init()?;

    tracing::debug!(?format, "tracing initialised");
    Ok(())
}
