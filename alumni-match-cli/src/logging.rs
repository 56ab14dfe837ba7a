//! Tracing subscriber installation.
//!
//! Library crates log through the `log` facade; the subscriber's `log`
//! bridge forwards those records into the same formatted stream.

use tracing_subscriber::EnvFilter;

use crate::CliError;

const DEFAULT_FILTER: &str = "info";

/// Build the filter: an explicit directive wins, then `RUST_LOG`, then
/// `info`.
pub(crate) fn filter(directive: Option<&str>) -> Result<EnvFilter, CliError> {
    directive.map_or_else(
        || {
            Ok(EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER)))
        },
        |directive| {
            EnvFilter::try_new(directive).map_err(|source| CliError::LogFilter {
                directive: directive.to_owned(),
                source,
            })
        },
    )
}

/// Install a stderr fmt subscriber; stdout carries the JSON response.
pub(crate) fn init(directive: Option<&str>) -> Result<(), CliError> {
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter(directive)?)
        .with_writer(std::io::stderr);
    if subscriber.try_init().is_err() {
        tracing::debug!("tracing subscriber already installed");
    }
    Ok(())
}
