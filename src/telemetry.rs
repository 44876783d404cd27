// Tracing subscriber setup; logs go to stderr, stdout carries MCP stdio.

use tracing_subscriber::EnvFilter;

use crate::error::{Error, Result};

/// Installs the global fmt subscriber. Logs go to stderr: stdout carries the
/// MCP stdio transport.
pub fn init_tracing(default_filter: &str) -> Result<()> {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_ansi(false)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|err| Error::Telemetry(err.to_string()))
}
