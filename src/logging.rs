//! Diagnostic tracing for the interpreter.
//!
//! Events go to standard error so they never mix with command output. Nothing is logged
//! unless a filter is given explicitly.

use anyhow::{Context, Result, anyhow};
use tracing_subscriber::{EnvFilter, fmt};

/// Filter used when the user asks for no diagnostics.
pub const DEFAULT_FILTER: &str = "off";

/// Installs the global subscriber with the given filter directive, e.g. `debug` or
/// `lsh=trace`.
pub fn init(directive: &str) -> Result<()> {
    let filter = EnvFilter::try_new(directive)
        .with_context(|| format!("invalid log filter `{directive}`"))?;

    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_level(true)
        .try_init()
        .map_err(|e| anyhow!("log system initialization failed: {e}"))
}
