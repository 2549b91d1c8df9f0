use super::CliError;
use anyhow::Context;
use ctlprog_core::common::MachineConstants;
use std::fs::{self, OpenOptions};
use std::path::Path;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

const DEFAULT_LOG_DIRECTIVE: &str = "info";

/// Installs the global subscriber. `RUST_LOG` overrides the default `info`
/// level; with `log_file` records are appended there without ANSI colours.
pub(super) fn init_tracing(log_file: Option<&Path>) -> Result<(), CliError> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_DIRECTIVE));

    // try_init: a subscriber may already be installed when run in-process.
    match log_file {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("failed to open log file '{}'", path.display()))?;
            let _ = tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .try_init();
        }
        None => {
            let _ = tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .try_init();
        }
    }
    Ok(())
}

pub(super) fn load_machine_constants(path: Option<&Path>) -> Result<MachineConstants, CliError> {
    let Some(path) = path else {
        return Ok(MachineConstants::default());
    };

    let content = fs::read_to_string(path)
        .with_context(|| format!("failed to read machine configuration '{}'", path.display()))?;
    let constants = MachineConstants::from_json_str(&content)?;
    tracing::debug!(config = %path.display(), "machine configuration loaded");
    Ok(constants)
}
