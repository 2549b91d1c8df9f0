use super::CliError;
use anyhow::Context;
use ctlprog_core::common::MachineConstants;
use ctlprog_core::domain::{DEFAULT_CONTROL_FILE, DEFAULT_SOLUTION_FILE, TimestepRequest};
use ctlprog_core::modules::{TracingSink, run_timestep};
use std::path::PathBuf;

#[derive(clap::Args)]
pub(super) struct RunArgs {
    /// Solution file written by the solver
    #[arg(long, default_value = DEFAULT_SOLUTION_FILE)]
    solution: PathBuf,

    /// Control file read back by the solver
    #[arg(long, default_value = DEFAULT_CONTROL_FILE)]
    output: PathBuf,
}

impl Default for RunArgs {
    fn default() -> Self {
        Self {
            solution: PathBuf::from(DEFAULT_SOLUTION_FILE),
            output: PathBuf::from(DEFAULT_CONTROL_FILE),
        }
    }
}

impl RunArgs {
    fn into_request(self) -> TimestepRequest {
        TimestepRequest::new(self.solution, self.output)
    }
}

pub(super) fn run_timestep_command(
    args: RunArgs,
    constants: &MachineConstants,
) -> Result<i32, CliError> {
    let request = args.into_request();
    let outcome = run_timestep(&request, constants, &mut TracingSink)?;
    println!(
        "{} completed at time {} ({} windings) -> {}",
        outcome.phase,
        outcome.time,
        outcome.winding_count,
        outcome.control_path.display()
    );
    Ok(0)
}

pub(super) fn show_config_command(constants: &MachineConstants) -> Result<i32, CliError> {
    let rendered = serde_json::to_string_pretty(&constants.report())
        .context("failed to render machine constants")?;
    println!("{}", rendered);
    Ok(0)
}
