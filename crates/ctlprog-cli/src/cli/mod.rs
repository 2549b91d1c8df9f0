mod commands;
mod helpers;

use clap::Parser;
use ctlprog_core::domain::ControlError;
use std::path::PathBuf;

pub fn run_from_env() -> i32 {
    match parse_and_dispatch(std::env::args()) {
        Ok(code) => code,
        Err(error) => {
            let control_error = error.as_control_error();
            tracing::error!(
                placeholder = control_error.placeholder(),
                "{}",
                control_error.message()
            );
            eprintln!("{}", control_error.diagnostic_line());
            if let Some(summary_line) = control_error.fatal_exit_line() {
                eprintln!("{}", summary_line);
            }
            control_error.exit_code()
        }
    }
}

fn parse_and_dispatch<I, S>(args: I) -> Result<i32, CliError>
where
    I: IntoIterator<Item = S>,
    S: Into<std::ffi::OsString> + Clone,
{
    match Cli::try_parse_from(args) {
        Ok(cli) => dispatch_parsed(cli),
        Err(err) => match err.kind() {
            clap::error::ErrorKind::DisplayHelp | clap::error::ErrorKind::DisplayVersion => {
                print!("{}", err);
                Ok(0)
            }
            _ => Err(CliError::Usage(err.to_string())),
        },
    }
}

/// Called by the field solver once per timestep; with no subcommand it runs
/// a single timestep in the current directory.
#[derive(Parser)]
#[command(
    name = "ctlprog",
    version,
    about = "Winding excitation control program for transient field solvers"
)]
struct Cli {
    /// JSON file overriding the compiled-in machine constants
    #[arg(long, global = true, value_name = "path")]
    config: Option<PathBuf>,

    /// Append log records to this file instead of stderr
    #[arg(long, global = true, value_name = "path")]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<CliCommand>,
}

#[derive(clap::Subcommand)]
enum CliCommand {
    /// Read the solution file and write the control file
    Run(commands::RunArgs),
    /// Print the effective machine constants, including derived values, as JSON
    ShowConfig,
}

fn dispatch_parsed(cli: Cli) -> Result<i32, CliError> {
    helpers::init_tracing(cli.log_file.as_deref())?;
    let constants = helpers::load_machine_constants(cli.config.as_deref())?;

    match cli.command.unwrap_or_default() {
        CliCommand::Run(args) => commands::run_timestep_command(args, &constants),
        CliCommand::ShowConfig => commands::show_config_command(&constants),
    }
}

impl Default for CliCommand {
    fn default() -> Self {
        Self::Run(commands::RunArgs::default())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("{0}")]
    Usage(String),
    #[error("{0}")]
    Control(ControlError),
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl CliError {
    fn as_control_error(&self) -> ControlError {
        match self {
            Self::Usage(message) => {
                ControlError::input_validation("INPUT.CLI_USAGE", message.trim_end().to_string())
            }
            Self::Control(error) => error.clone(),
            Self::Internal(error) => ControlError::io_system("IO.CLI", format!("{error:#}")),
        }
    }
}

impl From<ControlError> for CliError {
    fn from(error: ControlError) -> Self {
        Self::Control(error)
    }
}
