use super::control::write_control;
use super::solution::load_solution;
use super::traits::ObservabilitySink;
use crate::common::MachineConstants;
use crate::domain::{ControlResult, TimestepOutcome, TimestepRequest};

/// One solver callback: read the solution, then write the control file.
///
/// Failures are not retried; the solver's exit-status handling decides what
/// happens to the timestep.
pub fn run_timestep(
    request: &TimestepRequest,
    constants: &MachineConstants,
    sink: &mut dyn ObservabilitySink,
) -> ControlResult<TimestepOutcome> {
    let _span = tracing::info_span!(
        "timestep",
        solution = %request.solution_path.display(),
        control = %request.control_path.display()
    )
    .entered();

    let record = load_solution(&request.solution_path, sink)?;
    let block = write_control(&record, constants, &request.control_path, sink)?;

    Ok(TimestepOutcome {
        phase: block.phase(),
        time: block.time,
        winding_count: block.windings.len(),
        control_path: request.control_path.clone(),
    })
}
