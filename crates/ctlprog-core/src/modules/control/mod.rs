mod model;

pub use model::{ControlBlock, compute_windings, phase_excitation};

use super::observability::ControlEvent;
use super::serialization::write_text_artifact;
use super::traits::ObservabilitySink;
use crate::common::MachineConstants;
use crate::domain::{ControlError, ControlResult, SolutionRecord};
use std::path::Path;

/// Computes the excitation block for `record` and overwrites `out_path` with it.
pub fn write_control(
    record: &SolutionRecord,
    constants: &MachineConstants,
    out_path: &Path,
    sink: &mut dyn ObservabilitySink,
) -> ControlResult<ControlBlock> {
    let block = ControlBlock::from_solution(record, constants)?;
    sink.record(&ControlEvent::ExcitationComputed {
        phase: block.phase(),
        time: block.time,
        winding_count: block.windings.len(),
    });

    let content = block.render();
    write_text_artifact(out_path, &content).map_err(|source| {
        ControlError::io_system(
            "IO.CONTROL_WRITE",
            format!(
                "failed to write control file '{}': {}",
                out_path.display(),
                source
            ),
        )
    })?;

    sink.record(&ControlEvent::ControlWritten {
        path: out_path.to_path_buf(),
        content,
    });
    Ok(block)
}
