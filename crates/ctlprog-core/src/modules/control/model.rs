use crate::common::MachineConstants;
use crate::domain::{
    BOOTSTRAP_TIME, ControlError, ControlResult, SolutionRecord, SolutionValue, TIME_KEY,
    TimestepPhase, WINDING_EMF_KEY, Winding,
};
use crate::modules::serialization::render_control_block;
use std::f64::consts::TAU;

/// Excitation values for one timestep, ready to be serialized.
#[derive(Debug, Clone, PartialEq)]
pub struct ControlBlock {
    pub time: f64,
    pub windings: Vec<Winding>,
}

impl ControlBlock {
    pub fn from_solution(
        record: &SolutionRecord,
        constants: &MachineConstants,
    ) -> ControlResult<Self> {
        let time = solution_time(record)?;
        if is_bootstrap_time(time) {
            return Ok(Self {
                time,
                windings: Vec::new(),
            });
        }

        let names = winding_names(record)?;
        Ok(Self {
            time,
            windings: compute_windings(&names, constants, time),
        })
    }

    pub fn phase(&self) -> TimestepPhase {
        if is_bootstrap_time(self.time) {
            TimestepPhase::Bootstrap
        } else {
            TimestepPhase::ComputeExcitation
        }
    }

    pub fn render(&self) -> String {
        render_control_block(self.time, &self.windings)
    }
}

#[allow(clippy::float_cmp)]
fn is_bootstrap_time(time: f64) -> bool {
    time == BOOTSTRAP_TIME
}

pub(crate) fn solution_time(record: &SolutionRecord) -> ControlResult<f64> {
    let raw = match record.get(TIME_KEY) {
        Some(SolutionValue::Scalar(raw)) => raw,
        Some(other) => {
            return Err(ControlError::input_validation(
                "INPUT.SOLUTION_TIME_PARSE",
                format!(
                    "solution entry '{}' must be a single value, found a {} entry",
                    TIME_KEY,
                    other.shape()
                ),
            ));
        }
        None => {
            return Err(ControlError::input_validation(
                "INPUT.SOLUTION_MISSING_KEY",
                format!("solution record has no '{}' entry", TIME_KEY),
            ));
        }
    };

    let time = raw.parse::<f64>().map_err(|source| {
        ControlError::input_validation(
            "INPUT.SOLUTION_TIME_PARSE",
            format!("solution time '{}' is not a number: {}", raw, source),
        )
    })?;
    if !time.is_finite() {
        return Err(ControlError::input_validation(
            "INPUT.SOLUTION_TIME_PARSE",
            format!("solution time '{}' is not finite", raw),
        ));
    }
    Ok(time)
}

pub(crate) fn winding_names(record: &SolutionRecord) -> ControlResult<Vec<&str>> {
    match record.get(WINDING_EMF_KEY) {
        Some(SolutionValue::Grouped(group)) => Ok(group.keys().collect()),
        Some(SolutionValue::Scalar(_)) => Err(ControlError::input_validation(
            "INPUT.SOLUTION_MISSING_KEY",
            format!(
                "solution entry '{}' must list windings as '<key> <winding> <value>' lines",
                WINDING_EMF_KEY
            ),
        )),
        None => Err(ControlError::input_validation(
            "INPUT.SOLUTION_MISSING_KEY",
            format!("solution record has no '{}' entry", WINDING_EMF_KEY),
        )),
    }
}

/// Balanced N-phase source value for the winding at `index`:
/// `imax * sin(2*pi*freq*t - 2*pi/N * index)`.
pub fn phase_excitation(
    constants: &MachineConstants,
    time: f64,
    index: usize,
    count: usize,
) -> f64 {
    let electrical_angle = TAU * constants.freq() * time;
    let phase_shift = TAU / count as f64 * index as f64;
    constants.imax() * (electrical_angle - phase_shift).sin()
}

pub fn compute_windings(names: &[&str], constants: &MachineConstants, time: f64) -> Vec<Winding> {
    let count = names.len();
    names
        .iter()
        .enumerate()
        .map(|(index, name)| Winding {
            name: (*name).to_string(),
            source: phase_excitation(constants, time, index, count),
            resistance: constants.winding_resistance(),
            inductance: constants.winding_inductance(),
        })
        .collect()
}
