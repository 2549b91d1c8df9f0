//! Machine design constants driving the excitation formulas.
//!
//! The raw options come from [`MachineConfig`] (compiled-in defaults, optionally
//! overridden by a JSON document). [`MachineConstants`] validates them once and
//! caches the derived RMS current, peak current and electrical frequency.

use crate::domain::{ControlError, ControlResult};
use serde::{Deserialize, Serialize};
use std::f64::consts::SQRT_2;

#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct MachineConfig {
    /// A/mm^2
    pub current_density: f64,
    /// mm^2
    pub slot_size: f64,
    pub fill_factor: f64,
    pub turns: u32,
    pub pole_count: u32,
    pub speed_rpm: f64,
    /// Ohm
    pub winding_resistance: f64,
    /// H
    pub winding_inductance: f64,
}

impl Default for MachineConfig {
    fn default() -> Self {
        Self {
            current_density: 10.0,
            slot_size: 100.0,
            fill_factor: 0.5,
            turns: 29,
            pole_count: 2,
            speed_rpm: 120_000.0,
            winding_resistance: 0.1,
            winding_inductance: 0.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MachineConstants {
    config: MachineConfig,
    irms: f64,
    imax: f64,
    freq: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MachineConstantsReport {
    #[serde(flatten)]
    pub config: MachineConfig,
    pub irms: f64,
    pub imax: f64,
    pub freq: f64,
}

impl MachineConstants {
    pub fn new(config: MachineConfig) -> ControlResult<Self> {
        validate_config(&config)?;
        Ok(Self::derive(config))
    }

    fn derive(config: MachineConfig) -> Self {
        let irms = config.current_density * config.slot_size * config.fill_factor
            / f64::from(config.turns);
        let imax = irms * SQRT_2;
        // pole pairs * rpm / 60
        let freq = f64::from(config.pole_count) / 2.0 * config.speed_rpm / 60.0;

        Self {
            config,
            irms,
            imax,
            freq,
        }
    }

    /// Parses a JSON object naming any subset of the [`MachineConfig`] options.
    pub fn from_json_str(source: &str) -> ControlResult<Self> {
        let config = serde_json::from_str::<MachineConfig>(source).map_err(|source| {
            ControlError::input_validation(
                "INPUT.MACHINE_CONFIG_PARSE",
                format!("failed to parse machine configuration: {}", source),
            )
        })?;
        Self::new(config)
    }

    pub fn config(&self) -> &MachineConfig {
        &self.config
    }

    pub fn irms(&self) -> f64 {
        self.irms
    }

    pub fn imax(&self) -> f64 {
        self.imax
    }

    /// Electrical frequency in Hz.
    pub fn freq(&self) -> f64 {
        self.freq
    }

    pub fn winding_resistance(&self) -> f64 {
        self.config.winding_resistance
    }

    pub fn winding_inductance(&self) -> f64 {
        self.config.winding_inductance
    }

    pub fn report(&self) -> MachineConstantsReport {
        MachineConstantsReport {
            config: self.config,
            irms: self.irms,
            imax: self.imax,
            freq: self.freq,
        }
    }
}

impl Default for MachineConstants {
    fn default() -> Self {
        Self::derive(MachineConfig::default())
    }
}

fn validate_config(config: &MachineConfig) -> ControlResult<()> {
    if config.turns == 0 {
        return Err(ControlError::input_validation(
            "INPUT.MACHINE_CONSTANTS",
            "turns must be greater than zero",
        ));
    }
    if config.pole_count == 0 {
        return Err(ControlError::input_validation(
            "INPUT.MACHINE_CONSTANTS",
            "pole_count must be greater than zero",
        ));
    }

    let scalars = [
        ("current_density", config.current_density),
        ("slot_size", config.slot_size),
        ("fill_factor", config.fill_factor),
        ("speed_rpm", config.speed_rpm),
        ("winding_resistance", config.winding_resistance),
        ("winding_inductance", config.winding_inductance),
    ];
    if let Some((name, value)) = scalars.iter().find(|(_, value)| !value.is_finite()) {
        return Err(ControlError::input_validation(
            "INPUT.MACHINE_CONSTANTS",
            format!("{} must be finite, got {}", name, value),
        ));
    }

    Ok(())
}
