pub mod config;

pub use config::{MachineConfig, MachineConstants, MachineConstantsReport};
