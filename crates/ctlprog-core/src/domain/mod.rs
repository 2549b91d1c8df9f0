pub mod errors;

pub use errors::{ControlError, ControlErrorCategory, ControlResult};

use std::fmt::{Display, Formatter};
use std::path::PathBuf;

pub const DEFAULT_SOLUTION_FILE: &str = "solution.ctl";
pub const DEFAULT_CONTROL_FILE: &str = "user.ctl";

/// Value of `time` written when no solution file exists yet.
pub const BOOTSTRAP_TIME: f64 = -1.0;
pub const BOOTSTRAP_TIME_TOKEN: &str = "-1";

pub const TIME_KEY: &str = "time";
pub const WINDING_EMF_KEY: &str = "windingEmf";

/// One entry of a solution record.
///
/// A `<key> <value>` line yields `Scalar`; a `<key> <subkey> <value>` line
/// yields (or extends) `Grouped`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SolutionValue {
    Scalar(String),
    Grouped(GroupedValues),
}

impl SolutionValue {
    pub fn as_scalar(&self) -> Option<&str> {
        match self {
            Self::Scalar(value) => Some(value),
            Self::Grouped(_) => None,
        }
    }

    pub fn as_grouped(&self) -> Option<&GroupedValues> {
        match self {
            Self::Scalar(_) => None,
            Self::Grouped(values) => Some(values),
        }
    }

    pub const fn shape(&self) -> &'static str {
        match self {
            Self::Scalar(_) => "scalar",
            Self::Grouped(_) => "grouped",
        }
    }
}

/// Insertion-ordered sub-key mapping. Overwriting a sub-key keeps its slot.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GroupedValues {
    entries: Vec<(String, String)>,
}

impl GroupedValues {
    pub fn insert(&mut self, subkey: impl Into<String>, value: impl Into<String>) {
        let subkey = subkey.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(existing, _)| *existing == subkey) {
            Some((_, slot)) => *slot = value,
            None => self.entries.push((subkey, value)),
        }
    }

    pub fn get(&self, subkey: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(existing, _)| existing == subkey)
            .map(|(_, value)| value.as_str())
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(subkey, _)| subkey.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(subkey, value)| (subkey.as_str(), value.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Parsed solution file, keys kept in the order they were first seen.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SolutionRecord {
    entries: Vec<(String, SolutionValue)>,
}

impl SolutionRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record standing in for a solution file that does not exist yet.
    pub fn bootstrap() -> Self {
        let mut record = Self::new();
        record.insert_scalar(TIME_KEY, BOOTSTRAP_TIME_TOKEN);
        record
    }

    /// Sets `key` to a scalar, replacing whatever shape it held before.
    pub fn insert_scalar(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = SolutionValue::Scalar(value.into());
        match self.slot_mut(&key) {
            Some(slot) => *slot = value,
            None => self.entries.push((key, value)),
        }
    }

    /// Adds `subkey` under `key`. A scalar already stored at `key` is
    /// discarded and replaced by a fresh group.
    pub fn insert_grouped(
        &mut self,
        key: impl Into<String>,
        subkey: impl Into<String>,
        value: impl Into<String>,
    ) {
        let key = key.into();
        match self.slot_mut(&key) {
            Some(SolutionValue::Grouped(values)) => values.insert(subkey, value),
            Some(slot) => {
                let mut values = GroupedValues::default();
                values.insert(subkey, value);
                *slot = SolutionValue::Grouped(values);
            }
            None => {
                let mut values = GroupedValues::default();
                values.insert(subkey, value);
                self.entries.push((key, SolutionValue::Grouped(values)));
            }
        }
    }

    pub fn get(&self, key: &str) -> Option<&SolutionValue> {
        self.entries
            .iter()
            .find(|(existing, _)| existing == key)
            .map(|(_, value)| value)
    }

    pub fn scalar(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(SolutionValue::as_scalar)
    }

    pub fn grouped(&self, key: &str) -> Option<&GroupedValues> {
        self.get(key).and_then(SolutionValue::as_grouped)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(key, _)| key.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn slot_mut(&mut self, key: &str) -> Option<&mut SolutionValue> {
        self.entries
            .iter_mut()
            .find(|(existing, _)| existing == key)
            .map(|(_, value)| value)
    }
}

/// One phase of the control block.
#[derive(Debug, Clone, PartialEq)]
pub struct Winding {
    pub name: String,
    pub source: f64,
    pub resistance: f64,
    pub inductance: f64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimestepRequest {
    pub solution_path: PathBuf,
    pub control_path: PathBuf,
}

impl TimestepRequest {
    pub fn new(solution_path: impl Into<PathBuf>, control_path: impl Into<PathBuf>) -> Self {
        Self {
            solution_path: solution_path.into(),
            control_path: control_path.into(),
        }
    }

    /// Default file names, resolved relative to `dir`.
    pub fn in_dir(dir: impl Into<PathBuf>) -> Self {
        let dir = dir.into();
        Self::new(
            dir.join(DEFAULT_SOLUTION_FILE),
            dir.join(DEFAULT_CONTROL_FILE),
        )
    }
}

impl Default for TimestepRequest {
    fn default() -> Self {
        Self::new(DEFAULT_SOLUTION_FILE, DEFAULT_CONTROL_FILE)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimestepPhase {
    Bootstrap,
    ComputeExcitation,
}

impl TimestepPhase {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Bootstrap => "BOOTSTRAP",
            Self::ComputeExcitation => "COMPUTE_EXCITATION",
        }
    }
}

impl Display for TimestepPhase {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str((*self).as_str())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TimestepOutcome {
    pub phase: TimestepPhase,
    pub time: f64,
    pub winding_count: usize,
    pub control_path: PathBuf,
}
