use super::traits::ObservabilitySink;
use crate::domain::TimestepPhase;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq)]
pub enum ControlEvent {
    ControlFilesDiscovered {
        dir: PathBuf,
        files: Vec<PathBuf>,
    },
    SolutionMissing {
        path: PathBuf,
    },
    SolutionRead {
        path: PathBuf,
        raw: String,
    },
    ExcitationComputed {
        phase: TimestepPhase,
        time: f64,
        winding_count: usize,
    },
    ControlWritten {
        path: PathBuf,
        content: String,
    },
}

/// Forwards events to `tracing`; the subscriber installed by the binary
/// decides where they end up.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl ObservabilitySink for TracingSink {
    fn record(&mut self, event: &ControlEvent) {
        match event {
            ControlEvent::ControlFilesDiscovered { dir, files } => {
                tracing::info!(
                    dir = %dir.display(),
                    count = files.len(),
                    files = ?files,
                    "ctl files discovered"
                );
            }
            ControlEvent::SolutionMissing { path } => {
                tracing::info!(
                    path = %path.display(),
                    "solution file does not exist, writing bootstrap control file"
                );
            }
            ControlEvent::SolutionRead { path, raw } => {
                tracing::info!(
                    path = %path.display(),
                    lines = raw.lines().count(),
                    "solution file read"
                );
                tracing::debug!(raw = %raw, "solution content");
            }
            ControlEvent::ExcitationComputed {
                phase,
                time,
                winding_count,
            } => {
                tracing::info!(%phase, time, winding_count, "excitation computed");
            }
            ControlEvent::ControlWritten { path, content } => {
                tracing::info!(path = %path.display(), "control file written\n{}", content);
            }
        }
    }
}

/// Keeps every event in memory, in arrival order.
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    events: Vec<ControlEvent>,
}

impl MemorySink {
    pub fn events(&self) -> &[ControlEvent] {
        &self.events
    }

    pub fn into_events(self) -> Vec<ControlEvent> {
        self.events
    }
}

impl ObservabilitySink for MemorySink {
    fn record(&mut self, event: &ControlEvent) {
        self.events.push(event.clone());
    }
}
