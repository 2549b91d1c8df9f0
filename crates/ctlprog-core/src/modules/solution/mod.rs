mod parser;

pub use parser::parse_solution;

use super::observability::ControlEvent;
use super::traits::ObservabilitySink;
use crate::domain::{ControlError, ControlResult, SolutionRecord};
use globset::Glob;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

const CONTROL_FILE_PATTERN: &str = "*.ctl";

/// Reads the solver's solution file.
///
/// A missing file is the first-timestep case and yields
/// [`SolutionRecord::bootstrap`]. Any other read failure is fatal.
pub fn load_solution(
    path: &Path,
    sink: &mut dyn ObservabilitySink,
) -> ControlResult<SolutionRecord> {
    let dir = containing_dir(path);
    match discover_control_files(&dir) {
        Ok(files) => sink.record(&ControlEvent::ControlFilesDiscovered { dir, files }),
        Err(error) => tracing::warn!(%error, "ctl file discovery skipped"),
    }

    let raw = match fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(source) if source.kind() == ErrorKind::NotFound => {
            sink.record(&ControlEvent::SolutionMissing {
                path: path.to_path_buf(),
            });
            return Ok(SolutionRecord::bootstrap());
        }
        Err(source) => {
            return Err(ControlError::io_system(
                "IO.SOLUTION_READ",
                format!(
                    "failed to read solution file '{}': {}",
                    path.display(),
                    source
                ),
            ));
        }
    };

    let record = parse_solution(&raw);
    sink.record(&ControlEvent::SolutionRead {
        path: path.to_path_buf(),
        raw,
    });
    Ok(record)
}

/// Lists `*.ctl` files directly inside `dir`, sorted by path.
pub fn discover_control_files(dir: &Path) -> ControlResult<Vec<PathBuf>> {
    let matcher = Glob::new(CONTROL_FILE_PATTERN)
        .map_err(|source| {
            ControlError::internal(
                "SYS.CONTROL_FILE_GLOB",
                format!("invalid pattern '{}': {}", CONTROL_FILE_PATTERN, source),
            )
        })?
        .compile_matcher();

    let entries = fs::read_dir(dir).map_err(|source| {
        ControlError::io_system(
            "IO.CONTROL_FILE_DISCOVERY",
            format!("failed to list directory '{}': {}", dir.display(), source),
        )
    })?;

    let mut files = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|source| {
            ControlError::io_system(
                "IO.CONTROL_FILE_DISCOVERY",
                format!("failed to list directory '{}': {}", dir.display(), source),
            )
        })?;
        let path = entry.path();
        if path.is_file() && matcher.is_match(entry.file_name()) {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

fn containing_dir(path: &Path) -> PathBuf {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}
