//! Report persistence (load/save).

use std::path::Path;

use tracing::info;

use crate::error::BenchError;
use crate::report::PerfReport;

/// Save a report as pretty JSON, creating parent directories as needed.
pub fn save_report(report: &PerfReport, path: &Path) -> Result<(), BenchError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    let content = serde_json::to_string_pretty(report)?;
    std::fs::write(path, content)?;
    info!(path = %path.display(), "perf report saved");
    Ok(())
}

/// Load a report, rejecting incompatible versions.
pub fn load_report(path: &Path) -> Result<PerfReport, BenchError> {
    let content = std::fs::read_to_string(path)?;
    let report: PerfReport = serde_json::from_str(&content)?;
    if !report.is_compatible() {
        return Err(BenchError::Config(format!(
            "report version {} is not supported",
            report.version
        )));
    }
    Ok(report)
}
