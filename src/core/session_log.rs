//! Session audit log.
//!
//! Lines accumulate in memory through the run and are written to disk in a
//! single call once the imaging tool has exited. Nothing reads the file back.

use std::path::{Path, PathBuf};
use tracing::info;

use crate::core::clock::AcquisitionTimestamp;
use crate::core::models::{AcquisitionCommand, DiagnosticReport, SerialNumber};
use crate::core::runner::AcquisitionRun;
use crate::error::{AcquisitionError, Result};

#[derive(Debug, Default)]
pub struct SessionLog {
    lines: Vec<String>,
}

impl SessionLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, line: impl Into<String>) {
        self.lines.push(line.into());
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Each diagnostic command line followed by its raw output.
    pub fn record_diagnostics(&mut self, report: &DiagnosticReport) {
        for entry in &report.entries {
            self.push(format!("System Call - {}", entry.command_line));
            self.push(entry.output_text());
        }
    }

    /// Zone, start time, command, stop time and exit status, in that order.
    pub fn record_acquisition(&mut self, command: &AcquisitionCommand, run: &AcquisitionRun) {
        self.push(format!("System Time Zone Is: {}", run.time_zone));
        self.push(format!("Start Time: {}", run.started.long()));
        self.push(format!("Acquisition command: {}", command.command_line()));
        self.push(format!("Stop Time: {}", run.stopped.long()));
        self.push(run.outcome.log_line());
    }

    /// `drive_data_<device with / as _>_<serial with / as _>_<ts>.txt`
    pub fn file_name(device_path: &str, serial: &SerialNumber, ts: &AcquisitionTimestamp) -> String {
        format!(
            "drive_data_{}_{}_{}.txt",
            device_path.replace('/', "_"),
            serial.file_component(),
            ts.compact()
        )
    }

    /// Write every line to `<dir>/<file_name>` in one go.
    pub fn persist(&self, dir: &Path, file_name: &str) -> Result<PathBuf> {
        let path = dir.join(file_name);

        let mut content = self.lines.join("\n");
        content.push('\n');

        std::fs::write(&path, content).map_err(|source| AcquisitionError::SessionLog {
            path: path.clone(),
            source,
        })?;

        info!(path = %path.display(), lines = self.lines.len(), "Session log written");
        Ok(path)
    }
}
