use regex::Regex;
use tracing::debug;

use crate::core::models::{DiagnosticReport, SerialNumber};

/// Label hdparm prints in front of the drive serial
pub const DEFAULT_SERIAL_LABEL: &str = "Serial Number";

/// Recovers a drive serial number from free-text diagnostic output.
///
/// Only the first line carrying the label counts within an output. If that
/// line has no value, the output yields nothing and the next one is scanned.
pub struct SerialExtractor {
    pattern: Regex,
}

impl SerialExtractor {
    /// Match lines containing `label` literally.
    pub fn new(label: &str) -> Result<Self, regex::Error> {
        let pattern = Regex::new(&regex::escape(label))?;
        Ok(Self { pattern })
    }

    /// Scan the report; `None` when no output carries a serial.
    pub fn extract(&self, report: &DiagnosticReport) -> Option<String> {
        report
            .entries
            .iter()
            .find_map(|entry| self.extract_from_text(&entry.output_text()))
    }

    /// Scan a single block of text. Later labelled lines are ignored even when
    /// the first one is blank, e.g. `Transport Serial Number` on USB bridges.
    pub fn extract_from_text(&self, text: &str) -> Option<String> {
        let line = text.lines().find(|line| self.pattern.is_match(line))?;
        let (_, value) = line.split_once(':')?;
        let value = value.trim();
        (!value.is_empty()).then(|| value.to_string())
    }

    /// Decide the run's serial: a caller-supplied value skips scanning
    /// entirely, otherwise scan, otherwise the `serial_unknown` sentinel.
    pub fn resolve(&self, serial_override: Option<&str>, report: &DiagnosticReport) -> SerialNumber {
        if let Some(serial) = serial_override {
            debug!(serial = %serial, "Using operator supplied serial number");
            return SerialNumber::new(serial);
        }

        match self.extract(report) {
            Some(serial) => {
                debug!(serial = %serial, "Serial number found in diagnostics");
                SerialNumber::new(serial)
            }
            None => {
                debug!("No serial number in diagnostics");
                SerialNumber::unknown()
            }
        }
    }
}
