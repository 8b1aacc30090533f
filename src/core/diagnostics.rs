use std::path::PathBuf;
use std::process::Stdio;
use tokio::process::Command;
use tracing::{debug, info, warn};

use crate::config::ToolPaths;
use crate::core::models::{DiagnosticEntry, DiagnosticReport, DiagnosticStatus};

/// A read-only diagnostic invocation against the target device
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiagnosticCommand {
    pub program: PathBuf,
    pub args: Vec<String>,
}

impl DiagnosticCommand {
    pub fn command_line(&self) -> String {
        std::iter::once(self.program.display().to_string())
            .chain(self.args.iter().cloned())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Runs parted, hdparm and sdparm against a device, in that order.
///
/// Nothing here is fatal: a missing binary or a non-zero exit is recorded in
/// the report and the next command still runs.
pub struct DiagnosticRunner {
    tools: ToolPaths,
    debug: bool,
}

impl DiagnosticRunner {
    pub fn new(tools: ToolPaths, debug: bool) -> Self {
        Self { tools, debug }
    }

    /// The fixed command sequence for `device_path`.
    pub fn commands(&self, device_path: &str) -> Vec<DiagnosticCommand> {
        vec![
            DiagnosticCommand {
                program: self.tools.parted.clone(),
                args: vec![device_path.to_string(), "print".to_string()],
            },
            DiagnosticCommand {
                program: self.tools.hdparm.clone(),
                args: vec!["-I".to_string(), device_path.to_string()],
            },
            DiagnosticCommand {
                program: self.tools.sdparm.clone(),
                args: vec!["--inquiry".to_string(), device_path.to_string()],
            },
        ]
    }

    pub async fn run(&self, device_path: &str) -> DiagnosticReport {
        let mut report = DiagnosticReport::default();

        for cmd in self.commands(device_path) {
            report.push(self.run_one(&cmd).await);
        }

        info!(
            device = %device_path,
            commands = report.entries.len(),
            failed = report.entries.iter().filter(|e| !e.status.success()).count(),
            "Diagnostics collected"
        );

        report
    }

    async fn run_one(&self, cmd: &DiagnosticCommand) -> DiagnosticEntry {
        let command_line = cmd.command_line();

        if self.debug {
            println!("System Call - {}", command_line);
        }
        debug!(command = %command_line, "Running diagnostic");

        let result = Command::new(&cmd.program)
            .args(&cmd.args)
            .stdin(Stdio::null())
            .output()
            .await;

        match result {
            Ok(out) => {
                if !out.status.success() {
                    warn!(command = %command_line, status = %out.status, "Diagnostic exited with failure");
                }

                let mut output = out.stdout;
                output.extend_from_slice(&out.stderr);

                DiagnosticEntry {
                    command_line,
                    output,
                    status: DiagnosticStatus::Exited(out.status.code()),
                }
            }
            Err(e) => {
                warn!(command = %command_line, error = %e, "Diagnostic failed to start");
                DiagnosticEntry {
                    command_line,
                    output: Vec::new(),
                    status: DiagnosticStatus::FailedToStart(e.to_string()),
                }
            }
        }
    }
}
