use std::process::Stdio;
use tokio::process::Command;
use tracing::{error, info, warn};

use crate::core::clock::{self, AcquisitionTimestamp};
use crate::core::models::AcquisitionCommand;
use crate::error::AcquisitionError;

/// How the imaging tool run ended
#[derive(Debug)]
pub enum AcquisitionOutcome {
    /// The tool ran to completion; `None` means it was killed by a signal
    Exited(Option<i32>),
    /// The tool never started
    FailedToStart(AcquisitionError),
}

impl AcquisitionOutcome {
    pub fn success(&self) -> bool {
        matches!(self, Self::Exited(Some(0)))
    }

    /// Line recorded in the audit log.
    pub fn log_line(&self) -> String {
        match self {
            Self::Exited(Some(code)) => format!("Acquisition Exit Status: {}", code),
            Self::Exited(None) => "Acquisition Exit Status: terminated by signal".to_string(),
            Self::FailedToStart(e) => format!("Acquisition Failed To Start: {}", e),
        }
    }
}

/// Timing and result of one imaging run
#[derive(Debug)]
pub struct AcquisitionRun {
    pub time_zone: String,
    pub started: AcquisitionTimestamp,
    pub stopped: AcquisitionTimestamp,
    pub outcome: AcquisitionOutcome,
}

/// Runs the imaging tool to completion.
///
/// The child inherits stdout/stderr rather than being piped: dc3dd and
/// dcfldd write a steady stream of progress text and nothing here reads it,
/// so a pipe would eventually fill and stall the child.
pub struct AcquisitionRunner;

impl AcquisitionRunner {
    pub async fn run(&self, command: &AcquisitionCommand) -> AcquisitionRun {
        let time_zone = clock::local_zone_name();
        println!("System Time Zone Is: {}", time_zone);

        let started = AcquisitionTimestamp::now();
        println!("Start Time: {}", started.long());
        println!("Acquisition command: {}", command.command_line());

        info!(
            tool = %command.program(),
            image = %command.image_path,
            hash_log = %command.hash_log_path,
            "Starting acquisition"
        );

        let outcome = match Command::new(command.program())
            .args(command.args())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .await
        {
            Ok(status) => {
                if status.success() {
                    info!(status = %status, "Imaging tool finished");
                } else {
                    warn!(status = %status, "Imaging tool exited with failure");
                }
                AcquisitionOutcome::Exited(status.code())
            }
            Err(source) => {
                let e = AcquisitionError::ImagingSpawn {
                    tool: command.program().to_string(),
                    source,
                };
                error!(error = %e, "Imaging tool did not start");
                AcquisitionOutcome::FailedToStart(e)
            }
        };

        let stopped = AcquisitionTimestamp::now();
        println!("Stop Time: {}", stopped.long());

        AcquisitionRun {
            time_zone,
            started,
            stopped,
            outcome,
        }
    }
}
