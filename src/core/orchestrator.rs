use anyhow::{Context, Result};
use std::path::PathBuf;
use tracing::{Instrument, info, info_span};

use crate::context::AppContext;
use crate::core::clock::AcquisitionTimestamp;
use crate::core::diagnostics::DiagnosticRunner;
use crate::core::imaging::AcquisitionCommandBuilder;
use crate::core::models::{AcquisitionCommand, AcquisitionConfig, SerialNumber};
use crate::core::runner::{AcquisitionOutcome, AcquisitionRunner};
use crate::core::serial::{DEFAULT_SERIAL_LABEL, SerialExtractor};
use crate::core::session_log::SessionLog;

/// What a finished run produced
#[derive(Debug)]
pub struct SessionSummary {
    pub serial: SerialNumber,
    pub command: AcquisitionCommand,
    pub outcome: AcquisitionOutcome,
    pub audit_log_path: PathBuf,
}

/// Drives one acquisition: diagnostics, serial, command, imaging, audit log.
pub struct Orchestrator {
    ctx: AppContext,
}

impl Orchestrator {
    pub fn new(ctx: AppContext) -> Self {
        Self { ctx }
    }

    pub async fn run(&self, config: AcquisitionConfig) -> Result<SessionSummary> {
        let span = info_span!(
            "acquisition",
            device = %config.device_path,
            backend = config.backend.as_str()
        );
        self.run_inner(config).instrument(span).await
    }

    async fn run_inner(&self, config: AcquisitionConfig) -> Result<SessionSummary> {
        let app = &self.ctx.config;

        if config.debug {
            println!("Debug Enabled. All System calls will be printed.");
        }

        let report = DiagnosticRunner::new(app.tools.clone(), config.debug)
            .run(&config.device_path)
            .await;

        let extractor =
            SerialExtractor::new(DEFAULT_SERIAL_LABEL).context("Failed to build serial matcher")?;
        let serial = extractor.resolve(config.serial_override.as_deref(), &report);

        if config.debug {
            println!("Serial Number: {}", serial);
        }
        info!(serial = %serial, unknown = serial.is_unknown(), "Serial number decided");

        let ts = AcquisitionTimestamp::now();
        let command = AcquisitionCommandBuilder::new(&app.tools, &app.output_directory)
            .build(&config, &serial, &ts);

        info!(command = %command.command_line(), "Acquisition command built");

        let run = AcquisitionRunner.run(&command).await;

        let mut log = SessionLog::new();
        log.record_diagnostics(&report);
        log.record_acquisition(&command, &run);

        let file_name = SessionLog::file_name(&config.device_path, &serial, &ts);
        let audit_log_path = log
            .persist(&app.output_directory, &file_name)
            .context("Failed to write session audit log")?;

        Ok(SessionSummary {
            serial,
            command,
            outcome: run.outcome,
            audit_log_path,
        })
    }
}
