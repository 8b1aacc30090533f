use anyhow::{Context, Result};
use clap::error::ErrorKind;
use clap::{CommandFactory, Parser};
use faidds::cli::{self, Cli, Mode};
use faidds::core::{AcquisitionConfig, Orchestrator};
use faidds::{config, context, logging};
use nix::unistd::Uid;
use tracing::{info, warn};

/// Exit status for invalid flag combinations
const USAGE_EXIT_CODE: i32 = 2;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => e.exit(),
        Err(e) => {
            let reason = e.to_string();
            usage_failure(reason.lines().next().unwrap_or_default())
        }
    };

    let mode = match cli.mode() {
        Ok(mode) => mode,
        Err(e) => usage_failure(&e.to_string()),
    };

    match mode {
        Mode::ListHashes => {
            cli::print_hash_list(&mut std::io::stdout()).context("Failed to print hash list")
        }
        Mode::Acquire(acquisition) => run_acquisition(&cli, acquisition).await,
    }
}

/// Print the retry message and the long help, then exit with the usage code.
fn usage_failure(reason: &str) -> ! {
    println!("Invalid arguments passed. Retry! ({})", reason);
    if let Err(e) = Cli::command().print_long_help() {
        eprintln!("Failed to print help: {}", e);
    }
    std::process::exit(USAGE_EXIT_CODE);
}

async fn run_acquisition(cli: &Cli, acquisition: AcquisitionConfig) -> Result<()> {
    let overrides = cli.config_overrides();
    let config = config::AppConfig::new(cli.config.as_deref(), Some(&overrides))?;

    logging::init(logging::LogConfig::from(&config.log));

    let confirmed = {
        let stdin = std::io::stdin();
        cli::confirm_acquisition(&mut stdin.lock(), &mut std::io::stdout())
            .context("Failed to read confirmation")?
    };
    if !confirmed {
        println!("Exiting....");
        return Ok(());
    }

    if !Uid::effective().is_root() {
        warn!("Not running as root; reading the device will probably fail");
    }

    let ctx = context::AppContext::new(config);
    let summary = Orchestrator::new(ctx)
        .run(acquisition)
        .await
        .context("Acquisition failed")?;

    if !summary.outcome.success() {
        warn!(outcome = %summary.outcome.log_line(), "Imaging tool did not finish cleanly");
    }
    info!(
        serial = %summary.serial,
        image = %summary.command.image_path,
        hash_log = %summary.command.hash_log_path,
        "Acquisition session complete"
    );
    println!("Session log: {}", summary.audit_log_path.display());

    Ok(())
}
