//! Command line surface: flag parsing, mode selection and the operator
//! confirmation prompt.

use clap::Parser;
use serde::Serialize;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use thiserror::Error;

use crate::core::models::{AcquisitionConfig, Backend, HashAlgorithm};
use crate::error::AcquisitionError;

const DESCRIPTION: &str = "\
Forensic Acquisition Information and Drive Data.

Gathers drive information (parted, hdparm, sdparm) and acquires an image of
the specified device file into the output directory with dc3dd or dcfldd.
An audit log of the whole session is written next to the image.

Must be run as root to read raw devices.

Use -d to specify the device or file path, or -l to list the available
hashes. These two options are mutually exclusive.";

#[derive(Parser, Debug)]
#[command(name = "faidds", version)]
#[command(about = "Forensic drive acquisition with an audit trail", long_about = DESCRIPTION)]
pub struct Cli {
    /// Device file to acquire, e.g. /dev/sda
    #[arg(short = 'd', long)]
    pub drive: Option<String>,

    /// Print every system call before it runs
    #[arg(short = 'D', long)]
    pub debug: bool,

    /// Split the image into chunks of this many GiB
    #[arg(short = 'c', long, value_parser = clap::value_parser!(u64).range(1..))]
    pub chunk: Option<u64>,

    /// Serial number to use instead of the one found in drive info
    #[arg(short = 's', long)]
    pub serial: Option<String>,

    /// Comma separated hash algorithms, no spaces (default: md5)
    #[arg(short = 'm', long)]
    pub hashes: Option<String>,

    /// List all supported hashes
    #[arg(short = 'l', long)]
    pub list_hashes: bool,

    /// Use dcfldd to acquire the image (default: dc3dd)
    #[arg(long)]
    pub dcfldd: bool,

    /// Configuration file (default: ./faidds.toml)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Directory for the image, hash log and audit log
    #[arg(long)]
    pub output_dir: Option<PathBuf>,

    /// Emit logs as JSON
    #[arg(long)]
    pub json_logs: bool,
}

/// Invalid flag combinations or values
#[derive(Debug, Error)]
pub enum UsageError {
    #[error("--list-hashes cannot be combined with acquisition flags")]
    ConflictingModes,

    #[error("either --drive or --list-hashes is required")]
    MissingMode,

    #[error(transparent)]
    InvalidValue(#[from] AcquisitionError),
}

/// What the operator asked for
#[derive(Debug)]
pub enum Mode {
    Acquire(AcquisitionConfig),
    ListHashes,
}

/// Command line values layered on top of file and environment configuration.
#[derive(Debug, Serialize)]
pub struct ConfigOverrides {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_directory: Option<PathBuf>,
    pub log: LogOverrides,
}

#[derive(Debug, Serialize)]
pub struct LogOverrides {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub json: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub verbose: Option<bool>,
}

impl Cli {
    pub fn mode(&self) -> Result<Mode, UsageError> {
        let acquisition_flags = self.debug
            || self.hashes.is_some()
            || self.chunk.is_some()
            || self.serial.is_some()
            || self.dcfldd;

        match (&self.drive, self.list_hashes) {
            (Some(_), true) => Err(UsageError::ConflictingModes),
            (None, true) if acquisition_flags => Err(UsageError::ConflictingModes),
            (None, true) => Ok(Mode::ListHashes),
            (None, false) => Err(UsageError::MissingMode),
            (Some(drive), false) => {
                let hashes = self
                    .hashes
                    .as_deref()
                    .map(HashAlgorithm::parse_list)
                    .transpose()?;
                let backend = if self.dcfldd {
                    Backend::Dcfldd
                } else {
                    Backend::Dc3dd
                };

                let config = AcquisitionConfig::new(
                    drive.clone(),
                    self.debug,
                    self.serial.clone(),
                    self.chunk,
                    hashes,
                    backend,
                )?;
                Ok(Mode::Acquire(config))
            }
        }
    }

    /// Only flags the operator actually passed end up overriding config.
    pub fn config_overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            output_directory: self.output_dir.clone(),
            log: LogOverrides {
                json: self.json_logs.then_some(true),
                verbose: self.debug.then_some(true),
            },
        }
    }
}

/// Print the supported hash names, one per line.
pub fn print_hash_list<W: Write>(out: &mut W) -> io::Result<()> {
    writeln!(out, "All Hashes List:")?;
    for hash in HashAlgorithm::ALL {
        writeln!(out, "\t{}", hash)?;
    }
    Ok(())
}

/// Ask the operator to confirm. Only `y` or `yes` (any case) counts as
/// consent; anything else, including end of input, declines.
pub fn confirm_acquisition<R: BufRead, W: Write>(input: &mut R, output: &mut W) -> io::Result<bool> {
    write!(output, "Enter YES/Y to acquire drive image: ")?;
    output.flush()?;

    let mut answer = String::new();
    input.read_line(&mut answer)?;

    let answer = answer.trim().to_lowercase();
    Ok(answer == "y" || answer == "yes")
}
