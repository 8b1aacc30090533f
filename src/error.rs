use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for acquisition operations
pub type Result<T> = std::result::Result<T, AcquisitionError>;

/// Errors raised while preparing or recording an acquisition.
///
/// Diagnostic failures never show up here: they are captured into the
/// report and the run carries on.
#[derive(Error, Debug)]
pub enum AcquisitionError {
    /// No device path was given
    #[error("device path must not be empty")]
    EmptyDevicePath,

    /// A hash list was supplied but contained no algorithms
    #[error("at least one hash algorithm is required")]
    EmptyHashList,

    /// Hash name outside the supported set
    #[error("unsupported hash algorithm: {0}")]
    UnsupportedHash(String),

    /// Chunk size of zero GiB
    #[error("chunk size must be a positive number of GiB")]
    InvalidChunkSize,

    /// The imaging tool could not be started
    #[error("failed to start imaging tool {tool}: {source}")]
    ImagingSpawn {
        tool: String,
        #[source]
        source: std::io::Error,
    },

    /// The session audit file could not be written
    #[error("failed to write session log {}: {source}", .path.display())]
    SessionLog {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
