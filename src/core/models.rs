use std::fmt;
use std::str::FromStr;

use crate::error::{AcquisitionError, Result};

/// Imaging tool used for the acquisition.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Backend {
    /// dc3dd: one `hash=` token per algorithm, `rec=on` error recovery
    #[default]
    Dc3dd,
    /// dcfldd: comma separated `hash=` list, `conv=noerror,sync`
    Dcfldd,
}

impl Backend {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Dc3dd => "dc3dd",
            Self::Dcfldd => "dcfldd",
        }
    }
}

/// Hash algorithms both imaging tools understand
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HashAlgorithm {
    Md5,
    Sha1,
    Sha256,
    Sha384,
    Sha512,
}

impl HashAlgorithm {
    /// Every supported algorithm, in the order they are listed to the operator.
    pub const ALL: [HashAlgorithm; 5] = [
        Self::Md5,
        Self::Sha1,
        Self::Sha256,
        Self::Sha384,
        Self::Sha512,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Md5 => "md5",
            Self::Sha1 => "sha1",
            Self::Sha256 => "sha256",
            Self::Sha384 => "sha384",
            Self::Sha512 => "sha512",
        }
    }

    /// Parse a comma separated list such as `sha1,md5`, keeping input order.
    pub fn parse_list(s: &str) -> Result<Vec<HashAlgorithm>> {
        s.split(',').map(|name| name.parse::<HashAlgorithm>()).collect()
    }
}

impl FromStr for HashAlgorithm {
    type Err = AcquisitionError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "md5" => Ok(Self::Md5),
            "sha1" => Ok(Self::Sha1),
            "sha256" => Ok(Self::Sha256),
            "sha384" => Ok(Self::Sha384),
            "sha512" => Ok(Self::Sha512),
            _ => Err(AcquisitionError::UnsupportedHash(s.to_string())),
        }
    }
}

impl fmt::Display for HashAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Everything the operator decided for one acquisition run.
///
/// Built once from the command line and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AcquisitionConfig {
    pub device_path: String,
    pub debug: bool,
    pub serial_override: Option<String>,
    pub chunk_size_gb: Option<u64>,
    pub hashes: Vec<HashAlgorithm>,
    pub backend: Backend,
}

impl AcquisitionConfig {
    /// Validate and build a config. An absent hash list defaults to `md5`.
    pub fn new(
        device_path: impl Into<String>,
        debug: bool,
        serial_override: Option<String>,
        chunk_size_gb: Option<u64>,
        hashes: Option<Vec<HashAlgorithm>>,
        backend: Backend,
    ) -> Result<Self> {
        let device_path = device_path.into();
        if device_path.trim().is_empty() {
            return Err(AcquisitionError::EmptyDevicePath);
        }
        if chunk_size_gb == Some(0) {
            return Err(AcquisitionError::InvalidChunkSize);
        }

        let hashes = match hashes {
            Some(h) if h.is_empty() => return Err(AcquisitionError::EmptyHashList),
            Some(h) => h,
            None => vec![HashAlgorithm::Md5],
        };

        // An empty override would otherwise name every artifact "_<timestamp>"
        let serial_override = serial_override.filter(|s| !s.trim().is_empty());

        Ok(Self {
            device_path,
            debug,
            serial_override,
            chunk_size_gb,
            hashes,
            backend,
        })
    }
}

/// How a diagnostic command ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiagnosticStatus {
    Exited(Option<i32>),
    FailedToStart(String),
}

impl DiagnosticStatus {
    pub fn success(&self) -> bool {
        matches!(self, Self::Exited(Some(0)))
    }
}

/// One diagnostic invocation and whatever it printed
#[derive(Debug, Clone)]
pub struct DiagnosticEntry {
    pub command_line: String,
    pub output: Vec<u8>,
    pub status: DiagnosticStatus,
}

impl DiagnosticEntry {
    pub fn output_text(&self) -> std::borrow::Cow<'_, str> {
        String::from_utf8_lossy(&self.output)
    }
}

/// Ordered diagnostic results for a single device
#[derive(Debug, Clone, Default)]
pub struct DiagnosticReport {
    pub entries: Vec<DiagnosticEntry>,
}

impl DiagnosticReport {
    pub fn push(&mut self, entry: DiagnosticEntry) {
        self.entries.push(entry);
    }
}

/// Serial number used to name every artifact of a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SerialNumber(String);

impl SerialNumber {
    /// Sentinel used when nothing could be determined
    pub const UNKNOWN: &'static str = "serial_unknown";

    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn unknown() -> Self {
        Self(Self::UNKNOWN.to_string())
    }

    pub fn is_unknown(&self) -> bool {
        self.0 == Self::UNKNOWN
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The serial as a single file name component: `/` becomes `_`.
    pub fn file_component(&self) -> String {
        self.0.replace('/', "_")
    }
}

impl fmt::Display for SerialNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Exact argument vector for the imaging tool.
///
/// The output token is always last; both tools treat the trailing token as
/// the destination.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AcquisitionCommand {
    pub tokens: Vec<String>,
    pub image_path: String,
    pub hash_log_path: String,
}

impl AcquisitionCommand {
    pub fn program(&self) -> &str {
        self.tokens.first().map(String::as_str).unwrap_or_default()
    }

    pub fn args(&self) -> &[String] {
        self.tokens.get(1..).unwrap_or_default()
    }

    pub fn output_token(&self) -> &str {
        self.tokens.last().map(String::as_str).unwrap_or_default()
    }

    pub fn command_line(&self) -> String {
        self.tokens.join(" ")
    }
}
