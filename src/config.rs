use anyhow::{Context, Result};
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const SYSTEM_CONFIG_PATH: &str = "/etc/faidds/config.toml";
const LOCAL_CONFIG_PATH: &str = "faidds.toml";
const ENV_PREFIX: &str = "FAIDDS_";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Directory receiving the image, hash log and audit log
    pub output_directory: PathBuf,
    pub tools: ToolPaths,
    pub log: LogSettings,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            output_directory: PathBuf::from("."),
            tools: ToolPaths::default(),
            log: LogSettings::default(),
        }
    }
}

/// Locations of the external binaries this tool drives
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolPaths {
    pub parted: PathBuf,
    pub hdparm: PathBuf,
    pub sdparm: PathBuf,
    pub dc3dd: PathBuf,
    pub dcfldd: PathBuf,
}

impl Default for ToolPaths {
    fn default() -> Self {
        Self {
            parted: PathBuf::from("/sbin/parted"),
            hdparm: PathBuf::from("/sbin/hdparm"),
            sdparm: PathBuf::from("/usr/bin/sdparm"),
            dc3dd: PathBuf::from("/usr/bin/dc3dd"),
            dcfldd: PathBuf::from("/usr/bin/dcfldd"),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogSettings {
    pub json: bool,
    pub verbose: bool,
}

impl AppConfig {
    /// Load configuration, lowest precedence first: defaults, system file,
    /// local (or explicit) file, `FAIDDS_*` environment, command line.
    pub fn new<T: Serialize>(config_file: Option<&Path>, cli_overrides: Option<&T>) -> Result<Self> {
        let local = config_file.unwrap_or(Path::new(LOCAL_CONFIG_PATH));

        let mut figment = Figment::from(Serialized::defaults(AppConfig::default()))
            .merge(Toml::file(SYSTEM_CONFIG_PATH))
            .merge(Toml::file(local))
            .merge(Env::prefixed(ENV_PREFIX).split("__"));

        if let Some(overrides) = cli_overrides {
            figment = figment.merge(Serialized::defaults(overrides));
        }

        figment.extract().context("Failed to load configuration")
    }
}
