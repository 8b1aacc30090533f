//! Wall-clock helpers for acquisition timing.
//!
//! All recorded times are UTC. The local zone name is captured separately so
//! the audit log shows what the examiner's machine was set to.

use chrono::{DateTime, Local, Utc};
use std::path::Path;

/// Sortable format used in artifact names, e.g. `20240131235959`
const COMPACT_FORMAT: &str = "%Y%m%d%H%M%S";

/// Human-readable format used in the audit log, e.g. `January 31 2024 23:59:59`
const LONG_FORMAT: &str = "%B %d %Y %H:%M:%S";

/// A single instant, rendered in the two formats the tool needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AcquisitionTimestamp(DateTime<Utc>);

impl AcquisitionTimestamp {
    pub fn now() -> Self {
        Self(Utc::now())
    }

    pub fn from_datetime(at: DateTime<Utc>) -> Self {
        Self(at)
    }

    pub fn compact(&self) -> String {
        self.0.format(COMPACT_FORMAT).to_string()
    }

    /// Long form with the zone suffix, as written to the audit log.
    pub fn long(&self) -> String {
        format!("{} UTC", self.0.format(LONG_FORMAT))
    }
}

/// Best-effort name of the local system time zone.
///
/// Falls back to the numeric offset when no name can be found.
pub fn local_zone_name() -> String {
    if let Some(tz) = std::env::var("TZ").ok().filter(|tz| !tz.trim().is_empty()) {
        return tz.trim().trim_start_matches(':').to_string();
    }

    if let Ok(content) = std::fs::read_to_string("/etc/timezone") {
        let name = content.trim();
        if !name.is_empty() {
            return name.to_string();
        }
    }

    if let Some(name) = zone_from_localtime(Path::new("/etc/localtime")) {
        return name;
    }

    Local::now().format("%:z").to_string()
}

/// Resolve the zone name from a `/etc/localtime` style symlink.
fn zone_from_localtime(path: &Path) -> Option<String> {
    let target = std::fs::read_link(path).ok()?;
    let target = target.to_string_lossy();
    let (_, name) = target.split_once("zoneinfo/")?;

    if name.is_empty() {
        None
    } else {
        Some(name.to_string())
    }
}
