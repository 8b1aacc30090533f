#![allow(dead_code)]

use faidds::config::ToolPaths;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};

pub const FAKE_SERIAL: &str = "FAKE-0001";

/// Write an executable shell script and return its path.
pub fn write_script(dir: &Path, name: &str, body: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, format!("#!/bin/sh\n{}\n", body)).unwrap();
    let mut perms = std::fs::metadata(&path).unwrap().permissions();
    perms.set_mode(0o755);
    std::fs::set_permissions(&path, perms).unwrap();
    path
}

/// Stand-ins for parted/hdparm/sdparm/dc3dd/dcfldd.
///
/// The imaging stand-ins record their arguments to `<name>.args` and create
/// an empty file at the `of=`/`ofs=` destination.
pub fn fake_tools(dir: &Path) -> ToolPaths {
    let imager = |name: &str| {
        let record = dir.join(format!("{}.args", name));
        write_script(
            dir,
            name,
            &format!(
                r#"echo "$@" > {record}
for arg in "$@"; do
  case "$arg" in
    of=*) : > "${{arg#of=}}" ;;
    ofs=*) : > "${{arg#ofs=}}" ;;
  esac
done
echo "{name}: done" >&2"#,
                record = record.display(),
                name = name
            ),
        )
    };

    ToolPaths {
        parted: write_script(
            dir,
            "parted",
            "echo 'Model: ATA FAKE DISK (scsi)'; echo \"Disk $1: 500GB\"",
        ),
        hdparm: write_script(
            dir,
            "hdparm",
            &format!(
                "echo \"$2:\"; echo; echo 'ATA device, with non-removable media'; \
                 printf '\\tSerial Number:      {}\\n'",
                FAKE_SERIAL
            ),
        ),
        sdparm: write_script(
            dir,
            "sdparm",
            "echo \"    $2: ATA       FAKE DISK  1A01\"; echo 'inquiry not supported' >&2; exit 1",
        ),
        dc3dd: imager("dc3dd"),
        dcfldd: imager("dcfldd"),
    }
}

/// File names in `dir` starting with `prefix`.
pub fn files_with_prefix(dir: &Path, prefix: &str) -> Vec<String> {
    let mut names: Vec<String> = std::fs::read_dir(dir)
        .unwrap()
        .filter_map(|e| e.ok())
        .map(|e| e.file_name().to_string_lossy().to_string())
        .filter(|n| n.starts_with(prefix))
        .collect();
    names.sort();
    names
}
