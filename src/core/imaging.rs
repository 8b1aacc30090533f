mod dc3dd;
mod dcfldd;

use std::path::{Path, PathBuf};

use crate::config::ToolPaths;
use crate::core::clock::AcquisitionTimestamp;
use crate::core::models::{AcquisitionCommand, AcquisitionConfig, Backend, SerialNumber};

/// File names shared by every backend for one acquisition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactNames {
    /// `<dir>/<serial>_<ts>.dd`
    pub image: String,
    /// `<dir>/<serial>_<ts>_hash.txt`
    pub hash_log: String,
}

impl ArtifactNames {
    pub fn new(output_directory: &Path, serial: &SerialNumber, ts: &AcquisitionTimestamp) -> Self {
        let stem = format!("{}_{}", serial.file_component(), ts.compact());
        Self {
            image: in_directory(output_directory, &format!("{}.dd", stem)),
            hash_log: in_directory(output_directory, &format!("{}_hash.txt", stem)),
        }
    }

    /// First segment name when the image is split into numbered chunks.
    pub fn first_segment(&self) -> String {
        format!("{}.0000", self.image)
    }
}

/// Render `name` under `dir` the way the imaging tools expect, e.g. `./x.dd`.
fn in_directory(dir: &Path, name: &str) -> String {
    let dir = dir.display().to_string();
    format!("{}/{}", dir.trim_end_matches('/'), name)
}

/// Builds the imaging tool invocation for either backend.
pub struct AcquisitionCommandBuilder {
    dc3dd: PathBuf,
    dcfldd: PathBuf,
    output_directory: PathBuf,
}

impl AcquisitionCommandBuilder {
    pub fn new(tools: &ToolPaths, output_directory: impl Into<PathBuf>) -> Self {
        Self {
            dc3dd: tools.dc3dd.clone(),
            dcfldd: tools.dcfldd.clone(),
            output_directory: output_directory.into(),
        }
    }

    /// Deterministic for a given config, serial and timestamp.
    pub fn build(
        &self,
        config: &AcquisitionConfig,
        serial: &SerialNumber,
        ts: &AcquisitionTimestamp,
    ) -> AcquisitionCommand {
        let names = ArtifactNames::new(&self.output_directory, serial, ts);

        match config.backend {
            Backend::Dc3dd => dc3dd::build(&self.dc3dd, config, &names),
            Backend::Dcfldd => dcfldd::build(&self.dcfldd, config, &names),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::HashAlgorithm;
    use chrono::{TimeZone, Utc};

    fn ts() -> AcquisitionTimestamp {
        AcquisitionTimestamp::from_datetime(Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap())
    }

    fn config(backend: Backend, hashes: &[HashAlgorithm], chunk: Option<u64>) -> AcquisitionConfig {
        AcquisitionConfig::new(
            "/dev/sdX",
            false,
            None,
            chunk,
            Some(hashes.to_vec()),
            backend,
        )
        .unwrap()
    }

    fn builder() -> AcquisitionCommandBuilder {
        AcquisitionCommandBuilder::new(&ToolPaths::default(), ".")
    }

    fn serial() -> SerialNumber {
        SerialNumber::new("WD123")
    }

    #[test]
    fn test_output_token_is_last_for_every_shape() {
        let hash_sets: [&[HashAlgorithm]; 2] = [
            &[HashAlgorithm::Md5],
            &[HashAlgorithm::Sha256, HashAlgorithm::Sha1, HashAlgorithm::Md5],
        ];

        for backend in [Backend::Dc3dd, Backend::Dcfldd] {
            for hashes in hash_sets {
                for chunk in [None, Some(1), Some(4)] {
                    let cmd = builder().build(&config(backend, hashes, chunk), &serial(), &ts());
                    let last = cmd.output_token();

                    let expected = match (backend, chunk) {
                        (Backend::Dc3dd, Some(_)) => "ofs=./WD123_20240301120000.dd.0000",
                        _ => "of=./WD123_20240301120000.dd",
                    };
                    assert_eq!(last, expected, "{:?} {:?} {:?}", backend, hashes, chunk);
                }
            }
        }
    }

    #[test]
    fn test_dc3dd_one_hash_token_per_algorithm() {
        let cmd = builder().build(
            &config(Backend::Dc3dd, &[HashAlgorithm::Sha1, HashAlgorithm::Md5], None),
            &serial(),
            &ts(),
        );

        let hashes: Vec<&String> = cmd.tokens.iter().filter(|t| t.starts_with("hash=")).collect();
        assert_eq!(hashes, vec!["hash=sha1", "hash=md5"]);
    }

    #[test]
    fn test_dcfldd_single_comma_joined_hash_token() {
        let cmd = builder().build(
            &config(Backend::Dcfldd, &[HashAlgorithm::Sha1, HashAlgorithm::Md5], None),
            &serial(),
            &ts(),
        );

        let hashes: Vec<&String> = cmd.tokens.iter().filter(|t| t.starts_with("hash=")).collect();
        assert_eq!(hashes, vec!["hash=sha1,md5"]);
    }

    #[test]
    fn test_dc3dd_full_command() {
        let cmd = builder().build(
            &config(Backend::Dc3dd, &[HashAlgorithm::Md5, HashAlgorithm::Sha256], None),
            &serial(),
            &ts(),
        );

        assert_eq!(
            cmd.tokens,
            vec![
                "/usr/bin/dc3dd",
                "log=./WD123_20240301120000_hash.txt",
                "rec=on",
                "if=/dev/sdX",
                "hash=md5",
                "hash=sha256",
                "of=./WD123_20240301120000.dd",
            ]
        );
        assert_eq!(cmd.image_path, "./WD123_20240301120000.dd");
        assert_eq!(cmd.hash_log_path, "./WD123_20240301120000_hash.txt");
    }

    #[test]
    fn test_dc3dd_chunked() {
        let cmd = builder().build(
            &config(Backend::Dc3dd, &[HashAlgorithm::Md5], Some(4)),
            &serial(),
            &ts(),
        );

        assert_eq!(
            cmd.tokens,
            vec![
                "/usr/bin/dc3dd",
                "log=./WD123_20240301120000_hash.txt",
                "rec=on",
                "if=/dev/sdX",
                "hash=md5",
                "ofsz=4G",
                "ofs=./WD123_20240301120000.dd.0000",
            ]
        );
        assert_eq!(cmd.image_path, "./WD123_20240301120000.dd.0000");
    }

    #[test]
    fn test_dc3dd_unchunked_has_no_ofsz() {
        let cmd = builder().build(
            &config(Backend::Dc3dd, &[HashAlgorithm::Md5], None),
            &serial(),
            &ts(),
        );

        assert!(!cmd.tokens.iter().any(|t| t.starts_with("ofsz=")));
        assert!(cmd.output_token().ends_with(".dd"));
    }

    #[test]
    fn test_dcfldd_end_to_end_shape() {
        let cmd = builder().build(
            &config(Backend::Dcfldd, &[HashAlgorithm::Md5], None),
            &serial(),
            &ts(),
        );

        assert_eq!(
            cmd.tokens,
            vec![
                "/usr/bin/dcfldd",
                "hash=md5",
                "hashlog=./WD123_20240301120000_hash.txt",
                "conv=noerror,sync",
                "if=/dev/sdX",
                "of=./WD123_20240301120000.dd",
            ]
        );
    }

    #[test]
    fn test_dcfldd_chunked_split_before_output() {
        let cmd = builder().build(
            &config(Backend::Dcfldd, &[HashAlgorithm::Sha512], Some(2)),
            &serial(),
            &ts(),
        );

        let n = cmd.tokens.len();
        assert_eq!(cmd.tokens[n - 3], "split=2G");
        assert_eq!(cmd.tokens[n - 2], "splitformat=0000");
        assert_eq!(cmd.tokens[n - 1], "of=./WD123_20240301120000.dd");
    }

    #[test]
    fn test_build_is_deterministic() {
        let cfg = config(Backend::Dc3dd, &[HashAlgorithm::Sha1, HashAlgorithm::Md5], Some(8));
        let a = builder().build(&cfg, &serial(), &ts());
        let b = builder().build(&cfg, &serial(), &ts());
        assert_eq!(a, b);
        assert_eq!(a.command_line(), b.command_line());
    }

    #[test]
    fn test_slash_in_serial_stays_in_output_directory() {
        let cmd = builder().build(
            &config(Backend::Dcfldd, &[HashAlgorithm::Md5], None),
            &SerialNumber::new("WD/99"),
            &ts(),
        );

        assert_eq!(cmd.output_token(), "of=./WD_99_20240301120000.dd");
        assert_eq!(cmd.hash_log_path, "./WD_99_20240301120000_hash.txt");
    }

    #[test]
    fn test_custom_output_directory_and_tool() {
        let tools = ToolPaths {
            dcfldd: PathBuf::from("/opt/bin/dcfldd"),
            ..ToolPaths::default()
        };
        let builder = AcquisitionCommandBuilder::new(&tools, "/mnt/evidence/");
        let cmd = builder.build(
            &config(Backend::Dcfldd, &[HashAlgorithm::Md5], None),
            &SerialNumber::unknown(),
            &ts(),
        );

        assert_eq!(cmd.program(), "/opt/bin/dcfldd");
        assert_eq!(
            cmd.output_token(),
            "of=/mnt/evidence/serial_unknown_20240301120000.dd"
        );
        assert_eq!(
            cmd.tokens[2],
            "hashlog=/mnt/evidence/serial_unknown_20240301120000_hash.txt"
        );
    }
}
