use std::path::Path;

use super::ArtifactNames;
use crate::core::models::{AcquisitionCommand, AcquisitionConfig};

/// dc3dd grammar:
///
/// `dc3dd log=<hashlog> rec=on if=<dev> hash=<a> [hash=<b> ...] [ofsz=<N>G ofs=<image>.0000 | of=<image>]`
///
/// dc3dd takes a single algorithm per `hash=` token, so each one is repeated.
pub(super) fn build(
    tool: &Path,
    config: &AcquisitionConfig,
    names: &ArtifactNames,
) -> AcquisitionCommand {
    let mut tokens = vec![
        tool.display().to_string(),
        format!("log={}", names.hash_log),
        "rec=on".to_string(),
        format!("if={}", config.device_path),
    ];

    tokens.extend(config.hashes.iter().map(|h| format!("hash={}", h)));

    let image_path = match config.chunk_size_gb {
        Some(size) => {
            let first_segment = names.first_segment();
            tokens.push(format!("ofsz={}G", size));
            tokens.push(format!("ofs={}", first_segment));
            first_segment
        }
        None => {
            tokens.push(format!("of={}", names.image));
            names.image.clone()
        }
    };

    AcquisitionCommand {
        tokens,
        image_path,
        hash_log_path: names.hash_log.clone(),
    }
}
