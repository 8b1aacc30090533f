use std::path::Path;

use super::ArtifactNames;
use crate::core::models::{AcquisitionCommand, AcquisitionConfig};

/// dcfldd grammar:
///
/// `dcfldd hash=<a,b,...> hashlog=<hashlog> conv=noerror,sync if=<dev> [split=<N>G splitformat=0000] of=<image>`
///
/// `split` and `splitformat` must come before `of=`, or dcfldd folds them
/// into the output file name.
pub(super) fn build(
    tool: &Path,
    config: &AcquisitionConfig,
    names: &ArtifactNames,
) -> AcquisitionCommand {
    let hash_list = config
        .hashes
        .iter()
        .map(|h| h.as_str())
        .collect::<Vec<_>>()
        .join(",");

    let mut tokens = vec![
        tool.display().to_string(),
        format!("hash={}", hash_list),
        format!("hashlog={}", names.hash_log),
        "conv=noerror,sync".to_string(),
        format!("if={}", config.device_path),
    ];

    if let Some(size) = config.chunk_size_gb {
        tokens.push(format!("split={}G", size));
        tokens.push("splitformat=0000".to_string());
    }

    tokens.push(format!("of={}", names.image));

    AcquisitionCommand {
        tokens,
        image_path: names.image.clone(),
        hash_log_path: names.hash_log.clone(),
    }
}
