use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

use crate::codec::{decode, unpack};
use crate::config::PACKED_FILE_SUFFIX;
use crate::except::ExceptionKindRegistry;
use crate::tree::Project;

/// Load a resource file, text or packed, selected by its file name suffix.
pub(crate) fn load_resource_file(
    path: &Path,
    registry: &ExceptionKindRegistry,
) -> Result<Project> {
    let is_packed = path
        .file_name()
        .and_then(|n| n.to_str())
        .is_some_and(|n| n.ends_with(PACKED_FILE_SUFFIX));

    if is_packed {
        let bytes =
            fs::read(path).with_context(|| format!("Failed to read resource file: {:?}", path))?;
        unpack(&bytes, registry)
            .with_context(|| format!("Failed to unpack resource file: {:?}", path))
    } else {
        let text = fs::read_to_string(path)
            .with_context(|| format!("Failed to read resource file: {:?}", path))?;
        decode(&text, registry)
            .with_context(|| format!("Failed to parse resource file: {:?}", path))
    }
}
