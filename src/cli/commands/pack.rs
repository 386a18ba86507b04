use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use super::super::args::PackCommand;
use super::{CommandResult, CommandSummary, PackSummary};
use crate::codec;
use crate::config::{PACKED_FILE_SUFFIX, RESOURCE_FILE_SUFFIX};
use crate::except::ExceptionKindRegistry;

pub fn pack(cmd: PackCommand) -> Result<CommandResult> {
    let registry = ExceptionKindRegistry::with_builtins();
    let text = fs::read_to_string(&cmd.input)
        .with_context(|| format!("Failed to read resource file: {:?}", cmd.input))?;
    let project = codec::decode(&text, &registry)
        .with_context(|| format!("Failed to parse resource file: {:?}", cmd.input))?;

    let bytes = codec::pack(&project)?;
    let output = cmd
        .output
        .unwrap_or_else(|| default_packed_name(&cmd.input));
    fs::write(&output, &bytes)
        .with_context(|| format!("Failed to write packed file: {:?}", output))?;

    Ok(CommandResult::new(
        CommandSummary::Pack(PackSummary {
            input: cmd.input.display().to_string(),
            output: output.display().to_string(),
            text_bytes: text.len(),
            packed_bytes: bytes.len(),
        }),
        Vec::new(),
        1,
        false,
    ))
}

fn default_packed_name(input: &Path) -> PathBuf {
    let name = input.file_name().and_then(|n| n.to_str()).unwrap_or("");
    match name.strip_suffix(RESOURCE_FILE_SUFFIX) {
        Some(stem) => input.with_file_name(format!("{}{}", stem, PACKED_FILE_SUFFIX)),
        None => input.with_extension("bin"),
    }
}
