use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use super::super::args::UnpackCommand;
use super::{CommandResult, CommandSummary, UnpackSummary};
use crate::codec;
use crate::config::{PACKED_FILE_SUFFIX, RESOURCE_FILE_SUFFIX};
use crate::except::ExceptionKindRegistry;

pub fn unpack(cmd: UnpackCommand) -> Result<CommandResult> {
    let registry = ExceptionKindRegistry::with_builtins();
    let bytes = fs::read(&cmd.input)
        .with_context(|| format!("Failed to read packed file: {:?}", cmd.input))?;
    let project = codec::unpack(&bytes, &registry)
        .with_context(|| format!("Failed to unpack resource file: {:?}", cmd.input))?;

    let output = cmd.output.unwrap_or_else(|| default_text_name(&cmd.input));
    fs::write(&output, codec::encode(&project))
        .with_context(|| format!("Failed to write resource file: {:?}", output))?;

    Ok(CommandResult::new(
        CommandSummary::Unpack(UnpackSummary {
            input: cmd.input.display().to_string(),
            output: output.display().to_string(),
        }),
        Vec::new(),
        1,
        false,
    ))
}

fn default_text_name(input: &Path) -> PathBuf {
    let name = input.file_name().and_then(|n| n.to_str()).unwrap_or("");
    match name.strip_suffix(PACKED_FILE_SUFFIX) {
        Some(stem) => input.with_file_name(format!("{}{}", stem, RESOURCE_FILE_SUFFIX)),
        None => input.with_extension("xml"),
    }
}
