use anyhow::{Context, Result};

use super::super::args::ResolveCommand;
use super::helper::load_resource_file;
use super::{CommandResult, CommandSummary, ResolveSummary};
use crate::except::ExceptionKindRegistry;
use crate::locale::LocaleTag;

pub fn resolve(cmd: ResolveCommand) -> Result<CommandResult> {
    let registry = ExceptionKindRegistry::with_builtins();
    let project = load_resource_file(&cmd.file, &registry)?;

    let culture = cmd
        .culture
        .as_deref()
        .map(LocaleTag::parse)
        .transpose()
        .context("Invalid culture tag")?;
    let values: Vec<&str> = cmd.values.iter().map(String::as_str).collect();

    let text = project.resolve_with_values(&cmd.path, &values, culture.as_ref())?;

    Ok(CommandResult::new(
        CommandSummary::Resolve(ResolveSummary { text }),
        Vec::new(),
        1,
        false,
    ))
}
