use std::fs;

use anyhow::{Context, Result};

use super::super::args::CheckCommand;
use super::{CommandResult, CommandSummary};
use crate::codec::decode;
use crate::error::Error;
use crate::except::ExceptionKindRegistry;
use crate::issues::{Issue, ParseErrorIssue, ResourceLocation};
use crate::rules::{FileContext, check_all};

pub fn check(cmd: CheckCommand) -> Result<CommandResult> {
    let registry = ExceptionKindRegistry::with_builtins();
    let mut issues: Vec<Issue> = Vec::new();

    for file in &cmd.files {
        let display = file.display().to_string();
        let content = fs::read_to_string(file)
            .with_context(|| format!("Failed to read resource file: {:?}", file))?;
        let ctx = FileContext::new(&display, &content);

        match decode(&content, &registry) {
            Ok(project) => issues.extend(check_all(&project, &ctx)),
            Err(error) => issues.push(parse_error_issue(&ctx, &display, error)),
        }
    }

    Ok(CommandResult::new(
        CommandSummary::Check,
        issues,
        cmd.files.len(),
        true,
    ))
}

fn parse_error_issue(ctx: &FileContext, file_path: &str, error: Error) -> Issue {
    let (line, col, message) = match error {
        Error::MalformedResource { line, col, message } => (line, col, message),
        other => (0, 0, other.to_string()),
    };
    Issue::ParseError(ParseErrorIssue {
        location: ResourceLocation::new(file_path, line, col),
        message,
        source_line: ctx.line_text(line).map(str::to_string),
    })
}
