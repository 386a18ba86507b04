pub mod check;
pub mod helper;
pub mod init;
pub mod pack;
pub mod resolve;
pub mod unpack;

use crate::issues::{Issue, Report, Severity};

/// The outcome of one CLI command, handed to the reporter.
pub struct CommandResult {
    pub summary: CommandSummary,
    pub issues: Vec<Issue>,
    pub files_checked: usize,
    pub error_count: usize,
    /// Whether errors should produce a non-zero exit code.
    pub exit_on_errors: bool,
}

impl CommandResult {
    pub(crate) fn new(
        summary: CommandSummary,
        issues: Vec<Issue>,
        files_checked: usize,
        exit_on_errors: bool,
    ) -> Self {
        let error_count = issues
            .iter()
            .filter(|issue| issue.report_severity() == Severity::Error)
            .count();
        Self {
            summary,
            issues,
            files_checked,
            error_count,
            exit_on_errors,
        }
    }
}

pub enum CommandSummary {
    Check,
    Pack(PackSummary),
    Unpack(UnpackSummary),
    Resolve(ResolveSummary),
    Init(InitSummary),
}

pub struct PackSummary {
    pub input: String,
    pub output: String,
    pub text_bytes: usize,
    pub packed_bytes: usize,
}

pub struct UnpackSummary {
    pub input: String,
    pub output: String,
}

pub struct ResolveSummary {
    pub text: String,
}

pub struct InitSummary {
    pub created: bool,
}
