//! Empty-prompt rule.
//!
//! A prompt with no entries resolves to a diagnostic placeholder in every
//! culture; it is a leftover stub or a merge artifact.

use crate::issues::EmptyPromptIssue;
use crate::rules::{FileContext, for_each_method};
use crate::tree::Project;

pub fn check_empty_prompts(project: &Project, ctx: &FileContext) -> Vec<EmptyPromptIssue> {
    let mut issues = Vec::new();
    for_each_method(project, |path, method| {
        for prompt in method.prompts() {
            if prompt.entries().is_empty() {
                let mut segments: Vec<&str> = path.split('.').collect();
                segments.push(prompt.name());
                issues.push(EmptyPromptIssue {
                    location: ctx.locate(&segments),
                    path: format!("{}.{}", path, prompt.name()),
                });
            }
        }
    });
    issues
}
