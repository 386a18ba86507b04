//! Undeclared-culture rule.
//!
//! Entries whose culture is not listed in the settings usually mean a typo
//! in the `culture` attribute or a forgotten `<language>` declaration. The
//! rule only runs when the tree declares at least one language.

use crate::issues::UndeclaredCultureIssue;
use crate::rules::{FileContext, for_each_method};
use crate::tree::{EntrySet, Project};

pub fn check_undeclared_cultures(
    project: &Project,
    ctx: &FileContext,
) -> Vec<UndeclaredCultureIssue> {
    if project.settings.languages().is_empty() {
        return Vec::new();
    }

    let mut issues = Vec::new();
    for_each_method(project, |path, method| {
        for prompt in method.prompts() {
            collect(project, ctx, path, prompt.name(), prompt.entries(), &mut issues);
        }
        for declaration in method.exceptions() {
            collect(
                project,
                ctx,
                path,
                declaration.id(),
                declaration.entries(),
                &mut issues,
            );
        }
    });
    issues
}

fn collect(
    project: &Project,
    ctx: &FileContext,
    method_path: &str,
    leaf: &str,
    entries: &EntrySet,
    issues: &mut Vec<UndeclaredCultureIssue>,
) {
    for entry in entries.iter() {
        if project.settings.is_declared(&entry.locale) {
            continue;
        }
        let mut segments: Vec<&str> = method_path.split('.').collect();
        segments.push(leaf);
        segments.push(entry.locale.as_str());
        issues.push(UndeclaredCultureIssue {
            location: ctx.locate(&segments),
            path: format!("{}.{}", method_path, leaf),
            culture: entry.locale.as_str().to_string(),
        });
    }
}
