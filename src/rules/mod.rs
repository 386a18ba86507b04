//! Consistency rules checked over loaded resource files.
//!
//! Each rule is a pure function over a decoded [`Project`] plus the
//! [`FileContext`] used to report positions, and returns its own issue type.
//! `check_all` runs every rule and collects the results into the shared
//! [`Issue`] enum.

mod context;
pub mod dangling_alias;
pub mod empty_prompt;
pub mod missing_default;
pub mod undeclared_culture;
pub mod unknown_kind;

pub use context::FileContext;

use crate::issues::Issue;
use crate::tree::{Method, Namespace, Project};

pub fn check_all(project: &Project, ctx: &FileContext) -> Vec<Issue> {
    let mut issues: Vec<Issue> = Vec::new();
    issues.extend(
        unknown_kind::check_unknown_kinds(project, ctx)
            .into_iter()
            .map(Issue::UnknownKind),
    );
    issues.extend(
        missing_default::check_missing_default_text(project, ctx)
            .into_iter()
            .map(Issue::MissingDefaultText),
    );
    issues.extend(
        undeclared_culture::check_undeclared_cultures(project, ctx)
            .into_iter()
            .map(Issue::UndeclaredCulture),
    );
    issues.extend(
        dangling_alias::check_dangling_aliases(project, ctx)
            .into_iter()
            .map(Issue::DanglingAlias),
    );
    issues.extend(
        empty_prompt::check_empty_prompts(project, ctx)
            .into_iter()
            .map(Issue::EmptyPrompt),
    );
    issues
}

/// Visit every method with its dot-path prefix.
pub(crate) fn for_each_method(project: &Project, mut f: impl FnMut(&str, &Method)) {
    fn walk(prefix: &str, namespace: &Namespace, f: &mut dyn FnMut(&str, &Method)) {
        for child in namespace.namespaces() {
            walk(&format!("{}.{}", prefix, child.name()), child, f);
        }
        for class in namespace.classes() {
            for method in class.methods() {
                f(
                    &format!("{}.{}.{}", prefix, class.name(), method.name()),
                    method,
                );
            }
        }
    }
    for namespace in project.namespaces() {
        walk(namespace.name(), namespace, &mut f);
    }
}
