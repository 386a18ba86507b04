//! Dangling-alias rule.
//!
//! A translation alias whose substitute is not a declared language can never
//! produce text. Runs only when the tree declares languages.

use crate::issues::DanglingAliasIssue;
use crate::rules::FileContext;
use crate::tree::Project;

pub fn check_dangling_aliases(project: &Project, ctx: &FileContext) -> Vec<DanglingAliasIssue> {
    if project.settings.languages().is_empty() {
        return Vec::new();
    }

    project
        .settings
        .aliases()
        .iter()
        .filter(|(_, substitute)| !project.settings.is_declared(substitute))
        .map(|(source, substitute)| DanglingAliasIssue {
            location: ctx.locate(&[source.as_str()]),
            source: source.as_str().to_string(),
            alias: substitute.as_str().to_string(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use crate::codec::decode;
    use crate::except::ExceptionKindRegistry;
    use crate::rules::dangling_alias::*;

    fn check(source: &str) -> Vec<DanglingAliasIssue> {
        let registry = ExceptionKindRegistry::with_builtins();
        let project = decode(source, &registry).unwrap();
        let ctx = FileContext::new("./Demo.res.xml", source);
        check_dangling_aliases(&project, &ctx)
    }

    #[test]
    fn test_detects_dangling_alias() {
        let issues = check(
            "<project name='Demo'><settings><languages count='1'>\
             <language name='en-CA'>English (Canada)</language>\
             <translation name='en-GB' alias='en-US'/>\
             </languages></settings></project>",
        );
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].source, "en-GB");
        assert_eq!(issues[0].alias, "en-US");
    }

    #[test]
    fn test_alias_to_declared_language_passes() {
        let issues = check(
            "<project name='Demo'><settings><languages count='1'>\
             <language name='en-CA'>English (Canada)</language>\
             <translation name='en-GB' alias='en-CA'/>\
             </languages></settings></project>",
        );
        assert!(issues.is_empty());
    }

    #[test]
    fn test_skipped_when_no_languages_declared() {
        let issues = check(
            "<project name='Demo'><settings><languages count='0'>\
             <translation name='en-GB' alias='en-US'/>\
             </languages></settings></project>",
        );
        assert!(issues.is_empty());
    }
}
