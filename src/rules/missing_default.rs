//! Default-culture coverage rule.
//!
//! A prompt or exception declaration that has entries but none for the
//! tree's default culture will fall through every resolution step for
//! callers asking in an unknown culture. The rule is skipped entirely when
//! the tree declares no default.

use crate::issues::MissingDefaultTextIssue;
use crate::rules::{FileContext, for_each_method};
use crate::tree::Project;

pub fn check_missing_default_text(
    project: &Project,
    ctx: &FileContext,
) -> Vec<MissingDefaultTextIssue> {
    let Some(default) = project.settings.default_locale() else {
        return Vec::new();
    };

    let mut issues = Vec::new();
    for_each_method(project, |path, method| {
        for prompt in method.prompts() {
            if !prompt.entries().is_empty() && prompt.text(default).is_none() {
                issues.push(issue(ctx, path, prompt.name(), default.as_str()));
            }
        }
        for declaration in method.exceptions() {
            if !declaration.entries().is_empty() && declaration.text(default).is_none() {
                issues.push(issue(ctx, path, declaration.id(), default.as_str()));
            }
        }
    });
    issues
}

fn issue(
    ctx: &FileContext,
    method_path: &str,
    leaf: &str,
    default_culture: &str,
) -> MissingDefaultTextIssue {
    let mut segments: Vec<&str> = method_path.split('.').collect();
    segments.push(leaf);
    MissingDefaultTextIssue {
        location: ctx.locate(&segments),
        path: format!("{}.{}", method_path, leaf),
        default_culture: default_culture.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use crate::codec::decode;
    use crate::except::ExceptionKindRegistry;
    use crate::rules::missing_default::*;

    fn check(source: &str) -> Vec<MissingDefaultTextIssue> {
        let registry = ExceptionKindRegistry::with_builtins();
        let project = decode(source, &registry).unwrap();
        let ctx = FileContext::new("./Demo.res.xml", source);
        check_missing_default_text(&project, &ctx)
    }

    #[test]
    fn test_detects_prompt_without_default_entry() {
        let issues = check(
            "<project name='Demo'>\
             <settings><defaultCulture name='en-CA'/></settings>\
             <namespace name='Foo'><class name='Bar'><method name='Baz'>\
             <prompt id='greeting'><data culture='fr-CA'>bonjour</data></prompt>\
             </method></class></namespace></project>",
        );
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].path, "Foo.Bar.Baz.greeting");
        assert_eq!(issues[0].default_culture, "en-CA");
    }

    #[test]
    fn test_covered_prompt_passes() {
        let issues = check(
            "<project name='Demo'>\
             <settings><defaultCulture name='en-CA'/></settings>\
             <namespace name='Foo'><class name='Bar'><method name='Baz'>\
             <prompt id='greeting'><data culture='en-CA'>hello</data>\
             <data culture='fr-CA'>bonjour</data></prompt>\
             </method></class></namespace></project>",
        );
        assert!(issues.is_empty());
    }

    #[test]
    fn test_skipped_without_default_culture() {
        let issues = check(
            "<project name='Demo'>\
             <namespace name='Foo'><class name='Bar'><method name='Baz'>\
             <prompt id='greeting'><data culture='fr-CA'>bonjour</data></prompt>\
             </method></class></namespace></project>",
        );
        assert!(issues.is_empty());
    }

    #[test]
    fn test_empty_prompt_not_reported_here() {
        // An empty prompt is its own rule
        let issues = check(
            "<project name='Demo'>\
             <settings><defaultCulture name='en-CA'/></settings>\
             <namespace name='Foo'><class name='Bar'><method name='Baz'>\
             <prompt id='greeting'/>\
             </method></class></namespace></project>",
        );
        assert!(issues.is_empty());
    }

    #[test]
    fn test_detects_exception_without_default_entry() {
        let issues = check(
            "<project name='Demo'>\
             <settings><defaultCulture name='en-CA'/></settings>\
             <namespace name='Foo'><class name='Bar'><method name='Baz'>\
             <exception type='InvalidStateError' id='oops'>\
             <data culture='fr-CA'>zut</data></exception>\
             </method></class></namespace></project>",
        );
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].path, "Foo.Bar.Baz.oops");
    }
}
