//! Disabled exception declaration detection.
//!
//! Finds declarations whose kind had no registered factory at parse time.
//! These declarations survive loading but cannot construct errors, so they
//! are almost always an authoring mistake or a missing registration.

use crate::issues::UnknownKindIssue;
use crate::rules::{FileContext, for_each_method};
use crate::tree::Project;

pub fn check_unknown_kinds(project: &Project, ctx: &FileContext) -> Vec<UnknownKindIssue> {
    let mut issues = Vec::new();
    for_each_method(project, |path, method| {
        for declaration in method.exceptions() {
            if declaration.is_usable() {
                continue;
            }
            let mut segments: Vec<&str> = path.split('.').collect();
            segments.push(declaration.id());
            issues.push(UnknownKindIssue {
                location: ctx.locate(&segments),
                path: format!("{}.{}", path, declaration.id()),
                kind: declaration.kind().to_string(),
            });
        }
    });
    issues
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use crate::codec::decode;
    use crate::except::ExceptionKindRegistry;
    use crate::rules::unknown_kind::*;

    #[test]
    fn test_detects_disabled_declaration() {
        let source = "\
<project name='Demo'>
  <namespace name='Foo'>
    <class name='Bar'>
      <method name='Baz'>
        <exception type='NoSuchError' id='oops'>
          <data culture='en-CA'>boom</data>
        </exception>
      </method>
    </class>
  </namespace>
</project>
";
        let registry = ExceptionKindRegistry::with_builtins();
        let project = decode(source, &registry).unwrap();
        let ctx = FileContext::new("./Demo.res.xml", source);

        let issues = check_unknown_kinds(&project, &ctx);
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].path, "Foo.Bar.Baz.oops");
        assert_eq!(issues[0].kind, "NoSuchError");
        assert_eq!(issues[0].location.line, 5);
    }

    #[test]
    fn test_registered_kind_passes() {
        let source = "<project name='Demo'><namespace name='Foo'><class name='Bar'>\
            <method name='Baz'><exception type='InvalidStateError' id='oops'/>\
            </method></class></namespace></project>";
        let registry = ExceptionKindRegistry::with_builtins();
        let project = decode(source, &registry).unwrap();
        let ctx = FileContext::new("./Demo.res.xml", source);

        assert!(check_unknown_kinds(&project, &ctx).is_empty());
    }
}
