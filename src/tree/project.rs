//! The root of a resource tree and its query surface.
//!
//! A [`Project`] is the unit of load and save: a name, a translation table
//! and a set of top-level namespaces. Lookup misses never fail; they come
//! back as bracketed diagnostic strings so display code can render them
//! without error handling. Only a malformed path is an error.

use crate::error::{Error, Result};
use crate::except::BoxedError;
use crate::locale::{LocaleTag, TranslationTable};
use crate::path::PathExpression;
use crate::subst::substitute;
use crate::tree::named::NamedSet;
use crate::tree::node::{Method, Namespace, Prompt};

#[derive(Debug, Clone, PartialEq)]
pub struct Project {
    name: String,
    pub settings: TranslationTable,
    namespaces: NamedSet<Namespace>,
}

impl Project {
    pub fn new(name: impl Into<String>) -> Result<Self> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(Error::InvalidName(name));
        }
        Ok(Self {
            name,
            settings: TranslationTable::new(),
            namespaces: NamedSet::new(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn add_namespace(&mut self, namespace: Namespace) {
        self.namespaces.insert(namespace);
    }

    pub fn namespace(&self, name: &str) -> Option<&Namespace> {
        self.namespaces.get(name)
    }

    pub fn namespaces(&self) -> &NamedSet<Namespace> {
        &self.namespaces
    }

    /// Nodes in the whole tree (namespaces, classes, methods, prompts).
    pub fn node_count(&self) -> usize {
        self.namespaces.iter().map(Namespace::node_count).sum()
    }

    /// Import another tree. Same-named nodes merge recursively; the
    /// translation tables are unioned with incoming entries winning.
    pub fn merge_from(&mut self, incoming: Project) {
        self.settings.merge_from(incoming.settings);
        self.namespaces.merge_from(incoming.namespaces);
    }

    fn find_method(&self, segments: &[String]) -> Option<&Method> {
        let (head, rest) = segments.split_first()?;
        self.namespaces.get(head)?.find_method(rest)
    }

    fn find_prompt(&self, segments: &[String]) -> Option<&Prompt> {
        let (last, method_path) = segments.split_last()?;
        self.find_method(method_path)?.prompt(last)
    }

    fn missing_text(&self, path: &str, locale: Option<&LocaleTag>) -> String {
        let culture = locale
            .or_else(|| self.settings.default_locale())
            .map(|t| t.as_str())
            .unwrap_or("??");
        format!("[missing text: {}/{}]", path, culture)
    }

    /// Resolve a prompt path to its text for the requested culture.
    ///
    /// Fallback order: exact culture, alias substitute, default culture,
    /// then a diagnostic placeholder embedding the path and culture.
    pub fn resolve(&self, path: &str, locale: Option<&LocaleTag>) -> Result<String> {
        let expr = PathExpression::parse(path)?;
        let text = self
            .find_prompt(expr.segments())
            .and_then(|prompt| prompt.resolve_text(&self.settings, locale));
        match text {
            Some(text) => Ok(text.to_string()),
            None => Ok(self.missing_text(path, locale)),
        }
    }

    /// Resolve a prompt and substitute its positional `$` markers.
    pub fn resolve_with_values(
        &self,
        path: &str,
        values: &[&str],
        locale: Option<&LocaleTag>,
    ) -> Result<String> {
        let text = self.resolve(path, locale)?;
        Ok(substitute(&text, values))
    }

    /// Construct a localized error value from an exception declaration.
    ///
    /// Unlike prompt resolution this requires the declaration to exist;
    /// there is no error kind to fall back to otherwise.
    pub fn build_exception(
        &self,
        path: &str,
        locale: Option<&LocaleTag>,
        values: &[&str],
        cause: Option<BoxedError>,
    ) -> Result<BoxedError> {
        let expr = PathExpression::parse(path)?;
        let (id, method_path) = expr
            .segments()
            .split_last()
            .ok_or_else(|| Error::UnresolvedPath(path.to_string()))?;
        let declaration = self
            .find_method(method_path)
            .and_then(|method| method.exception(id))
            .ok_or_else(|| Error::UnresolvedPath(path.to_string()))?;
        declaration.build(&self.settings, locale, values, cause)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use crate::error::Error;
    use crate::except::{ExceptionDeclaration, ExceptionKindRegistry, InvalidStateError};
    use crate::locale::LocaleTag;
    use crate::tree::node::{Class, Method, Namespace, Prompt};
    use crate::tree::project::*;

    fn tag(s: &str) -> LocaleTag {
        LocaleTag::parse(s).unwrap()
    }

    /// Foo.Bar.Baz with prompt `greeting` ("Hello $1" in en-CA) and
    /// exception `badState` (InvalidStateError, "Bad state: $1" in en-CA).
    fn sample_project() -> Project {
        let registry = ExceptionKindRegistry::with_builtins();
        let mut project = Project::new("Demo").unwrap();
        project.settings.set_default(tag("en-CA"));
        project
            .settings
            .declare_language(tag("en-CA"), "English (Canada)");

        let mut method = Method::new("Baz").unwrap();
        let mut prompt = Prompt::new("greeting").unwrap();
        prompt.set_text(tag("en-CA"), "Hello $1");
        method.add_prompt(prompt);

        let mut decl = ExceptionDeclaration::new("badState", "InvalidStateError", &registry)
            .unwrap();
        decl.set_text(tag("en-CA"), "Bad state: $1");
        method.add_exception(decl);

        let mut class = Class::new("Bar").unwrap();
        class.add_method(method);
        let mut namespace = Namespace::new("Foo").unwrap();
        namespace.add_class(class);
        project.add_namespace(namespace);
        project
    }

    #[test]
    fn test_resolve_exact() {
        let project = sample_project();
        let text = project
            .resolve("Foo.Bar.Baz.greeting", Some(&tag("en-CA")))
            .unwrap();
        assert_eq!(text, "Hello $1");
    }

    #[test]
    fn test_resolve_unspecified_culture_uses_default() {
        let project = sample_project();
        let text = project.resolve("Foo.Bar.Baz.greeting", None).unwrap();
        assert_eq!(text, "Hello $1");
    }

    #[test]
    fn test_resolve_via_alias() {
        let mut project = sample_project();
        project.settings.set_alias(tag("en-GB"), tag("en-CA"));
        let text = project
            .resolve("Foo.Bar.Baz.greeting", Some(&tag("en-GB")))
            .unwrap();
        assert_eq!(text, "Hello $1");
    }

    #[test]
    fn test_resolve_with_values() {
        let project = sample_project();
        let text = project
            .resolve_with_values("Foo.Bar.Baz.greeting", &["World"], None)
            .unwrap();
        assert_eq!(text, "Hello World");
    }

    #[test]
    fn test_resolve_miss_returns_diagnostic() {
        let project = sample_project();
        let text = project
            .resolve("Foo.Bar.Baz.nothing", Some(&tag("fr-FR")))
            .unwrap();
        assert!(text.contains("Foo.Bar.Baz.nothing"));
        assert!(text.contains("fr-FR"));
    }

    #[test]
    fn test_resolve_missing_culture_returns_diagnostic() {
        let mut project = sample_project();
        project.settings = crate::locale::TranslationTable::new();
        let text = project
            .resolve("Foo.Bar.Baz.greeting", Some(&tag("fr-FR")))
            .unwrap();
        assert!(text.contains("Foo.Bar.Baz.greeting"));
        assert!(text.contains("fr-FR"));
    }

    #[test]
    fn test_resolve_malformed_path_is_loud() {
        let project = sample_project();
        assert!(project.resolve("Foo..greeting", None).is_err());
        assert!(project.resolve("", None).is_err());
    }

    #[test]
    fn test_resolve_single_segment_path() {
        let project = sample_project();
        // Valid path, nothing at that address
        let text = project.resolve("Foo", None).unwrap();
        assert!(text.contains("Foo"));
    }

    #[test]
    fn test_build_exception() {
        let project = sample_project();
        let err = project
            .build_exception(
                "Foo.Bar.Baz.badState",
                Some(&tag("en-CA")),
                &["disk full"],
                None,
            )
            .unwrap();
        let state = err.downcast_ref::<InvalidStateError>().unwrap();
        assert_eq!(state.message, "Bad state: disk full");
    }

    #[test]
    fn test_build_exception_missing_declaration() {
        let project = sample_project();
        let result = project.build_exception("Foo.Bar.Baz.nothing", None, &[], None);
        assert!(matches!(result, Err(Error::UnresolvedPath(_))));
    }

    #[test]
    fn test_merge_disjoint_namespace_counts_add() {
        let mut t1 = Project::new("One").unwrap();
        let mut ns1 = Namespace::new("Alpha").unwrap();
        let mut c1 = Class::new("ClassA").unwrap();
        c1.add_method(Method::new("MethodA").unwrap());
        ns1.add_class(c1);
        t1.add_namespace(ns1);

        let mut t2 = Project::new("Two").unwrap();
        let mut ns2 = Namespace::new("Beta").unwrap();
        let mut c2 = Class::new("ClassB").unwrap();
        c2.add_method(Method::new("MethodB").unwrap());
        ns2.add_class(c2);
        t2.add_namespace(ns2);

        let expected = t1.node_count() + t2.node_count();
        t1.merge_from(t2);
        assert_eq!(t1.node_count(), expected);
    }

    #[test]
    fn test_merge_shared_path_disjoint_prompts() {
        let mut t1 = sample_project();

        let mut t2 = Project::new("Other").unwrap();
        let mut method = Method::new("Baz").unwrap();
        let mut prompt = Prompt::new("farewell").unwrap();
        prompt.set_text(tag("en-CA"), "Goodbye");
        method.add_prompt(prompt);
        let mut class = Class::new("Bar").unwrap();
        class.add_method(method);
        let mut namespace = Namespace::new("Foo").unwrap();
        namespace.add_class(class);
        t2.add_namespace(namespace);

        t1.merge_from(t2);
        let method = t1
            .namespace("Foo")
            .unwrap()
            .class("Bar")
            .unwrap()
            .method("Baz")
            .unwrap();
        assert!(method.prompt("greeting").is_some());
        assert!(method.prompt("farewell").is_some());
    }

    #[test]
    fn test_merge_later_module_overrides_culture() {
        let mut t1 = sample_project();

        let mut t2 = Project::new("Override").unwrap();
        let mut method = Method::new("Baz").unwrap();
        let mut prompt = Prompt::new("greeting").unwrap();
        prompt.set_text(tag("en-CA"), "Hi $1");
        method.add_prompt(prompt);
        let mut class = Class::new("Bar").unwrap();
        class.add_method(method);
        let mut namespace = Namespace::new("Foo").unwrap();
        namespace.add_class(class);
        t2.add_namespace(namespace);

        t1.merge_from(t2);
        let text = t1.resolve("Foo.Bar.Baz.greeting", None).unwrap();
        assert_eq!(text, "Hi $1");
    }

    #[test]
    fn test_project_name_must_not_be_blank() {
        assert!(Project::new("").is_err());
        assert!(Project::new("   ").is_err());
    }
}
