//! End-to-end tests over the public API: build a tree, serialize it, pack
//! it, reload it, and resolve against it.

use phrasebook::codec::{decode, encode, pack, unpack};
use phrasebook::except::InvalidStateError;
use phrasebook::locale::LocaleTag;
use phrasebook::tree::{Class, Method, Namespace, Prompt};
use phrasebook::{ExceptionKindRegistry, Project};
use pretty_assertions::assert_eq;

fn tag(s: &str) -> LocaleTag {
    LocaleTag::parse(s).unwrap()
}

fn registry() -> ExceptionKindRegistry {
    ExceptionKindRegistry::with_builtins()
}

/// Root default en-CA; Foo.Bar.Baz with prompt `greeting` and exception
/// `badState`, plus a French entry and an alias for en-GB.
fn sample_project() -> Project {
    let registry = registry();
    let mut project = Project::new("Demo").unwrap();
    project.settings.set_default(tag("en-CA"));
    project
        .settings
        .declare_language(tag("en-CA"), "English (Canada)");
    project
        .settings
        .declare_language(tag("fr-CA"), "French (Canada)");
    project.settings.set_alias(tag("en-GB"), tag("en-CA"));

    let mut method = Method::new("Baz").unwrap();

    let mut prompt = Prompt::new("greeting").unwrap();
    prompt.set_text(tag("en-CA"), "Hello $1");
    prompt.set_text(tag("fr-CA"), "Bonjour $1");
    method.add_prompt(prompt);

    let mut declaration = phrasebook::except::ExceptionDeclaration::new(
        "badState",
        "InvalidStateError",
        &registry,
    )
    .unwrap();
    declaration.set_text(tag("en-CA"), "Bad state: $1");
    method.add_exception(declaration);

    let mut class = Class::new("Bar").unwrap();
    class.add_method(method);
    let mut namespace = Namespace::new("Foo").unwrap();
    namespace.add_class(class);
    project.add_namespace(namespace);
    project
}

#[test]
fn resolve_with_values_substitutes_positionally() {
    let project = sample_project();
    let text = project
        .resolve_with_values("Foo.Bar.Baz.greeting", &["World"], None)
        .unwrap();
    assert_eq!(text, "Hello World");
}

#[test]
fn resolve_prefers_exact_culture() {
    let project = sample_project();
    let text = project
        .resolve("Foo.Bar.Baz.greeting", Some(&tag("fr-CA")))
        .unwrap();
    assert_eq!(text, "Bonjour $1");
}

#[test]
fn resolve_falls_back_through_alias() {
    let project = sample_project();
    let text = project
        .resolve("Foo.Bar.Baz.greeting", Some(&tag("en-GB")))
        .unwrap();
    assert_eq!(text, "Hello $1");
}

#[test]
fn resolve_miss_embeds_path_and_culture() {
    let project = sample_project();
    let text = project
        .resolve("Foo.Bar.Baz.unknown", Some(&tag("de-DE")))
        .unwrap();
    assert!(text.contains("Foo.Bar.Baz.unknown"));
    assert!(text.contains("de-DE"));
}

#[test]
fn build_exception_constructs_declared_kind() {
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
fn encode_decode_round_trip_is_structural_identity() {
    let project = sample_project();
    let text = encode(&project);
    let again = decode(&text, &registry()).unwrap();
    assert_eq!(project, again);
}

#[test]
fn pack_unpack_round_trip_preserves_reserved_characters() {
    let mut project = sample_project();
    let mut method = Method::new("Edge").unwrap();
    let mut prompt = Prompt::new("tricky").unwrap();
    prompt.set_text(tag("en-CA"), "a & b < c");
    method.add_prompt(prompt);
    let mut class = Class::new("Cases").unwrap();
    class.add_method(method);
    let mut namespace = Namespace::new("Extra").unwrap();
    namespace.add_class(class);
    project.add_namespace(namespace);

    let bytes = pack(&project).unwrap();
    let again = unpack(&bytes, &registry()).unwrap();
    assert_eq!(project, again);

    let text = again.resolve("Extra.Cases.Edge.tricky", None).unwrap();
    assert_eq!(text, "a & b < c");
}

#[test]
fn merge_disjoint_trees_adds_node_counts() {
    let mut first = Project::new("First").unwrap();
    let mut ns = Namespace::new("Alpha").unwrap();
    let mut class = Class::new("Widget").unwrap();
    class.add_method(Method::new("Render").unwrap());
    ns.add_class(class);
    first.add_namespace(ns);

    let mut second = Project::new("Second").unwrap();
    let mut ns = Namespace::new("Beta").unwrap();
    let mut class = Class::new("Gadget").unwrap();
    class.add_method(Method::new("Render").unwrap());
    ns.add_class(class);
    second.add_namespace(ns);

    let expected = first.node_count() + second.node_count();
    first.merge_from(second);
    assert_eq!(first.node_count(), expected);
}

#[test]
fn merge_same_method_keeps_prompts_from_both_sides() {
    let mut first = sample_project();

    let mut second = Project::new("Second").unwrap();
    let mut method = Method::new("Baz").unwrap();
    let mut prompt = Prompt::new("farewell").unwrap();
    prompt.set_text(tag("en-CA"), "Goodbye $1");
    method.add_prompt(prompt);
    let mut class = Class::new("Bar").unwrap();
    class.add_method(method);
    let mut namespace = Namespace::new("Foo").unwrap();
    namespace.add_class(class);
    second.add_namespace(namespace);

    first.merge_from(second);
    assert_eq!(
        first
            .resolve_with_values("Foo.Bar.Baz.farewell", &["friend"], None)
            .unwrap(),
        "Goodbye friend"
    );
    assert_eq!(
        first
            .resolve_with_values("Foo.Bar.Baz.greeting", &["friend"], None)
            .unwrap(),
        "Hello friend"
    );
}

#[test]
fn merge_unions_exception_entries_by_id() {
    let local_registry = registry();
    let mut first = sample_project();

    let mut second = Project::new("Second").unwrap();
    let mut method = Method::new("Baz").unwrap();
    let mut declaration = phrasebook::except::ExceptionDeclaration::new(
        "badState",
        "InvalidStateError",
        &local_registry,
    )
    .unwrap();
    declaration.set_text(tag("fr-CA"), "Mauvais etat: $1");
    method.add_exception(declaration);
    let mut class = Class::new("Bar").unwrap();
    class.add_method(method);
    let mut namespace = Namespace::new("Foo").unwrap();
    namespace.add_class(class);
    second.add_namespace(namespace);

    first.merge_from(second);
    let declaration = first
        .namespace("Foo")
        .unwrap()
        .class("Bar")
        .unwrap()
        .method("Baz")
        .unwrap()
        .exception("badState")
        .unwrap();
    assert_eq!(declaration.text(&tag("en-CA")), Some("Bad state: $1"));
    assert_eq!(declaration.text(&tag("fr-CA")), Some("Mauvais etat: $1"));
}

#[test]
fn decode_survives_unknown_elements_from_newer_writers() {
    let source = "<project name='Demo'>\
        <metrics total='3'/>\
        <settings><defaultCulture name='en-CA'/></settings>\
        <namespace name='Foo'>\
          <annotations><author>someone</author></annotations>\
          <class name='Bar'><method name='Baz'>\
            <prompt id='greeting'><data culture='en-CA'>hi</data></prompt>\
          </method></class>\
        </namespace></project>";
    let project = decode(source, &registry()).unwrap();
    assert_eq!(project.resolve("Foo.Bar.Baz.greeting", None).unwrap(), "hi");
}
