//! The resource tree node hierarchy.
//!
//! Four node kinds mirror a code hierarchy: [`Namespace`] (recursive, holds
//! child namespaces and classes), [`Class`] (holds methods), [`Method`]
//! (holds prompts and exception declarations) and [`Prompt`] (holds one text
//! per culture). Children are exclusively owned by their parent; traversal
//! is always top-down.

use crate::error::{Error, Result};
use crate::except::ExceptionDeclaration;
use crate::locale::{LocaleTag, TranslationTable};
use crate::path;
use crate::tree::named::{MergeFrom, Named, NamedSet};

/// One localized payload: a culture tag and its decoded text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalizedEntry {
    pub locale: LocaleTag,
    pub text: String,
}

/// Per-culture entries of a prompt or exception declaration.
///
/// Keyed by culture tag; setting a colliding culture replaces the prior
/// entry. This is the only level where last-write-wins applies.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EntrySet {
    entries: Vec<LocalizedEntry>,
}

impl EntrySet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, locale: LocaleTag, text: impl Into<String>) {
        let text = text.into();
        match self.entries.iter_mut().find(|e| e.locale == locale) {
            Some(existing) => existing.text = text,
            None => self.entries.push(LocalizedEntry { locale, text }),
        }
    }

    pub fn get(&self, locale: &LocaleTag) -> Option<&str> {
        self.entries
            .iter()
            .find(|e| &e.locale == locale)
            .map(|e| e.text.as_str())
    }

    /// Select a text for the requested culture: exact match, then the alias
    /// substitute, then the default culture. `None` means no text anywhere.
    pub fn resolve(&self, table: &TranslationTable, requested: Option<&LocaleTag>) -> Option<&str> {
        if let Some(tag) = requested {
            if let Some(text) = self.get(tag) {
                return Some(text);
            }
            if let Some(substitute) = table.alias_for(tag) {
                if let Some(text) = self.get(substitute) {
                    return Some(text);
                }
            }
        }
        table.default_locale().and_then(|default| self.get(default))
    }

    pub fn iter(&self) -> std::slice::Iter<'_, LocalizedEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn merge_from(&mut self, incoming: EntrySet) {
        for entry in incoming.entries {
            self.set(entry.locale, entry.text);
        }
    }
}

/// A leaf container holding one logical message in several cultures.
#[derive(Debug, Clone, PartialEq)]
pub struct Prompt {
    name: String,
    pub comment: Option<String>,
    entries: EntrySet,
}

impl Prompt {
    /// Prompt names are identifiers or short numeric ids.
    pub fn new(name: impl Into<String>) -> Result<Self> {
        let name = name.into();
        if !path::is_valid_segment(&name) {
            return Err(Error::InvalidName(name));
        }
        Ok(Self {
            name,
            comment: None,
            entries: EntrySet::new(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_text(&mut self, locale: LocaleTag, text: impl Into<String>) {
        self.entries.set(locale, text);
    }

    pub fn text(&self, locale: &LocaleTag) -> Option<&str> {
        self.entries.get(locale)
    }

    pub fn resolve_text(
        &self,
        table: &TranslationTable,
        requested: Option<&LocaleTag>,
    ) -> Option<&str> {
        self.entries.resolve(table, requested)
    }

    pub fn entries(&self) -> &EntrySet {
        &self.entries
    }
}

impl Named for Prompt {
    fn name(&self) -> &str {
        &self.name
    }
}

impl MergeFrom for Prompt {
    fn merge_from(&mut self, incoming: Self) {
        self.entries.merge_from(incoming.entries);
        if self.comment.is_none() {
            self.comment = incoming.comment;
        }
    }
}

/// A method: prompts plus exception declarations.
#[derive(Debug, Clone, PartialEq)]
pub struct Method {
    name: String,
    pub comment: Option<String>,
    prompts: NamedSet<Prompt>,
    exceptions: NamedSet<ExceptionDeclaration>,
}

impl Method {
    pub fn new(name: impl Into<String>) -> Result<Self> {
        let name = name.into();
        if !path::is_valid_identifier(&name) {
            return Err(Error::InvalidName(name));
        }
        Ok(Self {
            name,
            comment: None,
            prompts: NamedSet::new(),
            exceptions: NamedSet::new(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn add_prompt(&mut self, prompt: Prompt) {
        self.prompts.insert(prompt);
    }

    pub fn prompt(&self, name: &str) -> Option<&Prompt> {
        self.prompts.get(name)
    }

    pub fn prompt_mut(&mut self, name: &str) -> Option<&mut Prompt> {
        self.prompts.get_mut(name)
    }

    pub fn prompts(&self) -> &NamedSet<Prompt> {
        &self.prompts
    }

    pub fn add_exception(&mut self, declaration: ExceptionDeclaration) {
        self.exceptions.insert(declaration);
    }

    pub fn exception(&self, id: &str) -> Option<&ExceptionDeclaration> {
        self.exceptions.get(id)
    }

    pub fn exceptions(&self) -> &NamedSet<ExceptionDeclaration> {
        &self.exceptions
    }
}

impl Named for Method {
    fn name(&self) -> &str {
        &self.name
    }
}

impl MergeFrom for Method {
    fn merge_from(&mut self, incoming: Self) {
        self.prompts.merge_from(incoming.prompts);
        self.exceptions.merge_from(incoming.exceptions);
        if self.comment.is_none() {
            self.comment = incoming.comment;
        }
    }
}

/// A class: a named collection of methods.
#[derive(Debug, Clone, PartialEq)]
pub struct Class {
    name: String,
    pub comment: Option<String>,
    methods: NamedSet<Method>,
}

impl Class {
    pub fn new(name: impl Into<String>) -> Result<Self> {
        let name = name.into();
        if !path::is_valid_identifier(&name) {
            return Err(Error::InvalidName(name));
        }
        Ok(Self {
            name,
            comment: None,
            methods: NamedSet::new(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn add_method(&mut self, method: Method) {
        self.methods.insert(method);
    }

    pub fn method(&self, name: &str) -> Option<&Method> {
        self.methods.get(name)
    }

    pub fn method_mut(&mut self, name: &str) -> Option<&mut Method> {
        self.methods.get_mut(name)
    }

    pub fn methods(&self) -> &NamedSet<Method> {
        &self.methods
    }
}

impl Named for Class {
    fn name(&self) -> &str {
        &self.name
    }
}

impl MergeFrom for Class {
    fn merge_from(&mut self, incoming: Self) {
        self.methods.merge_from(incoming.methods);
        if self.comment.is_none() {
            self.comment = incoming.comment;
        }
    }
}

/// A namespace: child namespaces plus classes, both keyed by name.
#[derive(Debug, Clone, PartialEq)]
pub struct Namespace {
    name: String,
    pub comment: Option<String>,
    namespaces: NamedSet<Namespace>,
    classes: NamedSet<Class>,
}

impl Namespace {
    pub fn new(name: impl Into<String>) -> Result<Self> {
        let name = name.into();
        if !path::is_valid_identifier(&name) {
            return Err(Error::InvalidName(name));
        }
        Ok(Self {
            name,
            comment: None,
            namespaces: NamedSet::new(),
            classes: NamedSet::new(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn add_namespace(&mut self, namespace: Namespace) {
        self.namespaces.insert(namespace);
    }

    pub fn add_class(&mut self, class: Class) {
        self.classes.insert(class);
    }

    pub fn namespace(&self, name: &str) -> Option<&Namespace> {
        self.namespaces.get(name)
    }

    /// Explicit class accessor. A class shadowed by a same-named sibling
    /// namespace is only reachable through here.
    pub fn class(&self, name: &str) -> Option<&Class> {
        self.classes.get(name)
    }

    pub fn class_mut(&mut self, name: &str) -> Option<&mut Class> {
        self.classes.get_mut(name)
    }

    pub fn namespaces(&self) -> &NamedSet<Namespace> {
        &self.namespaces
    }

    pub fn classes(&self) -> &NamedSet<Class> {
        &self.classes
    }

    /// Descend the remaining path segments to a method. At every level a
    /// child namespace shadows a same-named class.
    pub(crate) fn find_method(&self, segments: &[String]) -> Option<&Method> {
        let (head, rest) = segments.split_first()?;
        if let Some(child) = self.namespaces.get(head) {
            return child.find_method(rest);
        }
        let class = self.classes.get(head)?;
        match rest {
            [method] => class.method(method),
            _ => None,
        }
    }

    /// Nodes in this subtree (namespaces, classes, methods, prompts).
    pub fn node_count(&self) -> usize {
        let namespaces: usize = self.namespaces.iter().map(Namespace::node_count).sum();
        let classes: usize = self
            .classes
            .iter()
            .map(|c| {
                1 + c
                    .methods()
                    .iter()
                    .map(|m| 1 + m.prompts().len())
                    .sum::<usize>()
            })
            .sum();
        1 + namespaces + classes
    }
}

impl Named for Namespace {
    fn name(&self) -> &str {
        &self.name
    }
}

impl MergeFrom for Namespace {
    fn merge_from(&mut self, incoming: Self) {
        self.namespaces.merge_from(incoming.namespaces);
        self.classes.merge_from(incoming.classes);
        if self.comment.is_none() {
            self.comment = incoming.comment;
        }
    }
}
