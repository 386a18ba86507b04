//! Localized exception construction.
//!
//! An [`ExceptionDeclaration`] binds a named error kind to a per-culture set
//! of message templates. Kinds are resolved through an explicit
//! [`ExceptionKindRegistry`] populated by each module that defines error
//! types, so no runtime type scanning is involved. Resolution happens once,
//! when the declaration is constructed: an unknown kind disables that
//! declaration (fail-closed) without aborting the surrounding tree parse.

use std::collections::HashMap;

use thiserror::Error;
use tracing::warn;

use crate::error::{Error as ResourceError, Result};
use crate::locale::{LocaleTag, TranslationTable};
use crate::path;
use crate::subst::substitute;
use crate::tree::{EntrySet, MergeFrom, Named};

/// The error values the factory produces.
pub type BoxedError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Constructs one error kind from a message and an optional wrapped cause.
pub type ExceptionFactory = fn(String, Option<BoxedError>) -> BoxedError;

// ============================================================
// Built-in error kinds
// ============================================================

/// An operation was attempted in a state that does not permit it.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct InvalidStateError {
    pub message: String,
    #[source]
    pub cause: Option<BoxedError>,
}

/// A supplied value was outside the accepted range or form.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct InvalidParameterError {
    pub message: String,
    #[source]
    pub cause: Option<BoxedError>,
}

/// An operation started but could not be completed.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct OperationFailedError {
    pub message: String,
    #[source]
    pub cause: Option<BoxedError>,
}

fn build_invalid_state(message: String, cause: Option<BoxedError>) -> BoxedError {
    Box::new(InvalidStateError { message, cause })
}

fn build_invalid_parameter(message: String, cause: Option<BoxedError>) -> BoxedError {
    Box::new(InvalidParameterError { message, cause })
}

fn build_operation_failed(message: String, cause: Option<BoxedError>) -> BoxedError {
    Box::new(OperationFailedError { message, cause })
}

// ============================================================
// Registry
// ============================================================

/// Maps declared kind names to factory functions.
#[derive(Debug, Clone, Default)]
pub struct ExceptionKindRegistry {
    factories: HashMap<String, ExceptionFactory>,
}

impl ExceptionKindRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry pre-populated with the crate's built-in kinds.
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        registry.register("InvalidStateError", build_invalid_state);
        registry.register("InvalidParameterError", build_invalid_parameter);
        registry.register("OperationFailedError", build_operation_failed);
        registry
    }

    /// Register a kind, replacing any prior factory of the same name.
    pub fn register(&mut self, kind: impl Into<String>, factory: ExceptionFactory) {
        self.factories.insert(kind.into(), factory);
    }

    pub fn get(&self, kind: &str) -> Option<ExceptionFactory> {
        self.factories.get(kind).copied()
    }

    pub fn contains(&self, kind: &str) -> bool {
        self.factories.contains_key(kind)
    }
}

// ============================================================
// Declaration
// ============================================================

/// A named, per-culture template set bound to a declared error kind.
#[derive(Debug, Clone)]
pub struct ExceptionDeclaration {
    id: String,
    kind: String,
    factory: Option<ExceptionFactory>,
    pub comment: Option<String>,
    entries: EntrySet,
}

impl ExceptionDeclaration {
    /// Resolve `kind` against the registry. An unknown kind produces a
    /// disabled declaration and a warning rather than an error, so one bad
    /// declaration cannot abort a whole tree parse.
    pub fn new(
        id: impl Into<String>,
        kind: impl Into<String>,
        registry: &ExceptionKindRegistry,
    ) -> Result<Self> {
        let id = id.into();
        if !path::is_valid_segment(&id) {
            return Err(ResourceError::InvalidName(id));
        }
        let kind = kind.into();
        let factory = registry.get(&kind);
        if factory.is_none() {
            warn!(id = %id, kind = %kind, "unknown exception kind; declaration disabled");
        }
        Ok(Self {
            id,
            kind,
            factory,
            comment: None,
            entries: EntrySet::new(),
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn kind(&self) -> &str {
        &self.kind
    }

    /// False when the declared kind had no registered factory.
    pub fn is_usable(&self) -> bool {
        self.factory.is_some()
    }

    pub fn set_text(&mut self, locale: LocaleTag, text: impl Into<String>) {
        self.entries.set(locale, text);
    }

    pub fn text(&self, locale: &LocaleTag) -> Option<&str> {
        self.entries.get(locale)
    }

    pub fn entries(&self) -> &EntrySet {
        &self.entries
    }

    /// Construct an error value of the declared kind.
    ///
    /// The message template is selected with the usual culture fallback and
    /// `$` markers are substituted with `values`. A missing template still
    /// constructs the declared kind, with a synthesized message naming this
    /// declaration and the requested culture.
    pub fn build(
        &self,
        table: &TranslationTable,
        locale: Option<&LocaleTag>,
        values: &[&str],
        cause: Option<BoxedError>,
    ) -> Result<BoxedError> {
        let factory = self
            .factory
            .ok_or_else(|| ResourceError::UnknownExceptionKind {
                id: self.id.clone(),
                kind: self.kind.clone(),
            })?;

        let message = match self.entries.resolve(table, locale) {
            Some(template) => substitute(template, values),
            None => {
                let culture = locale
                    .or_else(|| table.default_locale())
                    .map(|t| t.as_str())
                    .unwrap_or("??");
                format!("[missing exception text: {}/{}]", self.id, culture)
            }
        };

        Ok(factory(message, cause))
    }
}

impl PartialEq for ExceptionDeclaration {
    fn eq(&self, other: &Self) -> bool {
        // Factories are derived from the kind name; comparing them would
        // compare function addresses.
        self.id == other.id
            && self.kind == other.kind
            && self.comment == other.comment
            && self.entries == other.entries
    }
}

impl Named for ExceptionDeclaration {
    fn name(&self) -> &str {
        &self.id
    }
}

impl MergeFrom for ExceptionDeclaration {
    fn merge_from(&mut self, incoming: Self) {
        self.entries.merge_from(incoming.entries);
        if self.comment.is_none() {
            self.comment = incoming.comment;
        }
        // A disabled declaration adopts a usable incoming kind
        if self.factory.is_none() && incoming.factory.is_some() {
            self.kind = incoming.kind;
            self.factory = incoming.factory;
        }
    }
}
