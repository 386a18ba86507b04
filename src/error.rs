//! Error taxonomy for the resource engine.
//!
//! Structural errors (bad paths, bad serialized trees) are loud and surface
//! to the caller. Lookup misses are not errors at all: resolution returns a
//! diagnostic placeholder string instead, so display code never has to guard
//! a text lookup with error handling.

use thiserror::Error;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum Error {
    /// A lookup path does not match the dot-path grammar.
    #[error("malformed path '{0}'")]
    MalformedPath(String),

    /// A node name is not a valid identifier.
    #[error("invalid identifier '{0}'")]
    InvalidName(String),

    /// A culture tag does not match the `xx-XX` form.
    #[error("invalid culture tag '{0}'")]
    InvalidLocale(String),

    /// A serialized resource tree violates the element or attribute rules.
    #[error("malformed resource at {line}:{col}: {message}")]
    MalformedResource {
        line: usize,
        col: usize,
        message: String,
    },

    /// An exception declaration names a kind with no registered factory.
    #[error("unknown exception kind '{kind}' declared by '{id}'")]
    UnknownExceptionKind { id: String, kind: String },

    /// A path names a node that does not exist, in a context where a value
    /// is required (building an exception from a missing declaration).
    #[error("unresolved path '{0}'")]
    UnresolvedPath(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl Error {
    pub(crate) fn malformed(line: usize, col: usize, message: impl Into<String>) -> Self {
        Error::MalformedResource {
            line,
            col,
            message: message.into(),
        }
    }
}
