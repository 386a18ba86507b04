//! Phrasebook - hierarchical, culture-aware text resources
//!
//! Phrasebook stores user-facing strings and exception templates in a tree
//! mirroring a code hierarchy, addressed by dot-paths like
//! `Foo.Bar.Baz.greeting`. Lookups resolve for a requested culture with
//! alias and default fallback, and whole trees persist as a compact packed
//! artifact that independently built modules contribute to at startup.
//!
//! ## Module Structure
//!
//! - `path`: dot-path parsing and validation
//! - `locale`: culture tags and the translation (alias) table
//! - `tree`: the namespace/class/method/prompt hierarchy and its root
//! - `except`: localized exception construction via a kind registry
//! - `subst`: positional `$` marker substitution
//! - `codec`: text serialization and the packed binary form
//! - `discovery`: multi-module resource discovery at startup
//! - `config`: configuration file loading
//! - `issues`, `rules`: resource file checks and their results
//! - `cli`: command-line interface layer

pub mod cli;
pub mod codec;
pub mod config;
pub mod discovery;
pub mod error;
pub mod except;
pub mod issues;
pub mod locale;
pub mod path;
pub mod rules;
pub mod subst;
pub mod tree;

// Re-export the types most callers need
pub use crate::error::{Error, Result};
pub use crate::except::{BoxedError, ExceptionKindRegistry};
pub use crate::locale::{LocaleTag, TranslationTable};
pub use crate::tree::Project;
