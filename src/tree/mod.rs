//! The resource tree: node hierarchy, generic containers, and the root
//! project with its query surface.

mod named;
mod node;
mod project;

pub use named::{MergeFrom, Named, NamedSet};
pub use node::{Class, EntrySet, LocalizedEntry, Method, Namespace, Prompt};
pub use project::Project;
