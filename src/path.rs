//! Dot-path addressing for the resource tree.
//!
//! A path is a `.`-joined sequence of identifier segments mirroring a code
//! hierarchy: `namespace.namespace.class.method.promptId`. Paths are parsed
//! on every lookup and never stored inside the tree.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

use crate::error::{Error, Result};

/// An identifier segment: starts with a letter, ends with a letter or digit.
/// Prompt ids may instead be a short (1-2 digit) number.
static SEGMENT_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?:[A-Za-z]\w*[A-Za-z0-9]|\d{1,2})$").unwrap());

static IDENTIFIER_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z]\w*[A-Za-z0-9]$").unwrap());

/// Returns true if `s` is a valid path segment (identifier or numeric id).
pub fn is_valid_segment(s: &str) -> bool {
    SEGMENT_REGEX.is_match(s)
}

/// Returns true if `s` is a valid node identifier (numeric ids excluded).
pub fn is_valid_identifier(s: &str) -> bool {
    IDENTIFIER_REGEX.is_match(s)
}

/// An immutable, validated sequence of path segments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathExpression {
    segments: Vec<String>,
}

impl PathExpression {
    /// Parse a dot-path. Accepts a single bare identifier or a fully
    /// dot-qualified path of two or more segments.
    pub fn parse(raw: &str) -> Result<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(Error::MalformedPath(raw.to_string()));
        }

        let segments: Vec<String> = trimmed.split('.').map(str::to_string).collect();
        if !segments.iter().all(|s| is_valid_segment(s)) {
            return Err(Error::MalformedPath(raw.to_string()));
        }

        Ok(Self { segments })
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Split into the first segment and the dot-joined remainder.
    /// The remainder is empty for a single-segment path.
    pub fn head_tail(&self) -> (&str, String) {
        let head = self.segments[0].as_str();
        let tail = self.segments[1..].join(".");
        (head, tail)
    }

    /// The final segment.
    pub fn last(&self) -> &str {
        self.segments
            .last()
            .expect("a parsed path has at least one segment")
    }
}

impl fmt::Display for PathExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.segments.join("."))
    }
}

/// Split a raw path into its first segment and dot-joined tail.
pub fn head_tail(raw: &str) -> Result<(String, String)> {
    let expr = PathExpression::parse(raw)?;
    let (head, tail) = expr.head_tail();
    Ok((head.to_string(), tail))
}

/// The final segment of a raw path, for display purposes.
///
/// Falls back to stripping junk characters when the strict grammar does not
/// match. Never use the result for addressing.
pub fn last(raw: &str) -> String {
    if let Ok(expr) = PathExpression::parse(raw) {
        return expr.last().to_string();
    }
    let tail = raw.rsplit('.').next().unwrap_or(raw);
    tail.chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '_')
        .collect()
}
