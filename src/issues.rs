//! Issue types for resource file checks.
//!
//! Each issue is self-contained with everything the reporter needs to
//! display it: a file location, a primary message, and optional details.
//! The [`Report`] trait is dispatched over the [`Issue`] enum with
//! `enum_dispatch` for zero-cost access from reporting code.

use enum_dispatch::enum_dispatch;

// ============================================================
// Severity and Rule
// ============================================================

/// Severity level of an issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Error,
    Warning,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
        }
    }
}

/// Rule identifier for each issue type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Rule {
    ParseError,
    UnknownExceptionKind,
    MissingDefaultText,
    UndeclaredCulture,
    DanglingAlias,
    EmptyPrompt,
}

impl std::fmt::Display for Rule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Rule::ParseError => write!(f, "parse-error"),
            Rule::UnknownExceptionKind => write!(f, "unknown-exception-kind"),
            Rule::MissingDefaultText => write!(f, "missing-default-text"),
            Rule::UndeclaredCulture => write!(f, "undeclared-culture"),
            Rule::DanglingAlias => write!(f, "dangling-alias"),
            Rule::EmptyPrompt => write!(f, "empty-prompt"),
        }
    }
}

// ============================================================
// Location
// ============================================================

/// Where an issue sits in a resource file. Line and column are zero when
/// no position could be determined.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceLocation {
    pub file_path: String,
    pub line: usize,
    pub col: usize,
}

impl ResourceLocation {
    pub fn new(file_path: impl Into<String>, line: usize, col: usize) -> Self {
        Self {
            file_path: file_path.into(),
            line,
            col,
        }
    }
}

// ============================================================
// Issue Types
// ============================================================

/// The file could not be decoded at all.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseErrorIssue {
    pub location: ResourceLocation,
    pub message: String,
    /// The offending line of text, when the error carried a position.
    pub source_line: Option<String>,
}

impl ParseErrorIssue {
    pub fn severity() -> Severity {
        Severity::Error
    }

    pub fn rule() -> Rule {
        Rule::ParseError
    }
}

/// An exception declaration names a kind with no registered factory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownKindIssue {
    pub location: ResourceLocation,
    /// Tree path of the declaration.
    pub path: String,
    pub kind: String,
}

impl UnknownKindIssue {
    pub fn severity() -> Severity {
        Severity::Error
    }

    pub fn rule() -> Rule {
        Rule::UnknownExceptionKind
    }
}

/// A prompt or declaration has entries but none for the default culture.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MissingDefaultTextIssue {
    pub location: ResourceLocation,
    pub path: String,
    pub default_culture: String,
}

impl MissingDefaultTextIssue {
    pub fn severity() -> Severity {
        Severity::Warning
    }

    pub fn rule() -> Rule {
        Rule::MissingDefaultText
    }
}

/// An entry uses a culture the settings never declare.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UndeclaredCultureIssue {
    pub location: ResourceLocation,
    pub path: String,
    pub culture: String,
}

impl UndeclaredCultureIssue {
    pub fn severity() -> Severity {
        Severity::Warning
    }

    pub fn rule() -> Rule {
        Rule::UndeclaredCulture
    }
}

/// A translation alias points at a culture that is not declared.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DanglingAliasIssue {
    pub location: ResourceLocation,
    pub source: String,
    pub alias: String,
}

impl DanglingAliasIssue {
    pub fn severity() -> Severity {
        Severity::Warning
    }

    pub fn rule() -> Rule {
        Rule::DanglingAlias
    }
}

/// A prompt with no entries at all.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmptyPromptIssue {
    pub location: ResourceLocation,
    pub path: String,
}

impl EmptyPromptIssue {
    pub fn severity() -> Severity {
        Severity::Warning
    }

    pub fn rule() -> Rule {
        Rule::EmptyPrompt
    }
}

// ============================================================
// Issue Enum
// ============================================================

/// An issue found while checking resource files.
#[enum_dispatch(Report)]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Issue {
    ParseError(ParseErrorIssue),
    UnknownKind(UnknownKindIssue),
    MissingDefaultText(MissingDefaultTextIssue),
    UndeclaredCulture(UndeclaredCultureIssue),
    DanglingAlias(DanglingAliasIssue),
    EmptyPrompt(EmptyPromptIssue),
}

// ============================================================
// Report Trait (for CLI output)
// ============================================================

/// Trait for types that can be reported to the CLI.
#[enum_dispatch]
pub trait Report {
    /// Location of the issue.
    fn location(&self) -> &ResourceLocation;

    /// Primary message to display.
    fn message(&self) -> String;

    /// Severity level.
    fn report_severity(&self) -> Severity;

    /// Rule identifier.
    fn report_rule(&self) -> Rule;

    /// Optional details for the "= note:" line.
    fn details(&self) -> Option<String> {
        None
    }

    /// Optional hint for fixing the issue.
    fn hint(&self) -> Option<String> {
        None
    }

    /// The offending source line, for caret display.
    fn source_line(&self) -> Option<&str> {
        None
    }
}

// ============================================================
// Report Implementations
// ============================================================

impl Report for ParseErrorIssue {
    fn location(&self) -> &ResourceLocation {
        &self.location
    }

    fn message(&self) -> String {
        self.message.clone()
    }

    fn report_severity(&self) -> Severity {
        Self::severity()
    }

    fn report_rule(&self) -> Rule {
        Self::rule()
    }

    fn source_line(&self) -> Option<&str> {
        self.source_line.as_deref()
    }
}

impl Report for UnknownKindIssue {
    fn location(&self) -> &ResourceLocation {
        &self.location
    }

    fn message(&self) -> String {
        self.path.clone()
    }

    fn report_severity(&self) -> Severity {
        Self::severity()
    }

    fn report_rule(&self) -> Rule {
        Self::rule()
    }

    fn details(&self) -> Option<String> {
        Some(format!("kind '{}' has no registered factory", self.kind))
    }

    fn hint(&self) -> Option<String> {
        Some("register the kind before loading, or correct the 'type' attribute".to_string())
    }
}

impl Report for MissingDefaultTextIssue {
    fn location(&self) -> &ResourceLocation {
        &self.location
    }

    fn message(&self) -> String {
        self.path.clone()
    }

    fn report_severity(&self) -> Severity {
        Self::severity()
    }

    fn report_rule(&self) -> Rule {
        Self::rule()
    }

    fn details(&self) -> Option<String> {
        Some(format!(
            "no entry for default culture '{}'",
            self.default_culture
        ))
    }
}

impl Report for UndeclaredCultureIssue {
    fn location(&self) -> &ResourceLocation {
        &self.location
    }

    fn message(&self) -> String {
        self.path.clone()
    }

    fn report_severity(&self) -> Severity {
        Self::severity()
    }

    fn report_rule(&self) -> Rule {
        Self::rule()
    }

    fn details(&self) -> Option<String> {
        Some(format!(
            "culture '{}' is not declared in settings",
            self.culture
        ))
    }
}

impl Report for DanglingAliasIssue {
    fn location(&self) -> &ResourceLocation {
        &self.location
    }

    fn message(&self) -> String {
        format!("{} -> {}", self.source, self.alias)
    }

    fn report_severity(&self) -> Severity {
        Self::severity()
    }

    fn report_rule(&self) -> Rule {
        Self::rule()
    }

    fn details(&self) -> Option<String> {
        Some(format!("alias target '{}' is not declared", self.alias))
    }
}

impl Report for EmptyPromptIssue {
    fn location(&self) -> &ResourceLocation {
        &self.location
    }

    fn message(&self) -> String {
        self.path.clone()
    }

    fn report_severity(&self) -> Severity {
        Self::severity()
    }

    fn report_rule(&self) -> Rule {
        Self::rule()
    }

    fn details(&self) -> Option<String> {
        Some("prompt declares no text in any culture".to_string())
    }
}
