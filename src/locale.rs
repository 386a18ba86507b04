//! Culture tags and the translation (alias) table.
//!
//! A [`LocaleTag`] is a validated `xx-XX` language-region pair, normalized at
//! construction so that equality and lookups are case-insensitive. The
//! culture-neutral "unspecified" state is represented as `Option::None`
//! rather than a sentinel value, so a `LocaleTag` always names a real
//! culture.

use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;

use crate::error::{Error, Result};

static LOCALE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z]{2}-[A-Za-z]{2}$").unwrap());

/// A validated language-region tag such as `en-CA`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LocaleTag(String);

impl LocaleTag {
    /// Parse and normalize a tag: language lowercased, region uppercased.
    pub fn parse(raw: &str) -> Result<Self> {
        let trimmed = raw.trim();
        if !LOCALE_REGEX.is_match(trimmed) {
            return Err(Error::InvalidLocale(raw.to_string()));
        }
        let (language, region) = trimmed.split_at(2);
        let region = &region[1..];
        Ok(Self(format!(
            "{}-{}",
            language.to_ascii_lowercase(),
            region.to_ascii_uppercase()
        )))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The lowercase language half (`en` of `en-CA`).
    pub fn language(&self) -> &str {
        &self.0[..2]
    }

    /// The uppercase region half (`CA` of `en-CA`).
    pub fn region(&self) -> &str {
        &self.0[3..]
    }
}

impl fmt::Display for LocaleTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for LocaleTag {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

/// A declared language: its tag plus a human-readable display name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Language {
    pub tag: LocaleTag,
    pub display_name: String,
}

/// Alias resolution and the default culture for one resource tree.
///
/// Languages and aliases keep insertion order; re-declaring an existing tag
/// replaces the prior entry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TranslationTable {
    default: Option<LocaleTag>,
    languages: Vec<Language>,
    aliases: Vec<(LocaleTag, LocaleTag)>,
}

impl TranslationTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn default_locale(&self) -> Option<&LocaleTag> {
        self.default.as_ref()
    }

    pub fn set_default(&mut self, tag: LocaleTag) {
        self.default = Some(tag);
    }

    /// Declare a language and its display name, replacing any prior
    /// declaration of the same tag.
    pub fn declare_language(&mut self, tag: LocaleTag, display_name: impl Into<String>) {
        let display_name = display_name.into();
        match self.languages.iter_mut().find(|l| l.tag == tag) {
            Some(existing) => existing.display_name = display_name,
            None => self.languages.push(Language { tag, display_name }),
        }
    }

    pub fn languages(&self) -> &[Language] {
        &self.languages
    }

    pub fn is_declared(&self, tag: &LocaleTag) -> bool {
        self.languages.iter().any(|l| &l.tag == tag)
    }

    /// Map a source culture to its substitute, replacing any prior mapping
    /// for the same source.
    pub fn set_alias(&mut self, source: LocaleTag, substitute: LocaleTag) {
        match self.aliases.iter_mut().find(|(s, _)| *s == source) {
            Some((_, existing)) => *existing = substitute,
            None => self.aliases.push((source, substitute)),
        }
    }

    pub fn aliases(&self) -> &[(LocaleTag, LocaleTag)] {
        &self.aliases
    }

    pub fn alias_for(&self, source: &LocaleTag) -> Option<&LocaleTag> {
        self.aliases
            .iter()
            .find(|(s, _)| s == source)
            .map(|(_, substitute)| substitute)
    }

    pub fn is_empty(&self) -> bool {
        self.default.is_none() && self.languages.is_empty() && self.aliases.is_empty()
    }

    /// Union another table into this one. Incoming languages and aliases win
    /// on collision; the existing default culture is kept unless unset.
    pub fn merge_from(&mut self, incoming: TranslationTable) {
        for language in incoming.languages {
            self.declare_language(language.tag, language.display_name);
        }
        for (source, substitute) in incoming.aliases {
            self.set_alias(source, substitute);
        }
        if self.default.is_none() {
            self.default = incoming.default;
        }
    }
}
