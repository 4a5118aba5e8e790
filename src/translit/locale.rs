//! Locale tag parsing.

use std::fmt;

/// A parsed locale tag.
///
/// Accepts BCP-47 (`de-AT`, `tr-Latn-AT`) and ICU/POSIX style (`de_AT`,
/// `de_AT.UTF-8@euro`) spellings. Only the language, script and region
/// subtags are kept; variants are ignored. The original tag is preserved for
/// diagnostics.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Locale {
    tag: String,
    language: Option<String>,
    script: Option<String>,
    region: Option<String>,
}

impl Locale {
    /// The root locale: no language-specific behavior.
    pub fn root() -> Self {
        Self::default()
    }

    /// Parse `tag`. Parsing is lenient and never fails; unrecognized subtags
    /// are skipped.
    pub fn parse(tag: &str) -> Self {
        let tag = tag.trim();
        let mut locale = Locale { tag: tag.to_string(), ..Locale::default() };

        // Drop POSIX codeset and modifier suffixes.
        let core = tag.split(['.', '@']).next().unwrap_or("");
        let mut subtags = core.split(['_', '-']).filter(|s| !s.is_empty());

        if let Some(first) = subtags.next() {
            let first = first.to_ascii_lowercase();
            let is_language = (2..=8).contains(&first.len()) && first.bytes().all(|b| b.is_ascii_alphabetic());
            if is_language && first != "und" && first != "root" {
                locale.language = Some(first);
            }
        }

        for subtag in subtags {
            let alphabetic = subtag.bytes().all(|b| b.is_ascii_alphabetic());
            let numeric = subtag.bytes().all(|b| b.is_ascii_digit());
            match subtag.len() {
                4 if alphabetic && locale.script.is_none() && locale.region.is_none() => {
                    let mut script = subtag.to_ascii_lowercase();
                    script[..1].make_ascii_uppercase();
                    locale.script = Some(script);
                }
                2 if alphabetic && locale.region.is_none() => locale.region = Some(subtag.to_ascii_uppercase()),
                3 if numeric && locale.region.is_none() => locale.region = Some(subtag.to_string()),
                _ => {}
            }
        }

        locale
    }

    /// The tag as it was given.
    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// Lowercased language subtag, if any.
    pub fn language(&self) -> Option<&str> {
        self.language.as_deref()
    }

    /// Titlecased script subtag, if any.
    pub fn script(&self) -> Option<&str> {
        self.script.as_deref()
    }

    /// Uppercased (or numeric) region subtag, if any.
    pub fn region(&self) -> Option<&str> {
        self.region.as_deref()
    }

    pub fn is_root(&self) -> bool {
        self.language.is_none()
    }

    /// Languages with dotted/dotless I casing.
    pub fn is_turkic(&self) -> bool {
        matches!(self.language(), Some("tr" | "az"))
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.tag)
    }
}

impl From<&str> for Locale {
    fn from(tag: &str) -> Self {
        Locale::parse(tag)
    }
}
