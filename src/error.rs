//! Error taxonomy.
//!
//! Every error is produced while merging options or building the pipeline,
//! before the input text is touched, so a failing call never yields a
//! partially transformed slug.

use thiserror::Error;

/// Errors returned by [`SlugGenerator`](crate::SlugGenerator) and the
/// free-standing `slugify*` helpers.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SlugError {
    /// The input bytes are not well-formed text in the expected encoding.
    #[error("input is not valid {expected} text (invalid sequence at byte {offset})")]
    InvalidEncoding { expected: &'static str, offset: usize },

    /// A custom transform rule could not be parsed.
    #[error("invalid rule \"{rule}\" for locale \"{locale}\": {reason} near \"{fragment}\"")]
    MalformedRule { rule: String, locale: String, fragment: String, reason: String },

    /// The `valid` or `ignore` character class could not be parsed.
    #[error("invalid {option} character class \"{spec}\": {reason}")]
    MalformedClassSpec { option: &'static str, spec: String, reason: String },

    /// A transform descriptor does not name a known operation.
    #[error("unknown transform \"{name}\" for locale \"{locale}\"")]
    UnknownTransform { name: String, locale: String },

    /// An option source (for example a TOML file) could not be read.
    #[error("invalid options: {reason}")]
    InvalidOptions { reason: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_quote_rule_and_locale() {
        let err = SlugError::UnknownTransform { name: "invalid rule".into(), locale: "de_AT".into() };
        let msg = err.to_string();
        assert!(msg.contains("\"invalid rule\""));
        assert!(msg.contains("\"de_AT\""));

        let err = SlugError::InvalidEncoding { expected: "UTF-8", offset: 0 };
        assert!(err.to_string().to_ascii_lowercase().contains("utf-8"));
    }
}
