//! Final filter and delimiter normalization.
//!
//! ```text
//!  "Ö Äpfel-Fuß"  (after the chain: "OE Aepfel-Fuss", valid a-zA-Z)
//!    OE␠Aepfel-Fuss
//!      └┘      └┘       invalid runs → delimiter
//!    OE-Aepfel-Fuss
//! ```
//!
//! Ignored code points are dropped without ending an invalid run, so
//! `"a’ b"` with `’` ignored yields a single delimiter between `a` and `b`.

use super::char_class::CharClass;

/// Replace each maximal invalid run with `delimiter`, drop ignored code
/// points, then collapse repeated delimiters and trim them from both ends.
pub(crate) fn filter_and_collapse(text: &str, valid: &CharClass, ignore: &CharClass, delimiter: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut in_invalid_run = false;

    for c in text.chars() {
        if ignore.contains(c) {
            continue;
        }
        if valid.contains(c) {
            out.push(c);
            in_invalid_run = false;
        } else if !in_invalid_run {
            out.push_str(delimiter);
            in_invalid_run = true;
        }
    }

    collapse_delimiters(&out, delimiter)
}

/// Collapse runs of `delimiter` into one and trim it from both ends.
pub(crate) fn collapse_delimiters(text: &str, delimiter: &str) -> String {
    if delimiter.is_empty() {
        return text.to_string();
    }

    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    let mut after_delimiter = false;
    while !rest.is_empty() {
        if let Some(tail) = rest.strip_prefix(delimiter) {
            if !after_delimiter {
                out.push_str(delimiter);
                after_delimiter = true;
            }
            rest = tail;
        } else {
            let Some(c) = rest.chars().next() else { break };
            out.push(c);
            after_delimiter = false;
            rest = &rest[c.len_utf8()..];
        }
    }

    out.trim_start_matches(delimiter).trim_end_matches(delimiter).to_string()
}
