//! Script folding: best-effort Latin and best-effort ASCII.

use super::{Locale, exceptions};
use deunicode::deunicode_char;
use pinyin::ToPinyin;
use std::ops::Range;

/// Fold letters of non-Latin scripts into Latin.
///
/// Han characters become tone-marked pinyin with a space between adjacent
/// syllables; other scripts go through `deunicode`. Latin, Common and
/// Inherited code points (digits, punctuation, combining marks) are kept.
pub(super) fn latin(text: &str, range: Range<usize>, locale: &Locale) -> String {
    let target = text.get(range).unwrap_or("");
    let mut out = String::with_capacity(target.len());
    let mut after_han = false;

    for c in target.chars() {
        if let Some(s) = exceptions::latin(locale.language(), c) {
            out.push_str(s);
            after_han = false;
            continue;
        }

        if let Some(syllable) = c.to_pinyin() {
            if after_han {
                out.push(' ');
            }
            out.push_str(syllable.with_tone());
            after_han = true;
            continue;
        }

        after_han = false;
        if is_latin_compatible(c) {
            out.push(c);
        } else {
            match deunicode_char(c) {
                Some(s) => out.push_str(s),
                None => out.push(c),
            }
        }
    }

    out
}

/// Fold everything outside ASCII into ASCII, honoring locale expansions.
///
/// Code points `deunicode` has no entry for are kept unchanged; the filter
/// pass later treats them like any other invalid character.
pub(super) fn ascii(text: &str, range: Range<usize>, locale: &Locale) -> String {
    let after = text.get(range.end..).and_then(|rest| rest.chars().next());
    let target = text.get(range).unwrap_or("");
    let mut out = String::with_capacity(target.len());
    let mut chars = target.chars().peekable();

    while let Some(c) = chars.next() {
        if c.is_ascii() {
            out.push(c);
            continue;
        }

        let next = chars.peek().copied().or(after);
        if let Some(s) = exceptions::ascii(locale.language(), c, next) {
            out.push_str(s);
            continue;
        }

        match deunicode_char(c) {
            Some(s) => out.push_str(s),
            None => out.push(c),
        }
    }

    out
}

fn is_latin_compatible(c: char) -> bool {
    if c.is_ascii() {
        return true;
    }
    let mut buf = [0u8; 4];
    regex!(r"\A[\p{Latin}\p{Common}\p{Inherited}]\z").is_match(c.encode_utf8(&mut buf))
}
