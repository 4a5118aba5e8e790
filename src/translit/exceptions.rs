//! Locale exceptions layered over the generic `deunicode` tables.
//!
//! Each function returns `Some(replacement)` only when the locale overrides
//! the generic mapping. The Cyrillic sign rules apply under every locale.

/// ASCII folding overrides. `next` is the code point following `c` in the
/// full working text, if any.
pub(super) fn ascii(language: Option<&str>, c: char, next: Option<char>) -> Option<&'static str> {
    match language {
        Some("de") => german(c, next),
        _ => None,
    }
}

/// Latin-script folding overrides.
pub(super) fn latin(language: Option<&str>, c: char) -> Option<&'static str> {
    let local = match language {
        Some("el") => modern_greek(c),
        Some("pnt") => pontic(c),
        _ => None,
    };
    local.or_else(|| cyrillic(c))
}

// Umlauts expand to `<vowel>e`; a capital keeps the expansion titlecased when
// a lowercase letter follows ("Äpfel" -> "Aepfel"), uppercase otherwise
// ("ÄX" -> "AEX", "Ä" -> "AE").
fn german(c: char, next: Option<char>) -> Option<&'static str> {
    let titlecase = next.is_some_and(char::is_lowercase);
    let s = match c {
        'ä' => "ae",
        'ö' => "oe",
        'ü' => "ue",
        'ß' => "ss",
        'ẞ' => "SS",
        'Ä' if titlecase => "Ae",
        'Ö' if titlecase => "Oe",
        'Ü' if titlecase => "Ue",
        'Ä' => "AE",
        'Ö' => "OE",
        'Ü' => "UE",
        _ => return None,
    };
    Some(s)
}

// Modern Greek pronounces eta as "i".
fn modern_greek(c: char) -> Option<&'static str> {
    match c {
        'η' | 'ή' => Some("i"),
        'Η' | 'Ή' => Some("I"),
        _ => None,
    }
}

fn pontic(c: char) -> Option<&'static str> {
    match c {
        // MICRO SIGN and GREEK SMALL LETTER MU.
        'µ' | 'μ' => Some("m"),
        'Μ' => Some("M"),
        _ => None,
    }
}

fn cyrillic(c: char) -> Option<&'static str> {
    match c {
        'ь' | 'ъ' | 'Ь' | 'Ъ' => Some(""),
        'ї' => Some("i"),
        'Ї' => Some("I"),
        _ => None,
    }
}
