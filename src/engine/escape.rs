//! Code-point escapes shared by the rule and character-class parsers.
//!
//! Supported forms:
//!
//! ```text
//! \uXXXX            one UTF-16 unit; a high surrogate must be followed by
//!                   \uXXXX with the matching low surrogate
//! \UXXXXXXXX        one scalar value, eight hex digits
//! \x{H..HHHHHH}     one scalar value, one to six hex digits
//! \n \t \r          control characters
//! ```

use std::iter::Peekable;
use std::str::Chars;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum EscapeError {
    Unterminated,
    InvalidHex,
    LoneSurrogate,
}

/// Decode the escape introduced by `\<kind>`, reading further digits from
/// `chars`. Returns `Ok(None)` when `kind` is not a code-point escape, in
/// which case nothing has been consumed.
pub(crate) fn code_point(kind: char, chars: &mut Peekable<Chars<'_>>) -> Result<Option<char>, EscapeError> {
    let c = match kind {
        'n' => '\n',
        't' => '\t',
        'r' => '\r',
        'u' => utf16(chars)?,
        'U' => char::from_u32(fixed_hex(chars, 8)?).ok_or(EscapeError::InvalidHex)?,
        'x' => char::from_u32(braced_hex(chars)?).ok_or(EscapeError::InvalidHex)?,
        _ => return Ok(None),
    };
    Ok(Some(c))
}

fn utf16(chars: &mut Peekable<Chars<'_>>) -> Result<char, EscapeError> {
    let unit = fixed_hex(chars, 4)?;
    match unit {
        0xD800..=0xDBFF => {
            if chars.next_if_eq(&'\\').is_none() || chars.next_if_eq(&'u').is_none() {
                return Err(EscapeError::LoneSurrogate);
            }
            let low = fixed_hex(chars, 4)?;
            if !(0xDC00..=0xDFFF).contains(&low) {
                return Err(EscapeError::LoneSurrogate);
            }
            let scalar = 0x10000 + ((unit - 0xD800) << 10) + (low - 0xDC00);
            char::from_u32(scalar).ok_or(EscapeError::InvalidHex)
        }
        0xDC00..=0xDFFF => Err(EscapeError::LoneSurrogate),
        _ => char::from_u32(unit).ok_or(EscapeError::InvalidHex),
    }
}

fn fixed_hex(chars: &mut Peekable<Chars<'_>>, digits: usize) -> Result<u32, EscapeError> {
    let mut value = 0u32;
    for _ in 0..digits {
        let c = chars.next().ok_or(EscapeError::Unterminated)?;
        let digit = c.to_digit(16).ok_or(EscapeError::InvalidHex)?;
        value = (value << 4) | digit;
    }
    Ok(value)
}

fn braced_hex(chars: &mut Peekable<Chars<'_>>) -> Result<u32, EscapeError> {
    if chars.next_if_eq(&'{').is_none() {
        return Err(EscapeError::InvalidHex);
    }

    let mut value = 0u32;
    let mut digits = 0;
    loop {
        match chars.next() {
            None => return Err(EscapeError::Unterminated),
            Some('}') if digits > 0 => return Ok(value),
            Some(c) => {
                let digit = c.to_digit(16).ok_or(EscapeError::InvalidHex)?;
                digits += 1;
                if digits > 6 {
                    return Err(EscapeError::InvalidHex);
                }
                value = (value << 4) | digit;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decode(kind: char, rest: &str) -> Result<Option<char>, EscapeError> {
        code_point(kind, &mut rest.chars().peekable())
    }

    #[test]
    fn decodes_code_point_escapes() {
        assert_eq!(decode('u', "0020"), Ok(Some(' ')));
        assert_eq!(decode('u', "00e4"), Ok(Some('ä')));
        assert_eq!(decode('u', "D83D\\uDCA9"), Ok(Some('💩')));
        assert_eq!(decode('U', "0001F4A9"), Ok(Some('💩')));
        assert_eq!(decode('x', "{1F4A9}"), Ok(Some('💩')));
        assert_eq!(decode('n', ""), Ok(Some('\n')));
        assert_eq!(decode('q', "rest"), Ok(None));
    }

    #[test]
    fn rejects_broken_escapes() {
        assert_eq!(decode('u', "00"), Err(EscapeError::Unterminated));
        assert_eq!(decode('u', "00zz"), Err(EscapeError::InvalidHex));
        assert_eq!(decode('u', "DC00"), Err(EscapeError::LoneSurrogate));
        assert_eq!(decode('u', "D83Dx"), Err(EscapeError::LoneSurrogate));
        assert_eq!(decode('x', "41"), Err(EscapeError::InvalidHex));
        assert_eq!(decode('x', "{}"), Err(EscapeError::InvalidHex));
        assert_eq!(decode('x', "{1234567}"), Err(EscapeError::InvalidHex));
        assert_eq!(decode('x', "{41"), Err(EscapeError::Unterminated));
    }
}
