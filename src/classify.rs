#[inline]
pub fn is_whitespace(c: char) -> bool {
    // Include U+FEFF (BOM) as whitespace-equivalent so it trims like the
    // host editing surface trims metadata input.
    c.is_whitespace() || c == '\u{FEFF}'
}

#[inline]
pub fn is_key_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_'
}

#[inline]
pub fn is_key_continue(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == '-'
}

/// Closing counterpart for an auto-pairable opening delimiter.
#[inline]
pub fn closing_for(c: char) -> Option<char> {
    match c {
        '{' => Some('}'),
        '[' => Some(']'),
        '"' => Some('"'),
        _ => None,
    }
}

/// Reverse lookup: opening counterpart for a closing delimiter.
#[inline]
pub fn opening_for(c: char) -> Option<char> {
    match c {
        '}' => Some('{'),
        ']' => Some('['),
        '"' => Some('"'),
        _ => None,
    }
}

/// Trim with the same whitespace class the scanners use.
#[inline]
pub fn trim_buffer(s: &str) -> &str {
    s.trim_matches(|c: char| is_whitespace(c))
}
