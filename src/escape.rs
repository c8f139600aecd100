//! Escape sequences fer format-string literals.
//!
//! Just the ten classic single-character escapes. Hex, octal an unicode
//! escapes are no' supported here.

/// Decode the character after a backslash tae its literal value.
///
/// Gies back `None` fer escapes we dinnae recognize - the caller keeps
/// the pair verbatim an reports a warning.
pub fn decode(c: char) -> Option<char> {
    match c {
        'a' => Some('\x07'), // bell
        'b' => Some('\x08'), // backspace
        'f' => Some('\x0c'), // form feed
        'r' => Some('\r'),
        'v' => Some('\x0b'), // vertical tab
        'n' => Some('\n'),
        't' => Some('\t'),
        '\'' => Some('\''),
        '"' => Some('"'),
        '\\' => Some('\\'),
        _ => None,
    }
}
