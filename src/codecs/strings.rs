use openstep_plist::Plist;
use std::borrow::Cow;

/// Escapes used inside feature code, decoded in this order. The plist
/// parser has usually decoded the `\U` escapes already, so the typographic
/// quotes themselves are mapped too.
const FEATURE_CODE_ESCAPES: [(&str, &str); 10] = [
    ("\\012", "\n"),
    ("\\011", "\t"),
    ("\\U2018", "'"),
    ("\\U2019", "'"),
    ("\\U201C", "\""),
    ("\\U201D", "\""),
    ("\u{2018}", "'"),
    ("\u{2019}", "'"),
    ("\u{201C}", "\""),
    ("\u{201D}", "\""),
];

fn is_bare_char(c: char) -> bool {
    matches!(c, 'a'..='z' | 'A'..='Z' | '0'..='9' | '$' | '.' | '/' | '_')
}

/// Whether a string must be quoted to survive a round trip.
///
/// Strings made only of ASCII letters, digits, `$`, `.`, `/` and `_` may be
/// written bare, unless they consist entirely of digits (which would read
/// back as a number). The empty string is always quoted.
pub fn needs_quotes(s: &str) -> bool {
    s.is_empty() || !s.chars().all(is_bare_char) || s.bytes().all(|b| b.is_ascii_digit())
}

/// Wrap a string in quotes, escaping quotes and newlines.
pub(crate) fn quote(s: &str) -> String {
    format!("\"{}\"", s.replace('"', "\\\"").replace('\n', "\\012"))
}

/// Encode a string for output, quoting it only when needed.
pub fn encode_string(s: &str) -> Cow<'_, str> {
    if needs_quotes(s) {
        Cow::Owned(quote(s))
    } else {
        Cow::Borrowed(s)
    }
}

/// Encode a string held in an untyped position (`userData`, unknown keys),
/// where a bare `0.5` would read back as a float.
pub(crate) fn encode_plist_string(s: &str) -> Cow<'_, str> {
    if needs_quotes(s) || openstep_plist::reads_as_number(s) {
        Cow::Owned(quote(s))
    } else {
        Cow::Borrowed(s)
    }
}

/// The `unicode` field is hex and stays bare even when it is all digits.
pub(crate) fn encode_unicode(s: &str) -> Cow<'_, str> {
    if !s.is_empty() && s.chars().all(is_bare_char) {
        Cow::Borrowed(s)
    } else {
        Cow::Owned(quote(s))
    }
}

/// Decode the escape sequences Glyphs uses inside feature code.
pub fn unescape_feature_code(code: &str) -> String {
    FEATURE_CODE_ESCAPES
        .iter()
        .fold(code.to_string(), |code, (escaped, plain)| {
            code.replace(escaped, plain)
        })
}

/// The text of a scalar value. Numbers were parsed from their canonical
/// spelling, so printing them restores the original token.
pub(crate) fn text_from_plist(plist: &Plist) -> Option<String> {
    match plist {
        Plist::String(s) => Some(s.clone()),
        Plist::Integer(i) => Some(i.to_string()),
        Plist::Float(f) => Some(f.to_string()),
        Plist::Dictionary(_) | Plist::Array(_) => None,
    }
}
