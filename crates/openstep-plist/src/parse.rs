use crate::error::{
    Error, TrailingContentSnafu, UnexpectedCharacterSnafu, UnexpectedEndSnafu,
    UnmatchedDelimiterSnafu, UnterminatedStringSnafu,
};
use crate::{Dictionary, Plist};
use ordered_float::OrderedFloat;

/// Characters which terminate a bare token.
fn is_delimiter(b: u8) -> bool {
    b.is_ascii_whitespace() || matches!(b, b'{' | b'}' | b'(' | b')' | b';' | b',' | b'=' | b'"')
}

pub(crate) struct Parser<'a> {
    src: &'a str,
    pos: usize,
    // Delimiters currently open, with the offset they were opened at.
    open: Vec<(char, usize)>,
}

impl<'a> Parser<'a> {
    pub(crate) fn new(src: &'a str) -> Self {
        Parser {
            src,
            pos: 0,
            open: vec![],
        }
    }

    /// Parse a single value which must make up the whole input.
    pub(crate) fn parse_document(mut self) -> Result<Plist, Error> {
        let value = self.parse_value()?;
        self.skip_whitespace();
        match self.peek() {
            None => Ok(value),
            Some(b @ (b'}' | b')')) => UnmatchedDelimiterSnafu {
                delimiter: b as char,
                offset: self.pos,
                line: self.line_at(self.pos),
            }
            .fail(),
            Some(_) => TrailingContentSnafu {
                offset: self.pos,
                line: self.line_at(self.pos),
            }
            .fail(),
        }
    }

    fn peek(&self) -> Option<u8> {
        self.src.as_bytes().get(self.pos).copied()
    }

    fn line_at(&self, offset: usize) -> usize {
        self.src.as_bytes()[..offset.min(self.src.len())]
            .iter()
            .filter(|&&b| b == b'\n')
            .count()
            + 1
    }

    fn skip_whitespace(&mut self) {
        let src = self.src;
        let bytes = src.as_bytes();
        while let Some(b) = self.peek() {
            if b.is_ascii_whitespace() {
                self.pos += 1;
            } else if bytes[self.pos..].starts_with(b"//") {
                while let Some(b) = self.peek() {
                    self.pos += 1;
                    if b == b'\n' {
                        break;
                    }
                }
            } else if bytes[self.pos..].starts_with(b"/*") {
                match src[self.pos + 2..].find("*/") {
                    Some(end) => self.pos += end + 4,
                    None => self.pos = src.len(),
                }
            } else {
                break;
            }
        }
    }

    /// The error for running out of input: the innermost open delimiter
    /// is reported if there is one.
    fn eof<T>(&self) -> Result<T, Error> {
        match self.open.last() {
            Some(&(delimiter, offset)) => UnmatchedDelimiterSnafu {
                delimiter,
                offset,
                line: self.line_at(offset),
            }
            .fail(),
            None => UnexpectedEndSnafu {
                offset: self.pos,
                line: self.line_at(self.pos),
            }
            .fail(),
        }
    }

    fn unexpected<T>(&self) -> Result<T, Error> {
        match self.src[self.pos..].chars().next() {
            Some(found) => UnexpectedCharacterSnafu {
                found,
                offset: self.pos,
                line: self.line_at(self.pos),
            }
            .fail(),
            None => self.eof(),
        }
    }

    fn expect(&mut self, wanted: u8) -> Result<(), Error> {
        self.skip_whitespace();
        match self.peek() {
            Some(b) if b == wanted => {
                self.pos += 1;
                Ok(())
            }
            Some(_) => self.unexpected(),
            None => self.eof(),
        }
    }

    fn parse_value(&mut self) -> Result<Plist, Error> {
        self.skip_whitespace();
        match self.peek() {
            None => self.eof(),
            Some(b'{') => self.parse_dict(),
            Some(b'(') => self.parse_array(),
            Some(b'"') => self.parse_quoted().map(Plist::String),
            Some(b) if !is_delimiter(b) => self.parse_bare(),
            Some(_) => self.unexpected(),
        }
    }

    fn parse_dict(&mut self) -> Result<Plist, Error> {
        self.open.push(('{', self.pos));
        self.pos += 1;
        let mut dict = Dictionary::new();
        loop {
            self.skip_whitespace();
            match self.peek() {
                None => return self.eof(),
                Some(b'}') => {
                    self.pos += 1;
                    self.open.pop();
                    return Ok(Plist::Dictionary(dict));
                }
                _ => {}
            }
            let key = self.parse_key()?;
            self.expect(b'=')?;
            let value = self.parse_value()?;
            self.expect(b';')?;
            dict.insert(key, value);
        }
    }

    fn parse_array(&mut self) -> Result<Plist, Error> {
        self.open.push(('(', self.pos));
        self.pos += 1;
        let mut items = vec![];
        loop {
            self.skip_whitespace();
            match self.peek() {
                None => return self.eof(),
                Some(b')') => {
                    self.pos += 1;
                    self.open.pop();
                    return Ok(Plist::Array(items));
                }
                _ => {}
            }
            items.push(self.parse_value()?);
            self.skip_whitespace();
            match self.peek() {
                Some(b',') => self.pos += 1,
                Some(b')') => {}
                None => return self.eof(),
                Some(_) => return self.unexpected(),
            }
        }
    }

    /// Keys are always strings, even when they look like numbers.
    fn parse_key(&mut self) -> Result<String, Error> {
        match self.peek() {
            Some(b'"') => self.parse_quoted(),
            Some(b) if !is_delimiter(b) => Ok(self.bare_token().to_string()),
            Some(_) => self.unexpected(),
            None => self.eof(),
        }
    }

    fn bare_token(&mut self) -> &'a str {
        let src = self.src;
        let start = self.pos;
        while let Some(b) = self.peek() {
            if is_delimiter(b) {
                break;
            }
            self.pos += 1;
        }
        &src[start..self.pos]
    }

    fn parse_bare(&mut self) -> Result<Plist, Error> {
        Ok(classify(self.bare_token()))
    }

    fn parse_quoted(&mut self) -> Result<String, Error> {
        let start = self.pos;
        self.pos += 1;
        let mut out = String::new();
        loop {
            let src = self.src;
            let rest = &src[self.pos..];
            let Some(ix) = rest.find(|c: char| c == '"' || c == '\\') else {
                return UnterminatedStringSnafu {
                    offset: start,
                    line: self.line_at(start),
                }
                .fail();
            };
            out.push_str(&rest[..ix]);
            self.pos += ix + 1;
            if rest.as_bytes()[ix] == b'"' {
                return Ok(out);
            }
            if !self.parse_escape(&mut out) {
                return UnterminatedStringSnafu {
                    offset: start,
                    line: self.line_at(start),
                }
                .fail();
            }
        }
    }

    /// Decode the escape following a backslash. Returns false at end of input.
    fn parse_escape(&mut self, out: &mut String) -> bool {
        let src = self.src;
        let rest = &src[self.pos..];
        let Some(c) = rest.chars().next() else {
            return false;
        };
        match c {
            '0'..='7' => {
                let digits: &str = take_while(rest, 3, |c| c.is_digit(8));
                self.pos += digits.len();
                match u32::from_str_radix(digits, 8).ok().and_then(char::from_u32) {
                    Some(decoded) => out.push(decoded),
                    None => {
                        out.push('\\');
                        out.push_str(digits);
                    }
                }
            }
            'U' | 'u' => {
                let digits = take_while(&rest[1..], 4, |c| c.is_ascii_hexdigit());
                let code = u32::from_str_radix(digits, 16).ok();
                self.pos += 1 + digits.len();
                match code.map(|code| self.combine_surrogates(code)) {
                    Some(Some(decoded)) => out.push(decoded),
                    _ => {
                        out.push('\\');
                        out.push(c);
                        out.push_str(digits);
                    }
                }
            }
            'n' => self.push_simple(out, '\n'),
            't' => self.push_simple(out, '\t'),
            'r' => self.push_simple(out, '\r'),
            '"' => self.push_simple(out, '"'),
            '\\' => self.push_simple(out, '\\'),
            other => {
                out.push('\\');
                out.push(other);
                self.pos += other.len_utf8();
            }
        }
        true
    }

    fn push_simple(&mut self, out: &mut String, decoded: char) {
        out.push(decoded);
        self.pos += 1;
    }

    /// A high surrogate may be followed by a `\UXXXX` low surrogate.
    fn combine_surrogates(&mut self, high: u32) -> Option<char> {
        if !(0xD800..0xDC00).contains(&high) {
            return char::from_u32(high);
        }
        let src = self.src;
        let rest = &src[self.pos..];
        let tail = rest
            .strip_prefix("\\U")
            .or_else(|| rest.strip_prefix("\\u"))?;
        let digits = take_while(tail, 4, |c| c.is_ascii_hexdigit());
        let low = u32::from_str_radix(digits, 16).ok()?;
        if digits.len() != 4 || !(0xDC00..0xE000).contains(&low) {
            return None;
        }
        self.pos += 2 + digits.len();
        char::from_u32(0x10000 + ((high - 0xD800) << 10) + (low - 0xDC00))
    }
}

fn take_while(s: &str, max: usize, pred: impl Fn(char) -> bool) -> &str {
    let end = s
        .char_indices()
        .take(max)
        .find(|&(_, c)| !pred(c))
        .map(|(ix, _)| ix)
        .unwrap_or_else(|| s.chars().take(max).map(char::len_utf8).sum());
    &s[..end]
}

/// Turn a bare token into a value.
///
/// Numbers are only produced when the token is the canonical rendering of
/// that number, so `0041`, `1.50`, `1e5` or `1.2.3` stay strings and
/// survive a round trip.
pub(crate) fn classify(token: &str) -> Plist {
    if looks_numeric(token) {
        if let Ok(integer) = token.parse::<i64>() {
            if integer.to_string() == token {
                return Plist::Integer(integer);
            }
        } else if let Ok(float) = token.parse::<f64>() {
            if float.to_string() == token {
                return Plist::Float(OrderedFloat(float));
            }
        }
    }
    Plist::String(token.to_string())
}

fn looks_numeric(token: &str) -> bool {
    let bytes = token.as_bytes();
    let starts_like_number = match bytes {
        [b'0'..=b'9', ..] => true,
        [b'-' | b'+' | b'.', b'0'..=b'9', ..] => true,
        [b'-' | b'+', b'.', b'0'..=b'9', ..] => true,
        _ => false,
    };
    starts_like_number
        && bytes
            .iter()
            .all(|b| b.is_ascii_digit() || matches!(b, b'.' | b'-' | b'+'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_tokens() {
        assert_eq!(classify("12"), Plist::Integer(12));
        assert_eq!(classify("-20"), Plist::Integer(-20));
        assert_eq!(classify("0.5"), Plist::Float(OrderedFloat(0.5)));
        assert_eq!(classify("0041"), Plist::String("0041".into()));
        assert_eq!(classify("1.50"), Plist::String("1.50".into()));
        assert_eq!(classify("1E9E"), Plist::String("1E9E".into()));
        assert_eq!(classify("A.sc"), Plist::String("A.sc".into()));
        assert_eq!(classify("1.2.3"), Plist::String("1.2.3".into()));
        assert_eq!(classify("0.5.1"), Plist::String("0.5.1".into()));
    }

    #[test]
    fn exponents_stay_text() {
        // hex codepoints such as 1E00 would otherwise read as numbers
        assert_eq!(classify("1e5"), Plist::String("1e5".into()));
        assert_eq!(classify("1E00"), Plist::String("1E00".into()));
        assert_eq!(classify("-2.5e-3"), Plist::String("-2.5e-3".into()));
    }

    #[test]
    fn take_while_limits() {
        assert_eq!(take_while("0123", 3, |c| c.is_digit(8)), "012");
        assert_eq!(take_while("01x", 3, |c| c.is_digit(8)), "01");
        assert_eq!(take_while("", 3, |c| c.is_digit(8)), "");
    }
}
