use snafu::Snafu;

/// Errors raised while parsing a property list.
///
/// Every variant carries the byte offset into the source text and the
/// one-based line number at which the problem was detected.
#[derive(Debug, Clone, PartialEq, Eq, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum Error {
    #[snafu(display("unterminated string starting at line {line} (offset {offset})"))]
    UnterminatedString { offset: usize, line: usize },

    #[snafu(display("unmatched '{delimiter}' opened at line {line} (offset {offset})"))]
    UnmatchedDelimiter {
        delimiter: char,
        offset: usize,
        line: usize,
    },

    #[snafu(display("unexpected character {found:?} at line {line} (offset {offset})"))]
    UnexpectedCharacter {
        found: char,
        offset: usize,
        line: usize,
    },

    #[snafu(display("unexpected end of input at line {line} (offset {offset})"))]
    UnexpectedEnd { offset: usize, line: usize },

    #[snafu(display("trailing content after value at line {line} (offset {offset})"))]
    TrailingContent { offset: usize, line: usize },
}

impl Error {
    /// Byte offset of the error in the source text.
    pub fn offset(&self) -> usize {
        match self {
            Error::UnterminatedString { offset, .. }
            | Error::UnmatchedDelimiter { offset, .. }
            | Error::UnexpectedCharacter { offset, .. }
            | Error::UnexpectedEnd { offset, .. }
            | Error::TrailingContent { offset, .. } => *offset,
        }
    }

    /// One-based line number of the error.
    pub fn line(&self) -> usize {
        match self {
            Error::UnterminatedString { line, .. }
            | Error::UnmatchedDelimiter { line, .. }
            | Error::UnexpectedCharacter { line, .. }
            | Error::UnexpectedEnd { line, .. }
            | Error::TrailingContent { line, .. } => *line,
        }
    }
}
