use core::fmt;

use bstr::BString;
use thiserror::Error;

use crate::context::ContainerKind;

/// A tokenizer failure together with where in the byte stream it happened.
///
/// Once `next_token` has returned an error the tokenizer keeps returning it;
/// a broken stream does not recover.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[cfg_attr(any(test, feature = "serde"), derive(serde::Serialize))]
#[error("{source} at line {line}, column {column}")]
pub struct ParserError {
    pub(crate) source: SyntaxError,
    pub(crate) line: usize,
    pub(crate) column: usize,
    pub(crate) offset: usize,
}

impl ParserError {
    pub(crate) fn new(source: SyntaxError, position: Position) -> Self {
        Self {
            source,
            line: position.line,
            column: position.column,
            offset: position.offset,
        }
    }

    /// Broad category of the failure.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        self.source.kind()
    }

    /// The specific syntax violation.
    #[must_use]
    pub fn syntax_error(&self) -> &SyntaxError {
        &self.source
    }

    /// 1-based line of the failure.
    #[must_use]
    pub fn line(&self) -> usize {
        self.line
    }

    /// 1-based byte column of the failure within its line.
    #[must_use]
    pub fn column(&self) -> usize {
        self.column
    }

    /// Absolute byte offset of the failure, counted across every fed chunk.
    #[must_use]
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Line, column and offset as one value.
    #[must_use]
    pub fn position(&self) -> Position {
        Position {
            line: self.line,
            column: self.column,
            offset: self.offset,
        }
    }
}

/// A location in the byte stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(any(test, feature = "serde"), derive(serde::Serialize))]
pub struct Position {
    /// 1-based line number.
    pub line: usize,
    /// 1-based byte column.
    pub column: usize,
    /// Absolute byte offset.
    pub offset: usize,
}

/// Broad classes of tokenizer failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(any(test, feature = "serde"), derive(serde::Serialize))]
pub enum ErrorKind {
    /// Missing or wrong separator, mismatched or unexpected close marker,
    /// trailing content.
    Structural,
    /// Illegal character where a value, name or keyword was expected, bad
    /// escape, bad UTF-8, unescaped control character.
    Lexical,
    /// A number that breaks the JSON number grammar.
    Numeric,
    /// End of input inside an unfinished token or container.
    Truncation,
}

/// The byte that triggered an error, rendered for humans.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(any(test, feature = "serde"), derive(serde::Serialize))]
pub struct Found(pub u8);

impl fmt::Display for Found {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            b @ (0x00..=0x1F | 0x7F) => write!(f, "(CTRL-CHAR, code {b})"),
            b @ 0x80..=0xFF => write!(f, "(byte 0x{b:02X})"),
            b => write!(f, "'{}' (code {b})", char::from(b)),
        }
    }
}

/// Every way a byte stream can fail to be JSON.
///
/// `found` fields hold the byte that triggered the error.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[cfg_attr(any(test, feature = "serde"), derive(serde::Serialize))]
#[allow(missing_docs)]
pub enum SyntaxError {
    // -- structural ------------------------------------------------------------------------------
    /// A value was followed by something other than `,` or a close marker.
    #[error("unexpected character {found}: was expecting comma to separate {context} entries")]
    ExpectedComma {
        found: Found,
        context: ContainerKind,
    },
    /// A field name was followed by something other than `:`.
    #[error("unexpected character {found}: was expecting a colon to separate field name and value")]
    ExpectedColon { found: Found },
    /// A comma directly before a close marker.
    #[error("unexpected close marker {found}: trailing comma not allowed")]
    TrailingComma { found: Found },
    /// A close marker right after a colon.
    #[error("unexpected close marker {found}: expected a value")]
    MissingValue { found: Found },
    /// A close marker of the wrong kind.
    #[error("unexpected close marker {found}: expected '{}'", .expected.close_marker())]
    MismatchedClose {
        found: Found,
        expected: ContainerKind,
    },
    /// A close marker with no open container.
    #[error("unexpected close marker {found}: no open OBJECT or ARRAY")]
    UnmatchedClose { found: Found },
    /// Another value after the root value, without multiple root values enabled.
    #[error("unexpected character {found}: expected end of input after the root value")]
    TrailingContent { found: Found },

    // -- lexical ---------------------------------------------------------------------------------
    /// A byte that cannot start what the grammar expects here.
    #[error("unexpected character {found}: expected {expected}")]
    UnexpectedCharacter {
        found: Found,
        expected: &'static str,
    },
    /// A bare word that is not `null`, `true` or `false`.
    #[error("unrecognized token '{token}': was expecting 'null', 'true' or 'false'")]
    UnrecognizedToken {
        #[cfg_attr(any(test, feature = "serde"), serde(serialize_with = "serialize_bstring"))]
        token: BString,
    },
    /// A control character between tokens.
    #[error("illegal character {found}: only regular white space (\\r, \\n, \\t) is allowed between tokens")]
    InvalidWhitespace { found: Found },
    /// A backslash followed by a character with no escape meaning.
    #[error("unrecognized character escape {found}")]
    InvalidEscape { found: Found },
    /// A non-hex byte inside `\uXXXX`.
    #[error("unexpected character {found}: expected a hex-digit for character escape sequence")]
    InvalidHexDigit { found: Found },
    /// A surrogate escape without its other half.
    #[error("unpaired surrogate \\u{0:04X} in character escape sequence")]
    UnpairedSurrogate(u32),
    /// A byte that cannot start a UTF-8 sequence.
    #[error("invalid UTF-8 start byte 0x{0:02X}")]
    InvalidUtf8Start(u8),
    /// A UTF-8 continuation byte not of the form `10xxxxxx`.
    #[error("invalid UTF-8 middle byte 0x{0:02X}")]
    InvalidUtf8Continuation(u8),
    /// A well-formed UTF-8 sequence that is overlong or not a scalar value.
    #[error("invalid UTF-8 sequence for code point U+{0:04X}")]
    InvalidCodePoint(u32),
    /// A raw control character inside a string or name.
    #[error("illegal unquoted character {found}: has to be escaped using backslash to be included in {context}")]
    UnquotedControlChar {
        found: Found,
        context: &'static str,
    },
    /// Field name bytes that do not decode as UTF-8.
    #[error("field name is not valid UTF-8")]
    InvalidNameEncoding,

    // -- numeric ---------------------------------------------------------------------------------
    /// `-` not followed by a digit.
    #[error("unexpected character {found} in numeric value: expected digit (0-9) to follow minus sign")]
    MinusWithoutDigit { found: Found },
    /// `.` not followed by a digit.
    #[error("unexpected character {found} in numeric value: decimal point not followed by a digit")]
    FractionWithoutDigit { found: Found },
    /// `e`/`E` (and optional sign) not followed by a digit.
    #[error("unexpected character {found} in numeric value: exponent indicator not followed by a digit")]
    ExponentWithoutDigit { found: Found },
    /// A digit after a leading `0`.
    #[error("invalid numeric value: leading zeroes not allowed")]
    LeadingZeros,
    /// A number running into a byte that can neither continue nor end it.
    #[error("unexpected character {found} in numeric value: expected digit (0-9), decimal point (.) or exponent indicator (e/E)")]
    UnexpectedNumberChar { found: Found },

    // -- truncation ------------------------------------------------------------------------------
    /// End of input inside a token; the payload says which.
    #[error("unexpected end of input {0}")]
    UnexpectedEof(&'static str),
    /// End of input with a container still open.
    #[error("unexpected end of input: expected close marker for {0}")]
    UnclosedContainer(ContainerKind),
}

impl SyntaxError {
    /// Broad category of this error.
    #[must_use]
    #[allow(clippy::enum_glob_use)]
    pub fn kind(&self) -> ErrorKind {
        use SyntaxError::*;
        match self {
            ExpectedComma { .. }
            | ExpectedColon { .. }
            | TrailingComma { .. }
            | MissingValue { .. }
            | MismatchedClose { .. }
            | UnmatchedClose { .. }
            | TrailingContent { .. } => ErrorKind::Structural,
            UnexpectedCharacter { .. }
            | UnrecognizedToken { .. }
            | InvalidWhitespace { .. }
            | InvalidEscape { .. }
            | InvalidHexDigit { .. }
            | UnpairedSurrogate(_)
            | InvalidUtf8Start(_)
            | InvalidUtf8Continuation(_)
            | InvalidCodePoint(_)
            | UnquotedControlChar { .. }
            | InvalidNameEncoding => ErrorKind::Lexical,
            MinusWithoutDigit { .. }
            | FractionWithoutDigit { .. }
            | ExponentWithoutDigit { .. }
            | LeadingZeros
            | UnexpectedNumberChar { .. } => ErrorKind::Numeric,
            UnexpectedEof(_) | UnclosedContainer(_) => ErrorKind::Truncation,
        }
    }
}

#[cfg(any(test, feature = "serde"))]
fn serialize_bstring<S: serde::Serializer>(token: &BString, s: S) -> Result<S::Ok, S::Error> {
    s.collect_str(token)
}

/// Misuse of [`feed`](crate::NonBlockingTokenizer::feed): the tokenizer was
/// not in a state to accept more input.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedError {
    /// The previous chunk has not been fully consumed.
    #[error("still have {remaining} undecoded bytes, should not call feed")]
    UnconsumedInput {
        /// Bytes of the previous chunk still unread.
        remaining: usize,
    },
    /// `end` lies before `start`.
    #[error("input end ({end}) may not be before start ({start})")]
    InvalidRange {
        /// Requested start index.
        start: usize,
        /// Requested end index.
        end: usize,
    },
    /// `end` lies past the buffer.
    #[error("input end ({end}) is past the end of a {len} byte buffer")]
    OutOfBounds {
        /// Requested end index.
        end: usize,
        /// Length of the supplied buffer.
        len: usize,
    },
    /// End of input was already signalled.
    #[error("already closed, can not feed more input")]
    Closed,
}
