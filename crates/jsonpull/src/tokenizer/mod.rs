//! The non-blocking tokenizer.
//!
//! This module provides [`NonBlockingTokenizer`], which turns byte chunks into
//! [`Token`]s without ever waiting for input. When a chunk runs out in the
//! middle of a token the tokenizer records where it stopped (the *minor*
//! state) and returns [`Token::NotAvailable`]; the next call picks up at
//! exactly that byte once more input has been fed.
//!
//! # Examples
//!
//! Basic usage:
//!
//! ```rust
//! use jsonpull::{NonBlockingTokenizer, ParserOptions, Token};
//!
//! let mut tokenizer = NonBlockingTokenizer::new(ParserOptions::default());
//! for chunk in [&b"{\"ke"[..], &b"y\": [nu"[..], &b"ll, 3.1"[..], &b"4]}"[..]] {
//!     tokenizer.feed(chunk).unwrap();
//!     for token in tokenizer.by_ref() {
//!         println!("{:?}", token.unwrap());
//!     }
//! }
//! tokenizer.end_of_input();
//! assert_eq!(tokenizer.next_token().unwrap(), Token::EndOfStream);
//! ```
#![allow(clippy::enum_glob_use)]

mod name;
mod number;
mod state;
mod string;
mod value;

use bstr::BString;
use bytes::Bytes;
use tracing::{debug, trace};

use self::state::{Major, Minor};
use crate::{
    context::ContextStack,
    error::{FeedError, ParserError, Position, SyntaxError},
    escape_buffer::{EscapeBuffer, EscapeRules},
    options::ParserOptions,
    symbols::{Interner, NameTable, Quads},
    text_buffer::TextBuffer,
    token::Token,
};

/// Longest unrecognized token quoted back in an error message.
const MAX_ERROR_TOKEN_LENGTH: usize = 256;

/// Counters for the number in progress; the digits live in the text buffer.
#[derive(Debug, Clone, Copy, Default)]
struct NumberState {
    negative: bool,
    int_len: usize,
    fraction_len: usize,
    exponent_len: usize,
}

/// A pull-based JSON tokenizer fed with byte chunks.
///
/// Feed bytes with [`feed`](Self::feed), then call
/// [`next_token`](Self::next_token) until it returns
/// [`Token::NotAvailable`]. Repeat, and call
/// [`end_of_input`](Self::end_of_input) after the last chunk; the stream ends
/// with [`Token::EndOfStream`].
///
/// The tokenizer also implements [`Iterator`], yielding the tokens available
/// from the bytes fed so far.
///
/// `I` is the [`Interner`] used to canonicalize field names.
#[derive(Debug)]
pub struct NonBlockingTokenizer<I = NameTable> {
    input: crate::cursor::Cursor,
    options: ParserOptions,

    major: Major,
    minor: Minor,
    context: ContextStack,

    /// Pending accumulators for the token in progress.
    text: TextBuffer,
    escape: EscapeBuffer,
    name: Quads,
    number: NumberState,
    error_token: BString,

    interner: I,
    failed: Option<ParserError>,
}

impl NonBlockingTokenizer<NameTable> {
    /// Creates a tokenizer with its own [`NameTable`].
    #[must_use]
    pub fn new(options: ParserOptions) -> Self {
        Self::with_interner(options, NameTable::new())
    }
}

impl Default for NonBlockingTokenizer<NameTable> {
    fn default() -> Self {
        Self::new(ParserOptions::default())
    }
}

impl<I: Interner> NonBlockingTokenizer<I> {
    /// Creates a tokenizer that canonicalizes field names through `interner`.
    pub fn with_interner(options: ParserOptions, interner: I) -> Self {
        Self {
            input: crate::cursor::Cursor::new(),
            options,
            major: Major::Initial,
            minor: Minor::None,
            context: ContextStack::new(),
            text: TextBuffer::new(),
            escape: EscapeBuffer::new(),
            name: Quads::new(),
            number: NumberState::default(),
            error_token: BString::default(),
            interner,
            failed: None,
        }
    }

    // ------------------------------------------------------------------------------------------------
    // Input
    // ------------------------------------------------------------------------------------------------

    /// Supplies the next chunk of input.
    ///
    /// # Errors
    ///
    /// Fails if bytes of the previous chunk are still unread or if
    /// [`end_of_input`](Self::end_of_input) was already called.
    pub fn feed(&mut self, chunk: impl Into<Bytes>) -> Result<(), FeedError> {
        let chunk = chunk.into();
        let len = chunk.len();
        self.feed_range(chunk, 0, len)
    }

    /// Supplies `buf[start..end]` as the next chunk of input.
    ///
    /// # Errors
    ///
    /// As [`feed`](Self::feed), and also if `end < start` or `end` lies past
    /// the buffer.
    pub fn feed_range(
        &mut self,
        buf: impl Into<Bytes>,
        start: usize,
        end: usize,
    ) -> Result<(), FeedError> {
        match self.input.feed(buf.into(), start, end) {
            Ok(()) => {
                debug!(len = end - start, offset = self.input.offset(), "fed chunk");
                Ok(())
            }
            Err(err) => {
                debug!(%err, "rejected chunk");
                Err(err)
            }
        }
    }

    /// Copies `bytes` and supplies them as the next chunk of input.
    ///
    /// # Errors
    ///
    /// As [`feed`](Self::feed).
    pub fn feed_slice(&mut self, bytes: &[u8]) -> Result<(), FeedError> {
        self.feed(Bytes::copy_from_slice(bytes))
    }

    /// Signals that no more bytes will be fed. Idempotent.
    pub fn end_of_input(&mut self) {
        if !self.input.is_closed() {
            debug!(offset = self.input.offset(), "end of input");
        }
        self.input.close();
    }

    /// Whether the current chunk is used up and more input is expected.
    #[must_use]
    pub fn need_more_input(&self) -> bool {
        !self.input.has_remaining() && !self.input.is_closed()
    }

    /// Returns the bytes fed but not yet read, and treats them as read.
    pub fn release_buffered(&mut self) -> Bytes {
        self.input.release()
    }

    // ------------------------------------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------------------------------------

    /// Position of the next unread byte.
    #[must_use]
    pub fn position(&self) -> Position {
        self.input.position_at(self.input.offset())
    }

    /// Number of currently open objects and arrays.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.context.depth()
    }

    /// The options this tokenizer was created with.
    #[must_use]
    pub fn options(&self) -> &ParserOptions {
        &self.options
    }

    /// The field name interner.
    #[must_use]
    pub fn interner(&self) -> &I {
        &self.interner
    }

    // ------------------------------------------------------------------------------------------------
    // Tokens
    // ------------------------------------------------------------------------------------------------

    /// Decodes the next token from the bytes fed so far.
    ///
    /// Returns [`Token::NotAvailable`] when more input is needed and
    /// [`Token::EndOfStream`] (repeatedly) once input has ended.
    ///
    /// # Errors
    ///
    /// Returns a [`ParserError`] when the input is not valid JSON under the
    /// configured options. The error is sticky: every later call returns it
    /// again.
    pub fn next_token(&mut self) -> Result<Token, ParserError> {
        if let Some(err) = &self.failed {
            return Err(err.clone());
        }
        let result = self.next_token_internal();
        if let Err(err) = &result {
            debug!(%err, "tokenizer failed");
            self.failed = Some(err.clone());
        }
        result
    }

    fn next_token_internal(&mut self) -> Result<Token, ParserError> {
        if !self.input.has_remaining() {
            if !self.input.is_closed() {
                return Ok(Token::NotAvailable);
            }
            return self.finish_token_with_eof();
        }
        if self.minor == Minor::None {
            return self.start_token();
        }
        self.finish_token()
    }

    /// Picks the entry point for a fresh token from the major state.
    fn start_token(&mut self) -> Result<Token, ParserError> {
        match self.major {
            Major::Initial => self.start_document(),
            Major::Root => self.start_after_root(),
            Major::ArrayElementFirst => self.start_first_element(),
            Major::ArrayElementNext => self.start_next_element(),
            Major::ObjectFieldFirst => self.start_first_field(),
            Major::ObjectFieldNext => self.start_next_field(),
            Major::ObjectValue => self.start_field_value(),
        }
    }

    /// Resumes the token that was cut off by the end of the previous chunk.
    fn finish_token(&mut self) -> Result<Token, ParserError> {
        use Minor::*;

        match self.minor {
            None | ValueLeadingWs | FieldLeadingWs => {
                self.minor = None;
                self.start_token()
            }
            Bom(matched) => self.finish_bom(matched),
            ValueLeadingComma => self.value_after_comma(),
            ValueLeadingColon => self.value_after_colon(),
            FieldLeadingComma => self.field_after_comma(),

            FieldName { quote } => self.finish_field_name(quote),
            FieldNameEscape { quote } => self.finish_field_name_escape(quote),
            UnquotedFieldName => self.finish_unquoted_name(),

            Keyword(matched) => self.finish_keyword(matched),
            ErrorToken => self.finish_error_token(),

            NumberMinus => self.finish_minus(),
            NumberLeadingZero => self.finish_leading_zero(),
            NumberIntegerDigits => self.finish_integer(),
            NumberFractionDigits => self.finish_fraction(),
            NumberExponentMarker => self.finish_exponent_marker(),
            NumberExponentDigits => self.finish_exponent(),

            String { quote } => self.finish_string(quote),
            StringUtf8 { quote, partial } => self.finish_string_utf8(quote, partial),
            StringEscape { quote } => self.finish_string_escape(quote),
        }
    }

    /// Input has ended: complete the token in progress if it can legally end
    /// here, otherwise report it as truncated.
    fn finish_token_with_eof(&mut self) -> Result<Token, ParserError> {
        use Minor::*;

        let number = self.number;
        match self.minor {
            None | ValueLeadingWs | ValueLeadingComma | ValueLeadingColon | FieldLeadingWs
            | FieldLeadingComma => self.end_of_stream(),
            Bom(_) => Err(self.fail_here(SyntaxError::UnexpectedEof("in a byte-order mark"))),

            FieldName { .. } | FieldNameEscape { .. } | UnquotedFieldName => {
                Err(self.fail_here(SyntaxError::UnexpectedEof("in field name")))
            }

            Keyword(matched) if matched.is_complete() => {
                Ok(self.value_complete(matched.keyword().token()))
            }
            Keyword(matched) => Err(self.fail_here(SyntaxError::UnexpectedEof(
                matched.keyword().eof_context(),
            ))),
            ErrorToken => Err(self.unrecognized_token()),

            NumberLeadingZero | NumberIntegerDigits => Ok(self.complete_number()),
            NumberFractionDigits if number.fraction_len > 0 => Ok(self.complete_number()),
            NumberExponentDigits if number.exponent_len > 0 => Ok(self.complete_number()),
            NumberMinus => Err(self.fail_here(SyntaxError::UnexpectedEof(
                "in numeric value: expected digit (0-9) to follow minus sign",
            ))),
            NumberFractionDigits => Err(self.fail_here(SyntaxError::UnexpectedEof(
                "in numeric value: decimal point not followed by a digit",
            ))),
            NumberExponentMarker | NumberExponentDigits => {
                Err(self.fail_here(SyntaxError::UnexpectedEof(
                    "in numeric value: exponent indicator not followed by a digit",
                )))
            }

            String { .. } | StringUtf8 { .. } | StringEscape { .. } => {
                Err(self.fail_here(SyntaxError::UnexpectedEof("in a String value")))
            }
        }
    }

    /// Input has ended between tokens.
    fn end_of_stream(&mut self) -> Result<Token, ParserError> {
        if let Some(open) = self.context.current() {
            return Err(self.fail_here(SyntaxError::UnclosedContainer(open)));
        }
        self.minor = Minor::None;
        Ok(Token::EndOfStream)
    }

    /// The chunk ran out inside a token or separator: remember where, and
    /// finalize right away if no more input can come.
    fn suspend(&mut self, minor: Minor) -> Result<Token, ParserError> {
        self.minor = minor;
        if self.input.is_closed() {
            return self.finish_token_with_eof();
        }
        trace!(?minor, offset = self.input.offset(), "suspended");
        Ok(Token::NotAvailable)
    }

    /// A scalar or close marker completed; move to whatever may follow it.
    fn value_complete(&mut self, token: Token) -> Token {
        self.minor = Minor::None;
        self.major = match self.context.current() {
            None => Major::Root,
            Some(crate::ContainerKind::Array) => Major::ArrayElementNext,
            Some(crate::ContainerKind::Object) => Major::ObjectFieldNext,
        };
        token
    }

    fn escape_rules(&self) -> EscapeRules {
        EscapeRules {
            apostrophe: self.options.allow_single_quotes,
            any: self.options.allow_backslash_escaping_any_character,
        }
    }

    // ------------------------------------------------------------------------------------------------
    // Errors
    // ------------------------------------------------------------------------------------------------

    /// Error located at the next unread byte.
    fn fail_here(&self, source: SyntaxError) -> ParserError {
        self.fail_at(self.input.offset(), source)
    }

    /// Error located at the byte just read.
    fn fail_prev(&self, source: SyntaxError) -> ParserError {
        self.fail_at(self.input.offset().saturating_sub(1), source)
    }

    fn fail_at(&self, offset: usize, source: SyntaxError) -> ParserError {
        let err = ParserError::new(source, self.input.position_at(offset));
        #[cfg(any(test, feature = "fuzzing"))]
        assert!(!self.options.panic_on_error, "{err}");
        err
    }

    fn unrecognized_token(&self) -> ParserError {
        let start = self.input.offset().saturating_sub(self.error_token.len());
        self.fail_at(
            start,
            SyntaxError::UnrecognizedToken {
                token: self.error_token.clone(),
            },
        )
    }
}

impl<I: Interner> Iterator for NonBlockingTokenizer<I> {
    type Item = Result<Token, ParserError>;

    /// Yields tokens until more input is needed or the stream has ended.
    /// An error is yielded once, after which iteration stops.
    fn next(&mut self) -> Option<Self::Item> {
        if self.failed.is_some() {
            return None;
        }
        match self.next_token() {
            Ok(Token::NotAvailable | Token::EndOfStream) => None,
            other => Some(other),
        }
    }
}
