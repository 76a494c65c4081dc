//! Separators, containers, keywords and the dispatch on a value's first byte.

use tracing::trace;

use super::{MAX_ERROR_TOKEN_LENGTH, NonBlockingTokenizer, state::Major, state::Minor};
use crate::{
    char_class::{ends_value, is_identifier_byte},
    context::ContainerKind,
    error::{Found, ParserError, SyntaxError},
    literal_buffer::{Keyword, LiteralMatch, Step},
    symbols::Interner,
    token::Token,
};

const BOM: [u8; 3] = [0xEF, 0xBB, 0xBF];

const EXPECTED_VALUE: &str =
    "a valid value (JSON String, Number, Array, Object or token 'null', 'true' or 'false')";

impl<I: Interner> NonBlockingTokenizer<I> {
    /// Skips insignificant whitespace and returns the next byte without
    /// consuming it, or `None` if the chunk ran out.
    fn skip_whitespace(&mut self) -> Result<Option<u8>, ParserError> {
        while let Some(b) = self.input.peek() {
            match b {
                b' ' | b'\t' => self.input.bump(),
                b'\n' => {
                    self.input.bump();
                    self.input.line_feed();
                }
                b'\r' => {
                    self.input.bump();
                    self.input.carriage_return();
                }
                0..0x20 => {
                    return Err(self.fail_here(SyntaxError::InvalidWhitespace { found: Found(b) }));
                }
                _ => return Ok(Some(b)),
            }
        }
        Ok(None)
    }

    // ------------------------------------------------------------------------------------------------
    // Root level
    // ------------------------------------------------------------------------------------------------

    pub(super) fn start_document(&mut self) -> Result<Token, ParserError> {
        if self.input.offset() == 0 && self.input.peek() == Some(BOM[0]) {
            self.input.bump();
            return self.finish_bom(1);
        }
        self.start_root_value()
    }

    pub(super) fn finish_bom(&mut self, mut matched: u8) -> Result<Token, ParserError> {
        while let Some(&expected) = BOM.get(usize::from(matched)) {
            let Some(b) = self.input.peek() else {
                return self.suspend(Minor::Bom(matched));
            };
            if b != expected {
                return Err(self.fail_here(SyntaxError::UnexpectedCharacter {
                    found: Found(b),
                    expected: "the rest of a UTF-8 byte-order mark",
                }));
            }
            self.input.bump();
            matched += 1;
        }
        trace!("skipped byte-order mark");
        self.minor = Minor::None;
        self.start_root_value()
    }

    fn start_root_value(&mut self) -> Result<Token, ParserError> {
        let Some(b) = self.skip_whitespace()? else {
            return self.suspend(Minor::ValueLeadingWs);
        };
        self.start_value(b)
    }

    pub(super) fn start_after_root(&mut self) -> Result<Token, ParserError> {
        let Some(b) = self.skip_whitespace()? else {
            return self.suspend(Minor::ValueLeadingWs);
        };
        if !self.options.allow_multiple_root_values {
            return Err(self.fail_here(SyntaxError::TrailingContent { found: Found(b) }));
        }
        self.start_value(b)
    }

    // ------------------------------------------------------------------------------------------------
    // Arrays
    // ------------------------------------------------------------------------------------------------

    pub(super) fn start_first_element(&mut self) -> Result<Token, ParserError> {
        let Some(b) = self.skip_whitespace()? else {
            return self.suspend(Minor::ValueLeadingWs);
        };
        self.start_value(b)
    }

    pub(super) fn start_next_element(&mut self) -> Result<Token, ParserError> {
        let Some(b) = self.skip_whitespace()? else {
            return self.suspend(Minor::ValueLeadingWs);
        };
        match b {
            b',' => {
                self.input.bump();
                self.value_after_comma()
            }
            b']' | b'}' => self.close_container(b),
            _ => Err(self.fail_here(SyntaxError::ExpectedComma {
                found: Found(b),
                context: ContainerKind::Array,
            })),
        }
    }

    /// The comma before an array element has been read.
    pub(super) fn value_after_comma(&mut self) -> Result<Token, ParserError> {
        let Some(b) = self.skip_whitespace()? else {
            return self.suspend(Minor::ValueLeadingComma);
        };
        if b == b']' {
            if self.options.allow_trailing_comma {
                return self.close_container(b);
            }
            if self.options.allow_missing_values {
                trace!("missing value before close marker");
                return Ok(self.value_complete(Token::Null));
            }
            return Err(self.fail_here(SyntaxError::TrailingComma { found: Found(b) }));
        }
        self.start_value(b)
    }

    // ------------------------------------------------------------------------------------------------
    // Objects
    // ------------------------------------------------------------------------------------------------

    pub(super) fn start_first_field(&mut self) -> Result<Token, ParserError> {
        let Some(b) = self.skip_whitespace()? else {
            return self.suspend(Minor::FieldLeadingWs);
        };
        match b {
            b'"' => {
                self.input.bump();
                self.start_field_name(b)
            }
            b'}' => self.close_container(b),
            _ => self.start_odd_name(b),
        }
    }

    pub(super) fn start_next_field(&mut self) -> Result<Token, ParserError> {
        let Some(b) = self.skip_whitespace()? else {
            return self.suspend(Minor::FieldLeadingWs);
        };
        match b {
            b',' => {
                self.input.bump();
                self.field_after_comma()
            }
            b'}' | b']' => self.close_container(b),
            _ => Err(self.fail_here(SyntaxError::ExpectedComma {
                found: Found(b),
                context: ContainerKind::Object,
            })),
        }
    }

    /// The comma before a field name has been read.
    pub(super) fn field_after_comma(&mut self) -> Result<Token, ParserError> {
        let Some(b) = self.skip_whitespace()? else {
            return self.suspend(Minor::FieldLeadingComma);
        };
        match b {
            b'"' => {
                self.input.bump();
                self.start_field_name(b)
            }
            b'}' if self.options.allow_trailing_comma => self.close_container(b),
            b'}' => Err(self.fail_here(SyntaxError::TrailingComma { found: Found(b) })),
            _ => self.start_odd_name(b),
        }
    }

    pub(super) fn start_field_value(&mut self) -> Result<Token, ParserError> {
        let Some(b) = self.skip_whitespace()? else {
            return self.suspend(Minor::ValueLeadingWs);
        };
        if b != b':' {
            return Err(self.fail_here(SyntaxError::ExpectedColon { found: Found(b) }));
        }
        self.input.bump();
        self.value_after_colon()
    }

    /// The colon after a field name has been read.
    pub(super) fn value_after_colon(&mut self) -> Result<Token, ParserError> {
        let Some(b) = self.skip_whitespace()? else {
            return self.suspend(Minor::ValueLeadingColon);
        };
        if b == b'}' {
            return Err(self.fail_here(SyntaxError::MissingValue { found: Found(b) }));
        }
        self.start_value(b)
    }

    // ------------------------------------------------------------------------------------------------
    // Values
    // ------------------------------------------------------------------------------------------------

    /// Starts the value whose first byte is `b` (not yet consumed).
    fn start_value(&mut self, b: u8) -> Result<Token, ParserError> {
        match b {
            b'"' => {
                self.input.bump();
                self.start_string(b)
            }
            b'-' => {
                self.input.bump();
                self.start_negative()
            }
            b'0' => {
                self.input.bump();
                self.start_leading_zero()
            }
            b'1'..=b'9' => {
                self.input.bump();
                self.start_positive(b)
            }
            b'[' => {
                self.input.bump();
                Ok(self.open_container(ContainerKind::Array))
            }
            b'{' => {
                self.input.bump();
                Ok(self.open_container(ContainerKind::Object))
            }
            b']' | b'}' => self.close_container(b),
            _ => match Keyword::from_first_byte(b) {
                Some(keyword) => {
                    self.input.bump();
                    self.start_keyword(keyword)
                }
                None => self.start_unexpected_value(b),
            },
        }
    }

    /// Bytes that only start a value under some option, or never.
    fn start_unexpected_value(&mut self, b: u8) -> Result<Token, ParserError> {
        match b {
            b'\'' if self.options.allow_single_quotes => {
                self.input.bump();
                self.start_string(b)
            }
            b',' if self.options.allow_missing_values && self.context.in_array() => {
                trace!("missing value before comma");
                Ok(self.value_complete(Token::Null))
            }
            _ if b.is_ascii_alphabetic() => self.start_error_token(b""),
            _ => Err(self.fail_here(SyntaxError::UnexpectedCharacter {
                found: Found(b),
                expected: EXPECTED_VALUE,
            })),
        }
    }

    /// Bytes other than `"` where a field name should start.
    fn start_odd_name(&mut self, b: u8) -> Result<Token, ParserError> {
        match b {
            b'\'' if self.options.allow_single_quotes => {
                self.input.bump();
                self.start_field_name(b)
            }
            b']' => self.close_container(b),
            _ if self.options.allow_unquoted_field_names
                && crate::char_class::is_unquoted_name_start(b) =>
            {
                self.name.clear();
                self.finish_unquoted_name()
            }
            _ => Err(self.fail_here(SyntaxError::UnexpectedCharacter {
                found: Found(b),
                expected: "double-quote to start field name",
            })),
        }
    }

    fn open_container(&mut self, kind: ContainerKind) -> Token {
        self.context.open(kind);
        trace!(depth = self.context.depth(), "opened {kind}");
        self.minor = Minor::None;
        match kind {
            ContainerKind::Array => {
                self.major = Major::ArrayElementFirst;
                Token::StartArray
            }
            ContainerKind::Object => {
                self.major = Major::ObjectFieldFirst;
                Token::StartObject
            }
        }
    }

    /// Closes the innermost container with `marker` (not yet consumed).
    fn close_container(&mut self, marker: u8) -> Result<Token, ParserError> {
        match self.context.close(marker) {
            Ok(kind) => {
                self.input.bump();
                trace!(depth = self.context.depth(), "closed {kind}");
                let token = match kind {
                    ContainerKind::Array => Token::EndArray,
                    ContainerKind::Object => Token::EndObject,
                };
                Ok(self.value_complete(token))
            }
            Err(source) => Err(self.fail_here(source)),
        }
    }

    // ------------------------------------------------------------------------------------------------
    // Keywords
    // ------------------------------------------------------------------------------------------------

    /// The first byte of `keyword` has been read.
    fn start_keyword(&mut self, keyword: Keyword) -> Result<Token, ParserError> {
        let matched = LiteralMatch::after_first(keyword);
        let rest = matched.rest();
        let available = self.input.remaining();
        if available.len() > rest.len()
            && available.starts_with(rest)
            && ends_value(available[rest.len()])
        {
            self.input.advance(rest.len());
            return Ok(self.value_complete(keyword.token()));
        }
        self.finish_keyword(matched)
    }

    pub(super) fn finish_keyword(&mut self, mut matched: LiteralMatch) -> Result<Token, ParserError> {
        loop {
            let Some(b) = self.input.peek() else {
                return self.suspend(Minor::Keyword(matched));
            };
            if matched.is_complete() {
                if ends_value(b) {
                    return Ok(self.value_complete(matched.keyword().token()));
                }
                return self.start_error_token(matched.matched_text());
            }
            match matched.step(b) {
                Step::NeedMore | Step::Done => self.input.bump(),
                Step::Reject => return self.start_error_token(matched.matched_text()),
            }
        }
    }

    // ------------------------------------------------------------------------------------------------
    // Unrecognized tokens
    // ------------------------------------------------------------------------------------------------

    /// Collects the rest of a bare word so the error can quote it. `prefix`
    /// holds the bytes of it already consumed.
    fn start_error_token(&mut self, prefix: &[u8]) -> Result<Token, ParserError> {
        self.error_token.clear();
        self.error_token.extend_from_slice(prefix);
        self.finish_error_token()
    }

    pub(super) fn finish_error_token(&mut self) -> Result<Token, ParserError> {
        while let Some(b) = self.input.peek() {
            if !is_identifier_byte(b) || self.error_token.len() >= MAX_ERROR_TOKEN_LENGTH {
                return Err(self.unrecognized_token());
            }
            self.input.bump();
            self.error_token.push(b);
        }
        self.suspend(Minor::ErrorToken)
    }
}
