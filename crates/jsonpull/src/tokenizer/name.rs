use tracing::trace;

use super::{
    NonBlockingTokenizer,
    state::{Major, Minor},
    string::Escaped,
};
use crate::{
    char_class::{ByteClass, is_identifier_byte, is_plain_name_byte, string_class},
    error::{Found, ParserError, SyntaxError},
    symbols::Interner,
    token::Token,
};

/// Longest name the fast path handles, in bytes.
const FAST_NAME_MAX: usize = 12;

impl<I: Interner> NonBlockingTokenizer<I> {
    /// The opening `quote` of a field name has been read.
    pub(super) fn start_field_name(&mut self, quote: u8) -> Result<Token, ParserError> {
        self.name.clear();
        self.escape.reset();
        if quote == b'"' && self.input.remaining().len() > FAST_NAME_MAX {
            if let Some(token) = self.fast_field_name()? {
                return Ok(token);
            }
        }
        self.finish_field_name(quote)
    }

    /// Short names without escapes whose closing quote is already buffered.
    fn fast_field_name(&mut self) -> Result<Option<Token>, ParserError> {
        let available = self.input.remaining();
        let Some(len) = available[..=FAST_NAME_MAX]
            .iter()
            .position(|&b| !is_plain_name_byte(b))
        else {
            return Ok(None);
        };
        if available[len] != b'"' {
            return Ok(None);
        }
        for &b in &available[..len] {
            self.name.push(b);
        }
        self.input.advance(len + 1);
        self.complete_field_name().map(Some)
    }

    pub(super) fn finish_field_name(&mut self, quote: u8) -> Result<Token, ParserError> {
        loop {
            let Some(b) = self.input.peek() else {
                return self.suspend(Minor::FieldName { quote });
            };
            if b == quote {
                self.check_no_surrogate()?;
                self.input.bump();
                return self.complete_field_name();
            }
            match string_class(b) {
                ByteClass::Backslash => {
                    self.input.bump();
                    self.escape.begin();
                    match self.decode_escape()? {
                        Escaped::Char(ch) => self.name.push_char(ch),
                        Escaped::HighSurrogate => {}
                        Escaped::Suspended => {
                            return self.suspend(Minor::FieldNameEscape { quote });
                        }
                    }
                }
                ByteClass::Control if !self.options.allow_unquoted_control_chars => {
                    return Err(self.fail_here(SyntaxError::UnquotedControlChar {
                        found: Found(b),
                        context: "name",
                    }));
                }
                _ => {
                    self.check_no_surrogate()?;
                    self.input.bump();
                    self.name.push(b);
                }
            }
        }
    }

    pub(super) fn finish_field_name_escape(&mut self, quote: u8) -> Result<Token, ParserError> {
        match self.decode_escape()? {
            Escaped::Char(ch) => self.name.push_char(ch),
            Escaped::HighSurrogate => {}
            Escaped::Suspended => return self.suspend(Minor::FieldNameEscape { quote }),
        }
        self.finish_field_name(quote)
    }

    /// Reads an unquoted name; the first byte has been checked but not read.
    pub(super) fn finish_unquoted_name(&mut self) -> Result<Token, ParserError> {
        while let Some(b) = self.input.peek() {
            if !is_identifier_byte(b) {
                return self.complete_field_name();
            }
            self.input.bump();
            self.name.push(b);
        }
        self.suspend(Minor::UnquotedFieldName)
    }

    fn complete_field_name(&mut self) -> Result<Token, ParserError> {
        let Some(name) = self.interner.intern(&self.name) else {
            return Err(self.fail_prev(SyntaxError::InvalidNameEncoding));
        };
        trace!(%name, "field name");
        self.minor = Minor::None;
        self.major = Major::ObjectValue;
        Ok(Token::FieldName(name))
    }
}
