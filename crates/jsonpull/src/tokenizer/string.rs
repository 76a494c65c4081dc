use super::{NonBlockingTokenizer, state::Minor};
use crate::{
    char_class::{ByteClass, string_class},
    error::{Found, ParserError, SyntaxError},
    escape_buffer::Step,
    symbols::Interner,
    token::Token,
    utf8::{Utf8Partial, decode_complete},
};

/// Outcome of running the escape decoder over the available bytes.
pub(super) enum Escaped {
    Char(char),
    /// A high surrogate is held in the escape buffer.
    HighSurrogate,
    Suspended,
}

enum Utf8Step {
    Char(char),
    Suspended(Utf8Partial),
}

impl<I: Interner> NonBlockingTokenizer<I> {
    /// The opening `quote` of a string value has been read.
    pub(super) fn start_string(&mut self, quote: u8) -> Result<Token, ParserError> {
        self.text.reset();
        self.escape.reset();
        self.finish_string(quote)
    }

    pub(super) fn finish_string(&mut self, quote: u8) -> Result<Token, ParserError> {
        loop {
            let available = self.input.remaining();
            let run = available
                .iter()
                .position(|&b| string_class(b) != ByteClass::Plain)
                .unwrap_or(available.len());
            if run > 0 {
                self.check_no_surrogate()?;
                self.text.append_ascii(&available[..run]);
                self.input.advance(run);
            }

            let Some(b) = self.input.peek() else {
                return self.suspend(Minor::String { quote });
            };
            match string_class(b) {
                ByteClass::Quote if b == quote => {
                    self.check_no_surrogate()?;
                    self.input.bump();
                    let value = self.text.contents_and_reset();
                    return Ok(self.value_complete(Token::String(value)));
                }
                ByteClass::Backslash => {
                    self.input.bump();
                    self.escape.begin();
                    match self.decode_escape()? {
                        Escaped::Char(ch) => self.text.append(ch),
                        Escaped::HighSurrogate => {}
                        Escaped::Suspended => return self.suspend(Minor::StringEscape { quote }),
                    }
                }
                ByteClass::Control if !self.options.allow_unquoted_control_chars => {
                    return Err(self.fail_here(SyntaxError::UnquotedControlChar {
                        found: Found(b),
                        context: "string value",
                    }));
                }
                ByteClass::Plain | ByteClass::Quote | ByteClass::Control => {
                    self.check_no_surrogate()?;
                    self.input.bump();
                    self.text.append(char::from(b));
                }
                ByteClass::Utf8Lead(width) => {
                    self.check_no_surrogate()?;
                    if let Some((ch, len)) = decode_complete(self.input.remaining()) {
                        self.input.advance(len);
                        self.text.append(ch);
                        continue;
                    }
                    self.input.bump();
                    match self.decode_utf8(Utf8Partial::start(b, width))? {
                        Utf8Step::Char(ch) => self.text.append(ch),
                        Utf8Step::Suspended(partial) => {
                            return self.suspend(Minor::StringUtf8 { quote, partial });
                        }
                    }
                }
                ByteClass::Invalid => {
                    return Err(self.fail_here(SyntaxError::InvalidUtf8Start(b)));
                }
            }
        }
    }

    pub(super) fn finish_string_escape(&mut self, quote: u8) -> Result<Token, ParserError> {
        match self.decode_escape()? {
            Escaped::Char(ch) => self.text.append(ch),
            Escaped::HighSurrogate => {}
            Escaped::Suspended => return self.suspend(Minor::StringEscape { quote }),
        }
        self.finish_string(quote)
    }

    pub(super) fn finish_string_utf8(
        &mut self,
        quote: u8,
        partial: Utf8Partial,
    ) -> Result<Token, ParserError> {
        match self.decode_utf8(partial)? {
            Utf8Step::Char(ch) => self.text.append(ch),
            Utf8Step::Suspended(partial) => {
                return self.suspend(Minor::StringUtf8 { quote, partial });
            }
        }
        self.finish_string(quote)
    }

    /// Feeds available bytes to the escape decoder until the escape is done
    /// or the chunk runs out.
    pub(super) fn decode_escape(&mut self) -> Result<Escaped, ParserError> {
        let rules = self.escape_rules();
        while let Some(b) = self.input.peek() {
            let step = self.escape.feed(b, rules).map_err(|e| self.fail_here(e))?;
            self.input.bump();
            match step {
                Step::NeedMore => {}
                Step::Char(ch) => return Ok(Escaped::Char(ch)),
                Step::HighSurrogate => return Ok(Escaped::HighSurrogate),
            }
        }
        Ok(Escaped::Suspended)
    }

    fn decode_utf8(&mut self, mut partial: Utf8Partial) -> Result<Utf8Step, ParserError> {
        while let Some(b) = self.input.peek() {
            let decoded = partial.push(b).map_err(|e| self.fail_here(e))?;
            self.input.bump();
            if let Some(ch) = decoded {
                return Ok(Utf8Step::Char(ch));
            }
        }
        Ok(Utf8Step::Suspended(partial))
    }

    /// A high surrogate may only be followed by its low half.
    pub(super) fn check_no_surrogate(&self) -> Result<(), ParserError> {
        self.escape
            .expect_no_surrogate()
            .map_err(|e| self.fail_here(e))
    }
}
