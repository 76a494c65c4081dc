use super::{NonBlockingTokenizer, NumberState, state::Minor};
use crate::{
    char_class::ends_value,
    error::{Found, ParserError, SyntaxError},
    symbols::Interner,
    token::{NumberText, Token},
};

impl<I: Interner> NonBlockingTokenizer<I> {
    /// `-` has been read.
    pub(super) fn start_negative(&mut self) -> Result<Token, ParserError> {
        self.text.reset();
        self.text.append('-');
        self.number = NumberState {
            negative: true,
            ..NumberState::default()
        };
        self.finish_minus()
    }

    /// A leading `0` has been read.
    pub(super) fn start_leading_zero(&mut self) -> Result<Token, ParserError> {
        self.text.reset();
        self.text.append('0');
        self.number = NumberState {
            int_len: 1,
            ..NumberState::default()
        };
        self.finish_leading_zero()
    }

    /// A digit `1` to `9` has been read.
    pub(super) fn start_positive(&mut self, first: u8) -> Result<Token, ParserError> {
        self.text.reset();
        self.text.append(char::from(first));
        self.number = NumberState {
            int_len: 1,
            ..NumberState::default()
        };
        self.finish_integer()
    }

    pub(super) fn finish_minus(&mut self) -> Result<Token, ParserError> {
        let Some(b) = self.input.peek() else {
            return self.suspend(Minor::NumberMinus);
        };
        match b {
            b'0' => {
                self.input.bump();
                self.text.append('0');
                self.number.int_len = 1;
                self.finish_leading_zero()
            }
            b'1'..=b'9' => {
                self.input.bump();
                self.text.append(char::from(b));
                self.number.int_len = 1;
                self.finish_integer()
            }
            _ => Err(self.fail_here(SyntaxError::MinusWithoutDigit { found: Found(b) })),
        }
    }

    /// The integer part so far is a run of `0`s, longer than one only when
    /// leading zeros are allowed. The zeros stay in the text as written.
    pub(super) fn finish_leading_zero(&mut self) -> Result<Token, ParserError> {
        loop {
            let Some(b) = self.input.peek() else {
                return self.suspend(Minor::NumberLeadingZero);
            };
            match b {
                b'0'..=b'9' if !self.options.allow_leading_zeros => {
                    return Err(self.fail_here(SyntaxError::LeadingZeros));
                }
                b'0' => {
                    self.input.bump();
                    self.text.append('0');
                    self.number.int_len += 1;
                }
                b'1'..=b'9' => {
                    self.input.bump();
                    self.text.append(char::from(b));
                    self.number.int_len += 1;
                    return self.finish_integer();
                }
                _ => return self.after_integer(b),
            }
        }
    }

    pub(super) fn finish_integer(&mut self) -> Result<Token, ParserError> {
        self.number.int_len += self.copy_digits();
        let Some(b) = self.input.peek() else {
            return self.suspend(Minor::NumberIntegerDigits);
        };
        self.after_integer(b)
    }

    /// `b` (not yet consumed) follows the integer digits.
    fn after_integer(&mut self, b: u8) -> Result<Token, ParserError> {
        match b {
            b'.' => {
                self.input.bump();
                self.text.append('.');
                self.finish_fraction()
            }
            b'e' | b'E' => {
                self.input.bump();
                self.text.append(char::from(b));
                self.finish_exponent_marker()
            }
            _ if ends_value(b) => Ok(self.complete_number()),
            _ => Err(self.fail_here(SyntaxError::UnexpectedNumberChar { found: Found(b) })),
        }
    }

    pub(super) fn finish_fraction(&mut self) -> Result<Token, ParserError> {
        self.number.fraction_len += self.copy_digits();
        let Some(b) = self.input.peek() else {
            return self.suspend(Minor::NumberFractionDigits);
        };
        if self.number.fraction_len == 0 {
            return Err(self.fail_here(SyntaxError::FractionWithoutDigit { found: Found(b) }));
        }
        match b {
            b'e' | b'E' => {
                self.input.bump();
                self.text.append(char::from(b));
                self.finish_exponent_marker()
            }
            _ if ends_value(b) => Ok(self.complete_number()),
            _ => Err(self.fail_here(SyntaxError::UnexpectedNumberChar { found: Found(b) })),
        }
    }

    /// `e` or `E` has been read; an optional sign may follow.
    pub(super) fn finish_exponent_marker(&mut self) -> Result<Token, ParserError> {
        let Some(b) = self.input.peek() else {
            return self.suspend(Minor::NumberExponentMarker);
        };
        if b == b'+' || b == b'-' {
            self.input.bump();
            self.text.append(char::from(b));
        }
        self.finish_exponent()
    }

    pub(super) fn finish_exponent(&mut self) -> Result<Token, ParserError> {
        self.number.exponent_len += self.copy_digits();
        let Some(b) = self.input.peek() else {
            return self.suspend(Minor::NumberExponentDigits);
        };
        if self.number.exponent_len == 0 {
            return Err(self.fail_here(SyntaxError::ExponentWithoutDigit { found: Found(b) }));
        }
        if ends_value(b) {
            Ok(self.complete_number())
        } else {
            Err(self.fail_here(SyntaxError::UnexpectedNumberChar { found: Found(b) }))
        }
    }

    /// Moves the run of ASCII digits at the cursor into the text buffer.
    fn copy_digits(&mut self) -> usize {
        let available = self.input.remaining();
        let run = available.iter().take_while(|b| b.is_ascii_digit()).count();
        self.text.append_ascii(&available[..run]);
        self.input.advance(run);
        run
    }

    pub(super) fn complete_number(&mut self) -> Token {
        let NumberState {
            negative,
            int_len,
            fraction_len,
            exponent_len,
        } = self.number;
        let text = NumberText::new(
            self.text.contents_and_reset(),
            negative,
            int_len,
            fraction_len,
            exponent_len,
        );
        let token = if text.is_integer() {
            Token::Int(text)
        } else {
            Token::Float(text)
        };
        self.value_complete(token)
    }
}
