//! Utilities for decoding backslash escapes one byte at a time.
//!
//! The [`EscapeBuffer`] type is fed the bytes that follow a backslash and
//! produces a [`char`] once the escape is complete. Four-digit `\uXXXX`
//! escapes may stop after any digit and resume with the next chunk; the
//! buffer keeps the partial code unit and digit count.
//!
//! UTF-16 surrogate escapes are paired: a high surrogate is held until the
//! following `\uXXXX` supplies the low half, and the pair decodes to a single
//! `char`.
//!
//! # Errors
//!
//! - An unknown escape character yields [`SyntaxError::InvalidEscape`], unless
//!   the [`EscapeRules`] accept it.
//! - A non-hexadecimal byte inside `\u` yields [`SyntaxError::InvalidHexDigit`].
//! - A surrogate without its partner yields [`SyntaxError::UnpairedSurrogate`].

use crate::error::{Found, SyntaxError};

/// Which non-standard escapes are accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub(crate) struct EscapeRules {
    /// `\'`
    pub apostrophe: bool,
    /// A backslash before any ASCII character yields that character.
    pub any: bool,
}

/// What happened after feeding one more byte into the escape decoder?
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Step {
    /// The escape is not finished yet.
    NeedMore,
    /// The escape decoded to this character.
    Char(char),
    /// A high surrogate was decoded; its low half must come next.
    HighSurrogate,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct EscapeBuffer {
    /// Code unit accumulated from hex digits so far.
    value: u32,
    /// Hex digits read, or `None` while waiting for the byte after the
    /// backslash.
    digits: Option<u8>,
    /// A high surrogate waiting for its low half.
    high_surrogate: Option<u32>,
}

impl EscapeBuffer {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Forgets everything, including a pending surrogate. Called at the start
    /// of every string or name.
    pub(crate) fn reset(&mut self) {
        *self = Self::default();
    }

    /// Starts a new escape after a backslash.
    pub(crate) fn begin(&mut self) {
        self.value = 0;
        self.digits = None;
    }

    #[cfg(test)]
    pub(crate) fn has_pending_surrogate(&self) -> bool {
        self.high_surrogate.is_some()
    }

    /// Fails if a high surrogate is still waiting for its low half. Called
    /// before any content that is not a `\u` escape, and at the closing quote.
    #[inline]
    pub(crate) fn expect_no_surrogate(&self) -> Result<(), SyntaxError> {
        match self.high_surrogate {
            Some(high) => Err(SyntaxError::UnpairedSurrogate(high)),
            None => Ok(()),
        }
    }

    /// Feeds the next byte of the escape.
    pub(crate) fn feed(&mut self, b: u8, rules: EscapeRules) -> Result<Step, SyntaxError> {
        let Some(digits) = self.digits else {
            return self.feed_escape_char(b, rules);
        };

        let digit = char::from(b)
            .to_digit(16)
            .ok_or(SyntaxError::InvalidHexDigit { found: Found(b) })?;
        self.value = (self.value << 4) | digit;
        if digits < 3 {
            self.digits = Some(digits + 1);
            return Ok(Step::NeedMore);
        }

        self.digits = None;
        let unit = self.value;
        match (unit, self.high_surrogate.take()) {
            (0xD800..=0xDBFF, None) => {
                self.high_surrogate = Some(unit);
                Ok(Step::HighSurrogate)
            }
            (0xDC00..=0xDFFF, Some(high)) => {
                let code = 0x1_0000 + ((high - 0xD800) << 10) + (unit - 0xDC00);
                char::from_u32(code)
                    .map(Step::Char)
                    .ok_or(SyntaxError::InvalidCodePoint(code))
            }
            (_, Some(high)) => Err(SyntaxError::UnpairedSurrogate(high)),
            (0xDC00..=0xDFFF, None) => Err(SyntaxError::UnpairedSurrogate(unit)),
            (_, None) => char::from_u32(unit)
                .map(Step::Char)
                .ok_or(SyntaxError::InvalidCodePoint(unit)),
        }
    }

    fn feed_escape_char(&mut self, b: u8, rules: EscapeRules) -> Result<Step, SyntaxError> {
        if b == b'u' {
            self.digits = Some(0);
            self.value = 0;
            return Ok(Step::NeedMore);
        }

        let ch = match b {
            b'"' => '"',
            b'\\' => '\\',
            b'/' => '/',
            b'b' => '\u{0008}',
            b'f' => '\u{000C}',
            b'n' => '\n',
            b'r' => '\r',
            b't' => '\t',
            b'\'' if rules.apostrophe || rules.any => '\'',
            _ if rules.any && b.is_ascii() => char::from(b),
            _ => return Err(SyntaxError::InvalidEscape { found: Found(b) }),
        };
        self.expect_no_surrogate()?;
        Ok(Step::Char(ch))
    }
}
