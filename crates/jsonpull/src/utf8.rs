//! Resumable decoding of multi-byte UTF-8 sequences inside string values.

use crate::error::SyntaxError;

/// A multi-byte sequence whose lead byte has been read but whose
/// continuation bytes may still be in a later chunk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Utf8Partial {
    value: u32,
    /// Continuation bytes still expected.
    remaining: u8,
    /// Total width of the sequence, 2 to 4.
    width: u8,
}

impl Utf8Partial {
    pub(crate) fn start(lead: u8, width: u8) -> Self {
        debug_assert!((2..=4).contains(&width));
        let payload = match width {
            2 => lead & 0x1F,
            3 => lead & 0x0F,
            _ => lead & 0x07,
        };
        Self {
            value: u32::from(payload),
            remaining: width - 1,
            width,
        }
    }

    /// Feeds one continuation byte. Returns the decoded character once the
    /// last byte is in.
    pub(crate) fn push(&mut self, b: u8) -> Result<Option<char>, SyntaxError> {
        if b & 0xC0 != 0x80 {
            return Err(SyntaxError::InvalidUtf8Continuation(b));
        }
        self.value = (self.value << 6) | u32::from(b & 0x3F);
        self.remaining -= 1;
        if self.remaining > 0 {
            return Ok(None);
        }

        let min = match self.width {
            2 => 0x80,
            3 => 0x800,
            _ => 0x1_0000,
        };
        if self.value < min {
            return Err(SyntaxError::InvalidCodePoint(self.value));
        }
        char::from_u32(self.value)
            .map(Some)
            .ok_or(SyntaxError::InvalidCodePoint(self.value))
    }
}

/// Decodes one complete, valid sequence at the start of `bytes`.
///
/// Returns `None` when the sequence is cut short or malformed; the caller
/// then falls back to [`Utf8Partial`] for resumption or a precise error.
#[inline]
pub(crate) fn decode_complete(bytes: &[u8]) -> Option<(char, usize)> {
    match bstr::decode_utf8(bytes) {
        (Some(ch), len) => Some((ch, len)),
        (None, _) => None,
    }
}
