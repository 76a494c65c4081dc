//! Tokens produced by the tokenizer.

use alloc::string::String;

use crate::symbols::Name;

/// One lexical unit of JSON, or a stream marker.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(
    any(test, feature = "serde"),
    derive(serde::Serialize),
    serde(tag = "kind", content = "value")
)]
pub enum Token {
    /// `{`
    StartObject,
    /// `}`
    EndObject,
    /// `[`
    StartArray,
    /// `]`
    EndArray,
    /// An object key, interned so repeated keys share one allocation.
    FieldName(Name),
    /// A decoded string value.
    String(String),
    /// A number without fraction or exponent.
    Int(NumberText),
    /// A number with a fraction, an exponent, or both.
    Float(NumberText),
    /// `true`
    True,
    /// `false`
    False,
    /// `null`
    Null,
    /// The current chunk is exhausted; feed more bytes or signal end of
    /// input, then ask again.
    NotAvailable,
    /// End of input was signalled and every token has been returned.
    EndOfStream,
}

impl Token {
    /// Returns `true` for tokens that carry a complete scalar value.
    #[must_use]
    pub fn is_scalar(&self) -> bool {
        matches!(
            self,
            Self::String(_) | Self::Int(_) | Self::Float(_) | Self::True | Self::False | Self::Null
        )
    }

    /// Returns `true` for [`Token::NotAvailable`] and [`Token::EndOfStream`].
    #[must_use]
    pub fn is_marker(&self) -> bool {
        matches!(self, Self::NotAvailable | Self::EndOfStream)
    }

    /// The number payload of `Int` and `Float` tokens.
    #[must_use]
    pub fn as_number(&self) -> Option<&NumberText> {
        match self {
            Self::Int(n) | Self::Float(n) => Some(n),
            _ => None,
        }
    }
}

/// The text of a number token and the lengths of its parts.
///
/// The text is laid out as `[-]int[.fraction][(e|E)[+|-]exponent]`, and the
/// lengths are enough to slice every part back out without re-scanning.
///
/// ```rust
/// use jsonpull::{NonBlockingTokenizer, ParserOptions, Token};
///
/// let mut tokenizer = NonBlockingTokenizer::new(ParserOptions::default());
/// tokenizer.feed(&b"-8.9E-3"[..]).unwrap();
/// tokenizer.end_of_input();
/// let Token::Float(n) = tokenizer.next_token().unwrap() else { unreachable!() };
/// assert!(n.is_negative());
/// assert_eq!(n.integer_digits(), "8");
/// assert_eq!(n.fraction_digits(), Some("9"));
/// assert_eq!(n.exponent(), Some("-3"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(any(test, feature = "serde"), derive(serde::Serialize))]
pub struct NumberText {
    text: String,
    negative: bool,
    int_len: usize,
    fraction_len: usize,
    exponent_len: usize,
}

impl NumberText {
    pub(crate) fn new(
        text: String,
        negative: bool,
        int_len: usize,
        fraction_len: usize,
        exponent_len: usize,
    ) -> Self {
        debug_assert!(int_len > 0);
        Self {
            text,
            negative,
            int_len,
            fraction_len,
            exponent_len,
        }
    }

    /// The full number text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Whether the text starts with `-`.
    #[must_use]
    pub fn is_negative(&self) -> bool {
        self.negative
    }

    /// Number of integer digits.
    #[must_use]
    pub fn int_len(&self) -> usize {
        self.int_len
    }

    /// Number of fraction digits, `0` when there is no fraction.
    #[must_use]
    pub fn fraction_len(&self) -> usize {
        self.fraction_len
    }

    /// Number of exponent digits, `0` when there is no exponent.
    #[must_use]
    pub fn exponent_len(&self) -> usize {
        self.exponent_len
    }

    /// Whether the number has neither fraction nor exponent.
    #[must_use]
    pub fn is_integer(&self) -> bool {
        self.fraction_len == 0 && self.exponent_len == 0
    }

    fn int_start(&self) -> usize {
        usize::from(self.negative)
    }

    /// The integer digits, without sign.
    #[must_use]
    pub fn integer_digits(&self) -> &str {
        let start = self.int_start();
        &self.text[start..start + self.int_len]
    }

    /// The integer digits with redundant leading zeros removed, as strict
    /// JSON would write them. Differs from
    /// [`integer_digits`](Self::integer_digits) only for numbers read with
    /// [`allow_leading_zeros`](crate::ParserOptions::allow_leading_zeros).
    #[must_use]
    pub fn canonical_integer_digits(&self) -> &str {
        let digits = self.integer_digits();
        let trimmed = digits.trim_start_matches('0');
        if trimmed.is_empty() {
            &digits[digits.len() - 1..]
        } else {
            trimmed
        }
    }

    /// The fraction digits, without the decimal point.
    #[must_use]
    pub fn fraction_digits(&self) -> Option<&str> {
        if self.fraction_len == 0 {
            return None;
        }
        let start = self.int_start() + self.int_len + 1;
        Some(&self.text[start..start + self.fraction_len])
    }

    /// The exponent with its sign, if one was written, but without the `e`.
    #[must_use]
    pub fn exponent(&self) -> Option<&str> {
        if self.exponent_len == 0 {
            return None;
        }
        let mut start = self.int_start() + self.int_len + 1;
        if self.fraction_len > 0 {
            start += self.fraction_len + 1;
        }
        Some(&self.text[start..])
    }

    /// The value as an `i64`, if it is an integer in range.
    #[must_use]
    pub fn to_i64(&self) -> Option<i64> {
        if !self.is_integer() {
            return None;
        }
        self.text.parse().ok()
    }

    /// The value as the nearest `f64`.
    #[must_use]
    pub fn to_f64(&self) -> f64 {
        // The text always matches the JSON number grammar, which is a subset
        // of what `f64::from_str` accepts.
        self.text.parse().unwrap_or(f64::NAN)
    }
}

impl core::fmt::Display for NumberText {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.text)
    }
}
