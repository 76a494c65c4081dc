#![allow(clippy::struct_excessive_bools)]

/// Configuration options for the tokenizer.
///
/// Every option relaxes strict JSON grammar in one specific way. With all of
/// them off the tokenizer accepts exactly RFC 8259 JSON text.
///
/// # Examples
///
/// ```rust
/// use jsonpull::{NonBlockingTokenizer, ParserOptions, Token};
///
/// let options = ParserOptions {
///     allow_trailing_comma: true,
///     ..Default::default()
/// };
/// let mut tokenizer = NonBlockingTokenizer::new(options);
/// tokenizer.feed(&b"[1,]"[..]).unwrap();
/// tokenizer.end_of_input();
/// let tokens: Vec<Token> = tokenizer.map(Result::unwrap).collect();
/// assert_eq!(tokens.len(), 3);
/// ```
///
/// # Default
///
/// All options default to `false`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParserOptions {
    /// Whether to accept apostrophes as string and field name quotes.
    ///
    /// Inside an apostrophe-quoted string a double quote is ordinary content,
    /// and `\'` is accepted as an escape for the apostrophe.
    ///
    /// # Examples
    ///
    /// ```json
    /// {'name': 'say "hi"'}
    /// ```
    ///
    /// # Default
    ///
    /// `false`
    pub allow_single_quotes: bool,

    /// Whether to accept bare identifiers as field names.
    ///
    /// An unquoted name consists of ASCII letters, digits, `_`, `$` and
    /// non-ASCII bytes, and may not start with a digit.
    ///
    /// # Examples
    ///
    /// ```json
    /// {name: "value", $id: 1}
    /// ```
    ///
    /// # Default
    ///
    /// `false`
    pub allow_unquoted_field_names: bool,

    /// Whether to accept a single comma right before `]` or `}`.
    ///
    /// # Examples
    ///
    /// ```json
    /// [1, 2, 3,]
    /// ```
    ///
    /// # Default
    ///
    /// `false`
    pub allow_trailing_comma: bool,

    /// Whether empty array slots produce `null` tokens.
    ///
    /// A comma where an array element was expected yields [`Token::Null`]
    /// without consuming the comma. After a comma, a closing `]` also yields a
    /// `null` unless [`allow_trailing_comma`](Self::allow_trailing_comma) is
    /// set, which takes precedence.
    ///
    /// # Examples
    ///
    /// ```json
    /// [1,,3]
    /// ```
    ///
    /// # Default
    ///
    /// `false`
    ///
    /// [`Token::Null`]: crate::Token::Null
    pub allow_missing_values: bool,

    /// Whether numbers may carry redundant leading zeros.
    ///
    /// The number text keeps the zeros as written, so `007` is reported as
    /// `007`; [`NumberText::canonical_integer_digits`] gives `7`.
    ///
    /// [`NumberText::canonical_integer_digits`]: crate::NumberText::canonical_integer_digits
    ///
    /// # Default
    ///
    /// `false`
    pub allow_leading_zeros: bool,

    /// Whether a backslash may escape any character, yielding the character
    /// itself.
    ///
    /// # Default
    ///
    /// `false`
    pub allow_backslash_escaping_any_character: bool,

    /// Whether raw control characters (below U+0020) may appear inside
    /// strings and field names.
    ///
    /// # Default
    ///
    /// `false`
    pub allow_unquoted_control_chars: bool,

    /// Whether more than one root value may appear in the stream.
    ///
    /// Supports JSON Lines and concatenated JSON. Keywords and numbers need a
    /// whitespace separator from a following keyword or number.
    ///
    /// # Examples
    ///
    /// ```json
    /// {"a": 1} {"a": 2}
    /// 3 4 5
    /// ```
    ///
    /// # Default
    ///
    /// `false`
    pub allow_multiple_root_values: bool,

    #[cfg(any(test, feature = "fuzzing"))]
    /// Panic on syntax errors instead of returning them.
    ///
    /// Enabled only in test and fuzzing builds to produce backtraces on
    /// tokenizer failures.
    pub panic_on_error: bool,
}
