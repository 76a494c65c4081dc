use alloc::string::ToString;

use rstest::rstest;

use super::utils::{tokenize_bytewise, tokenize_err};
use crate::{ErrorKind, ParserOptions, SyntaxError};

#[rstest]
// structural
#[case::missing_comma("[1 2]", ErrorKind::Structural, "was expecting comma to separate ARRAY entries", 1, 4)]
#[case::missing_object_comma(r#"{"a":1 "b":2}"#, ErrorKind::Structural, "was expecting comma to separate OBJECT entries", 1, 8)]
#[case::missing_colon(r#"{"a" 1}"#, ErrorKind::Structural, "was expecting a colon", 1, 6)]
#[case::trailing_comma_array("[1,]", ErrorKind::Structural, "trailing comma not allowed", 1, 4)]
#[case::trailing_comma_object(r#"{"a":1,}"#, ErrorKind::Structural, "trailing comma not allowed", 1, 8)]
#[case::missing_value(r#"{"a":}"#, ErrorKind::Structural, "expected a value", 1, 6)]
#[case::mismatched_array("[1}", ErrorKind::Structural, "expected ']'", 1, 3)]
#[case::mismatched_object(r#"{"a":1]"#, ErrorKind::Structural, "expected '}'", 1, 7)]
#[case::unmatched_close("]", ErrorKind::Structural, "no open OBJECT or ARRAY", 1, 1)]
#[case::trailing_content("1 2", ErrorKind::Structural, "expected end of input after the root value", 1, 3)]
#[case::second_line("[\n  1\n  2]", ErrorKind::Structural, "was expecting comma", 3, 3)]
#[case::colon_after_keyword("[true:1]", ErrorKind::Structural, "was expecting comma to separate ARRAY entries", 1, 6)]
#[case::colon_after_number("[1:2]", ErrorKind::Structural, "was expecting comma to separate ARRAY entries", 1, 3)]
#[case::colon_after_field_value(r#"{"a":null:1}"#, ErrorKind::Structural, "was expecting comma to separate OBJECT entries", 1, 10)]
#[case::open_after_fraction("[1.5[", ErrorKind::Structural, "was expecting comma to separate ARRAY entries", 1, 5)]
#[case::open_after_keyword("[false{", ErrorKind::Structural, "was expecting comma to separate ARRAY entries", 1, 7)]
#[case::colon_after_root("true:", ErrorKind::Structural, "expected end of input after the root value", 1, 5)]
// lexical
#[case::bad_value_start("[#]", ErrorKind::Lexical, "expected a valid value", 1, 2)]
#[case::bare_word("[nope]", ErrorKind::Lexical, "unrecognized token 'nope'", 1, 2)]
#[case::keyword_prefix("[trux]", ErrorKind::Lexical, "unrecognized token 'trux'", 1, 2)]
#[case::keyword_suffix("[nullx]", ErrorKind::Lexical, "unrecognized token 'nullx'", 1, 2)]
#[case::single_quotes("['a']", ErrorKind::Lexical, "expected a valid value", 1, 2)]
#[case::unquoted_name("{a:1}", ErrorKind::Lexical, "double-quote to start field name", 1, 2)]
#[case::control_whitespace("[\u{1}]", ErrorKind::Lexical, "only regular white space", 1, 2)]
#[case::bad_escape(r#""\x""#, ErrorKind::Lexical, "unrecognized character escape 'x'", 1, 3)]
#[case::bad_hex(r#""\u12G4""#, ErrorKind::Lexical, "expected a hex-digit", 1, 6)]
#[case::lone_low_surrogate(r#""\uDC00""#, ErrorKind::Lexical, "unpaired surrogate \\uDC00", 1, 7)]
#[case::unpaired_high_surrogate(r#""\uD800x""#, ErrorKind::Lexical, "unpaired surrogate \\uD800", 1, 8)]
#[case::high_then_escape(r#""\uD800\n""#, ErrorKind::Lexical, "unpaired surrogate \\uD800", 1, 9)]
#[case::raw_newline("\"a\nb\"", ErrorKind::Lexical, "has to be escaped", 1, 3)]
#[case::raw_tab_in_name("{\"a\tb\":1}", ErrorKind::Lexical, "included in name", 1, 4)]
// numeric
#[case::minus_alone("[-]", ErrorKind::Numeric, "expected digit (0-9) to follow minus sign", 1, 3)]
#[case::dot_without_digit("[1.]", ErrorKind::Numeric, "decimal point not followed by a digit", 1, 4)]
#[case::exponent_without_digit("[1e]", ErrorKind::Numeric, "exponent indicator not followed by a digit", 1, 4)]
#[case::signed_exponent_without_digit("[1e+]", ErrorKind::Numeric, "exponent indicator not followed by a digit", 1, 5)]
#[case::leading_zero("[01]", ErrorKind::Numeric, "leading zeroes not allowed", 1, 3)]
#[case::negative_leading_zero("-00", ErrorKind::Numeric, "leading zeroes not allowed", 1, 3)]
#[case::letter_after_number("[12a]", ErrorKind::Numeric, "in numeric value", 1, 4)]
#[case::letter_after_fraction("[1.5x]", ErrorKind::Numeric, "in numeric value", 1, 5)]
// truncation
#[case::open_array("[1", ErrorKind::Truncation, "expected close marker for ARRAY", 1, 3)]
#[case::open_object(r#"{"a":1"#, ErrorKind::Truncation, "expected close marker for OBJECT", 1, 7)]
#[case::after_colon(r#"{"a":"#, ErrorKind::Truncation, "expected close marker for OBJECT", 1, 6)]
#[case::keyword("tru", ErrorKind::Truncation, "in a 'true' token", 1, 4)]
#[case::string(r#""abc"#, ErrorKind::Truncation, "in a String value", 1, 5)]
#[case::escape(r#""ab\u12"#, ErrorKind::Truncation, "in a String value", 1, 8)]
#[case::name(r#"{"ab"#, ErrorKind::Truncation, "in field name", 1, 5)]
#[case::minus("-", ErrorKind::Truncation, "to follow minus sign", 1, 2)]
#[case::fraction("12.", ErrorKind::Truncation, "decimal point not followed by a digit", 1, 4)]
#[case::exponent("1e-", ErrorKind::Truncation, "exponent indicator not followed by a digit", 1, 4)]
#[allow(clippy::too_many_arguments)]
fn rejects(
    #[case] input: &str,
    #[case] kind: ErrorKind,
    #[case] message: &str,
    #[case] line: usize,
    #[case] column: usize,
) {
    let err = tokenize_err(input.as_bytes(), ParserOptions::default());
    let text = err.to_string();
    assert_eq!(err.kind(), kind, "{text}");
    assert!(text.contains(message), "{text:?} does not mention {message:?}");
    assert_eq!((err.line(), err.column()), (line, column), "{text}");

    // Chunking changes neither the error nor where it is reported.
    assert_eq!(tokenize_bytewise(input.as_bytes(), ParserOptions::default()), Err(err));
}

#[rstest]
#[case::stray_continuation(b"\"\x80\"", SyntaxError::InvalidUtf8Start(0x80))]
#[case::overlong_lead(b"\"\xC0\xAF\"", SyntaxError::InvalidUtf8Start(0xC0))]
#[case::bad_continuation(b"\"\xC3(\"", SyntaxError::InvalidUtf8Continuation(b'('))]
#[case::truncated_sequence(b"\"\xE2\x82\"", SyntaxError::InvalidUtf8Continuation(b'"'))]
#[case::overlong_three(b"\"\xE0\x80\xAF\"", SyntaxError::InvalidCodePoint(0x2F))]
#[case::encoded_surrogate(b"\"\xED\xA0\x80\"", SyntaxError::InvalidCodePoint(0xD800))]
#[case::bad_name_bytes(b"{\"\xFF\":1}", SyntaxError::InvalidNameEncoding)]
fn rejects_bad_utf8(#[case] input: &[u8], #[case] expected: SyntaxError) {
    let err = tokenize_err(input, ParserOptions::default());
    assert_eq!(err.syntax_error(), &expected);
    assert_eq!(err.kind(), ErrorKind::Lexical);
    assert_eq!(tokenize_bytewise(input, ParserOptions::default()), Err(err));
}

#[test]
fn long_bare_words_are_cut_short() {
    let mut input = alloc::vec![b'['];
    input.resize(1000, b'x');
    let err = tokenize_err(&input, ParserOptions::default());
    let SyntaxError::UnrecognizedToken { token } = err.syntax_error() else {
        panic!("unexpected error {err}");
    };
    assert_eq!(token.len(), 256);
}
