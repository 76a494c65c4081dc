//! End-to-end behaviour of the tokenizer on small, hand-picked inputs.

use alloc::{string::ToString, vec, vec::Vec};

use super::utils::{strict, tokenize_bytewise, tokenize_chunks};
use crate::{ErrorKind, NonBlockingTokenizer, ParserOptions, Token};

fn int(token: &Token) -> i64 {
    token.as_number().and_then(crate::NumberText::to_i64).unwrap()
}

#[test]
fn object_split_after_every_byte() {
    let tokens = tokenize_bytewise(br#"{"a":1,"b":[true,false,null]}"#, strict()).unwrap();

    assert_eq!(tokens.len(), 10);
    assert_eq!(tokens[0], Token::StartObject);
    assert_eq!(tokens[1], Token::FieldName("a".into()));
    assert!(matches!(tokens[2], Token::Int(_)));
    assert_eq!(int(&tokens[2]), 1);
    assert_eq!(
        tokens[3..],
        [
            Token::FieldName("b".into()),
            Token::StartArray,
            Token::True,
            Token::False,
            Token::Null,
            Token::EndArray,
            Token::EndObject,
        ]
    );
}

#[test]
fn escape_split_inside_hex_digits() {
    let input = br#""\u00e9""#;
    for split in 1..input.len() {
        let (head, tail) = input.split_at(split);
        let tokens = tokenize_chunks([head, tail], strict()).unwrap();
        assert_eq!(tokens, vec![Token::String("é".to_string())], "split at {split}");
    }
}

#[test]
fn trailing_comma_is_structural_error() {
    let mut tokenizer = NonBlockingTokenizer::new(ParserOptions::default());
    tokenizer.feed(&b"[1,]"[..]).unwrap();
    tokenizer.end_of_input();

    assert_eq!(tokenizer.next_token().unwrap(), Token::StartArray);
    assert_eq!(int(&tokenizer.next_token().unwrap()), 1);
    let err = tokenizer.next_token().unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Structural);
    assert!(err.to_string().contains("']'"), "{err}");
    assert_eq!(err.column(), 4);
}

#[test]
fn minus_zero_dot() {
    let mut tokenizer = NonBlockingTokenizer::new(ParserOptions::default());
    tokenizer.feed(&b"-0."[..]).unwrap();
    assert_eq!(tokenizer.next_token().unwrap(), Token::NotAvailable);
    tokenizer.end_of_input();
    let err = tokenizer.next_token().unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Truncation);
    assert!(err.to_string().contains("decimal point not followed by a digit"));

    let mut tokenizer = NonBlockingTokenizer::new(ParserOptions::default());
    tokenizer.feed(&b"-0.]"[..]).unwrap();
    let err = tokenizer.next_token().unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Numeric);
    assert!(err.to_string().contains("decimal point not followed by a digit"));
    assert_eq!(err.offset(), 3);
}

#[test]
fn open_brace_then_end_of_input() {
    let mut tokenizer = NonBlockingTokenizer::new(ParserOptions::default());
    tokenizer.feed(&b"{"[..]).unwrap();
    tokenizer.end_of_input();
    assert_eq!(tokenizer.next_token().unwrap(), Token::StartObject);
    let err = tokenizer.next_token().unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Truncation);

    let mut tokenizer = NonBlockingTokenizer::new(ParserOptions::default());
    tokenizer.feed(&b"{"[..]).unwrap();
    assert_eq!(tokenizer.next_token().unwrap(), Token::StartObject);
    assert_eq!(tokenizer.next_token().unwrap(), Token::NotAvailable);
    tokenizer.feed(&b"}"[..]).unwrap();
    tokenizer.end_of_input();
    let rest: Vec<Token> = (0..3).map(|_| tokenizer.next_token().unwrap()).collect();
    assert_eq!(rest, [Token::EndObject, Token::EndOfStream, Token::EndOfStream]);
}

#[test]
fn end_of_stream_is_idempotent() {
    let mut tokenizer = NonBlockingTokenizer::new(ParserOptions::default());
    tokenizer.feed(&b"null"[..]).unwrap();
    assert_eq!(tokenizer.next_token().unwrap(), Token::NotAvailable);
    tokenizer.end_of_input();
    tokenizer.end_of_input();
    assert_eq!(tokenizer.next_token().unwrap(), Token::Null);
    for _ in 0..5 {
        assert_eq!(tokenizer.next_token().unwrap(), Token::EndOfStream);
    }
}

#[test]
fn empty_input_is_end_of_stream() {
    let mut tokenizer = NonBlockingTokenizer::new(ParserOptions::default());
    assert_eq!(tokenizer.next_token().unwrap(), Token::NotAvailable);
    assert!(tokenizer.need_more_input());
    tokenizer.end_of_input();
    assert!(!tokenizer.need_more_input());
    assert_eq!(tokenizer.next_token().unwrap(), Token::EndOfStream);
}

#[test]
fn errors_are_sticky() {
    let mut tokenizer = NonBlockingTokenizer::new(ParserOptions::default());
    tokenizer.feed(&b"[1 2]"[..]).unwrap();
    let first = loop {
        match tokenizer.next_token() {
            Ok(_) => {}
            Err(err) => break err,
        }
    };
    assert_eq!(tokenizer.next_token().unwrap_err(), first);
    assert_eq!(tokenizer.next_token().unwrap_err(), first);
}

#[test]
fn iterator_stops_at_chunk_end_and_after_error() {
    let mut tokenizer = NonBlockingTokenizer::new(ParserOptions::default());
    tokenizer.feed(&b"[1, tr"[..]).unwrap();
    assert_eq!(tokenizer.by_ref().count(), 2);
    tokenizer.feed(&b"ue, x]"[..]).unwrap();
    let rest: Vec<_> = tokenizer.by_ref().collect();
    assert_eq!(rest.len(), 2);
    assert_eq!(rest[0], Ok(Token::True));
    assert!(rest[1].is_err());
    assert_eq!(tokenizer.next(), None);
}

#[test]
fn feed_rejects_misuse() {
    use crate::FeedError;

    let mut tokenizer = NonBlockingTokenizer::new(ParserOptions::default());
    tokenizer.feed(&b"[1,2]"[..]).unwrap();
    assert_eq!(
        tokenizer.feed(&b"3"[..]),
        Err(FeedError::UnconsumedInput { remaining: 5 })
    );
    assert_eq!(tokenizer.next_token().unwrap(), Token::StartArray);
    let rest = tokenizer.release_buffered();
    assert_eq!(&rest[..], b"1,2]");
    assert!(tokenizer.need_more_input());

    assert_eq!(
        tokenizer.feed_range(&b"abc"[..], 2, 1),
        Err(FeedError::InvalidRange { start: 2, end: 1 })
    );
    assert_eq!(
        tokenizer.feed_range(&b"abc"[..], 0, 4),
        Err(FeedError::OutOfBounds { end: 4, len: 3 })
    );
    tokenizer.end_of_input();
    assert_eq!(tokenizer.feed(&b"]"[..]), Err(FeedError::Closed));
}

#[test]
fn feed_range_uses_only_the_range() {
    let mut tokenizer = NonBlockingTokenizer::new(ParserOptions::default());
    tokenizer.feed_range(&b"xx[true]yy"[..], 2, 8).unwrap();
    tokenizer.end_of_input();
    let tokens: Vec<Token> = tokenizer.map(Result::unwrap).collect();
    assert_eq!(tokens, [Token::StartArray, Token::True, Token::EndArray]);
}

#[test]
fn depth_and_position_track_input() {
    let mut tokenizer = NonBlockingTokenizer::new(ParserOptions::default());
    tokenizer.feed(&b"[\n  {\"a\": [\n"[..]).unwrap();
    let _ = tokenizer.by_ref().count();
    assert_eq!(tokenizer.depth(), 3);
    let position = tokenizer.position();
    assert_eq!((position.line, position.column, position.offset), (3, 1, 12));
}

#[test]
fn repeated_names_are_interned_once() {
    let tokens = tokenize_bytewise(br#"[{"id":1},{"id":2},{"name":3}]"#, strict()).unwrap();
    let names: Vec<_> = tokens
        .iter()
        .filter_map(|t| match t {
            Token::FieldName(name) => Some(name.clone()),
            _ => None,
        })
        .collect();
    assert_eq!(names.len(), 3);
    assert!(alloc::sync::Arc::ptr_eq(&names[0], &names[1]));

    let mut tokenizer = NonBlockingTokenizer::new(ParserOptions::default());
    tokenizer.feed(&br#"{"id":1,"id":2}"#[..]).unwrap();
    let _ = tokenizer.by_ref().count();
    assert_eq!(tokenizer.interner().len(), 1);
}

#[test]
fn byte_order_mark_is_skipped() {
    let tokens = tokenize_chunks([&[0xEF][..], &[0xBB, 0xBF, b'['][..], &b"]"[..]], strict()).unwrap();
    assert_eq!(tokens, [Token::StartArray, Token::EndArray]);
}

#[test]
fn whitespace_only_document_ends_cleanly() {
    let tokens = tokenize_bytewise(b" \t\r\n \n", strict()).unwrap();
    assert!(tokens.is_empty());
}
