use alloc::{
    format,
    string::{String, ToString},
    vec::Vec,
};

use crate::{NonBlockingTokenizer, ParserError, ParserOptions, Token};

/// Strict options that panic at the error site, for inputs that must parse.
pub(crate) fn strict() -> ParserOptions {
    ParserOptions {
        panic_on_error: true,
        ..ParserOptions::default()
    }
}

/// Feeds `chunks` in order, signals end of input, and collects every token
/// up to (not including) `EndOfStream`.
pub(crate) fn tokenize_chunks<'a>(
    chunks: impl IntoIterator<Item = &'a [u8]>,
    options: ParserOptions,
) -> Result<Vec<Token>, ParserError> {
    let mut tokenizer = NonBlockingTokenizer::new(options);
    let mut tokens = Vec::new();
    for chunk in chunks {
        tokenizer.feed_slice(chunk).unwrap();
        loop {
            match tokenizer.next_token()? {
                Token::NotAvailable => break,
                token => tokens.push(token),
            }
        }
        assert!(tokenizer.need_more_input());
    }
    tokenizer.end_of_input();
    loop {
        match tokenizer.next_token()? {
            Token::EndOfStream => return Ok(tokens),
            Token::NotAvailable => panic!("NotAvailable after end of input"),
            token => tokens.push(token),
        }
    }
}

pub(crate) fn tokenize(input: &[u8], options: ParserOptions) -> Result<Vec<Token>, ParserError> {
    tokenize_chunks([input], options)
}

pub(crate) fn tokenize_bytewise(
    input: &[u8],
    options: ParserOptions,
) -> Result<Vec<Token>, ParserError> {
    tokenize_chunks(input.chunks(1), options)
}

/// Feeds `input` whole and returns the error it must produce.
pub(crate) fn tokenize_err(input: &[u8], options: ParserOptions) -> ParserError {
    match tokenize(input, options) {
        Ok(tokens) => panic!("expected an error, got {tokens:?}"),
        Err(err) => err,
    }
}

/// One line per token, compact enough for inline snapshots.
pub(crate) fn render(tokens: &[Token]) -> String {
    let mut out = String::new();
    for token in tokens {
        let line = match token {
            Token::StartObject => "{".to_string(),
            Token::EndObject => "}".to_string(),
            Token::StartArray => "[".to_string(),
            Token::EndArray => "]".to_string(),
            Token::FieldName(name) => format!("name {name:?}"),
            Token::String(value) => format!("string {value:?}"),
            Token::Int(number) => format!("int {number}"),
            Token::Float(number) => format!("float {number}"),
            Token::True => "true".to_string(),
            Token::False => "false".to_string(),
            Token::Null => "null".to_string(),
            Token::NotAvailable => "<not available>".to_string(),
            Token::EndOfStream => "<end>".to_string(),
        };
        out.push_str(&line);
        out.push('\n');
    }
    out
}

/// Rebuilds the value described by a complete token stream.
pub(crate) fn reconstruct(tokens: &[Token]) -> Option<serde_json::Value> {
    let mut iter = tokens.iter();
    let first = iter.next()?;
    let value = build_value(&mut iter, first)?;
    iter.next().is_none().then_some(value)
}

fn build_value<'a>(
    iter: &mut core::slice::Iter<'a, Token>,
    first: &'a Token,
) -> Option<serde_json::Value> {
    use serde_json::{Map, Number, Value};

    Some(match first {
        Token::Null => Value::Null,
        Token::True => Value::Bool(true),
        Token::False => Value::Bool(false),
        Token::String(s) => Value::String(s.clone()),
        Token::Int(n) => Value::Number(Number::from(n.to_i64()?)),
        Token::Float(n) => Value::Number(Number::from_f64(n.to_f64())?),
        Token::StartArray => {
            let mut items = Vec::new();
            loop {
                let next = iter.next()?;
                if *next == Token::EndArray {
                    break Value::Array(items);
                }
                items.push(build_value(iter, next)?);
            }
        }
        Token::StartObject => {
            let mut map = Map::new();
            loop {
                match iter.next()? {
                    Token::EndObject => break Value::Object(map),
                    Token::FieldName(name) => {
                        let first = iter.next()?;
                        map.insert(name.to_string(), build_value(iter, first)?);
                    }
                    _ => return None,
                }
            }
        }
        _ => return None,
    })
}
