#![allow(missing_docs)]
#![allow(dead_code)]

use core::fmt::Write;

use jsonpull::{NonBlockingTokenizer, ParserError, ParserOptions, Token};

pub const DOCUMENT: &str = r#"{
    "request": {
        "id": "req-7",
        "filename": "example.rs",
        "options": {"opt_level": 2, "features": ["serde", "tokio"], "debug": false}
    },
    "snippets": ["fn main() {}", "println!(\"hi\")", "tab\there"],
    "entities": [
        {"type": "function", "name": "main", "line": 1},
        {"type": "macro", "name": "println", "line": -3}
    ],
    "metrics": {"ratio": 0.25, "scale": 6.02e23, "offset": -1E-2, "nothing": null},
    "matrix": [[1, 2], [], [{}]],
    "unicode": "café 😀 €",
    "ok": true
}"#;

/// Routes the tokenizer's `tracing` output to the test harness. Set
/// `RUST_LOG=jsonpull=trace` to see it.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Feeds `chunks` in order and collects every token before `EndOfStream`.
pub fn collect<'a>(
    chunks: impl IntoIterator<Item = &'a [u8]>,
    options: ParserOptions,
) -> Result<Vec<Token>, ParserError> {
    let mut tokenizer = NonBlockingTokenizer::new(options);
    let mut tokens = Vec::new();
    for chunk in chunks {
        tokenizer.feed_slice(chunk).expect("previous chunk was drained");
        tokens.extend(tokenizer.by_ref().collect::<Result<Vec<_>, _>>()?);
        assert!(tokenizer.need_more_input());
    }
    tokenizer.end_of_input();
    tokens.extend(tokenizer.by_ref().collect::<Result<Vec<_>, _>>()?);
    assert_eq!(tokenizer.next_token()?, Token::EndOfStream);
    Ok(tokens)
}

/// One line per token.
pub fn render(tokens: &[Token]) -> String {
    let mut out = String::new();
    for token in tokens {
        match token {
            Token::StartObject => writeln!(out, "{{"),
            Token::EndObject => writeln!(out, "}}"),
            Token::StartArray => writeln!(out, "["),
            Token::EndArray => writeln!(out, "]"),
            Token::FieldName(name) => writeln!(out, "name {name:?}"),
            Token::String(value) => writeln!(out, "string {value:?}"),
            Token::Int(number) => writeln!(out, "int {number}"),
            Token::Float(number) => writeln!(out, "float {number}"),
            Token::True => writeln!(out, "true"),
            Token::False => writeln!(out, "false"),
            Token::Null => writeln!(out, "null"),
            Token::NotAvailable => writeln!(out, "<not available>"),
            Token::EndOfStream => writeln!(out, "<end>"),
        }
        .unwrap();
    }
    out
}
