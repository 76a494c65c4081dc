#![no_main]
use std::cell::RefCell;

use arbitrary::Arbitrary;
use jsonpull::{NonBlockingTokenizer, ParserError, ParserOptions, Token};
use libfuzzer_sys::{fuzz_mutator, fuzz_target, fuzzer_mutate};
use rand::rngs::SmallRng;
use rand::{Rng, RngCore, SeedableRng};
use serde_json::{Map, Value};

const HEADER: usize = 5; // 1 flag byte + 4-byte split seed

thread_local! {
    static RNG: RefCell<SmallRng> = RefCell::new(SmallRng::from_os_rng());
}

// JSON whitespace, plus a few bytes that must be rejected between tokens.
static WS_TABLE: &[&[u8]] = &[b" ", b"\t", b"\n", b"\r", b"\r\n", b"\x0b", "\u{00A0}".as_bytes()];

fn with_rng<F, R>(f: F) -> R
where
    F: FnOnce(&mut SmallRng) -> R,
{
    RNG.with(|cell| f(&mut cell.borrow_mut()))
}

fn mutator(data: &mut [u8], size: usize, max_size: usize, seed: u32) -> usize {
    if size < HEADER || seed.is_multiple_of(10) {
        data[0] = with_rng(|rng| rng.next_u32() as u8);
        data[1..HEADER].copy_from_slice(&with_rng(|rng| rng.next_u32().to_le_bytes()));

        let mut prefix = HEADER;
        while prefix < size {
            let limit = max_size - prefix;
            prefix += append_whitespace(&mut data[prefix..], limit);
            prefix += append_value(&mut data[prefix..], size, max_size - prefix);
            prefix += append_whitespace(&mut data[prefix..], max_size - prefix);
        }
        prefix
    } else {
        fuzzer_mutate(data, size, max_size)
    }
}

/// Appends up to eight whitespace sequences without exceeding `limit`.
fn append_whitespace(buf: &mut [u8], limit: usize) -> usize {
    with_rng(|rng| {
        if limit == 0 {
            return 0;
        }
        let mut written = 0;
        for _ in 0..rng.random_range(1..=limit.min(8)) {
            let w = WS_TABLE[rng.random_range(0..WS_TABLE.len())];
            if written + w.len() > limit {
                break;
            }
            buf[written..written + w.len()].copy_from_slice(w);
            written += w.len();
        }
        written
    })
}

fn append_value(data: &mut [u8], size: usize, limit: usize) -> usize {
    if limit == 0 {
        return 0;
    }
    let value = loop {
        let s = with_rng(|rng| rng.random_range(size / 2..=size * 2).min(limit));
        let bytes: Vec<u8> = with_rng(|rng| (0..s).map(|_| rng.random::<u8>()).collect());
        if let Ok(value) = ArbitraryValue::arbitrary(&mut arbitrary::Unstructured::new(&bytes)) {
            break value;
        }
    };

    let serialized = serde_json::to_vec(&value.0).expect("Failed to serialize arbitrary value");
    let len = serialized.len().min(limit);
    data[..len].copy_from_slice(&serialized[..len]);
    len
}

fuzz_mutator!(|data: &mut [u8], size: usize, max_size: usize, seed: u32| {
    mutator(data, size, max_size, seed)
});

#[derive(Debug)]
struct ArbitraryValue(Value);

impl<'a> Arbitrary<'a> for ArbitraryValue {
    fn arbitrary(u: &mut arbitrary::Unstructured<'_>) -> arbitrary::Result<Self> {
        let value = match u.choose_index(21)? {
            0 => Value::Null,
            1 => Value::Bool(u.arbitrary()?),
            2 => {
                let n: f64 = u.arbitrary()?;
                Value::Number(
                    serde_json::Number::from_f64(n).ok_or(arbitrary::Error::IncorrectFormat)?,
                )
            }
            3 => Value::Number(u.arbitrary::<i64>()?.into()),
            4..=10 => Value::String(u.arbitrary()?),
            11..=15 => {
                let elems: Vec<ArbitraryValue> = u.arbitrary()?;
                Value::Array(elems.into_iter().map(|v| v.0).collect())
            }
            16..=20 => {
                let m: Vec<(String, ArbitraryValue)> = u.arbitrary()?;
                Value::Object(Map::from_iter(m.into_iter().map(|(k, v)| (k, v.0))))
            }
            _ => Err(arbitrary::Error::IncorrectFormat)?,
        };
        Ok(ArbitraryValue(value))
    }
}

fn options(flags: u8) -> ParserOptions {
    ParserOptions {
        allow_single_quotes: flags & 1 != 0,
        allow_unquoted_field_names: flags & 2 != 0,
        allow_trailing_comma: flags & 4 != 0,
        allow_missing_values: flags & 8 != 0,
        allow_leading_zeros: flags & 16 != 0,
        allow_backslash_escaping_any_character: flags & 32 != 0,
        allow_unquoted_control_chars: flags & 64 != 0,
        allow_multiple_root_values: flags & 128 != 0,
        panic_on_error: false,
    }
}

/// Feeds `chunks` and returns every token up to `EndOfStream`, or the first
/// error.
fn run<'a>(
    chunks: impl IntoIterator<Item = &'a [u8]>,
    options: ParserOptions,
) -> Result<Vec<Token>, ParserError> {
    let mut tokenizer = NonBlockingTokenizer::new(options);
    let mut tokens = Vec::new();
    for chunk in chunks {
        tokenizer.feed_slice(chunk).expect("chunk was drained");
        loop {
            match tokenizer.next_token()? {
                Token::NotAvailable => break,
                Token::EndOfStream => panic!("EndOfStream before end of input"),
                token => tokens.push(token),
            }
        }
        assert!(tokenizer.need_more_input());
    }
    tokenizer.end_of_input();
    loop {
        match tokenizer.next_token()? {
            Token::EndOfStream => break,
            Token::NotAvailable => panic!("NotAvailable after end of input"),
            token => tokens.push(token),
        }
    }
    assert_eq!(tokenizer.next_token()?, Token::EndOfStream);
    assert_eq!(tokenizer.depth(), 0);
    Ok(tokens)
}

/// Splits `data` into chunks of pseudo-random length derived from `seed`.
/// Boundaries may fall anywhere, including inside UTF-8 sequences.
fn split_chunks(data: &[u8], seed: u64) -> Vec<&[u8]> {
    let mut rng = SmallRng::seed_from_u64(seed);
    let mut chunks = Vec::new();
    let mut start = 0;
    while start < data.len() {
        let size = rng.random_range(1..=(data.len() - start).min(64));
        chunks.push(&data[start..start + size]);
        start += size;
    }
    chunks
}

fn tokenizer(data: &[u8]) {
    if data.len() < HEADER {
        return;
    }
    let options = options(data[0]);
    let split_seed = u64::from(u32::from_le_bytes(data[1..HEADER].try_into().unwrap()));
    let data = &data[HEADER..];

    let whole = run([data], options);
    let chunked = run(split_chunks(data, split_seed), options);
    assert_eq!(whole, chunked, "chunking changed the outcome");

    if let Err(err) = whole {
        assert!(err.offset() <= data.len());
    }
}

fuzz_target!(|data: &[u8]| tokenizer(data));
