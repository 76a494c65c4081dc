//! A non-blocking, pull-based JSON tokenizer.
//!
//! Bytes are handed to the tokenizer in chunks of any size with
//! [`NonBlockingTokenizer::feed`]. Each call to
//! [`NonBlockingTokenizer::next_token`] either completes a [`Token`] or returns
//! [`Token::NotAvailable`] once the chunk runs dry, remembering exactly where
//! decoding stopped. Tokens may be split anywhere, including inside escapes and
//! multi-byte UTF-8 sequences.
//!
//! ```rust
//! use jsonpull::{NonBlockingTokenizer, ParserOptions, Token};
//!
//! let mut tokenizer = NonBlockingTokenizer::new(ParserOptions::default());
//! tokenizer.feed(&b"[tr"[..]).unwrap();
//! assert_eq!(tokenizer.next_token().unwrap(), Token::StartArray);
//! assert_eq!(tokenizer.next_token().unwrap(), Token::NotAvailable);
//!
//! tokenizer.feed(&b"ue]"[..]).unwrap();
//! tokenizer.end_of_input();
//! assert_eq!(tokenizer.next_token().unwrap(), Token::True);
//! assert_eq!(tokenizer.next_token().unwrap(), Token::EndArray);
//! assert_eq!(tokenizer.next_token().unwrap(), Token::EndOfStream);
//! ```

#![no_std]
extern crate alloc;

#[cfg(test)]
extern crate std;

mod char_class;
mod context;
mod cursor;
mod error;
mod escape_buffer;
mod literal_buffer;
mod options;
mod symbols;
mod text_buffer;
mod token;
mod tokenizer;
mod utf8;

#[doc(hidden)]
pub mod chunk_utils;

#[cfg(test)]
mod tests;

pub use context::ContainerKind;
pub use error::{ErrorKind, FeedError, Found, ParserError, Position, SyntaxError};
pub use options::ParserOptions;
pub use symbols::{Interner, Name, NameTable, Quads};
pub use token::{NumberText, Token};
pub use tokenizer::NonBlockingTokenizer;

#[doc(hidden)]
pub use bytes::Bytes;
