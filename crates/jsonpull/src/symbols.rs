//! Field name interning.
//!
//! Field names are collected as raw bytes packed four to a `u32` ([`Quads`])
//! and handed to an [`Interner`] once the closing quote is seen. The default
//! [`NameTable`] returns the same [`Name`] allocation for every repetition of
//! a key within one tokenizer's lifetime.

use alloc::{collections::BTreeMap, sync::Arc, vec::Vec};

/// A canonical, shared field name.
pub type Name = Arc<str>;

/// The bytes of a field name, packed big-endian four to a quad.
///
/// Two `Quads` compare equal exactly when their byte sequences are equal.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Quads {
    quads: Vec<u32>,
    /// Up to three bytes not yet forming a full quad.
    pending: u32,
    pending_len: u8,
}

impl Quads {
    /// An empty name.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Forgets all bytes, keeping the allocation.
    pub fn clear(&mut self) {
        self.quads.clear();
        self.pending = 0;
        self.pending_len = 0;
    }

    /// Appends one raw byte.
    #[inline]
    pub fn push(&mut self, b: u8) {
        self.pending = (self.pending << 8) | u32::from(b);
        self.pending_len += 1;
        if self.pending_len == 4 {
            self.quads.push(self.pending);
            self.pending = 0;
            self.pending_len = 0;
        }
    }

    /// Appends the UTF-8 encoding of `ch`.
    pub fn push_char(&mut self, ch: char) {
        let mut utf8 = [0; 4];
        for &b in ch.encode_utf8(&mut utf8).as_bytes() {
            self.push(b);
        }
    }

    /// Number of bytes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.quads.len() * 4 + usize::from(self.pending_len)
    }

    /// Whether no bytes were pushed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Unpacks the bytes in their original order.
    #[must_use]
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.len());
        for quad in &self.quads {
            bytes.extend_from_slice(&quad.to_be_bytes());
        }
        let tail = self.pending.to_be_bytes();
        bytes.extend_from_slice(&tail[4 - usize::from(self.pending_len)..]);
        bytes
    }
}

/// Maps field name bytes to canonical names.
pub trait Interner {
    /// Returns the canonical name for `name`, or `None` if its bytes are not
    /// valid UTF-8.
    fn intern(&mut self, name: &Quads) -> Option<Name>;
}

/// The default [`Interner`]: an ordered map from quads to names.
#[derive(Debug, Default, Clone)]
pub struct NameTable {
    names: BTreeMap<Quads, Name>,
}

impl NameTable {
    /// An empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of distinct names seen.
    #[must_use]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Whether no names were interned yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl Interner for NameTable {
    fn intern(&mut self, name: &Quads) -> Option<Name> {
        if let Some(found) = self.names.get(name) {
            return Some(Arc::clone(found));
        }
        let bytes = name.to_bytes();
        let text: Name = Arc::from(core::str::from_utf8(&bytes).ok()?);
        self.names.insert(name.clone(), Arc::clone(&text));
        Some(text)
    }
}
