//! Nesting of open objects and arrays.

use alloc::vec::Vec;
use core::fmt;

use crate::error::{Found, SyntaxError};

/// The kind of an open container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(any(test, feature = "serde"), derive(serde::Serialize))]
pub enum ContainerKind {
    /// `{ ... }`
    Object,
    /// `[ ... ]`
    Array,
}

impl ContainerKind {
    /// Upper-case name used in diagnostics.
    #[must_use]
    pub fn type_desc(self) -> &'static str {
        match self {
            Self::Object => "OBJECT",
            Self::Array => "ARRAY",
        }
    }

    /// The byte that closes this container.
    #[must_use]
    pub fn close_marker(self) -> char {
        match self {
            Self::Object => '}',
            Self::Array => ']',
        }
    }

    pub(crate) fn from_close_marker(b: u8) -> Option<Self> {
        match b {
            b'}' => Some(Self::Object),
            b']' => Some(Self::Array),
            _ => None,
        }
    }
}

impl fmt::Display for ContainerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.type_desc())
    }
}

/// Stack of open containers, innermost last.
#[derive(Debug, Clone, Default)]
pub(crate) struct ContextStack {
    stack: Vec<ContainerKind>,
}

impl ContextStack {
    pub(crate) fn new() -> Self {
        Self {
            stack: Vec::with_capacity(16),
        }
    }

    pub(crate) fn current(&self) -> Option<ContainerKind> {
        self.stack.last().copied()
    }

    pub(crate) fn depth(&self) -> usize {
        self.stack.len()
    }

    pub(crate) fn in_array(&self) -> bool {
        self.current() == Some(ContainerKind::Array)
    }

    pub(crate) fn open(&mut self, kind: ContainerKind) {
        self.stack.push(kind);
    }

    /// Pops the innermost container if `marker` closes it.
    pub(crate) fn close(&mut self, marker: u8) -> Result<ContainerKind, SyntaxError> {
        let found = Found(marker);
        match (self.current(), ContainerKind::from_close_marker(marker)) {
            (None, _) => Err(SyntaxError::UnmatchedClose { found }),
            (Some(open), Some(closing)) if open == closing => {
                self.stack.pop();
                Ok(open)
            }
            (Some(open), _) => Err(SyntaxError::MismatchedClose {
                found,
                expected: open,
            }),
        }
    }
}
