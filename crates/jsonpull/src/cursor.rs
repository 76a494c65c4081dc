//! The input cursor: one fed chunk plus the bookkeeping needed to report
//! absolute stream positions across chunks.

use bytes::Bytes;

use crate::error::{FeedError, Position};

#[derive(Debug, Default)]
pub(crate) struct Cursor {
    /// The current chunk, already narrowed to the fed range.
    buf: Bytes,
    ptr: usize,
    /// Bytes in all chunks before `buf`.
    processed: usize,
    end_of_input: bool,

    /// Rows ended by `\n`.
    row: usize,
    /// Rows ended by `\r`, tracked separately so `\r\n` counts once.
    row_alt: usize,
    /// Absolute offset of the first byte of the current row.
    row_start: usize,
}

impl Cursor {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Replaces the current chunk with `buf[start..end]`.
    pub(crate) fn feed(&mut self, buf: Bytes, start: usize, end: usize) -> Result<(), FeedError> {
        if self.ptr < self.buf.len() {
            return Err(FeedError::UnconsumedInput {
                remaining: self.buf.len() - self.ptr,
            });
        }
        if end < start {
            return Err(FeedError::InvalidRange { start, end });
        }
        if end > buf.len() {
            return Err(FeedError::OutOfBounds {
                end,
                len: buf.len(),
            });
        }
        if self.end_of_input {
            return Err(FeedError::Closed);
        }

        self.processed += self.buf.len();
        self.buf = buf.slice(start..end);
        self.ptr = 0;
        Ok(())
    }

    pub(crate) fn close(&mut self) {
        self.end_of_input = true;
    }

    pub(crate) fn is_closed(&self) -> bool {
        self.end_of_input
    }

    #[inline]
    pub(crate) fn has_remaining(&self) -> bool {
        self.ptr < self.buf.len()
    }

    #[inline]
    pub(crate) fn remaining(&self) -> &[u8] {
        &self.buf[self.ptr..]
    }

    #[inline]
    pub(crate) fn peek(&self) -> Option<u8> {
        self.buf.get(self.ptr).copied()
    }

    /// Consumes one byte. Callers only bump after a successful `peek`.
    #[inline]
    pub(crate) fn bump(&mut self) {
        debug_assert!(self.ptr < self.buf.len());
        self.ptr += 1;
    }

    #[inline]
    pub(crate) fn advance(&mut self, n: usize) {
        debug_assert!(self.ptr + n <= self.buf.len());
        self.ptr += n;
    }

    /// Hands back the unconsumed part of the chunk and marks it consumed.
    pub(crate) fn release(&mut self) -> Bytes {
        let rest = self.buf.slice(self.ptr..);
        self.ptr = self.buf.len();
        rest
    }

    /// Absolute offset of the next unread byte.
    #[inline]
    pub(crate) fn offset(&self) -> usize {
        self.processed + self.ptr
    }

    /// Records a `\n` that was just consumed.
    pub(crate) fn line_feed(&mut self) {
        self.row += 1;
        self.row_start = self.offset();
    }

    /// Records a `\r` that was just consumed.
    pub(crate) fn carriage_return(&mut self) {
        self.row_alt += 1;
        self.row_start = self.offset();
    }

    /// Position of the byte at absolute `offset`, which must lie in the
    /// current row.
    pub(crate) fn position_at(&self, offset: usize) -> Position {
        Position {
            line: self.row.max(self.row_alt) + 1,
            column: offset.saturating_sub(self.row_start) + 1,
            offset,
        }
    }
}
