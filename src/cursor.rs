//! Per-call read position over a byte buffer.
//!
//! Every read is checked against the declared length *before* any byte is touched, so a
//! field that would cross the end fails with `ExceededDataRange` without reading past it.

use crate::error::DecodeError;

/// Read position of one decode call. Never stored in a grammar.
#[derive(Debug, Clone)]
pub struct DecodeCursor<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> DecodeCursor<'a> {
    /// Cursor at offset 0 over the first `length` bytes of `buffer`. A `length` beyond the
    /// physical buffer is clipped to `buffer.len()`.
    pub fn new(buffer: &'a [u8], length: usize) -> Self {
        let length = length.min(buffer.len());
        DecodeCursor {
            data: &buffer[..length],
            pos: 0,
        }
    }

    pub fn offset(&self) -> usize {
        self.pos
    }

    /// Declared length the cursor checks against.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Bytes from the current offset to the declared end.
    pub fn remaining(&self) -> &'a [u8] {
        &self.data[self.pos..]
    }

    /// Consumes `n` bytes.
    pub fn take(&mut self, n: usize) -> Result<&'a [u8], DecodeError> {
        let end = self
            .pos
            .checked_add(n)
            .filter(|&end| end <= self.data.len())
            .ok_or(DecodeError::ExceededDataRange {
                offset: self.pos,
                needed: n,
                length: self.data.len(),
            })?;
        let bytes = &self.data[self.pos..end];
        self.pos = end;
        Ok(bytes)
    }

    /// Distance (1-based, terminator included) to the first `0` byte within the next
    /// `max_len` bytes. Does not move the cursor.
    ///
    /// Running into the declared end before the window is exhausted reports
    /// `ExceededDataRange`, which wins over `MissingNullTerminator`.
    pub fn find_terminator(&self, max_len: usize) -> Result<usize, DecodeError> {
        let rest = self.remaining();
        match rest.iter().take(max_len).position(|&b| b == 0) {
            Some(i) => Ok(i + 1),
            None if rest.len() < max_len => Err(DecodeError::ExceededDataRange {
                offset: self.pos,
                needed: rest.len() + 1,
                length: self.data.len(),
            }),
            None => Err(DecodeError::MissingNullTerminator {
                offset: self.pos,
                max_len,
            }),
        }
    }
}
