//! Decode engine: walks a field grammar against a byte buffer.
//!
//! [`Grammar`] owns the top-level field sequence and is immutable after construction; all
//! per-call state (the [`DecodeCursor`] and the running result) lives on the stack of one
//! [`Grammar::decode`] call, so a single grammar can decode concurrently from many threads.
//!
//! Fields of a sequence are processed left to right. The first error stops the sequence:
//! no further reads, deliveries or cursor movement happen in it, and the error is returned
//! unchanged through every enclosing group.

use crate::cursor::DecodeCursor;
use crate::error::DecodeError;
use crate::field::{Field, RepeatedField, ScalarField, TextField};
use crate::primitive::read_native_uint;
#[cfg(feature = "decode_profile")]
use crate::profile::ProfileGuard;

/// Top-level field sequence of a packet layout with output type `O`.
pub struct Grammar<O> {
    fields: Vec<Field<O>>,
}

impl<O> Grammar<O> {
    pub fn new(fields: Vec<Field<O>>) -> Self {
        Grammar { fields }
    }

    pub fn builder() -> GrammarBuilder<O> {
        GrammarBuilder { fields: Vec::new() }
    }

    pub fn fields(&self) -> &[Field<O>] {
        &self.fields
    }

    /// Decode the first `length` bytes of `buffer` into `out`.
    ///
    /// `length` is authoritative for every bounds check (clipped to `buffer.len()`). On
    /// error `out` may be partially written and should be discarded.
    pub fn decode(&self, buffer: &[u8], length: usize, out: &mut O) -> Result<(), DecodeError> {
        self.decode_with_extent(buffer, length, out).1
    }

    /// [`decode`](Self::decode) over the whole buffer.
    pub fn decode_all(&self, buffer: &[u8], out: &mut O) -> Result<(), DecodeError> {
        self.decode(buffer, buffer.len(), out)
    }

    /// Decode and return `(offset reached, result)`. On success the offset is the number of
    /// bytes the packet occupies.
    pub fn decode_with_extent(
        &self,
        buffer: &[u8],
        length: usize,
        out: &mut O,
    ) -> (usize, Result<(), DecodeError>) {
        let mut cursor = DecodeCursor::new(buffer, length);
        let result = decode_sequence(&self.fields, &mut cursor, out);
        if let Err(ref e) = result {
            log::debug!(
                "decode failed with {} at offset {} of {}: {}",
                e.code(),
                cursor.offset(),
                cursor.len(),
                e
            );
        }
        (cursor.offset(), result)
    }
}

impl<O> std::fmt::Debug for Grammar<O> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Grammar").field("fields", &self.fields).finish()
    }
}

/// Collects a top-level sequence one field at a time; order of calls is buffer order.
pub struct GrammarBuilder<O> {
    fields: Vec<Field<O>>,
}

impl<O> GrammarBuilder<O> {
    pub fn field(mut self, field: Field<O>) -> Self {
        self.fields.push(field);
        self
    }

    pub fn build(self) -> Grammar<O> {
        Grammar::new(self.fields)
    }
}

/// Process `fields` in order against `out`, stopping at the first error.
pub(crate) fn decode_sequence<O>(
    fields: &[Field<O>],
    cursor: &mut DecodeCursor<'_>,
    out: &mut O,
) -> Result<(), DecodeError> {
    for field in fields {
        decode_field(field, cursor, out)?;
    }
    Ok(())
}

fn decode_field<O>(field: &Field<O>, cursor: &mut DecodeCursor<'_>, out: &mut O) -> Result<(), DecodeError> {
    log::trace!("{} field at offset {}", field.kind(), cursor.offset());
    #[cfg(feature = "decode_profile")]
    let _timer = ProfileGuard::new(field.kind());
    match field {
        Field::Scalar(s) => decode_scalar(s, cursor, out),
        Field::Text(t) => decode_text(t, cursor, out),
        Field::Group(g) => g.decode_group(cursor, out),
        Field::Repeated(r) => decode_repeated(r, cursor, out),
        Field::Binary(_) | Field::StaticArray(_) => Err(DecodeError::UnhandledFieldType { kind: field.kind() }),
    }
}

fn decode_scalar<O>(field: &ScalarField<O>, cursor: &mut DecodeCursor<'_>, out: &mut O) -> Result<(), DecodeError> {
    let raw = cursor.take(field.width())?;
    field.deliver(out, raw);
    Ok(())
}

fn decode_text<O>(field: &TextField<O>, cursor: &mut DecodeCursor<'_>, out: &mut O) -> Result<(), DecodeError> {
    let distance = cursor.find_terminator(field.max_len())?;
    if distance == 1 && !field.allow_empty() {
        return Err(DecodeError::EmptyTextNotAllowed { offset: cursor.offset() });
    }
    let bytes = cursor.take(distance)?;
    field.deliver(out, &bytes[..distance - 1]);
    Ok(())
}

fn decode_repeated<O>(
    field: &RepeatedField<O>,
    cursor: &mut DecodeCursor<'_>,
    out: &mut O,
) -> Result<(), DecodeError> {
    let width = field.prefix().bytes();
    let count = read_native_uint(cursor.take(width)?, width);
    log::trace!("repeat count {} at offset {}", count, cursor.offset() - width);
    for _ in 0..count {
        decode_field(field.child(), cursor, out)?;
    }
    Ok(())
}
