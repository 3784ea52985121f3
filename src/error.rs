//! Error types for grammar construction and decoding.
//!
//! Decode errors are terminal for the call in which they occur: the first error in a
//! sequence wins and is returned unchanged through every enclosing group. The context
//! carried by each variant (offsets, lengths) never changes its [`ErrorCode`].

use crate::field::FieldKind;

/// Bare error code, independent of the context a [`DecodeError`] carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    MissingNullTerminator,
    EmptyTextNotAllowed,
    ExceededDataRange,
    UnhandledFieldType,
}

impl ErrorCode {
    /// Display name of the code.
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorCode::MissingNullTerminator => "MissingNullTerminator",
            ErrorCode::EmptyTextNotAllowed => "EmptyTextNotAllowed",
            ErrorCode::ExceededDataRange => "ExceededDataRange",
            ErrorCode::UnhandledFieldType => "UnhandledFieldType",
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DecodeError {
    /// Text window of `max_len` bytes starting at `offset` holds no `0` byte.
    #[error("MissingNullTerminator: no terminator within {max_len} bytes at offset {offset}")]
    MissingNullTerminator { offset: usize, max_len: usize },
    #[error("EmptyTextNotAllowed: empty text at offset {offset}")]
    EmptyTextNotAllowed { offset: usize },
    /// A read of `needed` bytes at `offset` would cross the declared `length`.
    #[error("ExceededDataRange: need {needed} byte(s) at offset {offset}, length is {length}")]
    ExceededDataRange {
        offset: usize,
        needed: usize,
        length: usize,
    },
    #[error("UnhandledFieldType: no decode rule for {kind} fields")]
    UnhandledFieldType { kind: FieldKind },
}

impl DecodeError {
    pub fn code(&self) -> ErrorCode {
        match self {
            DecodeError::MissingNullTerminator { .. } => ErrorCode::MissingNullTerminator,
            DecodeError::EmptyTextNotAllowed { .. } => ErrorCode::EmptyTextNotAllowed,
            DecodeError::ExceededDataRange { .. } => ErrorCode::ExceededDataRange,
            DecodeError::UnhandledFieldType { .. } => ErrorCode::UnhandledFieldType,
        }
    }
}

/// Rejected field descriptor; returned by the [`Field`](crate::field::Field) constructors,
/// never by decode.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GrammarError {
    #[error("text fields need a maximum length of at least 1 (terminator included)")]
    ZeroTextLength,
    #[error("unsupported size prefix width: {width} byte(s) (expected 1, 2, 4 or 8)")]
    UnsupportedPrefixWidth { width: usize },
    #[error("byte order inversion is not defined for {width}-byte values (expected 2, 4 or 8)")]
    UnsupportedSwapWidth { width: usize },
    #[error("repeated element must read at least one byte")]
    ZeroWidthElement,
}
