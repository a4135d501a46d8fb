//! Error types for variable database decoding, encoding, editing and storage.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Error categories reported to callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    /// E001: A byte outside `S`/`N`/`B`/`T` where a type tag was expected
    UnknownTypeTag,
    /// E002: Input ended inside a declared length or fixed-size field
    UnexpectedEndOfStream,
    /// E003: Malformed varint, UTF-8, count or nesting
    MalformedEncoding,
    /// E004: A value the wire format cannot represent
    UnsupportedValueForEncoding,
}

impl ErrorCode {
    /// Returns the error code string (e.g., "E001").
    pub fn code(&self) -> &'static str {
        match self {
            ErrorCode::UnknownTypeTag => "E001",
            ErrorCode::UnexpectedEndOfStream => "E002",
            ErrorCode::MalformedEncoding => "E003",
            ErrorCode::UnsupportedValueForEncoding => "E004",
        }
    }
}

/// Error during binary decoding.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    // === E001: Unknown type tag ===
    #[error("[E001] unknown type tag 0x{tag:02X} at offset {offset}")]
    UnknownTypeTag { tag: u8, offset: usize },

    // === E002: Unexpected end of stream ===
    #[error("[E002] unexpected end of stream while reading {context} at offset {offset}")]
    UnexpectedEof { context: &'static str, offset: usize },

    // === E003: Malformed encoding ===
    #[error("[E003] 7-bit encoded length at offset {offset} exceeds 5 bytes")]
    VarintTooLong { offset: usize },

    #[error("[E003] 7-bit encoded length at offset {offset} overflows 32 bits")]
    VarintOverflow { offset: usize },

    #[error("[E003] invalid UTF-8 in string at offset {offset}")]
    InvalidUtf8 { offset: usize },

    #[error("[E003] negative table entry count {count} at offset {offset}")]
    NegativeTableCount { count: i32, offset: usize },

    #[error("[E003] tables nested deeper than {max} levels at offset {offset}")]
    NestingTooDeep { max: usize, offset: usize },
}

impl DecodeError {
    /// Returns the error code for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            DecodeError::UnknownTypeTag { .. } => ErrorCode::UnknownTypeTag,
            DecodeError::UnexpectedEof { .. } => ErrorCode::UnexpectedEndOfStream,
            _ => ErrorCode::MalformedEncoding,
        }
    }

    /// Returns true if the read failed because the input ran out.
    pub fn is_end_of_stream(&self) -> bool {
        matches!(self, DecodeError::UnexpectedEof { .. })
    }

    /// Returns the stream offset where the error was detected.
    pub fn offset(&self) -> usize {
        match self {
            DecodeError::UnknownTypeTag { offset, .. }
            | DecodeError::UnexpectedEof { offset, .. }
            | DecodeError::VarintTooLong { offset }
            | DecodeError::VarintOverflow { offset }
            | DecodeError::InvalidUtf8 { offset }
            | DecodeError::NegativeTableCount { offset, .. }
            | DecodeError::NestingTooDeep { offset, .. } => *offset,
        }
    }
}

/// Error during binary encoding.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EncodeError {
    #[error("[E004] {field} length {len} exceeds maximum {max}")]
    LengthExceedsLimit {
        field: &'static str,
        len: usize,
        max: usize,
    },

    #[error("[E004] tables nested deeper than {max} levels")]
    NestingTooDeep { max: usize },
}

impl EncodeError {
    /// Returns the error code for this error.
    pub fn code(&self) -> ErrorCode {
        ErrorCode::UnsupportedValueForEncoding
    }
}

/// Error while applying a text edit to a leaf.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EditError {
    #[error("no variable at path {path:?}")]
    UnknownPath { path: String },

    #[error("{path:?} is a table, not a leaf value")]
    NotALeaf { path: String },

    #[error("{text:?} is not a number")]
    InvalidNumber { text: String },

    #[error("{text:?} is not a boolean (expected true or false)")]
    InvalidBoolean { text: String },
}

/// Error while loading or saving a variable store file.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("variable store appears corrupted: {0}")]
    Corrupted(#[from] DecodeError),

    #[error("failed to write save, no changes applied: {0}")]
    Encode(#[from] EncodeError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_follow_taxonomy() {
        let tag = DecodeError::UnknownTypeTag { tag: 0xFF, offset: 0 };
        assert_eq!(tag.code(), ErrorCode::UnknownTypeTag);
        assert_eq!(tag.code().code(), "E001");

        let eof = DecodeError::UnexpectedEof { context: "number", offset: 3 };
        assert_eq!(eof.code(), ErrorCode::UnexpectedEndOfStream);
        assert!(eof.is_end_of_stream());
        assert!(!tag.is_end_of_stream());

        let count = DecodeError::NegativeTableCount { count: -1, offset: 5 };
        assert_eq!(count.code(), ErrorCode::MalformedEncoding);
        assert_eq!(count.offset(), 5);

        let enc = EncodeError::NestingTooDeep { max: 128 };
        assert_eq!(enc.code().code(), "E004");
    }

    #[test]
    fn test_messages_carry_offset() {
        let err = DecodeError::UnknownTypeTag { tag: 0x7A, offset: 42 };
        assert_eq!(err.to_string(), "[E001] unknown type tag 0x7A at offset 42");
    }

    #[test]
    fn test_store_error_wording() {
        let err = StoreError::from(DecodeError::UnexpectedEof { context: "table count", offset: 9 });
        assert!(err.to_string().starts_with("variable store appears corrupted"));

        let err = StoreError::from(EncodeError::NestingTooDeep { max: 128 });
        assert!(err.to_string().starts_with("failed to write save, no changes applied"));
    }
}
