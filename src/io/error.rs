use thiserror::Error;

/// Failure to decode or encode a single record line.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecordError {
    #[error("record line is empty")]
    Empty,

    #[error("record line has invalid length {0}")]
    InvalidLength(usize),

    #[error("record line does not start with ':'")]
    InvalidPrefix,

    #[error("invalid hex digit: {0}")]
    InvalidHexDigit(char),

    #[error("checksum mismatch: expected {expected:02X}, got {actual:02X}")]
    ChecksumMismatch { expected: u8, actual: u8 },

    #[error("payload of {0} bytes exceeds the 254-byte record limit")]
    PayloadTooLarge(usize),
}

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("invalid record at line {line}: {source}")]
    Record {
        line: usize,
        #[source]
        source: RecordError,
    },

    #[error("invalid UTF-8 at line {line}")]
    InvalidUtf8 { line: usize },

    #[error("unsupported record type at line {line}: {record_type:02X}")]
    UnsupportedRecordType { line: usize, record_type: u8 },

    #[error("extended linear address at line {line} must have 2 data bytes, got {len}")]
    InvalidExtendedAddress { line: usize, len: usize },
}
