use thiserror::Error;

/// Errors produced while encoding or decoding bencode.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BencodeError {
    /// The value has no bencode representation.
    #[error("unsupported value type: {kind}")]
    UnsupportedType { kind: &'static str },

    /// An encode destination offset lies past the end of the buffer.
    #[error("offset {offset} is past the end of a {len}-byte destination")]
    InvalidOffset { offset: usize, len: usize },

    /// The input violates the bencode grammar.
    #[error("malformed input at byte {offset}: {reason}")]
    MalformedInput {
        /// Offset into the decode window where the violation was detected.
        offset: usize,
        reason: MalformedReason,
    },
}

/// Why a byte stream was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MalformedReason {
    #[error("missing delimiter {:?} [0x{:02x}]", char::from(*.0), .0)]
    MissingDelimiter(u8),

    #[error("not a number: byte 0x{0:02x}")]
    InvalidByte(u8),

    #[error("negative string length {0}")]
    NegativeLength(i64),

    #[error("string of {declared} bytes but only {available} remain")]
    TruncatedString { declared: usize, available: usize },

    #[error("integer overflow")]
    IntegerOverflow,

    #[error("nesting too deep")]
    NestingTooDeep,

    #[error("trailing data after value")]
    TrailingData,
}

impl BencodeError {
    pub(crate) fn malformed(offset: usize, reason: MalformedReason) -> Self {
        BencodeError::MalformedInput { offset, reason }
    }

    /// Returns the byte offset for decode failures.
    pub fn offset(&self) -> Option<usize> {
        match self {
            BencodeError::MalformedInput { offset, .. } => Some(*offset),
            BencodeError::UnsupportedType { .. } | BencodeError::InvalidOffset { .. } => None,
        }
    }
}
