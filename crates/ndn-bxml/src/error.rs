//! Error types for Binary-XML encoding and decoding.

use thiserror::Error;

use crate::codec::header::TypeTag;

/// Error during binary encoding.
///
/// Encoding is infallible except for allocation: the header codec cannot be
/// handed an out-of-range type tag (the [`TypeTag`] enum covers exactly the
/// representable tags), so the only runtime failure is buffer growth.
/// After any encode error the buffer contents past the last completed
/// operation are unspecified and the buffer must be discarded.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EncodeError {
    #[error("out of memory growing encode buffer to {requested} bytes")]
    OutOfMemory { requested: usize },
}

/// Error during binary decoding.
///
/// Input typically arrives from an untrusted network peer; every variant here
/// is a controlled failure. The decoder never panics and never reads past the
/// end of its input slice, no matter how malformed the bytes are.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    #[error("unexpected end of input while reading {context}")]
    UnexpectedEof { context: &'static str },

    #[error("header starts with the element close byte")]
    LeadingCloseByte,

    #[error("header exceeds maximum length ({max} bytes)")]
    HeaderTooLong { max: usize },

    #[error("header value exceeds u64 range")]
    HeaderValueOverflow,

    #[error("invalid type tag: {tt}")]
    InvalidTypeTag { tt: u8 },

    #[error("expected {expected:?} element, found {found:?}")]
    TypeTagMismatch { expected: TypeTag, found: TypeTag },

    #[error("expected dictionary tag {expected}, found {found}")]
    TagMismatch { expected: u64, found: u64 },

    #[error("expected element close byte, found {found:#04x}")]
    CloseMismatch { found: u8 },

    #[error("decimal integer contains non-digit byte {byte:#04x}")]
    InvalidDecimalDigit { byte: u8 },

    #[error("decimal integer exceeds u64 range")]
    DecimalOverflow,

    #[error("big-endian integer blob is {len} bytes (maximum 8)")]
    BigEndianOverflow { len: usize },

    #[error("name has more than {max} components")]
    ComponentsExceedLimit { max: usize },
}
