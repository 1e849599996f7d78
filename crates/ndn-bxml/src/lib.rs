//! Binary-XML (ccnb) wire codec for named-data networking.
//!
//! This crate implements the "Binary XML" dictionary-tag encoding that
//! predates the later NDN-TLV format: a compact, self-delimiting TLV-like
//! format in which every element is a variable-length type-and-value header
//! followed by nested elements, an opaque blob, or ASCII character data, and
//! terminated by a reserved close byte.
//!
//! # Quick Start
//!
//! ```rust
//! use ndn_bxml::{decode_name, encode_name, Name};
//!
//! // Build a hierarchical name and encode it
//! let mut name = Name::new();
//! name.push(&b"ndn"[..]);
//! name.push(&b"example"[..]);
//! let bytes = encode_name(&name).unwrap();
//!
//! // Decode it back (zero-copy: components borrow from `bytes`)
//! let decoded = decode_name(&bytes, 16).unwrap();
//! assert_eq!(name, decoded);
//! assert_eq!(decoded.to_string(), "/ndn/example");
//! ```
//!
//! # Modules
//!
//! - [`codec`]: the encoder/decoder engine and the name codec
//! - [`model`]: the [`Name`] type and dictionary-tag constants
//! - [`error`]: error types
//! - [`limits`]: decode-safety limits
//!
//! # Security
//!
//! The decoder is designed to safely handle untrusted input:
//! - It never reads past the end of the input slice and never panics on
//!   malformed bytes; every failure is a [`DecodeError`].
//! - Headers are bounded by [`limits::MAX_HEADER_BYTES`].
//! - Name decoding is bounded by a caller-supplied component cap.
//!
//! # Wire Format
//!
//! Every element starts with a header packing a 3-bit type tag and an
//! unsigned value into the minimal number of bytes: the terminal byte holds
//! the tag, the low 4 value bits, and a set top bit; any preceding bytes
//! each carry 7 more value bits, most-significant chunk first, top bit
//! clear. Dictionary-tag elements nest and end with the reserved `0x00`
//! close byte; blob and character-data elements carry their length in the
//! header value instead.

pub mod codec;
pub mod error;
pub mod limits;
pub mod model;

// Re-export commonly used types at crate root
pub use codec::{
    BinaryXmlDecoder, BinaryXmlEncoder, decode_name, decode_name_from, encode_name,
    encode_name_to,
};
pub use error::{DecodeError, EncodeError};
pub use model::{Name, dtag};

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
