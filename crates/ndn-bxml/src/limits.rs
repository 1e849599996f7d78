//! Decode-safety limits.
//!
//! These bound what the decoder will accept from untrusted input. The wire
//! format itself imposes no limits, so the decoder enforces them explicitly.

/// Maximum bytes in a single type-and-value header.
///
/// A minimally encoded u64 value needs at most 10 bytes (4 bits in the
/// terminal byte plus 7 bits per continuation byte); anything longer is
/// malformed.
pub const MAX_HEADER_BYTES: usize = 10;

/// Default cap on name components when the caller has no better bound.
pub const DEFAULT_MAX_NAME_COMPONENTS: usize = 64;
