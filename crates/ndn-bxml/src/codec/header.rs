//! Type-and-value header codec.
//!
//! Every Binary-XML element is prefixed by a header packing a 3-bit type tag
//! and an unsigned value (a length, or a dictionary-tag number) into the
//! minimal number of bytes. The terminal byte carries the tag, the low
//! [`TT_VALUE_BITS`] bits of the value, and a set [`TT_FINAL`] top bit; each
//! preceding byte carries the next [`REGULAR_VALUE_BITS`] value bits,
//! most-significant chunk first, top bit clear. This is a big-endian
//! variable-length integer with the type tag folded into the *last* byte,
//! so decoding scans forward until it finds the byte with the top bit set.

use crate::error::DecodeError;
use crate::limits::MAX_HEADER_BYTES;

/// Bits of type tag in the terminal byte.
pub const TT_BITS: u32 = 3;
/// Mask extracting the type tag from the terminal byte.
pub const TT_MASK: u8 = (1 << TT_BITS) - 1;
/// Value bits carried in the terminal byte.
pub const TT_VALUE_BITS: u32 = 4;
/// Mask for the terminal byte's value bits.
pub const TT_VALUE_MASK: u64 = (1 << TT_VALUE_BITS) - 1;
/// Value bits carried per continuation byte.
pub const REGULAR_VALUE_BITS: u32 = 7;
/// Mask for a continuation byte's value bits.
pub const REGULAR_VALUE_MASK: u64 = (1 << REGULAR_VALUE_BITS) - 1;
/// Top bit marking the terminal byte of a header.
pub const TT_FINAL: u8 = 0x80;
/// Reserved element terminator; never a valid first header byte.
pub const CLOSE: u8 = 0x00;

// Precomputed thresholds for the common 1/2/3-byte headers.
const LIMIT_1_BYTE: u64 = (1u64 << TT_VALUE_BITS) - 1;
const LIMIT_2_BYTES: u64 = (1u64 << (TT_VALUE_BITS + REGULAR_VALUE_BITS)) - 1;
const LIMIT_3_BYTES: u64 = (1u64 << (TT_VALUE_BITS + 2 * REGULAR_VALUE_BITS)) - 1;

/// The 3-bit element type tag.
///
/// Only these seven tags exist on the wire; `0b111` is unassigned and
/// rejected on decode. Because the enum covers exactly the representable
/// tags, encoding an out-of-range tag is impossible by construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum TypeTag {
    Ext = 0,
    Tag = 1,
    DTag = 2,
    Attr = 3,
    DAttr = 4,
    Blob = 5,
    UData = 6,
}

impl TypeTag {
    /// Maps the terminal byte's low 3 bits back to a type tag.
    pub(crate) fn from_wire(bits: u8) -> Result<Self, DecodeError> {
        match bits {
            0 => Ok(TypeTag::Ext),
            1 => Ok(TypeTag::Tag),
            2 => Ok(TypeTag::DTag),
            3 => Ok(TypeTag::Attr),
            4 => Ok(TypeTag::DAttr),
            5 => Ok(TypeTag::Blob),
            6 => Ok(TypeTag::UData),
            _ => Err(DecodeError::InvalidTypeTag { tt: bits }),
        }
    }
}

/// Returns the unique minimal byte count encoding `value`.
///
/// The terminal byte gives [`TT_VALUE_BITS`] bits, each additional byte
/// [`REGULAR_VALUE_BITS`] more. The precomputed thresholds fast-path the
/// common small values; the shift loop handles the rest and is the reference
/// the thresholds must agree with.
pub fn header_byte_count(value: u64) -> usize {
    if value <= LIMIT_1_BYTE {
        return 1;
    }
    if value <= LIMIT_2_BYTES {
        return 2;
    }
    if value <= LIMIT_3_BYTES {
        return 3;
    }

    let mut n_bytes = 1;
    let mut rest = value >> TT_VALUE_BITS;
    while rest != 0 {
        n_bytes += 1;
        rest >>= REGULAR_VALUE_BITS;
    }
    n_bytes
}

/// Writes the header for `(tt, value)` into `out`.
///
/// `out` must be exactly [`header_byte_count`]`(value)` bytes; the caller
/// has already sized the buffer.
pub(crate) fn encode_type_and_value(out: &mut [u8], tt: TypeTag, value: u64) {
    debug_assert_eq!(out.len(), header_byte_count(value));

    let last = out.len() - 1;
    out[last] = (tt as u8) | (((value & TT_VALUE_MASK) as u8) << TT_BITS) | TT_FINAL;

    // Remaining value bits go into the preceding bytes, most-significant
    // chunk first, top bit clear.
    let mut rest = value >> TT_VALUE_BITS;
    for i in (0..last).rev() {
        out[i] = (rest & REGULAR_VALUE_MASK) as u8;
        rest >>= REGULAR_VALUE_BITS;
    }
    debug_assert_eq!(rest, 0);
}

/// Decodes a header from the front of `input`.
///
/// Returns the type tag, value, and the number of bytes consumed. Scans
/// forward accumulating continuation chunks until the byte with [`TT_FINAL`]
/// set; a first octet of [`CLOSE`] is malformed (it belongs to the enclosing
/// element's grammar, not to any header).
pub(crate) fn decode_type_and_value(
    input: &[u8],
    context: &'static str,
) -> Result<(TypeTag, u64, usize), DecodeError> {
    let mut value: u64 = 0;

    for i in 0..MAX_HEADER_BYTES {
        let octet = match input.get(i) {
            Some(&octet) => octet,
            None => return Err(DecodeError::UnexpectedEof { context }),
        };
        if i == 0 && octet == CLOSE {
            return Err(DecodeError::LeadingCloseByte);
        }

        if octet & TT_FINAL != 0 {
            if value >> (64 - TT_VALUE_BITS) != 0 {
                return Err(DecodeError::HeaderValueOverflow);
            }
            let tt = TypeTag::from_wire(octet & TT_MASK)?;
            let low = ((octet >> TT_BITS) as u64) & TT_VALUE_MASK;
            return Ok((tt, (value << TT_VALUE_BITS) | low, i + 1));
        }

        if value >> (64 - REGULAR_VALUE_BITS) != 0 {
            return Err(DecodeError::HeaderValueOverflow);
        }
        value = (value << REGULAR_VALUE_BITS) | (octet as u64 & REGULAR_VALUE_MASK);
    }

    Err(DecodeError::HeaderTooLong {
        max: MAX_HEADER_BYTES,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    /// The pure shift loop the threshold fast path must agree with.
    fn header_byte_count_reference(value: u64) -> usize {
        let mut n_bytes = 1;
        let mut rest = value >> TT_VALUE_BITS;
        while rest != 0 {
            n_bytes += 1;
            rest >>= REGULAR_VALUE_BITS;
        }
        n_bytes
    }

    fn encode(tt: TypeTag, value: u64) -> Vec<u8> {
        let mut out = vec![0u8; header_byte_count(value)];
        encode_type_and_value(&mut out, tt, value);
        out
    }

    #[test]
    fn test_byte_count_thresholds() {
        assert_eq!(header_byte_count(0), 1);
        assert_eq!(header_byte_count(15), 1);
        assert_eq!(header_byte_count(16), 2);
        assert_eq!(header_byte_count(2047), 2);
        assert_eq!(header_byte_count(2048), 3);
        assert_eq!(header_byte_count(262143), 3);
        assert_eq!(header_byte_count(262144), 4);
        assert_eq!(header_byte_count(u64::MAX), 10);
    }

    #[test]
    fn test_known_single_byte_headers() {
        // tag | (value << 3) | 0x80
        assert_eq!(encode(TypeTag::DTag, 14), vec![0xF2]); // Name element
        assert_eq!(encode(TypeTag::DTag, 15), vec![0xFA]); // Component element
        assert_eq!(encode(TypeTag::Blob, 0), vec![0x85]);
        assert_eq!(encode(TypeTag::Blob, 1), vec![0x8D]);
        assert_eq!(encode(TypeTag::UData, 3), vec![0x9E]);
    }

    #[test]
    fn test_known_two_byte_header() {
        // value 16: continuation byte holds 16 >> 4 = 1, terminal holds 0
        assert_eq!(encode(TypeTag::Blob, 16), vec![0x01, 0x85]);
    }

    #[test]
    fn test_decode_scans_to_final_bit() {
        let (tt, value, n) = decode_type_and_value(&[0x01, 0x85, 0xFF], "test").unwrap();
        assert_eq!(tt, TypeTag::Blob);
        assert_eq!(value, 16);
        assert_eq!(n, 2);
    }

    #[test]
    fn test_decode_rejects_leading_close_byte() {
        let result = decode_type_and_value(&[CLOSE, 0x85], "test");
        assert_eq!(result, Err(DecodeError::LeadingCloseByte));
    }

    #[test]
    fn test_decode_rejects_truncated_header() {
        // Continuation byte with no terminal byte following
        let result = decode_type_and_value(&[0x01], "test");
        assert!(matches!(result, Err(DecodeError::UnexpectedEof { .. })));
    }

    #[test]
    fn test_decode_rejects_overlong_header() {
        let result = decode_type_and_value(&[0x01; 11], "test");
        assert!(matches!(result, Err(DecodeError::HeaderTooLong { .. })));
    }

    #[test]
    fn test_decode_rejects_unassigned_type_tag() {
        // 0x87 & 7 == 7, the unassigned tag
        let result = decode_type_and_value(&[0x87], "test");
        assert_eq!(result, Err(DecodeError::InvalidTypeTag { tt: 7 }));
    }

    #[test]
    fn test_decode_rejects_value_overflow() {
        // Nine continuation bytes of all-ones then a terminal byte encode
        // more than 64 bits of value.
        let mut input = vec![0x7F; 9];
        input.push(0xFD);
        let result = decode_type_and_value(&input, "test");
        assert_eq!(result, Err(DecodeError::HeaderValueOverflow));
    }

    proptest! {
        #[test]
        fn prop_byte_count_matches_reference(value: u64) {
            prop_assert_eq!(header_byte_count(value), header_byte_count_reference(value));
        }

        #[test]
        fn prop_header_roundtrip(value: u64, tt_bits in 0u8..7) {
            let tt = TypeTag::from_wire(tt_bits).unwrap();
            let encoded = encode(tt, value);

            let (decoded_tt, decoded_value, n) =
                decode_type_and_value(&encoded, "test").unwrap();
            prop_assert_eq!(decoded_tt, tt);
            prop_assert_eq!(decoded_value, value);
            prop_assert_eq!(n, encoded.len());
        }

        #[test]
        fn prop_terminal_byte_is_the_only_one_with_top_bit(value: u64) {
            let encoded = encode(TypeTag::Blob, value);
            let (last, rest) = encoded.split_last().unwrap();
            prop_assert!(last & TT_FINAL != 0);
            prop_assert!(rest.iter().all(|b| b & TT_FINAL == 0));
        }
    }
}
