//! Stateful Binary-XML encoder.

use crate::codec::buffer::DynamicBuffer;
use crate::codec::header::{self, CLOSE, TypeTag};
use crate::error::EncodeError;

/// Writer producing Binary-XML elements into a growable buffer.
///
/// The encoder exposes the element grammar directly: open a dictionary-tag
/// element, write nested content, close it. Well-formed nesting is implied
/// by call order rather than tracked by an explicit stack, exactly as the
/// decoder consumes it.
///
/// Integers whose length is unknown until they are written (decimal digit
/// strings, big-endian byte strings) are produced in reverse order and then
/// fixed up by a single combined reverse-and-shift pass that also vacates
/// space for the header; see
/// [`write_unsigned_decimal_int`](BinaryXmlEncoder::write_unsigned_decimal_int).
#[derive(Debug, Clone, Default)]
pub struct BinaryXmlEncoder {
    output: DynamicBuffer,
    offset: usize,
}

impl BinaryXmlEncoder {
    /// Creates an empty encoder.
    pub fn new() -> Self {
        Self {
            output: DynamicBuffer::new(),
            offset: 0,
        }
    }

    /// Creates an empty encoder with a capacity hint.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            output: DynamicBuffer::with_capacity(capacity),
            offset: 0,
        }
    }

    /// Returns the number of bytes written so far.
    pub fn len(&self) -> usize {
        self.offset
    }

    /// Returns true if nothing has been written.
    pub fn is_empty(&self) -> bool {
        self.offset == 0
    }

    /// Returns the bytes written so far.
    pub fn as_bytes(&self) -> &[u8] {
        &self.output.as_slice()[..self.offset]
    }

    /// Consumes the encoder, returning the written bytes.
    pub fn into_bytes(self) -> Vec<u8> {
        self.output.into_vec(self.offset)
    }

    /// Writes the type-and-value header for `(tt, value)`.
    pub fn encode_type_and_value(&mut self, tt: TypeTag, value: u64) -> Result<(), EncodeError> {
        let n_bytes = header::header_byte_count(value);
        self.output.ensure_length(self.offset + n_bytes)?;
        header::encode_type_and_value(
            &mut self.output.as_mut_slice()[self.offset..self.offset + n_bytes],
            tt,
            value,
        );
        self.offset += n_bytes;
        Ok(())
    }

    /// Opens a dictionary-tag element.
    pub fn write_element_start_dtag(&mut self, dtag: u64) -> Result<(), EncodeError> {
        self.encode_type_and_value(TypeTag::DTag, dtag)
    }

    /// Closes the innermost open element with the reserved terminator byte.
    pub fn write_element_close(&mut self) -> Result<(), EncodeError> {
        self.output.ensure_length(self.offset + 1)?;
        self.output.as_mut_slice()[self.offset] = CLOSE;
        self.offset += 1;
        Ok(())
    }

    /// Writes a blob: `header(BLOB, len)` followed by the bytes verbatim.
    ///
    /// The header value equals the payload length exactly, so the decoder
    /// finds the blob's end without scanning; the close byte terminates the
    /// enclosing element, not the blob.
    pub fn write_blob(&mut self, bytes: &[u8]) -> Result<(), EncodeError> {
        self.encode_type_and_value(TypeTag::Blob, bytes.len() as u64)?;
        self.write_array(bytes)
    }

    /// Writes the standard "named element wrapping one blob" pattern:
    /// element start, blob, element close.
    pub fn write_blob_dtag_element(&mut self, dtag: u64, bytes: &[u8]) -> Result<(), EncodeError> {
        self.write_element_start_dtag(dtag)?;
        self.write_blob(bytes)?;
        self.write_element_close()
    }

    /// Writes `value` as its ASCII decimal digit string in a UDATA element.
    ///
    /// Timestamps, segment numbers and other canonically-readable integers
    /// are carried this way rather than as raw binary. Digits come out of
    /// the mod-10 loop least-significant-first; the shared reverse-and-shift
    /// pass puts them in order and vacates space for the header. `0`
    /// encodes as the single digit `"0"`.
    pub fn write_unsigned_decimal_int(&mut self, value: u64) -> Result<(), EncodeError> {
        let start_offset = self.offset;
        self.encode_reversed_unsigned_decimal_int(value)?;
        self.reverse_buffer_and_insert_header(start_offset, TypeTag::UData)
    }

    /// [`write_unsigned_decimal_int`](Self::write_unsigned_decimal_int)
    /// wrapped in a dictionary-tag element.
    pub fn write_unsigned_decimal_int_dtag_element(
        &mut self,
        dtag: u64,
        value: u64,
    ) -> Result<(), EncodeError> {
        self.write_element_start_dtag(dtag)?;
        self.write_unsigned_decimal_int(value)?;
        self.write_element_close()
    }

    /// Writes `value` as a big-endian byte blob with no leading zero bytes.
    ///
    /// Bytes come out of the shift loop least-significant-first and are
    /// fixed up by the shared reverse-and-shift pass. `0` produces a
    /// zero-length blob: the loop emits no bytes, and the decoder folds the
    /// empty payload back to 0.
    pub fn write_unsigned_int_big_endian_blob(&mut self, mut value: u64) -> Result<(), EncodeError> {
        let start_offset = self.offset;
        while value != 0 {
            self.output.ensure_length(self.offset + 1)?;
            self.output.as_mut_slice()[self.offset] = (value & 0xFF) as u8;
            self.offset += 1;
            value >>= 8;
        }
        self.reverse_buffer_and_insert_header(start_offset, TypeTag::Blob)
    }

    /// [`write_unsigned_int_big_endian_blob`](Self::write_unsigned_int_big_endian_blob)
    /// wrapped in a dictionary-tag element (the form timestamp fields use).
    pub fn write_unsigned_int_big_endian_blob_dtag_element(
        &mut self,
        dtag: u64,
        value: u64,
    ) -> Result<(), EncodeError> {
        self.write_element_start_dtag(dtag)?;
        self.write_unsigned_int_big_endian_blob(value)?;
        self.write_element_close()
    }

    /// Copies `bytes` to the output verbatim. No header.
    fn write_array(&mut self, bytes: &[u8]) -> Result<(), EncodeError> {
        self.output.ensure_length(self.offset + bytes.len())?;
        self.output.as_mut_slice()[self.offset..self.offset + bytes.len()].copy_from_slice(bytes);
        self.offset += bytes.len();
        Ok(())
    }

    /// Emits the decimal digits of `value` least-significant-first.
    /// At least one digit, so 0 yields "0" (reversed). No header.
    fn encode_reversed_unsigned_decimal_int(&mut self, mut value: u64) -> Result<(), EncodeError> {
        loop {
            self.output.ensure_length(self.offset + 1)?;
            self.output.as_mut_slice()[self.offset] = b'0' + (value % 10) as u8;
            self.offset += 1;
            value /= 10;
            if value == 0 {
                break;
            }
        }
        Ok(())
    }

    /// Reverses the content at `[start_offset, offset)`, shifts it right to
    /// make room for its header, and writes `header(tt, content_len)` in the
    /// vacated space.
    ///
    /// Reversing and shifting happen in one combined pass: the first
    /// `n_header` bytes of the reversed content are copied to their final
    /// positions at the tail (which reverses them on the way), then the
    /// remaining bytes are reversed in place. The result is byte-identical
    /// to reversing the whole content and then shifting it right by
    /// `n_header`.
    fn reverse_buffer_and_insert_header(
        &mut self,
        start_offset: usize,
        tt: TypeTag,
    ) -> Result<(), EncodeError> {
        let n_buffer = self.offset - start_offset;
        let n_header = header::header_byte_count(n_buffer as u64);
        self.output.ensure_length(self.offset + n_header)?;

        let bytes = self.output.as_mut_slice();
        for i in 0..n_header.min(n_buffer) {
            bytes[start_offset + n_buffer + n_header - 1 - i] = bytes[start_offset + i];
        }
        if n_buffer > n_header {
            bytes[start_offset + n_header..start_offset + n_buffer].reverse();
        }

        // Rewind to write the real header in the vacated space, then restore
        // the offset past header and content.
        self.offset = start_offset;
        self.encode_type_and_value(tt, n_buffer as u64)?;
        debug_assert_eq!(self.offset, start_offset + n_header);
        self.offset = start_offset + n_header + n_buffer;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_write_element_start_and_close() {
        let mut encoder = BinaryXmlEncoder::new();
        encoder.write_element_start_dtag(14).unwrap();
        encoder.write_element_close().unwrap();
        assert_eq!(encoder.as_bytes(), &[0xF2, 0x00]);
    }

    #[test]
    fn test_write_blob() {
        let mut encoder = BinaryXmlEncoder::new();
        encoder.write_blob(b"a").unwrap();
        assert_eq!(encoder.as_bytes(), &[0x8D, 0x61]);
    }

    #[test]
    fn test_write_empty_blob() {
        let mut encoder = BinaryXmlEncoder::new();
        encoder.write_blob(b"").unwrap();
        assert_eq!(encoder.as_bytes(), &[0x85]);
    }

    #[test]
    fn test_write_blob_dtag_element() {
        let mut encoder = BinaryXmlEncoder::new();
        encoder.write_blob_dtag_element(15, b"a").unwrap();
        assert_eq!(encoder.as_bytes(), &[0xFA, 0x8D, 0x61, 0x00]);
    }

    #[test]
    fn test_write_long_blob_uses_two_byte_header() {
        let payload = [0xAAu8; 16];
        let mut encoder = BinaryXmlEncoder::new();
        encoder.write_blob(&payload).unwrap();
        assert_eq!(&encoder.as_bytes()[..2], &[0x01, 0x85]);
        assert_eq!(&encoder.as_bytes()[2..], &payload);
    }

    #[test]
    fn test_write_decimal_zero() {
        let mut encoder = BinaryXmlEncoder::new();
        encoder.write_unsigned_decimal_int(0).unwrap();
        assert_eq!(encoder.as_bytes(), &[0x8E, b'0']);
    }

    #[test]
    fn test_write_decimal_300() {
        let mut encoder = BinaryXmlEncoder::new();
        encoder.write_unsigned_decimal_int(300).unwrap();
        assert_eq!(encoder.as_bytes(), &[0x9E, b'3', b'0', b'0']);
    }

    #[test]
    fn test_write_decimal_has_no_leading_zeros() {
        let mut encoder = BinaryXmlEncoder::new();
        encoder.write_unsigned_decimal_int(1024).unwrap();
        assert_eq!(&encoder.as_bytes()[1..], b"1024");
    }

    #[test]
    fn test_write_big_endian_zero_is_empty_blob() {
        let mut encoder = BinaryXmlEncoder::new();
        encoder.write_unsigned_int_big_endian_blob(0).unwrap();
        assert_eq!(encoder.as_bytes(), &[0x85]);
    }

    #[test]
    fn test_write_big_endian_strips_leading_zero_bytes() {
        let mut encoder = BinaryXmlEncoder::new();
        encoder.write_unsigned_int_big_endian_blob(0x0102).unwrap();
        assert_eq!(encoder.as_bytes(), &[0x95, 0x01, 0x02]);

        let mut encoder = BinaryXmlEncoder::new();
        encoder.write_unsigned_int_big_endian_blob(256).unwrap();
        assert_eq!(encoder.as_bytes(), &[0x95, 0x01, 0x00]);
    }

    #[test]
    fn test_nested_elements() {
        let mut encoder = BinaryXmlEncoder::new();
        encoder.write_element_start_dtag(26).unwrap();
        encoder.write_blob_dtag_element(15, b"x").unwrap();
        encoder.write_element_close().unwrap();

        // dtag 26 needs a two-byte header: continuation 0x01, terminal 0xD2
        assert_eq!(
            encoder.into_bytes(),
            vec![0x01, 0xD2, 0xFA, 0x8D, b'x', 0x00, 0x00]
        );
    }

    /// Reference semantics for the combined pass: reverse the whole content,
    /// shift it right by the header size, then prepend the header.
    fn reverse_then_shift_reference(reversed_content: &[u8], tt: TypeTag) -> Vec<u8> {
        let n_header = header::header_byte_count(reversed_content.len() as u64);
        let mut expected = vec![0u8; n_header];
        header::encode_type_and_value(&mut expected, tt, reversed_content.len() as u64);
        expected.extend(reversed_content.iter().rev());
        expected
    }

    proptest! {
        #[test]
        fn prop_reverse_and_insert_matches_reference(
            content in proptest::collection::vec(any::<u8>(), 0..300),
            use_udata: bool,
            prefix_len in 0usize..8,
        ) {
            let tt = if use_udata { TypeTag::UData } else { TypeTag::Blob };
            let prefix = vec![0x5Au8; prefix_len];

            let mut encoder = BinaryXmlEncoder::new();
            encoder.write_array(&prefix).unwrap();
            encoder.write_array(&content).unwrap();
            encoder.reverse_buffer_and_insert_header(prefix_len, tt).unwrap();

            let mut expected = prefix;
            expected.extend(reverse_then_shift_reference(&content, tt));
            prop_assert_eq!(encoder.as_bytes(), expected.as_slice());
        }

        #[test]
        fn prop_decimal_digits_are_canonical(value: u64) {
            let mut encoder = BinaryXmlEncoder::new();
            encoder.write_unsigned_decimal_int(value).unwrap();

            let expected = value.to_string();
            let n_header = header::header_byte_count(expected.len() as u64);
            let digits = &encoder.as_bytes()[n_header..];
            prop_assert_eq!(digits, expected.as_bytes());
        }
    }
}
