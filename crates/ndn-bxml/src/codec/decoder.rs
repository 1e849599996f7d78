//! Stateful Binary-XML decoder.

use crate::codec::header::{self, CLOSE, TypeTag};
use crate::error::DecodeError;

/// Reader consuming Binary-XML elements from an immutable input slice.
///
/// Mirrors the encoder's grammar: peek or consume a dictionary tag, read
/// blob/character-data content, consume the element close. Blob and
/// character-data payloads are returned as borrowed views into the input
/// (zero-copy); the decoder allocates nothing on the input side, so many
/// decoders may run concurrently over distinct inputs.
///
/// Input is treated as untrusted: every read is bounds-checked and fails
/// with a [`DecodeError`] on truncated or malformed bytes, never panicking
/// and never reading past the end of the slice.
#[derive(Debug, Clone)]
pub struct BinaryXmlDecoder<'a> {
    input: &'a [u8],
    offset: usize,
}

impl<'a> BinaryXmlDecoder<'a> {
    /// Creates a decoder over `input`.
    pub fn new(input: &'a [u8]) -> Self {
        Self { input, offset: 0 }
    }

    /// Returns the current position in the input.
    pub fn position(&self) -> usize {
        self.offset
    }

    /// Returns the unconsumed bytes.
    pub fn remaining(&self) -> &'a [u8] {
        &self.input[self.offset..]
    }

    /// Returns true if all input has been consumed.
    pub fn is_empty(&self) -> bool {
        self.offset >= self.input.len()
    }

    /// Non-consuming lookahead: does the next header open the dictionary-tag
    /// element `dtag`?
    ///
    /// Returns `Ok(false)` if the next byte is the element close (the
    /// enclosing element has no more children) or the next header is some
    /// other element. Errors on truncated input or a malformed header, so
    /// "zero or more repeated elements" loops cannot spin on garbage.
    pub fn peek_dtag(&self, dtag: u64) -> Result<bool, DecodeError> {
        match self.remaining().first() {
            None => Err(DecodeError::UnexpectedEof {
                context: "element header",
            }),
            Some(&CLOSE) => Ok(false),
            Some(_) => {
                let (tt, value, _) =
                    header::decode_type_and_value(self.remaining(), "element header")?;
                Ok(tt == TypeTag::DTag && value == dtag)
            }
        }
    }

    /// Consumes the header opening the dictionary-tag element `dtag`.
    pub fn read_dtag(&mut self, dtag: u64) -> Result<(), DecodeError> {
        let (tt, value) = self.decode_type_and_value("dictionary tag")?;
        if tt != TypeTag::DTag {
            return Err(DecodeError::TypeTagMismatch {
                expected: TypeTag::DTag,
                found: tt,
            });
        }
        if value != dtag {
            return Err(DecodeError::TagMismatch {
                expected: dtag,
                found: value,
            });
        }
        Ok(())
    }

    /// Consumes the element close byte.
    pub fn read_element_close(&mut self) -> Result<(), DecodeError> {
        match self.remaining().first() {
            None => Err(DecodeError::UnexpectedEof {
                context: "element close",
            }),
            Some(&CLOSE) => {
                self.offset += 1;
                Ok(())
            }
            Some(&found) => Err(DecodeError::CloseMismatch { found }),
        }
    }

    /// Consumes a blob, returning a borrowed view of its payload.
    ///
    /// The payload length is explicit in the header, so no close byte
    /// follows the blob itself.
    pub fn read_blob(&mut self) -> Result<&'a [u8], DecodeError> {
        let (tt, len) = self.decode_type_and_value("blob header")?;
        if tt != TypeTag::Blob {
            return Err(DecodeError::TypeTagMismatch {
                expected: TypeTag::Blob,
                found: tt,
            });
        }
        self.read_bytes(len, "blob payload")
    }

    /// Consumes a character-data element, returning its ASCII payload.
    pub fn read_udata(&mut self) -> Result<&'a [u8], DecodeError> {
        let (tt, len) = self.decode_type_and_value("character data header")?;
        if tt != TypeTag::UData {
            return Err(DecodeError::TypeTagMismatch {
                expected: TypeTag::UData,
                found: tt,
            });
        }
        self.read_bytes(len, "character data payload")
    }

    /// Consumes `header(DTAG, dtag) blob CLOSE`, returning the blob payload.
    pub fn read_blob_dtag_element(&mut self, dtag: u64) -> Result<&'a [u8], DecodeError> {
        self.read_dtag(dtag)?;
        let payload = self.read_blob()?;
        self.read_element_close()?;
        Ok(payload)
    }

    /// Consumes `header(DTAG, dtag) udata CLOSE`, returning the payload.
    pub fn read_udata_dtag_element(&mut self, dtag: u64) -> Result<&'a [u8], DecodeError> {
        self.read_dtag(dtag)?;
        let payload = self.read_udata()?;
        self.read_element_close()?;
        Ok(payload)
    }

    /// Consumes a character-data element holding an ASCII decimal integer.
    pub fn read_unsigned_decimal_int(&mut self) -> Result<u64, DecodeError> {
        let digits = self.read_udata()?;
        parse_unsigned_decimal_int(digits)
    }

    /// [`read_unsigned_decimal_int`](Self::read_unsigned_decimal_int)
    /// wrapped in a dictionary-tag element.
    pub fn read_unsigned_decimal_int_dtag_element(&mut self, dtag: u64) -> Result<u64, DecodeError> {
        self.read_dtag(dtag)?;
        let value = self.read_unsigned_decimal_int()?;
        self.read_element_close()?;
        Ok(value)
    }

    /// Consumes a blob element holding a big-endian unsigned integer.
    ///
    /// An empty blob decodes to 0, the dual of the encoder's convention of
    /// stripping all leading zero bytes. Blobs longer than 8 bytes cannot
    /// fit a u64 and are rejected.
    pub fn read_unsigned_int_big_endian_dtag_element(
        &mut self,
        dtag: u64,
    ) -> Result<u64, DecodeError> {
        self.read_dtag(dtag)?;
        let bytes = self.read_blob()?;
        if bytes.len() > 8 {
            return Err(DecodeError::BigEndianOverflow { len: bytes.len() });
        }
        let value = bytes.iter().fold(0u64, |acc, &b| (acc << 8) | b as u64);
        self.read_element_close()?;
        Ok(value)
    }

    /// Consumes the next header.
    fn decode_type_and_value(
        &mut self,
        context: &'static str,
    ) -> Result<(TypeTag, u64), DecodeError> {
        let (tt, value, n_bytes) = header::decode_type_and_value(self.remaining(), context)?;
        self.offset += n_bytes;
        Ok((tt, value))
    }

    /// Consumes exactly `len` payload bytes, bounds-checked against the
    /// remaining input before the u64 length is narrowed to usize.
    fn read_bytes(&mut self, len: u64, context: &'static str) -> Result<&'a [u8], DecodeError> {
        if len > self.remaining().len() as u64 {
            return Err(DecodeError::UnexpectedEof { context });
        }
        let len = len as usize;
        let bytes = &self.input[self.offset..self.offset + len];
        self.offset += len;
        Ok(bytes)
    }
}

/// Parses an ASCII decimal digit string. Empty input parses as 0.
fn parse_unsigned_decimal_int(digits: &[u8]) -> Result<u64, DecodeError> {
    let mut result: u64 = 0;
    for &byte in digits {
        if !byte.is_ascii_digit() {
            return Err(DecodeError::InvalidDecimalDigit { byte });
        }
        result = result
            .checked_mul(10)
            .and_then(|r| r.checked_add((byte - b'0') as u64))
            .ok_or(DecodeError::DecimalOverflow)?;
    }
    Ok(result)
}
