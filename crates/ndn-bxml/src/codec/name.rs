//! Name encoding/decoding.
//!
//! The grammar is `Name → Component*`, on the wire
//! `header(DTAG, NAME) (header(DTAG, COMPONENT) blob CLOSE)* CLOSE`.

use crate::codec::decoder::BinaryXmlDecoder;
use crate::codec::encoder::BinaryXmlEncoder;
use crate::error::{DecodeError, EncodeError};
use crate::model::{Name, dtag};

/// Decodes a name from `input`, bounded by `max_components`.
///
/// Components borrow from `input` (zero-copy). If the wire name has more
/// than `max_components` components the decode fails with
/// [`DecodeError::ComponentsExceedLimit`] rather than silently truncating,
/// and the partially built name is dropped, never visible to the caller.
pub fn decode_name(input: &[u8], max_components: usize) -> Result<Name<'_>, DecodeError> {
    let mut decoder = BinaryXmlDecoder::new(input);
    decode_name_from(&mut decoder, max_components)
}

/// Decodes a name at the decoder's current position, for names embedded in
/// a larger packet (interests, key locators).
pub fn decode_name_from<'a>(
    decoder: &mut BinaryXmlDecoder<'a>,
    max_components: usize,
) -> Result<Name<'a>, DecodeError> {
    decoder.read_dtag(dtag::NAME)?;

    let mut name = Name::new();
    while decoder.peek_dtag(dtag::COMPONENT)? {
        if name.len() >= max_components {
            return Err(DecodeError::ComponentsExceedLimit {
                max: max_components,
            });
        }
        let component = decoder.read_blob_dtag_element(dtag::COMPONENT)?;
        name.push(component);
    }

    decoder.read_element_close()?;
    Ok(name)
}

/// Encodes a name to a fresh byte vector.
pub fn encode_name(name: &Name<'_>) -> Result<Vec<u8>, EncodeError> {
    let mut encoder = BinaryXmlEncoder::new();
    encode_name_to(name, &mut encoder)?;
    Ok(encoder.into_bytes())
}

/// Encodes a name into an existing encoder, for embedding in a larger
/// packet.
pub fn encode_name_to(name: &Name<'_>, encoder: &mut BinaryXmlEncoder) -> Result<(), EncodeError> {
    encoder.write_element_start_dtag(dtag::NAME)?;
    for component in name.iter() {
        encoder.write_blob_dtag_element(dtag::COMPONENT, component)?;
    }
    encoder.write_element_close()
}
