//! Binary-XML encoding/decoding.
//!
//! The engine is split the way the wire format is layered: the growable
//! output buffer, the type-and-value header codec shared by both directions,
//! the stateful encoder and decoder, and the name codec built on top.

pub mod buffer;
pub mod decoder;
pub mod encoder;
pub mod header;
pub mod name;

pub use buffer::DynamicBuffer;
pub use decoder::BinaryXmlDecoder;
pub use encoder::BinaryXmlEncoder;
pub use header::TypeTag;
pub use name::{decode_name, decode_name_from, encode_name, encode_name_to};
