//! Growable byte buffer backing the encoder.

use crate::error::EncodeError;

/// An owned, resizable byte array with amortized-geometric growth.
///
/// All encode operations funnel through this buffer: writers call
/// [`ensure_length`](DynamicBuffer::ensure_length) before indexing, so no
/// write ever touches an out-of-bounds offset. Growth may relocate the
/// underlying storage, so views obtained from [`as_slice`](DynamicBuffer::as_slice)
/// must not be held across a call that can grow the buffer.
#[derive(Debug, Clone, Default)]
pub struct DynamicBuffer {
    bytes: Vec<u8>,
}

impl DynamicBuffer {
    /// Creates an empty buffer.
    pub fn new() -> Self {
        Self { bytes: Vec::new() }
    }

    /// Creates an empty buffer with a capacity hint.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            bytes: Vec::with_capacity(capacity),
        }
    }

    /// Guarantees the buffer holds at least `length` initialized bytes.
    ///
    /// Grows geometrically (doubling, or straight to `length` if doubling is
    /// not enough) so repeated one-byte extensions cost amortized linear
    /// copies. Never shrinks and never truncates existing content.
    /// Allocation failure is reported as [`EncodeError::OutOfMemory`] rather
    /// than aborting the process.
    pub fn ensure_length(&mut self, length: usize) -> Result<(), EncodeError> {
        if length <= self.bytes.len() {
            return Ok(());
        }
        if length > self.bytes.capacity() {
            let target = usize::max(self.bytes.capacity() * 2, length);
            self.bytes
                .try_reserve(target - self.bytes.len())
                .map_err(|_| EncodeError::OutOfMemory { requested: target })?;
        }
        self.bytes.resize(length, 0);
        Ok(())
    }

    /// Returns the number of initialized bytes.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Returns true if no bytes are initialized.
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Returns the initialized bytes.
    pub fn as_slice(&self) -> &[u8] {
        &self.bytes
    }

    /// Returns the initialized bytes mutably.
    pub fn as_mut_slice(&mut self) -> &mut [u8] {
        &mut self.bytes
    }

    /// Consumes the buffer, truncated to `length` bytes.
    pub fn into_vec(mut self, length: usize) -> Vec<u8> {
        self.bytes.truncate(length);
        self.bytes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ensure_length_grows_and_zero_fills() {
        let mut buf = DynamicBuffer::new();
        buf.ensure_length(4).unwrap();
        assert_eq!(buf.len(), 4);
        assert_eq!(buf.as_slice(), &[0, 0, 0, 0]);
    }

    #[test]
    fn test_ensure_length_preserves_content() {
        let mut buf = DynamicBuffer::new();
        buf.ensure_length(2).unwrap();
        buf.as_mut_slice()[0] = 0xAB;
        buf.as_mut_slice()[1] = 0xCD;

        buf.ensure_length(1000).unwrap();
        assert_eq!(buf.as_slice()[0], 0xAB);
        assert_eq!(buf.as_slice()[1], 0xCD);
    }

    #[test]
    fn test_ensure_length_never_shrinks() {
        let mut buf = DynamicBuffer::new();
        buf.ensure_length(10).unwrap();
        buf.ensure_length(3).unwrap();
        assert_eq!(buf.len(), 10);
    }

    #[test]
    fn test_into_vec_truncates_to_logical_length() {
        let mut buf = DynamicBuffer::new();
        buf.ensure_length(8).unwrap();
        buf.as_mut_slice()[..3].copy_from_slice(&[1, 2, 3]);
        assert_eq!(buf.into_vec(3), vec![1, 2, 3]);
    }
}
