//! Encoded output of a codec

use super::Format;

/// Bytes produced by one encode call
///
/// `used` is the logical output length and `allocated` the capacity of the
/// buffer the encoder returned. Capacity can exceed length when the encoder
/// grows its buffer geometrically.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedBuffer {
    format: Format,
    bytes: Vec<u8>,
}

impl EncodedBuffer {
    /// Wrap an encoder's output buffer without touching its capacity
    pub fn new(format: Format, bytes: Vec<u8>) -> Self {
        Self { format, bytes }
    }

    /// Format that produced these bytes
    pub fn format(&self) -> Format {
        self.format
    }

    /// Encoded bytes
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Logical payload size
    pub fn used(&self) -> usize {
        self.bytes.len()
    }

    /// Physical buffer capacity
    pub fn allocated(&self) -> usize {
        self.bytes.capacity()
    }

    /// Used/allocated ratio in `[0, 1]`, `None` for an empty allocation
    pub fn efficiency(&self) -> Option<f64> {
        crate::utils::ratio(self.used(), self.allocated())
    }

    /// Take the underlying buffer
    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }
}
