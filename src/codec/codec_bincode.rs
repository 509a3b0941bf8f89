//! bincode codec, a second binary format plugged into the same capability

use bincode::config::{self, Configuration};

use super::{Codec, EncodedBuffer, Format};
use crate::error::{CodecError, CodecResult};
use crate::payload::Payload;

/// Compact binary codec with varint integers and no field tags
#[derive(Debug, Clone, Copy, Default)]
pub struct BincodeCodec;

impl BincodeCodec {
    fn config(&self) -> Configuration {
        config::standard()
    }
}

impl<R: Payload> Codec<R> for BincodeCodec {
    fn format(&self) -> Format {
        Format::Bincode
    }

    fn encode(&self, record: &R) -> CodecResult<EncodedBuffer> {
        let bytes = bincode::encode_to_vec(record, self.config()).map_err(|e| CodecError::Encoding {
            format: Format::Bincode,
            reason: e.to_string(),
        })?;
        Ok(EncodedBuffer::new(Format::Bincode, bytes))
    }

    fn decode(&self, bytes: &[u8]) -> CodecResult<R> {
        let (record, consumed) =
            bincode::decode_from_slice(bytes, self.config()).map_err(|e| CodecError::Decoding {
                format: Format::Bincode,
                reason: e.to_string(),
            })?;
        if consumed != bytes.len() {
            return Err(CodecError::Decoding {
                format: Format::Bincode,
                reason: format!("{} trailing bytes after record", bytes.len() - consumed),
            });
        }
        Ok(record)
    }
}
