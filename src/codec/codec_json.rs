//! JSON codec backed by `serde_json`

use super::{Codec, EncodedBuffer, Format};
use crate::error::{CodecError, CodecResult};
use crate::payload::Payload;

/// Generic text codec
///
/// `serde_json::to_vec` starts from a fixed initial capacity and grows it,
/// so the returned buffer usually carries unused capacity.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonCodec;

impl<R: Payload> Codec<R> for JsonCodec {
    fn format(&self) -> Format {
        Format::Json
    }

    fn encode(&self, record: &R) -> CodecResult<EncodedBuffer> {
        let bytes = serde_json::to_vec(record).map_err(|e| CodecError::Encoding {
            format: Format::Json,
            reason: e.to_string(),
        })?;
        Ok(EncodedBuffer::new(Format::Json, bytes))
    }

    fn decode(&self, bytes: &[u8]) -> CodecResult<R> {
        serde_json::from_slice(bytes).map_err(|e| CodecError::Decoding {
            format: Format::Json,
            reason: e.to_string(),
        })
    }
}
