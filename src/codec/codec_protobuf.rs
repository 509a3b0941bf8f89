//! Protocol Buffers codec backed by `prost`

use super::{Codec, EncodedBuffer, Format};
use crate::error::{CodecError, CodecResult};
use crate::payload::Payload;

/// Schema-based binary codec
///
/// The output buffer is sized from `encoded_len` before writing, so a
/// protobuf encoding never over-allocates.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProtobufCodec;

impl<R: Payload> Codec<R> for ProtobufCodec {
    fn format(&self) -> Format {
        Format::Protobuf
    }

    fn encode(&self, record: &R) -> CodecResult<EncodedBuffer> {
        // `bincode::Encode` is also a supertrait of `Payload`, so qualify.
        let mut bytes = Vec::with_capacity(prost::Message::encoded_len(record));
        prost::Message::encode(record, &mut bytes)
            .map_err(|e| CodecError::Encoding {
                format: Format::Protobuf,
                reason: e.to_string(),
            })?;
        Ok(EncodedBuffer::new(Format::Protobuf, bytes))
    }

    fn decode(&self, bytes: &[u8]) -> CodecResult<R> {
        <R as prost::Message>::decode(bytes).map_err(|e| CodecError::Decoding {
            format: Format::Protobuf,
            reason: e.to_string(),
        })
    }
}
