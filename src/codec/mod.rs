//! Codec module for the serialization formats under test
//!
//! Each format is a small adapter over an external serialization library that
//! exposes the same two operations for every payload record:
//!
//! - `encode(record) -> EncodedBuffer`
//! - `decode(bytes) -> record`
//!
//! Adapters are selected by [`Format`]. Adding a format means adding a type
//! that implements [`Codec`] and a variant to [`Format`]; the trial runner is
//! untouched.

pub mod encoded_buffer;
pub mod codec_protobuf;
pub mod codec_json;
pub mod codec_bincode;

// Re-export main types for convenience
pub use encoded_buffer::EncodedBuffer;
pub use codec_protobuf::ProtobufCodec;
pub use codec_json::JsonCodec;
pub use codec_bincode::BincodeCodec;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{CodecError, CodecResult, Error};
use crate::payload::Payload;

/// Encode/decode capability of one serialization format for one record type
pub trait Codec<R: Payload> {
    /// Format implemented by this codec
    fn format(&self) -> Format;

    /// Serialize a record into a freshly allocated buffer
    fn encode(&self, record: &R) -> CodecResult<EncodedBuffer>;

    /// Deserialize a record from bytes produced by [`Codec::encode`]
    fn decode(&self, bytes: &[u8]) -> CodecResult<R>;

    /// Encode, decode, and check the decoded record equals the input
    fn round_trip(&self, record: &R) -> CodecResult<EncodedBuffer> {
        let encoded = self.encode(record)?;
        let decoded = self.decode(encoded.as_bytes())?;
        if &decoded != record {
            return Err(CodecError::Mismatch {
                format: self.format(),
                reason: format!("{} record differs after decode", R::SIZE),
            });
        }
        Ok(encoded)
    }
}

/// Serialization format identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Format {
    /// Protocol Buffers via `prost`
    Protobuf,
    /// JSON via `serde_json`
    Json,
    /// bincode 2 standard configuration
    Bincode,
}

impl Format {
    /// All registered formats
    pub const fn all() -> [Format; 3] {
        [Format::Json, Format::Protobuf, Format::Bincode]
    }

    /// Name used in reports and trial names
    pub const fn name(self) -> &'static str {
        match self {
            Self::Protobuf => "protobuf",
            Self::Json => "json",
            Self::Bincode => "bincode",
        }
    }

    /// Codec adapter of this format for record type `R`
    pub fn codec<R: Payload>(self) -> Box<dyn Codec<R>> {
        match self {
            Self::Protobuf => Box::new(ProtobufCodec),
            Self::Json => Box::new(JsonCodec),
            Self::Bincode => Box::new(BincodeCodec),
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.name())
    }
}

impl FromStr for Format {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "protobuf" | "proto" | "pb" => Ok(Self::Protobuf),
            "json" => Ok(Self::Json),
            "bincode" => Ok(Self::Bincode),
            other => Err(Error::Configuration {
                message: format!("unknown format '{}'", other),
            }),
        }
    }
}
