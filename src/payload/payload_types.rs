//! Record definitions for the benchmark payloads
//!
//! The records mirror a protobuf schema:
//!
//! ```text
//! message BenchSmall  { string action = 1; bytes key = 2; }
//! message BenchMedium { string name = 1; int32 age = 2; float height = 3;
//!                       float weight = 4; bool alive = 5; bytes desc = 6; }
//! message BenchLarge  { string name = 1; int32 age = 2; float height = 3;
//!                       float weight = 4; bool alive = 5; bytes desc = 6;
//!                       string nickname = 7; int64 num = 8; double flt = 9;
//!                       bytes data = 10; }
//! ```

use std::fmt;
use std::str::FromStr;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use super::payload_utils::base64_bytes;
use crate::error::Error;

/// Size class of a payload record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SizeClass {
    /// A couple of short fields
    Small,
    /// Scalars plus a paragraph of bytes
    Medium,
    /// Scalars plus several byte fields, one of them a few paragraphs long
    Large,
}

impl SizeClass {
    /// All size classes in escalating order
    pub const fn all() -> [SizeClass; 3] {
        [SizeClass::Small, SizeClass::Medium, SizeClass::Large]
    }

    /// Label used in trial names
    pub const fn label(self) -> &'static str {
        match self {
            Self::Small => "small",
            Self::Medium => "medium",
            Self::Large => "large",
        }
    }
}

impl fmt::Display for SizeClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.label())
    }
}

impl FromStr for SizeClass {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "small" => Ok(Self::Small),
            "medium" => Ok(Self::Medium),
            "large" => Ok(Self::Large),
            other => Err(Error::Configuration {
                message: format!("unknown size class '{}'", other),
            }),
        }
    }
}

/// A record every codec can encode and decode
///
/// The bounds collect what the codec adapters need: `prost::Message` for the
/// binary format, `serde` for the text format and `bincode` for the compact
/// binary format.
pub trait Payload:
    prost::Message
    + Default
    + Clone
    + PartialEq
    + Serialize
    + DeserializeOwned
    + bincode::Encode
    + bincode::Decode<()>
    + 'static
{
    /// Size class of this record shape
    const SIZE: SizeClass;

    /// Build a fresh fixture value
    fn fixture() -> Self;
}

/// Small payload: an action name and a short key
#[derive(Clone, PartialEq, prost::Message, Serialize, Deserialize, bincode::Encode, bincode::Decode)]
pub struct BenchSmall {
    /// Action name
    #[prost(string, tag = "1")]
    pub action: String,
    /// Raw key bytes
    #[prost(bytes = "vec", tag = "2")]
    #[serde(with = "base64_bytes")]
    pub key: Vec<u8>,
}

/// Medium payload: a person-like record with a description
#[derive(Clone, PartialEq, prost::Message, Serialize, Deserialize, bincode::Encode, bincode::Decode)]
pub struct BenchMedium {
    /// Name
    #[prost(string, tag = "1")]
    pub name: String,
    /// Age in years
    #[prost(int32, tag = "2")]
    pub age: i32,
    /// Height
    #[prost(float, tag = "3")]
    pub height: f32,
    /// Weight
    #[prost(float, tag = "4")]
    pub weight: f32,
    /// Liveness flag
    #[prost(bool, tag = "5")]
    pub alive: bool,
    /// Free-form description bytes
    #[prost(bytes = "vec", tag = "6")]
    #[serde(with = "base64_bytes")]
    pub desc: Vec<u8>,
}

/// Large payload: the medium fields plus more scalars and a long data blob
#[derive(Clone, PartialEq, prost::Message, Serialize, Deserialize, bincode::Encode, bincode::Decode)]
pub struct BenchLarge {
    /// Name
    #[prost(string, tag = "1")]
    pub name: String,
    /// Age in years
    #[prost(int32, tag = "2")]
    pub age: i32,
    /// Height
    #[prost(float, tag = "3")]
    pub height: f32,
    /// Weight
    #[prost(float, tag = "4")]
    pub weight: f32,
    /// Liveness flag
    #[prost(bool, tag = "5")]
    pub alive: bool,
    /// Short description bytes
    #[prost(bytes = "vec", tag = "6")]
    #[serde(with = "base64_bytes")]
    pub desc: Vec<u8>,
    /// Second name
    #[prost(string, tag = "7")]
    pub nickname: String,
    /// 64-bit integer
    #[prost(int64, tag = "8")]
    pub num: i64,
    /// 64-bit float
    #[prost(double, tag = "9")]
    pub flt: f64,
    /// Long data blob
    #[prost(bytes = "vec", tag = "10")]
    #[serde(with = "base64_bytes")]
    pub data: Vec<u8>,
}

impl Payload for BenchSmall {
    const SIZE: SizeClass = SizeClass::Small;

    fn fixture() -> Self {
        super::small()
    }
}

impl Payload for BenchMedium {
    const SIZE: SizeClass = SizeClass::Medium;

    fn fixture() -> Self {
        super::medium()
    }
}

impl Payload for BenchLarge {
    const SIZE: SizeClass = SizeClass::Large;

    fn fixture() -> Self {
        super::large()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_size_class_labels() {
        let labels: Vec<&str> = SizeClass::all().iter().map(|s| s.label()).collect();
        assert_eq!(labels, vec!["small", "medium", "large"]);
    }

    #[test]
    fn test_size_class_display_pads() {
        assert_eq!(format!("{:<6}|", SizeClass::Small), "small |");
    }

    #[test]
    fn test_size_class_from_str() {
        assert_eq!("Medium".parse::<SizeClass>().unwrap(), SizeClass::Medium);
        assert!("huge".parse::<SizeClass>().is_err());
    }

    #[test]
    fn test_payload_size_binding() {
        assert_eq!(BenchSmall::SIZE, SizeClass::Small);
        assert_eq!(BenchMedium::SIZE, SizeClass::Medium);
        assert_eq!(BenchLarge::SIZE, SizeClass::Large);
    }

    #[test]
    fn test_default_records_are_empty() {
        let record = BenchLarge::default();
        assert!(record.name.is_empty());
        assert!(record.data.is_empty());
        assert_eq!(record.num, 0);
    }
}
