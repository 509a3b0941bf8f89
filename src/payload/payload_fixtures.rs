//! Fixture factories
//!
//! Each call builds a fresh value from constants, so no trial can observe a
//! mutation made by another.

use super::constants::*;
use super::payload_types::{BenchLarge, BenchMedium, BenchSmall};

// Continuation lines keep their two-tab indentation.
const MEDIUM_DESC: &str = "If you\u{2019}ve ever heard of ProtoBuf you may be thinking \n\
\t\tthat the results of this benchmarking experiment will be obvious,\n\
\t\tJSON < ProtoBuf.";

const LARGE_DESC: &str = "Lets benchmark some json and protobuf";

const LARGE_NICKNAME: &str = "Another name";

const LARGE_NUM: i64 = 2314;

const LARGE_FLT: f64 = 123451231.1234;

const LARGE_DATA: &str = "If you\u{2019}ve ever heard of ProtoBuf you may be thinking that\n\
\t\tthe results of this benchmarking experiment will be obvious, JSON < ProtoBuf.\n\
\t\tMy interest was in how much they actually differ in practice.\n\
\t\tHow do they compare on a couple of different metrics, specifically serialization\n\
\t\tand de-serialization speeds, and the memory footprint of encoding the data.\n\
\t\tI was also curious about how the different serialization methods would\n\
\t\tbehave under small, medium, and large chunks of data.";

/// Build the small fixture
pub fn small() -> BenchSmall {
    BenchSmall {
        action: SMALL_ACTION.to_string(),
        key: SMALL_KEY.to_vec(),
    }
}

/// Build the medium fixture
pub fn medium() -> BenchMedium {
    BenchMedium {
        name: TESTER_NAME.to_string(),
        age: TESTER_AGE,
        height: TESTER_HEIGHT,
        weight: TESTER_WEIGHT,
        alive: true,
        desc: MEDIUM_DESC.as_bytes().to_vec(),
    }
}

/// Build the large fixture
pub fn large() -> BenchLarge {
    BenchLarge {
        name: TESTER_NAME.to_string(),
        age: TESTER_AGE,
        height: TESTER_HEIGHT,
        weight: TESTER_WEIGHT,
        alive: true,
        desc: LARGE_DESC.as_bytes().to_vec(),
        nickname: LARGE_NICKNAME.to_string(),
        num: LARGE_NUM,
        flt: LARGE_FLT,
        data: LARGE_DATA.as_bytes().to_vec(),
    }
}
