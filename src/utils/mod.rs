mod serialize_timestamp;

pub use serialize_timestamp::*;
