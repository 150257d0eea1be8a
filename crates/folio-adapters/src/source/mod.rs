//! Record and event-script sources.

mod json;

pub use json::{DecodeError, JsonRecordSource, decode_record};
