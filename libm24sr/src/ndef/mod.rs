// libm24sr/libm24sr/src/ndef/mod.rs

//! NDEF message and record codec.
//!
//! Records are recognised by signature: [`Record::parse`] tries each variant
//! in a fixed order and the first one that accepts the bytes wins (see
//! [`record::dispatch_order`]).

pub mod header;
pub mod message;
pub mod record;
pub mod records;

pub use header::{RecordHeader, TypeNameFormat};
pub use message::{MAX_MESSAGE_LEN, Message};
pub use record::{NdefRecord, Record, RecordType, RecordView};
pub use records::*;
