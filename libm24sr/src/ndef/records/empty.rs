// libm24sr/libm24sr/src/ndef/records/empty.rs

//! The empty record written for an empty message.

use crate::ndef::header::{RecordHeader, TypeNameFormat};
use crate::ndef::record::{NdefRecord, RecordView};

/// Zero-length record with TNF Empty. Stands in for an empty message.
#[derive(Debug, Clone)]
pub struct EmptyRecord {
    header: RecordHeader,
}

impl Default for EmptyRecord {
    fn default() -> Self {
        Self::new()
    }
}

impl EmptyRecord {
    /// Both message-begin and message-end are set.
    pub fn new() -> Self {
        let mut header = RecordHeader::new();
        header.set_tnf(TypeNameFormat::Empty);
        header.set_message_begin(true);
        header.set_message_end(true);
        Self { header }
    }

    /// Accepts a record whose TNF is Empty.
    pub fn parse(view: &RecordView<'_>) -> Option<Self> {
        (view.header.tnf() == TypeNameFormat::Empty).then(Self::new)
    }
}

impl PartialEq for EmptyRecord {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}

impl NdefRecord for EmptyRecord {
    fn header(&self) -> &RecordHeader {
        &self.header
    }

    fn header_mut(&mut self) -> &mut RecordHeader {
        &mut self.header
    }

    fn type_field(&self) -> &[u8] {
        &[]
    }

    fn payload_len(&self) -> usize {
        0
    }

    fn write_payload(&self, _out: &mut Vec<u8>) {}
}
