// libm24sr/libm24sr/src/ndef/records/mime.rs

//! MIME-media record.

use crate::ndef::header::{RecordHeader, TypeNameFormat};
use crate::ndef::record::{NdefRecord, RecordView};
use crate::{Error, Result};

const MAX_TYPE_LEN: usize = u8::MAX as usize;

/// MIME-media record: the MIME type is the record type, the payload is
/// opaque data owned by the record.
#[derive(Debug, Clone)]
pub struct MimeRecord {
    header: RecordHeader,
    mime_type: String,
    data: Vec<u8>,
}

impl MimeRecord {
    /// A MIME type longer than 255 bytes is accepted here and refused by
    /// [`NdefRecord::write`].
    pub fn new(mime_type: impl Into<String>, data: Vec<u8>) -> Self {
        let mime_type = mime_type.into();
        let mut header = RecordHeader::new();
        header.set_tnf(TypeNameFormat::MimeMedia);
        header.set_type_length(mime_type.len() as u8);
        let mut record = Self {
            header,
            mime_type,
            data,
        };
        record.refresh();
        record
    }

    /// MIME type, the record's type field.
    pub fn mime_type(&self) -> &str {
        &self.mime_type
    }

    /// Opaque payload.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Replace the data, taking ownership of `data`.
    pub fn set_data(&mut self, data: Vec<u8>) {
        self.data = data;
    }

    /// Replace the data with a copy of `data`.
    pub fn copy_data(&mut self, data: &[u8]) {
        self.data.clear();
        self.data.extend_from_slice(data);
    }

    pub(crate) fn matches(view: &RecordView<'_>, mime_type: &str) -> bool {
        view.header.tnf() == TypeNameFormat::MimeMedia && view.type_field == mime_type.as_bytes()
    }

    /// Accepts any MIME-media record with a UTF-8 type.
    pub fn parse(view: &RecordView<'_>) -> Option<Self> {
        if view.header.tnf() != TypeNameFormat::MimeMedia {
            return None;
        }
        let mime_type = std::str::from_utf8(view.type_field).ok()?;
        Some(Self::new(mime_type, view.payload.to_vec()))
    }
}

impl PartialEq for MimeRecord {
    fn eq(&self, other: &Self) -> bool {
        self.mime_type == other.mime_type && self.data == other.data
    }
}

impl NdefRecord for MimeRecord {
    fn header(&self) -> &RecordHeader {
        &self.header
    }

    fn header_mut(&mut self) -> &mut RecordHeader {
        &mut self.header
    }

    fn type_field(&self) -> &[u8] {
        self.mime_type.as_bytes()
    }

    fn payload_len(&self) -> usize {
        self.data.len()
    }

    fn write_payload(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(&self.data);
    }

    fn check(&self) -> Result<()> {
        if self.mime_type.len() > MAX_TYPE_LEN {
            return Err(Error::InvalidLength {
                expected: MAX_TYPE_LEN,
                actual: self.mime_type.len(),
            });
        }
        Ok(())
    }
}
