// libm24sr/libm24sr/src/ndef/records/aar.rs

//! Android Application Record.

use crate::ndef::header::{RecordHeader, TypeNameFormat};
use crate::ndef::record::{NdefRecord, RecordView};

const AAR_TYPE: &[u8] = b"android.com:pkg";

/// Android Application Record: external type `android.com:pkg`.
#[derive(Debug, Clone)]
pub struct AarRecord {
    header: RecordHeader,
    package: String,
}

impl AarRecord {
    /// Record naming the Android package `package`.
    pub fn new(package: impl Into<String>) -> Self {
        let mut header = RecordHeader::new();
        header.set_tnf(TypeNameFormat::External);
        header.set_type_length(AAR_TYPE.len() as u8);
        let mut record = Self {
            header,
            package: package.into(),
        };
        record.refresh();
        record
    }

    /// Package name.
    pub fn package(&self) -> &str {
        &self.package
    }

    /// Accepts an external record of type `android.com:pkg` with a UTF-8 payload.
    pub fn parse(view: &RecordView<'_>) -> Option<Self> {
        if view.header.tnf() != TypeNameFormat::External || view.type_field != AAR_TYPE {
            return None;
        }
        let package = std::str::from_utf8(view.payload).ok()?;
        Some(Self::new(package))
    }
}

impl PartialEq for AarRecord {
    fn eq(&self, other: &Self) -> bool {
        self.package == other.package
    }
}

impl NdefRecord for AarRecord {
    fn header(&self) -> &RecordHeader {
        &self.header
    }

    fn header_mut(&mut self) -> &mut RecordHeader {
        &mut self.header
    }

    fn type_field(&self) -> &[u8] {
        AAR_TYPE
    }

    fn payload_len(&self) -> usize {
        self.package.len()
    }

    fn write_payload(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(self.package.as_bytes());
    }
}
