// libm24sr/libm24sr/src/ndef/records/sms.rs

//! `sms:` URI with a message body.

use crate::ndef::header::RecordHeader;
use crate::ndef::record::{NdefRecord, RecordView};
use crate::ndef::records::uri::UriRecord;

const SMS_SCHEME: &str = "sms:";
const BODY_KEY: &str = "?body=";

/// `sms:` URI with a phone number and message body.
#[derive(Debug, Clone)]
pub struct SmsRecord {
    uri: UriRecord,
    number: String,
    message: String,
    dirty: bool,
}

impl SmsRecord {
    /// Text message to `number`.
    pub fn new(number: impl Into<String>, message: impl Into<String>) -> Self {
        let mut record = Self {
            uri: UriRecord::with_custom_type(SMS_SCHEME, ""),
            number: number.into(),
            message: message.into(),
            dirty: true,
        };
        record.refresh();
        record
    }

    /// Destination number.
    pub fn number(&self) -> &str {
        &self.number
    }

    /// Message body.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Change the number.
    pub fn set_number(&mut self, number: impl Into<String>) {
        self.number = number.into();
        self.dirty = true;
    }

    /// Change the body.
    pub fn set_message(&mut self, message: impl Into<String>) {
        self.message = message.into();
        self.dirty = true;
    }

    /// The underlying `sms:` URI record.
    pub fn uri(&self) -> &UriRecord {
        &self.uri
    }

    /// Accepts a code-0 URI of the form `sms:<number>?body=<message>`.
    pub fn parse(view: &RecordView<'_>) -> Option<Self> {
        let uri = UriRecord::parse_with_scheme(view, SMS_SCHEME)?;
        let (number, message) = uri.content().split_once(BODY_KEY)?;
        Some(Self {
            number: number.to_string(),
            message: message.to_string(),
            uri,
            dirty: false,
        })
    }
}

impl PartialEq for SmsRecord {
    fn eq(&self, other: &Self) -> bool {
        self.number == other.number && self.message == other.message
    }
}

impl NdefRecord for SmsRecord {
    fn header(&self) -> &RecordHeader {
        self.uri.header()
    }

    fn header_mut(&mut self) -> &mut RecordHeader {
        self.uri.header_mut()
    }

    fn type_field(&self) -> &[u8] {
        self.uri.type_field()
    }

    fn payload_len(&self) -> usize {
        self.uri.payload_len()
    }

    fn write_payload(&self, out: &mut Vec<u8>) {
        self.uri.write_payload(out)
    }

    fn refresh(&mut self) {
        if self.dirty {
            let content = format!("{}{}{}", self.number, BODY_KEY, self.message);
            self.uri.set_content(content);
            self.dirty = false;
        }
        self.uri.refresh();
    }
}
