// libm24sr/libm24sr/src/ndef/records/mail.rs

//! `mailto:` URI with subject and body.

use crate::ndef::header::RecordHeader;
use crate::ndef::record::{NdefRecord, RecordView};
use crate::ndef::records::uri::{UriPrefix, UriRecord};

const SUBJECT_KEY: &str = "?subject=";
const BODY_KEY: &str = "&body=";

/// `mailto:` URI carrying address, subject and body.
#[derive(Debug, Clone)]
pub struct MailRecord {
    uri: UriRecord,
    to: String,
    subject: String,
    body: String,
    dirty: bool,
}

impl MailRecord {
    /// Mail to `to` with a subject and body.
    pub fn new(to: impl Into<String>, subject: impl Into<String>, body: impl Into<String>) -> Self {
        let mut record = Self {
            uri: UriRecord::new(UriPrefix::Mailto, ""),
            to: to.into(),
            subject: subject.into(),
            body: body.into(),
            dirty: true,
        };
        record.refresh();
        record
    }

    /// Recipient address.
    pub fn to_address(&self) -> &str {
        &self.to
    }

    /// Subject line.
    pub fn subject(&self) -> &str {
        &self.subject
    }

    /// Message body.
    pub fn body(&self) -> &str {
        &self.body
    }

    /// Change the recipient.
    pub fn set_to_address(&mut self, to: impl Into<String>) {
        self.to = to.into();
        self.dirty = true;
    }

    /// Change the subject.
    pub fn set_subject(&mut self, subject: impl Into<String>) {
        self.subject = subject.into();
        self.dirty = true;
    }

    /// Change the body.
    pub fn set_body(&mut self, body: impl Into<String>) {
        self.body = body.into();
        self.dirty = true;
    }

    /// The underlying URI record.
    pub fn uri(&self) -> &UriRecord {
        &self.uri
    }

    fn content(&self) -> String {
        format!("{}{}{}{}{}", self.to, SUBJECT_KEY, self.subject, BODY_KEY, self.body)
    }

    /// Matches mailto URIs of the form `addr?subject=S&body=B`.
    ///
    /// Other mailto URIs are left to the generic URI parser.
    pub fn parse(view: &RecordView<'_>) -> Option<Self> {
        let uri = UriRecord::parse_any_known(view)?;
        if uri.prefix() != UriPrefix::Mailto {
            return None;
        }
        let (to, rest) = uri.content().split_once(SUBJECT_KEY)?;
        let (subject, body) = rest.split_once(BODY_KEY)?;
        Some(Self {
            to: to.to_string(),
            subject: subject.to_string(),
            body: body.to_string(),
            uri,
            dirty: false,
        })
    }
}

impl PartialEq for MailRecord {
    fn eq(&self, other: &Self) -> bool {
        self.to == other.to && self.subject == other.subject && self.body == other.body
    }
}

impl NdefRecord for MailRecord {
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
            let content = self.content();
            self.uri.set_content(content);
            self.dirty = false;
        }
        self.uri.refresh();
    }
}
