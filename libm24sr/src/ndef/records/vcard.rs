// libm24sr/libm24sr/src/ndef/records/vcard.rs

//! vCard 3.0 MIME record.

use std::collections::BTreeMap;

use crate::ndef::header::RecordHeader;
use crate::ndef::record::{NdefRecord, RecordView};
use crate::ndef::records::mime::MimeRecord;

const VCARD_MIME_TYPE: &str = "text/vcard";
const START_TAG: &str = "BEGIN:VCARD\nVERSION:3.0\n";
const END_TAG: &str = "END:VCARD";
const FIELD_END: char = '\n';

/// Field kinds of a vCard 3.0 block, ordered as they are written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum VCardField {
    /// `ADR:`
    Address,
    /// `ADR;TYPE=home:`
    AddressHome,
    /// `ADR;TYPE=work:`
    AddressWork,
    /// `AGENT:`
    Agent,
    /// `BDAY:`
    Birthday,
    /// `CATEGORIES:`
    Categories,
    /// `EMAIL:`
    Email,
    /// `EMAIL;TYPE=home:`
    EmailHome,
    /// `EMAIL;TYPE=work:`
    EmailWork,
    /// `FN:`
    FormattedName,
    /// Latitude and longitude separated by `;`.
    Geo,
    /// `IMPP:`
    Impp,
    /// `KEY;TYPE=PGP:`
    PgpKeyUrl,
    /// `KEY;TYPE=PGP;ENCODING=B:`
    PgpKeyBase64,
    /// `LOGO:`
    Logo,
    /// `LOGO;VALUE=uri:`
    LogoUri,
    /// `LOGO;ENCODING=B;`
    LogoBase64,
    /// `N:`
    Name,
    /// `NICKNAME:`
    Nickname,
    /// `NOTE:`
    Note,
    /// `ORG:`
    Organization,
    /// `PHOTO;VALUE=uri:`
    PhotoUri,
    /// `PHOTO;ENCODING=B;`
    PhotoBase64,
    /// `REV:`
    Revision,
    /// `SOURCE:`
    SourceUrl,
    /// `TEL:`
    Tel,
    /// `TEL;TYPE=HOME:`
    TelHome,
    /// `TEL;TYPE=WORK:`
    TelWork,
    /// `TEL;TYPE=CELL:`
    TelMobile,
    /// `TITLE:`
    Title,
    /// `URL:`
    Url,
}

impl VCardField {
    const ALL: [VCardField; 31] = [
        Self::Address,
        Self::AddressHome,
        Self::AddressWork,
        Self::Agent,
        Self::Birthday,
        Self::Categories,
        Self::Email,
        Self::EmailHome,
        Self::EmailWork,
        Self::FormattedName,
        Self::Geo,
        Self::Impp,
        Self::PgpKeyUrl,
        Self::PgpKeyBase64,
        Self::Logo,
        Self::LogoUri,
        Self::LogoBase64,
        Self::Name,
        Self::Nickname,
        Self::Note,
        Self::Organization,
        Self::PhotoUri,
        Self::PhotoBase64,
        Self::Revision,
        Self::SourceUrl,
        Self::Tel,
        Self::TelHome,
        Self::TelWork,
        Self::TelMobile,
        Self::Title,
        Self::Url,
    ];

    /// Tag that opens the field's line, separator included.
    pub fn tag(self) -> &'static str {
        match self {
            Self::Address => "ADR:",
            Self::AddressHome => "ADR;TYPE=home:",
            Self::AddressWork => "ADR;TYPE=work:",
            Self::Agent => "AGENT:",
            Self::Birthday => "BDAY:",
            Self::Categories => "CATEGORIES:",
            Self::Email => "EMAIL:",
            Self::EmailHome => "EMAIL;TYPE=home:",
            Self::EmailWork => "EMAIL;TYPE=work:",
            Self::FormattedName => "FN:",
            Self::Geo => "GEO:",
            Self::Impp => "IMPP:",
            Self::PgpKeyUrl => "KEY;TYPE=PGP:",
            Self::PgpKeyBase64 => "KEY;TYPE=PGP;ENCODING=B:",
            Self::Logo => "LOGO:",
            Self::LogoUri => "LOGO;VALUE=uri:",
            Self::LogoBase64 => "LOGO;ENCODING=B;",
            Self::Name => "N:",
            Self::Nickname => "NICKNAME:",
            Self::Note => "NOTE:",
            Self::Organization => "ORG:",
            Self::PhotoUri => "PHOTO;VALUE=uri:",
            Self::PhotoBase64 => "PHOTO;ENCODING=B;",
            Self::Revision => "REV:",
            Self::SourceUrl => "SOURCE:",
            Self::Tel => "TEL:",
            Self::TelHome => "TEL;TYPE=HOME:",
            Self::TelWork => "TEL;TYPE=WORK:",
            Self::TelMobile => "TEL;TYPE=CELL:",
            Self::Title => "TITLE:",
            Self::Url => "URL:",
        }
    }

    /// Longest tag that `line` starts with.
    fn match_line(line: &str) -> Option<Self> {
        Self::ALL
            .iter()
            .copied()
            .filter(|field| line.starts_with(field.tag()))
            .max_by_key(|field| field.tag().len())
    }
}

/// `text/vcard` record built from a field map.
#[derive(Debug, Clone)]
pub struct VCardRecord {
    mime: MimeRecord,
    fields: BTreeMap<VCardField, String>,
    dirty: bool,
}

impl Default for VCardRecord {
    fn default() -> Self {
        Self::new(BTreeMap::new())
    }
}

impl VCardRecord {
    /// Card holding `fields`.
    pub fn new(fields: BTreeMap<VCardField, String>) -> Self {
        let mut record = Self {
            mime: MimeRecord::new(VCARD_MIME_TYPE, Vec::new()),
            fields,
            dirty: true,
        };
        record.refresh();
        record
    }

    /// Value of `field`, if set.
    pub fn get(&self, field: VCardField) -> Option<&str> {
        self.fields.get(&field).map(String::as_str)
    }

    /// Set or replace `field`.
    pub fn set(&mut self, field: VCardField, value: impl Into<String>) {
        self.fields.insert(field, value.into());
        self.dirty = true;
    }

    /// Remove `field`, returning its value.
    pub fn remove(&mut self, field: VCardField) -> Option<String> {
        self.dirty = true;
        self.fields.remove(&field)
    }

    /// Mutable access to a field, created empty when missing.
    pub fn field_mut(&mut self, field: VCardField) -> &mut String {
        self.dirty = true;
        self.fields.entry(field).or_default()
    }

    /// All fields in write order.
    pub fn fields(&self) -> &BTreeMap<VCardField, String> {
        &self.fields
    }

    fn render(&self) -> String {
        let mut text = String::from(START_TAG);
        for (field, value) in &self.fields {
            text.push_str(field.tag());
            text.push_str(value);
            text.push(FIELD_END);
        }
        text.push_str(END_TAG);
        text
    }

    /// Accepts a `text/vcard` record that starts with a version 3.0 header.
    /// Unknown lines are skipped.
    pub fn parse(view: &RecordView<'_>) -> Option<Self> {
        if !MimeRecord::matches(view, VCARD_MIME_TYPE) {
            return None;
        }
        let text = std::str::from_utf8(view.payload).ok()?;
        let body = text.strip_prefix(START_TAG)?;
        let mut fields = BTreeMap::new();
        for line in body.split(FIELD_END) {
            if let Some(field) = VCardField::match_line(line) {
                fields.insert(field, line[field.tag().len()..].to_string());
            }
        }
        Some(Self::new(fields))
    }
}

impl PartialEq for VCardRecord {
    fn eq(&self, other: &Self) -> bool {
        self.fields == other.fields
    }
}

impl NdefRecord for VCardRecord {
    fn header(&self) -> &RecordHeader {
        self.mime.header()
    }

    fn header_mut(&mut self) -> &mut RecordHeader {
        self.mime.header_mut()
    }

    fn type_field(&self) -> &[u8] {
        self.mime.type_field()
    }

    fn payload_len(&self) -> usize {
        self.mime.payload_len()
    }

    fn write_payload(&self, out: &mut Vec<u8>) {
        self.mime.write_payload(out)
    }

    fn refresh(&mut self) {
        if self.dirty {
            let text = self.render();
            self.mime.set_data(text.into_bytes());
            self.dirty = false;
        }
        self.mime.refresh();
    }
}
