// libm24sr/libm24sr/src/ndef/record.rs

//! The record trait, the record enum and signature dispatch.

use derive_more::From;

use crate::ndef::header::RecordHeader;
use crate::ndef::records::{
    AarRecord, EmptyRecord, GeoRecord, MailRecord, MimeRecord, SmsRecord, TextRecord, UriRecord,
    VCardRecord, WifiConfRecord,
};
use crate::protocol::parser::slice_at;
use crate::Result;

/// Common behaviour of every record variant.
///
/// Variants whose payload is derived from structured fields rebuild it in
/// [`NdefRecord::refresh`], which runs before every length query and write.
pub trait NdefRecord {
    /// Header of the record.
    fn header(&self) -> &RecordHeader;

    /// Mutable header, for the flags a message sets.
    fn header_mut(&mut self) -> &mut RecordHeader;

    /// Bytes of the type field (e.g. `T`, `U`, a MIME type).
    fn type_field(&self) -> &[u8];

    /// Current payload size in bytes.
    fn payload_len(&self) -> usize;

    /// Append the payload (everything after type and id) to `out`.
    fn write_payload(&self, out: &mut Vec<u8>);

    /// Bring derived content and the header's payload length up to date.
    fn refresh(&mut self) {
        let len = self.payload_len() as u32;
        self.header_mut().set_payload_length(len);
    }

    /// Encoded size of the whole record.
    fn byte_length(&mut self) -> usize {
        self.refresh();
        self.header().record_length()
    }

    /// Reject content that does not fit the wire length fields.
    fn check(&self) -> Result<()> {
        Ok(())
    }

    /// Append the encoded record to `out`, returning the bytes written.
    ///
    /// Nothing is written when [`NdefRecord::check`] fails.
    fn write(&mut self, out: &mut Vec<u8>) -> Result<usize> {
        self.refresh();
        self.check()?;
        let start = out.len();
        self.header().write(out);
        out.extend_from_slice(self.type_field());
        self.write_payload(out);
        Ok(out.len() - start)
    }
}

/// A record split into its fields, borrowed from the raw message.
#[derive(Debug, Clone, Copy)]
pub struct RecordView<'a> {
    /// Decoded header.
    pub header: RecordHeader,
    /// Type field.
    pub type_field: &'a [u8],
    /// Id field, empty when IL is clear.
    pub id: &'a [u8],
    /// Payload.
    pub payload: &'a [u8],
}

impl<'a> RecordView<'a> {
    /// Split `body`, the bytes following `header`, into type, id and payload.
    pub fn new(header: RecordHeader, body: &'a [u8]) -> Result<Self> {
        let type_len = header.type_length() as usize;
        let id_len = if header.id_length_present() {
            header.id_length() as usize
        } else {
            0
        };
        let payload_len = header.payload_length() as usize;
        Ok(Self {
            header,
            type_field: slice_at(body, 0, type_len)?,
            id: slice_at(body, type_len, id_len)?,
            payload: slice_at(body, type_len + id_len, payload_len)?,
        })
    }

    /// True for a well-known record whose type is exactly `type_name`.
    pub fn is_well_known(&self, type_name: &[u8]) -> bool {
        self.header.tnf() == crate::ndef::header::TypeNameFormat::WellKnown
            && self.type_field == type_name
    }
}

/// Every record variant the codec understands.
#[derive(Debug, Clone, PartialEq, From)]
pub enum Record {
    /// Well-known Text.
    Text(TextRecord),
    /// Well-known URI not claimed by a more specific variant.
    Uri(UriRecord),
    /// `mailto:` with subject and body.
    Mail(MailRecord),
    /// `sms:` with a body.
    Sms(SmsRecord),
    /// `geo:` position.
    Geo(GeoRecord),
    /// Android Application Record.
    Aar(AarRecord),
    /// MIME media with opaque data.
    Mime(MimeRecord),
    /// vCard 3.0.
    VCard(VCardRecord),
    /// Wi-Fi credential.
    WifiConf(WifiConfRecord),
    /// Empty record.
    Empty(EmptyRecord),
}

/// Discriminant of [`Record`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordType {
    /// See [`Record::Text`].
    Text,
    /// See [`Record::Uri`].
    Uri,
    /// See [`Record::Mail`].
    Mail,
    /// See [`Record::Sms`].
    Sms,
    /// See [`Record::Geo`].
    Geo,
    /// See [`Record::Aar`].
    Aar,
    /// See [`Record::Mime`].
    Mime,
    /// See [`Record::VCard`].
    VCard,
    /// See [`Record::WifiConf`].
    WifiConf,
    /// See [`Record::Empty`].
    Empty,
}

impl Record {
    /// Discriminant of this record.
    pub fn record_type(&self) -> RecordType {
        match self {
            Self::Text(_) => RecordType::Text,
            Self::Uri(_) => RecordType::Uri,
            Self::Mail(_) => RecordType::Mail,
            Self::Sms(_) => RecordType::Sms,
            Self::Geo(_) => RecordType::Geo,
            Self::Aar(_) => RecordType::Aar,
            Self::Mime(_) => RecordType::Mime,
            Self::VCard(_) => RecordType::VCard,
            Self::WifiConf(_) => RecordType::WifiConf,
            Self::Empty(_) => RecordType::Empty,
        }
    }

    fn inner(&self) -> &dyn NdefRecord {
        match self {
            Self::Text(r) => r,
            Self::Uri(r) => r,
            Self::Mail(r) => r,
            Self::Sms(r) => r,
            Self::Geo(r) => r,
            Self::Aar(r) => r,
            Self::Mime(r) => r,
            Self::VCard(r) => r,
            Self::WifiConf(r) => r,
            Self::Empty(r) => r,
        }
    }

    fn inner_mut(&mut self) -> &mut dyn NdefRecord {
        match self {
            Self::Text(r) => r,
            Self::Uri(r) => r,
            Self::Mail(r) => r,
            Self::Sms(r) => r,
            Self::Geo(r) => r,
            Self::Aar(r) => r,
            Self::Mime(r) => r,
            Self::VCard(r) => r,
            Self::WifiConf(r) => r,
            Self::Empty(r) => r,
        }
    }

    /// Parse one record by trying each variant in priority order.
    pub fn parse(view: &RecordView<'_>) -> Option<Self> {
        PARSERS.iter().find_map(|(_, parse)| parse(view))
    }
}

impl NdefRecord for Record {
    fn header(&self) -> &RecordHeader {
        self.inner().header()
    }

    fn header_mut(&mut self) -> &mut RecordHeader {
        self.inner_mut().header_mut()
    }

    fn type_field(&self) -> &[u8] {
        self.inner().type_field()
    }

    fn payload_len(&self) -> usize {
        self.inner().payload_len()
    }

    fn write_payload(&self, out: &mut Vec<u8>) {
        self.inner().write_payload(out)
    }

    fn refresh(&mut self) {
        self.inner_mut().refresh()
    }

    fn check(&self) -> Result<()> {
        self.inner().check()
    }
}

type Sniffer = fn(&RecordView<'_>) -> Option<Record>;

/// Top-level dispatch, first match wins. A record that fits several
/// signatures resolves to the earliest entry.
const PARSERS: [(&str, Sniffer); 4] = [
    ("text", sniff_text),
    ("aar", sniff_aar),
    ("mime", sniff_mime_family),
    ("uri", sniff_uri_family),
];

/// MIME family, most specific first.
const MIME_PARSERS: [(&str, Sniffer); 3] = [
    ("vcard", sniff_vcard),
    ("wifi", sniff_wifi),
    ("mime", sniff_mime),
];

/// URI family. Mail only matches structured mailto URIs, known-prefix URIs any
/// other non-zero code; SMS and Geo use code 0. The generic URI takes the rest.
const URI_PARSERS: [(&str, Sniffer); 5] = [
    ("mail", sniff_mail),
    ("known-uri", sniff_known_uri),
    ("sms", sniff_sms),
    ("geo", sniff_geo),
    ("uri", sniff_generic_uri),
];

/// Names of the dispatch entries in resolution order, families expanded.
pub fn dispatch_order() -> Vec<&'static str> {
    let mut names = Vec::new();
    for (name, _) in PARSERS.iter() {
        match *name {
            "mime" => names.extend(MIME_PARSERS.iter().map(|(n, _)| *n)),
            "uri" => names.extend(URI_PARSERS.iter().map(|(n, _)| *n)),
            other => names.push(other),
        }
    }
    names
}

fn sniff_text(view: &RecordView<'_>) -> Option<Record> {
    TextRecord::parse(view).map(Record::Text)
}

fn sniff_aar(view: &RecordView<'_>) -> Option<Record> {
    AarRecord::parse(view).map(Record::Aar)
}

fn sniff_mime_family(view: &RecordView<'_>) -> Option<Record> {
    MIME_PARSERS.iter().find_map(|(_, parse)| parse(view))
}

fn sniff_vcard(view: &RecordView<'_>) -> Option<Record> {
    VCardRecord::parse(view).map(Record::VCard)
}

fn sniff_wifi(view: &RecordView<'_>) -> Option<Record> {
    WifiConfRecord::parse(view).map(Record::WifiConf)
}

fn sniff_mime(view: &RecordView<'_>) -> Option<Record> {
    MimeRecord::parse(view).map(Record::Mime)
}

fn sniff_uri_family(view: &RecordView<'_>) -> Option<Record> {
    URI_PARSERS.iter().find_map(|(_, parse)| parse(view))
}

fn sniff_mail(view: &RecordView<'_>) -> Option<Record> {
    MailRecord::parse(view).map(Record::Mail)
}

fn sniff_known_uri(view: &RecordView<'_>) -> Option<Record> {
    UriRecord::parse_known(view).map(Record::Uri)
}

fn sniff_sms(view: &RecordView<'_>) -> Option<Record> {
    SmsRecord::parse(view).map(Record::Sms)
}

fn sniff_geo(view: &RecordView<'_>) -> Option<Record> {
    GeoRecord::parse(view).map(Record::Geo)
}

fn sniff_generic_uri(view: &RecordView<'_>) -> Option<Record> {
    UriRecord::parse(view).map(Record::Uri)
}
