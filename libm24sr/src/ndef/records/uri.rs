// libm24sr/libm24sr/src/ndef/records/uri.rs

//! Well-known URI record and its abbreviation table.

use crate::ndef::header::{RecordHeader, TypeNameFormat};
use crate::ndef::record::{NdefRecord, RecordView};

const URI_TYPE: &[u8] = b"U";

macro_rules! uri_prefixes {
    ($($variant:ident = $code:literal => $prefix:literal,)*) => {
        /// Abbreviation codes of the URI record, 0x00 to 0x23.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        #[repr(u8)]
        pub enum UriPrefix {
            $($variant = $code,)*
        }

        impl UriPrefix {
            const ALL: &'static [UriPrefix] = &[$(UriPrefix::$variant,)*];

            /// Text the code stands for.
            pub fn prefix(self) -> &'static str {
                match self {
                    $(UriPrefix::$variant => $prefix,)*
                }
            }
        }
    };
}

uri_prefixes! {
    None = 0x00 => "",
    HttpWww = 0x01 => "http://www.",
    HttpsWww = 0x02 => "https://www.",
    Http = 0x03 => "http://",
    Https = 0x04 => "https://",
    Tel = 0x05 => "tel:",
    Mailto = 0x06 => "mailto:",
    FtpAnonymous = 0x07 => "ftp://anonymous:anonymous@",
    FtpFtp = 0x08 => "ftp://ftp.",
    Ftps = 0x09 => "ftps://",
    Sftp = 0x0A => "sftp://",
    Smb = 0x0B => "smb://",
    Nfs = 0x0C => "nfs://",
    Ftp = 0x0D => "ftp://",
    Dav = 0x0E => "dav://",
    News = 0x0F => "news:",
    Telnet = 0x10 => "telnet://",
    Imap = 0x11 => "imap:",
    Rtsp = 0x12 => "rtsp://",
    Urn = 0x13 => "urn:",
    Pop = 0x14 => "pop:",
    Sip = 0x15 => "sip:",
    Sips = 0x16 => "sips:",
    Tftp = 0x17 => "tftp:",
    Btspp = 0x18 => "btspp://",
    Btl2cap = 0x19 => "btl2cap://",
    Btgoep = 0x1A => "btgoep://",
    Tcpobex = 0x1B => "tcpobex://",
    Irdaobex = 0x1C => "irdaobex://",
    File = 0x1D => "file://",
    UrnEpcId = 0x1E => "urn:epc:id:",
    UrnEpcTag = 0x1F => "urn:epc:tag:",
    UrnEpcPat = 0x20 => "urn:epc:pat:",
    UrnEpcRaw = 0x21 => "urn:epc:raw:",
    UrnEpc = 0x22 => "urn:epc:",
    UrnNfc = 0x23 => "urn:nfc:",
}

impl UriPrefix {
    /// Abbreviation code written in the first payload byte.
    pub fn code(self) -> u8 {
        self as u8
    }

    /// Codes above 0x23 are reserved and map to `None`.
    pub fn from_code(code: u8) -> Option<Self> {
        Self::ALL.get(code as usize).copied()
    }
}

/// Well-known "U" record: one abbreviation byte followed by the remainder.
///
/// With [`UriPrefix::None`] the remainder starts with a custom scheme
/// (`sms:`, `geo:`) stored separately as the URI type.
#[derive(Debug, Clone)]
pub struct UriRecord {
    header: RecordHeader,
    prefix: UriPrefix,
    custom_type: String,
    content: String,
}

impl UriRecord {
    /// Build from a full URI; the prefix text is stripped when present.
    pub fn new(prefix: UriPrefix, uri: impl AsRef<str>) -> Self {
        let uri = uri.as_ref();
        let content = uri.strip_prefix(prefix.prefix()).unwrap_or(uri);
        Self::build(prefix, String::new(), content.to_string())
    }

    /// Code 0 with an explicit scheme, e.g. `("sms:", "+123?body=hi")`.
    pub fn with_custom_type(uri_type: impl Into<String>, content: impl Into<String>) -> Self {
        Self::build(UriPrefix::None, uri_type.into(), content.into())
    }

    fn build(prefix: UriPrefix, custom_type: String, content: String) -> Self {
        let mut header = RecordHeader::new();
        header.set_tnf(TypeNameFormat::WellKnown);
        header.set_type_length(URI_TYPE.len() as u8);
        let mut record = Self {
            header,
            prefix,
            custom_type,
            content,
        };
        record.refresh();
        record
    }

    /// Abbreviation used on the wire.
    pub fn prefix(&self) -> UriPrefix {
        self.prefix
    }

    /// Custom scheme for code 0, empty otherwise.
    pub fn uri_type(&self) -> &str {
        &self.custom_type
    }

    /// Remainder after the prefix or custom type.
    pub fn content(&self) -> &str {
        &self.content
    }

    pub(crate) fn set_content(&mut self, content: String) {
        self.content = content;
    }

    /// The reconstructed URI.
    pub fn uri(&self) -> String {
        format!("{}{}{}", self.prefix.prefix(), self.custom_type, self.content)
    }

    fn body(&self) -> String {
        format!("{}{}", self.custom_type, self.content)
    }

    fn split(view: &RecordView<'_>) -> Option<(u8, String)> {
        if !view.is_well_known(URI_TYPE) {
            return None;
        }
        let (&code, rest) = view.payload.split_first()?;
        let body = std::str::from_utf8(rest).ok()?;
        Some((code, body.to_string()))
    }

    /// Record with a known non-zero abbreviation code, mailto included.
    pub(crate) fn parse_any_known(view: &RecordView<'_>) -> Option<Self> {
        let (code, body) = Self::split(view)?;
        let prefix = UriPrefix::from_code(code)?;
        if prefix == UriPrefix::None {
            return None;
        }
        Some(Self::build(prefix, String::new(), body))
    }

    /// Record with a known non-zero code that is not mailto.
    pub fn parse_known(view: &RecordView<'_>) -> Option<Self> {
        Self::parse_any_known(view).filter(|r| r.prefix != UriPrefix::Mailto)
    }

    /// Code 0 record; `scheme` separates the custom type from the content.
    pub(crate) fn parse_with_scheme(view: &RecordView<'_>, scheme: &str) -> Option<Self> {
        let (code, body) = Self::split(view)?;
        if code != UriPrefix::None.code() {
            return None;
        }
        let content = body.strip_prefix(scheme)?;
        Some(Self::build(
            UriPrefix::None,
            scheme.to_string(),
            content.to_string(),
        ))
    }

    /// Code 0 record with an arbitrary scheme, or none.
    pub fn parse_custom(view: &RecordView<'_>) -> Option<Self> {
        let (code, body) = Self::split(view)?;
        if code != UriPrefix::None.code() {
            return None;
        }
        Some(Self::build(UriPrefix::None, String::new(), body))
    }

    /// Generic fallback used when a specialised parser declines the record.
    pub fn parse(view: &RecordView<'_>) -> Option<Self> {
        Self::parse_any_known(view).or_else(|| Self::parse_custom(view))
    }
}

impl PartialEq for UriRecord {
    fn eq(&self, other: &Self) -> bool {
        self.prefix == other.prefix && self.body() == other.body()
    }
}

impl NdefRecord for UriRecord {
    fn header(&self) -> &RecordHeader {
        &self.header
    }

    fn header_mut(&mut self) -> &mut RecordHeader {
        &mut self.header
    }

    fn type_field(&self) -> &[u8] {
        URI_TYPE
    }

    fn payload_len(&self) -> usize {
        1 + self.custom_type.len() + self.content.len()
    }

    fn write_payload(&self, out: &mut Vec<u8>) {
        out.push(self.prefix.code());
        out.extend_from_slice(self.custom_type.as_bytes());
        out.extend_from_slice(self.content.as_bytes());
    }
}
