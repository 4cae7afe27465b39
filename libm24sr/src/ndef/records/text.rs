// libm24sr/libm24sr/src/ndef/records/text.rs

//! Well-known Text record.

use crate::ndef::header::{RecordHeader, TypeNameFormat};
use crate::ndef::record::{NdefRecord, RecordView};
use crate::{Error, Result};

const TEXT_TYPE: &[u8] = b"T";
const STATUS_UTF16: u8 = 0x80;
const LANGUAGE_LEN_MASK: u8 = 0x1F;
const DEFAULT_LANGUAGE: &str = "en";

/// Character encoding of a text record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TextEncoding {
    /// UTF-8 text.
    #[default]
    Utf8,
    /// Written big-endian without a byte-order mark.
    Utf16,
}

/// Well-known "T" record: status byte, IANA language code, text.
#[derive(Debug, Clone)]
pub struct TextRecord {
    header: RecordHeader,
    encoding: TextEncoding,
    language: String,
    text: String,
}

impl TextRecord {
    /// UTF-8 text tagged with the default language ("en").
    pub fn new(text: impl Into<String>) -> Self {
        Self::build(TextEncoding::Utf8, DEFAULT_LANGUAGE.to_string(), text.into())
    }

    /// The language code is limited to 31 bytes by the status byte.
    pub fn with_language(
        encoding: TextEncoding,
        language: impl Into<String>,
        text: impl Into<String>,
    ) -> Result<Self> {
        let language = language.into();
        if language.len() > LANGUAGE_LEN_MASK as usize {
            return Err(Error::InvalidParameter(format!(
                "language code of {} bytes exceeds 31",
                language.len()
            )));
        }
        Ok(Self::build(encoding, language, text.into()))
    }

    fn build(encoding: TextEncoding, language: String, text: String) -> Self {
        let mut header = RecordHeader::new();
        header.set_tnf(TypeNameFormat::WellKnown);
        header.set_type_length(TEXT_TYPE.len() as u8);
        let mut record = Self {
            header,
            encoding,
            language,
            text,
        };
        record.refresh();
        record
    }

    /// Encoding of the text.
    pub fn encoding(&self) -> TextEncoding {
        self.encoding
    }

    /// IANA language code.
    pub fn language(&self) -> &str {
        &self.language
    }

    /// The text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Replace the text, keeping language and encoding.
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    /// Status byte: encoding flag plus language length.
    pub fn status(&self) -> u8 {
        let mut status = self.language.len() as u8 & LANGUAGE_LEN_MASK;
        if self.encoding == TextEncoding::Utf16 {
            status |= STATUS_UTF16;
        }
        status
    }

    fn encoded_text(&self) -> Vec<u8> {
        match self.encoding {
            TextEncoding::Utf8 => self.text.as_bytes().to_vec(),
            TextEncoding::Utf16 => self
                .text
                .encode_utf16()
                .flat_map(|unit| unit.to_be_bytes())
                .collect(),
        }
    }

    /// Returns `None` unless both the language and the text decode cleanly.
    pub fn parse(view: &RecordView<'_>) -> Option<Self> {
        if !view.is_well_known(TEXT_TYPE) {
            return None;
        }
        let (&status, rest) = view.payload.split_first()?;
        let lang_len = (status & LANGUAGE_LEN_MASK) as usize;
        if rest.len() < lang_len {
            return None;
        }
        let (language, body) = rest.split_at(lang_len);
        let encoding = if status & STATUS_UTF16 != 0 {
            TextEncoding::Utf16
        } else {
            TextEncoding::Utf8
        };
        let text = match encoding {
            TextEncoding::Utf8 => String::from_utf8(body.to_vec()).ok()?,
            TextEncoding::Utf16 => decode_utf16(body)?,
        };
        let language = String::from_utf8(language.to_vec()).ok()?;
        Some(Self::build(encoding, language, text))
    }
}

/// Decode UTF-16, honouring a leading byte-order mark (big-endian otherwise).
/// Odd lengths and unpaired surrogates yield `None`.
fn decode_utf16(body: &[u8]) -> Option<String> {
    let (little_endian, body) = match body {
        [0xFF, 0xFE, rest @ ..] => (true, rest),
        [0xFE, 0xFF, rest @ ..] => (false, rest),
        _ => (false, body),
    };
    if body.len() % 2 != 0 {
        return None;
    }
    let units: Vec<u16> = body
        .chunks_exact(2)
        .map(|pair| {
            if little_endian {
                u16::from_le_bytes([pair[0], pair[1]])
            } else {
                u16::from_be_bytes([pair[0], pair[1]])
            }
        })
        .collect();
    String::from_utf16(&units).ok()
}

impl PartialEq for TextRecord {
    fn eq(&self, other: &Self) -> bool {
        self.encoding == other.encoding
            && self.language == other.language
            && self.text == other.text
    }
}

impl NdefRecord for TextRecord {
    fn header(&self) -> &RecordHeader {
        &self.header
    }

    fn header_mut(&mut self) -> &mut RecordHeader {
        &mut self.header
    }

    fn type_field(&self) -> &[u8] {
        TEXT_TYPE
    }

    fn payload_len(&self) -> usize {
        let text_len = match self.encoding {
            TextEncoding::Utf8 => self.text.len(),
            TextEncoding::Utf16 => self.text.encode_utf16().count() * 2,
        };
        1 + self.language.len() + text_len
    }

    fn write_payload(&self, out: &mut Vec<u8>) {
        out.push(self.status());
        out.extend_from_slice(self.language.as_bytes());
        out.extend_from_slice(&self.encoded_text());
    }
}
