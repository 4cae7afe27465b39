// libm24sr/libm24sr/src/ndef/records/wifi.rs

//! Wi-Fi Simple Config credential record.

use crate::ndef::header::RecordHeader;
use crate::ndef::record::{NdefRecord, RecordView};
use crate::ndef::records::mime::MimeRecord;
use crate::protocol::parser::{be_u16_at, slice_at};
use crate::{Error, Result};

const WIFI_MIME_TYPE: &str = "application/vnd.wfa.wsc";

const CREDENTIAL_FIELD: u16 = 0x100E;
const NETWORK_INDEX_FIELD: u16 = 0x1026;
const SSID_FIELD: u16 = 0x1045;
const NETWORK_KEY_FIELD: u16 = 0x1027;
const AUTH_TYPE_FIELD: u16 = 0x1003;
const ENC_TYPE_FIELD: u16 = 0x100F;

const DEFAULT_NETWORK_INDEX: u8 = 0x01;
const TLV_HEADER_LEN: usize = 4;
const MAX_TLV_VALUE_LEN: usize = u16::MAX as usize;

/// Authentication required by the network.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum WifiAuth {
    /// Open network (0x0000).
    #[default]
    Open,
    /// WPA personal (0x0002).
    WpaPsk,
    /// WPA enterprise (0x0008).
    WpaEap,
    /// WPA2 enterprise (0x0010).
    Wpa2Eap,
    /// WPA2 personal (0x0020).
    Wpa2Psk,
    /// Any other value, kept as read.
    Unknown(u16),
}

impl WifiAuth {
    /// Decode the Authentication Type TLV value.
    pub fn from_u16(value: u16) -> Self {
        match value {
            0x0000 => Self::Open,
            0x0002 => Self::WpaPsk,
            0x0008 => Self::WpaEap,
            0x0010 => Self::Wpa2Eap,
            0x0020 => Self::Wpa2Psk,
            other => Self::Unknown(other),
        }
    }

    /// Value written in the Authentication Type TLV.
    pub fn as_u16(self) -> u16 {
        match self {
            Self::Open => 0x0000,
            Self::WpaPsk => 0x0002,
            Self::WpaEap => 0x0008,
            Self::Wpa2Eap => 0x0010,
            Self::Wpa2Psk => 0x0020,
            Self::Unknown(v) => v,
        }
    }
}

/// Encryption used by the network.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum WifiEncryption {
    /// No encryption (0x0001).
    #[default]
    None,
    /// WEP (0x0002).
    Wep,
    /// TKIP (0x0004).
    Tkip,
    /// AES (0x0008).
    Aes,
    /// AES or TKIP (0x000C).
    AesTkip,
    /// Any other value, kept as read.
    Unknown(u16),
}

impl WifiEncryption {
    /// Decode the Encryption Type TLV value.
    pub fn from_u16(value: u16) -> Self {
        match value {
            0x0001 => Self::None,
            0x0002 => Self::Wep,
            0x0004 => Self::Tkip,
            0x0008 => Self::Aes,
            0x000C => Self::AesTkip,
            other => Self::Unknown(other),
        }
    }

    /// Value written in the Encryption Type TLV.
    pub fn as_u16(self) -> u16 {
        match self {
            Self::None => 0x0001,
            Self::Wep => 0x0002,
            Self::Tkip => 0x0004,
            Self::Aes => 0x0008,
            Self::AesTkip => 0x000C,
            Self::Unknown(v) => v,
        }
    }
}

/// Wi-Fi Simple Config credential (`application/vnd.wfa.wsc`).
///
/// The payload is a Credential TLV wrapping network index, SSID,
/// authentication, encryption and key TLVs. Every type and length field is
/// big-endian.
#[derive(Debug, Clone)]
pub struct WifiConfRecord {
    mime: MimeRecord,
    ssid: String,
    key: String,
    auth: WifiAuth,
    encryption: WifiEncryption,
    dirty: bool,
}

impl Default for WifiConfRecord {
    /// Open network with an empty SSID.
    fn default() -> Self {
        Self::new("", "", WifiAuth::Open, WifiEncryption::None)
    }
}

fn push_tlv(out: &mut Vec<u8>, field: u16, value: &[u8]) {
    out.extend_from_slice(&field.to_be_bytes());
    out.extend_from_slice(&(value.len() as u16).to_be_bytes());
    out.extend_from_slice(value);
}

impl WifiConfRecord {
    /// Credential for one network. Lengths are checked when the record is
    /// written.
    pub fn new(
        ssid: impl Into<String>,
        key: impl Into<String>,
        auth: WifiAuth,
        encryption: WifiEncryption,
    ) -> Self {
        let mut record = Self {
            mime: MimeRecord::new(WIFI_MIME_TYPE, Vec::new()),
            ssid: ssid.into(),
            key: key.into(),
            auth,
            encryption,
            dirty: true,
        };
        record.refresh();
        record
    }

    /// Network name.
    pub fn ssid(&self) -> &str {
        &self.ssid
    }

    /// Change the network name.
    pub fn set_ssid(&mut self, ssid: impl Into<String>) {
        self.ssid = ssid.into();
        self.dirty = true;
    }

    /// Network key (passphrase).
    pub fn network_key(&self) -> &str {
        &self.key
    }

    /// Change the network key.
    pub fn set_network_key(&mut self, key: impl Into<String>) {
        self.key = key.into();
        self.dirty = true;
    }

    /// Authentication type.
    pub fn auth(&self) -> WifiAuth {
        self.auth
    }

    /// Change the authentication type.
    pub fn set_auth(&mut self, auth: WifiAuth) {
        self.auth = auth;
        self.dirty = true;
    }

    /// Encryption type.
    pub fn encryption(&self) -> WifiEncryption {
        self.encryption
    }

    /// Change the encryption type.
    pub fn set_encryption(&mut self, encryption: WifiEncryption) {
        self.encryption = encryption;
        self.dirty = true;
    }

    /// Size of the Credential TLV's value: five inner TLVs plus their data.
    fn credential_len(&self) -> usize {
        5 * TLV_HEADER_LEN + 1 + 2 + 2 + self.ssid.len() + self.key.len()
    }

    fn render(&self) -> Vec<u8> {
        let mut inner = Vec::new();
        push_tlv(&mut inner, NETWORK_INDEX_FIELD, &[DEFAULT_NETWORK_INDEX]);
        push_tlv(&mut inner, SSID_FIELD, self.ssid.as_bytes());
        push_tlv(&mut inner, AUTH_TYPE_FIELD, &self.auth.as_u16().to_be_bytes());
        push_tlv(&mut inner, ENC_TYPE_FIELD, &self.encryption.as_u16().to_be_bytes());
        push_tlv(&mut inner, NETWORK_KEY_FIELD, self.key.as_bytes());
        let mut out = Vec::with_capacity(inner.len() + TLV_HEADER_LEN);
        push_tlv(&mut out, CREDENTIAL_FIELD, &inner);
        out
    }

    /// Accepts a `application/vnd.wfa.wsc` record holding a Credential TLV.
    /// Unknown inner TLVs are skipped; an SSID or key that is not UTF-8
    /// rejects the record.
    pub fn parse(view: &RecordView<'_>) -> Option<Self> {
        if !MimeRecord::matches(view, WIFI_MIME_TYPE) {
            return None;
        }
        let payload = view.payload;
        if be_u16_at(payload, 0).ok()? != CREDENTIAL_FIELD {
            return None;
        }
        let credential_len = be_u16_at(payload, 2).ok()? as usize;
        let credential = slice_at(payload, TLV_HEADER_LEN, credential_len).ok()?;

        let mut record = Self::default();
        let mut offset = 0;
        while offset < credential.len() {
            let field = be_u16_at(credential, offset).ok()?;
            let len = be_u16_at(credential, offset + 2).ok()? as usize;
            let value = slice_at(credential, offset + TLV_HEADER_LEN, len).ok()?;
            match field {
                SSID_FIELD => record.ssid = std::str::from_utf8(value).ok()?.to_string(),
                NETWORK_KEY_FIELD => record.key = std::str::from_utf8(value).ok()?.to_string(),
                AUTH_TYPE_FIELD => record.auth = WifiAuth::from_u16(be_u16_at(value, 0).ok()?),
                ENC_TYPE_FIELD => {
                    record.encryption = WifiEncryption::from_u16(be_u16_at(value, 0).ok()?)
                }
                _ => {}
            }
            offset += TLV_HEADER_LEN + len;
        }
        record.dirty = true;
        record.refresh();
        Some(record)
    }
}

impl PartialEq for WifiConfRecord {
    fn eq(&self, other: &Self) -> bool {
        self.ssid == other.ssid
            && self.key == other.key
            && self.auth == other.auth
            && self.encryption == other.encryption
    }
}

impl NdefRecord for WifiConfRecord {
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

    fn check(&self) -> Result<()> {
        let len = self.credential_len();
        if len > MAX_TLV_VALUE_LEN {
            return Err(Error::InvalidLength {
                expected: MAX_TLV_VALUE_LEN,
                actual: len,
            });
        }
        self.mime.check()
    }

    fn refresh(&mut self) {
        if self.dirty {
            let data = self.render();
            self.mime.set_data(data);
            self.dirty = false;
        }
        self.mime.refresh();
    }
}
