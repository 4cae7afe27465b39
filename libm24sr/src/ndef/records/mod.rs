// libm24sr/libm24sr/src/ndef/records/mod.rs

//! Record variants.

pub mod aar;
pub mod empty;
pub mod geo;
pub mod mail;
pub mod mime;
pub mod sms;
pub mod text;
pub mod uri;
pub mod vcard;
pub mod wifi;

pub use aar::AarRecord;
pub use empty::EmptyRecord;
pub use geo::GeoRecord;
pub use mail::MailRecord;
pub use mime::MimeRecord;
pub use sms::SmsRecord;
pub use text::{TextEncoding, TextRecord};
pub use uri::{UriPrefix, UriRecord};
pub use vcard::{VCardField, VCardRecord};
pub use wifi::{WifiAuth, WifiConfRecord, WifiEncryption};
