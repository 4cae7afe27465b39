#[path = "../common/mod.rs"]
mod common;

use libm24sr::ndef::{
    AarRecord, EmptyRecord, GeoRecord, MailRecord, MimeRecord, NdefRecord, Record, RecordHeader,
    RecordType, RecordView, SmsRecord, TextEncoding, TextRecord, UriPrefix, UriRecord,
    VCardField, WifiAuth, WifiConfRecord, WifiEncryption,
};
use libm24sr::ndef::record::dispatch_order;
use proptest::prelude::*;

fn encode(record: &mut impl NdefRecord) -> Vec<u8> {
    let mut out = Vec::new();
    record.write(&mut out).unwrap();
    out
}

fn reparse(bytes: &[u8]) -> Option<Record> {
    let (header, used) = RecordHeader::read(bytes).unwrap();
    let view = RecordView::new(header, &bytes[used..]).unwrap();
    Record::parse(&view)
}

#[test]
fn text_example_bytes() {
    let mut text = TextRecord::new("hi");
    let bytes = encode(&mut text);
    assert_eq!(&bytes[1..], &common::text_hi_bytes()[1..]);
    assert_eq!(text.header().payload_length(), 5);
}

#[test]
fn utf16_text_round_trip() {
    let mut text = TextRecord::with_language(TextEncoding::Utf16, "fr", "é€").unwrap();
    let bytes = encode(&mut text);
    assert_eq!(bytes[4] & 0x80, 0x80);
    assert_eq!(reparse(&bytes), Some(Record::Text(text)));
}

#[test]
fn uri_prefix_is_stripped() {
    let mut uri = UriRecord::new(UriPrefix::HttpWww, "http://www.example.com/a");
    let bytes = encode(&mut uri);
    assert_eq!(&bytes[3..5], &[b'U', 0x01]);
    assert_eq!(&bytes[5..], b"example.com/a");
    assert_eq!(uri.uri(), "http://www.example.com/a");
}

#[test]
fn uri_with_body_already_stripped() {
    let uri = UriRecord::new(UriPrefix::HttpWww, "example.com/a");
    assert_eq!(uri.content(), "example.com/a");
}

#[test]
fn uri_family_dispatch() {
    let mut mail = MailRecord::new("a@b.c", "s", "b");
    assert_eq!(
        reparse(&encode(&mut mail)).map(|r| r.record_type()),
        Some(RecordType::Mail)
    );
    let mut plain_mailto = UriRecord::new(UriPrefix::Mailto, "mailto:a@b.c");
    assert_eq!(
        reparse(&encode(&mut plain_mailto)).map(|r| r.record_type()),
        Some(RecordType::Uri)
    );
    let mut sms = SmsRecord::new("+39", "ciao");
    assert_eq!(
        reparse(&encode(&mut sms)).map(|r| r.record_type()),
        Some(RecordType::Sms)
    );
    let mut geo = GeoRecord::new(1.5, -2.25);
    assert_eq!(
        reparse(&encode(&mut geo)).map(|r| r.record_type()),
        Some(RecordType::Geo)
    );
    let mut custom = UriRecord::with_custom_type("foo:", "bar");
    assert_eq!(
        reparse(&encode(&mut custom)).map(|r| r.record_type()),
        Some(RecordType::Uri)
    );
}

#[test]
fn mime_family_dispatch() {
    let mut card = common::sample_vcard();
    assert_eq!(
        reparse(&encode(&mut card)).map(|r| r.record_type()),
        Some(RecordType::VCard)
    );
    let mut wifi = WifiConfRecord::new("n", "k", WifiAuth::WpaPsk, WifiEncryption::Tkip);
    assert_eq!(
        reparse(&encode(&mut wifi)).map(|r| r.record_type()),
        Some(RecordType::WifiConf)
    );
    let mut mime = MimeRecord::new("application/octet-stream", vec![1, 2, 3]);
    assert_eq!(
        reparse(&encode(&mut mime)),
        Some(Record::Mime(mime.clone()))
    );
}

#[test]
fn aar_record_layout() {
    let mut aar = AarRecord::new("com.x");
    let bytes = encode(&mut aar);
    assert_eq!(bytes[0] & 0x07, 0x04);
    assert_eq!(&bytes[3..18], b"android.com:pkg");
    assert_eq!(&bytes[18..], b"com.x");
}

#[test]
fn vcard_text_block() {
    let mut card = common::sample_vcard();
    let bytes = encode(&mut card);
    let text = String::from_utf8(bytes[3 + 10..].to_vec()).unwrap();
    assert!(text.starts_with("BEGIN:VCARD\n"));
    assert!(text.ends_with("END:VCARD\n") || text.ends_with("END:VCARD"));
    assert!(text.contains("FN:Jane Doe\n"));
    match reparse(&bytes) {
        Some(Record::VCard(back)) => {
            assert_eq!(back.get(VCardField::Email), Some("jane@example.com"));
            assert_eq!(back, card);
        }
        other => panic!("unexpected: {:?}", other),
    }
}

#[test]
fn wifi_unknown_values_survive() {
    let mut wifi = WifiConfRecord::new(
        "lab",
        "",
        WifiAuth::Unknown(0x0040),
        WifiEncryption::Unknown(0x0010),
    );
    match reparse(&encode(&mut wifi)) {
        Some(Record::WifiConf(back)) => {
            assert_eq!(back.auth(), WifiAuth::Unknown(0x0040));
            assert_eq!(back.encryption(), WifiEncryption::Unknown(0x0010));
        }
        other => panic!("unexpected: {:?}", other),
    }
}

#[test]
fn empty_record_bytes() {
    assert_eq!(encode(&mut EmptyRecord::new()), vec![0xD0, 0x00, 0x00]);
}

#[test]
fn dispatch_order_is_fixed() {
    assert_eq!(
        dispatch_order(),
        vec!["text", "aar", "vcard", "wifi", "mime", "mail", "known-uri", "sms", "geo", "uri"]
    );
}

proptest! {
    #[test]
    fn text_round_trip(lang in "[a-z]{0,31}", body in "\\PC{0,120}") {
        let mut text = TextRecord::with_language(TextEncoding::Utf8, lang, body).unwrap();
        let bytes = encode(&mut text);
        prop_assert_eq!(reparse(&bytes), Some(Record::Text(text)));
    }

    #[test]
    fn sms_round_trip(number in "\\+[0-9]{1,12}", message in "[a-zA-Z0-9 ]{0,60}") {
        let mut sms = SmsRecord::new(number, message);
        let bytes = encode(&mut sms);
        prop_assert_eq!(reparse(&bytes), Some(Record::Sms(sms)));
    }

    #[test]
    fn geo_round_trip(lat in -90.0f64..90.0, lon in -180.0f64..180.0) {
        let mut geo = GeoRecord::new(lat, lon);
        let bytes = encode(&mut geo);
        prop_assert_eq!(reparse(&bytes), Some(Record::Geo(geo)));
    }
}
