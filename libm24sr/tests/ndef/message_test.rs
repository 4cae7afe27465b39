#[path = "../common/mod.rs"]
mod common;

use libm24sr::ndef::{
    AarRecord, Message, MimeRecord, NdefRecord, Record, RecordHeader, TextRecord, UriPrefix,
    UriRecord,
};
use libm24sr::Error;
use proptest::prelude::*;

/// Flags byte of every record in an encoded message.
fn record_flags(bytes: &[u8]) -> Vec<u8> {
    let mut flags = Vec::new();
    let mut offset = 2;
    while offset < bytes.len() {
        let (header, _) = RecordHeader::read(&bytes[offset..]).unwrap();
        flags.push(header.flags());
        offset += header.record_length();
    }
    flags
}

#[test]
fn empty_message_is_one_empty_record() {
    let mut msg = Message::new();
    assert_eq!(msg.byte_length(), 5);
    assert_eq!(msg.to_bytes().unwrap(), vec![0x00, 0x03, 0xD0, 0x00, 0x00]);
    let back = Message::parse(&[0xD0, 0x00, 0x00], 3).unwrap();
    assert!(back.is_empty());
}

#[test]
fn single_record_has_both_flags() {
    let mut msg = Message::new();
    msg.add(TextRecord::new("hi"));
    let bytes = msg.to_bytes().unwrap();
    assert_eq!(&bytes[..2], &[0x00, 0x09]);
    assert_eq!(&bytes[2..], &common::text_hi_bytes()[..]);
}

#[test]
fn text_and_aar_round_trip() {
    let mut msg = Message::new();
    msg.add(TextRecord::new("hi"));
    msg.add(AarRecord::new("com.x"));
    let bytes = msg.to_bytes().unwrap();
    assert_eq!(record_flags(&bytes), vec![0x91, 0x54]);
    let back = Message::parse(&bytes[2..], bytes.len() - 2).unwrap();
    assert_eq!(back, msg);
    assert_eq!(back.get(1).map(|r| r.header().message_end()), Some(true));
}

#[test]
fn interior_records_have_no_boundary_flags() {
    let mut msg = common::every_variant();
    let bytes = msg.to_bytes().unwrap();
    let flags = record_flags(&bytes);
    assert_eq!(flags.len(), msg.len());
    assert_eq!(flags[0] & 0xC0, 0x80);
    assert_eq!(flags[flags.len() - 1] & 0xC0, 0x40);
    assert!(flags[1..flags.len() - 1].iter().all(|f| f & 0xC0 == 0));
}

#[test]
fn every_variant_round_trips_in_order() {
    let mut msg = common::every_variant();
    let bytes = msg.to_bytes().unwrap();
    let declared = u16::from_be_bytes([bytes[0], bytes[1]]) as usize;
    assert_eq!(declared, bytes.len() - 2);
    let back = Message::parse(&bytes[2..], declared).unwrap();
    let kinds: Vec<_> = back.iter().map(Record::record_type).collect();
    let expected: Vec<_> = msg.iter().map(Record::record_type).collect();
    assert_eq!(kinds, expected);
    assert_eq!(back, msg);
}

#[test]
fn unknown_records_are_reported_then_dropped() {
    // External record nobody claims, between two URIs.
    let mut raw = Vec::new();
    UriRecord::new(UriPrefix::Https, "https://a.b").write(&mut raw).unwrap();
    raw.extend_from_slice(&[0x14, 0x03, 0x01, b'a', b':', b'b', 0x00]);
    UriRecord::new(UriPrefix::Tel, "tel:123").write(&mut raw).unwrap();

    let records = Message::parse_records(&raw, raw.len()).unwrap();
    assert_eq!(records.len(), 3);
    assert!(records[1].is_none());
    assert_eq!(Message::parse(&raw, raw.len()).unwrap().len(), 2);
}

#[test]
fn text_with_invalid_utf8_is_not_decoded_lossily() {
    let mut raw = Vec::new();
    TextRecord::new("ok").write(&mut raw).unwrap();
    // well-known "T", status 0x02 "en", body 0xC3 0x28
    raw.extend_from_slice(&[0x11, 0x01, 0x05, b'T', 0x02, b'e', b'n', 0xC3, 0x28]);

    let records = Message::parse_records(&raw, raw.len()).unwrap();
    assert_eq!(records.len(), 2);
    assert!(records[1].is_none());
    let msg = Message::parse(&raw, raw.len()).unwrap();
    assert_eq!(msg.len(), 1);
}

#[test]
fn truncated_message_is_an_error() {
    let mut msg = Message::new();
    msg.add(TextRecord::new("hello"));
    let bytes = msg.to_bytes().unwrap();
    assert!(Message::parse(&bytes[2..bytes.len() - 1], bytes.len() - 3).is_err());
    assert!(Message::parse(&bytes[2..], bytes.len()).is_err());
}

#[test]
fn oversized_message_is_rejected() {
    let mut msg = Message::new();
    msg.add(TextRecord::new("x".repeat(70_000)));
    assert!(msg.to_bytes().is_err());
}

#[test]
fn overlong_mime_type_is_refused_before_encoding() {
    let mut msg = Message::new();
    msg.add(TextRecord::new("ok"));
    msg.add(MimeRecord::new("x".repeat(300), vec![1, 2]));
    let mut out = vec![0xEE];
    assert_eq!(
        msg.write(&mut out),
        Err(Error::InvalidLength {
            expected: 255,
            actual: 300
        })
    );
    assert_eq!(out, vec![0xEE]);
}

proptest! {
    #[test]
    fn text_messages_round_trip(texts in prop::collection::vec("[ -~]{0,300}", 1..6)) {
        let mut msg: Message = texts.iter().map(|t| Record::from(TextRecord::new(t.as_str()))).collect();
        let bytes = msg.to_bytes().unwrap();
        let back = Message::parse(&bytes[2..], bytes.len() - 2).unwrap();
        prop_assert_eq!(back, msg);
    }
}
