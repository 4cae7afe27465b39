#[path = "../common/mod.rs"]
mod common;

use libm24sr::ndef::{Message, TextRecord};
use libm24sr::protocol::ApduStatus;
use libm24sr::test_support::{data_reply, status_reply};
use libm24sr::{CommunicationMode, Error, TagEvent};

/// Offsets and lengths of every update binary written.
fn updates(sent: &[Vec<u8>]) -> Vec<(u16, usize)> {
    sent.iter()
        .filter(|f| f.len() > 6 && f[2] == 0xD6)
        .map(|f| (u16::from_be_bytes([f[3], f[4]]), f[5] as usize))
        .collect()
}

/// Offsets and lengths of every read binary written.
fn reads(sent: &[Vec<u8>]) -> Vec<(u16, usize)> {
    sent.iter()
        .filter(|f| f.len() > 5 && f[2] == 0xB0)
        .map(|f| (u16::from_be_bytes([f[3], f[4]]), f[5] as usize))
        .collect()
}

#[test]
fn write_splits_on_advertised_size() {
    let (bus, mut tag) = common::open_tag(0x10);
    let mut msg = common::every_variant();
    let total = msg.to_bytes().unwrap().len();
    let chunks = total.div_ceil(0x10);
    for _ in 0..chunks {
        bus.push_response(status_reply(0x02, 0x9000));
    }
    assert_eq!(
        tag.write(&mut msg),
        Some(TagEvent::MessageWritten {
            length: total,
            result: Ok(())
        })
    );
    let written = updates(&bus.sent());
    assert_eq!(written.len(), chunks);
    let mut expected = 0;
    for (offset, len) in written {
        assert_eq!(usize::from(offset), expected);
        expected += len;
    }
    assert_eq!(expected, total);
}

#[test]
fn large_advertised_size_is_capped() {
    let (bus, mut tag) = common::open_tag(0x0400);
    let mut msg = Message::new();
    msg.add(TextRecord::new("z".repeat(400)));
    let total = msg.to_bytes().unwrap().len();
    for _ in 0..total.div_ceil(246) {
        bus.push_response(status_reply(0x02, 0x9000));
    }
    assert_eq!(tag.write_blocking(&mut msg), Ok(total));
    assert!(updates(&bus.sent()).iter().all(|&(_, len)| len <= 246));
}

#[test]
fn read_splits_on_advertised_size() {
    let (bus, mut tag) = common::open_tag(0x0C);
    let mut msg = common::every_variant();
    let bytes = msg.to_bytes().unwrap();
    bus.push_response(data_reply(0x02, &bytes[..2]));
    for chunk in bytes[2..].chunks(0x0C) {
        bus.push_response(data_reply(0x03, chunk));
    }
    let back = tag.read_blocking().unwrap();
    assert_eq!(back, msg);

    let requested = reads(&bus.sent());
    assert_eq!(requested[0], (0, 2));
    assert_eq!(requested.len(), 1 + (bytes.len() - 2).div_ceil(0x0C));
    let mut expected = 2;
    for &(offset, len) in &requested[1..] {
        assert_eq!(usize::from(offset), expected);
        expected += len;
    }
    assert_eq!(expected, bytes.len());
}

#[test]
fn read_failure_mid_stream() {
    let (bus, mut tag) = common::open_tag(0x04);
    bus.push_response(data_reply(0x02, &[0x00, 0x10]));
    bus.push_response(data_reply(0x03, &[0xD1, 0x01, 0x0C, b'T']));
    bus.push_response(status_reply(0x02, 0x6282));
    assert_eq!(
        tag.read(),
        Some(TagEvent::MessageRead(Err(Error::Chip(ApduStatus::EndOfFile))))
    );
}

#[test]
fn event_driven_read() {
    let (bus, mut tag) = common::open_tag(0x20);
    tag.device_mut().set_mode(CommunicationMode::EventDriven);
    let mut msg = Message::new();
    msg.add(TextRecord::new("event driven"));
    let bytes = msg.to_bytes().unwrap();

    assert!(tag.read().is_none());
    bus.push_response(data_reply(0x02, &bytes[..2]));
    assert!(tag.manage_event().is_none());
    bus.push_response(data_reply(0x03, &bytes[2..]));
    assert_eq!(tag.manage_event(), Some(TagEvent::MessageRead(Ok(msg))));
}

#[test]
fn blocking_helpers_restore_mode() {
    let (bus, mut tag) = common::open_tag(0x20);
    tag.device_mut().set_mode(CommunicationMode::EventDriven);
    bus.push_response(data_reply(0x02, &[0x00, 0x00]));
    assert_eq!(tag.read_blocking(), Ok(Message::new()));
    assert_eq!(tag.device().mode(), CommunicationMode::EventDriven);
}
