#[path = "../common/mod.rs"]
mod common;

use libm24sr::device::{Event, Operation, Outcome};
use libm24sr::protocol::ApduStatus;
use libm24sr::test_support::{data_reply, open_session_replies, status_reply};
use libm24sr::{CommunicationMode, Error, NdefTag, TagEvent};

#[test]
fn open_failure_leaves_session_closed() {
    let (bus, dev) = common::device();
    for _ in 0..=dev.config().open_session_attempts {
        bus.push_response(status_reply(0x02, 0x6A82));
    }
    let mut tag = NdefTag::new(dev);
    assert_eq!(
        tag.open_session(false),
        Some(TagEvent::SessionOpened(Err(Error::Chip(
            ApduStatus::FileNotFound
        ))))
    );
    assert!(!tag.is_open());
    assert!(tag.capability_container().is_none());
}

#[test]
fn event_driven_open_then_close() {
    let (bus, dev) = common::device();
    let mut tag = NdefTag::new(dev);
    tag.device_mut().set_mode(CommunicationMode::EventDriven);
    assert!(tag.open_session(true).is_none());
    let mut last = None;
    for reply in open_session_replies(0x80) {
        bus.push_response(reply);
        last = tag.manage_event();
    }
    assert_eq!(last, Some(TagEvent::SessionOpened(Ok(()))));
    assert_eq!(tag.capability_container().unwrap().max_read_bytes, 0x80);

    assert!(tag.close_session().is_none());
    bus.push_response(vec![0xC2, 0xE0, 0xB4]);
    assert_eq!(tag.manage_event(), Some(TagEvent::SessionClosed(Ok(()))));
    assert!(!tag.is_open());
}

#[test]
fn failed_close_keeps_session() {
    let (bus, mut tag) = common::open_tag(0xF6);
    bus.push_response(vec![0xC2, 0x00, 0x00]);
    assert!(matches!(
        tag.close_session(),
        Some(TagEvent::SessionClosed(Err(Error::CrcMismatch { .. })))
    ));
    assert!(tag.is_open());
}

#[test]
fn engine_events_pass_through() {
    let (bus, dev) = common::device();
    let mut tag = NdefTag::new(dev);
    tag.device_mut().set_mode(CommunicationMode::EventDriven);
    assert!(tag.device_mut().read_id().is_none());
    bus.push_response(status_reply(0x02, 0x9000));
    assert!(tag.manage_event().is_none());
    bus.push_response(status_reply(0x03, 0x9000));
    assert!(tag.manage_event().is_none());
    bus.push_response(data_reply(0x02, &[0x86]));
    assert_eq!(
        tag.manage_event(),
        Some(TagEvent::Device(Event::Operation {
            operation: Operation::ReadId,
            result: Ok(Outcome::ChipId(0x86)),
        }))
    );
}

#[test]
fn perform_goes_to_the_engine() {
    let (bus, dev) = common::device();
    let mut tag = NdefTag::new(dev);
    bus.push_response(status_reply(0x02, 0x9000));
    bus.push_response(status_reply(0x03, 0x9000));
    bus.push_response(data_reply(0x02, &[0x86]));
    assert_eq!(tag.perform(Operation::ReadId), Ok(Outcome::ChipId(0x86)));
}
