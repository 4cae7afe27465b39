#[path = "../common/mod.rs"]
mod common;

use libm24sr::device::{Event, Operation, Outcome};
use libm24sr::protocol::Command;
use libm24sr::test_support::{data_reply, open_session_replies, status_reply, wtx_request_frame};
use libm24sr::{CommunicationMode, FileId, GpoConfig};

#[test]
fn command_waits_for_manage_event() {
    let (bus, mut dev) = common::device();
    dev.set_mode(CommunicationMode::EventDriven);
    assert!(dev.read_binary(0, 2).is_none());
    assert_eq!(dev.pending(), Some(&Command::read_binary(0, 2)));
    assert!(bus.reads().is_empty());

    bus.push_response(data_reply(0x02, &[0x00, 0x05]));
    match dev.manage_event() {
        Some(Event::Command(done)) => assert_eq!(done.result, Ok(vec![0x00, 0x05])),
        other => panic!("unexpected: {:?}", other),
    }
    assert!(dev.pending().is_none());
}

#[test]
fn wait_extension_keeps_update_pending() {
    let (bus, mut dev) = common::device();
    dev.set_mode(CommunicationMode::EventDriven);
    assert!(dev.update_binary(0, &[0x01]).is_none());

    bus.push_response(wtx_request_frame(0x05));
    assert!(dev.manage_event().is_none());
    assert!(matches!(dev.pending(), Some(Command::UpdateBinary { .. })));
    assert_eq!(&bus.last_sent().unwrap()[..2], &[0xF2, 0x05]);

    bus.push_response(status_reply(0x03, 0x9000));
    assert!(dev.manage_event().is_some_and(|e| e.is_ok()));
}

#[test]
fn open_session_walks_one_step_per_event() {
    let (bus, mut dev) = common::device();
    dev.set_mode(CommunicationMode::EventDriven);
    // get-session has no reply, so the sequence moves straight to select
    assert!(dev.open_session(false).is_none());
    assert_eq!(dev.pending(), Some(&Command::SelectApplication));

    let mut last = None;
    for reply in open_session_replies(0x40) {
        bus.push_response(reply);
        last = dev.manage_event();
    }
    match last {
        Some(Event::Operation {
            operation: Operation::OpenSession { force: false },
            result: Ok(Outcome::SessionOpened(cc)),
        }) => {
            assert_eq!(cc.ndef_file_id, FileId::new(1));
            assert_eq!(cc.max_write_bytes, 0x40);
        }
        other => panic!("unexpected: {:?}", other),
    }
    assert!(dev.operation().is_none());
}

#[test]
fn leaving_answer_ready_returns_to_blocking() {
    let (bus, mut dev) = common::device();
    dev.set_mode(CommunicationMode::EventDriven);
    assert!(dev.manage_i2c_gpo(GpoConfig::HighImpedance).is_none());
    let replies = [
        status_reply(0x02, 0x9000),
        status_reply(0x03, 0x9000),
        data_reply(0x02, &[0x03]),
        status_reply(0x03, 0x9000),
    ];
    for reply in replies {
        bus.push_response(reply);
        assert!(dev.manage_event().is_none());
    }
    bus.push_response(status_reply(0x02, 0x9000));
    assert!(dev.manage_event().is_some_and(|e| e.is_ok()));
    assert_eq!(dev.mode(), CommunicationMode::Blocking);
    assert_eq!(&bus.last_sent().unwrap()[5..7], &[0x01, 0x00]);
}
