#[path = "../common/mod.rs"]
mod common;

use libm24sr::device::{Event, Operation, Outcome};
use libm24sr::protocol::codec::encode_command_frame;
use libm24sr::protocol::{ApduStatus, BlockSequence, Command};
use libm24sr::test_support::{data_reply, gpo_replies, open_session_replies, status_reply};
use libm24sr::{Error, Password, PasswordType};

fn ok_replies(n: usize) -> Vec<Vec<u8>> {
    (0..n)
        .map(|i| status_reply(0x02 | (i as u8 & 1), 0x9000))
        .collect()
}

/// CLA, INS, P1, P2 of every I-Block written, in order.
fn instructions(sent: &[Vec<u8>]) -> Vec<Vec<u8>> {
    sent.iter()
        .filter(|f| f.len() > 4 && f[0] & 0xC0 == 0)
        .map(|f| f[1..5].to_vec())
        .collect()
}

fn frames_of(commands: &[Command]) -> Vec<Vec<u8>> {
    let mut seq = BlockSequence::new();
    let frames: Vec<Vec<u8>> = commands
        .iter()
        .map(|c| encode_command_frame(c, &mut seq, None).unwrap())
        .collect();
    instructions(&frames)
}

#[test]
fn force_open_kills_session_first() {
    let (bus, mut dev) = common::device();
    for reply in open_session_replies(0xF6) {
        bus.push_response(reply);
    }
    let event = dev.open_session(true).unwrap();
    assert!(event.is_ok());
    assert_eq!(bus.sent()[0], vec![0x52]);
}

#[test]
fn open_session_retries_select_application() {
    let (bus, mut dev) = common::device();
    bus.push_response(status_reply(0x02, 0x6A82));
    bus.push_response(status_reply(0x03, 0x6A82));
    for reply in open_session_replies(0xF6) {
        bus.push_response(reply);
    }
    assert!(dev.open_session(false).unwrap().is_ok());
}

#[test]
fn open_session_gives_up_after_configured_retries() {
    let (bus, mut dev) = common::device();
    for _ in 0..=dev.config().open_session_attempts {
        bus.push_response(status_reply(0x02, 0x6A82));
    }
    assert_eq!(
        dev.open_session(false),
        Some(Event::Operation {
            operation: Operation::OpenSession { force: false },
            result: Err(Error::Chip(ApduStatus::FileNotFound)),
        })
    );
    assert_eq!(bus.pending_responses(), 0);
}

#[test]
fn bad_capability_container_fails_open() {
    let (bus, mut dev) = common::device();
    bus.push_response(status_reply(0x02, 0x9000));
    bus.push_response(status_reply(0x03, 0x9000));
    bus.push_response(data_reply(0x02, &[0u8; 15]));
    match dev.open_session(false) {
        Some(Event::Operation { result, .. }) => {
            assert!(matches!(result, Err(Error::FrameFormat(_))))
        }
        other => panic!("unexpected: {:?}", other),
    }
}

#[test]
fn read_id_returns_chip_byte() {
    let (bus, mut dev) = common::device();
    bus.push_response(status_reply(0x02, 0x9000));
    bus.push_response(status_reply(0x03, 0x9000));
    bus.push_response(data_reply(0x02, &[0x84]));
    match dev.read_id() {
        Some(Event::Operation { result, .. }) => assert_eq!(result, Ok(Outcome::ChipId(0x84))),
        other => panic!("unexpected: {:?}", other),
    }
    let read = bus.sent()[2].clone();
    assert_eq!(&read[1..6], &[0x00, 0xB0, 0x00, 0x11, 0x01]);
}

#[test]
fn send_interrupt_configures_gpo_then_pulses() {
    let (bus, mut dev) = common::device();
    for reply in gpo_replies(0x00) {
        bus.push_response(reply);
    }
    bus.push_response(status_reply(0x03, 0x9000));
    assert!(dev.send_interrupt().unwrap().is_ok());
    let sent = bus.sent();
    let update = &sent[4];
    assert_eq!(update[6], 0x04);
    assert_eq!(&sent[5][1..5], &[0xA2, 0xD6, 0x00, 0x1E]);
}

#[test]
fn state_control_keeps_rf_nibble() {
    let (bus, mut dev) = common::device();
    for reply in gpo_replies(0x20) {
        bus.push_response(reply);
    }
    bus.push_response(status_reply(0x03, 0x9000));
    assert!(dev.state_control(true).unwrap().is_ok());
    let sent = bus.sent();
    assert_eq!(sent[4][6], 0x25);
    assert_eq!(&sent[5][1..7], &[0xA2, 0xD6, 0x00, 0x1F, 0x01, 0x01]);
}

#[test]
fn enable_write_password_steps() {
    let (bus, mut dev) = common::device();
    for reply in ok_replies(3) {
        bus.push_response(reply);
    }
    let new = Password::from_bytes([0x55; 16]);
    let event = dev.enable_write_password(Password::DEFAULT, new).unwrap();
    assert_eq!(
        event,
        Event::Operation {
            operation: Operation::EnablePassword(PasswordType::Write),
            result: Ok(Outcome::Done),
        }
    );
    assert_eq!(
        instructions(&bus.sent()),
        frames_of(&[
            Command::Verify {
                password: PasswordType::Write,
                value: Some(Password::DEFAULT)
            },
            Command::ChangeReferenceData {
                password: PasswordType::Write,
                value: new
            },
            Command::EnablePermanentState(PasswordType::Write),
        ])
    );
}

#[test]
fn disable_read_password_steps() {
    let (bus, mut dev) = common::device();
    for reply in ok_replies(2) {
        bus.push_response(reply);
    }
    assert!(dev.disable_read_password(Password::DEFAULT).unwrap().is_ok());
    let sent = bus.sent();
    assert_eq!(&sent[1][1..5], &[0x00, 0x26, 0x00, 0x01]);
}

#[test]
fn disable_all_passwords_steps() {
    let (bus, mut dev) = common::device();
    for reply in ok_replies(7) {
        bus.push_response(reply);
    }
    let su = Password::DEFAULT;
    assert!(dev.disable_all_passwords(su).unwrap().is_ok());
    assert_eq!(
        instructions(&bus.sent()),
        frames_of(&[
            Command::Verify {
                password: PasswordType::I2c,
                value: Some(su)
            },
            Command::DisablePermanentState(PasswordType::Read),
            Command::DisablePermanentState(PasswordType::Write),
            Command::DisableVerificationRequirement(PasswordType::Read),
            Command::DisableVerificationRequirement(PasswordType::Write),
            Command::ChangeReferenceData {
                password: PasswordType::Read,
                value: su
            },
            Command::ChangeReferenceData {
                password: PasswordType::Write,
                value: su
            },
        ])
    );
}

#[test]
fn read_only_round_trip() {
    let (bus, mut dev) = common::device();
    for reply in ok_replies(2) {
        bus.push_response(reply);
    }
    assert!(dev.enable_read_only(Password::DEFAULT).unwrap().is_ok());
    for reply in ok_replies(3) {
        bus.push_response(reply);
    }
    assert!(dev.disable_read_only(Password::DEFAULT).unwrap().is_ok());
    let sent = bus.sent();
    // enable: verify(write), enable-permanent(write)
    assert_eq!(&sent[0][1..5], &[0x00, 0x20, 0x00, 0x02]);
    assert_eq!(&sent[1][1..5], &[0xA2, 0x28, 0x00, 0x02]);
    // disable: verify(i2c), disable-permanent(write), disable-verification(write)
    assert_eq!(&sent[2][1..5], &[0x00, 0x20, 0x00, 0x03]);
    assert_eq!(&sent[3][1..5], &[0xA2, 0x26, 0x00, 0x02]);
    assert_eq!(&sent[4][1..5], &[0x00, 0x26, 0x00, 0x02]);
}

#[test]
fn write_only_locks_read_slot() {
    let (bus, mut dev) = common::device();
    for reply in ok_replies(2) {
        bus.push_response(reply);
    }
    assert!(dev.enable_write_only(Password::DEFAULT).unwrap().is_ok());
    assert_eq!(&bus.sent()[1][1..5], &[0xA2, 0x28, 0x00, 0x01]);

    bus.clear_log();
    for reply in ok_replies(3) {
        bus.push_response(reply);
    }
    assert!(dev.disable_write_only(Password::DEFAULT).unwrap().is_ok());
    assert_eq!(&bus.sent()[2][1..5], &[0x00, 0x26, 0x00, 0x01]);
}

#[test]
fn perform_runs_to_completion_in_event_driven_mode() {
    let (bus, mut dev) = common::device();
    dev.set_mode(libm24sr::CommunicationMode::EventDriven);
    bus.push_response(status_reply(0x02, 0x9000));
    bus.push_response(status_reply(0x03, 0x9000));
    bus.push_response(data_reply(0x02, &[0x84]));
    assert_eq!(dev.perform(Operation::ReadId), Ok(Outcome::ChipId(0x84)));
    assert_eq!(dev.mode(), libm24sr::CommunicationMode::EventDriven);
}
