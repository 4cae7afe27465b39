// libm24sr/libm24sr/src/test_support.rs

//! Test support helpers intended for use by unit and integration tests.
//!
//! They build chip replies with a valid CRC and a device that has already
//! gone through initialisation on a `MockBus`.
#![allow(dead_code)]

use crate::constants::DESELECT_COMMAND;
use crate::device::{DeviceConfig, Initialized, M24sr};
use crate::protocol::checksum::append_crc;
use crate::transport::MockBus;
use crate::Result;

/// `[pcb, sw1, sw2, crc]`
#[doc(hidden)]
pub fn status_reply(pcb: u8, word: u16) -> Vec<u8> {
    let mut frame = vec![pcb];
    frame.extend_from_slice(&word.to_be_bytes());
    append_crc(&mut frame);
    frame
}

/// `[pcb, data.., 0x90, 0x00, crc]`
#[doc(hidden)]
pub fn data_reply(pcb: u8, data: &[u8]) -> Vec<u8> {
    let mut frame = vec![pcb];
    frame.extend_from_slice(data);
    frame.extend_from_slice(&[0x90, 0x00]);
    append_crc(&mut frame);
    frame
}

/// WTX S-Block request carrying `fwt`.
#[doc(hidden)]
pub fn wtx_request_frame(fwt: u8) -> Vec<u8> {
    let mut frame = vec![0xF2, fwt];
    append_crc(&mut frame);
    frame
}

/// Replies to one GPO read-modify-write: select application, select system
/// file, read the GPO byte, verify, update.
#[doc(hidden)]
pub fn gpo_replies(current: u8) -> Vec<Vec<u8>> {
    vec![
        status_reply(0x02, 0x9000),
        status_reply(0x03, 0x9000),
        data_reply(0x02, &[current]),
        status_reply(0x03, 0x9000),
        status_reply(0x02, 0x9000),
    ]
}

/// Every reply `initialize()` reads: both GPO rewrites, then the deselect echo.
/// The kill-session command has no reply.
#[doc(hidden)]
pub fn init_replies() -> Vec<Vec<u8>> {
    let mut replies = gpo_replies(0x11);
    replies.extend(gpo_replies(0x10));
    replies.push(DESELECT_COMMAND.to_vec());
    replies
}

/// Capability container announcing NDEF file 0x0001 and `max` byte transfers.
#[doc(hidden)]
pub fn cc_file(max: u16) -> Vec<u8> {
    let mut cc = vec![0x00, 0x0F, 0x20];
    cc.extend_from_slice(&max.to_be_bytes());
    cc.extend_from_slice(&max.to_be_bytes());
    cc.extend_from_slice(&[0x04, 0x06, 0x00, 0x01, 0x10, 0x00, 0x00, 0x00]);
    cc
}

/// Replies to a successful open-session sequence.
#[doc(hidden)]
pub fn open_session_replies(max: u16) -> Vec<Vec<u8>> {
    vec![
        status_reply(0x02, 0x9000),
        status_reply(0x03, 0x9000),
        data_reply(0x02, &cc_file(max)),
        status_reply(0x03, 0x9000),
    ]
}

/// Create and initialize a device backed by a fresh `MockBus`. The returned
/// bus shares state with the device's and has its sent and read logs cleared.
#[doc(hidden)]
pub fn initialized_mock_device() -> Result<(MockBus, M24sr<Initialized>)> {
    initialized_mock_device_with(DeviceConfig::default())
}

/// Like [`initialized_mock_device`] with a custom configuration.
#[doc(hidden)]
pub fn initialized_mock_device_with(
    config: DeviceConfig,
) -> Result<(MockBus, M24sr<Initialized>)> {
    let bus = MockBus::new();
    for reply in init_replies() {
        bus.push_response(reply);
    }
    let device = M24sr::new(Box::new(bus.clone()), config).initialize()?;
    bus.clear_log();
    Ok((bus, device))
}
