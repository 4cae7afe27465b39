// Shared helpers for the integration test crates. Each aggregator pulls this
// module in separately, so not every helper is used everywhere.
#![allow(dead_code)]


pub use fixtures::*;

use libm24sr::test_support::{initialized_mock_device, open_session_replies};
use libm24sr::transport::MockBus;
use libm24sr::{M24sr, Initialized, NdefTag, TagEvent};

/// Initialized device on a mock bus whose sent and read logs start empty.
pub fn device() -> (MockBus, M24sr<Initialized>) {
    let _ = env_logger::builder().is_test(true).try_init();
    initialized_mock_device().expect("initialize mock device")
}

/// Tag with an open session advertising `max`-byte transfers.
pub fn open_tag(max: u16) -> (MockBus, NdefTag) {
    let (bus, dev) = device();
    for reply in open_session_replies(max) {
        bus.push_response(reply);
    }
    let mut tag = NdefTag::new(dev);
    assert_eq!(tag.open_session(false), Some(TagEvent::SessionOpened(Ok(()))));
    bus.clear_log();
    (bus, tag)
}
