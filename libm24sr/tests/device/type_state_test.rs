#[path = "../common/mod.rs"]
mod common;

use libm24sr::device::{DeviceBuilder, DeviceConfig, M24sr};
use libm24sr::test_support::init_replies;
use libm24sr::transport::MockBus;
use libm24sr::{CommunicationMode, Error};

#[test]
fn initialize_transitions() {
    let bus = MockBus::new();
    for reply in init_replies() {
        bus.push_response(reply);
    }
    let device = DeviceBuilder::new()
        .with_bus(Box::new(bus.clone()))
        .build_uninitialized()
        .unwrap();
    assert_eq!(device.mode(), CommunicationMode::Blocking);

    let initialized = device.initialize().unwrap();
    assert!(initialized.pending().is_none());
    assert_eq!(bus.pending_responses(), 0);
    // kill session, 2 x (select app, select system, read, verify, update), deselect
    assert_eq!(bus.sent().len(), 12);
}

#[test]
fn initialize_fails_when_chip_is_silent() {
    let bus = MockBus::new();
    let config = DeviceConfig {
        max_bus_attempts: 3,
        read_retry_delay_ms: 0,
        ..DeviceConfig::default()
    };
    let device = M24sr::new(Box::new(bus), config);
    assert!(matches!(
        device.initialize(),
        Err(Error::BusTimeout { attempts: 3 })
    ));
}
