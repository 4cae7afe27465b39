// libm24sr/libm24sr/src/device/builder.rs

//! Builder for [`M24sr`] devices.

use crate::device::config::DeviceConfig;
use crate::device::handle::{M24sr, Uninitialized};
use crate::transport::Bus;
use crate::{Error, Result};

/// Helper to construct a device with optional configuration.
#[derive(Default)]
pub struct DeviceBuilder {
    bus: Option<Box<dyn Bus>>,
    config: DeviceConfig,
}

impl DeviceBuilder {
    /// Builder with no bus and the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Provide an already-created bus (e.g. MockBus).
    pub fn with_bus(mut self, bus: Box<dyn Bus>) -> Self {
        self.bus = Some(bus);
        self
    }

    /// Replace the configuration.
    pub fn with_config(mut self, config: DeviceConfig) -> Self {
        self.config = config;
        self
    }

    /// Consume the builder and return an uninitialized device.
    /// Requires a bus; otherwise returns InvalidParameter.
    pub fn build_uninitialized(self) -> Result<M24sr<Uninitialized>> {
        match self.bus {
            Some(bus) => Ok(M24sr::new(bus, self.config)),
            None => Err(Error::InvalidParameter("no bus provided".into())),
        }
    }
}
