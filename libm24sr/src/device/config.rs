// libm24sr/libm24sr/src/device/config.rs

//! Per-device configuration.

use std::time::Duration;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::transport::RetryPolicy;
use crate::types::{CommunicationMode, Password};

/// Tunables of one chip instance.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct DeviceConfig {
    /// Bound on bus write and read attempts per frame.
    pub max_bus_attempts: u32,
    /// Pause before each read retry.
    pub read_retry_delay_ms: u64,
    /// Extra select-application tries while opening a session.
    pub open_session_attempts: u32,
    /// Presented to the I2C slot when the GPO byte is rewritten.
    pub super_user_password: Password,
    /// DID byte added to I-Blocks when set.
    pub device_id: Option<u8>,
    /// Dispatch mode restored once initialisation completes.
    pub initial_mode: CommunicationMode,
}

impl Default for DeviceConfig {
    fn default() -> Self {
        Self {
            max_bus_attempts: 1000,
            read_retry_delay_ms: 1,
            open_session_attempts: 5,
            super_user_password: Password::DEFAULT,
            device_id: None,
            initial_mode: CommunicationMode::Blocking,
        }
    }
}

impl DeviceConfig {
    /// Bus retry policy built from `max_bus_attempts` and
    /// `read_retry_delay_ms`.
    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy::new(
            self.max_bus_attempts,
            Duration::from_millis(self.read_retry_delay_ms),
        )
    }
}
