// libm24sr/libm24sr/src/prelude.rs

//! Common imports.

pub use crate::device::{
    Completion, DeviceBuilder, DeviceConfig, Event, Initialized, M24sr, Operation, Outcome,
    Uninitialized,
};
pub use crate::ndef::{Message, NdefRecord, Record};
pub use crate::protocol::{ApduStatus, Command};
pub use crate::tag::{NdefTag, TagEvent};
pub use crate::transport::Bus;
pub use crate::{
    CapabilityContainer, CommunicationMode, Error, FileId, GpoConfig, GpoTarget, Password,
    PasswordType, Result,
};

// Re-export small utilities for convenience
pub use crate::utils::{bytes_to_hex, ms};
