// libm24sr/libm24sr/src/device/mod.rs

//! The chip protocol engine and its compound operations.

pub mod builder;
pub mod config;
pub mod event;
#[cfg(feature = "async")]
pub mod gpo;
pub mod handle;
pub(crate) mod sequence;

pub use builder::DeviceBuilder;
pub use config::DeviceConfig;
pub use event::{Completion, Event, Operation, Outcome};
#[cfg(feature = "async")]
pub use gpo::{GpoLine, NotifyGpo};
pub use handle::{Initialized, M24sr, Uninitialized};
