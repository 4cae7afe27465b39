// libm24sr/libm24sr/src/lib.rs

//! libm24sr
//!
//! Pure Rust driver for ST M24SR dynamic NFC tags: the I2C command protocol
//! engine (I-Block framing, CRC, status words, blocking and event-driven
//! dispatch, compound operations) and an NDEF message codec, joined by a tag
//! adaptor that streams messages in bus-sized chunks.
#![warn(missing_docs)]

pub mod constants;
pub mod device;
pub mod error;
pub mod ndef;
pub mod prelude;
pub mod protocol;
pub mod tag;
pub mod test_support;
pub mod transport;
pub mod types;
pub mod utils;

// Re-export common types at crate root so `crate::Error`, `crate::Result`,
// and the newtypes in `types` are available for consumers and for
// convenient `prelude` re-exports.
pub use crate::error::*;
pub use crate::types::*;

pub use prelude::*;
