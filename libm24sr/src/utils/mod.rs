//! Small helpers shared across the crate: hex rendering for logs and delays
//! for bus polling.

pub mod hex;
pub mod timeout;

pub use hex::*;
pub use timeout::*;
