// libm24sr/libm24sr/src/transport/mod.rs

//! Bus abstraction, retry policy and a mock bus.

pub mod mock;
pub mod retry;
pub mod traits;

pub use mock::MockBus;
pub use retry::RetryPolicy;
pub use traits::Bus;
