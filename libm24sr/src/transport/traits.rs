// libm24sr/libm24sr/src/transport/traits.rs

//! The `Bus` trait.

use crate::Result;

/// Bus trait abstracts the I2C link and the chip's control lines away from
/// protocol/device logic.
///
/// Implementations report a single failed transfer; retrying is done by the
/// caller (see [`crate::transport::RetryPolicy`]).
pub trait Bus {
    /// Write one complete frame to the chip.
    fn write(&mut self, data: &[u8]) -> Result<()>;

    /// Read up to `len` bytes from the chip.
    fn read(&mut self, len: usize) -> Result<Vec<u8>>;

    /// Drive the RF-disable output. Default implementation ignores the
    /// request so buses without the line wired keep working.
    fn set_rf_disable(&mut self, _disabled: bool) -> Result<()> {
        Ok(())
    }

    /// Sample the GPO input line, if wired. `Some(true)` means asserted (low).
    fn gpo_asserted(&mut self) -> Option<bool> {
        None
    }
}

impl<B: Bus + ?Sized> Bus for Box<B> {
    fn write(&mut self, data: &[u8]) -> Result<()> {
        (**self).write(data)
    }

    fn read(&mut self, len: usize) -> Result<Vec<u8>> {
        (**self).read(len)
    }

    fn set_rf_disable(&mut self, disabled: bool) -> Result<()> {
        (**self).set_rf_disable(disabled)
    }

    fn gpo_asserted(&mut self) -> Option<bool> {
        (**self).gpo_asserted()
    }
}
