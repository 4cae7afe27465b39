// libm24sr/libm24sr/src/transport/retry.rs

//! Bounded bus retries.

use std::time::Duration;

use log::{trace, warn};

use crate::transport::traits::Bus;
use crate::utils::{Hex, pause};
use crate::{Error, Result};

/// Bounded retry around single bus transfers.
///
/// The chip NACKs its I2C address while busy, so both directions are retried
/// up to `attempts` times; reads additionally wait `read_delay` before every
/// retry. Exhausting the bound yields [`Error::BusTimeout`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Tries per transfer, at least 1.
    pub attempts: u32,
    /// Wait before each read retry.
    pub read_delay: Duration,
}

impl RetryPolicy {
    /// Policy with `attempts` raised to at least 1.
    pub fn new(attempts: u32, read_delay: Duration) -> Self {
        Self {
            attempts: attempts.max(1),
            read_delay,
        }
    }

    /// Write `frame`, retrying while the bus refuses it.
    pub fn write(&self, bus: &mut dyn Bus, frame: &[u8]) -> Result<()> {
        for attempt in 1..=self.attempts {
            match bus.write(frame) {
                Ok(()) => {
                    trace!("bus write ok after {} attempt(s): {}", attempt, Hex(frame));
                    return Ok(());
                }
                Err(e) => trace!("bus write attempt {} failed: {}", attempt, e),
            }
        }
        warn!("bus write gave up after {} attempts", self.attempts);
        Err(Error::BusTimeout {
            attempts: self.attempts,
        })
    }

    /// Read `len` bytes, pausing `read_delay` between tries.
    pub fn read(&self, bus: &mut dyn Bus, len: usize) -> Result<Vec<u8>> {
        for attempt in 1..=self.attempts {
            if attempt > 1 {
                pause(self.read_delay);
            }
            match bus.read(len) {
                Ok(data) => {
                    trace!("bus read ok after {} attempt(s): {}", attempt, Hex(&data));
                    return Ok(data);
                }
                Err(e) => trace!("bus read attempt {} failed: {}", attempt, e),
            }
        }
        warn!("bus read gave up after {} attempts", self.attempts);
        Err(Error::BusTimeout {
            attempts: self.attempts,
        })
    }
}
