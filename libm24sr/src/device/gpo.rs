// libm24sr/libm24sr/src/device/gpo.rs

//! Awaiting the GPO edge instead of polling it.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Notify;

use crate::device::event::Event;
use crate::device::handle::{Initialized, M24sr};
use crate::tag::{NdefTag, TagEvent};

/// Edge-notified GPO input of the chip.
#[async_trait]
pub trait GpoLine: Send + Sync {
    /// Resolve on the next falling edge.
    async fn wait_edge(&self);
}

/// GPO line fed by an interrupt handler through [`NotifyGpo::signal`].
///
/// A signal raised before anyone waits is kept, so an edge that races the
/// caller is not lost.
#[derive(Debug, Clone, Default)]
pub struct NotifyGpo {
    notify: Arc<Notify>,
}

impl NotifyGpo {
    /// Line with no pending edge.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an edge and wake a waiter. Call from the interrupt handler.
    pub fn signal(&self) {
        self.notify.notify_one();
    }
}

#[async_trait]
impl GpoLine for NotifyGpo {
    async fn wait_edge(&self) {
        self.notify.notified().await;
    }
}

impl M24sr<Initialized> {
    /// Wait on `gpo` until the running command or operation finishes.
    ///
    /// Returns `None` at once when nothing is pending.
    pub async fn wait_event(&mut self, gpo: &dyn GpoLine) -> Option<Event> {
        while self.pending().is_some() {
            gpo.wait_edge().await;
            if let Some(event) = self.manage_event() {
                return Some(event);
            }
        }
        None
    }
}

impl NdefTag {
    /// Wait on `gpo` until the running tag transfer finishes.
    pub async fn wait_event(&mut self, gpo: &dyn GpoLine) -> Option<TagEvent> {
        while self.device().pending().is_some() {
            gpo.wait_edge().await;
            if let Some(event) = self.manage_event() {
                return Some(event);
            }
        }
        None
    }
}
