// libm24sr/libm24sr/src/transport/mock.rs

//! Scripted bus for tests.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use crate::transport::traits::Bus;
use crate::{Error, Result};

#[derive(Debug, Default)]
struct MockState {
    sent: Vec<Vec<u8>>,
    responses: VecDeque<Vec<u8>>,
    reads: Vec<usize>,
    write_failures: usize,
    read_failures: usize,
    rf_disabled: bool,
    gpo: Option<bool>,
}

/// Mock bus for unit tests. It records written frames and returns queued
/// responses. Clones share state, so a test can keep a handle for
/// inspection after handing a clone to a device.
#[derive(Debug, Default, Clone)]
pub struct MockBus {
    state: Rc<RefCell<MockState>>,
}

impl MockBus {
    /// Bus with no queued replies and empty logs.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a response for a subsequent `read`.
    pub fn push_response(&self, resp: Vec<u8>) {
        self.state.borrow_mut().responses.push_back(resp);
    }

    /// Frames written so far, oldest first.
    pub fn sent(&self) -> Vec<Vec<u8>> {
        self.state.borrow().sent.clone()
    }

    /// Most recent frame written, if any.
    pub fn last_sent(&self) -> Option<Vec<u8>> {
        self.state.borrow().sent.last().cloned()
    }

    /// Forget the frames written so far.
    pub fn clear_sent(&self) {
        self.state.borrow_mut().sent.clear();
    }

    /// Lengths requested by each successful `read`.
    pub fn reads(&self) -> Vec<usize> {
        self.state.borrow().reads.clone()
    }

    /// Forget the read lengths recorded so far.
    pub fn clear_reads(&self) {
        self.state.borrow_mut().reads.clear();
    }

    /// Reset both the sent log and the read log. Queued responses and
    /// injected failures are kept.
    pub fn clear_log(&self) {
        let mut state = self.state.borrow_mut();
        state.sent.clear();
        state.reads.clear();
    }

    /// Responses queued but not read yet.
    pub fn pending_responses(&self) -> usize {
        self.state.borrow().responses.len()
    }

    /// Make the next `n` writes fail with NoAcknowledge.
    pub fn set_write_failures(&self, n: usize) {
        self.state.borrow_mut().write_failures = n;
    }

    /// Make the next `n` reads fail with NoAcknowledge.
    pub fn set_read_failures(&self, n: usize) {
        self.state.borrow_mut().read_failures = n;
    }

    /// Last level driven on the RF-disable line.
    pub fn rf_disabled(&self) -> bool {
        self.state.borrow().rf_disabled
    }

    /// Level reported by `gpo_asserted`; unset means the line is not wired.
    pub fn set_gpo(&self, asserted: bool) {
        self.state.borrow_mut().gpo = Some(asserted);
    }
}

impl Bus for MockBus {
    fn write(&mut self, data: &[u8]) -> Result<()> {
        let mut state = self.state.borrow_mut();
        if state.write_failures > 0 {
            state.write_failures -= 1;
            return Err(Error::NoAcknowledge);
        }
        state.sent.push(data.to_vec());
        Ok(())
    }

    fn read(&mut self, len: usize) -> Result<Vec<u8>> {
        let mut state = self.state.borrow_mut();
        if state.read_failures > 0 {
            state.read_failures -= 1;
            return Err(Error::NoAcknowledge);
        }
        // The chip NACKs reads while it is busy; an empty queue behaves the same.
        let resp = state.responses.pop_front().ok_or(Error::NoAcknowledge)?;
        state.reads.push(len);
        Ok(resp)
    }

    fn set_rf_disable(&mut self, disabled: bool) -> Result<()> {
        self.state.borrow_mut().rf_disabled = disabled;
        Ok(())
    }

    fn gpo_asserted(&mut self) -> Option<bool> {
        self.state.borrow().gpo
    }
}
