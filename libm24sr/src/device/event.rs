// libm24sr/libm24sr/src/device/event.rs

//! Events reported by the engine when a command or operation finishes.

use crate::Result;
use crate::protocol::Command;
use crate::types::{CapabilityContainer, GpoConfig, GpoTarget, PasswordType};

/// Result of one low-level command, with the command that produced it.
///
/// `result` carries the data bytes of a read; other commands yield an empty
/// vector on success.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Completion {
    /// The command that was sent.
    pub command: Command,
    /// Reply data, or why the command failed.
    pub result: Result<Vec<u8>>,
}

impl Completion {
    /// Pair a command with its result.
    pub fn new(command: Command, result: Result<Vec<u8>>) -> Self {
        Self { command, result }
    }
}

/// Multi-command flows the engine can run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    /// Select the NDEF application, read the CC and select the NDEF file.
    OpenSession {
        /// Kill an RF session first instead of asking for one.
        force: bool,
    },
    /// Read the IC reference byte from the system file.
    ReadId,
    /// Read-modify-write of one GPO nibble in the system file.
    ManageGpo {
        /// Which nibble.
        target: GpoTarget,
        /// New configuration.
        config: GpoConfig,
    },
    /// Pulse the I2C GPO.
    SendInterrupt,
    /// Drive the I2C GPO level.
    StateControl {
        /// Low when true.
        set: bool,
    },
    /// Turn on password protection for one access right.
    EnablePassword(PasswordType),
    /// Turn off password protection for one access right.
    DisablePassword(PasswordType),
    /// Turn off read and write protection.
    DisableAllPasswords,
    /// Permanently block writes.
    EnableReadOnly,
    /// Lift the permanent write block.
    DisableReadOnly,
    /// Permanently block reads.
    EnableWriteOnly,
    /// Lift the permanent read block.
    DisableWriteOnly,
}

impl Operation {
    /// Short lowercase name used in logs.
    pub fn name(&self) -> &'static str {
        match self {
            Self::OpenSession { .. } => "open-session",
            Self::ReadId => "read-id",
            Self::ManageGpo { .. } => "manage-gpo",
            Self::SendInterrupt => "send-interrupt",
            Self::StateControl { .. } => "state-control",
            Self::EnablePassword(_) => "enable-password",
            Self::DisablePassword(_) => "disable-password",
            Self::DisableAllPasswords => "disable-all-passwords",
            Self::EnableReadOnly => "enable-read-only",
            Self::DisableReadOnly => "disable-read-only",
            Self::EnableWriteOnly => "enable-write-only",
            Self::DisableWriteOnly => "disable-write-only",
        }
    }
}

/// Value produced by a successful operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Outcome {
    /// Nothing to report beyond success.
    #[default]
    Done,
    /// IC reference read by [`Operation::ReadId`].
    ChipId(u8),
    /// Capability Container read while opening a session.
    SessionOpened(CapabilityContainer),
}

/// What the engine reports once a command or an operation has finished.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// A single command finished.
    Command(Completion),
    /// A compound operation finished.
    Operation {
        /// The operation that ran.
        operation: Operation,
        /// Its outcome, or the first error.
        result: Result<Outcome>,
    },
}

impl Event {
    /// True when the command or operation succeeded.
    pub fn is_ok(&self) -> bool {
        match self {
            Self::Command(c) => c.result.is_ok(),
            Self::Operation { result, .. } => result.is_ok(),
        }
    }
}
