// libm24sr/libm24sr/src/device/sequence.rs

//! Compound operations as explicit step machines.
//!
//! A [`Sequence`] owns the queue of commands still to issue. The engine feeds
//! it every [`Completion`]; the sequence answers with the next command or
//! with the terminal result. The first failing step ends the sequence.

use std::collections::VecDeque;
use std::mem;

use log::{debug, trace, warn};

use crate::constants::{CC_FILE_LEN, SYSTEM_FILE_CHIP_ID_OFFSET, SYSTEM_FILE_GPO_OFFSET};
use crate::device::event::{Completion, Operation, Outcome};
use crate::protocol::Command;
use crate::protocol::parser::byte_at;
use crate::types::{
    CapabilityContainer, CommunicationMode, GpoConfig, GpoTarget, Password, PasswordType,
};
use crate::Result;

/// Reply of a sequence to a completion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Step {
    Next(Command),
    Finish(Result<Outcome>),
}

/// Steps that inspect data or change the engine, beyond issuing commands.
#[derive(Debug, Clone)]
enum Hook {
    Plain,
    OpenSession {
        select_retries: u32,
    },
    ReadId,
    Gpo {
        target: GpoTarget,
        config: GpoConfig,
        password: Password,
    },
}

#[derive(Debug, Clone)]
pub(crate) struct Sequence {
    operation: Operation,
    queue: VecDeque<Command>,
    hook: Hook,
    outcome: Outcome,
    mode_change: Option<CommunicationMode>,
}

impl Sequence {
    fn new(operation: Operation, hook: Hook, commands: Vec<Command>) -> (Self, Command) {
        let mut queue: VecDeque<Command> = commands.into();
        // every constructor passes at least one command
        let first = queue.pop_front().unwrap_or(Command::SelectApplication);
        let sequence = Self {
            operation,
            queue,
            hook,
            outcome: Outcome::Done,
            mode_change: None,
        };
        (sequence, first)
    }

    /// Fixed list of commands with no data to inspect.
    pub(crate) fn chain(operation: Operation, commands: Vec<Command>) -> (Self, Command) {
        Self::new(operation, Hook::Plain, commands)
    }

    /// Session command, then select application, CC file, read CC, select
    /// the NDEF file it names.
    pub(crate) fn open_session(force: bool, select_retries: u32) -> (Self, Command) {
        let session = if force {
            Command::KillSession
        } else {
            Command::GetSession
        };
        Self::new(
            Operation::OpenSession { force },
            Hook::OpenSession { select_retries },
            vec![
                session,
                Command::SelectApplication,
                Command::SelectCcFile,
                Command::read_binary(0, CC_FILE_LEN),
            ],
        )
    }

    pub(crate) fn read_id() -> (Self, Command) {
        Self::new(
            Operation::ReadId,
            Hook::ReadId,
            vec![
                Command::SelectApplication,
                Command::SelectSystemFile,
                Command::read_binary(SYSTEM_FILE_CHIP_ID_OFFSET, 1),
            ],
        )
    }

    /// Read-modify-write of the GPO byte. `followup` runs once the byte is
    /// written.
    pub(crate) fn manage_gpo(
        operation: Operation,
        target: GpoTarget,
        config: GpoConfig,
        password: Password,
        followup: Option<Command>,
    ) -> (Self, Command) {
        let mut commands = vec![
            Command::SelectApplication,
            Command::SelectSystemFile,
            Command::read_binary(SYSTEM_FILE_GPO_OFFSET, 1),
        ];
        commands.extend(followup);
        Self::new(
            operation,
            Hook::Gpo {
                target,
                config,
                password,
            },
            commands,
        )
    }

    pub(crate) fn change_password(
        slot: PasswordType,
        current_write: Password,
        new_value: Option<Password>,
    ) -> (Self, Command) {
        let verify = Command::Verify {
            password: PasswordType::Write,
            value: Some(current_write),
        };
        match new_value {
            Some(value) => Self::chain(
                Operation::EnablePassword(slot),
                vec![
                    verify,
                    Command::ChangeReferenceData {
                        password: slot,
                        value,
                    },
                    Command::EnablePermanentState(slot),
                ],
            ),
            None => Self::chain(
                Operation::DisablePassword(slot),
                vec![verify, Command::DisableVerificationRequirement(slot)],
            ),
        }
    }

    pub(crate) fn disable_all_passwords(super_user: Password) -> (Self, Command) {
        Self::chain(
            Operation::DisableAllPasswords,
            vec![
                Command::Verify {
                    password: PasswordType::I2c,
                    value: Some(super_user),
                },
                Command::DisablePermanentState(PasswordType::Read),
                Command::DisablePermanentState(PasswordType::Write),
                Command::DisableVerificationRequirement(PasswordType::Read),
                Command::DisableVerificationRequirement(PasswordType::Write),
                Command::ChangeReferenceData {
                    password: PasswordType::Read,
                    value: super_user,
                },
                Command::ChangeReferenceData {
                    password: PasswordType::Write,
                    value: super_user,
                },
            ],
        )
    }

    /// Read-only locks the write slot, write-only locks the read slot.
    ///
    /// Enabling verifies the write password and sets the permanent state;
    /// disabling verifies the super-user password, clears the permanent
    /// state and drops the verification requirement.
    pub(crate) fn access_state(operation: Operation, password: Password) -> (Self, Command) {
        let (slot, enable) = match operation {
            Operation::EnableReadOnly => (PasswordType::Write, true),
            Operation::DisableReadOnly => (PasswordType::Write, false),
            Operation::EnableWriteOnly => (PasswordType::Read, true),
            _ => (PasswordType::Read, false),
        };
        let commands = if enable {
            vec![
                Command::Verify {
                    password: PasswordType::Write,
                    value: Some(password),
                },
                Command::EnablePermanentState(slot),
            ]
        } else {
            vec![
                Command::Verify {
                    password: PasswordType::I2c,
                    value: Some(password),
                },
                Command::DisablePermanentState(slot),
                Command::DisableVerificationRequirement(slot),
            ]
        };
        Self::chain(operation, commands)
    }

    pub(crate) fn operation(&self) -> Operation {
        self.operation
    }

    /// Mode the engine must switch to before issuing the next step.
    pub(crate) fn take_mode_change(&mut self) -> Option<CommunicationMode> {
        self.mode_change.take()
    }

    pub(crate) fn advance(&mut self, done: Completion) -> Step {
        let Completion { command, result } = done;
        let data = match result {
            Ok(data) => data,
            Err(e) => return self.fail(command, e),
        };
        trace!("{}: {} ok", self.operation.name(), command.name());

        if let Err(e) = self.inspect(&command, &data) {
            return self.fail(command, e);
        }

        match self.queue.pop_front() {
            Some(next) => Step::Next(next),
            None => Step::Finish(Ok(mem::take(&mut self.outcome))),
        }
    }

    fn fail(&mut self, command: Command, error: crate::Error) -> Step {
        if let Hook::OpenSession { select_retries } = &mut self.hook {
            if command == Command::SelectApplication && *select_retries > 0 {
                *select_retries -= 1;
                warn!(
                    "select application failed ({}), {} retries left",
                    error, select_retries
                );
                return Step::Next(Command::SelectApplication);
            }
        }
        debug!(
            "{} aborted at {}: {}",
            self.operation.name(),
            command.name(),
            error
        );
        Step::Finish(Err(error))
    }

    fn inspect(&mut self, command: &Command, data: &[u8]) -> Result<()> {
        match (&self.hook, command) {
            (Hook::OpenSession { .. }, Command::ReadBinary { .. }) => {
                let cc = CapabilityContainer::parse(data)?;
                debug!(
                    "capability container: ndef file {}, max read {}, max write {}",
                    cc.ndef_file_id, cc.max_read_bytes, cc.max_write_bytes
                );
                self.queue.push_back(Command::SelectNdefFile(cc.ndef_file_id));
                self.outcome = Outcome::SessionOpened(cc);
            }
            (Hook::ReadId, Command::ReadBinary { .. }) => {
                self.outcome = Outcome::ChipId(byte_at(data, 0)?);
            }
            (
                Hook::Gpo {
                    target,
                    config,
                    password,
                },
                Command::ReadBinary { .. },
            ) => {
                let current = byte_at(data, 0)?;
                let merged = target.merge(current, *config);
                trace!("gpo byte {:#04x} -> {:#04x}", current, merged);
                self.queue
                    .push_front(Command::update_binary(SYSTEM_FILE_GPO_OFFSET, &[merged]));
                self.queue.push_front(Command::Verify {
                    password: PasswordType::I2c,
                    value: Some(*password),
                });
            }
            (Hook::Gpo { config, .. }, Command::UpdateBinary { .. }) => {
                self.mode_change = Some(if *config == GpoConfig::AnswerReady {
                    CommunicationMode::EventDriven
                } else {
                    CommunicationMode::Blocking
                });
            }
            _ => {}
        }
        Ok(())
    }
}
