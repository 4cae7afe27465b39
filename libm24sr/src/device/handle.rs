// libm24sr/libm24sr/src/device/handle.rs

//! The `M24sr` engine: type-state, dispatch and the per-command API.

use std::marker::PhantomData;

use log::{debug, warn};

use crate::constants::WTX_RESPONSE_LEN;
use crate::device::config::DeviceConfig;
use crate::device::event::{Completion, Event, Operation, Outcome};
use crate::device::sequence::{Sequence, Step};
use crate::protocol::codec;
use crate::protocol::frame::{BlockSequence, is_s_block, wtx_reply, wtx_request};
use crate::protocol::parser::slice_at;
use crate::protocol::{Command, ReplyShape};
use crate::transport::{Bus, RetryPolicy};
use crate::types::{CommunicationMode, FileId, GpoConfig, GpoTarget, Password, PasswordType};
use crate::utils::Hex;
use crate::{Error, Result};

/// Type-state markers
pub struct Uninitialized;
/// Marker of an engine that has been through [`M24sr::initialize`].
pub struct Initialized;

/// What a bus read produced for the pending command.
enum Reply {
    /// The chip asked for more time and has been answered; the real reply
    /// is still to come.
    WaitExtension,
    Data(Vec<u8>),
}

/// Where a completion goes next.
enum Routed {
    Event(Event),
    Next(Command),
}

/// M24SR protocol engine.
///
/// Every command and operation returns `Option<Event>`: `Some` once it has
/// finished, `None` while a reply is outstanding in event-driven mode. The
/// GPO interrupt then calls [`M24sr::manage_event`], which collects the reply
/// and carries any running operation forward.
///
/// Only one command may be outstanding at a time; starting another one
/// before the pending reply has been collected is not detected.
pub struct M24sr<State = Uninitialized> {
    bus: Box<dyn Bus>,
    config: DeviceConfig,
    retry: RetryPolicy,
    mode: CommunicationMode,
    blocks: BlockSequence,
    pending: Option<Command>,
    sequence: Option<Sequence>,
    /// Time extensions answered for the pending command.
    wtx_rounds: u32,
    /// Set when an operation switched the dispatch mode itself.
    mode_switched: bool,
    _state: PhantomData<State>,
}

impl<State> M24sr<State> {
    /// Configuration the engine was built with.
    pub fn config(&self) -> &DeviceConfig {
        &self.config
    }

    /// Current dispatch mode.
    pub fn mode(&self) -> CommunicationMode {
        self.mode
    }

    /// Command whose reply has not been collected yet.
    pub fn pending(&self) -> Option<&Command> {
        self.pending.as_ref()
    }

    /// Operation currently running, if any.
    pub fn operation(&self) -> Option<Operation> {
        self.sequence.as_ref().map(Sequence::operation)
    }

    fn into_state<Next>(self) -> M24sr<Next> {
        M24sr {
            bus: self.bus,
            config: self.config,
            retry: self.retry,
            mode: self.mode,
            blocks: self.blocks,
            pending: self.pending,
            sequence: self.sequence,
            wtx_rounds: self.wtx_rounds,
            mode_switched: self.mode_switched,
            _state: PhantomData,
        }
    }

    fn transmit(&mut self, command: &Command) -> Result<()> {
        let frame = codec::encode_command_frame(command, &mut self.blocks, self.config.device_id)?;
        debug!("-> {} {}", command.name(), Hex(&frame));
        self.retry.write(&mut *self.bus, &frame)
    }

    fn receive(&mut self, command: &Command) -> Result<Reply> {
        let shape = command.reply_shape();
        let frame = self.retry.read(&mut *self.bus, shape.read_len())?;
        debug!("<- {} {}", command.name(), Hex(&frame));
        if shape == ReplyShape::StatusOrWtx && is_s_block(&frame) {
            let fwt = wtx_request(slice_at(&frame, 0, WTX_RESPONSE_LEN)?)?;
            if self.wtx_rounds >= self.retry.attempts {
                warn!(
                    "{} gave up after {} time extensions",
                    command.name(),
                    self.wtx_rounds
                );
                return Err(Error::BusTimeout {
                    attempts: self.retry.attempts,
                });
            }
            self.wtx_rounds += 1;
            debug!("wait time extension requested, fwt {:#04x}", fwt);
            let reply = wtx_reply(fwt);
            self.retry.write(&mut *self.bus, &reply)?;
            return Ok(Reply::WaitExtension);
        }
        codec::decode_response_frame(command, &frame).map(Reply::Data)
    }

    /// Write `command`. Returns its completion unless a reply is awaited in
    /// event-driven mode.
    fn start(&mut self, command: Command) -> Option<Completion> {
        if let Err(e) = self.transmit(&command) {
            warn!("{} not sent: {}", command.name(), e);
            return Some(Completion::new(command, Err(e)));
        }
        if command.reply_shape() == ReplyShape::None {
            return Some(Completion::new(command, Ok(Vec::new())));
        }
        self.pending = Some(command);
        self.wtx_rounds = 0;
        match self.mode {
            CommunicationMode::Blocking => self.collect(),
            CommunicationMode::EventDriven => None,
        }
    }

    /// Read the reply of the pending command.
    fn collect(&mut self) -> Option<Completion> {
        loop {
            let command = self.pending.take()?;
            match self.receive(&command) {
                Ok(Reply::WaitExtension) => {
                    self.pending = Some(command);
                    if self.mode == CommunicationMode::EventDriven {
                        return None;
                    }
                }
                Ok(Reply::Data(data)) => return Some(Completion::new(command, Ok(data))),
                Err(e @ Error::CrcMismatch { .. }) => {
                    warn!("{} reply rejected: {}", command.name(), e);
                    return Some(Completion::new(command, Err(e)));
                }
                Err(e) => return Some(Completion::new(command, Err(e))),
            }
        }
    }

    fn route(&mut self, completion: Completion) -> Routed {
        let Some(sequence) = self.sequence.as_mut() else {
            return Routed::Event(Event::Command(completion));
        };
        let step = sequence.advance(completion);
        if let Some(mode) = sequence.take_mode_change() {
            debug!("dispatch mode now {:?}", mode);
            self.mode = mode;
            self.mode_switched = true;
        }
        match step {
            Step::Next(command) => Routed::Next(command),
            Step::Finish(result) => {
                let operation = sequence.operation();
                self.sequence = None;
                Routed::Event(Event::Operation { operation, result })
            }
        }
    }

    fn run(&mut self, mut command: Command) -> Option<Event> {
        loop {
            let completion = self.start(command)?;
            match self.route(completion) {
                Routed::Event(event) => return Some(event),
                Routed::Next(next) => command = next,
            }
        }
    }

    fn begin(&mut self, (sequence, first): (Sequence, Command)) -> Option<Event> {
        debug!("starting {}", sequence.operation().name());
        self.sequence = Some(sequence);
        self.run(first)
    }

    /// Re-entry point after the GPO line signals that a reply is ready.
    ///
    /// Returns `None` when nothing was pending, or when the running
    /// operation issued its next command and is waiting again.
    pub fn manage_event(&mut self) -> Option<Event> {
        let completion = self.collect()?;
        match self.route(completion) {
            Routed::Event(event) => Some(event),
            Routed::Next(command) => self.run(command),
        }
    }

    /// Run an operation to its end in blocking mode, restoring the mode after.
    ///
    /// A mode change made by the operation itself is kept.
    fn run_blocking(&mut self, steps: (Sequence, Command)) -> Result<Outcome> {
        let previous = self.mode;
        self.mode = CommunicationMode::Blocking;
        self.mode_switched = false;
        let event = self.begin(steps);
        if !self.mode_switched {
            self.mode = previous;
        }
        match event {
            Some(Event::Operation { result, .. }) => result,
            other => Err(Error::UnsupportedOperation(format!(
                "blocking run ended with {:?}",
                other
            ))),
        }
    }
}

impl M24sr<Uninitialized> {
    /// Engine over `bus`. Nothing is sent until [`M24sr::initialize`].
    pub fn new(bus: Box<dyn Bus>, config: DeviceConfig) -> Self {
        Self {
            bus,
            retry: config.retry_policy(),
            mode: CommunicationMode::Blocking,
            config,
            blocks: BlockSequence::new(),
            pending: None,
            sequence: None,
            wtx_rounds: 0,
            mode_switched: false,
            _state: PhantomData,
        }
    }

    /// Put the chip into a known state: take the I2C session, set both GPO
    /// nibbles to high impedance, release the session. Runs in blocking mode
    /// and switches to the configured mode afterwards.
    pub fn initialize(self) -> Result<M24sr<Initialized>> {
        let mut device: M24sr<Initialized> = self.into_state();
        device.mode = CommunicationMode::Blocking;
        device.execute(Command::KillSession)?;
        for target in [GpoTarget::I2c, GpoTarget::Rf] {
            device.perform(Operation::ManageGpo {
                target,
                config: GpoConfig::HighImpedance,
            })?;
        }
        device.execute(Command::Deselect)?;
        device.mode = device.config.initial_mode;
        debug!("initialised, mode {:?}", device.mode);
        Ok(device)
    }
}

impl M24sr<Initialized> {
    /// Switch between blocking and event-driven dispatch.
    pub fn set_mode(&mut self, mode: CommunicationMode) {
        self.mode = mode;
    }

    /// Issue one low-level command.
    pub fn send(&mut self, command: Command) -> Option<Event> {
        self.run(command)
    }

    /// Issue one command and wait for its reply regardless of the mode.
    pub fn execute(&mut self, command: Command) -> Result<Vec<u8>> {
        let previous = self.mode;
        self.mode = CommunicationMode::Blocking;
        let event = self.run(command);
        self.mode = previous;
        match event {
            Some(Event::Command(completion)) => completion.result,
            other => Err(Error::UnsupportedOperation(format!(
                "execute ended with {:?}",
                other
            ))),
        }
    }

    /// Run a compound operation to its end regardless of the mode.
    pub fn perform(&mut self, operation: Operation) -> Result<Outcome> {
        let steps = self.steps_for(operation)?;
        self.run_blocking(steps)
    }

    fn steps_for(&self, operation: Operation) -> Result<(Sequence, Command)> {
        let su = self.config.super_user_password;
        Ok(match operation {
            Operation::OpenSession { force } => {
                Sequence::open_session(force, self.config.open_session_attempts)
            }
            Operation::ReadId => Sequence::read_id(),
            Operation::ManageGpo { target, config } => {
                Sequence::manage_gpo(operation, target, config, su, None)
            }
            Operation::SendInterrupt => Sequence::manage_gpo(
                operation,
                GpoTarget::I2c,
                GpoConfig::Interrupt,
                su,
                Some(Command::SendInterrupt),
            ),
            Operation::StateControl { set } => Sequence::manage_gpo(
                operation,
                GpoTarget::I2c,
                GpoConfig::StateControl,
                su,
                Some(Command::StateControl { set }),
            ),
            Operation::DisableAllPasswords => Sequence::disable_all_passwords(su),
            Operation::EnableReadOnly
            | Operation::DisableReadOnly
            | Operation::EnableWriteOnly
            | Operation::DisableWriteOnly => Sequence::access_state(operation, su),
            Operation::EnablePassword(_)
            | Operation::DisablePassword(_) => {
                return Err(Error::UnsupportedOperation(format!(
                    "{} needs explicit arguments",
                    operation.name()
                )));
            }
        })
    }

    /// Ask for the I2C session; fails while the RF side holds it.
    pub fn get_session(&mut self) -> Option<Event> {
        self.send(Command::GetSession)
    }

    /// Take the session even if the RF side holds it.
    pub fn kill_session(&mut self) -> Option<Event> {
        self.send(Command::KillSession)
    }

    /// Release the session.
    pub fn deselect(&mut self) -> Option<Event> {
        self.send(Command::Deselect)
    }

    /// Select the NDEF Tag Application.
    pub fn select_application(&mut self) -> Option<Event> {
        self.send(Command::SelectApplication)
    }

    /// Select the Capability Container file.
    pub fn select_cc_file(&mut self) -> Option<Event> {
        self.send(Command::SelectCcFile)
    }

    /// Select the NDEF file `id`.
    pub fn select_ndef_file(&mut self, id: FileId) -> Option<Event> {
        self.send(Command::SelectNdefFile(id))
    }

    /// Select the ST system file.
    pub fn select_system_file(&mut self) -> Option<Event> {
        self.send(Command::SelectSystemFile)
    }

    /// Lengths above the per-command limit are clamped.
    pub fn read_binary(&mut self, offset: u16, length: usize) -> Option<Event> {
        self.send(Command::read_binary(offset, length))
    }

    /// ExtendedReadBinary: like `read_binary` but may cross the file end of
    /// the system file. Lengths are clamped the same way.
    pub fn st_read_binary(&mut self, offset: u16, length: usize) -> Option<Event> {
        self.send(Command::st_read_binary(offset, length))
    }

    /// More than 246 bytes completes with [`Error::InvalidLength`] and
    /// nothing is sent.
    pub fn update_binary(&mut self, offset: u16, data: &[u8]) -> Option<Event> {
        self.send(Command::update_binary(offset, data))
    }

    /// Present a password, or pass `None` to ask whether one is required.
    pub fn verify(&mut self, password: PasswordType, value: Option<Password>) -> Option<Event> {
        self.send(Command::Verify { password, value })
    }

    /// Replace a password. Needs the current one presented first.
    pub fn change_reference_data(
        &mut self,
        password: PasswordType,
        value: Password,
    ) -> Option<Event> {
        self.send(Command::ChangeReferenceData { password, value })
    }

    /// Require `password` for its access right.
    pub fn enable_verification_requirement(&mut self, password: PasswordType) -> Option<Event> {
        self.send(Command::EnableVerificationRequirement(password))
    }

    /// Drop the password requirement for one access right.
    pub fn disable_verification_requirement(&mut self, password: PasswordType) -> Option<Event> {
        self.send(Command::DisableVerificationRequirement(password))
    }

    /// Make one access right permanently locked.
    pub fn enable_permanent_state(&mut self, password: PasswordType) -> Option<Event> {
        self.send(Command::EnablePermanentState(password))
    }

    /// Lift a permanent lock set by `enable_permanent_state`.
    pub fn disable_permanent_state(&mut self, password: PasswordType) -> Option<Event> {
        self.send(Command::DisablePermanentState(password))
    }

    /// Select application, CC file and NDEF file; completes with
    /// [`Outcome::SessionOpened`].
    pub fn open_session(&mut self, force: bool) -> Option<Event> {
        self.begin(Sequence::open_session(
            force,
            self.config.open_session_attempts,
        ))
    }

    /// Completes with [`Outcome::ChipId`].
    pub fn read_id(&mut self) -> Option<Event> {
        self.begin(Sequence::read_id())
    }

    /// Rewrite the I2C nibble of the GPO byte. Answer-ready switches the
    /// engine to event-driven mode, any other value to blocking; the RF
    /// nibble follows the same rule.
    pub fn manage_i2c_gpo(&mut self, config: GpoConfig) -> Option<Event> {
        self.manage_gpo(GpoTarget::I2c, config)
    }

    /// Rewrite the RF nibble of the GPO byte.
    pub fn manage_rf_gpo(&mut self, config: GpoConfig) -> Option<Event> {
        self.manage_gpo(GpoTarget::Rf, config)
    }

    fn manage_gpo(&mut self, target: GpoTarget, config: GpoConfig) -> Option<Event> {
        let su = self.config.super_user_password;
        self.begin(Sequence::manage_gpo(
            Operation::ManageGpo { target, config },
            target,
            config,
            su,
            None,
        ))
    }

    /// Configure the GPO as interrupt, then pulse it.
    pub fn send_interrupt(&mut self) -> Option<Event> {
        let su = self.config.super_user_password;
        self.begin(Sequence::manage_gpo(
            Operation::SendInterrupt,
            GpoTarget::I2c,
            GpoConfig::Interrupt,
            su,
            Some(Command::SendInterrupt),
        ))
    }

    /// Configure the GPO as state control, then drive it.
    pub fn state_control(&mut self, set: bool) -> Option<Event> {
        let su = self.config.super_user_password;
        self.begin(Sequence::manage_gpo(
            Operation::StateControl { set },
            GpoTarget::I2c,
            GpoConfig::StateControl,
            su,
            Some(Command::StateControl { set }),
        ))
    }

    /// Present the write password, enable read protection and set its
    /// password to `new`.
    pub fn enable_read_password(&mut self, current_write: Password, new: Password) -> Option<Event> {
        self.begin(Sequence::change_password(
            PasswordType::Read,
            current_write,
            Some(new),
        ))
    }

    /// Present the write password and disable read protection.
    pub fn disable_read_password(&mut self, current_write: Password) -> Option<Event> {
        self.begin(Sequence::change_password(
            PasswordType::Read,
            current_write,
            None,
        ))
    }

    /// Present the write password, enable write protection and set its
    /// password to `new`.
    pub fn enable_write_password(
        &mut self,
        current_write: Password,
        new: Password,
    ) -> Option<Event> {
        self.begin(Sequence::change_password(
            PasswordType::Write,
            current_write,
            Some(new),
        ))
    }

    /// Present the write password and disable write protection.
    pub fn disable_write_password(&mut self, current_write: Password) -> Option<Event> {
        self.begin(Sequence::change_password(
            PasswordType::Write,
            current_write,
            None,
        ))
    }

    /// Clear every protection and reset both passwords to `super_user`.
    pub fn disable_all_passwords(&mut self, super_user: Password) -> Option<Event> {
        self.begin(Sequence::disable_all_passwords(super_user))
    }

    /// Permanently block RF and I2C writes.
    pub fn enable_read_only(&mut self, current_write: Password) -> Option<Event> {
        self.begin(Sequence::access_state(
            Operation::EnableReadOnly,
            current_write,
        ))
    }

    /// Undo `enable_read_only`; needs the super-user password.
    pub fn disable_read_only(&mut self, super_user: Password) -> Option<Event> {
        self.begin(Sequence::access_state(
            Operation::DisableReadOnly,
            super_user,
        ))
    }

    /// Permanently block RF and I2C reads.
    pub fn enable_write_only(&mut self, current_write: Password) -> Option<Event> {
        self.begin(Sequence::access_state(
            Operation::EnableWriteOnly,
            current_write,
        ))
    }

    /// Undo `enable_write_only`; needs the super-user password.
    pub fn disable_write_only(&mut self, super_user: Password) -> Option<Event> {
        self.begin(Sequence::access_state(
            Operation::DisableWriteOnly,
            super_user,
        ))
    }

    /// Drive the RF-disable line: `false` silences the RF interface.
    pub fn rf_config(&mut self, enabled: bool) -> Result<()> {
        debug!("rf interface {}", if enabled { "enabled" } else { "disabled" });
        self.bus.set_rf_disable(!enabled)
    }

    /// Sample the GPO line through the bus, when wired.
    pub fn gpo_asserted(&mut self) -> Option<bool> {
        self.bus.gpo_asserted()
    }
}
