// libm24sr/libm24sr/src/protocol/commands/mod.rs

//! Every command the chip understands.

pub mod binary;
pub mod control;
pub mod security;
pub mod select;

pub use binary::{encode_read_binary, encode_update_binary};
pub use control::{encode_send_interrupt, encode_state_control};
pub use security::{
    encode_change_reference_data, encode_permanent_state, encode_verification_requirement,
    encode_verify,
};
pub use select::{encode_select_application, encode_select_file};

use crate::constants::{
    CC_FILE_ID, CLA_DEFAULT, CLA_ST, DESELECT_COMMAND, GET_SESSION_COMMAND, KILL_SESSION_COMMAND,
    MAX_BYTE_OPERATION_LEN, SYSTEM_FILE_ID,
};
use crate::protocol::frame::Apdu;
use crate::protocol::responses::ReplyShape;
use crate::types::{FileId, Password, PasswordType};
use crate::Result;

/// High-level Command enum. Each variant keeps the parameters it was issued
/// with so completions can report what was attempted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Open an I2C session if the RF side does not hold one.
    GetSession,
    /// Open an I2C session, killing any RF session.
    KillSession,
    /// S(DESELECT): release the session.
    Deselect,
    /// Select the NDEF Tag Application.
    SelectApplication,
    /// Select the Capability Container.
    SelectCcFile,
    /// Select an NDEF file.
    SelectNdefFile(FileId),
    /// Select the ST system file.
    SelectSystemFile,
    /// ISO read binary within the selected file.
    ReadBinary {
        /// Offset in the selected file.
        offset: u16,
        /// Bytes to read, at most 246.
        length: u8,
    },
    /// ST proprietary read binary, able to read past the file's NDEF length.
    StReadBinary {
        /// Offset in the selected file.
        offset: u16,
        /// Bytes to read, at most 246.
        length: u8,
    },
    /// Write `data` at `offset` in the selected file.
    UpdateBinary {
        /// Offset in the selected file.
        offset: u16,
        /// Bytes to write; more than 246 fail to encode.
        data: Vec<u8>,
    },
    /// Present a password, or ask whether one is needed when `value` is None.
    Verify {
        /// Access right the password protects.
        password: PasswordType,
        /// Password to present.
        value: Option<Password>,
    },
    /// Replace a password.
    ChangeReferenceData {
        /// Password to replace.
        password: PasswordType,
        /// New value.
        value: Password,
    },
    /// Require the password for one access right.
    EnableVerificationRequirement(PasswordType),
    /// Drop the password requirement for one access right.
    DisableVerificationRequirement(PasswordType),
    /// Lock one access right permanently.
    EnablePermanentState(PasswordType),
    /// Lift a permanent lock.
    DisablePermanentState(PasswordType),
    /// Pulse the I2C GPO.
    SendInterrupt,
    /// Drive the I2C GPO.
    StateControl {
        /// Low when true.
        set: bool,
    },
}

impl Command {
    /// Read binary clamped to the chip's per-command transfer limit.
    pub fn read_binary(offset: u16, length: usize) -> Self {
        Self::ReadBinary {
            offset,
            length: clamp_len(length) as u8,
        }
    }

    /// ExtendedReadBinary, clamped like [`Command::read_binary`].
    pub fn st_read_binary(offset: u16, length: usize) -> Self {
        Self::StReadBinary {
            offset,
            length: clamp_len(length) as u8,
        }
    }

    /// Update binary carrying all of `data`. Encoding fails with
    /// `InvalidLength` when it exceeds the per-command transfer limit.
    pub fn update_binary(offset: u16, data: &[u8]) -> Self {
        Self::UpdateBinary {
            offset,
            data: data.to_vec(),
        }
    }

    /// Raw frame for commands that are not carried in an I-Block.
    pub fn raw_frame(&self) -> Option<Vec<u8>> {
        match self {
            Self::GetSession => Some(vec![GET_SESSION_COMMAND]),
            Self::KillSession => Some(vec![KILL_SESSION_COMMAND]),
            Self::Deselect => Some(DESELECT_COMMAND.to_vec()),
            _ => None,
        }
    }

    /// Build the APDU for I-Block commands.
    pub fn apdu(&self) -> Result<Option<Apdu>> {
        let apdu = match self {
            Self::GetSession | Self::KillSession | Self::Deselect => return Ok(None),
            Self::SelectApplication => encode_select_application(),
            Self::SelectCcFile => encode_select_file(FileId::new(CC_FILE_ID)),
            Self::SelectNdefFile(id) => encode_select_file(*id),
            Self::SelectSystemFile => encode_select_file(FileId::new(SYSTEM_FILE_ID)),
            Self::ReadBinary { offset, length } => encode_read_binary(CLA_DEFAULT, *offset, *length),
            Self::StReadBinary { offset, length } => encode_read_binary(CLA_ST, *offset, *length),
            Self::UpdateBinary { offset, data } => encode_update_binary(*offset, data)?,
            Self::Verify { password, value } => encode_verify(*password, value.as_ref()),
            Self::ChangeReferenceData { password, value } => {
                encode_change_reference_data(*password, value)
            }
            Self::EnableVerificationRequirement(p) => encode_verification_requirement(true, *p)?,
            Self::DisableVerificationRequirement(p) => encode_verification_requirement(false, *p)?,
            Self::EnablePermanentState(p) => encode_permanent_state(true, *p)?,
            Self::DisablePermanentState(p) => encode_permanent_state(false, *p)?,
            Self::SendInterrupt => encode_send_interrupt(),
            Self::StateControl { set } => encode_state_control(*set),
        };
        Ok(Some(apdu))
    }

    /// What the chip sends back for this command.
    pub fn reply_shape(&self) -> ReplyShape {
        match self {
            Self::GetSession | Self::KillSession => ReplyShape::None,
            Self::Deselect => ReplyShape::Deselect,
            Self::ReadBinary { length, .. } | Self::StReadBinary { length, .. } => {
                ReplyShape::Data(*length as usize)
            }
            Self::UpdateBinary { .. } => ReplyShape::StatusOrWtx,
            _ => ReplyShape::Status,
        }
    }

    /// Short lowercase name used in logs.
    pub fn name(&self) -> &'static str {
        match self {
            Self::GetSession => "get-session",
            Self::KillSession => "kill-session",
            Self::Deselect => "deselect",
            Self::SelectApplication => "select-application",
            Self::SelectCcFile => "select-cc-file",
            Self::SelectNdefFile(_) => "select-ndef-file",
            Self::SelectSystemFile => "select-system-file",
            Self::ReadBinary { .. } => "read-binary",
            Self::StReadBinary { .. } => "st-read-binary",
            Self::UpdateBinary { .. } => "update-binary",
            Self::Verify { .. } => "verify",
            Self::ChangeReferenceData { .. } => "change-reference-data",
            Self::EnableVerificationRequirement(_) => "enable-verification-requirement",
            Self::DisableVerificationRequirement(_) => "disable-verification-requirement",
            Self::EnablePermanentState(_) => "enable-permanent-state",
            Self::DisablePermanentState(_) => "disable-permanent-state",
            Self::SendInterrupt => "send-interrupt",
            Self::StateControl { .. } => "state-control",
        }
    }
}

fn clamp_len(len: usize) -> usize {
    len.min(MAX_BYTE_OPERATION_LEN)
}
