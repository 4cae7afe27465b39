// libm24sr/libm24sr/src/types.rs

//! Domain newtypes and small enums shared by the engine and the tag adaptor.

use std::convert::TryFrom;

use derive_more::{Display, From, Into};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::constants::{
    CC_FILE_LEN, I2C_PASSWORD_ID, PASSWORD_LEN, READ_PASSWORD_ID, WRITE_PASSWORD_ID,
};
use crate::protocol::parser::{be_u16_at, byte_at, ensure_len};
use crate::{Error, Result};

/// Password slots of the chip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PasswordType {
    /// Read access to the NDEF file.
    Read,
    /// Write access to the NDEF file.
    Write,
    /// Super-user password guarding the system file.
    I2c,
}

impl PasswordType {
    /// Identifier carried in P1P2 of password-related commands.
    pub fn id(&self) -> u16 {
        match self {
            Self::Read => READ_PASSWORD_ID,
            Self::Write => WRITE_PASSWORD_ID,
            Self::I2c => I2C_PASSWORD_ID,
        }
    }

    /// Inverse of [`PasswordType::id`].
    pub fn from_id(id: u16) -> Result<Self> {
        match id {
            READ_PASSWORD_ID => Ok(Self::Read),
            WRITE_PASSWORD_ID => Ok(Self::Write),
            I2C_PASSWORD_ID => Ok(Self::I2c),
            other => Err(Error::InvalidParameter(format!(
                "unknown password id {:#06x}",
                other
            ))),
        }
    }
}

/// 128-bit chip password - Newtype Pattern
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Password([u8; PASSWORD_LEN]);

impl Password {
    /// Factory default of every password slot.
    pub const DEFAULT: Self = Self([0u8; PASSWORD_LEN]);

    /// Password from its 16 bytes.
    pub const fn from_bytes(bytes: [u8; PASSWORD_LEN]) -> Self {
        Self(bytes)
    }

    /// The 16 password bytes.
    pub fn as_bytes(&self) -> &[u8; PASSWORD_LEN] {
        &self.0
    }
}

impl TryFrom<&[u8]> for Password {
    type Error = Error;

    fn try_from(bytes: &[u8]) -> std::result::Result<Self, Self::Error> {
        if bytes.len() != PASSWORD_LEN {
            return Err(Error::InvalidLength {
                expected: PASSWORD_LEN,
                actual: bytes.len(),
            });
        }
        let mut arr = [0u8; PASSWORD_LEN];
        arr.copy_from_slice(bytes);
        Ok(Self(arr))
    }
}

/// Elementary file identifier (u16)
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash, From, Into)]
#[display(fmt = "{:#06x}", _0)]
pub struct FileId(u16);

impl FileId {
    /// File id `id`.
    pub const fn new(id: u16) -> Self {
        Self(id)
    }

    /// The raw id.
    pub fn as_u16(&self) -> u16 {
        self.0
    }

    /// Big-endian bytes, as sent in SelectFile.
    pub fn to_be_bytes(&self) -> [u8; 2] {
        self.0.to_be_bytes()
    }
}

/// Behaviour of one side (I2C or RF) of the GPO pin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[repr(u8)]
pub enum GpoConfig {
    /// Not driven.
    HighImpedance = 0,
    /// Low while a session is open.
    SessionOpened = 1,
    /// Low while the chip is writing.
    WriteInProgress = 2,
    /// I2C side only: pulses when a response is ready to be read.
    AnswerReady = 3,
    /// Driven by SendInterrupt.
    Interrupt = 4,
    /// Driven by StateControl.
    StateControl = 5,
}

impl GpoConfig {
    /// Nibble value written to the system file.
    pub fn as_u8(&self) -> u8 {
        *self as u8
    }
}

/// Which nibble of the GPO system-file byte a configuration targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GpoTarget {
    /// Low nibble.
    I2c,
    /// High nibble.
    Rf,
}

impl GpoTarget {
    /// Replace this target's nibble of `current` with `config`.
    pub fn merge(&self, current: u8, config: GpoConfig) -> u8 {
        let value = config.as_u8() & 0x0F;
        match self {
            Self::I2c => (current & 0xF0) | value,
            Self::Rf => (current & 0x0F) | (value << 4),
        }
    }
}

/// How a sent command gets its response collected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum CommunicationMode {
    /// The send call reads the response itself.
    #[default]
    Blocking,
    /// The send call returns; the GPO interrupt resumes the engine.
    EventDriven,
}

/// Decoded Capability Container file of an NFC Forum Type 4 tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CapabilityContainer {
    /// CCLEN, size of the CC file.
    pub length: u16,
    /// Mapping version (0x20 for version 2.0).
    pub mapping_version: u8,
    /// MLe, largest ReadBinary the chip answers.
    pub max_read_bytes: u16,
    /// MLc, largest UpdateBinary the chip accepts.
    pub max_write_bytes: u16,
    /// File id of the NDEF file.
    pub ndef_file_id: FileId,
    /// Largest NDEF file, length prefix included.
    pub ndef_file_max_size: u16,
    /// Read access condition byte.
    pub read_access: u8,
    /// Write access condition byte.
    pub write_access: u8,
}

impl CapabilityContainer {
    /// Parse the 15-byte CC file.
    pub fn parse(data: &[u8]) -> Result<Self> {
        ensure_len(data, CC_FILE_LEN)?;
        let cc = Self {
            length: be_u16_at(data, 0)?,
            mapping_version: byte_at(data, 2)?,
            max_read_bytes: be_u16_at(data, 3)?,
            max_write_bytes: be_u16_at(data, 5)?,
            // data[7..9] is the NDEF File Control TLV tag and length
            ndef_file_id: FileId::new(be_u16_at(data, 9)?),
            ndef_file_max_size: be_u16_at(data, 11)?,
            read_access: byte_at(data, 13)?,
            write_access: byte_at(data, 14)?,
        };
        if cc.max_read_bytes == 0 || cc.max_write_bytes == 0 {
            return Err(Error::FrameFormat(
                "capability container advertises a zero transfer size".into(),
            ));
        }
        Ok(cc)
    }
}

impl Default for CapabilityContainer {
    fn default() -> Self {
        Self {
            length: CC_FILE_LEN as u16,
            mapping_version: 0x20,
            max_read_bytes: 0xFF,
            max_write_bytes: 0xFF,
            ndef_file_id: FileId::new(0x0001),
            ndef_file_max_size: 0x2000,
            read_access: 0x00,
            write_access: 0x00,
        }
    }
}
