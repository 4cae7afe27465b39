// libm24sr/libm24sr/src/protocol/status.rs

//! Chip status words (SW1/SW2) and their mapping to [`Error`].

use derive_more::Display;

use crate::constants::STATUS_SUCCESS;
use crate::{Error, Result};

/// Status words the M24SR reports in its R-APDU trailer.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ApduStatus {
    /// 0x6F00
    #[display(fmt = "generic error")]
    Error,
    /// 0x6280
    #[display(fmt = "file overflow (Le)")]
    FileOverflowLe,
    /// 0x6282
    #[display(fmt = "end of file reached")]
    EndOfFile,
    /// 0x6300
    #[display(fmt = "password required")]
    PasswordRequired,
    /// 0x63Cx, where x is the number of remaining attempts.
    #[display(fmt = "password incorrect ({} retries left)", retries)]
    PasswordIncorrect {
        /// Attempts left before the password is blocked.
        retries: u8,
    },
    /// 0x6500
    #[display(fmt = "rf session killed")]
    RfSessionKilled,
    /// 0x6581
    #[display(fmt = "unsuccessful updating")]
    UnsuccessfulUpdating,
    /// 0x6700
    #[display(fmt = "wrong length")]
    WrongLength,
    /// 0x6981
    #[display(fmt = "command incompatible with file structure")]
    IncompatibleCommand,
    /// 0x6982
    #[display(fmt = "security status not satisfied")]
    SecurityUnsatisfied,
    /// 0x6984
    #[display(fmt = "reference data not usable")]
    ReferenceDataNotUsable,
    /// 0x6A80
    #[display(fmt = "incorrect parameter in data field")]
    IncorrectParameter,
    /// 0x6A82
    #[display(fmt = "file not found")]
    FileNotFound,
    /// 0x6A84
    #[display(fmt = "file overflow (Lc)")]
    FileOverflowLc,
    /// 0x6A86
    #[display(fmt = "incorrect P1 or P2")]
    IncorrectP1OrP2,
    /// 0x6D00
    #[display(fmt = "instruction not supported")]
    InsNotSupported,
    /// 0x6E00
    #[display(fmt = "class not supported")]
    ClassNotSupported,
    /// Any other well-formed word.
    #[display(fmt = "status {:#06x}", _0)]
    Other(u16),
}

impl ApduStatus {
    /// Classify a non-success status word.
    pub fn from_word(word: u16) -> Self {
        match word {
            0x6F00 => Self::Error,
            0x6280 => Self::FileOverflowLe,
            0x6282 => Self::EndOfFile,
            0x6300 => Self::PasswordRequired,
            0x63C0..=0x63CF => Self::PasswordIncorrect {
                retries: (word & 0x000F) as u8,
            },
            0x6500 => Self::RfSessionKilled,
            0x6581 => Self::UnsuccessfulUpdating,
            0x6700 => Self::WrongLength,
            0x6981 => Self::IncompatibleCommand,
            0x6982 => Self::SecurityUnsatisfied,
            0x6984 => Self::ReferenceDataNotUsable,
            0x6A80 => Self::IncorrectParameter,
            0x6A82 => Self::FileNotFound,
            0x6A84 => Self::FileOverflowLc,
            0x6A86 => Self::IncorrectP1OrP2,
            0x6D00 => Self::InsNotSupported,
            0x6E00 => Self::ClassNotSupported,
            other => Self::Other(other),
        }
    }

    /// The raw SW1SW2 word.
    pub fn word(&self) -> u16 {
        match self {
            Self::Error => 0x6F00,
            Self::FileOverflowLe => 0x6280,
            Self::EndOfFile => 0x6282,
            Self::PasswordRequired => 0x6300,
            Self::PasswordIncorrect { retries } => 0x63C0 | u16::from(*retries & 0x0F),
            Self::RfSessionKilled => 0x6500,
            Self::UnsuccessfulUpdating => 0x6581,
            Self::WrongLength => 0x6700,
            Self::IncompatibleCommand => 0x6981,
            Self::SecurityUnsatisfied => 0x6982,
            Self::ReferenceDataNotUsable => 0x6984,
            Self::IncorrectParameter => 0x6A80,
            Self::FileNotFound => 0x6A82,
            Self::FileOverflowLc => 0x6A84,
            Self::IncorrectP1OrP2 => 0x6A86,
            Self::InsNotSupported => 0x6D00,
            Self::ClassNotSupported => 0x6E00,
            Self::Other(word) => *word,
        }
    }
}

/// Whether the high byte is an ISO 7816-4 SW1 value (`0x61..=0x6F` or
/// `0x90..=0x9F`).
pub fn is_well_formed(word: u16) -> bool {
    matches!(word >> 8, 0x61..=0x6F | 0x90..=0x9F)
}

/// Map a status word onto `Result`: `0x9000` is success, any other
/// well-formed word is passed through unchanged as [`Error::Chip`].
///
/// A word whose SW1 lies outside the ISO ranges is a garbled frame, not a
/// chip verdict, and becomes [`Error::FrameFormat`]. This keeps chip words
/// clear of the I/O codes returned by [`Error::status_word`].
pub fn check_status_word(word: u16) -> Result<()> {
    if word == STATUS_SUCCESS {
        Ok(())
    } else if is_well_formed(word) {
        Err(Error::Chip(ApduStatus::from_word(word)))
    } else {
        Err(Error::FrameFormat(format!(
            "malformed status word {:#06x}",
            word
        )))
    }
}
