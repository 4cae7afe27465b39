// libm24sr/libm24sr/src/error.rs

//! Crate error type.

use thiserror::Error;

use crate::protocol::status::ApduStatus;

/// Common error type.
///
/// Together with `Ok(..)` this forms a single status space: chip-reported
/// APDU words, frame-integrity failures and bus failures all surface here so a
/// caller can match on one type, or on [`Error::status_word`] numerically.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The chip answered with a non-success status word.
    #[error("chip status: {0}")]
    Chip(ApduStatus),

    /// The bus did not accept a write or produce a read within the retry bound.
    #[error("bus timeout after {attempts} attempts")]
    BusTimeout {
        /// Attempts made before giving up.
        attempts: u32,
    },

    /// The chip did not acknowledge its address.
    #[error("bus transfer not acknowledged")]
    NoAcknowledge,

    /// A reply failed the CRC check.
    #[error("crc mismatch: residue {residue:#06x}")]
    CrcMismatch {
        /// CRC computed over the whole frame; zero for an intact one.
        residue: u16,
    },

    /// An argument is out of range for the chip.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// A buffer or field does not fit its length limit.
    #[error("invalid length: expected {expected}, got {actual}")]
    InvalidLength {
        /// Limit or exact size required.
        expected: usize,
        /// Size found.
        actual: usize,
    },

    /// Bytes that do not follow the expected layout.
    #[error("frame format error: {0}")]
    FrameFormat(String),

    /// Tag transfer attempted without an open session.
    #[error("tag session is not open")]
    SessionClosed,

    /// Not possible in the current state.
    #[error("unsupported operation: {0}")]
    UnsupportedOperation(String),
}

impl Error {
    /// Numeric status in the chip's status space.
    ///
    /// Chip errors yield their APDU word; I/O errors yield codes below 0x0100.
    /// Replies whose SW1 is outside the ISO 7816 ranges are rejected as
    /// [`Error::FrameFormat`], so a chip word decoded from a frame never
    /// lands in the I/O range.
    pub fn status_word(&self) -> u16 {
        match self {
            Self::Chip(status) => status.word(),
            Self::BusTimeout { .. } => 0x0011,
            Self::CrcMismatch { .. } => 0x0012,
            Self::NoAcknowledge => 0x0013,
            Self::InvalidParameter(_) => 0x0014,
            Self::InvalidLength { .. } | Self::FrameFormat(_) => 0x0014,
            Self::SessionClosed | Self::UnsupportedOperation(_) => 0x0015,
        }
    }

    /// True for failures raised below the APDU layer (bus, CRC, parameters).
    pub fn is_io(&self) -> bool {
        !matches!(self, Self::Chip(_))
    }
}

/// Result alias using [`Error`].
pub type Result<T> = std::result::Result<T, Error>;
