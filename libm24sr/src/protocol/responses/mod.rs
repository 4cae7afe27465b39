// libm24sr/libm24sr/src/protocol/responses/mod.rs

//! Reply layouts and their decoding.

use crate::constants::{DESELECT_RESPONSE_LEN, STATUS_RESPONSE_LEN};
use crate::protocol::checksum::{crc16, residue_is_zero};
use crate::protocol::frame::{check_response, response_data};
use crate::protocol::parser::ensure_len;
use crate::{Error, Result};

/// Shape of the reply a command expects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplyShape {
    /// Nothing is read back; the command completes once written.
    None,
    /// 5-byte status frame: [PCB, SW1, SW2, CRC_L, CRC_H].
    Status,
    /// Status frame, or a WTX S-Block that must be answered first.
    StatusOrWtx,
    /// [PCB, data(n), SW1, SW2, CRC_L, CRC_H].
    Data(usize),
    /// The deselect S-Block echoed back.
    Deselect,
}

impl ReplyShape {
    /// Number of bytes to request from the bus.
    pub fn read_len(&self) -> usize {
        match self {
            Self::None => 0,
            Self::Status | Self::StatusOrWtx => STATUS_RESPONSE_LEN,
            Self::Data(n) => n + STATUS_RESPONSE_LEN,
            Self::Deselect => DESELECT_RESPONSE_LEN,
        }
    }
}

/// Decode a complete reply. Status-only replies yield an empty vector.
pub fn decode_reply(shape: ReplyShape, frame: &[u8]) -> Result<Vec<u8>> {
    match shape {
        ReplyShape::None => Ok(Vec::new()),
        ReplyShape::Status | ReplyShape::StatusOrWtx => {
            check_response(frame)?;
            Ok(Vec::new())
        }
        ReplyShape::Data(n) => response_data(frame, n),
        ReplyShape::Deselect => {
            ensure_len(frame, DESELECT_RESPONSE_LEN)?;
            let frame = &frame[..DESELECT_RESPONSE_LEN];
            if residue_is_zero(frame) {
                Ok(Vec::new())
            } else {
                Err(Error::CrcMismatch {
                    residue: crc16(frame),
                })
            }
        }
    }
}
