// libm24sr/libm24sr/src/protocol/commands/binary.rs

//! ReadBinary, ExtendedReadBinary and UpdateBinary.

use crate::constants::{
    CLA_DEFAULT, CMDSTRUCT_READ_BINARY, CMDSTRUCT_UPDATE_BINARY, INS_READ_BINARY,
    INS_UPDATE_BINARY, MAX_BYTE_OPERATION_LEN,
};
use crate::protocol::frame::Apdu;
use crate::{Error, Result};

/// Read `length` bytes at `offset` of the selected file. The offset travels
/// in P1P2 and the length in Le.
pub fn encode_read_binary(cla: u8, offset: u16, length: u8) -> Apdu {
    Apdu::new(cla, INS_READ_BINARY, offset, CMDSTRUCT_READ_BINARY).with_le(length)
}

/// Write `data` at `offset` of the selected file. More than 246 bytes do not
/// fit one command and are rejected.
pub fn encode_update_binary(offset: u16, data: &[u8]) -> Result<Apdu> {
    if data.len() > MAX_BYTE_OPERATION_LEN {
        return Err(Error::InvalidLength {
            expected: MAX_BYTE_OPERATION_LEN,
            actual: data.len(),
        });
    }
    Ok(Apdu::new(CLA_DEFAULT, INS_UPDATE_BINARY, offset, CMDSTRUCT_UPDATE_BINARY).with_data(data))
}
