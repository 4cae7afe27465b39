// libm24sr/libm24sr/src/protocol/codec.rs

//! Encode commands to frames and decode the replies.

use crate::Result;

use super::commands::Command;
use super::frame::{BlockSequence, IBlock};
use super::responses::decode_reply;

/// Encode a Command into its wire frame, advancing the block sequence for
/// I-Block commands.
pub fn encode_command_frame(
    cmd: &Command,
    sequence: &mut BlockSequence,
    device_id: Option<u8>,
) -> Result<Vec<u8>> {
    if let Some(raw) = cmd.raw_frame() {
        return Ok(raw);
    }
    match cmd.apdu()? {
        Some(apdu) => IBlock::encode(&apdu, sequence, device_id),
        None => Ok(Vec::new()),
    }
}

/// Decode the reply to `cmd`, returning any user data it carries.
pub fn decode_response_frame(cmd: &Command, frame: &[u8]) -> Result<Vec<u8>> {
    decode_reply(cmd.reply_shape(), frame)
}
