// libm24sr/libm24sr/src/protocol/mod.rs

//! The M24SR I2C command protocol: APDUs, I-Block framing, CRC and status words.

pub mod checksum;
pub mod codec;
pub mod commands;
pub mod frame;
pub mod parser;
pub mod responses;
pub mod status;

pub use checksum::{crc16, crc16_bytes, residue_is_zero};
pub use commands::Command;
pub use frame::{Apdu, BlockSequence, IBlock};
pub use responses::ReplyShape;
pub use status::ApduStatus;
