// libm24sr/libm24sr/src/protocol/frame.rs

//! APDU model and I-Block/S-Block framing.

use crate::constants::{
    FIELD_CLA, FIELD_CRC, FIELD_DATA, FIELD_INS, FIELD_LC, FIELD_LE, FIELD_P1, FIELD_P2,
    FIELD_PCB, MASK_BLOCK, MASK_S_BLOCK, PCB_DID_FOLLOWING, PCB_I_BLOCK, PCB_S_BLOCK_WTX,
    RESPONSE_DATA_OFFSET, STATUS_OFFSET_FROM_END, STATUS_RESPONSE_LEN,
};
use crate::protocol::checksum::{append_crc, crc16, residue_is_zero};
use crate::protocol::parser::{be_u16_at, byte_at, ensure_len, slice_at};
use crate::protocol::status::check_status_word;
use crate::{Error, Result};

/// Command APDU fields plus the bitmask of fields the I-Block carries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Apdu {
    /// Class byte.
    pub cla: u8,
    /// Instruction byte.
    pub ins: u8,
    /// First parameter byte.
    pub p1: u8,
    /// Second parameter byte.
    pub p2: u8,
    /// Command data; its length is Lc.
    pub data: Vec<u8>,
    /// Expected reply length.
    pub le: u8,
    /// `FIELD_*` bits of the fields to encode.
    pub structure: u16,
}

impl Apdu {
    /// APDU with no data and Le 0; `p1p2` is split big-endian.
    pub fn new(cla: u8, ins: u8, p1p2: u16, structure: u16) -> Self {
        let [p1, p2] = p1p2.to_be_bytes();
        Self {
            cla,
            ins,
            p1,
            p2,
            data: Vec::new(),
            le: 0,
            structure,
        }
    }

    /// Attach command data.
    pub fn with_data(mut self, data: &[u8]) -> Self {
        self.data = data.to_vec();
        self
    }

    /// Set the expected reply length.
    pub fn with_le(mut self, le: u8) -> Self {
        self.le = le;
        self
    }

    fn has(&self, field: u16) -> bool {
        self.structure & field != 0
    }
}

/// Alternating I-Block block number.
///
/// Each chip instance owns one; it toggles before every I-Block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockSequence {
    block: u8,
}

impl Default for BlockSequence {
    fn default() -> Self {
        Self { block: 0x01 }
    }
}

impl BlockSequence {
    /// Sequence whose first I-Block uses block number 0.
    pub fn new() -> Self {
        Self::default()
    }

    /// Toggle and return the block number to use for the next I-Block.
    pub fn advance(&mut self) -> u8 {
        self.block ^= 0x01;
        self.block
    }

    /// Block number of the last I-Block.
    pub fn current(&self) -> u8 {
        self.block
    }
}

/// I-Block frame helper.
/// Format: [PCB] [DID] [CLA] [INS] [P1] [P2] [Lc] [Data(Lc)] [Le] [CRC_L] [CRC_H]
/// with each field present only if selected by the APDU structure bitmask.
pub struct IBlock;

impl IBlock {
    /// Encode an APDU. `device_id` adds the DID byte and flags it in the PCB.
    pub fn encode(apdu: &Apdu, sequence: &mut BlockSequence, device_id: Option<u8>) -> Result<Vec<u8>> {
        if apdu.data.len() > u8::MAX as usize {
            return Err(Error::InvalidLength {
                expected: u8::MAX as usize,
                actual: apdu.data.len(),
            });
        }

        let mut out = Vec::with_capacity(8 + apdu.data.len() + 2);
        if apdu.has(FIELD_PCB) {
            let mut pcb = PCB_I_BLOCK | sequence.advance();
            if device_id.is_some() {
                pcb |= PCB_DID_FOLLOWING;
            }
            out.push(pcb);
            if let Some(did) = device_id {
                out.push(did);
            }
        }
        if apdu.has(FIELD_CLA) {
            out.push(apdu.cla);
        }
        if apdu.has(FIELD_INS) {
            out.push(apdu.ins);
        }
        if apdu.has(FIELD_P1) {
            out.push(apdu.p1);
        }
        if apdu.has(FIELD_P2) {
            out.push(apdu.p2);
        }
        if apdu.has(FIELD_LC) {
            out.push(apdu.data.len() as u8);
        }
        if apdu.has(FIELD_DATA) {
            out.extend_from_slice(&apdu.data);
        }
        if apdu.has(FIELD_LE) {
            out.push(apdu.le);
        }
        if apdu.has(FIELD_CRC) {
            append_crc(&mut out);
        }
        Ok(out)
    }
}

/// True when the response's PCB marks an S-Block (e.g. a WTX request).
pub fn is_s_block(frame: &[u8]) -> bool {
    frame
        .first()
        .is_some_and(|pcb| pcb & MASK_BLOCK == MASK_S_BLOCK)
}

/// Frame-wait-time multiplier requested by a WTX S-Block.
pub fn wtx_request(frame: &[u8]) -> Result<u8> {
    if !residue_is_zero(frame) {
        return Err(Error::CrcMismatch {
            residue: crc16(frame),
        });
    }
    byte_at(frame, 1)
}

/// S-Block answering a WTX request with the same frame-wait-time byte.
pub fn wtx_reply(fwt: u8) -> Vec<u8> {
    let mut out = vec![PCB_S_BLOCK_WTX, fwt];
    append_crc(&mut out);
    out
}

/// Validate a response frame and return its status as a `Result`.
///
/// The CRC is first checked over the whole frame, with the status word
/// located just before the CRC. Chip error replies carry no user data, so a
/// failing residue is re-checked over the 5-byte status layout before the
/// frame is declared corrupt.
pub fn check_response(frame: &[u8]) -> Result<()> {
    ensure_len(frame, STATUS_RESPONSE_LEN)?;
    if residue_is_zero(frame) {
        let word = be_u16_at(frame, frame.len() - STATUS_OFFSET_FROM_END)?;
        return check_status_word(word);
    }
    let short = &frame[..STATUS_RESPONSE_LEN];
    if residue_is_zero(short) {
        let word = be_u16_at(short, 1)?;
        return check_status_word(word);
    }
    Err(Error::CrcMismatch {
        residue: crc16(frame),
    })
}

/// Validate a read-binary response and return the `length` data bytes.
pub fn response_data(frame: &[u8], length: usize) -> Result<Vec<u8>> {
    check_response(frame)?;
    Ok(slice_at(frame, RESPONSE_DATA_OFFSET, length)?.to_vec())
}
