// libm24sr/libm24sr/src/protocol/checksum.rs

//! CRC_A (ISO 14443-3) over command and response frames.

/// Initial residue of the ISO/IEC 13239 (CRC_A) checksum.
pub const CRC_SEED: u16 = 0x6363;

/// Fold one byte into a running CRC residue.
pub fn update_crc(byte: u8, crc: &mut u16) {
    let mut ch = byte ^ (*crc & 0x00FF) as u8;
    ch ^= ch << 4;
    let ch = u16::from(ch);
    *crc = (*crc >> 8) ^ (ch << 8) ^ (ch << 3) ^ (ch >> 4);
}

/// CRC16 of a whole buffer, starting from [`CRC_SEED`].
pub fn crc16(data: &[u8]) -> u16 {
    let mut crc = CRC_SEED;
    for &b in data {
        update_crc(b, &mut crc);
    }
    crc
}

/// CRC16 in wire order (LSB first), as appended to chip frames.
pub fn crc16_bytes(data: &[u8]) -> [u8; 2] {
    crc16(data).to_le_bytes()
}

/// Append the CRC of `frame` to itself.
pub fn append_crc(frame: &mut Vec<u8>) {
    let crc = crc16_bytes(frame);
    frame.extend_from_slice(&crc);
}

/// A frame whose trailing two bytes are its own CRC folds to zero.
pub fn residue_is_zero(frame: &[u8]) -> bool {
    crc16(frame) == 0
}
