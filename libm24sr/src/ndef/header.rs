// libm24sr/libm24sr/src/ndef/header.rs

//! NDEF record header.

use crate::Result;
use crate::protocol::parser::{be_u32_at, byte_at};

const FLAG_MB: u8 = 0x80;
const FLAG_ME: u8 = 0x40;
const FLAG_CF: u8 = 0x20;
const FLAG_SR: u8 = 0x10;
const FLAG_IL: u8 = 0x08;
const TNF_MASK: u8 = 0x07;

/// Type Name Format of an NDEF record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum TypeNameFormat {
    /// No type, id or payload.
    Empty = 0x00,
    /// NFC Forum well-known type (RTD).
    WellKnown = 0x01,
    /// MIME media type (RFC 2046).
    MimeMedia = 0x02,
    /// Absolute URI (RFC 3986).
    AbsoluteUri = 0x03,
    /// NFC Forum external type.
    External = 0x04,
    /// Unknown type.
    Unknown = 0x05,
    /// Middle or terminating chunk of a chunked record.
    Unchanged = 0x06,
    /// Reserved value 7.
    Reserved = 0x07,
}

impl TypeNameFormat {
    /// Decode the low three bits of a flags byte.
    pub fn from_bits(bits: u8) -> Self {
        match bits & TNF_MASK {
            0x00 => Self::Empty,
            0x01 => Self::WellKnown,
            0x02 => Self::MimeMedia,
            0x03 => Self::AbsoluteUri,
            0x04 => Self::External,
            0x05 => Self::Unknown,
            0x06 => Self::Unchanged,
            _ => Self::Reserved,
        }
    }
}

/// NDEF record header.
///
/// Layout: `[flags] [type length] [payload length: 1 or 4 bytes BE] [id length]?`
///
/// The short-record flag always tracks the payload length: it is set iff the
/// payload fits in one byte. Setting the payload length therefore rewrites
/// SR, so set flags first and the length last.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecordHeader {
    flags: u8,
    type_length: u8,
    payload_length: u32,
    id_length: u8,
}

impl Default for RecordHeader {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordHeader {
    /// Empty short record.
    pub fn new() -> Self {
        Self {
            flags: FLAG_SR,
            type_length: 0,
            payload_length: 0,
            id_length: 0,
        }
    }

    /// Raw flags byte, TNF included.
    pub fn flags(&self) -> u8 {
        self.flags
    }

    fn set_flag(&mut self, flag: u8, on: bool) {
        if on {
            self.flags |= flag;
        } else {
            self.flags &= !flag;
        }
    }

    /// MB: first record of the message.
    pub fn message_begin(&self) -> bool {
        self.flags & FLAG_MB != 0
    }

    /// Set or clear MB.
    pub fn set_message_begin(&mut self, on: bool) {
        self.set_flag(FLAG_MB, on);
    }

    /// ME: last record of the message.
    pub fn message_end(&self) -> bool {
        self.flags & FLAG_ME != 0
    }

    /// Set or clear ME.
    pub fn set_message_end(&mut self, on: bool) {
        self.set_flag(FLAG_ME, on);
    }

    /// CF: first or middle chunk of a chunked payload.
    pub fn chunk(&self) -> bool {
        self.flags & FLAG_CF != 0
    }

    /// Set or clear CF.
    pub fn set_chunk(&mut self, on: bool) {
        self.set_flag(FLAG_CF, on);
    }

    /// Copy message-begin, message-end and chunk from `wire`, leaving the
    /// other fields alone.
    pub fn copy_boundary_flags(&mut self, wire: &RecordHeader) {
        let mask = FLAG_MB | FLAG_ME | FLAG_CF;
        self.flags = (self.flags & !mask) | (wire.flags & mask);
    }

    /// SR: payload length is one byte.
    pub fn short_record(&self) -> bool {
        self.flags & FLAG_SR != 0
    }

    /// IL: an id length byte is present.
    pub fn id_length_present(&self) -> bool {
        self.flags & FLAG_IL != 0
    }

    /// Type Name Format.
    pub fn tnf(&self) -> TypeNameFormat {
        TypeNameFormat::from_bits(self.flags)
    }

    /// Replace the TNF bits.
    pub fn set_tnf(&mut self, tnf: TypeNameFormat) {
        self.flags = (self.flags & !TNF_MASK) | (tnf as u8);
    }

    /// Length of the type field.
    pub fn type_length(&self) -> u8 {
        self.type_length
    }

    /// Set the length of the type field.
    pub fn set_type_length(&mut self, len: u8) {
        self.type_length = len;
    }

    /// Length of the payload.
    pub fn payload_length(&self) -> u32 {
        self.payload_length
    }

    /// Set the payload length and recompute the short-record flag.
    pub fn set_payload_length(&mut self, len: u32) {
        self.payload_length = len;
        self.set_flag(FLAG_SR, len <= u8::MAX as u32);
    }

    /// Length of the id field; meaningful only when IL is set.
    pub fn id_length(&self) -> u8 {
        self.id_length
    }

    /// Set the id length; a non-zero length sets the IL flag.
    pub fn set_id_length(&mut self, len: u8) {
        self.id_length = len;
        self.set_flag(FLAG_IL, len > 0);
    }

    /// Encoded size of the header alone.
    pub fn encoded_len(&self) -> usize {
        let base = if self.short_record() { 3 } else { 6 };
        base + usize::from(self.id_length_present())
    }

    /// Size of the whole record: header, type, id and payload.
    pub fn record_length(&self) -> usize {
        let id = if self.id_length_present() {
            self.id_length as usize
        } else {
            0
        };
        self.encoded_len() + self.type_length as usize + id + self.payload_length as usize
    }

    /// Append the encoded header to `out`, returning the bytes written.
    pub fn write(&self, out: &mut Vec<u8>) -> usize {
        let start = out.len();
        out.push(self.flags);
        out.push(self.type_length);
        if self.short_record() {
            out.push(self.payload_length as u8);
        } else {
            out.extend_from_slice(&self.payload_length.to_be_bytes());
        }
        if self.id_length_present() {
            out.push(self.id_length);
        }
        out.len() - start
    }

    /// Decode a header, returning it together with the bytes consumed.
    pub fn read(data: &[u8]) -> Result<(Self, usize)> {
        let flags = byte_at(data, 0)?;
        let type_length = byte_at(data, 1)?;
        let mut offset = 2;
        let payload_length = if flags & FLAG_SR != 0 {
            offset += 1;
            u32::from(byte_at(data, 2)?)
        } else {
            offset += 4;
            be_u32_at(data, 2)?
        };
        let id_length = if flags & FLAG_IL != 0 {
            let len = byte_at(data, offset)?;
            offset += 1;
            len
        } else {
            0
        };
        Ok((
            Self {
                flags,
                type_length,
                payload_length,
                id_length,
            },
            offset,
        ))
    }
}
