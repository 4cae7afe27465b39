// libm24sr/libm24sr/src/ndef/message.rs

//! NDEF message: an ordered list of records behind a length prefix.

use log::{trace, warn};

use crate::constants::NDEF_LENGTH_PREFIX_LEN;
use crate::ndef::header::{RecordHeader, TypeNameFormat};
use crate::ndef::record::{NdefRecord, Record, RecordView};
use crate::ndef::records::EmptyRecord;
use crate::{Error, Result};

/// Largest message the 2-byte length prefix can describe, prefix included.
pub const MAX_MESSAGE_LEN: usize = u16::MAX as usize;

/// Ordered list of records as stored in the tag's NDEF file.
///
/// Wire layout: `[length: u16 BE] [record] [record] ...` where the length
/// excludes the prefix itself. Message-begin is set on the first record,
/// message-end on the last; an empty message is written as one Empty record.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Message {
    records: Vec<Record>,
}

impl Message {
    /// Message with no records.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a record.
    pub fn add(&mut self, record: impl Into<Record>) {
        self.records.push(record.into());
    }

    /// Insert at `index`, shifting later records. `index` past the end appends.
    pub fn insert(&mut self, index: usize, record: impl Into<Record>) {
        let index = index.min(self.records.len());
        self.records.insert(index, record.into());
    }

    /// Remove the record at `index`, if any.
    pub fn remove(&mut self, index: usize) -> Option<Record> {
        (index < self.records.len()).then(|| self.records.remove(index))
    }

    /// Drop every record.
    pub fn clear(&mut self) {
        self.records.clear();
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// True when there are no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Record at `index`.
    pub fn get(&self, index: usize) -> Option<&Record> {
        self.records.get(index)
    }

    /// Mutable record at `index`.
    pub fn get_mut(&mut self, index: usize) -> Option<&mut Record> {
        self.records.get_mut(index)
    }

    /// Records in order.
    pub fn iter(&self) -> std::slice::Iter<'_, Record> {
        self.records.iter()
    }

    /// Records as a slice.
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// Take the records out of the message.
    pub fn into_records(self) -> Vec<Record> {
        self.records
    }

    /// Encoded size, length prefix included.
    pub fn byte_length(&mut self) -> usize {
        let body: usize = if self.records.is_empty() {
            EmptyRecord::new().byte_length()
        } else {
            self.records.iter_mut().map(|r| r.byte_length()).sum()
        };
        NDEF_LENGTH_PREFIX_LEN + body
    }

    fn mark_boundaries(&mut self) {
        let last = self.records.len().saturating_sub(1);
        for (i, record) in self.records.iter_mut().enumerate() {
            let header = record.header_mut();
            header.set_message_begin(i == 0);
            header.set_message_end(i == last);
        }
    }

    /// Append the encoded message to `out`, returning the bytes written.
    pub fn write(&mut self, out: &mut Vec<u8>) -> Result<usize> {
        let total = self.byte_length();
        if total > MAX_MESSAGE_LEN {
            return Err(Error::InvalidLength {
                expected: MAX_MESSAGE_LEN,
                actual: total,
            });
        }
        for record in self.records.iter() {
            record.check()?;
        }
        self.mark_boundaries();
        let start = out.len();
        out.extend_from_slice(&((total - NDEF_LENGTH_PREFIX_LEN) as u16).to_be_bytes());
        if self.records.is_empty() {
            EmptyRecord::new().write(out)?;
        } else {
            for record in self.records.iter_mut() {
                record.write(out)?;
            }
        }
        trace!("encoded NDEF message: {} records, {} bytes", self.len(), total);
        Ok(out.len() - start)
    }

    /// Encode into a new buffer, length prefix included.
    pub fn to_bytes(&mut self) -> Result<Vec<u8>> {
        let mut out = Vec::with_capacity(self.byte_length());
        self.write(&mut out)?;
        Ok(out)
    }

    /// Decode the records in `raw[..length]` (no length prefix).
    ///
    /// Records that no variant recognises come back as `None` so the caller
    /// sees their position; structural damage is an error.
    pub fn parse_records(raw: &[u8], length: usize) -> Result<Vec<Option<Record>>> {
        let raw = raw.get(..length).ok_or(Error::InvalidLength {
            expected: length,
            actual: raw.len(),
        })?;
        let mut records = Vec::new();
        let mut offset = 0;
        while offset < raw.len() {
            let (header, used) = RecordHeader::read(&raw[offset..])?;
            let view = RecordView::new(header, &raw[offset + used..])?;
            let mut record = if header.tnf() == TypeNameFormat::Empty {
                Some(Record::Empty(EmptyRecord::new()))
            } else {
                Record::parse(&view)
            };
            if let Some(record) = record.as_mut() {
                record.header_mut().copy_boundary_flags(&header);
            }
            records.push(record);
            offset += header.record_length();
        }
        Ok(records)
    }

    /// Decode a message, dropping unrecognised records.
    ///
    /// An Empty record on its own decodes to the empty message.
    pub fn parse(raw: &[u8], length: usize) -> Result<Self> {
        let parsed = Self::parse_records(raw, length)?;
        if let [Some(Record::Empty(_))] = parsed.as_slice() {
            return Ok(Self::new());
        }
        let mut records = Vec::with_capacity(parsed.len());
        for (index, record) in parsed.into_iter().enumerate() {
            match record {
                Some(record) => records.push(record),
                None => warn!("skipping unrecognised NDEF record at index {}", index),
            }
        }
        Ok(Self { records })
    }
}

impl FromIterator<Record> for Message {
    fn from_iter<I: IntoIterator<Item = Record>>(iter: I) -> Self {
        Self {
            records: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a Message {
    type Item = &'a Record;
    type IntoIter = std::slice::Iter<'a, Record>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
