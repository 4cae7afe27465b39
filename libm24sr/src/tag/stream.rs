// libm24sr/libm24sr/src/tag/stream.rs

//! Cursors that split one NDEF file transfer into bus-sized chunks.

use crate::constants::MAX_BYTE_OPERATION_LEN;
use crate::{Error, Result};

/// Per-command chunk size: the tag's advertised limit, never above what a
/// single command can carry.
pub fn chunk_size(advertised: u16) -> usize {
    usize::from(advertised).clamp(1, MAX_BYTE_OPERATION_LEN)
}

fn file_offset(offset: usize) -> Result<u16> {
    u16::try_from(offset).map_err(|_| Error::InvalidLength {
        expected: usize::from(u16::MAX),
        actual: offset,
    })
}

/// Yields consecutive slices of an encoded message with their file offsets.
#[derive(Debug, Clone)]
pub struct ChunkWriter {
    data: Vec<u8>,
    written: usize,
    chunk: usize,
}

impl ChunkWriter {
    /// Writer over `data`, at most `chunk` bytes per step (at least 1).
    pub fn new(data: Vec<u8>, chunk: usize) -> Self {
        Self {
            data,
            written: 0,
            chunk: chunk.max(1),
        }
    }

    /// Bytes to write in total.
    pub fn total(&self) -> usize {
        self.data.len()
    }

    /// Bytes handed out so far.
    pub fn written(&self) -> usize {
        self.written
    }

    /// Next `(offset, bytes)` to write, advancing past them.
    pub fn next_chunk(&mut self) -> Result<Option<(u16, Vec<u8>)>> {
        if self.written >= self.data.len() {
            return Ok(None);
        }
        let end = (self.written + self.chunk).min(self.data.len());
        let offset = file_offset(self.written)?;
        let bytes = self.data[self.written..end].to_vec();
        self.written = end;
        Ok(Some((offset, bytes)))
    }
}

/// Collects `length` bytes starting at `start`, one read at a time.
#[derive(Debug, Clone)]
pub struct ChunkReader {
    start: usize,
    length: usize,
    chunk: usize,
    buffer: Vec<u8>,
}

impl ChunkReader {
    /// Reader for `length` bytes from file offset `start`, at most `chunk`
    /// bytes per read (at least 1).
    pub fn new(start: usize, length: usize, chunk: usize) -> Self {
        Self {
            start,
            length,
            chunk: chunk.max(1),
            buffer: Vec::with_capacity(length),
        }
    }

    /// True once `length` bytes are in.
    pub fn is_complete(&self) -> bool {
        self.buffer.len() >= self.length
    }

    /// Next `(offset, length)` to read, or `None` once complete.
    pub fn next_request(&self) -> Result<Option<(u16, usize)>> {
        if self.is_complete() {
            return Ok(None);
        }
        let done = self.buffer.len();
        let len = self.chunk.min(self.length - done);
        Ok(Some((file_offset(self.start + done)?, len)))
    }

    /// Append the bytes returned by the last read.
    pub fn accept(&mut self, data: &[u8]) -> Result<()> {
        if data.is_empty() {
            return Err(Error::InvalidLength {
                expected: 1,
                actual: 0,
            });
        }
        let room = self.length - self.buffer.len();
        self.buffer.extend_from_slice(&data[..data.len().min(room)]);
        Ok(())
    }

    /// Bytes collected so far.
    pub fn buffer(&self) -> &[u8] {
        &self.buffer
    }

    /// Take the collected bytes.
    pub fn into_buffer(self) -> Vec<u8> {
        self.buffer
    }
}
