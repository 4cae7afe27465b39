// libm24sr/libm24sr/src/tag/session.rs

//! `NdefTag`: sessions and whole-message transfers.

use log::{debug, trace};

use crate::constants::NDEF_LENGTH_PREFIX_LEN;
use crate::device::{Event, Initialized, M24sr, Operation, Outcome};
use crate::ndef::Message;
use crate::protocol::parser::be_u16_at;
use crate::tag::stream::{ChunkReader, ChunkWriter, chunk_size};
use crate::types::{CapabilityContainer, CommunicationMode};
use crate::{Error, Result};

/// What a tag-level call reports once it has finished.
#[derive(Debug, Clone, PartialEq)]
pub enum TagEvent {
    /// `open_session` finished.
    SessionOpened(Result<()>),
    /// `close_session` finished.
    SessionClosed(Result<()>),
    /// `write` finished.
    MessageWritten {
        /// Encoded size, length prefix included.
        length: usize,
        /// Why the write failed, if it did.
        result: Result<()>,
    },
    /// `read` finished with the decoded message.
    MessageRead(Result<Message>),
    /// A device event that did not belong to any tag transfer.
    Device(Event),
}

/// Tag transfer in flight.
#[derive(Debug)]
enum Transfer {
    Opening,
    Closing,
    Writing(ChunkWriter),
    ReadingLength,
    Reading(ChunkReader),
}

enum Flow {
    Done(TagEvent),
    Continue(Option<Event>),
}

/// NDEF tag on top of the chip engine.
///
/// Reading and writing a message turn into chunked read/update binary
/// commands on the NDEF file selected when the session opened. The same
/// blocking/event-driven rule as the engine applies: calls return `None`
/// while waiting, and [`NdefTag::manage_event`] carries the transfer on.
pub struct NdefTag {
    device: M24sr<Initialized>,
    open: bool,
    cc: Option<CapabilityContainer>,
    transfer: Option<Transfer>,
}

impl NdefTag {
    /// Tag with no session open.
    pub fn new(device: M24sr<Initialized>) -> Self {
        Self {
            device,
            open: false,
            cc: None,
            transfer: None,
        }
    }

    /// The engine underneath.
    pub fn device(&self) -> &M24sr<Initialized> {
        &self.device
    }

    /// Direct access to the engine, e.g. to change passwords between
    /// sessions. Events it produces surface as [`TagEvent::Device`] through
    /// [`NdefTag::manage_event`].
    pub fn device_mut(&mut self) -> &mut M24sr<Initialized> {
        &mut self.device
    }

    /// Give the engine back.
    pub fn into_device(self) -> M24sr<Initialized> {
        self.device
    }

    /// True between a successful open and the next close.
    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Capability container read when the session opened.
    pub fn capability_container(&self) -> Option<&CapabilityContainer> {
        self.cc.as_ref()
    }

    /// Open the NDEF session; `force` takes it from the RF side.
    pub fn open_session(&mut self, force: bool) -> Option<TagEvent> {
        if self.open {
            return Some(TagEvent::SessionOpened(Ok(())));
        }
        self.transfer = Some(Transfer::Opening);
        let event = self.device.open_session(force);
        self.drive(event)
    }

    /// Deselect, releasing the session.
    pub fn close_session(&mut self) -> Option<TagEvent> {
        self.transfer = Some(Transfer::Closing);
        let event = self.device.deselect();
        self.drive(event)
    }

    /// Encode `message` and write it from offset 0, length prefix first.
    pub fn write(&mut self, message: &mut Message) -> Option<TagEvent> {
        let bytes = match message.to_bytes() {
            Ok(bytes) => bytes,
            Err(e) => {
                return Some(TagEvent::MessageWritten {
                    length: 0,
                    result: Err(e),
                });
            }
        };
        let Some(cc) = self.session() else {
            return Some(TagEvent::MessageWritten {
                length: bytes.len(),
                result: Err(Error::SessionClosed),
            });
        };
        debug!("writing NDEF message: {} bytes", bytes.len());
        let writer = ChunkWriter::new(bytes, chunk_size(cc.max_write_bytes));
        match self.write_next(writer) {
            Flow::Done(done) => Some(done),
            Flow::Continue(event) => self.drive(event),
        }
    }

    /// Read the length prefix, then the message it announces.
    pub fn read(&mut self) -> Option<TagEvent> {
        if self.session().is_none() {
            return Some(TagEvent::MessageRead(Err(Error::SessionClosed)));
        }
        self.transfer = Some(Transfer::ReadingLength);
        let event = self.device.read_binary(0, NDEF_LENGTH_PREFIX_LEN);
        self.drive(event)
    }

    /// Re-entry point after the GPO line signals that a reply is ready.
    pub fn manage_event(&mut self) -> Option<TagEvent> {
        let event = self.device.manage_event();
        self.drive(event)
    }

    fn session(&self) -> Option<CapabilityContainer> {
        if self.open { self.cc } else { None }
    }

    fn write_next(&mut self, mut writer: ChunkWriter) -> Flow {
        match writer.next_chunk() {
            Ok(Some((offset, bytes))) => {
                trace!("update binary at {} ({} bytes)", offset, bytes.len());
                self.transfer = Some(Transfer::Writing(writer));
                Flow::Continue(self.device.update_binary(offset, &bytes))
            }
            Ok(None) => Flow::Done(TagEvent::MessageWritten {
                length: writer.total(),
                result: Ok(()),
            }),
            Err(e) => Flow::Done(TagEvent::MessageWritten {
                length: writer.total(),
                result: Err(e),
            }),
        }
    }

    fn read_next(&mut self, reader: ChunkReader) -> Flow {
        match reader.next_request() {
            Ok(Some((offset, length))) => {
                trace!("read binary at {} ({} bytes)", offset, length);
                self.transfer = Some(Transfer::Reading(reader));
                Flow::Continue(self.device.read_binary(offset, length))
            }
            Ok(None) => {
                let buffer = reader.into_buffer();
                Flow::Done(TagEvent::MessageRead(Message::parse(&buffer, buffer.len())))
            }
            Err(e) => Flow::Done(TagEvent::MessageRead(Err(e))),
        }
    }

    /// Feed device events into the transfer in flight until it finishes or
    /// has to wait.
    fn drive(&mut self, mut event: Option<Event>) -> Option<TagEvent> {
        loop {
            match self.step(event?) {
                Flow::Done(done) => return Some(done),
                Flow::Continue(next) => event = next,
            }
        }
    }

    fn step(&mut self, event: Event) -> Flow {
        let Some(transfer) = self.transfer.take() else {
            return Flow::Done(TagEvent::Device(event));
        };
        match (transfer, event) {
            (Transfer::Opening, Event::Operation { result, .. }) => {
                let result = result.and_then(|outcome| match outcome {
                    Outcome::SessionOpened(cc) => Ok(cc),
                    other => Err(Error::FrameFormat(format!(
                        "open session ended with {:?}",
                        other
                    ))),
                });
                Flow::Done(TagEvent::SessionOpened(result.map(|cc| {
                    self.cc = Some(cc);
                    self.open = true;
                })))
            }
            (Transfer::Closing, Event::Command(done)) => {
                if done.result.is_ok() {
                    self.open = false;
                    self.cc = None;
                }
                Flow::Done(TagEvent::SessionClosed(done.result.map(|_| ())))
            }
            (Transfer::Writing(writer), Event::Command(done)) => match done.result {
                Ok(_) => self.write_next(writer),
                Err(e) => Flow::Done(TagEvent::MessageWritten {
                    length: writer.total(),
                    result: Err(e),
                }),
            },
            (Transfer::ReadingLength, Event::Command(done)) => {
                match done.result.and_then(|data| be_u16_at(&data, 0)) {
                    Ok(0) => Flow::Done(TagEvent::MessageRead(Ok(Message::new()))),
                    Ok(length) => {
                        debug!("reading NDEF message: {} bytes", length);
                        let chunk = self.cc.map_or(1, |cc| chunk_size(cc.max_read_bytes));
                        self.read_next(ChunkReader::new(
                            NDEF_LENGTH_PREFIX_LEN,
                            usize::from(length),
                            chunk,
                        ))
                    }
                    Err(e) => Flow::Done(TagEvent::MessageRead(Err(e))),
                }
            }
            (Transfer::Reading(mut reader), Event::Command(done)) => {
                match done.result.and_then(|data| reader.accept(&data)) {
                    Ok(()) => self.read_next(reader),
                    Err(e) => Flow::Done(TagEvent::MessageRead(Err(e))),
                }
            }
            (_, event) => Flow::Done(TagEvent::Device(event)),
        }
    }

    /// Run a compound engine operation to completion, e.g. to lift a write
    /// lock before the session is opened.
    pub fn perform(&mut self, operation: Operation) -> Result<Outcome> {
        self.device.perform(operation)
    }

    /// Write `message` and wait for it regardless of the mode.
    pub fn write_blocking(&mut self, message: &mut Message) -> Result<usize> {
        let previous = self.blocking();
        let event = self.write(message);
        self.device.set_mode(previous);
        match event {
            Some(TagEvent::MessageWritten { length, result }) => result.map(|()| length),
            other => Err(unexpected(other)),
        }
    }

    /// Read the stored message and wait for it regardless of the mode.
    pub fn read_blocking(&mut self) -> Result<Message> {
        let previous = self.blocking();
        let event = self.read();
        self.device.set_mode(previous);
        match event {
            Some(TagEvent::MessageRead(result)) => result,
            other => Err(unexpected(other)),
        }
    }

    fn blocking(&mut self) -> CommunicationMode {
        let previous = self.device.mode();
        self.device.set_mode(CommunicationMode::Blocking);
        previous
    }
}

fn unexpected(event: Option<TagEvent>) -> Error {
    Error::UnsupportedOperation(format!("tag transfer ended with {:?}", event))
}
