// libm24sr/libm24sr/src/tag/mod.rs

//! Session handling and chunked NDEF file transfers.

pub mod session;
pub mod stream;

pub use session::{NdefTag, TagEvent};
pub use stream::{ChunkReader, ChunkWriter, chunk_size};
