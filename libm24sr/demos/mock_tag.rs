// Writes and reads back an NDEF message over a scripted mock bus.
//
// Usage:
//   RUST_LOG=debug cargo run -p libm24sr --example mock_tag

use libm24sr::ndef::{Message, TextRecord, UriPrefix, UriRecord};
use libm24sr::test_support::{data_reply, initialized_mock_device, open_session_replies, status_reply};
use libm24sr::{NdefTag, TagEvent, bytes_to_hex};

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let (bus, device) = initialized_mock_device()?;
    for reply in open_session_replies(0x40) {
        bus.push_response(reply);
    }
    let mut tag = NdefTag::new(device);
    match tag.open_session(false) {
        Some(TagEvent::SessionOpened(Ok(()))) => println!("session open"),
        other => anyhow::bail!("open session: {:?}", other),
    }

    let mut message = Message::new();
    message.add(TextRecord::new("hello from the mock bus"));
    message.add(UriRecord::new(UriPrefix::Https, "https://example.com"));
    let bytes = message.to_bytes()?;
    println!("encoded {} bytes: {}", bytes.len(), bytes_to_hex(&bytes));

    for _ in bytes.chunks(0x40) {
        bus.push_response(status_reply(0x02, 0x9000));
    }
    let written = tag.write_blocking(&mut message)?;
    println!("wrote {} bytes in {} frames", written, bus.sent().len());

    bus.push_response(data_reply(0x02, &bytes[..2]));
    for chunk in bytes[2..].chunks(0x40) {
        bus.push_response(data_reply(0x03, chunk));
    }
    let back = tag.read_blocking()?;
    for record in back.iter() {
        println!("read {:?}", record);
    }
    anyhow::ensure!(back == message, "read back a different message");
    Ok(())
}
