//! Hexadecimal rendering for frame logging.
//!
//! [`Hex`] formats lazily, so `debug!("{}", Hex(frame))` costs nothing when
//! the log level filters the record out.

use std::fmt;

/// Displays a byte slice as space-separated lowercase hex pairs.
///
/// Example: `Hex(&[0xde, 0xad])` -> `"de ad"`
#[derive(Debug, Clone, Copy)]
pub struct Hex<'a>(pub &'a [u8]);

impl fmt::Display for Hex<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, b) in self.0.iter().enumerate() {
            if i != 0 {
                f.write_str(" ")?;
            }
            write!(f, "{:02x}", b)?;
        }
        Ok(())
    }
}

/// Render a byte slice as a compact lowercase hex string.
pub fn bytes_to_hex(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{:02x}", b)).collect()
}
