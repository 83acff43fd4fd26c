//! Text rendering of frames for user-facing front ends.

use crate::constants::{FRAME_SIZE, HEX_DUMP_WIDTH};
use crate::packet::{Frame, Validation};
use chrono::NaiveTime;
use std::fmt;

/// Render a single-byte field as `0xXX`.
pub fn format_byte(value: u8) -> String {
    format!("0x{:02X}", value)
}

/// Render the length field as a byte count.
pub fn format_length(length: u8) -> String {
    format!("{} bytes", length)
}

/// Uppercase hex bytes separated by spaces, [`HEX_DUMP_WIDTH`] per line.
pub fn hex_dump(data: &[u8]) -> String {
    data.chunks(HEX_DUMP_WIDTH)
        .map(|line| line.iter().map(|b| format!("{:02X}", b)).collect::<Vec<_>>().join(" "))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn status_line(validation: &Validation) -> String {
    if validation.valid {
        format!("VALID - {}", validation.reason)
    } else {
        format!("INVALID - {}", validation.reason)
    }
}

/// One line of transmission history: `HH:MM:SS - Length: NB - <reason>`.
pub fn history_line(time: NaiveTime, length: u8, validation: &Validation) -> String {
    format!("{} - Length: {}B - {}", time.format("%H:%M:%S"), length, validation.reason)
}

impl Frame {
    /// Hex dump of the live payload.
    pub fn payload_hex(&self) -> String {
        hex_dump(self.data())
    }
}

impl fmt::Display for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== Binary Packet ===")?;
        writeln!(f, "Start Byte: {}", format_byte(self.start_byte))?;
        writeln!(f, "Length:     {}", format_length(self.length))?;
        if self.data().is_empty() {
            writeln!(f, "Payload:    <empty>")?;
        } else {
            writeln!(f, "Payload:")?;
            for line in self.payload_hex().lines() {
                writeln!(f, "  {}", line)?;
            }
        }
        writeln!(f, "Checksum:   {}", format_byte(self.checksum))?;
        writeln!(f, "End Byte:   {}", format_byte(self.end_byte))?;
        write!(f, "Total Size: {} bytes", FRAME_SIZE)
    }
}
