//! Common test utilities and shared imports

// Allow unused imports and dead code since this is a shared module
// used across multiple test files - not all items are used in every test file
#[allow(unused_imports)]
pub use bytes::Bytes;
#[allow(unused_imports)]
pub use hex;
#[allow(unused_imports)]
pub use stxframe_lib::constants::{END_BYTE, FRAME_SIZE, MAX_PAYLOAD, START_BYTE};
#[allow(unused_imports)]
pub use stxframe_lib::error::{FrameError, FrameValidationError};
#[allow(unused_imports)]
pub use stxframe_lib::packet::{Frame, Validation};
#[allow(unused_imports)]
pub use stxframe_lib::corrupt::Corruption;

/// Route library logs through the test harness; safe to call from every test
#[allow(dead_code)]
pub fn init_logging() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_test_writer()
        .try_init();
}

/// Decode hex string to bytes for testing
#[allow(dead_code)]
pub fn hex_to_bytes(hex_data: &str) -> Bytes {
    Bytes::from(hex::decode(hex_data).expect("Failed to decode hex"))
}

/// Wire bytes of `Frame::encode("Hello Arduino!")`
#[allow(dead_code)]
pub const HELLO_ARDUINO_WIRE: &str = concat!(
    "020e",
    "48656c6c6f2041726475696e6f21",
    "000000000000000000000000000000000000",
    "1a",
    "03",
    "00"
);

/// Expected checksum, computed the slow way
#[allow(dead_code)]
pub fn reference_checksum(start: u8, data: &[u8], end: u8) -> u8 {
    let sum: u32 = start as u32 + data.len() as u32 + data.iter().map(|&b| b as u32).sum::<u32>() + end as u32;
    (sum % 256) as u8
}
