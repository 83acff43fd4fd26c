use std::io;
use thiserror::Error;

/// The primary error type for the `stxframe` library.
#[derive(Error, Debug)]
pub enum FrameError {
    #[error("Framing error: expected exactly {expected} bytes, got {actual}")]
    InvalidLength { expected: usize, actual: usize },

    #[error("Protocol error: {0}")]
    Protocol(String),

    #[error("Packet rejected: {0}")]
    Validation(FrameValidationError),

    // The wrapped error is the source; callers print the chain with `{:#}`.
    #[error("I/O error")]
    Io(#[from] io::Error),

    #[error("JSON error")]
    Json(#[from] serde_json::Error),

    #[error("A transmission is already in progress")]
    TransmissionActive,
}

impl From<FrameValidationError> for FrameError {
    fn from(e: FrameValidationError) -> Self {
        FrameError::Validation(e)
    }
}

/// Reasons a frame fails validation.
///
/// The `Display` output of each variant is the human-readable reason
/// reported by [`Frame::validate`](crate::packet::Frame::validate).
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameValidationError {
    #[error("invalid start byte")]
    InvalidStartByte,

    #[error("invalid end byte")]
    InvalidEndByte,

    #[error("payload length exceeds maximum")]
    LengthExceeded,

    #[error("checksum mismatch (expected: {expected:02X}, got: {actual:02X})")]
    ChecksumMismatch { expected: u8, actual: u8 },
}
