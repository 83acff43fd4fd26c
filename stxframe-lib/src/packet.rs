use crate::constants::{END_BYTE, FRAME_SIZE, MAX_PAYLOAD, START_BYTE};
use crate::error::{FrameError, FrameValidationError};
use bytes::Bytes;
use tracing::debug;
use zerocopy::{FromBytes, Immutable, IntoBytes, KnownLayout, Unaligned};

/// On-wire layout of a frame.
///
/// Every field is a single byte (or a byte array), so there is no
/// endianness to care about. The trailing `reserved` byte pads the frame
/// to [`FRAME_SIZE`] and is always written as zero.
#[derive(Debug, Clone, Copy, FromBytes, IntoBytes, KnownLayout, Immutable, Unaligned)]
#[repr(C)]
pub struct FrameRaw {
    pub start_byte: u8,
    pub length: u8,
    pub payload: [u8; MAX_PAYLOAD],
    pub checksum: u8,
    pub end_byte: u8,
    pub reserved: u8,
}

const _: () = assert!(size_of::<FrameRaw>() == FRAME_SIZE);

/// A single STX/ETX framed packet with a fixed 32-byte payload.
///
/// Fields are public so a frame can be mutated in place, which is how
/// corruption is simulated. Nothing keeps `checksum` in sync after such a
/// mutation; call [`Frame::validate`] to find out whether the frame still
/// holds together.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Frame {
    pub start_byte: u8,
    pub length: u8,
    pub payload: [u8; MAX_PAYLOAD],
    pub checksum: u8,
    pub end_byte: u8,
}

/// Outcome of [`Frame::validate`]: a flag plus the reason text shown to users.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Validation {
    pub valid: bool,
    pub reason: String,
    /// The typed failure, `None` when the frame is valid
    pub error: Option<FrameValidationError>,
}

impl Validation {
    pub const VALID_REASON: &'static str = "valid packet";
}

impl From<Result<(), FrameValidationError>> for Validation {
    fn from(result: Result<(), FrameValidationError>) -> Self {
        match result {
            Ok(()) => Validation {
                valid: true,
                reason: Self::VALID_REASON.to_string(),
                error: None,
            },
            Err(e) => Validation {
                valid: false,
                reason: e.to_string(),
                error: Some(e),
            },
        }
    }
}

impl Frame {
    /// Encode text into a frame.
    ///
    /// The text is taken as UTF-8 bytes and silently truncated to
    /// [`MAX_PAYLOAD`] bytes, which may cut a multi-byte character in half.
    pub fn encode(message: &str) -> Self {
        Self::from_payload(message.as_bytes())
    }

    /// Build a frame around raw payload bytes, truncating to [`MAX_PAYLOAD`].
    pub fn from_payload(data: &[u8]) -> Self {
        let length = data.len().min(MAX_PAYLOAD);
        if length < data.len() {
            debug!("Truncating {} byte payload to {} bytes", data.len(), length);
        }

        let mut payload = [0u8; MAX_PAYLOAD];
        payload[..length].copy_from_slice(&data[..length]);

        let mut frame = Frame {
            start_byte: START_BYTE,
            length: length as u8,
            payload,
            checksum: 0,
            end_byte: END_BYTE,
        };
        frame.checksum = frame.calculate_checksum();
        frame
    }

    /// The payload bytes covered by `length`, clamped to the payload capacity.
    pub fn data(&self) -> &[u8] {
        &self.payload[..(self.length as usize).min(MAX_PAYLOAD)]
    }

    /// Additive 8-bit checksum over start byte, length, live payload and end byte.
    ///
    /// Padding beyond `length` never contributes, whatever its contents.
    pub fn calculate_checksum(&self) -> u8 {
        let checksum = self
            .data()
            .iter()
            .fold(self.start_byte.wrapping_add(self.length), |acc, b| acc.wrapping_add(*b))
            .wrapping_add(self.end_byte);
        debug!("Checksum over {} payload bytes: {:#04X}", self.data().len(), checksum);
        checksum
    }

    /// Typed validation, short-circuiting on the first failing check.
    pub fn check(&self) -> Result<(), FrameValidationError> {
        if self.start_byte != START_BYTE {
            return Err(FrameValidationError::InvalidStartByte);
        }
        if self.end_byte != END_BYTE {
            return Err(FrameValidationError::InvalidEndByte);
        }
        if self.length as usize > MAX_PAYLOAD {
            return Err(FrameValidationError::LengthExceeded);
        }
        let expected = self.calculate_checksum();
        if self.checksum != expected {
            return Err(FrameValidationError::ChecksumMismatch {
                expected,
                actual: self.checksum,
            });
        }
        Ok(())
    }

    /// Validate the frame, reporting the result as a flag and a reason.
    pub fn validate(&self) -> Validation {
        Validation::from(self.check())
    }

    pub fn is_valid(&self) -> bool {
        self.check().is_ok()
    }

    /// Serialize to the fixed 37-byte wire layout.
    pub fn to_wire_bytes(&self) -> [u8; FRAME_SIZE] {
        let raw = FrameRaw::from(*self);
        let mut out = [0u8; FRAME_SIZE];
        out.copy_from_slice(raw.as_bytes());
        out
    }

    /// Parse the fixed wire layout positionally.
    ///
    /// Only the size is checked here; sentinels and checksum are left to
    /// [`Frame::validate`] so a damaged frame can still be inspected.
    pub fn from_wire_bytes(bytes: &[u8]) -> Result<Self, FrameError> {
        let raw = FrameRaw::read_from_bytes(bytes).map_err(|_| FrameError::InvalidLength {
            expected: FRAME_SIZE,
            actual: bytes.len(),
        })?;
        Ok(Frame::from(raw))
    }
}

impl Default for Frame {
    fn default() -> Self {
        Frame::encode("")
    }
}

impl From<FrameRaw> for Frame {
    fn from(raw: FrameRaw) -> Self {
        Frame {
            start_byte: raw.start_byte,
            length: raw.length,
            payload: raw.payload,
            checksum: raw.checksum,
            end_byte: raw.end_byte,
        }
    }
}

impl From<Frame> for FrameRaw {
    fn from(frame: Frame) -> Self {
        FrameRaw {
            start_byte: frame.start_byte,
            length: frame.length,
            payload: frame.payload,
            checksum: frame.checksum,
            end_byte: frame.end_byte,
            reserved: 0,
        }
    }
}

impl From<Frame> for Bytes {
    fn from(frame: Frame) -> Self {
        Bytes::copy_from_slice(&frame.to_wire_bytes())
    }
}

impl TryFrom<&[u8]> for Frame {
    type Error = FrameError;

    fn try_from(bytes: &[u8]) -> Result<Self, Self::Error> {
        Frame::from_wire_bytes(bytes)
    }
}

impl TryFrom<Bytes> for Frame {
    type Error = FrameError;

    fn try_from(bytes: Bytes) -> Result<Self, Self::Error> {
        Frame::from_wire_bytes(bytes.as_ref())
    }
}
