//! Textual `<COMMAND>` protocol carried inside a frame.
//!
//! The firmware side accepts commands written between angle brackets,
//! e.g. `<LED_ON>`. The brackets are stripped and the command text becomes
//! the frame payload.

use crate::error::FrameError;
use crate::packet::Frame;

const OPEN_MARKER: char = '<';
const CLOSE_MARKER: char = '>';

/// A command understood by the receiving firmware.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    LedOn,
    LedOff,
    /// Anything else, decoded lossily from the payload
    Unknown(String),
}

impl Command {
    pub const LED_ON: &'static [u8] = b"LED_ON";
    pub const LED_OFF: &'static [u8] = b"LED_OFF";

    /// Interpret payload bytes by prefix.
    pub fn parse(payload: &[u8]) -> Self {
        if payload.starts_with(Self::LED_ON) {
            Command::LedOn
        } else if payload.starts_with(Self::LED_OFF) {
            Command::LedOff
        } else {
            Command::Unknown(String::from_utf8_lossy(payload).into_owned())
        }
    }

    /// What the firmware reports after running the command.
    pub fn response(&self) -> &'static str {
        match self {
            Command::LedOn => "LED turned ON",
            Command::LedOff => "LED turned OFF",
            Command::Unknown(_) => "Unknown command",
        }
    }
}

impl std::fmt::Display for Command {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Command::LedOn => write!(f, "LED_ON"),
            Command::LedOff => write!(f, "LED_OFF"),
            Command::Unknown(text) => write!(f, "unknown ({:?})", text),
        }
    }
}

/// True when `text` has at least the two markers, opening and closing it.
pub fn is_text_command(text: &str) -> bool {
    text.len() >= 2 && text.starts_with(OPEN_MARKER) && text.ends_with(CLOSE_MARKER)
}

/// Strip the markers from a `<COMMAND>` string.
pub fn extract_command(text: &str) -> Result<&str, FrameError> {
    if text.len() < 3 {
        return Err(FrameError::Protocol(format!("Command text too short: {:?}", text)));
    }
    if !is_text_command(text) {
        return Err(FrameError::Protocol(format!(
            "Command must be wrapped in {}{}: {:?}",
            OPEN_MARKER, CLOSE_MARKER, text
        )));
    }
    Ok(&text[OPEN_MARKER.len_utf8()..text.len() - CLOSE_MARKER.len_utf8()])
}

impl Frame {
    /// Encode a `<COMMAND>` string, keeping at most 32 bytes of the command.
    pub fn from_text_command(text: &str) -> Result<Self, FrameError> {
        let command = extract_command(text)?;
        Ok(Frame::from_payload(command.as_bytes()))
    }

    /// Interpret the live payload as a firmware command.
    pub fn command(&self) -> Command {
        Command::parse(self.data())
    }
}
