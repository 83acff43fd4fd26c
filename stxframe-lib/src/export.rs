use crate::constants::MAX_PAYLOAD;
use crate::error::FrameError;
use crate::packet::Frame;
use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

/// JSON snapshot of a frame. Only the live payload bytes are stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PacketExport {
    pub start_byte: u8,
    pub length: u8,
    pub payload: Vec<u8>,
    pub checksum: u8,
    pub end_byte: u8,
    pub timestamp: DateTime<Local>,
}

impl PacketExport {
    pub fn new(frame: &Frame, timestamp: DateTime<Local>) -> Self {
        Self {
            start_byte: frame.start_byte,
            length: frame.length,
            payload: frame.data().to_vec(),
            checksum: frame.checksum,
            end_byte: frame.end_byte,
            timestamp,
        }
    }

    /// Rebuild the frame, zero-padding the payload back to full capacity.
    ///
    /// Fields are restored verbatim, so a corrupted frame stays corrupted.
    pub fn to_frame(&self) -> Result<Frame, FrameError> {
        // The snapshot stores exactly the live bytes, so the counts must agree.
        let expected = (self.length as usize).min(MAX_PAYLOAD);
        if self.payload.len() != expected {
            return Err(FrameError::InvalidLength {
                expected,
                actual: self.payload.len(),
            });
        }
        let mut payload = [0u8; MAX_PAYLOAD];
        payload[..self.payload.len()].copy_from_slice(&self.payload);
        Ok(Frame {
            start_byte: self.start_byte,
            length: self.length,
            payload,
            checksum: self.checksum,
            end_byte: self.end_byte,
        })
    }
}

/// `packet_<YYYYMMDD>_<HHMMSS>.json` for the given export time.
pub fn export_filename(time: &DateTime<Local>) -> String {
    format!("packet_{}.json", time.format("%Y%m%d_%H%M%S"))
}

/// Write a snapshot of `frame` into `dir`, named after the current time.
///
/// Two exports within the same second write the same file; the later one wins.
pub fn export_frame(frame: &Frame, dir: &Path) -> Result<PathBuf, FrameError> {
    export_frame_at(frame, dir, Local::now())
}

pub fn export_frame_at(frame: &Frame, dir: &Path, time: DateTime<Local>) -> Result<PathBuf, FrameError> {
    let path = dir.join(export_filename(&time));
    let json = serde_json::to_string_pretty(&PacketExport::new(frame, time))?;
    fs::write(&path, json)?;
    info!("Exported packet to {}", path.display());
    Ok(path)
}

/// Read a snapshot written by [`export_frame`] back into a frame.
pub fn load_export(path: &Path) -> Result<Frame, FrameError> {
    let json = fs::read_to_string(path)?;
    let export: PacketExport = serde_json::from_str(&json)?;
    export.to_frame()
}
