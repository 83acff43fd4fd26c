use crate::constants::CORRUPT_SENTINEL;
use crate::error::FrameError;
use crate::packet::Frame;
use rand::Rng;
use rand::seq::SliceRandom;
use std::str::FromStr;
use strum_macros::Display;
use tracing::debug;

/// Which field a simulated corruption damages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum Corruption {
    /// Checksum bumped by one, wrapping at 256
    #[strum(to_string = "checksum")]
    Checksum,
    /// Start byte overwritten with 0xFF
    #[strum(to_string = "start_byte")]
    StartByte,
    /// End byte overwritten with 0xFF
    #[strum(to_string = "end_byte")]
    EndByte,
}

impl Corruption {
    pub const ALL: [Corruption; 3] = [Corruption::Checksum, Corruption::StartByte, Corruption::EndByte];

    /// Pick a corruption kind uniformly at random.
    pub fn random() -> Self {
        Self::random_with(&mut rand::thread_rng())
    }

    pub fn random_with<R: Rng + ?Sized>(rng: &mut R) -> Self {
        *Self::ALL.choose(rng).unwrap_or(&Corruption::Checksum)
    }
}

impl FromStr for Corruption {
    type Err = FrameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "checksum" => Ok(Corruption::Checksum),
            "start_byte" => Ok(Corruption::StartByte),
            "end_byte" => Ok(Corruption::EndByte),
            other => Err(FrameError::Protocol(format!("Unknown corruption field: {}", other))),
        }
    }
}

impl Frame {
    /// Damage one field in place. No other field is touched.
    pub fn corrupt(&mut self, kind: Corruption) {
        match kind {
            Corruption::Checksum => self.checksum = self.checksum.wrapping_add(1),
            Corruption::StartByte => self.start_byte = CORRUPT_SENTINEL,
            Corruption::EndByte => self.end_byte = CORRUPT_SENTINEL,
        }
        debug!("Corrupted {}", kind);
    }

    /// Damage a randomly chosen field and report which one it was.
    pub fn corrupt_random(&mut self) -> Corruption {
        let kind = Corruption::random();
        self.corrupt(kind);
        kind
    }
}
