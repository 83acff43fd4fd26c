pub mod command;
pub mod constants;
pub mod corrupt;
pub mod display;
pub mod error;
pub mod export;
pub mod packet;
pub mod session;

#[cfg(test)]
mod tests;

// Re-export the core types for easy access
pub use corrupt::Corruption;
pub use error::{FrameError, FrameValidationError};
pub use packet::{Frame, Validation};
pub use session::{Session, TransmitConfig};
