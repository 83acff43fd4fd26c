use crate::corrupt::Corruption;
use crate::display::history_line;
use crate::error::FrameError;
use crate::packet::{Frame, Validation};
use chrono::{Local, NaiveTime};
use std::collections::VecDeque;
use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::{info, warn};

const DEFAULT_STEPS: u32 = 50;
const DEFAULT_STEP_DELAY: Duration = Duration::from_millis(20);
const DEFAULT_MAX_HISTORY: usize = 100;

/// Tuning for the simulated transmission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransmitConfig {
    /// Number of progress steps after the initial one
    pub steps: u32,
    pub step_delay: Duration,
    /// History entries kept before the oldest is dropped
    pub max_history: usize,
}

impl Default for TransmitConfig {
    fn default() -> Self {
        Self {
            steps: DEFAULT_STEPS,
            step_delay: DEFAULT_STEP_DELAY,
            max_history: DEFAULT_MAX_HISTORY,
        }
    }
}

/// Progress tick sent while a transmission runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progress {
    pub step: u32,
    pub total: u32,
}

impl Progress {
    pub fn fraction(&self) -> f64 {
        if self.total == 0 {
            1.0
        } else {
            self.step as f64 / self.total as f64
        }
    }
}

/// Result of one finished transmission.
#[derive(Debug, Clone, PartialEq)]
pub struct HistoryEntry {
    pub time: NaiveTime,
    pub length: u8,
    pub validation: Validation,
}

impl fmt::Display for HistoryEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", history_line(self.time, self.length, &self.validation))
    }
}

/// An in-flight transmission of a frame snapshot taken when it started.
///
/// Replacing the session's frame afterwards does not change what this
/// transmission reports. The session's active flag is cleared when the
/// transmission is dropped, including after [`Transmission::run`].
#[derive(Debug)]
pub struct Transmission {
    frame: Frame,
    config: TransmitConfig,
    active: Arc<AtomicBool>,
}

impl Transmission {
    pub fn frame(&self) -> &Frame {
        &self.frame
    }

    /// Step through the progress animation, then validate the snapshot.
    pub async fn run(self, progress: Option<mpsc::UnboundedSender<Progress>>) -> HistoryEntry {
        let total = self.config.steps;
        for step in 0..=total {
            if let Some(tx) = &progress {
                // A dropped receiver only means nobody is watching.
                let _ = tx.send(Progress { step, total });
            }
            if step < total {
                tokio::time::sleep(self.config.step_delay).await;
            }
        }

        let validation = self.frame.validate();
        if validation.valid {
            info!("Transmission complete: {}", validation.reason);
        } else {
            warn!("Transmission complete with bad packet: {}", validation.reason);
        }

        HistoryEntry {
            time: Local::now().time(),
            length: self.frame.length,
            validation,
        }
    }
}

impl Drop for Transmission {
    fn drop(&mut self) {
        self.active.store(false, Ordering::SeqCst);
    }
}

/// Application state behind a front end: the current frame and what has
/// been transmitted so far.
#[derive(Debug)]
pub struct Session {
    current: Frame,
    history: VecDeque<HistoryEntry>,
    active: Arc<AtomicBool>,
    config: TransmitConfig,
}

impl Session {
    pub fn new(config: TransmitConfig) -> Self {
        Self {
            current: Frame::default(),
            history: VecDeque::new(),
            active: Arc::new(AtomicBool::new(false)),
            config,
        }
    }

    pub fn frame(&self) -> &Frame {
        &self.current
    }

    pub fn config(&self) -> &TransmitConfig {
        &self.config
    }

    /// Replace the current frame with a freshly encoded one.
    pub fn generate(&mut self, message: &str) -> &Frame {
        self.current = Frame::encode(message);
        info!("Generated packet with {} byte payload", self.current.length);
        &self.current
    }

    /// Replace the current frame, e.g. one decoded from the wire or a snapshot.
    pub fn load(&mut self, frame: Frame) {
        self.current = frame;
    }

    pub fn validate(&self) -> Validation {
        self.current.validate()
    }

    pub fn corrupt(&mut self, kind: Corruption) {
        self.current.corrupt(kind);
    }

    pub fn corrupt_random(&mut self) -> Corruption {
        self.current.corrupt_random()
    }

    pub fn is_transmitting(&self) -> bool {
        self.active.load(Ordering::SeqCst)
    }

    /// Snapshot the current frame and mark a transmission as active.
    pub fn begin_transmission(&mut self) -> Result<Transmission, FrameError> {
        if self
            .active
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            return Err(FrameError::TransmissionActive);
        }
        Ok(Transmission {
            frame: self.current,
            config: self.config,
            active: Arc::clone(&self.active),
        })
    }

    /// Append a finished transmission to the history, dropping the oldest
    /// entries beyond `max_history`.
    pub fn record(&mut self, entry: HistoryEntry) {
        self.history.push_back(entry);
        while self.history.len() > self.config.max_history {
            self.history.pop_front();
        }
    }

    /// Transmit the current frame and record the result.
    pub async fn transmit(
        &mut self,
        progress: Option<mpsc::UnboundedSender<Progress>>,
    ) -> Result<HistoryEntry, FrameError> {
        let transmission = self.begin_transmission()?;
        let entry = transmission.run(progress).await;
        self.record(entry.clone());
        Ok(entry)
    }

    /// Oldest first.
    pub fn history(&self) -> impl Iterator<Item = &HistoryEntry> {
        self.history.iter()
    }

    pub fn clear_history(&mut self) {
        self.history.clear();
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new(TransmitConfig::default())
    }
}
