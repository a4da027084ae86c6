//! Channel selection and the send loops built on it.
//!
//! [`SmartDispatcher`] decides which channel carries one message;
//! [`BulkOrchestrator`] runs it over contacts, beneficiaries or bare numbers
//! and notifies [`DispatchObserver`]s after every destination.

mod dispatcher;
mod observer;
mod orchestrator;

pub use dispatcher::{ChannelAttempt, SmartDispatcher};
pub use observer::{DispatchEvent, DispatchObserver, HistoryRecorder};
pub use orchestrator::BulkOrchestrator;

use std::time::Duration;

/// Timing and retry tunables of the dispatch path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DispatchSettings {
    /// Pause between consecutive destinations of a batch
    pub inter_send_delay: Duration,

    /// Native send attempts per destination
    pub native_max_attempts: u32,

    /// Pause between native attempts
    pub native_retry_delay: Duration,
}

impl Default for DispatchSettings {
    fn default() -> Self {
        Self {
            inter_send_delay: Duration::from_millis(2000),
            native_max_attempts: 2,
            native_retry_delay: Duration::from_millis(1000),
        }
    }
}
