use std::sync::{Mutex, PoisonError};

use crate::report::error::ResolutionError;

/// Append-only sink for structured errors. Shared across concurrently
/// running extraction tasks, so implementations must be `Send + Sync`.
pub trait ErrorSink: Send + Sync {
    fn report(&self, error: ResolutionError);
}

/// Sink collecting errors into memory.
#[derive(Debug, Default)]
pub struct CollectingErrorSink {
    entries: Mutex<Vec<ResolutionError>>,
}

impl CollectingErrorSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything reported so far.
    pub fn entries(&self) -> Vec<ResolutionError> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner).is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner).len()
    }
}

impl ErrorSink for CollectingErrorSink {
    fn report(&self, error: ResolutionError) {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner).push(error);
    }
}

/// Sink forwarding every error to the logging facade.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogErrorSink;

impl ErrorSink for LogErrorSink {
    fn report(&self, error: ResolutionError) {
        log::error!("{error}");
    }
}
