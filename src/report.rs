use std::sync::{Mutex, MutexGuard, PoisonError};

/// Sink for non-fatal failures. Reporting never interrupts the caller.
pub trait ErrorReporter {
    fn report(&self, msg: &str);
}

impl<R: ErrorReporter + ?Sized> ErrorReporter for &R {
    fn report(&self, msg: &str) {
        (**self).report(msg)
    }
}

/// Reports through the `log` facade at error level.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogReporter;

impl ErrorReporter for LogReporter {
    fn report(&self, msg: &str) {
        log::error!("{}", msg);
    }
}

/// Keeps every message in memory, in arrival order.
#[derive(Debug, Default)]
pub struct RecordingReporter {
    messages: Mutex<Vec<String>>,
}

impl RecordingReporter {
    pub fn new() -> Self {
        Self::default()
    }

    /// A panicking holder cannot lose messages already pushed.
    fn guard(&self) -> MutexGuard<'_, Vec<String>> {
        self.messages.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn messages(&self) -> Vec<String> {
        self.guard().clone()
    }

    pub fn len(&self) -> usize {
        self.guard().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl ErrorReporter for RecordingReporter {
    fn report(&self, msg: &str) {
        self.guard().push(msg.to_owned());
    }
}
