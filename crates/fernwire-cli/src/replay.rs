//! Backend that replays a recorded session.
//!
//! The recording is a text file with one JSON message per line. Blank lines
//! and lines starting with `#` are skipped. Requests sent to the backend are
//! logged and kept; nothing answers them.

use std::{
    collections::VecDeque,
    path::Path,
    sync::{Mutex, MutexGuard, PoisonError},
    thread,
    time::Duration,
};

use fernwire_client::{Backend, BackendError};

use crate::error::CliError;

/// Replays recorded messages, then reports closed.
#[derive(Debug, Default)]
pub struct ReplayBackend {
    messages: Mutex<VecDeque<String>>,
    sent: Mutex<Vec<String>>,
    delay: Duration,
}

impl ReplayBackend {
    /// Read a recording from disk.
    pub fn open(path: &Path) -> Result<Self, CliError> {
        let text = std::fs::read_to_string(path)
            .map_err(|source| CliError::Read { path: path.to_owned(), source })?;
        Ok(Self::from_recording(&text))
    }

    /// Build from recording text.
    pub fn from_recording(text: &str) -> Self {
        let messages = text
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with('#'))
            .map(str::to_owned)
            .collect();
        Self { messages: Mutex::new(messages), ..Self::default() }
    }

    /// Pause before delivering each message.
    #[must_use]
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Messages not yet delivered.
    pub fn remaining(&self) -> usize {
        lock(&self.messages).len()
    }

    /// Requests sent so far.
    pub fn sent(&self) -> Vec<String> {
        lock(&self.sent).clone()
    }
}

impl Backend for ReplayBackend {
    fn send(&self, request: &str) -> Result<(), BackendError> {
        tracing::info!(target: "fernwire::sent", %request);
        lock(&self.sent).push(request.to_owned());
        Ok(())
    }

    fn receive(&self, timeout: Duration) -> Result<Option<String>, BackendError> {
        if !self.delay.is_zero() {
            thread::sleep(self.delay.min(timeout));
        }
        lock(&self.messages).pop_front().map(Some).ok_or(BackendError::Closed)
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
