//! Receiver loop.
//!
//! A dedicated OS thread polls the backend with a bounded timeout, decodes
//! each message and forwards it, in order, to the client over an unbounded
//! channel. It performs no application logic: undecodable messages are
//! logged and dropped, everything else is forwarded as is.

use std::{
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
    },
    thread::{self, JoinHandle},
    time::Duration,
};

use fernwire_proto::Update;
use tokio::sync::mpsc;

use crate::backend::{Backend, BackendError};

/// Name of the receiver thread.
const THREAD_NAME: &str = "fernwire-receiver";

/// Upper bound on the pause after a failed receive.
const RETRY_DELAY: Duration = Duration::from_millis(100);

/// Handle to a running receiver thread.
///
/// Dropping the handle stops the loop and waits for the thread.
#[derive(Debug)]
pub struct ReceiverHandle {
    stop: Arc<AtomicBool>,
    thread: Option<JoinHandle<()>>,
}

impl ReceiverHandle {
    /// Ask the loop to stop before its next poll.
    ///
    /// A poll already in progress completes first, so the loop exits within
    /// one receive timeout.
    pub fn stop(&self) {
        self.stop.store(true, Ordering::Release);
    }

    /// Whether the thread has exited.
    pub fn is_finished(&self) -> bool {
        self.thread.as_ref().is_none_or(JoinHandle::is_finished)
    }

    /// Stop the loop and wait for the thread to exit.
    pub fn join(&mut self) {
        self.stop();
        if let Some(thread) = self.thread.take()
            && thread.join().is_err()
        {
            tracing::error!("receiver thread panicked");
        }
    }
}

impl Drop for ReceiverHandle {
    fn drop(&mut self) {
        self.join();
    }
}

/// Start the receiver loop on its own thread.
pub fn spawn_receiver<B: Backend>(
    backend: Arc<B>,
    timeout: Duration,
    updates: mpsc::UnboundedSender<Update>,
) -> std::io::Result<ReceiverHandle> {
    let stop = Arc::new(AtomicBool::new(false));
    let thread = thread::Builder::new().name(THREAD_NAME.to_owned()).spawn({
        let stop = Arc::clone(&stop);
        move || run(backend.as_ref(), timeout, &stop, &updates)
    })?;

    Ok(ReceiverHandle { stop, thread: Some(thread) })
}

fn run<B: Backend>(
    backend: &B,
    timeout: Duration,
    stop: &AtomicBool,
    updates: &mpsc::UnboundedSender<Update>,
) {
    tracing::debug!(?timeout, "receiver started");

    while !stop.load(Ordering::Acquire) {
        let text = match backend.receive(timeout) {
            Ok(Some(text)) => text,
            Ok(None) => continue,
            Err(BackendError::Closed) => {
                tracing::info!("backend closed, receiver exiting");
                break;
            },
            Err(error) => {
                tracing::warn!(%error, "receive failed, retrying");
                thread::sleep(timeout.min(RETRY_DELAY));
                continue;
            },
        };

        let update = match Update::decode(&text) {
            Ok(update) => update,
            Err(error) => {
                tracing::warn!(%error, len = text.len(), "dropping undecodable message");
                continue;
            },
        };

        let terminal = matches!(&update, Update::AuthorizationState(state) if state.is_terminal());
        if updates.send(update).is_err() {
            tracing::debug!("client dropped, receiver exiting");
            break;
        }
        if terminal {
            tracing::info!("session closed, receiver exiting");
            break;
        }
    }

    tracing::debug!("receiver stopped");
}
