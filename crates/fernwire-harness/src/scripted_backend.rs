//! In-memory backend driven by the test.

use std::{
    collections::VecDeque,
    sync::{Condvar, Mutex, MutexGuard, PoisonError},
    time::Duration,
};

use fernwire_client::{Backend, BackendError};
use serde_json::Value;

#[derive(Debug, Default)]
struct Inbox {
    queue: VecDeque<String>,
    closed: bool,
}

/// Backend whose inbound messages are pushed by the test and whose outbound
/// requests are recorded for inspection.
///
/// Messages pushed before [`ScriptedBackend::close`] are still delivered;
/// once the queue is drained a closed backend reports
/// [`BackendError::Closed`]. Outbound requests are always recorded, so
/// follow-up requests triggered by the last messages remain observable.
#[derive(Debug, Default)]
pub struct ScriptedBackend {
    inbox: Mutex<Inbox>,
    ready: Condvar,
    sent: Mutex<Vec<String>>,
}

impl ScriptedBackend {
    /// Create an open backend with an empty queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue one raw inbound message.
    pub fn push(&self, message: impl Into<String>) {
        lock(&self.inbox).queue.push_back(message.into());
        self.ready.notify_all();
    }

    /// Queue one inbound JSON message.
    pub fn push_value(&self, message: &Value) {
        self.push(message.to_string());
    }

    /// Queue several inbound JSON messages in order.
    pub fn push_all<'a>(&self, messages: impl IntoIterator<Item = &'a Value>) {
        let mut inbox = lock(&self.inbox);
        inbox.queue.extend(messages.into_iter().map(Value::to_string));
        drop(inbox);
        self.ready.notify_all();
    }

    /// End the inbound stream after the queued messages.
    pub fn close(&self) {
        lock(&self.inbox).closed = true;
        self.ready.notify_all();
    }

    /// Number of inbound messages not yet received.
    pub fn pending(&self) -> usize {
        lock(&self.inbox).queue.len()
    }

    /// Every request sent so far, as raw text.
    pub fn sent(&self) -> Vec<String> {
        lock(&self.sent).clone()
    }

    /// Every request sent so far, parsed. Unparsable requests are skipped.
    pub fn sent_values(&self) -> Vec<Value> {
        lock(&self.sent).iter().filter_map(|text| serde_json::from_str(text).ok()).collect()
    }

    /// Sent requests whose `@type` is `kind`.
    pub fn sent_of_type(&self, kind: &str) -> Vec<Value> {
        self.sent_values()
            .into_iter()
            .filter(|value| value.get("@type").and_then(Value::as_str) == Some(kind))
            .collect()
    }
}

impl Backend for ScriptedBackend {
    fn send(&self, request: &str) -> Result<(), BackendError> {
        lock(&self.sent).push(request.to_owned());
        Ok(())
    }

    fn receive(&self, timeout: Duration) -> Result<Option<String>, BackendError> {
        let inbox = lock(&self.inbox);
        let (mut inbox, _) = self
            .ready
            .wait_timeout_while(inbox, timeout, |inbox| inbox.queue.is_empty() && !inbox.closed)
            .unwrap_or_else(PoisonError::into_inner);

        match inbox.queue.pop_front() {
            Some(message) => Ok(Some(message)),
            None if inbox.closed => Err(BackendError::Closed),
            None => Ok(None),
        }
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn delivers_queue_then_reports_closed() {
        let backend = ScriptedBackend::new();
        backend.push_value(&json!({"@type": "ok"}));
        backend.close();

        let timeout = Duration::from_millis(1);
        assert_eq!(backend.receive(timeout), Ok(Some(r#"{"@type":"ok"}"#.to_owned())));
        assert_eq!(backend.receive(timeout), Err(BackendError::Closed));
    }

    #[test]
    fn empty_open_backend_times_out() {
        let backend = ScriptedBackend::new();
        assert_eq!(backend.receive(Duration::from_millis(1)), Ok(None));
    }

    #[test]
    fn records_sent_requests() {
        let backend = ScriptedBackend::new();
        backend.send(r#"{"@type":"getChats","@extra":1}"#).unwrap();
        backend.send("garbage").unwrap();

        backend.close();
        backend.send(r#"{"@type":"close"}"#).unwrap();

        assert_eq!(backend.sent().len(), 3);
        assert_eq!(backend.sent_of_type("getChats").len(), 1);
        assert_eq!(backend.sent_values().len(), 2);
    }
}
