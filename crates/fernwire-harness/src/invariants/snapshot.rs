//! Observable session state for invariant checking.

use std::collections::HashSet;

use fernwire_core::{Config, Coordinator, CoordinatorAction, CoordinatorError, Event};
use fernwire_proto::{AuthorizationState, ChatId, ConnectionState, Request, Update};

/// Snapshot of a coordinator session at one point in time.
#[derive(Debug, Clone, Default)]
pub struct SessionSnapshot {
    /// Updates the coordinator accepted.
    pub accepted: usize,
    /// Updates the coordinator rejected with a state error.
    pub rejected: usize,
    /// Every event emitted, in order.
    pub events: Vec<Event>,
    /// Every follow-up request, in order.
    pub requests: Vec<Request>,
    /// Current authorization state.
    pub authorization_state: AuthorizationState,
    /// Current connection state.
    pub connection_state: ConnectionState,
    /// Chats present in the cache.
    pub cached_chats: HashSet<ChatId>,
}

/// Drives a [`Coordinator`] and records what it produced.
#[derive(Debug)]
pub struct SessionRecorder {
    coordinator: Coordinator,
    accepted: usize,
    rejected: usize,
    events: Vec<Event>,
    requests: Vec<Request>,
}

impl Default for SessionRecorder {
    fn default() -> Self {
        Self::new(Config::default())
    }
}

impl SessionRecorder {
    /// Start recording a fresh coordinator.
    pub fn new(config: Config) -> Self {
        Self {
            coordinator: Coordinator::new(config),
            accepted: 0,
            rejected: 0,
            events: Vec::new(),
            requests: Vec::new(),
        }
    }

    /// Apply one update, recording its outcome.
    pub fn apply(&mut self, update: Update) -> Result<(), CoordinatorError> {
        match self.coordinator.handle(update) {
            Ok(actions) => {
                self.accepted += 1;
                for action in actions {
                    match action {
                        CoordinatorAction::Emit(event) => self.events.push(event),
                        CoordinatorAction::Send(request) => self.requests.push(request),
                    }
                }
                Ok(())
            },
            Err(error) => {
                self.rejected += 1;
                Err(error)
            },
        }
    }

    /// The coordinator under test.
    pub fn coordinator(&self) -> &Coordinator {
        &self.coordinator
    }

    /// Capture the current state.
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            accepted: self.accepted,
            rejected: self.rejected,
            events: self.events.clone(),
            requests: self.requests.clone(),
            authorization_state: self.coordinator.authorization_state().clone(),
            connection_state: self.coordinator.connection_state().clone(),
            cached_chats: self.coordinator.chats().iter().map(|chat| chat.id.clone()).collect(),
        }
    }
}
