//! Invariant checking for coordinator sessions.
//!
//! Invariants are properties that must hold after any sequence of updates.
//! A [`SessionRecorder`] drives a coordinator and exposes a
//! [`SessionSnapshot`]; registered [`Invariant`]s are checked against it.
//!
//! # Usage
//!
//! ```ignore
//! let registry = InvariantRegistry::standard();
//! let mut recorder = SessionRecorder::default();
//! recorder.apply(update)?;
//! registry.check_all(&recorder.snapshot())?;
//! ```

mod checks;
mod snapshot;

pub use checks::{
    ChatEventsMatchCache, DiscoveryAtMostOnce, NoUnrecognizedState, OneEventPerUpdate,
    StatesMatchLastEvent,
};
pub use snapshot::{SessionRecorder, SessionSnapshot};

/// Invariant check result.
pub type InvariantResult = Result<(), Violation>;

/// Invariant violation with context.
#[derive(Debug, Clone)]
pub struct Violation {
    /// Name of the violated invariant.
    pub invariant: &'static str,
    /// Description of what went wrong.
    pub message: String,
}

impl std::fmt::Display for Violation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.invariant, self.message)
    }
}

impl std::error::Error for Violation {}

/// A property checked against a session snapshot.
pub trait Invariant: Send + Sync {
    /// Invariant name for error reporting.
    fn name(&self) -> &'static str;

    /// Check the invariant against the snapshot.
    fn check(&self, state: &SessionSnapshot) -> InvariantResult;
}

/// Registry of invariants to check.
pub struct InvariantRegistry {
    invariants: Vec<Box<dyn Invariant>>,
}

impl Default for InvariantRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl InvariantRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self { invariants: Vec::new() }
    }

    /// Create a registry with every standard session invariant.
    pub fn standard() -> Self {
        let mut registry = Self::new();
        registry.add(OneEventPerUpdate);
        registry.add(DiscoveryAtMostOnce);
        registry.add(ChatEventsMatchCache);
        registry.add(StatesMatchLastEvent);
        registry.add(NoUnrecognizedState);
        registry
    }

    /// Add an invariant to the registry.
    pub fn add<I: Invariant + 'static>(&mut self, invariant: I) {
        self.invariants.push(Box::new(invariant));
    }

    /// Check all invariants, collecting every violation.
    pub fn check_all(&self, state: &SessionSnapshot) -> Result<(), Vec<Violation>> {
        let violations: Vec<_> =
            self.invariants.iter().filter_map(|inv| inv.check(state).err()).collect();

        if violations.is_empty() { Ok(()) } else { Err(violations) }
    }

    /// Number of registered invariants.
    pub fn len(&self) -> usize {
        self.invariants.len()
    }

    /// Check if registry is empty.
    pub fn is_empty(&self) -> bool {
        self.invariants.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use fernwire_proto::{AuthorizationState, ChatId, Update};
    use serde_json::json;

    use super::*;

    #[test]
    fn standard_registry_has_invariants() {
        assert_eq!(InvariantRegistry::standard().len(), 5);
    }

    #[test]
    fn empty_session_passes() {
        let registry = InvariantRegistry::standard();
        assert!(registry.check_all(&SessionRecorder::default().snapshot()).is_ok());
    }

    #[test]
    fn duplicate_discovery_is_caught() {
        let chat: fernwire_proto::Chat =
            serde_json::from_value(json!({"id": 1, "title": "x"})).unwrap();
        let event =
            fernwire_core::Event::NewChatDiscovered { id: ChatId::from(1), chat };
        let snapshot = SessionSnapshot {
            accepted: 2,
            events: vec![event.clone(), event],
            cached_chats: [ChatId::from(1)].into(),
            ..SessionSnapshot::default()
        };

        let violations = InvariantRegistry::standard().check_all(&snapshot).unwrap_err();
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].invariant, "discovery_at_most_once");
    }

    #[test]
    fn rejected_update_keeps_session_consistent() {
        let mut recorder = SessionRecorder::default();
        recorder
            .apply(Update::AuthorizationState(AuthorizationState::WaitCode))
            .unwrap();
        let result = recorder
            .apply(Update::AuthorizationState(AuthorizationState::Unrecognized("x".into())));

        assert!(result.is_err());
        let snapshot = recorder.snapshot();
        assert_eq!((snapshot.accepted, snapshot.rejected), (1, 1));
        assert!(InvariantRegistry::standard().check_all(&snapshot).is_ok());
    }
}
