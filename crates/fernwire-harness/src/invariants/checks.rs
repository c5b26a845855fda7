//! Standard invariant checks.

use std::collections::HashSet;

use fernwire_core::Event;
use fernwire_proto::{AuthorizationState, ConnectionState};

use super::{Invariant, InvariantResult, SessionSnapshot, Violation};

/// Every accepted update produced exactly one event.
pub struct OneEventPerUpdate;

impl Invariant for OneEventPerUpdate {
    fn name(&self) -> &'static str {
        "one_event_per_update"
    }

    fn check(&self, state: &SessionSnapshot) -> InvariantResult {
        if state.events.len() == state.accepted {
            return Ok(());
        }
        Err(Violation {
            invariant: self.name(),
            message: format!(
                "{} updates accepted, {} events emitted",
                state.accepted,
                state.events.len()
            ),
        })
    }
}

/// A chat id is announced as discovered at most once per session.
pub struct DiscoveryAtMostOnce;

impl Invariant for DiscoveryAtMostOnce {
    fn name(&self) -> &'static str {
        "discovery_at_most_once"
    }

    fn check(&self, state: &SessionSnapshot) -> InvariantResult {
        let mut seen = HashSet::new();
        for event in &state.events {
            if let Event::NewChatDiscovered { id, .. } = event
                && !seen.insert(id)
            {
                return Err(Violation {
                    invariant: self.name(),
                    message: format!("chat {id} discovered twice"),
                });
            }
        }
        Ok(())
    }
}

/// Every chat named by a chat event is in the cache, and every cached chat
/// was announced.
pub struct ChatEventsMatchCache;

impl Invariant for ChatEventsMatchCache {
    fn name(&self) -> &'static str {
        "chat_events_match_cache"
    }

    fn check(&self, state: &SessionSnapshot) -> InvariantResult {
        let mut discovered = HashSet::new();
        for event in &state.events {
            match event {
                Event::NewChatDiscovered { id, .. } => {
                    discovered.insert(id.clone());
                },
                Event::ChatUpdated { id, .. } if !discovered.contains(id) => {
                    return Err(Violation {
                        invariant: self.name(),
                        message: format!("chat {id} updated before discovery"),
                    });
                },
                _ => {},
            }
        }

        if discovered == state.cached_chats {
            return Ok(());
        }
        Err(Violation {
            invariant: self.name(),
            message: format!(
                "{} chats discovered, {} cached",
                discovered.len(),
                state.cached_chats.len()
            ),
        })
    }
}

/// The mirrored states equal the last state announced for them.
pub struct StatesMatchLastEvent;

impl Invariant for StatesMatchLastEvent {
    fn name(&self) -> &'static str {
        "states_match_last_event"
    }

    fn check(&self, state: &SessionSnapshot) -> InvariantResult {
        let authorization = state
            .events
            .iter()
            .rev()
            .find_map(|event| match event {
                Event::AuthorizationStateChanged(announced) => Some(announced.clone()),
                _ => None,
            })
            .unwrap_or_default();
        let connection = state
            .events
            .iter()
            .rev()
            .find_map(|event| match event {
                Event::ConnectionStateChanged(announced) => Some(announced.clone()),
                _ => None,
            })
            .unwrap_or_default();

        if authorization != state.authorization_state {
            return Err(Violation {
                invariant: self.name(),
                message: format!(
                    "authorization state {} but last announced {authorization}",
                    state.authorization_state
                ),
            });
        }
        if connection != state.connection_state {
            return Err(Violation {
                invariant: self.name(),
                message: format!(
                    "connection state {} but last announced {connection}",
                    state.connection_state
                ),
            });
        }
        Ok(())
    }
}

/// Mirrored states never hold an unrecognized name.
pub struct NoUnrecognizedState;

impl Invariant for NoUnrecognizedState {
    fn name(&self) -> &'static str {
        "no_unrecognized_state"
    }

    fn check(&self, state: &SessionSnapshot) -> InvariantResult {
        let bad = matches!(state.authorization_state, AuthorizationState::Unrecognized(_))
            || matches!(state.connection_state, ConnectionState::Unrecognized(_));
        if bad {
            return Err(Violation {
                invariant: self.name(),
                message: format!(
                    "mirrored {} / {}",
                    state.authorization_state, state.connection_state
                ),
            });
        }
        Ok(())
    }
}
