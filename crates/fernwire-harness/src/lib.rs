//! Test harness for Fernwire.
//!
//! Deterministic building blocks for exercising the coordinator and the
//! client without a real backend.
//!
//! # Scripted backend
//!
//! [`ScriptedBackend`] implements [`Backend`](fernwire_client::Backend) over
//! an in-memory queue: the test pushes inbound JSON and inspects every
//! request the client sent.
//!
//! # Invariant testing
//!
//! The `invariants` module checks session-wide properties (one event per
//! update, chat discovery at most once, mirrored states agree with the
//! events) against a [`SessionSnapshot`]. Use
//! [`InvariantRegistry::standard()`] for the full set.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod fixtures;
pub mod invariants;
mod scripted_backend;

pub use invariants::{
    ChatEventsMatchCache, DiscoveryAtMostOnce, Invariant, InvariantRegistry, InvariantResult,
    NoUnrecognizedState, OneEventPerUpdate, SessionRecorder, SessionSnapshot,
    StatesMatchLastEvent, Violation,
};
pub use scripted_backend::ScriptedBackend;
