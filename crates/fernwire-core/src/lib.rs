//! Coordinator
//!
//! Sans-IO state and cache coordinator for the Fernwire client. Mirrors the
//! backend's authorization and connection lifecycles, caches users, chats,
//! files, options and unread counters, and turns every inbound
//! [`Update`](fernwire_proto::Update) into exactly one [`Event`].
//!
//! # Architecture
//!
//! The coordinator follows the action-based pattern: the caller feeds updates
//! into [`Coordinator::handle`] and executes the returned
//! [`CoordinatorAction`]s (emit an event, send a follow-up request). It owns
//! no threads, channels or backend handle, so it runs unchanged under the
//! real receiver loop and in tests.
//!
//! # Components
//!
//! - [`Coordinator`]: state machines and caches
//! - [`Config`]: parameters forwarded into the initial backend commands
//! - [`Event`]: what changed, one per update
//! - [`CoordinatorError`]: state errors that must not be swallowed

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod cache;
mod config;
mod coordinator;
mod error;
mod event;

pub use cache::{ChatCache, UserCache, UserRecord};
pub use config::Config;
pub use coordinator::Coordinator;
pub use error::CoordinatorError;
pub use event::{CoordinatorAction, Event};
pub use fernwire_proto as proto;
