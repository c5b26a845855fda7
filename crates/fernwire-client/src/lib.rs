//! Client
//!
//! Runtime around the Sans-IO [`Coordinator`](fernwire_core::Coordinator):
//! a receiver thread that polls the backend, and a [`Client`] handle that
//! applies updates, publishes events and submits requests.
//!
//! # Architecture
//!
//! ```text
//! Backend --receive--> receiver thread --mpsc--> Client::next_event
//!    ^                                                 |
//!    +---------------------send------------------------+
//! ```
//!
//! The receiver thread only decodes and forwards. All state lives in the
//! coordinator, owned by the [`Client`] on the application's context.
//!
//! # Components
//!
//! - [`Backend`]: the external JSON library, as a trait
//! - [`Client`]: queries, commands and the event stream
//! - [`Submitter`]: cloneable request handle for other threads or tasks
//! - [`spawn_receiver`]: the polling loop, usable on its own

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod backend;
mod client;
mod error;
mod receiver;
mod submitter;

pub use backend::{Backend, BackendError};
pub use client::Client;
pub use error::ClientError;
pub use fernwire_core::{Config, CoordinatorError, Event, UserRecord};
pub use fernwire_proto as proto;
pub use receiver::{ReceiverHandle, spawn_receiver};
pub use submitter::{DEFAULT_CHAT_LIMIT, DEFAULT_DOWNLOAD_PRIORITY, Submitter};
