//! Fernwire command-line driver.
//!
//! Loads a [`Config`](fernwire_client::Config), starts a
//! [`Client`](fernwire_client::Client) over a backend and logs every event
//! until the session ends. The bundled [`ReplayBackend`] plays back a
//! recorded session, which is how sessions are inspected and how the
//! driver is tested.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod config;
mod error;
mod replay;
pub mod session;

pub use error::CliError;
pub use replay::ReplayBackend;
pub use session::{SessionOptions, Summary};
