//! Mirrored backend state enumerations.
//!
//! The backend names its states with strings (`authorizationStateWaitCode`,
//! `connectionStateReady`, ...). Both enums are closed over the names this
//! crate knows, with an `Unrecognized` fallback that keeps the raw name so
//! parsing never silently drops information. Deciding what an unrecognized
//! state means is left to the coordinator.

use std::fmt;

/// Authorization lifecycle of the backend session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub enum AuthorizationState {
    /// Session is closed; no further updates follow.
    Closed,
    /// Session is shutting down.
    Closing,
    /// User is logging out.
    LoggingOut,
    /// User is authorized.
    Ready,
    /// Backend waits for the login code.
    WaitCode,
    /// Backend waits for the local database encryption key.
    WaitEncryptionKey,
    /// Backend waits for confirmation on another device.
    WaitOtherDeviceConfirmation,
    /// Backend waits for the two-step verification password.
    WaitPassword,
    /// Backend waits for the phone number.
    WaitPhoneNumber,
    /// Backend waits for new user registration.
    WaitRegistration,
    /// Backend waits for initial parameters. Initial state.
    #[default]
    WaitParameters,
    /// State name this crate does not know.
    Unrecognized(String),
}

impl AuthorizationState {
    /// Map a wire name (`authorizationState...`) to a state.
    pub fn from_wire(name: &str) -> Self {
        match name {
            "authorizationStateClosed" => Self::Closed,
            "authorizationStateClosing" => Self::Closing,
            "authorizationStateLoggingOut" => Self::LoggingOut,
            "authorizationStateReady" => Self::Ready,
            "authorizationStateWaitCode" => Self::WaitCode,
            "authorizationStateWaitEncryptionKey" => Self::WaitEncryptionKey,
            "authorizationStateWaitOtherDeviceConfirmation" => Self::WaitOtherDeviceConfirmation,
            "authorizationStateWaitPassword" => Self::WaitPassword,
            "authorizationStateWaitPhoneNumber" => Self::WaitPhoneNumber,
            "authorizationStateWaitRegistration" => Self::WaitRegistration,
            "authorizationStateWaitTdlibParameters" => Self::WaitParameters,
            other => Self::Unrecognized(other.to_owned()),
        }
    }

    /// Wire name of this state.
    pub fn wire_name(&self) -> &str {
        match self {
            Self::Closed => "authorizationStateClosed",
            Self::Closing => "authorizationStateClosing",
            Self::LoggingOut => "authorizationStateLoggingOut",
            Self::Ready => "authorizationStateReady",
            Self::WaitCode => "authorizationStateWaitCode",
            Self::WaitEncryptionKey => "authorizationStateWaitEncryptionKey",
            Self::WaitOtherDeviceConfirmation => "authorizationStateWaitOtherDeviceConfirmation",
            Self::WaitPassword => "authorizationStateWaitPassword",
            Self::WaitPhoneNumber => "authorizationStateWaitPhoneNumber",
            Self::WaitRegistration => "authorizationStateWaitRegistration",
            Self::WaitParameters => "authorizationStateWaitTdlibParameters",
            Self::Unrecognized(name) => name,
        }
    }

    /// Terminal state: the backend sends nothing after it.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Closed)
    }
}

impl fmt::Display for AuthorizationState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.wire_name())
    }
}

/// Transport-level connectivity of the backend to its own network.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub enum ConnectionState {
    /// Establishing a connection.
    Connecting,
    /// Establishing a connection through a proxy.
    ConnectingToProxy,
    /// Connected.
    Ready,
    /// Fetching missed updates.
    Updating,
    /// No network available. Assumed until the first report arrives.
    #[default]
    WaitingForNetwork,
    /// State name this crate does not know.
    Unrecognized(String),
}

impl ConnectionState {
    /// Map a wire name (`connectionState...`) to a state.
    pub fn from_wire(name: &str) -> Self {
        match name {
            "connectionStateConnecting" => Self::Connecting,
            "connectionStateConnectingToProxy" => Self::ConnectingToProxy,
            "connectionStateReady" => Self::Ready,
            "connectionStateUpdating" => Self::Updating,
            "connectionStateWaitingForNetwork" => Self::WaitingForNetwork,
            other => Self::Unrecognized(other.to_owned()),
        }
    }

    /// Wire name of this state.
    pub fn wire_name(&self) -> &str {
        match self {
            Self::Connecting => "connectionStateConnecting",
            Self::ConnectingToProxy => "connectionStateConnectingToProxy",
            Self::Ready => "connectionStateReady",
            Self::Updating => "connectionStateUpdating",
            Self::WaitingForNetwork => "connectionStateWaitingForNetwork",
            Self::Unrecognized(name) => name,
        }
    }
}

impl fmt::Display for ConnectionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.wire_name())
    }
}
