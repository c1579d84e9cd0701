//! Shared error type across statsbridge crates.

use std::time::Duration;

use thiserror::Error;

/// Stable error kinds (used as log labels).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Target unreachable / connection failure.
    Network,
    /// Response body could not be fully read.
    Read,
    /// Body is not valid JSON or violates the stats schema.
    Parse,
    /// Fetch deadline elapsed.
    Timeout,
    /// A listener failed to bind.
    ListenerBind,
    /// Invalid configuration.
    Config,
    /// Conflicting metric registration.
    Registration,
}

impl ErrorKind {
    /// String representation used in structured logs.
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorKind::Network => "network",
            ErrorKind::Read => "read",
            ErrorKind::Parse => "parse",
            ErrorKind::Timeout => "timeout",
            ErrorKind::ListenerBind => "listener_bind",
            ErrorKind::Config => "config",
            ErrorKind::Registration => "registration",
        }
    }
}

/// Shared result type.
pub type Result<T> = std::result::Result<T, BridgeError>;

/// Unified error type used by core and exporter.
#[derive(Debug, Error)]
pub enum BridgeError {
    #[error("network: {0}")]
    Network(String),
    #[error("read: {0}")]
    Read(String),
    #[error("parse: {0}")]
    Parse(String),
    #[error("timed out after {0:?}")]
    Timeout(Duration),
    #[error("failed to bind {addr}: {reason}")]
    ListenerBind { addr: String, reason: String },
    #[error("config: {0}")]
    Config(String),
    #[error("registration: {0}")]
    Registration(String),
}

impl BridgeError {
    /// Map error to its stable kind.
    pub fn kind(&self) -> ErrorKind {
        match self {
            BridgeError::Network(_) => ErrorKind::Network,
            BridgeError::Read(_) => ErrorKind::Read,
            BridgeError::Parse(_) => ErrorKind::Parse,
            BridgeError::Timeout(_) => ErrorKind::Timeout,
            BridgeError::ListenerBind { .. } => ErrorKind::ListenerBind,
            BridgeError::Config(_) => ErrorKind::Config,
            BridgeError::Registration(_) => ErrorKind::Registration,
        }
    }
}
