//! Connection lifecycle signals emitted by the transport. The core only logs them; the runner owns reconnection.

use tracing::{error, info, warn};

/// Why the transport connection dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DisconnectReason {
    /// Credentials were rejected or revoked; reconnecting cannot succeed.
    LoggedOut,
    /// Another client instance took over the session.
    Replaced,
    /// Network-level failure (timeouts, resets).
    Network(String),
    /// Any other error reported by the service.
    Api(String),
}

impl DisconnectReason {
    /// True unless the session was logged out.
    pub fn should_reconnect(&self) -> bool {
        !matches!(self, DisconnectReason::LoggedOut)
    }
}

impl std::fmt::Display for DisconnectReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DisconnectReason::LoggedOut => f.write_str("logged out"),
            DisconnectReason::Replaced => f.write_str("replaced by another instance"),
            DisconnectReason::Network(e) => write!(f, "network: {}", e),
            DisconnectReason::Api(e) => write!(f, "api: {}", e),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConnectionEvent {
    Connecting { attempt: u32 },
    Connected { username: Option<String> },
    Disconnected { reason: DisconnectReason },
}

/// Logs one lifecycle event at a level matching its severity.
pub fn log_connection_event(event: &ConnectionEvent) {
    match event {
        ConnectionEvent::Connecting { attempt } => {
            info!(attempt = attempt, "Connecting to messaging service");
        }
        ConnectionEvent::Connected { username } => {
            info!(
                username = %username.as_deref().unwrap_or("unknown"),
                "Connection open, bot ready"
            );
        }
        ConnectionEvent::Disconnected { reason } => {
            if reason.should_reconnect() {
                warn!(reason = %reason, reconnect = true, "Connection closed");
            } else {
                error!(reason = %reason, reconnect = false, "Connection closed");
            }
        }
    }
}
