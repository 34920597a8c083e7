use std::fmt::Display;

use thiserror::Error;

use crate::config::Endpoint;

/// Errors raised by the widget core.
/// Every variant renders a short human-readable line, because the dispatcher
/// embeds it verbatim in the bot-visible error message.
#[derive(Debug, Error)]
pub enum WidgetError {
    // ── Transport errors ─────────────────────────────────────────────────────
    #[error("{endpoint} request failed: {message}")]
    Network { endpoint: Endpoint, message: String },

    #[error("{endpoint} API failed: {status}")]
    Status { endpoint: Endpoint, status: u16 },

    // ── Response shape errors ────────────────────────────────────────────────
    #[error("Unexpected {endpoint} response: {message}")]
    Decode { endpoint: Endpoint, message: String },

    // ── Local state errors ───────────────────────────────────────────────────
    #[error("Session storage unavailable: {0}")]
    Storage(String),

    #[error("Serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),

    // ── Configuration errors ─────────────────────────────────────────────────
    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl WidgetError {
    pub fn network(endpoint: Endpoint, err: impl Display) -> Self {
        WidgetError::Network { endpoint, message: err.to_string() }
    }

    pub fn decode(endpoint: Endpoint, err: impl Display) -> Self {
        WidgetError::Decode { endpoint, message: err.to_string() }
    }

    pub fn storage(err: impl Display) -> Self {
        WidgetError::Storage(err.to_string())
    }

    pub fn is_transport(&self) -> bool {
        matches!(self, WidgetError::Network { .. } | WidgetError::Status { .. })
    }

    pub fn is_malformed(&self) -> bool {
        matches!(self, WidgetError::Decode { .. } | WidgetError::Serialization(_))
    }

    /// The collaborator the failure is attributed to, if any.
    pub fn endpoint(&self) -> Option<Endpoint> {
        match self {
            WidgetError::Network { endpoint, .. }
            | WidgetError::Status { endpoint, .. }
            | WidgetError::Decode { endpoint, .. } => Some(*endpoint),
            _ => None,
        }
    }
}
