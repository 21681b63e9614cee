// ── Core error types ──
//
// The three ways an invocation can fail. Every one of them aborts the
// invocation; nothing here is retried. A channel that isn't in the listing
// is not an error -- it is the `unknown` outcome.

use thiserror::Error;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Bad or missing setup, raised before any request is sent.
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// Connection failure, timeout, or an unusable HTTP response.
    #[error("Network error: {message}")]
    Network { message: String },

    /// The service listing is not one of the two known XML shapes.
    #[error("Parse error: {message}")]
    Parse { message: String, body: String },
}

impl CoreError {
    pub(crate) fn config(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }
}

// ── Conversion from transport-layer errors ───────────────────────────

impl From<e2zap_api::Error> for CoreError {
    fn from(err: e2zap_api::Error) -> Self {
        use e2zap_api::Error as Api;

        match err {
            Api::InvalidUrl(e) => Self::Configuration {
                message: format!("invalid set-top-box address: {e}"),
            },
            Api::Tls(message) => Self::Configuration { message },
            Api::Deserialization { message, body } => Self::Parse { message, body },
            ref e if e.is_connection() => Self::Network {
                message: format!("set-top-box unreachable: {e}"),
            },
            other => Self::Network {
                message: other.to_string(),
            },
        }
    }
}
