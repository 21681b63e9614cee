//! CLI error types with miette diagnostics.
//!
//! Maps `CoreError` and `ConfigError` into user-facing errors with
//! actionable help text and process exit codes.

use miette::Diagnostic;
use thiserror::Error;

use e2zap_config::ConfigError;
use e2zap_core::CoreError;

/// Process exit codes.
pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const CONFIG: i32 = 3;
    pub const CONNECTION: i32 = 7;
    pub const PARSE: i32 = 9;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Configuration ────────────────────────────────────────────────

    #[error("Invalid configuration: {message}")]
    #[diagnostic(
        code(e2zap::config),
        help(
            "Pass --host and --port (plus --user and --password if the web interface\n\
             requires a login), or create a profile with: e2zap config init --host <HOST>"
        )
    )]
    Configuration { message: String },

    #[error("Profile '{name}' not found in configuration")]
    #[diagnostic(
        code(e2zap::profile_not_found),
        help(
            "Available profiles: {available}\n\
             Create one with: e2zap config init --profile {name} --host <HOST>"
        )
    )]
    ProfileNotFound { name: String, available: String },

    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(e2zap::validation))]
    Validation { field: String, reason: String },

    #[error(transparent)]
    #[diagnostic(code(e2zap::config_file))]
    ConfigFile(ConfigError),

    // ── Set-top box ──────────────────────────────────────────────────

    #[error("Could not talk to the set-top box: {message}")]
    #[diagnostic(
        code(e2zap::connection_failed),
        help(
            "Check that the box is switched on and its web interface is reachable.\n\
             Run with -vv to log every request URL."
        )
    )]
    Connection { message: String },

    #[error("Unexpected service list from the set-top box: {message}")]
    #[diagnostic(
        code(e2zap::parse),
        help("Check that --bouquet names a bouquet reference, not a display name.")
    )]
    Parse { message: String },

    // ── IO / Serialization ────────────────────────────────────────────

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("Failed to render output: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Failed to render output: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Configuration { .. } | Self::ProfileNotFound { .. } | Self::ConfigFile(_) => {
                exit_code::CONFIG
            }
            Self::Validation { .. } => exit_code::USAGE,
            Self::Connection { .. } => exit_code::CONNECTION,
            Self::Parse { .. } => exit_code::PARSE,
            Self::Io(_) | Self::Json(_) | Self::Yaml(_) => exit_code::GENERAL,
        }
    }
}

// ── CoreError / ConfigError → CliError mapping ───────────────────────

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Configuration { message } => CliError::Configuration { message },
            CoreError::Network { message } => CliError::Connection { message },
            CoreError::Parse { message, body } => {
                tracing::debug!(%body, "rejected service list body");
                CliError::Parse { message }
            }
        }
    }
}

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::ProfileNotFound { name, available } => CliError::ProfileNotFound {
                name,
                available: if available.is_empty() {
                    "(none)".into()
                } else {
                    available.join(", ")
                },
            },
            other => CliError::ConfigFile(other),
        }
    }
}
