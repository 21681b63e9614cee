//! Shared configuration for e2zap.
//!
//! TOML profiles (one per set-top box), environment layering, password
//! resolution (env + keyring + plaintext), and translation to
//! `e2zap_core::ZapParams`. Validation stays in core: a profile becomes the
//! same raw parameters the hosting framework would send.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use e2zap_core::{TlsMode, ZapParams};

const KEYRING_SERVICE: &str = "e2zap";

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("profile '{name}' not found")]
    ProfileNotFound { name: String, available: Vec<String> },

    #[error("failed to serialize config: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── TOML config structs ─────────────────────────────────────────────

/// Top-level TOML configuration.
#[derive(Debug, Deserialize, Serialize)]
pub struct Config {
    /// Default profile name.
    pub default_profile: Option<String>,

    /// Named set-top-box profiles.
    #[serde(default)]
    pub profiles: HashMap<String, Profile>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_profile: Some("default".into()),
            profiles: HashMap::new(),
        }
    }
}

/// A named set-top-box profile.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Profile {
    /// Host name or IP address of the box.
    pub hostname: String,

    /// Web interface port.
    #[serde(default = "default_port")]
    pub port: u16,

    /// Talk HTTPS instead of HTTP.
    #[serde(default)]
    pub use_ssl: bool,

    /// Web interface user (basic auth).
    pub user: Option<String>,

    /// Password (plaintext -- prefer keyring or env var).
    pub password: Option<String>,

    /// Environment variable name containing the password.
    pub password_env: Option<String>,

    /// Limit channel lookup to this bouquet reference.
    pub bouquet_id: Option<String>,

    /// Accept self-signed certificates.
    pub insecure: Option<bool>,

    /// Path to custom CA certificate.
    pub ca_cert: Option<PathBuf>,
}

fn default_port() -> u16 {
    80
}

// ── Config file path ────────────────────────────────────────────────

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    ProjectDirs::from("com", "e2zap", "e2zap").map_or_else(
        || {
            let mut p = dirs_fallback();
            p.push("config.toml");
            p
        },
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

fn dirs_fallback() -> PathBuf {
    let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
    p.push(".config");
    p.push("e2zap");
    p
}

// ── Config loading ──────────────────────────────────────────────────

/// Load the full Config from the canonical file + environment.
pub fn load_config() -> Result<Config, ConfigError> {
    load_config_from(&config_path())
}

/// Load config from an explicit file, layered under `E2ZAP_` env vars.
///
/// Nested keys use a double underscore:
/// `E2ZAP_PROFILES__LIVINGROOM__HOSTNAME=192.168.1.20`.
pub fn load_config_from(path: &Path) -> Result<Config, ConfigError> {
    let figment = Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(path))
        .merge(Env::prefixed("E2ZAP_").split("__"));

    let config: Config = figment.extract()?;
    Ok(config)
}

/// Load config, returning a default if the file doesn't exist.
pub fn load_config_or_default() -> Config {
    load_config().unwrap_or_default()
}

// ── Config saving ───────────────────────────────────────────────────

/// Serialize config to TOML and write it to `path`.
pub fn save_config_to(cfg: &Config, path: &Path) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let toml_str = toml::to_string_pretty(cfg)?;
    std::fs::write(path, toml_str)?;
    Ok(())
}

/// Serialize config to TOML and write to the canonical config path.
pub fn save_config(cfg: &Config) -> Result<(), ConfigError> {
    save_config_to(cfg, &config_path())
}

// ── Profile lookup ──────────────────────────────────────────────────

impl Config {
    /// Look up a profile by name, listing what exists on failure.
    pub fn profile(&self, name: &str) -> Result<&Profile, ConfigError> {
        self.profiles.get(name).ok_or_else(|| {
            let mut available: Vec<String> = self.profiles.keys().cloned().collect();
            available.sort();
            ConfigError::ProfileNotFound {
                name: name.into(),
                available,
            }
        })
    }
}

// ── Credential resolution ───────────────────────────────────────────

/// Resolve the password for a profile.
///
/// Chain: `password_env` variable, then the system keyring
/// (`e2zap` / `{profile}/password`), then plaintext. The keyring is only
/// consulted when the profile names a user.
pub fn resolve_password(profile: &Profile, profile_name: &str) -> Option<String> {
    // 1. Profile's password_env → env var lookup
    if let Some(ref env_name) = profile.password_env {
        if let Ok(val) = std::env::var(env_name) {
            return Some(val);
        }
    }

    // 2. System keyring
    if profile.user.is_some() {
        if let Ok(entry) = keyring::Entry::new(KEYRING_SERVICE, &format!("{profile_name}/password")) {
            if let Ok(secret) = entry.get_password() {
                return Some(secret);
            }
        }
    }

    // 3. Plaintext in config
    profile.password.clone()
}

/// TLS certificate policy for a profile.
pub fn tls_mode(profile: &Profile) -> TlsMode {
    if profile.insecure.unwrap_or(false) {
        TlsMode::DangerAcceptInvalid
    } else if let Some(ref ca_path) = profile.ca_cert {
        TlsMode::CustomCa(ca_path.clone())
    } else {
        TlsMode::System
    }
}

/// Translate a profile into the raw parameters core validates.
///
/// The channel is left unset; callers add it per invocation.
pub fn profile_to_params(profile: &Profile, profile_name: &str) -> ZapParams {
    ZapParams {
        hostname: Some(profile.hostname.clone()),
        port: Some(profile.port.to_string()),
        user: profile.user.clone(),
        password: resolve_password(profile, profile_name),
        use_ssl: Some(profile.use_ssl),
        bouquet_id: profile.bouquet_id.clone(),
        channel: None,
    }
}
