// ── Invocation parameters ──
//
// `ZapParams` is what the hosting framework hands in (its key names are
// fixed: `useSSL`, `bouquetId`, ...). `ZapConfig` is the validated form the
// zapper runs on. Validation happens once, before any request is sent.

use std::fmt;
use std::time::Duration;

use secrecy::SecretString;
use serde::{Deserialize, Deserializer};

use e2zap_api::{Credentials, DEFAULT_TIMEOUT, TlsMode, TransportConfig};

use crate::error::CoreError;

/// Raw parameters as supplied by the hosting framework.
#[derive(Clone, Default, Deserialize)]
pub struct ZapParams {
    pub hostname: Option<String>,

    /// Accepts `"80"` or `80`; carried as text either way.
    #[serde(default, deserialize_with = "port_as_string")]
    pub port: Option<String>,

    pub user: Option<String>,

    pub password: Option<String>,

    /// Must be a real boolean; `"true"` is rejected.
    #[serde(rename = "useSSL")]
    pub use_ssl: Option<bool>,

    #[serde(rename = "bouquetId")]
    pub bouquet_id: Option<String>,

    pub channel: Option<String>,
}

impl fmt::Debug for ZapParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ZapParams")
            .field("hostname", &self.hostname)
            .field("port", &self.port)
            .field("user", &self.user)
            .field("password", &self.password.as_ref().map(|_| "[REDACTED]"))
            .field("use_ssl", &self.use_ssl)
            .field("bouquet_id", &self.bouquet_id)
            .field("channel", &self.channel)
            .finish()
    }
}

fn port_as_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Port {
        Text(String),
        Number(u16),
    }

    Ok(Option::<Port>::deserialize(deserializer)?.map(|port| match port {
        Port::Text(text) => text,
        Port::Number(n) => n.to_string(),
    }))
}

impl ZapParams {
    /// Decode a parameter document (YAML or JSON).
    pub fn from_document(document: &str) -> Result<Self, CoreError> {
        serde_yaml::from_str(document)
            .map_err(|e| CoreError::config(format!("invalid parameters: {e}")))
    }

    /// Validate into a runnable configuration.
    pub fn validate(self) -> Result<ZapConfig, CoreError> {
        let hostname = non_empty(self.hostname).ok_or_else(|| CoreError::config("missing hostname"))?;
        let port = non_empty(self.port).ok_or_else(|| CoreError::config("missing port"))?;

        let credentials = match (self.user, self.password) {
            (Some(user), Some(password)) => {
                Some(Credentials::new(user, SecretString::from(password)))
            }
            (None, None) => None,
            _ => return Err(CoreError::config("inconsistent credentials")),
        };

        Ok(ZapConfig {
            hostname,
            port,
            use_tls: self.use_ssl.unwrap_or(false),
            credentials,
            bouquet_id: non_empty(self.bouquet_id),
            channel: self.channel,
            tls: TlsMode::default(),
            timeout: DEFAULT_TIMEOUT,
        })
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

/// Validated configuration for one invocation.
#[derive(Debug, Clone)]
pub struct ZapConfig {
    pub hostname: String,
    pub port: String,
    pub use_tls: bool,
    /// Basic-auth pair; `None` when the web interface is unauthenticated.
    pub credentials: Option<Credentials>,
    /// Restrict the listing to one bouquet. `None` means every bouquet.
    pub bouquet_id: Option<String>,
    /// Requested channel display name.
    pub channel: Option<String>,
    /// Certificate policy for HTTPS.
    pub tls: TlsMode,
    pub timeout: Duration,
}

impl ZapConfig {
    /// `http(s)://{hostname}:{port}/`
    pub fn base_url(&self) -> String {
        let scheme = if self.use_tls { "https" } else { "http" };
        format!("{scheme}://{}:{}/", self.hostname, self.port)
    }

    pub fn with_tls(mut self, tls: TlsMode) -> Self {
        self.tls = tls;
        self
    }

    pub fn with_channel(mut self, channel: impl Into<String>) -> Self {
        self.channel = Some(channel.into());
        self
    }

    pub(crate) fn transport(&self) -> TransportConfig {
        TransportConfig {
            tls: self.tls.clone(),
            timeout: self.timeout,
        }
    }
}
