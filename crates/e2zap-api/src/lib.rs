// e2zap-api: Async Rust client for the Enigma2 web interface (service lists + zap)

pub mod auth;
pub mod client;
pub mod error;
pub mod models;
pub mod transport;

pub use auth::Credentials;
pub use client::WebIfClient;
pub use error::Error;
pub use models::{Bouquet, Service, ServiceList, ServiceListDocument, ServiceListRecursive};
pub use transport::{DEFAULT_TIMEOUT, TlsMode, TransportConfig};
