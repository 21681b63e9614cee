// e2zap-core: Resolve a channel name on an Enigma2 box and zap to it.

pub mod directory;
pub mod error;
pub mod outcome;
pub mod params;
pub mod zapper;

// ── Primary re-exports ──────────────────────────────────────────────
pub use directory::ChannelDirectory;
pub use error::CoreError;
pub use outcome::{ZapOutcome, ZapReport};
pub use params::{ZapConfig, ZapParams};
pub use zapper::{ChannelZapper, run};

pub use e2zap_api::{Credentials, TlsMode};
