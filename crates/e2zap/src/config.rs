//! CLI configuration -- thin wrapper around `e2zap_config` shared types.
//!
//! Adds resolution that respects `GlobalOpts` flag overrides
//! (--host, --port, --user, ...) on top of the active profile.

use e2zap_core::{TlsMode, ZapConfig, ZapParams};

use crate::cli::GlobalOpts;
use crate::error::CliError;

// ── Re-exports from shared crate ────────────────────────────────────

pub use e2zap_config::{Config, Profile, config_path, load_config_or_default, save_config};

// ── CLI-specific helpers ────────────────────────────────────────────

/// Resolve the active profile name from CLI flags and config.
pub fn active_profile_name(global: &GlobalOpts, config: &Config) -> String {
    global
        .profile
        .clone()
        .or_else(|| config.default_profile.clone())
        .unwrap_or_else(|| "default".into())
}

/// Merge the active profile and flag overrides into raw parameters.
///
/// An explicitly named profile must exist; the implicit default profile may
/// be absent, in which case flags alone must describe the box.
pub fn resolve_params(global: &GlobalOpts) -> Result<(ZapParams, TlsMode), CliError> {
    let cfg = load_config_or_default();
    let profile_name = active_profile_name(global, &cfg);

    let (mut params, mut tls) = match cfg.profile(&profile_name) {
        Ok(profile) => (
            e2zap_config::profile_to_params(profile, &profile_name),
            e2zap_config::tls_mode(profile),
        ),
        Err(err) if global.profile.is_some() => return Err(err.into()),
        Err(_) => (ZapParams::default(), TlsMode::System),
    };

    // Flags > env > profile
    if let Some(ref host) = global.host {
        params.hostname = Some(host.clone());
    }
    if let Some(port) = global.port {
        params.port = Some(port.to_string());
    }
    if let Some(ref user) = global.user {
        params.user = Some(user.clone());
    }
    if let Some(ref password) = global.password {
        params.password = Some(password.clone());
    }
    if global.ssl {
        params.use_ssl = Some(true);
    }
    if let Some(ref bouquet) = global.bouquet {
        params.bouquet_id = Some(bouquet.clone());
    }
    if global.insecure {
        tls = TlsMode::DangerAcceptInvalid;
    }

    tracing::debug!(profile = %profile_name, ?params, "resolved parameters");
    Ok((params, tls))
}

/// Resolve and validate in one step.
pub fn resolve_config(global: &GlobalOpts) -> Result<ZapConfig, CliError> {
    let (params, tls) = resolve_params(global)?;
    Ok(params.validate()?.with_tls(tls))
}
