//! `e2zap config show|path|init`

use serde::Serialize;

use e2zap_core::TlsMode;

use crate::cli::{ConfigArgs, ConfigCommand, GlobalOpts};
use crate::config::{self, Profile};
use crate::error::CliError;
use crate::output;

#[derive(Serialize)]
struct ResolvedView {
    profile: String,
    hostname: Option<String>,
    port: Option<String>,
    use_ssl: bool,
    user: Option<String>,
    password: &'static str,
    bouquet_id: Option<String>,
    tls: String,
}

pub fn handle(args: ConfigArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        ConfigCommand::Show => show(global),
        ConfigCommand::Path => {
            output::print_output(&config::config_path().display().to_string(), global.quiet);
            Ok(())
        }
        ConfigCommand::Init => init(global),
    }
}

fn show(global: &GlobalOpts) -> Result<(), CliError> {
    let cfg = config::load_config_or_default();
    let (params, tls) = config::resolve_params(global)?;

    let view = ResolvedView {
        profile: config::active_profile_name(global, &cfg),
        hostname: params.hostname,
        port: params.port,
        use_ssl: params.use_ssl.unwrap_or(false),
        user: params.user,
        password: if params.password.is_some() { "(set)" } else { "(not set)" },
        bouquet_id: params.bouquet_id,
        tls: match tls {
            TlsMode::System => "system roots".into(),
            TlsMode::CustomCa(path) => format!("custom CA {}", path.display()),
            TlsMode::DangerAcceptInvalid => "accept invalid certificates".into(),
        },
    };

    let out = output::render_single(&global.output, &view, |v| {
        let unset = || "-".to_string();
        [
            format!("profile:  {}", v.profile),
            format!("hostname: {}", v.hostname.clone().unwrap_or_else(unset)),
            format!("port:     {}", v.port.clone().unwrap_or_else(unset)),
            format!("use_ssl:  {}", v.use_ssl),
            format!("user:     {}", v.user.clone().unwrap_or_else(unset)),
            format!("password: {}", v.password),
            format!("bouquet:  {}", v.bouquet_id.clone().unwrap_or_else(unset)),
            format!("tls:      {}", v.tls),
        ]
        .join("\n")
    })?;
    output::print_output(&out, global.quiet);
    Ok(())
}

fn init(global: &GlobalOpts) -> Result<(), CliError> {
    let hostname = global.host.clone().ok_or_else(|| CliError::Validation {
        field: "host".into(),
        reason: "config init needs --host".into(),
    })?;

    let mut cfg = config::load_config_or_default();
    let name = global.profile.clone().unwrap_or_else(|| "default".into());

    let profile = Profile {
        hostname,
        port: global.port.unwrap_or(80),
        use_ssl: global.ssl,
        user: global.user.clone(),
        password: None,
        password_env: None,
        bouquet_id: global.bouquet.clone(),
        insecure: global.insecure.then_some(true),
        ca_cert: None,
    };

    cfg.profiles.insert(name.clone(), profile);
    if cfg.default_profile.is_none() {
        cfg.default_profile = Some(name.clone());
    }
    config::save_config(&cfg)?;

    let mut message = format!(
        "Profile '{name}' written to {}",
        config::config_path().display()
    );
    if global.password.is_some() {
        message.push_str(&format!(
            "\nThe password was not stored: set password_env in the profile, \
             or add it to the system keyring under e2zap / {name}/password."
        ));
    }
    output::print_output(&message, global.quiet);
    Ok(())
}
