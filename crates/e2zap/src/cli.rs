//! Clap derive structures for the `e2zap` CLI.
//!
//! Defines the command tree, global flags, and shared types.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// e2zap -- switch an Enigma2 set-top box to a channel by name
#[derive(Debug, Parser)]
#[command(
    name = "e2zap",
    version,
    about = "Switch an Enigma2 set-top box to a channel by name",
    long_about = "Switch an Enigma2 set-top box to a channel by name.\n\n\
        Looks the channel up in the box's service list (optionally one bouquet\n\
        only) and zaps to it through the web interface.",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Box profile to use
    #[arg(long, short = 'p', env = "E2ZAP_PROFILE", global = true)]
    pub profile: Option<String>,

    /// Host name or IP of the box (overrides profile)
    #[arg(long, env = "E2ZAP_HOST", global = true)]
    pub host: Option<String>,

    /// Web interface port (overrides profile)
    #[arg(long, env = "E2ZAP_PORT", global = true)]
    pub port: Option<u16>,

    /// Web interface user
    #[arg(long, short = 'u', env = "E2ZAP_USER", global = true)]
    pub user: Option<String>,

    /// Web interface password
    #[arg(long, env = "E2ZAP_PASSWORD", global = true, hide_env_values = true)]
    pub password: Option<String>,

    /// Use HTTPS
    #[arg(long, env = "E2ZAP_SSL", global = true)]
    pub ssl: bool,

    /// Only look channels up in this bouquet (service reference)
    #[arg(long, short = 'b', env = "E2ZAP_BOUQUET", global = true)]
    pub bouquet: Option<String>,

    /// Accept self-signed TLS certificates
    #[arg(long, short = 'k', env = "E2ZAP_INSECURE", global = true)]
    pub insecure: bool,

    /// Output format
    #[arg(
        long,
        short = 'o',
        env = "E2ZAP_OUTPUT",
        default_value = "table",
        global = true
    )]
    pub output: OutputFormat,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,
}

// ── Output Enum ──────────────────────────────────────────────────────

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    /// Pretty table (default, interactive)
    Table,
    /// Pretty-printed JSON
    Json,
    /// Compact single-line JSON
    JsonCompact,
    /// YAML
    Yaml,
    /// Plain text, one value per line (scripting)
    Plain,
}

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Switch the box to a channel
    #[command(alias = "z")]
    Zap(ZapArgs),

    /// List the channels the box offers
    #[command(alias = "ls")]
    Channels,

    /// Run one invocation from a host parameter document
    Invoke(InvokeArgs),

    /// Manage configuration profiles
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// ── Command Args ─────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ZapArgs {
    /// Channel display name (exact, case-sensitive)
    pub channel: String,
}

#[derive(Debug, Args)]
pub struct InvokeArgs {
    /// Parameter document (JSON or YAML); `-` reads stdin
    #[arg(long, default_value = "-")]
    pub params: PathBuf,
}

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show the resolved settings for the active profile
    Show,
    /// Print the config file path
    Path,
    /// Write a profile from --host/--port/--user/--ssl/--bouquet
    Init,
}

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}
