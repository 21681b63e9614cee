//! Command handlers.

pub mod channels;
pub mod config_cmd;
pub mod invoke;
pub mod zap;

use clap::CommandFactory;

use crate::cli::{Cli, Command, CompletionsArgs, GlobalOpts};
use crate::error::CliError;

/// Route a parsed command to its handler.
pub async fn dispatch(cmd: Command, global: &GlobalOpts) -> Result<(), CliError> {
    match cmd {
        Command::Zap(args) => zap::handle(args, global).await,
        Command::Channels => channels::handle(global).await,
        Command::Invoke(args) => invoke::handle(args).await,
        Command::Config(args) => config_cmd::handle(args, global),
        Command::Completions(args) => {
            completions(&args);
            Ok(())
        }
    }
}

fn completions(args: &CompletionsArgs) {
    let mut cmd = Cli::command();
    clap_complete::generate(args.shell, &mut cmd, "e2zap", &mut std::io::stdout());
}
