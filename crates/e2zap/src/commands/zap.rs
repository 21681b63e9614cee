//! `e2zap zap <CHANNEL>`

use e2zap_core::ChannelZapper;

use crate::cli::{GlobalOpts, ZapArgs};
use crate::config;
use crate::error::CliError;
use crate::output;

pub async fn handle(args: ZapArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let zap_config = config::resolve_config(global)?.with_channel(args.channel);
    let zapper = ChannelZapper::new(zap_config)?;

    let report = zapper.run().await?;

    let out = output::render_single(&global.output, &report, |r| r.status.to_string())?;
    output::print_output(&out, global.quiet);
    Ok(())
}
