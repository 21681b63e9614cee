//! `e2zap channels`

use serde::Serialize;
use tabled::Tabled;

use e2zap_core::ChannelZapper;

use crate::cli::GlobalOpts;
use crate::config;
use crate::error::CliError;
use crate::output;

#[derive(Serialize)]
struct Channel {
    name: String,
    reference: String,
}

#[derive(Tabled)]
struct ChannelRow {
    #[tabled(rename = "Channel")]
    name: String,
    #[tabled(rename = "Service reference")]
    reference: String,
}

pub async fn handle(global: &GlobalOpts) -> Result<(), CliError> {
    let zapper = ChannelZapper::new(config::resolve_config(global)?)?;
    let directory = zapper.fetch_channel_directory().await?;

    let channels: Vec<Channel> = directory
        .iter()
        .map(|(name, reference)| Channel {
            name: name.to_owned(),
            reference: reference.to_owned(),
        })
        .collect();

    let out = output::render_list(
        &global.output,
        &channels,
        |c| ChannelRow {
            name: c.name.clone(),
            reference: c.reference.clone(),
        },
        |c| c.name.clone(),
    )?;
    output::print_output(&out, global.quiet);
    Ok(())
}
