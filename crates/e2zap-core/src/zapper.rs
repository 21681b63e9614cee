// ── ChannelZapper ──
//
// One invocation, start to finish: listing -> directory -> lookup -> zap.
// Requests are sent one after the other on a client owned by this zapper;
// any transport error ends the invocation.

use tracing::{Instrument, debug, info, info_span, instrument};
use url::Url;

use e2zap_api::WebIfClient;

use crate::directory::ChannelDirectory;
use crate::error::CoreError;
use crate::outcome::{ZapOutcome, ZapReport};
use crate::params::{ZapConfig, ZapParams};

pub struct ChannelZapper {
    config: ZapConfig,
    client: WebIfClient,
}

impl ChannelZapper {
    /// Build a zapper and its HTTP client from a validated configuration.
    pub fn new(config: ZapConfig) -> Result<Self, CoreError> {
        let base_url = Url::parse(&config.base_url())
            .map_err(|e| CoreError::config(format!("invalid hostname or port: {e}")))?;
        let client = WebIfClient::new(base_url, config.credentials.clone(), &config.transport())?;
        Ok(Self { config, client })
    }

    /// Fetch the listing (one bouquet or all of them) into a directory.
    pub async fn fetch_channel_directory(&self) -> Result<ChannelDirectory, CoreError> {
        let bouquet_id = self.config.bouquet_id.as_deref();
        let document = match bouquet_id {
            Some(id) => self.client.bouquet_services(id).await?,
            None => self.client.all_services().await?,
        };

        let directory = ChannelDirectory::from_document(&document, bouquet_id);
        debug!(channels = directory.len(), "channel directory built");
        Ok(directory)
    }

    /// Send the zap request for a resolved service reference.
    pub async fn send_zap(&self, service_ref: &str) -> Result<ZapOutcome, CoreError> {
        let status = self.client.zap(service_ref).await?;
        let outcome = ZapOutcome::from_status(status.as_u16());
        info!(%status, %outcome, "zap request answered");
        Ok(outcome)
    }

    /// Resolve `channel` against a fresh listing and zap to it.
    ///
    /// Without a channel, or with one the box doesn't list, the result is
    /// `unknown` and no zap request is sent.
    #[instrument(name = "zap", skip_all, fields(host = %self.config.hostname, channel = ?channel))]
    pub async fn zap_to(&self, channel: Option<&str>) -> Result<ZapOutcome, CoreError> {
        let directory = self.fetch_channel_directory().await?;

        let Some(service_ref) = channel.and_then(|name| directory.resolve(name)) else {
            info!("channel not in listing");
            return Ok(ZapOutcome::Unknown);
        };

        debug!(%service_ref, "channel resolved");
        self.send_zap(service_ref).await
    }

    /// Zap to the configured channel and wrap the outcome in a report.
    pub async fn run(&self) -> Result<ZapReport, CoreError> {
        self.zap_to(self.config.channel.as_deref())
            .await
            .map(ZapReport::from)
    }
}

/// Validate raw parameters and run one complete invocation.
pub async fn run(params: ZapParams) -> Result<ZapReport, CoreError> {
    let config = params.validate()?;
    let span = info_span!("invocation", base_url = %config.base_url());
    async move { ChannelZapper::new(config)?.run().await }
        .instrument(span)
        .await
}
