// Web interface HTTP client
//
// Wraps `reqwest::Client` with the box's URL layout (`/web/<endpoint>` with
// an optional `sRef` query value), basic auth, and XML decoding of the
// service-list endpoints. The zap endpoint's body is never read; callers
// only get the status code back.

use std::time::Duration;

use reqwest::StatusCode;
use tracing::debug;
use url::Url;

use crate::auth::Credentials;
use crate::error::Error;
use crate::models::ServiceListDocument;
use crate::transport::{DEFAULT_TIMEOUT, TransportConfig};

const ALL_SERVICES: &str = "web/getallservices";
const SERVICES: &str = "web/getservices";
const ZAP: &str = "web/zap";
const SERVICE_REF_PARAM: &str = "sRef";

/// Raw HTTP client for one set-top-box web interface.
pub struct WebIfClient {
    http: reqwest::Client,
    base_url: Url,
    credentials: Option<Credentials>,
    timeout: Duration,
}

impl WebIfClient {
    /// Create a client from a `TransportConfig`.
    ///
    /// `base_url` is the web interface root, e.g. `http://192.168.1.20:80/`.
    pub fn new(
        base_url: Url,
        credentials: Option<Credentials>,
        transport: &TransportConfig,
    ) -> Result<Self, Error> {
        let http = transport.build_client()?;
        Ok(Self {
            http,
            base_url,
            credentials,
            timeout: transport.timeout,
        })
    }

    /// Create a client around a pre-built `reqwest::Client`.
    pub fn with_client(
        http: reqwest::Client,
        base_url: Url,
        credentials: Option<Credentials>,
    ) -> Self {
        Self {
            http,
            base_url,
            credentials,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    // ── Endpoints ────────────────────────────────────────────────────

    /// Every bouquet with its services.
    ///
    /// `GET /web/getallservices`
    pub async fn all_services(&self) -> Result<ServiceListDocument, Error> {
        let url = self.endpoint_url(ALL_SERVICES, None)?;
        self.get_service_list(url).await
    }

    /// The services inside one bouquet.
    ///
    /// `GET /web/getservices?sRef={bouquet_ref}`
    pub async fn bouquet_services(&self, bouquet_ref: &str) -> Result<ServiceListDocument, Error> {
        let url = self.endpoint_url(SERVICES, Some(bouquet_ref))?;
        self.get_service_list(url).await
    }

    /// Switch the live output to a service and return the raw status.
    ///
    /// `GET /web/zap?sRef={service_ref}`
    pub async fn zap(&self, service_ref: &str) -> Result<StatusCode, Error> {
        let url = self.endpoint_url(ZAP, Some(service_ref))?;
        let resp = self.get(url).await?;
        Ok(resp.status())
    }

    // ── Request helpers ──────────────────────────────────────────────

    /// Build `{base}{path}` with an optional `sRef` query value.
    fn endpoint_url(&self, path: &str, service_ref: Option<&str>) -> Result<Url, Error> {
        let mut url = self.base_url.join(path)?;
        if let Some(sref) = service_ref {
            url.query_pairs_mut().append_pair(SERVICE_REF_PARAM, sref);
        }
        Ok(url)
    }

    async fn get(&self, url: Url) -> Result<reqwest::Response, Error> {
        debug!("GET {}", url);

        let mut request = self.http.get(url);
        if let Some(ref credentials) = self.credentials {
            request = credentials.apply(request);
        }

        request.send().await.map_err(|e| {
            if e.is_timeout() {
                Error::Timeout {
                    timeout_secs: self.timeout.as_secs(),
                }
            } else {
                Error::Transport(e)
            }
        })
    }

    async fn get_service_list(&self, url: Url) -> Result<ServiceListDocument, Error> {
        let resp = self.get(url.clone()).await?;

        let status = resp.status();
        if status != StatusCode::OK {
            return Err(Error::HttpStatus {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let body = resp.text().await.map_err(Error::Transport)?;
        let document = ServiceListDocument::parse(&body)?;
        debug!(services = document.len(), "decoded service list");
        Ok(document)
    }
}
