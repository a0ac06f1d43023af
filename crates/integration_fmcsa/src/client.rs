//! FMCSA QCMobile client
//!
//! HTTP client for carrier lookups by docket (MC) number.

use std::{fmt, time::Duration};

use async_trait::async_trait;
use reqwest::{Client, Url, header::ACCEPT};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, instrument, warn};

use crate::models::{Carrier, CarrierEnvelope};

/// Placeholder written into logged URLs instead of the web key
const REDACTED: &str = "***";

/// FMCSA client errors
#[derive(Debug, Error)]
pub enum FmcsaError {
    /// No web key configured, so no request can be made
    #[error("FMCSA API key not configured")]
    MissingWebKey,

    /// Configured base URL cannot carry a lookup path
    #[error("Invalid base URL: {0}")]
    InvalidBaseUrl(String),

    /// Request did not complete within the configured timeout
    #[error("Request timed out after {0}s")]
    Timeout(u64),

    /// Request to the registry failed
    #[error("Request failed: {0}")]
    RequestFailed(String),

    /// Registry answered with a non-success status
    #[error("HTTP {status}: {body}")]
    HttpStatus { status: u16, body: String },

    /// Failed to parse response from the registry
    #[error("Parse error: {0}")]
    ParseError(String),
}

/// FMCSA registry configuration
#[derive(Clone, Serialize, Deserialize)]
pub struct FmcsaConfig {
    /// QCMobile API base URL (default: <https://mobile.fmcsa.dot.gov/qc/services>)
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Web key issued by FMCSA
    #[serde(default, skip_serializing)]
    pub web_key: Option<String>,

    /// Request timeout in seconds (default: 30)
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

fn default_base_url() -> String {
    "https://mobile.fmcsa.dot.gov/qc/services".to_string()
}

const fn default_timeout() -> u64 {
    30
}

impl Default for FmcsaConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            web_key: None,
            timeout_secs: default_timeout(),
        }
    }
}

impl fmt::Debug for FmcsaConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FmcsaConfig")
            .field("base_url", &self.base_url)
            .field("web_key", &self.web_key.as_ref().map(|_| REDACTED))
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

/// Carrier lookup against a registry
#[async_trait]
pub trait CarrierLookup: Send + Sync {
    /// Look up the carrier registered under a docket (MC) number
    ///
    /// Returns `Ok(None)` when the registry answers without a carrier.
    async fn lookup_docket(&self, docket: &str) -> Result<Option<Carrier>, FmcsaError>;
}

/// FMCSA QCMobile HTTP client implementation
#[derive(Debug)]
pub struct FmcsaClient {
    client: Client,
    config: FmcsaConfig,
}

impl FmcsaClient {
    /// Create a new FMCSA client with the given configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be initialized.
    pub fn new(config: FmcsaConfig) -> Result<Self, FmcsaError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| FmcsaError::RequestFailed(e.to_string()))?;

        Ok(Self { client, config })
    }

    /// Build `{base_url}/carriers/docket-number/{docket}?webKey={key}`
    fn build_docket_url(&self, docket: &str, web_key: &str) -> Result<Url, FmcsaError> {
        let mut url = Url::parse(&self.config.base_url)
            .map_err(|e| FmcsaError::InvalidBaseUrl(e.to_string()))?;

        url.path_segments_mut()
            .map_err(|()| FmcsaError::InvalidBaseUrl(self.config.base_url.clone()))?
            .pop_if_empty()
            .extend(["carriers", "docket-number", docket]);
        url.query_pairs_mut().append_pair("webKey", web_key);

        Ok(url)
    }

    /// Copy of `url` that is safe to log
    fn redact(url: &Url) -> Url {
        let mut redacted = url.clone();
        redacted.query_pairs_mut().clear().append_pair("webKey", REDACTED);
        redacted
    }

    fn map_send_error(&self, err: reqwest::Error) -> FmcsaError {
        if err.is_timeout() {
            FmcsaError::Timeout(self.config.timeout_secs)
        } else {
            // The request URL carries the web key
            FmcsaError::RequestFailed(err.without_url().to_string())
        }
    }
}

#[async_trait]
impl CarrierLookup for FmcsaClient {
    #[instrument(skip(self))]
    async fn lookup_docket(&self, docket: &str) -> Result<Option<Carrier>, FmcsaError> {
        let web_key = self
            .config
            .web_key
            .as_deref()
            .filter(|key| !key.is_empty())
            .ok_or(FmcsaError::MissingWebKey)?;

        let url = self.build_docket_url(docket, web_key)?;
        info!(url = %Self::redact(&url), "Requesting carrier from FMCSA");

        let response = self
            .client
            .get(url)
            .header(ACCEPT, "application/json")
            .send()
            .await
            .map_err(|e| self.map_send_error(e))?;

        let status = response.status();
        let headers = response.headers().clone();
        let body = response
            .text()
            .await
            .map_err(|e| self.map_send_error(e))?;

        info!(status = %status, headers = ?headers, body = %body, "FMCSA responded");

        if !status.is_success() {
            warn!(
                status = %status,
                headers = ?headers,
                body = %body,
                "FMCSA returned an error status"
            );
            return Err(FmcsaError::HttpStatus {
                status: status.as_u16(),
                body,
            });
        }

        let envelope: CarrierEnvelope =
            serde_json::from_str(&body).map_err(|e| FmcsaError::ParseError(e.to_string()))?;

        Ok(envelope.into_carrier())
    }
}
