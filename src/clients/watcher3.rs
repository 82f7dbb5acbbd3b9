use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Certificate, Client};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Value, json};
use thiserror::Error;
use tracing::{debug, error, info, warn};
use url::Url;

use crate::config::Watcher3Config;
use crate::constants::USER_AGENT;
use crate::models::watcher3::WatcherConfig;

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("TLS error: {0}")]
    Tls(String),

    #[error("Invalid Watcher3 URL: {0}")]
    Url(#[from] url::ParseError),

    #[error("Failed to build HTTP client: {0}")]
    Client(String),

    #[error("Watcher3 response has no '{0}' payload")]
    MissingPayload(String),

    #[error("Watcher3 '{key}' payload is malformed: {message}")]
    InvalidPayload { key: String, message: String },
}

/// Body of a Watcher3 reply. Bodies that are not JSON are kept as text.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum SourceResponse {
    Json(Value),
    Text(String),
}

impl SourceResponse {
    /// The envelope returned in place of a transport error.
    #[must_use]
    pub fn connection_failure(message: impl Into<String>) -> Self {
        Self::Json(json!({ "response": false, "error": message.into() }))
    }

    #[must_use]
    pub fn from_body(body: String) -> Self {
        serde_json::from_str(&body).map_or(Self::Text(body), Self::Json)
    }

    /// Watcher3 marks every reply with `"response": true|false`.
    #[must_use]
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Json(value) if value.get("response") == Some(&Value::Bool(true)))
    }

    #[must_use]
    pub fn error_message(&self) -> Option<&str> {
        match self {
            Self::Json(value) => value.get("error").and_then(Value::as_str),
            Self::Text(text) => Some(text),
        }
    }

    #[must_use]
    pub fn field(&self, key: &str) -> Option<&Value> {
        match self {
            Self::Json(value) => value.get(key).filter(|v| !v.is_null()),
            Self::Text(_) => None,
        }
    }

    pub fn payload<T: DeserializeOwned>(&self, key: &str) -> Result<T, SourceError> {
        let value = self
            .field(key)
            .ok_or_else(|| SourceError::MissingPayload(key.to_string()))?;
        T::deserialize(value).map_err(|e| SourceError::InvalidPayload {
            key: key.to_string(),
            message: e.to_string(),
        })
    }
}

/// Access to Watcher3's single `/api` endpoint.
#[async_trait]
pub trait SourceApi: Send + Sync {
    /// Calls `mode` with extra query parameters.
    ///
    /// Connection failures come back as [`SourceResponse::connection_failure`];
    /// only TLS problems are errors.
    async fn get_data(
        &self,
        mode: &str,
        params: &[(&str, &str)],
    ) -> Result<SourceResponse, SourceError>;
}

#[derive(Debug, Clone)]
pub struct WatcherClient {
    client: Client,
    base_url: String,
    apikey: String,
    host_url: String,
}

impl WatcherClient {
    pub fn new(config: &Watcher3Config) -> Result<Self, SourceError> {
        let mut builder = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(config.request_timeout_seconds))
            .pool_max_idle_per_host(10);

        if let Some(path) = &config.ssl_cert {
            let pem = std::fs::read(path).map_err(|e| {
                SourceError::Tls(format!(
                    "Could not find a suitable TLS CA certificate bundle, invalid path: {} ({e})",
                    path.display()
                ))
            })?;
            let certificates = Certificate::from_pem_bundle(&pem).map_err(|e| {
                SourceError::Tls(format!(
                    "Invalid TLS CA certificate bundle {}: {e}",
                    path.display()
                ))
            })?;
            for certificate in certificates {
                builder = builder.add_root_certificate(certificate);
            }
        } else if !config.ssl_verify {
            warn!("TLS certificate verification for Watcher3 is disabled");
            builder = builder.danger_accept_invalid_certs(true);
        }

        let client = builder
            .build()
            .map_err(|e| SourceError::Client(e.to_string()))?;

        Ok(Self {
            client,
            base_url: config.base_url(),
            apikey: config.apikey.clone(),
            host_url: config.host_url(),
        })
    }

    /// Builds the client and fetches Watcher3's configuration, which every
    /// profile and root folder answer is derived from.
    pub async fn connect(config: &Watcher3Config) -> Result<(Self, WatcherConfig), SourceError> {
        let client = Self::new(config)?;
        let response = client.get_data("getconfig", &[]).await?;
        if let Some(message) = response.error_message().filter(|_| !response.is_success()) {
            error!("Watcher3 refused the configuration request: {message}");
        }
        let watcher_config = response.payload("config")?;
        info!("Fetched Watcher3 configuration from {}", client.host_url);
        Ok((client, watcher_config))
    }

    fn build_url(&self, mode: &str, params: &[(&str, &str)]) -> Result<Url, SourceError> {
        let mut url = Url::parse(&self.base_url)?;
        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("apikey", &self.apikey);
            pairs.append_pair("mode", mode);
            for (key, value) in params {
                pairs.append_pair(key, value);
            }
        }
        Ok(url)
    }
}

fn is_tls_error(err: &reqwest::Error) -> bool {
    let mut source = std::error::Error::source(err);
    while let Some(inner) = source {
        let message = inner.to_string().to_lowercase();
        if message.contains("certificate") || message.contains("tls") {
            return true;
        }
        source = inner.source();
    }
    false
}

#[async_trait]
impl SourceApi for WatcherClient {
    async fn get_data(
        &self,
        mode: &str,
        params: &[(&str, &str)],
    ) -> Result<SourceResponse, SourceError> {
        let url = self.build_url(mode, params)?;

        debug!(mode, ?params, "Fetching Watcher3 data");

        let response = match self.client.get(url).send().await {
            Ok(response) => response,
            Err(e) if is_tls_error(&e) => {
                error!(error = %e, "TLS handshake with Watcher3 failed");
                return Err(SourceError::Tls(e.to_string()));
            }
            Err(e) => {
                let message = format!("Could not connect to host {}", self.host_url);
                error!(error = %e, "{message}");
                return Ok(SourceResponse::connection_failure(message));
            }
        };

        match response.text().await {
            Ok(body) => Ok(SourceResponse::from_body(body)),
            Err(e) => {
                let message = format!("Could not read response from host {}", self.host_url);
                error!(error = %e, "{message}");
                Ok(SourceResponse::connection_failure(message))
            }
        }
    }
}
