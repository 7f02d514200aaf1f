use crate::config::ProbeConfig;
use async_trait::async_trait;
use reqwest::Client;
use std::error::Error as StdError;
use std::time::Duration;
use thiserror::Error;
use url::Url;

/// Ways a reachability probe can fail before producing a status code
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    #[error("connection timed out")]
    Timeout,
    #[error("could not connect: {0}")]
    Connect(String),
    #[error("too many redirects")]
    TooManyRedirects,
    #[error("TLS failure: {0}")]
    Tls(String),
    #[error("invalid URL: {0}")]
    InvalidUrl(String),
    #[error("{0}")]
    Other(String),
}

/// Capability to perform one GET and report the response status.
#[async_trait]
pub trait Fetcher: Send + Sync {
    async fn get(&self, url: &str, timeout: Duration) -> Result<u16, FetchError>;
}

pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new(config: &ProbeConfig) -> Result<Self, reqwest::Error> {
        let mut builder = Client::builder()
            .timeout(config.timeout())
            .user_agent(config.user_agent.clone())
            .redirect(reqwest::redirect::Policy::limited(config.max_redirects));

        if !config.use_system_proxy {
            builder = builder.no_proxy();
        }

        Ok(Self {
            client: builder.build()?,
        })
    }

    fn classify_error(err: reqwest::Error) -> FetchError {
        if err.is_builder() {
            return FetchError::InvalidUrl(err.to_string());
        }
        if err.is_timeout() {
            return FetchError::Timeout;
        }
        if err.is_redirect() {
            return FetchError::TooManyRedirects;
        }
        // The top-level message embeds the URL, so only the causes are searched
        if let Some(tls) = tls_cause(&err) {
            return FetchError::Tls(tls);
        }
        if err.is_connect() {
            return FetchError::Connect(err.to_string());
        }
        FetchError::Other(err.to_string())
    }
}

/// Wording TLS backends use when a handshake or certificate check fails.
/// A plain-HTTP peer answering a TLS hello shows up as "wrong version number"
/// (OpenSSL) or "corrupt message" (rustls).
const TLS_MARKERS: &[&str] = &[
    "certificate",
    "ssl",
    "tls",
    "handshake",
    "wrong version number",
    "corrupt message",
];

fn tls_cause(err: &reqwest::Error) -> Option<String> {
    let mut source = err.source();
    while let Some(cause) = source {
        let message = cause.to_string();
        let lower = message.to_lowercase();
        if TLS_MARKERS.iter().any(|marker| lower.contains(marker)) {
            return Some(message);
        }
        source = cause.source();
    }
    None
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn get(&self, url: &str, timeout: Duration) -> Result<u16, FetchError> {
        let parsed = Url::parse(url).map_err(|e| FetchError::InvalidUrl(e.to_string()))?;
        if parsed.host_str().map_or(true, str::is_empty) {
            return Err(FetchError::InvalidUrl("missing host".to_string()));
        }

        let response = self
            .client
            .get(parsed)
            .timeout(timeout)
            .send()
            .await
            .map_err(|e| {
                log::debug!("Probe of {url} failed: {e:?}");
                Self::classify_error(e)
            })?;

        Ok(response.status().as_u16())
    }
}
