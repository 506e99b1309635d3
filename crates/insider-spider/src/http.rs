use crate::Result;
use bytes::Bytes;
use dotenv::var;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, trace};

pub(crate) use reqwest::Client as HttpClient;

/// Root of every EDGAR URL the spider requests.
pub const SEC_BASE_URL: &str = "https://www.sec.gov";

// the SEC rejects anonymous traffic; it wants a contact in the User-Agent
const DEFAULT_USER_AGENT: &str = "insider-spider (contact@example.com)";

/// HTTP settings shared by every request the spider makes.
#[derive(Clone, Debug)]
pub struct Config {
    /// Scheme and host, without a trailing slash.
    pub base_url: String,
    pub user_agent: String,
    /// Pause before each index or directory-listing request.
    pub index_delay: Duration,
    /// Pause before each Form 4 document request.
    pub document_delay: Duration,
    /// Per-request ceiling.
    pub timeout: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: SEC_BASE_URL.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            index_delay: Duration::from_millis(200),
            document_delay: Duration::from_millis(150),
            timeout: Duration::from_secs(30),
        }
    }
}

impl Config {
    /// Read `USER_AGENT` and `SEC_BASE_URL` from the environment, falling back to the defaults.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(user_agent) = var("USER_AGENT") {
            config.user_agent = user_agent;
        }
        if let Ok(base_url) = var("SEC_BASE_URL") {
            config.base_url = base_url.trim_end_matches('/').to_string();
        }
        trace!("http config: {config:?}");
        config
    }

    /// Same config with both politeness delays removed.
    pub fn without_delays(mut self) -> Self {
        self.index_delay = Duration::ZERO;
        self.document_delay = Duration::ZERO;
        self
    }
}

/// Build the reqwest client: fixed User-Agent, gzip/deflate decoding and a request timeout.
pub fn build_client(config: &Config) -> Result<HttpClient> {
    let client = reqwest::ClientBuilder::new()
        .user_agent(&config.user_agent)
        .gzip(true)
        .deflate(true)
        .timeout(config.timeout)
        .build()?;
    Ok(client)
}

/// Polite, sequential EDGAR client.
///
/// Every request sleeps for the configured delay before it is sent, and nothing is ever
/// requested concurrently.
#[derive(Clone, Debug)]
pub struct Spider {
    client: HttpClient,
    config: Config,
}

impl Spider {
    pub fn new(config: Config) -> Result<Self> {
        let client = build_client(&config)?;
        Ok(Self { client, config })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// GET `url` after sleeping for `delay`; any non-2xx status is an error.
    pub async fn get(&self, url: &str, delay: Duration) -> Result<Bytes> {
        tokio::time::sleep(delay).await;

        trace!("GET {url}");
        let response = self
            .client
            .get(url)
            .send()
            .await
            .and_then(|response| response.error_for_status())
            .map_err(|err| {
                debug!("failed to fetch {url}, error({err})");
                err
            })?;

        let body = response.bytes().await?;
        trace!("received {} bytes from {url}", body.len());
        Ok(body)
    }

    /// GET `url` and decode the body as Latin-1.
    pub async fn get_text(&self, url: &str, delay: Duration) -> Result<String> {
        let body = self.get(url, delay).await?;
        Ok(decode_latin1(&body))
    }

    /// GET `url` and deserialize the JSON body.
    pub async fn get_json<T: DeserializeOwned>(&self, url: &str, delay: Duration) -> Result<T> {
        let body = self.get(url, delay).await?;
        let data = serde_json::from_slice(&body).map_err(|err| {
            debug!("failed to deserialize {url}, error({err})");
            err
        })?;
        Ok(data)
    }
}

// every byte maps onto the code point of the same value, so decoding never fails
pub(crate) fn decode_latin1(bytes: &[u8]) -> String {
    bytes.iter().map(|&byte| byte as char).collect()
}
