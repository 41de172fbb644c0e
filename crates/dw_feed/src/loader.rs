use std::sync::Arc;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use async_trait::async_trait;
use dw_core::{Article, Error, Result};
use tracing::{debug, info, warn};
use url::Url;

use crate::endpoint::FeedEndpoint;
use crate::payload::{self, FeedPayload};

/// User agent sent with feed requests.
pub const DEFAULT_USER_AGENT: &str = "DigitalWorkflowBot/1.0 (+https://fugallo.it/)";

/// Per-request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(12);

const USER_AGENT_VAR: &str = "DW_UA";
const TIMEOUT_VAR: &str = "DW_HTTP_TIMEOUT";

#[derive(Debug, Clone)]
pub struct LoaderConfig {
    pub user_agent: String,
    pub timeout: Duration,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl LoaderConfig {
    /// Defaults with `DW_UA` and `DW_HTTP_TIMEOUT` (seconds, fractional
    /// allowed) applied on top. Blank or unusable values are ignored.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(ua) = std::env::var(USER_AGENT_VAR) {
            if !ua.trim().is_empty() {
                config.user_agent = ua;
            }
        }
        if let Ok(raw) = std::env::var(TIMEOUT_VAR) {
            if let Ok(secs) = raw.trim().parse::<f64>() {
                if secs.is_finite() && secs > 0.0 {
                    config.timeout = Duration::from_secs_f64(secs);
                }
            }
        }
        config
    }
}

/// Fetches one URL's body. Split from the loader so tests can hand back
/// canned bodies without a socket.
#[async_trait]
pub trait FeedTransport: Send + Sync {
    async fn fetch(&self, url: &Url) -> Result<String>;
}

/// The production transport: a shared reqwest client with the configured
/// user agent and timeout, asking intermediaries not to serve cached
/// copies.
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    pub fn new(config: &LoaderConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(config.user_agent.clone())
            .timeout(config.timeout)
            .build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl FeedTransport for HttpTransport {
    async fn fetch(&self, url: &Url) -> Result<String> {
        let response = self
            .client
            .get(url.clone())
            .header(reqwest::header::CACHE_CONTROL, "no-cache")
            .send()
            .await?;
        let status = response.status();
        if !status.is_success() {
            return Err(Error::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }
        Ok(response.text().await?)
    }
}

/// A loaded feed, normalized: undated articles inherit the feed-level
/// timestamp, and the list is sorted newest first with undated entries
/// at the end. Ties keep their feed order.
#[derive(Debug, Clone, Default)]
pub struct Feed {
    pub articles: Vec<Article>,
    pub last_updated: Option<String>,
}

impl Feed {
    fn from_payload(payload: FeedPayload) -> Self {
        let FeedPayload {
            mut articles,
            last_updated,
        } = payload;

        if let Some(default_date) = last_updated
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
        {
            for article in &mut articles {
                let undated = article
                    .published
                    .as_deref()
                    .map_or(true, |s| s.trim().is_empty());
                if undated {
                    article.published = Some(default_date.to_string());
                }
            }
        }
        articles.sort_by(|a, b| b.published_at().cmp(&a.published_at()));

        Self {
            articles,
            last_updated,
        }
    }
}

/// Loads feeds through the candidate chain: fetch and JSON failures fall
/// through to the next URL, while a well-formed body in an unknown shape
/// ends the chain as an empty feed.
pub struct FeedLoader {
    transport: Arc<dyn FeedTransport>,
}

impl FeedLoader {
    pub fn new(config: &LoaderConfig) -> Result<Self> {
        Ok(Self {
            transport: Arc::new(HttpTransport::new(config)?),
        })
    }

    /// Loader over a caller-supplied transport.
    pub fn with_transport(transport: Arc<dyn FeedTransport>) -> Self {
        Self { transport }
    }

    pub async fn load(&self, endpoint: &FeedEndpoint) -> Result<Feed> {
        let mut last_err = None;
        for url in endpoint.candidates()? {
            let busted = cache_bust(&url);
            debug!(url = %busted, "fetching feed");
            match self.transport.fetch(&busted).await {
                Ok(body) => match payload::decode(&body) {
                    Ok(payload) => {
                        let feed = Feed::from_payload(payload);
                        info!(url = %url, articles = feed.articles.len(), "feed loaded");
                        return Ok(feed);
                    }
                    Err(Error::Shape(shape)) => {
                        warn!(url = %url, shape = %shape, "feed body has no article list");
                        return Ok(Feed::default());
                    }
                    Err(e) => {
                        warn!(url = %url, error = %e, "feed candidate failed");
                        last_err = Some(e);
                    }
                },
                Err(e) => {
                    warn!(url = %url, error = %e, "feed candidate failed");
                    last_err = Some(e);
                }
            }
        }
        Err(last_err.unwrap_or_else(|| Error::Unavailable(endpoint.label().to_string())))
    }
}

/// Append the timestamp query parameter that defeats stale CDN copies.
fn cache_bust(url: &Url) -> Url {
    let millis = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or(0);
    let mut busted = url.clone();
    busted
        .query_pairs_mut()
        .append_pair("nocache", &millis.to_string());
    busted
}
