use dw_core::{Error, Result};
use url::Url;

/// Site-relative path of the main article feed.
pub const ARTICLE_FEED_PATH: &str = "data/articoli.json";

/// Site-relative path of the model-spotlight feed.
pub const SPOTLIGHT_FEED_PATH: &str = "data/ia.json";

/// Where a feed lives. Deployments sometimes serve the page from a
/// subdirectory while the feed stays at the site root, and sometimes
/// mirror the whole tree, so a sited endpoint tries the root-anchored
/// URL first and the page-relative one second.
#[derive(Debug, Clone)]
pub enum FeedEndpoint {
    /// A path resolved against the page that embeds the feed.
    Sited { page: Url, path: String },
    /// One absolute URL, no fallback chain.
    Direct(Url),
}

impl FeedEndpoint {
    pub fn new(page: Url, path: impl Into<String>) -> Self {
        let path = path.into();
        let path = path.trim_start_matches('/').to_string();
        Self::Sited { page, path }
    }

    pub fn direct(url: Url) -> Self {
        Self::Direct(url)
    }

    /// Human-readable name for logs and errors.
    pub fn label(&self) -> &str {
        match self {
            Self::Sited { path, .. } => path,
            Self::Direct(url) => url.as_str(),
        }
    }

    /// Candidate URLs in fetch order, deduplicated. At the site root both
    /// anchors resolve to the same URL and only one candidate remains.
    pub fn candidates(&self) -> Result<Vec<Url>> {
        let (page, path) = match self {
            Self::Direct(url) => return Ok(vec![url.clone()]),
            Self::Sited { page, path } => (page, path),
        };

        let rooted = page
            .join(&format!("/{path}"))
            .map_err(|e| Error::InvalidUrl(format!("{path}: {e}")))?;
        let relative = page
            .join(path)
            .map_err(|e| Error::InvalidUrl(format!("{path}: {e}")))?;

        let mut out = vec![rooted];
        if relative != out[0] {
            out.push(relative);
        }
        Ok(out)
    }
}
