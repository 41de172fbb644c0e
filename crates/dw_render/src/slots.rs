use std::collections::HashSet;

use dw_core::{Article, RuleTable, Session};

use crate::card::Card;

/// Model panel keys in display order. `altri` is the catch-all for
/// models the page has no dedicated panel for.
pub const MODEL_PANELS: &[&str] = &["chatgpt", "copilot", "gemini", "claude", "altri", "miia"];

const CATCH_ALL_PANEL: &str = "altri";

/// How the featured slot consumes the head of the filtered list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeaturedMode {
    /// A single lead article.
    Lead,
    /// A "top stories" strip of the first `n` articles.
    Top(usize),
}

/// Slot layout parameters. `latest_offset` declares how many leading
/// articles the featured slot already consumed, so the latest slot can
/// skip them instead of showing duplicates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageConfig {
    pub featured: FeaturedMode,
    pub latest_offset: usize,
    pub most_read: usize,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            featured: FeaturedMode::Lead,
            latest_offset: 1,
            most_read: 3,
        }
    }
}

/// The assembled page: every display slot as cards, plus whether a
/// "load more" control should be offered.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PageSlots {
    pub featured: Vec<Card>,
    pub latest: Vec<Card>,
    pub most_read: Vec<Card>,
    pub has_more: bool,
}

/// One fixed model-spotlight slot: its key and, when the feed carried a
/// matching entry, the article to show.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelPanel {
    pub key: String,
    pub card: Option<Card>,
}

/// Map the session's filtered list onto the page slots. Pure: the
/// session is only read, and calling this repeatedly with the same
/// session yields the same slots.
pub fn build_page(session: &Session, config: &PageConfig) -> PageSlots {
    let filtered = session.filtered();
    let rules = session.rules();

    let featured_count = match config.featured {
        FeaturedMode::Lead => 1,
        FeaturedMode::Top(n) => n,
    };
    let featured = filtered
        .iter()
        .take(featured_count)
        .map(|a| Card::from_article(a, rules))
        .collect();

    let visible = session.pager().visible();
    let start = config.latest_offset.min(filtered.len());
    let end = (config.latest_offset.saturating_add(visible)).min(filtered.len());
    let latest = filtered[start..end]
        .iter()
        .map(|a| Card::from_article(a, rules))
        .collect();

    PageSlots {
        featured,
        latest,
        most_read: most_read(&filtered, rules, config.most_read),
        has_more: config.latest_offset.saturating_add(visible) < filtered.len(),
    }
}

/// First `limit` articles deduplicated by link, falling back to title
/// for entries without one. Entries with neither are kept as-is. There
/// is no readership telemetry behind this slot; it is a presentable
/// sample, nothing more.
fn most_read(filtered: &[Article], rules: &RuleTable, limit: usize) -> Vec<Card> {
    let mut seen = HashSet::new();
    let mut out = Vec::new();
    for article in filtered {
        if out.len() >= limit {
            break;
        }
        let link = article.link_text();
        let key = if link.is_empty() {
            article.title_text().to_string()
        } else {
            link.to_string()
        };
        if key.is_empty() || seen.insert(key) {
            out.push(Card::from_article(article, rules));
        }
    }
    out
}

/// Assign each spotlight entry to the panel named after its model, with
/// unknown models pooled under the catch-all. The first entry for a
/// model claims the panel; later duplicates are ignored.
pub fn build_model_panels(
    articles: &[Article],
    rules: &RuleTable,
    keys: &[&str],
) -> Vec<ModelPanel> {
    let mut panels: Vec<ModelPanel> = keys
        .iter()
        .map(|key| ModelPanel {
            key: (*key).to_string(),
            card: None,
        })
        .collect();

    for article in articles {
        let model = article.model_text().to_lowercase();
        let target = if keys.contains(&model.as_str()) {
            model.as_str()
        } else {
            CATCH_ALL_PANEL
        };
        if let Some(panel) = panels.iter_mut().find(|p| p.key == target) {
            if panel.card.is_none() {
                panel.card = Some(Card::from_article(article, rules));
            }
        }
    }
    panels
}
