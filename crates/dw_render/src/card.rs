use dw_core::{Article, RuleTable};
use url::Url;

/// Title shown when the feed entry has none.
pub const UNTITLED: &str = "(no title)";

/// Source shown when the feed entry has none.
pub const DEFAULT_SOURCE: &str = "Digital Workflow";

/// Display-ready projection of one article. Text fields are still raw
/// feed text; escaping happens when a renderer embeds them in markup.
/// URLs are parsed and scheme-checked here so renderers never see a
/// malformed or scriptable href.
#[derive(Debug, Clone, PartialEq)]
pub struct Card {
    pub title: String,
    pub description: String,
    pub source: String,
    pub topic: String,
    pub link: Option<Url>,
    pub image: Option<Url>,
    pub date_label: String,
}

impl Card {
    pub fn from_article(article: &Article, rules: &RuleTable) -> Self {
        let title = article.title_text();
        let source = article.source_text();
        Self {
            title: if title.is_empty() {
                UNTITLED.to_string()
            } else {
                title.to_string()
            },
            description: article.description_text().to_string(),
            source: if source.is_empty() {
                DEFAULT_SOURCE.to_string()
            } else {
                source.to_string()
            },
            topic: rules.classify(article),
            link: safe_url(article.link_text()),
            image: safe_url(article.image_text()),
            date_label: article
                .published_at()
                .map(|d| d.format("%d/%m/%Y").to_string())
                .unwrap_or_default(),
        }
    }
}

/// Parse a URL for embedding. Anything that does not parse as an
/// absolute http(s) URL is dropped rather than rendered, so a feed entry
/// can never smuggle a `javascript:` href into a card.
pub fn safe_url(raw: &str) -> Option<Url> {
    let url = Url::parse(raw).ok()?;
    match url.scheme() {
        "http" | "https" => Some(url),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rules() -> RuleTable {
        RuleTable::default()
    }

    #[test]
    fn fills_display_fallbacks() {
        let card = Card::from_article(&Article::default(), &rules());
        assert_eq!(card.title, UNTITLED);
        assert_eq!(card.source, DEFAULT_SOURCE);
        assert_eq!(card.description, "");
        assert_eq!(card.date_label, "");
        assert_eq!(card.topic, "tools");
    }

    #[test]
    fn keeps_feed_text_and_classifies() {
        let article = Article {
            title: Some("Notion vs ClickUp".to_string()),
            description: Some("A comparison".to_string()),
            source: Some("DW".to_string()),
            published: Some("2025-03-01T10:00:00Z".to_string()),
            ..Article::default()
        };
        let card = Card::from_article(&article, &rules());
        assert_eq!(card.title, "Notion vs ClickUp");
        assert_eq!(card.source, "DW");
        assert_eq!(card.topic, "notion");
        assert_eq!(card.date_label, "01/03/2025");
    }

    #[test]
    fn invalid_links_degrade_to_none() {
        let article = Article {
            link: Some("not a url".to_string()),
            image: Some("images/cover.jpg".to_string()),
            ..Article::default()
        };
        let card = Card::from_article(&article, &rules());
        assert!(card.link.is_none());
        assert!(card.image.is_none());
    }

    #[test]
    fn scriptable_schemes_are_rejected() {
        assert!(safe_url("javascript:alert(1)").is_none());
        assert!(safe_url("data:text/html,hi").is_none());
        assert!(safe_url("https://fugallo.it/a").is_some());
        assert!(safe_url("http://fugallo.it/a").is_some());
    }

    #[test]
    fn unparsable_dates_leave_the_label_empty() {
        let article = Article {
            published: Some("yesterday-ish".to_string()),
            ..Article::default()
        };
        let card = Card::from_article(&article, &rules());
        assert_eq!(card.date_label, "");
    }
}
