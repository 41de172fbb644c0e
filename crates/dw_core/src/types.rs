use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

/// One feed entry. Every field is optional: the feed is produced outside
/// this codebase and the pipeline must keep rendering whatever subset is
/// present. Canonical names are English; aliases accept the production
/// feed's Italian keys and the variants seen across feed copies.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Article {
    #[serde(default, alias = "titolo")]
    pub title: Option<String>,
    #[serde(default, alias = "descrizione")]
    pub description: Option<String>,
    #[serde(default, alias = "fonte")]
    pub source: Option<String>,
    #[serde(default, alias = "url")]
    pub link: Option<String>,
    #[serde(default, alias = "publishedDate", alias = "data", alias = "date")]
    pub published: Option<String>,
    #[serde(default, alias = "img", alias = "thumbnail")]
    pub image: Option<String>,
    #[serde(default, alias = "categoria")]
    pub category: Option<String>,
    #[serde(default, alias = "tag")]
    pub tags: Vec<String>,
    #[serde(default, alias = "modello")]
    pub model: Option<String>,
}

fn text(field: &Option<String>) -> &str {
    field.as_deref().map(str::trim).unwrap_or("")
}

impl Article {
    pub fn title_text(&self) -> &str {
        text(&self.title)
    }

    pub fn description_text(&self) -> &str {
        text(&self.description)
    }

    pub fn source_text(&self) -> &str {
        text(&self.source)
    }

    pub fn link_text(&self) -> &str {
        text(&self.link)
    }

    pub fn image_text(&self) -> &str {
        text(&self.image)
    }

    pub fn category_text(&self) -> &str {
        text(&self.category)
    }

    pub fn model_text(&self) -> &str {
        text(&self.model)
    }

    /// First non-blank tag, if any.
    pub fn first_tag(&self) -> Option<&str> {
        self.tags.iter().map(|t| t.trim()).find(|t| !t.is_empty())
    }

    /// Lower-cased `title description source` haystack for free-text search.
    pub fn search_text(&self) -> String {
        format!(
            "{} {} {}",
            self.title_text(),
            self.description_text(),
            self.source_text()
        )
        .trim()
        .to_lowercase()
    }

    /// Published date parsed leniently: RFC 3339 first, then the bare
    /// ISO forms feeds tend to carry. Anything else is treated as undated.
    pub fn published_at(&self) -> Option<DateTime<Utc>> {
        let raw = self.published.as_deref()?.trim();
        if raw.is_empty() {
            return None;
        }
        if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
            return Some(dt.with_timezone(&Utc));
        }
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S") {
            return Some(dt.and_utc());
        }
        if let Ok(d) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
            return d.and_hms_opt(0, 0, 0).map(|dt| dt.and_utc());
        }
        None
    }
}
