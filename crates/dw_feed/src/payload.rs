use dw_core::{Article, Error, Result};
use serde::Deserialize;
use serde_json::Value;

/// Decoded feed body: the article list plus the feed-level timestamp
/// some copies of the feed carry.
#[derive(Debug, Clone, Default)]
pub struct FeedPayload {
    pub articles: Vec<Article>,
    pub last_updated: Option<String>,
}

/// The two shapes the feed has shipped in: a bare article array, and an
/// object wrapping the array under `items` (or `Items`).
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Payload {
    Bare(Vec<Article>),
    Wrapped(Wrapper),
    Other(Value),
}

#[derive(Debug, Deserialize)]
struct Wrapper {
    #[serde(default, alias = "Items")]
    items: Vec<Article>,
    #[serde(default)]
    last_updated: Option<String>,
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Decode one feed body. Invalid JSON is a `Json` error; valid JSON that
/// is neither of the two shapes is a `Shape` error, which callers treat
/// as an empty feed rather than a fetch failure.
pub fn decode(body: &str) -> Result<FeedPayload> {
    match serde_json::from_str::<Payload>(body)? {
        Payload::Bare(articles) => Ok(FeedPayload {
            articles,
            last_updated: None,
        }),
        Payload::Wrapped(wrapper) => Ok(FeedPayload {
            articles: wrapper.items,
            last_updated: wrapper.last_updated,
        }),
        Payload::Other(value) => Err(Error::Shape(kind(&value).to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_a_bare_array() {
        let payload = decode(r#"[{"titolo": "Notion 3.0"}, {"title": "Canva update"}]"#).unwrap();
        assert_eq!(payload.articles.len(), 2);
        assert_eq!(payload.articles[0].title_text(), "Notion 3.0");
        assert!(payload.last_updated.is_none());
    }

    #[test]
    fn decodes_a_wrapped_object() {
        let body = r#"{"last_updated": "2025-06-01T08:00:00Z", "items": [{"title": "Zapier news"}]}"#;
        let payload = decode(body).unwrap();
        assert_eq!(payload.articles.len(), 1);
        assert_eq!(payload.last_updated.as_deref(), Some("2025-06-01T08:00:00Z"));
    }

    #[test]
    fn accepts_the_capitalized_items_key() {
        let payload = decode(r#"{"Items": [{"title": "A"}, {"title": "B"}]}"#).unwrap();
        assert_eq!(payload.articles.len(), 2);
    }

    #[test]
    fn object_without_items_is_an_empty_feed() {
        let payload = decode(r#"{"generator": "update.py"}"#).unwrap();
        assert!(payload.articles.is_empty());
    }

    #[test]
    fn scalar_body_is_a_shape_error() {
        match decode("42") {
            Err(Error::Shape(kind)) => assert_eq!(kind, "number"),
            other => panic!("expected shape error, got {other:?}"),
        }
    }

    #[test]
    fn array_of_scalars_is_a_shape_error() {
        assert!(matches!(decode("[1, 2, 3]"), Err(Error::Shape(_))));
    }

    #[test]
    fn invalid_json_is_a_json_error() {
        assert!(matches!(decode("{not json"), Err(Error::Json(_))));
    }

    #[test]
    fn unknown_article_keys_are_ignored() {
        let payload = decode(r#"[{"title": "A", "paywalled": true}]"#).unwrap();
        assert_eq!(payload.articles[0].title_text(), "A");
    }
}
