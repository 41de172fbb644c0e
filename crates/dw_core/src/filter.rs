use crate::topics::RuleTable;
use crate::types::Article;

/// Topic value meaning "no topic restriction".
pub const ALL_TOPICS: &str = "all";

/// Current filter selection: a topic chip and a free-text query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterState {
    pub topic: String,
    pub query: String,
}

impl Default for FilterState {
    fn default() -> Self {
        Self {
            topic: ALL_TOPICS.to_string(),
            query: String::new(),
        }
    }
}

impl FilterState {
    /// True when the state narrows the list at all.
    pub fn is_active(&self) -> bool {
        self.topic != ALL_TOPICS || !self.query.is_empty()
    }
}

/// Apply topic and query restriction to `articles`, preserving order.
///
/// The topic test classifies each article through `rules` on the fly;
/// nothing is memoized, so swapping the table re-derives every topic. The
/// query is matched case-insensitively against title, description and
/// source together. Blank topic and query are treated as absent.
pub fn filter(articles: &[Article], rules: &RuleTable, state: &FilterState) -> Vec<Article> {
    let topic = state.topic.trim().to_lowercase();
    let query = state.query.trim().to_lowercase();
    let topic_active = !topic.is_empty() && topic != ALL_TOPICS;
    let query_active = !query.is_empty();

    articles
        .iter()
        .filter(|a| !topic_active || rules.classify(a) == topic)
        .filter(|a| !query_active || a.search_text().contains(&query))
        .cloned()
        .collect()
}
