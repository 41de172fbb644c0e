use tracing::debug;

use crate::filter::{filter, FilterState, ALL_TOPICS};
use crate::paging::Pager;
use crate::topics::RuleTable;
use crate::types::Article;

/// One page view over a loaded article list: the articles themselves, the
/// rule table that classifies them, and the current filter and pager
/// positions. Everything the page mutates lives here, so two sessions
/// never share state and tests can drive a session directly.
#[derive(Debug, Clone, Default)]
pub struct Session {
    articles: Vec<Article>,
    rules: RuleTable,
    filter: FilterState,
    pager: Pager,
}

impl Session {
    pub fn new(articles: Vec<Article>) -> Self {
        Self {
            articles,
            ..Self::default()
        }
    }

    /// Replace the default rule table.
    pub fn with_rules(mut self, rules: RuleTable) -> Self {
        self.rules = rules;
        self
    }

    /// Replace the default page size, keeping the pager on page 1.
    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.pager = Pager::new(page_size);
        self
    }

    pub fn articles(&self) -> &[Article] {
        &self.articles
    }

    pub fn rules(&self) -> &RuleTable {
        &self.rules
    }

    pub fn filter_state(&self) -> &FilterState {
        &self.filter
    }

    pub fn pager(&self) -> &Pager {
        &self.pager
    }

    /// Swap in a freshly loaded list. Filters survive, paging restarts.
    pub fn set_articles(&mut self, articles: Vec<Article>) {
        self.articles = articles;
        self.pager.reset();
    }

    /// Select a topic chip. Blank input means "all". Any selection
    /// restarts paging, even re-selecting the current topic.
    pub fn set_topic(&mut self, topic: &str) {
        let topic = topic.trim().to_lowercase();
        self.filter.topic = if topic.is_empty() {
            ALL_TOPICS.to_string()
        } else {
            topic
        };
        self.pager.reset();
        debug!(topic = %self.filter.topic, "topic selected");
    }

    /// Update the search box. Each keystroke restarts paging.
    pub fn set_query(&mut self, query: &str) {
        self.filter.query = query.trim().to_string();
        self.pager.reset();
        debug!(query = %self.filter.query, "query updated");
    }

    /// Back to "all" with an empty query, on page 1.
    pub fn reset_filters(&mut self) {
        self.filter = FilterState::default();
        self.pager.reset();
    }

    /// Reveal the next page of the filtered list, if there is one.
    pub fn advance_page(&mut self) -> bool {
        let total = self.filtered().len();
        self.pager.advance(total)
    }

    /// The full filtered list, in feed order.
    pub fn filtered(&self) -> Vec<Article> {
        filter(&self.articles, &self.rules, &self.filter)
    }

    /// The filtered list cut to the current page window.
    pub fn visible(&self) -> Vec<Article> {
        let filtered = self.filtered();
        self.pager.window(&filtered).to_vec()
    }

    /// True when paging hides part of the filtered list.
    pub fn has_more(&self) -> bool {
        self.pager.has_more(self.filtered().len())
    }
}
