use crate::types::Article;

/// Topic returned when nothing else matches.
pub const FALLBACK_TOPIC: &str = "tools";

/// The built-in rule table. Order is part of the contract: earlier rules
/// win on ambiguous text, so the product names come before the broad
/// buckets. Keyword sets keep both English and Italian terms because the
/// production feed auto-translates and may serve either language. The
/// space-padded `"ai "` / `" ia"` entries are crude word boundaries,
/// preserved as the site behaves.
const DEFAULT_RULES: &[(&str, &[&str])] = &[
    ("notion", &["notion"]),
    ("canva", &["canva"]),
    ("clickup", &["clickup"]),
    (
        "meetings",
        &["meeting", "riunione", "riunioni", "calendar", "zoom", "teams"],
    ),
    (
        "ai",
        &[
            "ai ", " ia", "chatgpt", "openai", "gpt", "gemini", "claude", "copilot", "llm",
            "sora", "anthropic",
        ],
    ),
    (
        "automation",
        &[
            "automation", "automazione", "workflow", "zapier", "make.com", "integromat", "n8n",
            "ifttt",
        ],
    ),
    (
        "tools",
        &["tool", "strumento", "app", "software", "estensione", "plugin"],
    ),
    (
        "productivity",
        &[
            "productivity", "produttività", "organizzazione", "focus", "todo", "task",
            "time blocking", "pomodoro", "kanban",
        ],
    ),
];

/// One classification rule: a topic and the substrings that select it.
#[derive(Debug, Clone)]
pub struct TopicRule {
    pub topic: String,
    pub keywords: Vec<String>,
}

/// Ordered keyword table mapping free text to a topic. Behavior is a data
/// parameter: pages with divergent vocabularies construct their own table
/// instead of re-implementing the scan.
#[derive(Debug, Clone)]
pub struct RuleTable {
    rules: Vec<TopicRule>,
    fallback: String,
}

impl Default for RuleTable {
    fn default() -> Self {
        let rules = DEFAULT_RULES
            .iter()
            .map(|(topic, keywords)| TopicRule {
                topic: (*topic).to_string(),
                keywords: keywords.iter().map(|k| (*k).to_string()).collect(),
            })
            .collect();
        Self::new(rules, FALLBACK_TOPIC)
    }
}

impl RuleTable {
    pub fn new(rules: Vec<TopicRule>, fallback: impl Into<String>) -> Self {
        Self {
            rules,
            fallback: fallback.into(),
        }
    }

    /// Topic vocabulary in rule order.
    pub fn topics(&self) -> impl Iterator<Item = &str> {
        self.rules.iter().map(|r| r.topic.as_str())
    }

    pub fn rules(&self) -> &[TopicRule] {
        &self.rules
    }

    pub fn fallback(&self) -> &str {
        &self.fallback
    }

    /// Topic for one article. An explicit category always wins, then the
    /// first tag, then the first rule with any keyword found in the
    /// lower-cased `title description` text, then the fallback. Pure: the
    /// result is never cached on the article, so re-filtering stays
    /// consistent with whatever table is in use.
    pub fn classify(&self, article: &Article) -> String {
        let category = article.category_text();
        if !category.is_empty() {
            return category.to_lowercase();
        }
        if let Some(tag) = article.first_tag() {
            return tag.to_lowercase();
        }

        let haystack = format!("{} {}", article.title_text(), article.description_text())
            .trim()
            .to_lowercase();
        for rule in &self.rules {
            if rule.keywords.iter().any(|k| haystack.contains(k.as_str())) {
                return rule.topic.clone();
            }
        }
        self.fallback.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn article(title: &str, description: &str) -> Article {
        Article {
            title: Some(title.to_string()),
            description: Some(description.to_string()),
            ..Article::default()
        }
    }

    #[test]
    fn explicit_category_wins_over_text() {
        let mut a = article("All about Notion and ChatGPT", "");
        a.category = Some(" Produttività ".to_string());
        assert_eq!(RuleTable::default().classify(&a), "produttività");
    }

    #[test]
    fn blank_category_falls_through_to_rules() {
        let mut a = article("Notion databases", "");
        a.category = Some("   ".to_string());
        assert_eq!(RuleTable::default().classify(&a), "notion");
    }

    #[test]
    fn first_tag_beats_keyword_scan() {
        let mut a = article("ChatGPT news", "");
        a.tags = vec!["Canva".to_string()];
        assert_eq!(RuleTable::default().classify(&a), "canva");
    }

    #[test]
    fn earlier_rule_wins_on_ambiguous_text() {
        // Mentions both notion and gpt; the notion rule is listed first.
        let a = article("Notion tips", "now with gpt integration");
        assert_eq!(RuleTable::default().classify(&a), "notion");
    }

    #[test]
    fn keyword_match_is_substring_based() {
        assert_eq!(
            RuleTable::default().classify(&article("Weekly riunione recap", "")),
            "meetings"
        );
        assert_eq!(
            RuleTable::default().classify(&article("A better workflow", "")),
            "automation"
        );
    }

    #[test]
    fn padded_ai_keyword_needs_its_boundary() {
        // "Using AI" ends the haystack, so the trailing-space keyword
        // cannot match and the text falls through to the fallback.
        assert_eq!(RuleTable::default().classify(&article("Using AI", "")), "tools");
        // With text after it the boundary is there.
        assert_eq!(
            RuleTable::default().classify(&article("AI assistants compared", "")),
            "ai"
        );
    }

    #[test]
    fn unmatched_text_gets_fallback() {
        assert_eq!(
            RuleTable::default().classify(&article("Quarterly birdwatching notes", "")),
            FALLBACK_TOPIC
        );
    }

    #[test]
    fn classify_is_pure() {
        let table = RuleTable::default();
        let a = article("Notion tips", "now with gpt integration");
        let first = table.classify(&a);
        for _ in 0..3 {
            assert_eq!(table.classify(&a), first);
        }
    }
}
