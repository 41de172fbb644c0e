use crate::card::Card;
use crate::slots::{ModelPanel, PageSlots};

/// Empty state for the featured slot.
pub const EMPTY_FEATURED: &str = "No content available.";

/// Empty state for the latest slot.
pub const EMPTY_LATEST: &str = "No news found.";

/// Empty state for the most-read slot.
pub const EMPTY_MOST_READ: &str = "—";

/// Empty state for a model panel with no matching entry.
pub const NO_RECENT_UPDATE: &str = "No recent update.";

/// Replace the five characters that let feed text alter the structure of
/// the markup it lands in. Applied to every text field and attribute
/// value at write time.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Turns assembled slots into output for one surface. Slot assembly
/// never depends on this, so swapping the markup out does not touch the
/// pipeline.
pub trait PageRenderer {
    fn render_page(&self, slots: &PageSlots) -> String;
    fn render_panels(&self, panels: &[ModelPanel]) -> String;
    fn render_notice(&self, message: &str) -> String;
}

/// The site's HTML surface.
#[derive(Debug, Clone, Copy, Default)]
pub struct HtmlRenderer;

impl HtmlRenderer {
    fn card_markup(&self, card: &Card, heading: &str) -> String {
        let mut out = String::from("<article class=\"card\">\n");
        if let Some(image) = &card.image {
            out.push_str(&format!(
                "<img src=\"{}\" alt=\"\" loading=\"lazy\">\n",
                escape(image.as_str())
            ));
        }
        out.push_str(&format!(
            "<span class=\"chip\">{}</span>\n",
            escape(&card.topic)
        ));
        match &card.link {
            Some(link) => out.push_str(&format!(
                "<{heading}><a href=\"{}\" target=\"_blank\" rel=\"noopener\">{}</a></{heading}>\n",
                escape(link.as_str()),
                escape(&card.title)
            )),
            None => out.push_str(&format!("<{heading}>{}</{heading}>\n", escape(&card.title))),
        }
        if !card.description.is_empty() {
            out.push_str(&format!(
                "<p class=\"card-text\">{}</p>\n",
                escape(&card.description)
            ));
        }
        let meta = if card.date_label.is_empty() {
            escape(&card.source)
        } else {
            format!("{} · {}", escape(&card.source), escape(&card.date_label))
        };
        out.push_str(&format!("<p class=\"card-meta\">{meta}</p>\n"));
        out.push_str("</article>\n");
        out
    }

    fn slot(&self, id: &str, heading: &str, cards: &[Card], empty: &str) -> String {
        let mut out = format!("<section id=\"{id}\">\n");
        if cards.is_empty() {
            out.push_str(&self.render_notice(empty));
        } else {
            for card in cards {
                out.push_str(&self.card_markup(card, heading));
            }
        }
        out.push_str("</section>\n");
        out
    }
}

impl PageRenderer for HtmlRenderer {
    fn render_page(&self, slots: &PageSlots) -> String {
        let mut out = String::new();
        out.push_str(&self.slot("featured", "h2", &slots.featured, EMPTY_FEATURED));
        out.push_str(&self.slot("latest", "h3", &slots.latest, EMPTY_LATEST));
        out.push_str(&self.slot("most-read", "h3", &slots.most_read, EMPTY_MOST_READ));
        if slots.has_more {
            out.push_str("<button id=\"load-more\" type=\"button\">Load more</button>\n");
        }
        out
    }

    fn render_panels(&self, panels: &[ModelPanel]) -> String {
        let mut out = String::new();
        for panel in panels {
            out.push_str(&format!(
                "<section class=\"ia-panel\" id=\"ia-{}\">\n<h2>{}</h2>\n",
                escape(&panel.key),
                escape(&panel.key)
            ));
            match &panel.card {
                Some(card) => out.push_str(&self.card_markup(card, "h3")),
                None => out.push_str(&self.render_notice(NO_RECENT_UPDATE)),
            }
            out.push_str("</section>\n");
        }
        out
    }

    fn render_notice(&self, message: &str) -> String {
        format!("<p class=\"notice\">{}</p>\n", escape(message))
    }
}
