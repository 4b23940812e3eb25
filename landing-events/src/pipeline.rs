use crate::dom::Page;
use crate::embedded::embedded_events;
use crate::fallback::fallback_events;
use crate::fields::parse_card;
use crate::normalize;
use crate::record::EventRecord;
use landing_common::{DEFAULT_EVENTS_URL, DEFAULT_ORIGIN};
use landing_config::SiteConfig;
use serde::Serialize;

/// Largest number of records any caller may ask for.
pub const MAX_LIMIT: usize = 6;

/// Inputs every extraction needs besides the document itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractorConfig {
    /// Site origin relative URLs are resolved against, without trailing slash.
    pub origin: String,
    /// Default record URL.
    pub events_url: String,
    /// Maximum number of records; kept within `1..=MAX_LIMIT`.
    pub limit: usize,
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            origin: DEFAULT_ORIGIN.to_string(),
            events_url: DEFAULT_EVENTS_URL.to_string(),
            limit: 2,
        }
    }
}

impl ExtractorConfig {
    pub fn from_site(site: &SiteConfig, limit: usize) -> Self {
        Self {
            origin: site.origin().to_string(),
            events_url: site.events_url(),
            limit: limit.clamp(1, MAX_LIMIT),
        }
    }

    /// Same origin, different cap.
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit.clamp(1, MAX_LIMIT);
        self
    }

    /// `limit` kept within `1..=MAX_LIMIT`, however the struct was built.
    pub(crate) fn cap(&self) -> usize {
        self.limit.clamp(1, MAX_LIMIT)
    }

    /// The placeholder events, truncated to the cap.
    pub fn placeholders(&self) -> Vec<EventRecord> {
        let mut events = fallback_events();
        events.truncate(self.cap());
        events
    }
}

/// Where the records of an [`Extraction`] came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Source {
    EmbeddedState,
    Cards,
    Fallback,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extraction {
    pub events: Vec<EventRecord>,
    pub source: Source,
}

/// Extract upcoming events from an events page.
///
/// Never fails: when neither the embedded state nor the card markup yields a
/// titled record the placeholder list is returned instead.
///
/// ```
/// use landing_events::{ExtractorConfig, extract_events};
///
/// let html = r#"
///   <section id="upcoming-events">
///     <div class="bg-white snap-center">
///       <span class="line-clamp-2">Demo Event</span>
///       <a href="/events/abc">Register</a>
///     </div>
///   </section>"#;
///
/// let events = extract_events(html, &ExtractorConfig::default());
/// assert_eq!(events.len(), 1);
/// assert_eq!(events[0].title, "Demo Event");
/// assert_eq!(events[0].url, "https://www.gyandhan.com/events/abc");
/// assert_eq!(events[0].location, "Online Event");
/// ```
pub fn extract_events(html: &str, cfg: &ExtractorConfig) -> Vec<EventRecord> {
    extract(html, cfg).events
}

/// Like [`extract_events`], also reporting which path produced the records.
pub fn extract(html: &str, cfg: &ExtractorConfig) -> Extraction {
    let page = Page::parse(html);
    let cap = cfg.cap();

    if let Some(raw) = embedded_events(&page) {
        let events: Vec<EventRecord> = raw
            .iter()
            .filter_map(|v| normalize::from_json(v, cfg))
            .take(cap)
            .collect();
        if !events.is_empty() {
            tracing::info!(target: "events", count = events.len(), "events.extract.embedded_state");
            return Extraction {
                events,
                source: Source::EmbeddedState,
            };
        }
        tracing::debug!(target: "events", raw = raw.len(), "events.extract.embedded_state_empty");
    }

    let Some(section) = page.upcoming_section() else {
        tracing::warn!(target: "events", "events.section.missing");
        return fallback(cfg);
    };

    let cards = section.cards();
    if cards.is_empty() {
        tracing::warn!(target: "events", "events.cards.none");
        return fallback(cfg);
    }

    let events: Vec<EventRecord> = cards
        .iter()
        .filter_map(parse_card)
        .map(|card| normalize::from_card(card, cfg))
        .take(cap)
        .collect();

    if events.is_empty() {
        tracing::warn!(target: "events", cards = cards.len(), "events.cards.untitled");
        return fallback(cfg);
    }

    tracing::info!(
        target: "events",
        cards = cards.len(),
        count = events.len(),
        cap,
        "events.extract.cards"
    );
    Extraction {
        events,
        source: Source::Cards,
    }
}

fn fallback(cfg: &ExtractorConfig) -> Extraction {
    Extraction {
        events: cfg.placeholders(),
        source: Source::Fallback,
    }
}
