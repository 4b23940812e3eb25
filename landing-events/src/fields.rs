//! Per-card field extraction.
//!
//! Each field tries its patterns in order and keeps the first hit. Only the
//! title is mandatory; the other fields fall back to defaults later on.

use crate::dom::{Card, clean_text, is_text_only, text_of};
use regex::Regex;
use scraper::Selector;
use std::sync::LazyLock;

fn selector(css: &str) -> Selector {
    Selector::parse(css).expect("static selector")
}

static TITLE_CLAMPED: LazyLock<Selector> =
    LazyLock::new(|| selector(r#"span[class*="line-clamp-2"]"#));
static TITLE_SR_ONLY: LazyLock<Selector> = LazyLock::new(|| selector(r#"span[class*="sr-only"]"#));
static ALT: LazyLock<Selector> = LazyLock::new(|| selector("[alt]"));
static INFO_SPAN: LazyLock<Selector> = LazyLock::new(|| selector(r#"span[class*="pl-1.5"]"#));
static CENTERED: LazyLock<Selector> = LazyLock::new(|| selector(r#"div[class*="text-center"]"#));
static EVENT_LINK: LazyLock<Selector> = LazyLock::new(|| selector(r#"[href*="/events"]"#));
static IMG_SRC: LazyLock<Selector> = LazyLock::new(|| selector("img[src]"));
static STYLED: LazyLock<Selector> =
    LazyLock::new(|| selector(r#"[style*="background-image"]"#));
static LAZY_SRC: LazyLock<Selector> = LazyLock::new(|| selector("[data-src]"));

static BACKGROUND_URL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"background-image\s*:\s*url\(\s*['"]?([^'")]+?)['"]?\s*\)"#)
        .expect("static regex")
});

/// Raw fields of one card; URLs are as found in the markup.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedCard {
    pub title: String,
    pub date: String,
    pub location: Option<String>,
    pub href: Option<String>,
    pub image: Option<String>,
}

/// Extract every field of a card; `None` when the card has no title.
pub fn parse_card(card: &Card<'_>) -> Option<ParsedCard> {
    let title = title(card)?;
    Some(ParsedCard {
        title,
        date: date(card),
        location: location(card),
        href: card.attr(&EVENT_LINK, "href"),
        image: image(card),
    })
}

fn title(card: &Card<'_>) -> Option<String> {
    card.text(&TITLE_CLAMPED)
        .or_else(|| card.text(&TITLE_SR_ONLY))
        .or_else(|| card.attr(&ALT, "alt").map(|alt| clean_text(&alt)))
        .filter(|t| !t.is_empty())
}

/// The first info span holds the date, the second the time; either may be blank.
fn date(card: &Card<'_>) -> String {
    let parts: Vec<String> = card
        .matching(&INFO_SPAN)
        .take(2)
        .map(text_of)
        .filter(|t| !t.is_empty())
        .collect();
    parts.join(" ")
}

fn location(card: &Card<'_>) -> Option<String> {
    card.matching(&CENTERED)
        .filter(|el| is_text_only(*el))
        .map(text_of)
        .find(|t| !t.is_empty())
}

fn image(card: &Card<'_>) -> Option<String> {
    card.attr(&IMG_SRC, "src")
        .or_else(|| {
            card.matching(&STYLED)
                .filter_map(|el| el.value().attr("style"))
                .find_map(background_url)
        })
        .or_else(|| card.attr(&LAZY_SRC, "data-src"))
}

fn background_url(style: &str) -> Option<String> {
    BACKGROUND_URL
        .captures(style)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim().to_string())
        .filter(|u| !u.is_empty())
}
