//! Reconcile card fields and upstream JSON objects into [`EventRecord`].

use crate::ExtractorConfig;
use crate::fields::ParsedCard;
use crate::record::{CTA_LABEL, DEFAULT_LOCATION, EventRecord};
use crate::url::absolute_url;
use serde_json::{Map, Value};

const TITLE_KEYS: &[&str] = &["title", "name"];
const DATE_KEYS: &[&str] = &["date", "start_date", "starts_at"];
const LOCATION_KEYS: &[&str] = &["location", "mode"];
const URL_KEYS: &[&str] = &["url", "link", "registration_url", "cta_url"];
const IMAGE_KEYS: &[&str] = &["image", "thumbnail", "image_url", "imageurl"];

/// Build a record from a parsed card.
pub fn from_card(card: ParsedCard, cfg: &ExtractorConfig) -> EventRecord {
    let url = card
        .href
        .map(|href| absolute_url(&href, &cfg.origin))
        .filter(|u| !u.is_empty())
        .unwrap_or_else(|| cfg.events_url.clone());
    EventRecord {
        title: card.title,
        date: card.date,
        location: card
            .location
            .unwrap_or_else(|| DEFAULT_LOCATION.to_string()),
        url,
        image: card
            .image
            .map(|src| absolute_url(&src, &cfg.origin))
            .unwrap_or_default(),
        cta_label: CTA_LABEL.to_string(),
    }
}

/// Build a record from an upstream JSON object, whatever its schema revision.
///
/// Returns `None` for non-objects and for objects without a usable title.
///
/// ```
/// use landing_events::{ExtractorConfig, normalize::from_json};
/// use serde_json::json;
///
/// let record = from_json(
///     &json!({
///         "name": "Loans 101",
///         "start_date": "Dec 5, 2025",
///         "link": "https://www.gyandhan.com/events/loans-101",
///         "thumbnail": "https://cdn.example.com/loans.webp"
///     }),
///     &ExtractorConfig::default(),
/// )
/// .unwrap();
///
/// assert_eq!(record.title, "Loans 101");
/// assert_eq!(record.date, "Dec 5, 2025");
/// assert_eq!(record.location, "Online Event");
/// ```
pub fn from_json(value: &Value, cfg: &ExtractorConfig) -> Option<EventRecord> {
    let obj = value.as_object()?;
    let title = first_str(obj, TITLE_KEYS)?;
    Some(EventRecord {
        title,
        date: first_str(obj, DATE_KEYS).unwrap_or_default(),
        location: first_str(obj, LOCATION_KEYS).unwrap_or_else(|| DEFAULT_LOCATION.to_string()),
        url: first_str(obj, URL_KEYS)
            .map(|u| absolute_url(&u, &cfg.origin))
            .unwrap_or_else(|| cfg.events_url.clone()),
        image: first_str(obj, IMAGE_KEYS)
            .map(|u| absolute_url(&u, &cfg.origin))
            .unwrap_or_default(),
        cta_label: CTA_LABEL.to_string(),
    })
}

/// First key holding a non-blank string, whitespace-collapsed.
fn first_str(obj: &Map<String, Value>, keys: &[&str]) -> Option<String> {
    keys.iter()
        .filter_map(|k| obj.get(*k).and_then(Value::as_str))
        .map(crate::dom::clean_text)
        .find(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn cfg() -> ExtractorConfig {
        ExtractorConfig::default()
    }

    #[test]
    fn alternate_keys_converge_on_one_shape() {
        let record = from_json(
            &json!({
                "name": "Complete Guide to Studying Abroad",
                "start_date": "Nov 29, 2025",
                "link": "https://www.gyandhan.com/events/guide",
                "thumbnail": "https://gyandhan.s3.ap-south-1.amazonaws.com/guide.webp"
            }),
            &cfg(),
        )
        .unwrap();

        assert_eq!(record.title, "Complete Guide to Studying Abroad");
        assert_eq!(record.date, "Nov 29, 2025");
        assert_eq!(record.url, "https://www.gyandhan.com/events/guide");
        assert_eq!(record.image, "https://gyandhan.s3.ap-south-1.amazonaws.com/guide.webp");
        assert_eq!(record.location, "Online Event");
        assert_eq!(record.cta_label, "Register");
    }

    #[test]
    fn earlier_keys_win_and_blanks_are_skipped() {
        let record = from_json(
            &json!({
                "title": "",
                "name": "Named",
                "date": null,
                "starts_at": "2025-12-01T18:00:00Z",
                "mode": "Hybrid",
                "registration_url": "/events/named/register",
                "image_url": "uploads/named.png"
            }),
            &cfg(),
        )
        .unwrap();

        assert_eq!(record.title, "Named");
        assert_eq!(record.date, "2025-12-01T18:00:00Z");
        assert_eq!(record.location, "Hybrid");
        assert_eq!(record.url, "https://www.gyandhan.com/events/named/register");
        assert_eq!(record.image, "https://www.gyandhan.com/uploads/named.png");
    }

    #[test]
    fn objects_without_title_are_dropped() {
        assert!(from_json(&json!({ "date": "Dec 1" }), &cfg()).is_none());
        assert!(from_json(&json!("Loans 101"), &cfg()).is_none());
        assert!(from_json(&json!({ "title": 42 }), &cfg()).is_none());
    }

    #[test]
    fn missing_link_defaults_to_events_index() {
        let record = from_json(&json!({ "title": "T" }), &cfg()).unwrap();
        assert_eq!(record.url, "https://www.gyandhan.com/events");
        assert_eq!(record.image, "");
    }

    #[test]
    fn card_fields_are_resolved_and_defaulted() {
        let record = from_card(
            ParsedCard {
                title: "Demo Event".into(),
                date: String::new(),
                location: None,
                href: Some("/events/abc".into()),
                image: Some("/x.png".into()),
            },
            &cfg(),
        );
        assert_eq!(record.url, "https://www.gyandhan.com/events/abc");
        assert_eq!(record.image, "https://www.gyandhan.com/x.png");
        assert_eq!(record.location, "Online Event");

        let bare = from_card(
            ParsedCard {
                title: "Bare".into(),
                ..Default::default()
            },
            &cfg(),
        );
        assert_eq!(bare.url, "https://www.gyandhan.com/events");
        assert_eq!(bare.image, "");
    }
}
