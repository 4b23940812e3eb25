use serde::{Deserialize, Serialize};

/// Call-to-action shown on every event card.
pub const CTA_LABEL: &str = "Register";

/// Location used when a card or payload does not name one.
pub const DEFAULT_LOCATION: &str = "Online Event";

/// Canonical event record served to the landing page.
///
/// Serialized with the keys the landing block reads (`ctaLabel`); the older
/// `cta_label` key is accepted when reading.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventRecord {
    pub title: String,
    #[serde(default)]
    pub date: String,
    #[serde(default = "default_location")]
    pub location: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub image: String,
    #[serde(rename = "ctaLabel", alias = "cta_label", default = "default_cta")]
    pub cta_label: String,
}

fn default_location() -> String {
    DEFAULT_LOCATION.to_string()
}

fn default_cta() -> String {
    CTA_LABEL.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn serializes_cta_in_camel_case() {
        let record = EventRecord {
            title: "Demo Event".into(),
            date: "Dec 1, 2025".into(),
            location: DEFAULT_LOCATION.into(),
            url: "https://www.gyandhan.com/events".into(),
            image: String::new(),
            cta_label: CTA_LABEL.into(),
        };
        let v = serde_json::to_value(&record).unwrap();
        assert_eq!(v["ctaLabel"], "Register");
        assert!(v.get("cta_label").is_none());
    }

    #[test]
    fn reads_legacy_worker_payloads() {
        let record: EventRecord = serde_json::from_value(json!({
            "title": "Loans 101",
            "date": "Nov 29, 2025",
            "url": "https://www.gyandhan.com/events",
            "cta_label": "Register"
        }))
        .unwrap();
        assert_eq!(record.cta_label, "Register");
        assert_eq!(record.location, "Online Event");
        assert_eq!(record.image, "");
    }
}
