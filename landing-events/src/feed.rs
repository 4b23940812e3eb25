//! The landing page's events block.
//!
//! Reads a JSON endpoint serving events in any of the shapes seen in the wild
//! (`{"events": [...]}`, `{"data": {"events": [...]}}` or a bare array) and
//! always produces something renderable.

use crate::normalize;
use crate::pipeline::ExtractorConfig;
use crate::record::EventRecord;
use landing_config::LandingSettings;
use landing_http::{HttpClient, RequestOpts};
use serde_json::Value;

/// Normalize an endpoint payload, truncated to the cap in `cfg`.
///
/// Returns an empty list when the payload holds no titled event.
pub fn events_from_payload(payload: &Value, cfg: &ExtractorConfig) -> Vec<EventRecord> {
    let items = payload
        .get("events")
        .and_then(Value::as_array)
        .or_else(|| {
            payload
                .get("data")
                .and_then(|d| d.get("events"))
                .and_then(Value::as_array)
        })
        .or_else(|| payload.as_array());

    let Some(items) = items else {
        return Vec::new();
    };
    items
        .iter()
        .filter_map(|item| normalize::from_json(item, cfg))
        .take(cfg.cap())
        .collect()
}

/// Resolve the events block for the landing page.
///
/// `None` means the block is switched off. Otherwise the list is never empty:
/// a missing endpoint, a failed fetch or an unusable payload all yield the
/// placeholder events.
pub async fn load_events_block(
    client: &HttpClient,
    settings: &LandingSettings,
    cfg: &ExtractorConfig,
) -> Option<Vec<EventRecord>> {
    if !settings.show_events {
        tracing::debug!(target: "landing", "landing.events.hidden");
        return None;
    }
    let cfg = cfg.clone().with_limit(settings.events_limit);

    let Some(endpoint) = settings
        .events_endpoint
        .as_deref()
        .map(str::trim)
        .filter(|e| !e.is_empty())
    else {
        tracing::debug!(target: "landing", "landing.events.no_endpoint");
        return Some(cfg.placeholders());
    };

    let opts = RequestOpts {
        allow_absolute: true,
        ..Default::default()
    };
    let payload = match client.get_json::<Value>(endpoint, opts).await {
        Ok(v) => v,
        Err(e) => {
            tracing::warn!(
                target: "landing",
                endpoint,
                error=%e,
                "landing.events.fetch_failed"
            );
            return Some(cfg.placeholders());
        }
    };

    let events = events_from_payload(&payload, &cfg);
    if events.is_empty() {
        tracing::warn!(target: "landing", endpoint, "landing.events.empty_payload");
        return Some(cfg.placeholders());
    }
    tracing::info!(target: "landing", endpoint, count = events.len(), "landing.events.loaded");
    Some(events)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn cfg(limit: usize) -> ExtractorConfig {
        ExtractorConfig::default().with_limit(limit)
    }

    #[test]
    fn reads_top_level_events() {
        let out = events_from_payload(
            &json!({ "events": [{ "title": "A" }, { "title": "B" }, { "title": "C" }] }),
            &cfg(2),
        );
        let titles: Vec<_> = out.iter().map(|e| e.title.as_str()).collect();
        assert_eq!(titles, vec!["A", "B"]);
    }

    #[test]
    fn reads_nested_data_events() {
        let out = events_from_payload(&json!({ "data": { "events": [{ "name": "Nested" }] } }), &cfg(6));
        assert_eq!(out[0].title, "Nested");
    }

    #[test]
    fn reads_bare_arrays_and_drops_untitled_items() {
        let out = events_from_payload(
            &json!([{ "date": "Dec 1" }, { "title": "Kept", "mode": "Offline" }, 7]),
            &cfg(6),
        );
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].location, "Offline");
    }

    #[test]
    fn raw_limits_outside_the_range_are_clamped() {
        let many: Vec<_> = (0..10).map(|i| json!({ "title": format!("E{i}") })).collect();
        let payload = json!({ "events": many });

        let wide = ExtractorConfig {
            limit: 10,
            ..Default::default()
        };
        assert_eq!(events_from_payload(&payload, &wide).len(), 6);

        let zero = ExtractorConfig {
            limit: 0,
            ..Default::default()
        };
        assert_eq!(events_from_payload(&payload, &zero).len(), 1);
    }

    #[test]
    fn unknown_shapes_yield_nothing() {
        assert!(events_from_payload(&json!({ "items": [] }), &cfg(2)).is_empty());
        assert!(events_from_payload(&json!("nope"), &cfg(2)).is_empty());
    }
}
