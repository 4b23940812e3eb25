//! Reader for server-rendered state embedded in the page.
//!
//! Some builds of the events page ship their data as
//! `window.__INITIAL_STATE__ = {...};` inside an inline script. When that
//! object carries an `events` array it is preferred over scraping markup.

use crate::dom::Page;
use regex::Regex;
use serde_json::Value;
use std::sync::LazyLock;

static ASSIGNMENT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"window\.__INITIAL_STATE__\s*=\s*").expect("static regex")
});

/// The raw `events` array of the embedded state, if the page has one.
///
/// A malformed assignment is logged and treated as absent.
pub fn embedded_events(page: &Page) -> Option<Vec<Value>> {
    page.scripts().find_map(|script| {
        let start = ASSIGNMENT.find(&script)?.end();
        let state = parse_leading_value(&script[start..])?;
        match state.get("events") {
            Some(Value::Array(events)) => Some(events.clone()),
            _ => {
                tracing::debug!(target: "events", "events.embedded.no_events_key");
                None
            }
        }
    })
}

/// Parse the first JSON value at the start of `src`, ignoring whatever follows
/// it (typically `;` and more script).
fn parse_leading_value(src: &str) -> Option<Value> {
    let mut stream = serde_json::Deserializer::from_str(src).into_iter::<Value>();
    match stream.next() {
        Some(Ok(value)) => Some(value),
        Some(Err(e)) => {
            tracing::warn!(
                target: "events",
                error=%e,
                line=e.line(),
                column=e.column(),
                "events.embedded.parse_error"
            );
            None
        }
        None => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_events_from_initial_state() {
        let page = Page::parse(
            r#"<html><head><script>
                 window.__INITIAL_STATE__ = {"events":[{"name":"Loans 101"},{"title":"Visa Q&A"}],"user":null};
                 window.other = 1;
               </script></head><body></body></html>"#,
        );
        let events = embedded_events(&page).unwrap();
        assert_eq!(events.len(), 2);
        assert_eq!(events[0]["name"], "Loans 101");
    }

    #[test]
    fn malformed_state_is_ignored() {
        let page = Page::parse("<script>window.__INITIAL_STATE__ = {events: [oops];</script>");
        assert!(embedded_events(&page).is_none());
    }

    #[test]
    fn state_without_events_is_ignored() {
        let page = Page::parse(r#"<script>window.__INITIAL_STATE__={"page":"home"};</script>"#);
        assert!(embedded_events(&page).is_none());
    }

    #[test]
    fn later_scripts_are_searched() {
        let page = Page::parse(
            r#"<script>var analytics = {};</script>
               <script>window.__INITIAL_STATE__ = {"events": []}</script>"#,
        );
        assert_eq!(embedded_events(&page), Some(vec![]));
    }

    #[test]
    fn no_script_no_state() {
        assert!(embedded_events(&Page::parse("<p>hello</p>")).is_none());
    }
}
