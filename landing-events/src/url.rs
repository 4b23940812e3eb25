/// Resolve a possibly-relative URL against the site origin.
///
/// `http(s)://` URLs are returned unchanged, protocol-relative ones get
/// `https:`, root-relative ones get the origin, anything else is treated as a
/// path below the origin. Empty input stays empty.
///
/// ```
/// use landing_events::absolute_url;
///
/// let origin = "https://www.gyandhan.com";
/// assert_eq!(absolute_url("/x.png", origin), "https://www.gyandhan.com/x.png");
/// assert_eq!(absolute_url("//cdn.example.com/a.webp", origin), "https://cdn.example.com/a.webp");
/// assert_eq!(absolute_url("events/abc", origin), "https://www.gyandhan.com/events/abc");
/// ```
pub fn absolute_url(raw: &str, origin: &str) -> String {
    let raw = raw.trim();
    let origin = origin.trim_end_matches('/');
    if raw.is_empty() {
        String::new()
    } else if has_http_scheme(raw) {
        raw.to_string()
    } else if let Some(rest) = raw.strip_prefix("//") {
        format!("https://{rest}")
    } else if raw.starts_with('/') {
        format!("{origin}{raw}")
    } else {
        format!("{origin}/{raw}")
    }
}

/// `http://` or `https://`, in any letter case.
fn has_http_scheme(raw: &str) -> bool {
    ["http://", "https://"].iter().any(|scheme| {
        raw.get(..scheme.len())
            .is_some_and(|prefix| prefix.eq_ignore_ascii_case(scheme))
    })
}
