use async_trait::async_trait;
use landing_common::{LandingError, Result};
use landing_config::SiteConfig;
use landing_http::{HttpClient, HttpError, RequestOpts};
use std::time::Duration;

/// Where the edge endpoint gets the events page from.
#[async_trait]
pub trait EventSource: Send + Sync {
    /// The raw HTML of the events page.
    ///
    /// Network failures and non-2xx responses are [`LandingError::Fetch`].
    async fn fetch_html(&self) -> Result<String>;
}

/// Fetches the live events page over HTTP.
pub struct HttpEventSource {
    client: HttpClient,
    url: String,
}

impl HttpEventSource {
    pub fn from_site(site: &SiteConfig) -> Result<Self> {
        let client = HttpClient::new(site.origin())
            .and_then(|c| c.with_user_agent(&site.user_agent))
            .map_err(|e| LandingError::Config(e.to_string()))?
            .with_timeout(Duration::from_secs(site.timeout_secs))
            .with_retries(site.retries);
        Ok(Self {
            client,
            url: site.events_url(),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl EventSource for HttpEventSource {
    async fn fetch_html(&self) -> Result<String> {
        let opts = RequestOpts {
            allow_absolute: true,
            ..Default::default()
        };
        self.client
            .get_text(&self.url, opts)
            .await
            .map_err(|e| LandingError::Fetch(fetch_message(&e)))
    }
}

fn fetch_message(err: &HttpError) -> String {
    match err.status() {
        Some(status) => format!("Failed to fetch events page: HTTP {}", status.as_u16()),
        None => format!("Failed to fetch events page: {err}"),
    }
}
