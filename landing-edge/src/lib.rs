//! HTTP edge endpoint serving the scraped upcoming events.
//!
//! `GET /` (or `/events`) fetches the events page through an [`EventSource`],
//! runs the extractor and answers `{"events": [...]}` with a one-hour public
//! cache policy. A failed fetch is a 500 with `{"events": [], "error": ...}`.
//! `OPTIONS` answers the CORS preflight.

mod server;
mod source;

pub use server::{AppState, CACHE_POLICY, build_router, serve};
pub use source::{EventSource, HttpEventSource};
