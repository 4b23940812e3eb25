//! Upcoming-events extraction.
//!
//! - Parsed page model and card segmentation (`dom`)
//! - Per-card field patterns (`fields`) and the embedded-state reader (`embedded`)
//! - Reconciliation into [`EventRecord`] (`normalize`)
//! - The extraction pipeline with its placeholder fallback (`pipeline`, `fallback`)
//! - The landing page's events block (`feed`)
//!
//! Extraction is tolerant by construction: it never returns an error and never
//! returns an empty list.

pub mod dom;
pub mod embedded;
pub mod fallback;
pub mod feed;
pub mod fields;
pub mod normalize;
pub mod pipeline;
pub mod record;
mod url;

pub use fallback::fallback_events;
pub use feed::{events_from_payload, load_events_block};
pub use pipeline::{ExtractorConfig, Extraction, MAX_LIMIT, Source, extract, extract_events};
pub use record::{CTA_LABEL, DEFAULT_LOCATION, EventRecord};
pub use url::absolute_url;
