//! Common types and utilities shared across the landing crates.
//!
//! This crate defines the shared error type, the canonical site constants and
//! the observability helpers used throughout the workspace. It is kept
//! dependency-light so every other crate can depend on it.
//!
//! # Overview
//!
//! - [`observability`]: Centralised tracing/logging initialisation
//! - [`LandingError`] and [`Result`]: Shared error handling
//! - [`DEFAULT_ORIGIN`], [`DEFAULT_EVENTS_URL`]: the scraped site defaults
//!
//! # Examples
//!
//! ```rust
//! use landing_common::{LandingError, DEFAULT_EVENTS_URL};
//!
//! let err = LandingError::Fetch("Failed to fetch events page".into());
//! assert_eq!(err.to_string(), "Failed to fetch events page");
//! assert!(DEFAULT_EVENTS_URL.starts_with("https://"));
//! ```

pub mod observability;

/// Origin of the site whose events page is scraped.
pub const DEFAULT_ORIGIN: &str = "https://www.gyandhan.com";

/// Canonical events-index URL, used whenever a record has no usable link.
pub const DEFAULT_EVENTS_URL: &str = "https://www.gyandhan.com/events";

/// User-Agent sent with every scrape request.
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (compatible; GyandhanBot/1.0)";

/// Error types used across the landing workspace.
#[derive(thiserror::Error, Debug)]
pub enum LandingError {
    /// The events page (or a feed endpoint) could not be fetched.
    #[error("{0}")]
    Fetch(String),

    /// A payload could not be interpreted.
    #[error("Parse error: {0}")]
    Parse(String),

    /// Configuration was incomplete or invalid.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Anything raised by lower layers without a dedicated variant.
    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

/// Convenient alias for results that use [`LandingError`].
pub type Result<T> = std::result::Result<T, LandingError>;
