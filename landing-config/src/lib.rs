//! Loader for workspace configuration with YAML + environment overlays.
//!
//! Sources are merged in order: YAML files / inline snippets first, then
//! `LANDING__`-prefixed environment variables (`LANDING__SITE__ORIGIN`,
//! `LANDING__EXTRACTOR__LIMIT`, ...), so the environment always wins. String
//! values may reference other variables with `${VAR}`; these are expanded
//! after merging. Every section is optional and falls back to the defaults
//! below, so an empty document is a valid configuration.
use config::{Config, ConfigError, Environment, File};
use landing_common::observability::{LogConfig, LogFormat};
use landing_common::{DEFAULT_ORIGIN, DEFAULT_USER_AGENT};
use serde::Deserialize;
use serde_json::Value;
use std::path::{Path, PathBuf};

const MAXIMUM_ENV_EXPANSION_DEPTH: usize = 8;
const ENV_PREFIX: &str = "LANDING";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct LandingConfig {
    pub version: Option<String>,
    pub site: SiteConfig,
    pub server: ServerConfig,
    pub extractor: ExtractorSettings,
    pub landing: LandingSettings,
    pub logging: LoggingConfig,
}

/// The third-party site whose events page is scraped.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    pub origin: String,
    pub events_path: String,
    pub user_agent: String,
    pub timeout_secs: u64,
    pub retries: usize,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            origin: DEFAULT_ORIGIN.to_string(),
            events_path: "/events".to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout_secs: 15,
            retries: 0,
        }
    }
}

impl SiteConfig {
    /// Origin without a trailing slash.
    pub fn origin(&self) -> &str {
        self.origin.trim_end_matches('/')
    }

    /// Absolute URL of the events index page.
    ///
    /// ```
    /// use landing_config::SiteConfig;
    ///
    /// let site = SiteConfig {
    ///     origin: "https://example.org/".into(),
    ///     ..Default::default()
    /// };
    /// assert_eq!(site.events_url(), "https://example.org/events");
    /// ```
    pub fn events_url(&self) -> String {
        let path = self.events_path.trim();
        if path.starts_with("http://") || path.starts_with("https://") {
            return path.to_string();
        }
        format!("{}/{}", self.origin(), path.trim_start_matches('/'))
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub bind: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: "127.0.0.1:8787".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ExtractorSettings {
    /// Maximum number of records returned by the edge endpoint.
    pub limit: usize,
}

impl Default for ExtractorSettings {
    fn default() -> Self {
        Self { limit: 2 }
    }
}

/// Landing-page settings that decide whether and how the events block loads.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LandingSettings {
    pub show_events: bool,
    /// JSON endpoint serving `{"events": [...]}`; `None` means placeholders.
    pub events_endpoint: Option<String>,
    pub events_limit: usize,
}

impl Default for LandingSettings {
    fn default() -> Self {
        Self {
            show_events: true,
            events_endpoint: None,
            events_limit: 2,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub dir: Option<PathBuf>,
    pub format: LogFormat,
    pub stderr: bool,
    pub filter: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            dir: None,
            format: LogFormat::Text,
            stderr: true,
            filter: "info".to_string(),
        }
    }
}

impl LoggingConfig {
    pub fn to_log_config(&self, app_name: &'static str) -> LogConfig {
        LogConfig {
            app_name,
            log_dir: self.dir.clone(),
            emit_stderr: self.stderr,
            format: self.format,
            default_filter: self.filter.clone(),
        }
    }
}

fn expand_env_in_value(v: &mut Value) {
    match v {
        Value::String(s) => {
            if s.contains('$') {
                let mut cur = std::mem::take(s);
                for _ in 0..MAXIMUM_ENV_EXPANSION_DEPTH {
                    let expanded = match shellexpand::env(&cur) {
                        Ok(cow) => cow.into_owned(),
                        Err(_) => cur.clone(),
                    };
                    if expanded == cur {
                        break;
                    }
                    cur = expanded;
                }
                *s = cur;
            }
        }
        Value::Array(arr) => arr.iter_mut().for_each(expand_env_in_value),
        Value::Object(obj) => obj.values_mut().for_each(expand_env_in_value),
        _ => {}
    }
}

/// Builder hides the `config` crate wiring (YAML + env overrides).
pub struct LandingConfigLoader {
    builder: config::ConfigBuilder<config::builder::DefaultState>,
}

impl Default for LandingConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl LandingConfigLoader {
    /// Start from built-in defaults; the environment overlay is applied by [`Self::load`].
    ///
    /// ```
    /// use landing_config::LandingConfigLoader;
    ///
    /// let config = LandingConfigLoader::new()
    ///     .with_yaml_str("version: '1'")
    ///     .load()
    ///     .expect("valid config");
    ///
    /// assert_eq!(config.version.as_deref(), Some("1"));
    /// assert_eq!(config.extractor.limit, 2);
    /// ```
    pub fn new() -> Self {
        Self {
            builder: Config::builder(),
        }
    }

    /// Attach a YAML/TOML/JSON file that must exist; the format is inferred by suffix.
    pub fn with_file<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.builder = self
            .builder
            .add_source(File::from(path.as_ref()).required(true));
        self
    }

    /// Attach a file that is skipped when absent, so deployments can rely on
    /// the environment alone.
    pub fn with_optional_file<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.builder = self
            .builder
            .add_source(File::from(path.as_ref()).required(false));
        self
    }

    /// Allow tests/CLI to merge inline YAML snippets.
    ///
    /// ```
    /// use landing_config::LandingConfigLoader;
    ///
    /// let cfg = LandingConfigLoader::new()
    ///     .with_yaml_str(
    ///         r#"
    /// site:
    ///   origin: "https://events.example.com"
    /// landing:
    ///   show_events: false
    /// "#,
    ///     )
    ///     .load()
    ///     .unwrap();
    ///
    /// assert_eq!(cfg.site.events_url(), "https://events.example.com/events");
    /// assert!(!cfg.landing.show_events);
    /// ```
    pub fn with_yaml_str(mut self, yaml: &str) -> Self {
        self.builder = self
            .builder
            .add_source(File::from_str(yaml, config::FileFormat::Yaml));
        self
    }

    /// Consume the builder and deserialize the merged sources into strongly typed config.
    pub fn load(self) -> Result<LandingConfig, ConfigError> {
        let cfg = self
            .builder
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let mut v: Value = cfg.try_deserialize()?;
        expand_env_in_value(&mut v);

        let typed: LandingConfig =
            serde_json::from_value(v).map_err(|e| ConfigError::Message(e.to_string()))?;

        Ok(typed)
    }
}
