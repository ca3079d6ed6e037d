use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::default::Default;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::time::Duration;
use url::Url;

use crate::tooltip::TooltipMarkup;

/// Application configuration module
/// This module handles the application configuration including loading,
/// validating and saving configuration settings.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    /// Class that identifies a glossary term marker
    #[serde(default = "default_marker_class")]
    pub marker_class: String,

    /// Class put on every injected tooltip container
    #[serde(default = "default_tooltip_class")]
    pub tooltip_class: String,

    /// Element names of injected tooltips
    #[serde(default)]
    pub tooltip_markup: TooltipMarkup,

    /// Prefix of fragment identifiers that name glossary terms
    #[serde(default = "default_term_prefix")]
    pub term_prefix: String,

    /// URL the documentation site is served at
    #[serde(default = "default_site_url")]
    pub site_url: String,

    /// Delay before the augmentation pass starts, in milliseconds
    #[serde(default = "default_startup_delay_ms")]
    pub startup_delay_ms: u64,

    /// Glossary page retrieval settings
    #[serde(default)]
    pub fetch: FetchConfig,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Where glossary pages are read from
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum FetchSource {
    // @source: Local build directory
    #[default]
    Local,
    // @source: HTTP server at site_url
    Http,
}

impl FetchSource {
    // @returns: Lowercase source identifier
    pub fn to_lowercase_string(&self) -> String {
        match self {
            Self::Local => "local".to_string(),
            Self::Http => "http".to_string(),
        }
    }
}

impl std::fmt::Display for FetchSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_lowercase_string())
    }
}

impl std::str::FromStr for FetchSource {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "local" => Ok(Self::Local),
            "http" => Ok(Self::Http),
            _ => Err(anyhow!("Invalid fetch source: {}", s)),
        }
    }
}

/// Glossary page retrieval configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct FetchConfig {
    // @field: Source of glossary pages
    #[serde(default)]
    pub source: FetchSource,

    // @field: Request timeout in seconds, none waits indefinitely
    #[serde(default)]
    pub timeout_secs: Option<u64>,

    // @field: User agent sent with HTTP requests
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            source: FetchSource::default(),
            timeout_secs: None,
            user_agent: default_user_agent(),
        }
    }
}

impl FetchConfig {
    /// Request timeout, if one is configured
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    /// Matching filter for the `log` facade
    pub fn to_level_filter(&self) -> log::LevelFilter {
        match self {
            Self::Error => log::LevelFilter::Error,
            Self::Warn => log::LevelFilter::Warn,
            Self::Info => log::LevelFilter::Info,
            Self::Debug => log::LevelFilter::Debug,
            Self::Trace => log::LevelFilter::Trace,
        }
    }
}

fn default_marker_class() -> String {
    // Sphinx renders :term: references as <span class="xref std std-term">
    "std-term".to_string()
}

fn default_tooltip_class() -> String {
    "term-tooltip".to_string()
}

fn default_term_prefix() -> String {
    "term-".to_string()
}

fn default_site_url() -> String {
    "http://localhost/".to_string()
}

fn default_startup_delay_ms() -> u64 {
    1000
}

fn default_user_agent() -> String {
    format!("termtip/{}", env!("CARGO_PKG_VERSION"))
}

impl Config {
    /// Load the configuration from a JSON file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)
            .with_context(|| format!("Failed to open config file: {}", path.display()))?;
        let reader = BufReader::new(file);
        let config: Config = serde_json::from_reader(reader)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
        Ok(config)
    }

    /// Save the configuration as pretty-printed JSON
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let config_json = serde_json::to_string_pretty(self)
            .context("Failed to serialize config to JSON")?;
        std::fs::write(path, config_json)
            .with_context(|| format!("Failed to write config to file: {}", path.display()))?;
        Ok(())
    }

    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<()> {
        if self.marker_class.trim().is_empty() || self.marker_class.contains(char::is_whitespace) {
            return Err(anyhow!("Marker class must be a single non-empty class name"));
        }

        if self.tooltip_class.trim().is_empty() || self.tooltip_class.contains(char::is_whitespace) {
            return Err(anyhow!("Tooltip class must be a single non-empty class name"));
        }

        if self.term_prefix.is_empty() {
            return Err(anyhow!("Term prefix must not be empty"));
        }

        self.site_url()?;

        if self.fetch.timeout_secs == Some(0) {
            return Err(anyhow!("Fetch timeout must be greater than zero when set"));
        }

        Ok(())
    }

    /// Parsed site URL
    pub fn site_url(&self) -> Result<Url> {
        let url = Url::parse(&self.site_url)
            .with_context(|| format!("Invalid site URL: {}", self.site_url))?;
        if url.cannot_be_a_base() {
            return Err(anyhow!("Site URL cannot be used as a base: {}", self.site_url));
        }
        Ok(url)
    }

    /// Delay before the augmentation pass starts
    pub fn startup_delay(&self) -> Duration {
        Duration::from_millis(self.startup_delay_ms)
    }
}

/// Default implementation for Config
impl Default for Config {
    fn default() -> Self {
        Config {
            marker_class: default_marker_class(),
            tooltip_class: default_tooltip_class(),
            tooltip_markup: TooltipMarkup::default(),
            term_prefix: default_term_prefix(),
            site_url: default_site_url(),
            startup_delay_ms: default_startup_delay_ms(),
            fetch: FetchConfig::default(),
            log_level: LogLevel::default(),
        }
    }
}
