/*!
 * Tests for application configuration functionality
 */

use std::time::Duration;
use termtip::app_config::{Config, FetchSource, LogLevel};

use crate::common;

/// Test default configuration values
#[test]
fn test_default_config_withNoParameters_shouldHaveCorrectDefaults() {
    let config = Config::default();

    assert_eq!(config.marker_class, "std-term");
    assert_eq!(config.tooltip_class, "term-tooltip");
    assert_eq!(config.term_prefix, "term-");
    assert_eq!(config.site_url, "http://localhost/");
    assert_eq!(config.startup_delay(), Duration::from_millis(1000));
    assert_eq!(config.fetch.source, FetchSource::Local);
    assert_eq!(config.fetch.timeout_secs, None);
    assert!(config.fetch.user_agent.starts_with("termtip/"));
    assert_eq!(config.log_level, LogLevel::Info);
    assert!(config.validate().is_ok());
}

/// Test configuration validation
#[test]
fn test_config_validation_withVariousConfigs_shouldValidateCorrectly() {
    let mut config = Config::default();

    config.marker_class = "".to_string();
    assert!(config.validate().is_err());
    config.marker_class = "std term".to_string();
    assert!(config.validate().is_err());
    config.marker_class = "std-term".to_string();

    config.term_prefix = "".to_string();
    assert!(config.validate().is_err());
    config.term_prefix = "term-".to_string();

    config.site_url = "not a url".to_string();
    assert!(config.validate().is_err());
    config.site_url = "https://docs.example.com/project/".to_string();

    config.fetch.timeout_secs = Some(0);
    assert!(config.validate().is_err());
    config.fetch.timeout_secs = Some(10);
    assert_eq!(config.fetch.timeout(), Some(Duration::from_secs(10)));

    assert!(config.validate().is_ok());
}

/// Test that a saved configuration loads back unchanged
#[test]
fn test_config_saveAndLoad_shouldPreserveOverrides() -> anyhow::Result<()> {
    let dir = common::create_temp_dir()?;
    let path = dir.path().join("conf.json");

    let mut config = Config::default();
    config.fetch.source = FetchSource::Http;
    config.startup_delay_ms = 0;
    config.log_level = LogLevel::Debug;
    config.save(&path)?;

    let loaded = Config::load(&path)?;
    assert_eq!(loaded.fetch.source, FetchSource::Http);
    assert_eq!(loaded.startup_delay_ms, 0);
    assert_eq!(loaded.log_level, LogLevel::Debug);
    Ok(())
}

/// Test that a malformed file is reported with its path
#[test]
fn test_config_load_withInvalidJson_shouldFail() -> anyhow::Result<()> {
    let dir = common::create_temp_dir()?;
    let path = common::create_test_file(dir.path(), "conf.json", "{ not json")?;

    let err = Config::load(&path).unwrap_err();
    assert!(format!("{:#}", err).contains("conf.json"));
    Ok(())
}
