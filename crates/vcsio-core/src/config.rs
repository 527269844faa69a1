//! Page controller configuration

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use url::Url;

use vcsio_dom::BlockLayout;
use vcsio_loader::HttpFragmentSource;
use vcsio_navigation::{Hooks, NavSettings};

use crate::error::CoreError;
use crate::Result;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Base URL that relative `data-source` values are resolved against
    pub base_url: Option<Url>,
    /// Fragment request timeout in seconds
    pub request_timeout_secs: u64,
    /// User agent sent with fragment requests
    pub user_agent: String,
    pub layout: BlockLayout,
    pub nav: NavSettings,
    /// Element ids, selectors and classes the page provides
    pub hooks: Hooks,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: None,
            request_timeout_secs: 30,
            user_agent: format!("vcsio/{}", env!("CARGO_PKG_VERSION")),
            layout: BlockLayout::default(),
            nav: NavSettings::default(),
            hooks: Hooks::default(),
        }
    }
}

impl Config {
    /// Parse a JSON config; missing fields take their defaults
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)
            .map_err(|e| CoreError::Config(format!("{}: {}", path.display(), e)))?;
        let config = Self::from_json_str(&json)?;
        tracing::info!(path = %path.display(), "Loaded configuration");
        Ok(config)
    }

    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// HTTP fragment source honoring the base URL, timeout and user agent
    pub fn http_source(&self) -> Result<HttpFragmentSource> {
        Ok(HttpFragmentSource::new(
            self.base_url.clone(),
            self.request_timeout(),
            &self.user_agent,
        )?)
    }

    fn validate(&self) -> Result<()> {
        if self.request_timeout_secs == 0 {
            return Err(CoreError::Config(
                "request_timeout_secs must be positive".to_string(),
            ));
        }
        let threshold = self.nav.scrollspy_threshold;
        if !(0.0..=1.0).contains(&threshold) {
            return Err(CoreError::Config(format!(
                "scrollspy_threshold {} outside 0..=1",
                threshold
            )));
        }
        if self.layout.line_height < 0.0 {
            return Err(CoreError::Config("line_height must not be negative".to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_round_trip() {
        let config = Config::default();
        let json = config.to_json_string().unwrap();
        assert_eq!(Config::from_json_str(&json).unwrap(), config);
    }

    #[test]
    fn test_partial_json() {
        let config = Config::from_json_str(
            r#"{
                "base_url": "https://vcs.example.org/",
                "nav": { "mobile_breakpoint": 640 },
                "hooks": { "api_pane_id": "referencePane" }
            }"#,
        )
        .unwrap();

        assert_eq!(config.nav.mobile_breakpoint, 640.0);
        assert_eq!(config.nav.scroll_top_threshold, 100.0);
        assert_eq!(config.hooks.api_pane_id, "referencePane");
        assert_eq!(config.hooks.content_region_id, "mainContentContainer");

        let source = config.http_source().unwrap();
        assert_eq!(
            source.resolve("api.html").unwrap().as_str(),
            "https://vcs.example.org/api.html"
        );
    }

    #[test]
    fn test_invalid_config() {
        assert!(matches!(
            Config::from_json_str(r#"{"request_timeout_secs": 0}"#),
            Err(CoreError::Config(_))
        ));
        assert!(matches!(
            Config::from_json_str(r#"{"nav": {"scrollspy_threshold": 2.0}}"#),
            Err(CoreError::Config(_))
        ));
        assert!(matches!(
            Config::from_json_str("not json"),
            Err(CoreError::Serialization(_))
        ));
    }

    #[test]
    fn test_load_missing_file() {
        let path = std::env::temp_dir().join("vcsio-does-not-exist.json");
        assert!(matches!(Config::load(&path), Err(CoreError::Config(_))));
    }
}
