//! Application configuration. Service address and form defaults.

use crate::adapters::service::DEFAULT_SERVICE_URL;
use crate::domain::Language;
use serde::Deserialize;
use tracing::warn;

#[derive(Debug, Deserialize, Default)]
pub struct AppConfig {
    /// Analysis service base URL. Read from DOC_SUMMARIZER_SERVICE_URL.
    #[serde(default)]
    pub service_url: Option<String>,

    /// Initial language code (en, hi, fr, es). Read from DOC_SUMMARIZER_DEFAULT_LANGUAGE.
    #[serde(default)]
    pub default_language: Option<String>,

    /// Use the mock analysis adapter instead of HTTP. Read from DOC_SUMMARIZER_MOCK.
    #[serde(default)]
    pub mock: Option<bool>,
}

impl AppConfig {
    pub fn load() -> Result<Self, config::ConfigError> {
        dotenv::dotenv().ok();
        let mut c = config::Config::builder();
        c = c.add_source(config::Environment::with_prefix("DOC_SUMMARIZER").try_parsing(true));
        if let Ok(path) = std::env::var("DOC_SUMMARIZER_CONFIG") {
            c = c.add_source(config::File::with_name(&path));
        }
        c.build()?.try_deserialize()
    }

    /// Returns the service base URL. Defaults to the local service on port 8000.
    pub fn service_url_or_default(&self) -> String {
        self.service_url
            .clone()
            .filter(|url| !url.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_SERVICE_URL.to_string())
    }

    /// Returns the initial language. Unknown codes fall back to English.
    pub fn default_language(&self) -> Language {
        match self.default_language.as_deref() {
            None => Language::default(),
            Some(code) => code.parse().unwrap_or_else(|_| {
                warn!(code, "unsupported default language, using en");
                Language::default()
            }),
        }
    }

    pub fn use_mock(&self) -> bool {
        self.mock.unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.service_url_or_default(), "http://127.0.0.1:8000");
        assert_eq!(cfg.default_language(), Language::En);
        assert!(!cfg.use_mock());
    }

    #[test]
    fn test_overrides() {
        let cfg = AppConfig {
            service_url: Some("http://analysis.internal:9000".to_string()),
            default_language: Some("ES".to_string()),
            mock: Some(true),
        };
        assert_eq!(cfg.service_url_or_default(), "http://analysis.internal:9000");
        assert_eq!(cfg.default_language(), Language::Es);
        assert!(cfg.use_mock());
    }

    #[test]
    fn test_invalid_language_falls_back_to_english() {
        let cfg = AppConfig {
            default_language: Some("klingon".to_string()),
            ..Default::default()
        };
        assert_eq!(cfg.default_language(), Language::En);
    }
}
