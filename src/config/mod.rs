use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use url::Url;

pub const DEFAULT_TMDB_BASE_URL: &str = "https://api.themoviedb.org/3";
pub const DEFAULT_IMAGE_BASE: &str = "https://image.tmdb.org/t/p/w500";
pub const DEFAULT_PROFILE_IMAGE_BASE: &str = "https://image.tmdb.org/t/p/w185";

const BACKEND_TOKEN_ENV: &str = "MOVIEDIARY_BACKEND_TOKEN";
const TMDB_TOKEN_ENV: &str = "MOVIEDIARY_TMDB_TOKEN";

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Configuration {
    pub backend: BackendConfig,
    pub tmdb: TmdbConfig,
    pub search: Option<SearchConfig>,
    pub http: Option<HttpConfig>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BackendConfig {
    #[serde(rename = "baseUrl")]
    pub base_url: String,
    pub token: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TmdbConfig {
    #[serde(rename = "baseUrl")]
    pub base_url: Option<String>,
    pub token: Option<String>,
    #[serde(rename = "imageBase")]
    pub image_base: Option<String>,
    #[serde(rename = "profileImageBase")]
    pub profile_image_base: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SearchConfig {
    #[serde(rename = "debounceMillis")]
    pub debounce_millis: Option<u64>,
    #[serde(rename = "pageLimit")]
    pub page_limit: Option<u32>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct HttpConfig {
    #[serde(rename = "timeoutSeconds")]
    pub timeout_seconds: u64,
}

impl Configuration {
    pub fn from_file(path: &str) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_string(),
            source,
        })?;
        let mut config = Self::from_yaml(&content)?;
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    pub fn from_yaml(content: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(content)?)
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(token) = std::env::var(BACKEND_TOKEN_ENV) {
            self.backend.token = Some(token);
        }
        if let Ok(token) = std::env::var(TMDB_TOKEN_ENV) {
            self.tmdb.token = Some(token);
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let urls = [
            ("backend.baseUrl", self.backend.base_url.as_str()),
            ("tmdb.baseUrl", self.tmdb_base_url()),
            ("tmdb.imageBase", self.image_base()),
            ("tmdb.profileImageBase", self.profile_image_base()),
        ];
        for (field, value) in urls {
            Url::parse(value).map_err(|source| ConfigError::InvalidUrl { field, source })?;
        }

        if self.tmdb_token().is_none() {
            return Err(ConfigError::Missing("tmdb.token"));
        }
        if self.backend_token().is_none() {
            return Err(ConfigError::Missing("backend.token"));
        }
        Ok(())
    }

    pub fn backend_url(&self) -> &str {
        self.backend.base_url.trim_end_matches('/')
    }

    pub fn backend_token(&self) -> Option<&str> {
        bare_token(self.backend.token.as_deref())
    }

    pub fn tmdb_base_url(&self) -> &str {
        self.tmdb
            .base_url
            .as_deref()
            .unwrap_or(DEFAULT_TMDB_BASE_URL)
            .trim_end_matches('/')
    }

    pub fn tmdb_token(&self) -> Option<&str> {
        bare_token(self.tmdb.token.as_deref())
    }

    pub fn image_base(&self) -> &str {
        self.tmdb.image_base.as_deref().unwrap_or(DEFAULT_IMAGE_BASE)
    }

    pub fn profile_image_base(&self) -> &str {
        self.tmdb
            .profile_image_base
            .as_deref()
            .unwrap_or(DEFAULT_PROFILE_IMAGE_BASE)
    }

    pub fn search_debounce(&self) -> Duration {
        Duration::from_millis(
            self.search
                .as_ref()
                .and_then(|s| s.debounce_millis)
                .unwrap_or(400),
        )
    }

    pub fn page_limit(&self) -> u32 {
        self.search
            .as_ref()
            .and_then(|s| s.page_limit)
            .unwrap_or(20)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.http.as_ref().map(|h| h.timeout_seconds).unwrap_or(30))
    }
}

// Tokens are sometimes pasted with their scheme, reqwest adds it back.
fn bare_token(token: Option<&str>) -> Option<&str> {
    token
        .map(|t| t.trim())
        .map(|t| t.strip_prefix("Bearer ").unwrap_or(t))
        .filter(|t| !t.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    const MINIMAL: &str = r#"
backend:
  baseUrl: http://localhost:4000/api/
  token: abc
tmdb:
  token: "Bearer tmdb-token"
"#;

    #[test]
    fn defaults_apply_for_missing_sections() {
        let config = Configuration::from_yaml(MINIMAL).unwrap();
        config.validate().unwrap();

        assert_eq!(config.backend_url(), "http://localhost:4000/api");
        assert_eq!(config.tmdb_base_url(), DEFAULT_TMDB_BASE_URL);
        assert_eq!(config.image_base(), DEFAULT_IMAGE_BASE);
        assert_eq!(config.search_debounce(), Duration::from_millis(400));
        assert_eq!(config.page_limit(), 20);
        assert_eq!(config.request_timeout(), Duration::from_secs(30));
        assert_eq!(config.tmdb_token(), Some("tmdb-token"));
    }

    #[test]
    fn explicit_values_override_defaults() {
        let yaml = r#"
backend:
  baseUrl: https://diary.example.com
tmdb:
  baseUrl: https://tmdb.example.com/3
  token: t
search:
  debounceMillis: 250
  pageLimit: 10
http:
  timeoutSeconds: 5
"#;
        let config = Configuration::from_yaml(yaml).unwrap();
        assert_eq!(config.tmdb_base_url(), "https://tmdb.example.com/3");
        assert_eq!(config.search_debounce(), Duration::from_millis(250));
        assert_eq!(config.page_limit(), 10);
        assert_eq!(config.request_timeout(), Duration::from_secs(5));
        assert_eq!(config.backend_token(), None);
    }

    #[test]
    fn validate_rejects_bad_url_and_missing_token() {
        let yaml = r#"
backend:
  baseUrl: not a url
tmdb:
  token: t
"#;
        let config = Configuration::from_yaml(yaml).unwrap();
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidUrl { field: "backend.baseUrl", .. })
        ));

        let yaml = r#"
backend:
  baseUrl: http://localhost:4000
tmdb:
  token: ""
"#;
        let config = Configuration::from_yaml(yaml).unwrap();
        assert!(matches!(config.validate(), Err(ConfigError::Missing("tmdb.token"))));

        let yaml = r#"
backend:
  baseUrl: http://localhost:4000
tmdb:
  token: t
"#;
        let config = Configuration::from_yaml(yaml).unwrap();
        assert!(matches!(config.validate(), Err(ConfigError::Missing("backend.token"))));

        let yaml = r#"
backend:
  baseUrl: http://localhost:4000
  token: "   "
tmdb:
  token: t
"#;
        let config = Configuration::from_yaml(yaml).unwrap();
        assert!(matches!(config.validate(), Err(ConfigError::Missing("backend.token"))));
    }
}
