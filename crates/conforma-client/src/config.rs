//! Backend client configuration.
//!
//! The backend is a single REST service. Its base URL defaults to the local
//! development server and is overridden through the environment or by
//! explicit construction for staging and tests.

use url::Url;

/// Default base URL of the backend.
pub const DEFAULT_BASE_URL: &str = "http://localhost:3000/api";

/// Default request timeout, in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Configuration for connecting to the backend.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Base URL; always ends in `/` so resource paths can be appended.
    pub base_url: Url,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

impl ApiConfig {
    /// Build a configuration from an explicit base URL.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidUrl`] if `base_url` does not parse.
    pub fn new(base_url: &str, timeout_secs: u64) -> Result<Self, ConfigError> {
        Ok(Self {
            base_url: parse_base_url("base_url", base_url)?,
            timeout_secs,
        })
    }

    /// Load configuration from environment variables.
    ///
    /// Variables:
    /// - `CONFORMA_API_BASE_URL` (default: `http://localhost:3000/api`)
    /// - `CONFORMA_TIMEOUT_SECS` (default: 30)
    pub fn from_env() -> Result<Self, ConfigError> {
        let raw = std::env::var("CONFORMA_API_BASE_URL")
            .unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        let timeout_secs = match std::env::var("CONFORMA_TIMEOUT_SECS") {
            Ok(v) => v
                .parse()
                .map_err(|_| ConfigError::InvalidTimeout(v.clone()))?,
            Err(_) => DEFAULT_TIMEOUT_SECS,
        };
        Ok(Self {
            base_url: parse_base_url("CONFORMA_API_BASE_URL", &raw)?,
            timeout_secs,
        })
    }

    /// Create a configuration pointing at a local mock server (for testing).
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidUrl` if the localhost URL cannot be parsed
    /// (should not occur for valid port numbers, but avoids `expect()`).
    pub fn local_mock(port: u16) -> Result<Self, ConfigError> {
        Self::new(&format!("http://127.0.0.1:{port}/api"), 5)
    }
}

/// Parse a base URL and make sure its path ends in `/`.
///
/// Without the trailing slash, `http://host/api` followed by `projetos`
/// would be formatted as `http://host/apiprojetos`.
fn parse_base_url(var: &str, raw: &str) -> Result<Url, ConfigError> {
    let mut url =
        Url::parse(raw).map_err(|e| ConfigError::InvalidUrl(var.to_string(), e.to_string()))?;
    if url.cannot_be_a_base() {
        return Err(ConfigError::InvalidUrl(
            var.to_string(),
            "URL cannot be used as a base".to_string(),
        ));
    }
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid URL for {0}: {1}")]
    InvalidUrl(String, String),
    #[error("CONFORMA_TIMEOUT_SECS must be a whole number of seconds, got \"{0}\"")]
    InvalidTimeout(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn local_mock_builds_valid_config() {
        let cfg = ApiConfig::local_mock(9000).unwrap();
        assert_eq!(cfg.timeout_secs, 5);
        assert_eq!(cfg.base_url.as_str(), "http://127.0.0.1:9000/api/");
    }

    #[test]
    fn base_url_gets_trailing_slash() {
        let cfg = ApiConfig::new("http://localhost:3000/api", 30).unwrap();
        assert_eq!(cfg.base_url.as_str(), "http://localhost:3000/api/");
        assert_eq!(
            format!("{}projetos", cfg.base_url),
            "http://localhost:3000/api/projetos"
        );
    }

    #[test]
    fn trailing_slash_is_not_doubled() {
        let cfg = ApiConfig::new("http://localhost:3000/api/", 30).unwrap();
        assert_eq!(cfg.base_url.as_str(), "http://localhost:3000/api/");
    }

    #[test]
    fn bare_host_keeps_root_path() {
        let cfg = ApiConfig::new("http://127.0.0.1:8080", 30).unwrap();
        assert_eq!(cfg.base_url.as_str(), "http://127.0.0.1:8080/");
    }

    #[test]
    fn rejects_invalid_url() {
        assert!(ApiConfig::new("not a url", 30).is_err());
        assert!(ApiConfig::new("mailto:someone@example.com", 30).is_err());
    }

    #[test]
    fn default_base_url_parses() {
        let url = parse_base_url("default", DEFAULT_BASE_URL).unwrap();
        assert_eq!(url.as_str(), "http://localhost:3000/api/");
    }
}
