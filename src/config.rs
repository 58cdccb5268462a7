use std::env;
use std::time::Duration;
use url::Url;

pub const DEFAULT_SITE_ADDR: &str = "0.0.0.0:3000";
pub const DEFAULT_API_BASE_URL: &str = "https://jsonplaceholder.typicode.com/";

#[derive(Debug, Clone)]
pub struct Config {
    pub site_addr: String,
    pub api_base_url: Url,
    pub api_timeout: Option<Duration>,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("API_BASE_URL is not a valid url: {0}")]
    InvalidBaseUrl(#[from] url::ParseError),

    #[error("API_TIMEOUT_SECS must be a whole number of seconds, got {0:?}")]
    InvalidTimeout(String),
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let site_addr = lookup("SITE_ADDR").unwrap_or_else(|| DEFAULT_SITE_ADDR.to_owned());

        let mut base = lookup("API_BASE_URL").unwrap_or_else(|| DEFAULT_API_BASE_URL.to_owned());
        // Url::join drops the last path segment unless it ends with a slash
        if !base.ends_with('/') {
            base.push('/');
        }
        let api_base_url = Url::parse(&base)?;

        let api_timeout = lookup("API_TIMEOUT_SECS")
            .map(|raw| {
                raw.trim()
                    .parse::<u64>()
                    .map(Duration::from_secs)
                    .map_err(|_| ConfigError::InvalidTimeout(raw))
            })
            .transpose()?;

        Ok(Self {
            site_addr,
            api_base_url,
            api_timeout,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config_from(&[]).expect("defaults should be valid");

        assert_eq!(config.site_addr, DEFAULT_SITE_ADDR);
        assert_eq!(config.api_base_url.as_str(), DEFAULT_API_BASE_URL);
        assert_eq!(config.api_timeout, None);
    }

    #[test]
    fn test_base_url_gets_trailing_slash() {
        let config = config_from(&[("API_BASE_URL", "http://localhost:8080/api")])
            .expect("url should be valid");

        assert_eq!(
            config
                .api_base_url
                .join("users")
                .expect("join should work")
                .as_str(),
            "http://localhost:8080/api/users"
        );
    }

    #[test]
    fn test_invalid_values() {
        assert!(matches!(
            config_from(&[("API_BASE_URL", "not a url")]),
            Err(ConfigError::InvalidBaseUrl(_))
        ));
        assert!(matches!(
            config_from(&[("API_TIMEOUT_SECS", "soon")]),
            Err(ConfigError::InvalidTimeout(_))
        ));
    }

    #[test]
    fn test_timeout() {
        let config = config_from(&[("API_TIMEOUT_SECS", "15")]).expect("timeout should parse");
        assert_eq!(config.api_timeout, Some(Duration::from_secs(15)));
    }
}
