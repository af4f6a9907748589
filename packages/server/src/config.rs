use std::env;
use std::time::Duration;

use dotenvy::dotenv;
use thiserror::Error;

use crate::domains::relations::identity::{DEFAULT_CONTENT_PATH, DEFAULT_THING_PATH};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{name} is not a valid duration: {value:?}")]
    InvalidDuration { name: &'static str, value: String },

    #[error("{name} must be a valid number: {value:?}")]
    InvalidNumber { name: &'static str, value: String },

    #[error("NEO_USER and NEO_PASSWORD must be set together")]
    PartialCredentials,
}

/// Application configuration loaded from environment variables
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub neo_url: String,
    pub neo_database: String,
    pub neo_credentials: Option<(String, String)>,
    pub port: u16,
    pub cache_duration: Duration,
    pub query_timeout: Duration,
    pub api_url: String,
    pub thing_url: String,
    pub content_path: String,
    pub thing_path: String,
    pub api_yml: String,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (development)
        let _ = dotenv();

        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Load configuration from any name -> value source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str, default: &str| {
            lookup(name)
                .filter(|v| !v.is_empty())
                .unwrap_or_else(|| default.to_string())
        };

        let neo_credentials = match (lookup("NEO_USER"), lookup("NEO_PASSWORD")) {
            (Some(user), Some(password)) => Some((user, password)),
            (None, None) => None,
            _ => return Err(ConfigError::PartialCredentials),
        };

        let port = var("PORT", "8080");
        let port = port.parse().map_err(|_| ConfigError::InvalidNumber {
            name: "PORT",
            value: port.clone(),
        })?;

        let api_url = var("API_URL", "http://api.ft.com");

        Ok(Self {
            neo_url: var("NEO_URL", "http://localhost:7474"),
            neo_database: var("NEO_DATABASE", "neo4j"),
            neo_credentials,
            port,
            cache_duration: duration_var("CACHE_DURATION", &var("CACHE_DURATION", "30s"))?,
            query_timeout: duration_var("QUERY_TIMEOUT", &var("QUERY_TIMEOUT", "10s"))?,
            thing_url: var("THING_URL", &api_url),
            api_url,
            content_path: var("CONTENT_PATH", DEFAULT_CONTENT_PATH),
            thing_path: var("THING_PATH", DEFAULT_THING_PATH),
            api_yml: var("API_YML", "./api.yml"),
        })
    }

    /// Value for the `Cache-Control` header on successful lookups.
    pub fn cache_control_header(&self) -> String {
        format!("max-age={:.0}, public", self.cache_duration.as_secs_f64())
    }
}

fn duration_var(name: &'static str, value: &str) -> Result<Duration, ConfigError> {
    parse_duration(value).ok_or_else(|| ConfigError::InvalidDuration {
        name,
        value: value.to_string(),
    })
}

/// Parse a compound duration such as `2h45m`, `1m30s`, `1.5h` or `500ms`.
///
/// Units are `ns`, `us` (or `µs`), `ms`, `s`, `m` and `h`. A bare `0` is
/// accepted. Negative durations are not.
pub fn parse_duration(input: &str) -> Option<Duration> {
    let s = input.trim();
    let s = s.strip_prefix('+').unwrap_or(s);
    if s == "0" {
        return Some(Duration::ZERO);
    }
    if s.is_empty() {
        return None;
    }

    let mut total_nanos = 0f64;
    let mut rest = s;
    while !rest.is_empty() {
        let number_len = rest
            .find(|c: char| !(c.is_ascii_digit() || c == '.'))
            .unwrap_or(rest.len());
        let (number, tail) = rest.split_at(number_len);
        if number.is_empty() || number == "." {
            return None;
        }
        let value: f64 = number.parse().ok()?;

        let unit_len = tail
            .find(|c: char| c.is_ascii_digit() || c == '.')
            .unwrap_or(tail.len());
        let (unit, tail) = tail.split_at(unit_len);
        let scale = match unit {
            "ns" => 1.0,
            "us" | "µs" | "μs" => 1e3,
            "ms" => 1e6,
            "s" => 1e9,
            "m" => 60.0 * 1e9,
            "h" => 3600.0 * 1e9,
            _ => return None,
        };

        total_nanos += value * scale;
        rest = tail;
    }

    if !total_nanos.is_finite() || total_nanos > u64::MAX as f64 {
        return None;
    }
    Some(Duration::from_nanos(total_nanos.round() as u64))
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn config(vars: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|name| vars.get(name).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config(&[]).unwrap();

        assert_eq!(config.neo_url, "http://localhost:7474");
        assert_eq!(config.neo_database, "neo4j");
        assert_eq!(config.neo_credentials, None);
        assert_eq!(config.port, 8080);
        assert_eq!(config.cache_duration, Duration::from_secs(30));
        assert_eq!(config.query_timeout, Duration::from_secs(10));
        assert_eq!(config.api_url, "http://api.ft.com");
        assert_eq!(config.thing_url, "http://api.ft.com");
        assert_eq!(config.content_path, "content");
        assert_eq!(config.thing_path, "things");
        assert_eq!(config.api_yml, "./api.yml");
        assert_eq!(config.cache_control_header(), "max-age=30, public");
    }

    #[test]
    fn test_thing_url_follows_api_url_unless_set() {
        let shared = config(&[("API_URL", "https://api.example.com")]).unwrap();
        assert_eq!(shared.thing_url, "https://api.example.com");

        let split = config(&[
            ("API_URL", "https://api.example.com"),
            ("THING_URL", "http://things.example.com"),
        ])
        .unwrap();
        assert_eq!(split.thing_url, "http://things.example.com");
    }

    #[test]
    fn test_cache_control_from_compound_duration() {
        let config = config(&[("CACHE_DURATION", "2h45m")]).unwrap();
        assert_eq!(config.cache_control_header(), "max-age=9900, public");
    }

    #[test]
    fn test_invalid_values_are_errors() {
        assert_eq!(
            config(&[("CACHE_DURATION", "soon")]),
            Err(ConfigError::InvalidDuration {
                name: "CACHE_DURATION",
                value: "soon".into()
            })
        );
        assert!(matches!(
            config(&[("PORT", "eighty")]),
            Err(ConfigError::InvalidNumber { name: "PORT", .. })
        ));
        assert_eq!(
            config(&[("NEO_USER", "neo4j")]),
            Err(ConfigError::PartialCredentials)
        );
    }

    #[test]
    fn test_credentials_are_read_as_a_pair() {
        let config = config(&[("NEO_USER", "neo4j"), ("NEO_PASSWORD", "secret")]).unwrap();
        assert_eq!(
            config.neo_credentials,
            Some(("neo4j".to_string(), "secret".to_string()))
        );
    }

    #[test]
    fn test_parse_duration() {
        assert_eq!(parse_duration("30s"), Some(Duration::from_secs(30)));
        assert_eq!(parse_duration("1m30s"), Some(Duration::from_secs(90)));
        assert_eq!(parse_duration("500ms"), Some(Duration::from_millis(500)));
        assert_eq!(parse_duration("1.5h"), Some(Duration::from_secs(5400)));
        assert_eq!(parse_duration("10us"), Some(Duration::from_micros(10)));
        assert_eq!(parse_duration("0"), Some(Duration::ZERO));

        assert_eq!(parse_duration(""), None);
        assert_eq!(parse_duration("30"), None);
        assert_eq!(parse_duration("-5s"), None);
        assert_eq!(parse_duration("5d"), None);
        assert_eq!(parse_duration("s"), None);
    }
}
