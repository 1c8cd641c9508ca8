use reqwest::Url;
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

use crate::trips::DateFormat;
use crate::Error;

const ENDPOINT: &str = "https://graphql-demo.commonsware.com/0.1/graphql";
const DOCUMENT: &str = "{ allTrips { id title startTime priority duration creationTime } }";
const FIELD: &str = "allTrips";
const TIMEOUT_SECS: u64 = 30;

#[derive(Clone, Deserialize, Debug, PartialEq)]
#[serde(default)]
pub struct Config {
    pub endpoint: String,
    pub document: String,
    pub field: String,
    pub timeout_secs: u64,
    pub locale: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            endpoint: ENDPOINT.to_owned(),
            document: DOCUMENT.to_owned(),
            field: FIELD.to_owned(),
            timeout_secs: TIMEOUT_SECS,
            locale: None,
        }
    }
}

impl Config {
    pub fn from_toml(s: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(s)
    }

    /// Like [`Config::from_toml`], but also rejects values no request could use.
    pub fn parse(s: &str) -> Result<Self, Error> {
        let config = Self::from_toml(s)?;
        config.check_timeout()?;
        Ok(config)
    }

    /// Reads `TRIPS_CONFIG` (or `trips.toml`) if present, then applies
    /// `TRIPS_*` environment overrides.
    pub fn load() -> Result<Self, Error> {
        let path = std::env::var("TRIPS_CONFIG").unwrap_or_else(|_| "trips.toml".to_owned());
        let mut config = Self::from_file(Path::new(&path))?;
        config.apply_overrides(|name| std::env::var(name).ok())?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self, Error> {
        if !path.exists() {
            log::debug!("No configuration at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        let contents = std::fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<(), Error> {
        if let Some(endpoint) = lookup("TRIPS_ENDPOINT") {
            self.endpoint = endpoint;
        }
        if let Some(locale) = lookup("TRIPS_LOCALE") {
            self.locale = Some(locale);
        }
        if let Some(timeout) = lookup("TRIPS_TIMEOUT_SECS") {
            self.timeout_secs = timeout.trim().parse().map_err(|_| {
                Error::Custom(format!("TRIPS_TIMEOUT_SECS must be a whole number of seconds, got `{timeout}`"))
            })?;
        }
        self.check_timeout()
    }

    fn check_timeout(&self) -> Result<(), Error> {
        if self.timeout_secs == 0 {
            return Err(Error::Custom("The request timeout must be at least one second".to_owned()));
        }
        Ok(())
    }

    pub fn endpoint_url(&self) -> Result<Url, Error> {
        let url: Url = self
            .endpoint
            .parse()
            .map_err(|error| Error::Custom(format!("Invalid endpoint `{}`: {error}", self.endpoint)))?;
        match url.scheme() {
            "http" | "https" => Ok(url),
            scheme => Err(Error::Custom(format!(
                "Endpoint `{}` must use http or https, not {scheme}",
                self.endpoint
            ))),
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn date_format(&self) -> DateFormat {
        match &self.locale {
            Some(tag) => DateFormat::from_tag(tag).unwrap_or_else(|| {
                log::warn!("Unknown locale {tag}, using the system locale");
                DateFormat::system()
            }),
            None => DateFormat::system(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn defaults_match_the_demo_server() {
        let config = Config::from_toml("").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.field, "allTrips");
        assert_eq!(config.endpoint_url().unwrap().host_str(), Some("graphql-demo.commonsware.com"));
    }

    #[test]
    fn partial_files_keep_defaults() {
        let config = Config::from_toml(
            r#"
            endpoint = "http://localhost:4000/graphql"
            locale = "de-DE"
            "#,
        )
        .unwrap();
        assert_eq!(config.endpoint, "http://localhost:4000/graphql");
        assert_eq!(config.document, DOCUMENT);
        assert_eq!(config.date_format(), DateFormat::new(chrono::Locale::de_DE));
    }

    #[test]
    fn environment_overrides_the_file() {
        let env = HashMap::from([
            ("TRIPS_ENDPOINT", "http://example.test/graphql"),
            ("TRIPS_TIMEOUT_SECS", "5"),
        ]);
        let mut config = Config::default();
        config
            .apply_overrides(|name| env.get(name).map(|value| value.to_string()))
            .unwrap();
        assert_eq!(config.endpoint, "http://example.test/graphql");
        assert_eq!(config.timeout(), Duration::from_secs(5));
        assert_eq!(config.locale, None);
    }

    #[test]
    fn bad_timeout_override_is_an_error() {
        let mut config = Config::default();
        assert!(config.apply_overrides(|_| Some("soon".to_owned())).is_err());
    }

    #[test]
    fn zero_timeout_is_rejected() {
        assert!(Config::parse("timeout_secs = 0").is_err());
        assert_eq!(Config::parse("timeout_secs = 3").unwrap().timeout(), Duration::from_secs(3));

        let mut config = Config::default();
        let error = config
            .apply_overrides(|name| (name == "TRIPS_TIMEOUT_SECS").then(|| "0".to_owned()))
            .unwrap_err();
        assert!(error.to_string().contains("timeout"));
    }

    #[test]
    fn endpoint_must_be_absolute_http() {
        let mut config = Config::default();
        config.endpoint = "/graphql".to_owned();
        assert!(config.endpoint_url().is_err());
        config.endpoint = "ftp://example.test/graphql".to_owned();
        assert!(config.endpoint_url().is_err());
    }

    #[test]
    fn missing_file_uses_defaults() {
        let config = Config::from_file(Path::new("does/not/exist.toml")).unwrap();
        assert_eq!(config, Config::default());
    }
}
