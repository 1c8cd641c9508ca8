use reqwest::StatusCode;
use std::fmt::{self, Display};

#[derive(Debug)]
pub enum Error {
    Reqwest(reqwest::Error),
    Status(StatusCode),
    Json(serde_json::Error),
    Toml(toml::de::Error),
    Io(std::io::Error),
    Custom(String),
}

impl From<reqwest::Error> for Error {
    fn from(error: reqwest::Error) -> Self {
        Self::Reqwest(error)
    }
}

impl From<serde_json::Error> for Error {
    fn from(error: serde_json::Error) -> Self {
        Self::Json(error)
    }
}

impl From<toml::de::Error> for Error {
    fn from(error: toml::de::Error) -> Self {
        Self::Toml(error)
    }
}

impl From<std::io::Error> for Error {
    fn from(error: std::io::Error) -> Self {
        Self::Io(error)
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Reqwest(error) => Some(error),
            Self::Json(error) => Some(error),
            Self::Toml(error) => Some(error),
            Self::Io(error) => Some(error),
            Self::Status(..) | Self::Custom(..) => None,
        }
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Reqwest(error) if error.is_timeout() => write!(f, "Request timed out: {error}"),
            Self::Reqwest(error) => write!(f, "Request failed: {error}"),
            Self::Status(status) => write!(f, "Server responded with {status}"),
            Self::Json(error) => write!(f, "Malformed response: {error}"),
            Self::Toml(error) => write!(f, "Invalid configuration: {error}"),
            Self::Io(error) => write!(f, "Could not read configuration: {error}"),
            Self::Custom(message) => message.fmt(f),
        }
    }
}
