use chrono::{DateTime, FixedOffset};
use serde_json::{Map, Value};
use std::fmt::{self, Display};

use super::DateFormat;

const TITLE: &str = "title";
const START_TIME: &str = "startTime";
const START_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%z";

#[derive(Clone, Debug, PartialEq)]
pub struct TripRow {
    pub title: String,
    pub start_time: DateTime<FixedOffset>,
}

impl TripRow {
    pub fn from_record(record: &Map<String, Value>) -> Result<Self, RowError> {
        let start_time = string_field(record, START_TIME)?;
        let title = string_field(record, TITLE)?;
        Ok(Self {
            title: title.to_owned(),
            start_time: parse_start_time(start_time)?,
        })
    }

    pub fn display_text(&self, format: &DateFormat) -> String {
        format!("{} : {}", format.format(&self.start_time), self.title)
    }
}

fn string_field<'a>(record: &'a Map<String, Value>, field: &'static str) -> Result<&'a str, RowError> {
    match record.get(field) {
        None | Some(Value::Null) => Err(RowError::MissingField(field)),
        Some(Value::String(value)) => Ok(value),
        Some(..) => Err(RowError::WrongType {
            field,
            expected: "string",
        }),
    }
}

fn parse_start_time(value: &str) -> Result<DateTime<FixedOffset>, RowError> {
    DateTime::parse_from_str(value, START_TIME_FORMAT)
        .or_else(|error| DateTime::parse_from_rfc3339(value).map_err(|_| error))
        .map_err(|source| RowError::InvalidTimestamp {
            value: value.to_owned(),
            source,
        })
}

#[derive(Debug)]
pub enum RowError {
    NotAnObject,
    MissingField(&'static str),
    WrongType {
        field: &'static str,
        expected: &'static str,
    },
    InvalidTimestamp {
        value: String,
        source: chrono::ParseError,
    },
}

impl Display for RowError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::NotAnObject => "record is not an object".fmt(f),
            Self::MissingField(field) => write!(f, "missing field `{field}`"),
            Self::WrongType { field, expected } => write!(f, "field `{field}` is not a {expected}"),
            Self::InvalidTimestamp { value, source } => write!(f, "could not parse {value}: {source}"),
        }
    }
}

impl std::error::Error for RowError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::InvalidTimestamp { source, .. } => Some(source),
            _ => None,
        }
    }
}
