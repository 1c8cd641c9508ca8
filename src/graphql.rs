use serde::Deserialize;
use serde_json::{Map, Value};
use std::fmt::{self, Display};

/// The `{data, errors}` envelope returned by a GraphQL endpoint.
///
/// Either half may be missing, and both may be present when the server
/// returns partial data alongside errors.
#[derive(Deserialize, Debug, Default)]
pub struct GraphQLResponse {
    #[serde(default)]
    pub data: Option<Map<String, Value>>,
    #[serde(default)]
    pub errors: Option<Vec<GraphQLError>>,
}

impl GraphQLResponse {
    pub fn errors(&self) -> &[GraphQLError] {
        self.errors.as_deref().unwrap_or_default()
    }
}

#[derive(Deserialize, Debug)]
pub struct GraphQLError {
    pub message: Option<String>,
    pub locations: Option<Vec<Location>>,
    pub path: Option<Vec<Value>>,
    pub extensions: Option<Value>,
}

#[derive(Deserialize, Debug)]
pub struct Location {
    pub line: u32,
    pub column: u32,
}

impl Display for GraphQLError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match &self.message {
            Some(message) => message.fmt(f)?,
            None => "Unknown GraphQL error".fmt(f)?,
        }
        for location in self.locations.iter().flatten() {
            write!(f, " (line {}, column {})", location.line, location.column)?;
        }
        Ok(())
    }
}
