use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use reqwest::Url;
use serde_json::json;
use std::time::Duration;

use crate::graphql::GraphQLResponse;
use crate::Error;

const CONTENT_TYPE_JSON: &str = "application/json; charset=utf-8";

/// Builds the `{"query": ...}` payload sent for a document.
pub fn request_body(document: &str) -> String {
    json! {{ "query": document }}.to_string()
}

/// Posts literal GraphQL documents to a single endpoint.
pub struct Client {
    endpoint: Url,
    client: reqwest::Client,
}

impl Client {
    pub fn new(endpoint: Url, timeout: Duration) -> Result<Self, Error> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static(CONTENT_TYPE_JSON));
        Ok(Self {
            endpoint,
            client: reqwest::Client::builder()
                .default_headers(headers)
                .timeout(timeout)
                .build()?,
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Issues exactly one POST for `document`. Never retries.
    pub async fn fetch(&self, document: &str) -> Result<GraphQLResponse, Error> {
        if document.trim().is_empty() {
            return Err(Error::Custom("The query document is empty".to_owned()));
        }
        log::trace!("graphql query: {}", document);
        let response = self
            .client
            .post(self.endpoint.clone())
            .body(request_body(document))
            .send()
            .await?;
        let status = response.status();
        log::trace!("http response status: {}", status);
        let body = response.text().await?;
        log::trace!("http response body: {}", body);
        if !status.is_success() {
            return Err(Error::Status(status));
        }
        Ok(serde_json::from_str(&body)?)
    }
}
