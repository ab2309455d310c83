//! API Client
//!
//! Generic JSON request helper for a future booking backend. No page flow
//! calls it yet; form submission is simulated with a timer.

use reqwest::{Client, Method, Url};
use serde_json::Value;
use tracing::{debug, error};

use crate::error::{Error, Result};

/// Options for a single request
#[derive(Debug, Clone)]
pub struct RequestOptions {
    pub method: Method,
    pub body: Option<Value>,
}

impl Default for RequestOptions {
    fn default() -> Self {
        Self {
            method: Method::GET,
            body: None,
        }
    }
}

impl RequestOptions {
    pub fn post(body: Value) -> Self {
        Self {
            method: Method::POST,
            body: Some(body),
        }
    }
}

/// JSON-over-HTTP client bound to a base URL
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint_url(&self, endpoint: &str) -> Result<Url> {
        let base = Url::parse(&self.base_url).map_err(|e| Error::Invalid {
            message: format!("invalid base URL {}: {e}", self.base_url),
        })?;
        base.join(endpoint).map_err(|e| Error::Invalid {
            message: format!("invalid endpoint {endpoint}: {e}"),
        })
    }

    /// Send a JSON request and decode the JSON response
    ///
    /// Failures are logged and returned to the caller.
    pub async fn call(&self, endpoint: &str, options: RequestOptions) -> Result<Value> {
        let result = self.send(endpoint, options).await;
        if let Err(e) = &result {
            error!(endpoint, error = %e, "API call failed");
        }
        result
    }

    async fn send(&self, endpoint: &str, options: RequestOptions) -> Result<Value> {
        let url = self.endpoint_url(endpoint)?;
        debug!(method = %options.method, url = %url, "API call");

        let mut request = self
            .client
            .request(options.method, url)
            .header(reqwest::header::CONTENT_TYPE, "application/json");
        if let Some(body) = &options.body {
            request = request.json(body);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(Error::HttpStatus {
                status: status.as_u16(),
            });
        }

        Ok(response.json().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_resolution() {
        let api = ApiClient::new("https://api.pacificpanama.test/v1/");
        let url = api.endpoint_url("bookings").expect("url");
        assert_eq!(url.as_str(), "https://api.pacificpanama.test/v1/bookings");
    }

    #[tokio::test]
    async fn test_invalid_base_url_is_reported() {
        let api = ApiClient::new("not a url");
        let result = api.call("bookings", RequestOptions::default()).await;
        assert!(matches!(result, Err(Error::Invalid { .. })));
    }
}
