//! HTTP client for the Cloud Databases REST API
//!
//! A thin wrapper over `reqwest` that handles credential headers, JSON
//! encoding/decoding, and mapping of HTTP statuses onto [`CoreError`]
//! variants. Resource handlers build percent-encoded paths with
//! [`escape`] and call the generic verb methods.

use serde::Serialize;
use serde::de::DeserializeOwned;
use std::borrow::Cow;
use std::time::Duration;
use tracing::{debug, trace};

use crate::error::{CoreError, Result};

/// Default request timeout for a single API call (polling has its own bound)
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Percent-encode a path segment derived from user input.
///
/// Service names, engine names and resource ids all come from outside the
/// program and must never be interpolated into a path raw.
#[must_use]
pub fn escape(segment: &str) -> Cow<'_, str> {
    urlencoding::encode(segment)
}

/// Authenticated client for the Cloud Databases API
#[derive(Clone)]
pub struct CloudClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
    api_secret: String,
}

impl std::fmt::Debug for CloudClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Credentials are deliberately omitted
        f.debug_struct("CloudClient")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

/// Builder for [`CloudClient`]
#[derive(Debug, Default)]
pub struct CloudClientBuilder {
    base_url: Option<String>,
    api_key: Option<String>,
    api_secret: Option<String>,
    user_agent: Option<String>,
}

impl CloudClientBuilder {
    /// Set the API base URL (e.g. `https://api.example-cloud.com/v1`)
    #[must_use]
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Set the API key
    #[must_use]
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Set the API secret
    #[must_use]
    pub fn api_secret(mut self, secret: impl Into<String>) -> Self {
        self.api_secret = Some(secret.into());
        self
    }

    /// Set the User-Agent header
    #[must_use]
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = Some(agent.into());
        self
    }

    /// Build the client
    pub fn build(self) -> Result<CloudClient> {
        let base_url = self
            .base_url
            .ok_or_else(|| CoreError::Config("base_url is required".into()))?;
        let api_key = self
            .api_key
            .ok_or_else(|| CoreError::Config("api_key is required".into()))?;
        let api_secret = self
            .api_secret
            .ok_or_else(|| CoreError::Config("api_secret is required".into()))?;

        let mut builder = reqwest::Client::builder().timeout(REQUEST_TIMEOUT);
        if let Some(agent) = self.user_agent {
            builder = builder.user_agent(agent);
        }
        let http = builder
            .build()
            .map_err(|e| CoreError::Connection(e.to_string()))?;

        Ok(CloudClient {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
            api_secret,
        })
    }
}

impl CloudClient {
    /// Start building a client
    #[must_use]
    pub fn builder() -> CloudClientBuilder {
        CloudClientBuilder::default()
    }

    /// The configured base URL
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// GET a JSON resource
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        self.request(reqwest::Method::GET, path, None::<&()>).await
    }

    /// POST a JSON body, decoding the JSON response
    pub async fn post<B: Serialize, T: DeserializeOwned>(&self, path: &str, body: &B) -> Result<T> {
        self.request(reqwest::Method::POST, path, Some(body)).await
    }

    /// PUT a JSON body, decoding the JSON response
    pub async fn put<B: Serialize, T: DeserializeOwned>(&self, path: &str, body: &B) -> Result<T> {
        self.request(reqwest::Method::PUT, path, Some(body)).await
    }

    /// DELETE a resource, ignoring any response body
    pub async fn delete(&self, path: &str) -> Result<()> {
        let url = format!("{}{}", self.base_url, path);
        debug!("DELETE {}", path);

        let response = self
            .http
            .delete(&url)
            .header("x-api-key", &self.api_key)
            .header("x-api-secret-key", &self.api_secret)
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            trace!("DELETE {} -> {}", path, status);
            return Ok(());
        }
        Err(Self::error_for(status, path, response.text().await.ok()))
    }

    async fn request<B: Serialize, T: DeserializeOwned>(
        &self,
        method: reqwest::Method,
        path: &str,
        body: Option<&B>,
    ) -> Result<T> {
        let url = format!("{}{}", self.base_url, path);
        debug!("{} {}", method, path);

        let mut request = self
            .http
            .request(method.clone(), &url)
            .header("x-api-key", &self.api_key)
            .header("x-api-secret-key", &self.api_secret);
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await?;
        let status = response.status();
        trace!("{} {} -> {}", method, path, status);

        if !status.is_success() {
            return Err(Self::error_for(status, path, response.text().await.ok()));
        }

        let text = response.text().await?;
        Ok(serde_json::from_str(&text)?)
    }

    fn error_for(status: reqwest::StatusCode, path: &str, body: Option<String>) -> CoreError {
        let message = body
            .filter(|b| !b.is_empty())
            .unwrap_or_else(|| status.to_string());
        match status.as_u16() {
            404 => CoreError::NotFound(path.to_string()),
            401 | 403 => CoreError::AuthenticationFailed(message),
            code => CoreError::Api {
                status: code,
                message,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_plain_segment_unchanged() {
        assert_eq!(escape("my-project-01"), "my-project-01");
    }

    #[test]
    fn test_escape_reserved_characters() {
        assert_eq!(escape("a/b c"), "a%2Fb%20c");
    }

    #[test]
    fn test_builder_requires_base_url() {
        let err = CloudClient::builder()
            .api_key("k")
            .api_secret("s")
            .build()
            .unwrap_err();
        assert!(err.to_string().contains("base_url"));
    }

    #[test]
    fn test_builder_trims_trailing_slash() {
        let client = CloudClient::builder()
            .base_url("https://api.example.com/v1/")
            .api_key("k")
            .api_secret("s")
            .build()
            .unwrap();
        assert_eq!(client.base_url(), "https://api.example.com/v1");
    }

    #[test]
    fn test_debug_hides_credentials() {
        let client = CloudClient::builder()
            .base_url("https://api.example.com")
            .api_key("very-secret-key")
            .api_secret("very-secret-secret")
            .build()
            .unwrap();
        let debug = format!("{:?}", client);
        assert!(!debug.contains("very-secret"));
    }
}
