//! Shared HTTP plumbing for the catalog REST clients.

use reqwest::{Client, RequestBuilder, Response};
use serde::{de::DeserializeOwned, Deserialize};

use crate::error::{ApiError, ApiResult};

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

/// HTTP client bound to one API base URL (for example `http://localhost:3001/api`).
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: Client,
    base_url: String,
}

impl ApiClient {
    /// Creates a client for `base_url`.
    ///
    /// A trailing `/` is removed so endpoint paths can be appended directly.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::InvalidUrl`] when the URL is empty or not `http(s)`.
    pub fn new(base_url: &str) -> ApiResult<Self> {
        let base_url = base_url.trim().trim_end_matches('/');
        if base_url.is_empty() {
            return Err(ApiError::InvalidUrl("URL cannot be empty".into()));
        }
        if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
            return Err(ApiError::InvalidUrl(
                "URL must start with http:// or https://".into(),
            ));
        }

        Ok(Self {
            http: Client::new(),
            base_url: base_url.to_string(),
        })
    }

    /// Returns the normalized base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub(crate) fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    pub(crate) fn http(&self) -> &Client {
        &self.http
    }

    /// Sends `request` and decodes a JSON success body.
    ///
    /// Non-2xx responses become [`ApiError::Rejected`] carrying the server `message` field or
    /// `fallback` when the body has none.
    pub(crate) async fn send_json<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        fallback: &str,
    ) -> ApiResult<T> {
        let response = self.send(request, fallback).await?;
        response
            .json::<T>()
            .await
            .map_err(|e| ApiError::Parse(e.to_string()))
    }

    /// Sends `request` and discards any success body.
    pub(crate) async fn send_empty(&self, request: RequestBuilder, fallback: &str) -> ApiResult<()> {
        self.send(request, fallback).await.map(|_| ())
    }

    async fn send(&self, request: RequestBuilder, fallback: &str) -> ApiResult<Response> {
        let response = request.send().await.map_err(ApiError::from)?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let message = response
            .json::<ErrorBody>()
            .await
            .ok()
            .and_then(|body| body.message)
            .filter(|message| !message.trim().is_empty())
            .unwrap_or_else(|| fallback.to_string());
        leptos::logging::warn!("api request rejected ({}): {message}", status.as_u16());
        Err(ApiError::Rejected {
            status: status.as_u16(),
            message,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizes_trailing_slash() {
        let client = ApiClient::new("http://localhost:3001/api/").expect("client");
        assert_eq!(client.base_url(), "http://localhost:3001/api");
        assert_eq!(
            client.endpoint("/auth/login"),
            "http://localhost:3001/api/auth/login"
        );
    }

    #[test]
    fn rejects_empty_and_non_http_urls() {
        assert!(matches!(ApiClient::new(""), Err(ApiError::InvalidUrl(_))));
        assert!(matches!(
            ApiClient::new("ftp://example.com"),
            Err(ApiError::InvalidUrl(_))
        ));
    }
}
