//! Configured HTTP pipeline for the backend REST API.
//!
//! One `reqwest::Client` behind an `Arc`, holding the base URL and the
//! bearer token slot. The token is the only shared mutable resource in the
//! client: set on login, cleared on logout. Requests carry JSON bodies
//! unless they are multipart uploads.

use std::sync::{Arc, RwLock};

use reqwest::header::{ACCEPT, HeaderMap, HeaderValue};
use reqwest::{Method, StatusCode};
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::instrument;

use crate::config::ApiConfig;
use crate::error::{ApiError, ApiErrorBody};

/// Client for the backend REST API.
///
/// Cheaply cloneable; all clones share the same connection pool and token.
#[derive(Clone)]
pub struct ApiClient {
    inner: Arc<ApiClientInner>,
}

struct ApiClientInner {
    client: reqwest::Client,
    base_url: String,
    token: RwLock<Option<SecretString>>,
}

impl ApiClient {
    /// Create a new client from configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client fails to build.
    pub fn new(config: &ApiConfig) -> Result<Self, ApiError> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .build()?;

        Ok(Self {
            inner: Arc::new(ApiClientInner {
                client,
                base_url: config.base_url.as_str().trim_end_matches('/').to_string(),
                token: RwLock::new(None),
            }),
        })
    }

    /// Attach a bearer token to all subsequent requests.
    pub fn set_token(&self, token: &str) {
        if let Ok(mut slot) = self.inner.token.write() {
            *slot = Some(SecretString::from(token.to_string()));
        }
    }

    /// Remove the bearer token (logout).
    pub fn clear_token(&self) {
        if let Ok(mut slot) = self.inner.token.write() {
            *slot = None;
        }
    }

    /// Whether a bearer token is currently attached.
    #[must_use]
    pub fn has_token(&self) -> bool {
        self.inner
            .token
            .read()
            .map(|slot| slot.is_some())
            .unwrap_or(false)
    }

    /// Build a request for `path` (which must start with `/`), attaching the
    /// bearer token when one is held.
    pub(crate) fn request(&self, method: Method, path: &str) -> reqwest::RequestBuilder {
        let url = format!("{}{path}", self.inner.base_url);
        let builder = self.inner.client.request(method, url);
        match self.inner.token.read() {
            Ok(slot) => match slot.as_ref() {
                Some(token) => builder.bearer_auth(token.expose_secret()),
                None => builder,
            },
            Err(_) => builder,
        }
    }

    /// `GET` returning a JSON body.
    #[instrument(skip(self))]
    pub(crate) async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let response = self.request(Method::GET, path).send().await?;
        self.parse_response(path, response).await
    }

    /// `POST` with a JSON body, returning a JSON body.
    #[instrument(skip(self, body))]
    pub(crate) async fn post_json<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let response = self.request(Method::POST, path).json(body).send().await?;
        self.parse_response(path, response).await
    }

    /// `POST` with a JSON body, discarding the response body.
    #[instrument(skip(self, body))]
    pub(crate) async fn post_unit<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<(), ApiError> {
        let response = self.request(Method::POST, path).json(body).send().await?;
        self.expect_success(path, response).await
    }

    /// `POST` with a multipart body, discarding the response body.
    #[instrument(skip(self, form))]
    pub(crate) async fn post_multipart_unit(
        &self,
        path: &str,
        form: reqwest::multipart::Form,
    ) -> Result<(), ApiError> {
        let response = self
            .request(Method::POST, path)
            .multipart(form)
            .send()
            .await?;
        self.expect_success(path, response).await
    }

    /// `PUT` with a JSON body, returning a JSON body.
    #[instrument(skip(self, body))]
    pub(crate) async fn put_json<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let response = self.request(Method::PUT, path).json(body).send().await?;
        self.parse_response(path, response).await
    }

    /// `PUT` with a JSON body, discarding the response body.
    #[instrument(skip(self, body))]
    pub(crate) async fn put_unit<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<(), ApiError> {
        let response = self.request(Method::PUT, path).json(body).send().await?;
        self.expect_success(path, response).await
    }

    /// `PATCH` with a JSON body, discarding the response body.
    #[instrument(skip(self, body))]
    pub(crate) async fn patch_unit<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<(), ApiError> {
        let response = self.request(Method::PATCH, path).json(body).send().await?;
        self.expect_success(path, response).await
    }

    /// `DELETE`, discarding the response body.
    #[instrument(skip(self))]
    pub(crate) async fn delete_unit(&self, path: &str) -> Result<(), ApiError> {
        let response = self.request(Method::DELETE, path).send().await?;
        self.expect_success(path, response).await
    }

    /// Parse a JSON response, mapping error statuses to typed errors.
    async fn parse_response<T: DeserializeOwned>(
        &self,
        path: &str,
        response: reqwest::Response,
    ) -> Result<T, ApiError> {
        let status = response.status();
        if !status.is_success() {
            return Err(error_from_status(path, status, response).await);
        }

        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| {
            tracing::error!(
                path,
                error = %e,
                body = %body.chars().take(500).collect::<String>(),
                "Failed to parse API response"
            );
            ApiError::Parse(format!("{path}: {e}"))
        })
    }

    /// Check for a success status, discarding the body.
    async fn expect_success(
        &self,
        path: &str,
        response: reqwest::Response,
    ) -> Result<(), ApiError> {
        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(error_from_status(path, status, response).await)
        }
    }
}

/// Map an error status to a typed error, reading the backend's `message`
/// body when it has one.
async fn error_from_status(
    path: &str,
    status: StatusCode,
    response: reqwest::Response,
) -> ApiError {
    if status == StatusCode::TOO_MANY_REQUESTS {
        let retry_after = response
            .headers()
            .get("Retry-After")
            .and_then(|v| v.to_str().ok())
            .and_then(|s| s.parse().ok())
            .unwrap_or(60);
        return ApiError::RateLimited(retry_after);
    }

    let body = response.text().await.unwrap_or_default();
    let message = extract_message(&body).unwrap_or_else(|| {
        if body.is_empty() {
            status
                .canonical_reason()
                .unwrap_or("unknown error")
                .to_string()
        } else {
            body.chars().take(200).collect()
        }
    });

    match status {
        StatusCode::UNAUTHORIZED => ApiError::Unauthorized(message),
        StatusCode::NOT_FOUND => ApiError::NotFound(path.to_string()),
        _ => ApiError::Api {
            status: status.as_u16(),
            message,
        },
    }
}

/// Pull the `message` field out of an error body, if it parses.
fn extract_message(body: &str) -> Option<String> {
    serde_json::from_str::<ApiErrorBody>(body)
        .ok()
        .and_then(|parsed| parsed.message)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_message() {
        assert_eq!(
            extract_message(r#"{"message":"Credenciais inválidas"}"#).as_deref(),
            Some("Credenciais inválidas")
        );
        assert!(extract_message(r#"{"errors":{"email":["taken"]}}"#).is_none());
        assert!(extract_message("<html>502</html>").is_none());
    }

    #[test]
    fn test_client_is_clone_send_sync() {
        fn assert_clone<T: Clone>() {}
        fn assert_send_sync<T: Send + Sync>() {}
        assert_clone::<ApiClient>();
        assert_send_sync::<ApiClient>();
    }

    #[test]
    fn test_token_slot() {
        let config = crate::ApiConfig {
            base_url: url::Url::parse("https://api.example.com/api").expect("url"),
            session_path: std::path::PathBuf::from("/tmp/session.json"),
        };
        let client = ApiClient::new(&config).expect("client");
        assert!(!client.has_token());

        client.set_token("abc");
        assert!(client.has_token());

        client.clear_token();
        assert!(!client.has_token());
    }
}
