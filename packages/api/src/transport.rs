//! # Base transport: one HTTP exchange, no interception
//!
//! [`Transport`] performs exactly one request/response exchange. It knows
//! nothing about sessions: the bearer credential is whatever the caller put on
//! the [`ApiRequest`]. The authenticated pipeline in [`crate::client`] wraps a
//! transport; the token refresh call goes to the transport directly so that it
//! can never be intercepted by the pipeline it serves.

use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::{ApiError, Result};

/// A backend call described independently of any HTTP client.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    /// Endpoint path relative to the API base URL, e.g. `"/profile/"`.
    pub path: String,
    pub query: Vec<(String, String)>,
    pub body: Option<serde_json::Value>,
    /// Access credential sent as `Authorization: Bearer <token>`.
    pub bearer: Option<String>,
}

impl ApiRequest {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            body: None,
            bearer: None,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path)
    }

    pub fn put(path: impl Into<String>) -> Self {
        Self::new(Method::PUT, path)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::DELETE, path)
    }

    pub fn with_query(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.query.push((key.into(), value.to_string()));
        self
    }

    pub fn with_json<B: Serialize>(mut self, body: &B) -> Result<Self> {
        self.body = Some(serde_json::to_value(body)?);
        Ok(self)
    }

    pub fn with_bearer(mut self, token: Option<String>) -> Self {
        self.bearer = token;
        self
    }
}

/// Raw response: status code and body text.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: String,
}

impl ApiResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn is_unauthorized(&self) -> bool {
        self.status == 401
    }

    /// Turn a non-2xx response into [`ApiError::Status`].
    pub fn into_result(self) -> Result<Self> {
        if self.is_success() {
            Ok(self)
        } else {
            Err(ApiError::Status {
                status: self.status,
                body: self.body,
            })
        }
    }

    pub fn json<T: DeserializeOwned>(&self) -> Result<T> {
        Ok(serde_json::from_str(&self.body)?)
    }
}

/// A single request/response exchange.
pub trait Transport {
    fn send(
        &self,
        request: ApiRequest,
    ) -> impl std::future::Future<Output = Result<ApiResponse>>;
}

impl<T: Transport> Transport for std::sync::Arc<T> {
    fn send(
        &self,
        request: ApiRequest,
    ) -> impl std::future::Future<Output = Result<ApiResponse>> {
        (**self).send(request)
    }
}

/// reqwest-backed transport rooted at the API base URL.
#[derive(Clone, Debug)]
pub struct HttpTransport {
    client: reqwest::Client,
    base_url: String,
}

impl HttpTransport {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    pub fn with_client(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { client, base_url }
    }

    pub fn from_config(config: &store::LmsConfig) -> Self {
        Self::new(config.api.base_url.clone())
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}/{}", self.base_url, path)
        }
    }
}

impl Transport for HttpTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse> {
        let mut builder = self
            .client
            .request(request.method, self.url(&request.path))
            .header(reqwest::header::ACCEPT, "application/json");
        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        if let Some(token) = &request.bearer {
            builder = builder.bearer_auth(token);
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder.send().await?;
        let status = response.status().as_u16();
        let body = response.text().await?;
        Ok(ApiResponse { status, body })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_joining() {
        let transport = HttpTransport::new("https://lms.test/api/");
        assert_eq!(transport.base_url(), "https://lms.test/api");
        assert_eq!(transport.url("/profile/"), "https://lms.test/api/profile/");
        assert_eq!(transport.url("courses/"), "https://lms.test/api/courses/");
    }

    #[test]
    fn test_non_success_becomes_status_error() {
        let ok = ApiResponse::new(204, "").into_result();
        assert!(ok.is_ok());

        let err = ApiResponse::new(403, r#"{"detail":"nope"}"#)
            .into_result()
            .unwrap_err();
        assert_eq!(err.status(), Some(403));
        assert!(!err.is_unauthorized());
    }

    #[test]
    fn test_request_builders() {
        let request = ApiRequest::get("/courses/")
            .with_query("page", 2)
            .with_bearer(Some("tok".to_string()));
        assert_eq!(request.method, Method::GET);
        assert_eq!(request.query, vec![("page".to_string(), "2".to_string())]);
        assert_eq!(request.bearer.as_deref(), Some("tok"));

        let request = ApiRequest::post("/auth/token/refresh/")
            .with_json(&serde_json::json!({ "refresh": "r" }))
            .unwrap();
        assert_eq!(request.body.unwrap()["refresh"], "r");
    }
}
