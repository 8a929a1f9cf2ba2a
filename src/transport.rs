// src/transport.rs
//! HTTP transport abstraction
//!
//! The sync module talks to the backend through the [`Transport`] trait so
//! that status-code branching can be exercised without a server:
//! - [`HttpTransport`]: reqwest against a configured base URL
//! - [`MockTransport`]: scripted responses, records every request
//!
//! A transport returns `Ok` for any HTTP status. `Err` means no response was
//! obtained (connection refused, DNS, TLS, body read failure).

use crate::error::{Error, Result, TransportError};
use async_trait::async_trait;
use serde::Serialize;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tracing::debug;

pub use reqwest::{Method, StatusCode};

/// A request against the backend, relative to its base URL
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    /// Path starting with `/`, already percent-encoded
    pub path: String,
    /// Query parameters, encoded by the transport
    pub query: Vec<(String, String)>,
    /// Bearer credential for the `Authorization` header
    pub bearer: Option<String>,
    /// JSON body
    pub body: Option<serde_json::Value>,
}

impl ApiRequest {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            bearer: None,
            body: None,
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

    /// Append a query parameter
    pub fn with_query(mut self, key: &str, value: &str) -> Self {
        self.query.push((key.to_string(), value.to_string()));
        self
    }

    /// Attach a bearer token, if any
    pub fn with_bearer(mut self, token: Option<String>) -> Self {
        self.bearer = token;
        self
    }

    /// Attach a JSON body
    pub fn with_json<T: Serialize>(mut self, body: &T) -> std::result::Result<Self, serde_json::Error> {
        self.body = Some(serde_json::to_value(body)?);
        Ok(self)
    }
}

/// A backend response of any status
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
    pub status: StatusCode,
    pub body: String,
}

impl ApiResponse {
    pub fn new(status: StatusCode, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// Any 2xx status
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }
}

/// Trait for sending requests to the recipe backend
#[async_trait]
pub trait Transport: Send + Sync {
    /// Send a request and return the response, whatever its status
    async fn send(&self, request: ApiRequest) -> std::result::Result<ApiResponse, TransportError>;

    /// Human-readable name for logging
    fn name(&self) -> &str;
}

/// reqwest-backed transport
pub struct HttpTransport {
    client: reqwest::Client,
    base_url: String,
}

impl HttpTransport {
    /// Create a transport with no request deadline
    pub fn new(base_url: &str) -> Result<Self> {
        Self::with_timeout(base_url, None)
    }

    /// Create a transport, optionally bounding each request
    pub fn with_timeout(base_url: &str, timeout: Option<Duration>) -> Result<Self> {
        url::Url::parse(base_url)
            .map_err(|e| Error::Config(format!("Invalid base URL '{}': {e}", base_url)))?;

        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| Error::Config(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Base URL without a trailing slash
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url_for(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, request: ApiRequest) -> std::result::Result<ApiResponse, TransportError> {
        let url = self.url_for(&request.path);
        debug!("{} {}", request.method, url);

        let mut builder = self.client.request(request.method.clone(), &url);
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
        let status = response.status();
        let body = response.text().await?;

        debug!("{} {} -> {}", request.method, url, status);
        Ok(ApiResponse { status, body })
    }

    fn name(&self) -> &str {
        "http"
    }
}

#[derive(Debug, Clone)]
enum MockReply {
    Response(ApiResponse),
    Failure(String),
}

/// Scripted transport for tests and offline embedding
///
/// Replies are handed out in the order they were pushed. Clones share the
/// same script and request log, so a test can keep one handle while the
/// sync module owns another.
#[derive(Debug, Clone, Default)]
pub struct MockTransport {
    replies: Arc<Mutex<VecDeque<MockReply>>>,
    requests: Arc<Mutex<Vec<ApiRequest>>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a response with a JSON body
    pub fn push_json(&self, status: StatusCode, body: serde_json::Value) -> &Self {
        self.push(MockReply::Response(ApiResponse::new(status, body.to_string())))
    }

    /// Queue a response with an empty body
    pub fn push_status(&self, status: StatusCode) -> &Self {
        self.push(MockReply::Response(ApiResponse::new(status, "")))
    }

    /// Queue a response with a raw body
    pub fn push_raw(&self, status: StatusCode, body: &str) -> &Self {
        self.push(MockReply::Response(ApiResponse::new(status, body)))
    }

    /// Queue a transport failure
    pub fn push_failure(&self, reason: &str) -> &Self {
        self.push(MockReply::Failure(reason.to_string()))
    }

    fn push(&self, reply: MockReply) -> &Self {
        self.replies
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push_back(reply);
        self
    }

    /// Every request sent so far, in order
    pub fn requests(&self) -> Vec<ApiRequest> {
        self.requests
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    /// Number of requests sent so far
    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap_or_else(|e| e.into_inner()).len()
    }

    /// Number of scripted replies not yet consumed
    pub fn pending(&self) -> usize {
        self.replies.lock().unwrap_or_else(|e| e.into_inner()).len()
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn send(&self, request: ApiRequest) -> std::result::Result<ApiResponse, TransportError> {
        self.requests
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(request);

        let reply = self
            .replies
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .pop_front();

        match reply {
            Some(MockReply::Response(response)) => Ok(response),
            Some(MockReply::Failure(reason)) => Err(TransportError::Other(reason)),
            None => Err(TransportError::Other("no scripted reply".to_string())),
        }
    }

    fn name(&self) -> &str {
        "mock"
    }
}
