use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde_json::Value;
use tracing::debug;

use crate::error::Result;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
}

/// One outbound call against the ARK API, relative to the base URL.
#[derive(Debug, Clone, PartialEq)]
pub struct UpstreamRequest {
    pub method: Method,
    pub path: String,
    pub body: Option<Value>,
}

impl UpstreamRequest {
    pub fn post(path: impl Into<String>, body: Value) -> Self {
        Self {
            method: Method::Post,
            path: path.into(),
            body: Some(body),
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self {
            method: Method::Get,
            path: path.into(),
            body: None,
        }
    }
}

/// Status plus the body parsed as JSON. `body` is `None` when the service
/// sent nothing parseable.
#[derive(Debug, Clone)]
pub struct RawResponse {
    pub status: StatusCode,
    pub body: Option<Value>,
}

impl RawResponse {
    pub fn reason(&self) -> String {
        match self.status.canonical_reason() {
            Some(reason) => format!("{} {reason}", self.status.as_u16()),
            None => self.status.as_u16().to_string(),
        }
    }
}

/// Executes exactly one HTTP exchange. Implementations must not retry.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, req: UpstreamRequest) -> Result<RawResponse>;
}

/// reqwest-backed transport. The default client has no overall request
/// timeout, so a call waits until the server answers or the connection drops.
pub struct HttpTransport {
    base_url: String,
    api_key: String,
    http: Client,
}

impl HttpTransport {
    pub fn new(base_url: String, api_key: String) -> Self {
        Self::with_client(base_url, api_key, Client::new())
    }

    pub fn with_client(base_url: String, api_key: String, http: Client) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
            http,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, req: UpstreamRequest) -> Result<RawResponse> {
        let url = self.url(&req.path);
        debug!(method = ?req.method, %url, body = ?req.body, "sending ARK request");

        let builder = match req.method {
            Method::Get => self.http.get(&url),
            Method::Post => self.http.post(&url),
        };
        // GET carries the content type too; the service does not mind.
        let builder = builder
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .bearer_auth(&self.api_key);
        let builder = match req.body {
            Some(ref body) => builder.json(body),
            None => builder,
        };

        let resp = builder.send().await?;
        let status = resp.status();
        let bytes = resp.bytes().await?;
        let body = serde_json::from_slice::<Value>(&bytes).ok();

        debug!(%status, parsed = body.is_some(), "ARK response received");
        Ok(RawResponse { status, body })
    }
}
