//! Outbound request representation and the HTTP transport.
//!
//! Blocking reqwest client (no Tokio runtime required). One call per
//! request: no retries, no timeout, no pooling beyond what reqwest does.

use reqwest::Method;

use crate::error::{RequestError, Result};

/// A fully-formed request, built after the tier check passed.
#[derive(Debug, Clone, PartialEq)]
pub struct OutboundRequest {
    pub method: Method,
    pub url: String,
    pub headers: Vec<(&'static str, String)>,
    pub body: Option<Vec<u8>>,
}

impl OutboundRequest {
    pub fn new(method: Method, url: impl Into<String>, body: Option<Vec<u8>>) -> Self {
        Self { method, url: url.into(), headers: Vec::new(), body }
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// Status and body text of a completed exchange.
#[derive(Debug, Clone, PartialEq)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
}

/// Executes one request and hands back the raw response.
///
/// Failures to connect or read the body are `request_error`s.
pub trait Transport {
    fn execute(&self, request: &OutboundRequest) -> Result<RawResponse>;
}

/// reqwest-backed transport.
#[derive(Clone)]
pub struct HttpTransport {
    http: reqwest::blocking::Client,
}

impl HttpTransport {
    pub fn new() -> Result<Self> {
        let http = reqwest::blocking::Client::builder()
            .user_agent(concat!("jsonbank/", env!("CARGO_PKG_VERSION")))
            .timeout(None::<std::time::Duration>)
            .build()
            .map_err(|e| RequestError::request(format!("Failed to create HTTP client: {}", e)))?;
        Ok(Self { http })
    }
}

impl Transport for HttpTransport {
    fn execute(&self, request: &OutboundRequest) -> Result<RawResponse> {
        let mut req = self.http.request(request.method.clone(), &request.url);
        for (name, value) in &request.headers {
            req = req.header(*name, value.as_str());
        }
        if let Some(body) = &request.body {
            req = req.body(body.clone());
        }

        let response = req.send().map_err(|e| RequestError::request(e.to_string()))?;
        let status = response.status().as_u16();
        let body = response.text().map_err(|e| RequestError::request(e.to_string()))?;

        Ok(RawResponse { status, body })
    }
}
