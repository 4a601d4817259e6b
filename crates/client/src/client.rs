//! jsonbank client instance and public (no-key) reads.
//!
//! Authenticated operations live in `session`, `documents` and `folders`;
//! they all go through the builders in `request` and the normalizer in
//! `response`.

use reqwest::Method;
use serde_json::Value;

use crate::config::{effective_host, ClientConfig, Keys};
use crate::error::Result;
use crate::session::Session;
use crate::transport::{HttpTransport, Transport};
use crate::types::DocumentMeta;

/// Base URLs derived from the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Endpoints {
    /// Authenticated API, `host + "/v1"`.
    pub(crate) v1: String,
    /// Public content, `host`.
    pub(crate) public: String,
}

impl Endpoints {
    fn for_host(host: &str) -> Self {
        Self {
            v1: format!("{}/v1", host),
            public: host.to_string(),
        }
    }
}

/// jsonbank API client (blocking).
///
/// Keys are fixed at construction. The session is per instance; only
/// [`JsonBank::authenticate`] writes it, through `&mut self`.
pub struct JsonBank<T: Transport = HttpTransport> {
    pub(crate) keys: Keys,
    pub(crate) host: String,
    pub(crate) urls: Endpoints,
    pub(crate) session: Session,
    pub(crate) transport: T,
}

impl JsonBank<HttpTransport> {
    /// Create a client over HTTP.
    pub fn new(config: ClientConfig) -> Result<Self> {
        Ok(Self::with_transport(config, HttpTransport::new()?))
    }

    /// Client for public content only.
    pub fn without_keys() -> Result<Self> {
        Self::new(ClientConfig::default())
    }

    /// Client configured from `JSB_*` environment variables.
    pub fn from_env() -> Result<Self> {
        Self::new(ClientConfig::from_env())
    }
}

impl<T: Transport> JsonBank<T> {
    /// Create a client over an arbitrary transport.
    pub fn with_transport(config: ClientConfig, transport: T) -> Self {
        let host = effective_host(&config.host);
        Self {
            keys: config.keys,
            urls: Endpoints::for_host(&host),
            host,
            session: Session::default(),
            transport,
        }
    }

    /// Switch the service host; both base URLs are re-derived.
    pub fn set_host(&mut self, host: &str) {
        self.host = effective_host(host);
        self.urls = Endpoints::for_host(&self.host);
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn keys(&self) -> &Keys {
        &self.keys
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Public content of a document, decoded as JSON.
    pub fn get_content(&self, id_or_path: &str) -> Result<Value> {
        let url = format!("{}/f/{}", self.urls.public, id_or_path);
        self.as_structured(&self.build_public(Method::GET, url, None))
    }

    /// Public content of a document, as the exact text stored.
    pub fn get_content_as_string(&self, id_or_path: &str) -> Result<String> {
        let url = format!("{}/f/{}", self.urls.public, id_or_path);
        self.as_text(&self.build_public(Method::GET, url, None))
    }

    /// Metadata of a public document.
    pub fn get_document_meta(&self, id_or_path: &str) -> Result<DocumentMeta> {
        let url = format!("{}/meta/f/{}", self.urls.public, id_or_path);
        self.send(&self.build_public(Method::GET, url, None))
    }

    /// JSON file mirrored from a public GitHub repository (`owner/repo/path`).
    pub fn get_github_content(&self, path: &str) -> Result<Value> {
        let url = format!("{}/gh/{}", self.urls.public, path);
        self.as_structured(&self.build_public(Method::GET, url, None))
    }

    pub fn get_github_content_as_string(&self, path: &str) -> Result<String> {
        let url = format!("{}/gh/{}", self.urls.public, path);
        self.as_text(&self.build_public(Method::GET, url, None))
    }
}
