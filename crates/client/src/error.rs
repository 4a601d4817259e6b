//! The one error shape every failure converges to.
//!
//! Local pre-flight checks, transport failures, undecodable bodies and
//! service-reported errors all surface as a [`RequestError`] carrying a
//! machine-readable `code` and a human `message`. Service codes such as
//! `name.exists` or `notFound` are passed through verbatim.

use thiserror::Error;

use crate::config::Tier;

/// Error codes produced locally by this crate.
///
/// Anything else found in [`RequestError::code`] came from the service.
pub mod codes {
    /// Missing required field or missing key for the requested tier.
    pub const BAD_REQUEST: &str = "bad_request";
    /// Document content is not valid JSON text.
    pub const INVALID_JSON_CONTENT: &str = "invalid_json_content";
    /// Upload source file does not exist.
    pub const FILE_NOT_FOUND: &str = "file_not_found";
    /// Upload source file exists but could not be read.
    pub const INVALID_FILE: &str = "invalid_file";
    /// Transport failure, or a non-200 response without a structured code.
    pub const REQUEST_ERROR: &str = "request_error";
    /// Response body could not be decoded.
    pub const JSON_ERROR: &str = "json_error";

    /// Service conflict code: a resource with that name already exists.
    pub const NAME_EXISTS: &str = "name.exists";
    /// Service code for an unknown id or path.
    pub const NOT_FOUND: &str = "notFound";
}

/// Normalized `{code, message}` error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("[{code}]: {message}")]
pub struct RequestError {
    pub code: String,
    pub message: String,
    /// Set when the request was refused locally for lack of a key.
    missing_key: Option<Tier>,
}

/// Result alias used throughout the client.
pub type Result<T> = std::result::Result<T, RequestError>;

impl RequestError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self { code: code.into(), message: message.into(), missing_key: None }
    }

    /// `bad_request` for a request whose tier the configured keys cannot sign.
    pub fn missing_key(tier: Tier) -> Self {
        let message = match tier {
            Tier::Private => "Private key is not set",
            Tier::Public | Tier::None => "Public key is not set",
        };
        Self { missing_key: Some(tier), ..Self::bad_request(message) }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(codes::BAD_REQUEST, message)
    }

    pub fn request(message: impl Into<String>) -> Self {
        Self::new(codes::REQUEST_ERROR, message)
    }

    pub fn json(message: impl Into<String>) -> Self {
        Self::new(codes::JSON_ERROR, message)
    }

    pub fn invalid_json_content() -> Self {
        Self::new(codes::INVALID_JSON_CONTENT, "Content is not a valid JSON string")
    }

    /// Generic failure for a non-200 response with no usable `error` field.
    pub fn unsuccessful() -> Self {
        Self::request("Request was not successful")
    }

    /// True when `code` matches exactly.
    pub fn is(&self, code: &str) -> bool {
        self.code == code
    }

    /// The conflict signal the create-or-fetch helpers recover from.
    pub fn is_name_exists(&self) -> bool {
        self.is(codes::NAME_EXISTS)
    }

    pub fn is_not_found(&self) -> bool {
        self.is(codes::NOT_FOUND)
    }

    /// The key tier that was missing, if that is why the request failed.
    pub fn missing_tier(&self) -> Option<Tier> {
        self.missing_key
    }
}

impl From<serde_json::Error> for RequestError {
    fn from(e: serde_json::Error) -> Self {
        RequestError::json(e.to_string())
    }
}
