//! Request builders, one per key tier.
//!
//! Tier checks run before anything touches the network: a request that
//! cannot be signed never leaves the process.

use reqwest::Method;
use serde::Serialize;

use crate::config::Tier;
use crate::error::{RequestError, Result};
use crate::transport::{OutboundRequest, Transport};
use crate::JsonBank;

pub const PUBLIC_KEY_HEADER: &str = "jsb-pub-key";
pub const PRIVATE_KEY_HEADER: &str = "jsb-prv-key";
const CONTENT_TYPE_JSON: &str = "application/json";

/// Serialize a request body as JSON.
pub(crate) fn json_body<B: Serialize>(body: &B) -> Result<Vec<u8>> {
    Ok(serde_json::to_vec(body)?)
}

impl<T: Transport> JsonBank<T> {
    /// Request without key headers.
    pub(crate) fn build_public(&self, method: Method, url: String, body: Option<Vec<u8>>) -> OutboundRequest {
        let mut request = OutboundRequest::new(method, url, body);
        if request.body.is_some() {
            request.headers.push(("Content-Type", CONTENT_TYPE_JSON.to_string()));
        }
        request
    }

    /// Request signed with the public key.
    pub(crate) fn build_keyed(&self, method: Method, url: String, body: Option<Vec<u8>>) -> Result<OutboundRequest> {
        if !self.keys.has_tier(Tier::Public) {
            return Err(RequestError::missing_key(Tier::Public));
        }

        let mut request = self.build_public(method, url, body);
        let public = self.keys.public_key().unwrap_or_default();
        request.headers.push((PUBLIC_KEY_HEADER, public.to_string()));
        Ok(request)
    }

    /// Request signed with both keys. The public key is checked first.
    pub(crate) fn build_private(&self, method: Method, url: String, body: Option<Vec<u8>>) -> Result<OutboundRequest> {
        let mut request = self.build_keyed(method, url, body)?;
        if !self.keys.has_tier(Tier::Private) {
            return Err(RequestError::missing_key(Tier::Private));
        }

        let private = self.keys.private_key().unwrap_or_default();
        request.headers.push((PRIVATE_KEY_HEADER, private.to_string()));
        Ok(request)
    }
}
