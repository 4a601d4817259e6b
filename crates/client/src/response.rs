//! Response normalization.
//!
//! Every request is executed exactly once. Success is status 200 and
//! nothing else. Failures are classified from the `error` field of the
//! body, which the service sends either as a plain string or as a
//! `{code, message}` object.

use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;

use crate::error::{RequestError, Result};
use crate::transport::{OutboundRequest, RawResponse, Transport};
use crate::JsonBank;

pub const SUCCESS_STATUS: u16 = 200;

/// Shapes the `error` field is known to take.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ErrorField {
    Message(String),
    Structured { code: String, message: String },
}

/// Map a decoded non-200 body to the normalized error.
pub(crate) fn classify_failure(body: &Value) -> RequestError {
    let field = body
        .get("error")
        .and_then(|e| ErrorField::deserialize(e).ok());

    match field {
        Some(ErrorField::Message(message)) => RequestError::request(message),
        Some(ErrorField::Structured { code, message }) => RequestError::new(code, message),
        None => RequestError::unsuccessful(),
    }
}

fn decode_body(response: &RawResponse) -> Result<Value> {
    serde_json::from_str(&response.body).map_err(|e| RequestError::json(e.to_string()))
}

impl<T: Transport> JsonBank<T> {
    fn dispatch(&self, request: &OutboundRequest) -> Result<RawResponse> {
        log::debug!("{} {}", request.method, request.url);
        let response = self.transport.execute(request)?;
        if response.status != SUCCESS_STATUS {
            log::debug!("{} {} -> {}", request.method, request.url, response.status);
        }
        Ok(response)
    }

    /// Execute and decode the whole body as JSON.
    pub(crate) fn as_structured(&self, request: &OutboundRequest) -> Result<Value> {
        let response = self.dispatch(request)?;
        let value = decode_body(&response)?;

        if response.status != SUCCESS_STATUS {
            return Err(classify_failure(&value));
        }
        Ok(value)
    }

    /// Execute and return the body text untouched on success. JSON is only
    /// decoded to classify a failure.
    pub(crate) fn as_text(&self, request: &OutboundRequest) -> Result<String> {
        let response = self.dispatch(request)?;

        if response.status != SUCCESS_STATUS {
            let value = decode_body(&response)?;
            return Err(classify_failure(&value));
        }
        Ok(response.body)
    }

    /// Execute and deserialize a success body into `D`.
    pub(crate) fn send<D: DeserializeOwned>(&self, request: &OutboundRequest) -> Result<D> {
        let value = self.as_structured(request)?;
        Ok(serde_json::from_value(value)?)
    }
}
