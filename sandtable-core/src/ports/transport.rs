// sandtable-core/src/ports/transport.rs
//
// Shape of a failed HTTP call as reported by the REST client. Adapters build it from
// whatever client they wrap; the error factory only reads it.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HttpResponse {
    pub status: u16,
    #[serde(default)]
    pub data: Value,
}

impl HttpResponse {
    pub fn new(status: u16, data: Value) -> Self {
        Self { status, data }
    }

    /// Application-defined code carried in error bodies, as an integer or a numeric string.
    pub fn business_code(&self) -> Option<i64> {
        match self.data.get("businessCode")? {
            Value::Number(n) => n.as_i64(),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    /// Non-blank `message` field of the body.
    pub fn message(&self) -> Option<&str> {
        self.data
            .get("message")
            .and_then(Value::as_str)
            .filter(|m| !m.trim().is_empty())
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HttpFailure {
    /// Client-side description, e.g. "Request failed with status code 400".
    pub message: String,
    /// Transport error code such as `ECONNABORTED` or `ERR_NETWORK`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    /// The request left the client.
    #[serde(default)]
    pub request_sent: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response: Option<HttpResponse>,
}

impl HttpFailure {
    pub fn with_response(status: u16, data: Value) -> Self {
        Self {
            message: format!("Request failed with status code {}", status),
            code: None,
            request_sent: true,
            response: Some(HttpResponse::new(status, data)),
        }
    }

    /// Request sent, nothing came back.
    pub fn no_response(code: Option<&str>, message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            code: code.map(str::to_string),
            request_sent: true,
            response: None,
        }
    }

    pub fn status(&self) -> Option<u16> {
        self.response.as_ref().map(|r| r.status)
    }
}

impl fmt::Display for HttpFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.code, self.status()) {
            (_, Some(status)) => write!(f, "HTTP {}: {}", status, self.message),
            (Some(code), None) => write!(f, "{}: {}", code, self.message),
            (None, None) => write!(f, "{}", self.message),
        }
    }
}

impl std::error::Error for HttpFailure {}
