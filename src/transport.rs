use async_trait::async_trait;
use serde_json::Value;

use crate::config::Endpoint;
use crate::errors::WidgetError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
}

/// One outgoing JSON call to a workflow webhook.
#[derive(Debug, Clone)]
pub struct WireRequest {
    pub endpoint: Endpoint,
    pub method: Method,
    pub url: String,
    pub body: Option<Value>,
}

/// What came back, before any interpretation.
#[derive(Debug, Clone, PartialEq)]
pub struct RawReply {
    pub status: u16,
    pub location: Option<String>,
    pub body: String,
}

impl RawReply {
    pub fn json(status: u16, body: &Value) -> Self {
        Self { status, location: None, body: body.to_string() }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn is_found_redirect(&self) -> bool {
        self.status == 302
    }

    /// Parses the body as JSON. An empty body decodes to `null`.
    pub fn body_json(&self, endpoint: Endpoint) -> Result<Value, WidgetError> {
        if self.body.trim().is_empty() {
            return Ok(Value::Null);
        }
        serde_json::from_str(&self.body).map_err(|e| WidgetError::decode(endpoint, e))
    }

    /// Fails with a status error unless the reply is 2xx.
    pub fn require_success(self, endpoint: Endpoint) -> Result<Self, WidgetError> {
        if self.is_success() {
            Ok(self)
        } else {
            Err(WidgetError::Status { endpoint, status: self.status })
        }
    }
}

/// HTTP seam. Native builds use `reqwest`, the browser build uses `gloo-net`.
/// Implementations must not follow redirects on their own when they can avoid
/// it, so that a 302 from the answerer stays observable.
#[async_trait(?Send)]
pub trait Transport {
    async fn send(&self, request: WireRequest) -> Result<RawReply, WidgetError>;
}
