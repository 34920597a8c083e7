use async_trait::async_trait;
use reqwest::header::LOCATION;
use reqwest::redirect::Policy;

use crate::errors::WidgetError;
use crate::transport::{Method, RawReply, Transport, WireRequest};

/// Native transport backed by `reqwest`. Redirects are not followed.
#[derive(Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new() -> Result<Self, WidgetError> {
        let client = reqwest::Client::builder()
            .redirect(Policy::none())
            .build()
            .map_err(|e| WidgetError::Config(format!("HTTP client: {e}")))?;
        Ok(Self { client })
    }
}

#[async_trait(?Send)]
impl Transport for ReqwestTransport {
    async fn send(&self, request: WireRequest) -> Result<RawReply, WidgetError> {
        let endpoint = request.endpoint;
        let builder = match request.method {
            Method::Get => self.client.get(&request.url),
            Method::Post => self.client.post(&request.url),
        };
        let builder = match &request.body {
            Some(body) => builder.json(body),
            None => builder,
        };

        let response = builder
            .send()
            .await
            .map_err(|e| WidgetError::network(endpoint, e))?;

        let status = response.status().as_u16();
        let location = response
            .headers()
            .get(LOCATION)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let body = response
            .text()
            .await
            .map_err(|e| WidgetError::network(endpoint, e))?;

        Ok(RawReply { status, location, body })
    }
}
