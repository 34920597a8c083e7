use async_trait::async_trait;
use gloo_net::http::Request;

use chat_widget::config::DEFAULT_BASE_URL;
use chat_widget::transport::{Method, RawReply, Transport, WireRequest};
use chat_widget::{WidgetConfig, WidgetError, WorkflowClient};

/// Base URL of the workflow engine, fixed at build time.
const WORKFLOW_BASE_URL: Option<&str> = option_env!("WORKFLOW_BASE_URL");

pub fn workflow_config() -> WidgetConfig {
    let base = WORKFLOW_BASE_URL.unwrap_or(DEFAULT_BASE_URL);
    WidgetConfig::parse(base).unwrap_or_else(|e| {
        log::error!("{e}; falling back to {DEFAULT_BASE_URL}");
        WidgetConfig::default()
    })
}

pub fn workflow_client() -> WorkflowClient<GlooTransport> {
    WorkflowClient::new(workflow_config(), GlooTransport)
}

/// `fetch`-backed transport. The browser follows redirects itself, so a 302
/// from the answerer only surfaces when the engine sends it cross-origin
/// without CORS; in practice the body's `type: redirect` carries navigation.
#[derive(Clone, Copy)]
pub struct GlooTransport;

#[async_trait(?Send)]
impl Transport for GlooTransport {
    async fn send(&self, request: WireRequest) -> Result<RawReply, WidgetError> {
        let endpoint = request.endpoint;
        let builder = match request.method {
            Method::Get => Request::get(&request.url),
            Method::Post => Request::post(&request.url),
        };

        let response = match &request.body {
            Some(body) => {
                builder
                    .json(body)
                    .map_err(|e| WidgetError::network(endpoint, e))?
                    .send()
                    .await
            }
            None => builder.send().await,
        }
        .map_err(|e| WidgetError::network(endpoint, e))?;

        let status = response.status();
        let location = response.headers().get("Location");
        let body = response
            .text()
            .await
            .map_err(|e| WidgetError::network(endpoint, e))?;

        Ok(RawReply { status, location, body })
    }
}
