use serde::Serialize;
use serde_json::{json, Value};
use tracing::debug;

use crate::config::{Endpoint, WidgetConfig};
use crate::errors::WidgetError;
use crate::models::{
    AnswerRequest, ChatMessage, ConversationId, EstimateRequest, FeedbackRequest, Intent, Metrics,
    NavigateRequest, PredictRequest, Sentiment, SummarizeRequest, TranscriptRequest,
};
use crate::responses::{self, AnswerOutcome, NavigateReply, Prediction};
use crate::transport::{Method, RawReply, Transport, WireRequest};

/// Typed client for the workflow engine's webhooks.
pub struct WorkflowClient<T> {
    transport: T,
    config: WidgetConfig,
}

impl<T: Transport> WorkflowClient<T> {
    pub fn new(config: WidgetConfig, transport: T) -> Self {
        Self { transport, config }
    }

    pub fn config(&self) -> &WidgetConfig {
        &self.config
    }

    async fn call(
        &self,
        endpoint: Endpoint,
        method: Method,
        body: Option<Value>,
    ) -> Result<RawReply, WidgetError> {
        let url = self.config.endpoint_url(endpoint);
        debug!(%endpoint, %url, "calling workflow");
        let reply = self
            .transport
            .send(WireRequest { endpoint, method, url, body })
            .await?;
        debug!(%endpoint, status = reply.status, "workflow replied");
        Ok(reply)
    }

    async fn post(&self, endpoint: Endpoint, body: &impl Serialize) -> Result<RawReply, WidgetError> {
        let body = serde_json::to_value(body)?;
        self.call(endpoint, Method::Post, Some(body)).await
    }

    /// POSTs and decodes a successful JSON reply.
    async fn post_for_json(&self, endpoint: Endpoint, body: &impl Serialize) -> Result<Value, WidgetError> {
        self.post(endpoint, body)
            .await?
            .require_success(endpoint)?
            .body_json(endpoint)
    }

    pub async fn predict(&self, text: &str) -> Result<Prediction, WidgetError> {
        let value = self.post_for_json(Endpoint::Predict, &PredictRequest { text }).await?;
        Ok(responses::parse_prediction(value))
    }

    pub async fn estimate(
        &self,
        conversation_id: &ConversationId,
        service_type: &str,
        complexity: &str,
    ) -> Result<String, WidgetError> {
        let request = EstimateRequest { conversation_id, service_type, complexity };
        let value = self.post_for_json(Endpoint::Estimate, &request).await?;
        Ok(responses::estimate_text(value))
    }

    pub async fn navigate(&self, intent: &Intent) -> Result<NavigateReply, WidgetError> {
        let request = NavigateRequest { intent: intent.as_str() };
        let value = self.post_for_json(Endpoint::Navigate, &request).await?;
        Ok(responses::parse_navigation(value))
    }

    /// The answerer is the one collaborator whose non-success statuses are
    /// part of the contract, so the raw reply goes to the normalizer.
    pub async fn answer(
        &self,
        conversation_id: &ConversationId,
        question: &str,
        origin: Option<&str>,
    ) -> Result<AnswerOutcome, WidgetError> {
        let reply = self
            .post(Endpoint::Answer, &AnswerRequest { conversation_id, question })
            .await?;
        responses::classify_answer(&reply, origin)
    }

    pub async fn summarize(&self, conversation_id: &ConversationId) -> Result<String, WidgetError> {
        let value = self
            .post_for_json(Endpoint::Summarize, &SummarizeRequest { conversation_id })
            .await?;
        Ok(responses::summary_text(value))
    }

    pub async fn case_studies(&self) -> Result<String, WidgetError> {
        let value = self.post_for_json(Endpoint::CaseStudies, &json!({})).await?;
        Ok(responses::case_studies_text(value))
    }

    pub async fn feedback(&self, message: &str, sentiment: Sentiment) -> Result<(), WidgetError> {
        self.post(Endpoint::Feedback, &FeedbackRequest { message, sentiment })
            .await?
            .require_success(Endpoint::Feedback)?;
        Ok(())
    }

    pub async fn store_transcript(
        &self,
        conversation_id: &ConversationId,
        messages: &[ChatMessage],
    ) -> Result<(), WidgetError> {
        self.post(Endpoint::StoreConversation, &TranscriptRequest { conversation_id, messages })
            .await?
            .require_success(Endpoint::StoreConversation)?;
        Ok(())
    }

    pub async fn reset(&self) -> Result<(), WidgetError> {
        self.post(Endpoint::Reset, &json!({}))
            .await?
            .require_success(Endpoint::Reset)?;
        Ok(())
    }

    pub async fn metrics(&self) -> Result<Metrics, WidgetError> {
        let value = self
            .call(Endpoint::Metrics, Method::Get, None)
            .await?
            .require_success(Endpoint::Metrics)?
            .body_json(Endpoint::Metrics)?;
        responses::parse_metrics(value)
    }

    /// Rebuilds the engine's knowledge index; returns the engine's status line.
    pub async fn reindex(&self) -> Result<String, WidgetError> {
        let value = self
            .call(Endpoint::Reindex, Method::Post, None)
            .await?
            .require_success(Endpoint::Reindex)?
            .body_json(Endpoint::Reindex)?;
        Ok(responses::job_message(value, responses::REINDEX_PLACEHOLDER))
    }

    pub async fn load_test(&self) -> Result<String, WidgetError> {
        let value = self
            .call(Endpoint::LoadTest, Method::Post, None)
            .await?
            .require_success(Endpoint::LoadTest)?
            .body_json(Endpoint::LoadTest)?;
        Ok(responses::job_message(value, responses::LOAD_TEST_PLACEHOLDER))
    }
}
