use std::fmt;
use std::time::Duration;

use crate::errors::WidgetError;

/// Base URL used when `WORKFLOW_BASE_URL` is not set.
pub const DEFAULT_BASE_URL: &str = "http://localhost:5678/webhook";

/// Number of trailing messages kept in session storage.
pub const HISTORY_LIMIT: usize = 20;

/// Longest utterance accepted by the input box, in characters.
pub const MAX_INPUT_CHARS: usize = 1000;

/// Pause between a navigation reply and leaving the page.
pub const NAVIGATE_DELAY: Duration = Duration::from_millis(1500);

/// Pause between an answerer `redirect` reply and leaving the page.
pub const REDIRECT_DELAY: Duration = Duration::from_millis(1000);

/// Webhooks exposed by the workflow engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    Predict,
    Estimate,
    Navigate,
    Answer,
    Summarize,
    Feedback,
    StoreConversation,
    Reset,
    CaseStudies,
    Metrics,
    Reindex,
    LoadTest,
}

impl Endpoint {
    /// Path segment appended to the base URL.
    pub fn path(self) -> &'static str {
        match self {
            Endpoint::Predict => "predict",
            Endpoint::Estimate => "estimate",
            Endpoint::Navigate => "navigate",
            Endpoint::Answer => "answer",
            Endpoint::Summarize => "summarize",
            Endpoint::Feedback => "feedback",
            Endpoint::StoreConversation => "store-conversation",
            Endpoint::Reset => "reset",
            Endpoint::CaseStudies => "case-studies",
            Endpoint::Metrics => "get-metrics",
            Endpoint::Reindex => "reindex-now",
            Endpoint::LoadTest => "load-test",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Endpoint::Predict => "Predict",
            Endpoint::Estimate => "Estimate",
            Endpoint::Navigate => "Navigate",
            Endpoint::Answer => "Answer",
            Endpoint::Summarize => "Summarize",
            Endpoint::Feedback => "Feedback",
            Endpoint::StoreConversation => "Store conversation",
            Endpoint::Reset => "Reset",
            Endpoint::CaseStudies => "Case studies",
            Endpoint::Metrics => "Metrics",
            Endpoint::Reindex => "Reindex",
            Endpoint::LoadTest => "Load test",
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Runtime settings shared by every collaborator call.
#[derive(Debug, Clone, PartialEq)]
pub struct WidgetConfig {
    pub base_url: String,
    pub navigate_delay: Duration,
    pub redirect_delay: Duration,
    pub history_limit: usize,
}

impl Default for WidgetConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

impl WidgetConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            base_url,
            navigate_delay: NAVIGATE_DELAY,
            redirect_delay: REDIRECT_DELAY,
            history_limit: HISTORY_LIMIT,
        }
    }

    /// Reads `WORKFLOW_BASE_URL`, falling back to [`DEFAULT_BASE_URL`].
    pub fn from_env() -> Result<Self, WidgetError> {
        match std::env::var("WORKFLOW_BASE_URL") {
            Ok(url) => Self::parse(&url),
            Err(_) => Ok(Self::default()),
        }
    }

    /// Builds a config from a user-supplied base URL, rejecting anything that
    /// is not an absolute http(s) URL.
    pub fn parse(base_url: &str) -> Result<Self, WidgetError> {
        let trimmed = base_url.trim();
        if !(trimmed.starts_with("http://") || trimmed.starts_with("https://")) {
            return Err(WidgetError::Config(format!(
                "WORKFLOW_BASE_URL must be an http(s) URL, got '{trimmed}'"
            )));
        }
        Ok(Self::new(trimmed))
    }

    pub fn endpoint_url(&self, endpoint: Endpoint) -> String {
        format!("{}/{}", self.base_url, endpoint.path())
    }
}
