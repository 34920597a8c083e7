//! Normalization of workflow replies.
//!
//! The engine is loose about shapes: some webhooks answer with a bare object,
//! others with a one-element array, and several fields have fallbacks. All of
//! that sniffing lives here so the dispatcher only ever branches on typed
//! results.

use serde_json::Value;

use crate::config::Endpoint;
use crate::errors::WidgetError;
use crate::models::{Escalation, EscalationButton, Intent, Metrics};
use crate::transport::RawReply;

pub const ESTIMATE_PLACEHOLDER: &str = "Contact us for pricing";
pub const DEFAULT_ANSWER: &str =
    "I can help with that. Are you interested in our web or mobile services?";
pub const SUMMARY_PLACEHOLDER: &str = "Summary completed";
pub const CASE_STUDIES_PLACEHOLDER: &str = "Case studies loaded";
pub const REINDEX_PLACEHOLDER: &str = "Reindexing completed";
pub const LOAD_TEST_PLACEHOLDER: &str = "Load test started";

/// Classifier output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prediction {
    pub intent: Intent,
    pub service_type: Option<String>,
    pub complexity: Option<String>,
}

impl Prediction {
    pub fn service_type(&self) -> &str {
        self.service_type.as_deref().unwrap_or("general")
    }

    pub fn complexity(&self) -> &str {
        self.complexity.as_deref().unwrap_or("standard")
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigateReply {
    pub message: String,
    pub redirect_url: Option<String>,
}

/// Everything the answerer can tell us, collapsed to one enum.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnswerOutcome {
    /// HTTP 302 pointing off-origin; leave immediately.
    Redirect { location: String },
    /// Non-success status; the caller shows a canned fallback.
    Unavailable { status: u16 },
    /// Body asked for a redirect after showing `message`.
    Navigate { message: String, url: String },
    Clarification { message: String, suggestions: Vec<String> },
    Escalation(Escalation),
    Plain(String),
}

/// Unwraps the first element when the engine answered with an array.
fn first_object(value: Value) -> Value {
    match value {
        Value::Array(items) => items.into_iter().next().unwrap_or(Value::Null),
        other => other,
    }
}

fn str_field<'a>(value: &'a Value, key: &str) -> Option<&'a str> {
    value.get(key).and_then(Value::as_str)
}

fn non_empty_str<'a>(value: &'a Value, key: &str) -> Option<&'a str> {
    str_field(value, key).filter(|s| !s.is_empty())
}

fn owned(value: &Value, key: &str) -> Option<String> {
    non_empty_str(value, key).map(str::to_string)
}

fn reply_text(value: &Value) -> Option<String> {
    owned(value, "message").or_else(|| owned(value, "answer"))
}

pub fn parse_prediction(value: Value) -> Prediction {
    let value = first_object(value);
    let entities = value.get("entities");
    let entity = |key: &str| entities.and_then(|e| owned(e, key));
    Prediction {
        intent: Intent::parse(str_field(&value, "intent")),
        service_type: entity("service_type"),
        complexity: entity("complexity"),
    }
}

pub fn estimate_text(value: Value) -> String {
    let value = first_object(value);
    if let Some(message) = owned(&value, "message") {
        return message;
    }
    let estimate = match value.get("estimate") {
        Some(Value::String(s)) if !s.is_empty() => s.clone(),
        Some(Value::Number(n)) if n.as_f64() != Some(0.0) => n.to_string(),
        _ => ESTIMATE_PLACEHOLDER.to_string(),
    };
    format!("Estimated cost: ${estimate}")
}

pub fn parse_navigation(value: Value) -> NavigateReply {
    let value = first_object(value);
    NavigateReply {
        message: owned(&value, "message").unwrap_or_default(),
        redirect_url: owned(&value, "redirectUrl"),
    }
}

fn parse_buttons(value: &Value) -> Vec<EscalationButton> {
    value
        .get("buttons")
        .and_then(Value::as_array)
        .map(|buttons| {
            buttons
                .iter()
                .filter_map(|b| serde_json::from_value(b.clone()).ok())
                .collect()
        })
        .unwrap_or_default()
}

fn parse_suggestions(value: &Value) -> Vec<String> {
    value
        .get("suggestions")
        .and_then(Value::as_array)
        .map(|items| items.iter().filter_map(Value::as_str).map(str::to_string).collect())
        .unwrap_or_default()
}

/// Interprets an answerer reply. `origin` is the page origin when running in
/// a browser; a 302 whose location mentions it is not treated as a redirect.
pub fn classify_answer(reply: &RawReply, origin: Option<&str>) -> Result<AnswerOutcome, WidgetError> {
    if reply.is_found_redirect() {
        if let Some(location) = reply.location.as_deref().filter(|l| !l.is_empty()) {
            let same_origin = origin.is_some_and(|o| location.contains(o));
            if !same_origin {
                return Ok(AnswerOutcome::Redirect { location: location.to_string() });
            }
        }
    } else if !reply.is_success() {
        return Ok(AnswerOutcome::Unavailable { status: reply.status });
    }

    let value = first_object(reply.body_json(Endpoint::Answer)?);
    if !value.is_object() {
        return Err(WidgetError::decode(Endpoint::Answer, "expected a JSON object"));
    }

    let outcome = match str_field(&value, "type") {
        Some("redirect") if owned(&value, "redirectUrl").is_some() => AnswerOutcome::Navigate {
            message: reply_text(&value).unwrap_or_default(),
            url: owned(&value, "redirectUrl").unwrap_or_default(),
        },
        Some("clarification") => AnswerOutcome::Clarification {
            message: reply_text(&value).unwrap_or_default(),
            suggestions: parse_suggestions(&value),
        },
        Some("escalation") => AnswerOutcome::Escalation(Escalation {
            message: reply_text(&value).unwrap_or_default(),
            buttons: parse_buttons(&value),
            calendly_link: owned(&value, "calendly_link"),
            escalation_reason: owned(&value, "escalation_reason"),
        }),
        _ => AnswerOutcome::Plain(reply_text(&value).unwrap_or_else(|| DEFAULT_ANSWER.to_string())),
    };
    Ok(outcome)
}

pub fn summary_text(value: Value) -> String {
    first_object(value)
        .pointer("/content/parts/0/text")
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| SUMMARY_PLACEHOLDER.to_string())
}

pub fn case_studies_text(value: Value) -> String {
    owned(&first_object(value), "message").unwrap_or_else(|| CASE_STUDIES_PLACEHOLDER.to_string())
}

/// Status line of a maintenance job, or `placeholder` when the engine is silent.
pub fn job_message(value: Value, placeholder: &str) -> String {
    owned(&first_object(value), "message").unwrap_or_else(|| placeholder.to_string())
}

pub fn parse_metrics(value: Value) -> Result<Metrics, WidgetError> {
    let value = match value {
        Value::Array(items) if items.is_empty() => {
            return Err(WidgetError::decode(Endpoint::Metrics, "received empty data"));
        }
        other => first_object(other),
    };
    serde_json::from_value(value).map_err(|e| WidgetError::decode(Endpoint::Metrics, e))
}
