use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Correlation key sent to every collaborator. Created once per session.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConversationId(String);

impl ConversationId {
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ConversationId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl std::fmt::Display for ConversationId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    Bot,
}

impl Sender {
    pub fn as_str(&self) -> &'static str {
        match self {
            Sender::User => "user",
            Sender::Bot => "bot",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MessageKind {
    Clarification,
    Escalation,
    Summary,
    CaseStudies,
    #[serde(other)]
    Plain,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ButtonAction {
    BookMeeting,
    ContinueChat,
}

/// Action button attached to an escalation reply.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EscalationButton {
    pub text: String,
    pub action: ButtonAction,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

/// Payload of an escalation reply, as normalized from the answerer.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Escalation {
    pub message: String,
    pub buttons: Vec<EscalationButton>,
    pub calendly_link: Option<String>,
    pub escalation_reason: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    Positive,
    Negative,
}

/// One rendered chat turn. Use the constructors: they keep `kind` and the
/// auxiliary fields consistent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatMessage {
    pub id: String,
    #[serde(default)]
    pub text: String,
    pub sender: Sender,
    pub timestamp: DateTime<Utc>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<MessageKind>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggestions: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub buttons: Option<Vec<EscalationButton>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub escalation_reason: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub calendly_link: Option<String>,
}

impl ChatMessage {
    fn new(sender: Sender, text: String, kind: Option<MessageKind>) -> Self {
        Self {
            id: uuid::Uuid::now_v7().to_string(),
            text,
            sender,
            timestamp: Utc::now(),
            kind,
            suggestions: None,
            buttons: None,
            escalation_reason: None,
            calendly_link: None,
        }
    }

    pub fn user(text: impl Into<String>) -> Self {
        Self::new(Sender::User, text.into(), None)
    }

    pub fn bot(text: impl Into<String>) -> Self {
        Self::new(Sender::Bot, text.into(), None)
    }

    pub fn clarification(text: impl Into<String>, suggestions: Vec<String>) -> Self {
        let mut msg = Self::new(Sender::Bot, text.into(), Some(MessageKind::Clarification));
        msg.suggestions = Some(suggestions);
        msg
    }

    pub fn escalation(escalation: Escalation) -> Self {
        let mut msg = Self::new(Sender::Bot, escalation.message, Some(MessageKind::Escalation));
        msg.buttons = Some(escalation.buttons);
        msg.calendly_link = escalation.calendly_link;
        msg.escalation_reason = escalation.escalation_reason;
        msg
    }

    pub fn summary(text: impl Into<String>) -> Self {
        Self::new(Sender::Bot, text.into(), Some(MessageKind::Summary))
    }

    pub fn case_studies(text: impl Into<String>) -> Self {
        Self::new(Sender::Bot, text.into(), Some(MessageKind::CaseStudies))
    }

    pub fn kind(&self) -> MessageKind {
        self.kind.unwrap_or(MessageKind::Plain)
    }

    pub fn is_bot(&self) -> bool {
        self.sender == Sender::Bot
    }

    /// Feedback is offered on every bot message except clarifications.
    pub fn accepts_feedback(&self) -> bool {
        self.is_bot() && self.kind() != MessageKind::Clarification
    }
}

/// Classifier label selecting the dispatch branch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    RequestEstimate,
    Greeting,
    NavigateContact,
    NavigateAbout,
    NavigateHome,
    Other(String),
    Missing,
}

impl Intent {
    pub fn parse(label: Option<&str>) -> Self {
        match label {
            Some("request_estimate") => Intent::RequestEstimate,
            Some("greeting") => Intent::Greeting,
            Some("navigate_contact") => Intent::NavigateContact,
            Some("navigate_about") => Intent::NavigateAbout,
            Some("navigate_home") => Intent::NavigateHome,
            Some(other) => Intent::Other(other.to_string()),
            None => Intent::Missing,
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Intent::RequestEstimate => "request_estimate",
            Intent::Greeting => "greeting",
            Intent::NavigateContact => "navigate_contact",
            Intent::NavigateAbout => "navigate_about",
            Intent::NavigateHome => "navigate_home",
            Intent::Other(label) => label,
            Intent::Missing => "",
        }
    }

    pub fn is_navigation(&self) -> bool {
        matches!(
            self,
            Intent::NavigateContact | Intent::NavigateAbout | Intent::NavigateHome
        )
    }
}

impl std::fmt::Display for Intent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Intent::Missing => f.write_str("<none>"),
            other => f.write_str(other.as_str()),
        }
    }
}

// ── Request bodies ───────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct PredictRequest<'a> {
    pub text: &'a str,
}

#[derive(Debug, Serialize)]
pub struct EstimateRequest<'a> {
    #[serde(rename = "conversationId")]
    pub conversation_id: &'a ConversationId,
    pub service_type: &'a str,
    pub complexity: &'a str,
}

#[derive(Debug, Serialize)]
pub struct NavigateRequest<'a> {
    pub intent: &'a str,
}

#[derive(Debug, Serialize)]
pub struct AnswerRequest<'a> {
    #[serde(rename = "conversationId")]
    pub conversation_id: &'a ConversationId,
    pub question: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SummarizeRequest<'a> {
    pub conversation_id: &'a ConversationId,
}

#[derive(Debug, Serialize)]
pub struct FeedbackRequest<'a> {
    pub message: &'a str,
    pub sentiment: Sentiment,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TranscriptRequest<'a> {
    pub conversation_id: &'a ConversationId,
    pub messages: &'a [ChatMessage],
}

// ── Dashboard metrics ────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Metrics {
    pub total_conversations: u64,
    pub total_escalations: u64,
    pub positive_feedback: u64,
    pub negative_feedback: u64,
    pub top_intents: Vec<IntentCount>,
    pub recent_activity: Vec<ActivityEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntentCount {
    pub intent: String,
    pub count: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityEntry {
    pub timestamp: String,
    pub intent: String,
    #[serde(default)]
    pub escalated: bool,
    #[serde(default)]
    pub feedback: Option<String>,
}

impl Metrics {
    /// Placeholder figures shown when the metrics webhook is unreachable.
    pub fn sample() -> Self {
        Self {
            total_conversations: 156,
            total_escalations: 12,
            positive_feedback: 89,
            negative_feedback: 23,
            top_intents: vec![
                IntentCount { intent: "request_estimate".to_string(), count: 45 },
                IntentCount { intent: "general_inquiry".to_string(), count: 34 },
            ],
            recent_activity: vec![
                ActivityEntry {
                    timestamp: "2024-08-17 14:30".to_string(),
                    intent: "request_estimate".to_string(),
                    escalated: false,
                    feedback: Some("positive".to_string()),
                },
                ActivityEntry {
                    timestamp: "2024-08-17 13:15".to_string(),
                    intent: "general_inquiry".to_string(),
                    escalated: true,
                    feedback: None,
                },
            ],
        }
    }

    /// Share of positive votes among all feedback, in percent.
    pub fn satisfaction_rate(&self) -> Option<u64> {
        let total = self.positive_feedback + self.negative_feedback;
        (total > 0).then(|| self.positive_feedback * 100 / total)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_ids_sort_in_creation_order() {
        let ids: Vec<String> = (0..50).map(|i| ChatMessage::user(i.to_string()).id).collect();
        let mut sorted = ids.clone();
        sorted.sort();
        assert_eq!(ids, sorted);
        sorted.dedup();
        assert_eq!(sorted.len(), ids.len());
    }

    #[test]
    fn constructors_never_mix_suggestions_and_buttons() {
        let clar = ChatMessage::clarification("Which one?", vec!["web".into(), "mobile".into()]);
        assert_eq!(clar.kind(), MessageKind::Clarification);
        assert!(clar.buttons.is_none());
        assert!(!clar.accepts_feedback());

        let esc = ChatMessage::escalation(Escalation {
            message: "Let me get a human".into(),
            buttons: vec![EscalationButton {
                text: "Book".into(),
                action: ButtonAction::BookMeeting,
                url: Some("https://cal.example.com".into()),
            }],
            ..Default::default()
        });
        assert_eq!(esc.kind(), MessageKind::Escalation);
        assert!(esc.suggestions.is_none());
        assert!(esc.accepts_feedback());
    }

    #[test]
    fn wire_format_uses_camel_case_and_type_tag() {
        let msg = ChatMessage::case_studies("Here you go");
        let json = serde_json::to_value(&msg).unwrap();
        assert_eq!(json["type"], "case-studies");
        assert_eq!(json["sender"], "bot");
        assert!(json.get("escalationReason").is_none());

        let plain = ChatMessage::user("hi");
        let json = serde_json::to_value(&plain).unwrap();
        assert!(json.get("type").is_none());
    }

    #[test]
    fn stored_null_and_unknown_types_read_back_as_plain() {
        let raw = r#"[
            {"id":"1","text":"a","sender":"bot","timestamp":"2024-08-17T14:30:00.000Z","type":null},
            {"id":"2","text":"b","sender":"bot","timestamp":"2024-08-17T14:31:00.000Z","type":"default"}
        ]"#;
        let msgs: Vec<ChatMessage> = serde_json::from_str(raw).unwrap();
        assert_eq!(msgs[0].kind(), MessageKind::Plain);
        assert_eq!(msgs[1].kind(), MessageKind::Plain);
    }

    #[test]
    fn intent_labels_round_trip() {
        assert_eq!(Intent::parse(Some("navigate_about")), Intent::NavigateAbout);
        assert!(Intent::parse(Some("navigate_home")).is_navigation());
        assert_eq!(Intent::parse(Some("pricing")).as_str(), "pricing");
        assert_eq!(Intent::parse(None), Intent::Missing);
    }

    #[test]
    fn satisfaction_rate_ignores_empty_feedback() {
        assert_eq!(Metrics::default().satisfaction_rate(), None);
        assert_eq!(Metrics::sample().satisfaction_rate(), Some(79));
    }
}
