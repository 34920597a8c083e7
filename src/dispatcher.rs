use std::cell::Cell;
use std::rc::Rc;
use std::time::Duration;

use tracing::{debug, error, info, warn};

use crate::config::MAX_INPUT_CHARS;
use crate::errors::WidgetError;
use crate::host::{notify, ChatObserver, Host};
use crate::message_log::MessageLog;
use crate::models::{ButtonAction, ChatMessage, ConversationId, EscalationButton, Intent, Sentiment};
use crate::responses::AnswerOutcome;
use crate::session_store::SessionStore;
use crate::transport::Transport;
use crate::workflow::WorkflowClient;

pub const WELCOME: &str =
    "Hi! I'm here to help you with questions about our services. How can I assist you today?";
pub const GREETING_REPLY: &str = "Hello! How can I help you today?";
pub const ANSWER_FALLBACK: &str = "I understand your question. Our answer system is currently being set up. For now, you can ask me about pricing estimates!";
pub const ERROR_PREFIX: &str = "Sorry — something went wrong. Please try again. Error: ";
pub const SUMMARY_FALLBACK: &str = "Sorry, summarization failed. Please try again.";
pub const CASE_STUDIES_FALLBACK: &str = "Sorry, could not load case studies. Please try again.";
pub const BOOKING_CONFIRMATION: &str =
    "Great! I've opened the booking page for you. Our team will be happy to help!";
pub const CONTINUE_REPLY: &str = "No problem! I'm here to help. What would you like to know?";

/// Input-boundary check: trims, rejects blank text, caps the length.
pub fn validate_input(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    Some(trimmed.chars().take(MAX_INPUT_CHARS).collect())
}

/// Holds the loading flag up for its lifetime, including when the turn
/// future is dropped mid-flight.
struct LoadingGuard<'a> {
    loading: &'a Cell<bool>,
    observer: &'a dyn ChatObserver,
}

impl<'a> LoadingGuard<'a> {
    fn raise(loading: &'a Cell<bool>, observer: &'a dyn ChatObserver) -> Self {
        loading.set(true);
        observer.loading_changed(true);
        Self { loading, observer }
    }
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        self.loading.set(false);
        self.observer.loading_changed(false);
    }
}

/// One conversation: its id, its log, and the dispatch protocol that turns
/// user utterances into bot replies.
pub struct TurnDispatcher<T, H> {
    conversation_id: ConversationId,
    client: Rc<WorkflowClient<T>>,
    host: Rc<H>,
    store: Rc<SessionStore>,
    log: MessageLog,
    loading: Cell<bool>,
    observer: Rc<dyn ChatObserver>,
}

impl<T, H> TurnDispatcher<T, H>
where
    T: Transport + 'static,
    H: Host + 'static,
{
    pub fn new(
        client: WorkflowClient<T>,
        host: H,
        store: SessionStore,
        observer: Rc<dyn ChatObserver>,
    ) -> Self {
        Self::with_conversation(ConversationId::generate(), client, host, store, observer)
    }

    pub fn with_conversation(
        conversation_id: ConversationId,
        client: WorkflowClient<T>,
        host: H,
        store: SessionStore,
        observer: Rc<dyn ChatObserver>,
    ) -> Self {
        let client = Rc::new(client);
        let host = Rc::new(host);
        let store = Rc::new(store);

        // Each log mutation: persist locally, re-render, push the transcript.
        let on_change = {
            let client = client.clone();
            let host = host.clone();
            let store = store.clone();
            let observer = observer.clone();
            let conversation_id = conversation_id.clone();
            move |messages: &[ChatMessage]| {
                store.save(messages);
                observer.messages_changed(messages);
                let client = client.clone();
                let conversation_id = conversation_id.clone();
                let messages = messages.to_vec();
                notify(&*host, "Transcript store", async move {
                    client.store_transcript(&conversation_id, &messages).await
                });
            }
        };

        info!(%conversation_id, "Conversation started");
        Self {
            conversation_id,
            client,
            host,
            store,
            log: MessageLog::new(vec![ChatMessage::bot(WELCOME)], on_change),
            loading: Cell::new(false),
            observer,
        }
    }

    pub fn conversation_id(&self) -> &ConversationId {
        &self.conversation_id
    }

    pub fn messages(&self) -> Vec<ChatMessage> {
        self.log.snapshot()
    }

    pub fn is_loading(&self) -> bool {
        self.loading.get()
    }

    pub fn client(&self) -> &WorkflowClient<T> {
        &self.client
    }

    /// Restores stored history the first time the drawer opens.
    pub fn open_drawer(&self) {
        let restored = self.store.load_once();
        if !restored.is_empty() {
            debug!(count = restored.len(), "Restored chat history");
            self.log.replace(restored);
        }
    }

    /// Runs one turn. Never fails: errors become a bot message.
    pub async fn dispatch(&self, user_text: &str) {
        self.log.append(ChatMessage::user(user_text));
        let _loading = LoadingGuard::raise(&self.loading, &*self.observer);

        if let Err(e) = self.run_turn(user_text).await {
            error!(conversation_id = %self.conversation_id, "Turn failed: {e}");
            self.log.append(ChatMessage::bot(format!("{ERROR_PREFIX}{e}")));
        }
    }

    async fn run_turn(&self, user_text: &str) -> Result<(), WidgetError> {
        let prediction = self.client.predict(user_text).await?;
        debug!(intent = %prediction.intent, "Classified utterance");

        match &prediction.intent {
            Intent::RequestEstimate => {
                let reply = self
                    .client
                    .estimate(&self.conversation_id, prediction.service_type(), prediction.complexity())
                    .await?;
                self.log.append(ChatMessage::bot(reply));
            }
            Intent::Greeting => self.log.append(ChatMessage::bot(GREETING_REPLY)),
            intent if intent.is_navigation() => {
                let reply = self.client.navigate(intent).await?;
                self.append_unless_empty(reply.message);
                let delay = self.client.config().navigate_delay;
                self.redirect_after(reply.redirect_url, delay).await;
            }
            _ => self.answer(user_text).await?,
        }
        Ok(())
    }

    async fn answer(&self, question: &str) -> Result<(), WidgetError> {
        let origin = self.host.origin();
        let outcome = self
            .client
            .answer(&self.conversation_id, question, origin.as_deref())
            .await?;

        match outcome {
            AnswerOutcome::Redirect { location } => {
                info!(%location, "Answerer redirected off-site");
                self.host.navigate(&location);
            }
            AnswerOutcome::Unavailable { status } => {
                debug!(status, "Answer workflow unavailable, using fallback");
                self.log.append(ChatMessage::bot(ANSWER_FALLBACK));
            }
            AnswerOutcome::Navigate { message, url } => {
                self.append_unless_empty(message);
                let delay = self.client.config().redirect_delay;
                self.redirect_after(Some(url), delay).await;
            }
            AnswerOutcome::Clarification { message, suggestions } => {
                self.log.append(ChatMessage::clarification(message, suggestions));
            }
            AnswerOutcome::Escalation(escalation) => {
                debug!(reason = ?escalation.escalation_reason, "Escalation offered");
                self.log.append(ChatMessage::escalation(escalation));
            }
            AnswerOutcome::Plain(text) => self.log.append(ChatMessage::bot(text)),
        }
        Ok(())
    }

    /// Redirect replies may carry no text; no empty bubble for those.
    fn append_unless_empty(&self, text: String) {
        if !text.is_empty() {
            self.log.append(ChatMessage::bot(text));
        }
    }

    /// The text is already on screen; wait so the user can read it.
    async fn redirect_after(&self, url: Option<String>, delay: Duration) {
        let Some(url) = url else {
            warn!("Navigation reply carried no redirect URL");
            return;
        };
        self.host.sleep(delay).await;
        self.host.navigate(&url);
    }

    /// A clarification chip behaves exactly like typing its text.
    pub async fn select_suggestion(&self, suggestion: &str) {
        self.dispatch(suggestion).await;
    }

    pub fn press_escalation_button(&self, button: &EscalationButton) {
        match (button.action, button.url.as_deref()) {
            (ButtonAction::BookMeeting, Some(url)) => {
                self.host.open_external(url);
                self.log.append(ChatMessage::bot(BOOKING_CONFIRMATION));
            }
            (ButtonAction::BookMeeting, None) => {
                warn!(button = %button.text, "Booking button has no URL");
            }
            (ButtonAction::ContinueChat, _) => {
                self.log.append(ChatMessage::bot(CONTINUE_REPLY));
            }
        }
    }

    pub fn send_feedback(&self, message: &ChatMessage, sentiment: Sentiment) {
        let client = self.client.clone();
        let text = message.text.clone();
        notify(&*self.host, "Feedback", async move {
            client.feedback(&text, sentiment).await
        });
    }

    /// Clears everything local and tells the engine to drop its state.
    pub fn reset(&self) {
        self.log.replace(Vec::new());
        self.store.clear();
        self.store.reset_loaded();
        let client = self.client.clone();
        notify(&*self.host, "Reset", async move { client.reset().await });
    }

    pub async fn summarize(&self) {
        match self.client.summarize(&self.conversation_id).await {
            Ok(summary) => self.log.append(ChatMessage::summary(summary)),
            Err(e) => {
                warn!("Summarize failed: {e}");
                self.log.append(ChatMessage::bot(SUMMARY_FALLBACK));
            }
        }
    }

    pub async fn load_case_studies(&self) {
        match self.client.case_studies().await {
            Ok(text) => self.log.append(ChatMessage::case_studies(text)),
            Err(e) => {
                warn!("Case studies failed: {e}");
                self.log.append(ChatMessage::bot(CASE_STUDIES_FALLBACK));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Endpoint, WidgetConfig, NAVIGATE_DELAY, REDIRECT_DELAY};
    use crate::models::{MessageKind, Sender};
    use crate::session_store::{MemoryStorage, SessionStorage, HISTORY_KEY};
    use crate::testing::{Event, Recorder, ScriptedTransport};
    use crate::transport::RawReply;
    use serde_json::json;

    type Dispatcher = TurnDispatcher<ScriptedTransport, Recorder>;

    fn harness_with(storage: MemoryStorage, recorder: Recorder) -> (Dispatcher, ScriptedTransport, Recorder) {
        let transport = ScriptedTransport::default();
        let client = WorkflowClient::new(WidgetConfig::new("http://engine.test/webhook"), transport.clone());
        let dispatcher = TurnDispatcher::with_conversation(
            ConversationId::from("conv-test"),
            client,
            recorder.clone(),
            SessionStore::new(storage),
            Rc::new(recorder.clone()),
        );
        (dispatcher, transport, recorder)
    }

    fn harness() -> (Dispatcher, ScriptedTransport, Recorder) {
        harness_with(MemoryStorage::default(), Recorder::default())
    }

    fn bot_texts(dispatcher: &Dispatcher) -> Vec<String> {
        dispatcher
            .messages()
            .into_iter()
            .filter(|m| m.sender == Sender::Bot)
            .map(|m| m.text)
            .collect()
    }

    fn position(events: &[Event], wanted: impl Fn(&Event) -> bool) -> usize {
        events.iter().position(wanted).expect("event not recorded")
    }

    #[tokio::test]
    async fn greeting_is_answered_locally() {
        let (dispatcher, transport, _) = harness();
        transport.reply(Endpoint::Predict, 200, json!([{ "intent": "greeting" }]));

        dispatcher.dispatch("hello there").await;

        assert_eq!(bot_texts(&dispatcher), vec![WELCOME, GREETING_REPLY]);
        assert_eq!(transport.endpoints(), vec![Endpoint::Predict]);
        assert_eq!(transport.requests_to(Endpoint::Predict)[0], json!({ "text": "hello there" }));
    }

    #[tokio::test]
    async fn estimate_defaults_missing_entities() {
        let (dispatcher, transport, _) = harness();
        transport.reply(Endpoint::Predict, 200, json!({ "intent": "request_estimate", "entities": {} }));
        transport.reply(Endpoint::Estimate, 200, json!({ "message": "Roughly $5,000." }));

        dispatcher.dispatch("how much for an app?").await;

        assert_eq!(
            transport.requests_to(Endpoint::Estimate)[0],
            json!({ "conversationId": "conv-test", "service_type": "general", "complexity": "standard" })
        );
        assert_eq!(bot_texts(&dispatcher).last().unwrap(), "Roughly $5,000.");
    }

    #[tokio::test]
    async fn navigation_shows_text_then_waits_then_leaves() {
        let (dispatcher, transport, recorder) = harness();
        transport.reply(Endpoint::Predict, 200, json!({ "intent": "navigate_contact" }));
        transport.reply(
            Endpoint::Navigate,
            200,
            json!({ "message": "Taking you to our contact page", "redirectUrl": "/contact" }),
        );

        dispatcher.dispatch("contact").await;

        assert_eq!(transport.requests_to(Endpoint::Navigate)[0], json!({ "intent": "navigate_contact" }));
        let events = recorder.events();
        let shown = position(&events, |e| {
            matches!(e, Event::Messages { last: Some(text), .. } if text == "Taking you to our contact page")
        });
        let waited = position(&events, |e| *e == Event::Sleep(NAVIGATE_DELAY));
        let left = position(&events, |e| *e == Event::Navigate("/contact".into()));
        assert!(shown < waited && waited < left);
        assert!(!dispatcher.is_loading());
    }

    #[tokio::test]
    async fn silent_navigation_adds_no_empty_bubble() {
        let (dispatcher, transport, recorder) = harness();
        transport.reply(Endpoint::Predict, 200, json!({ "intent": "navigate_home" }));
        transport.reply(Endpoint::Navigate, 200, json!({ "redirectUrl": "/" }));

        dispatcher.dispatch("home").await;

        let texts: Vec<String> = dispatcher.messages().into_iter().map(|m| m.text).collect();
        assert_eq!(texts.last().map(String::as_str), Some("home"));
        assert!(recorder.events().contains(&Event::Navigate("/".into())));
    }

    #[tokio::test]
    async fn clarification_suggestion_starts_a_new_cycle() {
        let (dispatcher, transport, _) = harness();
        transport.reply(Endpoint::Predict, 200, json!({ "intent": "general_inquiry" }));
        transport.reply(
            Endpoint::Answer,
            200,
            json!({ "type": "clarification", "message": "Which one?", "suggestions": ["a", "b"] }),
        );
        dispatcher.dispatch("tell me about services").await;

        let clarification = dispatcher.messages().pop().unwrap();
        assert_eq!(clarification.kind(), MessageKind::Clarification);
        assert_eq!(clarification.suggestions, Some(vec!["a".to_string(), "b".to_string()]));

        transport.reply(Endpoint::Predict, 200, json!({ "intent": "greeting" }));
        let choice = clarification.suggestions.unwrap()[0].clone();
        dispatcher.select_suggestion(&choice).await;

        let predicts = transport.requests_to(Endpoint::Predict);
        assert_eq!(predicts.len(), 2);
        assert_eq!(predicts[1], json!({ "text": "a" }));
        let messages = dispatcher.messages();
        assert_eq!(messages[messages.len() - 2].sender, Sender::User);
        assert_eq!(messages[messages.len() - 2].text, "a");
    }

    #[tokio::test]
    async fn failures_leave_one_error_message_and_clear_loading() {
        let (dispatcher, transport, recorder) = harness();
        transport.reply(Endpoint::Predict, 500, json!({}));

        dispatcher.dispatch("hi").await;

        let bots = bot_texts(&dispatcher);
        assert_eq!(bots.len(), 2);
        assert_eq!(bots[1], format!("{ERROR_PREFIX}Predict API failed: 500"));
        assert!(!dispatcher.is_loading());
        let events = recorder.events();
        assert_eq!(events.iter().filter(|e| **e == Event::Loading(true)).count(), 1);
        assert_eq!(events.iter().rev().find(|e| matches!(e, Event::Loading(_))), Some(&Event::Loading(false)));
    }

    #[tokio::test]
    async fn garbage_answer_body_is_an_error_too() {
        let (dispatcher, transport, _) = harness();
        transport.reply(Endpoint::Predict, 200, json!({ "intent": "question" }));
        transport.reply_raw(
            Endpoint::Answer,
            RawReply { status: 200, location: None, body: "<html>oops</html>".into() },
        );

        dispatcher.dispatch("what do you do?").await;

        let last = bot_texts(&dispatcher).pop().unwrap();
        assert!(last.starts_with(ERROR_PREFIX));
        assert!(!dispatcher.is_loading());
    }

    #[tokio::test]
    async fn unavailable_answerer_uses_the_canned_reply() {
        let (dispatcher, transport, _) = harness();
        transport.reply(Endpoint::Predict, 200, json!({}));
        transport.reply(Endpoint::Answer, 404, json!({}));

        dispatcher.dispatch("anything").await;

        assert_eq!(bot_texts(&dispatcher).last().unwrap(), ANSWER_FALLBACK);
        assert_eq!(
            transport.requests_to(Endpoint::Answer)[0],
            json!({ "conversationId": "conv-test", "question": "anything" })
        );
    }

    #[tokio::test]
    async fn off_origin_302_leaves_immediately() {
        let recorder = Recorder::with_origin("https://shop.example.com");
        let (dispatcher, transport, recorder) = harness_with(MemoryStorage::default(), recorder);
        transport.reply(Endpoint::Predict, 200, json!({ "intent": "book" }));
        transport.reply_raw(
            Endpoint::Answer,
            RawReply { status: 302, location: Some("https://calendly.com/x".into()), body: String::new() },
        );

        dispatcher.dispatch("book a call").await;

        let events = recorder.events();
        assert!(events.contains(&Event::Navigate("https://calendly.com/x".into())));
        assert!(!events.iter().any(|e| matches!(e, Event::Sleep(_))));
        assert_eq!(bot_texts(&dispatcher), vec![WELCOME]);
    }

    #[tokio::test]
    async fn answer_redirect_body_waits_the_shorter_delay() {
        let (dispatcher, transport, recorder) = harness();
        transport.reply(Endpoint::Predict, 200, json!({ "intent": "pricing_page" }));
        transport.reply(
            Endpoint::Answer,
            200,
            json!({ "type": "redirect", "message": "Opening pricing", "redirectUrl": "/pricing" }),
        );

        dispatcher.dispatch("show pricing").await;

        let events = recorder.events();
        let waited = position(&events, |e| *e == Event::Sleep(REDIRECT_DELAY));
        let left = position(&events, |e| *e == Event::Navigate("/pricing".into()));
        assert!(waited < left);
        assert_eq!(bot_texts(&dispatcher).last().unwrap(), "Opening pricing");
    }

    #[tokio::test]
    async fn escalation_buttons_do_not_dispatch() {
        let (dispatcher, transport, recorder) = harness();
        transport.reply(Endpoint::Predict, 200, json!({ "intent": "complaint" }));
        transport.reply(
            Endpoint::Answer,
            200,
            json!({
                "type": "escalation",
                "message": "Want to talk to someone?",
                "calendly_link": "https://cal.example.com/team",
                "buttons": [
                    { "text": "Book", "action": "book_meeting", "url": "https://cal.example.com/team" },
                    { "text": "Continue", "action": "continue_chat" }
                ]
            }),
        );
        dispatcher.dispatch("this is broken").await;

        let escalation = dispatcher.messages().pop().unwrap();
        assert_eq!(escalation.calendly_link.as_deref(), Some("https://cal.example.com/team"));
        let buttons = escalation.buttons.unwrap();

        dispatcher.press_escalation_button(&buttons[0]);
        dispatcher.press_escalation_button(&buttons[1]);

        assert!(recorder.events().contains(&Event::Open("https://cal.example.com/team".into())));
        let bots = bot_texts(&dispatcher);
        assert_eq!(&bots[bots.len() - 2..], [BOOKING_CONFIRMATION, CONTINUE_REPLY]);
        assert_eq!(transport.requests_to(Endpoint::Predict).len(), 1);
    }

    #[tokio::test]
    async fn every_mutation_pushes_the_transcript() {
        let (dispatcher, transport, recorder) = harness();
        transport.reply(Endpoint::Predict, 200, json!({ "intent": "greeting" }));

        dispatcher.dispatch("hey").await;
        assert_eq!(recorder.pending(), 2);

        recorder.run_spawned().await;
        let transcripts = transport.requests_to(Endpoint::StoreConversation);
        assert_eq!(transcripts.len(), 2);
        assert_eq!(transcripts[1]["conversationId"], "conv-test");
        assert_eq!(transcripts[1]["messages"].as_array().unwrap().len(), 3);
    }

    #[tokio::test]
    async fn feedback_is_fire_and_forget() {
        let (dispatcher, transport, recorder) = harness();
        let welcome = dispatcher.messages().remove(0);

        dispatcher.send_feedback(&welcome, Sentiment::Negative);
        recorder.run_spawned().await;

        assert_eq!(
            transport.requests_to(Endpoint::Feedback),
            vec![json!({ "message": WELCOME, "sentiment": "negative" })]
        );
        assert_eq!(dispatcher.messages().len(), 1);
    }

    #[tokio::test]
    async fn reset_clears_log_and_storage() {
        let (dispatcher, transport, recorder) = harness();
        transport.reply(Endpoint::Predict, 200, json!({ "intent": "greeting" }));
        dispatcher.dispatch("hi").await;

        dispatcher.reset();
        recorder.run_spawned().await;

        assert!(dispatcher.messages().is_empty());
        assert_eq!(transport.requests_to(Endpoint::Reset), vec![json!({})]);

        // Nothing left to restore on the next open.
        dispatcher.open_drawer();
        assert!(dispatcher.messages().is_empty());
    }

    #[tokio::test]
    async fn reset_lets_the_next_open_read_storage_again() {
        let storage = MemoryStorage::default();
        let saved = vec![ChatMessage::user("earlier")];
        storage.set_item(HISTORY_KEY, &serde_json::to_string(&saved).unwrap()).unwrap();
        let (dispatcher, transport, recorder) = harness_with(storage, Recorder::default());

        dispatcher.open_drawer();
        assert!(dispatcher.store.has_loaded());
        assert_eq!(dispatcher.messages(), saved);

        dispatcher.reset();
        recorder.run_spawned().await;
        assert!(!dispatcher.store.has_loaded());

        transport.reply(Endpoint::Predict, 200, json!({ "intent": "greeting" }));
        dispatcher.dispatch("hi").await;
        let after_turn = dispatcher.messages();

        dispatcher.open_drawer();
        assert!(dispatcher.store.has_loaded());
        assert_eq!(dispatcher.store.load(), after_turn);
        assert_eq!(dispatcher.messages(), after_turn);
    }

    #[tokio::test]
    async fn open_drawer_restores_only_once() {
        let storage = MemoryStorage::default();
        let saved = vec![ChatMessage::user("earlier"), ChatMessage::bot("earlier reply")];
        storage.set_item(HISTORY_KEY, &serde_json::to_string(&saved).unwrap()).unwrap();
        let (dispatcher, _, _) = harness_with(storage, Recorder::default());

        dispatcher.open_drawer();
        assert_eq!(dispatcher.messages(), saved);

        dispatcher.press_escalation_button(&EscalationButton {
            text: "Continue".into(),
            action: ButtonAction::ContinueChat,
            url: None,
        });
        dispatcher.open_drawer();
        let texts: Vec<String> = dispatcher.messages().into_iter().map(|m| m.text).collect();
        assert_eq!(texts, vec!["earlier", "earlier reply", CONTINUE_REPLY]);
    }

    #[tokio::test]
    async fn summarize_appends_summary_or_fallback() {
        let (dispatcher, transport, _) = harness();
        transport.reply(
            Endpoint::Summarize,
            200,
            json!([{ "content": { "parts": [{ "text": "You asked about apps." }] } }]),
        );
        dispatcher.summarize().await;
        let summary = dispatcher.messages().pop().unwrap();
        assert_eq!(summary.kind(), MessageKind::Summary);
        assert_eq!(summary.text, "You asked about apps.");
        assert_eq!(transport.requests_to(Endpoint::Summarize)[0], json!({ "conversationId": "conv-test" }));

        dispatcher.summarize().await;
        let fallback = dispatcher.messages().pop().unwrap();
        assert_eq!(fallback.kind(), MessageKind::Plain);
        assert_eq!(fallback.text, SUMMARY_FALLBACK);
    }

    #[tokio::test]
    async fn case_studies_use_their_own_kind() {
        let (dispatcher, transport, _) = harness();
        transport.reply(Endpoint::CaseStudies, 200, json!({ "message": "Three projects" }));

        dispatcher.load_case_studies().await;
        let msg = dispatcher.messages().pop().unwrap();
        assert_eq!(msg.kind(), MessageKind::CaseStudies);
        assert_eq!(msg.text, "Three projects");

        dispatcher.load_case_studies().await;
        assert_eq!(dispatcher.messages().pop().unwrap().text, CASE_STUDIES_FALLBACK);
    }

    #[test]
    fn input_is_trimmed_and_capped() {
        assert_eq!(validate_input("   "), None);
        assert_eq!(validate_input("  hi \n").as_deref(), Some("hi"));
        let long = "é".repeat(MAX_INPUT_CHARS + 5);
        assert_eq!(validate_input(&long).unwrap().chars().count(), MAX_INPUT_CHARS);
    }
}
