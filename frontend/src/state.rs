use std::rc::Rc;

use leptos::prelude::*;
use leptos::task::spawn_local;

use chat_widget::dispatcher::validate_input;
use chat_widget::host::ChatObserver;
use chat_widget::models::EscalationButton;
use chat_widget::session_store::SessionStore;
use chat_widget::{ChatMessage, Sentiment, TurnDispatcher};

use crate::api::{self, GlooTransport};
use crate::browser::{BrowserHost, BrowserStorage};

type Dispatcher = TurnDispatcher<GlooTransport, BrowserHost>;

/// Mirrors the dispatcher's log and loading flag into signals.
struct SignalObserver {
    set_messages: WriteSignal<Vec<ChatMessage>>,
    set_is_loading: WriteSignal<bool>,
}

impl ChatObserver for SignalObserver {
    fn messages_changed(&self, messages: &[ChatMessage]) {
        self.set_messages.set(messages.to_vec());
    }

    fn loading_changed(&self, loading: bool) {
        self.set_is_loading.set(loading);
    }
}

/// Widget state, provided via Leptos context.
#[derive(Clone, Copy)]
pub struct AppState {
    // --- Read signals (for components to subscribe to) ---
    pub messages: ReadSignal<Vec<ChatMessage>>,
    pub is_loading: ReadSignal<bool>,
    pub is_open: ReadSignal<bool>,

    // --- Write signals ---
    set_is_open: WriteSignal<bool>,

    dispatcher: StoredValue<Rc<Dispatcher>, LocalStorage>,
}

impl AppState {
    /// Create the conversation and provide its state in the current context.
    pub fn provide() -> Self {
        let (messages, set_messages) = signal(Vec::<ChatMessage>::new());
        let (is_loading, set_is_loading) = signal(false);
        let (is_open, set_is_open) = signal(false);

        let observer = Rc::new(SignalObserver { set_messages, set_is_loading });
        let client = api::workflow_client();
        let store = SessionStore::with_limit(BrowserStorage, client.config().history_limit);
        let dispatcher = TurnDispatcher::new(client, BrowserHost, store, observer);
        set_messages.set(dispatcher.messages());

        let state = Self {
            messages,
            is_loading,
            is_open,
            set_is_open,
            dispatcher: StoredValue::new_local(Rc::new(dispatcher)),
        };

        provide_context(state);
        state
    }

    fn dispatcher(&self) -> Rc<Dispatcher> {
        self.dispatcher.get_value()
    }

    /// Toggle the drawer; the first open restores stored history.
    pub fn toggle(&self) {
        let opening = !self.is_open.get_untracked();
        self.set_is_open.set(opening);
        if opening {
            self.dispatcher().open_drawer();
        }
    }

    pub fn close(&self) {
        self.set_is_open.set(false);
    }

    /// Send typed text. Ignored while a turn is in flight.
    pub fn send(&self, raw: &str) {
        if self.is_loading.get_untracked() {
            return;
        }
        let Some(text) = validate_input(raw) else { return };
        let dispatcher = self.dispatcher();
        spawn_local(async move { dispatcher.dispatch(&text).await });
    }

    pub fn reply_with_suggestion(&self, suggestion: String) {
        let dispatcher = self.dispatcher();
        spawn_local(async move { dispatcher.select_suggestion(&suggestion).await });
    }

    pub fn press_button(&self, button: EscalationButton) {
        self.dispatcher().press_escalation_button(&button);
    }

    pub fn feedback(&self, message: ChatMessage, sentiment: Sentiment) {
        self.dispatcher().send_feedback(&message, sentiment);
    }

    pub fn reset(&self) {
        self.dispatcher().reset();
    }

    pub fn summarize(&self) {
        let dispatcher = self.dispatcher();
        spawn_local(async move { dispatcher.summarize().await });
    }

    pub fn case_studies(&self) {
        let dispatcher = self.dispatcher();
        spawn_local(async move { dispatcher.load_case_studies().await });
    }
}
