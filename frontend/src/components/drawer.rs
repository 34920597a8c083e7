use leptos::prelude::*;

use chat_widget::models::EscalationButton;
use chat_widget::{ChatMessage, Sentiment};

use super::input::ChatInput;
use super::message::{MessageActions, MessageList};
use crate::state::AppState;

/// Round launcher in the corner of the page.
#[component]
pub fn FloatingActionButton() -> impl IntoView {
    let state = expect_context::<AppState>();

    view! {
        <button
            class="fab"
            class:open=move || state.is_open.get()
            aria-label=move || if state.is_open.get() { "Close chat" } else { "Open chat" }
            on:click=move |_| state.toggle()
        >
            {move || if state.is_open.get() { "✕" } else { "💬" }}
        </button>
    }
}

/// Slide-in drawer: header actions, message history, typing indicator, input.
#[component]
pub fn ChatDrawer() -> impl IntoView {
    let state = expect_context::<AppState>();

    let actions = MessageActions {
        on_user_reply: Callback::new(move |text: String| state.reply_with_suggestion(text)),
        on_feedback: Callback::new(move |(message, sentiment): (ChatMessage, Sentiment)| {
            state.feedback(message, sentiment)
        }),
        on_button: Callback::new(move |button: EscalationButton| state.press_button(button)),
    };

    view! {
        <div
            class="backdrop"
            class:visible=move || state.is_open.get()
            on:click=move |_| state.close()
        ></div>
        <aside
            class="drawer"
            class:open=move || state.is_open.get()
            aria-hidden=move || (!state.is_open.get()).to_string()
        >
            <div class="drawer-header">
                <h3>"Chat Assistant"</h3>
                <div class="drawer-actions">
                    <button class="icon-btn" aria-label="Close chat" on:click=move |_| state.close()>
                        "✕"
                    </button>
                    <button class="outline-btn" on:click=move |_| state.reset()>"Clear"</button>
                    <button class="outline-btn" on:click=move |_| state.case_studies()>
                        "Case Studies"
                    </button>
                    <button class="outline-btn" on:click=move |_| state.summarize()>"Summarize"</button>
                </div>
            </div>

            <div class="drawer-content">
                <MessageList messages=state.messages actions=actions />
                <Show when=move || state.is_loading.get()>
                    <div class="typing">
                        <div class="typing-bubble">"Thinking..."</div>
                    </div>
                </Show>
            </div>

            <div class="drawer-footer">
                <ChatInput />
            </div>
        </aside>
    }
}
