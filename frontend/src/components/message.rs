use chrono::Local;
use leptos::prelude::*;

use chat_widget::models::{ButtonAction, EscalationButton};
use chat_widget::{ChatMessage, MessageKind, Sender, Sentiment};

/// What a rendered message may do, passed down explicitly.
#[derive(Clone, Copy)]
pub struct MessageActions {
    pub on_user_reply: Callback<String>,
    pub on_feedback: Callback<(ChatMessage, Sentiment)>,
    pub on_button: Callback<EscalationButton>,
}

/// Message history in append order, with an empty state.
#[component]
pub fn MessageList(messages: ReadSignal<Vec<ChatMessage>>, actions: MessageActions) -> impl IntoView {
    view! {
        <div class="message-list">
            {move || {
                messages.with(Vec::is_empty).then(|| {
                    view! {
                        <div class="empty-state">
                            <div class="empty-icon">"💬"</div>
                            <p>"Start a conversation!"</p>
                        </div>
                    }
                })
            }}
            <For
                each=move || messages.get()
                key=|m| m.id.clone()
                let:msg
            >
                <MessageBubble message=msg actions=actions />
            </For>
        </div>
    }
}

fn kind_class(kind: MessageKind) -> &'static str {
    match kind {
        MessageKind::Plain => "plain",
        MessageKind::Clarification => "clarification",
        MessageKind::Escalation => "escalation",
        MessageKind::Summary => "summary",
        MessageKind::CaseStudies => "case-studies",
    }
}

/// A single chat message bubble.
#[component]
fn MessageBubble(message: ChatMessage, actions: MessageActions) -> impl IntoView {
    let kind = message.kind();
    let css_class = format!("message {} {}", message.sender.as_str(), kind_class(kind));
    let time = message.timestamp.with_timezone(&Local).format("%H:%M").to_string();
    let show_avatar = message.sender == Sender::Bot && kind != MessageKind::Clarification;

    let text = if kind == MessageKind::Summary {
        view! { <div class="summary-text">{message.text.clone()}</div> }.into_any()
    } else {
        view! { <div>{message.text.clone()}</div> }.into_any()
    };

    let suggestions = message
        .suggestions
        .clone()
        .filter(|s| !s.is_empty())
        .map(|suggestions| {
            view! {
                <div class="quick-replies">
                    {suggestions
                        .into_iter()
                        .map(|suggestion| {
                            let label = suggestion.clone();
                            view! {
                                <button
                                    class="quick-reply"
                                    on:click=move |_| actions.on_user_reply.run(suggestion.clone())
                                >
                                    {label}
                                </button>
                            }
                        })
                        .collect_view()}
                </div>
            }
        });

    let buttons = message
        .buttons
        .clone()
        .filter(|b| !b.is_empty())
        .map(|buttons| {
            view! {
                <div class="quick-replies">
                    {buttons
                        .into_iter()
                        .map(|button| {
                            let label = button.text.clone();
                            let book = button.action == ButtonAction::BookMeeting;
                            view! {
                                <button
                                    class="escalation-btn"
                                    class:book=book
                                    on:click=move |_| actions.on_button.run(button.clone())
                                >
                                    {label}
                                </button>
                            }
                        })
                        .collect_view()}
                </div>
            }
        });

    let feedback = message.accepts_feedback().then(|| {
        let liked = message.clone();
        let disliked = message.clone();
        view! {
            <div class="feedback">
                <button
                    class="feedback-btn positive"
                    on:click=move |_| actions.on_feedback.run((liked.clone(), Sentiment::Positive))
                >
                    "👍"
                </button>
                <button
                    class="feedback-btn negative"
                    on:click=move |_| actions.on_feedback.run((disliked.clone(), Sentiment::Negative))
                >
                    "👎"
                </button>
            </div>
        }
    });

    view! {
        <div class=css_class>
            {show_avatar.then(|| view! { <div class="avatar">"🤖"</div> })}
            <div class="bubble">
                {text}
                <div class="time">{time}</div>
                {suggestions}
                {buttons}
                {feedback}
            </div>
        </div>
    }
}
