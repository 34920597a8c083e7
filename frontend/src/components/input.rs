use leptos::ev;
use leptos::html::Textarea;
use leptos::prelude::*;

use chat_widget::config::MAX_INPUT_CHARS;

use crate::state::AppState;

/// Chat input form with textarea, send button and length counter.
#[component]
pub fn ChatInput() -> impl IntoView {
    let state = expect_context::<AppState>();
    let (input, set_input) = signal(String::new());
    let textarea = NodeRef::<Textarea>::new();

    // Focus the box whenever the drawer opens
    Effect::new(move |_| {
        if state.is_open.get() {
            if let Some(el) = textarea.get() {
                let _ = el.focus();
            }
        }
    });

    let is_sending = move || state.is_loading.get();

    let send = move || {
        let text = input.get_untracked();
        if text.trim().is_empty() || state.is_loading.get_untracked() {
            return;
        }
        set_input.set(String::new());
        state.send(&text);
    };

    let on_keydown = move |ev: ev::KeyboardEvent| {
        if ev.key() == "Enter" && !ev.shift_key() {
            ev.prevent_default();
            send();
        }
    };

    let on_submit = move |ev: ev::SubmitEvent| {
        ev.prevent_default();
        send();
    };

    view! {
        <form class="input-area" on:submit=on_submit>
            <div class="input-row">
                <textarea
                    node_ref=textarea
                    rows="1"
                    maxlength=MAX_INPUT_CHARS.to_string()
                    placeholder="Type your message here..."
                    prop:value=input
                    on:input=move |ev| {
                        set_input.set(event_target_value(&ev));
                    }
                    on:keydown=on_keydown
                    disabled=is_sending
                />
                <button
                    type="submit"
                    class="send-btn"
                    aria-label="Send message"
                    disabled=move || is_sending() || input.get().trim().is_empty()
                >
                    "➤"
                </button>
            </div>
            <div class="counter">
                {move || format!("{}/{MAX_INPUT_CHARS}", input.with(|s| s.chars().count()))}
            </div>
        </form>
    }
}
