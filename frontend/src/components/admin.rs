use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api;

#[derive(Clone, Copy, PartialEq, Eq)]
enum AdminJob {
    Reindex,
    LoadTest,
}

impl AdminJob {
    fn label(self) -> &'static str {
        match self {
            AdminJob::Reindex => "Reindexing",
            AdminJob::LoadTest => "Load test",
        }
    }

    fn badge(self) -> &'static str {
        match self {
            AdminJob::Reindex => "✅",
            AdminJob::LoadTest => "🚀",
        }
    }
}

/// Maintenance triggers for the workflow engine.
#[component]
pub fn AdminPanel() -> impl IntoView {
    let (running, set_running) = signal(None::<AdminJob>);
    let (status, set_status) = signal(None::<String>);

    let run = move |job: AdminJob| {
        set_running.set(Some(job));
        spawn_local(async move {
            let client = api::workflow_client();
            let result = match job {
                AdminJob::Reindex => client.reindex().await,
                AdminJob::LoadTest => client.load_test().await,
            };
            let message = match result {
                Ok(reply) => format!("{} {reply}", job.badge()),
                Err(e) => format!("❌ {} failed: {e}", job.label()),
            };
            set_status.set(Some(message));
            set_running.set(None);
        });
    };

    view! {
        <div class="admin-panel">
            <h1>"Admin Panel"</h1>
            <button
                class="primary-btn"
                disabled=move || running.get().is_some()
                on:click=move |_| run(AdminJob::Reindex)
            >
                {move || if running.get() == Some(AdminJob::Reindex) {
                    "Reindexing..."
                } else {
                    "Re-index Knowledge Base"
                }}
            </button>
            <button
                class="primary-btn"
                disabled=move || running.get().is_some()
                on:click=move |_| run(AdminJob::LoadTest)
            >
                {move || if running.get() == Some(AdminJob::LoadTest) {
                    "Running..."
                } else {
                    "Run Load Test"
                }}
            </button>
            {move || status.get().map(|s| view! { <p class="status">{s}</p> })}
            <a href="/">"← Back to Main Site"</a>
        </div>
    }
}
