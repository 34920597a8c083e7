use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;

use chat_widget::models::Metrics;

use crate::api;

/// Read-only analytics view fed by the metrics webhook.
#[component]
pub fn Dashboard() -> impl IntoView {
    let (metrics, set_metrics) = signal(None::<Metrics>);
    let (status, set_status) = signal(None::<String>);

    // Load metrics on mount; sample figures stand in when the webhook is down
    spawn_local(async move {
        match api::workflow_client().metrics().await {
            Ok(m) => set_metrics.set(Some(m)),
            Err(e) => {
                log::error!("Error loading metrics: {e}");
                TimeoutFuture::new(1_000).await;
                set_metrics.set(Some(Metrics::sample()));
            }
        }
    });

    let on_reindex = move |_| {
        spawn_local(async move {
            let message = match api::workflow_client().reindex().await {
                Ok(_) => "Knowledge base reindex initiated!".to_string(),
                Err(e) => format!("Reindex failed: {e}"),
            };
            set_status.set(Some(message));
        });
    };

    view! {
        <div class="dashboard">
            <div class="dashboard-header">
                <h1>"Analytics Dashboard"</h1>
                <div>
                    <button class="primary-btn" on:click=on_reindex>"Re-index Knowledge Base"</button>
                    <a href="/">"← Back to Main Site"</a>
                </div>
            </div>
            {move || status.get().map(|s| view! { <div class="status">{s}</div> })}
            {move || match metrics.get() {
                None => view! { <p>"Loading metrics..."</p> }.into_any(),
                Some(m) => view! { <MetricsView metrics=m /> }.into_any(),
            }}
        </div>
    }
}

#[component]
fn MetricCard(title: &'static str, value: String) -> impl IntoView {
    view! {
        <div class="metric-card">
            <h3>{title}</h3>
            <p class="metric-value">{value}</p>
        </div>
    }
}

#[component]
fn MetricsView(metrics: Metrics) -> impl IntoView {
    let satisfaction = metrics
        .satisfaction_rate()
        .map(|rate| format!("{rate}%"))
        .unwrap_or_else(|| "n/a".to_string());

    view! {
        <div class="metric-grid">
            <MetricCard title="Total Conversations" value=metrics.total_conversations.to_string() />
            <MetricCard title="Escalations" value=metrics.total_escalations.to_string() />
            <MetricCard title="Positive Feedback" value=metrics.positive_feedback.to_string() />
            <MetricCard title="Negative Feedback" value=metrics.negative_feedback.to_string() />
            <MetricCard title="Satisfaction" value=satisfaction />
        </div>

        <h2>"Top Intents"</h2>
        <table class="metric-table">
            <thead><tr><th>"Intent"</th><th>"Count"</th></tr></thead>
            <tbody>
                {metrics
                    .top_intents
                    .into_iter()
                    .map(|top| view! { <tr><td>{top.intent}</td><td>{top.count}</td></tr> })
                    .collect_view()}
            </tbody>
        </table>

        <h2>"Recent Activity"</h2>
        <table class="metric-table">
            <thead>
                <tr><th>"Time"</th><th>"Intent"</th><th>"Escalated"</th><th>"Feedback"</th></tr>
            </thead>
            <tbody>
                {metrics
                    .recent_activity
                    .into_iter()
                    .map(|entry| {
                        view! {
                            <tr>
                                <td>{entry.timestamp}</td>
                                <td>{entry.intent}</td>
                                <td>{if entry.escalated { "Yes" } else { "No" }}</td>
                                <td>{entry.feedback.unwrap_or_else(|| "-".to_string())}</td>
                            </tr>
                        }
                    })
                    .collect_view()}
            </tbody>
        </table>
    }
}
