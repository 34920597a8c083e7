mod console;

use std::rc::Rc;

use anyhow::Context;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::task::LocalSet;
use tracing::info;
use tracing_subscriber::EnvFilter;

use chat_widget::dispatcher::validate_input;
use chat_widget::host::ChatObserver;
use chat_widget::http::ReqwestTransport;
use chat_widget::models::{ButtonAction, ChatMessage, MessageKind};
use chat_widget::session_store::{MemoryStorage, SessionStore};
use chat_widget::{TurnDispatcher, WidgetConfig, WorkflowClient};

use crate::console::{Command, ConsoleHost, ConsolePrinter, HELP};

type Dispatcher = TurnDispatcher<ReqwestTransport, ConsoleHost>;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    // Load .env if present (development convenience)
    dotenvy::dotenv().ok();

    // Logs go to stderr so they do not interleave with the transcript
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| "chat_widget=info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = WidgetConfig::from_env().context("reading WORKFLOW_BASE_URL")?;
    info!(base_url = %config.base_url, "Using workflow engine");

    // The core's futures are !Send; everything runs on one thread.
    LocalSet::new().run_until(run(config)).await
}

async fn run(config: WidgetConfig) -> anyhow::Result<()> {
    let printer = Rc::new(ConsolePrinter::default());
    let store = SessionStore::with_limit(MemoryStorage::default(), config.history_limit);
    let dispatcher: Dispatcher = TurnDispatcher::new(
        WorkflowClient::new(config, ReqwestTransport::new()?),
        ConsoleHost,
        store,
        printer.clone(),
    );

    println!("{HELP}\n");
    printer.messages_changed(&dispatcher.messages());
    dispatcher.open_drawer();

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        match Command::parse(&line) {
            Command::Quit => break,
            Command::Help => println!("{HELP}"),
            Command::Say(text) => {
                if let Some(text) = validate_input(&text) {
                    dispatcher.dispatch(&text).await;
                }
            }
            Command::Pick(n) => match last_of_kind(&dispatcher, MessageKind::Clarification)
                .and_then(|m| m.suggestions)
                .and_then(|s| s.get(n - 1).cloned())
            {
                Some(choice) => dispatcher.select_suggestion(&choice).await,
                None => eprintln!("No suggestion #{n}"),
            },
            Command::Book => press(&dispatcher, ButtonAction::BookMeeting),
            Command::Continue => press(&dispatcher, ButtonAction::ContinueChat),
            Command::Feedback(sentiment) => {
                match dispatcher.messages().into_iter().rev().find(ChatMessage::accepts_feedback) {
                    Some(message) => dispatcher.send_feedback(&message, sentiment),
                    None => eprintln!("Nothing to rate yet"),
                }
            }
            Command::Summarize => dispatcher.summarize().await,
            Command::CaseStudies => dispatcher.load_case_studies().await,
            Command::Metrics => match dispatcher.client().metrics().await {
                Ok(metrics) => console::print_metrics(&metrics),
                Err(e) => eprintln!("Metrics unavailable: {e}"),
            },
            Command::Reindex => match dispatcher.client().reindex().await {
                Ok(message) => println!("   {message}"),
                Err(e) => eprintln!("Reindex failed: {e}"),
            },
            Command::LoadTest => match dispatcher.client().load_test().await {
                Ok(message) => println!("   {message}"),
                Err(e) => eprintln!("Load test failed: {e}"),
            },
            Command::Reset => dispatcher.reset(),
            Command::Unknown(cmd) => eprintln!("Unknown command {cmd}; try /help"),
        }
    }
    Ok(())
}

fn last_of_kind(dispatcher: &Dispatcher, kind: MessageKind) -> Option<ChatMessage> {
    dispatcher.messages().into_iter().rev().find(|m| m.kind() == kind)
}

fn press(dispatcher: &Dispatcher, action: ButtonAction) {
    let button = last_of_kind(dispatcher, MessageKind::Escalation)
        .and_then(|m| m.buttons)
        .and_then(|buttons| buttons.into_iter().find(|b| b.action == action));
    match button {
        Some(button) => dispatcher.press_escalation_button(&button),
        None => eprintln!("No such button on the last escalation"),
    }
}
