use std::cell::Cell;
use std::time::Duration;

use futures_util::future::{FutureExt, LocalBoxFuture};

use chat_widget::host::{ChatObserver, Host};
use chat_widget::models::{ChatMessage, MessageKind, Metrics, Sentiment};

pub const HELP: &str = "\
Type a message and press Enter. Commands:
  /pick N      choose suggestion N of the last clarification
  /book        press the booking button of the last escalation
  /continue    press the continue button of the last escalation
  /good /bad   rate the last bot message
  /summary     summarize the conversation
  /cases       show case studies
  /metrics     print dashboard metrics
  /reindex     re-index the knowledge base
  /loadtest    start a load test on the engine
  /reset       clear the conversation
  /help        show this help
  /quit        exit";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Say(String),
    Pick(usize),
    Book,
    Continue,
    Feedback(Sentiment),
    Summarize,
    CaseStudies,
    Metrics,
    Reindex,
    LoadTest,
    Reset,
    Help,
    Quit,
    Unknown(String),
}

impl Command {
    pub fn parse(line: &str) -> Self {
        let line = line.trim();
        let Some(rest) = line.strip_prefix('/') else {
            return Command::Say(line.to_string());
        };
        let mut parts = rest.split_whitespace();
        match (parts.next(), parts.next()) {
            (Some("pick"), Some(n)) => match n.parse() {
                Ok(n) if n > 0 => Command::Pick(n),
                _ => Command::Unknown(line.to_string()),
            },
            (Some("book"), None) => Command::Book,
            (Some("continue"), None) => Command::Continue,
            (Some("good"), None) => Command::Feedback(Sentiment::Positive),
            (Some("bad"), None) => Command::Feedback(Sentiment::Negative),
            (Some("summary"), None) => Command::Summarize,
            (Some("cases"), None) => Command::CaseStudies,
            (Some("metrics"), None) => Command::Metrics,
            (Some("reindex"), None) => Command::Reindex,
            (Some("loadtest"), None) => Command::LoadTest,
            (Some("reset"), None) => Command::Reset,
            (Some("help"), None) => Command::Help,
            (Some("quit" | "exit"), None) => Command::Quit,
            _ => Command::Unknown(line.to_string()),
        }
    }
}

/// Terminal stand-in for the browser: nothing to leave, so redirects print.
pub struct ConsoleHost;

impl Host for ConsoleHost {
    fn origin(&self) -> Option<String> {
        None
    }

    fn navigate(&self, url: &str) {
        println!("   -> redirect to {url}");
    }

    fn open_external(&self, url: &str) {
        println!("   -> open {url}");
    }

    fn sleep(&self, duration: Duration) -> LocalBoxFuture<'static, ()> {
        tokio::time::sleep(duration).boxed_local()
    }

    fn spawn(&self, task: LocalBoxFuture<'static, ()>) {
        tokio::task::spawn_local(task);
    }
}

/// Prints messages as they are appended.
#[derive(Default)]
pub struct ConsolePrinter {
    printed: Cell<usize>,
}

impl ChatObserver for ConsolePrinter {
    fn messages_changed(&self, messages: &[ChatMessage]) {
        // Appends grow the log by one; anything else was a restore or reset.
        let printed = self.printed.get();
        let from = if messages.len() == printed + 1 {
            printed
        } else {
            println!("--- {} message(s) ---", messages.len());
            0
        };
        for message in &messages[from..] {
            print!("{}", render(message));
        }
        self.printed.set(messages.len());
    }

    fn loading_changed(&self, loading: bool) {
        if loading {
            println!("   (thinking...)");
        }
    }
}

pub fn render(message: &ChatMessage) -> String {
    let mut out = match message.kind() {
        MessageKind::Summary => format!("{:>4}> [summary] {}\n", message.sender.as_str(), message.text),
        MessageKind::CaseStudies => format!("{:>4}> [case studies] {}\n", message.sender.as_str(), message.text),
        _ => format!("{:>4}> {}\n", message.sender.as_str(), message.text),
    };
    for (i, suggestion) in message.suggestions.iter().flatten().enumerate() {
        out.push_str(&format!("      [{}] {suggestion}\n", i + 1));
    }
    for button in message.buttons.iter().flatten() {
        out.push_str(&format!("      <{}>\n", button.text));
    }
    out
}

pub fn print_metrics(metrics: &Metrics) {
    println!("Conversations: {}", metrics.total_conversations);
    println!("Escalations:   {}", metrics.total_escalations);
    println!(
        "Feedback:      +{} / -{}",
        metrics.positive_feedback, metrics.negative_feedback
    );
    if let Some(rate) = metrics.satisfaction_rate() {
        println!("Satisfaction:  {rate}%");
    }
    for top in &metrics.top_intents {
        println!("  {:<24} {}", top.intent, top.count);
    }
    for entry in &metrics.recent_activity {
        println!(
            "  {}  {}{}",
            entry.timestamp,
            entry.intent,
            if entry.escalated { "  (escalated)" } else { "" }
        );
    }
}
