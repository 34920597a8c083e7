//! Conversation core of the chat widget: message log, session persistence,
//! and the turn dispatcher that talks to the workflow engine's webhooks.
//!
//! Platform specifics stay behind [`transport::Transport`],
//! [`session_store::SessionStorage`], [`host::Host`] and
//! [`host::ChatObserver`], so the same core runs in the browser front-end
//! and in the native console.

pub mod config;
pub mod dispatcher;
pub mod errors;
pub mod host;
pub mod message_log;
pub mod models;
pub mod responses;
pub mod session_store;
pub mod transport;
pub mod workflow;

#[cfg(not(target_arch = "wasm32"))]
pub mod http;

#[cfg(test)]
mod testing;

pub use config::WidgetConfig;
pub use dispatcher::TurnDispatcher;
pub use errors::WidgetError;
pub use models::{ChatMessage, ConversationId, MessageKind, Sender, Sentiment};
pub use workflow::WorkflowClient;
