use std::cell::{Cell, RefCell};
use std::collections::HashMap;

use tracing::{debug, warn};

use crate::config::HISTORY_LIMIT;
use crate::errors::WidgetError;
use crate::models::ChatMessage;

/// Fixed key holding the serialized history.
pub const HISTORY_KEY: &str = "chatHistory";

/// Session-scoped string storage (the browser's `sessionStorage`, or memory).
pub trait SessionStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, WidgetError>;
    fn set_item(&self, key: &str, value: &str) -> Result<(), WidgetError>;
    fn remove_item(&self, key: &str) -> Result<(), WidgetError>;
}

/// In-process storage; lives as long as the process, like a browser session.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    items: RefCell<HashMap<String, String>>,
}

impl SessionStorage for MemoryStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, WidgetError> {
        Ok(self.items.borrow().get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), WidgetError> {
        self.items.borrow_mut().insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<(), WidgetError> {
        self.items.borrow_mut().remove(key);
        Ok(())
    }
}

/// Persists the tail of the conversation across drawer open/close.
/// Never fails towards the caller: bad or missing data reads as no history.
pub struct SessionStore {
    storage: Box<dyn SessionStorage>,
    limit: usize,
    loaded: Cell<bool>,
}

impl SessionStore {
    pub fn new(storage: impl SessionStorage + 'static) -> Self {
        Self::with_limit(storage, HISTORY_LIMIT)
    }

    pub fn with_limit(storage: impl SessionStorage + 'static, limit: usize) -> Self {
        Self { storage: Box::new(storage), limit, loaded: Cell::new(false) }
    }

    fn tail<'a>(&self, history: &'a [ChatMessage]) -> &'a [ChatMessage] {
        &history[history.len().saturating_sub(self.limit)..]
    }

    fn read(&self) -> Result<Vec<ChatMessage>, WidgetError> {
        let Some(raw) = self.storage.get_item(HISTORY_KEY)? else {
            return Ok(Vec::new());
        };
        let mut history: Vec<ChatMessage> = serde_json::from_str(&raw)?;
        let excess = history.len().saturating_sub(self.limit);
        history.drain(..excess);
        Ok(history)
    }

    pub fn load(&self) -> Vec<ChatMessage> {
        match self.read() {
            Ok(history) => history,
            Err(e) => {
                warn!("Ignoring stored chat history: {e}");
                Vec::new()
            }
        }
    }

    /// Loads only on the first call of a drawer lifecycle.
    pub fn load_once(&self) -> Vec<ChatMessage> {
        if self.loaded.replace(true) {
            return Vec::new();
        }
        self.load()
    }

    pub fn has_loaded(&self) -> bool {
        self.loaded.get()
    }

    pub fn reset_loaded(&self) {
        self.loaded.set(false);
    }

    /// Writes the last `limit` messages. An empty history is not written.
    pub fn save(&self, history: &[ChatMessage]) {
        if history.is_empty() {
            return;
        }
        let result = serde_json::to_string(self.tail(history))
            .map_err(WidgetError::from)
            .and_then(|json| self.storage.set_item(HISTORY_KEY, &json));
        if let Err(e) = result {
            warn!("Failed to save chat history: {e}");
        }
    }

    pub fn clear(&self) {
        if let Err(e) = self.storage.remove_item(HISTORY_KEY) {
            warn!("Failed to clear chat history: {e}");
        } else {
            debug!("Cleared stored chat history");
        }
    }
}
