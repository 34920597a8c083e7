use std::cell::RefCell;

use crate::models::ChatMessage;

type Hook = Box<dyn Fn(&[ChatMessage])>;

/// Ordered chat history. Append-only during normal turns; `replace` is for
/// restore and reset. Every mutation hands a snapshot to the hook once the
/// internal borrow is released, so the hook may read the log again.
pub struct MessageLog {
    messages: RefCell<Vec<ChatMessage>>,
    hook: Option<Hook>,
}

impl Default for MessageLog {
    fn default() -> Self {
        Self { messages: RefCell::new(Vec::new()), hook: None }
    }
}

impl MessageLog {
    /// A log seeded with `initial`; seeding does not fire the hook.
    pub fn new(initial: Vec<ChatMessage>, hook: impl Fn(&[ChatMessage]) + 'static) -> Self {
        Self { messages: RefCell::new(initial), hook: Some(Box::new(hook)) }
    }

    pub fn append(&self, message: ChatMessage) {
        let snapshot = {
            let mut messages = self.messages.borrow_mut();
            messages.push(message);
            messages.clone()
        };
        self.fire(&snapshot);
    }

    pub fn replace(&self, history: Vec<ChatMessage>) {
        let snapshot = {
            let mut messages = self.messages.borrow_mut();
            *messages = history;
            messages.clone()
        };
        self.fire(&snapshot);
    }

    pub fn snapshot(&self) -> Vec<ChatMessage> {
        self.messages.borrow().clone()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.borrow().is_empty()
    }

    fn fire(&self, snapshot: &[ChatMessage]) {
        if let Some(hook) = &self.hook {
            hook(snapshot);
        }
    }
}
