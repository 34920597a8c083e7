//! Test doubles shared by the unit tests.

use std::cell::RefCell;
use std::collections::{HashMap, VecDeque};
use std::rc::Rc;
use std::time::Duration;

use async_trait::async_trait;
use futures_util::future::{FutureExt, LocalBoxFuture};
use serde_json::Value;

use crate::config::Endpoint;
use crate::errors::WidgetError;
use crate::host::{ChatObserver, Host};
use crate::models::ChatMessage;
use crate::transport::{Method, RawReply, Transport, WireRequest};

#[derive(Default)]
struct Script {
    replies: HashMap<Endpoint, VecDeque<RawReply>>,
    sent: Vec<WireRequest>,
}

/// Transport answering from a per-endpoint queue and recording every call.
/// An endpoint with nothing queued fails like a refused connection.
#[derive(Clone, Default)]
pub struct ScriptedTransport {
    script: Rc<RefCell<Script>>,
}

impl ScriptedTransport {
    pub fn reply(&self, endpoint: Endpoint, status: u16, body: Value) {
        self.reply_raw(endpoint, RawReply::json(status, &body));
    }

    pub fn reply_raw(&self, endpoint: Endpoint, reply: RawReply) {
        self.script
            .borrow_mut()
            .replies
            .entry(endpoint)
            .or_default()
            .push_back(reply);
    }

    pub fn endpoints(&self) -> Vec<Endpoint> {
        self.script.borrow().sent.iter().map(|r| r.endpoint).collect()
    }

    pub fn requests_to(&self, endpoint: Endpoint) -> Vec<Value> {
        self.script
            .borrow()
            .sent
            .iter()
            .filter(|r| r.endpoint == endpoint)
            .map(|r| r.body.clone().unwrap_or(Value::Null))
            .collect()
    }

    pub fn methods_to(&self, endpoint: Endpoint) -> Vec<Method> {
        self.script
            .borrow()
            .sent
            .iter()
            .filter(|r| r.endpoint == endpoint)
            .map(|r| r.method)
            .collect()
    }
}

#[async_trait(?Send)]
impl Transport for ScriptedTransport {
    async fn send(&self, request: WireRequest) -> Result<RawReply, WidgetError> {
        let mut script = self.script.borrow_mut();
        let endpoint = request.endpoint;
        script.sent.push(request);
        script
            .replies
            .get_mut(&endpoint)
            .and_then(VecDeque::pop_front)
            .ok_or_else(|| WidgetError::network(endpoint, "connection refused"))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    Messages { count: usize, last: Option<String> },
    Loading(bool),
    Sleep(Duration),
    Navigate(String),
    Open(String),
}

/// Host and observer in one, so effects and renders share a timeline.
/// Sleeps resolve immediately; spawned tasks wait for [`Recorder::run_spawned`].
#[derive(Clone, Default)]
pub struct Recorder {
    events: Rc<RefCell<Vec<Event>>>,
    tasks: Rc<RefCell<Vec<LocalBoxFuture<'static, ()>>>>,
    origin: Option<String>,
}

impl Recorder {
    pub fn with_origin(origin: &str) -> Self {
        Self { origin: Some(origin.to_string()), ..Self::default() }
    }

    pub fn events(&self) -> Vec<Event> {
        self.events.borrow().clone()
    }

    pub fn pending(&self) -> usize {
        self.tasks.borrow().len()
    }

    pub async fn run_spawned(&self) {
        loop {
            let batch: Vec<_> = self.tasks.borrow_mut().drain(..).collect();
            if batch.is_empty() {
                break;
            }
            for task in batch {
                task.await;
            }
        }
    }

    fn record(&self, event: Event) {
        self.events.borrow_mut().push(event);
    }
}

impl Host for Recorder {
    fn origin(&self) -> Option<String> {
        self.origin.clone()
    }

    fn navigate(&self, url: &str) {
        self.record(Event::Navigate(url.to_string()));
    }

    fn open_external(&self, url: &str) {
        self.record(Event::Open(url.to_string()));
    }

    fn sleep(&self, duration: Duration) -> LocalBoxFuture<'static, ()> {
        self.record(Event::Sleep(duration));
        async {}.boxed_local()
    }

    fn spawn(&self, task: LocalBoxFuture<'static, ()>) {
        self.tasks.borrow_mut().push(task);
    }
}

impl ChatObserver for Recorder {
    fn messages_changed(&self, messages: &[ChatMessage]) {
        self.record(Event::Messages {
            count: messages.len(),
            last: messages.last().map(|m| m.text.clone()),
        });
    }

    fn loading_changed(&self, loading: bool) {
        self.record(Event::Loading(loading));
    }
}
