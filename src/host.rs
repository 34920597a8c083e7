use std::future::Future;
use std::time::Duration;

use futures_util::future::{FutureExt, LocalBoxFuture};
use tracing::warn;

use crate::errors::WidgetError;
use crate::models::ChatMessage;

/// Side effects the conversation core needs from its environment.
pub trait Host {
    /// Origin of the embedding page, if there is one.
    fn origin(&self) -> Option<String>;

    /// Leave the current page.
    fn navigate(&self, url: &str);

    /// Open `url` in a new browsing context.
    fn open_external(&self, url: &str);

    fn sleep(&self, duration: Duration) -> LocalBoxFuture<'static, ()>;

    /// Run `task` to completion in the background on the current thread.
    fn spawn(&self, task: LocalBoxFuture<'static, ()>);
}

/// Render hook. Called after every log mutation and loading flip.
pub trait ChatObserver {
    fn messages_changed(&self, messages: &[ChatMessage]);
    fn loading_changed(&self, loading: bool);
}

/// Best-effort notification: spawned, never awaited by the caller, never
/// retried. A failure is logged and dropped.
pub fn notify<H, F>(host: &H, label: &'static str, call: F)
where
    H: Host + ?Sized,
    F: Future<Output = Result<(), WidgetError>> + 'static,
{
    host.spawn(
        async move {
            if let Err(e) = call.await {
                warn!("{label} failed: {e}");
            }
        }
        .boxed_local(),
    );
}
