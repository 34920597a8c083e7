use std::time::Duration;

use futures_util::future::{FutureExt, LocalBoxFuture};
use gloo_timers::future::TimeoutFuture;
use wasm_bindgen_futures::spawn_local;

use chat_widget::WidgetError;
use chat_widget::host::Host;
use chat_widget::session_store::SessionStorage;

/// Browser effects: `location`, `window.open`, timers and the local executor.
#[derive(Clone, Copy)]
pub struct BrowserHost;

impl Host for BrowserHost {
    fn origin(&self) -> Option<String> {
        web_sys::window()?.location().origin().ok()
    }

    fn navigate(&self, url: &str) {
        let Some(window) = web_sys::window() else { return };
        if let Err(e) = window.location().set_href(url) {
            log::error!("Navigation to {url} failed: {e:?}");
        }
    }

    fn open_external(&self, url: &str) {
        let Some(window) = web_sys::window() else { return };
        if let Err(e) = window.open_with_url_and_target(url, "_blank") {
            log::error!("Opening {url} failed: {e:?}");
        }
    }

    fn sleep(&self, duration: Duration) -> LocalBoxFuture<'static, ()> {
        let millis = u32::try_from(duration.as_millis()).unwrap_or(u32::MAX);
        TimeoutFuture::new(millis).boxed_local()
    }

    fn spawn(&self, task: LocalBoxFuture<'static, ()>) {
        spawn_local(task);
    }
}

/// `window.sessionStorage`.
pub struct BrowserStorage;

impl BrowserStorage {
    fn storage() -> Result<web_sys::Storage, WidgetError> {
        web_sys::window()
            .ok_or_else(|| WidgetError::storage("no window"))?
            .session_storage()
            .map_err(|e| WidgetError::storage(format!("{e:?}")))?
            .ok_or_else(|| WidgetError::storage("sessionStorage disabled"))
    }
}

impl SessionStorage for BrowserStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, WidgetError> {
        Self::storage()?
            .get_item(key)
            .map_err(|e| WidgetError::storage(format!("{e:?}")))
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), WidgetError> {
        Self::storage()?
            .set_item(key, value)
            .map_err(|e| WidgetError::storage(format!("{e:?}")))
    }

    fn remove_item(&self, key: &str) -> Result<(), WidgetError> {
        Self::storage()?
            .remove_item(key)
            .map_err(|e| WidgetError::storage(format!("{e:?}")))
    }
}
