mod api;
mod browser;
mod components;
mod state;

use leptos::mount::mount_to_body;
use leptos::prelude::*;

use components::admin::AdminPanel;
use components::dashboard::Dashboard;
use components::drawer::{ChatDrawer, FloatingActionButton};
use state::AppState;

#[derive(Clone, Copy, PartialEq, Eq)]
enum Page {
    Widget,
    Dashboard,
    Admin,
}

impl Page {
    fn current() -> Self {
        let path = web_sys::window().and_then(|w| w.location().pathname().ok());
        match path.as_deref() {
            Some("/dashboard") => Page::Dashboard,
            Some("/admin") => Page::Admin,
            _ => Page::Widget,
        }
    }
}

/// Root application component.
#[component]
fn App() -> impl IntoView {
    match Page::current() {
        Page::Dashboard => view! { <Dashboard /> }.into_any(),
        Page::Admin => view! { <AdminPanel /> }.into_any(),
        Page::Widget => view! { <ChatWidget /> }.into_any(),
    }
}

/// Host page with the floating chat widget.
#[component]
fn ChatWidget() -> impl IntoView {
    AppState::provide();

    view! {
        <div class="app">
            <header class="app-header">
                <h1>"Welcome to Our Website"</h1>
                <p>"The chat button sits in the bottom-right corner."</p>
            </header>
            <FloatingActionButton />
            <ChatDrawer />
        </div>
    }
}

fn main() {
    console_log::init_with_level(log::Level::Debug).expect("Failed to init logger");
    mount_to_body(App);
}
