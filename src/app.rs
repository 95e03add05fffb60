//! Taskty Frontend App
//!
//! Root component: builds the backend and controllers, starts listening for
//! session changes and switches between the auth and task views.

use std::rc::Rc;

use leptos::prelude::*;
use reactive_stores::Store;
use taskty_core::{AppConfig, MessageKind, Taskty, View};

use crate::backend::Backend;
use crate::components::{AuthPanel, MessageBanner, ReportModal, TaskBoard};
use crate::context::AppContext;
use crate::store::{UiState, UiStateStoreFields};
use crate::view::LeptosView;

const OFFLINE_FALLBACK: &str = "Could not connect to Firebase. Running in offline demo mode.";

#[component]
pub fn App(config: AppConfig) -> impl IntoView {
    let store = Store::new(UiState::default());
    provide_context(store);

    let view = LeptosView::new(store, config.message_timeout_ms);
    let backend = match Backend::from_config(&config) {
        Ok(backend) => backend,
        Err(err) => {
            log::error!("[APP] backend initialization failed: {}", err);
            view.show_message(OFFLINE_FALLBACK, MessageKind::Error);
            Backend::demo()
        }
    };

    let backend = Rc::new(backend);
    let app = Rc::new(Taskty::new(backend.clone(), backend, Rc::new(view), &config));
    app.start();
    log::info!("[APP] started, list limit {}", config.list_limit);

    // Provide context to all children
    provide_context(AppContext::new(app));

    view! {
        <div class="container">
            <MessageBanner />
            <Show
                when=move || store.signed_in().get()
                fallback=|| view! { <AuthPanel /> }
            >
                <TaskBoard />
            </Show>
            <ReportModal />
        </div>
    }
}
