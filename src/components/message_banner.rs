//! Message Banner Component

use leptos::prelude::*;

use crate::store::{use_ui_store, UiStateStoreFields};

/// The transient success / error message
#[component]
pub fn MessageBanner() -> impl IntoView {
    let store = use_ui_store();

    view! {
        <div class="message-area">
            {move || store.message().get().map(|banner| view! {
                <div class=format!("message {}", banner.kind.css_class())>{banner.text}</div>
            })}
        </div>
    }
}
