//! Loading Button Component
//!
//! Button that swaps its label and disables itself while its action runs.

use leptos::prelude::*;
use taskty_core::ButtonId;

use crate::store::{busy_label, use_ui_store};

/// Button bound to a loading state in the store
///
/// # Arguments
/// * `button` - Which loading state to follow
/// * `label` - Label while idle
/// * `on_click` - Click handler; without one the button submits its form
#[component]
pub fn LoadingButton(
    button: ButtonId,
    label: &'static str,
    #[prop(into)] class: String,
    #[prop(optional)] on_click: Option<Callback<()>>,
) -> impl IntoView {
    let store = use_ui_store();
    let busy = move || busy_label(&store, button);
    let kind = if on_click.is_some() { "button" } else { "submit" };

    view! {
        <button
            type=kind
            class=class
            disabled=move || busy().is_some()
            on:click=move |_| {
                if let Some(callback) = on_click {
                    callback.run(());
                }
            }
        >
            {move || busy().unwrap_or_else(|| label.to_string())}
        </button>
    }
}
