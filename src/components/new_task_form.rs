//! New Task Form Component
//!
//! Submitting the form (button or Enter) adds a task.

use leptos::prelude::*;
use leptos::task::spawn_local;
use taskty_core::ButtonId;

use super::LoadingButton;
use crate::context::use_app_context;
use crate::store::{use_ui_store, UiStateStoreFields};

#[component]
pub fn NewTaskForm() -> impl IntoView {
    let ctx = use_app_context();
    let store = use_ui_store();

    let add_task = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let text = store.task_input().get_untracked();
        if text.trim().is_empty() { return; }
        let tasks = ctx.tasks();
        spawn_local(async move {
            tasks.add_task(&text).await;
        });
    };

    view! {
        <form class="new-task-form" on:submit=add_task>
            <input
                type="text"
                placeholder="What needs to be done?"
                prop:value=move || store.task_input().get()
                on:input=move |ev| store.task_input().set(event_target_value(&ev))
            />
            <LoadingButton button=ButtonId::AddTask label="➕ Add Task" class="btn btn-primary" />
        </form>
    }
}
