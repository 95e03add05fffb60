//! Task Board Component
//!
//! Authenticated view: greeting, counter, report and sign-out controls,
//! the new-task form, bulk actions and the task list.

use leptos::prelude::*;
use leptos::task::spawn_local;

use super::{NewTaskForm, TaskList};
use crate::context::use_app_context;
use crate::store::{use_ui_store, UiStateStoreFields};

#[component]
pub fn TaskBoard() -> impl IntoView {
    let ctx = use_app_context();
    let store = use_ui_store();

    let logout = move |_| {
        let auth = ctx.auth();
        spawn_local(async move {
            auth.logout().await;
        });
    };

    let complete_all = move |_| {
        let tasks = ctx.tasks();
        spawn_local(async move {
            tasks.set_all_completed(true).await;
        });
    };

    let clear_completed = move |_| {
        let tasks = ctx.tasks();
        spawn_local(async move {
            tasks.clear_completed().await;
        });
    };

    let has_completed = move || store.stats().get().completed > 0;
    let has_pending = move || store.stats().get().pending > 0;

    view! {
        <section class="app-container">
            <Show when=move || store.report_control().get()>
                <button
                    id="report-btn"
                    class="btn btn-secondary btn-small"
                    on:click=move |_| ctx.tasks().generate_report()
                >
                    "📊 View Report"
                </button>
            </Show>

            <header class="app-header">
                <h2>"Hello, " {move || store.greeting().get()} "!"</h2>
                <span class="task-count">{move || store.stats().get().summary()}</span>
                <button class="btn btn-secondary btn-small" on:click=logout>"Sign Out"</button>
            </header>

            <NewTaskForm />

            <div class="bulk-actions">
                <button class="btn btn-accent btn-small" disabled=move || !has_pending() on:click=complete_all>
                    "✅ Complete all"
                </button>
                <button class="btn btn-danger btn-small" disabled=move || !has_completed() on:click=clear_completed>
                    "🧹 Clear completed"
                </button>
            </div>

            <TaskList />
        </section>
    }
}
