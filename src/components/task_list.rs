//! Task List Component
//!
//! Renders the task snapshot. One delegated click handler on the list reads
//! the clicked button's data attributes and dispatches the action.

use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos::tachys::html::attribute::custom::custom_attribute;
use leptos::tachys::view::add_attr::AddAnyAttr;
use taskty_core::controllers::TaskAction;
use taskty_core::domain::Task;
use wasm_bindgen::JsCast;

use crate::context::use_app_context;
use crate::store::{use_ui_store, UiStateStoreFields};

fn clicked_action(ev: &web_sys::MouseEvent) -> Option<TaskAction> {
    let target = ev.target()?.dyn_into::<web_sys::Element>().ok()?;
    let selector = format!("button[{}]", TaskAction::ACTION_ATTR);
    let button = target.closest(&selector).ok()??;
    TaskAction::from_attributes(
        button.get_attribute(TaskAction::ACTION_ATTR).as_deref(),
        button.get_attribute(TaskAction::TASK_ID_ATTR).as_deref(),
        button.get_attribute(TaskAction::COMPLETED_ATTR).as_deref(),
    )
}

/// Button carrying `action` in the attributes `clicked_action` reads
fn action_button(action: TaskAction, class: &'static str, label: &'static str) -> impl IntoView {
    let [(action_key, action_tag), (id_key, id), (completed_key, completed)] = action.attributes();
    view! { <button class=class>{label}</button> }.add_any_attr((
        custom_attribute(action_key, action_tag),
        custom_attribute(id_key, id),
        custom_attribute(completed_key, completed),
    ))
}

fn task_row(task: Task) -> impl IntoView {
    let state = if task.completed { "completed" } else { "" };
    let toggle = TaskAction::Toggle { id: task.id.clone(), completed: task.completed };
    let delete = TaskAction::Delete { id: task.id };
    let toggle_label = if task.completed { "↶ Undo" } else { "✅ Complete" };

    view! {
        <div class=format!("task-item {}", state)>
            <div class=format!("task-text {}", state)>{task.text}</div>
            <div class="task-actions">
                {action_button(toggle, "btn btn-accent btn-small", toggle_label)}
                {action_button(delete, "btn btn-danger btn-small", "🗑️ Delete")}
            </div>
        </div>
    }
}

#[component]
pub fn TaskList() -> impl IntoView {
    let ctx = use_app_context();
    let store = use_ui_store();

    let on_click = move |ev: web_sys::MouseEvent| {
        let Some(action) = clicked_action(&ev) else { return; };
        let tasks = ctx.tasks();
        spawn_local(async move {
            tasks.dispatch(action).await;
        });
    };

    view! {
        <div class="task-list" on:click=on_click>
            {move || {
                let tasks = store.tasks().get();
                if tasks.is_empty() {
                    view! {
                        <div class="empty-state">
                            <h3>"🌟 Ready to be productive?"</h3>
                            <p>"Add your first task above and start achieving your goals!"</p>
                        </div>
                    }.into_any()
                } else {
                    tasks.into_iter().map(task_row).collect_view().into_any()
                }
            }}
        </div>
    }
}
