//! Report Modal Component
//!
//! Overlay with task statistics and every task of the user. Created the
//! first time a report is requested, then shown and hidden. Closes on the
//! close button or a click on the backdrop.

use leptos::prelude::*;
use taskty_core::domain::{Report, ReportEntry};
use taskty_core::ReportView;

use crate::context::use_app_context;
use crate::store::{use_ui_store, UiStateStoreFields};

fn stat(value: String, label: &'static str) -> impl IntoView {
    view! {
        <div class="stat-item">
            <span class="stat-number">{value}</span>
            <span class="stat-label">{label}</span>
        </div>
    }
}

fn entry_row(entry: ReportEntry) -> impl IntoView {
    let state = if entry.completed { "completed" } else { "pending" };
    view! {
        <div class=format!("report-task-item {}", state)>
            <span class="task-status">{entry.status_icon()}</span>
            <span class="task-text">{entry.text}</span>
            <span class="task-date">{entry.created}</span>
        </div>
    }
}

fn report_body(report: Report) -> impl IntoView {
    let stats = report.stats;
    let entries = if report.is_empty() {
        view! {
            <div class="report-empty">
                <p>{Report::EMPTY_PLACEHOLDER}</p>
            </div>
        }.into_any()
    } else {
        view! {
            <div class="report-tasks">
                <h4>"📝 All Tasks"</h4>
                <div class="report-task-list">
                    {report.entries.into_iter().map(entry_row).collect_view()}
                </div>
            </div>
        }.into_any()
    };

    view! {
        <div class="report-stats">
            <h3>"📈 Task Statistics"</h3>
            <div class="stats-grid">
                {stat(stats.total.to_string(), "Total Tasks")}
                {stat(stats.completed.to_string(), "Completed")}
                {stat(stats.pending.to_string(), "Pending")}
                {stat(format!("{}%", stats.rounded_rate()), "Completion Rate")}
            </div>
        </div>
        {entries}
    }
}

#[component]
pub fn ReportModal() -> impl IntoView {
    let ctx = use_app_context();
    let store = use_ui_store();
    let close = move || ctx.tasks().close_report();

    view! {
        <Show when=move || store.report_created().get()>
            <div
                class=move || if store.report_open().get() { "report-modal" } else { "report-modal hidden" }
                on:click=move |ev: web_sys::MouseEvent| {
                    if ev.target().is_some() && ev.target() == ev.current_target() {
                        close();
                    }
                }
            >
                <div class="report-modal-content">
                    <div class="report-header">
                        <h2>"📊 Task Report"</h2>
                        <button class="btn btn-secondary btn-small" on:click=move |_| close()>
                            "✕ Close"
                        </button>
                    </div>
                    <div class="report-body">
                        {move || match store.report().get() {
                            Some(ReportView::Ready(report)) => report_body(report).into_any(),
                            _ => view! { <p>{ReportView::LOADING_TEXT}</p> }.into_any(),
                        }}
                    </div>
                </div>
            </div>
        </Show>
    }
}
