//! Global UI State Store
//!
//! Everything the controllers push through the `View` port lands here.
//! Components read it with field-level reactivity.

use std::collections::BTreeMap;

use leptos::prelude::*;
use reactive_stores::Store;
use taskty_core::domain::{Task, TaskStats};
use taskty_core::{ButtonId, MessageKind, ReportView};

/// A transient message in the banner
#[derive(Clone, Debug, PartialEq)]
pub struct Banner {
    pub text: String,
    pub kind: MessageKind,
}

#[derive(Clone, Debug, Default, Store)]
pub struct UiState {
    /// Authenticated view is shown
    pub signed_in: bool,
    /// Name in the header greeting
    pub greeting: String,
    pub message: Option<Banner>,
    /// Bumped per message so a stale timeout leaves a newer one alone
    pub message_seq: u64,
    pub tasks: Vec<Task>,
    pub stats: TaskStats,
    /// Buttons in loading state with their loading label
    pub busy: BTreeMap<ButtonId, String>,
    pub auth_name: String,
    pub auth_email: String,
    pub auth_password: String,
    pub task_input: String,
    /// Report overlay has been opened at least once
    pub report_created: bool,
    pub report_open: bool,
    pub report: Option<ReportView>,
    /// Header button that opens the report
    pub report_control: bool,
}

pub type UiStore = Store<UiState>;

/// Get the UI store from context
pub fn use_ui_store() -> UiStore {
    expect_context::<UiStore>()
}

/// Loading label of `button`, if it is busy
pub fn busy_label(store: &UiStore, button: ButtonId) -> Option<String> {
    store.busy().read().get(&button).cloned()
}
