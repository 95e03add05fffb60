//! Presentation Port
//!
//! What the controllers need from the UI. The Leptos frontend implements it
//! with signals; tests implement it with a recorder.

use crate::domain::{Report, Session, Task, TaskStats};

/// Buttons that show a loading state while their action runs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ButtonId {
    Register,
    Login,
    GoogleLogin,
    AddTask,
}

/// Styling of a transient message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MessageKind {
    #[default]
    Error,
    Success,
}

impl MessageKind {
    pub fn css_class(&self) -> &'static str {
        match self {
            MessageKind::Error => "error",
            MessageKind::Success => "success",
        }
    }
}

/// Body of the report overlay
#[derive(Debug, Clone, PartialEq)]
pub enum ReportView {
    Loading,
    Ready(Report),
}

impl ReportView {
    pub const LOADING_TEXT: &'static str = "📊 Loading report...";
}

pub trait View {
    /// Authenticated view for `session`; hides the report overlay
    fn show_app(&self, session: &Session);

    /// Sign-in view; hides the report overlay
    fn show_auth(&self);

    /// Transient message, cleared after the configured timeout
    fn show_message(&self, message: &str, kind: MessageKind);

    /// Loading (`loading = true`, showing `label`) or idle state of a button
    fn set_button_loading(&self, button: ButtonId, label: &str, loading: bool);

    fn clear_auth_inputs(&self);

    fn clear_task_input(&self);

    /// Replace the task list and its counter
    fn render_tasks(&self, tasks: &[Task], stats: &TaskStats);

    /// Open the report overlay, creating it on first use
    fn show_report(&self);

    fn hide_report(&self);

    fn update_report(&self, report: ReportView);

    /// Add or remove the control that opens the report
    fn set_report_control(&self, visible: bool);

    /// Ask the user to confirm a destructive action
    fn confirm(&self, prompt: &str) -> bool;
}
