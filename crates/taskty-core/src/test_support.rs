//! Recording view for controller tests

use std::cell::{Cell, RefCell};

use crate::domain::{Session, Task, TaskStats};
use crate::view::{ButtonId, MessageKind, ReportView, View};

#[derive(Debug, Clone, PartialEq)]
pub enum ViewEvent {
    ShowApp(String),
    ShowAuth,
    Message(String, MessageKind),
    Loading(ButtonId, String, bool),
    ClearAuthInputs,
    ClearTaskInput,
    RenderTasks(Vec<Task>, TaskStats),
    ShowReport,
    HideReport,
    Report(ReportView),
    ReportControl(bool),
    Confirm(String),
}

pub struct RecordingView {
    events: RefCell<Vec<ViewEvent>>,
    confirm_answer: Cell<bool>,
}

impl RecordingView {
    pub fn new() -> Self {
        Self {
            events: RefCell::new(Vec::new()),
            confirm_answer: Cell::new(true),
        }
    }

    pub fn answer_confirm(&self, answer: bool) {
        self.confirm_answer.set(answer);
    }

    pub fn events(&self) -> Vec<ViewEvent> {
        self.events.borrow().clone()
    }

    pub fn messages(&self) -> Vec<(String, MessageKind)> {
        self.events
            .borrow()
            .iter()
            .filter_map(|e| match e {
                ViewEvent::Message(text, kind) => Some((text.clone(), *kind)),
                _ => None,
            })
            .collect()
    }

    pub fn last_message(&self) -> Option<(String, MessageKind)> {
        self.messages().pop()
    }

    pub fn loading_events(&self) -> Vec<(ButtonId, String, bool)> {
        self.events
            .borrow()
            .iter()
            .filter_map(|e| match e {
                ViewEvent::Loading(id, label, on) => Some((*id, label.clone(), *on)),
                _ => None,
            })
            .collect()
    }

    pub fn last_render(&self) -> Option<(Vec<Task>, TaskStats)> {
        self.events.borrow().iter().rev().find_map(|e| match e {
            ViewEvent::RenderTasks(tasks, stats) => Some((tasks.clone(), *stats)),
            _ => None,
        })
    }

    pub fn last_report(&self) -> Option<ReportView> {
        self.events.borrow().iter().rev().find_map(|e| match e {
            ViewEvent::Report(report) => Some(report.clone()),
            _ => None,
        })
    }

    fn push(&self, event: ViewEvent) {
        self.events.borrow_mut().push(event);
    }
}

impl View for RecordingView {
    fn show_app(&self, session: &Session) {
        self.push(ViewEvent::ShowApp(session.greeting_name().to_string()));
    }

    fn show_auth(&self) {
        self.push(ViewEvent::ShowAuth);
    }

    fn show_message(&self, message: &str, kind: MessageKind) {
        self.push(ViewEvent::Message(message.to_string(), kind));
    }

    fn set_button_loading(&self, button: ButtonId, label: &str, loading: bool) {
        self.push(ViewEvent::Loading(button, label.to_string(), loading));
    }

    fn clear_auth_inputs(&self) {
        self.push(ViewEvent::ClearAuthInputs);
    }

    fn clear_task_input(&self) {
        self.push(ViewEvent::ClearTaskInput);
    }

    fn render_tasks(&self, tasks: &[Task], stats: &TaskStats) {
        self.push(ViewEvent::RenderTasks(tasks.to_vec(), *stats));
    }

    fn show_report(&self) {
        self.push(ViewEvent::ShowReport);
    }

    fn hide_report(&self) {
        self.push(ViewEvent::HideReport);
    }

    fn update_report(&self, report: ReportView) {
        self.push(ViewEvent::Report(report));
    }

    fn set_report_control(&self, visible: bool) {
        self.push(ViewEvent::ReportControl(visible));
    }

    fn confirm(&self, prompt: &str) -> bool {
        self.push(ViewEvent::Confirm(prompt.to_string()));
        self.confirm_answer.get()
    }
}
