//! Leptos View
//!
//! Implements the controllers' `View` port by writing to the UI store.

use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;
use taskty_core::domain::{Session, Task, TaskStats};
use taskty_core::{ButtonId, MessageKind, ReportView, View};

use crate::store::{Banner, UiStore, UiStateStoreFields};

#[derive(Clone, Copy)]
pub struct LeptosView {
    store: UiStore,
    message_timeout_ms: u32,
}

impl LeptosView {
    pub fn new(store: UiStore, message_timeout_ms: u32) -> Self {
        Self {
            store,
            message_timeout_ms,
        }
    }
}

impl View for LeptosView {
    fn show_app(&self, session: &Session) {
        self.store.greeting().set(session.greeting_name().to_string());
        self.store.signed_in().set(true);
        self.store.report_open().set(false);
    }

    fn show_auth(&self) {
        self.store.signed_in().set(false);
        self.store.greeting().set(String::new());
        self.store.tasks().set(Vec::new());
        self.store.stats().set(TaskStats::default());
        self.store.report_open().set(false);
    }

    fn show_message(&self, message: &str, kind: MessageKind) {
        let store = self.store;
        let seq = store.message_seq().get_untracked() + 1;
        store.message_seq().set(seq);
        store.message().set(Some(Banner {
            text: message.to_string(),
            kind,
        }));

        let timeout = self.message_timeout_ms;
        spawn_local(async move {
            TimeoutFuture::new(timeout).await;
            if store.message_seq().get_untracked() == seq {
                store.message().set(None);
            }
        });
    }

    fn set_button_loading(&self, button: ButtonId, label: &str, loading: bool) {
        self.store.busy().update(|busy| {
            if loading {
                busy.insert(button, label.to_string());
            } else {
                busy.remove(&button);
            }
        });
    }

    fn clear_auth_inputs(&self) {
        self.store.auth_name().set(String::new());
        self.store.auth_email().set(String::new());
        self.store.auth_password().set(String::new());
    }

    fn clear_task_input(&self) {
        self.store.task_input().set(String::new());
    }

    fn render_tasks(&self, tasks: &[Task], stats: &TaskStats) {
        self.store.tasks().set(tasks.to_vec());
        self.store.stats().set(*stats);
    }

    fn show_report(&self) {
        self.store.report_created().set(true);
        self.store.report_open().set(true);
    }

    fn hide_report(&self) {
        self.store.report_open().set(false);
    }

    fn update_report(&self, report: ReportView) {
        self.store.report().set(Some(report));
    }

    fn set_report_control(&self, visible: bool) {
        self.store.report_control().set(visible);
    }

    fn confirm(&self, prompt: &str) -> bool {
        web_sys::window()
            .and_then(|window| window.confirm_with_message(prompt).ok())
            .unwrap_or(false)
    }
}
