//! Task Controller
//!
//! CRUD on the signed-in user's tasks plus the two live subscriptions:
//! the capped task list and the uncapped report.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use super::action::TaskAction;
use crate::backend::{ErrorCallback, SnapshotCallback, Subscription, TaskQuery, TaskStore};
use crate::domain::{
    BackendError, NewTask, Report, Session, SessionState, Task, TaskId, TaskStats,
};
use crate::view::{ButtonId, MessageKind, ReportView, View};

pub const DEFAULT_LIST_LIMIT: usize = 100;

const ADD_LOADING: &str = "⏳ Adding...";
const CONFIRM_DELETE: &str = "Are you sure you want to delete this task?";

const ADD_FAILED: &str = "Failed to add task. Please try again.";
const UPDATE_FAILED: &str = "Failed to update task. Please try again.";
const DELETE_FAILED: &str = "Failed to delete task. Please try again.";
const LOAD_FAILED: &str = "Failed to load tasks. Please refresh the page.";
const REPORT_FAILED: &str = "Failed to generate report.";
const REPORT_LISTEN_FAILED: &str = "Failed to listen for report updates.";
const SIGN_IN_FOR_REPORT: &str = "Please sign in to view your report.";

pub struct TaskController<S, V> {
    store: Rc<S>,
    view: Rc<V>,
    session: SessionState,
    list_limit: usize,
    task_subscription: RefCell<Option<Subscription>>,
    report_subscription: RefCell<Option<Subscription>>,
    /// Latest list snapshot; used by the bulk operations
    latest: Rc<RefCell<Vec<Task>>>,
    report_control: Cell<bool>,
}

impl<S, V> TaskController<S, V>
where
    S: TaskStore + 'static,
    V: View + 'static,
{
    pub fn new(store: Rc<S>, view: Rc<V>, session: SessionState) -> Self {
        Self {
            store,
            view,
            session,
            list_limit: DEFAULT_LIST_LIMIT,
            task_subscription: RefCell::new(None),
            report_subscription: RefCell::new(None),
            latest: Rc::new(RefCell::new(Vec::new())),
            report_control: Cell::new(false),
        }
    }

    pub fn with_list_limit(mut self, limit: usize) -> Self {
        self.list_limit = limit;
        self
    }

    /// Start listening for `Some`, tear everything down for `None`.
    /// A switch to another user also drops the previous user's report.
    pub fn set_session(&self, session: Option<Session>) {
        let signed_in = session.is_some();
        let previous = self.session.current().map(|s| s.uid);
        let switched = match (&previous, &session) {
            (Some(old), Some(new)) => *old != new.uid,
            _ => false,
        };
        self.session.set(session);
        if switched {
            self.close_report();
        }
        if signed_in {
            self.load_tasks();
            self.set_report_control(true);
        } else {
            self.stop_listening();
            self.latest.borrow_mut().clear();
            self.set_report_control(false);
        }
    }

    pub fn has_task_subscription(&self) -> bool {
        self.task_subscription
            .borrow()
            .as_ref()
            .is_some_and(Subscription::is_active)
    }

    pub fn has_report_subscription(&self) -> bool {
        self.report_subscription
            .borrow()
            .as_ref()
            .is_some_and(Subscription::is_active)
    }

    pub fn report_control_visible(&self) -> bool {
        self.report_control.get()
    }

    /// Tasks of the most recent list push
    pub fn latest_tasks(&self) -> Vec<Task> {
        self.latest.borrow().clone()
    }

    /// Empty or whitespace text and signed-out state are ignored.
    /// The input is cleared whether or not the write succeeds.
    pub async fn add_task(&self, text: &str) {
        let Some(session) = self.session.current() else {
            return;
        };
        let Some(task) = NewTask::new(text, session.uid) else {
            return;
        };

        self.view.set_button_loading(ButtonId::AddTask, ADD_LOADING, true);
        match self.store.create_task(task).await {
            Ok(id) => log::debug!("[tasks] created {id}"),
            Err(err) => {
                log::error!("[tasks] create failed: {err}");
                self.view.show_message(ADD_FAILED, MessageKind::Error);
            }
        }
        self.view.clear_task_input();
        self.view.set_button_loading(ButtonId::AddTask, ADD_LOADING, false);
    }

    /// `previous_completed` comes from the rendered snapshot
    pub async fn toggle_task(&self, id: &TaskId, previous_completed: bool) {
        if !self.session.is_signed_in() {
            return;
        }
        if let Err(err) = self.store.set_completed(id, !previous_completed).await {
            log::error!("[tasks] update of {id} failed: {err}");
            self.view.show_message(UPDATE_FAILED, MessageKind::Error);
        }
    }

    pub async fn delete_task(&self, id: &TaskId) {
        if !self.session.is_signed_in() {
            return;
        }
        if !self.view.confirm(CONFIRM_DELETE) {
            return;
        }
        if let Err(err) = self.store.delete_task(id).await {
            log::error!("[tasks] delete of {id} failed: {err}");
            self.view.show_message(DELETE_FAILED, MessageKind::Error);
        }
    }

    /// Run an action parsed from the rendered list
    pub async fn dispatch(&self, action: TaskAction) {
        match action {
            TaskAction::Toggle { id, completed } => self.toggle_task(&id, completed).await,
            TaskAction::Delete { id } => self.delete_task(&id).await,
        }
    }

    /// (Re)start the task-list subscription for the current session
    pub fn load_tasks(&self) {
        let Some(session) = self.session.current() else {
            return;
        };
        self.cancel_task_subscription();

        let view = self.view.clone();
        let latest = self.latest.clone();
        let on_snapshot: SnapshotCallback = Rc::new(move |tasks: Vec<Task>| {
            let stats = TaskStats::from_tasks(&tasks);
            view.render_tasks(&tasks, &stats);
            *latest.borrow_mut() = tasks;
        });
        let view = self.view.clone();
        let on_error: ErrorCallback = Rc::new(move |err: BackendError| {
            log::error!("[tasks] task subscription failed: {err}");
            view.show_message(LOAD_FAILED, MessageKind::Error);
        });

        let query = TaskQuery::task_list(session.uid, self.list_limit);
        match self.store.watch(query, on_snapshot, on_error) {
            Ok(subscription) => *self.task_subscription.borrow_mut() = Some(subscription),
            Err(err) => {
                log::error!("[tasks] could not start task subscription: {err}");
                self.view.show_message(LOAD_FAILED, MessageKind::Error);
            }
        }
    }

    /// Open the report overlay and keep it in sync with every task of the
    /// session, without the list cap
    pub fn generate_report(&self) {
        let Some(session) = self.session.current() else {
            self.view.show_message(SIGN_IN_FOR_REPORT, MessageKind::Error);
            return;
        };

        self.view.show_report();
        self.view.update_report(ReportView::Loading);
        self.cancel_report_subscription();

        let view = self.view.clone();
        let on_snapshot: SnapshotCallback = Rc::new(move |tasks: Vec<Task>| {
            view.update_report(ReportView::Ready(Report::from_tasks(&tasks)));
        });
        let view = self.view.clone();
        let on_error: ErrorCallback = Rc::new(move |err: BackendError| {
            log::error!("[tasks] report subscription failed: {err}");
            view.show_message(REPORT_LISTEN_FAILED, MessageKind::Error);
        });

        match self
            .store
            .watch(TaskQuery::report(session.uid), on_snapshot, on_error)
        {
            Ok(subscription) => *self.report_subscription.borrow_mut() = Some(subscription),
            Err(err) => {
                log::error!("[tasks] could not start report subscription: {err}");
                self.view.show_message(REPORT_FAILED, MessageKind::Error);
            }
        }
    }

    /// Hide the report overlay and stop following it
    pub fn close_report(&self) {
        self.cancel_report_subscription();
        self.view.hide_report();
    }

    /// Cancel both subscriptions
    pub fn stop_listening(&self) {
        self.cancel_task_subscription();
        self.cancel_report_subscription();
    }

    /// Delete every completed task of the latest snapshot after one
    /// confirmation. Stops at the first failure.
    pub async fn clear_completed(&self) {
        if !self.session.is_signed_in() {
            return;
        }
        let ids: Vec<TaskId> = self
            .latest
            .borrow()
            .iter()
            .filter(|t| t.completed)
            .map(|t| t.id.clone())
            .collect();
        if ids.is_empty() {
            return;
        }
        let prompt = format!("Delete {} completed task(s)?", ids.len());
        if !self.view.confirm(&prompt) {
            return;
        }

        for id in &ids {
            if let Err(err) = self.store.delete_task(id).await {
                log::error!("[tasks] bulk delete stopped at {id}: {err}");
                self.view.show_message(DELETE_FAILED, MessageKind::Error);
                return;
            }
        }
        log::info!("[tasks] cleared {} completed tasks", ids.len());
    }

    /// Mark every task of the latest snapshot done (or not done)
    pub async fn set_all_completed(&self, completed: bool) {
        if !self.session.is_signed_in() {
            return;
        }
        let ids: Vec<TaskId> = self
            .latest
            .borrow()
            .iter()
            .filter(|t| t.completed != completed)
            .map(|t| t.id.clone())
            .collect();

        for id in &ids {
            if let Err(err) = self.store.set_completed(id, completed).await {
                log::error!("[tasks] bulk update stopped at {id}: {err}");
                self.view.show_message(UPDATE_FAILED, MessageKind::Error);
                return;
            }
        }
    }

    fn cancel_task_subscription(&self) {
        let previous = self.task_subscription.borrow_mut().take();
        if let Some(mut subscription) = previous {
            subscription.cancel();
        }
    }

    fn cancel_report_subscription(&self) {
        let previous = self.report_subscription.borrow_mut().take();
        if let Some(mut subscription) = previous {
            subscription.cancel();
        }
    }

    fn set_report_control(&self, visible: bool) {
        self.report_control.set(visible);
        self.view.set_report_control(visible);
    }
}
