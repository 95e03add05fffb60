//! In-Memory Backend
//!
//! Identity provider and task store kept in process memory. Used for the
//! offline demo mode and as the backend of every controller test.
//! Error codes match the Firebase ones so the same mapping applies.

use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;
use std::rc::Rc;

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};

use super::traits::{
    ErrorCallback, FederatedProvider, IdentityBackend, SessionCallback, SnapshotCallback,
    TaskStore,
};
use super::{Subscription, TaskQuery};
use crate::domain::{BackendError, BackendResult, NewTask, Session, Task, TaskId, UserId};

const MIN_PASSWORD_LEN: usize = 6;

struct Account {
    session: Session,
    password: String,
}

struct Watcher {
    query: TaskQuery,
    on_snapshot: SnapshotCallback,
    on_error: ErrorCallback,
}

#[derive(Default)]
struct Inner {
    accounts: RefCell<BTreeMap<String, Account>>,
    federated: RefCell<Option<Session>>,
    current: RefCell<Option<Session>>,
    session_listeners: RefCell<BTreeMap<u64, SessionCallback>>,
    tasks: RefCell<BTreeMap<TaskId, Task>>,
    watchers: RefCell<BTreeMap<u64, Watcher>>,
    next_id: Cell<u64>,
    last_timestamp: Cell<Option<DateTime<Utc>>>,
    fail_next: RefCell<Option<BackendError>>,
    reset_emails: RefCell<Vec<String>>,
    calls: RefCell<Vec<&'static str>>,
}

/// Shared in-memory backend. Clones share state.
#[derive(Clone, Default)]
pub struct MemoryBackend {
    inner: Rc<Inner>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Account returned by `sign_in_with_popup`. Without one the popup
    /// behaves as if the user closed it.
    pub fn with_federated_account(self, email: &str, display_name: Option<&str>) -> Self {
        let session = Session {
            uid: self.next_user_id(),
            email: email.to_string(),
            display_name: display_name.map(str::to_string),
        };
        *self.inner.federated.borrow_mut() = Some(session);
        self
    }

    /// Make the next fallible call fail with `error`
    pub fn fail_next(&self, error: BackendError) {
        *self.inner.fail_next.borrow_mut() = Some(error);
    }

    /// Fail every live task subscription
    pub fn emit_watch_error(&self, error: BackendError) {
        let callbacks: Vec<ErrorCallback> = self
            .inner
            .watchers
            .borrow()
            .values()
            .map(|w| w.on_error.clone())
            .collect();
        for callback in callbacks {
            callback(error.clone());
        }
    }

    /// Number of live task subscriptions
    pub fn active_watchers(&self) -> usize {
        self.inner.watchers.borrow().len()
    }

    /// Number of session-change listeners
    pub fn session_listeners(&self) -> usize {
        self.inner.session_listeners.borrow().len()
    }

    /// Names of the backend operations called so far, in order
    pub fn calls(&self) -> Vec<&'static str> {
        self.inner.calls.borrow().clone()
    }

    pub fn password_reset_emails(&self) -> Vec<String> {
        self.inner.reset_emails.borrow().clone()
    }

    pub fn current_session(&self) -> Option<Session> {
        self.inner.current.borrow().clone()
    }

    /// Every stored task regardless of owner
    pub fn stored_tasks(&self) -> Vec<Task> {
        self.inner.tasks.borrow().values().cloned().collect()
    }

    pub fn task(&self, id: &TaskId) -> Option<Task> {
        self.inner.tasks.borrow().get(id).cloned()
    }

    fn begin(&self, op: &'static str) -> BackendResult<()> {
        self.inner.calls.borrow_mut().push(op);
        match self.inner.fail_next.borrow_mut().take() {
            Some(error) => {
                log::debug!("[memory] injected failure for {op}: {error}");
                Err(error)
            }
            None => Ok(()),
        }
    }

    fn next_seq(&self) -> u64 {
        let id = self.inner.next_id.get() + 1;
        self.inner.next_id.set(id);
        id
    }

    fn next_user_id(&self) -> UserId {
        UserId(format!("user-{}", self.next_seq()))
    }

    /// Strictly increasing across writes
    fn server_timestamp(&self) -> DateTime<Utc> {
        let now = Utc::now();
        let ts = match self.inner.last_timestamp.get() {
            Some(last) if now <= last => last + Duration::milliseconds(1),
            _ => now,
        };
        self.inner.last_timestamp.set(Some(ts));
        ts
    }

    fn set_current(&self, session: Option<Session>) {
        *self.inner.current.borrow_mut() = session.clone();
        let listeners: Vec<SessionCallback> = self
            .inner
            .session_listeners
            .borrow()
            .values()
            .cloned()
            .collect();
        for listener in listeners {
            listener(session.clone());
        }
    }

    fn publish(&self) {
        let watchers: Vec<(TaskQuery, SnapshotCallback)> = self
            .inner
            .watchers
            .borrow()
            .values()
            .map(|w| (w.query.clone(), w.on_snapshot.clone()))
            .collect();
        for (query, on_snapshot) in watchers {
            let snapshot = query.apply(self.inner.tasks.borrow().values());
            on_snapshot(snapshot);
        }
    }

    fn check_email(email: &str) -> BackendResult<()> {
        match email.split_once('@') {
            Some((local, domain)) if !local.is_empty() && domain.contains('.') => Ok(()),
            _ => Err(firebase_error("auth/invalid-email")),
        }
    }
}

fn firebase_error(code: &str) -> BackendError {
    BackendError::new(code, format!("Firebase: Error ({code})."))
}

#[async_trait(?Send)]
impl IdentityBackend for MemoryBackend {
    async fn create_account(&self, email: &str, password: &str) -> BackendResult<Session> {
        self.begin("create_account")?;
        Self::check_email(email)?;
        if password.encode_utf16().count() < MIN_PASSWORD_LEN {
            return Err(firebase_error("auth/weak-password"));
        }
        if self.inner.accounts.borrow().contains_key(email) {
            return Err(firebase_error("auth/email-already-in-use"));
        }

        let session = Session {
            uid: self.next_user_id(),
            email: email.to_string(),
            display_name: None,
        };
        self.inner.accounts.borrow_mut().insert(
            email.to_string(),
            Account {
                session: session.clone(),
                password: password.to_string(),
            },
        );
        log::info!("[memory] created account {}", session.uid);
        self.set_current(Some(session.clone()));
        Ok(session)
    }

    async fn sign_in(&self, email: &str, password: &str) -> BackendResult<Session> {
        self.begin("sign_in")?;
        Self::check_email(email)?;
        let session = {
            let accounts = self.inner.accounts.borrow();
            let account = accounts
                .get(email)
                .ok_or_else(|| firebase_error("auth/user-not-found"))?;
            if account.password != password {
                return Err(firebase_error("auth/wrong-password"));
            }
            account.session.clone()
        };
        self.set_current(Some(session.clone()));
        Ok(session)
    }

    async fn sign_in_with_popup(&self, provider: FederatedProvider) -> BackendResult<Session> {
        self.begin("sign_in_with_popup")?;
        log::debug!("[memory] popup sign-in with {provider:?}");
        let session = self
            .inner
            .federated
            .borrow()
            .clone()
            .ok_or_else(|| firebase_error("auth/popup-closed-by-user"))?;
        self.set_current(Some(session.clone()));
        Ok(session)
    }

    async fn sign_out(&self) -> BackendResult<()> {
        self.begin("sign_out")?;
        self.set_current(None);
        Ok(())
    }

    async fn send_password_reset(&self, email: &str) -> BackendResult<()> {
        self.begin("send_password_reset")?;
        Self::check_email(email)?;
        if !self.inner.accounts.borrow().contains_key(email) {
            return Err(firebase_error("auth/user-not-found"));
        }
        self.inner.reset_emails.borrow_mut().push(email.to_string());
        Ok(())
    }

    async fn update_display_name(&self, session: &Session, name: &str) -> BackendResult<Session> {
        self.begin("update_display_name")?;
        let updated = {
            let mut accounts = self.inner.accounts.borrow_mut();
            let account = accounts
                .values_mut()
                .find(|a| a.session.uid == session.uid)
                .ok_or_else(|| firebase_error("auth/user-not-found"))?;
            account.session.display_name = Some(name.to_string());
            account.session.clone()
        };
        let mut current = self.inner.current.borrow_mut();
        if current.as_ref().map(|s| &s.uid) == Some(&updated.uid) {
            *current = Some(updated.clone());
        }
        Ok(updated)
    }

    fn on_session_change(&self, callback: SessionCallback) -> Subscription {
        let id = self.next_seq();
        self.inner
            .session_listeners
            .borrow_mut()
            .insert(id, callback.clone());

        let current = self.inner.current.borrow().clone();
        callback(current);

        let weak = Rc::downgrade(&self.inner);
        Subscription::new(move || {
            if let Some(inner) = weak.upgrade() {
                inner.session_listeners.borrow_mut().remove(&id);
            }
        })
    }
}

#[async_trait(?Send)]
impl TaskStore for MemoryBackend {
    async fn create_task(&self, task: NewTask) -> BackendResult<TaskId> {
        self.begin("create_task")?;
        let id = TaskId(format!("task-{:06}", self.next_seq()));
        let stored = Task {
            id: id.clone(),
            text: task.text,
            completed: false,
            user_id: task.user_id,
            created_at: Some(self.server_timestamp()),
        };
        self.inner.tasks.borrow_mut().insert(id.clone(), stored);
        self.publish();
        Ok(id)
    }

    async fn set_completed(&self, id: &TaskId, completed: bool) -> BackendResult<()> {
        self.begin("set_completed")?;
        {
            let mut tasks = self.inner.tasks.borrow_mut();
            let task = tasks
                .get_mut(id)
                .ok_or_else(|| BackendError::new("not-found", format!("No document {id}")))?;
            task.completed = completed;
        }
        self.publish();
        Ok(())
    }

    async fn delete_task(&self, id: &TaskId) -> BackendResult<()> {
        self.begin("delete_task")?;
        // Deleting a missing document succeeds, as in Firestore
        self.inner.tasks.borrow_mut().remove(id);
        self.publish();
        Ok(())
    }

    fn watch(
        &self,
        query: TaskQuery,
        on_snapshot: SnapshotCallback,
        on_error: ErrorCallback,
    ) -> BackendResult<Subscription> {
        self.begin("watch")?;
        let id = self.next_seq();
        let initial = query.apply(self.inner.tasks.borrow().values());
        self.inner.watchers.borrow_mut().insert(
            id,
            Watcher {
                query,
                on_snapshot: on_snapshot.clone(),
                on_error,
            },
        );
        on_snapshot(initial);

        let weak = Rc::downgrade(&self.inner);
        Ok(Subscription::new(move || {
            if let Some(inner) = weak.upgrade() {
                inner.watchers.borrow_mut().remove(&id);
            }
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    fn owner() -> UserId {
        UserId::from("u1")
    }

    #[tokio::test]
    async fn test_create_account_error_codes() {
        let backend = MemoryBackend::new();
        let err = backend.create_account("nope", "secret1").await.unwrap_err();
        assert_eq!(err.code(), Some("auth/invalid-email"));

        let err = backend.create_account("a@x.com", "123").await.unwrap_err();
        assert_eq!(err.code(), Some("auth/weak-password"));

        backend.create_account("a@x.com", "secret1").await.unwrap();
        let err = backend.create_account("a@x.com", "secret1").await.unwrap_err();
        assert_eq!(err.code(), Some("auth/email-already-in-use"));
    }

    #[tokio::test]
    async fn test_sign_in_error_codes() {
        let backend = MemoryBackend::new();
        backend.create_account("a@x.com", "secret1").await.unwrap();
        backend.sign_out().await.unwrap();

        let err = backend.sign_in("b@x.com", "secret1").await.unwrap_err();
        assert_eq!(err.code(), Some("auth/user-not-found"));
        let err = backend.sign_in("a@x.com", "wrong!!").await.unwrap_err();
        assert_eq!(err.code(), Some("auth/wrong-password"));

        let session = backend.sign_in("a@x.com", "secret1").await.unwrap();
        assert_eq!(backend.current_session(), Some(session));
    }

    #[tokio::test]
    async fn test_session_listener_receives_transitions() {
        let backend = MemoryBackend::new();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = seen.clone();
        let mut sub = backend.on_session_change(Rc::new(move |s: Option<Session>| {
            sink.borrow_mut().push(s.map(|s| s.email));
        }));

        backend.create_account("a@x.com", "secret1").await.unwrap();
        backend.sign_out().await.unwrap();
        assert_eq!(
            *seen.borrow(),
            vec![None, Some("a@x.com".to_string()), None]
        );

        sub.cancel();
        assert_eq!(backend.session_listeners(), 0);
    }

    #[tokio::test]
    async fn test_watch_pushes_snapshots_until_cancelled() {
        let backend = MemoryBackend::new();
        let sizes = Rc::new(RefCell::new(Vec::new()));
        let sink = sizes.clone();
        let sub = backend
            .watch(
                TaskQuery::task_list(owner(), 100),
                Rc::new(move |tasks: Vec<Task>| sink.borrow_mut().push(tasks.len())),
                Rc::new(|_: BackendError| {}),
            )
            .unwrap();

        let id = backend
            .create_task(NewTask::new("one", owner()).unwrap())
            .await
            .unwrap();
        backend
            .create_task(NewTask::new("other", UserId::from("u2")).unwrap())
            .await
            .unwrap();
        backend.set_completed(&id, true).await.unwrap();
        assert!(backend.task(&id).unwrap().completed);

        drop(sub);
        assert_eq!(backend.active_watchers(), 0);
        backend.delete_task(&id).await.unwrap();

        assert_eq!(*sizes.borrow(), vec![0, 1, 1, 1]);
    }

    #[tokio::test]
    async fn test_timestamps_strictly_increase() {
        let backend = MemoryBackend::new();
        for i in 0..5 {
            backend
                .create_task(NewTask::new(&format!("t{i}"), owner()).unwrap())
                .await
                .unwrap();
        }
        let mut stamps: Vec<_> = backend
            .stored_tasks()
            .into_iter()
            .filter_map(|t| t.created_at)
            .collect();
        let sorted = {
            let mut s = stamps.clone();
            s.sort();
            s.dedup();
            s
        };
        stamps.sort();
        assert_eq!(stamps, sorted);
        assert_eq!(stamps.len(), 5);
    }

    #[tokio::test]
    async fn test_fail_next_is_consumed_once() {
        let backend = MemoryBackend::new();
        backend.fail_next(BackendError::with_code("auth/network-request-failed"));
        assert!(backend.sign_out().await.is_err());
        assert!(backend.sign_out().await.is_ok());
        assert_eq!(backend.calls(), vec!["sign_out", "sign_out"]);
    }

    #[tokio::test]
    async fn test_popup_without_federated_account_is_closed() {
        let backend = MemoryBackend::new();
        let err = backend
            .sign_in_with_popup(FederatedProvider::Google)
            .await
            .unwrap_err();
        assert_eq!(err.code(), Some("auth/popup-closed-by-user"));

        let backend = MemoryBackend::new().with_federated_account("g@x.com", Some("Gee"));
        let session = backend
            .sign_in_with_popup(FederatedProvider::Google)
            .await
            .unwrap();
        assert_eq!(session.greeting_name(), "Gee");
    }
}
