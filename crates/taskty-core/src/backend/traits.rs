//! Backend Layer - Core Traits
//!
//! The fixed client API the controllers consume. Everything runs on the
//! single browser thread, so futures and callbacks are not `Send`.

use std::rc::Rc;

use async_trait::async_trait;

use super::{Subscription, TaskQuery};
use crate::domain::{BackendError, BackendResult, NewTask, Session, Task, TaskId};

/// Invoked with the new session (or `None`) on every auth transition
pub type SessionCallback = Rc<dyn Fn(Option<Session>)>;
/// Invoked with the full, ordered result set on every change
pub type SnapshotCallback = Rc<dyn Fn(Vec<Task>)>;
/// Invoked when a live subscription fails
pub type ErrorCallback = Rc<dyn Fn(BackendError)>;

/// Federated identity providers offered on the sign-in screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FederatedProvider {
    Google,
}

/// Identity provider operations
#[async_trait(?Send)]
pub trait IdentityBackend {
    /// Create an account with email and password. Signs the new user in.
    async fn create_account(&self, email: &str, password: &str) -> BackendResult<Session>;

    /// Sign in with email and password
    async fn sign_in(&self, email: &str, password: &str) -> BackendResult<Session>;

    /// Sign in through a federated popup
    async fn sign_in_with_popup(&self, provider: FederatedProvider) -> BackendResult<Session>;

    /// Sign out the current user
    async fn sign_out(&self) -> BackendResult<()>;

    /// Send a password-reset email
    async fn send_password_reset(&self, email: &str) -> BackendResult<()>;

    /// Set the display name of the signed-in user's profile
    async fn update_display_name(&self, session: &Session, name: &str) -> BackendResult<Session>;

    /// Subscribe to session transitions. The callback also receives the
    /// current state once the backend has resolved it.
    fn on_session_change(&self, callback: SessionCallback) -> Subscription;
}

/// Document store operations on the tasks collection
#[async_trait(?Send)]
pub trait TaskStore {
    /// Create a task document with a server timestamp
    async fn create_task(&self, task: NewTask) -> BackendResult<TaskId>;

    /// Update the completed flag of a task
    async fn set_completed(&self, id: &TaskId, completed: bool) -> BackendResult<()>;

    /// Permanently delete a task
    async fn delete_task(&self, id: &TaskId) -> BackendResult<()>;

    /// Start a live query. Snapshots are delivered in emission order until
    /// the returned handle is cancelled or dropped.
    fn watch(
        &self,
        query: TaskQuery,
        on_snapshot: SnapshotCallback,
        on_error: ErrorCallback,
    ) -> BackendResult<Subscription>;
}
