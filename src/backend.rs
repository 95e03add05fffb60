//! Backend Selection
//!
//! The configured backend behind both controller seams.

use async_trait::async_trait;
use taskty_core::backend::{
    ErrorCallback, FederatedProvider, IdentityBackend, MemoryBackend, SessionCallback,
    SnapshotCallback, Subscription, TaskQuery, TaskStore,
};
use taskty_core::domain::{BackendResult, NewTask, Session, TaskId};
use taskty_core::{AppConfig, BackendConfig};

use crate::firebase::FirebaseBackend;

const DEMO_EMAIL: &str = "demo@taskty.app";
const DEMO_NAME: &str = "Demo User";

#[derive(Clone)]
pub enum Backend {
    Firebase(FirebaseBackend),
    Memory(MemoryBackend),
}

impl Backend {
    pub fn from_config(config: &AppConfig) -> BackendResult<Self> {
        match &config.backend {
            BackendConfig::Firebase(firebase) => Ok(Backend::Firebase(
                FirebaseBackend::initialize(firebase, &config.tasks_collection)?,
            )),
            BackendConfig::Memory => Ok(Self::demo()),
        }
    }

    /// Offline backend; "Continue with Google" signs in a demo account
    pub fn demo() -> Self {
        log::info!("[backend] using in-memory demo backend");
        Backend::Memory(MemoryBackend::new().with_federated_account(DEMO_EMAIL, Some(DEMO_NAME)))
    }
}

#[async_trait(?Send)]
impl IdentityBackend for Backend {
    async fn create_account(&self, email: &str, password: &str) -> BackendResult<Session> {
        match self {
            Backend::Firebase(b) => b.create_account(email, password).await,
            Backend::Memory(b) => b.create_account(email, password).await,
        }
    }

    async fn sign_in(&self, email: &str, password: &str) -> BackendResult<Session> {
        match self {
            Backend::Firebase(b) => b.sign_in(email, password).await,
            Backend::Memory(b) => b.sign_in(email, password).await,
        }
    }

    async fn sign_in_with_popup(&self, provider: FederatedProvider) -> BackendResult<Session> {
        match self {
            Backend::Firebase(b) => b.sign_in_with_popup(provider).await,
            Backend::Memory(b) => b.sign_in_with_popup(provider).await,
        }
    }

    async fn sign_out(&self) -> BackendResult<()> {
        match self {
            Backend::Firebase(b) => b.sign_out().await,
            Backend::Memory(b) => b.sign_out().await,
        }
    }

    async fn send_password_reset(&self, email: &str) -> BackendResult<()> {
        match self {
            Backend::Firebase(b) => b.send_password_reset(email).await,
            Backend::Memory(b) => b.send_password_reset(email).await,
        }
    }

    async fn update_display_name(&self, session: &Session, name: &str) -> BackendResult<Session> {
        match self {
            Backend::Firebase(b) => b.update_display_name(session, name).await,
            Backend::Memory(b) => b.update_display_name(session, name).await,
        }
    }

    fn on_session_change(&self, callback: SessionCallback) -> Subscription {
        match self {
            Backend::Firebase(b) => b.on_session_change(callback),
            Backend::Memory(b) => b.on_session_change(callback),
        }
    }
}

#[async_trait(?Send)]
impl TaskStore for Backend {
    async fn create_task(&self, task: NewTask) -> BackendResult<TaskId> {
        match self {
            Backend::Firebase(b) => b.create_task(task).await,
            Backend::Memory(b) => b.create_task(task).await,
        }
    }

    async fn set_completed(&self, id: &TaskId, completed: bool) -> BackendResult<()> {
        match self {
            Backend::Firebase(b) => b.set_completed(id, completed).await,
            Backend::Memory(b) => b.set_completed(id, completed).await,
        }
    }

    async fn delete_task(&self, id: &TaskId) -> BackendResult<()> {
        match self {
            Backend::Firebase(b) => b.delete_task(id).await,
            Backend::Memory(b) => b.delete_task(id).await,
        }
    }

    fn watch(
        &self,
        query: TaskQuery,
        on_next: SnapshotCallback,
        on_error: ErrorCallback,
    ) -> BackendResult<Subscription> {
        match self {
            Backend::Firebase(b) => b.watch(query, on_next, on_error),
            Backend::Memory(b) => b.watch(query, on_next, on_error),
        }
    }
}
