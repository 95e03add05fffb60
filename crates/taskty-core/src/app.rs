//! Application Bootstrap
//!
//! Wires the authentication controller's session transitions to the view
//! and the task controller.

use std::rc::Rc;

use crate::backend::{IdentityBackend, TaskStore};
use crate::config::AppConfig;
use crate::controllers::{AuthController, TaskController};
use crate::domain::{Session, SessionState};
use crate::view::View;

/// The running application: both controllers sharing one session state
pub struct Taskty<I, S, V> {
    pub auth: Rc<AuthController<I, V>>,
    pub tasks: Rc<TaskController<S, V>>,
    session: SessionState,
    view: Rc<V>,
}

impl<I, S, V> Taskty<I, S, V>
where
    I: IdentityBackend + 'static,
    S: TaskStore + 'static,
    V: View + 'static,
{
    pub fn new(identity: Rc<I>, store: Rc<S>, view: Rc<V>, config: &AppConfig) -> Self {
        let session = SessionState::new();
        let auth = AuthController::new(identity, view.clone(), session.clone());
        let tasks = TaskController::new(store, view.clone(), session.clone())
            .with_list_limit(config.list_limit);
        Self {
            auth: Rc::new(auth),
            tasks: Rc::new(tasks),
            session,
            view,
        }
    }

    /// Register the session listener. Each transition shows the app view and
    /// hands the session to the task controller, or shows the auth view and
    /// tears the task controller down.
    pub fn start(&self) {
        let view = self.view.clone();
        let tasks = self.tasks.clone();
        self.auth.initialize(move |session: Option<Session>| match session {
            Some(session) => {
                view.show_app(&session);
                tasks.set_session(Some(session));
            }
            None => {
                view.show_auth();
                tasks.set_session(None);
            }
        });
    }

    pub fn session(&self) -> Option<Session> {
        self.session.current()
    }
}
