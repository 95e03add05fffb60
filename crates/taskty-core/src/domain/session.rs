//! User Session
//!
//! The signed-in identity and the shared handle both controllers read it from.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use serde::{Deserialize, Serialize};

/// Backend-assigned user identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(pub String);

impl UserId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for UserId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// Authenticated identity of the current user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub uid: UserId,
    pub email: String,
    pub display_name: Option<String>,
}

impl Session {
    /// Name shown in the app header: display name, else the local part of the email
    pub fn greeting_name(&self) -> &str {
        match self.display_name.as_deref() {
            Some(name) if !name.trim().is_empty() => name,
            _ => self.email.split('@').next().unwrap_or_default(),
        }
    }
}

/// Process-wide session state.
///
/// Created once at bootstrap, written by the authentication controller on
/// every backend transition and read by the task controller.
#[derive(Debug, Clone, Default)]
pub struct SessionState {
    inner: Rc<RefCell<Option<Session>>>,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Option<Session> {
        self.inner.borrow().clone()
    }

    pub fn is_signed_in(&self) -> bool {
        self.inner.borrow().is_some()
    }

    pub fn set(&self, session: Option<Session>) {
        *self.inner.borrow_mut() = session;
    }

    pub fn clear(&self) {
        self.set(None);
    }
}
