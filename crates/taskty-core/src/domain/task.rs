//! Task Entity
//!
//! A single to-do item owned by one user.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::session::UserId;

/// Opaque, backend-assigned task identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(pub String);

impl TaskId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TaskId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// A task as last pushed by a live subscription
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: TaskId,
    pub text: String,
    pub completed: bool,
    pub user_id: UserId,
    /// Server-assigned; `None` while a local write has not been acknowledged
    pub created_at: Option<DateTime<Utc>>,
}

impl Task {
    /// Creation date for report listings
    pub fn created_label(&self) -> String {
        match self.created_at {
            Some(ts) => ts.format("%b %-d, %Y").to_string(),
            None => "Unknown date".to_string(),
        }
    }
}

/// Payload for a task the backend has not stored yet.
/// The creation timestamp is always assigned server-side.
#[derive(Debug, Clone, PartialEq)]
pub struct NewTask {
    pub text: String,
    pub user_id: UserId,
}

impl NewTask {
    /// Trims the text; `None` when nothing is left.
    pub fn new(text: &str, user_id: UserId) -> Option<Self> {
        let text = text.trim();
        if text.is_empty() {
            return None;
        }
        Some(Self {
            text: text.to_string(),
            user_id,
        })
    }
}
