//! Task List Actions
//!
//! Buttons in the rendered task list carry their action in data attributes.
//! A single delegated click handler parses them back into a `TaskAction`.

use crate::domain::TaskId;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskAction {
    /// Flip `completed` (the value as rendered)
    Toggle { id: TaskId, completed: bool },
    Delete { id: TaskId },
}

impl TaskAction {
    pub const ACTION_ATTR: &'static str = "data-action";
    pub const TASK_ID_ATTR: &'static str = "data-task-id";
    pub const COMPLETED_ATTR: &'static str = "data-completed";

    /// Value of the `data-action` attribute
    pub fn tag(&self) -> &'static str {
        match self {
            TaskAction::Toggle { .. } => "toggle",
            TaskAction::Delete { .. } => "delete",
        }
    }

    /// Data attributes of the rendered button, in the order
    /// action, task id, completed flag
    pub fn attributes(&self) -> [(&'static str, String); 3] {
        let completed = match self {
            TaskAction::Toggle { completed, .. } => completed.to_string(),
            TaskAction::Delete { .. } => String::new(),
        };
        [
            (Self::ACTION_ATTR, self.tag().to_string()),
            (Self::TASK_ID_ATTR, self.task_id().to_string()),
            (Self::COMPLETED_ATTR, completed),
        ]
    }

    pub fn task_id(&self) -> &TaskId {
        match self {
            TaskAction::Toggle { id, .. } | TaskAction::Delete { id } => id,
        }
    }

    /// Parse the attributes of a clicked button.
    /// Unknown tags and missing ids yield `None`.
    pub fn from_attributes(
        action: Option<&str>,
        task_id: Option<&str>,
        completed: Option<&str>,
    ) -> Option<Self> {
        let id = TaskId::from(task_id.filter(|id| !id.is_empty())?);
        match action? {
            "toggle" => Some(TaskAction::Toggle {
                id,
                completed: completed == Some("true"),
            }),
            "delete" => Some(TaskAction::Delete { id }),
            other => {
                log::debug!("[tasks] ignoring unknown action {other:?}");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_toggle() {
        let action = TaskAction::from_attributes(Some("toggle"), Some("t1"), Some("true"));
        assert_eq!(
            action,
            Some(TaskAction::Toggle {
                id: TaskId::from("t1"),
                completed: true
            })
        );
        let action = TaskAction::from_attributes(Some("toggle"), Some("t1"), None).unwrap();
        assert_eq!(action.tag(), "toggle");
        assert_eq!(
            action,
            TaskAction::Toggle {
                id: TaskId::from("t1"),
                completed: false
            }
        );
    }

    #[test]
    fn test_parse_delete() {
        let action = TaskAction::from_attributes(Some("delete"), Some("t9"), None).unwrap();
        assert_eq!(action.task_id().as_str(), "t9");
        assert_eq!(action.tag(), "delete");
    }

    #[test]
    fn test_rendered_attributes_parse_back() {
        let actions = [
            TaskAction::Toggle { id: TaskId::from("t1"), completed: true },
            TaskAction::Toggle { id: TaskId::from("t2"), completed: false },
            TaskAction::Delete { id: TaskId::from("t3") },
        ];
        for action in actions {
            let attrs = action.attributes();
            let get = |name: &str| {
                attrs.iter().find(|(key, _)| *key == name).map(|(_, value)| value.as_str())
            };
            let parsed = TaskAction::from_attributes(
                get(TaskAction::ACTION_ATTR),
                get(TaskAction::TASK_ID_ATTR),
                get(TaskAction::COMPLETED_ATTR),
            );
            assert_eq!(parsed, Some(action));
        }
    }

    #[test]
    fn test_reject_incomplete_attributes() {
        assert!(TaskAction::from_attributes(Some("archive"), Some("t1"), None).is_none());
        assert!(TaskAction::from_attributes(Some("delete"), None, None).is_none());
        assert!(TaskAction::from_attributes(Some("delete"), Some(""), None).is_none());
        assert!(TaskAction::from_attributes(None, Some("t1"), None).is_none());
    }
}
