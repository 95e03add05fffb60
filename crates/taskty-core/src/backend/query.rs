//! Task Queries

use crate::domain::{Task, UserId};

/// Result ordering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TaskOrder {
    /// Newest first
    #[default]
    CreatedDesc,
    /// Backend default order
    Unordered,
}

/// Filtered, ordered, optionally limited query over the tasks collection
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskQuery {
    pub owner: UserId,
    pub order: TaskOrder,
    pub limit: Option<usize>,
}

impl TaskQuery {
    /// The task-list view: newest first, capped
    pub fn task_list(owner: UserId, limit: usize) -> Self {
        Self {
            owner,
            order: TaskOrder::CreatedDesc,
            limit: Some(limit),
        }
    }

    /// The report view: every task of the owner
    pub fn report(owner: UserId) -> Self {
        Self {
            owner,
            order: TaskOrder::Unordered,
            limit: None,
        }
    }

    pub fn matches(&self, task: &Task) -> bool {
        task.user_id == self.owner
    }

    /// Apply filter, order and limit to a full collection.
    /// Pending timestamps sort as newest.
    pub fn apply<'a>(&self, tasks: impl IntoIterator<Item = &'a Task>) -> Vec<Task> {
        let mut matching: Vec<Task> = tasks
            .into_iter()
            .filter(|t| self.matches(t))
            .cloned()
            .collect();
        if self.order == TaskOrder::CreatedDesc {
            matching.sort_by(|a, b| match (a.created_at, b.created_at) {
                (Some(a), Some(b)) => b.cmp(&a),
                (None, Some(_)) => std::cmp::Ordering::Less,
                (Some(_), None) => std::cmp::Ordering::Greater,
                (None, None) => std::cmp::Ordering::Equal,
            });
        }
        if let Some(limit) = self.limit {
            matching.truncate(limit);
        }
        matching
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::TaskId;
    use chrono::{TimeZone, Utc};

    fn task(id: &str, owner: &str, secs: Option<i64>) -> Task {
        Task {
            id: TaskId::from(id),
            text: id.to_string(),
            completed: false,
            user_id: UserId::from(owner),
            created_at: secs.map(|s| Utc.timestamp_opt(s, 0).unwrap()),
        }
    }

    #[test]
    fn test_task_list_filters_orders_and_limits() {
        let all = vec![
            task("old", "u1", Some(10)),
            task("other", "u2", Some(30)),
            task("new", "u1", Some(20)),
            task("pending", "u1", None),
        ];
        let query = TaskQuery::task_list(UserId::from("u1"), 2);
        let ids: Vec<_> = query.apply(&all).into_iter().map(|t| t.id.0).collect();
        assert_eq!(ids, vec!["pending", "new"]);
    }

    #[test]
    fn test_report_has_no_limit() {
        let all: Vec<Task> = (0..150).map(|i| task(&i.to_string(), "u1", Some(i))).collect();
        assert_eq!(TaskQuery::report(UserId::from("u1")).apply(&all).len(), 150);
        assert_eq!(TaskQuery::task_list(UserId::from("u1"), 100).apply(&all).len(), 100);
    }
}
