//! Report Statistics
//!
//! Aggregates derived from a task snapshot. Never persisted.

use serde::Serialize;

use super::task::Task;

/// Counts over one snapshot
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskStats {
    pub total: usize,
    pub completed: usize,
    pub pending: usize,
    /// Percentage in `0.0..=100.0`; zero when there are no tasks
    pub completion_rate: f64,
}

impl TaskStats {
    pub fn from_tasks(tasks: &[Task]) -> Self {
        let total = tasks.len();
        let completed = tasks.iter().filter(|t| t.completed).count();
        let completion_rate = if total > 0 {
            completed as f64 / total as f64 * 100.0
        } else {
            0.0
        };
        Self {
            total,
            completed,
            pending: total - completed,
            completion_rate,
        }
    }

    /// Completion rate rounded for display
    pub fn rounded_rate(&self) -> u32 {
        self.completion_rate.round() as u32
    }

    /// Header counter text, e.g. `4 total • 3 done`
    pub fn summary(&self) -> String {
        format!("{} total • {} done", self.total, self.completed)
    }
}

/// One row of the report listing
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportEntry {
    pub text: String,
    pub completed: bool,
    pub created: String,
}

impl ReportEntry {
    pub fn status_icon(&self) -> &'static str {
        if self.completed {
            "✅"
        } else {
            "⏳"
        }
    }
}

/// Report over all of a session's tasks
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    pub stats: TaskStats,
    pub entries: Vec<ReportEntry>,
}

impl Report {
    pub const EMPTY_PLACEHOLDER: &'static str =
        "No tasks found. Start adding some tasks to see your report!";

    pub fn from_tasks(tasks: &[Task]) -> Self {
        let entries = tasks
            .iter()
            .map(|task| ReportEntry {
                text: task.text.clone(),
                completed: task.completed,
                created: task.created_label(),
            })
            .collect();
        Self {
            stats: TaskStats::from_tasks(tasks),
            entries,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{TaskId, UserId};

    fn task(id: &str, completed: bool) -> Task {
        Task {
            id: TaskId::from(id),
            text: format!("task {id}"),
            completed,
            user_id: UserId::from("u1"),
            created_at: None,
        }
    }

    #[test]
    fn test_stats_empty() {
        let stats = TaskStats::from_tasks(&[]);
        assert_eq!(stats, TaskStats::default());
        assert_eq!(stats.completion_rate, 0.0);
    }

    #[test]
    fn test_stats_three_of_four() {
        let tasks = vec![task("a", true), task("b", true), task("c", false), task("d", true)];
        let stats = TaskStats::from_tasks(&tasks);
        assert_eq!(stats.total, 4);
        assert_eq!(stats.completed, 3);
        assert_eq!(stats.pending, 1);
        assert_eq!(stats.completion_rate, 75.0);
        assert_eq!(stats.summary(), "4 total • 3 done");
    }

    #[test]
    fn test_rounded_rate() {
        let tasks = vec![task("a", true), task("b", false), task("c", false)];
        assert_eq!(TaskStats::from_tasks(&tasks).rounded_rate(), 33);
    }

    #[test]
    fn test_report_entries() {
        let report = Report::from_tasks(&[task("a", true), task("b", false)]);
        assert!(!report.is_empty());
        assert_eq!(report.entries[0].status_icon(), "✅");
        assert_eq!(report.entries[1].status_icon(), "⏳");
        assert_eq!(report.entries[1].created, "Unknown date");
    }
}
